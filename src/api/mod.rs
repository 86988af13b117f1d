pub mod elen;
