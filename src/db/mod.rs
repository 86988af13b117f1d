//! The two stores price points are written to
//!
//! `influx` is always written, `prices` only when a MariaDB/MySQL DSN is configured.

pub mod influx;
pub mod prices;
