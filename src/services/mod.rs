pub mod extract_service;
pub mod point_service;
pub mod sink_service;
