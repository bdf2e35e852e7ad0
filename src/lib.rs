pub mod config;
pub mod gesture;
pub mod pose;
pub mod session;
