pub mod config;
pub mod log;
pub mod results;
pub mod top;
