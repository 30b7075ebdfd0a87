pub mod error;
pub mod hier;
pub mod report;
pub mod sim;
pub mod trace;
pub mod ui;

pub use error::{Result, SimError};
