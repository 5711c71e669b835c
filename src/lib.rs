pub mod answers;
pub mod checklist;
pub mod config;
pub mod error;
pub mod export;
pub mod report;
pub mod session;
pub mod ui;

pub use error::{AppError, Result};
