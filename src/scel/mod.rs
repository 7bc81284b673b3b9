//! Core cell dictionary reader module

pub mod format;
pub mod iter;
pub mod reader;
pub mod types;
pub mod utils;

pub use reader::ScelReader;
pub use types::error::{ErrorKind, Result, ScelError};
pub use types::models;
