pub mod boundary;
pub mod cli;
pub mod command;
pub mod config;
pub mod docs;
pub mod error;
pub mod manifest;
pub mod ui;

pub use error::{ReleaseError, Result};
