//! Delta CLI
//!
//! File-level conversion around the compiler:
//! - Command-line argument parsing
//! - JSON configuration loading
//! - Read, compile, render and atomically write one instruction file

mod args;
mod convert;
mod error;

pub use args::{CliArgs, USAGE};
pub use convert::{convert, convert_file, load_config, ConvertSummary};
pub use error::{ConvertError, ConvertResult};
