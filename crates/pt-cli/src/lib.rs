//! Potty Trainer CLI library.

mod cli;
mod config;
pub mod source;

pub use cli::Cli;
pub use config::Config;
