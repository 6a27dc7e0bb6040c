// Dialogue presentation engine

pub mod cli;
pub mod config;
pub mod dialogue;
pub mod input;
pub mod logging;
pub mod propfile;
pub mod time;

pub use cli::Cli;
pub use config::Options;
pub use dialogue::DialogueEngine;
pub use logging::LogLevel;
