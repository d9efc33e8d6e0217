//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the library.

pub mod demo;
pub mod session;

pub use demo::handle_demo_command;
pub use session::{
    handle_chart_command, handle_export_command, handle_run_command, handle_show_command,
    handle_summary_command,
};
