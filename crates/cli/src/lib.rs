//! Command line front end of Refactor Toolbox.
//!
//! Each subcommand loads one source file into an engine
//! [`Session`](engine::Session) and prints a view of it.

pub mod args;
pub mod config;
pub mod languages;
pub mod output;
pub mod search;
pub mod source;
pub mod terms;
pub mod tree;
pub mod ui;
