//! Wayfinder CLI library.
//!
//! This crate provides the command handlers, output formatting and terminal
//! styling used by the `wayfinder` binary.

pub mod commands;
pub mod output;
pub mod terminal;
