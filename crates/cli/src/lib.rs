//! Cashdesk CLI - interactive console for bank accounts
//!
//! This crate provides the `cashdesk` binary and the menu-driven shell it runs.

pub mod config;
pub mod render;
pub mod shell;

pub use config::ShellConfig;
pub use shell::Shell;
