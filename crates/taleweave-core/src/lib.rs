//! Core library for Taleweave: configuration, session storage, the backend
//! API client, and the pure tale-processing logic shared by the TUI and CLI.

pub mod api;
pub mod config;
pub mod draft;
pub mod library;
pub mod logging;
pub mod session;
pub mod tale;
pub mod text;
