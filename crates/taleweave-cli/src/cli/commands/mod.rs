//! Subcommand handlers.

pub mod auth;
pub mod config;
pub mod generate;
pub mod stories;

use std::sync::Arc;

use anyhow::Result;
use taleweave_core::api::TaleClient;
use taleweave_core::config::Config;
use taleweave_core::session::Session;

/// Creates an API client with the persisted session.
pub fn client(config: &Config) -> Result<TaleClient> {
    TaleClient::new(&config.base_url, Arc::new(Session::load()))
}
