//! Full-screen TUI for Taleweave.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
pub use runtime::TuiRuntime;
use taleweave_core::config::Config;

/// Runs the interactive fairy-tale TUI.
///
/// `tale` opens a saved tale directly in the reading view once the
/// collection has loaded.
pub async fn run_tui(config: &Config, tale: Option<String>) -> Result<()> {
    // The TUI needs a terminal to render into.
    if !stderr().is_terminal() {
        anyhow::bail!(
            "Interactive mode requires a terminal.\n\
             Use `taleweave generate --topic '...'` for non-interactive use."
        );
    }

    let mut runtime = TuiRuntime::new(config.clone(), tale)?;
    runtime.run()?;

    Ok(())
}
