//! Saved-tales command handlers.

use anyhow::{Context, Result};
use chrono::Local;
use comfy_table::{ContentArrangement, Table};
use taleweave_core::config::Config;
use taleweave_core::text;

use super::client;

pub async fn list(config: &Config) -> Result<()> {
    let client = client(config)?;
    let tales = client.stories().await.context("fetch saved tales")?;
    if tales.is_empty() {
        println!("No tales saved yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Title", "Saved", "Audio"]);
    for tale in &tales {
        let clean = text::clean_text(&tale.text);
        let date = tale.date.with_timezone(&Local).format("%B %-d, %Y");
        table.add_row(vec![
            tale.id.clone(),
            clean.title,
            date.to_string(),
            if tale.audio_url.is_some() { "yes" } else { "-" }.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub async fn show(config: &Config, id: &str) -> Result<()> {
    let client = client(config)?;
    let tales = client.stories().await.context("fetch saved tales")?;
    let Some(tale) = tales.iter().find(|tale| tale.id == id) else {
        anyhow::bail!("No saved tale with id '{id}'");
    };

    let clean = text::clean_text(&tale.text);
    println!("{}\n", clean.title);
    println!("{}", clean.story);
    Ok(())
}
