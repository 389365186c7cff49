//! One-shot generation handler.

use anyhow::{Context, Result};
use taleweave_core::api::GenerateRequest;
use taleweave_core::config::Config;
use taleweave_core::draft::{CulturalFit, Language, ScientificTopic, StoryLength};
use taleweave_core::text;

use super::client;

pub struct GenerateOptions<'a> {
    pub config: &'a Config,
    pub topic: String,
    pub age: String,
    pub moral: String,
    pub length: String,
    pub language: String,
    pub culture: String,
    pub science: Option<String>,
    pub with_audio: bool,
}

pub async fn run(opts: GenerateOptions<'_>) -> Result<()> {
    let request = build_request(&opts)?;
    let client = client(opts.config)?;

    tracing::info!(length = %request.length, language = %request.language, "generating story");
    let tale = client
        .generate(&request)
        .await
        .context("generation failed (are you signed in?)")?;

    let clean = text::clean_text(&tale.text);
    println!("{}\n", clean.title);
    println!("{}", clean.story);
    if let Some(audio_url) = &tale.audio_url {
        let url = client.resolve(audio_url)?;
        println!("\nNarration: {url}");
    }
    Ok(())
}

fn build_request(opts: &GenerateOptions<'_>) -> Result<GenerateRequest> {
    anyhow::ensure!(!opts.topic.trim().is_empty(), "Topic must not be empty");

    let length = StoryLength::from_value(&opts.length)
        .with_context(|| format!("Unknown length '{}' (short, medium, long)", opts.length))?;
    let language = Language::from_label(&opts.language)
        .with_context(|| format!("Unknown language '{}'", opts.language))?;
    let culture = CulturalFit::from_value(&opts.culture)
        .with_context(|| format!("Unknown culture '{}'", opts.culture))?;

    // Known sub-topics submit their value, anything else is free text.
    let scientific_note = opts.science.as_deref().map(|science| {
        ScientificTopic::ALL
            .into_iter()
            .find(|topic| topic.value() == science)
            .map_or_else(|| science.trim().to_string(), |topic| topic.value().to_string())
    });

    Ok(GenerateRequest {
        age: opts.age.clone(),
        topic: opts.topic.clone(),
        moral: opts.moral.clone(),
        length: length.value().to_string(),
        language: language.value().to_string(),
        culture: match culture {
            CulturalFit::Universal => None,
            other => Some(other.value().to_string()),
        },
        scientific_note,
        with_audio: opts.with_audio,
    })
}
