//! Effect handlers.
//!
//! Pure async functions that perform the I/O behind a [`UiEffect`] and
//! return the [`UiEvent`] carrying the result. The runtime spawns them and
//! routes the returned event back through the reducer via the inbox.

use taleweave_core::api::{GenerateRequest, TaleClient};
use taleweave_core::session::mask_token;
use taleweave_core::tale::Tale;

use crate::events::{AudioEvent, UiEvent};
use crate::overlays::AuthMode;

fn error_chain(error: &anyhow::Error) -> String {
    format!("{error:#}")
}

pub async fn generate(client: TaleClient, request: GenerateRequest) -> UiEvent {
    let result = client
        .generate(&request)
        .await
        .map_err(|error| error_chain(&error));
    UiEvent::Generated(result)
}

pub async fn authenticate(
    client: TaleClient,
    mode: AuthMode,
    name: String,
    email: String,
    password: String,
) -> UiEvent {
    let result = match mode {
        AuthMode::Login => client.login(&email, &password).await,
        AuthMode::Register => client.register(&name, &email, &password).await,
    };
    if result.is_ok()
        && let Some(token) = client.session().token()
    {
        tracing::debug!(token = %mask_token(&token), "bearer token stored");
    }
    UiEvent::AuthFinished {
        mode,
        name,
        email,
        result: result.map_err(|error| error_chain(&error)),
    }
}

pub async fn fetch_stories(client: TaleClient) -> UiEvent {
    let result = client
        .stories()
        .await
        .map_err(|error| error_chain(&error));
    UiEvent::StoriesLoaded(result)
}

pub async fn toggle_save(client: TaleClient, tale: Tale) -> UiEvent {
    let result = client
        .toggle_save(&tale)
        .await
        .map_err(|error| error_chain(&error));
    UiEvent::SaveToggled { tale, result }
}

pub async fn fetch_audio(client: TaleClient, tale: Tale) -> UiEvent {
    let Some(audio_url) = tale.audio_url.clone() else {
        return UiEvent::Audio(AudioEvent::FetchFailed {
            tale_id: tale.id,
            error: "Tale has no narration audio".to_string(),
        });
    };
    match client.fetch_audio(&audio_url).await {
        Ok(bytes) => UiEvent::Audio(AudioEvent::Fetched {
            tale_id: tale.id,
            bytes,
        }),
        Err(error) => UiEvent::Audio(AudioEvent::FetchFailed {
            tale_id: tale.id,
            error: error_chain(&error),
        }),
    }
}
