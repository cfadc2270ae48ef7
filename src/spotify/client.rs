use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config;

/// Spotify Web API client authenticated with a bearer token.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    access_token: String,
}

impl SpotifyClient {
    pub fn new(api_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into(),
            access_token: access_token.into(),
        }
    }

    /// Builds a client from `SPOTIFY_API_URL` and `SPOTIFY_ACCESS_TOKEN`.
    pub fn from_env() -> Result<Self, String> {
        Ok(Self::new(
            config::spotify_apiurl(),
            config::spotify_access_token()?,
        ))
    }

    /// Issues an authenticated GET against `path` and decodes the JSON body.
    ///
    /// A spinner with `message` is shown while the request is in flight.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        message: &str,
    ) -> Result<T, reqwest::Error> {
        let api_url = format!("{uri}{path}", uri = &self.api_url, path = path);

        let pb = spinner(message);
        let response = self
            .http
            .get(&api_url)
            .query(query)
            .bearer_auth(&self.access_token)
            .send()
            .await;

        let response = match response {
            Ok(resp) => match resp.error_for_status() {
                Ok(valid_response) => valid_response,
                Err(err) => {
                    pb.finish_and_clear();
                    return Err(err);
                }
            },
            Err(err) => {
                pb.finish_and_clear();
                return Err(err);
            } // network or reqwest error
        };

        pb.finish_and_clear();
        response.json::<T>().await
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
