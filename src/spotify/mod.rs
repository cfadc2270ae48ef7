//! # Spotify Integration Module
//!
//! This module describes the two read capabilities the merge routine needs from
//! the Spotify Web API and provides an HTTP implementation of them.
//!
//! ## Architecture
//!
//! ```text
//! merge::songs_and_features
//!          ↓
//! PlaylistApi (capability trait)
//!     ├── playlist_tracks  (GET /playlists/{id}?market=M)
//!     └── audio_features   (GET /audio-features?ids=…)
//!          ↓
//! SpotifyClient (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! The trait is the seam between the reshaping logic and the network: tests
//! and callers with their own client implement [`PlaylistApi`] directly, while
//! [`SpotifyClient`] talks to the real service using a bearer token.
//!
//! ## Error Handling
//!
//! Non-success statuses and transport failures surface as `reqwest::Error`
//! inside the crate's boxed [`Res`]. Nothing is retried, and only the first
//! page of a playlist is read.
//!
//! ## Usage
//!
//! ```rust
//! let client = SpotifyClient::from_env()?;
//! let playlist = client.playlist_tracks("37i9dQZF1DXcBWIGoYBM5M", "US").await?;
//! let ids: Vec<String> = vec!["4uLU6hMCjMI75M1A2tKUQC".to_string()];
//! let features = client.audio_features(&ids).await?;
//! ```

mod client;
mod features;
mod playlist;

pub use client::SpotifyClient;

use crate::{
    Res,
    types::{PlaylistQueryResult, Record},
};

/// Read access to a playlist and to the audio features of its tracks.
#[allow(async_fn_in_trait)]
pub trait PlaylistApi {
    /// Returns the playlist with its display name and its track entries,
    /// restricted to tracks playable in `market`.
    async fn playlist_tracks(&self, playlist_id: &str, market: &str) -> Res<PlaylistQueryResult>;

    /// Returns one audio feature record per known track id.
    async fn audio_features(&self, track_ids: &[String]) -> Res<Vec<Record>>;
}

impl PlaylistApi for SpotifyClient {
    async fn playlist_tracks(&self, playlist_id: &str, market: &str) -> Res<PlaylistQueryResult> {
        Ok(playlist::get_playlist(self, playlist_id, market).await?)
    }

    async fn audio_features(&self, track_ids: &[String]) -> Res<Vec<Record>> {
        Ok(features::get_audio_features(self, track_ids).await?)
    }
}
