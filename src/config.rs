//! Configuration management for the playlist feature merger.
//!
//! Configuration values come from environment variables, optionally seeded from
//! a `.env` file in the local data directory:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

/// Default base URL of the Spotify Web API.
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file is looked up under `plfeat/.env` in the platform-specific local
/// data directory:
/// - Linux: `~/.local/share/plfeat/.env`
/// - macOS: `~/Library/Application Support/plfeat/.env`
/// - Windows: `%LOCALAPPDATA%/plfeat/.env`
///
/// A missing file is not an error; variables already present in the process
/// environment are never overridden.
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or the file
/// exists but cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.exists() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| e.to_string())
}

/// Returns the Spotify Web API base URL.
///
/// Reads `SPOTIFY_API_URL`, falling back to [`DEFAULT_SPOTIFY_API_URL`]. A
/// trailing slash is stripped so endpoint paths can be appended directly.
///
/// # Example
///
/// ```
/// let api_url = spotify_apiurl(); // e.g., "https://api.spotify.com/v1"
/// ```
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL")
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| DEFAULT_SPOTIFY_API_URL.to_string())
}

/// Returns the bearer token used for Spotify Web API requests.
///
/// Reads `SPOTIFY_ACCESS_TOKEN`. Obtaining or refreshing the token is left to
/// the caller.
///
/// # Errors
///
/// Returns an error string if the variable is unset or empty.
pub fn spotify_access_token() -> Result<String, String> {
    match env::var("SPOTIFY_ACCESS_TOKEN") {
        Ok(token) if !token.trim().is_empty() => Ok(token),
        _ => Err("SPOTIFY_ACCESS_TOKEN must be set".to_string()),
    }
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("plfeat/.env");
    path
}
