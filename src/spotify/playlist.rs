use crate::{spotify::SpotifyClient, types::PlaylistQueryResult};

/// Retrieves a playlist together with its first page of track entries.
///
/// Uses Spotify's `/playlists/{id}` endpoint. The `market` parameter restricts
/// the returned tracks to those playable in that country, and relinks tracks
/// where the API offers a market-specific version.
///
/// # Arguments
///
/// * `client` - Authenticated client
/// * `playlist_id` - Spotify ID of the playlist
/// * `market` - ISO 3166-1 alpha-2 country code, e.g. `"US"`
///
/// # Returns
///
/// - `Ok(PlaylistQueryResult)` - Playlist name and its track entries
/// - `Err(reqwest::Error)` - Network error, non-success status (invalid id,
///   expired token, ...) or a body without `name` / `tracks.items`
///
/// # Example
///
/// ```
/// let playlist = get_playlist(&client, "37i9dQZF1DXcBWIGoYBM5M", "US").await?;
/// println!("{} has {} tracks", playlist.name, playlist.tracks.items.len());
/// ```
pub async fn get_playlist(
    client: &SpotifyClient,
    playlist_id: &str,
    market: &str,
) -> Result<PlaylistQueryResult, reqwest::Error> {
    client
        .get_json::<PlaylistQueryResult>(
            &format!("/playlists/{id}", id = playlist_id),
            &[("market", market)],
            "Fetching playlist tracks...",
        )
        .await
}
