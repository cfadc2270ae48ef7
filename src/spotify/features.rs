use crate::{
    spotify::SpotifyClient,
    types::{AudioFeaturesResponse, Record},
};

/// Retrieves audio features for several tracks in a single API request.
///
/// The IDs are joined with commas into the `ids` query parameter of the
/// `/audio-features` endpoint. Spotify answers with one slot per requested ID
/// and `null` for IDs it does not know; those slots are dropped, so the result
/// may be shorter than `track_ids`.
///
/// The request is not split into batches. Spotify accepts at most 100 IDs per
/// call, which matches the size of the first playlist page.
///
/// # Returns
///
/// - `Ok(Vec<Record>)` - One record per known track, in response order
/// - `Err(reqwest::Error)` - Network error, non-success status or malformed body
pub async fn get_audio_features(
    client: &SpotifyClient,
    track_ids: &[String],
) -> Result<Vec<Record>, reqwest::Error> {
    let ids = track_ids.join(",");

    let json = client
        .get_json::<AudioFeaturesResponse>(
            "/audio-features",
            &[("ids", ids.as_str())],
            "Fetching audio features...",
        )
        .await?;

    Ok(json.audio_features.into_iter().flatten().collect())
}
