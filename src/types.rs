use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A loosely-typed record: whatever fields the API returned, keyed by name.
pub type Record = Map<String, Value>;

/// Response of the playlist track-listing call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistQueryResult {
    pub name: String,
    pub tracks: TrackPage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackPage {
    /// Track entries, each nesting the track itself under `"track"`.
    pub items: Vec<Record>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AudioFeaturesResponse {
    pub audio_features: Vec<Option<Record>>,
}

/// One row of the merged output, narrowed to the fixed output schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRow {
    pub playlist_id: String,
    pub playlist_name: String,
    pub id: Option<String>,
    pub name: Option<String>,
    pub popularity: Option<u32>,
    pub acousticness: Option<f64>,
    pub danceability: Option<f64>,
    pub duration_ms: Option<u64>,
    pub energy: Option<f64>,
    pub instrumentalness: Option<f64>,
    pub key: Option<i32>,
    pub liveness: Option<f64>,
    pub loudness: Option<f64>,
    pub mode: Option<i32>,
    pub speechiness: Option<f64>,
    pub tempo: Option<f64>,
    pub time_signature: Option<u32>,
    pub valence: Option<f64>,
}
