//! Merges a playlist's tracks with their audio features into one flat table.

use std::{collections::HashSet, fmt};

use serde_json::Value;

use crate::{
    Res, info,
    spotify::PlaylistApi,
    table::{Frame, TableError},
    types::{MergedRow, Record},
    warning,
};

/// Market the playlist tracks are requested for.
pub const MARKET: &str = "US";

/// Composite key the tracks and the audio features are joined on.
pub const JOIN_KEYS: [&str; 2] = ["id", "uri"];

/// Suffix for audio feature columns whose name is already taken by a track column.
pub const FEATURE_SUFFIX: &str = "_y";

/// Columns of the merged table, in output order.
pub const OUTPUT_FIELDS: [&str; 18] = [
    "playlist_id",
    "playlist_name",
    "id",
    "name",
    "popularity",
    "acousticness",
    "danceability",
    "duration_ms",
    "energy",
    "instrumentalness",
    "key",
    "liveness",
    "loudness",
    "mode",
    "speechiness",
    "tempo",
    "time_signature",
    "valence",
];

/// The merged result: one row per track, exactly the [`OUTPUT_FIELDS`] columns.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    frame: Frame,
}

impl FeatureTable {
    pub fn columns(&self) -> &[String] {
        self.frame.columns()
    }

    pub fn len(&self) -> usize {
        self.frame.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.is_empty()
    }

    pub fn column(&self, name: &str) -> Result<Vec<&Value>, TableError> {
        self.frame.column(name)
    }

    /// Typed view of every row.
    pub fn rows(&self) -> Result<Vec<MergedRow>, TableError> {
        self.frame.rows()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.frame.into_records()
    }
}

impl fmt::Display for FeatureTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.frame, f)
    }
}

/// Returns the songs of a playlist together with their audio features.
///
/// Reads the playlist through `auth`, flattens every track entry into a row,
/// tags each row with the playlist ID and name, then looks up the audio
/// features of all tracks and full-outer-joins both tables on `id` and `uri`.
/// The joined table is narrowed to [`OUTPUT_FIELDS`].
///
/// The two API calls are issued one after the other. When the playlist has no
/// tracks the audio feature lookup is skipped and an empty table is returned.
/// Rows keep the playlist's track order rather than being sorted by key;
/// audio feature records without a matching track follow at the end.
///
/// # Arguments
///
/// * `auth` - Client able to list playlist tracks and look up audio features
/// * `playlist_id` - Spotify ID of the playlist
///
/// # Errors
///
/// - Errors of the two API calls are returned unchanged
/// - [`TableError::MissingField`] if a track entry has no `track` object
/// - [`TableError::MissingColumn`] if a join key or an output column is absent,
///   e.g. because the audio feature lookup returned no records at all
///
/// # Example
///
/// ```
/// let client = SpotifyClient::from_env()?;
/// let table = songs_and_features(&client, "37i9dQZF1DXcBWIGoYBM5M").await?;
/// for row in table.rows()? {
///     println!("{:?} {:?}", row.name, row.tempo);
/// }
/// ```
pub async fn songs_and_features<A: PlaylistApi>(auth: &A, playlist_id: &str) -> Res<FeatureTable> {
    if playlist_id.trim().is_empty() {
        return Err("playlist id must not be empty".into());
    }

    let results = auth.playlist_tracks(playlist_id, MARKET).await?;
    let playlist_name = results.name;

    let mut songs = Frame::from_records(flatten_tracks(results.tracks.items)?);
    if songs.is_empty() {
        info!("Playlist {} has no tracks", playlist_id);
        return Ok(FeatureTable {
            frame: Frame::empty(&OUTPUT_FIELDS),
        });
    }

    songs.with_constant("playlist_id", Value::from(playlist_id));
    songs.with_constant("playlist_name", Value::from(playlist_name.as_str()));

    let song_ids: Vec<String> = songs
        .column("id")?
        .into_iter()
        .filter_map(|id| id.as_str().map(str::to_string))
        .collect();

    let features = Frame::from_records(auth.audio_features(&song_ids).await?);

    let known: HashSet<&str> = features
        .column("id")
        .map(|ids| ids.into_iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    let missing = song_ids.iter().filter(|id| !known.contains(id.as_str())).count();
    if missing > 0 {
        warning!(
            "{} of {} tracks in playlist {} have no audio features",
            missing,
            song_ids.len(),
            playlist_id
        );
    }

    let mut merged = Frame::outer_join(&songs, &features, &JOIN_KEYS, FEATURE_SUFFIX)?;
    merged.fill_null("playlist_id", Value::from(playlist_id))?;
    merged.fill_null("playlist_name", Value::from(playlist_name.as_str()))?;

    Ok(FeatureTable {
        frame: merged.select(&OUTPUT_FIELDS)?,
    })
}

fn flatten_tracks(items: Vec<Record>) -> Result<Vec<Record>, TableError> {
    items
        .into_iter()
        .enumerate()
        .map(|(row, mut item)| match item.remove("track") {
            Some(Value::Object(track)) => Ok(track),
            _ => Err(TableError::MissingField {
                row,
                field: "track".to_string(),
            }),
        })
        .collect()
}
