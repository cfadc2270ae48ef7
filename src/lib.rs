//! Playlist Audio Feature Library
//!
//! This library fetches the tracks of a Spotify playlist together with their
//! audio features and merges both into one flat table, one row per track, ready
//! to be fed into a model.
//!
//! # Modules
//!
//! - `config` - Configuration management and environment variables
//! - `merge` - The playlist/audio feature merge routine
//! - `spotify` - Spotify Web API capability trait and HTTP client
//! - `table` - Loosely-typed in-memory table operations
//! - `types` - Data structures and type definitions
//!
//! # Example
//!
//! ```
//! use plfeat::{config, merge, spotify::SpotifyClient};
//!
//! #[tokio::main]
//! async fn main() -> plfeat::Res<()> {
//!     config::load_env().await?;
//!     let client = SpotifyClient::from_env()?;
//!     let table = merge::songs_and_features(&client, "37i9dQZF1DXcBWIGoYBM5M").await?;
//!     println!("{}", table);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod merge;
pub mod spotify;
pub mod table;
pub mod types;

/// A convenient Result type alias for operations that may fail.
///
/// Errors raised by the API capabilities and by the table reshaping are both
/// carried through this boxed trait object unchanged, so callers can downcast
/// to `reqwest::Error` or [`table::TableError`] when they need to tell them apart.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Playlist {} has no tracks", playlist_id);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for degenerate but tolerated situations, such as tracks for which the
/// API returned no audio features.
///
/// # Example
///
/// ```
/// warning!("{} tracks have no audio features", count);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
