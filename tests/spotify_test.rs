use mockito::{Matcher, Server};
use plfeat::merge::songs_and_features;
use plfeat::spotify::{PlaylistApi, SpotifyClient};
use reqwest::StatusCode;
use serde_json::json;

const TOKEN: &str = "test-token";

// Helper function to create a playlist response body
fn playlist_body() -> String {
    json!({
        "id": "P1",
        "name": "Test",
        "tracks": {
            "href": "https://api.spotify.com/v1/playlists/P1/tracks",
            "total": 2,
            "items": [
                {"track": {"id": "T1", "name": "Song A", "uri": "spotify:track:T1", "popularity": 10}},
                {"track": {"id": "T2", "name": "Song B", "uri": "spotify:track:T2", "popularity": 20}}
            ]
        }
    })
    .to_string()
}

// Helper function to create an audio feature object
fn feature(id: &str, tempo: f64) -> serde_json::Value {
    json!({
        "id": id,
        "uri": format!("spotify:track:{}", id),
        "acousticness": 0.5,
        "danceability": 0.5,
        "duration_ms": 180000,
        "energy": 0.5,
        "instrumentalness": 0.0,
        "key": 2,
        "liveness": 0.1,
        "loudness": -7.0,
        "mode": 0,
        "speechiness": 0.03,
        "tempo": tempo,
        "time_signature": 4,
        "valence": 0.4
    })
}

#[tokio::test]
async fn test_playlist_tracks_sends_market_and_token() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Regex(r"^/playlists/P1".to_string()))
        .match_query(Matcher::UrlEncoded("market".into(), "US".into()))
        .match_header("authorization", format!("Bearer {}", TOKEN).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(playlist_body())
        .create_async()
        .await;

    let client = SpotifyClient::new(server.url(), TOKEN);
    let playlist = client.playlist_tracks("P1", "US").await.unwrap();

    mock.assert_async().await;
    assert_eq!(playlist.name, "Test");
    assert_eq!(playlist.tracks.items.len(), 2);
    assert_eq!(playlist.tracks.items[0]["track"]["id"], json!("T1"));
}

#[tokio::test]
async fn test_playlist_tracks_propagates_http_status() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", Matcher::Regex(r"^/playlists/".to_string()))
        .with_status(404)
        .with_body(r#"{"error": {"status": 404, "message": "Invalid playlist Id"}}"#)
        .create_async()
        .await;

    let client = SpotifyClient::new(server.url(), TOKEN);
    let err = client.playlist_tracks("nope", "US").await.unwrap_err();

    let status = err
        .downcast_ref::<reqwest::Error>()
        .and_then(|e| e.status());
    assert_eq!(status, Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn test_playlist_without_tracks_object_fails() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", Matcher::Regex(r"^/playlists/P1".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"id": "P1", "name": "Test"}).to_string())
        .create_async()
        .await;

    let client = SpotifyClient::new(server.url(), TOKEN);

    assert!(client.playlist_tracks("P1", "US").await.is_err());
}

#[tokio::test]
async fn test_audio_features_joins_ids_and_drops_unknown() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Regex(r"^/audio-features".to_string()))
        .match_query(Matcher::UrlEncoded("ids".into(), "T1,T2".into()))
        .match_header("authorization", format!("Bearer {}", TOKEN).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"audio_features": [feature("T1", 120.0), null]}).to_string())
        .create_async()
        .await;

    let client = SpotifyClient::new(server.url(), TOKEN);
    let ids = vec!["T1".to_string(), "T2".to_string()];
    let features = client.audio_features(&ids).await.unwrap();

    mock.assert_async().await;
    assert_eq!(features.len(), 1);
    assert_eq!(features[0]["id"], json!("T1"));
}

#[tokio::test]
async fn test_songs_and_features_over_http() {
    let mut server = Server::new_async().await;
    let playlist = server
        .mock("GET", Matcher::Regex(r"^/playlists/P1".to_string()))
        .match_query(Matcher::UrlEncoded("market".into(), "US".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(playlist_body())
        .expect(1)
        .create_async()
        .await;
    let features = server
        .mock("GET", Matcher::Regex(r"^/audio-features".to_string()))
        .match_query(Matcher::UrlEncoded("ids".into(), "T1,T2".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"audio_features": [feature("T1", 120.0), feature("T2", 90.0)]}).to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let client = SpotifyClient::new(server.url(), TOKEN);
    let table = songs_and_features(&client, "P1").await.unwrap();

    playlist.assert_async().await;
    features.assert_async().await;

    let rows = table.rows().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].playlist_name, "Test");
    assert_eq!(rows[0].popularity, Some(10));
    assert_eq!(rows[0].tempo, Some(120.0));
    assert_eq!(rows[1].name.as_deref(), Some("Song B"));
    assert_eq!(rows[1].tempo, Some(90.0));
}
