use plfeat::config::{DEFAULT_SPOTIFY_API_URL, spotify_access_token, spotify_apiurl};
use plfeat::spotify::SpotifyClient;

// Environment variables are process-wide, so everything touching them lives in one test
#[test]
fn test_environment_settings() {
    unsafe {
        std::env::remove_var("SPOTIFY_API_URL");
        std::env::remove_var("SPOTIFY_ACCESS_TOKEN");
    }

    // Defaults and missing values
    assert_eq!(spotify_apiurl(), DEFAULT_SPOTIFY_API_URL);
    assert!(spotify_access_token().is_err());
    assert!(SpotifyClient::from_env().is_err());

    // Blank token counts as missing
    unsafe {
        std::env::set_var("SPOTIFY_ACCESS_TOKEN", "   ");
    }
    assert!(spotify_access_token().is_err());

    unsafe {
        std::env::set_var("SPOTIFY_API_URL", "http://localhost:1234/v1/");
        std::env::set_var("SPOTIFY_ACCESS_TOKEN", "abc");
    }
    assert_eq!(spotify_apiurl(), "http://localhost:1234/v1");
    assert_eq!(spotify_access_token().unwrap(), "abc");
    assert!(SpotifyClient::from_env().is_ok());
}
