use super::*;

#[test]
fn default_points_at_local_backend() {
    let config = AppConfig::default();
    assert_eq!(config.api_base_url, "http://localhost:8000/api");
}

#[test]
fn normalize_base_url_trims_trailing_slashes() {
    assert_eq!(normalize_base_url("http://localhost:8000/api/"), "http://localhost:8000/api");
    assert_eq!(normalize_base_url("https://api.example.com//"), "https://api.example.com");
    assert_eq!(normalize_base_url("http://localhost:8000/api"), "http://localhost:8000/api");
}
