use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::types::{FilmDetail, FilmPage};

/// HTTP client for the film catalog (SWAPI).
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// URL of the film list endpoint.
    pub fn films_url(&self) -> String {
        format!("{}/films/?format=json", self.base_url.trim_end_matches('/'))
    }

    /// Resolve a detail locator. Absolute URLs are used as-is, anything else
    /// is joined onto the base URL.
    pub fn resolve(&self, locator: &str) -> String {
        if locator.starts_with("http://") || locator.starts_with("https://") {
            locator.to_string()
        } else {
            format!(
                "{}/{}",
                self.base_url.trim_end_matches('/'),
                locator.trim_start_matches('/')
            )
        }
    }

    /// Fetch the full film list.
    pub async fn list_films(&self) -> Result<FilmPage, ApiError> {
        let url = self.films_url();
        log::debug!("GET {}", url);
        self.get_json(&url).await
    }

    /// Fetch the detail record behind a film's locator.
    pub async fn get_film_detail(&self, locator: &str) -> Result<FilmDetail, ApiError> {
        let url = self.resolve(locator);
        log::debug!("GET {}", url);
        self.get_json(&url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let resp = self.http.get(url).send().await?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let text = resp.text().await?;
        serde_json::from_str(&text).map_err(|e| ApiError::decode(e, &text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server::serve_once;

    fn client(base: &str) -> CatalogClient {
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        CatalogClient::new(http, base)
    }

    #[test]
    fn test_films_url_with_and_without_slash() {
        assert_eq!(
            client("https://swapi.py4e.com/api/").films_url(),
            "https://swapi.py4e.com/api/films/?format=json"
        );
        assert_eq!(
            client("https://swapi.py4e.com/api").films_url(),
            "https://swapi.py4e.com/api/films/?format=json"
        );
    }

    #[test]
    fn test_resolve_absolute_locator() {
        let c = client("https://swapi.py4e.com/api/");
        assert_eq!(
            c.resolve("https://swapi.py4e.com/api/films/1/"),
            "https://swapi.py4e.com/api/films/1/"
        );
    }

    #[test]
    fn test_resolve_relative_locator() {
        let c = client("https://swapi.py4e.com/api/");
        assert_eq!(c.resolve("/films/2/"), "https://swapi.py4e.com/api/films/2/");
        assert_eq!(c.resolve("films/3/"), "https://swapi.py4e.com/api/films/3/");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_http_error() {
        // Port 9 on localhost is discard; nothing should be listening.
        let c = client("http://127.0.0.1:9/api/");
        let err = c.list_films().await.unwrap_err();
        assert!(matches!(err, ApiError::Http(_)));
    }

    #[tokio::test]
    async fn test_server_error_is_status() {
        let base = serve_once("500 Internal Server Error", "{}").await;
        let err = client(&base).list_films().await.unwrap_err();
        match err {
            ApiError::Status { status, url } => {
                assert_eq!(status, 500);
                assert!(url.ends_with("/films/?format=json"));
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let base = serve_once("200 OK", "{\"count\": 6, \"results\": [").await;
        let err = client(&base).list_films().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_detail_not_found() {
        let base = serve_once("404 Not Found", "{\"detail\": \"Not found\"}").await;
        let err = client(&base).get_film_detail("films/99/").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(url) if url.ends_with("/films/99/")));
    }
}
