mod catalog;
mod error;
mod ratings;
mod types;

pub use catalog::CatalogClient;
pub use error::ApiError;
pub use ratings::RatingsClient;
pub use types::{Film, FilmDetail, FilmPage, RatingSource, Ratings};

#[cfg(test)]
pub(crate) use types::sample_film;


use std::future::Future;
use std::time::Duration;

use crate::config::Config;

/// Data-access capability used by the view layer.
///
/// The production implementation talks HTTP; tests substitute in-memory fakes.
pub trait FilmSource: Send + Sync + 'static {
    fn list_films(&self) -> impl Future<Output = Result<FilmPage, ApiError>> + Send;

    fn get_film_detail(
        &self,
        locator: &str,
    ) -> impl Future<Output = Result<FilmDetail, ApiError>> + Send;

    fn get_ratings(
        &self,
        title: &str,
        year: i32,
    ) -> impl Future<Output = Result<Ratings, ApiError>> + Send;
}

/// Catalog + ratings clients sharing one connection pool.
#[derive(Debug, Clone)]
pub struct HttpFilmSource {
    catalog: CatalogClient,
    ratings: RatingsClient,
}

impl HttpFilmSource {
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let ratings = RatingsClient::new(
            http.clone(),
            config.ratings_url.clone(),
            config.ratings_api_key.clone(),
        );
        if !ratings.has_api_key() {
            log::warn!("No ratings API key configured; all films will show neutral ratings");
        }

        Ok(Self {
            catalog: CatalogClient::new(http, config.catalog_url.clone()),
            ratings,
        })
    }
}

impl FilmSource for HttpFilmSource {
    async fn list_films(&self) -> Result<FilmPage, ApiError> {
        self.catalog.list_films().await
    }

    async fn get_film_detail(&self, locator: &str) -> Result<FilmDetail, ApiError> {
        self.catalog.get_film_detail(locator).await
    }

    async fn get_ratings(&self, title: &str, year: i32) -> Result<Ratings, ApiError> {
        self.ratings.get_ratings(title, year).await
    }
}
