use super::error::ApiError;
use super::types::{Ratings, RatingsResponse};

/// HTTP client for the ratings service (OMDb).
#[derive(Debug, Clone)]
pub struct RatingsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RatingsClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    fn query_params(&self, title: &str, year: i32) -> [(&'static str, String); 3] {
        [
            ("apikey", self.api_key.clone()),
            ("t", title.to_string()),
            ("y", format!("{year:04}")),
        ]
    }

    /// Look up ratings by title and release year.
    ///
    /// A miss is reported by the service as HTTP 200 with `Response: "False"`
    /// and comes back as `ApiError::NotFound`.
    pub async fn get_ratings(&self, title: &str, year: i32) -> Result<Ratings, ApiError> {
        if !self.has_api_key() {
            return Err(ApiError::MissingApiKey);
        }

        let resp = self
            .http
            .get(&self.base_url)
            .query(&self.query_params(title, year))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: self.base_url.clone(),
            });
        }

        let text = resp.text().await?;
        let parsed: RatingsResponse =
            serde_json::from_str(&text).map_err(|e| ApiError::decode(e, &text))?;

        if parsed.is_miss() {
            let reason = parsed
                .error
                .unwrap_or_else(|| "no match".to_string());
            return Err(ApiError::NotFound(format!("{title} ({year}): {reason}")));
        }

        Ok(Ratings::from(parsed))
    }
}
