use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A film as returned by the catalog list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Film {
    pub title: String,
    pub episode_id: u32,
    pub release_date: NaiveDate,
    /// Detail-resource locator; also the film's stable identity in this app.
    pub url: String,
    /// Remaining catalog fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Film {
    pub fn year(&self) -> i32 {
        self.release_date.year()
    }
}

/// Extended record fetched lazily from a film's locator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilmDetail {
    pub title: String,
    pub episode_id: u32,
    pub release_date: NaiveDate,
    pub url: String,
    #[serde(default)]
    pub opening_crawl: String,
    #[serde(default)]
    pub director: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response shape of the catalog list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilmPage {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<Film>,
}

/// One (source, value) pair from the ratings service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingSource {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Value")]
    pub value: String,
}

/// Raw response of the ratings service. Misses come back as HTTP 200 with
/// `Response: "False"`.
#[derive(Debug, Deserialize)]
pub(crate) struct RatingsResponse {
    #[serde(rename = "Response", default)]
    pub response: Option<String>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<String>,
    #[serde(rename = "Ratings", default)]
    pub ratings: Vec<RatingSource>,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
}

impl RatingsResponse {
    pub fn is_miss(&self) -> bool {
        self.response
            .as_deref()
            .is_some_and(|r| r.eq_ignore_ascii_case("false"))
    }
}

/// Ratings for a single film. Absence is represented by `Ratings::unavailable()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ratings {
    /// Aggregate IMDb score as text, "N/A" when unknown.
    pub score: String,
    pub sources: Vec<RatingSource>,
    pub poster: Option<String>,
}

impl Ratings {
    /// Neutral value used whenever a ratings lookup fails.
    pub fn unavailable() -> Self {
        Self {
            score: "N/A".to_string(),
            sources: Vec::new(),
            poster: None,
        }
    }

    /// Aggregate score on the service's 0-10 scale, if it parses.
    pub fn imdb_score(&self) -> Option<f64> {
        self.score
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
    }

    /// Score rescaled to `0..=total_stars`; 0 when unknown.
    pub fn star_score(&self, total_stars: u8) -> f64 {
        self.imdb_score()
            .map(|s| (s / 10.0 * f64::from(total_stars)).min(f64::from(total_stars)))
            .unwrap_or(0.0)
    }
}

impl From<RatingsResponse> for Ratings {
    fn from(resp: RatingsResponse) -> Self {
        let poster = resp
            .poster
            .filter(|p| !p.is_empty() && p != "N/A");
        Self {
            score: resp
                .imdb_rating
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "N/A".to_string()),
            sources: resp.ratings,
            poster,
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_film(title: &str, episode_id: u32, release_date: &str) -> Film {
    Film {
        title: title.to_string(),
        episode_id,
        release_date: NaiveDate::parse_from_str(release_date, "%Y-%m-%d")
            .expect("valid test date"),
        url: format!("https://swapi.test/api/films/{episode_id}/"),
        extra: Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILM_JSON: &str = r#"{
        "title": "A New Hope",
        "episode_id": 4,
        "opening_crawl": "It is a period of civil war.",
        "director": "George Lucas",
        "producer": "Gary Kurtz, Rick McCallum",
        "release_date": "1977-05-25",
        "characters": ["https://swapi.py4e.com/api/people/1/"],
        "url": "https://swapi.py4e.com/api/films/1/"
    }"#;

    #[test]
    fn test_film_keeps_unknown_fields() {
        let film: Film = serde_json::from_str(FILM_JSON).unwrap();
        assert_eq!(film.title, "A New Hope");
        assert_eq!(film.episode_id, 4);
        assert_eq!(film.year(), 1977);
        assert_eq!(
            film.extra.get("producer").and_then(Value::as_str),
            Some("Gary Kurtz, Rick McCallum")
        );
        assert!(film.extra.contains_key("characters"));
    }

    #[test]
    fn test_detail_parses_crawl_and_director() {
        let detail: FilmDetail = serde_json::from_str(FILM_JSON).unwrap();
        assert_eq!(detail.director, "George Lucas");
        assert!(detail.opening_crawl.starts_with("It is a period"));
    }

    #[test]
    fn test_page_metadata_optional() {
        let page: FilmPage =
            serde_json::from_str(&format!(r#"{{"results": [{}]}}"#, FILM_JSON)).unwrap();
        assert_eq!(page.count, 0);
        assert!(page.next.is_none());
        assert_eq!(page.results.len(), 1);
    }

    #[test]
    fn test_ratings_from_response() {
        let raw = r#"{
            "Title": "Star Wars",
            "imdbRating": "8.6",
            "Ratings": [
                {"Source": "Internet Movie Database", "Value": "8.6/10"},
                {"Source": "Rotten Tomatoes", "Value": "93%"}
            ],
            "Poster": "https://m.media-amazon.com/images/poster.jpg",
            "Response": "True"
        }"#;
        let resp: RatingsResponse = serde_json::from_str(raw).unwrap();
        assert!(!resp.is_miss());
        let ratings = Ratings::from(resp);
        assert_eq!(ratings.score, "8.6");
        assert_eq!(ratings.sources.len(), 2);
        assert_eq!(ratings.sources[1].source, "Rotten Tomatoes");
        assert!(ratings.poster.is_some());
    }

    #[test]
    fn test_ratings_miss_detected() {
        let raw = r#"{"Response": "False", "Error": "Movie not found!"}"#;
        let resp: RatingsResponse = serde_json::from_str(raw).unwrap();
        assert!(resp.is_miss());
        assert_eq!(resp.error.as_deref(), Some("Movie not found!"));
    }

    #[test]
    fn test_na_poster_and_score() {
        let raw = r#"{"imdbRating": "N/A", "Ratings": [], "Poster": "N/A", "Response": "True"}"#;
        let ratings = Ratings::from(serde_json::from_str::<RatingsResponse>(raw).unwrap());
        assert_eq!(ratings.score, "N/A");
        assert!(ratings.poster.is_none());
        assert_eq!(ratings.star_score(5), 0.0);
    }

    #[test]
    fn test_star_score_rescales() {
        let ratings = Ratings {
            score: "8.6".to_string(),
            sources: Vec::new(),
            poster: None,
        };
        assert!((ratings.star_score(5) - 4.3).abs() < 1e-9);
        assert!((ratings.star_score(10) - 8.6).abs() < 1e-9);
    }

    #[test]
    fn test_unavailable_is_neutral() {
        let ratings = Ratings::unavailable();
        assert_eq!(ratings.score, "N/A");
        assert!(ratings.sources.is_empty());
        assert!(ratings.poster.is_none());
        assert_eq!(ratings.star_score(5), 0.0);
    }
}
