use crate::api::Film;
use std::cmp::Ordering;

/// Sort mode offered by the header selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Title order; also the fallback for anything unrecognized.
    #[default]
    Title,
    Year,
    Episode,
}

impl SortMode {
    pub const ALL: [SortMode; 3] = [Self::Title, Self::Year, Self::Episode];

    /// Parse a selector value. Unknown values fall back to `Title`.
    pub fn from_param(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "year" => Self::Year,
            "episode" => Self::Episode,
            _ => Self::Title,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Title => Self::Year,
            Self::Year => Self::Episode,
            Self::Episode => Self::Title,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Sort by...",
            Self::Year => "Year...",
            Self::Episode => "Episode...",
        }
    }

    fn compare(self, a: &Film, b: &Film) -> Ordering {
        match self {
            Self::Year => a.release_date.cmp(&b.release_date),
            Self::Episode => a.episode_id.cmp(&b.episode_id),
            Self::Title => title_key(&a.title)
                .cmp(&title_key(&b.title))
                .then_with(|| a.title.cmp(&b.title)),
        }
    }
}

fn title_key(title: &str) -> String {
    title.to_lowercase()
}

/// Whether `title` contains `query`, ignoring case. An empty query matches.
pub fn title_matches(title: &str, query: &str) -> bool {
    query.is_empty() || title.to_lowercase().contains(&query.to_lowercase())
}

/// Films whose title matches `query`, ordered by `sort`.
pub fn visible_films<'a>(films: &'a [Film], query: &str, sort: SortMode) -> Vec<&'a Film> {
    let mut visible: Vec<&Film> = films
        .iter()
        .filter(|f| title_matches(&f.title, query))
        .collect();
    visible.sort_by(|a, b| sort.compare(a, b));
    visible
}
