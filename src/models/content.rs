use serde::{Deserialize, Serialize};

/// Content category as exposed by the catalog endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Movie,
    Series,
    Documentary,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Movie => "movie",
            ContentType::Series => "series",
            ContentType::Documentary => "documentary",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// A catalog entry (movie, series, or documentary)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub content_type: ContentType,
    #[serde(default)]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub backdrop_url: Option<String>,
    #[serde(default)]
    pub average_rating: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub season_number: Option<i64>,
    #[serde(default)]
    pub episode_number: Option<i64>,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
}

/// One entry in the viewing history; the continue-watching endpoint
/// returns the entries that are started but not completed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchHistoryEntry {
    pub id: i64,
    pub content: Content,
    #[serde(default)]
    pub episode: Option<Episode>,
    #[serde(default)]
    pub progress_seconds: i64,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub progress_percentage: Option<f64>,
}

/// Body for the playback-progress update endpoint.
/// `content` and `episode` are backend primary keys.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressUpdate {
    pub content: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode: Option<i64>,
    pub progress_seconds: i64,
    pub completed: bool,
}

/// DRF page wrapper: `{count, next, previous, results}`
#[derive(Debug, Clone, Deserialize)]
pub struct Paginated<T> {
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Server-side filter parameters shared by the movies/series/documentaries
/// listings. Filtering happens in the backend query, never client-side.
#[derive(Debug, Clone, Default)]
pub struct ContentFilter {
    pub genre: Option<i64>,
    pub release_year: Option<i32>,
}

impl ContentFilter {
    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(genre) = self.genre {
            pairs.push(("genres", genre.to_string()));
        }
        if let Some(year) = self.release_year {
            pairs.push(("release_year", year.to_string()));
        }
        pairs
    }
}
