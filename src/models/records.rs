use serde::Deserialize;
use sqlx::FromRow;

// ============================================================================
// Remote Catalog (TMDB) API Types
// ============================================================================

/// Raw movie record from the remote catalog search/lookup endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteMovieRecord {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub runtime: Option<i64>,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}

// ============================================================================
// Local Mirror Types
// ============================================================================

/// A row from the local movie mirror table.
///
/// Image columns store fully-resolved absolute URLs; the normalizer inverts
/// them back to opaque path references.
#[derive(Debug, Clone, FromRow)]
pub struct MirrorMovieRow {
    pub id: i64,
    pub tmdb_id: Option<i64>,
    pub title: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub runtime: Option<i64>,
    pub imdb_rating: Option<f64>,
}

// ============================================================================
// Video Platform Types
// ============================================================================

/// Metadata for a single video-platform item
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct VideoMetadata {
    pub title: String,
    pub thumbnail: Option<String>,
    pub duration_seconds: u64,
    pub channel_title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_record_deserialization() {
        let json = r#"{
            "id": 27205,
            "title": "Inception",
            "overview": "A thief who steals corporate secrets...",
            "release_date": "2010-07-16",
            "poster_path": "/poster.jpg",
            "backdrop_path": "/backdrop.jpg",
            "genre_ids": [28, 878],
            "vote_average": 8.4
        }"#;

        let record: RemoteMovieRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 27205);
        assert_eq!(record.title, "Inception");
        assert_eq!(record.release_date, Some("2010-07-16".to_string()));
        assert_eq!(record.genre_ids, vec![28, 878]);
        assert_eq!(record.vote_average, Some(8.4));
        assert_eq!(record.runtime, None);
    }

    #[test]
    fn test_remote_record_tolerates_sparse_payload() {
        let json = r#"{ "id": 42 }"#;
        let record: RemoteMovieRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 42);
        assert!(record.title.is_empty());
        assert!(record.genre_ids.is_empty());
        assert_eq!(record.vote_average, None);
    }
}
