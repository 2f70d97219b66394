/// Query classification: decide whether a raw input string is a content-site
/// permalink, a video-platform URL, or a free-text title query.
///
/// No case normalization happens here; downstream consumers normalize as
/// they need to.
use crate::{
    error::{AppError, AppResult},
    models::{QueryKind, SearchQuery},
};

/// Classifies a raw query string.
///
/// `force_platform` is set when the caller explicitly requested a
/// video-platform lookup (e.g. a `type=youtube` request parameter), which
/// skips the domain-token sniffing.
///
/// A recognized reference that fails extraction is a client error, never a
/// silent downgrade to text search.
pub fn classify(raw: &str, force_platform: bool) -> AppResult<SearchQuery> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidInput(
            "Search query cannot be empty".to_string(),
        ));
    }

    // An explicit platform request wins over permalink sniffing.
    let kind = if force_platform || trimmed.contains("youtube.com") || trimmed.contains("youtu.be")
    {
        let id = extract_video_id(trimmed).ok_or_else(|| {
            AppError::InvalidInput("Could not extract video id from URL".to_string())
        })?;
        QueryKind::PlatformUrl(id)
    } else if trimmed.contains("imdb.com") {
        let id = extract_imdb_id(trimmed).ok_or_else(|| {
            AppError::InvalidInput("Could not extract title id from permalink".to_string())
        })?;
        QueryKind::DirectId(id)
    } else {
        QueryKind::Text(trimmed.to_string())
    };

    Ok(SearchQuery {
        raw: raw.to_string(),
        kind,
    })
}

/// Finds the first `tt`-prefixed run of digits in the input.
fn extract_imdb_id(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let mut i = 0;
    while i + 2 < bytes.len() {
        if bytes[i] == b't' && bytes[i + 1] == b't' && bytes[i + 2].is_ascii_digit() {
            let mut end = i + 2;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
            return Some(input[i..end].to_string());
        }
        i += 1;
    }
    None
}

/// Extracts a video id from the known platform URL shapes, tried in priority
/// order: watch-page `v=` query parameter, shortened-domain path segment,
/// embed path segment. First match wins.
fn extract_video_id(input: &str) -> Option<String> {
    for (marker, from_query) in [("v=", true), ("youtu.be/", false), ("/embed/", false)] {
        if let Some(id) = extract_after(input, marker, from_query) {
            return Some(id);
        }
    }
    None
}

/// Takes the token following `marker`, stopping at the next URL delimiter.
///
/// Query-parameter markers must be preceded by `?` or `&` so that e.g. a
/// `cv=` parameter does not match `v=`.
fn extract_after(input: &str, marker: &str, from_query: bool) -> Option<String> {
    let mut search_start = 0;
    while let Some(rel) = input[search_start..].find(marker) {
        let idx = search_start + rel;
        let preceded_ok = !from_query
            || matches!(input[..idx].chars().next_back(), Some('?') | Some('&'));
        if preceded_ok {
            let rest = &input[idx + marker.len()..];
            let end = rest
                .find(['&', '?', '#', '/'])
                .unwrap_or(rest.len());
            if end > 0 {
                return Some(rest[..end].to_string());
            }
        }
        search_start = idx + marker.len();
    }
    None
}
