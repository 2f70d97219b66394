/// Candidate normalization: converts each source's native record shape into
/// the canonical `Candidate` form, tagging provenance.
use crate::{
    models::{Candidate, MirrorMovieRow, Provenance, RemoteMovieRecord},
    services::images::ImageUrlMapper,
};

/// Normalizes a remote catalog record.
///
/// Records without a usable title are dropped (returns None); the canonical
/// form requires one.
pub fn from_remote(record: RemoteMovieRecord) -> Option<Candidate> {
    if record.title.trim().is_empty() {
        return None;
    }

    Some(Candidate {
        external_id: Some(record.id),
        title: record.title,
        overview: record.overview.unwrap_or_default(),
        release_date: non_empty(record.release_date),
        poster_ref: record.poster_path,
        backdrop_ref: record.backdrop_path,
        runtime_minutes: record.runtime,
        genre_ids: record.genre_ids,
        rating_score: record.vote_average.unwrap_or(0.0),
        provenance: Provenance::Remote,
    })
}

/// Normalizes a local mirror row.
///
/// Stored absolute image URLs are inverted back to opaque path references so
/// downstream URL construction is uniform regardless of provenance. Rows
/// lacking both a resolvable catalog id and a usable title are malformed
/// legacy rows and are dropped silently.
pub fn from_mirror(row: MirrorMovieRow, images: &ImageUrlMapper) -> Option<Candidate> {
    let title = row.title.unwrap_or_default();
    if title.trim().is_empty() {
        return None;
    }

    Some(Candidate {
        external_id: row.tmdb_id,
        title,
        overview: row.overview.unwrap_or_default(),
        release_date: non_empty(row.release_date),
        poster_ref: row.poster_url.as_deref().and_then(|u| images.path_for(u)),
        backdrop_ref: row.backdrop_url.as_deref().and_then(|u| images.path_for(u)),
        runtime_minutes: row.runtime,
        genre_ids: Vec::new(),
        rating_score: row.imdb_rating.unwrap_or(0.0),
        provenance: Provenance::Local,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
