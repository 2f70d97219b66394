pub mod candidate;
pub mod query;
pub mod records;

pub use candidate::{Candidate, DedupKey, Provenance, ScoredCandidate};
pub use query::{QueryKind, SearchQuery};
pub use records::{MirrorMovieRow, RemoteMovieRecord, VideoMetadata};
