/// How a raw query string was classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryKind {
    /// Content-site permalink carrying a `tt`-prefixed identifier
    DirectId(String),
    /// Video platform URL with an extracted video id
    PlatformUrl(String),
    /// Free-text title query (trimmed)
    Text(String),
}

/// The raw input string plus its classification. Immutable once classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub raw: String,
    pub kind: QueryKind,
}
