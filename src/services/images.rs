/// Bidirectional mapping between opaque image path references and the
/// absolute URLs served to clients.
///
/// Remote catalog records carry opaque paths (e.g. `/abc123.jpg`); mirror
/// rows store the fully-resolved URL built from the same base. One mapper
/// owns both directions so the normalizer's inverse mapping can never drift
/// from the URL construction used at the response boundary.
#[derive(Debug, Clone)]
pub struct ImageUrlMapper {
    base_url: String,
}

impl ImageUrlMapper {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Resolves an opaque path reference to an absolute URL
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Recovers the opaque path reference from a stored absolute URL.
    ///
    /// Returns None when the URL was not built from this mapper's base, in
    /// which case the caller should treat the image as unavailable.
    pub fn path_for(&self, url: &str) -> Option<String> {
        let rest = url.strip_prefix(&self.base_url)?;
        if rest.is_empty() {
            return None;
        }
        if rest.starts_with('/') {
            Some(rest.to_string())
        } else {
            Some(format!("/{}", rest))
        }
    }
}
