//! Endpoint URLs derived from the configured base URL.

use std::fmt;

/// The two collections exposed by the mock API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Movies,
    Reviews,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 2] = [ResourceKind::Movies, ResourceKind::Reviews];

    pub fn path(&self) -> &'static str {
        match self {
            ResourceKind::Movies => "movies",
            ResourceKind::Reviews => "reviews",
        }
    }

    /// Singular noun used in log lines and failure messages.
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Movies => "movie",
            ResourceKind::Reviews => "review",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub base: String,
    pub movies: String,
    pub reviews: String,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        Self {
            movies: format!("{}/{}", base, ResourceKind::Movies.path()),
            reviews: format!("{}/{}", base, ResourceKind::Reviews.path()),
            base,
        }
    }

    pub fn collection(&self, kind: ResourceKind) -> &str {
        match kind {
            ResourceKind::Movies => &self.movies,
            ResourceKind::Reviews => &self.reviews,
        }
    }

    pub fn item(&self, kind: ResourceKind, id: &str) -> String {
        format!("{}/{}", self.collection(kind), id)
    }
}
