pub mod ttl_cache;

use actix_web::web::Bytes;

pub use ttl_cache::{CacheStats, TtlCache};

/// Holds serialized JSON bodies, so a hit replays the exact bytes of the miss that filled it.
pub type ProjectCache = TtlCache<Bytes>;

/// The aggregate views that are worth caching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheKey {
    AllProjects,
    ProjectList,
}

impl CacheKey {
    pub const ALL: [CacheKey; 2] = [CacheKey::AllProjects, CacheKey::ProjectList];

    pub fn as_str(&self) -> &'static str {
        match self {
            CacheKey::AllProjects => "all_projects",
            CacheKey::ProjectList => "project_list",
        }
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
