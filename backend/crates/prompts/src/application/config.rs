//! Application Configuration
//!
//! Configuration for the prompts application layer.

/// Prompts application configuration
#[derive(Debug, Clone)]
pub struct PromptsConfig {
    /// Default page size of the public listing
    pub public_per_page: u32,
    /// Default page size of the admin listing
    pub admin_per_page: u32,
    /// Upper bound for any client-supplied page size
    pub max_per_page: u32,
    /// Likes needed to count as popular in the stats
    pub popular_threshold: i64,
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            public_per_page: 12,
            admin_per_page: 20,
            max_per_page: 100,
            popular_threshold: 10,
        }
    }
}
