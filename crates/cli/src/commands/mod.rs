pub mod browse;
pub mod refresh;
pub mod search;

use droplet_core::AppConfig;
use droplet_core::models::Collection;

use droplet_client::{ApiClient, ApiConfig, ApiError, Mirror, StoredToken};

/// Build the cache-backed mirror for one invocation. Fails only when no
/// usable credentials exist; everything past this point degrades softly.
pub fn open_mirror(config: &AppConfig) -> Result<Mirror, ApiError> {
    let token = StoredToken::load(&config.token_path)?;
    let client = ApiClient::new(
        ApiConfig {
            base_url: config.api_base_url.clone(),
            user_agent: config.user_agent.clone(),
            timeout: config.timeout(),
        },
        token,
    )?;
    Ok(Mirror::new(
        droplet_core::FileCache::new(&config.cache_dir),
        client,
        config.page_size,
    ))
}

/// The remote serves collections newest-first; lists read better oldest
/// first, so both tiers are reversed before any rendering pass.
pub fn display_order(mut collections: Vec<Collection>) -> Vec<Collection> {
    collections.reverse();
    collections
}
