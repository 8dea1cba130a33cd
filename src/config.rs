use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_COLLECTION_ROUTE: &str = "collection";
const DEFAULT_ITEMS_ROUTE: &str = "items";
/// The service's own default `limit` for its wishlist listing.
const DEFAULT_PAGE_SIZE: u32 = 10;

/// Path segments of the wishlist service. Some deployments mount them at
/// `api/wishlists` and `products`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRoutes {
    pub collection: String,
    pub items: String,
}

impl Default for ApiRoutes {
    fn default() -> Self {
        Self {
            collection: DEFAULT_COLLECTION_ROUTE.to_string(),
            items: DEFAULT_ITEMS_ROUTE.to_string(),
        }
    }
}

impl ApiRoutes {
    fn base(&self) -> &str { self.collection.trim_matches('/') }
    fn leaf(&self) -> &str { self.items.trim_matches('/') }

    pub fn collection(&self) -> String { format!("/{}", self.base()) }
    pub fn wishlist(&self, id: i64) -> String { format!("/{}/{}", self.base(), id) }
    pub fn items(&self, wishlist_id: i64) -> String { format!("/{}/{}/{}", self.base(), wishlist_id, self.leaf()) }
    pub fn item(&self, wishlist_id: i64, product_id: i64) -> String {
        format!("/{}/{}/{}/{}", self.base(), wishlist_id, self.leaf(), product_id)
    }
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: Url,
    pub timeout: Duration,
    pub routes: ApiRoutes,
    /// `None` fetches the directory with a single request. Defaults to paging
    /// because the service truncates unpaged listings.
    pub directory_page_size: Option<u32>,
    /// `None` lets a pass wait on its requests indefinitely.
    pub pass_deadline: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            routes: ApiRoutes::default(),
            directory_page_size: Some(DEFAULT_PAGE_SIZE),
            pass_deadline: None,
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = lookup("WISHLIST_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut cfg = Self::new(parse_base_url(&base)?);
        if let Some(timeout) = lookup("WISHLIST_TIMEOUT_SECS") {
            if let Ok(parsed) = timeout.parse::<u64>() {
                cfg.timeout = Duration::from_secs(parsed);
            }
        }
        if let Some(route) = lookup("WISHLIST_ROUTE_COLLECTION") {
            cfg.routes.collection = route;
        }
        if let Some(route) = lookup("WISHLIST_ROUTE_ITEMS") {
            cfg.routes.items = route;
        }
        if let Some(size) = lookup("WISHLIST_PAGE_SIZE") {
            if let Ok(parsed) = size.parse::<u32>() {
                cfg.directory_page_size = (parsed > 0).then_some(parsed);
            }
        }
        if let Some(ms) = lookup("WISHLIST_DEADLINE_MS") {
            if let Ok(parsed) = ms.parse::<u64>() {
                cfg.pass_deadline = Some(Duration::from_millis(parsed));
            }
        }
        Ok(cfg)
    }

    pub fn with_base_url(mut self, base: Option<&str>) -> Result<Self> {
        if let Some(base) = base {
            self.base_url = parse_base_url(base)?;
        }
        Ok(self)
    }
}

pub fn parse_base_url(raw: &str) -> Result<Url> {
    Url::parse(raw).with_context(|| format!("Invalid base URL: {}", raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn routes_build_nested_paths() {
        let routes = ApiRoutes { collection: "/api/wishlists/".into(), items: "products".into() };
        assert_eq!(routes.collection(), "/api/wishlists");
        assert_eq!(routes.wishlist(4), "/api/wishlists/4");
        assert_eq!(routes.items(4), "/api/wishlists/4/products");
        assert_eq!(routes.item(4, 9), "/api/wishlists/4/products/9");
    }

    #[test]
    fn default_routes_match_collection_items() {
        let routes = ApiRoutes::default();
        assert_eq!(routes.collection(), "/collection");
        assert_eq!(routes.items(2), "/collection/2/items");
    }

    #[test]
    fn env_overrides_and_ignores_garbage() {
        let cfg = ClientConfig::from_lookup(lookup_from(&[
            ("WISHLIST_BASE_URL", "http://wish.test:9000"),
            ("WISHLIST_TIMEOUT_SECS", "nope"),
            ("WISHLIST_PAGE_SIZE", "25"),
            ("WISHLIST_DEADLINE_MS", "1500"),
        ]))
        .unwrap();
        assert_eq!(cfg.base_url.as_str(), "http://wish.test:9000/");
        assert_eq!(cfg.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(cfg.directory_page_size, Some(25));
        assert_eq!(cfg.pass_deadline, Some(Duration::from_millis(1500)));
    }

    #[test]
    fn defaults_without_env() {
        let cfg = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg.base_url.as_str(), "http://localhost:8080/");
        assert_eq!(cfg.routes, ApiRoutes::default());
        assert_eq!(cfg.pass_deadline, None);
        assert_eq!(cfg.directory_page_size, Some(DEFAULT_PAGE_SIZE));
    }

    #[test]
    fn zero_page_size_means_single_request() {
        let cfg = ClientConfig::from_lookup(lookup_from(&[("WISHLIST_PAGE_SIZE", "0")])).unwrap();
        assert_eq!(cfg.directory_page_size, None);
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(ClientConfig::from_lookup(lookup_from(&[("WISHLIST_BASE_URL", "not a url")])).is_err());
    }
}
