use std::collections::HashSet;

use crate::config::ClientConfig;
use crate::telemetry;
use crate::transport::{expect_body, ApiRequest, Transport, TransportError};

use super::types::{Wishlist, WishlistRef};

/// The directory endpoint could not produce a wishlist list.
#[derive(Debug)]
pub struct DirectoryError {
    pub page: Option<u32>,
    pub source: TransportError,
}

impl DirectoryError {
    pub fn reason(&self) -> String { self.source.reason() }
}

impl std::fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.page {
            Some(page) => write!(f, "wishlist directory page {page} failed: {}", self.source),
            None => write!(f, "wishlist directory failed: {}", self.source),
        }
    }
}

impl std::error::Error for DirectoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> { Some(&self.source) }
}

/// Fetches every wishlist in server order. No retries. A paged walk ends on
/// a short page or on a page that adds no new wishlist, so a server that
/// ignores `page`/`limit` cannot keep it going.
pub async fn load<T: Transport + ?Sized>(t: &T, cfg: &ClientConfig) -> Result<Vec<WishlistRef>, DirectoryError> {
    let path = cfg.routes.collection();
    let Some(page_size) = cfg.directory_page_size else {
        let lists = fetch_page(t, ApiRequest::get(path)).await.map_err(|source| DirectoryError { page: None, source })?;
        return Ok(lists.iter().map(Wishlist::to_ref).collect());
    };

    let log = telemetry::aggregate();
    let mut refs = Vec::new();
    let mut seen = HashSet::new();
    let mut page = 1u32;
    loop {
        let req = ApiRequest::get(path.clone()).with_query("page", page).with_query("limit", page_size);
        let lists = fetch_page(t, req).await.map_err(|source| DirectoryError { page: Some(page), source })?;
        let short = lists.len() < page_size as usize;
        let before = refs.len();
        refs.extend(lists.iter().filter(|w| seen.insert(w.id)).map(Wishlist::to_ref));
        let added = refs.len() - before;
        log.debug_kv("directory page", [("page", page.to_string()), ("entries", lists.len().to_string()), ("new", added.to_string())]);
        if short { break; }
        if added == 0 {
            log.warn_kv("directory page repeated earlier entries; stopping walk", [("page", page.to_string())]);
            break;
        }
        page += 1;
    }
    Ok(refs)
}

async fn fetch_page<T: Transport + ?Sized>(t: &T, req: ApiRequest) -> Result<Vec<Wishlist>, TransportError> {
    expect_body(t.request(req).await?)
}
