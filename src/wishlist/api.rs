use anyhow::{bail, Result};
use serde_json::json;

use crate::config::ApiRoutes;
use crate::transport::{expect_body, ApiRequest, Transport};

use super::types::{NewWishlist, Wishlist, WishlistQuery};

pub async fn create<T: Transport + ?Sized>(t: &T, routes: &ApiRoutes, new: &NewWishlist) -> Result<Wishlist> {
    if new.name.trim().is_empty() { bail!("Wishlist name must not be empty"); }
    let body = serde_json::to_value(new)?;
    Ok(expect_body(t.request(ApiRequest::post(routes.collection(), body)).await?)?)
}

pub async fn get<T: Transport + ?Sized>(t: &T, routes: &ApiRoutes, id: i64) -> Result<Wishlist> {
    Ok(expect_body(t.request(ApiRequest::get(routes.wishlist(id))).await?)?)
}

pub async fn list<T: Transport + ?Sized>(t: &T, routes: &ApiRoutes, q: &WishlistQuery) -> Result<Vec<Wishlist>> {
    let mut req = ApiRequest::get(routes.collection());
    if let Some(name) = q.name.as_deref().filter(|n| !n.is_empty()) { req = req.with_query("name", name); }
    if let Some(page) = q.page { req = req.with_query("page", page); }
    if let Some(limit) = q.limit { req = req.with_query("limit", limit); }
    Ok(expect_body(t.request(req).await?)?)
}

/// Only the name is mutable on the service side.
pub async fn rename<T: Transport + ?Sized>(t: &T, routes: &ApiRoutes, id: i64, name: &str) -> Result<Wishlist> {
    if name.trim().is_empty() { bail!("Missing required field: name"); }
    let req = ApiRequest::put(routes.wishlist(id), json!({ "name": name }));
    Ok(expect_body(t.request(req).await?)?)
}

pub async fn delete<T: Transport + ?Sized>(t: &T, routes: &ApiRoutes, id: i64) -> Result<()> {
    t.request(ApiRequest::delete(routes.wishlist(id))).await?;
    Ok(())
}
