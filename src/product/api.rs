use anyhow::{bail, Result};
use serde_json::Value;

use crate::config::ApiRoutes;
use crate::transport::{expect_body, ApiRequest, Transport};

use super::types::{NewProduct, ProductFilter, ProductPatch, ProductRecord, ProductWire};

fn attribute(wishlist_id: i64, wire: ProductWire) -> Result<ProductRecord> {
    let product_id = wire.id;
    match wire.into_record(wishlist_id) {
        Some(rec) => Ok(rec),
        None => bail!("Product {} does not belong to wishlist {}", product_id, wishlist_id),
    }
}

pub async fn create<T: Transport + ?Sized>(t: &T, routes: &ApiRoutes, wishlist_id: i64, product: &NewProduct) -> Result<ProductRecord> {
    let body = serde_json::to_value(product)?;
    let wire: ProductWire = expect_body(t.request(ApiRequest::post(routes.items(wishlist_id), body)).await?)?;
    attribute(wishlist_id, wire)
}

pub async fn get<T: Transport + ?Sized>(t: &T, routes: &ApiRoutes, wishlist_id: i64, product_id: i64) -> Result<ProductRecord> {
    let wire: ProductWire = expect_body(t.request(ApiRequest::get(routes.item(wishlist_id, product_id))).await?)?;
    attribute(wishlist_id, wire)
}

pub async fn list<T: Transport + ?Sized>(t: &T, routes: &ApiRoutes, wishlist_id: i64, filter: &ProductFilter) -> Result<Vec<ProductRecord>> {
    let mut req = ApiRequest::get(routes.items(wishlist_id));
    for (k, v) in filter.query_pairs() {
        req = req.with_query(k, v);
    }
    let wires: Vec<ProductWire> = expect_body(t.request(req).await?)?;
    Ok(wires.into_iter().filter_map(|w| w.into_record(wishlist_id)).collect())
}

/// Returns `None` when the service removed the product (quantity set to 0).
pub async fn patch<T: Transport + ?Sized>(t: &T, routes: &ApiRoutes, wishlist_id: i64, product_id: i64, patch: &ProductPatch) -> Result<Option<ProductRecord>> {
    if patch.is_empty() {
        bail!("PATCH must include note, is_gift, quantity, or purchased");
    }
    if let Some(q) = patch.quantity {
        if q < 0 { bail!("Quantity must be a non-negative integer"); }
    }
    let body = serde_json::to_value(patch)?;
    match t.request(ApiRequest::patch(routes.item(wishlist_id, product_id), body)).await? {
        None | Some(Value::Null) => Ok(None),
        Some(v) => {
            let wire: ProductWire = serde_json::from_value(v)?;
            attribute(wishlist_id, wire).map(Some)
        }
    }
}

pub async fn delete<T: Transport + ?Sized>(t: &T, routes: &ApiRoutes, wishlist_id: i64, product_id: i64) -> Result<()> {
    t.request(ApiRequest::delete(routes.item(wishlist_id, product_id))).await?;
    Ok(())
}
