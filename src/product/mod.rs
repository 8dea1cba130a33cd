use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::ClientConfig;
use crate::telemetry::{self};
use crate::telemetry::ops::product::Phase as ProductPhase;
use crate::transport::{HttpTransport, Transport};

pub mod api;
pub mod types;

use types::{NewProduct, ProductDeleted, ProductFilter, ProductList, ProductPatch, ProductPlan};

/// product add/get/ls/patch/rm
#[derive(Args)]
pub struct ProductCmd {
    #[command(subcommand)]
    pub cmd: ProductSub,
}

#[derive(Subcommand)]
pub enum ProductSub {
    // add a product to a wishlist (plan-only by default; use --apply to write)
    Add {
        wishlist: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: f64,
        #[arg(long, default_value_t = 1)]
        quantity: i64,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        note: Option<String>,
        #[arg(long, default_value_t = false)]
        is_gift: bool,
        #[arg(long, default_value_t = false)]
        purchased: bool,
        #[arg(long, default_value_t = false)]
        apply: bool,
    },
    Get { wishlist: i64, id: i64 },
    // list a wishlist's products, optionally filtered
    Ls {
        wishlist: i64,
        /// Case-insensitive substring of the product name
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        min_price: Option<f64>,
        #[arg(long)]
        max_price: Option<f64>,
    },
    /// Partial update; quantity 0 removes the product
    Patch {
        wishlist: i64,
        id: i64,
        #[arg(long)]
        note: Option<String>,
        #[arg(long)]
        is_gift: Option<bool>,
        #[arg(long)]
        quantity: Option<i64>,
        #[arg(long)]
        purchased: Option<bool>,
        #[arg(long, default_value_t = false)]
        apply: bool,
    },
    Rm {
        wishlist: i64,
        id: i64,
        #[arg(long, default_value_t = false)]
        apply: bool,
    },
}

pub async fn run(cfg: &ClientConfig, args: ProductCmd) -> Result<()> {
    let transport = HttpTransport::new(cfg)?;
    dispatch(&transport, cfg, args.cmd).await
}

async fn dispatch<T: Transport + ?Sized>(t: &T, cfg: &ClientConfig, cmd: ProductSub) -> Result<()> {
    let log = telemetry::product();
    let routes = &cfg.routes;
    match cmd {
        ProductSub::Add { wishlist, name, price, quantity, description, note, is_gift, purchased, apply } => {
            let _g = log.root_span_kv([("mode", mode(apply)), ("wishlist", wishlist.to_string()), ("name", name.clone())]).entered();
            let new = NewProduct { name, price, quantity, description, note, is_gift, purchased };
            if !apply {
                return plan(&ProductPlan { action: "add", wishlist_id: wishlist, product_id: None, payload: &new });
            }
            let _s = log.span(&ProductPhase::Add).entered();
            let created = api::create(t, routes, wishlist, &new).await?;
            log.info(format!("➕ Product [{}] added to wishlist {}", created.id, wishlist));
            log.result(&created)?;
        }
        ProductSub::Get { wishlist, id } => {
            let _g = log.root_span_kv([("wishlist", wishlist.to_string()), ("id", id.to_string())]).entered();
            let _s = log.span(&ProductPhase::Get).entered();
            let found = api::get(t, routes, wishlist, id).await?;
            log.result(&found)?;
        }
        ProductSub::Ls { wishlist, name, min_price, max_price } => {
            let _g = log.root_span_kv([("wishlist", wishlist.to_string()), ("name", format!("{:?}", name))]).entered();
            let _s = log.span(&ProductPhase::List).entered();
            let filter = ProductFilter { name, min_price, max_price };
            let products = api::list(t, routes, wishlist, &filter).await?;
            log.info(format!("🛍️ {} product(s) in wishlist {}", products.len(), wishlist));
            log.result(&ProductList { wishlist_id: wishlist, products })?;
        }
        ProductSub::Patch { wishlist, id, note, is_gift, quantity, purchased, apply } => {
            let _g = log.root_span_kv([("mode", mode(apply)), ("wishlist", wishlist.to_string()), ("id", id.to_string())]).entered();
            let patch = ProductPatch { note, is_gift, quantity, purchased };
            if !apply {
                return plan(&ProductPlan { action: "patch", wishlist_id: wishlist, product_id: Some(id), payload: &patch });
            }
            let _s = log.span(&ProductPhase::Patch).entered();
            match api::patch(t, routes, wishlist, id, &patch).await? {
                Some(updated) => {
                    log.info(format!("♻️ Product [{}] updated", updated.id));
                    log.result(&updated)?;
                }
                None => {
                    log.info(format!("🗑️ Product [{}] removed (quantity 0)", id));
                    log.result(&ProductDeleted { wishlist_id: wishlist, product_id: id })?;
                }
            }
        }
        ProductSub::Rm { wishlist, id, apply } => {
            let _g = log.root_span_kv([("mode", mode(apply)), ("wishlist", wishlist.to_string()), ("id", id.to_string())]).entered();
            let target = ProductDeleted { wishlist_id: wishlist, product_id: id };
            if !apply {
                return plan(&ProductPlan { action: "delete", wishlist_id: wishlist, product_id: Some(id), payload: &target });
            }
            let _s = log.span(&ProductPhase::Delete).entered();
            api::delete(t, routes, wishlist, id).await?;
            log.info(format!("🗑️ Product [{}] deleted", id));
            log.result(&target)?;
        }
    }
    Ok(())
}

fn mode(apply: bool) -> String { if apply { "apply".to_string() } else { "plan".to_string() } }

fn plan<T: serde::Serialize>(plan: &ProductPlan<'_, T>) -> Result<()> {
    let log = telemetry::product();
    let _s = log.span(&ProductPhase::Plan).entered();
    log.info(format!("📝 Product plan — {} wishlist={} product={:?}", plan.action, plan.wishlist_id, plan.product_id));
    log.info("   Use --apply to execute.");
    log.plan(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::MockTransport;
    use reqwest::{Method, StatusCode};
    use url::Url;

    fn cfg() -> ClientConfig { ClientConfig::new(Url::parse("http://wish.test").unwrap()) }

    #[tokio::test]
    async fn patch_plan_sends_nothing() {
        let t = MockTransport::new();
        let cmd = ProductSub::Patch { wishlist: 1, id: 2, note: None, is_gift: None, quantity: Some(3), purchased: None, apply: false };
        dispatch(&t, &cfg(), cmd).await.unwrap();
        assert!(t.calls().is_empty());
    }

    #[tokio::test]
    async fn applied_delete_hits_item_path() {
        let t = MockTransport::new();
        t.on(Method::DELETE, "/collection/1/items/2", StatusCode::NO_CONTENT, None);
        dispatch(&t, &cfg(), ProductSub::Rm { wishlist: 1, id: 2, apply: true }).await.unwrap();
        assert_eq!(t.paths(), vec!["/collection/1/items/2".to_string()]);
    }
}
