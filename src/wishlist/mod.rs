use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::ClientConfig;
use crate::telemetry::{self};
use crate::telemetry::ops::wishlist::Phase as WishlistPhase;
use crate::transport::{HttpTransport, Transport};

pub mod api;
pub mod directory;
pub mod types;

use types::{NewWishlist, WishlistDeleted, WishlistList, WishlistPlan, WishlistQuery};

/// wishlist create/get/ls/rename/rm
#[derive(Args)]
pub struct WishlistCmd {
    #[command(subcommand)]
    pub cmd: WishlistSub,
}

#[derive(Subcommand)]
pub enum WishlistSub {
    // create a wishlist (plan-only by default; use --apply to write)
    Create {
        name: String,
        #[arg(long)]
        userid: String,
        #[arg(long, default_value_t = false)]
        apply: bool,
    },
    Get { id: i64 },
    // list wishlists
    Ls {
        /// Exact name match
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    Rename {
        id: i64,
        name: String,
        #[arg(long, default_value_t = false)]
        apply: bool,
    },
    Rm {
        id: i64,
        #[arg(long, default_value_t = false)]
        apply: bool,
    },
}

pub async fn run(cfg: &ClientConfig, args: WishlistCmd) -> Result<()> {
    let transport = HttpTransport::new(cfg)?;
    dispatch(&transport, cfg, args.cmd).await
}

async fn dispatch<T: Transport + ?Sized>(t: &T, cfg: &ClientConfig, cmd: WishlistSub) -> Result<()> {
    let log = telemetry::wishlist();
    let routes = &cfg.routes;
    match cmd {
        WishlistSub::Create { name, userid, apply } => {
            let _g = log.root_span_kv([("mode", mode(apply)), ("name", name.clone()), ("userid", userid.clone())]).entered();
            if !apply {
                return plan(WishlistPlan { action: "create", id: None, name: Some(&name), userid: Some(&userid) });
            }
            let _s = log.span(&WishlistPhase::Create).entered();
            let created = api::create(t, routes, &NewWishlist { name, userid }).await?;
            log.info(format!("➕ Wishlist created [{}] {}", created.id, created.name));
            log.result(&created)?;
        }
        WishlistSub::Get { id } => {
            let _g = log.root_span_kv([("id", id.to_string())]).entered();
            let _s = log.span(&WishlistPhase::Get).entered();
            let found = api::get(t, routes, id).await?;
            log.result(&found)?;
        }
        WishlistSub::Ls { name, page, limit } => {
            let _g = log.root_span_kv([("name", format!("{:?}", name)), ("page", format!("{:?}", page)), ("limit", format!("{:?}", limit))]).entered();
            let _s = log.span(&WishlistPhase::List).entered();
            let wishlists = api::list(t, routes, &WishlistQuery { name, page, limit }).await?;
            log.info("🎁 Wishlists:");
            for w in &wishlists {
                log.info(format!("[{}] {} userid={:?} products={}", w.id, w.name, w.userid, w.products.len()));
            }
            log.result(&WishlistList { wishlists })?;
        }
        WishlistSub::Rename { id, name, apply } => {
            let _g = log.root_span_kv([("mode", mode(apply)), ("id", id.to_string()), ("name", name.clone())]).entered();
            if !apply {
                return plan(WishlistPlan { action: "rename", id: Some(id), name: Some(&name), userid: None });
            }
            let _s = log.span(&WishlistPhase::Rename).entered();
            let updated = api::rename(t, routes, id, &name).await?;
            log.info(format!("♻️ Wishlist renamed [{}] {}", updated.id, updated.name));
            log.result(&updated)?;
        }
        WishlistSub::Rm { id, apply } => {
            let _g = log.root_span_kv([("mode", mode(apply)), ("id", id.to_string())]).entered();
            if !apply {
                return plan(WishlistPlan { action: "delete", id: Some(id), name: None, userid: None });
            }
            let _s = log.span(&WishlistPhase::Delete).entered();
            api::delete(t, routes, id).await?;
            log.info(format!("🗑️ Wishlist [{}] deleted", id));
            log.result(&WishlistDeleted { id })?;
        }
    }
    Ok(())
}

fn mode(apply: bool) -> String { if apply { "apply".to_string() } else { "plan".to_string() } }

fn plan(plan: WishlistPlan<'_>) -> Result<()> {
    let log = telemetry::wishlist();
    let _s = log.span(&WishlistPhase::Plan).entered();
    log.info(format!("📝 Wishlist plan — {} id={:?} name={:?}", plan.action, plan.id, plan.name));
    log.info("   Use --apply to execute.");
    log.plan(&plan)
}
