pub mod config;
pub mod ctx;
pub mod ops;

use ctx::LogCtx;

pub fn aggregate() -> LogCtx<ops::aggregate::Aggregate> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
pub fn wishlist() -> LogCtx<ops::wishlist::Wishlist> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
pub fn product() -> LogCtx<ops::product::Product> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
