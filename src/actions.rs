//! Mutation entry points used by the page handlers.
//!
//! Each one awaits the service call, then drops the cache tag the mutation
//! touches, whether the call succeeded or not, and hands the result back as is.

pub mod category;
pub mod meal;
pub mod order;
pub mod provider;
pub mod review;
pub mod user;

use crate::api::TagCache;

pub(crate) async fn revalidate(cache: &TagCache, tag: &'static str) {
    let removed = cache.revalidate_tag(tag).await;
    tracing::debug!("Invalidated {} cached reads tagged '{}'", removed, tag);
}
