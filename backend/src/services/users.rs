//! Cross-tier user discovery.
//!
//! No canonical list of users is stored anywhere; the universe of known
//! user ids is synthesized per query by unioning the identifier columns of
//! every tier, independent of date.

use std::collections::BTreeSet;

use super::tables::{identifier_values, load_tier};
use crate::db::repository::TierStore;
use crate::models::Tier;

/// All user ids known to any tier, lexicographically sorted.
///
/// A tier that fails to load contributes nothing and does not abort
/// discovery for the remaining tiers.
pub async fn discover_users(store: &dyn TierStore) -> Vec<String> {
    let mut users = BTreeSet::new();
    for tier in Tier::ALL {
        let df = load_tier(store, tier).await;
        users.extend(identifier_values(&df));
    }
    users.into_iter().collect()
}
