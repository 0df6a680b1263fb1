//! Per-user x per-tier availability matrix for a single date.

use crate::db::repository::TierStore;
use crate::models::{Availability, DateStamp, StatusRow, StatusTable, Tier};

use super::tables::{filter_by_date, identifier_values, load_tier};
use super::users::discover_users;

/// Build the sync-status grid for one date.
///
/// Every discovered user gets a row, whether or not any tier has a record
/// for them on `date`; a cell is `Available` iff the date-filtered tier
/// contains the user id in any identifier column. An unreadable tier yields
/// a whole column of `Missing` without failing the query.
pub async fn availability_matrix(store: &dyn TierStore, date: &DateStamp) -> StatusTable {
    let users = discover_users(store).await;

    let mut present_per_tier = Vec::with_capacity(Tier::ALL.len());
    for tier in Tier::ALL {
        let df = load_tier(store, tier).await;
        let filtered = filter_by_date(&df, date);
        present_per_tier.push((tier, identifier_values(&filtered)));
    }

    let mut columns = vec!["user_id".to_string()];
    columns.extend(Tier::ALL.iter().map(|t| t.display_name().to_string()));

    let rows = users
        .into_iter()
        .map(|user_id| {
            let cells = present_per_tier
                .iter()
                .map(|(tier, present)| {
                    (
                        tier.table_name().to_string(),
                        Availability::from_bool(present.contains(&user_id)),
                    )
                })
                .collect();
            StatusRow { user_id, cells }
        })
        .collect();

    StatusTable { columns, rows }
}
