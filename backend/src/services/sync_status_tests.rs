use crate::db::LocalStore;
use crate::models::{Availability, DateStamp, Tier};
use crate::services::sync_status::availability_matrix;
use polars::prelude::*;

fn date(s: &str) -> DateStamp {
    DateStamp::parse(s).unwrap()
}

/// Store with two users in bronze on 2025-06-05 and one of them propagated
/// into silver_rrbucket.
fn seeded_store() -> LocalStore {
    let store = LocalStore::new();
    store.set_tier(
        Tier::Bronze,
        df!(
            "user_id" => ["u1", "u2"],
            "ingestion_date" => ["2025-06-05", "2025-06-05"]
        )
        .unwrap(),
    );
    store.set_tier(
        Tier::SilverRrBucket,
        df!(
            "user_id" => ["u1"],
            "ingestion_date" => ["2025-06-05"]
        )
        .unwrap(),
    );
    store
}

#[tokio::test]
async fn test_matrix_shape() {
    let store = seeded_store();
    let matrix = availability_matrix(&store, &date("2025-06-05")).await;

    assert_eq!(
        matrix.columns,
        vec![
            "user_id",
            "Bronze Data",
            "Silver RRBucket",
            "Silver VitalsBaseline",
            "Silver VitalSWT"
        ]
    );
    assert_eq!(matrix.rows.len(), 2);
    for row in &matrix.rows {
        assert_eq!(row.cells.len(), Tier::ALL.len());
    }
}

#[tokio::test]
async fn test_matrix_cells() {
    let store = seeded_store();
    let matrix = availability_matrix(&store, &date("2025-06-05")).await;

    let u1 = &matrix.rows[0];
    assert_eq!(u1.user_id, "u1");
    assert_eq!(u1.cells["bronze"], Availability::Available);
    assert_eq!(u1.cells["silver_rrbucket"], Availability::Available);
    assert_eq!(u1.cells["silver_vitalsbaseline"], Availability::Missing);

    let u2 = &matrix.rows[1];
    assert_eq!(u2.cells["bronze"], Availability::Available);
    assert_eq!(u2.cells["silver_rrbucket"], Availability::Missing);
}

#[tokio::test]
async fn test_absent_user_still_listed_all_missing() {
    let store = seeded_store();
    // u1/u2 have no rows on this date, but remain in the matrix
    let matrix = availability_matrix(&store, &date("2025-06-06")).await;

    assert_eq!(matrix.rows.len(), 2);
    for row in &matrix.rows {
        assert!(row
            .cells
            .values()
            .all(|cell| *cell == Availability::Missing));
    }
}

#[tokio::test]
async fn test_failed_tier_degrades_to_missing_column() {
    let store = seeded_store();
    store.set_tier_unavailable(Tier::Bronze, true);
    let matrix = availability_matrix(&store, &date("2025-06-05")).await;

    // u1 was discovered via silver_rrbucket; bronze column reads Missing
    let u1 = matrix.rows.iter().find(|r| r.user_id == "u1").unwrap();
    assert_eq!(u1.cells["bronze"], Availability::Missing);
    assert_eq!(u1.cells["silver_rrbucket"], Availability::Available);
}

#[tokio::test]
async fn test_matrix_is_deterministic() {
    let store = seeded_store();
    let first = availability_matrix(&store, &date("2025-06-05")).await;
    let second = availability_matrix(&store, &date("2025-06-05")).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_identifier_matched_across_columns() {
    let store = LocalStore::new();
    store.set_tier(
        Tier::SilverVitalsSwt,
        df!(
            "Source_User_Id" => ["u9"],
            "date" => ["2025-06-05"]
        )
        .unwrap(),
    );
    let matrix = availability_matrix(&store, &date("2025-06-05")).await;
    assert_eq!(matrix.rows.len(), 1);
    assert_eq!(matrix.rows[0].user_id, "u9");
    assert_eq!(
        matrix.rows[0].cells["silver_vitalsswt"],
        Availability::Available
    );
}
