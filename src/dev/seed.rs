//! Canonical test records
//!
//! Ids 1-3 are read-only fixtures, 4 is updated by tests, 5 is deleted by
//! tests and 6 is free for manual use.

use tracing::info;

use crate::entity::{Fahrrad, FahrradDocument, FahrradId, FahrradKind};
use crate::storage::{FahrradStore, StoreResult};

fn id(n: u8) -> FahrradId {
    let mut bytes = [0u8; 12];
    bytes[11] = n;
    FahrradId::from_bytes(bytes)
}

fn record(n: u8, model: &str, weight: f64, kind: FahrradKind, brand: &str, price: f64) -> FahrradDocument {
    FahrradDocument::new(
        id(n),
        Fahrrad {
            model: model.to_string(),
            weight: Some(weight),
            kind: Some(kind),
            brand: brand.to_string(),
            price: Some(price),
        },
    )
}

/// The test records, all at version 0
pub fn test_data() -> Vec<FahrradDocument> {
    vec![
        record(1, "Stereo 120", 12.3, FahrradKind::MountainBike, "Cube", 2500.0),
        record(2, "Stereo 140", 13.3, FahrradKind::MountainBike, "Cube", 3500.0),
        record(3, "Stereo 150", 14.5, FahrradKind::MountainBike, "Cube", 5000.0),
        record(4, "Trekking", 17.0, FahrradKind::TrekkingBike, "Ortler", 1700.0),
        record(5, "Endurace", 8.5, FahrradKind::RoadBike, "Canyon", 1300.0),
        record(6, "Ams", 10.0, FahrradKind::MountainBike, "Cube", 4000.0),
    ]
}

/// Insert every test record whose id is not yet taken
///
/// Returns the number of records inserted.
pub async fn seed(store: &dyn FahrradStore) -> StoreResult<usize> {
    let mut inserted = 0;
    for doc in test_data() {
        if store.find_by_id(&doc.id).await?.is_some() {
            continue;
        }
        store.insert(doc).await?;
        inserted += 1;
    }
    info!(inserted, "test data loaded");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_ids_are_sequential() {
        let ids: Vec<String> = test_data().iter().map(|d| d.id.to_string()).collect();
        assert_eq!(ids[0], "000000000000000000000001");
        assert_eq!(ids[5], "000000000000000000000006");
    }

    #[tokio::test]
    async fn test_seed_is_repeatable() {
        let store = MemoryStore::new();
        assert_eq!(seed(&store).await.unwrap(), 6);
        assert_eq!(seed(&store).await.unwrap(), 0);
        assert_eq!(store.count().await.unwrap(), 6);
    }
}
