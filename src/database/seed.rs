use tracing::info;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Difficulty, Region};
use crate::database::store::{Entity, Store};

pub const EASY: Uuid = Uuid::from_u128(0x54466f17_02af_48e7_8ed3_5a4a8bfacf6f);
pub const MEDIUM: Uuid = Uuid::from_u128(0xea294873_7a8c_4c0f_bfa7_a2eb492cbf8c);
pub const HARD: Uuid = Uuid::from_u128(0xf808ddcd_b5e5_4d80_b732_1ca523e48434);

pub const AUCKLAND: Uuid = Uuid::from_u128(0xf7248fc3_2585_4efb_8d1d_1c555f4087f6);
pub const NORTHLAND: Uuid = Uuid::from_u128(0x6884f7d7_ad1f_4101_8df3_7a6fa7387d81);
pub const BAY_OF_PLENTY: Uuid = Uuid::from_u128(0x14ceba71_4b51_4777_9b17_46602cf66153);
pub const WELLINGTON: Uuid = Uuid::from_u128(0xcfa06ed2_bf65_4b65_93ed_c9d286ddb0de);
pub const NELSON: Uuid = Uuid::from_u128(0x906cb139_415a_4bbb_a174_1a1faf9fb1f6);
pub const SOUTHLAND: Uuid = Uuid::from_u128(0xf077a22e_4248_4bf6_b564_c7cf4e250263);

pub fn difficulties() -> Vec<Difficulty> {
    [(EASY, "Easy"), (MEDIUM, "Medium"), (HARD, "Hard")]
        .into_iter()
        .map(|(id, name)| Difficulty { id, name: name.to_string() })
        .collect()
}

pub fn regions() -> Vec<Region> {
    [
        (AUCKLAND, "AKL", "Auckland", Some("https://images.pexels.com/photos/5169056/pexels-photo-5169056.jpeg")),
        (NORTHLAND, "NTL", "Northland", None),
        (BAY_OF_PLENTY, "BOP", "Bay Of Plenty", None),
        (WELLINGTON, "WGN", "Wellington", Some("https://images.pexels.com/photos/4350631/pexels-photo-4350631.jpeg")),
        (NELSON, "NSN", "Nelson", Some("https://images.pexels.com/photos/13918194/pexels-photo-13918194.jpeg")),
        (SOUTHLAND, "STL", "Southland", None),
    ]
    .into_iter()
    .map(|(id, code, name, image)| Region {
        id,
        code: code.to_string(),
        name: name.to_string(),
        region_image_url: image.map(str::to_string),
    })
    .collect()
}

/// Insert `records` when the store is empty. Returns how many were added.
pub async fn seed_if_empty<T: Entity>(store: &dyn Store<T>, records: Vec<T>) -> Result<usize, DatabaseError> {
    if store.count_matching(None).await? > 0 {
        return Ok(0);
    }
    let count = records.len();
    for record in records {
        store.insert(record).await?;
    }
    info!(table = T::TABLE, count, "Seeded reference data");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;

    #[tokio::test]
    async fn seeds_only_empty_stores() {
        let store = MemoryStore::<Difficulty>::new();
        assert_eq!(seed_if_empty(&store, difficulties()).await.unwrap(), 3);
        assert_eq!(seed_if_empty(&store, difficulties()).await.unwrap(), 0);
        assert_eq!(store.get_by_id(MEDIUM).await.unwrap().map(|d| d.name), Some("Medium".to_string()));
    }

    #[test]
    fn seeded_region_codes_are_three_letters() {
        let regions = regions();
        assert_eq!(regions.len(), 6);
        assert!(regions.iter().all(|r| r.code.len() == 3));
    }
}
