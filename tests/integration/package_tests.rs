//! Package composition and statistics tests

use rust_decimal::Decimal;

use rigbase::{
    error::Error,
    models::{category::CreateCategory, enums::EventSize, package::NewPackageMember},
};

use crate::common;

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_add_twice_upserts_single_membership() {
    let (repository, services) = common::setup().await;

    let category = repository
        .categories
        .create(&common::category(
            &common::unique("Upsert Package"),
            "weddings",
            EventSize::Medium,
        ))
        .await
        .unwrap();
    let equipment = repository
        .equipment
        .create(&common::speaker(&common::unique("Upsert Speaker"), None))
        .await
        .unwrap();

    let first = services
        .packages
        .add_equipment_to_package(equipment.id, category.id, 1, true)
        .await
        .unwrap();
    let second = services
        .packages
        .add_equipment_to_package(equipment.id, category.id, 3, false)
        .await
        .unwrap();

    // Same row, latest values.
    assert_eq!(first.id, second.id);
    assert_eq!(second.quantity_in_package, 3);
    assert!(!second.is_required);

    let details = services.packages.get_package_details(category.id).await.unwrap();
    assert_eq!(details.equipment.len(), 1);
    assert_eq!(details.equipment[0].quantity_in_package, 3);
    assert!(!details.equipment[0].is_required);

    repository.categories.delete(category.id).await.unwrap();
    repository.equipment.delete(equipment.id).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_remove_never_added_pair_is_zero_affected() {
    let (_, services) = common::setup().await;

    let affected = services
        .packages
        .remove_equipment_from_package(-1, -1)
        .await
        .expect("Removing a non-existent membership must not fail");
    assert_eq!(affected, 0);
}

#[tokio::test]
#[ignore]
async fn test_update_quantity_on_missing_pair_is_not_found() {
    let (_, services) = common::setup().await;

    let err = services
        .packages
        .update_package_quantity(-1, -1, 5)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    let err = services
        .packages
        .update_package_requirement(-1, -1, false)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
#[ignore]
async fn test_membership_for_missing_equipment_is_dangling_reference() {
    let (repository, services) = common::setup().await;

    let category = repository
        .categories
        .create(&common::category(
            &common::unique("Dangling Package"),
            "clubs",
            EventSize::Small,
        ))
        .await
        .unwrap();

    let err = services
        .packages
        .add_equipment_to_package(-1, category.id, 1, true)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DanglingReference(_)));

    repository.categories.delete(category.id).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_package_details_total_cost_end_to_end() {
    let (repository, services) = common::setup().await;

    let category = repository
        .categories
        .create(&common::category(
            &common::unique("Costed Package"),
            "corporate events",
            EventSize::Medium,
        ))
        .await
        .unwrap();
    let equipment = repository
        .equipment
        .create(&common::speaker(
            &common::unique("Test Speaker"),
            Some(Decimal::new(5000, 2)),
        ))
        .await
        .unwrap();

    services
        .packages
        .add_equipment_to_package(equipment.id, category.id, 2, true)
        .await
        .unwrap();

    let details = services.packages.get_package_details(category.id).await.unwrap();
    assert_eq!(details.equipment.len(), 1);
    assert_eq!(details.equipment[0].quantity_in_package, 2);
    assert!(details.equipment[0].is_required);
    // 2 x 50.00/day
    assert_eq!(details.statistics.estimated_daily_cost, Decimal::new(10000, 2));
    assert!(!details.statistics.incomplete_pricing);
    assert_eq!(details.statistics.total_items, 2);
    assert_eq!(details.statistics.required_items, 2);

    repository.categories.delete(category.id).await.unwrap();
    repository.equipment.delete(equipment.id).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_unpriced_member_flags_incomplete_pricing() {
    let (repository, services) = common::setup().await;

    let category = repository
        .categories
        .create(&common::category(
            &common::unique("Unpriced Package"),
            "schools",
            EventSize::Small,
        ))
        .await
        .unwrap();
    let priced = repository
        .equipment
        .create(&common::speaker(
            &common::unique("Priced Speaker"),
            Some(Decimal::new(2000, 2)),
        ))
        .await
        .unwrap();
    let unpriced = repository
        .equipment
        .create(&common::speaker(&common::unique("Unpriced Speaker"), None))
        .await
        .unwrap();

    services
        .packages
        .add_equipment_to_package(priced.id, category.id, 1, true)
        .await
        .unwrap();
    services
        .packages
        .add_equipment_to_package(unpriced.id, category.id, 4, false)
        .await
        .unwrap();

    let details = services.packages.get_package_details(category.id).await.unwrap();
    // The missing price counts as zero instead of failing the computation.
    assert_eq!(details.statistics.estimated_daily_cost, Decimal::new(2000, 2));
    assert!(details.statistics.incomplete_pricing);

    repository.categories.delete(category.id).await.unwrap();
    repository.equipment.delete(priced.id).await.unwrap();
    repository.equipment.delete(unpriced.id).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_discovery_by_audience_and_size() {
    let (repository, services) = common::setup().await;

    let audience = common::unique("street festivals");
    let matching = repository
        .categories
        .create(&common::category(
            &common::unique("Festival Stage"),
            &audience,
            EventSize::Large,
        ))
        .await
        .unwrap();
    let wrong_size = repository
        .categories
        .create(&common::category(
            &common::unique("Festival Booth"),
            &audience,
            EventSize::Small,
        ))
        .await
        .unwrap();

    let packages = services
        .packages
        .get_packages_by_audience_and_size(&audience, EventSize::Large)
        .await
        .unwrap();
    assert_eq!(packages.len(), 1);
    assert_eq!(packages[0].category.id, matching.id);

    repository.categories.delete(matching.id).await.unwrap();
    repository.categories.delete(wrong_size.id).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_bulk_create_and_duplicate_package() {
    let (repository, services) = common::setup().await;

    let speaker = repository
        .equipment
        .create(&common::speaker(
            &common::unique("Bulk Speaker"),
            Some(Decimal::new(3000, 2)),
        ))
        .await
        .unwrap();
    let spare = repository
        .equipment
        .create(&common::speaker(
            &common::unique("Bulk Spare"),
            Some(Decimal::new(1000, 2)),
        ))
        .await
        .unwrap();

    let details = services
        .packages
        .create_package_from_equipment_list(
            common::category(&common::unique("Assembled Package"), "weddings", EventSize::Medium),
            vec![
                NewPackageMember {
                    equipment_id: speaker.id,
                    quantity: 2,
                    required: true,
                },
                NewPackageMember {
                    equipment_id: spare.id,
                    quantity: 1,
                    required: false,
                },
            ],
        )
        .await
        .unwrap();

    assert_eq!(details.equipment.len(), 2);
    assert_eq!(details.statistics.total_items, 3);
    assert_eq!(details.statistics.estimated_daily_cost, Decimal::new(7000, 2));

    let copy = services
        .packages
        .duplicate_package(
            details.category.id,
            CreateCategory {
                name: common::unique("Assembled Package Copy"),
                description: None,
                target_audience: Some("weddings".to_string()),
                typical_event_size: Some(EventSize::Medium),
            },
        )
        .await
        .unwrap();

    assert_eq!(copy.equipment.len(), 2);
    assert_eq!(copy.statistics.estimated_daily_cost, details.statistics.estimated_daily_cost);

    repository.categories.delete(details.category.id).await.unwrap();
    repository.categories.delete(copy.category.id).await.unwrap();
    repository.equipment.delete(speaker.id).await.unwrap();
    repository.equipment.delete(spare.id).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_bulk_create_rolls_back_on_bad_member() {
    let (repository, services) = common::setup().await;

    let name = common::unique("Rollback Package");
    let err = services
        .packages
        .create_package_from_equipment_list(
            common::category(&name, "clubs", EventSize::Small),
            // Equipment id -1 does not exist; the FK violation must undo the
            // category insert too.
            vec![NewPackageMember {
                equipment_id: -1,
                quantity: 1,
                required: true,
            }],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DanglingReference(_)));

    let leftovers = repository.categories.search(&name).await.unwrap();
    assert!(leftovers.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_database_statistics_count_new_rows() {
    let (repository, services) = common::setup().await;

    let before = services.stats.get_database_statistics().await.unwrap();

    let equipment = repository
        .equipment
        .create(&common::speaker(
            &common::unique("Stat Speaker"),
            Some(Decimal::new(1500, 2)),
        ))
        .await
        .unwrap();

    let after = services.stats.get_database_statistics().await.unwrap();
    assert_eq!(after.equipment.total, before.equipment.total + 1);
    assert_eq!(after.equipment.available, before.equipment.available + 1);

    let by_type = services.stats.get_equipment_type_statistics().await.unwrap();
    let speakers = by_type
        .iter()
        .find(|t| t.equipment_type == rigbase::models::enums::EquipmentType::Speaker)
        .expect("speaker row expected in type statistics");
    assert!(speakers.total_count >= 1);
    assert!(speakers.avg_price.is_some());

    repository.equipment.delete(equipment.id).await.unwrap();
}
