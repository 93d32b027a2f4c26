//! Statistics service.
//!
//! Read-only aggregation over the catalog tables. Nothing is stored;
//! every call recomputes from the live rows.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use crate::{
    error::Result,
    models::enums::{AvailabilityStatus, EquipmentType, EventSize},
    repository::Repository,
};

/// Headline counts over the whole catalog
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseStatistics {
    pub equipment: EquipmentCounts,
    pub categories: CategoryCounts,
    pub packages: AssociationCounts,
}

#[derive(Debug, Clone, Serialize)]
pub struct EquipmentCounts {
    pub total: i64,
    pub available: i64,
    /// Distinct equipment types in use
    pub types: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryCounts {
    pub total: i64,
    /// Distinct target audiences in use
    pub audience_types: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssociationCounts {
    pub total_associations: i64,
}

/// Per-type equipment counts and pricing
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TypeStatistics {
    pub equipment_type: EquipmentType,
    pub total_count: i64,
    pub available_count: i64,
    pub avg_price: Option<Decimal>,
    pub total_price: Option<Decimal>,
}

/// Count and share of one availability status
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AvailabilityStatistics {
    pub availability_status: AvailabilityStatus,
    pub count: i64,
    pub percentage: Option<Decimal>,
}

/// Rental price distribution over priced equipment
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PriceStatistics {
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub avg_price: Option<Decimal>,
    pub median_price: Option<Decimal>,
}

/// Composition counts for one category
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CategoryStatistics {
    pub name: String,
    pub target_audience: Option<String>,
    pub typical_event_size: Option<EventSize>,
    pub equipment_count: i64,
    pub unique_equipment_count: i64,
    pub total_items: i64,
}

/// Category and equipment coverage for one target audience
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AudienceStatistics {
    pub target_audience: Option<String>,
    pub category_count: i64,
    pub equipment_types: i64,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Overall database statistics
    pub async fn get_database_statistics(&self) -> Result<DatabaseStatistics> {
        let db = &self.repository.db;

        let total_equipment: i64 = db
            .fetch_scalar(sqlx::query_scalar("SELECT COUNT(*) FROM equipment"))
            .await?;
        let available_equipment: i64 = db
            .fetch_scalar(sqlx::query_scalar(
                "SELECT COUNT(*) FROM equipment WHERE availability_status = 'available'",
            ))
            .await?;
        let equipment_types: i64 = db
            .fetch_scalar(sqlx::query_scalar(
                "SELECT COUNT(DISTINCT equipment_type) FROM equipment",
            ))
            .await?;
        let total_categories: i64 = db
            .fetch_scalar(sqlx::query_scalar("SELECT COUNT(*) FROM categories"))
            .await?;
        let audience_types: i64 = db
            .fetch_scalar(sqlx::query_scalar(
                "SELECT COUNT(DISTINCT target_audience) FROM categories",
            ))
            .await?;
        let total_associations: i64 = db
            .fetch_scalar(sqlx::query_scalar(
                "SELECT COUNT(*) FROM equipment_categories",
            ))
            .await?;

        Ok(DatabaseStatistics {
            equipment: EquipmentCounts {
                total: total_equipment,
                available: available_equipment,
                types: equipment_types,
            },
            categories: CategoryCounts {
                total: total_categories,
                audience_types,
            },
            packages: AssociationCounts { total_associations },
        })
    }

    /// Counts and mean/total rental price per equipment type, most common
    /// type first
    pub async fn get_equipment_type_statistics(&self) -> Result<Vec<TypeStatistics>> {
        self.repository
            .db
            .fetch_all(sqlx::query_as::<_, TypeStatistics>(
                r#"
                SELECT equipment_type,
                       COUNT(*) AS total_count,
                       COUNT(CASE WHEN availability_status = 'available' THEN 1 END) AS available_count,
                       ROUND(AVG(rental_price_per_day), 2) AS avg_price,
                       SUM(rental_price_per_day) AS total_price
                FROM equipment
                GROUP BY equipment_type
                ORDER BY total_count DESC
                "#,
            ))
            .await
    }

    /// Count and share of each availability status
    pub async fn get_availability_statistics(&self) -> Result<Vec<AvailabilityStatistics>> {
        self.repository
            .db
            .fetch_all(sqlx::query_as::<_, AvailabilityStatistics>(
                r#"
                SELECT availability_status,
                       COUNT(*) AS count,
                       ROUND(COUNT(*) * 100.0 / (SELECT COUNT(*) FROM equipment), 2) AS percentage
                FROM equipment
                GROUP BY availability_status
                ORDER BY count DESC
                "#,
            ))
            .await
    }

    /// Rental price distribution over equipment that has a price
    pub async fn get_price_statistics(&self) -> Result<PriceStatistics> {
        self.repository
            .db
            .fetch_one(sqlx::query_as::<_, PriceStatistics>(
                r#"
                SELECT MIN(rental_price_per_day) AS min_price,
                       MAX(rental_price_per_day) AS max_price,
                       ROUND(AVG(rental_price_per_day), 2) AS avg_price,
                       (PERCENTILE_CONT(0.5) WITHIN GROUP (ORDER BY rental_price_per_day))::numeric
                           AS median_price
                FROM equipment
                WHERE rental_price_per_day IS NOT NULL
                "#,
            ))
            .await
    }

    /// Composition counts per category, largest package first
    pub async fn get_category_statistics(&self) -> Result<Vec<CategoryStatistics>> {
        self.repository
            .db
            .fetch_all(sqlx::query_as::<_, CategoryStatistics>(
                r#"
                SELECT c.name, c.target_audience, c.typical_event_size,
                       COUNT(ec.equipment_id) AS equipment_count,
                       COUNT(DISTINCT ec.equipment_id) AS unique_equipment_count,
                       COALESCE(SUM(ec.quantity_in_package), 0)::bigint AS total_items
                FROM categories c
                LEFT JOIN equipment_categories ec ON c.id = ec.category_id
                GROUP BY c.id, c.name, c.target_audience, c.typical_event_size
                ORDER BY equipment_count DESC, c.name
                "#,
            ))
            .await
    }

    /// Category and equipment coverage per target audience
    pub async fn get_audience_statistics(&self) -> Result<Vec<AudienceStatistics>> {
        self.repository
            .db
            .fetch_all(sqlx::query_as::<_, AudienceStatistics>(
                r#"
                SELECT c.target_audience,
                       COUNT(DISTINCT c.id) AS category_count,
                       COUNT(DISTINCT ec.equipment_id) AS equipment_types
                FROM categories c
                LEFT JOIN equipment_categories ec ON c.id = ec.category_id
                GROUP BY c.target_audience
                ORDER BY category_count DESC
                "#,
            ))
            .await
    }
}
