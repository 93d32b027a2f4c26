//! Package membership models and the derived package views

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::{category::Category, enums::EquipmentType, equipment::Equipment};

/// Junction row linking one equipment item to one category.
/// At most one row exists per (equipment_id, category_id) pair.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PackageMembership {
    pub id: i32,
    pub equipment_id: i32,
    pub category_id: i32,
    pub quantity_in_package: i32,
    pub is_required: bool,
    pub created_at: DateTime<Utc>,
}

/// Equipment row carrying its membership quantity and required flag
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PackageEquipment {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub equipment: Equipment,
    pub quantity_in_package: i32,
    pub is_required: bool,
}

/// Category row carrying the membership quantity and required flag, for the
/// "which packages contain this item" view
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CategoryMembership {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub category: Category,
    pub quantity_in_package: i32,
    pub is_required: bool,
}

/// One member of a package being assembled in bulk
#[derive(Debug, Clone, Deserialize)]
pub struct NewPackageMember {
    pub equipment_id: i32,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_quantity() -> i32 {
    1
}

fn default_required() -> bool {
    true
}

/// Derived totals for one package
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageSummary {
    pub total_equipment_types: usize,
    pub total_items: i64,
    pub required_items: i64,
    pub optional_items: i64,
    /// Sum of quantity x rental_price_per_day over all members. Members with
    /// no price contribute zero and set `incomplete_pricing` instead of
    /// failing the computation.
    pub estimated_daily_cost: Decimal,
    pub incomplete_pricing: bool,
}

impl PackageSummary {
    pub fn compute(members: &[PackageEquipment]) -> Self {
        let total_items: i64 = members
            .iter()
            .map(|m| i64::from(m.quantity_in_package))
            .sum();
        let required_items: i64 = members
            .iter()
            .filter(|m| m.is_required)
            .map(|m| i64::from(m.quantity_in_package))
            .sum();

        let mut cost = Decimal::ZERO;
        let mut incomplete_pricing = false;
        for member in members {
            match member.equipment.rental_price_per_day {
                Some(price) => cost += price * Decimal::from(member.quantity_in_package),
                None => incomplete_pricing = true,
            }
        }

        let types: BTreeSet<EquipmentType> =
            members.iter().map(|m| m.equipment.equipment_type).collect();

        Self {
            total_equipment_types: types.len(),
            total_items,
            required_items,
            optional_items: total_items - required_items,
            estimated_daily_cost: cost.round_dp(2),
            incomplete_pricing,
        }
    }
}

/// Complete package view: the category, its ordered members, the members
/// grouped by equipment type, and the derived totals
#[derive(Debug, Clone, Serialize)]
pub struct PackageDetails {
    pub category: Category,
    pub equipment: Vec<PackageEquipment>,
    pub equipment_by_type: BTreeMap<EquipmentType, Vec<PackageEquipment>>,
    pub statistics: PackageSummary,
}

impl PackageDetails {
    pub fn build(category: Category, equipment: Vec<PackageEquipment>) -> Self {
        let statistics = PackageSummary::compute(&equipment);
        let mut equipment_by_type: BTreeMap<EquipmentType, Vec<PackageEquipment>> = BTreeMap::new();
        for member in &equipment {
            equipment_by_type
                .entry(member.equipment.equipment_type)
                .or_default()
                .push(member.clone());
        }
        Self {
            category,
            equipment,
            equipment_by_type,
            statistics,
        }
    }
}
