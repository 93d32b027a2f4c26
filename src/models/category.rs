//! Category (package definition) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::{
    enums::EventSize,
    equipment::not_blank,
    package::PackageEquipment,
};

/// Category record. A category names a package of equipment for one kind of
/// event (e.g. "Party Package").
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i32,
    /// Unique across all categories
    pub name: String,
    pub description: Option<String>,
    /// Free text, e.g. "corporate events"
    pub target_audience: Option<String>,
    pub typical_event_size: Option<EventSize>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create category request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategory {
    #[validate(custom(function = "not_blank", message = "Name must not be empty"))]
    pub name: String,
    pub description: Option<String>,
    pub target_audience: Option<String>,
    pub typical_event_size: Option<EventSize>,
}

/// Update category request (PATCH semantics, see `UpdateEquipment`)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCategory {
    #[validate(custom(function = "not_blank", message = "Name must not be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub target_audience: Option<String>,
    pub typical_event_size: Option<EventSize>,
}

impl UpdateCategory {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.target_audience.is_none()
            && self.typical_event_size.is_none()
    }
}

/// Category joined with its equipment, required items first
#[derive(Debug, Clone, Serialize)]
pub struct CategoryWithEquipment {
    pub category: Category,
    pub equipment: Vec<PackageEquipment>,
    pub total_equipment_count: usize,
    pub required_equipment_count: usize,
}
