//! Equipment model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use crate::models::enums::{AvailabilityStatus, EquipmentType};

/// Equipment record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Equipment {
    pub id: i32,
    pub name: String,
    /// Source text for full-text search, together with `name`
    pub description: String,
    pub equipment_type: EquipmentType,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub power_rating: Option<String>,
    pub dimensions: Option<String>,
    pub weight: Option<Decimal>,
    pub rental_price_per_day: Option<Decimal>,
    pub availability_status: AvailabilityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create equipment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEquipment {
    #[validate(custom(function = "not_blank", message = "Name must not be empty"))]
    pub name: String,
    #[validate(custom(function = "not_blank", message = "Description must not be empty"))]
    pub description: String,
    pub equipment_type: EquipmentType,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub power_rating: Option<String>,
    pub dimensions: Option<String>,
    #[validate(custom(function = "positive", message = "Weight must be positive"))]
    pub weight: Option<Decimal>,
    #[validate(custom(function = "positive", message = "Rental price must be positive"))]
    pub rental_price_per_day: Option<Decimal>,
    /// Defaults to `available` when absent
    pub availability_status: Option<AvailabilityStatus>,
}

/// Update equipment request. Only supplied fields change; everything left
/// `None` is untouched (PATCH, not PUT).
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateEquipment {
    #[validate(custom(function = "not_blank", message = "Name must not be empty"))]
    pub name: Option<String>,
    #[validate(custom(function = "not_blank", message = "Description must not be empty"))]
    pub description: Option<String>,
    pub equipment_type: Option<EquipmentType>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub power_rating: Option<String>,
    pub dimensions: Option<String>,
    #[validate(custom(function = "positive", message = "Weight must be positive"))]
    pub weight: Option<Decimal>,
    #[validate(custom(function = "positive", message = "Rental price must be positive"))]
    pub rental_price_per_day: Option<Decimal>,
    pub availability_status: Option<AvailabilityStatus>,
}

impl UpdateEquipment {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.equipment_type.is_none()
            && self.brand.is_none()
            && self.model.is_none()
            && self.power_rating.is_none()
            && self.dimensions.is_none()
            && self.weight.is_none()
            && self.rental_price_per_day.is_none()
            && self.availability_status.is_none()
    }
}

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("not_blank"))
    } else {
        Ok(())
    }
}

pub(crate) fn positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value > Decimal::ZERO {
        Ok(())
    } else {
        Err(ValidationError::new("positive"))
    }
}
