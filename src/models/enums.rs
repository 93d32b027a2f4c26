//! Shared domain enums, stored as lowercase text matching the schema CHECK
//! constraints.

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, Postgres};

// ---------------------------------------------------------------------------
// EquipmentType
// ---------------------------------------------------------------------------

/// Kind of rentable equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentType {
    Speaker,
    Light,
    Microphone,
    Mixer,
    Amplifier,
    Cable,
    Stand,
    Case,
    Controller,
    Other,
}

impl EquipmentType {
    pub const ALL: [EquipmentType; 10] = [
        EquipmentType::Speaker,
        EquipmentType::Light,
        EquipmentType::Microphone,
        EquipmentType::Mixer,
        EquipmentType::Amplifier,
        EquipmentType::Cable,
        EquipmentType::Stand,
        EquipmentType::Case,
        EquipmentType::Controller,
        EquipmentType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentType::Speaker => "speaker",
            EquipmentType::Light => "light",
            EquipmentType::Microphone => "microphone",
            EquipmentType::Mixer => "mixer",
            EquipmentType::Amplifier => "amplifier",
            EquipmentType::Cable => "cable",
            EquipmentType::Stand => "stand",
            EquipmentType::Case => "case",
            EquipmentType::Controller => "controller",
            EquipmentType::Other => "other",
        }
    }
}

impl std::fmt::Display for EquipmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EquipmentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "speaker" => Ok(EquipmentType::Speaker),
            "light" => Ok(EquipmentType::Light),
            "microphone" => Ok(EquipmentType::Microphone),
            "mixer" => Ok(EquipmentType::Mixer),
            "amplifier" => Ok(EquipmentType::Amplifier),
            "cable" => Ok(EquipmentType::Cable),
            "stand" => Ok(EquipmentType::Stand),
            "case" => Ok(EquipmentType::Case),
            "controller" => Ok(EquipmentType::Controller),
            "other" => Ok(EquipmentType::Other),
            _ => Err(format!("Invalid equipment type: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for EquipmentType {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for EquipmentType {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for EquipmentType {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <String as Encode<Postgres>>::encode(self.as_str().to_string(), buf)
    }
}

// ---------------------------------------------------------------------------
// AvailabilityStatus
// ---------------------------------------------------------------------------

/// Rental availability of an equipment item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    #[default]
    Available,
    Rented,
    Maintenance,
    Retired,
}

impl AvailabilityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityStatus::Available => "available",
            AvailabilityStatus::Rented => "rented",
            AvailabilityStatus::Maintenance => "maintenance",
            AvailabilityStatus::Retired => "retired",
        }
    }
}

impl std::fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AvailabilityStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(AvailabilityStatus::Available),
            "rented" => Ok(AvailabilityStatus::Rented),
            "maintenance" => Ok(AvailabilityStatus::Maintenance),
            "retired" => Ok(AvailabilityStatus::Retired),
            _ => Err(format!("Invalid availability status: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for AvailabilityStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for AvailabilityStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for AvailabilityStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <String as Encode<Postgres>>::encode(self.as_str().to_string(), buf)
    }
}

// ---------------------------------------------------------------------------
// EventSize
// ---------------------------------------------------------------------------

/// Typical audience size a package is sized for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSize {
    Small,
    Medium,
    Large,
    Custom,
}

impl EventSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventSize::Small => "small",
            EventSize::Medium => "medium",
            EventSize::Large => "large",
            EventSize::Custom => "custom",
        }
    }

    /// Guest-count range the size stands for
    pub fn capacity_hint(&self) -> &'static str {
        match self {
            EventSize::Small => "10-50",
            EventSize::Medium => "50-200",
            EventSize::Large => "200+",
            EventSize::Custom => "custom",
        }
    }
}

impl std::fmt::Display for EventSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EventSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(EventSize::Small),
            "medium" => Ok(EventSize::Medium),
            "large" => Ok(EventSize::Large),
            "custom" => Ok(EventSize::Custom),
            _ => Err(format!("Invalid event size: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for EventSize {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for EventSize {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for EventSize {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <String as Encode<Postgres>>::encode(self.as_str().to_string(), buf)
    }
}
