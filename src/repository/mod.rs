//! Repository layer for database operations

pub mod categories;
pub mod equipment;

use crate::db::Database;

/// Main repository struct holding the shared execution helper
#[derive(Clone)]
pub struct Repository {
    pub db: Database,
    pub equipment: equipment::EquipmentRepository,
    pub categories: categories::CategoriesRepository,
}

impl Repository {
    /// Create a new repository on top of the given execution helper
    pub fn new(db: Database) -> Self {
        Self {
            equipment: equipment::EquipmentRepository::new(db.clone()),
            categories: categories::CategoriesRepository::new(db.clone()),
            db,
        }
    }

    /// Check database health through the underlying pool
    pub async fn health_check(&self) -> bool {
        self.db.pool().health_check().await
    }
}
