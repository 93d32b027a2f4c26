//! Shared setup for the live-database tests

use rand::Rng;
use rust_decimal::Decimal;

use rigbase::{
    config::DatabaseConfig,
    db::{ConnectionPool, Database},
    models::{
        category::CreateCategory,
        enums::{EquipmentType, EventSize},
        equipment::CreateEquipment,
    },
    repository::Repository,
    services::Services,
};

/// Database URL for tests, defaulting to a local instance
pub fn database_url() -> String {
    std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgres://postgres@localhost:5432/rigbase".to_string())
}

/// Connect, apply migrations, and hand back the full stack
pub async fn setup() -> (Repository, Services) {
    let pool = match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let pg = sqlx::postgres::PgPoolOptions::new()
                .max_connections(5)
                .connect(&url)
                .await
                .expect("Failed to connect to test database");
            ConnectionPool::from_pool(pg)
        }
        Err(_) => ConnectionPool::connect(&DatabaseConfig::default())
            .await
            .expect("Failed to connect to test database"),
    };
    pool.run_migrations()
        .await
        .expect("Failed to run migrations");

    let repository = Repository::new(Database::new(pool));
    let services = Services::new(repository.clone());
    (repository, services)
}

/// Unique suffix so tests can run repeatedly against the same database
pub fn unique(name: &str) -> String {
    let n: u32 = rand::thread_rng().gen();
    format!("{} {:08x}", name, n)
}

pub fn speaker(name: &str, price: Option<Decimal>) -> CreateEquipment {
    CreateEquipment {
        name: name.to_string(),
        description: format!("{} powered loudspeaker for live events", name),
        equipment_type: EquipmentType::Speaker,
        brand: Some("Testbrand".to_string()),
        model: None,
        power_rating: Some("1000W".to_string()),
        dimensions: None,
        weight: Some(Decimal::new(145, 1)),
        rental_price_per_day: price,
        availability_status: None,
    }
}

pub fn category(name: &str, audience: &str, size: EventSize) -> CreateCategory {
    CreateCategory {
        name: name.to_string(),
        description: Some(format!("{} equipment bundle", name)),
        target_audience: Some(audience.to_string()),
        typical_event_size: Some(size),
    }
}
