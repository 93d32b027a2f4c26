//! Equipment repository

use crate::{
    db::Database,
    error::{Error, Result},
    models::{
        enums::{AvailabilityStatus, EquipmentType},
        equipment::{CreateEquipment, Equipment, UpdateEquipment},
        validated,
    },
};

#[derive(Clone)]
pub struct EquipmentRepository {
    db: Database,
}

impl EquipmentRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create an equipment item.
    ///
    /// All constraints are checked client-side first, so invalid input fails
    /// with `InvalidValue` before the insert is issued.
    pub async fn create(&self, data: &CreateEquipment) -> Result<Equipment> {
        validated(data)?;

        let query = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment (name, description, equipment_type, brand, model,
                                   power_rating, dimensions, weight, rental_price_per_day,
                                   availability_status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.equipment_type)
        .bind(&data.brand)
        .bind(&data.model)
        .bind(&data.power_rating)
        .bind(&data.dimensions)
        .bind(data.weight)
        .bind(data.rental_price_per_day)
        .bind(data.availability_status.unwrap_or_default());

        let created = self.db.fetch_one(query).await?;
        tracing::info!(id = created.id, name = %created.name, "Equipment created");
        Ok(created)
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i32) -> Result<Equipment> {
        self.db
            .fetch_optional(sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1").bind(id))
            .await?
            .ok_or_else(|| Error::NotFound(format!("Equipment {} not found", id)))
    }

    /// List all equipment
    pub async fn get_all(&self) -> Result<Vec<Equipment>> {
        self.db
            .fetch_all(sqlx::query_as::<_, Equipment>(
                "SELECT * FROM equipment ORDER BY name",
            ))
            .await
    }

    /// Get all equipment of one type
    pub async fn get_by_type(&self, equipment_type: EquipmentType) -> Result<Vec<Equipment>> {
        self.db
            .fetch_all(
                sqlx::query_as::<_, Equipment>(
                    "SELECT * FROM equipment WHERE equipment_type = $1 ORDER BY name",
                )
                .bind(equipment_type),
            )
            .await
    }

    /// Get all equipment in one availability status
    pub async fn get_by_availability(&self, status: AvailabilityStatus) -> Result<Vec<Equipment>> {
        self.db
            .fetch_all(
                sqlx::query_as::<_, Equipment>(
                    "SELECT * FROM equipment WHERE availability_status = $1 ORDER BY name",
                )
                .bind(status),
            )
            .await
    }

    /// Get all equipment currently available for rental
    pub async fn get_available(&self) -> Result<Vec<Equipment>> {
        self.get_by_availability(AvailabilityStatus::Available).await
    }

    /// Full-text search across name and description, most relevant first.
    ///
    /// Ties are broken by name so the ordering is deterministic. An empty or
    /// whitespace-only query matches nothing, and a query with no matches
    /// returns an empty list rather than an error.
    pub async fn search(&self, query: &str) -> Result<Vec<Equipment>> {
        let term = query.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }

        self.db
            .fetch_all(
                sqlx::query_as::<_, Equipment>(
                    r#"
                    SELECT *, ts_rank(to_tsvector('english', name || ' ' || description),
                                      plainto_tsquery('english', $1)) AS rank
                    FROM equipment
                    WHERE to_tsvector('english', name || ' ' || description)
                          @@ plainto_tsquery('english', $1)
                    ORDER BY rank DESC, name
                    "#,
                )
                .bind(term),
            )
            .await
    }

    /// Update an equipment item. Only supplied fields change.
    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> Result<Equipment> {
        validated(data)?;
        if data.is_empty() {
            return Err(Error::InvalidValue("No fields supplied for update".to_string()));
        }

        let mut sets = vec!["updated_at = NOW()".to_string()];
        let mut idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.description, "description");
        add_field!(data.equipment_type, "equipment_type");
        add_field!(data.brand, "brand");
        add_field!(data.model, "model");
        add_field!(data.power_rating, "power_rating");
        add_field!(data.dimensions, "dimensions");
        add_field!(data.weight, "weight");
        add_field!(data.rental_price_per_day, "rental_price_per_day");
        add_field!(data.availability_status, "availability_status");

        let statement = format!(
            "UPDATE equipment SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Equipment>(&statement);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.description);
        bind_field!(data.equipment_type);
        bind_field!(data.brand);
        bind_field!(data.model);
        bind_field!(data.power_rating);
        bind_field!(data.dimensions);
        bind_field!(data.weight);
        bind_field!(data.rental_price_per_day);
        bind_field!(data.availability_status);
        builder = builder.bind(id);

        self.db
            .fetch_optional(builder)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Equipment {} not found", id)))
    }

    /// Delete an equipment item. Its package memberships go with it via the
    /// foreign-key cascade; no separate cleanup is issued here.
    pub async fn delete(&self, id: i32) -> Result<()> {
        let affected = self
            .db
            .execute(sqlx::query("DELETE FROM equipment WHERE id = $1").bind(id))
            .await?;
        if affected == 0 {
            return Err(Error::NotFound(format!("Equipment {} not found", id)));
        }
        tracing::info!(id, "Equipment deleted");
        Ok(())
    }
}
