//! Category repository

use crate::{
    db::Database,
    error::{Error, Result},
    models::{
        category::{Category, CategoryWithEquipment, CreateCategory, UpdateCategory},
        enums::EventSize,
        package::PackageEquipment,
        validated,
    },
};

#[derive(Clone)]
pub struct CategoriesRepository {
    db: Database,
}

impl CategoriesRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create a category. Name uniqueness is enforced by the database and
    /// surfaces as `DuplicateName`.
    pub async fn create(&self, data: &CreateCategory) -> Result<Category> {
        validated(data)?;

        let query = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description, target_audience, typical_event_size)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.target_audience)
        .bind(data.typical_event_size);

        let created = self.db.fetch_one(query).await?;
        tracing::info!(id = created.id, name = %created.name, "Category created");
        Ok(created)
    }

    /// Get category by ID
    pub async fn get_by_id(&self, id: i32) -> Result<Category> {
        self.db
            .fetch_optional(sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1").bind(id))
            .await?
            .ok_or_else(|| Error::NotFound(format!("Category {} not found", id)))
    }

    /// List all categories
    pub async fn get_all(&self) -> Result<Vec<Category>> {
        self.db
            .fetch_all(sqlx::query_as::<_, Category>(
                "SELECT * FROM categories ORDER BY name",
            ))
            .await
    }

    /// Get categories for one target audience. The match is exact and
    /// case-sensitive; no fuzzy matching.
    pub async fn get_by_audience(&self, target_audience: &str) -> Result<Vec<Category>> {
        self.db
            .fetch_all(
                sqlx::query_as::<_, Category>(
                    "SELECT * FROM categories WHERE target_audience = $1 ORDER BY name",
                )
                .bind(target_audience),
            )
            .await
    }

    /// Get categories sized for one typical event size
    pub async fn get_by_event_size(&self, event_size: EventSize) -> Result<Vec<Category>> {
        self.db
            .fetch_all(
                sqlx::query_as::<_, Category>(
                    "SELECT * FROM categories WHERE typical_event_size = $1 ORDER BY name",
                )
                .bind(event_size),
            )
            .await
    }

    /// Get categories matching both audience and event size exactly
    pub async fn get_by_audience_and_size(
        &self,
        target_audience: &str,
        event_size: EventSize,
    ) -> Result<Vec<Category>> {
        self.db
            .fetch_all(
                sqlx::query_as::<_, Category>(
                    r#"
                    SELECT * FROM categories
                    WHERE target_audience = $1 AND typical_event_size = $2
                    ORDER BY name
                    "#,
                )
                .bind(target_audience)
                .bind(event_size),
            )
            .await
    }

    /// Substring search over category name and description
    pub async fn search(&self, query: &str) -> Result<Vec<Category>> {
        let pattern = format!("%{}%", query.trim());
        self.db
            .fetch_all(
                sqlx::query_as::<_, Category>(
                    r#"
                    SELECT * FROM categories
                    WHERE name ILIKE $1 OR description ILIKE $1
                    ORDER BY name
                    "#,
                )
                .bind(pattern),
            )
            .await
    }

    /// Get a category joined with its equipment: required items first, each
    /// group ordered by equipment name, so essential items come before
    /// nice-to-haves.
    pub async fn get_with_equipment(&self, id: i32) -> Result<CategoryWithEquipment> {
        let category = self.get_by_id(id).await?;

        let equipment = self
            .db
            .fetch_all(
                sqlx::query_as::<_, PackageEquipment>(
                    r#"
                    SELECT e.*, ec.quantity_in_package, ec.is_required
                    FROM equipment e
                    JOIN equipment_categories ec ON e.id = ec.equipment_id
                    WHERE ec.category_id = $1
                    ORDER BY ec.is_required DESC, e.name
                    "#,
                )
                .bind(id),
            )
            .await?;

        let required_equipment_count = equipment.iter().filter(|e| e.is_required).count();
        Ok(CategoryWithEquipment {
            category,
            total_equipment_count: equipment.len(),
            required_equipment_count,
            equipment,
        })
    }

    /// Update a category. Only supplied fields change.
    pub async fn update(&self, id: i32, data: &UpdateCategory) -> Result<Category> {
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
        add_field!(data.target_audience, "target_audience");
        add_field!(data.typical_event_size, "typical_event_size");

        let statement = format!(
            "UPDATE categories SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Category>(&statement);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.description);
        bind_field!(data.target_audience);
        bind_field!(data.typical_event_size);
        builder = builder.bind(id);

        self.db
            .fetch_optional(builder)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Category {} not found", id)))
    }

    /// Delete a category. Its package memberships go with it via the
    /// foreign-key cascade.
    pub async fn delete(&self, id: i32) -> Result<()> {
        let affected = self
            .db
            .execute(sqlx::query("DELETE FROM categories WHERE id = $1").bind(id))
            .await?;
        if affected == 0 {
            return Err(Error::NotFound(format!("Category {} not found", id)));
        }
        tracing::info!(id, "Category deleted");
        Ok(())
    }
}
