//! Package composition service.
//!
//! Manages the equipment-category junction (quantities, required flags) and
//! derives package-level views.

use crate::{
    error::{Error, Result},
    models::{
        category::CreateCategory,
        enums::EventSize,
        package::{
            CategoryMembership, NewPackageMember, PackageDetails, PackageEquipment,
            PackageMembership,
        },
        validated,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct PackagesService {
    repository: Repository,
}

impl PackagesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Add equipment to a package, or refresh quantity/required in place if
    /// the pair already exists.
    ///
    /// Re-adding the same item is a set-membership operation, not an error;
    /// this is the one place a would-be `DuplicateAssociation` is absorbed.
    /// Two concurrent adds for the same pair are resolved by the unique
    /// constraint plus the conflict branch of this statement.
    pub async fn add_equipment_to_package(
        &self,
        equipment_id: i32,
        category_id: i32,
        quantity: i32,
        required: bool,
    ) -> Result<PackageMembership> {
        if quantity <= 0 {
            return Err(Error::InvalidValue(format!(
                "Quantity must be positive, got {}",
                quantity
            )));
        }

        let membership = self
            .repository
            .db
            .fetch_one(
                sqlx::query_as::<_, PackageMembership>(
                    r#"
                    INSERT INTO equipment_categories
                        (equipment_id, category_id, quantity_in_package, is_required)
                    VALUES ($1, $2, $3, $4)
                    ON CONFLICT (equipment_id, category_id)
                    DO UPDATE SET quantity_in_package = EXCLUDED.quantity_in_package,
                                  is_required = EXCLUDED.is_required
                    RETURNING *
                    "#,
                )
                .bind(equipment_id)
                .bind(category_id)
                .bind(quantity)
                .bind(required),
            )
            .await?;

        tracing::info!(
            equipment_id,
            category_id,
            quantity,
            required,
            "Equipment associated with package"
        );
        Ok(membership)
    }

    /// Remove equipment from a package.
    ///
    /// Idempotent: removing a pair that was never added reports zero rows
    /// affected, not an error.
    pub async fn remove_equipment_from_package(
        &self,
        equipment_id: i32,
        category_id: i32,
    ) -> Result<u64> {
        let affected = self
            .repository
            .db
            .execute(
                sqlx::query(
                    "DELETE FROM equipment_categories WHERE equipment_id = $1 AND category_id = $2",
                )
                .bind(equipment_id)
                .bind(category_id),
            )
            .await?;

        if affected == 0 {
            tracing::warn!(equipment_id, category_id, "No association found to remove");
        } else {
            tracing::info!(equipment_id, category_id, "Equipment removed from package");
        }
        Ok(affected)
    }

    /// Change the quantity of an existing membership. Unlike `add`, a
    /// missing pair is `NotFound` here.
    pub async fn update_package_quantity(
        &self,
        equipment_id: i32,
        category_id: i32,
        quantity: i32,
    ) -> Result<()> {
        if quantity <= 0 {
            return Err(Error::InvalidValue(format!(
                "Quantity must be positive, got {}",
                quantity
            )));
        }

        let affected = self
            .repository
            .db
            .execute(
                sqlx::query(
                    r#"
                    UPDATE equipment_categories
                    SET quantity_in_package = $1
                    WHERE equipment_id = $2 AND category_id = $3
                    "#,
                )
                .bind(quantity)
                .bind(equipment_id)
                .bind(category_id),
            )
            .await?;

        if affected == 0 {
            return Err(Error::NotFound(format!(
                "No membership for equipment {} in category {}",
                equipment_id, category_id
            )));
        }
        Ok(())
    }

    /// Flip the required/optional flag of an existing membership
    pub async fn update_package_requirement(
        &self,
        equipment_id: i32,
        category_id: i32,
        is_required: bool,
    ) -> Result<()> {
        let affected = self
            .repository
            .db
            .execute(
                sqlx::query(
                    r#"
                    UPDATE equipment_categories
                    SET is_required = $1
                    WHERE equipment_id = $2 AND category_id = $3
                    "#,
                )
                .bind(is_required)
                .bind(equipment_id)
                .bind(category_id),
            )
            .await?;

        if affected == 0 {
            return Err(Error::NotFound(format!(
                "No membership for equipment {} in category {}",
                equipment_id, category_id
            )));
        }
        Ok(())
    }

    /// Ordered membership list for one category: required items first, then
    /// by equipment type and name.
    async fn package_members(&self, category_id: i32) -> Result<Vec<PackageEquipment>> {
        self.repository
            .db
            .fetch_all(
                sqlx::query_as::<_, PackageEquipment>(
                    r#"
                    SELECT e.*, ec.quantity_in_package, ec.is_required
                    FROM equipment e
                    JOIN equipment_categories ec ON e.id = ec.equipment_id
                    WHERE ec.category_id = $1
                    ORDER BY ec.is_required DESC, e.equipment_type, e.name
                    "#,
                )
                .bind(category_id),
            )
            .await
    }

    /// Complete package view: the category, its ordered members, and the
    /// derived totals including estimated daily cost.
    pub async fn get_package_details(&self, category_id: i32) -> Result<PackageDetails> {
        let category = self.repository.categories.get_by_id(category_id).await?;
        let members = self.package_members(category_id).await?;
        Ok(PackageDetails::build(category, members))
    }

    /// Primary package-discovery entry point: full details for every package
    /// matching the audience and event size exactly.
    pub async fn get_packages_by_audience_and_size(
        &self,
        target_audience: &str,
        event_size: EventSize,
    ) -> Result<Vec<PackageDetails>> {
        let categories = self
            .repository
            .categories
            .get_by_audience_and_size(target_audience, event_size)
            .await?;

        let mut packages = Vec::with_capacity(categories.len());
        for category in categories {
            let members = self.package_members(category.id).await?;
            packages.push(PackageDetails::build(category, members));
        }
        Ok(packages)
    }

    /// All packages containing one equipment item, by category name
    pub async fn get_equipment_packages(&self, equipment_id: i32) -> Result<Vec<CategoryMembership>> {
        self.repository
            .db
            .fetch_all(
                sqlx::query_as::<_, CategoryMembership>(
                    r#"
                    SELECT c.*, ec.quantity_in_package, ec.is_required
                    FROM categories c
                    JOIN equipment_categories ec ON c.id = ec.category_id
                    WHERE ec.equipment_id = $1
                    ORDER BY c.name
                    "#,
                )
                .bind(equipment_id),
            )
            .await
    }

    /// Search packages by category name and description, expanded to full
    /// package details
    pub async fn search_packages(&self, query: &str) -> Result<Vec<PackageDetails>> {
        let categories = self.repository.categories.search(query).await?;

        let mut packages = Vec::with_capacity(categories.len());
        for category in categories {
            let members = self.package_members(category.id).await?;
            packages.push(PackageDetails::build(category, members));
        }
        Ok(packages)
    }

    /// Create a category and attach a list of members in one transaction.
    /// A failed member insert rolls back the whole package.
    pub async fn create_package_from_equipment_list(
        &self,
        category_data: CreateCategory,
        members: Vec<NewPackageMember>,
    ) -> Result<PackageDetails> {
        validated(&category_data)?;
        for member in &members {
            if member.quantity <= 0 {
                return Err(Error::InvalidValue(format!(
                    "Quantity must be positive, got {} for equipment {}",
                    member.quantity, member.equipment_id
                )));
            }
        }

        let member_count = members.len();
        let category_id = self
            .repository
            .db
            .transaction(move |tx| {
                Box::pin(async move {
                    let category_id: i32 = sqlx::query_scalar(
                        r#"
                        INSERT INTO categories (name, description, target_audience, typical_event_size)
                        VALUES ($1, $2, $3, $4)
                        RETURNING id
                        "#,
                    )
                    .bind(&category_data.name)
                    .bind(&category_data.description)
                    .bind(&category_data.target_audience)
                    .bind(category_data.typical_event_size)
                    .fetch_one(&mut **tx)
                    .await?;

                    for member in &members {
                        sqlx::query(
                            r#"
                            INSERT INTO equipment_categories
                                (equipment_id, category_id, quantity_in_package, is_required)
                            VALUES ($1, $2, $3, $4)
                            ON CONFLICT (equipment_id, category_id)
                            DO UPDATE SET quantity_in_package = EXCLUDED.quantity_in_package,
                                          is_required = EXCLUDED.is_required
                            "#,
                        )
                        .bind(member.equipment_id)
                        .bind(category_id)
                        .bind(member.quantity)
                        .bind(member.required)
                        .execute(&mut **tx)
                        .await?;
                    }

                    Ok(category_id)
                })
            })
            .await?;

        tracing::info!(category_id, member_count, "Package created from equipment list");
        self.get_package_details(category_id).await
    }

    /// Copy an existing package's memberships under a new category, in one
    /// transaction.
    pub async fn duplicate_package(
        &self,
        source_category_id: i32,
        new_category: CreateCategory,
    ) -> Result<PackageDetails> {
        validated(&new_category)?;
        // surface NotFound for a missing source before writing anything
        self.repository
            .categories
            .get_by_id(source_category_id)
            .await?;

        let new_id = self
            .repository
            .db
            .transaction(move |tx| {
                Box::pin(async move {
                    let new_id: i32 = sqlx::query_scalar(
                        r#"
                        INSERT INTO categories (name, description, target_audience, typical_event_size)
                        VALUES ($1, $2, $3, $4)
                        RETURNING id
                        "#,
                    )
                    .bind(&new_category.name)
                    .bind(&new_category.description)
                    .bind(&new_category.target_audience)
                    .bind(new_category.typical_event_size)
                    .fetch_one(&mut **tx)
                    .await?;

                    sqlx::query(
                        r#"
                        INSERT INTO equipment_categories
                            (equipment_id, category_id, quantity_in_package, is_required)
                        SELECT equipment_id, $1, quantity_in_package, is_required
                        FROM equipment_categories
                        WHERE category_id = $2
                        "#,
                    )
                    .bind(new_id)
                    .bind(source_category_id)
                    .execute(&mut **tx)
                    .await?;

                    Ok(new_id)
                })
            })
            .await?;

        tracing::info!(source_category_id, new_id, "Package duplicated");
        self.get_package_details(new_id).await
    }
}
