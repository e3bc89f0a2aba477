//! Category business logic.

use crate::{
    entities::{Category, category},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

/// Retrieves all categories, ordered alphabetically by name.
pub async fn get_all_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    Category::find()
        .order_by_asc(category::Column::CategoryName)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a category by id.
pub async fn get_category_by_id(
    db: &DatabaseConnection,
    category_id: i64,
) -> Result<Option<category::Model>> {
    Category::find_by_id(category_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a category after trimming its name.
///
/// # Errors
/// Returns an error if the name is empty or the insert fails.
#[instrument(skip(db))]
pub async fn create_category(db: &DatabaseConnection, name: &str) -> Result<category::Model> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Category name cannot be empty".to_string(),
        });
    }

    let created = category::ActiveModel {
        category_name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Created category {} '{}'", created.id, created.category_name);
    Ok(created)
}
