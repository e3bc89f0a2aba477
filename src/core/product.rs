//! Product business logic - Handles all product-related operations.
//!
//! This module provides functions for creating, updating, deleting and loading
//! products. Updates replace the whole record. Every write checks that the
//! referenced category exists so callers get a `CategoryNotFound` rather than a
//! raw foreign key failure.

use crate::{
    core::{
        category::get_category_by_id,
        snapshot::{ProductSnapshot, load_products_by_id},
    },
    entities::{Category, Product, product},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

/// Largest price a `DECIMAL(10,2)` column holds.
/// Equal to 99999999.99; the mantissa 9_999_999_999 is 0x2_540B_E3FF.
pub const MAX_PRICE: Decimal = Decimal::from_parts(0x540B_E3FF, 2, 0, false, 2);

/// Validated product fields shared by create and update.
struct ProductFields {
    name: String,
    brand: String,
    price: Decimal,
}

fn validate_fields(name: &str, brand: &str, price: Decimal) -> Result<ProductFields> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Product name cannot be empty".to_string(),
        });
    }

    // Trailing zeros do not count against the two decimal places
    let price = price.normalize();
    if price < Decimal::ZERO || price > MAX_PRICE || price.scale() > 2 {
        return Err(Error::InvalidPrice { price });
    }

    Ok(ProductFields {
        name: name.to_string(),
        brand: brand.trim().to_string(),
        price,
    })
}

async fn ensure_category(db: &DatabaseConnection, category_id: i64) -> Result<()> {
    match get_category_by_id(db, category_id).await? {
        Some(_) => Ok(()),
        None => Err(Error::CategoryNotFound { id: category_id }),
    }
}

/// Retrieves a specific product by its unique ID.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new product.
///
/// # Errors
/// Returns an error if:
/// - The product name is empty or whitespace-only
/// - The price is negative, above [`MAX_PRICE`] or has more than two decimal places
/// - The category does not exist
/// - The database insert operation fails
#[instrument(skip(db))]
pub async fn create_product(
    db: &DatabaseConnection,
    name: &str,
    brand: &str,
    price: Decimal,
    category_id: i64,
) -> Result<product::Model> {
    let fields = validate_fields(name, brand, price)?;
    ensure_category(db, category_id).await?;

    let created = product::ActiveModel {
        product_name: Set(fields.name),
        brand: Set(fields.brand),
        price: Set(fields.price),
        category_id: Set(category_id),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(
        "Created product {} '{}' at {} in category {}",
        created.id, created.product_name, created.price, created.category_id
    );
    Ok(created)
}

/// Replaces every field of an existing product.
///
/// # Errors
/// Returns an error if:
/// - The product name is empty or whitespace-only
/// - The price is negative, above [`MAX_PRICE`] or has more than two decimal places
/// - The product or the category does not exist
/// - The database update operation fails
#[instrument(skip(db))]
pub async fn update_product(
    db: &DatabaseConnection,
    product_id: i64,
    name: &str,
    brand: &str,
    price: Decimal,
    category_id: i64,
) -> Result<product::Model> {
    let fields = validate_fields(name, brand, price)?;

    let mut product: product::ActiveModel = get_product_by_id(db, product_id)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?
        .into();
    ensure_category(db, category_id).await?;

    product.product_name = Set(fields.name);
    product.brand = Set(fields.brand);
    product.price = Set(fields.price);
    product.category_id = Set(category_id);

    product.update(db).await.map_err(Into::into)
}

/// Deletes a product. Order lines that referenced it go with it.
///
/// # Errors
/// Returns an error if the product does not exist or the delete fails.
#[instrument(skip(db))]
pub async fn delete_product(db: &DatabaseConnection, product_id: i64) -> Result<()> {
    let result = Product::delete_by_id(product_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::ProductNotFound { id: product_id });
    }
    info!("Deleted product {}", product_id);
    Ok(())
}

/// Loads every product with its category, ordered by id.
pub async fn load_product_snapshots(db: &DatabaseConnection) -> Result<Vec<ProductSnapshot>> {
    Product::find()
        .order_by_asc(product::Column::Id)
        .find_also_related(Category)
        .all(db)
        .await
        .map(|rows| {
            rows.into_iter()
                .map(|(product, category)| ProductSnapshot { product, category })
                .collect()
        })
        .map_err(Into::into)
}

/// Loads a single product with its category.
pub async fn load_product_snapshot(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<ProductSnapshot>> {
    let mut found = load_products_by_id(db, vec![product_id]).await?;
    Ok(found.remove(&product_id))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::query::search_products;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_product_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        // Test empty name validation
        let result = create_product(&db, "", "Lays", Decimal::ONE, 1).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { message: _ }));

        // Test whitespace-only name validation
        let result = create_product(&db, "   ", "Lays", Decimal::ONE, 1).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { message: _ }));

        // Test negative price validation
        let price = Decimal::new(-250, 2);
        let result = create_product(&db, "Chips", "Lays", price, 1).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidPrice { price: p } if p == price
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_price_bounds() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let huge = Decimal::MAX / Decimal::TWO;
        let result = create_product(&db, "Chips", "Lays", huge, 1).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidPrice { .. }));

        let over = MAX_PRICE + Decimal::new(1, 2);
        let result = create_product(&db, "Chips", "Lays", over, 1).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidPrice { .. }));

        // Sub-cent prices are not currency values
        let result = create_product(&db, "Chips", "Lays", Decimal::new(1005, 3), 1).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidPrice { price } if price == Decimal::new(1005, 3)
        ));

        Ok(())
    }

    #[test]
    fn test_price_limits_are_inclusive() {
        let fields = validate_fields("Caviar", "Beluga", MAX_PRICE).unwrap();
        assert_eq!(fields.price, MAX_PRICE);
        assert_eq!(MAX_PRICE.to_string(), "99999999.99");

        // 2.500 normalizes to 2.5
        let fields = validate_fields("Chips", "Lays", Decimal::new(2500, 3)).unwrap();
        assert_eq!(fields.price, Decimal::new(25, 1));
        assert_eq!(fields.price.scale(), 1);
    }

    #[tokio::test]
    async fn test_create_product_integration() -> Result<()> {
        let db = setup_test_db().await?;
        let snacks = create_test_category(&db, "Snacks").await?;

        let product =
            create_product(&db, "Chips", "Lays", Decimal::new(250, 2), snacks.id).await?;
        assert_eq!(product.product_name, "Chips");
        assert_eq!(product.brand, "Lays");
        assert_eq!(product.price, Decimal::new(250, 2));
        assert_eq!(product.category_id, snacks.id);

        let free = create_product(&db, "Sample", "House", Decimal::ZERO, snacks.id).await?;
        assert_eq!(free.price, Decimal::ZERO);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_requires_category() -> Result<()> {
        let db = setup_test_db().await?;
        let result = create_product(&db, "Chips", "Lays", Decimal::ONE, 77).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::CategoryNotFound { id: 77 }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_product_replaces_all_fields() -> Result<()> {
        let (db, _cashier, product) = setup_with_product().await?;
        let drinks = create_test_category(&db, "Drinks").await?;

        let updated = update_product(
            &db,
            product.id,
            "Gatorade Zero",
            "PepsiCo",
            Decimal::new(250, 2),
            drinks.id,
        )
        .await?;
        assert_eq!(updated.id, product.id);
        assert_eq!(updated.product_name, "Gatorade Zero");
        assert_eq!(updated.brand, "PepsiCo");
        assert_eq!(updated.category_id, drinks.id);

        let missing = update_product(&db, 999, "X", "Y", Decimal::ONE, drinks.id).await;
        assert!(matches!(
            missing.unwrap_err(),
            Error::ProductNotFound { id: 999 }
        ));

        let bad_category = update_product(&db, product.id, "X", "Y", Decimal::ONE, 555).await;
        assert!(matches!(
            bad_category.unwrap_err(),
            Error::CategoryNotFound { id: 555 }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_product() -> Result<()> {
        let (db, _cashier, product) = setup_with_product().await?;

        delete_product(&db, product.id).await?;
        assert!(get_product_by_id(&db, product.id).await?.is_none());

        let again = delete_product(&db, product.id).await;
        assert!(matches!(
            again.unwrap_err(),
            Error::ProductNotFound { id: _ }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_load_and_search_products() -> Result<()> {
        let db = setup_sample_store().await?;

        let all = load_product_snapshots(&db).await?;
        assert_eq!(all.len(), 5);
        assert_eq!(all[0].category_name(), Some("Snacks"));

        let drinks = search_products(all.clone(), Some("drinks"));
        assert_eq!(drinks.len(), 1);
        assert_eq!(drinks[0].product.product_name, "Cola");

        let chips = search_products(all, Some("CHIPS"));
        assert_eq!(chips.len(), 1);
        assert_eq!(chips[0].product.id, 1);

        let pizza = load_product_snapshot(&db, 5).await?.unwrap();
        assert_eq!(pizza.category_name(), Some("Frozen Foods"));
        assert!(load_product_snapshot(&db, 50).await?.is_none());
        Ok(())
    }
}
