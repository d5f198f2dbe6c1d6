//! Product Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, new_record_id, parse_record_id};
use crate::db::models::{Product, ProductCreate, ProductUpdate};

const TABLE: &str = "product";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active products
    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product WHERE is_active = true ORDER BY name")
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find product by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let rid = parse_record_id(id)?;
        let product: Option<Product> = self.base.db().select(rid).await?;
        Ok(product)
    }

    /// Create a new product
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        let product = Product {
            id: None,
            name: data.name,
            selling_price: data.selling_price,
            description: data.description,
            is_active: true,
            created_at: shared::now_millis(),
        };

        let created: Option<Product> = self
            .base
            .db()
            .create(new_record_id(TABLE))
            .content(product)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Update a product
    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let rid = parse_record_id(id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))?;

        let updated = Product {
            id: None,
            name: data.name.unwrap_or(existing.name),
            selling_price: data.selling_price.unwrap_or(existing.selling_price),
            description: data.description.or(existing.description),
            is_active: data.is_active.unwrap_or(existing.is_active),
            created_at: existing.created_at,
        };

        let updated: Option<Product> = self.base.db().update(rid).content(updated).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    /// Hard delete a product
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = parse_record_id(id)?;
        let _: Option<Product> = self.base.db().delete(rid).await?;
        Ok(true)
    }
}
