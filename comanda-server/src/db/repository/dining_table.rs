//! Dining Table Repository

use shared::models::TableStatus;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult, new_record_id, parse_record_id};
use crate::db::models::{DiningTable, DiningTableCreate, DiningTableUpdate};

const TABLE: &str = "dining_table";

#[derive(Clone)]
pub struct DiningTableRepository {
    base: BaseRepository,
}

impl DiningTableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active dining tables
    pub async fn find_all(&self) -> RepoResult<Vec<DiningTable>> {
        let tables: Vec<DiningTable> = self
            .base
            .db()
            .query("SELECT * FROM dining_table WHERE is_active = true ORDER BY name")
            .await?
            .take(0)?;
        Ok(tables)
    }

    /// Find table by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<DiningTable>> {
        let rid = parse_record_id(id)?;
        let table: Option<DiningTable> = self.base.db().select(rid).await?;
        Ok(table)
    }

    /// Find table by name
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<DiningTable>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM dining_table WHERE name = $name LIMIT 1")
            .bind(("name", name.to_string()))
            .await?;
        let tables: Vec<DiningTable> = result.take(0)?;
        Ok(tables.into_iter().next())
    }

    /// Create a new dining table
    pub async fn create(&self, data: DiningTableCreate) -> RepoResult<DiningTable> {
        // Check duplicate name
        if self.find_by_name(&data.name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Table '{}' already exists",
                data.name
            )));
        }

        let table = DiningTable {
            id: None,
            name: data.name,
            location: data.location,
            seats: data.seats.unwrap_or(4),
            description: data.description,
            status: TableStatus::Available,
            is_active: true,
            created_at: shared::now_millis(),
        };

        let created: Option<DiningTable> = self
            .base
            .db()
            .create(new_record_id(TABLE))
            .content(table)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create dining table".to_string()))
    }

    /// Update a dining table
    pub async fn update(&self, id: &str, data: DiningTableUpdate) -> RepoResult<DiningTable> {
        let rid = parse_record_id(id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Dining table {} not found", id)))?;

        // Check duplicate name if changing it
        if let Some(new_name) = &data.name
            && new_name != &existing.name
            && self.find_by_name(new_name).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Table '{}' already exists",
                new_name
            )));
        }

        let updated = DiningTable {
            id: None,
            name: data.name.unwrap_or(existing.name),
            location: data.location.or(existing.location),
            seats: data.seats.unwrap_or(existing.seats),
            description: data.description.or(existing.description),
            status: data.status.unwrap_or(existing.status),
            is_active: data.is_active.unwrap_or(existing.is_active),
            created_at: existing.created_at,
        };

        let updated: Option<DiningTable> = self.base.db().update(rid).content(updated).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Dining table {} not found", id)))
    }

    /// Write the occupancy status of a table.
    ///
    /// Returns `false` when the table no longer exists; the caller
    /// decides whether that matters (the order engine treats it as a
    /// best-effort mirror and moves on).
    pub async fn set_status(&self, rid: &RecordId, status: TableStatus) -> RepoResult<bool> {
        let existing: Option<DiningTable> = self.base.db().select(rid.clone()).await?;
        if existing.is_none() {
            return Ok(false);
        }
        self.base
            .db()
            .query("UPDATE $table SET status = $status")
            .bind(("table", rid.clone()))
            .bind(("status", status))
            .await?;
        Ok(true)
    }

    /// Hard delete a dining table
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = parse_record_id(id)?;
        let _: Option<DiningTable> = self.base.db().delete(rid).await?;
        Ok(true)
    }
}
