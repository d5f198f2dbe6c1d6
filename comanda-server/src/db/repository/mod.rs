//! Repository Module
//!
//! CRUD operations over the embedded SurrealDB instance, one
//! repository per entity.

// Catalog
pub mod product;

// Location
pub mod dining_table;

// Orders
pub mod invoice;
pub mod order;

// Re-exports
pub use dining_table::DiningTableRepository;
pub use invoice::InvoiceRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 格式
// =============================================================================
//
// 记录键由 shared::snowflake_id() 生成（毫秒时间戳 + 随机位），
// 引用字段存储为 "table:id" 字符串，查询时绑定同样的字符串形式。

/// Mint a fresh record id for the given table
pub(crate) fn new_record_id(table: &str) -> RecordId {
    RecordId::from_table_key(table, shared::snowflake_id())
}

/// Parse a "table:id" string into a RecordId
pub(crate) fn parse_record_id(id: &str) -> RepoResult<RecordId> {
    id.parse()
        .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
