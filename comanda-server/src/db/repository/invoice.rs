//! Invoice Repository

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult, new_record_id, parse_record_id};
use crate::db::models::Invoice;

const TABLE: &str = "invoice";

#[derive(Clone)]
pub struct InvoiceRepository {
    base: BaseRepository,
}

impl InvoiceRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a new invoice
    pub async fn create(&self, mut invoice: Invoice) -> RepoResult<Invoice> {
        invoice.id = None;
        let created: Option<Invoice> = self
            .base
            .db()
            .create(new_record_id(TABLE))
            .content(invoice)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create invoice".to_string()))
    }

    /// Find invoice by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Invoice>> {
        let rid = parse_record_id(id)?;
        let invoice: Option<Invoice> = self.base.db().select(rid).await?;
        Ok(invoice)
    }

    /// The invoice settling an order, if issued (one-to-one)
    pub async fn find_by_order(&self, order: &RecordId) -> RepoResult<Option<Invoice>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM invoice WHERE order_id = $order LIMIT 1")
            .bind(("order", order.to_string()))
            .await?;
        let invoices: Vec<Invoice> = result.take(0)?;
        Ok(invoices.into_iter().next())
    }

    /// List invoices, most recent first
    pub async fn find_all(&self, limit: i64, offset: i64) -> RepoResult<Vec<Invoice>> {
        let invoices: Vec<Invoice> = self
            .base
            .db()
            .query("SELECT * FROM invoice ORDER BY created_at DESC LIMIT $limit START $offset")
            .bind(("limit", limit))
            .bind(("offset", offset))
            .await?
            .take(0)?;
        Ok(invoices)
    }
}
