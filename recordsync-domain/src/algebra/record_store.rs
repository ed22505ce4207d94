use super::MongoStore;
use crate::{Record, RecordScope, RecordSyncError};
use async_trait::async_trait;
use bson::{doc, Document};

/// Local datastore of mirrored records. Every operation is bound to a customer.
#[async_trait]
pub trait RecordStoreExt {
    async fn find_one(&self, scope: RecordScope<'_>) -> Result<Option<Record>, RecordSyncError>;

    /// Returns whether a record was removed.
    async fn delete_one(&self, scope: RecordScope<'_>) -> Result<bool, RecordSyncError>;

    async fn find_many(&self, query: &RecordQuery) -> Result<Vec<Record>, RecordSyncError>;

    async fn count(&self, query: &RecordQuery) -> Result<u64, RecordSyncError>;

    /// Enforces one record per `(id, customerId)`.
    async fn ensure_indexes(&self) -> Result<(), RecordSyncError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordQuery {
    pub customer_id: String,
    pub record_type: Option<String>,
    pub limit: u64,
    pub skip: u64,
}

impl RecordQuery {
    pub fn filter(&self) -> Document {
        let mut filter = doc! { "customerId": &self.customer_id };
        if let Some(record_type) = &self.record_type {
            filter.insert("recordType", record_type);
        }
        filter
    }

    pub fn matches(&self, record: &Record) -> bool {
        record.customer_id == self.customer_id
            && self
                .record_type
                .as_ref()
                .map_or(true, |t| *t == record.record_type)
    }
}

#[async_trait]
impl RecordStoreExt for MongoStore<Record> {
    async fn find_one(&self, scope: RecordScope<'_>) -> Result<Option<Record>, RecordSyncError> {
        self.get_one(scope.filter()).await
    }

    async fn delete_one(&self, scope: RecordScope<'_>) -> Result<bool, RecordSyncError> {
        Ok(MongoStore::delete_one(self, scope.filter()).await? > 0)
    }

    async fn find_many(&self, query: &RecordQuery) -> Result<Vec<Record>, RecordSyncError> {
        self.get_many(
            Some(query.filter()),
            None,
            Some(query.limit),
            Some(query.skip),
        )
        .await
    }

    async fn count(&self, query: &RecordQuery) -> Result<u64, RecordSyncError> {
        MongoStore::count(self, query.filter(), None).await
    }

    async fn ensure_indexes(&self) -> Result<(), RecordSyncError> {
        self.ensure_unique_index(RecordScope::index_keys()).await
    }
}
