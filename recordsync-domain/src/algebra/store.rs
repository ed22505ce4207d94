use crate::{RecordSyncError, Store};
use bson::doc;
use futures::TryStreamExt;
use mongodb::bson::Document;
use mongodb::options::{CountOptions, FindOptions, IndexOptions};
use mongodb::{Collection, Database, IndexModel};
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct MongoStore<T: Serialize + DeserializeOwned + Unpin + Sync + Send> {
    pub collection: Collection<T>,
}

impl<T: Serialize + DeserializeOwned + Unpin + Sync + Send + 'static> MongoStore<T> {
    pub async fn new(database: &Database, store: &Store) -> Result<Self, RecordSyncError> {
        let collection = database.collection::<T>(store.as_ref());
        Ok(Self { collection })
    }

    pub async fn get_one(&self, filter: Document) -> Result<Option<T>, RecordSyncError> {
        Ok(self.collection.find_one(filter).await?)
    }

    pub async fn get_many(
        &self,
        filter: Option<Document>,
        sort: Option<Document>,
        limit: Option<u64>,
        skip: Option<u64>,
    ) -> Result<Vec<T>, RecordSyncError> {
        let mut find_options = FindOptions::default();
        find_options.sort = sort.or_else(|| Some(doc! { "createdAt": -1 }));
        find_options.limit = limit.map(|l| l as i64);
        find_options.skip = skip;

        let cursor = self
            .collection
            .find(filter.unwrap_or_default())
            .with_options(find_options)
            .await?;

        let records = cursor.try_collect().await?;

        Ok(records)
    }

    /// Returns the number of documents removed, zero or one.
    pub async fn delete_one(&self, filter: Document) -> Result<u64, RecordSyncError> {
        let result = self.collection.delete_one(filter).await?;

        Ok(result.deleted_count)
    }

    pub async fn count(
        &self,
        filter: Document,
        limit: Option<u64>,
    ) -> Result<u64, RecordSyncError> {
        Ok(self
            .collection
            .count_documents(filter)
            .with_options(CountOptions::builder().limit(limit).build())
            .await?)
    }

    pub async fn ensure_unique_index(&self, keys: Document) -> Result<(), RecordSyncError> {
        let index = IndexModel::builder()
            .keys(keys)
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection.create_index(index).await?;

        Ok(())
    }
}
