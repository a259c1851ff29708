use futures::TryStreamExt;
use mongodb::{bson::doc, Client, Collection};
use tracing::debug;

use crate::error::StoreError;
use crate::schemas::Group;

const COLLECTION: &str = "Groups";

/// Whole-document storage of groups in MongoDB.
#[derive(Clone)]
pub struct GroupStore {
    groups: Collection<Group>,
}

impl GroupStore {
    pub fn new(client: &Client, database: &str) -> Self {
        GroupStore {
            groups: client.database(database).collection(COLLECTION),
        }
    }

    pub async fn insert(&self, group: &Group) -> Result<(), StoreError> {
        self.groups.insert_one(group, None).await?;
        debug!(group = %group.id, "inserted group");
        Ok(())
    }

    pub async fn find(&self, id: &str) -> Result<Option<Group>, StoreError> {
        Ok(self.groups.find_one(doc! { "id": id }, None).await?)
    }

    pub async fn list(&self) -> Result<Vec<Group>, StoreError> {
        let cursor = self.groups.find(None, None).await?;
        Ok(cursor.try_collect().await?)
    }

    /// Returns false when no group has this id.
    pub async fn replace(&self, group: &Group) -> Result<bool, StoreError> {
        let result = self
            .groups
            .replace_one(doc! { "id": group.id.as_str() }, group, None)
            .await?;
        debug!(group = %group.id, matched = result.matched_count, "replaced group");
        Ok(result.matched_count > 0)
    }

    pub async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let result = self.groups.delete_one(doc! { "id": id }, None).await?;
        Ok(result.deleted_count > 0)
    }
}
