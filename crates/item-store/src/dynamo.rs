//! DynamoDB-backed item store

use crate::clock::VersionClock;
use crate::conversions::{self, to_attributes};
use crate::error::{ItemStoreError, Result};
use crate::store::ItemStore;
use crate::types::{rfc3339, Item, ItemData, NewItem};
use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use chrono::Utc;
use tracing::debug;

/// Item store over a DynamoDB table keyed by `id` (S) and `timestamp` (N)
pub struct DynamoItemStore {
    client: Client,
    table: String,
    clock: VersionClock,
}

impl DynamoItemStore {
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
            clock: VersionClock::new(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

fn unavailable<E>(operation: &str, err: E) -> ItemStoreError
where
    E: std::error::Error + 'static,
{
    ItemStoreError::Unavailable(format!("{} failed: {}", operation, DisplayErrorContext(&err)))
}

fn key(id: &str, timestamp: i64) -> [(String, AttributeValue); 2] {
    [
        ("id".to_string(), AttributeValue::S(id.to_string())),
        (
            "timestamp".to_string(),
            AttributeValue::N(timestamp.to_string()),
        ),
    ]
}

#[async_trait]
impl ItemStore for DynamoItemStore {
    async fn write(&self, item: NewItem) -> Result<Item> {
        let item = item.stamp(self.clock.next());
        let attributes = conversions::item_to_attributes(&item)?;

        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(attributes))
            .send()
            .await
            .map_err(|e| unavailable("PutItem", e))?;

        debug!(id = %item.id, timestamp = item.timestamp, "Wrote item version");
        Ok(item)
    }

    async fn find_latest(&self, id: &str) -> Result<Option<Item>> {
        let output = self
            .client
            .query()
            .table_name(&self.table)
            .key_condition_expression("id = :id")
            .expression_attribute_values(":id", AttributeValue::S(id.to_string()))
            .scan_index_forward(false)
            .limit(1)
            .send()
            .await
            .map_err(|e| unavailable("Query", e))?;

        output
            .items()
            .first()
            .map(conversions::item_from_attributes)
            .transpose()
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Item>> {
        let output = self
            .client
            .scan()
            .table_name(&self.table)
            .limit(i32::try_from(limit).unwrap_or(i32::MAX))
            .send()
            .await
            .map_err(|e| unavailable("Scan", e))?;

        output
            .items()
            .iter()
            .take(limit)
            .map(conversions::item_from_attributes)
            .collect()
    }

    async fn update(&self, id: &str, timestamp: i64, data: ItemData) -> Result<()> {
        let [id_key, ts_key] = key(id, timestamp);

        self.client
            .update_item()
            .table_name(&self.table)
            .key(id_key.0, id_key.1)
            .key(ts_key.0, ts_key.1)
            .update_expression("SET #data = :data, updatedAt = :updatedAt")
            .expression_attribute_names("#data", "data")
            .expression_attribute_values(":data", AttributeValue::M(to_attributes(&data)))
            .expression_attribute_values(":updatedAt", AttributeValue::S(rfc3339(Utc::now())))
            .send()
            .await
            .map_err(|e| unavailable("UpdateItem", e))?;

        debug!(id, timestamp, "Updated item version");
        Ok(())
    }

    async fn delete(&self, id: &str, timestamp: i64) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table)
            .set_key(Some(key(id, timestamp).into_iter().collect()))
            .send()
            .await
            .map_err(|e| unavailable("DeleteItem", e))?;

        debug!(id, timestamp, "Deleted item version");
        Ok(())
    }
}
