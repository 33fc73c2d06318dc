use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use item_store::{NewItem, DEFAULT_LIST_LIMIT};
use tracing::info;
use uuid::Uuid;

use crate::cache_aside::ItemLookup;
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::state::AppState;
use crate::types::{
    CreateItemRequest, DeleteItemRequest, ItemCreatedResponse, ItemListResponse, MessageResponse,
    UpdateItemRequest,
};

pub async fn create_item(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateItemRequest>,
) -> Result<(StatusCode, Json<ItemCreatedResponse>), AppError> {
    let id = body
        .id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let item = state
        .items
        .create(NewItem::new(id, body.data))
        .await
        .map_err(|e| AppError::store("Failed to create item", e))?;

    info!(id = %item.id, timestamp = item.timestamp, "Created item");

    Ok((
        StatusCode::CREATED,
        Json(ItemCreatedResponse {
            message: "Item created successfully",
            item,
        }),
    ))
}

pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ItemLookup>, AppError> {
    state
        .items
        .get(&id)
        .await
        .map_err(|e| AppError::store("Failed to query item", e))?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Item not found".to_string()))
}

pub async fn list_items(State(state): State<AppState>) -> Result<Json<ItemListResponse>, AppError> {
    let items = state
        .store
        .list_recent(DEFAULT_LIST_LIMIT)
        .await
        .map_err(|e| AppError::store("Failed to list items", e))?;

    Ok(Json(ItemListResponse {
        count: items.len(),
        items,
    }))
}

pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<UpdateItemRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .items
        .update(&id, body.timestamp, body.data)
        .await
        .map_err(|e| AppError::write("Failed to update item", e))?;

    info!(id = %id, timestamp = body.timestamp, "Updated item");
    Ok(Json(MessageResponse {
        message: "Item updated successfully",
    }))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<DeleteItemRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .items
        .delete(&id, body.timestamp)
        .await
        .map_err(|e| AppError::write("Failed to delete item", e))?;

    info!(id = %id, timestamp = body.timestamp, "Deleted item");
    Ok(Json(MessageResponse {
        message: "Item deleted successfully",
    }))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{send, FailingCache, FailingStore, Harness, HangingCache};
    use axum::http::{Method, StatusCode};
    use item_store::{ItemData, ItemStore, NewItem};
    use kv_cache::{KvCache, Ttl};
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_create_item() {
        let h = Harness::new();
        let (status, json) = send(
            &h.router,
            Method::POST,
            "/api/items",
            Some(r#"{"id":"x","data":{"n":1}}"#),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["message"], "Item created successfully");
        assert_eq!(json["item"]["id"], "x");
        assert_eq!(json["item"]["data"], json!({"n": 1}));
        assert!(json["item"]["timestamp"].as_i64().unwrap() > 0);
        assert!(json["item"]["createdAt"].as_str().unwrap().ends_with('Z'));
        assert_eq!(h.store.len().await, 1);
    }

    #[tokio::test]
    async fn test_create_without_id_generates_one() {
        let h = Harness::new();
        let (status, json) =
            send(&h.router, Method::POST, "/api/items", Some(r#"{"data":{}}"#)).await;

        assert_eq!(status, StatusCode::CREATED);
        let id = json["item"]["id"].as_str().unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());
    }

    #[tokio::test]
    async fn test_create_timestamps_increase_per_id() {
        let h = Harness::new();
        let mut last = 0;
        for n in 0..5 {
            let body = format!(r#"{{"id":"x","data":{{"n":{}}}}}"#, n);
            let (_, json) = send(&h.router, Method::POST, "/api/items", Some(body.as_str())).await;
            let ts = json["item"]["timestamp"].as_i64().unwrap();
            assert!(ts > last);
            last = ts;
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected_before_store() {
        let h = Harness::new();
        for body in ["{", "[]", r#"{"id":"x"}"#, r#"{"id":"x","data":"str"}"#] {
            let (status, json) = send(&h.router, Method::POST, "/api/items", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
            assert_eq!(json, json!({"error": "Invalid request body"}));
        }
        assert!(h.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_create_store_failure() {
        let h = Harness::new().with_store(Arc::new(FailingStore));
        let (status, json) = send(
            &h.router,
            Method::POST,
            "/api/items",
            Some(r#"{"id":"x","data":{}}"#),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json, json!({"error": "Failed to create item"}));
    }

    #[tokio::test]
    async fn test_get_missing_item_is_404() {
        let h = Harness::new();
        let (status, json) = send(&h.router, Method::GET, "/api/items/nope", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json, json!({"error": "Item not found"}));
    }

    #[tokio::test]
    async fn test_get_reads_through_cache() {
        let h = Harness::new();
        let (_, created) = send(
            &h.router,
            Method::POST,
            "/api/items",
            Some(r#"{"id":"x","data":{"n":1}}"#),
        )
        .await;

        let (status, first) = send(&h.router, Method::GET, "/api/items/x", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["source"], "database");
        assert_eq!(first["item"], created["item"]);

        let (status, second) = send(&h.router, Method::GET, "/api/items/x", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(second["source"], "cache");
        assert_eq!(second["item"]["data"], json!({"n": 1}));
    }

    #[tokio::test]
    async fn test_get_returns_latest_version() {
        let h = Harness::new();
        h.store.write(NewItem::new("x", ItemData::new())).await.unwrap();
        let latest = h
            .store
            .write(NewItem::new("x", json!({"v": 2}).as_object().cloned().unwrap()))
            .await
            .unwrap();

        let (_, json) = send(&h.router, Method::GET, "/api/items/x", None).await;
        assert_eq!(json["item"]["timestamp"], latest.timestamp);
        assert_eq!(json["item"]["data"]["v"], 2);
    }

    #[tokio::test]
    async fn test_corrupt_cache_entry_does_not_fail_get() {
        let h = Harness::new();
        h.store.write(NewItem::new("x", ItemData::new())).await.unwrap();
        h.cache
            .set("item:x", "garbage".to_string(), Ttl::Persistent)
            .await
            .unwrap();

        let (status, json) = send(&h.router, Method::GET, "/api/items/x", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["source"], "database");
    }

    #[tokio::test]
    async fn test_get_works_with_cache_down() {
        let h = Harness::new().with_cache(Arc::new(FailingCache));
        h.store.write(NewItem::new("x", ItemData::new())).await.unwrap();

        let (status, json) = send(&h.router, Method::GET, "/api/items/x", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["source"], "database");
    }

    #[tokio::test]
    async fn test_stalled_cache_does_not_stall_items() {
        let h = Harness::new()
            .with_cache(Arc::new(HangingCache))
            .with_timeout(Duration::from_secs(2));

        let (status, json) = send(
            &h.router,
            Method::POST,
            "/api/items",
            Some(r#"{"id":"x","data":{"n":1}}"#),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["item"]["id"], "x");

        let (status, json) = send(&h.router, Method::GET, "/api/items/x", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["source"], "database");
        assert_eq!(json["item"]["data"], json!({"n": 1}));

        // Update must invalidate, so a stalled cache is reported, not waited on
        let body = json!({"timestamp": json["item"]["timestamp"], "data": {"n": 2}}).to_string();
        let (status, json) =
            send(&h.router, Method::PUT, "/api/items/x", Some(body.as_str())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json, json!({"error": "Failed to update item"}));
    }

    #[tokio::test]
    async fn test_get_store_failure() {
        let h = Harness::new().with_store(Arc::new(FailingStore));
        let (status, json) = send(&h.router, Method::GET, "/api/items/x", None).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json, json!({"error": "Failed to query item"}));
    }

    #[tokio::test]
    async fn test_list_items_is_capped() {
        let h = Harness::new();
        for i in 0..25 {
            h.store
                .write(NewItem::new(format!("id-{:02}", i), ItemData::new()))
                .await
                .unwrap();
        }

        let (status, json) = send(&h.router, Method::GET, "/api/items", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["count"], 20);
        assert_eq!(json["items"].as_array().unwrap().len(), 20);
    }

    #[tokio::test]
    async fn test_list_items_empty() {
        let h = Harness::new();
        let (status, json) = send(&h.router, Method::GET, "/api/items", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({"count": 0, "items": []}));
    }

    #[tokio::test]
    async fn test_list_items_store_failure() {
        let h = Harness::new().with_store(Arc::new(FailingStore));
        let (status, json) = send(&h.router, Method::GET, "/api/items", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json, json!({"error": "Failed to list items"}));
    }

    #[tokio::test]
    async fn test_update_then_get_never_returns_stale_cache() {
        let h = Harness::new();
        let (_, created) = send(
            &h.router,
            Method::POST,
            "/api/items",
            Some(r#"{"id":"x","data":{"n":1}}"#),
        )
        .await;
        let ts = created["item"]["timestamp"].as_i64().unwrap();

        // Warm the cache
        send(&h.router, Method::GET, "/api/items/x", None).await;
        send(&h.router, Method::GET, "/api/items/x", None).await;

        let body = format!(r#"{{"timestamp":{},"data":{{"n":2}}}}"#, ts);
        let (status, json) = send(&h.router, Method::PUT, "/api/items/x", Some(body.as_str())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({"message": "Item updated successfully"}));

        let (_, json) = send(&h.router, Method::GET, "/api/items/x", None).await;
        assert_eq!(json["source"], "database");
        assert_eq!(json["item"]["data"], json!({"n": 2}));
        assert!(json["item"]["updatedAt"].is_string());
    }

    #[tokio::test]
    async fn test_update_missing_version_upserts() {
        let h = Harness::new();
        let (status, _) = send(
            &h.router,
            Method::PUT,
            "/api/items/ghost",
            Some(r#"{"timestamp":7,"data":{"n":1}}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(h.store.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_bad_body() {
        let h = Harness::new();
        let (status, json) = send(
            &h.router,
            Method::PUT,
            "/api/items/x",
            Some(r#"{"data":{"n":1}}"#),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, json!({"error": "Invalid request body"}));
        assert!(h.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_update_with_cache_down_fails() {
        let h = Harness::new().with_cache(Arc::new(FailingCache));
        let (status, json) = send(
            &h.router,
            Method::PUT,
            "/api/items/x",
            Some(r#"{"timestamp":1,"data":{}}"#),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json, json!({"error": "Failed to update item"}));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_404() {
        let h = Harness::new();
        let (_, created) = send(
            &h.router,
            Method::POST,
            "/api/items",
            Some(r#"{"id":"x","data":{"n":1}}"#),
        )
        .await;
        let ts = created["item"]["timestamp"].as_i64().unwrap();
        send(&h.router, Method::GET, "/api/items/x", None).await;

        let body = format!(r#"{{"timestamp":{}}}"#, ts);
        let (status, json) = send(&h.router, Method::DELETE, "/api/items/x", Some(body.as_str())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({"message": "Item deleted successfully"}));

        let (status, _) = send(&h.router, Method::GET, "/api/items/x", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_missing_version_succeeds() {
        let h = Harness::new();
        let (status, _) = send(
            &h.router,
            Method::DELETE,
            "/api/items/nope",
            Some(r#"{"timestamp":1}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_delete_bad_body() {
        let h = Harness::new();
        let (status, json) = send(&h.router, Method::DELETE, "/api/items/x", Some("nope")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, json!({"error": "Invalid request body"}));
    }

    #[tokio::test]
    async fn test_delete_store_failure() {
        let h = Harness::new().with_store(Arc::new(FailingStore));
        let (status, json) = send(
            &h.router,
            Method::DELETE,
            "/api/items/x",
            Some(r#"{"timestamp":1}"#),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json, json!({"error": "Failed to delete item"}));
    }
}
