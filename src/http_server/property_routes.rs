//! Property HTTP Routes
//!
//! CRUD endpoints for rental properties. Each handler validates its input,
//! runs one store operation under the store lock, then shapes the response.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::property::{
    validate_create, validate_id, validate_query, validate_update, Property, PropertyList,
    PropertyStore, StoreResult,
};

use super::errors::{ApiError, ApiResult};
use super::service_routes::route_not_found;

// ==================
// Shared State
// ==================

/// Property state shared across handlers
#[derive(Debug)]
pub struct PropertyState<S: PropertyStore> {
    store: Mutex<S>,
}

impl<S: PropertyStore> PropertyState<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    /// Run `op` with exclusive access to the store.
    ///
    /// Store failures and a poisoned lock become `ApiError::Internal` carrying
    /// `failure` as the client-facing message.
    fn with_store<T>(
        &self,
        failure: &'static str,
        op: impl FnOnce(&mut S) -> StoreResult<T>,
    ) -> ApiResult<T> {
        let mut store = self
            .store
            .lock()
            .map_err(|_| ApiError::internal(failure, "property store lock poisoned"))?;
        op(&mut *store).map_err(|e| ApiError::internal(failure, e))
    }
}

// ==================
// Response Types
// ==================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub message: String,
    pub deleted_property: Property,
}

// ==================
// Property Routes
// ==================

/// Create property routes, relative to the API prefix
pub fn property_routes<S: PropertyStore + 'static>(state: Arc<PropertyState<S>>) -> Router {
    Router::new()
        .route(
            "/properties",
            post(create_handler::<S>)
                .get(list_handler::<S>)
                .fallback(route_not_found),
        )
        .route(
            "/properties/:id",
            get(get_handler::<S>)
                .put(update_handler::<S>)
                .delete(delete_handler::<S>)
                .fallback(route_not_found),
        )
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn create_handler<S: PropertyStore + 'static>(
    State(state): State<Arc<PropertyState<S>>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Property>)> {
    let Json(body) = body?;
    let data = validate_create(&body)?;

    let property = state.with_store("Failed to create property", |store| store.create(data))?;
    info!(id = %property.id, "property created");

    Ok((StatusCode::CREATED, Json(property)))
}

async fn list_handler<S: PropertyStore + 'static>(
    State(state): State<Arc<PropertyState<S>>>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> ApiResult<Json<PropertyList>> {
    let Query(params) = query?;
    let filter = validate_query(&params)?;

    let result = state.with_store("Failed to retrieve properties", |store| store.list(&filter))?;
    debug!(total = result.total, filtered = result.filtered, "properties listed");

    Ok(Json(result))
}

async fn get_handler<S: PropertyStore + 'static>(
    State(state): State<Arc<PropertyState<S>>>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Property>> {
    let Path(raw_id) = path?;
    let id = validate_id(&raw_id)?;

    state
        .with_store("Failed to retrieve property", |store| store.get_by_id(id))?
        .map(Json)
        .ok_or_else(|| ApiError::property_not_found(id))
}

async fn update_handler<S: PropertyStore + 'static>(
    State(state): State<Arc<PropertyState<S>>>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Property>> {
    let Path(raw_id) = path?;
    let id = validate_id(&raw_id)?;
    let Json(body) = body?;
    let update = validate_update(&body)?;

    let updated = state.with_store("Failed to update property", |store| {
        if !store.exists(id)? {
            return Ok(None);
        }
        store.update(id, update)
    })?;

    let property = updated.ok_or_else(|| ApiError::property_not_found(id))?;
    info!(id = %property.id, "property updated");

    Ok(Json(property))
}

async fn delete_handler<S: PropertyStore + 'static>(
    State(state): State<Arc<PropertyState<S>>>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<DeleteResponse>> {
    let Path(raw_id) = path?;
    let id = validate_id(&raw_id)?;

    let deleted = state
        .with_store("Failed to delete property", |store| store.delete(id))?
        .ok_or_else(|| ApiError::property_not_found(id))?;
    info!(id = %deleted.id, "property deleted");

    Ok(Json(DeleteResponse {
        message: "Property deleted successfully".to_string(),
        deleted_property: deleted,
    }))
}
