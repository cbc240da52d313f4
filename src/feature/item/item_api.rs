//! The item API implementation.

use super::{
    item_model::{Item, ItemCreate, ItemUpdate},
    item_service,
};
use crate::infra::{
    database::DbPool,
    error::{ApiResult, ClientError, ErrorBody},
    extract::Json,
    state::AppState,
    validation::Valid,
};
use axum::{extract::State, Router};
use axum_extra::routing::{RouterExt, TypedPath};
use serde::Deserialize;
use tracing::instrument;

/// The item API endpoints.
pub fn routes() -> Router<AppState> {
    Router::new()
        .typed_post(create_item)
        .typed_get(get_item)
        .typed_put(update_item)
        .typed_delete(delete_item)
}

/// The item collection.
#[derive(Deserialize, TypedPath)]
#[typed_path("/items", rejection(ClientError))]
pub struct Items;

/// A single item.
#[derive(Debug, Deserialize, TypedPath)]
#[typed_path("/items/:id", rejection(ClientError))]
pub struct ItemsId(pub i64);

/// Creates a new item.
#[utoipa::path(
    post,
    path = "/api/items",
    request_body = ItemCreate,
    responses(
        (status = 200, description = "Ok", body = Item),
        (status = 422, description = "Unprocessable Entity", body = ErrorBody),
        (status = 500, description = "Internal Server Error", body = ErrorBody),
    )
)]
#[instrument(skip(db))]
pub async fn create_item(
    _: Items,
    db: State<DbPool>,
    Json(new_item): Json<ItemCreate>,
) -> ApiResult<Json<Item>> {
    let new_item = Valid::new(new_item)?;
    let mut tx = db.begin().await?;
    let item = item_service::create_item(&mut tx, new_item).await?;
    tx.commit().await?;
    Ok(Json(item))
}

/// Gets an item.
#[utoipa::path(
    get,
    path = "/api/items/{id}",
    params(("id" = i64, Path, description = "The item's id")),
    responses(
        (status = 200, description = "Ok", body = Item),
        (status = 404, description = "Not Found", body = ErrorBody),
        (status = 500, description = "Internal Server Error", body = ErrorBody),
    )
)]
#[instrument(skip(db))]
pub async fn get_item(ItemsId(id): ItemsId, db: State<DbPool>) -> ApiResult<Json<Item>> {
    let mut tx = db.begin().await?;
    let item = item_service::read_item(&mut tx, id).await?;
    tx.commit().await?;
    Ok(Json(item))
}

/// Updates the fields of an item that are present in the request.
#[utoipa::path(
    put,
    path = "/api/items/{id}",
    params(("id" = i64, Path, description = "The item's id")),
    request_body = ItemUpdate,
    responses(
        (status = 200, description = "Ok", body = Item),
        (status = 404, description = "Not Found", body = ErrorBody),
        (status = 422, description = "Unprocessable Entity", body = ErrorBody),
        (status = 500, description = "Internal Server Error", body = ErrorBody),
    )
)]
#[instrument(skip(db))]
pub async fn update_item(
    ItemsId(id): ItemsId,
    db: State<DbPool>,
    Json(update): Json<ItemUpdate>,
) -> ApiResult<Json<Item>> {
    let update = Valid::new(update)?;
    let mut tx = db.begin().await?;
    let item = item_service::update_item(&mut tx, id, update).await?;
    tx.commit().await?;
    Ok(Json(item))
}

/// Deletes an item, returning it.
#[utoipa::path(
    delete,
    path = "/api/items/{id}",
    params(("id" = i64, Path, description = "The item's id")),
    responses(
        (status = 200, description = "Ok", body = Item),
        (status = 404, description = "Not Found", body = ErrorBody),
        (status = 500, description = "Internal Server Error", body = ErrorBody),
    )
)]
#[instrument(skip(db))]
pub async fn delete_item(ItemsId(id): ItemsId, db: State<DbPool>) -> ApiResult<Json<Item>> {
    let mut tx = db.begin().await?;
    let item = item_service::delete_item(&mut tx, id).await?;
    tx.commit().await?;
    Ok(Json(item))
}
