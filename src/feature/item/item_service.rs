//! A service for interacting with items.
//!
//! Every operation works on the caller's transaction
//! and issues a single statement against the store.

use super::{
    item_model::{Item, ItemCreate, ItemUpdate},
    item_repository,
};
use crate::infra::{
    database::Tx,
    error::{ApiError, ClientError},
    validation::Valid,
};
use tracing::instrument;

/// Errors from the item service.
#[derive(Debug, thiserror::Error)]
pub enum ItemError {
    /// There is no item with the given id.
    #[error("item {0} not found")]
    NotFound(i64),
    /// The store failed.
    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

/// The result of an item operation.
pub type ItemResult<T> = Result<T, ItemError>;

impl From<ItemError> for ApiError {
    fn from(e: ItemError) -> Self {
        match e {
            ItemError::NotFound(_) => ClientError::NotFound(e.to_string()).into(),
            ItemError::Store(e) => e.into(),
        }
    }
}

/// Creates a new item.
#[instrument(skip(tx))]
pub async fn create_item(tx: &mut Tx, new_item: Valid<ItemCreate>) -> ItemResult<Item> {
    let row = item_repository::insert_item(tx, new_item.inner()).await?;
    Ok(Item::from(row))
}

/// Read an item.
#[instrument(skip(tx))]
pub async fn read_item(tx: &mut Tx, id: i64) -> ItemResult<Item> {
    let row = item_repository::fetch_item(tx, id)
        .await?
        .ok_or(ItemError::NotFound(id))?;
    Ok(Item::from(row))
}

/// Updates an item, changing only the fields present in `update`.
#[instrument(skip(tx))]
pub async fn update_item(tx: &mut Tx, id: i64, update: Valid<ItemUpdate>) -> ItemResult<Item> {
    let row = item_repository::update_item(tx, id, update.inner())
        .await?
        .ok_or(ItemError::NotFound(id))?;
    Ok(Item::from(row))
}

/// Delete an item, returning what it looked like.
#[instrument(skip(tx))]
pub async fn delete_item(tx: &mut Tx, id: i64) -> ItemResult<Item> {
    let row = item_repository::delete_item(tx, id)
        .await?
        .ok_or(ItemError::NotFound(id))?;
    Ok(Item::from(row))
}
