//! Types and functions for storing and loading items from the database.

use super::item_model::{ItemCreate, ItemUpdate};
use crate::infra::database::Tx;
use tracing::{instrument, Instrument};

/// An item as stored in the `items` table.
#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct ItemRow {
    pub id: i64,
    pub name: String,
    pub price: Option<f64>,
    pub description: Option<String>,
}

/// Inserts a new item, letting the database pick its id.
#[instrument(skip(tx))]
pub async fn insert_item(tx: &mut Tx, new_item: &ItemCreate) -> sqlx::Result<ItemRow> {
    tracing::info!("Creating item {:?}", new_item);
    let item = sqlx::query_as::<_, ItemRow>(
        r#"
        INSERT INTO items (name, price, description)
        VALUES (?, ?, ?)
        RETURNING id, name, price, description
        "#,
    )
    .bind(&new_item.name)
    .bind(new_item.price)
    .bind(&new_item.description)
    .fetch_one(&mut **tx)
    .await?;
    tracing::info!("Created item {:?}", item);
    Ok(item)
}

/// Read an item.
#[instrument(skip(tx))]
pub async fn fetch_item(tx: &mut Tx, id: i64) -> sqlx::Result<Option<ItemRow>> {
    tracing::info!("Reading item");
    let item = sqlx::query_as::<_, ItemRow>(
        r#"
        SELECT id, name, price, description FROM items
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&mut **tx)
    .instrument(tracing::info_span!("fetch_optional"))
    .await?;
    tracing::info!("Found item: {:?}", item);
    Ok(item)
}

/// Changes the columns present in `update`, in a single statement.
///
/// Returns `None` if there is no item with that id.
#[instrument(skip(tx))]
pub async fn update_item(
    tx: &mut Tx,
    id: i64,
    update: &ItemUpdate,
) -> sqlx::Result<Option<ItemRow>> {
    tracing::info!("Updating item {:?}", update);
    let item = sqlx::query_as::<_, ItemRow>(
        r#"
        UPDATE items
        SET name = COALESCE(?, name),
            price = CASE WHEN ? THEN ? ELSE price END,
            description = CASE WHEN ? THEN ? ELSE description END
        WHERE id = ?
        RETURNING id, name, price, description
        "#,
    )
    .bind(&update.name)
    .bind(update.price.is_some())
    .bind(update.price.flatten())
    .bind(update.description.is_some())
    .bind(update.description.clone().flatten())
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?;

    match &item {
        Some(item) => tracing::info!("Updated item {:?}", item),
        None => tracing::warn!("Item not found"),
    }

    Ok(item)
}

/// Deletes an item, returning it as it was.
///
/// Returns `None` if there is no item with that id.
#[instrument(skip(tx))]
pub async fn delete_item(tx: &mut Tx, id: i64) -> sqlx::Result<Option<ItemRow>> {
    tracing::info!("Deleting item {:?}", id);
    let item = sqlx::query_as::<_, ItemRow>(
        r#"
        DELETE FROM items
        WHERE id = ?
        RETURNING id, name, price, description
        "#,
    )
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?;

    match &item {
        Some(_) => tracing::info!("Deleted item"),
        None => tracing::warn!("Item not found"),
    }

    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::database::init_memory_db;

    fn new_item(name: &str) -> ItemCreate {
        ItemCreate {
            name: name.to_string(),
            price: 2.5,
            description: None,
        }
    }

    #[tokio::test]
    async fn insert_then_fetch_returns_item() {
        let db = init_memory_db().await.unwrap();
        let mut tx = db.begin().await.unwrap();
        let item = insert_item(&mut tx, &new_item("Foo")).await.unwrap();

        assert_eq!(
            ItemRow {
                id: 1,
                name: "Foo".to_string(),
                price: Some(2.5),
                description: None,
            },
            item,
        );

        let fetched = fetch_item(&mut tx, item.id).await.unwrap();
        assert_eq!(Some(item), fetched);
    }

    #[tokio::test]
    async fn update_touches_only_the_given_id() {
        let db = init_memory_db().await.unwrap();
        let mut tx = db.begin().await.unwrap();
        let first = insert_item(&mut tx, &new_item("First")).await.unwrap();
        let second = insert_item(&mut tx, &new_item("Second")).await.unwrap();

        let update = ItemUpdate {
            name: Some("Changed".to_string()),
            ..Default::default()
        };
        let updated = update_item(&mut tx, first.id, &update).await.unwrap();
        assert_eq!(
            Some(ItemRow {
                name: "Changed".to_string(),
                ..first
            }),
            updated
        );
        assert_eq!(Some(second.clone()), fetch_item(&mut tx, second.id).await.unwrap());
    }

    #[tokio::test]
    async fn update_sets_and_clears_present_columns() {
        let db = init_memory_db().await.unwrap();
        let mut tx = db.begin().await.unwrap();
        let item = insert_item(&mut tx, &new_item("Foo")).await.unwrap();

        let update = ItemUpdate {
            name: None,
            price: Some(None),
            description: Some(Some("Described".to_string())),
        };
        let updated = update_item(&mut tx, item.id, &update).await.unwrap();
        assert_eq!(
            Some(ItemRow {
                id: item.id,
                name: "Foo".to_string(),
                price: None,
                description: Some("Described".to_string()),
            }),
            updated
        );

        let update = ItemUpdate {
            price: Some(Some(4.0)),
            description: Some(None),
            ..Default::default()
        };
        let updated = update_item(&mut tx, item.id, &update).await.unwrap();
        assert_eq!(Some(Some(4.0)), updated.as_ref().map(|row| row.price));
        assert_eq!(Some(None), updated.map(|row| row.description));
    }

    #[tokio::test]
    async fn empty_update_leaves_row_as_is() {
        let db = init_memory_db().await.unwrap();
        let mut tx = db.begin().await.unwrap();
        let item = insert_item(&mut tx, &new_item("Foo")).await.unwrap();

        let updated = update_item(&mut tx, item.id, &ItemUpdate::default())
            .await
            .unwrap();
        assert_eq!(Some(item), updated);
    }

    #[tokio::test]
    async fn missing_rows_are_none() {
        let db = init_memory_db().await.unwrap();
        let mut tx = db.begin().await.unwrap();
        assert_eq!(None, fetch_item(&mut tx, 42).await.unwrap());
        assert_eq!(
            None,
            update_item(&mut tx, 42, &ItemUpdate::default()).await.unwrap()
        );
        assert_eq!(None, delete_item(&mut tx, 42).await.unwrap());
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reused() {
        let db = init_memory_db().await.unwrap();
        let mut tx = db.begin().await.unwrap();
        let first = insert_item(&mut tx, &new_item("First")).await.unwrap();
        let deleted = delete_item(&mut tx, first.id).await.unwrap();
        assert_eq!(Some(first.clone()), deleted);

        let second = insert_item(&mut tx, &new_item("Second")).await.unwrap();
        assert!(second.id > first.id);
    }
}
