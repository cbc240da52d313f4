//! The item types exposed by the API, and how they map to stored records.

use super::item_repository::ItemRow;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// An existing item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// The item's id.
    #[schema(example = 1)]
    pub id: i64,
    /// The item's name.
    #[schema(example = "Test Item")]
    pub name: String,
    /// The item's price.
    #[schema(example = 99.9)]
    pub price: Option<f64>,
    /// The item's description.
    #[schema(example = "This is a test item")]
    pub description: Option<String>,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            id: row.id,
            name: row.name,
            price: row.price,
            description: row.description,
        }
    }
}

/// A new item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct ItemCreate {
    /// The item's name.
    #[schema(example = "Test Item")]
    #[validate(length(max = 30))]
    pub name: String,
    /// The item's price.
    #[schema(example = 99.9)]
    pub price: f64,
    /// The item's description.
    #[schema(example = "This is a test item")]
    #[serde(default)]
    pub description: Option<String>,
}

/// Changes to an existing item.
///
/// Fields left out are not changed.
/// An explicit `null` clears `price` or `description`, but leaves `name` as is.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct ItemUpdate {
    /// A new name.
    #[schema(example = "Updated")]
    #[validate(length(max = 30))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// A new price, or `null` to clear it.
    #[schema(value_type = Option<f64>, example = 19.5)]
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Option<f64>>,
    /// A new description, or `null` to clear it.
    #[schema(value_type = Option<String>)]
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
}

/// Marks a field as present, so that `null` and a missing field can be told apart.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
