//! OpenAPI configuration.

use crate::{
    feature::item::{item_api, item_model},
    infra::{error::ErrorBody, extract::Json},
};
use utoipa::OpenApi;

/// OpenApi configuration.
#[derive(OpenApi)]
#[openapi(
    info(title = "item-store", description = "A catalog of items."),
    paths(
        item_api::create_item,
        item_api::get_item,
        item_api::update_item,
        item_api::delete_item,
    ),
    components(schemas(
        item_model::Item,
        item_model::ItemCreate,
        item_model::ItemUpdate,
        ErrorBody,
    ))
)]
#[derive(Clone, Copy, Debug)]
pub struct ApiDoc;

/// Serves the OpenAPI document.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_item_route() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/api/items"));
        assert!(paths.contains_key("/api/items/{id}"));
    }

    #[test]
    fn documents_schemas() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.unwrap().schemas;
        for name in ["Item", "ItemCreate", "ItemUpdate", "ErrorBody"] {
            assert!(schemas.contains_key(name), "missing schema {name}");
        }
    }
}
