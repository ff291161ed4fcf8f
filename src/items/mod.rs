//! The item routes.
//!
//! | Route | Success |
//! |---|---|
//! | `GET /items` | `200`, the whole collection |
//! | `POST /items` | `201 {added}` |
//! | `GET /items/{name}` | `200`, the item |
//! | `PATCH /items/{name}` | `200 {updated}` |
//! | `DELETE /items/{name}` | `200 {message: "Deleted"}` |
//!
//! Each handler reads the full collection from the store, and the mutating
//! ones write it back in full. Lookups are a linear scan for the first item
//! whose name matches exactly.

mod model;
pub mod validate;

pub use model::{Item, position};

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;
use tracing::info;

use crate::api_error::ApiError;
use crate::app::AppState;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

#[derive(Serialize)]
struct Added<'a> {
    added: &'a Item,
}

#[derive(Serialize)]
struct Updated<'a> {
    updated: &'a Item,
}

#[derive(Serialize)]
struct Message {
    message: &'static str,
}

/// `GET /items`
pub async fn list(_req: Request, state: AppState) -> Result<Response, ApiError> {
    let items = state.store().read().await?;
    Ok(Response::json(Status::Ok, &items))
}

/// `POST /items`: appends the payload verbatim, duplicates included.
pub async fn create(req: Request, state: AppState) -> Result<Response, ApiError> {
    let item = validate::new_item(req.payload())?;

    let _writes = state.lock_writes().await;
    let mut items = state.store().read().await?;
    items.push(item.clone());
    state.store().write(&items).await?;

    let name = item.name().unwrap_or_default();
    info!(item = name, total = items.len(), "item added");
    Ok(Response::builder()
        .status(Status::Created)
        .header("location", &location(name))
        .json(&Added { added: &item }))
}

/// `GET /items/{name}`
pub async fn get(req: Request, state: AppState) -> Result<Response, ApiError> {
    let name = name_param(&req)?;
    let items = state.store().read().await?;
    let index = position(&items, name).ok_or(ApiError::ItemNotFound)?;
    Ok(Response::json(Status::Ok, &items[index]))
}

/// `PATCH /items/{name}`: shallow-merges the payload over the first match.
///
/// The merged item may take a new name. Nothing checks that name against
/// the rest of the collection.
pub async fn update(req: Request, state: AppState) -> Result<Response, ApiError> {
    let name = name_param(&req)?;
    let patch = validate::item_patch(req.payload())?;

    let _writes = state.lock_writes().await;
    let mut items = state.store().read().await?;
    let index = position(&items, name).ok_or(ApiError::ItemNotFound)?;
    items[index].merge(patch);
    state.store().write(&items).await?;

    info!(item = name, "item updated");
    Ok(Response::json(Status::Ok, &Updated { updated: &items[index] }))
}

/// `DELETE /items/{name}`: removes the first match only.
pub async fn delete(req: Request, state: AppState) -> Result<Response, ApiError> {
    let name = name_param(&req)?;

    let _writes = state.lock_writes().await;
    let mut items = state.store().read().await?;
    let index = position(&items, name).ok_or(ApiError::ItemNotFound)?;
    items.remove(index);
    state.store().write(&items).await?;

    info!(item = name, total = items.len(), "item deleted");
    Ok(Response::json(Status::Ok, &Message { message: "Deleted" }))
}

fn name_param(req: &Request) -> Result<&str, ApiError> {
    // Only reachable through a `{name}` route, so a miss is a wiring bug.
    req.param("name")
        .ok_or_else(|| ApiError::Internal(format!("route for {} has no name parameter", req.path())))
}

fn location(name: &str) -> String {
    format!("/items/{}", utf8_percent_encode(name, NON_ALPHANUMERIC))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_is_percent_encoded() {
        assert_eq!(location("popsicle"), "/items/popsicle");
        assert_eq!(location("new popsicle"), "/items/new%20popsicle");
    }
}
