//! # shoplist
//!
//! A small HTTP service for one collection of named, priced items, kept in
//! a single JSON file.
//!
//! ## Routes
//!
//! | Route | Success | Failure |
//! |---|---|---|
//! | `GET /items` | `200`, JSON array | |
//! | `POST /items` | `201 {added}` | `400` invalid item or JSON |
//! | `GET /items/{name}` | `200`, the item | `404` |
//! | `PATCH /items/{name}` | `200 {updated}` | `400`, `404` |
//! | `DELETE /items/{name}` | `200 {message}` | `404` |
//! | `GET /healthz`, `GET /readyz` | `200` | `503` when the store is unreadable |
//!
//! Errors always answer `{"error": "<message>"}`. Storage trouble is a 500
//! with a generic message; the cause is logged.
//!
//! ## Embedding
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use shoplist::{JsonFileStore, Server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), shoplist::Error> {
//!     let app = shoplist::app(Arc::new(JsonFileStore::new("data.json")));
//!     Server::bind("0.0.0.0:3300").await?.serve(app).await
//! }
//! ```

mod api_error;
mod app;
mod config;
mod error;
mod handler;
mod method;
mod middleware;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod health;
pub mod items;
pub mod store;

pub use api_error::ApiError;
pub use app::{AppState, app};
pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use items::Item;
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
pub use store::{JsonFileStore, MemoryStore, Store, StoreError};
