//! Todo client core.
//!
//! Everything the browser app needs that does not touch the DOM or the
//! network: the DummyJSON schema, a sans-IO API client, the cache store with
//! its optimistic mutation rules, the filtered view, reorder helpers and the
//! toast queue.
//!
//! The caller executes every `HttpRequest` the client builds and hands the
//! `HttpResponse` (or a `TransportFailure`) back, so all of this runs the
//! same in the browser and in native tests.

pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod http;
pub mod reorder;
pub mod schema;
pub mod store;
pub mod toast;

pub use client::TodoClient;
pub use config::{ApiConfig, CachePolicy};
pub use error::{ApiError, MutationConflict, ValidationError};
pub use filter::{FilterSummary, StatusFilter, TodoFilter};
pub use http::{settle, HttpMethod, HttpRequest, HttpResponse, TransportFailure};
pub use reorder::{array_move, move_by, move_onto, reconcile};
pub use schema::{CachedTodo, CreateTodo, Todo, TodoKey, TodosResponse, UpdateTodo};
pub use store::{MutationKind, MutationStatus, QueryStatus, TodoStore};
pub use toast::{NotificationSink, Toast, ToastLevel, ToastQueue};
