//! Web API module for filestash.
//!
//! Thin HTTP boundary over the auth and file services: it extracts
//! headers, path, query and body, calls the services, and maps results to
//! status codes and JSON bodies.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
