//! # tea-api
//!
//! HTTP API layer for tearoom-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Contact and franchise form relays
//! - Payment webhook verification and forwarding
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/contact` | Contact form relay |
//! | POST | `/api/franchise` | Franchise inquiry relay |
//! | POST | `/api/webhooks/payment` | Payment webhook |

pub mod handlers;
pub mod routes;
pub mod state;

pub use handlers::ApiResponse;
pub use routes::create_router;
pub use state::{AppConfig, AppState};
