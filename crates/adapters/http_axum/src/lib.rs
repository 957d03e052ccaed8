//! # virtapi-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the loaded catalog as **JSON** under `/api` (model, services,
//!   operations, endpoints, check report, endpoint resolution)
//! - Serve the **rendered documentation site** under `/docs`
//! - Map application errors into HTTP responses
//!
//! The served data is computed once at startup; handlers only read it.
//!
//! ## Dependency rule
//! Depends on `virtapi-app` (for catalog and documentation views) and
//! `virtapi-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod docs;
pub mod error;
pub mod router;
pub mod state;
