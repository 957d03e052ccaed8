//! # virtapi-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement:
//!   - `ModelSource` — load service definitions
//!   - `DocRenderer` — turn documentation views into a static site
//!   - `SiteWriter` — persist rendered pages
//! - Derive the **resource tree** (paths from the root through locators)
//!   and the **endpoint table** (method + path per operation)
//! - Run the structural **checks** over a loaded model
//! - Build **documentation views** consumed by renderers
//! - Orchestrate all of the above in use-case services (`CatalogService`,
//!   `PublishService`) without knowing *how* files are read or pages written
//!
//! ## Dependency rule
//! Depends on `virtapi-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod catalog;
pub mod checker;
pub mod docs;
pub mod endpoint;
pub mod ports;
pub mod resource_tree;
pub mod services;
