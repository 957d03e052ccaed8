//! # virtapi-adapter-source-fs
//!
//! Filesystem adapter.
//!
//! ## Responsibilities
//! - Implement [`ModelSource`](virtapi_app::ports::ModelSource) by reading one
//!   service definition per `*.toml` / `*.json` file of a directory
//! - Implement [`SiteWriter`](virtapi_app::ports::SiteWriter) by writing
//!   rendered pages below a site directory
//! - Map IO and parse failures into `ModelError::Source`
//!
//! ## Dependency rule
//! Depends on `virtapi-app` (for port traits) and `virtapi-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod model_source;
pub mod site_writer;

pub use error::SourceError;
pub use model_source::FsModelSource;
pub use site_writer::FsSiteWriter;
