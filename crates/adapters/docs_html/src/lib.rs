//! # virtapi-adapter-docs-html
//!
//! Static documentation renderer.
//!
//! ## Responsibilities
//! - Implement [`DocRenderer`](virtapi_app::ports::DocRenderer): an
//!   `index.html` grouping services by area plus one `services/<name>.html`
//!   page per service
//! - Convert the AsciiDoc subset used in definition docs (paragraphs,
//!   `[source]` listings, `....` literal blocks, admonitions, bullet lists,
//!   headings, inline code) into HTML
//! - Render pages with [askama](https://docs.rs/askama) templates; no
//!   JavaScript
//!
//! ## Dependency rule
//! Depends on `virtapi-app` (for port traits and documentation views) and
//! `virtapi-domain`. The `app` and `domain` crates must never reference this
//! adapter.

pub mod asciidoc;
pub mod error;
pub mod renderer;
mod views;

pub use error::RenderError;
pub use renderer::HtmlRenderer;
