//! # virtapi-domain
//!
//! Pure schema model of a virtualization-management REST API.
//!
//! ## Responsibilities
//! - Foundational types: word-based [`Name`](name::Name)s, type references,
//!   error conventions
//! - Define **Services** (REST-exposed scopes) and their **Locators**
//!   (child service references forming the resource tree)
//! - Define **Operations** (`Add`, `Get`, `List`, `Remove`, actions, …) with
//!   typed input/output **Parameters**
//! - Define **Constraints** (`mandatory` / `optional` / `or` / `and`
//!   requiredness hints) as an expression tree
//! - Define **Documentation** blocks and their opaque metadata
//! - Define **Areas** (documentation grouping tags)
//! - Aggregate everything into a [`Model`](model::Model) with a root service
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! Loading definitions and rendering documentation are expressed as ports in
//! the `app` crate.

pub mod error;
pub mod http;
pub mod name;
pub mod type_ref;

pub mod area;
pub mod constraint;
pub mod documentation;
pub mod model;
pub mod operation;
pub mod parameter;
pub mod service;
