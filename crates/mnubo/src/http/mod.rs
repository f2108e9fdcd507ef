//! HTTP plumbing shared by the manager.
//!
//! Endpoint paths, wire types for the token endpoint, and request body
//! compression.

mod compression;
mod endpoints;

pub use compression::gzip_encode;
pub(crate) use endpoints::*;
