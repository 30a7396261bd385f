//! Domain building blocks for the cooperative website backend.
//!
//! Everything here is free of HTTP and database concerns: error taxonomy,
//! public path rewriting, file-area safety checks, inline image decoding,
//! pagination arithmetic and input validation.

pub mod error;
pub mod files;
pub mod media;
pub mod pagination;
pub mod paths;
pub mod types;
pub mod validation;
