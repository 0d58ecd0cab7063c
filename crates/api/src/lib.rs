//! Host-facing boundary of beanscope.
//!
//! Everything a host compiler has to provide lives here: symbol references,
//! declaration descriptions, type uses, the [`SymbolGraph`] trait family and
//! the annotation-metadata seam.

pub mod annotation;
pub mod error;
pub mod host;
pub mod memory;
pub mod models;

// Re-export commonly used types
pub use annotation::{
    AnnotationMetadata, AnnotationMetadataProvider, EmptyAnnotationMetadata,
    SimpleAnnotationMetadata,
};
pub use error::{ApiError, ApiResult};
pub use host::{DeclarationProvider, EnclosingProvider, SymbolGraph, UnitProvider};
pub use memory::InMemorySymbolGraph;
pub use models::*;
