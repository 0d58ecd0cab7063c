use crate::models::SymbolRef;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::collections::BTreeSet;
use std::fmt::Debug;
use std::sync::Arc;

/// Annotation metadata of a single declaration, as computed by the host's
/// annotation subsystem. Names are qualified annotation names.
pub trait AnnotationMetadata: Send + Sync + Debug {
    /// True when the annotation, or an annotation it is meta-annotated with, is present.
    fn has_stereotype(&self, annotation: &str) -> bool;

    /// True when the annotation is present directly on the declaration.
    fn has_declared_annotation(&self, annotation: &str) -> bool;

    /// Names of the directly declared annotations.
    fn declared_annotation_names(&self) -> Vec<SmolStr>;

    fn is_empty(&self) -> bool {
        self.declared_annotation_names().is_empty()
    }
}

/// Computes annotation metadata per declaration.
pub trait AnnotationMetadataProvider {
    fn metadata_for(&self, symbol: &SymbolRef) -> Arc<dyn AnnotationMetadata>;
}

/// Metadata for declarations without annotations.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyAnnotationMetadata;

impl AnnotationMetadata for EmptyAnnotationMetadata {
    fn has_stereotype(&self, _annotation: &str) -> bool {
        false
    }

    fn has_declared_annotation(&self, _annotation: &str) -> bool {
        false
    }

    fn declared_annotation_names(&self) -> Vec<SmolStr> {
        Vec::new()
    }
}

/// Set-backed metadata: declared annotations plus the stereotypes they imply.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SimpleAnnotationMetadata {
    #[serde(default)]
    pub declared: BTreeSet<SmolStr>,
    /// Meta-annotations reachable from `declared`. Declared annotations count
    /// as stereotypes too and need not be repeated here.
    #[serde(default)]
    pub stereotypes: BTreeSet<SmolStr>,
}

impl SimpleAnnotationMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_declared(mut self, annotation: impl Into<SmolStr>) -> Self {
        self.declared.insert(annotation.into());
        self
    }

    pub fn with_stereotype(mut self, annotation: impl Into<SmolStr>) -> Self {
        self.stereotypes.insert(annotation.into());
        self
    }
}

impl AnnotationMetadata for SimpleAnnotationMetadata {
    fn has_stereotype(&self, annotation: &str) -> bool {
        self.stereotypes.contains(annotation) || self.declared.contains(annotation)
    }

    fn has_declared_annotation(&self, annotation: &str) -> bool {
        self.declared.contains(annotation)
    }

    fn declared_annotation_names(&self) -> Vec<SmolStr> {
        self.declared.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_annotation_is_stereotype() {
        let metadata = SimpleAnnotationMetadata::new()
            .with_declared("io.micronaut.context.annotation.Context")
            .with_stereotype("jakarta.inject.Singleton");

        assert!(metadata.has_stereotype("io.micronaut.context.annotation.Context"));
        assert!(metadata.has_stereotype("jakarta.inject.Singleton"));
        assert!(!metadata.has_declared_annotation("jakarta.inject.Singleton"));
        assert!(!metadata.is_empty());
        assert!(EmptyAnnotationMetadata.is_empty());
    }
}
