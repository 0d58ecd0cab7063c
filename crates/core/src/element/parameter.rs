use super::class::ClassElement;
use beanscope_api::{AnnotationMetadata, SymbolRef};
use smol_str::SmolStr;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ParameterElement {
    symbol: SymbolRef,
    name: SmolStr,
    type_: ClassElement,
    generic_type: ClassElement,
    annotations: Arc<dyn AnnotationMetadata>,
}

impl ParameterElement {
    pub(crate) fn new(
        symbol: SymbolRef,
        name: SmolStr,
        type_: ClassElement,
        generic_type: ClassElement,
        annotations: Arc<dyn AnnotationMetadata>,
    ) -> Self {
        Self {
            symbol,
            name,
            type_,
            generic_type,
            annotations,
        }
    }

    pub fn symbol(&self) -> &SymbolRef {
        &self.symbol
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type, type variables left unresolved.
    pub fn type_(&self) -> &ClassElement {
        &self.type_
    }

    pub fn generic_type(&self) -> &ClassElement {
        &self.generic_type
    }

    pub fn array_dimensions(&self) -> usize {
        self.type_.array_dimensions()
    }

    pub fn annotation_metadata(&self) -> &Arc<dyn AnnotationMetadata> {
        &self.annotations
    }
}

impl PartialEq for ParameterElement {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
            && self.name == other.name
            && self.type_ == other.type_
            && self.generic_type == other.generic_type
    }
}
