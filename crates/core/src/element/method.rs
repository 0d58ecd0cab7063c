use super::class::ClassElement;
use super::parameter::ParameterElement;
use beanscope_api::{AnnotationMetadata, Modifier, SymbolRef};
use smol_str::SmolStr;
use std::sync::Arc;

/// Name reported by every constructor.
pub const CONSTRUCTOR_NAME: &str = "<init>";

#[derive(Debug, Clone)]
pub struct MethodElement {
    symbol: SymbolRef,
    name: SmolStr,
    declaring_type: ClassElement,
    return_type: ClassElement,
    generic_return_type: ClassElement,
    parameters: Vec<ParameterElement>,
    modifiers: Vec<Modifier>,
    annotations: Arc<dyn AnnotationMetadata>,
}

impl MethodElement {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        symbol: SymbolRef,
        name: SmolStr,
        declaring_type: ClassElement,
        return_type: ClassElement,
        generic_return_type: ClassElement,
        parameters: Vec<ParameterElement>,
        modifiers: Vec<Modifier>,
        annotations: Arc<dyn AnnotationMetadata>,
    ) -> Self {
        Self {
            symbol,
            name,
            declaring_type,
            return_type,
            generic_return_type,
            parameters,
            modifiers,
            annotations,
        }
    }

    pub fn symbol(&self) -> &SymbolRef {
        &self.symbol
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declaring_type(&self) -> &ClassElement {
        &self.declaring_type
    }

    /// Return type without the declaring type's generic substitution.
    pub fn return_type(&self) -> &ClassElement {
        &self.return_type
    }

    /// Return type with the declaring type's type arguments substituted.
    pub fn generic_return_type(&self) -> &ClassElement {
        &self.generic_return_type
    }

    pub fn parameters(&self) -> &[ParameterElement] {
        &self.parameters
    }

    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    pub fn is_private(&self) -> bool {
        self.modifiers.contains(&Modifier::Private)
    }

    pub fn annotation_metadata(&self) -> &Arc<dyn AnnotationMetadata> {
        &self.annotations
    }

    pub fn has_stereotype(&self, annotation: &str) -> bool {
        self.annotations.has_stereotype(annotation)
    }

    pub fn has_declared_annotation(&self, annotation: &str) -> bool {
        self.annotations.has_declared_annotation(annotation)
    }
}

impl PartialEq for MethodElement {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
            && self.name == other.name
            && self.declaring_type == other.declaring_type
            && self.return_type == other.return_type
            && self.generic_return_type == other.generic_return_type
            && self.parameters == other.parameters
    }
}

/// A constructor. Its name is always [`CONSTRUCTOR_NAME`] and its return type
/// is always the declaring type.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorElement {
    method: MethodElement,
}

impl ConstructorElement {
    pub(crate) fn new(
        symbol: SymbolRef,
        declaring_type: ClassElement,
        parameters: Vec<ParameterElement>,
        modifiers: Vec<Modifier>,
        annotations: Arc<dyn AnnotationMetadata>,
    ) -> Self {
        let method = MethodElement::new(
            symbol,
            SmolStr::new_static(CONSTRUCTOR_NAME),
            declaring_type.clone(),
            declaring_type.clone(),
            declaring_type,
            parameters,
            modifiers,
            annotations,
        );
        Self { method }
    }

    pub fn symbol(&self) -> &SymbolRef {
        self.method.symbol()
    }

    pub fn name(&self) -> &str {
        CONSTRUCTOR_NAME
    }

    pub fn declaring_type(&self) -> &ClassElement {
        self.method.declaring_type()
    }

    pub fn return_type(&self) -> &ClassElement {
        self.method.declaring_type()
    }

    pub fn parameters(&self) -> &[ParameterElement] {
        self.method.parameters()
    }

    pub fn is_private(&self) -> bool {
        self.method.is_private()
    }

    pub fn annotation_metadata(&self) -> &Arc<dyn AnnotationMetadata> {
        self.method.annotation_metadata()
    }

    pub fn has_declared_annotation(&self, annotation: &str) -> bool {
        self.method.has_declared_annotation(annotation)
    }

    pub fn as_method(&self) -> &MethodElement {
        &self.method
    }
}
