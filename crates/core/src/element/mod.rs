//! The element model: a uniform view over host declarations.
//!
//! ```text
//! Element
//!   ├── Class               ClassElement
//!   ├── GenericPlaceholder  GenericPlaceholderElement (a ClassElement for a type variable)
//!   ├── Method              MethodElement
//!   ├── Constructor         ConstructorElement (a MethodElement named `<init>`)
//!   └── Parameter           ParameterElement
//! ```
//!
//! Elements never own their declaring context. A member keeps a copy of its
//! declaring class by value; everything else (outer classes, the class that
//! declares a type variable) is looked up through the
//! [`ElementFactory`](crate::factory::ElementFactory) on demand.

mod class;
mod method;
mod parameter;

pub use class::{ClassElement, GenericPlaceholderElement, TypeArguments};
pub use method::{CONSTRUCTOR_NAME, ConstructorElement, MethodElement};
pub use parameter::ParameterElement;

use crate::error::Result;
use crate::factory::ElementFactory;
use beanscope_api::{AnnotationMetadata, SymbolRef};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Class(ClassElement),
    Method(MethodElement),
    Constructor(ConstructorElement),
    Parameter(ParameterElement),
    GenericPlaceholder(GenericPlaceholderElement),
}

impl Element {
    pub fn symbol(&self) -> &SymbolRef {
        match self {
            Element::Class(e) => e.symbol(),
            Element::Method(e) => e.symbol(),
            Element::Constructor(e) => e.symbol(),
            Element::Parameter(e) => e.symbol(),
            Element::GenericPlaceholder(e) => e.symbol(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Element::Class(e) => e.name(),
            Element::Method(e) => e.name(),
            Element::Constructor(e) => e.name(),
            Element::Parameter(e) => e.name(),
            Element::GenericPlaceholder(e) => e.name(),
        }
    }

    pub fn annotation_metadata(&self) -> &Arc<dyn AnnotationMetadata> {
        match self {
            Element::Class(e) => e.annotation_metadata(),
            Element::Method(e) => e.annotation_metadata(),
            Element::Constructor(e) => e.annotation_metadata(),
            Element::Parameter(e) => e.annotation_metadata(),
            Element::GenericPlaceholder(e) => e.annotation_metadata(),
        }
    }

    /// The class that declares this element, looked up on demand.
    pub fn declaring_class(&self, factory: &ElementFactory<'_>) -> Result<Option<ClassElement>> {
        match self {
            Element::Class(e) => e.enclosing_class(factory),
            Element::Method(e) => Ok(Some(e.declaring_type().clone())),
            Element::Constructor(e) => Ok(Some(e.declaring_type().clone())),
            Element::Parameter(e) => factory.declaring_class(e.symbol(), &TypeArguments::new()),
            Element::GenericPlaceholder(e) => e.declaring_element(factory),
        }
    }
}

impl From<ClassElement> for Element {
    fn from(value: ClassElement) -> Self {
        match value.as_placeholder() {
            Some(placeholder) => Element::GenericPlaceholder(placeholder),
            None => Element::Class(value),
        }
    }
}

impl From<MethodElement> for Element {
    fn from(value: MethodElement) -> Self {
        Element::Method(value)
    }
}

impl From<ConstructorElement> for Element {
    fn from(value: ConstructorElement) -> Self {
        Element::Constructor(value)
    }
}

impl From<ParameterElement> for Element {
    fn from(value: ParameterElement) -> Self {
        Element::Parameter(value)
    }
}
