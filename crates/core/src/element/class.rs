use crate::error::Result;
use crate::factory::ElementFactory;
use beanscope_api::{AnnotationMetadata, ClassKind, EmptyAnnotationMetadata, SymbolRef, TypeRef};
use indexmap::IndexMap;
use smol_str::SmolStr;
use std::fmt;
use std::sync::Arc;

/// Resolved generic bindings, type-parameter name to bound element, in
/// declaration order.
pub type TypeArguments = IndexMap<SmolStr, ClassElement>;

/// A class-like type: a declared class, interface, enum or annotation, or a
/// type variable (see [`GenericPlaceholderElement`]).
///
/// Values are immutable. The `with_*` methods return a rebuilt copy that
/// differs only in the overridden attribute.
#[derive(Debug, Clone)]
pub struct ClassElement {
    symbol: SymbolRef,
    name: SmolStr,
    kind: ClassKind,
    is_inner: bool,
    is_static: bool,
    array_dimensions: usize,
    type_arguments: TypeArguments,
    annotations: Arc<dyn AnnotationMetadata>,
    placeholder: Option<Arc<TypeVariable>>,
}

#[derive(Debug)]
struct TypeVariable {
    name: SmolStr,
    bounds: Vec<TypeRef>,
    /// Substitution in scope where the variable was met.
    resolved_generics: TypeArguments,
}

impl ClassElement {
    pub(crate) fn new(symbol: SymbolRef, name: impl Into<SmolStr>, kind: ClassKind) -> Self {
        Self {
            symbol,
            name: name.into(),
            kind,
            is_inner: false,
            is_static: false,
            array_dimensions: 0,
            type_arguments: TypeArguments::new(),
            annotations: Arc::new(EmptyAnnotationMetadata),
            placeholder: None,
        }
    }

    pub(crate) fn with_modifiers(mut self, is_inner: bool, is_static: bool) -> Self {
        self.is_inner = is_inner;
        self.is_static = is_static;
        self
    }

    pub fn symbol(&self) -> &SymbolRef {
        &self.symbol
    }

    /// Fully qualified name, e.g. `java.util.List`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    pub fn kind(&self) -> ClassKind {
        self.kind
    }

    pub fn is_interface(&self) -> bool {
        self.kind == ClassKind::Interface
    }

    pub fn is_annotation(&self) -> bool {
        self.kind == ClassKind::Annotation
    }

    pub fn is_enum(&self) -> bool {
        self.kind == ClassKind::Enum
    }

    /// Declared inside another class.
    pub fn is_inner(&self) -> bool {
        self.is_inner
    }

    /// Constructible without an enclosing instance.
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn is_array(&self) -> bool {
        self.array_dimensions > 0
    }

    pub fn array_dimensions(&self) -> usize {
        self.array_dimensions
    }

    pub fn type_arguments(&self) -> &TypeArguments {
        &self.type_arguments
    }

    pub fn type_argument(&self, variable: &str) -> Option<&ClassElement> {
        self.type_arguments.get(variable)
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

    pub fn is_generic_placeholder(&self) -> bool {
        self.placeholder.is_some()
    }

    /// View this element as a type variable, if it is one.
    pub fn as_placeholder(&self) -> Option<GenericPlaceholderElement> {
        self.placeholder
            .as_ref()
            .map(|variable| GenericPlaceholderElement {
                class: self.clone(),
                variable: variable.clone(),
            })
    }

    pub fn with_array_dimensions(&self, array_dimensions: usize) -> Self {
        Self {
            array_dimensions,
            ..self.clone()
        }
    }

    pub fn with_annotation_metadata(&self, annotations: Arc<dyn AnnotationMetadata>) -> Self {
        Self {
            annotations,
            ..self.clone()
        }
    }

    pub fn with_type_arguments(&self, type_arguments: TypeArguments) -> Self {
        Self {
            type_arguments,
            ..self.clone()
        }
    }

    /// The nearest enclosing class, resolved through the factory on demand.
    pub fn enclosing_class(&self, factory: &ElementFactory<'_>) -> Result<Option<ClassElement>> {
        factory.declaring_class(&self.symbol, &TypeArguments::new())
    }

    /// Canonical rendering, e.g. `java.util.Map<K=java.lang.String,V=T>[]`.
    /// Unbound type variables render as their variable name.
    pub fn type_signature(&self) -> String {
        let mut out = match &self.placeholder {
            Some(variable) => variable.name.to_string(),
            None => self.name.to_string(),
        };
        if !self.type_arguments.is_empty() {
            out.push('<');
            let args: Vec<String> = self
                .type_arguments
                .iter()
                .map(|(name, arg)| format!("{}={}", name, arg.type_signature()))
                .collect();
            out.push_str(&args.join(","));
            out.push('>');
        }
        for _ in 0..self.array_dimensions {
            out.push_str("[]");
        }
        out
    }
}

/// Identity ignores annotation metadata: two elements are equal when symbol,
/// name, kind, modifiers, dimensions and generic bindings agree.
impl PartialEq for ClassElement {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
            && self.name == other.name
            && self.kind == other.kind
            && self.is_inner == other.is_inner
            && self.is_static == other.is_static
            && self.array_dimensions == other.array_dimensions
            && self.type_arguments == other.type_arguments
            && self.placeholder.as_ref().map(|v| &v.name)
                == other.placeholder.as_ref().map(|v| &v.name)
    }
}

impl fmt::Display for ClassElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_signature())
    }
}

/// An unresolved type variable such as `T` in `class Box<T : Number>`.
///
/// Its [`name`](Self::name) is the qualified name of its first bound, or the
/// top type when it has none; [`variable_name`](Self::variable_name) is `T`.
#[derive(Debug, Clone)]
pub struct GenericPlaceholderElement {
    class: ClassElement,
    variable: Arc<TypeVariable>,
}

impl GenericPlaceholderElement {
    /// `name` must already be the first bound's qualified name or the top type.
    pub(crate) fn new(
        symbol: SymbolRef,
        name: SmolStr,
        variable_name: SmolStr,
        bounds: Vec<TypeRef>,
        resolved_generics: TypeArguments,
        annotations: Arc<dyn AnnotationMetadata>,
    ) -> Self {
        let variable = Arc::new(TypeVariable {
            name: variable_name,
            bounds,
            resolved_generics,
        });
        let mut class = ClassElement::new(symbol, name, ClassKind::Class);
        class.annotations = annotations;
        class.placeholder = Some(variable.clone());
        Self { class, variable }
    }

    pub fn symbol(&self) -> &SymbolRef {
        self.class.symbol()
    }

    pub fn name(&self) -> &str {
        self.class.name()
    }

    pub fn variable_name(&self) -> &str {
        &self.variable.name
    }

    pub fn is_array(&self) -> bool {
        self.class.is_array()
    }

    pub fn array_dimensions(&self) -> usize {
        self.class.array_dimensions()
    }

    pub fn annotation_metadata(&self) -> &Arc<dyn AnnotationMetadata> {
        self.class.annotation_metadata()
    }

    /// Substitution that was in scope where the variable was resolved.
    pub fn resolved_generics(&self) -> &TypeArguments {
        &self.variable.resolved_generics
    }

    pub fn with_array_dimensions(&self, array_dimensions: usize) -> Self {
        Self {
            class: self.class.with_array_dimensions(array_dimensions),
            variable: self.variable.clone(),
        }
    }

    pub fn with_annotation_metadata(&self, annotations: Arc<dyn AnnotationMetadata>) -> Self {
        Self {
            class: self.class.with_annotation_metadata(annotations),
            variable: self.variable.clone(),
        }
    }

    /// Upper bounds resolved through the factory, in declaration order.
    pub fn bounds(&self, factory: &ElementFactory<'_>) -> Result<Vec<ClassElement>> {
        self.variable
            .bounds
            .iter()
            .map(|bound| factory.class_element(bound, &self.variable.resolved_generics))
            .collect()
    }

    /// The class declaring this variable, carrying the substitution in scope.
    pub fn declaring_element(&self, factory: &ElementFactory<'_>) -> Result<Option<ClassElement>> {
        factory.declaring_class(self.class.symbol(), &self.variable.resolved_generics)
    }

    pub fn as_class(&self) -> &ClassElement {
        &self.class
    }

    pub fn into_class(self) -> ClassElement {
        self.class
    }
}

impl PartialEq for GenericPlaceholderElement {
    fn eq(&self, other: &Self) -> bool {
        self.class == other.class
    }
}
