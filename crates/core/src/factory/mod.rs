//! Element factory: the only place that talks to the host symbol graph.
//!
//! # Resolution
//!
//! - `Declared { symbol, args }` zips the declaration's type parameters with
//!   `args`, each argument resolved under the current substitution. Missing
//!   arguments (star projection) bind to the parameter's own placeholder.
//! - `Variable { symbol }` returns the binding from the substitution, or a
//!   [`GenericPlaceholderElement`] when the variable is unbound. Variables
//!   declared by functions are never bound from a class substitution.
//! - `Array { element, dimensions }` resolves the element and adds dimensions.
//! - `Error` resolves to the top type.
//!
//! Results are cached per (symbol, bindings) for the lifetime of the factory,
//! which is one processing round.

mod cache;

use crate::config::ProcessorConfig;
use crate::element::{
    ClassElement, ConstructorElement, GenericPlaceholderElement, MethodElement, ParameterElement,
    TypeArguments,
};
use crate::error::{BeanscopeError, Result};
use beanscope_api::{
    AnnotationMetadataProvider, ClassDeclaration, ClassKind, CompilationUnit, DeclarationProvider,
    EnclosingProvider, FunctionDeclaration, Language, Modifier, SymbolGraph, SymbolRef,
    TypeParameterDeclaration, TypeRef,
};
use cache::{CacheKey, ElementCache};
use smol_str::SmolStr;
use std::collections::{HashMap, HashSet};

/// Bound chains longer than this are treated as unresolvable.
const MAX_BOUND_DEPTH: usize = 64;

pub struct ElementFactory<'a> {
    host: &'a dyn SymbolGraph,
    annotations: &'a dyn AnnotationMetadataProvider,
    config: &'a ProcessorConfig,
    cache: ElementCache,
    /// Source language per top-level declaration of the round's units.
    languages: HashMap<SymbolRef, Language>,
}

impl<'a> ElementFactory<'a> {
    pub fn new(
        host: &'a dyn SymbolGraph,
        annotations: &'a dyn AnnotationMetadataProvider,
        config: &'a ProcessorConfig,
    ) -> Self {
        Self {
            host,
            annotations,
            config,
            cache: ElementCache::default(),
            languages: HashMap::new(),
        }
    }

    /// Record the source language of every top-level declaration in `units`.
    /// Nested classes take the language of their outermost class.
    pub fn with_units(mut self, units: &[CompilationUnit]) -> Self {
        for unit in units {
            for symbol in &unit.declarations {
                self.languages.insert(symbol.clone(), unit.language);
            }
        }
        self
    }

    pub fn host(&self) -> &'a dyn SymbolGraph {
        self.host
    }

    pub fn config(&self) -> &'a ProcessorConfig {
        self.config
    }

    /// Number of distinct class elements resolved so far.
    pub fn cached_elements(&self) -> usize {
        self.cache.len()
    }

    /// The class element for a class declaration, its own type parameters
    /// left unbound.
    pub fn new_class_element(&self, symbol: &SymbolRef) -> Result<ClassElement> {
        self.declared_element(symbol, &[], &TypeArguments::new())
    }

    /// Look up a class by qualified name.
    pub fn class_element_by_name(&self, qualified_name: &str) -> Result<Option<ClassElement>> {
        match self.host.find_class(qualified_name) {
            Some(symbol) => self.new_class_element(&symbol).map(Some),
            None => Ok(None),
        }
    }

    /// Resolve a type use under `generics`.
    pub fn class_element(
        &self,
        type_ref: &TypeRef,
        generics: &TypeArguments,
    ) -> Result<ClassElement> {
        match type_ref {
            TypeRef::Declared { symbol, args } => self.declared_element(symbol, args, generics),
            TypeRef::Variable { symbol } => {
                let declaration = self.type_parameter_declaration(symbol)?;
                match self.binding(symbol, &declaration.name, generics) {
                    Some(bound) => Ok(bound.clone()),
                    None => Ok(self.placeholder(symbol, declaration, generics).into_class()),
                }
            }
            TypeRef::Array {
                element,
                dimensions,
            } => {
                let element = self.class_element(element, generics)?;
                let dimensions = element.array_dimensions() + dimensions;
                Ok(element.with_array_dimensions(dimensions))
            }
            TypeRef::Error => Ok(self.top_type()),
        }
    }

    pub fn generic_placeholder(
        &self,
        symbol: &SymbolRef,
        generics: &TypeArguments,
    ) -> Result<GenericPlaceholderElement> {
        let declaration = self.type_parameter_declaration(symbol)?;
        Ok(self.placeholder(symbol, declaration, generics))
    }

    /// The element for the configured top type. Uses the host's declaration
    /// when there is one.
    pub fn top_type(&self) -> ClassElement {
        let name = self.config.top_type.as_str();
        if let Some(element) = self
            .host
            .find_class(name)
            .and_then(|symbol| self.new_class_element(&symbol).ok())
        {
            return element;
        }
        ClassElement::new(SymbolRef::class(name), name, ClassKind::Class)
    }

    /// Walk outward from `symbol` to the nearest enclosing class and resolve it,
    /// binding its type parameters from `generics` where possible.
    pub fn declaring_class(
        &self,
        symbol: &SymbolRef,
        generics: &TypeArguments,
    ) -> Result<Option<ClassElement>> {
        let mut visited = HashSet::new();
        visited.insert(symbol.clone());

        let mut current = self.host.enclosing(symbol);
        while let Some(outer) = current {
            if !visited.insert(outer.clone()) {
                return Err(BeanscopeError::InternalResolution(format!(
                    "cyclic declaring context at {} while resolving {}",
                    outer, symbol
                )));
            }
            if outer.is_class() {
                let declaration = self.class_declaration(&outer)?;
                let mut bindings = TypeArguments::new();
                for parameter in &declaration.type_parameters {
                    let parameter_decl = self.type_parameter_declaration(parameter)?;
                    let bound = match self.binding(parameter, &parameter_decl.name, generics) {
                        Some(bound) => bound.clone(),
                        None => self
                            .placeholder(parameter, parameter_decl.clone(), generics)
                            .into_class(),
                    };
                    bindings.insert(parameter_decl.name, bound);
                }
                return Ok(Some(self.build_class(&outer, declaration, bindings)));
            }
            current = self.host.enclosing(&outer);
        }
        Ok(None)
    }

    pub fn constructors(&self, class: &ClassElement) -> Result<Vec<ConstructorElement>> {
        let declaration = self.class_declaration(class.symbol())?;
        let mut constructors = Vec::new();
        for member in &declaration.members {
            let function = self.function_declaration(member)?;
            if function.is_constructor {
                constructors.push(self.build_constructor(member, function, class)?);
            }
        }
        Ok(constructors)
    }

    pub fn methods(&self, class: &ClassElement) -> Result<Vec<MethodElement>> {
        let declaration = self.class_declaration(class.symbol())?;
        let mut methods = Vec::new();
        for member in &declaration.members {
            let function = self.function_declaration(member)?;
            if !function.is_constructor {
                methods.push(self.build_method(member, function, class)?);
            }
        }
        Ok(methods)
    }

    pub fn method_element(
        &self,
        symbol: &SymbolRef,
        declaring_type: &ClassElement,
    ) -> Result<MethodElement> {
        let function = self.function_declaration(symbol)?;
        self.build_method(symbol, function, declaring_type)
    }

    pub fn constructor_element(
        &self,
        symbol: &SymbolRef,
        declaring_type: &ClassElement,
    ) -> Result<ConstructorElement> {
        let function = self.function_declaration(symbol)?;
        self.build_constructor(symbol, function, declaring_type)
    }

    /// Fails with [`BeanscopeError::MissingIdentifier`] when the host reports
    /// no name for the parameter.
    pub fn parameter_element(
        &self,
        symbol: &SymbolRef,
        generics: &TypeArguments,
    ) -> Result<ParameterElement> {
        let declaration = self
            .host
            .value_parameter(symbol)
            .ok_or_else(|| BeanscopeError::UnknownSymbol(symbol.clone()))?;
        let name = declaration
            .name
            .filter(|name| !name.is_empty())
            .ok_or_else(|| BeanscopeError::MissingIdentifier {
                symbol: symbol.clone(),
            })?;
        let type_ = self.class_element(&declaration.type_ref, &TypeArguments::new())?;
        let generic_type = self.class_element(&declaration.type_ref, generics)?;
        Ok(ParameterElement::new(
            symbol.clone(),
            name,
            type_,
            generic_type,
            self.annotations.metadata_for(symbol),
        ))
    }

    /// The binding for type variable `symbol` named `name`. Substitutions only
    /// ever come from class type arguments, so a variable declared by a
    /// function is never bound from them, even when the names collide.
    fn binding<'g>(
        &self,
        symbol: &SymbolRef,
        name: &str,
        generics: &'g TypeArguments,
    ) -> Option<&'g ClassElement> {
        let owned_by_class = self
            .host
            .enclosing(symbol)
            .is_none_or(|owner| owner.is_class());
        if owned_by_class {
            generics.get(name)
        } else {
            None
        }
    }

    fn declared_element(
        &self,
        symbol: &SymbolRef,
        args: &[TypeRef],
        generics: &TypeArguments,
    ) -> Result<ClassElement> {
        let declaration = self.class_declaration(symbol)?;
        let mut bindings = TypeArguments::new();
        for (index, parameter) in declaration.type_parameters.iter().enumerate() {
            let parameter_decl = self.type_parameter_declaration(parameter)?;
            let bound = match args.get(index) {
                Some(arg) => self.class_element(arg, generics)?,
                None => self
                    .placeholder(parameter, parameter_decl.clone(), generics)
                    .into_class(),
            };
            bindings.insert(parameter_decl.name, bound);
        }
        Ok(self.build_class(symbol, declaration, bindings))
    }

    fn build_class(
        &self,
        symbol: &SymbolRef,
        declaration: ClassDeclaration,
        bindings: TypeArguments,
    ) -> ClassElement {
        let key = CacheKey::new(symbol, &bindings);
        if let Some(hit) = self.cache.get(&key) {
            return hit;
        }

        let is_inner = self
            .host
            .enclosing(symbol)
            .is_some_and(|outer| outer.is_class());
        // `inner` always captures the outer instance. Nested interfaces, enums and
        // annotations never do; plain nested classes depend on the source language.
        let is_static = !declaration.has_modifier(Modifier::Inner)
            && (declaration.has_modifier(Modifier::Static)
                || (is_inner
                    && (declaration.kind != ClassKind::Class
                        || self.source_language(symbol).nested_classes_are_static())));

        let kind = declaration.kind;
        let element = ClassElement::new(symbol.clone(), declaration.qualified_name, kind)
            .with_modifiers(is_inner, is_static)
            .with_type_arguments(bindings)
            .with_annotation_metadata(self.annotations.metadata_for(symbol));
        tracing::trace!("resolved {}", element);
        self.cache.insert(key, element.clone());
        element
    }

    fn placeholder(
        &self,
        symbol: &SymbolRef,
        declaration: TypeParameterDeclaration,
        generics: &TypeArguments,
    ) -> GenericPlaceholderElement {
        let key = CacheKey::new(symbol, generics);
        if let Some(hit) = self.cache.get(&key).and_then(|e| e.as_placeholder()) {
            return hit;
        }

        let name = self.placeholder_name(symbol, &declaration.bounds);
        let placeholder = GenericPlaceholderElement::new(
            symbol.clone(),
            name,
            declaration.name,
            declaration.bounds,
            generics.clone(),
            self.annotations.metadata_for(symbol),
        );
        self.cache.insert(key, placeholder.as_class().clone());
        placeholder
    }

    fn placeholder_name(&self, symbol: &SymbolRef, bounds: &[TypeRef]) -> SmolStr {
        let Some(first) = bounds.first() else {
            return SmolStr::new(&self.config.top_type);
        };
        self.bound_name(first, 0).unwrap_or_else(|| {
            tracing::debug!(
                "unresolved bound on {}, falling back to {}",
                symbol,
                self.config.top_type
            );
            SmolStr::new(&self.config.top_type)
        })
    }

    fn bound_name(&self, bound: &TypeRef, depth: usize) -> Option<SmolStr> {
        if depth > MAX_BOUND_DEPTH {
            return None;
        }
        match bound {
            TypeRef::Declared { symbol, .. } => self
                .host
                .class_declaration(symbol)
                .map(|declaration| declaration.qualified_name)
                .filter(|name| !name.is_empty()),
            TypeRef::Variable { symbol } => {
                let declaration = self.host.type_parameter(symbol)?;
                match declaration.bounds.first() {
                    Some(next) => self.bound_name(next, depth + 1),
                    None => Some(SmolStr::new(&self.config.top_type)),
                }
            }
            TypeRef::Array { element, .. } => self.bound_name(element, depth + 1),
            TypeRef::Error => None,
        }
    }

    /// Language of the unit that declares `symbol` or its outermost class.
    /// Declarations outside the round's units report `Language::Unknown`.
    fn source_language(&self, symbol: &SymbolRef) -> Language {
        let mut visited = HashSet::new();
        let mut current = Some(symbol.clone());
        while let Some(candidate) = current {
            if let Some(language) = self.languages.get(&candidate) {
                return *language;
            }
            if !visited.insert(candidate.clone()) {
                break;
            }
            current = self.host.enclosing(&candidate);
        }
        Language::Unknown
    }

    fn build_method(
        &self,
        symbol: &SymbolRef,
        function: FunctionDeclaration,
        declaring_type: &ClassElement,
    ) -> Result<MethodElement> {
        let generics = declaring_type.type_arguments();
        let return_type = self.class_element(&function.return_type, &TypeArguments::new())?;
        let generic_return_type = self.class_element(&function.return_type, generics)?;
        let parameters = function
            .parameters
            .iter()
            .map(|parameter| self.parameter_element(parameter, generics))
            .collect::<Result<Vec<_>>>()?;
        Ok(MethodElement::new(
            symbol.clone(),
            function.name,
            declaring_type.clone(),
            return_type,
            generic_return_type,
            parameters,
            function.modifiers,
            self.annotations.metadata_for(symbol),
        ))
    }

    fn build_constructor(
        &self,
        symbol: &SymbolRef,
        function: FunctionDeclaration,
        declaring_type: &ClassElement,
    ) -> Result<ConstructorElement> {
        let generics = declaring_type.type_arguments();
        let parameters = function
            .parameters
            .iter()
            .map(|parameter| self.parameter_element(parameter, generics))
            .collect::<Result<Vec<_>>>()?;
        Ok(ConstructorElement::new(
            symbol.clone(),
            declaring_type.clone(),
            parameters,
            function.modifiers,
            self.annotations.metadata_for(symbol),
        ))
    }

    fn class_declaration(&self, symbol: &SymbolRef) -> Result<ClassDeclaration> {
        self.host
            .class_declaration(symbol)
            .ok_or_else(|| BeanscopeError::UnknownSymbol(symbol.clone()))
    }

    fn function_declaration(&self, symbol: &SymbolRef) -> Result<FunctionDeclaration> {
        self.host
            .function_declaration(symbol)
            .ok_or_else(|| BeanscopeError::UnknownSymbol(symbol.clone()))
    }

    fn type_parameter_declaration(&self, symbol: &SymbolRef) -> Result<TypeParameterDeclaration> {
        self.host
            .type_parameter(symbol)
            .ok_or_else(|| BeanscopeError::UnknownSymbol(symbol.clone()))
    }
}
