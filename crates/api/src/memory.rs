//! A symbol graph held entirely in memory.
//!
//! Hosts that cannot expose their symbol table through the traits directly
//! can dump it as JSON and load it here. It also backs the test suites.

use crate::annotation::{
    AnnotationMetadata, AnnotationMetadataProvider, EmptyAnnotationMetadata,
    SimpleAnnotationMetadata,
};
use crate::error::{ApiError, ApiResult};
use crate::host::{DeclarationProvider, EnclosingProvider, UnitProvider};
use crate::models::{
    AnnotationRef, ClassDeclaration, ClassKind, CompilationUnit, FunctionDeclaration, Modifier,
    SymbolRef, TypeParameterDeclaration, TypeRef, ValueParameterDeclaration,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::sync::Arc;

#[derive(Serialize, Deserialize, Debug, Clone)]
struct Entry<T> {
    #[serde(flatten)]
    declaration: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    enclosing: Option<SymbolRef>,
    #[serde(default)]
    metadata: SimpleAnnotationMetadata,
}

impl<T> Entry<T> {
    fn new(declaration: T, enclosing: Option<SymbolRef>) -> Self {
        Self {
            declaration,
            enclosing,
            metadata: SimpleAnnotationMetadata::default(),
        }
    }
}

/// Parameter description for the builder: name (`None` for synthetic) and type.
pub type ParameterSpec<'a> = (Option<&'a str>, TypeRef);

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct InMemorySymbolGraph {
    #[serde(default)]
    units: Vec<CompilationUnit>,
    #[serde(default)]
    classes: IndexMap<SmolStr, Entry<ClassDeclaration>>,
    #[serde(default)]
    functions: IndexMap<SmolStr, Entry<FunctionDeclaration>>,
    #[serde(default)]
    value_parameters: IndexMap<SmolStr, Entry<ValueParameterDeclaration>>,
    #[serde(default)]
    type_parameters: IndexMap<SmolStr, Entry<TypeParameterDeclaration>>,
}

impl InMemorySymbolGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> ApiResult<Self> {
        let graph: Self = serde_json::from_str(json)?;
        graph.validate()?;
        Ok(graph)
    }

    pub fn to_json(&self) -> ApiResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every referenced symbol is declared.
    pub fn validate(&self) -> ApiResult<()> {
        let mut referenced: Vec<&SymbolRef> = Vec::new();
        for unit in &self.units {
            referenced.extend(unit.declarations.iter());
        }
        for entry in self.classes.values() {
            referenced.extend(entry.declaration.type_parameters.iter());
            referenced.extend(entry.declaration.members.iter());
        }
        for entry in self.functions.values() {
            referenced.extend(entry.declaration.type_parameters.iter());
            referenced.extend(entry.declaration.parameters.iter());
        }

        match referenced.into_iter().find(|symbol| !self.contains(symbol)) {
            Some(missing) => Err(ApiError::UndeclaredSymbol(missing.to_string())),
            None => Ok(()),
        }
    }

    pub fn contains(&self, symbol: &SymbolRef) -> bool {
        match symbol {
            SymbolRef::Class(path) => self.classes.contains_key(path),
            SymbolRef::Function(path) => self.functions.contains_key(path),
            SymbolRef::ValueParameter(path) => self.value_parameters.contains_key(path),
            SymbolRef::TypeParameter(path) => self.type_parameters.contains_key(path),
        }
    }

    /// Symbol the builder assigns to type parameter `name` of `owner`.
    pub fn type_parameter_symbol(owner: &SymbolRef, name: &str) -> SymbolRef {
        SymbolRef::type_parameter(format!("{}<{}>", owner.path(), name))
    }

    /// Add a compilation unit whose top-level declarations are the given classes.
    pub fn unit(self, path: &str, classes: &[&str]) -> Self {
        let declarations = classes.iter().map(|name| SymbolRef::class(*name)).collect();
        self.add_unit(CompilationUnit::new(path, declarations))
    }

    pub fn add_unit(mut self, unit: CompilationUnit) -> Self {
        self.units.push(unit);
        self
    }

    /// Declare a top-level class.
    pub fn class(mut self, qualified_name: &str, kind: ClassKind) -> Self {
        self.classes.insert(
            SmolStr::new(qualified_name),
            Entry::new(ClassDeclaration::new(qualified_name, kind), None),
        );
        self
    }

    /// Declare a class nested in `outer`.
    pub fn nested(
        mut self,
        outer: &str,
        qualified_name: &str,
        kind: ClassKind,
        modifiers: &[Modifier],
    ) -> Self {
        let mut declaration = ClassDeclaration::new(qualified_name, kind);
        declaration.modifiers = modifiers.to_vec();
        self.classes.insert(
            SmolStr::new(qualified_name),
            Entry::new(declaration, Some(SymbolRef::class(outer))),
        );
        self
    }

    pub fn modifiers(mut self, class: &str, modifiers: &[Modifier]) -> Self {
        self.class_entry(class).declaration.modifiers = modifiers.to_vec();
        self
    }

    /// Override the enclosing declaration of `symbol`.
    pub fn enclose(mut self, symbol: &SymbolRef, enclosing: SymbolRef) -> Self {
        let enclosing = Some(enclosing);
        match symbol {
            SymbolRef::Class(path) => {
                if let Some(entry) = self.classes.get_mut(path) {
                    entry.enclosing = enclosing;
                }
            }
            SymbolRef::Function(path) => {
                if let Some(entry) = self.functions.get_mut(path) {
                    entry.enclosing = enclosing;
                }
            }
            SymbolRef::ValueParameter(path) => {
                if let Some(entry) = self.value_parameters.get_mut(path) {
                    entry.enclosing = enclosing;
                }
            }
            SymbolRef::TypeParameter(path) => {
                if let Some(entry) = self.type_parameters.get_mut(path) {
                    entry.enclosing = enclosing;
                }
            }
        }
        self
    }

    /// Put an annotation on a declaration. On classes it also becomes part of
    /// the declaration's annotation list.
    pub fn annotate(mut self, symbol: &SymbolRef, annotation: &str) -> Self {
        if let SymbolRef::Class(path) = symbol {
            if let Some(entry) = self.classes.get_mut(path) {
                entry.declaration.annotations.push(AnnotationRef::new(annotation));
            }
        }
        if let Some(metadata) = self.metadata_mut(symbol) {
            metadata.declared.insert(SmolStr::new(annotation));
        }
        self
    }

    /// Record a stereotype implied by the declaration's annotations.
    pub fn stereotype(mut self, symbol: &SymbolRef, annotation: &str) -> Self {
        if let Some(metadata) = self.metadata_mut(symbol) {
            metadata.stereotypes.insert(SmolStr::new(annotation));
        }
        self
    }

    /// Declare a type parameter on a class or function.
    pub fn type_parameter(mut self, owner: &SymbolRef, name: &str, bounds: Vec<TypeRef>) -> Self {
        let symbol = Self::type_parameter_symbol(owner, name);
        match owner {
            SymbolRef::Class(path) => {
                if let Some(entry) = self.classes.get_mut(path) {
                    entry.declaration.type_parameters.push(symbol.clone());
                }
            }
            SymbolRef::Function(path) => {
                if let Some(entry) = self.functions.get_mut(path) {
                    entry.declaration.type_parameters.push(symbol.clone());
                }
            }
            _ => return self,
        }
        self.type_parameters.insert(
            SmolStr::new(symbol.path()),
            Entry::new(
                TypeParameterDeclaration {
                    name: SmolStr::new(name),
                    bounds,
                },
                Some(owner.clone()),
            ),
        );
        self
    }

    pub fn constructor(self, class: &str, parameters: Vec<ParameterSpec<'_>>) -> Self {
        self.function(class, "<init>", true, TypeRef::Error, parameters)
    }

    pub fn method(
        self,
        class: &str,
        name: &str,
        return_type: TypeRef,
        parameters: Vec<ParameterSpec<'_>>,
    ) -> Self {
        self.function(class, name, false, return_type, parameters)
    }

    /// Set the modifiers of a constructor or method.
    pub fn function_modifiers(mut self, function: &SymbolRef, modifiers: &[Modifier]) -> Self {
        if let Some(entry) = self.functions.get_mut(function.path()) {
            entry.declaration.modifiers = modifiers.to_vec();
        }
        self
    }

    /// Members of `class` in declaration order.
    pub fn members(&self, class: &str) -> Vec<SymbolRef> {
        self.classes
            .get(class)
            .map(|entry| entry.declaration.members.clone())
            .unwrap_or_default()
    }

    fn function(
        mut self,
        class: &str,
        name: &str,
        is_constructor: bool,
        return_type: TypeRef,
        parameters: Vec<ParameterSpec<'_>>,
    ) -> Self {
        let owner = SymbolRef::class(class);
        let index = self.class_entry(class).declaration.members.len();
        let function = SymbolRef::function(format!("{}#{}#{}", class, name, index));

        let mut parameter_symbols = Vec::with_capacity(parameters.len());
        for (position, (parameter_name, type_ref)) in parameters.into_iter().enumerate() {
            let symbol = SymbolRef::value_parameter(format!("{}/{}", function.path(), position));
            self.value_parameters.insert(
                SmolStr::new(symbol.path()),
                Entry::new(
                    ValueParameterDeclaration {
                        name: parameter_name.map(SmolStr::new),
                        type_ref,
                    },
                    Some(function.clone()),
                ),
            );
            parameter_symbols.push(symbol);
        }

        self.functions.insert(
            SmolStr::new(function.path()),
            Entry::new(
                FunctionDeclaration {
                    name: SmolStr::new(name),
                    is_constructor,
                    modifiers: Vec::new(),
                    type_parameters: Vec::new(),
                    parameters: parameter_symbols,
                    return_type,
                },
                Some(owner),
            ),
        );
        self.class_entry(class).declaration.members.push(function);
        self
    }

    fn class_entry(&mut self, class: &str) -> &mut Entry<ClassDeclaration> {
        self.classes
            .entry(SmolStr::new(class))
            .or_insert_with(|| Entry::new(ClassDeclaration::new(class, ClassKind::Class), None))
    }

    fn metadata(&self, symbol: &SymbolRef) -> Option<&SimpleAnnotationMetadata> {
        match symbol {
            SymbolRef::Class(path) => self.classes.get(path).map(|e| &e.metadata),
            SymbolRef::Function(path) => self.functions.get(path).map(|e| &e.metadata),
            SymbolRef::ValueParameter(path) => self.value_parameters.get(path).map(|e| &e.metadata),
            SymbolRef::TypeParameter(path) => self.type_parameters.get(path).map(|e| &e.metadata),
        }
    }

    fn metadata_mut(&mut self, symbol: &SymbolRef) -> Option<&mut SimpleAnnotationMetadata> {
        match symbol {
            SymbolRef::Class(path) => self.classes.get_mut(path).map(|e| &mut e.metadata),
            SymbolRef::Function(path) => self.functions.get_mut(path).map(|e| &mut e.metadata),
            SymbolRef::ValueParameter(path) => {
                self.value_parameters.get_mut(path).map(|e| &mut e.metadata)
            }
            SymbolRef::TypeParameter(path) => {
                self.type_parameters.get_mut(path).map(|e| &mut e.metadata)
            }
        }
    }
}

impl UnitProvider for InMemorySymbolGraph {
    fn compilation_units(&self) -> Vec<CompilationUnit> {
        self.units.clone()
    }
}

impl DeclarationProvider for InMemorySymbolGraph {
    fn class_declaration(&self, symbol: &SymbolRef) -> Option<ClassDeclaration> {
        match symbol {
            SymbolRef::Class(path) => self.classes.get(path).map(|e| e.declaration.clone()),
            _ => None,
        }
    }

    fn function_declaration(&self, symbol: &SymbolRef) -> Option<FunctionDeclaration> {
        match symbol {
            SymbolRef::Function(path) => self.functions.get(path).map(|e| e.declaration.clone()),
            _ => None,
        }
    }

    fn value_parameter(&self, symbol: &SymbolRef) -> Option<ValueParameterDeclaration> {
        match symbol {
            SymbolRef::ValueParameter(path) => {
                self.value_parameters.get(path).map(|e| e.declaration.clone())
            }
            _ => None,
        }
    }

    fn type_parameter(&self, symbol: &SymbolRef) -> Option<TypeParameterDeclaration> {
        match symbol {
            SymbolRef::TypeParameter(path) => {
                self.type_parameters.get(path).map(|e| e.declaration.clone())
            }
            _ => None,
        }
    }

    fn find_class(&self, qualified_name: &str) -> Option<SymbolRef> {
        self.classes
            .iter()
            .find(|(_, entry)| entry.declaration.qualified_name == qualified_name)
            .map(|(path, _)| SymbolRef::Class(path.clone()))
    }
}

impl EnclosingProvider for InMemorySymbolGraph {
    fn enclosing(&self, symbol: &SymbolRef) -> Option<SymbolRef> {
        match symbol {
            SymbolRef::Class(path) => self.classes.get(path)?.enclosing.clone(),
            SymbolRef::Function(path) => self.functions.get(path)?.enclosing.clone(),
            SymbolRef::ValueParameter(path) => self.value_parameters.get(path)?.enclosing.clone(),
            SymbolRef::TypeParameter(path) => self.type_parameters.get(path)?.enclosing.clone(),
        }
    }
}

impl AnnotationMetadataProvider for InMemorySymbolGraph {
    fn metadata_for(&self, symbol: &SymbolRef) -> Arc<dyn AnnotationMetadata> {
        match self.metadata(symbol) {
            Some(metadata) if !metadata.declared.is_empty() || !metadata.stereotypes.is_empty() => {
                Arc::new(metadata.clone())
            }
            _ => Arc::new(EmptyAnnotationMetadata),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::SymbolGraph;

    fn sample() -> InMemorySymbolGraph {
        InMemorySymbolGraph::new()
            .class("com.example.Outer", ClassKind::Class)
            .nested("com.example.Outer", "com.example.Outer.Inner", ClassKind::Class, &[])
            .constructor(
                "com.example.Outer",
                vec![(Some("name"), TypeRef::declared(SymbolRef::class("com.example.Outer")))],
            )
            .unit("Outer.kt", &["com.example.Outer"])
    }

    #[test]
    fn test_builder_wires_members_and_parents() {
        let graph = sample();
        let members = graph.members("com.example.Outer");
        assert_eq!(members.len(), 1);

        let constructor = graph.function_declaration(&members[0]).unwrap();
        assert!(constructor.is_constructor);
        assert_eq!(constructor.parameters.len(), 1);
        assert_eq!(
            graph.enclosing(&constructor.parameters[0]),
            Some(members[0].clone())
        );
        assert_eq!(
            graph.enclosing_chain(&constructor.parameters[0], 8),
            vec![members[0].clone(), SymbolRef::class("com.example.Outer")]
        );
        assert_eq!(
            graph.enclosing(&SymbolRef::class("com.example.Outer.Inner")),
            Some(SymbolRef::class("com.example.Outer"))
        );
    }

    #[test]
    fn test_json_round_trip_and_validation() {
        let graph = sample();
        let json = graph.to_json().unwrap();
        let loaded = InMemorySymbolGraph::from_json(&json).unwrap();
        assert_eq!(loaded.compilation_units(), graph.compilation_units());
        assert_eq!(
            loaded.find_class("com.example.Outer.Inner"),
            Some(SymbolRef::class("com.example.Outer.Inner"))
        );

        let broken = InMemorySymbolGraph::new().unit("Missing.kt", &["com.example.Missing"]);
        let err = InMemorySymbolGraph::from_json(&broken.to_json().unwrap()).unwrap_err();
        assert!(matches!(err, ApiError::UndeclaredSymbol(_)));
    }

    #[test]
    fn test_annotations_reach_metadata() {
        let outer = SymbolRef::class("com.example.Outer");
        let graph = sample()
            .annotate(&outer, "jakarta.inject.Singleton")
            .stereotype(&outer, "jakarta.inject.Scope");

        let declaration = graph.class_declaration(&outer).unwrap();
        assert_eq!(declaration.annotations[0].simple_name(), "Singleton");

        let metadata = graph.metadata_for(&outer);
        assert!(metadata.has_declared_annotation("jakarta.inject.Singleton"));
        assert!(metadata.has_stereotype("jakarta.inject.Scope"));
        assert!(graph.metadata_for(&SymbolRef::class("com.example.Outer.Inner")).is_empty());
    }
}
