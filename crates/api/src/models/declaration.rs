use super::language::Language;
use super::symbol::SymbolRef;
use super::type_ref::TypeRef;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    Enum,
    Annotation,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Internal,
    Abstract,
    Final,
    Open,
    Static,
    Inner,
}

/// An annotation use on a declaration. Only the name is exposed here; values
/// are the annotation-metadata subsystem's concern.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct AnnotationRef {
    pub qualified_name: SmolStr,
}

impl AnnotationRef {
    pub fn new(qualified_name: impl Into<SmolStr>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
        }
    }

    pub fn simple_name(&self) -> &str {
        self.qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(&self.qualified_name)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ClassDeclaration {
    pub qualified_name: SmolStr,
    #[serde(default)]
    pub kind: ClassKind,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub annotations: Vec<AnnotationRef>,
    #[serde(default)]
    pub type_parameters: Vec<SymbolRef>,
    /// Constructors and methods, in declaration order.
    #[serde(default)]
    pub members: Vec<SymbolRef>,
}

impl ClassDeclaration {
    pub fn new(qualified_name: impl Into<SmolStr>, kind: ClassKind) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            kind,
            modifiers: Vec::new(),
            annotations: Vec::new(),
            type_parameters: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FunctionDeclaration {
    pub name: SmolStr,
    #[serde(default)]
    pub is_constructor: bool,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub type_parameters: Vec<SymbolRef>,
    #[serde(default)]
    pub parameters: Vec<SymbolRef>,
    /// Ignored for constructors.
    #[serde(default)]
    pub return_type: TypeRef,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ValueParameterDeclaration {
    /// `None` for synthetic or anonymous parameters.
    #[serde(default)]
    pub name: Option<SmolStr>,
    pub type_ref: TypeRef,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TypeParameterDeclaration {
    pub name: SmolStr,
    /// Upper bounds in declaration order, e.g. `T : Comparable<T>`
    #[serde(default)]
    pub bounds: Vec<TypeRef>,
}

/// One input source file with its top-level declarations in source order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnit {
    pub path: SmolStr,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub declarations: Vec<SymbolRef>,
}

impl CompilationUnit {
    pub fn new(path: impl Into<SmolStr>, declarations: Vec<SymbolRef>) -> Self {
        let path = path.into();
        let language = Language::from_path(&path);
        Self {
            path,
            language,
            declarations,
        }
    }
}
