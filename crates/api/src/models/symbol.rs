use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;

/// Kind of host declaration a [`SymbolRef`] points at.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Class,
    Function,
    TypeParameter,
    ValueParameter,
}

/// Handle to a declaration in the host compiler's symbol graph.
///
/// Equality is structural: a host may hand out several wrappers for the same
/// declaration, they all map to the same `SymbolRef` as long as kind and path
/// agree. The path is opaque to this crate; hosts usually use the qualified
/// name for classes and a `Owner#member` style path for members.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, JsonSchema)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum SymbolRef {
    Class(#[schemars(with = "String")] SmolStr),
    Function(#[schemars(with = "String")] SmolStr),
    TypeParameter(#[schemars(with = "String")] SmolStr),
    ValueParameter(#[schemars(with = "String")] SmolStr),
}

impl SymbolRef {
    pub fn class(path: impl Into<SmolStr>) -> Self {
        SymbolRef::Class(path.into())
    }

    pub fn function(path: impl Into<SmolStr>) -> Self {
        SymbolRef::Function(path.into())
    }

    pub fn type_parameter(path: impl Into<SmolStr>) -> Self {
        SymbolRef::TypeParameter(path.into())
    }

    pub fn value_parameter(path: impl Into<SmolStr>) -> Self {
        SymbolRef::ValueParameter(path.into())
    }

    pub fn kind(&self) -> SymbolKind {
        match self {
            SymbolRef::Class(_) => SymbolKind::Class,
            SymbolRef::Function(_) => SymbolKind::Function,
            SymbolRef::TypeParameter(_) => SymbolKind::TypeParameter,
            SymbolRef::ValueParameter(_) => SymbolKind::ValueParameter,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            SymbolRef::Class(p)
            | SymbolRef::Function(p)
            | SymbolRef::TypeParameter(p)
            | SymbolRef::ValueParameter(p) => p,
        }
    }

    pub fn is_class(&self) -> bool {
        matches!(self, SymbolRef::Class(_))
    }
}

impl fmt::Display for SymbolRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind() {
            SymbolKind::Class => "class",
            SymbolKind::Function => "function",
            SymbolKind::TypeParameter => "type parameter",
            SymbolKind::ValueParameter => "value parameter",
        };
        write!(f, "{} {}", kind, self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_equality() {
        let a = SymbolRef::class(String::from("com.example.Foo"));
        let b = SymbolRef::class("com.example.Foo");
        assert_eq!(a, b);
        assert_ne!(a, SymbolRef::function("com.example.Foo"));
    }

    #[test]
    fn test_serde_shape() {
        let symbol = SymbolRef::type_parameter("com.example.Box.T");
        let json = serde_json::to_string(&symbol).unwrap();
        assert_eq!(json, r#"{"kind":"type_parameter","path":"com.example.Box.T"}"#);
        let back: SymbolRef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, symbol);
    }
}
