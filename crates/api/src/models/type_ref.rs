use super::symbol::SymbolRef;
use serde::{Deserialize, Serialize};

/// A type use as reported by the host, before element resolution.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TypeRef {
    /// Reference to a class-like declaration, with its type arguments (e.g. `List<String>`).
    /// Empty `args` on a generic declaration means a star projection.
    Declared {
        symbol: SymbolRef,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<TypeRef>,
    },

    /// Use of a type variable (e.g. `T`)
    Variable { symbol: SymbolRef },

    /// Array type (e.g. `String[]`)
    Array {
        element: Box<TypeRef>,
        dimensions: usize,
    },

    /// The host could not resolve this type
    Error,
}

impl TypeRef {
    pub fn declared(symbol: SymbolRef) -> Self {
        TypeRef::Declared {
            symbol,
            args: Vec::new(),
        }
    }

    pub fn generic(symbol: SymbolRef, args: Vec<TypeRef>) -> Self {
        TypeRef::Declared { symbol, args }
    }

    pub fn variable(symbol: SymbolRef) -> Self {
        TypeRef::Variable { symbol }
    }

    pub fn array(element: TypeRef, dimensions: usize) -> Self {
        TypeRef::Array {
            element: Box::new(element),
            dimensions,
        }
    }

    /// The symbol this type ultimately refers to, looking through arrays.
    pub fn symbol(&self) -> Option<&SymbolRef> {
        match self {
            TypeRef::Declared { symbol, .. } | TypeRef::Variable { symbol } => Some(symbol),
            TypeRef::Array { element, .. } => element.symbol(),
            TypeRef::Error => None,
        }
    }
}

impl Default for TypeRef {
    fn default() -> Self {
        TypeRef::Error
    }
}
