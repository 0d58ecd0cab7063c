//! Traits a host compiler implements to expose its symbol graph.
//!
//! The split mirrors how hosts usually organize their APIs: enumerating input
//! files, describing a single declaration, and navigating to the enclosing
//! declaration. [`SymbolGraph`] bundles all three.

use crate::models::{
    ClassDeclaration, CompilationUnit, FunctionDeclaration, SymbolRef, TypeParameterDeclaration,
    ValueParameterDeclaration,
};

/// Enumerates the input compilation units of the current round.
pub trait UnitProvider {
    /// Units in host order; each unit lists its top-level declarations in source order.
    fn compilation_units(&self) -> Vec<CompilationUnit>;
}

/// Describes individual declarations.
///
/// Every lookup returns `None` when the symbol is unknown to the host or is of
/// another kind.
pub trait DeclarationProvider {
    fn class_declaration(&self, symbol: &SymbolRef) -> Option<ClassDeclaration>;

    fn function_declaration(&self, symbol: &SymbolRef) -> Option<FunctionDeclaration>;

    fn value_parameter(&self, symbol: &SymbolRef) -> Option<ValueParameterDeclaration>;

    fn type_parameter(&self, symbol: &SymbolRef) -> Option<TypeParameterDeclaration>;

    /// Find a class-like declaration by qualified name.
    fn find_class(&self, qualified_name: &str) -> Option<SymbolRef>;
}

/// Declaring-context navigation.
///
/// This is a lookup, not an ownership edge: a class and its members refer to
/// each other only through the host.
pub trait EnclosingProvider {
    /// The declaration that directly encloses `symbol`, if any.
    fn enclosing(&self, symbol: &SymbolRef) -> Option<SymbolRef>;
}

/// The combined host interface.
pub trait SymbolGraph: UnitProvider + DeclarationProvider + EnclosingProvider {
    /// Walk outward from `symbol` and return every enclosing declaration,
    /// innermost first. Stops after `limit` steps.
    fn enclosing_chain(&self, symbol: &SymbolRef, limit: usize) -> Vec<SymbolRef> {
        let mut chain = Vec::new();
        let mut current = self.enclosing(symbol);
        while let Some(next) = current {
            if chain.len() >= limit {
                break;
            }
            current = self.enclosing(&next);
            chain.push(next);
        }
        chain
    }
}

// Blanket implementation: any type implementing all three traits gets SymbolGraph
impl<T: UnitProvider + DeclarationProvider + EnclosingProvider> SymbolGraph for T {}
