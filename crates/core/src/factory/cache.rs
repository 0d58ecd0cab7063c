use crate::element::{ClassElement, TypeArguments};
use beanscope_api::SymbolRef;
use smol_str::SmolStr;
use std::cell::RefCell;
use std::collections::HashMap;

/// Identity of a resolution request: the declaration plus the canonical
/// rendering of the generic bindings it was resolved under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct CacheKey {
    symbol: SymbolRef,
    bindings: SmolStr,
}

impl CacheKey {
    pub(crate) fn new(symbol: &SymbolRef, bindings: &TypeArguments) -> Self {
        Self {
            symbol: symbol.clone(),
            bindings: SmolStr::new(render_bindings(bindings)),
        }
    }
}

fn render_bindings(bindings: &TypeArguments) -> String {
    let rendered: Vec<String> = bindings
        .iter()
        .map(|(name, arg)| format!("{}={}", name, render_element(arg)))
        .collect();
    rendered.join(",")
}

/// Like `type_signature`, except that type variables are named by their
/// symbol, so two classes each declaring `T` never share a key.
fn render_element(element: &ClassElement) -> String {
    let mut out = match element.as_placeholder() {
        Some(placeholder) => format!(
            "?{}{{{}}}",
            element.symbol().path(),
            render_bindings(placeholder.resolved_generics())
        ),
        None => element.name().to_string(),
    };
    if !element.type_arguments().is_empty() {
        out.push('<');
        out.push_str(&render_bindings(element.type_arguments()));
        out.push('>');
    }
    for _ in 0..element.array_dimensions() {
        out.push_str("[]");
    }
    out
}

/// Round-scoped element cache. Never outlives the factory that owns it.
#[derive(Debug, Default)]
pub(crate) struct ElementCache {
    entries: RefCell<HashMap<CacheKey, ClassElement>>,
}

impl ElementCache {
    pub(crate) fn get(&self, key: &CacheKey) -> Option<ClassElement> {
        self.entries.borrow().get(key).cloned()
    }

    pub(crate) fn insert(&self, key: CacheKey, element: ClassElement) {
        self.entries.borrow_mut().insert(key, element);
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.borrow().len()
    }
}
