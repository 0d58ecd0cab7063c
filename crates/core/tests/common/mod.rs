#![allow(dead_code)]

use beanscope_api::{ClassKind, InMemorySymbolGraph, SymbolRef, TypeRef};

pub const OBJECT: &str = "java.lang.Object";
pub const STRING: &str = "java.lang.String";
pub const NUMBER: &str = "java.lang.Number";
pub const LIST: &str = "java.util.List";
pub const BOX: &str = "com.example.Box";

pub const SINGLETON: &str = "jakarta.inject.Singleton";
pub const INTRODUCTION: &str = "io.micronaut.aop.Introduction";
pub const CONFIGURATION_READER: &str = "io.micronaut.context.annotation.ConfigurationReader";
pub const CONTEXT: &str = "io.micronaut.context.annotation.Context";
pub const EXECUTABLE: &str = "io.micronaut.context.annotation.Executable";

pub fn declared(name: &str) -> TypeRef {
    TypeRef::declared(SymbolRef::class(name))
}

pub fn type_variable(owner: &SymbolRef, name: &str) -> TypeRef {
    TypeRef::variable(InMemorySymbolGraph::type_parameter_symbol(owner, name))
}

/// `java.lang` and `java.util.List<E>`.
pub fn jdk() -> InMemorySymbolGraph {
    let list = SymbolRef::class(LIST);
    InMemorySymbolGraph::new()
        .class(OBJECT, ClassKind::Class)
        .class(STRING, ClassKind::Class)
        .class(NUMBER, ClassKind::Class)
        .class(LIST, ClassKind::Interface)
        .type_parameter(&list, "E", vec![])
}

/// `class Box<T : Number>(value: T) { fun get(): T; fun <R> map(): R }`
pub fn boxed() -> InMemorySymbolGraph {
    let owner = SymbolRef::class(BOX);
    let map = SymbolRef::function(format!("{}#map#2", BOX));
    jdk()
        .class(BOX, ClassKind::Class)
        .type_parameter(&owner, "T", vec![declared(NUMBER)])
        .constructor(BOX, vec![(Some("value"), type_variable(&owner, "T"))])
        .method(BOX, "get", type_variable(&owner, "T"), vec![])
        .method(BOX, "map", type_variable(&map, "R"), vec![])
        .type_parameter(&map, "R", vec![])
}
