use super::{BeanCandidateVisitor, VisitorContext};
use crate::config::ProcessorConfig;
use crate::element::{ClassElement, ConstructorElement, MethodElement};
use crate::error::{BeanscopeError, Result};
use crate::output::BeanArtifact;
use beanscope_api::{AnnotationMetadata, DeclarationProvider, Modifier};
use std::any::Any;

/// Bean definition for one class: how to construct it and which methods need
/// runtime method processing.
#[derive(Debug, Clone)]
pub struct BeanDefinition {
    bean_type: ClassElement,
    constructor: Option<ConstructorElement>,
    executable_methods: Vec<MethodElement>,
    introduction: bool,
    ended: bool,
}

impl BeanDefinition {
    pub fn new(bean_type: ClassElement) -> Self {
        Self {
            bean_type,
            constructor: None,
            executable_methods: Vec::new(),
            introduction: false,
            ended: false,
        }
    }

    pub fn bean_type_element(&self) -> &ClassElement {
        &self.bean_type
    }

    pub fn constructor(&self) -> Option<&ConstructorElement> {
        self.constructor.as_ref()
    }

    /// Names of the constructor parameters, in order.
    pub fn injection_points(&self) -> Vec<&str> {
        self.constructor
            .iter()
            .flat_map(|c| c.parameters().iter().map(|p| p.name()))
            .collect()
    }

    pub fn executable_methods(&self) -> &[MethodElement] {
        &self.executable_methods
    }

    /// True when the implementation is synthesized rather than constructed.
    pub fn is_introduction(&self) -> bool {
        self.introduction
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn set_constructor(&mut self, constructor: ConstructorElement) -> Result<()> {
        self.ensure_open()?;
        self.constructor = Some(constructor);
        Ok(())
    }

    pub fn add_executable_method(&mut self, method: MethodElement) -> Result<()> {
        self.ensure_open()?;
        self.executable_methods.push(method);
        Ok(())
    }

    pub fn set_introduction(&mut self, introduction: bool) -> Result<()> {
        self.ensure_open()?;
        self.introduction = introduction;
        Ok(())
    }

    fn ensure_open(&self) -> Result<()> {
        if self.ended {
            return Err(BeanscopeError::Frozen(self.bean_type.name().to_string()));
        }
        Ok(())
    }
}

impl BeanArtifact for BeanDefinition {
    fn bean_type(&self) -> &str {
        self.bean_type.name()
    }

    fn requires_method_processing(&self) -> bool {
        !self.executable_methods.is_empty()
    }

    fn annotation_metadata(&self) -> &dyn AnnotationMetadata {
        &**self.bean_type.annotation_metadata()
    }

    fn visit_end(&mut self) {
        self.ended = true;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Builds one [`BeanDefinition`] per bean class.
///
/// A class is a bean when it carries one of the configured bean stereotypes.
/// Interfaces reaching the visitor (introductions and configuration readers)
/// always become introduction definitions. Abstract classes are skipped.
#[derive(Debug, Default)]
pub struct DefinitionVisitor;

impl DefinitionVisitor {
    pub fn new() -> Self {
        Self
    }

    fn is_bean(class: &ClassElement, config: &ProcessorConfig) -> bool {
        config
            .bean_stereotypes
            .iter()
            .any(|stereotype| class.has_stereotype(stereotype))
    }

    /// The constructor carrying the inject annotation, else the only
    /// constructor, else the first non-private one.
    fn select_constructor(
        constructors: Vec<ConstructorElement>,
        config: &ProcessorConfig,
    ) -> Option<ConstructorElement> {
        if let Some(index) = constructors
            .iter()
            .position(|c| c.has_declared_annotation(&config.inject_annotation))
        {
            return constructors.into_iter().nth(index);
        }
        if constructors.len() == 1 {
            return constructors.into_iter().next();
        }
        constructors.into_iter().find(|c| !c.is_private())
    }
}

impl BeanCandidateVisitor for DefinitionVisitor {
    fn visit(
        &mut self,
        class: &ClassElement,
        context: &VisitorContext<'_>,
    ) -> Result<Vec<Box<dyn BeanArtifact>>> {
        let config = context.config();
        let factory = context.factory();

        let mut definition = BeanDefinition::new(class.clone());
        if class.is_interface() {
            definition.set_introduction(true)?;
        } else if !Self::is_bean(class, config) {
            tracing::debug!("{} carries no bean stereotype", class.name());
            return Ok(Vec::new());
        } else if factory
            .host()
            .class_declaration(class.symbol())
            .is_some_and(|d| d.has_modifier(Modifier::Abstract))
        {
            context.warn("abstract class cannot be instantiated", Some(class.symbol()));
            return Ok(Vec::new());
        } else {
            let constructors = factory.constructors(class)?;
            match Self::select_constructor(constructors, config) {
                Some(constructor) => definition.set_constructor(constructor)?,
                None => {
                    context.fail("no accessible constructor", Some(class.symbol()));
                    return Ok(Vec::new());
                }
            }
        }

        for method in factory.methods(class)? {
            if method.has_stereotype(&config.executable_stereotype) {
                definition.add_executable_method(method)?;
            }
        }

        tracing::debug!(
            "bean definition for {} ({} injection points)",
            class.name(),
            definition.injection_points().len()
        );
        Ok(vec![Box::new(definition)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticSink;
    use crate::factory::ElementFactory;
    use beanscope_api::{ClassKind, InMemorySymbolGraph, SymbolRef, TypeRef};

    const SINGLETON: &str = "jakarta.inject.Singleton";

    fn graph() -> InMemorySymbolGraph {
        InMemorySymbolGraph::new()
            .class("java.lang.String", ClassKind::Class)
            .class("com.example.Repo", ClassKind::Class)
            .class("com.example.Service", ClassKind::Class)
            .annotate(&SymbolRef::class("com.example.Service"), SINGLETON)
            .constructor(
                "com.example.Service",
                vec![(Some("repo"), TypeRef::declared(SymbolRef::class("com.example.Repo")))],
            )
            .method(
                "com.example.Service",
                "run",
                TypeRef::declared(SymbolRef::class("java.lang.String")),
                vec![],
            )
            .stereotype(
                &SymbolRef::function("com.example.Service#run#1"),
                "io.micronaut.context.annotation.Executable",
            )
    }

    fn visit(graph: &InMemorySymbolGraph, class: &str) -> Vec<Box<dyn BeanArtifact>> {
        let config = ProcessorConfig::default();
        let factory = ElementFactory::new(graph, graph, &config);
        let diagnostics = DiagnosticSink::default();
        let context = VisitorContext::new(&factory, &diagnostics);
        let element = factory.new_class_element(&SymbolRef::class(class)).unwrap();
        DefinitionVisitor::new().visit(&element, &context).unwrap()
    }

    #[test]
    fn test_bean_class_gets_constructor_and_executable_methods() {
        let graph = graph();
        let artifacts = visit(&graph, "com.example.Service");
        assert_eq!(artifacts.len(), 1);

        let definition = artifacts[0]
            .as_any()
            .downcast_ref::<BeanDefinition>()
            .unwrap();
        assert_eq!(definition.injection_points(), vec!["repo"]);
        assert_eq!(definition.executable_methods().len(), 1);
        assert!(artifacts[0].requires_method_processing());
        assert!(!definition.is_introduction());
    }

    #[test]
    fn test_class_without_stereotype_is_not_a_bean() {
        let graph = graph();
        assert!(visit(&graph, "com.example.Repo").is_empty());
    }

    #[test]
    fn test_interface_becomes_introduction() {
        let graph = graph().class("com.example.Client", ClassKind::Interface);
        let artifacts = visit(&graph, "com.example.Client");
        let definition = artifacts[0]
            .as_any()
            .downcast_ref::<BeanDefinition>()
            .unwrap();
        assert!(definition.is_introduction());
        assert!(definition.constructor().is_none());
    }

    #[test]
    fn test_private_constructor_is_skipped_when_ambiguous() {
        let graph = graph().constructor("com.example.Service", vec![]);
        let members = graph.members("com.example.Service");
        let graph = graph.function_modifiers(&members[0], &[Modifier::Private]);

        let artifacts = visit(&graph, "com.example.Service");
        let definition = artifacts[0]
            .as_any()
            .downcast_ref::<BeanDefinition>()
            .unwrap();
        assert!(definition.injection_points().is_empty());
    }

    #[test]
    fn test_definition_is_frozen_after_visit_end() {
        let graph = graph();
        let mut artifacts = visit(&graph, "com.example.Service");
        artifacts[0].visit_end();

        let definition = artifacts[0]
            .as_any()
            .downcast_ref::<BeanDefinition>()
            .unwrap();
        assert!(definition.is_ended());
        let mut copy = definition.clone();
        assert!(matches!(
            copy.set_introduction(true),
            Err(BeanscopeError::Frozen(_))
        ));
    }
}
