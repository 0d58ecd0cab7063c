mod common;

use beanscope_api::{ClassKind, InMemorySymbolGraph, Modifier, SymbolRef};
use beanscope_core::{
    BeanArtifact, BeanCandidateVisitor, BeanDefinitionProcessor, BeanscopeError, ClassElement,
    ExclusionReason, ProcessorConfig, VisitorContext,
};
use common::*;
use std::any::Any;

/// Records every class it is shown and produces one marker artifact each.
#[derive(Default)]
struct Recorder {
    seen: Vec<String>,
}

#[derive(Debug)]
struct Marker(String);

impl BeanArtifact for Marker {
    fn bean_type(&self) -> &str {
        &self.0
    }
    fn requires_method_processing(&self) -> bool {
        false
    }
    fn annotation_metadata(&self) -> &dyn beanscope_api::AnnotationMetadata {
        &beanscope_api::EmptyAnnotationMetadata
    }
    fn visit_end(&mut self) {}
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl BeanCandidateVisitor for Recorder {
    fn visit(
        &mut self,
        class: &ClassElement,
        _context: &VisitorContext<'_>,
    ) -> beanscope_core::Result<Vec<Box<dyn BeanArtifact>>> {
        self.seen.push(class.name().to_string());
        Ok(vec![Box::new(Marker(class.name().to_string()))])
    }
}

fn scenario() -> InMemorySymbolGraph {
    let client = SymbolRef::class("com.example.Client");
    let settings = SymbolRef::class("com.example.Settings");
    let proxy = SymbolRef::class("com.example.Service$Intercepted");
    jdk()
        .class("com.example.Service", ClassKind::Class)
        .nested(
            "com.example.Service",
            "com.example.Service.Inner",
            ClassKind::Class,
            &[Modifier::Inner],
        )
        .nested(
            "com.example.Service",
            "com.example.Service.Builder",
            ClassKind::Class,
            &[Modifier::Static],
        )
        .class("com.example.Qualifier", ClassKind::Annotation)
        .class("com.example.Plain", ClassKind::Interface)
        .class("com.example.Client", ClassKind::Interface)
        .stereotype(&client, INTRODUCTION)
        .class("com.example.Settings", ClassKind::Interface)
        .stereotype(&settings, CONFIGURATION_READER)
        .class("com.example.Service$Intercepted", ClassKind::Class)
        .annotate(&proxy, "io.micronaut.core.annotation.Generated")
        .stereotype(&proxy, INTRODUCTION)
        .unit(
            "src/main/kotlin/com/example/Service.kt",
            &[
                "com.example.Service",
                "com.example.Service.Inner",
                "com.example.Service.Builder",
                "com.example.Qualifier",
            ],
        )
        .unit(
            "src/main/kotlin/com/example/Client.kt",
            &[
                "com.example.Plain",
                "com.example.Client",
                "com.example.Settings",
                "com.example.Service$Intercepted",
            ],
        )
}

#[test]
fn test_filtering_and_order() {
    let graph = scenario();
    let mut processor = BeanDefinitionProcessor::new(ProcessorConfig::default(), Recorder::default());
    let report = processor.process(&graph, &graph).unwrap();

    assert_eq!(
        processor.visitor().seen,
        vec![
            "com.example.Service",
            "com.example.Service.Builder",
            "com.example.Client",
            "com.example.Settings",
        ]
    );
    let pending: Vec<&str> = processor.pending().iter().map(|a| a.bean_type()).collect();
    assert_eq!(pending, processor.visitor().seen);

    assert_eq!(report.round, 1);
    assert_eq!(report.declarations, 8);
    assert_eq!(report.candidates, 4);
    assert_eq!(report.artifacts, 4);
    assert_eq!(report.excluded.get(&ExclusionReason::NonStaticInner), Some(&1));
    assert_eq!(report.excluded.get(&ExclusionReason::Annotation), Some(&1));
    assert_eq!(report.excluded.get(&ExclusionReason::PlainInterface), Some(&1));
    assert_eq!(report.excluded.get(&ExclusionReason::Generated), Some(&1));
}

#[test]
fn test_generated_declarations_are_skipped_in_later_rounds() {
    let first = scenario();
    let mut processor = BeanDefinitionProcessor::new(ProcessorConfig::default(), Recorder::default());
    processor.process(&first, &first).unwrap();

    let generated = SymbolRef::class("com.example.$ServiceDefinition");
    let second = jdk()
        .class("com.example.$ServiceDefinition", ClassKind::Class)
        .annotate(&generated, "javax.annotation.processing.Generated")
        .class("com.example.Later", ClassKind::Class)
        .unit(
            "build/generated/ServiceDefinition.java",
            &["com.example.$ServiceDefinition", "com.example.Later"],
        );
    let report = processor.process(&second, &second).unwrap();

    assert_eq!(report.round, 2);
    assert_eq!(report.candidates, 1);
    assert_eq!(processor.rounds(), 2);
    assert_eq!(processor.pending().len(), 5);
    assert_eq!(processor.pending()[4].bean_type(), "com.example.Later");
}

fn broken_graph() -> InMemorySymbolGraph {
    jdk()
        .class("com.example.Broken", ClassKind::Class)
        .annotate(&SymbolRef::class("com.example.Broken"), SINGLETON)
        .constructor("com.example.Broken", vec![(None, declared(STRING))])
        .class("com.example.Healthy", ClassKind::Class)
        .annotate(&SymbolRef::class("com.example.Healthy"), SINGLETON)
        .constructor("com.example.Healthy", vec![(Some("name"), declared(STRING))])
        .unit(
            "src/main/kotlin/com/example/Beans.kt",
            &["com.example.Broken", "com.example.Healthy"],
        )
}

#[test]
fn test_missing_identifier_only_aborts_its_declaration() {
    let graph = broken_graph();
    let mut processor = BeanDefinitionProcessor::with_config(ProcessorConfig::default());
    let report = processor.process(&graph, &graph).unwrap();

    assert_eq!(report.failures, 1);
    assert_eq!(report.artifacts, 1);
    assert_eq!(processor.pending()[0].bean_type(), "com.example.Healthy");

    let failure = &processor.failures()[0];
    assert_eq!(failure.declaration, SymbolRef::class("com.example.Broken"));
    assert!(matches!(
        failure.error,
        BeanscopeError::MissingIdentifier { .. }
    ));
    assert_eq!(processor.diagnostics().len(), 1);
}

#[test]
fn test_fail_fast_aborts_the_round() {
    let graph = broken_graph();
    let config = ProcessorConfig {
        fail_fast: true,
        ..ProcessorConfig::default()
    };
    let mut processor = BeanDefinitionProcessor::with_config(config);
    let result = processor.process(&graph, &graph);

    assert!(matches!(
        result,
        Err(BeanscopeError::MissingIdentifier { .. })
    ));
    assert!(processor.pending().is_empty());
}

struct Rejecting;

impl BeanCandidateVisitor for Rejecting {
    fn visit(
        &mut self,
        class: &ClassElement,
        context: &VisitorContext<'_>,
    ) -> beanscope_core::Result<Vec<Box<dyn BeanArtifact>>> {
        context.fail("beans must not be named Service", Some(class.symbol()));
        Ok(vec![Box::new(Marker(class.name().to_string()))])
    }
}

#[test]
fn test_visitor_failure_drops_its_artifacts() {
    let graph = jdk()
        .class("com.example.Service", ClassKind::Class)
        .unit("src/Service.kt", &["com.example.Service"]);
    let mut processor = BeanDefinitionProcessor::new(ProcessorConfig::default(), Rejecting);
    let report = processor.process(&graph, &graph).unwrap();

    assert_eq!(report.artifacts, 0);
    assert_eq!(report.failures, 1);
    assert!(processor.pending().is_empty());
    assert!(matches!(
        &processor.failures()[0].error,
        BeanscopeError::Rejected(message) if message == "beans must not be named Service"
    ));
}

#[test]
fn test_kotlin_nested_classes_are_candidates() {
    let graph = jdk()
        .class("com.example.Module", ClassKind::Class)
        .nested("com.example.Module", "com.example.Module.Config", ClassKind::Class, &[])
        .nested(
            "com.example.Module",
            "com.example.Module.Session",
            ClassKind::Class,
            &[Modifier::Inner],
        )
        .unit(
            "src/main/kotlin/com/example/Module.kt",
            &[
                "com.example.Module",
                "com.example.Module.Config",
                "com.example.Module.Session",
            ],
        );
    let mut processor = BeanDefinitionProcessor::new(ProcessorConfig::default(), Recorder::default());
    let report = processor.process(&graph, &graph).unwrap();

    assert_eq!(
        processor.visitor().seen,
        vec!["com.example.Module", "com.example.Module.Config"]
    );
    assert_eq!(report.excluded.get(&ExclusionReason::NonStaticInner), Some(&1));
}
