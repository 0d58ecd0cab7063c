mod common;

use beanscope_api::{ClassKind, InMemorySymbolGraph, SymbolRef};
use beanscope_core::{
    BeanArtifact, BeanDefinition, BeanDefinitionProcessor, BeanReference, BeanscopeError,
    OutputSink, ProcessorConfig, RecordingSink, SinkEvent,
};
use common::*;

fn beans() -> InMemorySymbolGraph {
    let eager = SymbolRef::class("com.example.Eager");
    let worker = SymbolRef::class("com.example.Worker");
    jdk()
        .class("com.example.Eager", ClassKind::Class)
        .annotate(&eager, SINGLETON)
        .annotate(&eager, CONTEXT)
        .constructor("com.example.Eager", vec![])
        .class("com.example.Worker", ClassKind::Class)
        .annotate(&worker, SINGLETON)
        .constructor("com.example.Worker", vec![(Some("name"), declared(STRING))])
        .method("com.example.Worker", "work", declared(STRING), vec![])
        .stereotype(&SymbolRef::function("com.example.Worker#work#1"), EXECUTABLE)
        .unit(
            "src/main/kotlin/com/example/Beans.kt",
            &["com.example.Eager", "com.example.Worker"],
        )
}

#[test]
fn test_finish_without_artifacts_never_flushes() {
    let graph = jdk().unit("src/Empty.kt", &[]);
    let mut processor = BeanDefinitionProcessor::with_config(ProcessorConfig::default());
    processor.process(&graph, &graph).unwrap();

    let mut sink = RecordingSink::new();
    assert_eq!(processor.finish(&mut sink).unwrap(), 0);
    assert_eq!(sink.finish_calls, 0);
    assert!(sink.events.is_empty());
}

#[test]
fn test_finish_emits_reference_then_definition_in_order() {
    let graph = beans();
    let mut processor = BeanDefinitionProcessor::with_config(ProcessorConfig::default());
    processor.process(&graph, &graph).unwrap();

    let mut sink = RecordingSink::new();
    assert_eq!(processor.finish(&mut sink).unwrap(), 2);
    assert_eq!(sink.finish_calls, 1);
    assert_eq!(
        sink.events,
        vec![
            SinkEvent::Reference(BeanReference {
                bean_type: "com.example.Eager".into(),
                requires_method_processing: false,
                context_scope: true,
            }),
            SinkEvent::Definition {
                bean_type: "com.example.Eager".into()
            },
            SinkEvent::Reference(BeanReference {
                bean_type: "com.example.Worker".into(),
                requires_method_processing: true,
                context_scope: false,
            }),
            SinkEvent::Definition {
                bean_type: "com.example.Worker".into()
            },
        ]
    );
    assert!(processor.pending().is_empty());

    let json = sink.to_json().unwrap();
    assert!(json.contains(r#""event":"reference""#));

    assert_eq!(processor.finish(&mut sink).unwrap(), 0);
    assert_eq!(sink.finish_calls, 1);
}

/// Checks that every artifact is ended before it is written.
#[derive(Default)]
struct EndedCheckingSink {
    written: usize,
}

impl OutputSink for EndedCheckingSink {
    fn accept_reference(&mut self, _reference: &BeanReference) -> beanscope_core::Result<()> {
        Ok(())
    }

    fn accept_definition(&mut self, artifact: &dyn BeanArtifact) -> beanscope_core::Result<()> {
        let definition = artifact
            .as_any()
            .downcast_ref::<BeanDefinition>()
            .ok_or_else(|| BeanscopeError::Sink("unexpected artifact".into()))?;
        assert!(definition.is_ended());
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> beanscope_core::Result<()> {
        Ok(())
    }
}

#[test]
fn test_artifacts_are_ended_before_writing() {
    let graph = beans();
    let mut processor = BeanDefinitionProcessor::with_config(ProcessorConfig::default());
    processor.process(&graph, &graph).unwrap();

    let mut sink = EndedCheckingSink::default();
    processor.finish(&mut sink).unwrap();
    assert_eq!(sink.written, 2);
}

struct FailingSink;

impl OutputSink for FailingSink {
    fn accept_reference(&mut self, _reference: &BeanReference) -> beanscope_core::Result<()> {
        Err(BeanscopeError::Io(std::io::Error::other("disk full")))
    }

    fn accept_definition(&mut self, _artifact: &dyn BeanArtifact) -> beanscope_core::Result<()> {
        Ok(())
    }

    fn finish(&mut self) -> beanscope_core::Result<()> {
        Ok(())
    }
}

#[test]
fn test_sink_failure_is_fatal() {
    let graph = beans();
    let mut processor = BeanDefinitionProcessor::with_config(ProcessorConfig::default());
    processor.process(&graph, &graph).unwrap();

    let result = processor.finish(&mut FailingSink);
    assert!(matches!(result, Err(BeanscopeError::Sink(_))));
}
