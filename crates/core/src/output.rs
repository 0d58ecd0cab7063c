//! Artifacts produced by visitors and the sink they are written to.

use crate::error::Result;
use beanscope_api::AnnotationMetadata;
use serde::Serialize;
use smol_str::SmolStr;
use std::any::Any;
use std::fmt::Debug;

/// A bean-definition artifact. Opaque to the pipeline apart from the queries
/// finalization needs.
pub trait BeanArtifact: Debug {
    /// Qualified name of the bean type.
    fn bean_type(&self) -> &str;

    fn requires_method_processing(&self) -> bool;

    fn annotation_metadata(&self) -> &dyn AnnotationMetadata;

    /// Ends mutation. Called exactly once, before the artifact reaches the sink.
    fn visit_end(&mut self);

    /// Cast to Any for downcasting to concrete types.
    fn as_any(&self) -> &dyn Any;
}

/// The lightweight record emitted ahead of each artifact.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BeanReference {
    pub bean_type: SmolStr,
    pub requires_method_processing: bool,
    pub context_scope: bool,
}

pub trait OutputSink {
    fn accept_reference(&mut self, reference: &BeanReference) -> Result<()>;

    fn accept_definition(&mut self, artifact: &dyn BeanArtifact) -> Result<()>;

    /// Flush everything written so far. Called at most once per build, and
    /// only when something was written.
    fn finish(&mut self) -> Result<()>;
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum SinkEvent {
    Reference(BeanReference),
    Definition { bean_type: SmolStr },
}

/// Keeps everything it receives in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<SinkEvent>,
    pub finish_calls: usize,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn references(&self) -> Vec<&BeanReference> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Reference(reference) => Some(reference),
                SinkEvent::Definition { .. } => None,
            })
            .collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.events)?)
    }
}

impl OutputSink for RecordingSink {
    fn accept_reference(&mut self, reference: &BeanReference) -> Result<()> {
        self.events.push(SinkEvent::Reference(reference.clone()));
        Ok(())
    }

    fn accept_definition(&mut self, artifact: &dyn BeanArtifact) -> Result<()> {
        self.events.push(SinkEvent::Definition {
            bean_type: SmolStr::new(artifact.bean_type()),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finish_calls += 1;
        Ok(())
    }
}
