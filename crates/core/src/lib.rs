pub mod config;
pub mod diagnostics;
pub mod discovery;
pub mod element;
pub mod error;
pub mod factory;
pub mod logging;
pub mod output;
pub mod processor;
pub mod visitor;

pub use config::ProcessorConfig;
pub use diagnostics::{Diagnostic, Severity};
pub use discovery::{Discovery, DiscoveryOutcome, ExclusionReason};
pub use element::{
    ClassElement, ConstructorElement, Element, GenericPlaceholderElement, MethodElement,
    ParameterElement, TypeArguments,
};
pub use error::{BeanscopeError, DeclarationFailure, Result};
pub use factory::ElementFactory;
pub use logging::{LogOptions, init_logging};
pub use output::{BeanArtifact, BeanReference, OutputSink, RecordingSink, SinkEvent};
pub use processor::{BeanDefinitionProcessor, ProcessingRound, RoundReport};
pub use visitor::{BeanCandidateVisitor, BeanDefinition, DefinitionVisitor, VisitorContext};
