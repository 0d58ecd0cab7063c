//! The seam between the discovery pipeline and bean-definition construction.

mod definition;

pub use definition::{BeanDefinition, DefinitionVisitor};

use crate::config::ProcessorConfig;
use crate::diagnostics::{DiagnosticSink, Severity};
use crate::element::ClassElement;
use crate::error::Result;
use crate::factory::ElementFactory;
use crate::output::BeanArtifact;
use beanscope_api::SymbolRef;

/// Turns one qualifying class into zero or more artifacts.
pub trait BeanCandidateVisitor {
    fn visit(
        &mut self,
        class: &ClassElement,
        context: &VisitorContext<'_>,
    ) -> Result<Vec<Box<dyn BeanArtifact>>>;
}

/// What a visitor may use while visiting: the round's factory, the config and
/// a place to report diagnostics.
pub struct VisitorContext<'a> {
    factory: &'a ElementFactory<'a>,
    diagnostics: &'a DiagnosticSink,
}

impl<'a> VisitorContext<'a> {
    pub fn new(factory: &'a ElementFactory<'a>, diagnostics: &'a DiagnosticSink) -> Self {
        Self {
            factory,
            diagnostics,
        }
    }

    pub fn factory(&self) -> &'a ElementFactory<'a> {
        self.factory
    }

    pub fn config(&self) -> &'a ProcessorConfig {
        self.factory.config()
    }

    pub fn class_element(&self, qualified_name: &str) -> Result<Option<ClassElement>> {
        self.factory.class_element_by_name(qualified_name)
    }

    pub fn info(&self, message: impl Into<String>, symbol: Option<&SymbolRef>) {
        self.diagnostics.report(Severity::Info, message, symbol);
    }

    pub fn warn(&self, message: impl Into<String>, symbol: Option<&SymbolRef>) {
        self.diagnostics.report(Severity::Warning, message, symbol);
    }

    /// Report an error. The declaration being visited is treated as failed
    /// and its artifacts are dropped.
    pub fn fail(&self, message: impl Into<String>, symbol: Option<&SymbolRef>) {
        self.diagnostics.report(Severity::Error, message, symbol);
    }
}
