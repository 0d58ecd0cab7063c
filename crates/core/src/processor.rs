//! The processing session: rounds in, artifacts out.

use crate::config::ProcessorConfig;
use crate::diagnostics::{Diagnostic, DiagnosticSink, Severity};
use crate::discovery::{Discovery, ExclusionReason};
use crate::error::{BeanscopeError, DeclarationFailure, Result};
use crate::factory::ElementFactory;
use crate::output::{BeanArtifact, BeanReference, OutputSink};
use crate::visitor::{BeanCandidateVisitor, DefinitionVisitor, VisitorContext};
use beanscope_api::{AnnotationMetadataProvider, CompilationUnit, SymbolGraph, UnitProvider};
use indexmap::IndexMap;
use serde::Serialize;
use smol_str::SmolStr;

/// Summary of one `process` call.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundReport {
    pub round: usize,
    pub declarations: usize,
    pub excluded: IndexMap<ExclusionReason, usize>,
    pub candidates: usize,
    pub artifacts: usize,
    pub failures: usize,
}

/// State that lives for exactly one round. The element cache goes away with it.
pub struct ProcessingRound<'a> {
    number: usize,
    factory: ElementFactory<'a>,
}

impl<'a> ProcessingRound<'a> {
    pub fn new(
        number: usize,
        host: &'a dyn SymbolGraph,
        annotations: &'a dyn AnnotationMetadataProvider,
        config: &'a ProcessorConfig,
        units: &[CompilationUnit],
    ) -> Self {
        Self {
            number,
            factory: ElementFactory::new(host, annotations, config).with_units(units),
        }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn factory(&self) -> &ElementFactory<'a> {
        &self.factory
    }
}

/// Runs discovery and the visitor once per round and keeps the produced
/// artifacts, in production order, until [`finish`](Self::finish).
pub struct BeanDefinitionProcessor<V: BeanCandidateVisitor = DefinitionVisitor> {
    config: ProcessorConfig,
    visitor: V,
    artifacts: Vec<Box<dyn BeanArtifact>>,
    diagnostics: Vec<Diagnostic>,
    failures: Vec<DeclarationFailure>,
    rounds: usize,
}

impl BeanDefinitionProcessor<DefinitionVisitor> {
    pub fn with_config(config: ProcessorConfig) -> Self {
        Self::new(config, DefinitionVisitor::new())
    }
}

impl<V: BeanCandidateVisitor> BeanDefinitionProcessor<V> {
    pub fn new(config: ProcessorConfig, visitor: V) -> Self {
        Self {
            config,
            visitor,
            artifacts: Vec::new(),
            diagnostics: Vec::new(),
            failures: Vec::new(),
            rounds: 0,
        }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    pub fn visitor(&self) -> &V {
        &self.visitor
    }

    /// Artifacts waiting for [`finish`](Self::finish).
    pub fn pending(&self) -> &[Box<dyn BeanArtifact>] {
        &self.artifacts
    }

    /// Diagnostics from every round so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Declarations that were skipped because they failed to resolve or visit.
    pub fn failures(&self) -> &[DeclarationFailure] {
        &self.failures
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Process every compilation unit the host currently exposes.
    pub fn process(
        &mut self,
        host: &dyn SymbolGraph,
        annotations: &dyn AnnotationMetadataProvider,
    ) -> Result<RoundReport> {
        let units = host.compilation_units();
        self.process_units(host, annotations, &units)
    }

    pub fn process_units(
        &mut self,
        host: &dyn SymbolGraph,
        annotations: &dyn AnnotationMetadataProvider,
        units: &[CompilationUnit],
    ) -> Result<RoundReport> {
        self.rounds += 1;
        let round = ProcessingRound::new(self.rounds, host, annotations, &self.config, units);
        let diagnostics = DiagnosticSink::default();

        let outcome = Discovery::new(&self.config).discover(round.factory(), units);
        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(error) => {
                diagnostics.report(Severity::Error, error.to_string(), None);
                self.diagnostics.extend(diagnostics.take());
                return Err(error);
            }
        };

        let mut report = RoundReport {
            round: round.number(),
            declarations: outcome.seen,
            candidates: outcome.candidates.len(),
            ..RoundReport::default()
        };
        for (_, reason) in &outcome.excluded {
            *report.excluded.entry(*reason).or_insert(0) += 1;
        }
        for failure in outcome.failures {
            diagnostics.report(
                Severity::Error,
                failure.error.to_string(),
                Some(&failure.declaration),
            );
            self.failures.push(failure);
            report.failures += 1;
        }

        let context = VisitorContext::new(round.factory(), &diagnostics);
        for candidate in &outcome.candidates {
            let errors_before = diagnostics.error_count();
            let visited = match self.visitor.visit(candidate, &context) {
                Ok(_) if diagnostics.error_count() > errors_before => {
                    let message = diagnostics.last_error().unwrap_or_default();
                    Err(BeanscopeError::Rejected(message))
                }
                other => other,
            };

            match visited {
                Ok(artifacts) => {
                    report.artifacts += artifacts.len();
                    self.artifacts.extend(artifacts);
                }
                Err(error) if self.config.fail_fast => {
                    self.diagnostics.extend(diagnostics.take());
                    return Err(error);
                }
                Err(error) => {
                    tracing::warn!("skipping {}: {}", candidate.name(), error);
                    if !matches!(error, BeanscopeError::Rejected(_)) {
                        diagnostics.report(
                            Severity::Error,
                            error.to_string(),
                            Some(candidate.symbol()),
                        );
                    }
                    self.failures
                        .push(DeclarationFailure::new(candidate.symbol().clone(), error));
                    report.failures += 1;
                }
            }
        }

        tracing::info!(
            "round {}: {} declarations, {} candidates, {} artifacts, {} failures ({} elements cached)",
            report.round,
            report.declarations,
            report.candidates,
            report.artifacts,
            report.failures,
            round.factory().cached_elements()
        );
        self.diagnostics.extend(diagnostics.take());
        Ok(report)
    }

    /// Write every pending artifact to `sink`, each preceded by its reference
    /// record, then flush the sink once. Returns the number of artifacts written.
    /// Nothing is flushed when nothing was pending.
    pub fn finish(&mut self, sink: &mut dyn OutputSink) -> Result<usize> {
        let artifacts = std::mem::take(&mut self.artifacts);
        let written = artifacts.len();

        for mut artifact in artifacts {
            let reference = BeanReference {
                bean_type: SmolStr::new(artifact.bean_type()),
                requires_method_processing: artifact.requires_method_processing(),
                context_scope: artifact
                    .annotation_metadata()
                    .has_declared_annotation(&self.config.context_scope_annotation),
            };
            artifact.visit_end();
            sink.accept_reference(&reference).map_err(sink_error)?;
            sink.accept_definition(artifact.as_ref()).map_err(sink_error)?;
        }

        if written > 0 {
            sink.finish().map_err(sink_error)?;
        }
        tracing::info!("wrote {} bean definitions", written);
        Ok(written)
    }
}

fn sink_error(error: BeanscopeError) -> BeanscopeError {
    tracing::error!("output sink failed: {}", error);
    match error {
        BeanscopeError::Sink(_) => error,
        other => BeanscopeError::Sink(other.to_string()),
    }
}
