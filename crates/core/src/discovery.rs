//! Discovery and filtering: which declarations reach the visitor.
//!
//! Declarations are walked in unit order, then declaration order within each
//! unit. A declaration is dropped when any of these hold:
//!
//! 1. it carries the generated-code marker;
//! 2. it is not a class-like declaration;
//! 3. it is an inner class that is not static;
//! 4. it is an annotation type;
//! 5. it is an interface with neither the introduction nor the
//!    configuration-reader stereotype.
//!
//! Everything else is a candidate, in discovery order.

use crate::config::ProcessorConfig;
use crate::element::ClassElement;
use crate::error::{DeclarationFailure, Result};
use crate::factory::ElementFactory;
use beanscope_api::{CompilationUnit, DeclarationProvider, SymbolRef};
use serde::Serialize;
use std::fmt;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    Generated,
    NotAClass,
    NonStaticInner,
    Annotation,
    PlainInterface,
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            ExclusionReason::Generated => "generated code",
            ExclusionReason::NotAClass => "not a class",
            ExclusionReason::NonStaticInner => "non-static inner class",
            ExclusionReason::Annotation => "annotation type",
            ExclusionReason::PlainInterface => "interface without introduction advice",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Default)]
pub struct DiscoveryOutcome {
    /// Declarations walked, including excluded and failed ones.
    pub seen: usize,
    pub candidates: Vec<ClassElement>,
    pub excluded: Vec<(SymbolRef, ExclusionReason)>,
    pub failures: Vec<DeclarationFailure>,
}

pub struct Discovery<'c> {
    config: &'c ProcessorConfig,
}

impl<'c> Discovery<'c> {
    pub fn new(config: &'c ProcessorConfig) -> Self {
        Self { config }
    }

    /// Walk `units` and split their declarations into candidates, exclusions
    /// and failures. With `fail_fast` the first failure is returned as the error.
    pub fn discover(
        &self,
        factory: &ElementFactory<'_>,
        units: &[CompilationUnit],
    ) -> Result<DiscoveryOutcome> {
        let mut outcome = DiscoveryOutcome::default();

        for symbol in units.iter().flat_map(|unit| unit.declarations.iter()) {
            outcome.seen += 1;

            if !symbol.is_class() {
                self.exclude(&mut outcome, symbol, ExclusionReason::NotAClass);
                continue;
            }
            if self.is_generated(factory, symbol) {
                self.exclude(&mut outcome, symbol, ExclusionReason::Generated);
                continue;
            }

            let element = match factory.new_class_element(symbol) {
                Ok(element) => element,
                Err(error) if self.config.fail_fast => return Err(error),
                Err(error) => {
                    tracing::warn!("skipping {}: {}", symbol, error);
                    outcome
                        .failures
                        .push(DeclarationFailure::new(symbol.clone(), error));
                    continue;
                }
            };

            match self.classify(&element) {
                Some(reason) => self.exclude(&mut outcome, symbol, reason),
                None => {
                    tracing::debug!("candidate {}", element.name());
                    outcome.candidates.push(element);
                }
            }
        }

        Ok(outcome)
    }

    /// The rule that excludes `class`, if any. Generated-code detection needs
    /// the raw declaration and happens before this.
    pub fn classify(&self, class: &ClassElement) -> Option<ExclusionReason> {
        if class.is_inner() && !class.is_static() {
            return Some(ExclusionReason::NonStaticInner);
        }
        if class.is_annotation() {
            return Some(ExclusionReason::Annotation);
        }
        if class.is_interface()
            && !class.has_stereotype(&self.config.introduction_stereotype)
            && !class.has_stereotype(&self.config.configuration_reader_stereotype)
        {
            return Some(ExclusionReason::PlainInterface);
        }
        None
    }

    fn is_generated(&self, factory: &ElementFactory<'_>, symbol: &SymbolRef) -> bool {
        factory
            .host()
            .class_declaration(symbol)
            .is_some_and(|declaration| {
                declaration
                    .annotations
                    .iter()
                    .any(|annotation| self.config.is_generated_marker(annotation.simple_name()))
            })
    }

    fn exclude(&self, outcome: &mut DiscoveryOutcome, symbol: &SymbolRef, reason: ExclusionReason) {
        tracing::trace!("excluding {}: {}", symbol, reason);
        outcome.excluded.push((symbol.clone(), reason));
    }
}
