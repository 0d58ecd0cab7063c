//! Processor configuration.
//!
//! Every annotation the pipeline reacts to is configurable so the processor
//! can be pointed at a framework other than the default one. Hosts usually
//! pass the config as processor options; [`ProcessorConfig::load`] reads the
//! same shape from a JSON file.

use crate::error::{BeanscopeError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Name reported for unbounded type variables and unresolvable types.
    pub top_type: String,
    /// Simple name of the marker placed on generated code.
    pub generated_marker: String,
    pub introduction_stereotype: String,
    pub configuration_reader_stereotype: String,
    /// Declared on a bean to request eager, context-scoped initialization.
    pub context_scope_annotation: String,
    pub inject_annotation: String,
    pub executable_stereotype: String,
    /// Stereotypes that make a class a bean.
    pub bean_stereotypes: Vec<String>,
    /// Abort the whole round on the first declaration failure instead of
    /// skipping the failing declaration.
    pub fail_fast: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            top_type: "java.lang.Object".to_string(),
            generated_marker: "Generated".to_string(),
            introduction_stereotype: "io.micronaut.aop.Introduction".to_string(),
            configuration_reader_stereotype: "io.micronaut.context.annotation.ConfigurationReader"
                .to_string(),
            context_scope_annotation: "io.micronaut.context.annotation.Context".to_string(),
            inject_annotation: "jakarta.inject.Inject".to_string(),
            executable_stereotype: "io.micronaut.context.annotation.Executable".to_string(),
            bean_stereotypes: vec![
                "io.micronaut.context.annotation.Bean".to_string(),
                "jakarta.inject.Scope".to_string(),
                "jakarta.inject.Singleton".to_string(),
            ],
            fail_fast: false,
        }
    }
}

impl ProcessorConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        let required = [
            ("top_type", &self.top_type),
            ("generated_marker", &self.generated_marker),
            ("introduction_stereotype", &self.introduction_stereotype),
            (
                "configuration_reader_stereotype",
                &self.configuration_reader_stereotype,
            ),
            ("context_scope_annotation", &self.context_scope_annotation),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(BeanscopeError::Config(format!("`{}` must not be empty", field)));
            }
        }
        Ok(())
    }

    /// True when an annotation with this simple name is the generated-code marker.
    pub fn is_generated_marker(&self, simple_name: &str) -> bool {
        simple_name == self.generated_marker
            || self
                .generated_marker
                .rsplit('.')
                .next()
                .is_some_and(|simple| simple == simple_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ProcessorConfig::from_json_str(r#"{ "top_type": "kotlin.Any" }"#).unwrap();
        assert_eq!(config.top_type, "kotlin.Any");
        assert_eq!(config.generated_marker, "Generated");
        assert!(!config.fail_fast);
    }

    #[test]
    fn test_empty_top_type_rejected() {
        let err = ProcessorConfig::from_json_str(r#"{ "top_type": "  " }"#).unwrap_err();
        assert!(matches!(err, BeanscopeError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "fail_fast": true, "generated_marker": "my.Generated" }}"#).unwrap();

        let config = ProcessorConfig::load(file.path()).unwrap();
        assert!(config.fail_fast);
        assert!(config.is_generated_marker("Generated"));
        assert!(config.is_generated_marker("my.Generated"));
        assert!(!config.is_generated_marker("Other"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProcessorConfig::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, BeanscopeError::Io(_)));
    }
}
