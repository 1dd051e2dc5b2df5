//! Template engine based on MiniJinja

use std::path::Path;

use imprint_core::Values;
use minijinja::Environment;

use crate::error::{EngineError, Result};
use crate::filters;

/// Template engine builder
pub struct EngineBuilder {
    strict_mode: bool,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self { strict_mode: true }
    }

    /// Set strict mode (fail on undefined variables)
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict_mode = strict;
        self
    }

    pub fn build(self) -> Engine {
        Engine::new(self.strict_mode)
    }
}

/// The template engine
///
/// The attribute tree is the template root, so a config's top-level keys map
/// directly to placeholder names: `{"name": "demo"}` renders `{{ name }}`.
pub struct Engine {
    strict_mode: bool,
}

impl Engine {
    pub fn new(strict_mode: bool) -> Self {
        Self { strict_mode }
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    fn create_environment(&self) -> Environment<'static> {
        let mut env = Environment::new();

        if self.strict_mode {
            env.set_undefined_behavior(minijinja::UndefinedBehavior::Strict);
        } else {
            env.set_undefined_behavior(minijinja::UndefinedBehavior::Lenient);
        }

        env.add_filter("quote", filters::quote);
        env.add_filter("b64encode", filters::b64encode);

        env
    }

    /// Render a single template source against the attribute tree
    pub fn render_str(&self, name: &str, source: &str, values: &Values) -> Result<String> {
        let mut env = self.create_environment();

        env.add_template_owned(name.to_string(), source.to_string())
            .map_err(|e| EngineError::from_minijinja(e, name))?;

        let tmpl = env
            .get_template(name)
            .map_err(|e| EngineError::from_minijinja(e, name))?;

        let ctx = minijinja::Value::from_serialize(values.inner());
        tmpl.render(ctx)
            .map_err(|e| EngineError::from_minijinja(e, name))
    }

    /// Render a template file into an output file.
    ///
    /// The rendered text is produced in full before the output file is
    /// touched, and a failing write removes whatever was partially written,
    /// so no failure mode leaves a corrupt artifact on disk.
    pub fn render_to_file(
        &self,
        template_path: &Path,
        values: &Values,
        output_path: &Path,
    ) -> Result<()> {
        let name = template_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| template_path.display().to_string());
        let source = std::fs::read_to_string(template_path)?;

        let rendered = self.render_str(&name, &source, values)?;

        if let Err(e) = std::fs::write(output_path, &rendered) {
            let _ = std::fs::remove_file(output_path);
            return Err(e.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn demo_values() -> Values {
        Values::from_json(r#"{"name": "demo", "namespace": "staging", "replicas": 3}"#).unwrap()
    }

    #[test]
    fn test_render_top_level_keys() {
        let engine = Engine::builder().build();
        let out = engine
            .render_str(
                "service.yaml",
                "name: {{ name }}\nnamespace: {{ namespace }}",
                &demo_values(),
            )
            .unwrap();
        assert_eq!(out, "name: demo\nnamespace: staging");
    }

    #[test]
    fn test_render_is_deterministic() {
        let engine = Engine::builder().build();
        let template = "app: {{ name | upper }} x{{ replicas }}";
        let first = engine
            .render_str("a.yaml", template, &demo_values())
            .unwrap();
        let second = engine
            .render_str("a.yaml", template, &demo_values())
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_filter_library() {
        let engine = Engine::builder().build();
        let out = engine
            .render_str(
                "f.yaml",
                "{{ name | upper }} {{ name | lower }} {{ name | quote }} {{ name | b64encode }}",
                &demo_values(),
            )
            .unwrap();
        assert_eq!(out, "DEMO demo \"demo\" ZGVtbw==");
    }

    #[test]
    fn test_undefined_key_is_execution_error() {
        let engine = Engine::builder().build();
        let err = engine
            .render_str("bad.yaml", "value: {{ missing_key }}", &demo_values())
            .unwrap_err();
        assert!(matches!(err, EngineError::Execution { .. }));
    }

    #[test]
    fn test_malformed_placeholder_is_syntax_error() {
        let engine = Engine::builder().build();
        let err = engine
            .render_str("bad.yaml", "value: {{ name", &demo_values())
            .unwrap_err();
        assert!(matches!(err, EngineError::Syntax { .. }));
    }

    #[test]
    fn test_render_to_file_writes_output() {
        let dir = tempdir().unwrap();
        let template = dir.path().join("service.yaml");
        std::fs::write(&template, "name: {{ name }}").unwrap();
        let output = dir.path().join("out.yaml");

        let engine = Engine::builder().build();
        engine
            .render_to_file(&template, &demo_values(), &output)
            .unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "name: demo");
    }

    #[test]
    fn test_failed_render_leaves_no_file() {
        let dir = tempdir().unwrap();
        let template = dir.path().join("service.yaml");
        std::fs::write(&template, "name: {{ absent }}").unwrap();
        let output = dir.path().join("out.yaml");

        let engine = Engine::builder().build();
        let err = engine
            .render_to_file(&template, &demo_values(), &output)
            .unwrap_err();
        assert!(err.is_template_failure());
        assert!(!output.exists());
    }

    #[test]
    fn test_lenient_mode_renders_blank() {
        let engine = Engine::builder().strict(false).build();
        let out = engine
            .render_str("l.yaml", "value: {{ absent }}", &demo_values())
            .unwrap();
        assert_eq!(out, "value: ");
    }
}
