//! Render pipeline: template execution plus wrapper/layout composition.
//!
//! Wrapping always happens before layout application, regardless of the
//! order the directives were configured. Both directives are standing
//! toggles: disabling one affects every subsequent render until it is
//! re-enabled with a new name.

use std::fs;
use std::path::Path;
use tracing::debug;

use super::engine::{Scope, SubstitutionEngine, TemplateEngine, CONTENT_VAR};
use super::resolver::PathResolver;
use crate::error::{Result, VerandaError};

/// Layout directive: the outermost template applied after wrapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutDirective {
    Named(String),
    Disabled,
}

/// Wrapper directive: templates applied innermost-first around content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WrapperDirective {
    Named(Vec<String>),
    Disabled,
}

/// The default layout name applied by a fresh pipeline.
pub const DEFAULT_LAYOUT: &str = "default";

/// Loads templates, executes them in a variable scope, and composes the
/// output through wrappers and a layout.
#[derive(Debug)]
pub struct RenderPipeline<E = SubstitutionEngine> {
    resolver: PathResolver,
    engine: E,
    layout: LayoutDirective,
    wrappers: WrapperDirective,
}

impl RenderPipeline<SubstitutionEngine> {
    /// Create a pipeline with the default substitution engine.
    pub fn new(resolver: PathResolver) -> Self {
        Self::with_engine(resolver, SubstitutionEngine)
    }
}

impl<E: TemplateEngine> RenderPipeline<E> {
    /// Create a pipeline with a custom engine. The layout defaults to
    /// `"default"`; wrapping starts disabled.
    pub fn with_engine(resolver: PathResolver, engine: E) -> Self {
        Self {
            resolver,
            engine,
            layout: LayoutDirective::Named(DEFAULT_LAYOUT.to_string()),
            wrappers: WrapperDirective::Disabled,
        }
    }

    /// The resolver used for templates, wrappers, and layouts.
    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Use a named layout for subsequent renders.
    pub fn use_layout(&mut self, name: impl Into<String>) -> &mut Self {
        self.layout = LayoutDirective::Named(name.into());
        self
    }

    /// Disable layout application for subsequent renders.
    pub fn use_layout_off(&mut self) -> &mut Self {
        self.layout = LayoutDirective::Disabled;
        self
    }

    /// Wrap subsequent renders with the named templates, innermost first.
    pub fn wrap_with<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.wrappers = WrapperDirective::Named(names.into_iter().map(Into::into).collect());
        self
    }

    /// Disable wrapping for subsequent renders.
    pub fn wrap_with_off(&mut self) -> &mut Self {
        self.wrappers = WrapperDirective::Disabled;
        self
    }

    /// The active layout directive.
    pub fn layout(&self) -> &LayoutDirective {
        &self.layout
    }

    /// The active wrapper directive.
    pub fn wrappers(&self) -> &WrapperDirective {
        &self.wrappers
    }

    /// Render the template at `path`, applying active wrappers and layout.
    pub fn render(&self, path: &Path, vars: &Scope) -> Result<String> {
        let mut output = self.evaluate_file(path, vars)?;

        if let WrapperDirective::Named(names) = &self.wrappers {
            for name in names {
                let wrapper_path = self.resolver.locate_wrapper(name).map_err(|err| {
                    VerandaError::RenderError {
                        path: path.to_path_buf(),
                        message: format!("wrapper '{name}' could not be resolved: {err}"),
                    }
                })?;

                output = self.evaluate_file(&wrapper_path, &with_content(vars, output))?;
            }
        }

        if let LayoutDirective::Named(name) = &self.layout {
            let layout_path = self.resolver.locate_layout(name).map_err(|err| {
                VerandaError::RenderError {
                    path: path.to_path_buf(),
                    message: format!("layout '{name}' could not be resolved: {err}"),
                }
            })?;

            output = self.evaluate_file(&layout_path, &with_content(vars, output))?;
        }

        debug!(path = %path.display(), bytes = output.len(), "render complete");
        Ok(output)
    }

    /// Render the template at `path` alone, skipping wrappers and layout
    /// (partial rendering).
    pub fn render_only(&self, path: &Path, vars: &Scope) -> Result<String> {
        self.evaluate_file(path, vars)
    }

    /// Load a template file and evaluate it in the scope.
    fn evaluate_file(&self, path: &Path, vars: &Scope) -> Result<String> {
        let source = fs::read_to_string(path).map_err(|err| VerandaError::RenderError {
            path: path.to_path_buf(),
            message: format!("failed to read template: {err}"),
        })?;

        self.engine.evaluate(path, &source, vars)
    }
}

/// Clone a scope with the running output injected as the content variable.
fn with_content(vars: &Scope, content: String) -> Scope {
    let mut scope = vars.clone();
    scope.insert(CONTENT_VAR.to_string(), serde_json::Value::String(content));
    scope
}
