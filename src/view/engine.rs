//! Template execution seam.
//!
//! A generic templating language is out of scope; the engine trait exists
//! so the resolution and caching layers stay independent of template
//! syntax. The default [`SubstitutionEngine`] replaces `{{name}}`
//! placeholders with values from the variable scope and is strict: an
//! unresolved placeholder fails the render.

use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Result, VerandaError};

/// Variable scope for a render call. A `BTreeMap` keeps serialization
/// canonical, which the render cache relies on for key derivation.
pub type Scope = BTreeMap<String, Value>;

/// Name of the variable carrying the previous stage's output during
/// wrapper and layout composition.
pub const CONTENT_VAR: &str = "content";

/// Executes template source in a variable scope.
pub trait TemplateEngine {
    /// Evaluate `source` (loaded from `path`, named for diagnostics) with
    /// the given variables.
    fn evaluate(&self, path: &Path, source: &str, vars: &Scope) -> Result<String>;
}

/// Placeholder-substitution engine: `{{name}}` with optional inner
/// whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstitutionEngine;

/// A parsed piece of template source.
#[derive(Debug, PartialEq)]
enum Segment {
    Literal(String),
    Variable(String),
}

/// Split template source into literal and `{{variable}}` segments.
/// An unterminated `{{` is kept as literal text.
fn parse_segments(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut rest = input;

    while let Some(start) = rest.find("{{") {
        match rest[start + 2..].find("}}") {
            Some(end) => {
                if start > 0 {
                    segments.push(Segment::Literal(rest[..start].to_string()));
                }
                let name = rest[start + 2..start + 2 + end].trim().to_string();
                segments.push(Segment::Variable(name));
                rest = &rest[start + 2 + end + 2..];
            }
            None => break,
        }
    }

    if !rest.is_empty() {
        segments.push(Segment::Literal(rest.to_string()));
    }

    segments
}

impl TemplateEngine for SubstitutionEngine {
    fn evaluate(&self, path: &Path, source: &str, vars: &Scope) -> Result<String> {
        let mut output = String::with_capacity(source.len());

        for segment in parse_segments(source) {
            match segment {
                Segment::Literal(text) => output.push_str(&text),
                Segment::Variable(name) => match vars.get(&name) {
                    Some(Value::String(s)) => output.push_str(s),
                    Some(value) => output.push_str(&value.to_string()),
                    None => {
                        return Err(VerandaError::RenderError {
                            path: path.to_path_buf(),
                            message: format!("unresolved variable '{name}'"),
                        });
                    }
                },
            }
        }

        Ok(output)
    }
}
