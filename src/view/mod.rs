//! View resolution, rendering, and output caching.
//!
//! - Descriptor types in [`descriptor`]
//! - Ordered-lookup path resolution in [`resolver`]
//! - Template execution seam in [`engine`]
//! - Wrapper/layout composition in [`pipeline`]
//! - TTL-gated output caching in [`cache`]
//!
//! [`TemplateView`] composes the three responsibilities behind a single
//! render entry point.

pub mod cache;
pub mod descriptor;
pub mod engine;
pub mod pipeline;
pub mod resolver;

pub use cache::{cache_key, RenderCache};
pub use descriptor::{ViewDescriptor, Visibility, DEFAULT_EXTENSION};
pub use engine::{Scope, SubstitutionEngine, TemplateEngine, CONTENT_VAR};
pub use pipeline::{LayoutDirective, RenderPipeline, WrapperDirective, DEFAULT_LAYOUT};
pub use resolver::PathResolver;

use chrono::Duration;
use std::path::{Path, PathBuf};

use crate::config::{parse_ttl, ViewSettings};
use crate::error::Result;
use crate::storage::Storage;

/// A complete view: resolver, render pipeline, and render cache.
#[derive(Debug)]
pub struct TemplateView<S, E = SubstitutionEngine> {
    pipeline: RenderPipeline<E>,
    cache: RenderCache<S>,
    default_extension: String,
    default_ttl: Option<Duration>,
}

impl<S: Storage> TemplateView<S> {
    /// Create a view over lookup paths and a backing store, with the
    /// default substitution engine.
    pub fn new<I, P>(paths: I, storage: S) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let resolver = PathResolver::new(paths)?;
        Ok(Self {
            pipeline: RenderPipeline::new(resolver),
            cache: RenderCache::new(storage),
            default_extension: DEFAULT_EXTENSION.to_string(),
            default_ttl: None,
        })
    }

    /// Build a view from settings. The settings TTL expression is parsed
    /// here, once, never per render call.
    pub fn from_settings(settings: &ViewSettings, storage: S) -> Result<Self> {
        let default_ttl = settings
            .cache_ttl
            .as_deref()
            .map(parse_ttl)
            .transpose()?;

        let resolver = PathResolver::new(settings.paths.clone())?;
        Ok(Self {
            pipeline: RenderPipeline::new(resolver),
            cache: RenderCache::new(storage),
            default_extension: settings.extension.clone(),
            default_ttl,
        })
    }
}

impl<S: Storage, E: TemplateEngine> TemplateView<S, E> {
    /// Create a view with a custom template engine.
    pub fn with_engine<I, P>(paths: I, storage: S, engine: E) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let resolver = PathResolver::new(paths)?;
        Ok(Self {
            pipeline: RenderPipeline::with_engine(resolver, engine),
            cache: RenderCache::new(storage),
            default_extension: DEFAULT_EXTENSION.to_string(),
            default_ttl: None,
        })
    }

    /// Build a descriptor from segments, applying the view's default
    /// extension.
    pub fn describe<I, T>(&self, segments: I) -> ViewDescriptor
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        ViewDescriptor::new(segments).with_extension(self.default_extension.clone())
    }

    /// Locate the template a descriptor names.
    pub fn locate(&self, descriptor: &ViewDescriptor) -> Result<PathBuf> {
        self.pipeline.resolver().locate(descriptor)
    }

    /// Render a descriptor through the full pipeline, served from the
    /// cache when the view's default TTL allows.
    pub fn render(&self, descriptor: &ViewDescriptor, vars: &Scope) -> Result<String> {
        let path = self.locate(descriptor)?;
        self.cache
            .fetch_or_render(&path, vars, self.default_ttl, || {
                self.pipeline.render(&path, vars)
            })
    }

    /// Render an already-located template alone (no wrappers or layout),
    /// cached when a TTL is given.
    pub fn render_template(
        &self,
        path: &Path,
        vars: &Scope,
        ttl: Option<Duration>,
    ) -> Result<String> {
        self.cache.fetch_or_render(path, vars, ttl, || {
            self.pipeline.render_only(path, vars)
        })
    }

    /// Mutable access to the pipeline for layout/wrapper toggles.
    pub fn pipeline_mut(&mut self) -> &mut RenderPipeline<E> {
        &mut self.pipeline
    }

    /// The pipeline, read-only.
    pub fn pipeline(&self) -> &RenderPipeline<E> {
        &self.pipeline
    }

    /// The backing cache store.
    pub fn storage(&self) -> &S {
        self.cache.store()
    }

    /// The default TTL applied by [`TemplateView::render`].
    pub fn default_ttl(&self) -> Option<Duration> {
        self.default_ttl
    }

    /// Change the default TTL.
    pub fn set_default_ttl(&mut self, ttl: Option<Duration>) {
        self.default_ttl = ttl;
    }
}
