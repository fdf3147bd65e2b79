//! Template path resolution.
//!
//! Resolves a logical descriptor to a concrete file by probing an ordered
//! list of lookup directories, highest priority first. The first existing
//! candidate wins, so an application overrides only the templates it
//! customizes and inherits the rest from fallback locations. Existence is
//! re-checked on every call; there is no directory-listing cache.

use std::path::PathBuf;
use tracing::{debug, trace};

use super::descriptor::{ViewDescriptor, Visibility};
use crate::error::{Result, VerandaError};

/// Ordered-lookup template resolver.
#[derive(Debug, Clone)]
pub struct PathResolver {
    lookup_paths: Vec<PathBuf>,
}

impl PathResolver {
    /// Create a resolver over the given lookup paths, highest priority
    /// first. Fails if the list is empty, since resolution could never
    /// succeed.
    pub fn new<I, P>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let lookup_paths: Vec<PathBuf> = paths.into_iter().map(Into::into).collect();

        if lookup_paths.is_empty() {
            return Err(VerandaError::NoLookupPaths);
        }

        Ok(Self { lookup_paths })
    }

    /// The configured lookup paths, in priority order.
    pub fn lookup_paths(&self) -> &[PathBuf] {
        &self.lookup_paths
    }

    /// Locate the file a descriptor names.
    ///
    /// Private descriptors probe `private/<rel>`; public descriptors probe
    /// `<rel>` and then `public/<rel>` in each lookup directory.
    pub fn locate(&self, descriptor: &ViewDescriptor) -> Result<PathBuf> {
        let relative = descriptor.relative_path();

        let candidates: Vec<String> = match descriptor.visibility() {
            Visibility::Private => vec![format!("private/{relative}")],
            Visibility::Public => vec![relative.clone(), format!("public/{relative}")],
        };

        for dir in &self.lookup_paths {
            for candidate in &candidates {
                let path = dir.join(candidate);
                trace!(path = %path.display(), "probing template candidate");

                if path.is_file() {
                    debug!(template = %relative, path = %path.display(), "template located");
                    return Ok(path);
                }
            }
        }

        Err(VerandaError::TemplateNotFound {
            template: relative,
            searched: self.lookup_paths.clone(),
        })
    }

    /// Locate a layout by name under the `private/layouts/` convention.
    pub fn locate_layout(&self, name: &str) -> Result<PathBuf> {
        self.locate(&ViewDescriptor::new(["layouts", name]).private())
    }

    /// Locate a wrapper by name under the `private/wrappers/` convention.
    pub fn locate_wrapper(&self, name: &str) -> Result<PathBuf> {
        self.locate(&ViewDescriptor::new(["wrappers", name]).private())
    }
}
