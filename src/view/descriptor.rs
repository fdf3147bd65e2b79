//! Logical view descriptors.

/// Default template file extension.
pub const DEFAULT_EXTENSION: &str = "tpl";

/// Which subdirectory convention a descriptor resolves under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Searched at the lookup root, with `public/` probed as a secondary
    /// candidate.
    #[default]
    Public,
    /// Searched under `private/` only.
    Private,
}

/// Logical identifier for a view: path segments plus extension and
/// visibility. Immutable for the duration of a render call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewDescriptor {
    segments: Vec<String>,
    extension: String,
    visibility: Visibility,
}

impl ViewDescriptor {
    /// Create a public descriptor with the default extension.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            extension: DEFAULT_EXTENSION.to_string(),
            visibility: Visibility::Public,
        }
    }

    /// Override the file extension (e.g. `"xml"`).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Mark the descriptor private.
    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// The relative path this descriptor names: segments joined by `/`,
    /// suffixed with the extension.
    pub fn relative_path(&self) -> String {
        format!("{}.{}", self.segments.join("/"), self.extension)
    }
}

impl From<&str> for ViewDescriptor {
    fn from(name: &str) -> Self {
        Self::new([name])
    }
}
