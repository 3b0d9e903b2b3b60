use std::fmt;

use crate::domain::{FileRef, TransformError};
use crate::ports::ArtifactTransformer;

/// Adapts a closure into an `ArtifactTransformer`.
pub struct FnTransformer<F> {
    name: String,
    f: F,
}

impl<F> FnTransformer<F>
where
    F: Fn(&FileRef) -> Result<Vec<FileRef>, TransformError> + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> ArtifactTransformer for FnTransformer<F>
where
    F: Fn(&FileRef) -> Result<Vec<FileRef>, TransformError> + Send + Sync,
{
    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn transform(&self, file: &FileRef) -> Result<Vec<FileRef>, TransformError> {
        (self.f)(file)
    }
}

impl<F> fmt::Debug for FnTransformer<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTransformer").field("name", &self.name).finish()
    }
}
