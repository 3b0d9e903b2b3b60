use std::collections::HashMap;
use std::sync::Arc;

use crate::ports::ArtifactTransformer;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("transformer '{0}' is already registered")]
    AlreadyRegistered(String),
}

/// Registry of transformers (name -> transformer).
///
/// Design:
/// - Built during initialization (mutable).
/// - Used during execution (immutable, shared through `Arc`).
#[derive(Default)]
pub struct TransformerRegistry {
    transformers: HashMap<String, Arc<dyn ArtifactTransformer>>,
}

impl TransformerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        transformer: Arc<dyn ArtifactTransformer>,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if self.transformers.contains_key(&name) {
            return Err(RegistryError::AlreadyRegistered(name));
        }
        self.transformers.insert(name, transformer);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ArtifactTransformer>> {
        self.transformers.get(name).cloned()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.transformers.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.transformers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }
}
