use std::collections::HashMap;
use std::sync::Arc;

use super::Operative;

/// Registry of operatives by operation name.
///
/// Registering an existing name replaces the previous operative.
#[derive(Default)]
pub struct OperativeRegistry {
    operatives: HashMap<String, Arc<dyn Operative>>,
}

impl OperativeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &str, operative: Arc<dyn Operative>) -> &mut Self {
        if self.operatives.insert(name.to_string(), operative).is_some() {
            tracing::debug!(op = %name, "replaced registered operative");
        }
        self
    }

    pub fn exists(&self, name: &str) -> bool {
        self.operatives.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Operative>> {
        self.operatives.get(name).cloned()
    }

    /// Names of all registered operatives, sorted.
    pub fn registered_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.operatives.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.operatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operatives.is_empty()
    }
}
