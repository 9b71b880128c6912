use std::collections::HashMap;

use super::signature::{BuiltinSignature, CallConvention};
use super::table::DEFAULT_COMMANDS;

/// Name-keyed registry of builtin command signatures.
///
/// A lookup either yields exactly one signature or nothing, in which case
/// the name is a user-defined function.
#[derive(Clone, Debug)]
pub struct BuiltinRegistry {
    commands: HashMap<String, BuiltinSignature>,
}

impl BuiltinRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Register a command signature, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, convention: CallConvention) {
        let name = name.into();
        let sig = BuiltinSignature::new(name.clone(), convention);
        self.commands.insert(name, sig);
    }

    /// Look up a name. `None` means the name is user-defined.
    pub fn resolve(&self, name: &str) -> Option<&BuiltinSignature> {
        self.commands.get(name)
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for BuiltinRegistry {
    /// Registry preloaded with the standard SQF command table.
    fn default() -> Self {
        let mut registry = Self::new();
        for &(name, convention) in DEFAULT_COMMANDS {
            registry.register(name, convention);
        }
        registry
    }
}
