//! Custom codec registration and lookup.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::ProtocolCodec;

/// Lookup of caller-registered codecs by name.
///
/// The factory consults this when the `codec` parameter is present. The
/// surface is a single method so tests can substitute their own
/// implementation.
pub trait CodecRegistry: Send + Sync {
    /// The codec bound to `name`, or `None` when nothing is registered.
    fn lookup(&self, name: &str) -> Option<Arc<dyn ProtocolCodec>>;
}

/// Registry backed by an in-memory map.
#[derive(Default)]
pub struct InMemoryCodecRegistry {
    entries: RwLock<HashMap<String, Arc<dyn ProtocolCodec>>>,
}

impl InMemoryCodecRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `codec` under `name`, replacing any previous binding.
    pub fn register(&self, name: impl Into<String>, codec: Arc<dyn ProtocolCodec>) {
        self.entries
            .write()
            .expect("codec registry lock poisoned")
            .insert(name.into(), codec);
    }
}

impl CodecRegistry for InMemoryCodecRegistry {
    fn lookup(&self, name: &str) -> Option<Arc<dyn ProtocolCodec>> {
        self.entries
            .read()
            .expect("codec registry lock poisoned")
            .get(name)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::SerializationCodec;

    #[test]
    fn lookup_returns_registered_codec() {
        let registry = InMemoryCodecRegistry::new();
        registry.register("wire", Arc::new(SerializationCodec::new()));
        assert!(registry.lookup("wire").is_some());
    }

    #[test]
    fn lookup_misses_unknown_name() {
        let registry = InMemoryCodecRegistry::new();
        assert!(registry.lookup("wire").is_none());
    }

    #[test]
    fn register_replaces_previous_binding() {
        let registry = InMemoryCodecRegistry::new();
        let first: Arc<dyn ProtocolCodec> = Arc::new(SerializationCodec::new());
        let second: Arc<dyn ProtocolCodec> = Arc::new(SerializationCodec::new());
        registry.register("wire", Arc::clone(&first));
        registry.register("wire", Arc::clone(&second));
        let found = registry.lookup("wire").unwrap();
        assert!(Arc::ptr_eq(&found, &second));
    }
}
