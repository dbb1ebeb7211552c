//! Type registry - symbolic names bound to token converters
//!
//! The registry is the one piece of process-wide mutable state in the engine.
//! Mutation is registration-only: converters are added during the load phase
//! (late registration is tolerated) and never removed, so readers only need a
//! consistent snapshot. Entries keep registration order, which is the scan
//! order of [`TypeRegistry::infer`] and therefore part of the contract.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::debug;

use crate::error::DeclarationError;
use crate::value::{CommandValue, ValueKind};

/// A named, kind-tagged token conversion.
///
/// The conversion function is pure: `None` means "this token is not of my
/// type", never an error. Cloning shares the underlying function.
#[derive(Clone)]
pub struct Converter {
    name: Arc<str>,
    kind: ValueKind,
    convert: Arc<dyn Fn(&str) -> Option<CommandValue> + Send + Sync>,
}

impl Converter {
    /// Create a converter under a symbolic name.
    pub fn new<F>(name: impl Into<String>, kind: ValueKind, convert: F) -> Self
    where
        F: Fn(&str) -> Option<CommandValue> + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name.into()),
            kind,
            convert: Arc::new(convert),
        }
    }

    /// The symbolic name this converter registers under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The kind of value this converter produces.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Apply the conversion to one raw token.
    pub fn convert(&self, token: &str) -> Option<CommandValue> {
        (self.convert)(token)
    }

    /// Whether two handles denote the same registered converter.
    ///
    /// Function bodies cannot be compared, so identity is the name, the kind
    /// tag, and the conversion function allocation.
    pub fn is_identical(&self, other: &Self) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && Arc::ptr_eq(&self.convert, &other.convert)
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Process-wide mapping from symbolic type names to converters.
///
/// Shared via `Arc` between the module loader (writer) and concurrent
/// invocations (readers). Inserts go through the write lock; lookups and
/// inference take snapshots, so no reader ever observes a half-registered
/// entry.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    converters: RwLock<IndexMap<String, Converter>>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-loaded with the built-in converter set.
    pub fn with_builtins() -> Self {
        let mut converters = IndexMap::new();
        for converter in crate::converters::builtins() {
            converters.insert(converter.name().to_string(), converter);
        }
        Self {
            converters: RwLock::new(converters),
        }
    }

    /// Register a converter under its symbolic name.
    ///
    /// Re-registering an identical converter is a no-op; a different converter
    /// under an occupied name is rejected so that one module cannot silently
    /// redefine another module's types.
    pub fn register(&self, converter: Converter) -> Result<(), DeclarationError> {
        let mut converters = self.converters.write();
        if let Some(existing) = converters.get(converter.name()) {
            if existing.is_identical(&converter) {
                return Ok(());
            }
            return Err(DeclarationError::duplicate_converter(converter.name()));
        }
        debug!(name = %converter.name(), kind = %converter.kind(), "registered converter");
        converters.insert(converter.name().to_string(), converter);
        Ok(())
    }

    /// Look up a converter by its symbolic name.
    pub fn lookup(&self, name: &str) -> Option<Converter> {
        self.converters.read().get(name).cloned()
    }

    /// Find the first registered converter that accepts `token`.
    ///
    /// Scans in registration order and returns the converter together with the
    /// value it produced. Converter code is user code and must not run under
    /// the registry lock, so the entry list is snapshotted first; the scan is
    /// deterministic even while another module is registering.
    pub fn infer(&self, token: &str) -> Option<(Converter, CommandValue)> {
        let snapshot: Vec<Converter> = self.converters.read().values().cloned().collect();
        for converter in snapshot {
            if let Some(value) = converter.convert(token) {
                return Some((converter, value));
            }
        }
        None
    }

    /// Registered type names, in registration order.
    pub fn names(&self) -> Vec<String> {
        self.converters.read().keys().cloned().collect()
    }

    /// Number of registered converters.
    pub fn len(&self) -> usize {
        self.converters.read().len()
    }

    /// True if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.converters.read().is_empty()
    }
}
