//! Type registry consulted by the fake store
//!
//! A kind must be registered before objects of that kind can be seeded,
//! written, or indexed.

use crate::error::SetupError;
use crate::log_messages;
use crate::meta::{Object, ObjectKind};
use std::any::TypeId;
use std::collections::BTreeMap;

/// Function extending a [`Scheme`], applied while a store builder is set up
pub type AddToScheme = fn(&mut Scheme) -> Result<(), SetupError>;

#[derive(Debug, Clone, Default)]
pub struct Scheme {
    kinds: BTreeMap<ObjectKind, TypeId>,
}

impl Scheme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` under its kind name
    ///
    /// Registering the same type twice is a no-op; registering a different
    /// type under an existing kind name is an error.
    pub fn register<T: Object>(&mut self) -> Result<(), SetupError> {
        let kind = T::kind();
        let type_id = TypeId::of::<T>();
        match self.kinds.get(&kind) {
            Some(existing) if *existing != type_id => Err(SetupError::ConflictingKind { kind }),
            Some(_) => Ok(()),
            None => {
                tracing::trace!(%kind, "{}", log_messages::scheme::REGISTERED_KIND);
                self.kinds.insert(kind, type_id);
                Ok(())
            }
        }
    }

    pub fn recognizes(&self, kind: ObjectKind) -> bool {
        self.kinds.contains_key(&kind)
    }

    /// Fail unless `T` itself is registered under its kind name
    pub fn ensure_registered<T: Object>(&self) -> Result<(), SetupError> {
        let kind = T::kind();
        match self.kinds.get(&kind) {
            Some(existing) if *existing == TypeId::of::<T>() => Ok(()),
            Some(_) => Err(SetupError::ConflictingKind { kind }),
            None => Err(SetupError::UnregisteredKind { kind }),
        }
    }

    pub fn kinds(&self) -> impl Iterator<Item = ObjectKind> + '_ {
        self.kinds.keys().copied()
    }
}
