//! Interned symbols used across expressions.
//!
//! Role
//! - Give every named entity (variable, constant, relation, uninterpreted function) a compact
//!   `Copy` identifier, so expressions store and compare names in O(1).
//! - Names are interned process-wide: interning the same name twice yields the same [`Symbol`].
//!
//! Ordering
//! - Symbols order by interning order. This is the canonical order of every symbol collection
//!   produced by this crate (e.g. [`crate::walker::free_symbols`]).
use std::{collections::HashMap, sync::Arc};

use log::trace;
use once_cell::sync::Lazy;
use parking_lot::{RwLock, RwLockUpgradableReadGuard};

#[derive(Default)]
struct Interner {
    names: Vec<Arc<str>>,
    lookup: HashMap<Arc<str>, u32>,
}

static INTERNER: Lazy<RwLock<Interner>> = Lazy::new(|| RwLock::new(Interner::default()));

/// Identifier for an interned name.
///
/// Display
/// - Prints the interned name verbatim.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// Intern `name`, returning the existing symbol if it was interned before.
    ///
    /// # A note on concurrency
    /// Names already interned are found under a shared read lock. A miss retries under an
    /// upgradable read lock, which admits a single writer, so two threads interning the same
    /// new name concurrently still receive the same symbol.
    pub fn intern(name: impl AsRef<str>) -> Self {
        let name = name.as_ref();
        if let Some(symbol) = Self::lookup(name) {
            return symbol;
        }

        let interner = INTERNER.upgradable_read();
        if let Some(&id) = interner.lookup.get(name) {
            return Symbol(id);
        }

        let mut interner = RwLockUpgradableReadGuard::upgrade(interner);
        let id = interner.names.len();
        assert!(id < u32::MAX as usize, "symbol table exhausted");
        let id = id as u32;

        let shared: Arc<str> = Arc::from(name);
        interner.names.push(shared.clone());
        interner.lookup.insert(shared, id);
        trace!("Interned symbol `{}` as #{}", name, id);
        Symbol(id)
    }

    /// Look up an already interned name without interning it.
    pub fn lookup(name: &str) -> Option<Self> {
        INTERNER.read().lookup.get(name).copied().map(Symbol)
    }

    /// The interned name of this symbol.
    pub fn name(&self) -> Arc<str> {
        INTERNER.read().names[self.0 as usize].clone()
    }

    /// Get the raw numeric id.
    pub fn raw(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

impl std::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.name(), self.0)
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::intern(name)
    }
}
