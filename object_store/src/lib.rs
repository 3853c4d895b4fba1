/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Store for tagged numeric objects.
//!
//! An [`ObjectStore`] owns heap-allocated records, each holding a single
//! mutable numeric field `n` and an immutable identity string assigned
//! at creation. Callers refer to records through a generation-checked
//! [`Key`]: once a record is destroyed, every key that pointed at it is
//! dead, and further accesses are reported as stale instead of reaching
//! whatever record later re-uses the slot.
//!
//! The store is the Rust side of a C ABI (see the `object_store_ffi`
//! entry-point crate). That shapes two choices here:
//!
//! - Identity strings are kept NUL-terminated ([`ObjectId`] wraps a
//!   `CString`), because the boundary hands out `const char *` pointers
//!   that borrow directly from the record and must stay valid for the
//!   record's whole lifetime.
//! - [`Key`] is a `#[repr(C)]` position/generation pair that survives a
//!   round-trip through C unchanged.
//!
//! A store only ever holds one numeric type; the two kinds of the
//! contract are two monomorphizations (`ObjectStore<i32>` and
//! `ObjectStore<f32>`) that share the identity sequence, so ids stay
//! unique across kinds within a process run.

pub mod slab;

pub use slab::{Key, Slab};

use std::ffi::{CStr, CString};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

/// Error returned when mutating through a destroyed or unknown handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error(
    "stale object handle (position {}, generation {})",
    .key.position(),
    .key.generation()
)]
pub struct StaleHandleError {
    key: Key,
}

impl StaleHandleError {
    /// The key that failed the liveness check.
    pub const fn key(&self) -> Key {
        self.key
    }
}

// Process-wide identity sequence, shared by all stores regardless of
// their numeric type. Starts at 1 so an id is never the empty suffix.
static NEXT_IDENTITY: AtomicU64 = AtomicU64::new(1);

/// An object's identity string: non-empty, unique within a process run,
/// assigned at creation and immutable thereafter.
///
/// Stored NUL-terminated so the C boundary can hand out a borrowed
/// `const char *` without copying or a side table. The exact scheme
/// (a sequential counter rendered as `obj:<hex>`) is an implementation
/// detail; only uniqueness and immutability are contractual.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectId(CString);

impl ObjectId {
    fn assign() -> Self {
        let seq = NEXT_IDENTITY.fetch_add(1, Ordering::Relaxed);
        let text = CString::new(format!("obj:{seq:x}"))
            .expect("object identities never contain NUL bytes");
        Self(text)
    }

    /// The identity as a NUL-terminated C string.
    pub fn as_c_str(&self) -> &CStr {
        &self.0
    }

    /// The identity as a string slice.
    pub fn as_str(&self) -> &str {
        // Identities are ASCII by construction.
        self.0
            .to_str()
            .expect("object identities are always ASCII")
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored record: one mutable numeric field plus its identity.
#[derive(Debug, Clone)]
pub struct Object<T> {
    n: T,
    id: ObjectId,
}

impl<T: Copy> Object<T> {
    fn new(n: T) -> Self {
        Self {
            n,
            id: ObjectId::assign(),
        }
    }

    /// Current value of the numeric field.
    pub fn n(&self) -> T {
        self.n
    }

    /// The record's identity.
    pub fn id(&self) -> &ObjectId {
        &self.id
    }
}

/// Owns object records and mediates every access through a
/// generation-checked [`Key`].
///
/// # Examples
///
/// ```
/// # use object_store::ObjectStore;
/// let mut store = ObjectStore::new();
///
/// let key = store.create(123i32);
/// assert_eq!(store.n(key), Some(123));
///
/// let key = store.set_n(key, 321).unwrap();
/// assert_eq!(store.n(key), Some(321));
///
/// assert!(store.destroy(key));
/// assert_eq!(store.n(key), None);
/// ```
#[derive(Debug)]
pub struct ObjectStore<T> {
    objects: Slab<Object<T>>,
}

impl<T> Default for ObjectStore<T> {
    fn default() -> Self {
        Self {
            objects: Slab::new(),
        }
    }
}

impl<T: Copy> ObjectStore<T> {
    /// Construct an empty store. Does not allocate.
    pub const fn new() -> Self {
        Self {
            objects: Slab::new(),
        }
    }

    /// Allocate a new record with `n` as the initial value and a
    /// freshly assigned identity.
    ///
    /// Never fails; allocation failure aborts the process, matching the
    /// contract's treatment of out-of-memory as fatal.
    pub fn create(&mut self, n: T) -> Key {
        self.objects.insert(Object::new(n))
    }

    /// Release the record behind `key`.
    ///
    /// Returns `false` if the key is stale — a second destroy of the
    /// same handle is a caller error, hardened here into a no-op by the
    /// same liveness check that guards reads.
    pub fn destroy(&mut self, key: Key) -> bool {
        self.objects.try_remove(key).is_some()
    }

    /// Return the record behind `key`. `None` for a stale key.
    pub fn get(&self, key: Key) -> Option<&Object<T>> {
        self.objects.get(key)
    }

    /// Read the numeric field. `None` for a stale key.
    pub fn n(&self, key: Key) -> Option<T> {
        self.get(key).map(Object::n)
    }

    /// Set the numeric field, returning the same key to support
    /// chaining. The identity is untouched.
    pub fn set_n(&mut self, key: Key, n: T) -> Result<Key, StaleHandleError> {
        let object = self
            .objects
            .get_mut(key)
            .ok_or(StaleHandleError { key })?;
        object.n = n;
        Ok(key)
    }

    /// Read the identity string. `None` for a stale key.
    ///
    /// The returned `CStr` borrows from the record and is valid until
    /// the record is destroyed.
    pub fn id(&self, key: Key) -> Option<&CStr> {
        self.get(key).map(|object| object.id.as_c_str())
    }

    /// `true` if `key` still refers to a live record.
    pub fn is_live(&self, key: Key) -> bool {
        self.objects.contains(key)
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// `true` if the store holds no live records.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
