/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Safe host-side bindings over the object store's C entry points.
//!
//! The native contract hands out an opaque handle per object and leaves
//! use-after-destroy to the caller. [`ObjectRef`] wraps that handle in a
//! small object with exactly two states — **Live** (handle held) and
//! **Destroyed** (handle cleared) — and guards every native call behind
//! that state: accessing a destroyed object yields `None` rather than
//! reaching the native layer.
//!
//! The entry points themselves are duplicated per numeric kind, since C
//! has no generics. The [`ObjectKind`] trait is the seam that folds the
//! duplication back into a single parametric wrapper; [`IntKind`] and
//! [`FloatKind`] are its two implementations, with [`IntObject`] and
//! [`FloatObject`] as the ready-made aliases.
//!
//! Cleanup is explicit: the native record is released by
//! [`ObjectRef::destroy`], and dropping a live `ObjectRef` without
//! destroying it leaks the record. [`Scoped`] layers guaranteed
//! release-on-scope-exit on top for callers that want it.
//!
//! ```
//! use object_bindings::IntObject;
//!
//! let mut obj = IntObject::new(123);
//! assert_eq!(obj.n(), Some(123));
//!
//! obj.set_n(321);
//! assert_eq!(obj.n(), Some(321));
//!
//! obj.destroy();
//! assert_eq!(obj.n(), None);
//! ```

use std::ffi::{CStr, c_char};
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

use object_store_ffi::ObjectHandle;

/// One object kind of the native contract.
///
/// Each implementation delegates to the per-kind C entry points, giving
/// [`ObjectRef`] a single generic surface over the duplicated ABI. The
/// trait can also be implemented by a mock for testing code that is
/// generic over the kind.
///
/// Implementations must route every function to the same underlying
/// store: a handle minted by `init` must be meaningful to the other
/// five operations.
pub trait ObjectKind {
    /// Numeric representation of this kind.
    type Value: Copy;

    /// Allocate a native object, returning its handle.
    fn init(n: Self::Value) -> ObjectHandle;
    /// Release the native object. The handle is dead afterwards.
    fn destroy(handle: ObjectHandle);
    /// Read the numeric field. The handle must be live.
    fn n_get(handle: ObjectHandle) -> Self::Value;
    /// Write the numeric field, returning the handle for chaining. The
    /// handle must be live.
    fn n_put(handle: ObjectHandle, n: Self::Value) -> ObjectHandle;
    /// Identity string pointer, valid while the object is live. The
    /// handle must be live.
    fn id(handle: ObjectHandle) -> *const c_char;
    /// `true` if the handle refers to a live native object.
    fn is_live(handle: ObjectHandle) -> bool;
}

/// The integer object kind (`i32`).
#[derive(Debug)]
pub enum IntKind {}

impl ObjectKind for IntKind {
    type Value = i32;

    fn init(n: i32) -> ObjectHandle {
        object_store_ffi::object_int_init(n)
    }

    fn destroy(handle: ObjectHandle) {
        object_store_ffi::object_int_destroy(handle);
    }

    fn n_get(handle: ObjectHandle) -> i32 {
        object_store_ffi::object_int_n_get(handle)
    }

    fn n_put(handle: ObjectHandle, n: i32) -> ObjectHandle {
        object_store_ffi::object_int_n_put(handle, n)
    }

    fn id(handle: ObjectHandle) -> *const c_char {
        object_store_ffi::object_int_id(handle)
    }

    fn is_live(handle: ObjectHandle) -> bool {
        object_store_ffi::object_int_is_live(handle)
    }
}

/// The float object kind (`f32`).
#[derive(Debug)]
pub enum FloatKind {}

impl ObjectKind for FloatKind {
    type Value = f32;

    fn init(n: f32) -> ObjectHandle {
        object_store_ffi::object_float_init(n)
    }

    fn destroy(handle: ObjectHandle) {
        object_store_ffi::object_float_destroy(handle);
    }

    fn n_get(handle: ObjectHandle) -> f32 {
        object_store_ffi::object_float_n_get(handle)
    }

    fn n_put(handle: ObjectHandle, n: f32) -> ObjectHandle {
        object_store_ffi::object_float_n_put(handle, n)
    }

    fn id(handle: ObjectHandle) -> *const c_char {
        object_store_ffi::object_float_id(handle)
    }

    fn is_live(handle: ObjectHandle) -> bool {
        object_store_ffi::object_float_is_live(handle)
    }
}

/// A bound native object: the single owner of one native handle.
///
/// Every accessor checks liveness before calling into the native layer;
/// once [`destroy`](Self::destroy) has run, all accessors return `None`.
/// Sharing one native handle across two `ObjectRef`s is unsupported —
/// ownership is single-owner by contract.
pub struct ObjectRef<K: ObjectKind> {
    handle: Option<ObjectHandle>,
    _kind: PhantomData<K>,
}

/// An integer-valued object.
pub type IntObject = ObjectRef<IntKind>;

/// A float-valued object.
pub type FloatObject = ObjectRef<FloatKind>;

impl<K: ObjectKind> ObjectRef<K> {
    /// Allocate a new native object with `n` as the initial value.
    pub fn new(n: K::Value) -> Self {
        Self {
            handle: Some(K::init(n)),
            _kind: PhantomData,
        }
    }

    /// Current value of the numeric field, or `None` once destroyed.
    pub fn n(&self) -> Option<K::Value> {
        let handle = self.handle?;
        Some(K::n_get(handle))
    }

    /// Set the numeric field.
    ///
    /// Returns `Some(self)` for chaining, mirroring the native `n_put`
    /// returning its handle; `None` once destroyed, without attempting
    /// the native call.
    pub fn set_n(&mut self, n: K::Value) -> Option<&mut Self> {
        let handle = self.handle?;
        self.handle = Some(K::n_put(handle, n));
        Some(self)
    }

    /// The object's immutable identity, or `None` once destroyed.
    pub fn id(&self) -> Option<String> {
        let handle = self.handle?;
        let ptr = K::id(handle);
        // SAFETY: the native layer returns a NUL-terminated string that
        // stays valid while the object is live, and we hold the only
        // handle, so no destroy can happen before the copy below.
        let id = unsafe { CStr::from_ptr(ptr) };
        Some(id.to_string_lossy().into_owned())
    }

    /// `true` while the object has not been destroyed.
    pub fn is_live(&self) -> bool {
        self.handle.is_some()
    }

    /// The underlying native handle, or `None` once destroyed.
    ///
    /// For interop with code driving the C entry points directly. The
    /// returned handle is a copy; destroying through it while this
    /// `ObjectRef` still considers itself live breaks the single-owner
    /// contract.
    pub fn as_raw(&self) -> Option<ObjectHandle> {
        self.handle
    }

    /// Release the native object and clear the handle.
    ///
    /// Idempotent at this level: a second call finds no handle and does
    /// nothing. There is no implicit cleanup — never calling `destroy`
    /// (and not using [`Scoped`]) leaks the native record.
    pub fn destroy(&mut self) {
        if let Some(handle) = self.handle.take() {
            K::destroy(handle);
        }
    }
}

/// `new(0)` / `new(0.0)`, matching the contract's default-initialized
/// constructor.
impl<K: ObjectKind> Default for ObjectRef<K>
where
    K::Value: Default,
{
    fn default() -> Self {
        Self::new(K::Value::default())
    }
}

impl<K: ObjectKind> std::fmt::Debug for ObjectRef<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectRef")
            .field("handle", &self.handle)
            .finish()
    }
}

/// Scope-bound wrapper around [`ObjectRef`] that destroys the native
/// object when dropped.
///
/// Acquire on construction, release on scope exit — ergonomics layered
/// on top of the explicit-destroy contract, not a replacement for it:
/// code holding a plain [`ObjectRef`] still has to destroy it.
///
/// ```
/// use object_bindings::{FloatKind, Scoped};
///
/// {
///     let mut obj = Scoped::<FloatKind>::new(3.14);
///     obj.set_n(4.13);
///     assert_eq!(obj.n(), Some(4.13));
/// } // native record released here
/// ```
#[derive(Debug)]
pub struct Scoped<K: ObjectKind>(ObjectRef<K>);

impl<K: ObjectKind> Scoped<K> {
    /// Allocate a new native object owned by this scope guard.
    pub fn new(n: K::Value) -> Self {
        Self(ObjectRef::new(n))
    }
}

impl<K: ObjectKind> Deref for Scoped<K> {
    type Target = ObjectRef<K>;

    fn deref(&self) -> &ObjectRef<K> {
        &self.0
    }
}

impl<K: ObjectKind> DerefMut for Scoped<K> {
    fn deref_mut(&mut self) -> &mut ObjectRef<K> {
        &mut self.0
    }
}

impl<K: ObjectKind> Drop for Scoped<K> {
    fn drop(&mut self) {
        self.0.destroy();
    }
}
