/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Entry points for the float object kind.
//!
//! Mirror of [`int`](crate::int), over `float`. See that module for the
//! per-operation contract; the semantics are identical apart from the
//! numeric type.

use std::cell::RefCell;
use std::ffi::c_char;

use object_store::ObjectStore;
use tracing::debug;

use crate::ObjectHandle;

thread_local! {
    static FLOAT_STORE: RefCell<ObjectStore<f32>> = const { RefCell::new(ObjectStore::new()) };
}

/// Allocate a new float object with `n` as the initial value and a
/// freshly assigned unique identity.
#[unsafe(no_mangle)]
pub extern "C" fn object_float_init(n: f32) -> ObjectHandle {
    FLOAT_STORE.with_borrow_mut(|store| {
        let key = store.create(n);
        debug!(
            n = f64::from(n),
            position = key.position(),
            generation = key.generation(),
            "object_float_init"
        );
        ObjectHandle::from_key(key)
    })
}

/// Release the object behind the given handle. No-op for a dead handle.
#[unsafe(no_mangle)]
pub extern "C" fn object_float_destroy(handle: ObjectHandle) {
    FLOAT_STORE.with_borrow_mut(|store| {
        let destroyed = store.destroy(handle.key());
        debug!(
            position = handle.key().position(),
            generation = handle.key().generation(),
            destroyed,
            "object_float_destroy"
        );
    });
}

/// Return the current value of the object's numeric field. Pure read.
///
/// # Panics
///
/// Panics (and aborts) if the handle is dead or unknown.
#[unsafe(no_mangle)]
pub extern "C" fn object_float_n_get(handle: ObjectHandle) -> f32 {
    FLOAT_STORE.with_borrow(|store| {
        store
            .n(handle.key())
            .expect("object_float_n_get called with a destroyed or unknown handle")
    })
}

/// Set the object's numeric field, returning the same handle to support
/// chaining.
///
/// # Panics
///
/// Panics (and aborts) if the handle is dead or unknown.
#[unsafe(no_mangle)]
pub extern "C" fn object_float_n_put(handle: ObjectHandle, n: f32) -> ObjectHandle {
    FLOAT_STORE.with_borrow_mut(|store| {
        let key = store
            .set_n(handle.key(), n)
            .expect("object_float_n_put called with a destroyed or unknown handle");
        ObjectHandle::from_key(key)
    })
}

/// Return the object's immutable identity string.
///
/// The returned pointer borrows from the object's record and is valid
/// until [`object_float_destroy`] releases the object. Must not be
/// freed by the caller.
///
/// # Panics
///
/// Panics (and aborts) if the handle is dead or unknown.
#[unsafe(no_mangle)]
pub extern "C" fn object_float_id(handle: ObjectHandle) -> *const c_char {
    FLOAT_STORE.with_borrow(|store| {
        store
            .id(handle.key())
            .expect("object_float_id called with a destroyed or unknown handle")
            .as_ptr()
    })
}

/// Return `true` if the handle still refers to a live float object.
#[unsafe(no_mangle)]
pub extern "C" fn object_float_is_live(handle: ObjectHandle) -> bool {
    FLOAT_STORE.with_borrow(|store| store.is_live(handle.key()))
}
