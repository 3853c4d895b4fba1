/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Entry points for the integer object kind.
//!
//! The contract is monomorphic per kind: C has no generics, so every
//! operation exists once per numeric type, with the kind spelled out in
//! the symbol name. The [`float`](crate::float) module is the `float`
//! counterpart of this one.

use std::cell::RefCell;
use std::ffi::c_char;

use object_store::ObjectStore;
use tracing::debug;

use crate::ObjectHandle;

thread_local! {
    // Per-thread store for integer objects. See the crate docs for the
    // threading contract.
    static INT_STORE: RefCell<ObjectStore<i32>> = const { RefCell::new(ObjectStore::new()) };
}

/// Allocate a new integer object with `n` as the initial value and a
/// freshly assigned unique identity.
///
/// Never fails: allocation failure is fatal, per the contract.
#[unsafe(no_mangle)]
pub extern "C" fn object_int_init(n: i32) -> ObjectHandle {
    INT_STORE.with_borrow_mut(|store| {
        let key = store.create(n);
        debug!(
            n,
            position = key.position(),
            generation = key.generation(),
            "object_int_init"
        );
        ObjectHandle::from_key(key)
    })
}

/// Release the object behind the given handle.
///
/// The handle (and every copy of it) is dead afterwards. Destroying an
/// already-dead handle is a caller error; it is hardened into a no-op
/// here rather than undefined behavior.
#[unsafe(no_mangle)]
pub extern "C" fn object_int_destroy(handle: ObjectHandle) {
    INT_STORE.with_borrow_mut(|store| {
        let destroyed = store.destroy(handle.key());
        debug!(
            position = handle.key().position(),
            generation = handle.key().generation(),
            destroyed,
            "object_int_destroy"
        );
    });
}

/// Return the current value of the object's numeric field. Pure read.
///
/// # Panics
///
/// Panics (and aborts) if the handle is dead or unknown. Probe with
/// [`object_int_is_live`] first when liveness is uncertain.
#[unsafe(no_mangle)]
pub extern "C" fn object_int_n_get(handle: ObjectHandle) -> i32 {
    INT_STORE.with_borrow(|store| {
        store
            .n(handle.key())
            .expect("object_int_n_get called with a destroyed or unknown handle")
    })
}

/// Set the object's numeric field, returning the same handle to support
/// chaining.
///
/// # Panics
///
/// Panics (and aborts) if the handle is dead or unknown. Probe with
/// [`object_int_is_live`] first when liveness is uncertain.
#[unsafe(no_mangle)]
pub extern "C" fn object_int_n_put(handle: ObjectHandle, n: i32) -> ObjectHandle {
    INT_STORE.with_borrow_mut(|store| {
        let key = store
            .set_n(handle.key(), n)
            .expect("object_int_n_put called with a destroyed or unknown handle");
        ObjectHandle::from_key(key)
    })
}

/// Return the object's immutable identity string.
///
/// The returned pointer borrows from the object's record: it is a
/// NUL-terminated string valid until [`object_int_destroy`] releases
/// the object, and must not be freed by the caller.
///
/// # Panics
///
/// Panics (and aborts) if the handle is dead or unknown. Probe with
/// [`object_int_is_live`] first when liveness is uncertain.
#[unsafe(no_mangle)]
pub extern "C" fn object_int_id(handle: ObjectHandle) -> *const c_char {
    INT_STORE.with_borrow(|store| {
        store
            .id(handle.key())
            .expect("object_int_id called with a destroyed or unknown handle")
            .as_ptr()
    })
}

/// Return `true` if the handle still refers to a live integer object.
#[unsafe(no_mangle)]
pub extern "C" fn object_int_is_live(handle: ObjectHandle) -> bool {
    INT_STORE.with_borrow(|store| store.is_live(handle.key()))
}
