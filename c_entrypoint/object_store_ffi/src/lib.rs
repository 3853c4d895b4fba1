/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! C entry points for the object store.
//!
//! This crate exposes the native object-lifecycle contract to C callers:
//! per object kind (`int` over `int32_t`, `float` over `float`) there is
//! an `init`/`destroy` pair plus `n_get`/`n_put`/`id` accessors, all
//! operating on an [`ObjectHandle`] passed by value.
//!
//! # Module organization
//!
//! - [`int`]: entry points for the integer object kind
//! - [`float`]: entry points for the float object kind
//!
//! **Thread safety**: each thread owns an independent store. Handles are
//! only meaningful on the thread that created them; there is no
//! synchronization, matching the single-threaded contract. If handles
//! must be shared, synchronize at the C level and stay on one thread.
//!
//! **Stale handles**: a handle is dead after `destroy`. The generation
//! check turns any later `n_get`/`n_put`/`id` call into a deterministic
//! panic (which aborts, as these are `extern "C"` functions) instead of
//! undefined behavior. `destroy` itself is hardened into a no-op, and
//! the `is_live` probes let callers test liveness first — the same guard
//! the host-side bindings apply before every call.

pub mod float;
pub mod int;

pub use float::*;
pub use int::*;

use object_store::Key;

/// Handle to a natively stored object, opaque to the caller.
///
/// A position/generation pair identifying a slot in the calling
/// thread's store. Callers must treat the fields as meaningless; the
/// only valid operations are passing the handle back to the entry
/// points of the kind that produced it.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectHandle {
    position: u32,
    generation: u32,
}

impl ObjectHandle {
    /// Wrap a store key for the trip across the boundary.
    pub const fn from_key(key: Key) -> Self {
        Self {
            position: key.position(),
            generation: key.generation(),
        }
    }

    /// Reassemble the store key this handle was minted from.
    pub const fn key(self) -> Key {
        Key::from_raw_parts(self.position, self.generation)
    }
}
