/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Pre-allocated storage with generational indexing.
//!
//! [`Slab`] stores values of a uniform type and hands back a [`Key`] on
//! insertion. Each slot carries a generation counter: when a slot is
//! vacated its generation is bumped, so a key minted for a previous
//! occupant can never alias whatever value later re-uses the slot.
//! Lookups with a stale key return `None` instead of reaching a
//! different value.
//!
//! That property is what makes the slab suitable as the backing storage
//! for handles that cross the C boundary: a handle kept around after the
//! record it referred to was destroyed is detected on every access.

use std::fmt;

/// A key into a [`Slab`].
///
/// Keys are returned by [`Slab::insert`]. Each key carries the
/// generation the slot had at insertion time, so stale keys (from
/// removed entries) are detected on lookup.
///
/// The layout is `#[repr(C)]` on purpose: a key is decomposed into its
/// raw parts when it travels across the FFI boundary and reassembled
/// with [`Key::from_raw_parts`] on the way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(C)]
pub struct Key {
    position: u32,
    generation: u32,
}

impl Key {
    /// Return the position (slot index) of this key.
    pub const fn position(self) -> u32 {
        self.position
    }

    /// Return the generation of this key.
    pub const fn generation(self) -> u32 {
        self.generation
    }

    /// Reconstruct a key from its raw position and generation.
    ///
    /// Intended for FFI round-trips where a key was previously
    /// decomposed via [`Key::position`] and [`Key::generation`].
    /// A reconstructed key that never came out of [`Slab::insert`] is
    /// harmless: lookups with it simply return `None`.
    pub const fn from_raw_parts(position: u32, generation: u32) -> Self {
        Self {
            position,
            generation,
        }
    }
}

#[derive(Clone)]
enum Entry<T> {
    Vacant { next: u32, generation: u32 },
    Occupied { value: T, generation: u32 },
}

/// Generation-checked slot storage.
///
/// Backed by a `Vec` of slots, each either occupied or vacant. Vacant
/// slots form a free-list threaded through the vector; inserting pops
/// the list, removing pushes onto it. Removal bumps the slot's
/// generation, invalidating every key previously minted for it.
///
/// # Examples
///
/// ```
/// # use object_store::slab::Slab;
/// let mut slab = Slab::new();
///
/// let key = slab.insert("hello");
/// assert_eq!(slab.get(key), Some(&"hello"));
///
/// assert_eq!(slab.try_remove(key), Some("hello"));
/// assert_eq!(slab.get(key), None);
///
/// // The slot is re-used, but the old key stays dead.
/// let other = slab.insert("world");
/// assert_eq!(key.position(), other.position());
/// assert_eq!(slab.get(key), None);
/// ```
pub struct Slab<T> {
    entries: Vec<Entry<T>>,

    // Number of occupied slots.
    len: usize,

    // Head of the vacant free-list. Equal to `entries.len()` when there
    // is no vacant slot.
    next: u32,
}

impl<T> Slab<T> {
    /// Construct a new, empty `Slab`.
    ///
    /// Does not allocate until the first insertion.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            len: 0,
            next: 0,
        }
    }

    /// Construct a new, empty `Slab` that can hold `capacity` values
    /// without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            len: 0,
            next: 0,
        }
    }

    /// Return the number of stored values.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Return `true` if there are no values stored in the slab.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a value, returning the key assigned to it.
    ///
    /// # Panics
    ///
    /// Panics if the number of slots would exceed `u32::MAX`.
    pub fn insert(&mut self, value: T) -> Key {
        let position = self.next;
        let pos = position as usize;
        self.len += 1;

        let generation = if pos == self.entries.len() {
            assert!(
                self.entries.len() < u32::MAX as usize,
                "slab exceeded maximum capacity of {} slots",
                u32::MAX
            );
            self.entries.push(Entry::Occupied {
                value,
                generation: 0,
            });
            self.next = position + 1;
            0
        } else {
            let (next, generation) = match self.entries[pos] {
                Entry::Vacant { next, generation } => (next, generation),
                Entry::Occupied { .. } => unreachable!("free-list points at an occupied slot"),
            };
            self.next = next;
            self.entries[pos] = Entry::Occupied { value, generation };
            generation
        };

        Key {
            position,
            generation,
        }
    }

    /// Return a reference to the value associated with the given key.
    ///
    /// Returns `None` if the key's slot is vacant, out of bounds, or
    /// holds a different generation (stale key).
    pub fn get(&self, key: Key) -> Option<&T> {
        match self.entries.get(key.position as usize) {
            Some(Entry::Occupied { value, generation }) if *generation == key.generation => {
                Some(value)
            }
            _ => None,
        }
    }

    /// Return a mutable reference to the value associated with the
    /// given key, or `None` for a stale key.
    pub fn get_mut(&mut self, key: Key) -> Option<&mut T> {
        match self.entries.get_mut(key.position as usize) {
            Some(&mut Entry::Occupied {
                ref mut value,
                generation,
            }) if generation == key.generation => Some(value),
            _ => None,
        }
    }

    /// Return `true` if a value is associated with the given key.
    pub fn contains(&self, key: Key) -> bool {
        matches!(
            self.entries.get(key.position as usize),
            Some(&Entry::Occupied { generation, .. }) if generation == key.generation
        )
    }

    /// Try to remove the value associated with the given key, returning
    /// it if the key was live.
    ///
    /// The slot's generation is bumped, so the key (and any copy of it)
    /// is dead from this point on, even once the slot is re-used.
    pub fn try_remove(&mut self, key: Key) -> Option<T> {
        let pos = key.position as usize;
        if let Some(entry) = self.entries.get_mut(pos)
            && let Entry::Occupied { generation, .. } = entry
            && *generation == key.generation
        {
            let new_generation = generation.wrapping_add(1);
            let value = match core::mem::replace(
                entry,
                Entry::Vacant {
                    next: self.next,
                    generation: new_generation,
                },
            ) {
                Entry::Occupied { value, .. } => value,
                Entry::Vacant { .. } => unreachable!(),
            };

            self.len -= 1;
            self.next = key.position;
            return Some(value);
        }
        None
    }
}

impl<T> Default for Slab<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Slab<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slab")
            .field("len", &self.len)
            .field("cap", &self.entries.capacity())
            .finish()
    }
}
