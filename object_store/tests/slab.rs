/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Slot storage behavior: insertion, free-list re-use, and the
//! generation check that keeps stale keys from aliasing later
//! occupants.

use object_store::slab::{Key, Slab};

#[test]
fn insert_get_remove_one() {
    let mut slab = Slab::new();
    assert!(slab.is_empty());

    let key = slab.insert(10);

    assert_eq!(slab.get(key), Some(&10));
    assert!(slab.contains(key));
    assert!(!slab.is_empty());

    assert_eq!(slab.try_remove(key), Some(10));
    assert!(!slab.contains(key));
    assert!(slab.get(key).is_none());
    assert!(slab.is_empty());
}

#[test]
fn insert_get_many() {
    let mut slab = Slab::with_capacity(10);
    let mut keys = Vec::new();

    for i in 0..10 {
        let key = slab.insert(i + 10);
        keys.push((key, i + 10));
    }

    for (key, val) in keys {
        assert_eq!(slab.get(key), Some(&val));
    }
    assert_eq!(slab.len(), 10);
}

#[test]
fn get_mut_updates_in_place() {
    let mut slab = Slab::new();
    let key = slab.insert(1);

    *slab.get_mut(key).unwrap() = 2;

    assert_eq!(slab.get(key), Some(&2));
}

#[test]
fn stale_key_never_aliases_reused_slot() {
    let mut slab = Slab::new();

    let first = slab.insert("first");
    assert_eq!(slab.try_remove(first), Some("first"));

    // The vacated slot is the head of the free-list, so the next insert
    // lands at the same position with a bumped generation.
    let second = slab.insert("second");
    assert_eq!(first.position(), second.position());
    assert_ne!(first.generation(), second.generation());

    assert_eq!(slab.get(first), None);
    assert_eq!(slab.get_mut(first), None);
    assert!(!slab.contains(first));
    assert_eq!(slab.get(second), Some(&"second"));
}

#[test]
fn double_remove_is_none() {
    let mut slab = Slab::new();
    let key = slab.insert(7);

    assert_eq!(slab.try_remove(key), Some(7));
    assert_eq!(slab.try_remove(key), None);
    assert_eq!(slab.len(), 0);
}

#[test]
fn remove_interior_then_reuse() {
    let mut slab = Slab::new();
    let a = slab.insert('a');
    let b = slab.insert('b');
    let c = slab.insert('c');

    assert_eq!(slab.try_remove(b), Some('b'));
    assert_eq!(slab.len(), 2);

    let d = slab.insert('d');
    assert_eq!(d.position(), b.position());

    assert_eq!(slab.get(a), Some(&'a'));
    assert_eq!(slab.get(c), Some(&'c'));
    assert_eq!(slab.get(d), Some(&'d'));
    assert_eq!(slab.get(b), None);
}

#[test]
fn fabricated_key_is_harmless() {
    let mut slab = Slab::new();
    slab.insert(0);

    let out_of_bounds = Key::from_raw_parts(999, 0);
    assert_eq!(slab.get(out_of_bounds), None);
    assert_eq!(slab.try_remove(out_of_bounds), None);

    let wrong_generation = Key::from_raw_parts(0, 42);
    assert_eq!(slab.get(wrong_generation), None);
}

#[test]
fn key_round_trips_through_raw_parts() {
    let mut slab = Slab::new();
    let key = slab.insert("payload");

    let rebuilt = Key::from_raw_parts(key.position(), key.generation());
    assert_eq!(rebuilt, key);
    assert_eq!(slab.get(rebuilt), Some(&"payload"));
}
