/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Live/destroyed guard semantics of the safe wrappers, including the
//! full create/read/update/destroy scenario across both object kinds.

use object_bindings::{FloatKind, FloatObject, IntObject, Scoped};

#[test]
fn full_lifecycle_scenario() {
    let mut i1 = IntObject::new(123);
    let mut i2 = IntObject::new(987);
    let mut f1 = FloatObject::new(3.14);

    // Three distinct, non-empty identities.
    let id_i1 = i1.id().unwrap();
    let id_i2 = i2.id().unwrap();
    let id_f1 = f1.id().unwrap();
    assert!(!id_i1.is_empty());
    assert_ne!(id_i1, id_i2);
    assert_ne!(id_i1, id_f1);
    assert_ne!(id_i2, id_f1);

    // Initial values are observable before any mutation.
    assert_eq!(i1.n(), Some(123));
    assert_eq!(i2.n(), Some(987));
    assert_eq!(f1.n(), Some(3.14));

    // Update each value; identities are untouched.
    i1.set_n(321).unwrap();
    i2.set_n(789).unwrap();
    f1.set_n(4.13).unwrap();

    assert_eq!(i1.n(), Some(321));
    assert_eq!(i2.n(), Some(789));
    assert_eq!(f1.n(), Some(4.13));
    assert_eq!(i1.id().unwrap(), id_i1);
    assert_eq!(i2.id().unwrap(), id_i2);
    assert_eq!(f1.id().unwrap(), id_f1);

    // After destroy, every access reports absent.
    i1.destroy();
    i2.destroy();
    f1.destroy();

    for obj in [&i1, &i2] {
        assert!(!obj.is_live());
        assert_eq!(obj.n(), None);
        assert_eq!(obj.id(), None);
    }
    assert!(!f1.is_live());
    assert_eq!(f1.n(), None);
    assert_eq!(f1.id(), None);
}

#[test]
fn negative_and_fractional_values_round_trip() {
    let mut int = IntObject::new(-42);
    assert_eq!(int.n(), Some(-42));
    int.set_n(i32::MIN);
    assert_eq!(int.n(), Some(i32::MIN));
    int.destroy();

    let mut float = FloatObject::new(-0.5);
    assert_eq!(float.n(), Some(-0.5));
    float.set_n(4.13);
    assert_eq!(float.n(), Some(4.13));
    float.destroy();
}

#[test]
fn setter_on_destroyed_object_reports_absent() {
    let mut obj = IntObject::new(1);
    obj.destroy();

    // The guard short-circuits before the native layer is reached.
    assert!(obj.set_n(2).is_none());
    assert_eq!(obj.n(), None);
}

#[test]
fn destroy_is_idempotent_at_the_wrapper_level() {
    let mut obj = FloatObject::new(2.5);
    obj.destroy();
    obj.destroy();
    assert!(!obj.is_live());
}

#[test]
fn setter_chains() {
    let mut obj = IntObject::new(0);
    obj.set_n(1).and_then(|obj| obj.set_n(2)).unwrap();
    assert_eq!(obj.n(), Some(2));
    obj.destroy();
}

#[test]
fn default_constructor_zero_initializes() {
    let mut int = IntObject::default();
    assert_eq!(int.n(), Some(0));
    int.destroy();

    let mut float = FloatObject::default();
    assert_eq!(float.n(), Some(0.0));
    float.destroy();
}

#[test]
fn scoped_guard_releases_on_scope_exit() {
    let raw = {
        let mut obj = Scoped::<FloatKind>::new(3.14);
        obj.set_n(4.13);
        assert_eq!(obj.n(), Some(4.13));
        obj.as_raw().unwrap()
    };

    // The guard destroyed the native record when it went out of scope.
    assert!(!object_store_ffi::object_float_is_live(raw));
}

#[test]
fn handle_is_cleared_not_reused() {
    let mut obj = IntObject::new(10);
    assert!(obj.as_raw().is_some());

    obj.destroy();
    assert!(obj.as_raw().is_none());

    // A new object re-using the native slot is invisible through the
    // destroyed wrapper.
    let mut other = IntObject::new(20);
    assert_eq!(obj.n(), None);
    assert_eq!(other.n(), Some(20));
    other.destroy();
}
