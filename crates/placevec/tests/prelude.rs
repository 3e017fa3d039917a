//! The facade exposes a working API through its prelude.

use placevec::prelude::*;

#[test]
fn vector_and_optional_via_prelude() {
    let mut v: Vector<String, ByClone> = Vector::new();
    v.push_back("a".into()).unwrap();
    v.emplace(0, || Ok("b".into())).unwrap();
    assert_eq!(v, ["b", "a"].map(String::from));

    let err = v
        .emplace_back(|| Err(ConstructError::new("nope")))
        .unwrap_err();
    assert_eq!(err.to_string(), "element construction failed: nope");

    let mut slot: Optional<Vector<String, ByClone>> = Optional::new();
    assert_eq!(slot.value().err(), Some(EmptyAccess));
    slot.assign(v);
    assert_eq!(slot.value().map(|v| v.len()), Ok(2));
}

#[test]
fn raw_module_is_reachable() {
    let block = placevec::raw::RawMemory::<u8>::allocate(3).unwrap();
    assert_eq!(block.capacity(), 3);
    assert!(matches!(
        placevec::raw::RawMemory::<u64>::allocate(usize::MAX),
        Err(AllocError::CapacityOverflow { .. })
    ));
}
