use super::*;

#[test]
fn test_intern_is_stable() {
    let interner = StringInterner::new();
    let a = interner.intern("grammar");
    let b = interner.intern("grammar");
    let c = interner.intern("rule");
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(interner.lookup(a), "grammar");
    assert_eq!(interner.lookup(c), "rule");
}

#[test]
fn test_empty_is_pre_interned() {
    let interner = StringInterner::new();
    assert_eq!(interner.intern(""), Name::EMPTY);
    assert_eq!(interner.lookup(Name::EMPTY), "");
    assert_eq!(interner.len(), 1);
}

#[test]
fn test_get_does_not_intern() {
    let interner = StringInterner::new();
    assert_eq!(interner.get("missing"), None);
    assert_eq!(interner.len(), 1);

    let name = interner.intern("present");
    assert_eq!(interner.get("present"), Some(name));
}

#[test]
fn test_lookup_out_of_range_is_empty() {
    let interner = StringInterner::new();
    assert_eq!(interner.lookup(Name::from_raw(999)), "");
}

#[test]
fn test_shared_across_threads() {
    let interner = StringInterner::shared();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let interner = Arc::clone(&interner);
            std::thread::spawn(move || interner.intern("shared"))
        })
        .collect();

    let names: Vec<Name> = handles
        .into_iter()
        .map(|h| h.join().unwrap_or(Name::EMPTY))
        .collect();
    assert!(names.iter().all(|&n| n == names[0]));
    assert_eq!(interner.lookup(names[0]), "shared");
}
