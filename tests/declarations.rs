mod common;

use common::{error_type, sig, write_method};
use go125_types::{BasicKind, ChanDir, DeclError, Interner, Tuple, TypeArena, is_exported};

#[test]
fn underlying_can_be_set_once() {
    let mut arena = TypeArena::new();
    let int = arena.basic(BasicKind::Int);
    let string = arena.basic(BasicKind::String);
    let t = arena.declare(None, "T", None);

    assert_eq!(arena.underlying(t), arena.invalid());
    arena.set_underlying(t, int).unwrap();
    assert_eq!(arena.underlying(t), int);

    let err = arena.set_underlying(t, string).unwrap_err();
    assert_eq!(
        err,
        DeclError::UnderlyingAlreadySet {
            name: "T".to_owned()
        }
    );
    assert_eq!(err.to_string(), "underlying type of T already set");
}

#[test]
fn underlying_is_flattened() {
    let mut arena = TypeArena::new();
    let int = arena.basic(BasicKind::Int);
    let a = arena.declare(None, "A", Some(int));
    let b = arena.declare(None, "B", None);
    arena.set_underlying(b, a).unwrap();
    assert_eq!(arena.underlying(b), int);
}

#[test]
fn forward_references_resolve_once_completed() {
    let mut arena = TypeArena::new();
    let int = arena.basic(BasicKind::Int);
    let string = arena.basic(BasicKind::String);

    // type A B; type B int, processed in source order
    let a = arena.declare(None, "A", None);
    let b = arena.declare(None, "B", None);
    arena.set_underlying(a, b).unwrap();
    assert!(!arena.is_complete(a));
    assert_eq!(arena.underlying(a), arena.invalid());
    assert!(!arena.is_integer(a));

    arena.set_underlying(b, int).unwrap();
    assert!(arena.is_complete(a));
    assert_eq!(arena.underlying(a), int);
    assert!(arena.is_integer(a));
    assert!(!arena.identical(a, b));

    // A stays set even though its underlying came through B
    assert_eq!(
        arena.set_underlying(a, string),
        Err(DeclError::UnderlyingAlreadySet {
            name: "A".to_owned()
        })
    );

    // the same through the one-step constructor: type C D; type D string
    let d = arena.declare(None, "D", None);
    let c = arena.declare(None, "C", Some(d));
    assert!(!arena.is_complete(c));
    arena.set_underlying(d, string).unwrap();
    assert!(arena.is_string(c));
    assert!(!arena.is_complete(int));
}

#[test]
fn declaration_cycles_are_rejected() {
    let mut arena = TypeArena::new();
    let int = arena.basic(BasicKind::Int);

    let t = arena.declare(None, "T", None);
    let err = arena.set_underlying(t, t).unwrap_err();
    assert_eq!(
        err,
        DeclError::InvalidRecursiveType {
            name: "T".to_owned()
        }
    );
    assert_eq!(err.to_string(), "invalid recursive type T");

    // type X Y; type Y Z; type Z X
    let x = arena.declare(None, "X", None);
    let y = arena.declare(None, "Y", None);
    let z = arena.declare(None, "Z", None);
    arena.set_underlying(x, y).unwrap();
    arena.set_underlying(y, z).unwrap();
    assert!(matches!(
        arena.set_underlying(z, x),
        Err(DeclError::InvalidRecursiveType { .. })
    ));
    assert_eq!(arena.underlying(x), arena.invalid());

    // the rejected declaration can still be completed properly
    arena.set_underlying(z, int).unwrap();
    assert_eq!(arena.underlying(x), int);
    assert_eq!(arena.underlying(t), arena.invalid());
}

#[test]
fn only_declared_types_can_be_completed() {
    let mut arena = TypeArena::new();
    let int = arena.basic(BasicKind::Int);
    let slice = arena.new_slice(int);
    let s = sig(&mut arena, &[], &[]);
    let m = arena.new_func(None, "M", s);

    let err = arena.set_underlying(slice, int).unwrap_err();
    assert_eq!(err, DeclError::NotNamed { shape: "slice" });
    assert_eq!(
        arena.add_method(slice, m).unwrap_err().to_string(),
        "slice type cannot be completed as a declared type"
    );
}

#[test]
fn duplicate_methods_are_rejected() {
    let mut arena = TypeArena::new();
    let p = arena.package("example.com/p", "p");
    let q = arena.package("example.com/q", "q");
    let int = arena.basic(BasicKind::Int);
    let s = sig(&mut arena, &[], &[]);
    let t = arena.declare(Some(p), "T", Some(int));

    let first = arena.new_func(Some(p), "String", s);
    let again = arena.new_func(Some(q), "String", s);
    arena.add_method(t, first).unwrap();
    assert_eq!(
        arena.add_method(t, again),
        Err(DeclError::DuplicateMethod {
            name: "T.String".to_owned()
        })
    );

    // unexported names from different packages are different methods
    let hidden_p = arena.new_func(Some(p), "reset", s);
    let hidden_q = arena.new_func(Some(q), "reset", s);
    arena.add_method(t, hidden_p).unwrap();
    arena.add_method(t, hidden_q).unwrap();

    let go125_types::Type::Named(n) = arena.get(t) else {
        unreachable!()
    };
    assert_eq!(n.methods.len(), 3);
}

#[test]
fn packages_are_interned_by_path() {
    let mut arena = TypeArena::new();
    let a = arena.package("example.com/a", "a");
    let again = arena.package("example.com/a", "renamed");
    let b = arena.package("example.com/b", "a");

    assert_eq!(a, again);
    assert_ne!(a, b);
    assert_eq!(arena.lookup_package("example.com/b"), Some(b));
    assert_eq!(arena.lookup_package("example.com/c"), None);
    assert_eq!(arena.package_path(a), "example.com/a");
    assert_eq!(&*arena.package_info(a).name, "a");
}

#[test]
fn qualified_names_drop_the_package_of_exported_names() {
    let mut arena = TypeArena::new();
    let p = arena.package("example.com/p", "p");
    let q = arena.package("example.com/q", "q");

    assert_eq!(
        arena.qualified_name(Some(p), "Read"),
        arena.qualified_name(Some(q), "Read")
    );
    assert_ne!(
        arena.qualified_name(Some(p), "read"),
        arena.qualified_name(Some(q), "read")
    );

    let read = arena.qualified_name(Some(p), "read");
    assert_eq!(arena.display_qualified(read), "example.com/p.read");
    let exported = arena.qualified_name(Some(p), "Read");
    assert_eq!(arena.display_qualified(exported), "Read");
}

#[test]
fn interner_round_trips() {
    let mut interner = Interner::new();
    assert!(interner.is_empty());
    let a = interner.intern("Close");
    let b = interner.intern("close");
    assert_eq!(interner.intern("Close"), a);
    assert_ne!(a, b);
    assert_eq!(interner.resolve(b), "close");
    assert_eq!(interner.get("close"), Some(b));
    assert_eq!(interner.get("flush"), None);
    assert_eq!(interner.len(), 2);

    assert!(is_exported("Close"));
    assert!(is_exported("Ärger"));
    assert!(!is_exported("close"));
    assert!(!is_exported("_Close"));
    assert!(!is_exported(""));
}

#[test]
fn universe_is_allocated_up_front() {
    let arena = TypeArena::with_capacity(64);
    assert_eq!(arena.len(), BasicKind::COUNT + 2);
    assert!(!arena.is_empty());
    for kind in BasicKind::ALL {
        assert_eq!(arena.display(arena.basic(kind)).to_string(), kind.name());
    }
    assert_eq!(arena.display(arena.byte()).to_string(), "byte");
    assert_eq!(arena.display(arena.rune()).to_string(), "rune");
}

#[test]
fn types_display_as_go_source() {
    let mut arena = TypeArena::new();
    let pkg = arena.package("example.com/geo", "geo");
    let int = arena.basic(BasicKind::Int);
    let string = arena.basic(BasicKind::String);
    let float64 = arena.basic(BasicKind::Float64);
    let error = error_type(&mut arena);

    let point = arena.declare(Some(pkg), "Point", Some(float64));
    let x = arena.new_field(Some(pkg), "X", int).with_tag(r#"json:"x""#);
    let embedded = arena.new_embedded_field(Some(pkg), point);
    let st = arena.new_struct([x, embedded]);
    assert_eq!(
        arena.display(st).to_string(),
        r#"struct{X int "json:\"x\""; example.com/geo.Point}"#
    );

    let arr = arena.new_array(string, 4);
    let m = arena.new_map(string, arr);
    let p = arena.new_pointer(m);
    assert_eq!(arena.display(p).to_string(), "*map[string][4]string");

    let recv = arena.new_chan(ChanDir::Recv, int);
    let both = arena.new_chan(ChanDir::Both, recv);
    let send = arena.new_chan(ChanDir::Send, int);
    assert_eq!(arena.display(both).to_string(), "chan (<-chan int)");
    assert_eq!(arena.display(send).to_string(), "chan<- int");

    let strings = arena.new_slice(string);
    let format = arena.new_var("format", string);
    let args = arena.new_var("args", strings);
    let printf = arena.new_signature(Tuple::new([format, args]), Tuple::of([int, error]), true);
    assert_eq!(
        arena.display(printf).to_string(),
        "func(format string, args ...string) (int, error)"
    );

    let write = write_method(&mut arena, error);
    let iface = arena.new_interface([write]);
    assert_eq!(
        arena.display(iface).to_string(),
        "interface{Write(p []byte) (n int, err error)}"
    );
    assert_eq!(format!("{:?}", arena.display(error)), "error");

    let single = sig(&mut arena, &[], &[error]);
    assert_eq!(arena.display_method(single).to_string(), "() error");
}

#[test]
fn completed_arena_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TypeArena>();
    assert_send_sync::<DeclError>();

    let mut arena = TypeArena::new();
    let int = arena.basic(BasicKind::Int);
    let slice = arena.new_slice(int);
    let other = arena.new_slice(int);

    let arena = std::sync::Arc::new(arena);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let arena = std::sync::Arc::clone(&arena);
            std::thread::spawn(move || arena.identical(slice, other))
        })
        .collect();
    for h in handles {
        assert!(h.join().unwrap());
    }
}
