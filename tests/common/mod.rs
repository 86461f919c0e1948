#![allow(dead_code)]

use go125_types::{
    BasicKind, ChanDir, FuncId, PackageId, Tuple, TypeArena, TypeId, Var,
};
use proptest::prelude::*;

pub const NAMED: [&str; 3] = ["Celsius", "Node", "reader"];
pub const FIELDS: [&str; 4] = ["X", "Y", "next", "val"];
pub const METHODS: [&str; 4] = ["Read", "Write", "Close", "flush"];

/// Type description independent of any arena.
#[derive(Debug, Clone)]
pub enum Shape {
    Basic(usize),
    Named(usize),
    Array(Box<Shape>, u64),
    Slice(Box<Shape>),
    /// (field name, type, tagged)
    Struct(Vec<(usize, Shape, bool)>),
    Pointer(Box<Shape>),
    /// (params, results, variadic)
    Func(Vec<Shape>, Vec<Shape>, bool),
    /// (method name, params)
    Interface(Vec<(usize, Vec<Shape>)>),
    Map(Box<Shape>, Box<Shape>),
    Chan(u8, Box<Shape>),
}

pub fn shape() -> BoxedStrategy<Shape> {
    let leaf = prop_oneof![
        (0..BasicKind::COUNT).prop_map(Shape::Basic),
        (0..NAMED.len()).prop_map(Shape::Named),
    ];
    leaf.prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            (inner.clone(), 0u64..4).prop_map(|(e, n)| Shape::Array(Box::new(e), n)),
            inner.clone().prop_map(|e| Shape::Slice(Box::new(e))),
            prop::collection::vec((0..FIELDS.len(), inner.clone(), any::<bool>()), 0..4)
                .prop_map(Shape::Struct),
            inner.clone().prop_map(|e| Shape::Pointer(Box::new(e))),
            (
                prop::collection::vec(inner.clone(), 0..3),
                prop::collection::vec(inner.clone(), 0..2),
                any::<bool>(),
            )
                .prop_map(|(p, r, v)| Shape::Func(p, r, v)),
            methods(inner.clone()).prop_map(Shape::Interface),
            (inner.clone(), inner.clone()).prop_map(|(k, v)| Shape::Map(Box::new(k), Box::new(v))),
            (0u8..3, inner).prop_map(|(d, e)| Shape::Chan(d, Box::new(e))),
        ]
    })
    .boxed()
}

pub fn methods(
    inner: impl Strategy<Value = Shape> + Clone,
) -> impl Strategy<Value = Vec<(usize, Vec<Shape>)>> {
    prop::collection::vec((0..METHODS.len(), prop::collection::vec(inner, 0..2)), 0..4)
}

/// Builds shapes into one arena with a fixed set of declarations.
pub struct Builder {
    pub arena: TypeArena,
    pub pkg: PackageId,
    named: Vec<TypeId>,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    pub fn new() -> Self {
        let mut arena = TypeArena::new();
        let pkg = arena.package("example.com/p", "p");

        let float64 = arena.basic(BasicKind::Float64);
        let celsius = arena.declare(Some(pkg), NAMED[0], Some(float64));

        // type Node struct { val int; next *Node }
        let node = arena.declare(Some(pkg), NAMED[1], None);
        let int = arena.basic(BasicKind::Int);
        let next = arena.new_pointer(node);
        let val = arena.new_field(Some(pkg), "val", int);
        let next = arena.new_field(Some(pkg), "next", next);
        let body = arena.new_struct([val, next]);
        arena
            .set_underlying(node, body)
            .expect("fresh declaration");

        let empty = arena.new_interface(Vec::new());
        let reader = arena.declare(Some(pkg), NAMED[2], Some(empty));

        Self {
            arena,
            pkg,
            named: vec![celsius, node, reader],
        }
    }

    pub fn named(&self, i: usize) -> TypeId {
        self.named[i]
    }

    pub fn build(&mut self, shape: &Shape) -> TypeId {
        match shape {
            Shape::Basic(k) => self.arena.basic(BasicKind::ALL[*k]),
            Shape::Named(i) => self.named[*i],
            Shape::Array(e, n) => {
                let e = self.build(e);
                self.arena.new_array(e, *n)
            }
            Shape::Slice(e) => {
                let e = self.build(e);
                self.arena.new_slice(e)
            }
            Shape::Struct(fields) => {
                let mut seen = Vec::new();
                let mut built = Vec::new();
                for (name, typ, tagged) in fields {
                    if seen.contains(name) {
                        continue;
                    }
                    seen.push(*name);
                    let typ = self.build(typ);
                    let field = self.arena.new_field(Some(self.pkg), FIELDS[*name], typ);
                    built.push(if *tagged {
                        field.with_tag(r#"json:"x""#)
                    } else {
                        field
                    });
                }
                self.arena.new_struct(built)
            }
            Shape::Pointer(e) => {
                let e = self.build(e);
                self.arena.new_pointer(e)
            }
            Shape::Func(params, results, variadic) => self.func(params, results, *variadic),
            Shape::Interface(methods) => {
                let funcs = self.methods(methods);
                self.arena.new_interface(funcs)
            }
            Shape::Map(k, v) => {
                let k = self.build(k);
                let v = self.build(v);
                self.arena.new_map(k, v)
            }
            Shape::Chan(d, e) => {
                let e = self.build(e);
                let dir = match d {
                    0 => ChanDir::Both,
                    1 => ChanDir::Send,
                    _ => ChanDir::Recv,
                };
                self.arena.new_chan(dir, e)
            }
        }
    }

    pub fn func(&mut self, params: &[Shape], results: &[Shape], variadic: bool) -> TypeId {
        let mut ps: Vec<TypeId> = params.iter().map(|p| self.build(p)).collect();
        let variadic = variadic && !ps.is_empty();
        if variadic {
            let last = ps.len() - 1;
            ps[last] = self.arena.new_slice(ps[last]);
        }
        let rs: Vec<TypeId> = results.iter().map(|r| self.build(r)).collect();
        self.arena
            .new_signature(Tuple::of(ps), Tuple::of(rs), variadic)
    }

    /// One func per distinct method name, first occurrence wins.
    pub fn methods(&mut self, methods: &[(usize, Vec<Shape>)]) -> Vec<FuncId> {
        let mut seen = Vec::new();
        let mut funcs = Vec::new();
        for (name, params) in methods {
            if seen.contains(name) {
                continue;
            }
            seen.push(*name);
            let sig = self.func(params, &[], false);
            funcs.push(self.arena.new_func(Some(self.pkg), METHODS[*name], sig));
        }
        funcs
    }

    /// Same signature as `sig` with every parameter and result named.
    pub fn renamed(&mut self, sig: TypeId, prefix: &str) -> TypeId {
        let go125_types::Type::Signature(s) = self.arena.get(sig).clone() else {
            panic!("not a signature");
        };
        let params: Vec<Var> = s
            .params
            .vars()
            .iter()
            .enumerate()
            .map(|(i, v)| self.arena.new_var(&format!("{prefix}{i}"), v.typ))
            .collect();
        let results: Vec<Var> = s
            .results
            .vars()
            .iter()
            .enumerate()
            .map(|(i, v)| self.arena.new_var(&format!("{prefix}r{i}"), v.typ))
            .collect();
        self.arena
            .new_signature(Tuple::new(params), Tuple::new(results), s.variadic)
    }
}

/// Small arena helpers for hand-written scenarios.
pub fn sig(arena: &mut TypeArena, params: &[TypeId], results: &[TypeId]) -> TypeId {
    arena.new_signature(
        Tuple::of(params.iter().copied()),
        Tuple::of(results.iter().copied()),
        false,
    )
}

/// `interface { Error() string }` declared as the universe type `error`.
pub fn error_type(arena: &mut TypeArena) -> TypeId {
    let string = arena.basic(BasicKind::String);
    let sig = sig(arena, &[], &[string]);
    let error = arena.new_func(None, "Error", sig);
    let iface = arena.new_interface([error]);
    arena.declare(None, "error", Some(iface))
}

/// `Write(p []byte) (n int, err error)`
pub fn write_method(arena: &mut TypeArena, error: TypeId) -> FuncId {
    let bytes = arena.new_slice(arena.byte());
    let int = arena.basic(BasicKind::Int);
    let p = arena.new_var("p", bytes);
    let n = arena.new_var("n", int);
    let err = arena.new_var("err", error);
    let sig = arena.new_signature(Tuple::new([p]), Tuple::new([n, err]), false);
    arena.new_func(None, "Write", sig)
}
