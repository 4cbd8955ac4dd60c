use std::path::Path;

use assert_matches::assert_matches;

use super::*;
use crate::{
	code::{BlockId, FrameId, FunId, Literal, VarRef},
	symbol,
};


fn compile(input: &str) -> (Result<Code, Error>, symbol::Interner) {
	compile_with(input, NoInclude)
}


fn compile_with<I: Include>(input: &str, include: I) -> (Result<Code, Error>, symbol::Interner) {
	let mut interner = symbol::Interner::new();
	let source = Source::from_str(Path::new("<test>"), input);

	let result = Compiler::new(&mut interner)
		.with_include(include)
		.compile(&source);

	(result, interner)
}


fn error_kind(input: &str) -> ErrorKind {
	match compile(input).0 {
		Ok(_) => panic!("unexpected success compiling {:?}", input),
		Err(error) => error.kind,
	}
}


/// The instructions of a block, without source position tags.
fn instrs(code: &Code, block: BlockId) -> Vec<Instr> {
	code
		.block(block)
		.iter()
		.filter(|instr| !matches!(instr, Instr::Line { .. }))
		.cloned()
		.collect()
}


fn builtin(name: &str) -> BuiltinId {
	runtime::registry()
		.lookup(name)
		.expect("missing builtin")
}


const fn var(depth: u32, slot: u32) -> VarRef {
	VarRef { depth, slot }
}


/// Serves included units from memory.
#[derive(Debug, Default)]
struct Sources(Vec<(&'static str, &'static str)>);


impl Include for Sources {
	fn include(&mut self, path: &str, _from: &Path) -> Result<Source, IncludeError> {
		self.0
			.iter()
			.find(|(name, _)| *name == path)
			.map(|(name, contents)| Source::from_str(Path::new(name), contents))
			.ok_or_else(|| std::io::Error::from(std::io::ErrorKind::NotFound).into())
	}
}


#[test]
fn test_assignment() {
	let (code, _) = compile("a = 1 + 2");
	let code = code.expect("compile error");

	assert_eq!(
		instrs(&code, code.root()),
		[
			Instr::Push(Literal::Int(1)),
			Instr::Push(Literal::Int(2)),
			Instr::Op { op: builtin("add"), arity: 2 },
			Instr::Store(var(0, 0)),
		]
	);
}


#[test]
fn test_call() {
	let (code, _) = compile("f = fn(a, b, c) { a }\nf(1, 2, 3)");
	let code = code.expect("compile error");

	assert_eq!(
		instrs(&code, code.root()),
		[
			Instr::MakeFunction(FunId(0)),
			Instr::Store(var(0, 0)),
			Instr::Clear,
			Instr::Load(var(0, 0)),
			Instr::Push(Literal::Int(1)),
			Instr::Push(Literal::Int(2)),
			Instr::Push(Literal::Int(3)),
			Instr::Call { arity: 3 },
		]
	);

	let function = code.function(FunId(0));
	assert_eq!(function.params, 3);
	assert!(!function.variadic);
	assert_eq!(instrs(&code, function.body), [Instr::Load(var(1, 0))]);
}


#[test]
fn test_slice_literal() {
	let (code, _) = compile("[1, 2, 3]");
	let code = code.expect("compile error");

	assert_eq!(
		instrs(&code, code.root()),
		[
			Instr::Push(Literal::Int(1)),
			Instr::Push(Literal::Int(2)),
			Instr::Push(Literal::Int(3)),
			Instr::Op { op: builtin("slice_from"), arity: 3 },
		]
	);
}


#[test]
fn test_empty_constructs() {
	let root = |input: &str| {
		let (code, _) = compile(input);
		let code = code.expect("compile error");
		instrs(&code, code.root())
	};

	assert_eq!(root("print()"), [Instr::Builtin(builtin("print")), Instr::Call { arity: 0 }]);
	assert_eq!(root("[]"), [Instr::Op { op: builtin("slice_from"), arity: 0 }]);
	assert_eq!(root("{}"), [Instr::Op { op: builtin("map_from"), arity: 0 }]);
}


#[test]
fn test_nested_arities() {
	let (code, _) = compile("print(len(), [], {1: [2]})");
	let code = code.expect("compile error");

	let slice_from = builtin("slice_from");

	assert_eq!(
		instrs(&code, code.root()),
		[
			Instr::Builtin(builtin("print")),
			Instr::Builtin(builtin("len")),
			Instr::Call { arity: 0 },
			Instr::Op { op: slice_from, arity: 0 },
			Instr::Push(Literal::Int(1)),
			Instr::Push(Literal::Int(2)),
			Instr::Op { op: slice_from, arity: 1 },
			Instr::Op { op: builtin("map_from"), arity: 2 },
			Instr::Call { arity: 3 },
		]
	);

	let (code, _) = compile("[[[]], [[], []]]");
	let code = code.expect("compile error");

	let arities: Vec<u32> = instrs(&code, code.root())
		.into_iter()
		.map(
			|instr| match instr {
				Instr::Op { op, arity } if op == slice_from => arity,
				other => panic!("unexpected instruction {:?}", other),
			}
		)
		.collect();

	assert_eq!(arities, [0, 1, 0, 0, 2, 2]);
}


#[test]
fn test_if() {
	let (code, _) = compile("x = 1\nif x > 0 { y = 1 }");
	let code = code.expect("compile error");

	let root = instrs(&code, code.root());
	let (condition, body) = assert_matches!(
		&root[..],
		[
			Instr::Push(Literal::Int(1)),
			Instr::Store(VarRef { depth: 0, slot: 0 }),
			Instr::Clear,
			Instr::If { clauses, otherwise: None },
		] if clauses.len() == 1 => clauses[0]
	);

	assert_eq!(
		instrs(&code, condition),
		[
			Instr::Load(var(0, 0)),
			Instr::Push(Literal::Int(0)),
			Instr::Op { op: builtin("gt"), arity: 2 },
		]
	);

	assert_eq!(
		instrs(&code, body),
		[
			Instr::Push(Literal::Int(1)),
			Instr::Store(var(0, 1)),
		]
	);
}


#[test]
fn test_elif_else() {
	let (code, _) = compile("x = 1\nif x == 0 { 1 } elif x == 1 { 2 } else { 3 }");
	let code = code.expect("compile error");

	let root = instrs(&code, code.root());
	assert_matches!(
		root.last(),
		Some(Instr::If { clauses, otherwise: Some(_) }) if clauses.len() == 2
	);
}


#[test]
fn test_multi_assignment() {
	let (code, _) = compile("a, b = 1, 2");
	let code = code.expect("compile error");

	assert_eq!(
		instrs(&code, code.root()),
		[
			Instr::Push(Literal::Int(1)),
			Instr::Push(Literal::Int(2)),
			Instr::MultiStore { vars: vec![var(0, 0), var(0, 1)].into(), arity: 2 },
		]
	);
}


#[test]
fn test_multi_assignment_mismatch_compiles() {
	let (code, _) = compile("a, b, c = 1, 2");

	assert_matches!(
		code.map(|code| instrs(&code, code.root())).as_deref(),
		Ok([.., Instr::MultiStore { arity: 2, vars }]) if vars.len() == 3
	);
}


#[test]
fn test_constants_and_builtins() {
	let (code, _) = compile("a = nil\nb = true\nc = len");
	let code = code.expect("compile error");

	let root = instrs(&code, code.root());
	assert_eq!(root[0], Instr::Push(Literal::Nil));
	assert_eq!(root[3], Instr::Push(Literal::Bool(true)));
	assert_eq!(root[6], Instr::Builtin(builtin("len")));
}


#[test]
fn test_nested_suspensions() {
	let (code, _) = compile("a = true && (if false { 1 } else { 2 } > 0)");
	let code = code.expect("compile error");

	let root = instrs(&code, code.root());
	let right = assert_matches!(
		&root[..],
		[Instr::Push(Literal::Bool(true)), Instr::And(right), Instr::Store(_)] => *right
	);

	assert_matches!(
		&instrs(&code, right)[..],
		[Instr::If { .. }, Instr::Push(Literal::Int(0)), Instr::Op { arity: 2, .. }]
	);
}


#[test]
fn test_switch() {
	let (code, _) = compile("x = 1\nswitch { case x > 0: 1 default: 2 }\nswitch x { case 1: 1 }");
	let code = code.expect("compile error");

	let root = instrs(&code, code.root());
	let switches: Vec<_> = root
		.iter()
		.filter_map(
			|instr| match instr {
				Instr::Switch { tag, cases, default } => Some((tag.is_some(), cases.len(), default.is_some())),
				_ => None,
			}
		)
		.collect();

	assert_eq!(switches, [(false, 1, true), (true, 1, false)]);
}


#[test]
fn test_for_clauses() {
	let (code, _) = compile("for { break }\nfor i = 0; i < 3; i++ { continue }\nx = 1\nfor x < 3 { x++ }");
	let code = code.expect("compile error");

	let loops: Vec<_> = code
		.block(code.root())
		.iter()
		.filter_map(
			|instr| match instr {
				Instr::For { init, condition, step, .. } => Some((init.is_some(), condition.is_some(), step.is_some())),
				_ => None,
			}
		)
		.collect();

	assert_eq!(loops, [(false, false, false), (true, true, true), (false, true, false)]);
}


#[test]
fn test_for_two_clauses() {
	assert_matches!(error_kind("for i = 0; i < 3 { }"), ErrorKind::ForClauses(2));
}


#[test]
fn test_break_outside_loop() {
	assert_matches!(error_kind("break"), ErrorKind::OutsideLoop("break"));
	assert_matches!(error_kind("continue"), ErrorKind::OutsideLoop("continue"));
	assert_matches!(error_kind("for { f = fn() { break } }"), ErrorKind::OutsideLoop("break"));
}


#[test]
fn test_spread_without_arguments() {
	assert_matches!(error_kind("f = fn(a...) { a }\nf(...)"), ErrorKind::SpreadWithoutArguments);
}


#[test]
fn test_spread_call() {
	let (code, _) = compile("f = fn(a...) { a }\nf(1, [2, 3]...)");
	let code = code.expect("compile error");

	assert_matches!(code.block(code.root()).last(), Some(Instr::CallSpread { arity: 2 }));
	assert!(code.function(FunId(0)).variadic);
}


#[test]
fn test_variadic_without_parameters() {
	assert_matches!(error_kind("f = fn(...) { 1 }"), ErrorKind::VariadicWithoutParameters);
}


#[test]
fn test_index() {
	assert_matches!(error_kind("a = [1]\na[]"), ErrorKind::IndexWithoutIndex);

	let (code, _) = compile("a = [1, 2]\na[0]\na[1:]\na[:1]\na[:]");
	let code = code.expect("compile error");

	let indexes: Vec<_> = code
		.block(code.root())
		.iter()
		.filter(|instr| matches!(instr, Instr::Slice { .. } | Instr::Op { .. }))
		.cloned()
		.collect();

	assert_eq!(
		indexes,
		[
			Instr::Op { op: builtin("slice_from"), arity: 2 },
			Instr::Op { op: builtin("get"), arity: 2 },
			Instr::Slice { low: true, high: false },
			Instr::Slice { low: false, high: true },
			Instr::Slice { low: false, high: false },
		]
	);
}


#[test]
fn test_undefined_variable() {
	let (result, _) = compile("x = 1\nprint(y)");

	let error = assert_matches!(result, Err(error) => error);
	assert_matches!(&error.kind, ErrorKind::UndefinedVariable(name) if name.as_ref() == "y");
	assert_matches!(error.pos, Some(SourcePos { line: 2, .. }));
}


#[test]
fn test_forward_reference() {
	let (code, _) = compile("f = fn() { g() }\ng = fn() { 1 }\nf()");
	let code = code.expect("compile error");

	// The forward declaration of `g` takes the first root slot.
	let f = code.function(FunId(0));
	assert_eq!(instrs(&code, f.body), [Instr::Load(var(0, 0)), Instr::Call { arity: 0 }]);
}


#[test]
fn test_duplicate_parameters() {
	let (code, interner) = compile("f = fn(x, x) { x }");
	let code = code.expect("compile error");

	let function = code.function(FunId(0));
	assert_eq!(instrs(&code, function.body), [Instr::Load(var(1, 1))]);

	let layout = code
		.frame(function.frame)
		.layout(&interner)
		.expect("layout error");

	let names: Vec<_> = layout
		.fields()
		.iter()
		.map(|field| field.name.as_ref())
		.collect();

	assert_eq!(names, ["x", "x'1"]);
}


#[test]
fn test_closure_depth() {
	let (code, _) = compile("a = 1\nf = fn(b) { g = fn(c) { a + b + c } }");
	let code = code.expect("compile error");

	assert_eq!(code.frame(code.function(FunId(0)).frame).depth(), 2);
	assert_eq!(code.frame(code.function(FunId(1)).frame).depth(), 1);
	assert_eq!(code.frame(code.root_frame()).depth(), 0);

	assert_eq!(
		instrs(&code, code.function(FunId(0)).body),
		[
			Instr::Load(var(0, 0)),
			Instr::Load(var(1, 0)),
			Instr::Op { op: builtin("add"), arity: 2 },
			Instr::Load(var(2, 0)),
			Instr::Op { op: builtin("add"), arity: 2 },
		]
	);
}


#[test]
fn test_class() {
	let (code, interner) = compile("C = class { fn get() { this.v } }\no = new C");
	let code = code.expect("compile error");

	let root = instrs(&code, code.root());
	assert_matches!(
		&root[..4],
		[
			Instr::Push(Literal::String(name)),
			Instr::MakeFunction(FunId(0)),
			Instr::MakeClass { methods: 1 },
			Instr::Store(_),
		] if name.as_ref() == b"get"
	);

	assert_matches!(root.last(), Some(Instr::Store(_)));
	assert!(root.contains(&Instr::New { arity: 0 }));

	let method = code.function(FunId(0));
	assert!(method.member);
	assert_eq!(method.params, 0);

	let this = interner.get("this").expect("this should be interned");
	assert_eq!(code.frame(method.frame).descriptors()[0].name, this);
}


#[test]
fn test_include_not_implemented() {
	assert_matches!(
		error_kind("include \"lib.ql\""),
		ErrorKind::Include { source: IncludeError::NotImplemented, .. }
	);
}


#[test]
fn test_include_skips_main() {
	let sources = Sources(vec![("lib.ql", "helper = 1\nmain { helper = 2 }")]);
	let (code, interner) = compile_with("include \"lib.ql\"\nmain { x = helper }", sources);
	let code = code.expect("compile error");

	let root = code.block(code.root());

	let mains = root
		.iter()
		.filter(|instr| matches!(instr, Instr::Main(_)))
		.count();

	assert_eq!(mains, 1);
	assert!(root.contains(&Instr::Push(Literal::Nil)));

	let lib = interner.get("lib.ql").expect("included file should be interned");
	assert!(root.contains(&Instr::Line { file: lib, line: 1 }));
}


#[test]
fn test_include_errors() {
	let sources = Sources(vec![("loop.ql", "include \"loop.ql\"")]);
	let (result, _) = compile_with("include \"loop.ql\"", sources);
	assert_matches!(result, Err(Error { kind: ErrorKind::IncludeTooDeep, .. }));

	let sources = Sources(vec![("bad.ql", "x = ")]);
	let (result, _) = compile_with("include \"bad.ql\"", sources);
	let error = assert_matches!(result, Err(error) => error);
	assert_matches!(error.kind, ErrorKind::Syntax(_));
	assert_eq!(error.file.as_ref(), "bad.ql");

	let (result, _) = compile_with("include \"missing.ql\"", Sources::default());
	assert_matches!(result, Err(Error { kind: ErrorKind::Include { source: IncludeError::Io(_), .. }, .. }));
}


#[test]
fn test_root_frame() {
	let (code, interner) = compile("a = 1\nb = 2\na = 3");
	let code = code.expect("compile error");

	assert_eq!(code.root_frame(), FrameId(0));

	let layout = code
		.frame(code.root_frame())
		.layout(&interner)
		.expect("layout error");

	assert_eq!(layout.len(), 2);
}
