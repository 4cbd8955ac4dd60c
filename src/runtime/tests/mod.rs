use std::{io, path::Path, thread};

use assert_matches::assert_matches;

use crate::{
	compiler::Compiler,
	fmt,
	symbol,
	syntax::Source,
	tests,
};
use super::{Panic, Runtime, Value};


/// Compile and run a program, collecting its output.
fn run_with<F>(input: &str, configure: F) -> (Result<String, Panic>, String)
where
	F: for<'a> FnOnce(Runtime<'a>) -> Runtime<'a>,
{
	let mut interner = symbol::Interner::new();
	let source = Source::from_str(Path::new("<test>"), input);

	let code = Compiler::new(&mut interner)
		.compile(&source)
		.unwrap_or_else(|error| panic!("compile error: {}", error));

	let mut output = Vec::new();

	let result = {
		let mut runtime = configure(Runtime::new(&code, &interner).with_output(&mut output));
		runtime.run()
	};

	let result = result.map(|value| fmt::to_string(&value, &interner));
	let output = String::from_utf8(output).expect("invalid utf-8 output");

	(result, output)
}


fn eval(input: &str) -> Result<String, Panic> {
	run_with(input, |runtime| runtime).0
}


fn output(input: &str) -> String {
	let (result, output) = run_with(input, |runtime| runtime);
	assert_matches!(result, Ok(_));
	output
}


fn test_dir<P, F>(path: P, mut check: F) -> io::Result<()>
where
	P: AsRef<Path>,
	F: FnMut(&Result<Value, Panic>) -> bool,
{
	tests::util::test_dir(
		path,
		move |path, file| {
			let mut interner = symbol::Interner::new();
			let source = Source::from_reader(path, file)?;

			let code = match Compiler::new(&mut interner).compile(&source) {
				Ok(code) => code,
				Err(error) => panic!("{}", error),
			};

			let result = Runtime::new(&code, &interner)
				.with_output(io::sink())
				.run();

			if !check(&result) {
				match result {
					Ok(value) => panic!(
						"File {}: expected panic, got {}",
						path.display(),
						fmt::Show(&value, &interner)
					),
					Err(panic) => panic!("{}", fmt::Show(&panic, &interner)),
				}
			}

			Ok(())
		}
	)
}


#[test]
fn test_positive() -> io::Result<()> {
	test_dir(
		"src/runtime/tests/data/positive",
		Result::is_ok
	)
}


#[test]
fn test_negative() -> io::Result<()> {
	test_dir(
		"src/runtime/tests/data/negative",
		Result::is_err
	)
}


#[test]
fn test_arithmetic() {
	assert_matches!(eval("1 + 2 * 3").as_deref(), Ok("7"));
	assert_matches!(eval("7 % 4 - 10 / 2").as_deref(), Ok("-2"));
	assert_matches!(eval("1 + 0.5").as_deref(), Ok("1.5"));
	assert_matches!(eval("\"ab\" + \"cd\"").as_deref(), Ok("\"abcd\""));
	assert_matches!(eval("1 / 0"), Err(Panic::DivisionByZero { .. }));
	assert_matches!(eval("1 + nil"), Err(Panic::InvalidOperand { .. }));
}


#[test]
fn test_block_value() {
	assert_matches!(eval("x = 1; x + 1").as_deref(), Ok("2"));
	assert_matches!(eval("x = 1;").as_deref(), Ok("nil"));
	assert_matches!(eval("if false { 1 }").as_deref(), Ok("nil"));
	assert_matches!(eval("if 1 > 2 { 1 } elif 2 > 1 { 2 } else { 3 }").as_deref(), Ok("2"));
}


#[test]
fn test_print() {
	assert_eq!(output("println(\"a\", 1, [1, \"x\"])\nprint('b')"), "a 1 [1, \"x\"]\nb");
}


#[test]
fn test_closures() {
	let program = "
		counter = fn() {
			n = 0
			return fn() { n++; return n }
		}
		c = counter()
		c()
		c()";

	assert_matches!(eval(program).as_deref(), Ok("2"));
}


#[test]
fn test_forward_reference() {
	let program = "
		f = fn() { return g() }
		g = fn() { return 5 }
		f()";

	assert_matches!(eval(program).as_deref(), Ok("5"));
}


#[test]
fn test_loops() {
	assert_matches!(eval("s = 0\nfor i = 0; i < 5; i++ { s += i }\ns").as_deref(), Ok("10"));
	assert_matches!(eval("i = 0\nfor { i++; if i == 3 { break } }\ni").as_deref(), Ok("3"));
	assert_matches!(
		eval("s = 0\nfor i = 0; i < 5; i++ { if i % 2 == 0 { continue }; s += i }\ns").as_deref(),
		Ok("4")
	);
	assert_matches!(eval("for 1 { }"), Err(Panic::InvalidCondition { .. }));
}


#[test]
fn test_switch() {
	let program = "
		name = fn(x) {
			return switch x { case 1: \"one\" case 2: \"two\" default: \"many\" }
		}
		[name(1), name(2), name(3)]";

	assert_matches!(eval(program).as_deref(), Ok("[\"one\", \"two\", \"many\"]"));
	assert_matches!(eval("x = 5\nswitch { case x < 3: 1 case x < 10: 2 }").as_deref(), Ok("2"));
}


#[test]
fn test_multi_assignment() {
	assert_matches!(eval("a, b = 1, 2\nb - a").as_deref(), Ok("1"));
	assert_matches!(eval("a, b = [3, 4]\na * b").as_deref(), Ok("12"));
	assert_matches!(
		eval("a, b, c = 1, 2"),
		Err(Panic::AssignmentMismatch { targets: 3, values: 2, .. })
	);
}


#[test]
fn test_variadic() {
	let program = "
		f = fn(a, rest...) { return [a, len(rest)] }
		[f(1), f(1, 2, 3), f([4, 5, 6]...)]";

	assert_matches!(eval(program).as_deref(), Ok("[[1, 0], [1, 2], [4, 2]]"));
	assert_matches!(eval("f = fn(a, b) { return a }\nf(1)"), Err(Panic::InvalidArgs { supplied: 1, expected: 2, .. }));
}


#[test]
fn test_collections() {
	assert_matches!(eval("a = [1, 2, 3, 4]\na[1:3]").as_deref(), Ok("[2, 3]"));
	assert_matches!(eval("a = [1, 2, 3, 4]\n[a[:1], a[3:], len(a[:])]").as_deref(), Ok("[[1], [4], 4]"));
	assert_matches!(eval("a = [1, 2]\na[2]"), Err(Panic::IndexOutOfBounds { .. }));
	assert_matches!(eval("m = {\"a\": 1, \"b\": 2}\nm[\"b\"] + m.a").as_deref(), Ok("3"));
	assert_matches!(eval("s = \"hello\"\ns[1:3]").as_deref(), Ok("\"el\""));
}


#[test]
fn test_cyclic_containers() {
	assert_matches!(eval("d = {}\nset(d, d, 1)"), Err(Panic::InvalidOperand { .. }));
	assert_matches!(eval("d = {}\nset(d, \"k\", [1, d])"), Err(Panic::InvalidOperand { .. }));
	assert_matches!(eval("a = []\nappend(a, a)"), Err(Panic::InvalidOperand { .. }));
	assert_matches!(eval("a = [0]\nset(a, 0, {1: a})"), Err(Panic::InvalidOperand { .. }));

	// Copies of the contents are not the container itself.
	assert_matches!(eval("a = [1]\nappend(a, a[:])\nlen(a)").as_deref(), Ok("2"));
	assert_matches!(eval("d = {}\ne = {}\nset(d, e, 1)\nd[{}]").as_deref(), Ok("1"));
}


#[test]
fn test_classes() {
	let program = "
		Point = class {
			fn init(x, y) { set(this, \"x\", x, \"y\", y) }
			fn sum() { return this.x + this.y }
		}
		p = new Point(1, 2)
		p.sum()";

	assert_matches!(eval(program).as_deref(), Ok("3"));
	assert_matches!(eval("C = class { }\no = new C\no.missing"), Err(Panic::UnknownMember { .. }));
}


#[test]
fn test_defer_order() {
	let program = "
		f = fn() {
			defer println(1)
			defer println(2)
			return 0
		}
		f()
	";

	assert_eq!(output(program), "2\n1\n");
}


#[test]
fn test_recover() {
	let program = "
		f = fn() {
			defer println(recover())
			panic(\"boom\")
		}
		f()
		println(\"after\")
	";

	assert_eq!(output(program), "boom\nafter\n");

	let program = "
		f = fn() {
			defer println(recover())
			return 1 / 0
		}
		f()
	";

	assert_eq!(output(program), "division by zero\n");
	assert_matches!(eval("recover()").as_deref(), Ok("nil"));
}


#[test]
fn test_unrecovered_panic() {
	let program = "
		f = fn() {
			defer println(\"deferred\")
			panic(42)
		}
		f()
	";

	let (result, output) = run_with(program, |runtime| runtime);

	assert_matches!(result, Err(Panic::User { value: Value::Int(42), .. }));
	assert_eq!(output, "deferred\n");
}


#[test]
fn test_stack_overflow() {
	let program = "
		f = fn(n) {
			if n == 0 { return 0 }
			return f(n - 1)
		}
		f(10)";

	assert_matches!(eval(program).as_deref(), Ok("0"));

	let (result, _) = run_with(program, |runtime| runtime.with_max_depth(4));
	assert_matches!(result, Err(Panic::StackOverflow { .. }));
}


#[test]
fn test_unbounded_recursion_on_spawned_thread() {
	// Spawned threads get the default stack size, which is smaller than the main thread's.
	let handle = thread::Builder::new()
		.spawn(
			|| {
				let path = Path::new(env!("CARGO_MANIFEST_DIR"))
					.join("src/runtime/tests/data/negative/recursion.ql");
				let source = Source::from_path(path).expect("failed to read script");

				let mut interner = symbol::Interner::new();
				let code = Compiler::new(&mut interner)
					.compile(&source)
					.unwrap_or_else(|error| panic!("compile error: {}", error));

				let result = Runtime::new(&code, &interner)
					.with_output(io::sink())
					.run();

				matches!(result, Err(Panic::StackOverflow { .. }))
			}
		)
		.expect("failed to spawn thread");

	assert_matches!(handle.join(), Ok(true));
}


#[test]
fn test_root_variables() {
	let mut interner = symbol::Interner::new();
	let source = Source::from_str(Path::new("<test>"), "total = total + 1\nf = fn(local) { local }");

	let code = Compiler::new(&mut interner)
		.compile(&source)
		.unwrap_or_else(|error| panic!("compile error: {}", error));

	let mut runtime = Runtime::new(&code, &interner).with_output(io::sink());

	assert_matches!(runtime.global("total"), None);
	assert!(runtime.globals().is_empty());

	assert_matches!(runtime.set_global("total", Value::Int(41)), Ok(true));
	assert_matches!(runtime.set_global("missing", Value::Int(0)), Ok(false));
	assert_matches!(runtime.set_global("local", Value::Int(0)), Ok(false));

	assert_matches!(runtime.run(), Ok(_));
	assert_matches!(runtime.global("total"), Some(Value::Int(42)));

	// Root variables persist across runs.
	assert_matches!(runtime.run(), Ok(_));
	assert_matches!(runtime.global("total"), Some(Value::Int(43)));

	let names: Vec<&str> = runtime
		.globals()
		.into_iter()
		.map(|(name, _)| name)
		.collect();

	assert_eq!(names, ["total", "f"]);
	assert_matches!(runtime.global("f"), Some(Value::Function(_)));
	assert_matches!(runtime.global("local"), None);
}


#[test]
fn test_self_referencing_object() {
	let program = "
		C = class { }
		o = new C
		set(o, \"me\", o)
		o";

	assert_matches!(eval(program).as_deref(), Ok("object{\"me\": object{...}}"));
}


#[test]
fn test_main() {
	assert_matches!(eval("x = 1\nmain { x = 2 }\nx").as_deref(), Ok("2"));
}


#[test]
fn test_panic_position() {
	let (result, _) = run_with("x = 1\n\ny = x / 0", |runtime| runtime);

	let panic = assert_matches!(result, Err(panic) => panic);
	assert_eq!(panic.pos().line, 3);
}
