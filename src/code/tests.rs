use super::*;
use crate::{
	fmt,
	frame::{SlotType, VarDescriptor},
	runtime,
	symbol,
};


fn stream(instrs: Vec<Instr>) -> Stream {
	let mut stream = Stream::default();

	for instr in instrs {
		stream.append(instr);
	}

	stream
}


#[test]
fn test_stream_position() {
	let mut stream = Stream::default();
	assert!(stream.is_empty());
	assert_eq!(stream.position(), 0);

	stream.append(Instr::Push(Literal::Int(1)));
	stream.append(Instr::Clear);

	assert_eq!(stream.position(), 2);
	assert_eq!(stream.instrs(), [Instr::Push(Literal::Int(1)), Instr::Clear]);
}


#[test]
fn test_splice_block() {
	let mut builder = Builder::default();

	let first = builder.splice_block(stream(vec![Instr::Break]));
	let second = builder.splice_block(Stream::default());

	assert_eq!(first, BlockId(0));
	assert_eq!(second, BlockId(1));
	assert_eq!(builder.block(first), [Instr::Break]);
	assert!(builder.block(second).is_empty());

	let frame = builder.add_frame(FrameInfo::new(Box::default(), 0));
	let code = builder.finish(first, frame);

	assert_eq!(code.root(), first);
	assert_eq!(code.root_frame(), FrameId(0));
	assert_eq!(code.blocks().count(), 2);
}


#[test]
fn test_disassembly() {
	let mut interner = symbol::Interner::new();
	let file = interner.get_or_intern("main.ql");
	let x = interner.get_or_intern("x");
	let add = runtime::registry()
		.lookup("add")
		.expect("missing builtin");

	let mut builder = Builder::default();

	let body = builder.splice_block(
		stream(
			vec![
				Instr::Load(VarRef { depth: 1, slot: 0 }),
				Instr::Push(Literal::Float(1.0)),
				Instr::Op { op: add, arity: 2 },
				Instr::Return { arity: 1 },
			]
		)
	);

	let descriptors = vec![VarDescriptor { name: x, ty: SlotType::Any, depth: 1, slot: 0 }];
	let frame = builder.add_frame(FrameInfo::new(descriptors.into(), 1));
	let function = builder.add_function(
		Function { body, frame, params: 1, variadic: false, member: false }
	);

	let root = builder.splice_block(
		stream(
			vec![
				Instr::Line { file, line: 1 },
				Instr::MakeFunction(function),
				Instr::Store(VarRef { depth: 0, slot: 0 }),
				Instr::Push(Literal::String(Box::from(&b"a\"b"[..]))),
			]
		)
	);

	let descriptors = vec![VarDescriptor { name: interner.get_or_intern("f"), ty: SlotType::Any, depth: 0, slot: 0 }];
	let root_frame = builder.add_frame(FrameInfo::new(descriptors.into(), 0));

	let code = builder.finish(root, root_frame);

	assert_eq!(
		fmt::to_string(&code, &interner),
		"frame 0 (depth 1): { x: any }\n\
		 frame 1 (depth 0): { f: any }\n\
		 fn 0: #0, frame 0, params 1\n\
		 #0:\n\
		 \tload 1:0\n\
		 \tpush 1.0\n\
		 \top add 2\n\
		 \treturn 1\n\
		 #1:\n\
		 \tline main.ql:1\n\
		 \tfunction fn 0\n\
		 \tstore 0:0\n\
		 \tpush \"a\\\"b\"\n\
		 entry: #1, frame 1"
	);
}


#[test]
fn test_control_instrs() {
	let interner = symbol::Interner::new();
	let show = |instr: Instr| fmt::to_string(&instr, &interner);

	assert_eq!(
		show(Instr::If { clauses: vec![(BlockId(0), BlockId(1))].into(), otherwise: Some(BlockId(2)) }),
		"if #0 => #1 else #2"
	);

	assert_eq!(
		show(Instr::Switch { tag: None, cases: vec![(BlockId(0), BlockId(1))].into(), default: None }),
		"switch #0 => #1"
	);

	assert_eq!(
		show(Instr::For { init: None, condition: Some(BlockId(3)), step: None, body: BlockId(4) }),
		"for cond #3 body #4"
	);

	assert_eq!(
		show(Instr::MultiStore { vars: vec![VarRef { depth: 0, slot: 1 }, VarRef { depth: 1, slot: 0 }].into(), arity: 2 }),
		"mstore [0:1, 1:0] 2"
	);

	assert_eq!(show(Instr::Slice { low: true, high: false }), "slice low");
	assert_eq!(show(Instr::Push(Literal::Byte(b'\n'))), "push '\\n'");
}
