//! Compiled code: instruction blocks, frames and function definitions.

mod fmt;
#[cfg(test)]
mod tests;

use crate::{frame::FrameInfo, symbol::Symbol};


macro_rules! index_type {
	($(#[$attr: meta])* $name: ident, $prefix: literal) => {
		$(#[$attr])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
		pub struct $name(pub(crate) u32);

		impl $name {
			pub fn index(self) -> usize {
				self.0 as usize
			}
		}

		impl std::fmt::Display for $name {
			fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
				write!(f, concat!($prefix, "{}"), self.0)
			}
		}
	};
}


index_type!(
	/// A block of instructions in a `Code`.
	BlockId, "#"
);

index_type!(
	/// A frame in a `Code`.
	FrameId, "frame "
);

index_type!(
	/// A function definition in a `Code`.
	FunId, "fn "
);

index_type!(
	/// A builtin function in the registry.
	BuiltinId, "builtin "
);


/// A resolved variable: the frame depth and the slot within the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarRef {
	pub depth: u32,
	pub slot: u32,
}


/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
	Nil,
	Bool(bool),
	Int(i64),
	Float(f64),
	Byte(u8),
	String(Box<[u8]>),
}


/// A bytecode instruction. Instructions operate on the operand stack of the current
/// activation.
#[derive(Debug, Clone, PartialEq)]
pub enum Instr {
	/// Push a literal.
	Push(Literal),
	/// Push the value of a variable.
	Load(VarRef),
	/// Push a builtin function.
	Builtin(BuiltinId),
	/// Pop a value and store it in a variable.
	Store(VarRef),
	/// Pop a value, combine it with the variable through the operator, and store the
	/// result.
	Update { var: VarRef, op: BuiltinId },
	Inc(VarRef),
	Dec(VarRef),
	/// Pop `arity` values and store them in the variables. A single array value is
	/// unpacked.
	MultiStore { vars: Box<[VarRef]>, arity: u32 },
	/// Call a builtin operator with the topmost `arity` values.
	Op { op: BuiltinId, arity: u32 },
	/// Slice the target below the present bounds.
	Slice { low: bool, high: bool },
	/// Call the function below the topmost `arity` values.
	Call { arity: u32 },
	/// Like `Call`, but the last argument is an array that is spread into arguments.
	CallSpread { arity: u32 },
	/// Replace the top value with one of its members.
	MemberRef(Symbol),
	/// Short-circuiting conjunction with the right operand block.
	And(BlockId),
	/// Short-circuiting disjunction with the right operand block.
	Or(BlockId),
	/// Conditional with `(condition, body)` clauses.
	If {
		clauses: Box<[(BlockId, BlockId)]>,
		otherwise: Option<BlockId>,
	},
	/// Switch with `(case, body)` clauses. Without a tag, cases are conditions.
	Switch {
		tag: Option<BlockId>,
		cases: Box<[(BlockId, BlockId)]>,
		default: Option<BlockId>,
	},
	For {
		init: Option<BlockId>,
		condition: Option<BlockId>,
		step: Option<BlockId>,
		body: BlockId,
	},
	/// Create a closure over the current activation.
	MakeFunction(FunId),
	/// Create a class from the topmost `methods` name-function pairs.
	MakeClass { methods: u32 },
	/// Instantiate the class below the topmost `arity` constructor arguments.
	New { arity: u32 },
	/// Return the topmost `arity` values. Multiple values are returned as an array.
	Return { arity: u32 },
	Break,
	Continue,
	/// Register a block to run when the activation exits.
	Defer(BlockId),
	/// Stop the in-flight panic and push its value, or nil.
	Recover,
	/// Run the program entry block.
	Main(BlockId),
	/// Truncate the operand stack to the block base.
	Clear,
	/// Source position tag.
	Line { file: Symbol, line: u32 },
}


/// A function definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
	pub body: BlockId,
	pub frame: FrameId,
	/// The number of declared parameters, excluding the implicit `this`.
	pub params: u32,
	/// Whether the last parameter collects the remaining arguments.
	pub variadic: bool,
	/// Whether the function is a class member, which receives `this` in slot 0.
	pub member: bool,
}


/// An instruction stream under construction.
#[derive(Debug, Default)]
pub struct Stream {
	instrs: Vec<Instr>,
}


impl Stream {
	pub fn append(&mut self, instr: Instr) {
		self.instrs.push(instr);
	}


	/// The position of the next instruction.
	pub fn position(&self) -> usize {
		self.instrs.len()
	}


	pub fn is_empty(&self) -> bool {
		self.instrs.is_empty()
	}


	pub fn instrs(&self) -> &[Instr] {
		&self.instrs
	}
}


/// A compilation unit.
#[derive(Debug)]
pub struct Code {
	blocks: Box<[Box<[Instr]>]>,
	frames: Box<[FrameInfo]>,
	functions: Box<[Function]>,
	root: BlockId,
	root_frame: FrameId,
}


impl Code {
	pub fn block(&self, id: BlockId) -> &[Instr] {
		&self.blocks[id.index()]
	}


	pub fn frame(&self, id: FrameId) -> &FrameInfo {
		&self.frames[id.index()]
	}


	pub fn function(&self, id: FunId) -> &Function {
		&self.functions[id.index()]
	}


	/// The entry block.
	pub fn root(&self) -> BlockId {
		self.root
	}


	/// The frame of the entry block.
	pub fn root_frame(&self) -> FrameId {
		self.root_frame
	}


	pub fn blocks(&self) -> impl Iterator<Item = (BlockId, &[Instr])> {
		self.blocks
			.iter()
			.enumerate()
			.map(|(ix, block)| (BlockId(ix as u32), block.as_ref()))
	}
}


/// Collects the blocks, frames and functions of a unit while it is compiled.
#[derive(Debug, Default)]
pub struct Builder {
	blocks: Vec<Box<[Instr]>>,
	frames: Vec<FrameInfo>,
	functions: Vec<Function>,
}


impl Builder {
	/// Seal a stream into a block.
	pub fn splice_block(&mut self, stream: Stream) -> BlockId {
		let id = BlockId(self.blocks.len() as u32);
		self.blocks.push(stream.instrs.into());
		id
	}


	pub fn block(&self, id: BlockId) -> &[Instr] {
		&self.blocks[id.index()]
	}


	pub fn add_frame(&mut self, frame: FrameInfo) -> FrameId {
		let id = FrameId(self.frames.len() as u32);
		self.frames.push(frame);
		id
	}


	pub fn add_function(&mut self, function: Function) -> FunId {
		let id = FunId(self.functions.len() as u32);
		self.functions.push(function);
		id
	}


	pub fn finish(self, root: BlockId, root_frame: FrameId) -> Code {
		Code {
			blocks: self.blocks.into(),
			frames: self.frames.into(),
			functions: self.functions.into(),
			root,
			root_frame,
		}
	}
}
