use crate::{
	fmt::{self, Display},
	runtime,
	symbol,
};
use super::{BlockId, Code, Function, Instr, Literal, VarRef};


impl std::fmt::Display for VarRef {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "{}:{}", self.depth, self.slot)
	}
}


impl std::fmt::Display for Literal {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::Nil => f.write_str("nil"),
			Self::Bool(b) => write!(f, "{}", b),
			Self::Int(int) => write!(f, "{}", int),
			Self::Float(float) => write!(f, "{:#?}", float),
			Self::Byte(byte) => write!(f, "'{}'", (*byte as char).escape_debug()),
			Self::String(string) => write!(f, "\"{}\"", String::from_utf8_lossy(string).escape_debug()),
		}
	}
}


impl std::fmt::Display for Function {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "{}, {}, params {}", self.body, self.frame, self.params)?;

		if self.variadic {
			f.write_str(" variadic")?;
		}

		if self.member {
			f.write_str(" member")?;
		}

		Ok(())
	}
}


fn clauses(clauses: &[(BlockId, BlockId)], f: &mut std::fmt::Formatter) -> std::fmt::Result {
	fmt::sep_by(
		clauses.iter(),
		f,
		|(condition, body), f| write!(f, "{} => {}", condition, body),
		", ",
	)
}


fn optional(label: &str, block: Option<BlockId>, f: &mut std::fmt::Formatter) -> std::fmt::Result {
	match block {
		Some(block) => write!(f, " {} {}", label, block),
		None => Ok(()),
	}
}


impl<'a> Display<'a> for Instr {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		let registry = runtime::registry();

		match self {
			Self::Push(literal) => write!(f, "push {}", literal),
			Self::Load(var) => write!(f, "load {}", var),
			Self::Builtin(id) => write!(f, "builtin {}", registry.name(*id)),
			Self::Store(var) => write!(f, "store {}", var),
			Self::Update { var, op } => write!(f, "update {} {}", var, registry.name(*op)),
			Self::Inc(var) => write!(f, "inc {}", var),
			Self::Dec(var) => write!(f, "dec {}", var),

			Self::MultiStore { vars, arity } => {
				f.write_str("mstore [")?;
				fmt::sep_by(vars.iter(), f, |var, f| write!(f, "{}", var), ", ")?;
				write!(f, "] {}", arity)
			}

			Self::Op { op, arity } => write!(f, "op {} {}", registry.name(*op), arity),

			Self::Slice { low, high } => {
				f.write_str("slice")?;

				if *low {
					f.write_str(" low")?;
				}

				if *high {
					f.write_str(" high")?;
				}

				Ok(())
			}

			Self::Call { arity } => write!(f, "call {}", arity),
			Self::CallSpread { arity } => write!(f, "call... {}", arity),
			Self::MemberRef(name) => write!(f, "mref {}", context.lookup(*name)),
			Self::And(block) => write!(f, "and {}", block),
			Self::Or(block) => write!(f, "or {}", block),

			Self::If { clauses: branches, otherwise } => {
				f.write_str("if ")?;
				clauses(branches, f)?;
				optional("else", *otherwise, f)
			}

			Self::Switch { tag, cases, default } => {
				f.write_str("switch")?;
				optional("tag", *tag, f)?;
				f.write_str(" ")?;
				clauses(cases, f)?;
				optional("default", *default, f)
			}

			Self::For { init, condition, step, body } => {
				f.write_str("for")?;
				optional("init", *init, f)?;
				optional("cond", *condition, f)?;
				optional("step", *step, f)?;
				write!(f, " body {}", body)
			}

			Self::MakeFunction(id) => write!(f, "function {}", id),
			Self::MakeClass { methods } => write!(f, "class {}", methods),
			Self::New { arity } => write!(f, "new {}", arity),
			Self::Return { arity } => write!(f, "return {}", arity),
			Self::Break => f.write_str("break"),
			Self::Continue => f.write_str("continue"),
			Self::Defer(block) => write!(f, "defer {}", block),
			Self::Recover => f.write_str("recover"),
			Self::Main(block) => write!(f, "main {}", block),
			Self::Clear => f.write_str("clear"),
			Self::Line { file, line } => write!(f, "line {}:{}", context.lookup(*file), line),
		}
	}
}


impl<'a> Display<'a> for Code {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		for (ix, frame) in self.frames.iter().enumerate() {
			write!(f, "frame {} (depth {}): ", ix, frame.depth())?;

			match frame.layout(context) {
				Ok(layout) => writeln!(f, "{}", layout)?,
				Err(error) => writeln!(f, "<{}>", error)?,
			}
		}

		for (ix, function) in self.functions.iter().enumerate() {
			writeln!(f, "fn {}: {}", ix, function)?;
		}

		for (id, block) in self.blocks() {
			writeln!(f, "{}:", id)?;

			for instr in block {
				writeln!(f, "\t{}", fmt::Show(instr, context))?;
			}
		}

		write!(f, "entry: {}, {}", self.root, self.root_frame)
	}
}
