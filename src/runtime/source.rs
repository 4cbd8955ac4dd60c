use gc::{Finalize, Trace};

use crate::{fmt::Display, symbol::{self, Symbol}};


/// A position in the executed code, as set by the last line tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SourcePos {
	pub file: Symbol,
	pub line: u32,
}


impl SourcePos {
	pub fn new(file: Symbol, line: u32) -> Self {
		Self { file, line }
	}
}


impl Finalize for SourcePos { }


unsafe impl Trace for SourcePos {
	gc::unsafe_empty_trace!();
}


impl<'a> Display<'a> for SourcePos {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		write!(f, "{}:{}", context.lookup(self.file), self.line)
	}
}
