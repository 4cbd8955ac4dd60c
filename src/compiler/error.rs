use std::io;

use crate::{frame::LayoutError, syntax::SourcePos};


/// A failure of the source inclusion handler.
#[derive(Debug, thiserror::Error)]
pub enum IncludeError {
	#[error("source inclusion is not implemented")]
	NotImplemented,

	#[error("{0}")]
	Io(#[from] io::Error),
}


/// The kind of a compilation error.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
	/// Lexical or syntactical error, rendered with its position.
	#[error("{0}")]
	Syntax(String),

	#[error("spread call without arguments")]
	SpreadWithoutArguments,

	#[error("variadic function without parameters")]
	VariadicWithoutParameters,

	#[error("index operation without an index")]
	IndexWithoutIndex,

	#[error("malformed index operation")]
	MalformedIndex,

	#[error("failed to include {path:?}: {source}")]
	Include {
		path: Box<str>,
		source: IncludeError,
	},

	#[error("includes nest too deeply")]
	IncludeTooDeep,

	#[error("for header with {0} clauses")]
	ForClauses(usize),

	#[error("{0} outside of a loop")]
	OutsideLoop(&'static str),

	#[error("undefined variable `{0}`")]
	UndefinedVariable(Box<str>),

	#[error("invalid frame layout: {0}")]
	Layout(#[from] LayoutError),

	#[error("internal compiler error: {0}")]
	Internal(&'static str),
}


/// A compilation error. The first error aborts the compilation.
#[derive(Debug, thiserror::Error)]
#[error("{file}{}: {kind}", .pos.map(|pos| format!(", {}", pos)).unwrap_or_default())]
pub struct Error {
	pub kind: ErrorKind,
	/// The unit being compiled when the error occurred.
	pub file: Box<str>,
	pub pos: Option<SourcePos>,
}
