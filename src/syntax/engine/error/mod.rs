mod fmt;

use super::{SourcePos, Terminal, Token};


/// A syntax error.
#[derive(Debug)]
pub enum Error {
	/// Premature end of file.
	UnexpectedEof { expected: Box<[Terminal]> },
	/// Unexpected token, at the furthest position reached by the parser.
	Unexpected { token: Token, expected: Box<[Terminal]> },
	/// The input nests too deeply.
	TooDeep { pos: SourcePos },
}


impl Error {
	/// Create an error signaling unexpected EOF, and what was expected.
	pub fn unexpected_eof(expected: Box<[Terminal]>) -> Self {
		Self::UnexpectedEof { expected }
	}


	/// Create an error signaling an unexpected token, and what was expected.
	pub fn unexpected(token: Token, expected: Box<[Terminal]>) -> Self {
		Self::Unexpected { token, expected }
	}


	/// Create an error signaling excessive nesting.
	pub fn too_deep(pos: SourcePos) -> Self {
		Self::TooDeep { pos }
	}


	/// The position of the error, if known.
	pub fn pos(&self) -> Option<SourcePos> {
		match self {
			Self::UnexpectedEof { .. } => None,
			Self::Unexpected { token, .. } => Some(token.pos),
			Self::TooDeep { pos } => Some(*pos),
		}
	}
}


impl std::error::Error for Error {}
