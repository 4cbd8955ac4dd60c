use super::{engine, lexer, SourcePos};
use crate::{
	fmt::Display,
	symbol,
};


/// Syntax error.
#[derive(Debug)]
pub enum Error {
	Lexer(lexer::Error),
	Parser(engine::Error),
}


impl Error {
	/// The position of the error, if known.
	pub fn pos(&self) -> Option<SourcePos> {
		match self {
			Self::Lexer(error) => Some(error.pos),
			Self::Parser(error) => error.pos(),
		}
	}
}


impl<'a> Display<'a> for Error {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		match self {
			Self::Lexer(error) => write!(f, "{}", error),
			Self::Parser(error) => error.fmt(f, context),
		}
	}
}


/// We need this in order to be able to implement std::error::Error.
impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		Display::fmt(self, f, &symbol::Interner::new())
	}
}


impl std::error::Error for Error {}
