pub mod engine;
mod error;
pub mod grammar;
pub mod lexer;
mod source;
#[cfg(test)]
mod tests;

use crate::symbol;
pub use engine::{Event, Interpreter, Parse};
pub use error::Error;
use lexer::{Cursor, Lexer, Token};
pub use source::{Source, SourcePos};


/// Syntactical analysis of a compilation unit: the token list and the event log produced
/// by matching the grammar over it.
#[derive(Debug)]
pub struct Analysis {
	pub tokens: Box<[Token]>,
	pub parse: Parse,
}


impl Analysis {
	/// Perform syntax analysis in the given source. The first error aborts the analysis.
	pub fn analyze(source: &Source, interner: &mut symbol::Interner) -> Result<Self, Error> {
		let cursor = Cursor::from(source.contents.as_ref());

		let tokens: Box<[Token]> = Lexer::new(cursor, interner)
			.collect::<Result<_, _>>()
			.map_err(Error::Lexer)?;

		let parse = Parse::new(&tokens).map_err(Error::Parser)?;

		Ok(Self { tokens, parse })
	}


	/// Deliver the parse events to the interpreter.
	pub fn replay<I>(&self, interpreter: &mut I) -> Result<(), I::Error>
	where
		I: Interpreter,
	{
		self.parse.replay(&self.tokens, interpreter)
	}
}
