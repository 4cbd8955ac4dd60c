use std::fmt::Display as _;

use super::{Error, Terminal, Token};
use crate::{
	fmt::{self, Display},
	symbol,
	term::color,
};


/// Format the list of expected terminals.
fn expected(terminals: &[Terminal], f: &mut std::fmt::Formatter) -> std::fmt::Result {
	if terminals.is_empty() {
		return Ok(());
	}

	", expected ".fmt(f)?;

	if terminals.len() > 1 {
		"one of ".fmt(f)?;
	}

	fmt::sep_by(
		terminals.iter(),
		f,
		|terminal, f| write!(f, "'{}'", color::Fg(color::Yellow, terminal.describe())),
		", ",
	)
}


impl<'a> Display<'a> for Error {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		match self {
			Self::UnexpectedEof { expected: terminals } => {
				"unexpected end of file".fmt(f)?;
				expected(terminals, f)
			}

			Self::Unexpected { token: Token { kind, pos }, expected: terminals } => {
				write!(f, "{} - unexpected '{}'", pos, fmt::Show(kind, context))?;
				expected(terminals, f)
			}

			Self::TooDeep { pos } => write!(f, "{} - expression nests too deeply", pos),
		}
	}
}


/// We need this in order to be able to implement std::error::Error.
impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		Display::fmt(self, f, &symbol::Interner::new())
	}
}
