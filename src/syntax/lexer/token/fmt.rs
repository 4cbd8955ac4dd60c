use std::fmt::Display as _;

use super::{Keyword, Literal, Operator, Token, TokenKind};
use crate::{
	fmt::{self, Display},
	symbol,
	term::color,
};


impl std::fmt::Display for Keyword {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		color::Fg(color::Blue, self.as_str()).fmt(f)
	}
}


impl std::fmt::Display for Operator {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		color::Fg(color::Yellow, self.as_str()).fmt(f)
	}
}


impl std::fmt::Display for Literal {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::Int(i) => i.fmt(f),
			Self::Float(n) => write!(f, "{:?}", n),
			Self::Char(c) => write!(f, "'{}'", color::Bold((*c as char).escape_debug())),
			Self::String(s) => write!(f, "\"{}\"", color::Bold(s.escape_debug())),
		}
	}
}


impl<'a> Display<'a> for TokenKind {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		match self {
			Self::Identifier(symbol) => symbol.fmt(f, context),
			Self::Keyword(keyword) => keyword.fmt(f),
			Self::Operator(op) => op.fmt(f),
			Self::Literal(literal) => literal.fmt(f),
			Self::Colon => ":".fmt(f),
			Self::Comma => ",".fmt(f),
			Self::Semicolon => ";".fmt(f),
			Self::OpenParens => "(".fmt(f),
			Self::CloseParens => ")".fmt(f),
			Self::OpenBracket => "[".fmt(f),
			Self::CloseBracket => "]".fmt(f),
			Self::OpenBrace => "{".fmt(f),
			Self::CloseBrace => "}".fmt(f),
		}
	}
}


impl<'a> Display<'a> for Token {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		write!(f, "{} ({})", fmt::Show(&self.kind, context), self.pos)
	}
}
