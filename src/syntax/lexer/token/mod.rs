mod fmt;

use super::SourcePos;
use crate::symbol::Symbol;


/// All keywords in the language.
/// The constants `nil`, `true` and `false` are plain identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
	If,
	Elif,
	Else,
	Switch,
	Case,
	Default,
	For,
	Break,
	Continue,
	Fn,
	Return,
	Defer,
	Recover,
	Class,
	New,
	Main,
	Include,
}


impl Keyword {
	/// The source text of the keyword.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::If => "if",
			Self::Elif => "elif",
			Self::Else => "else",
			Self::Switch => "switch",
			Self::Case => "case",
			Self::Default => "default",
			Self::For => "for",
			Self::Break => "break",
			Self::Continue => "continue",
			Self::Fn => "fn",
			Self::Return => "return",
			Self::Defer => "defer",
			Self::Recover => "recover",
			Self::Class => "class",
			Self::New => "new",
			Self::Main => "main",
			Self::Include => "include",
		}
	}
}


/// Literals for non-composite types.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
	Int(i64),
	Float(f64),
	Char(u8),
	// String literals are not interned because they probably won't be repeated very often.
	String(Box<str>),
}


/// Operators, including assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
	Plus,  // +
	Minus, // -
	Times, // *
	Div,   // /
	Mod,   // %

	Equals,        // ==
	NotEquals,     // !=
	Greater,       // >
	GreaterEquals, // >=
	Lower,         // <
	LowerEquals,   // <=

	Not, // !
	And, // &&
	Or,  // ||

	Assign,       // =
	PlusAssign,   // +=
	MinusAssign,  // -=
	TimesAssign,  // *=
	DivAssign,    // /=
	ModAssign,    // %=
	Increment,    // ++
	Decrement,    // --

	Dot,      // .
	Ellipsis, // ...
}


impl Operator {
	/// The source text of the operator.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Plus => "+",
			Self::Minus => "-",
			Self::Times => "*",
			Self::Div => "/",
			Self::Mod => "%",
			Self::Equals => "==",
			Self::NotEquals => "!=",
			Self::Greater => ">",
			Self::GreaterEquals => ">=",
			Self::Lower => "<",
			Self::LowerEquals => "<=",
			Self::Not => "!",
			Self::And => "&&",
			Self::Or => "||",
			Self::Assign => "=",
			Self::PlusAssign => "+=",
			Self::MinusAssign => "-=",
			Self::TimesAssign => "*=",
			Self::DivAssign => "/=",
			Self::ModAssign => "%=",
			Self::Increment => "++",
			Self::Decrement => "--",
			Self::Dot => ".",
			Self::Ellipsis => "...",
		}
	}
}


/// All possible kinds of token in Quill.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
	Identifier(Symbol),
	Keyword(Keyword),
	Operator(Operator),
	Literal(Literal),

	Colon,     // :
	Comma,     // ,
	Semicolon, // ; or an inserted line break

	OpenParens,  // (
	CloseParens, // )

	OpenBracket,  // [
	CloseBracket, // ]

	OpenBrace,  // {
	CloseBrace, // }
}


impl TokenKind {
	/// Check if a line break after this token terminates the statement.
	pub fn ends_statement(&self) -> bool {
		matches!(
			self,
			Self::Identifier(_)
				| Self::Literal(_)
				| Self::CloseParens
				| Self::CloseBracket
				| Self::CloseBrace
				| Self::Operator(Operator::Increment)
				| Self::Operator(Operator::Decrement)
				| Self::Keyword(Keyword::Return)
				| Self::Keyword(Keyword::Break)
				| Self::Keyword(Keyword::Continue)
		)
	}
}


/// A lexical token.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
	pub kind: TokenKind,
	pub pos: SourcePos,
}
