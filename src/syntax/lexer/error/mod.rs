mod fmt;

use super::SourcePos;


/// The kind of lexical error.
#[derive(Debug)]
pub enum ErrorKind {
	/// Unexpected end of file.
	UnexpectedEof,
	/// Unexpected character.
	Unexpected(u8),
	/// Empty char literal ('').
	EmptyCharLiteral,
	/// Invalid escape sequence in char or string literal.
	InvalidEscapeSequence(Box<[u8]>),
	/// Invalid number literal, both integer and floating point.
	InvalidNumber(Box<[u8]>),
	/// String literals must be valid UTF-8.
	InvalidUtf8,
}


/// A lexical error.
#[derive(Debug)]
pub struct Error {
	pub error: ErrorKind,
	pub pos: SourcePos,
}


impl std::error::Error for Error {}


impl Error {
	pub fn unexpected_eof(pos: SourcePos) -> Self {
		Self { error: ErrorKind::UnexpectedEof, pos }
	}

	pub fn unexpected(input: u8, pos: SourcePos) -> Self {
		Self { error: ErrorKind::Unexpected(input), pos }
	}

	pub fn empty_char_literal(pos: SourcePos) -> Self {
		Self { error: ErrorKind::EmptyCharLiteral, pos }
	}

	pub fn invalid_escape_sequence(sequence: &[u8], pos: SourcePos) -> Self {
		Self {
			error: ErrorKind::InvalidEscapeSequence(sequence.into()),
			pos,
		}
	}

	pub fn invalid_number(number: &[u8], pos: SourcePos) -> Self {
		Self {
			error: ErrorKind::InvalidNumber(number.into()),
			pos,
		}
	}

	pub fn invalid_utf8(pos: SourcePos) -> Self {
		Self { error: ErrorKind::InvalidUtf8, pos }
	}
}
