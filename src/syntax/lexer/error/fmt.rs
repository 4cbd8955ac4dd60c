use std::fmt::{self, Display};

use super::{Error, ErrorKind};


/// Escape a byte sequence for display, keeping printable ascii.
fn escaped(bytes: &[u8], f: &mut fmt::Formatter) -> fmt::Result {
	for byte in bytes.iter().flat_map(|byte| std::ascii::escape_default(*byte)) {
		(byte as char).fmt(f)?;
	}

	Ok(())
}


impl Display for ErrorKind {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::UnexpectedEof => "unexpected end of file".fmt(f),

			Self::Unexpected(byte) => {
				"unexpected character '".fmt(f)?;
				escaped(&[*byte], f)?;
				"'".fmt(f)
			}

			Self::EmptyCharLiteral => "char literal without a character".fmt(f),

			Self::InvalidEscapeSequence(sequence) => {
				"unknown escape sequence '".fmt(f)?;
				escaped(sequence, f)?;
				"'".fmt(f)
			}

			Self::InvalidNumber(number) => {
				"malformed number literal '".fmt(f)?;
				escaped(number, f)?;
				"'".fmt(f)
			}

			Self::InvalidUtf8 => "string literal is not valid utf-8".fmt(f),
		}
	}
}


impl Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{} - {}", self.pos, self.error)
	}
}
