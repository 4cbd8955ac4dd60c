use super::{
	Cursor,
	Error,
	ErrorKind,
	Literal,
	Root,
	SourcePos,
	State,
	Token,
	TokenKind,
	Transition,
};


/// The part of a numeric literal being lexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
	/// A leading zero, which may begin a hexadecimal literal.
	Zero,
	Integer,
	/// Digits after the `0x` prefix.
	Hex { digits: bool },
	/// Digits after the dot.
	Fraction { digits: bool },
	/// The exponent, with an optional sign.
	Exponent { sign: bool, digits: bool },
}


/// The state for lexing numeric literals: decimal and hexadecimal integers, and floats
/// with an optional fraction and exponent.
#[derive(Debug)]
pub(super) struct NumberLiteral {
	start_offset: usize,
	part: Part,
	pos: SourcePos,
}


impl NumberLiteral {
	/// Begin at the first digit, which is consumed by the transition into this state.
	pub fn at(cursor: &Cursor) -> Self {
		Self {
			start_offset: cursor.offset(),
			part:
				if cursor.peek() == Some(b'0') {
					Part::Zero
				} else {
					Part::Integer
				},
			pos: cursor.pos(),
		}
	}


	pub fn visit(mut self, cursor: &Cursor) -> Transition {
		let next = cursor.peek();
		let digit = next.map_or(false, |c| c.is_ascii_digit());

		let part = match (self.part, next) {
			(Part::Zero, Some(b'x' | b'X')) => Part::Hex { digits: false },

			(Part::Zero | Part::Integer, _) if digit => Part::Integer,

			(Part::Zero | Part::Integer, Some(b'.')) => Part::Fraction { digits: false },

			(Part::Zero | Part::Integer | Part::Fraction { digits: true }, Some(b'e' | b'E')) => {
				Part::Exponent { sign: false, digits: false }
			}

			(Part::Hex { .. }, Some(c)) if c.is_ascii_hexdigit() => Part::Hex { digits: true },

			(Part::Fraction { .. }, _) if digit => Part::Fraction { digits: true },

			(Part::Exponent { sign: false, digits: false }, Some(b'+' | b'-')) => {
				Part::Exponent { sign: true, digits: false }
			}

			(Part::Exponent { sign, .. }, _) if digit => Part::Exponent { sign, digits: true },

			// A prefix, a dot or an exponent marker must be followed by a digit.
			(Part::Hex { digits: false }, next)
			| (Part::Fraction { digits: false }, next)
			| (Part::Exponent { digits: false, .. }, next) => {
				let error = match next {
					Some(value) => ErrorKind::Unexpected(value),
					None => ErrorKind::UnexpectedEof,
				};

				return Transition::error(Root, Error { error, pos: self.pos });
			}

			// Any other character ends the literal.
			_ => return match self.parse(cursor) {
				Ok(token) => Transition::resume_produce(Root, token),
				Err(error) => Transition::resume_error(Root, error),
			},
		};

		self.part = part;
		Transition::step(self)
	}


	/// Parse the consumed characters.
	fn parse(&self, cursor: &Cursor) -> Result<Token, Error> {
		let number = cursor.since(self.start_offset);

		// Number literals only contain ascii characters.
		let text = std::str::from_utf8(number)
			.map_err(|_| Error::invalid_number(number, self.pos))?;

		let literal = match self.part {
			Part::Zero | Part::Integer => text.parse().map(Literal::Int).ok(),
			Part::Hex { .. } => i64::from_str_radix(&text[2..], 16).map(Literal::Int).ok(),
			Part::Fraction { .. } | Part::Exponent { .. } => text.parse().map(Literal::Float).ok(),
		};

		match literal {
			Some(literal) => Ok(Token { kind: TokenKind::Literal(literal), pos: self.pos }),
			None => Err(Error::invalid_number(number, self.pos)),
		}
	}
}


impl From<NumberLiteral> for State {
	fn from(state: NumberLiteral) -> State {
		State::NumberLiteral(state)
	}
}
