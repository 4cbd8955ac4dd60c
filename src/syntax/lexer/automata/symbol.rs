use super::{
	BlockComment,
	Comment,
	Cursor,
	Error,
	Operator,
	Root,
	SourcePos,
	State,
	Token,
	TokenKind,
	Transition,
};


/// The state for lexing multi-character symbols, including comment openers.
#[derive(Debug)]
pub(super) struct Symbol {
	first: u8,
	pos: SourcePos,
}


impl Symbol {
	pub fn from_first(first: u8, cursor: &Cursor) -> Self {
		Self { first, pos: cursor.pos() }
	}


	pub fn visit(self, cursor: &Cursor) -> Transition {
		let unexpected = |input| Transition::resume_error(Root, Error::unexpected(input, self.pos));
		let operator = |op| Token { kind: TokenKind::Operator(op), pos: self.pos };

		let produce = |op| Transition::produce(Root, operator(op));
		let skip_produce = |op| Transition::resume_produce(Root, operator(op));

		match (self.first, cursor.peek()) {
			(b'/', Some(b'/')) => Transition::step(Comment),
			(b'/', Some(b'*')) => Transition::step(BlockComment::at(cursor)),
			(b'/', Some(b'=')) => produce(Operator::DivAssign),
			(b'/', _) => skip_produce(Operator::Div),

			(b'+', Some(b'+')) => produce(Operator::Increment),
			(b'+', Some(b'=')) => produce(Operator::PlusAssign),
			(b'+', _) => skip_produce(Operator::Plus),

			(b'-', Some(b'-')) => produce(Operator::Decrement),
			(b'-', Some(b'=')) => produce(Operator::MinusAssign),
			(b'-', _) => skip_produce(Operator::Minus),

			(b'*', Some(b'=')) => produce(Operator::TimesAssign),
			(b'*', _) => skip_produce(Operator::Times),

			(b'%', Some(b'=')) => produce(Operator::ModAssign),
			(b'%', _) => skip_produce(Operator::Mod),

			(b'>', Some(b'=')) => produce(Operator::GreaterEquals),
			(b'>', _) => skip_produce(Operator::Greater),

			(b'<', Some(b'=')) => produce(Operator::LowerEquals),
			(b'<', _) => skip_produce(Operator::Lower),

			(b'=', Some(b'=')) => produce(Operator::Equals),
			(b'=', _) => skip_produce(Operator::Assign),

			(b'!', Some(b'=')) => produce(Operator::NotEquals),
			(b'!', _) => skip_produce(Operator::Not),

			(b'&', Some(b'&')) => produce(Operator::And),
			(b'&', _) => unexpected(self.first),

			(b'|', Some(b'|')) => produce(Operator::Or),
			(b'|', _) => unexpected(self.first),

			(b'.', Some(b'.')) => Transition::step(Ellipsis { pos: self.pos }),
			(b'.', _) => skip_produce(Operator::Dot),

			// We must have covered all possibilites for the first character. The peeked
			// character is wildcarded, which will cover everthing including EOF (None).
			_ => unreachable!("invalid first character in symbol state"),
		}
	}
}


impl From<Symbol> for State {
	fn from(state: Symbol) -> State {
		Self::Symbol(state)
	}
}


/// The state after two dots. Only the ellipsis may follow.
#[derive(Debug)]
pub(super) struct Ellipsis {
	pos: SourcePos,
}


impl Ellipsis {
	pub fn visit(self, cursor: &Cursor) -> Transition {
		match cursor.peek() {
			Some(b'.') => Transition::produce(
				Root,
				Token { kind: TokenKind::Operator(Operator::Ellipsis), pos: self.pos },
			),

			Some(c) => Transition::resume_error(Root, Error::unexpected(c, cursor.pos())),

			None => Transition::resume_error(Root, Error::unexpected_eof(cursor.pos())),
		}
	}
}


impl From<Ellipsis> for State {
	fn from(state: Ellipsis) -> State {
		Self::Ellipsis(state)
	}
}


/// Helper for symbols.
pub enum SymbolChar {
	/// Not a symbol character.
	None,
	/// Some symbols are single characters. We can produce them straight away.
	Single(TokenKind),
	/// Others may have more characters, so we must handle those separately.
	Double { first: u8 },
}


impl SymbolChar {
	pub fn from_first(first: u8) -> Self {
		let token = Self::Single;
		let double = |c| Self::Double { first: c };

		match first {
			// Single character.
			b':' => token(TokenKind::Colon),
			b',' => token(TokenKind::Comma),
			b';' => token(TokenKind::Semicolon),
			b'(' => token(TokenKind::OpenParens),
			b')' => token(TokenKind::CloseParens),
			b'[' => token(TokenKind::OpenBracket),
			b']' => token(TokenKind::CloseBracket),
			b'{' => token(TokenKind::OpenBrace),
			b'}' => token(TokenKind::CloseBrace),

			// Multiple characters.
			b'/' | b'+' | b'-' | b'*' | b'%' => double(first),
			b'>' | b'<' | b'=' | b'!' => double(first),
			b'&' | b'|' | b'.' => double(first),

			// Not a symbol character:
			_ => SymbolChar::None,
		}
	}
}
