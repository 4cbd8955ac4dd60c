use super::{
	Cursor,
	Keyword,
	Root,
	SourcePos,
	State,
	SymbolInterner,
	Token,
	TokenKind,
	Transition,
};


/// The state for lexing identifiers and keywords.
#[derive(Debug)]
pub(super) struct Word {
	start_offset: usize,
	pos: SourcePos,
}


impl Word {
	pub fn at(cursor: &Cursor) -> Self {
		Self { start_offset: cursor.offset(), pos: cursor.pos() }
	}


	pub fn visit(self, cursor: &Cursor, interner: &mut SymbolInterner) -> Transition {
		// We don't need to check if the first character is a number here, because the Root
		// state will only transition to this state if that is the case.
		match cursor.peek() {
			// Word character.
			Some(c) if c.is_word() => Transition::step(self),

			// If we visit EOF or a non-identifier character, we should just produce.
			_ => {
				let word = cursor.since(self.start_offset);
				let kind = to_token(word, interner);

				Transition::resume_produce(Root, Token { kind, pos: self.pos })
			}
		}
	}
}


impl From<Word> for State {
	fn from(state: Word) -> State {
		State::Word(state)
	}
}


pub fn to_token(word: &[u8], interner: &mut SymbolInterner) -> TokenKind {
	let keyword = match word {
		b"if" => Keyword::If,
		b"elif" => Keyword::Elif,
		b"else" => Keyword::Else,
		b"switch" => Keyword::Switch,
		b"case" => Keyword::Case,
		b"default" => Keyword::Default,
		b"for" => Keyword::For,
		b"break" => Keyword::Break,
		b"continue" => Keyword::Continue,
		b"fn" => Keyword::Fn,
		b"return" => Keyword::Return,
		b"defer" => Keyword::Defer,
		b"recover" => Keyword::Recover,
		b"class" => Keyword::Class,
		b"new" => Keyword::New,
		b"main" => Keyword::Main,
		b"include" => Keyword::Include,

		ident => {
			// Words are composed of ascii characters only.
			let ident = std::str::from_utf8(ident)
				.expect("identifiers should be valid ascii, which should be valid utf8");
			return TokenKind::Identifier(interner.get_or_intern(ident));
		}
	};

	TokenKind::Keyword(keyword)
}


/// Helper trait for checking if a character is a valid word constituent.
pub trait IsWord {
	fn is_word_start(&self) -> bool;
	fn is_word(&self) -> bool;
}


impl IsWord for u8 {
	fn is_word_start(&self) -> bool {
		self.is_ascii_alphabetic() || *self == b'_'
	}

	fn is_word(&self) -> bool {
		self.is_ascii_alphanumeric() || *self == b'_'
	}
}
