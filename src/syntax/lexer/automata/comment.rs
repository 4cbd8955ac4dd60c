use super::{Cursor, Error, Root, SourcePos, State, Transition};


/// The state for lexing line comments.
#[derive(Debug)]
pub(super) struct Comment;


impl Comment {
	pub fn visit(self, cursor: &Cursor) -> Transition {
		match cursor.peek() {
			// Newline marks the end of the comment. It is left for the root state, as it may
			// terminate a statement.
			Some(b'\n') => Transition::resume(Root),

			// Otherwise, eat everything.
			_ => Transition::step(self),
		}
	}
}


impl From<Comment> for State {
	fn from(state: Comment) -> State {
		Self::Comment(state)
	}
}


/// The state for lexing block comments. Block comments don't nest.
#[derive(Debug)]
pub(super) struct BlockComment {
	/// Whether the last visited character was a star.
	star: bool,
	pos: SourcePos,
}


impl BlockComment {
	pub fn at(cursor: &Cursor) -> Self {
		Self { star: false, pos: cursor.pos() }
	}


	pub fn visit(mut self, cursor: &Cursor) -> Transition {
		match (self.star, cursor.peek()) {
			(_, None) => Transition::error(Root, Error::unexpected_eof(self.pos)),

			(true, Some(b'/')) => Transition::step(Root),

			(_, Some(c)) => {
				self.star = c == b'*';
				Transition::step(self)
			}
		}
	}
}


impl From<BlockComment> for State {
	fn from(state: BlockComment) -> State {
		Self::BlockComment(state)
	}
}
