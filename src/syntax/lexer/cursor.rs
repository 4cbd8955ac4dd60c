use super::SourcePos;


/// A cursor over the source code bytes, tracking the human readable position.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
	input: &'a [u8],
	offset: usize,
	pos: SourcePos,
}


impl<'a> Cursor<'a> {
	pub fn pos(&self) -> SourcePos {
		self.pos
	}


	/// The offset of the current byte.
	pub fn offset(&self) -> usize {
		self.offset
	}


	pub fn is_eof(&self) -> bool {
		self.offset >= self.input.len()
	}


	/// The current byte, if any.
	pub fn peek(&self) -> Option<u8> {
		self.input.get(self.offset).copied()
	}


	/// The bytes from `start` up to the current one, exclusive.
	pub fn since(&self, start: usize) -> &'a [u8] {
		&self.input[start .. self.offset]
	}


	/// The bytes from `start` up to the current one, inclusive.
	pub fn through(&self, start: usize) -> &'a [u8] {
		let end = (self.offset + 1).min(self.input.len());
		&self.input[start .. end]
	}


	/// Advance to the next byte. Stepping at the end of the input has no effect.
	pub fn step(&mut self) {
		if let Some(byte) = self.peek() {
			self.pos.visit(byte);
			self.offset += 1;
		}
	}
}


impl<'a> From<&'a [u8]> for Cursor<'a> {
	fn from(input: &'a [u8]) -> Self {
		Self {
			input,
			offset: 0,
			pos: SourcePos::default(),
		}
	}
}
