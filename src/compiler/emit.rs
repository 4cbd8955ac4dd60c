use std::mem;

use super::ErrorKind;
use crate::code::{self, BlockId, Instr, Stream};


/// A suspended stream, and the blocks sealed since the suspension.
#[derive(Debug)]
struct Suspension {
	outer: Stream,
	sealed: Vec<BlockId>,
}


/// Instruction emission: the current stream, the suspended streams, the sealed blocks
/// awaiting their construct, and the arity stack.
#[derive(Debug, Default)]
pub struct Emitter {
	pub code: code::Builder,
	stream: Stream,
	suspended: Vec<Suspension>,
	pieces: Vec<Vec<BlockId>>,
	arities: Vec<usize>,
}


impl Emitter {
	pub fn emit(&mut self, instr: Instr) {
		self.stream.append(instr);
	}


	/// Redirect emission into a fresh stream.
	pub fn mute(&mut self) {
		let outer = mem::take(&mut self.stream);
		self.suspended.push(Suspension { outer, sealed: Vec::new() });
	}


	/// Seal the current stream into a block, and start a fresh one.
	pub fn seal(&mut self) -> Result<(), ErrorKind> {
		let suspension = self.suspended
			.last_mut()
			.ok_or(ErrorKind::Internal("block capture outside of a suspension"))?;

		let stream = mem::take(&mut self.stream);
		let block = self.code.splice_block(stream);
		suspension.sealed.push(block);

		Ok(())
	}


	/// Restore the enclosing stream. The sealed blocks are kept for the construct action.
	pub fn unmute(&mut self) -> Result<(), ErrorKind> {
		let suspension = self.suspended
			.pop()
			.ok_or(ErrorKind::Internal("resume without a suspension"))?;

		if !self.stream.is_empty() {
			return Err(ErrorKind::Internal("instructions after the last captured block"));
		}

		self.stream = suspension.outer;
		self.pieces.push(suspension.sealed);

		Ok(())
	}


	/// Take the blocks of the innermost resumed construct.
	pub fn blocks(&mut self) -> Result<Vec<BlockId>, ErrorKind> {
		self.pieces
			.pop()
			.ok_or(ErrorKind::Internal("construct without blocks"))
	}


	/// Take the blocks of the innermost resumed construct, which must have the given count.
	pub fn blocks_exact(&mut self, count: usize) -> Result<Vec<BlockId>, ErrorKind> {
		let blocks = self.blocks()?;

		if blocks.len() == count {
			Ok(blocks)
		} else {
			Err(ErrorKind::Internal("construct with unexpected block count"))
		}
	}


	pub fn is_empty_block(&self, block: BlockId) -> bool {
		self.code.block(block).is_empty()
	}


	pub fn push_arity(&mut self, arity: usize) {
		self.arities.push(arity);
	}


	pub fn pop_arity(&mut self) -> Result<usize, ErrorKind> {
		self.arities
			.pop()
			.ok_or(ErrorKind::Internal("arity stack underflow"))
	}


	/// Pop an optional-construct marker.
	pub fn pop_flag(&mut self) -> Result<bool, ErrorKind> {
		match self.pop_arity()? {
			0 => Ok(false),
			1 => Ok(true),
			_ => Err(ErrorKind::Internal("optional construct matched more than once")),
		}
	}


	/// Check that every construct was closed, and yield the code and the root stream.
	pub fn finish(self) -> Result<(code::Builder, Stream), ErrorKind> {
		if !self.arities.is_empty() {
			return Err(ErrorKind::Internal("arity stack not empty at the end of the unit"));
		}

		if !self.suspended.is_empty() {
			return Err(ErrorKind::Internal("suspended emission at the end of the unit"));
		}

		if !self.pieces.is_empty() {
			return Err(ErrorKind::Internal("unclaimed blocks at the end of the unit"));
		}

		Ok((self.code, self.stream))
	}


	#[cfg(test)]
	pub fn stream(&self) -> &Stream {
		&self.stream
	}
}
