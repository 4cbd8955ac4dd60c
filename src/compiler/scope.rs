use std::collections::HashSet;

use super::ErrorKind;
use crate::{
	code::VarRef,
	frame::{SlotType, VarDescriptor},
	symbol::Symbol,
	syntax::SourcePos,
};


/// The variables of a frame under compilation.
#[derive(Debug, Default)]
struct FrameBuilder {
	vars: Vec<VarDescriptor>,
	/// Nesting level of loops in the frame's body.
	loops: usize,
}


/// A read of an unknown name, declared in the root frame.
#[derive(Debug)]
pub struct Forward {
	pub name: Symbol,
	pub slot: u32,
	pub file: Symbol,
	pub pos: SourcePos,
}


/// The stack of frames under compilation, innermost last. The index of a frame is its
/// depth.
#[derive(Debug)]
pub struct Scopes {
	frames: Vec<FrameBuilder>,
	forward: Vec<Forward>,
	/// Slots of the root frame that are written somewhere in the unit.
	assigned: HashSet<u32>,
}


impl Scopes {
	pub fn new() -> Self {
		Self {
			frames: vec![FrameBuilder::default()],
			forward: Vec::new(),
			assigned: HashSet::new(),
		}
	}


	pub fn depth(&self) -> u32 {
		(self.frames.len() - 1) as u32
	}


	fn current(&mut self) -> &mut FrameBuilder {
		self.frames
			.last_mut()
			.expect("the root frame should never be closed")
	}


	/// Find a variable, innermost frame first. Within a frame, the last declaration wins.
	pub fn find(&self, name: Symbol) -> Option<VarRef> {
		self.frames
			.iter()
			.rev()
			.find_map(
				|frame| frame.vars
					.iter()
					.rev()
					.find(|var| var.name == name)
					.map(|var| VarRef { depth: var.depth as u32, slot: var.slot as u32 })
			)
	}


	/// Declare a variable in the current frame.
	pub fn declare(&mut self, name: Symbol) -> VarRef {
		let depth = self.depth();
		let frame = self.current();
		let slot = frame.vars.len();

		frame.vars.push(
			VarDescriptor {
				name,
				ty: SlotType::Any,
				depth: depth as usize,
				slot,
			}
		);

		VarRef { depth, slot: slot as u32 }
	}


	/// Declare an unknown name in the root frame, expecting it to be assigned later.
	pub fn declare_forward(&mut self, name: Symbol, file: Symbol, pos: SourcePos) -> VarRef {
		let root = &mut self.frames[0];
		let slot = root.vars.len();

		root.vars.push(
			VarDescriptor {
				name,
				ty: SlotType::Any,
				depth: 0,
				slot,
			}
		);

		self.forward.push(Forward { name, slot: slot as u32, file, pos });

		VarRef { depth: 0, slot: slot as u32 }
	}


	/// Resolve a variable for writing, declaring it in the current frame if not found.
	pub fn write(&mut self, name: Symbol) -> VarRef {
		let var = self
			.find(name)
			.unwrap_or_else(|| self.declare(name));

		if var.depth == 0 {
			self.assigned.insert(var.slot);
		}

		var
	}


	/// Open the frame of a function body.
	pub fn open(&mut self) {
		self.frames.push(FrameBuilder::default());
	}


	/// Close the frame of a function body, yielding its descriptors and depth.
	pub fn close(&mut self) -> Result<(Box<[VarDescriptor]>, usize), ErrorKind> {
		if self.frames.len() <= 1 {
			return Err(ErrorKind::Internal("closing the root frame as a function frame"));
		}

		let depth = self.depth() as usize;
		let frame = self.current();

		if frame.loops != 0 {
			return Err(ErrorKind::Internal("function frame closed inside a loop"));
		}

		let vars = std::mem::take(&mut frame.vars);
		self.frames.pop();

		Ok((vars.into(), depth))
	}


	/// Close the root frame.
	pub fn close_root(mut self) -> Result<Box<[VarDescriptor]>, ErrorKind> {
		if self.frames.len() != 1 {
			return Err(ErrorKind::Internal("unclosed function frame at the end of the unit"));
		}

		Ok(std::mem::take(&mut self.frames[0].vars).into())
	}


	pub fn enter_loop(&mut self) {
		self.current().loops += 1;
	}


	pub fn leave_loop(&mut self) -> Result<(), ErrorKind> {
		let frame = self.current();

		frame.loops = frame.loops
			.checked_sub(1)
			.ok_or(ErrorKind::Internal("loop closed without being opened"))?;

		Ok(())
	}


	pub fn in_loop(&self) -> bool {
		self.frames
			.last()
			.map_or(false, |frame| frame.loops > 0)
	}


	/// The first forward declaration that is never assigned.
	pub fn undefined(&self) -> Option<&Forward> {
		self.forward
			.iter()
			.find(|forward| !self.assigned.contains(&forward.slot))
	}
}
