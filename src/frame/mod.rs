//! Frame layouts: every lexical frame (function body or compilation unit) has its local
//! variables packed into a fixed record, so that variable access is an indexed operation.

mod error;
mod instance;
mod layout;

use std::{cell::OnceCell, rc::Rc};

use crate::symbol::{self, Symbol};
pub use error::{LayoutError, SlotError};
pub use instance::{FrameInstance, SlotValue};
pub use layout::{Field, FrameLayout};


/// The static storage type of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotType {
	Any,
	Bool,
	Int,
	Float,
	Byte,
	String,
}


impl Default for SlotType {
	fn default() -> Self {
		Self::Any
	}
}


impl std::fmt::Display for SlotType {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		let name = match self {
			Self::Any => "any",
			Self::Bool => "bool",
			Self::Int => "int",
			Self::Float => "float",
			Self::Byte => "byte",
			Self::String => "string",
		};

		f.write_str(name)
	}
}


/// A variable declaration: name, storage type, owning frame depth and slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDescriptor {
	pub name: Symbol,
	pub ty: SlotType,
	/// Depth of the owning frame. The root frame has depth 0.
	pub depth: usize,
	/// Position of the variable in the owning frame.
	pub slot: usize,
}


/// The variables of a closed frame, and its memoized layout.
#[derive(Debug)]
pub struct FrameInfo {
	descriptors: Box<[VarDescriptor]>,
	depth: usize,
	layout: OnceCell<Rc<FrameLayout>>,
}


impl FrameInfo {
	pub fn new(descriptors: Box<[VarDescriptor]>, depth: usize) -> Self {
		Self { descriptors, depth, layout: OnceCell::new() }
	}


	pub fn descriptors(&self) -> &[VarDescriptor] {
		&self.descriptors
	}


	pub fn depth(&self) -> usize {
		self.depth
	}


	pub fn len(&self) -> usize {
		self.descriptors.len()
	}


	pub fn is_empty(&self) -> bool {
		self.descriptors.is_empty()
	}


	/// Get the frame layout, building it on first use.
	pub fn layout(&self, interner: &symbol::Interner) -> Result<&Rc<FrameLayout>, LayoutError> {
		if let Some(layout) = self.layout.get() {
			return Ok(layout);
		}

		let layout = FrameLayout::build(&self.descriptors, self.depth, interner)?;

		Ok(self.layout.get_or_init(|| Rc::new(layout)))
	}


	/// Create a zero-initialized instance of the frame, building the layout if needed.
	pub fn instantiate<V: SlotValue>(
		&self,
		interner: &symbol::Interner
	) -> Result<FrameInstance<V>, LayoutError> {
		let layout = self.layout(interner)?;
		Ok(FrameInstance::new(layout.clone()))
	}
}
