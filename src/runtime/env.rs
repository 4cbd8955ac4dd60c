use gc::{Gc, GcCell, Finalize, Trace};

use crate::{
	code::{BlockId, VarRef},
	frame::FrameInstance,
};
use super::{Panic, SourcePos, Value};


/// The variables of an activation, linked to the environment of the enclosing function.
#[derive(Debug)]
#[derive(Trace, Finalize)]
pub struct Env {
	frame: GcCell<FrameInstance<Value>>,
	parent: Option<Gc<Env>>,
	depth: u32,
}


impl Env {
	pub fn new(frame: FrameInstance<Value>, parent: Option<Gc<Env>>) -> Self {
		let depth = parent
			.as_ref()
			.map(|parent| parent.depth + 1)
			.unwrap_or(0);

		Self { frame: GcCell::new(frame), parent, depth }
	}


	pub fn depth(&self) -> u32 {
		self.depth
	}


	/// Get the environment at the given depth.
	fn ancestor(&self, depth: u32) -> &Env {
		let mut env = self;

		while env.depth > depth {
			env = env.parent
				.as_ref()
				.expect("variable depth should not exceed the environment depth");
		}

		env
	}


	pub fn load(&self, var: VarRef) -> Value {
		self.ancestor(var.depth)
			.frame
			.borrow()
			.get(var.slot as usize)
			.copy()
	}


	pub fn store(&self, var: VarRef, value: Value, pos: SourcePos) -> Result<(), Panic> {
		self.ancestor(var.depth)
			.frame
			.borrow_mut()
			.set(var.slot as usize, value)
			.map_err(|error| Panic::slot(error, pos))
	}


	/// Update a variable in place. The update must preserve the type of the value.
	pub fn update<F>(&self, var: VarRef, update: F) -> Result<(), Panic>
	where
		F: FnOnce(&mut Value) -> Result<(), Panic>,
	{
		let env = self.ancestor(var.depth);
		let mut frame = env.frame.borrow_mut();

		update(frame.slot_mut(var.slot as usize))
	}
}


/// A block registered with `defer`, and the environment to run it in.
#[derive(Debug)]
pub struct Deferred {
	pub block: BlockId,
	pub env: Gc<Env>,
}


/// A function call in progress.
#[derive(Debug, Default)]
pub struct Activation {
	pub deferred: Vec<Deferred>,
}
