use std::{
	cmp::Ordering,
	hash::{Hash, Hasher},
	ops::Deref,
};

use gc::{Gc, Finalize, Trace};

use crate::code::{BuiltinId, FunId};
use super::{
	super::{Env, SourcePos},
	Value,
};


/// A function object.
/// Ord is required in order to be able to have functions as dict keys.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Trace, Finalize)]
pub enum Function {
	Script(ScriptFun),
	Native(#[unsafe_ignore_trace] BuiltinId),
	/// A member function bound to its object.
	Bound { this: Value, method: Gc<Function> },
}


impl Function {
	/// Shallow copy.
	pub fn copy(&self) -> Self {
		match self {
			Self::Script(fun) => Self::Script(fun.copy()),
			Self::Native(id) => Self::Native(*id),
			Self::Bound { this, method } => Self::Bound { this: this.copy(), method: method.clone() },
		}
	}
}


/// A function object implemented in Quill code.
/// Captures the environment of the activation that created it.
#[derive(Debug)]
#[derive(Trace, Finalize)]
pub struct ScriptFun {
	#[unsafe_ignore_trace]
	pub id: FunId,
	pub env: Gc<Env>,
	pub pos: SourcePos,
}


impl ScriptFun {
	pub fn new(id: FunId, env: Gc<Env>, pos: SourcePos) -> Self {
		Self { id, env, pos }
	}


	/// Shallow copy.
	pub fn copy(&self) -> Self {
		Self {
			id: self.id,
			env: self.env.clone(),
			pos: self.pos,
		}
	}


	fn env_addr(&self) -> *const Env {
		self.env.deref() as *const Env
	}
}


impl PartialEq for ScriptFun {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id && self.env_addr() == other.env_addr()
	}
}


impl Eq for ScriptFun { }


impl PartialOrd for ScriptFun {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}


impl Ord for ScriptFun {
	fn cmp(&self, other: &Self) -> Ordering {
		self.id
			.cmp(&other.id)
			.then_with(|| self.env_addr().cmp(&other.env_addr()))
	}
}


impl Hash for ScriptFun {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state);
		self.env_addr().hash(state);
	}
}
