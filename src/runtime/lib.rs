automod::dir!("src/runtime/lib");

use std::{collections::HashMap, sync::OnceLock};

use crate::{code::BuiltinId, symbol};
use super::{
	value::{Array, Dict, Float},
	Panic,
	Runtime,
	SourcePos,
	Value,
};


/// A native function implementation.
pub trait NativeFun: Sync + 'static {
	/// The name under which the function is registered. Must be unique.
	fn name(&self) -> &'static str;

	/// Invoke the function.
	fn call(&self, context: CallContext) -> Result<Value, Panic>;
}


/// A registered builtin.
pub struct Builtin(pub &'static dyn NativeFun);


inventory::collect!(Builtin);


/// Context for a native function call.
pub struct CallContext<'r, 'a> {
	/// The runtime instance.
	pub runtime: &'r mut Runtime<'a>,
	pub args: Vec<Value>,
	/// The source position of the call, which allows proper location of panics.
	pub pos: SourcePos,
}


impl<'r, 'a> CallContext<'r, 'a> {
	pub fn args(&self) -> &[Value] {
		&self.args
	}


	pub fn interner(&self) -> &'a symbol::Interner {
		self.runtime.interner
	}
}


/// The table of builtins, sorted by name.
pub struct Registry {
	builtins: Box<[&'static dyn NativeFun]>,
	index: HashMap<&'static str, BuiltinId>,
}


impl Registry {
	fn new() -> Self {
		let mut builtins: Vec<&'static dyn NativeFun> = inventory::iter::<Builtin>
			.into_iter()
			.map(|builtin| builtin.0)
			.collect();

		builtins.sort_by_key(|builtin| builtin.name());

		let index = builtins
			.iter()
			.enumerate()
			.map(|(ix, builtin)| (builtin.name(), BuiltinId(ix as u32)))
			.collect();

		log::debug!("registered {} builtins", builtins.len());

		Self { builtins: builtins.into(), index }
	}


	pub fn lookup(&self, name: &str) -> Option<BuiltinId> {
		self.index.get(name).copied()
	}


	pub fn get(&self, id: BuiltinId) -> &'static dyn NativeFun {
		self.builtins[id.index()]
	}


	pub fn name(&self, id: BuiltinId) -> &'static str {
		self.get(id).name()
	}


	pub fn len(&self) -> usize {
		self.builtins.len()
	}


	pub fn is_empty(&self) -> bool {
		self.builtins.is_empty()
	}
}


/// Get the builtin registry. It is built on first use.
pub fn registry() -> &'static Registry {
	static REGISTRY: OnceLock<Registry> = OnceLock::new();

	REGISTRY.get_or_init(Registry::new)
}
