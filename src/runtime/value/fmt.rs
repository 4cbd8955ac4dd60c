use std::cell::RefCell;

use crate::{
	fmt::{self, Display},
	symbol,
};
use super::{
	super::registry,
	Array,
	Dict,
	Function,
	Object,
	Value,
};


impl<'a> Display<'a> for Function {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		match self {
			Self::Script(fun) => write!(f, "function<{}>", fmt::Show(fun.pos, context)),
			Self::Native(id) => write!(f, "builtin<{}>", registry().name(*id)),
			Self::Bound { method, .. } => write!(f, "method<{}>", fmt::Show(&**method, context)),
		}
	}
}


impl<'a> Display<'a> for Array {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		let array = self.borrow();

		f.write_str("[")?;

		fmt::sep_by(
			array.iter(),
			f,
			|item, f| write!(f, "{}", fmt::Show(item, context)),
			", ",
		)?;

		f.write_str("]")
	}
}


impl<'a> Display<'a> for Dict {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		let dict = self.borrow();
		let mut entries: Vec<_> = dict.iter().collect();
		entries.sort();

		f.write_str("{")?;

		fmt::sep_by(
			entries.into_iter(),
			f,
			|(k, v), f| write!(f, "{}: {}", fmt::Show(k, context), fmt::Show(v, context)),
			", ",
		)?;

		f.write_str("}")
	}
}


thread_local! {
	/// The objects whose fields are being displayed.
	static DISPLAYING: RefCell<Vec<*const ()>> = RefCell::new(Vec::new());
}


impl<'a> Display<'a> for Object {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		let addr = self.addr();

		let nested = DISPLAYING.with(
			|displaying| {
				let mut displaying = displaying.borrow_mut();
				let nested = displaying.contains(&addr);

				if !nested {
					displaying.push(addr);
				}

				nested
			}
		);

		// Objects may reference themselves through their fields.
		if nested {
			return f.write_str("object{...}");
		}

		let result = write!(f, "object{}", fmt::Show(self.fields(), context));

		DISPLAYING.with(|displaying| displaying.borrow_mut().pop());

		result
	}
}


impl<'a> Display<'a> for Value {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		match self {
			Self::Nil => f.write_str("nil"),
			Self::Bool(b) => write!(f, "{}", b),
			Self::Int(int) => write!(f, "{}", int),
			Self::Float(float) => write!(f, "{}", float),
			Self::Byte(byte) => write!(f, "'{}'", (*byte as char).escape_debug()),
			Self::String(string) => write!(f, "\"{}\"", String::from_utf8_lossy(string).escape_debug()),
			Self::Array(array) => write!(f, "{}", fmt::Show(array, context)),
			Self::Dict(dict) => write!(f, "{}", fmt::Show(dict, context)),
			Self::Function(fun) => write!(f, "{}", fmt::Show(&**fun, context)),
			Self::Class(_) => f.write_str("class"),
			Self::Object(obj) => write!(f, "{}", fmt::Show(obj, context)),
		}
	}
}
