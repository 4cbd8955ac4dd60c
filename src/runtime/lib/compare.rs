use std::cmp::Ordering;

use super::{
	util::{binary, Numbers},
	Builtin,
	CallContext,
	NativeFun,
	Panic,
	Value,
};


inventory::submit! { Builtin(&Lt) }
inventory::submit! { Builtin(&Gt) }
inventory::submit! { Builtin(&Le) }
inventory::submit! { Builtin(&Ge) }
inventory::submit! { Builtin(&Equal) }
inventory::submit! { Builtin(&NotEqual) }
inventory::submit! { Builtin(&Not) }


/// Order two values. Numbers are promoted, and strings and bytes are compared
/// lexicographically.
fn order(context: &CallContext) -> Result<Ordering, Panic> {
	let (left, right) = binary(context)?;

	match (left, right) {
		(Value::String(left), Value::String(right)) => Ok(left.cmp(right)),

		(Value::Byte(left), Value::Byte(right)) => Ok(left.cmp(right)),

		_ => match Numbers::promote(left, right) {
			Ok(Numbers::Ints(l, r)) => Ok(l.cmp(&r)),
			Ok(Numbers::Floats(l, r)) => Ok(l.cmp(&r)),
			Err(value) => Err(Panic::invalid_operand(value.copy(), context.pos)),
		}
	}
}


/// Equality, with numbers promoted.
fn equals(context: &CallContext) -> Result<bool, Panic> {
	let (left, right) = binary(context)?;

	Ok(
		match Numbers::promote(left, right) {
			Ok(Numbers::Ints(l, r)) => l == r,
			Ok(Numbers::Floats(l, r)) => l == r,
			Err(_) => left == right,
		}
	)
}


macro_rules! comparison {
	($type: ident, $name: literal, $($ordering: pat_param)|+) => {
		#[derive(Debug)]
		struct $type;

		impl NativeFun for $type {
			fn name(&self) -> &'static str { $name }

			fn call(&self, context: CallContext) -> Result<Value, Panic> {
				let ordering = order(&context)?;
				Ok(matches!(ordering, $($ordering)|+).into())
			}
		}
	};
}


comparison!(Lt, "lt", Ordering::Less);
comparison!(Gt, "gt", Ordering::Greater);
comparison!(Le, "le", Ordering::Less | Ordering::Equal);
comparison!(Ge, "ge", Ordering::Greater | Ordering::Equal);


#[derive(Debug)]
struct Equal;

impl NativeFun for Equal {
	fn name(&self) -> &'static str { "eq" }

	fn call(&self, context: CallContext) -> Result<Value, Panic> {
		equals(&context).map(Value::Bool)
	}
}


#[derive(Debug)]
struct NotEqual;

impl NativeFun for NotEqual {
	fn name(&self) -> &'static str { "ne" }

	fn call(&self, context: CallContext) -> Result<Value, Panic> {
		equals(&context).map(|equals| Value::Bool(!equals))
	}
}


#[derive(Debug)]
struct Not;

impl NativeFun for Not {
	fn name(&self) -> &'static str { "not" }

	fn call(&self, context: CallContext) -> Result<Value, Panic> {
		match context.args() {
			[ Value::Bool(b) ] => Ok((!b).into()),
			[ other ] => Err(Panic::invalid_operand(other.copy(), context.pos)),
			args => Err(Panic::invalid_args(args.len() as u32, 1, context.pos)),
		}
	}
}
