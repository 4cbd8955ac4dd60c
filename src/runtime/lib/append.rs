use super::{Builtin, CallContext, NativeFun, Panic, Value};


inventory::submit! { Builtin(&Append) }

/// Push values at the end of an array, and return the array. An array may not be
/// appended to itself.
#[derive(Debug)]
struct Append;

impl NativeFun for Append {
	fn name(&self) -> &'static str { "append" }

	fn call(&self, context: CallContext) -> Result<Value, Panic> {
		match context.args() {
			[ target @ Value::Array(array), values @ .. ] => {
				if let Some(cyclic) = values.iter().find(|value| value.reaches(target)) {
					return Err(Panic::invalid_operand(cyclic.copy(), context.pos));
				}

				array
					.borrow_mut()
					.extend(values.iter().map(Value::copy));

				Ok(Value::Array(array.copy()))
			}

			[ other, .. ] => Err(Panic::invalid_operand(other.copy(), context.pos)),

			[] => Err(Panic::invalid_args(0, 1, context.pos)),
		}
	}
}
