use super::{Builtin, CallContext, NativeFun, Panic, Value};


inventory::submit! { Builtin(&Set) }

/// Store key-value pairs in an array, dict or object: `set(target, k1, v1, k2, v2...)`.
/// Arrays and dicts may not be stored inside themselves.
#[derive(Debug)]
struct Set;

impl NativeFun for Set {
	fn name(&self) -> &'static str { "set" }

	fn call(&self, context: CallContext) -> Result<Value, Panic> {
		let (target, pairs) = match context.args() {
			[ target, pairs @ .. ] if pairs.len() % 2 == 0 => (target, pairs),
			args => return Err(
				Panic::invalid_args(args.len() as u32, args.len() as u32 + 1, context.pos)
			),
		};

		for pair in pairs.chunks_exact(2) {
			let (key, value) = (&pair[0], &pair[1]);

			if let Some(cyclic) = [key, value].into_iter().find(|item| item.reaches(target)) {
				return Err(Panic::invalid_operand(cyclic.copy(), context.pos));
			}

			match (target, key) {
				(Value::Array(array), Value::Int(ix)) => {
					if !array.set(*ix, value.copy()) {
						return Err(Panic::index_out_of_bounds(Value::Int(*ix), context.pos));
					}
				}

				(Value::Array(_), key) => return Err(Panic::invalid_operand(key.copy(), context.pos)),

				(Value::Dict(dict), key) => dict.insert(key.copy(), value.copy()),

				(Value::Object(obj), key) => obj.fields().insert(key.copy(), value.copy()),

				(other, _) => return Err(Panic::invalid_operand(other.copy(), context.pos)),
			}
		}

		Ok(Value::Nil)
	}
}
