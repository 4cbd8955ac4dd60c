use super::{Builtin, CallContext, NativeFun, Panic, Value};


inventory::submit! { Builtin(&Get) }

/// Index an array, string, dict or object.
#[derive(Debug)]
struct Get;

impl NativeFun for Get {
	fn name(&self) -> &'static str { "get" }

	fn call(&self, context: CallContext) -> Result<Value, Panic> {
		match context.args() {
			[ Value::Array(array), Value::Int(ix) ] => array
				.index(*ix)
				.ok_or_else(|| Panic::index_out_of_bounds(Value::Int(*ix), context.pos)),

			[ Value::String(string), Value::Int(ix) ] => usize::try_from(*ix)
				.ok()
				.and_then(|ix| string.get(ix))
				.map(|byte| Value::Byte(*byte))
				.ok_or_else(|| Panic::index_out_of_bounds(Value::Int(*ix), context.pos)),

			[ Value::Array(_) | Value::String(_), index ] => Err(
				Panic::invalid_operand(index.copy(), context.pos)
			),

			[ Value::Dict(dict), key ] => Ok(dict.get(key).unwrap_or_default()),

			[ Value::Object(obj), key ] => Ok(obj.fields().get(key).unwrap_or_default()),

			[ other, _ ] => Err(Panic::invalid_operand(other.copy(), context.pos)),

			args => Err(Panic::invalid_args(args.len() as u32, 2, context.pos)),
		}
	}
}
