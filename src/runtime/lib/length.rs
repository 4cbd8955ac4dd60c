use super::{Builtin, CallContext, NativeFun, Panic, Value};


inventory::submit! { Builtin(&Length) }

#[derive(Debug)]
struct Length;

impl NativeFun for Length {
	fn name(&self) -> &'static str { "len" }

	fn call(&self, context: CallContext) -> Result<Value, Panic> {
		match context.args() {
			[ Value::Array(array) ] => Ok(Value::Int(array.len())),
			[ Value::Dict(dict) ] => Ok(Value::Int(dict.len())),
			[ Value::String(string) ] => Ok(Value::Int(string.len() as i64)),
			[ other ] => Err(Panic::invalid_operand(other.copy(), context.pos)),
			args => Err(Panic::invalid_args(args.len() as u32, 1, context.pos)),
		}
	}
}
