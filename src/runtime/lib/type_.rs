use super::{Builtin, CallContext, NativeFun, Panic, Value};


inventory::submit! { Builtin(&Type) }

#[derive(Debug)]
struct Type;

impl NativeFun for Type {
	fn name(&self) -> &'static str { "type" }

	fn call(&self, context: CallContext) -> Result<Value, Panic> {
		match context.args() {
			[ value ] => Ok(value.type_name().into()),
			args => Err(Panic::invalid_args(args.len() as u32, 1, context.pos)),
		}
	}
}
