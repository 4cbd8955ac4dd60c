use super::{Builtin, CallContext, NativeFun, Panic, Value};


inventory::submit! { Builtin(&PanicFun) }

/// Raise a panic with the given value.
#[derive(Debug)]
struct PanicFun;

impl NativeFun for PanicFun {
	fn name(&self) -> &'static str { "panic" }

	fn call(&self, context: CallContext) -> Result<Value, Panic> {
		match context.args() {
			[ value ] => Err(Panic::user(value.copy(), context.pos)),
			args => Err(Panic::invalid_args(args.len() as u32, 1, context.pos)),
		}
	}
}
