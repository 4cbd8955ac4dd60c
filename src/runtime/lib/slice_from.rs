use super::{Array, Builtin, CallContext, NativeFun, Panic, Value};


inventory::submit! { Builtin(&SliceFrom) }

/// Build an array from the arguments.
#[derive(Debug)]
struct SliceFrom;

impl NativeFun for SliceFrom {
	fn name(&self) -> &'static str { "slice_from" }

	fn call(&self, context: CallContext) -> Result<Value, Panic> {
		Ok(Array::new(context.args).into())
	}
}
