use super::{Array, Builtin, CallContext, NativeFun, Panic, Value};


inventory::submit! { Builtin(&SubSlice) }

/// Slice an array or string. A nil low bound means 0, and a nil high bound means the
/// length.
#[derive(Debug)]
struct SubSlice;

impl SubSlice {
	fn bounds(low: &Value, high: &Value, len: usize, context: &CallContext) -> Result<(usize, usize), Panic> {
		let bound = |value: &Value, default: usize| match value {
			Value::Nil => Ok(default),
			Value::Int(int) => usize::try_from(*int)
				.ok()
				.filter(|&ix| ix <= len)
				.ok_or_else(|| Panic::index_out_of_bounds(Value::Int(*int), context.pos)),
			other => Err(Panic::invalid_operand(other.copy(), context.pos)),
		};

		let low = bound(low, 0)?;
		let high = bound(high, len)?;

		if low > high {
			return Err(Panic::index_out_of_bounds(Value::Int(low as i64), context.pos));
		}

		Ok((low, high))
	}
}

impl NativeFun for SubSlice {
	fn name(&self) -> &'static str { "sub_slice" }

	fn call(&self, context: CallContext) -> Result<Value, Panic> {
		match context.args() {
			[ Value::Array(array), low, high ] => {
				let array = array.borrow();
				let (low, high) = Self::bounds(low, high, array.len(), &context)?;

				Ok(
					Array::new(
						array[low .. high]
							.iter()
							.map(Value::copy)
							.collect()
					).into()
				)
			}

			[ Value::String(string), low, high ] => {
				let (low, high) = Self::bounds(low, high, string.len(), &context)?;
				Ok(Value::from(&string[low .. high]))
			}

			[ other, _, _ ] => Err(Panic::invalid_operand(other.copy(), context.pos)),

			args => Err(Panic::invalid_args(args.len() as u32, 3, context.pos)),
		}
	}
}
