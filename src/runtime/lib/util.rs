use super::{CallContext, Float, Panic, Value};


/// A pair of numbers promoted to a common type.
#[derive(Debug)]
pub enum Numbers {
	Ints(i64, i64),
	Floats(Float, Float),
}


impl Numbers {
	/// Promote both operands to float unless both are ints. Yields the first operand that
	/// is not a number on failure.
	pub fn promote<'v>(left: &'v Value, right: &'v Value) -> Result<Self, &'v Value> {
		let float = |value: &'v Value| match value {
			Value::Int(int) => Ok(Float::from(*int)),
			Value::Float(float) => Ok(*float),
			other => Err(other),
		};

		match (left, right) {
			(Value::Int(left), Value::Int(right)) => Ok(Self::Ints(*left, *right)),
			_ => Ok(Self::Floats(float(left)?, float(right)?)),
		}
	}
}


/// Get the pair of operands of a binary operator.
pub fn operands(args: &[Value]) -> Option<(&Value, &Value)> {
	match args {
		[ left, right ] => Some((left, right)),
		_ => None,
	}
}


/// Get the pair of operands of a binary operator, panicking on any other arity.
pub fn binary<'c>(context: &'c CallContext) -> Result<(&'c Value, &'c Value), Panic> {
	operands(context.args())
		.ok_or_else(|| Panic::invalid_args(context.args().len() as u32, 2, context.pos))
}
