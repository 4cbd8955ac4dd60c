use super::{
	util::{binary, operands, Numbers},
	Array,
	Builtin,
	CallContext,
	NativeFun,
	Panic,
	Value,
};


inventory::submit! { Builtin(&Add) }
inventory::submit! { Builtin(&Sub) }
inventory::submit! { Builtin(&Mul) }
inventory::submit! { Builtin(&Quo) }
inventory::submit! { Builtin(&Mod) }
inventory::submit! { Builtin(&Neg) }


/// Apply an arithmetic operator to two numbers, with overflow checks on integers.
fn arith<I, F>(context: &CallContext, int: I, float: F) -> Result<Value, Panic>
where
	I: FnOnce(i64, i64) -> Option<i64>,
	F: FnOnce(f64, f64) -> f64,
{
	let (left, right) = binary(context)?;

	match Numbers::promote(left, right) {
		Ok(Numbers::Ints(l, r)) => int(l, r)
			.map(Value::Int)
			.ok_or_else(|| Panic::integer_overflow(context.pos)),

		Ok(Numbers::Floats(l, r)) => Ok(float(l.0, r.0).into()),

		Err(value) => Err(Panic::invalid_operand(value.copy(), context.pos)),
	}
}


/// Integer division or remainder, which panics on a zero divisor.
fn divide<I, F>(context: &CallContext, int: I, float: F) -> Result<Value, Panic>
where
	I: FnOnce(i64, i64) -> Option<i64>,
	F: FnOnce(f64, f64) -> f64,
{
	if let Some((Value::Int(_), Value::Int(0))) = operands(context.args()) {
		return Err(Panic::division_by_zero(context.pos));
	}

	arith(context, int, float)
}


#[derive(Debug)]
struct Add;

impl NativeFun for Add {
	fn name(&self) -> &'static str { "add" }

	fn call(&self, context: CallContext) -> Result<Value, Panic> {
		match operands(context.args()) {
			Some((Value::String(left), Value::String(right))) => {
				let mut string = Vec::with_capacity(left.len() + right.len());
				string.extend_from_slice(left);
				string.extend_from_slice(right);
				Ok(string.into())
			}

			Some((Value::Array(left), Value::Array(right))) => {
				let mut array = left.borrow().iter().map(Value::copy).collect::<Vec<_>>();
				array.extend(right.borrow().iter().map(Value::copy));
				Ok(Array::new(array).into())
			}

			_ => arith(&context, i64::checked_add, |l, r| l + r),
		}
	}
}


#[derive(Debug)]
struct Sub;

impl NativeFun for Sub {
	fn name(&self) -> &'static str { "sub" }

	fn call(&self, context: CallContext) -> Result<Value, Panic> {
		arith(&context, i64::checked_sub, |l, r| l - r)
	}
}


#[derive(Debug)]
struct Mul;

impl NativeFun for Mul {
	fn name(&self) -> &'static str { "mul" }

	fn call(&self, context: CallContext) -> Result<Value, Panic> {
		arith(&context, i64::checked_mul, |l, r| l * r)
	}
}


#[derive(Debug)]
struct Quo;

impl NativeFun for Quo {
	fn name(&self) -> &'static str { "quo" }

	fn call(&self, context: CallContext) -> Result<Value, Panic> {
		divide(&context, i64::checked_div, |l, r| l / r)
	}
}


#[derive(Debug)]
struct Mod;

impl NativeFun for Mod {
	fn name(&self) -> &'static str { "mod" }

	fn call(&self, context: CallContext) -> Result<Value, Panic> {
		divide(&context, i64::checked_rem, |l, r| l % r)
	}
}


#[derive(Debug)]
struct Neg;

impl NativeFun for Neg {
	fn name(&self) -> &'static str { "neg" }

	fn call(&self, context: CallContext) -> Result<Value, Panic> {
		match context.args() {
			[ Value::Int(int) ] => int
				.checked_neg()
				.map(Value::Int)
				.ok_or_else(|| Panic::integer_overflow(context.pos)),

			[ Value::Float(float) ] => Ok((-*float).into()),

			[ other ] => Err(Panic::invalid_operand(other.copy(), context.pos)),

			args => Err(Panic::invalid_args(args.len() as u32, 1, context.pos)),
		}
	}
}
