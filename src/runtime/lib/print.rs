use std::io::{self, Write};

use super::{Builtin, CallContext, NativeFun, Panic, Value};
use crate::{fmt, symbol};


inventory::submit! { Builtin(&Print) }
inventory::submit! { Builtin(&Println) }


/// Write the values separated by spaces. Strings and bytes are written raw.
fn print<W: Write>(values: &[Value], interner: &symbol::Interner, mut writer: W) -> io::Result<()> {
	for (ix, value) in values.iter().enumerate() {
		if ix > 0 {
			writer.write_all(b" ")?;
		}

		match value {
			Value::String(string) => writer.write_all(&string[..])?,
			Value::Byte(byte) => writer.write_all(&[*byte])?,
			value => write!(writer, "{}", fmt::Show(value, interner))?,
		}
	}

	Ok(())
}


#[derive(Debug)]
struct Print;

impl NativeFun for Print {
	fn name(&self) -> &'static str { "print" }

	fn call(&self, context: CallContext) -> Result<Value, Panic> {
		let interner = context.interner();

		print(&context.args, interner, context.runtime.output())
			.map_err(|error| Panic::io(error, context.pos))?;

		Ok(Value::Nil)
	}
}


#[derive(Debug)]
struct Println;

impl NativeFun for Println {
	fn name(&self) -> &'static str { "println" }

	fn call(&self, context: CallContext) -> Result<Value, Panic> {
		let interner = context.interner();
		let mut output = context.runtime.output();

		print(&context.args, interner, &mut output)
			.and_then(|()| writeln!(output))
			.map_err(|error| Panic::io(error, context.pos))?;

		Ok(Value::Nil)
	}
}
