use std::collections::HashMap;

use super::{Builtin, CallContext, Dict, NativeFun, Panic, Value};


inventory::submit! { Builtin(&MapFrom) }

/// Build a dict from alternating keys and values.
#[derive(Debug)]
struct MapFrom;

impl NativeFun for MapFrom {
	fn name(&self) -> &'static str { "map_from" }

	fn call(&self, context: CallContext) -> Result<Value, Panic> {
		let args = context.args();

		if args.len() % 2 != 0 {
			return Err(Panic::invalid_args(args.len() as u32, args.len() as u32 + 1, context.pos));
		}

		let dict: HashMap<Value, Value> = args
			.chunks_exact(2)
			.map(|pair| (pair[0].copy(), pair[1].copy()))
			.collect();

		Ok(Dict::new(dict).into())
	}
}
