use super::value::Value;


/// How a block was left.
#[derive(Debug)]
pub enum Flow {
	/// The block ran to its end, yielding its value.
	Regular(Value),
	Return(Value),
	Break,
	Continue,
}


impl Flow {
	/// Whether the flow leaves the enclosing construct early.
	pub fn is_exit(&self) -> bool {
		!matches!(self, Self::Regular(_))
	}
}
