use std::io;

use crate::{
	fmt::{self, Display},
	frame::{LayoutError, SlotError},
	symbol,
};
use super::{SourcePos, Value};


/// A runtime error. Panics unwind the activations until recovered by a deferred block.
#[derive(Debug)]
pub enum Panic {
	StackOverflow { pos: SourcePos },
	DivisionByZero { pos: SourcePos },
	IntegerOverflow { pos: SourcePos },
	IndexOutOfBounds {
		index: Value,
		pos: SourcePos,
	},
	InvalidCall {
		function: Value,
		pos: SourcePos,
	},
	InvalidArgs {
		supplied: u32,
		expected: u32,
		pos: SourcePos,
	},
	InvalidCondition {
		value: Value,
		pos: SourcePos,
	},
	InvalidOperand {
		value: Value,
		pos: SourcePos,
	},
	/// Multiple assignment with a different number of values and targets.
	AssignmentMismatch {
		targets: u32,
		values: u32,
		pos: SourcePos,
	},
	UnknownMember {
		name: Box<str>,
		pos: SourcePos,
	},
	Slot {
		error: SlotError,
		pos: SourcePos,
	},
	/// A frame that could not be laid out when entered.
	Layout {
		error: LayoutError,
		pos: SourcePos,
	},
	/// A panic raised by the program, through the `panic` builtin.
	User {
		value: Value,
		pos: SourcePos,
	},
	Io {
		error: io::Error,
		pos: SourcePos,
	},
}


impl Panic {
	pub fn stack_overflow(pos: SourcePos) -> Self {
		Self::StackOverflow { pos }
	}


	pub fn division_by_zero(pos: SourcePos) -> Self {
		Self::DivisionByZero { pos }
	}


	pub fn integer_overflow(pos: SourcePos) -> Self {
		Self::IntegerOverflow { pos }
	}


	pub fn index_out_of_bounds(index: Value, pos: SourcePos) -> Self {
		Self::IndexOutOfBounds { index, pos }
	}


	pub fn invalid_call(function: Value, pos: SourcePos) -> Self {
		Self::InvalidCall { function, pos }
	}


	pub fn invalid_args(supplied: u32, expected: u32, pos: SourcePos) -> Self {
		Self::InvalidArgs { supplied, expected, pos }
	}


	pub fn invalid_condition(value: Value, pos: SourcePos) -> Self {
		Self::InvalidCondition { value, pos }
	}


	pub fn invalid_operand(value: Value, pos: SourcePos) -> Self {
		Self::InvalidOperand { value, pos }
	}


	pub fn assignment_mismatch(targets: u32, values: u32, pos: SourcePos) -> Self {
		Self::AssignmentMismatch { targets, values, pos }
	}


	pub fn unknown_member(name: &str, pos: SourcePos) -> Self {
		Self::UnknownMember { name: name.into(), pos }
	}


	pub fn slot(error: SlotError, pos: SourcePos) -> Self {
		Self::Slot { error, pos }
	}


	pub fn layout(error: LayoutError, pos: SourcePos) -> Self {
		Self::Layout { error, pos }
	}


	pub fn user(value: Value, pos: SourcePos) -> Self {
		Self::User { value, pos }
	}


	pub fn io(error: io::Error, pos: SourcePos) -> Self {
		Self::Io { error, pos }
	}


	/// The position where the panic was raised.
	pub fn pos(&self) -> SourcePos {
		match self {
			Self::StackOverflow { pos } => *pos,
			Self::DivisionByZero { pos } => *pos,
			Self::IntegerOverflow { pos } => *pos,
			Self::IndexOutOfBounds { pos, .. } => *pos,
			Self::InvalidCall { pos, .. } => *pos,
			Self::InvalidArgs { pos, .. } => *pos,
			Self::InvalidCondition { pos, .. } => *pos,
			Self::InvalidOperand { pos, .. } => *pos,
			Self::AssignmentMismatch { pos, .. } => *pos,
			Self::UnknownMember { pos, .. } => *pos,
			Self::Slot { pos, .. } => *pos,
			Self::Layout { pos, .. } => *pos,
			Self::User { pos, .. } => *pos,
			Self::Io { pos, .. } => *pos,
		}
	}


	/// The value yielded by `recover`: the panic value for panics raised by the program,
	/// and the message for the others.
	pub fn into_value(self, interner: &symbol::Interner) -> Value {
		match self {
			Self::User { value, .. } => value,
			panic => {
				let message = fmt::to_string(&Message(&panic), interner);
				message.as_str().into()
			}
		}
	}
}


/// The panic message, without the position.
struct Message<'p>(&'p Panic);


impl<'a, 'p> Display<'a> for Message<'p> {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		match self.0 {
			Panic::StackOverflow { .. } => f.write_str("stack overflow"),

			Panic::DivisionByZero { .. } => f.write_str("division by zero"),

			Panic::IntegerOverflow { .. } => f.write_str("integer overflow"),

			Panic::IndexOutOfBounds { index, .. } => write!(
				f,
				"index out of bounds: {}",
				fmt::Show(index, context)
			),

			Panic::InvalidCall { function, .. } => write!(
				f,
				"attempt to call a non-function value: {}",
				fmt::Show(function, context)
			),

			Panic::InvalidArgs { supplied, expected, .. } => write!(
				f,
				"invalid number of arguments: {} supplied, {} expected",
				supplied,
				expected
			),

			Panic::InvalidCondition { value, .. } => write!(
				f,
				"condition is not a bool: {}",
				fmt::Show(value, context)
			),

			Panic::InvalidOperand { value, .. } => write!(
				f,
				"invalid operand: {}",
				fmt::Show(value, context)
			),

			Panic::AssignmentMismatch { targets, values, .. } => write!(
				f,
				"assignment mismatch: {} variables but {} values",
				targets,
				values
			),

			Panic::UnknownMember { name, .. } => write!(f, "unknown member: {}", name),

			Panic::Slot { error, .. } => write!(f, "{}", error),

			Panic::Layout { error, .. } => write!(f, "{}", error),

			Panic::User { value, .. } => write!(f, "{}", fmt::Show(value, context)),

			Panic::Io { error, .. } => write!(f, "{}", error),
		}
	}
}


impl<'a> Display<'a> for Panic {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		write!(
			f,
			"{}: panic: {}",
			fmt::Show(self.pos(), context),
			fmt::Show(Message(self), context)
		)
	}
}
