use std::collections::HashSet;

use super::{LayoutError, SlotType, VarDescriptor};
use crate::symbol;


/// A field of a frame record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
	/// Unique within the frame.
	pub name: Box<str>,
	pub ty: SlotType,
}


/// The record type of a frame: one field per variable, in slot order.
#[derive(Debug, PartialEq, Eq)]
pub struct FrameLayout {
	depth: usize,
	fields: Box<[Field]>,
}


impl FrameLayout {
	/// Build the layout for the given descriptors, which must belong to a frame at the
	/// given depth and have consecutive slots starting at zero.
	/// Names that collide with a previous field are renamed to `name'slot`. The quote
	/// can't occur in an identifier, so a renamed field never collides with a declared
	/// one.
	pub fn build(
		descriptors: &[VarDescriptor],
		depth: usize,
		interner: &symbol::Interner,
	) -> Result<Self, LayoutError> {
		let mut seen = HashSet::with_capacity(descriptors.len());
		let mut fields = Vec::with_capacity(descriptors.len());

		for (ix, descriptor) in descriptors.iter().enumerate() {
			let name = interner.lookup(descriptor.name);

			if descriptor.depth != depth {
				return Err(
					LayoutError::DepthMismatch {
						name: name.into(),
						expected: depth,
						found: descriptor.depth,
					}
				);
			}

			if descriptor.slot != ix {
				return Err(
					LayoutError::SlotMismatch {
						name: name.into(),
						expected: ix,
						found: descriptor.slot,
					}
				);
			}

			let name: Box<str> =
				if seen.insert(descriptor.name) {
					name.into()
				} else {
					format!("{}'{}", name, ix).into()
				};

			fields.push(Field { name, ty: descriptor.ty });
		}

		let layout = Self { depth, fields: fields.into() };

		log::debug!("frame layout at depth {}: {}", depth, layout);

		Ok(layout)
	}


	pub fn depth(&self) -> usize {
		self.depth
	}


	pub fn fields(&self) -> &[Field] {
		&self.fields
	}


	pub fn len(&self) -> usize {
		self.fields.len()
	}


	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}


impl std::fmt::Display for FrameLayout {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		f.write_str("{ ")?;

		crate::fmt::sep_by(
			self.fields.iter(),
			f,
			|field, f| write!(f, "{}: {}", field.name, field.ty),
			", ",
		)?;

		f.write_str(" }")
	}
}
