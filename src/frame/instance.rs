use std::rc::Rc;

use gc::{Finalize, Trace};

use super::{FrameLayout, SlotError, SlotType};


/// Values that can be stored in frame slots.
pub trait SlotValue: Sized {
	/// The zero value of the slot type.
	fn zero(ty: SlotType) -> Self;

	/// Whether the value is the absence-of-value sentinel.
	fn is_nil(&self) -> bool;

	/// Whether the value may be stored in a slot of the given type.
	fn fits(&self, ty: SlotType) -> bool;
}


/// A live frame: one per active call.
#[derive(Debug)]
#[derive(Trace, Finalize)]
pub struct FrameInstance<V> {
	#[unsafe_ignore_trace]
	layout: Rc<FrameLayout>,
	slots: Vec<V>,
}


impl<V: SlotValue> FrameInstance<V> {
	/// Create a zero-initialized instance.
	pub fn new(layout: Rc<FrameLayout>) -> Self {
		let slots = layout
			.fields()
			.iter()
			.map(|field| V::zero(field.ty))
			.collect();

		Self { layout, slots }
	}


	pub fn layout(&self) -> &FrameLayout {
		&self.layout
	}


	/// Get the value in a slot.
	pub fn get(&self, slot: usize) -> &V {
		&self.slots[slot]
	}


	/// Store a value in a slot. Nil stores the zero value of the slot type.
	pub fn set(&mut self, slot: usize, value: V) -> Result<(), SlotError> {
		let ty = self.layout.fields()[slot].ty;

		self.slots[slot] =
			if value.is_nil() {
				V::zero(ty)
			} else if value.fits(ty) {
				value
			} else {
				return Err(SlotError::TypeMismatch { slot, expected: ty });
			};

		Ok(())
	}


	/// Mutable access to a slot. Callers must preserve the slot type.
	pub fn slot_mut(&mut self, slot: usize) -> &mut V {
		&mut self.slots[slot]
	}
}
