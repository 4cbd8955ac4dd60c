use super::SlotType;


/// A frame whose descriptors are inconsistent with the frame itself.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
	#[error("variable `{name}` declared at depth {found}, but the frame has depth {expected}")]
	DepthMismatch {
		name: Box<str>,
		expected: usize,
		found: usize,
	},

	#[error("variable `{name}` has slot {found}, expected slot {expected}")]
	SlotMismatch {
		name: Box<str>,
		expected: usize,
		found: usize,
	},
}


/// A rejected slot store.
#[derive(Debug, thiserror::Error)]
pub enum SlotError {
	#[error("cannot store a value of another type in {expected} slot {slot}")]
	TypeMismatch { slot: usize, expected: SlotType },
}
