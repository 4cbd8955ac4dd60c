use std::{
	cmp::Ordering,
	hash::{Hash, Hasher},
	ops::Neg,
};

use gc::{Finalize, Trace};


/// A float value. Floats are totally ordered and hashable, so that they may be used as
/// dict keys: NaN sorts below every number and equals nothing, not even itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct Float(pub f64);


impl Float {
	/// The value, unless it is NaN.
	fn number(self) -> Option<f64> {
		Some(self.0).filter(|float| !float.is_nan())
	}
}


impl Finalize for Float { }


unsafe impl Trace for Float {
	gc::unsafe_empty_trace!();
}


impl PartialEq for Float {
	fn eq(&self, other: &Self) -> bool {
		matches!((self.number(), other.number()), (Some(left), Some(right)) if left == right)
	}
}


impl Eq for Float { }


impl PartialOrd for Float {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}


impl Ord for Float {
	fn cmp(&self, other: &Self) -> Ordering {
		match (self.number(), other.number()) {
			(None, _) => Ordering::Less,
			(Some(_), None) => Ordering::Greater,
			(Some(left), Some(right)) => left
				.partial_cmp(&right)
				.unwrap_or(Ordering::Equal),
		}
	}
}


impl Hash for Float {
	fn hash<H: Hasher>(&self, state: &mut H) {
		// Adding zero folds -0.0 into 0.0, as they compare equal.
		self.number()
			.map_or(f64::NAN, |float| float + 0.0)
			.to_bits()
			.hash(state)
	}
}


impl Neg for Float {
	type Output = Self;

	fn neg(self) -> Self {
		Self(-self.0)
	}
}


impl From<f64> for Float {
	fn from(float: f64) -> Self {
		Self(float)
	}
}


impl From<i64> for Float {
	fn from(int: i64) -> Self {
		Self(int as f64)
	}
}


impl From<&i64> for Float {
	fn from(int: &i64) -> Self {
		Self(*int as f64)
	}
}


impl std::fmt::Display for Float {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "{:#?}", self.0)
	}
}
