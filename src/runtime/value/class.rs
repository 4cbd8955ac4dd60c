use std::{
	cmp::Ordering,
	hash::{Hash, Hasher},
	ops::Deref,
};

use gc::{Gc, Finalize, Trace};

use super::{Dict, Value};


#[derive(Debug)]
#[derive(Trace, Finalize)]
struct ClassData {
	/// Member functions, keyed by name.
	methods: Dict,
}


/// A class: a set of member functions. Classes are compared by identity.
#[derive(Debug)]
#[derive(Trace, Finalize)]
pub struct Class(Gc<ClassData>);


impl Class {
	pub fn new(methods: Dict) -> Self {
		Self(Gc::new(ClassData { methods }))
	}


	/// Shallow copy.
	pub fn copy(&self) -> Self {
		Self(self.0.clone())
	}


	pub fn method(&self, name: &Value) -> Option<Value> {
		self.0.methods.get(name)
	}


	pub(super) fn addr(&self) -> *const () {
		self.0.deref() as *const ClassData as *const ()
	}
}


#[derive(Debug)]
#[derive(Trace, Finalize)]
struct ObjectData {
	class: Class,
	fields: Dict,
}


/// An instance of a class. Objects are compared by identity.
#[derive(Debug)]
#[derive(Trace, Finalize)]
pub struct Object(Gc<ObjectData>);


impl Object {
	pub fn new(class: Class) -> Self {
		Self(Gc::new(ObjectData { class, fields: Dict::default() }))
	}


	/// Shallow copy.
	pub fn copy(&self) -> Self {
		Self(self.0.clone())
	}


	pub fn class(&self) -> &Class {
		&self.0.class
	}


	pub fn fields(&self) -> &Dict {
		&self.0.fields
	}


	pub(super) fn addr(&self) -> *const () {
		self.0.deref() as *const ObjectData as *const ()
	}
}


macro_rules! identity_impl {
	($type: ident) => {
		impl PartialEq for $type {
			fn eq(&self, other: &Self) -> bool {
				self.addr() == other.addr()
			}
		}

		impl Eq for $type { }

		impl PartialOrd for $type {
			fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
				Some(self.cmp(other))
			}
		}

		impl Ord for $type {
			fn cmp(&self, other: &Self) -> Ordering {
				self.addr().cmp(&other.addr())
			}
		}

		impl Hash for $type {
			fn hash<H: Hasher>(&self, state: &mut H) {
				self.addr().hash(state)
			}
		}
	};
}


identity_impl!(Class);
identity_impl!(Object);
