mod class;
mod float;
mod fmt;
mod function;

use std::{
	cmp::Ordering,
	collections::{HashMap, BTreeMap},
	convert::TryInto,
	hash::{Hash, Hasher},
	ops::Deref,
};

use gc::{Gc, GcCell, GcCellRef, GcCellRefMut, Finalize, Trace};

use crate::frame::{SlotType, SlotValue};
pub use class::{Class, Object};
pub use float::Float;
pub use function::{Function, ScriptFun};


#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Trace, Finalize)]
pub enum Value {
	Nil,
	Bool(bool),
	Int(i64),
	Float(Float),
	Byte(u8),
	String(Gc<Box<[u8]>>),
	Array(Array),
	Dict(Dict),
	Function(Gc<Function>),
	Class(Class),
	Object(Object),
}


impl Value {
	/// Shallow copy.
	pub fn copy(&self) -> Self {
		match self {
			Self::Nil => Self::Nil,
			Self::Bool(b) => Self::Bool(*b),
			Self::Int(int) => Self::Int(*int),
			Self::Float(float) => Self::Float(*float),
			Self::Byte(byte) => Self::Byte(*byte),
			Self::String(string) => Self::String(string.clone()),
			Self::Array(array) => Self::Array(array.copy()),
			Self::Dict(dict) => Self::Dict(dict.copy()),
			Self::Function(fun) => Self::Function(fun.clone()),
			Self::Class(class) => Self::Class(class.copy()),
			Self::Object(obj) => Self::Object(obj.copy()),
		}
	}


	/// The name of the value's type, as reported by the `type` builtin.
	pub fn type_name(&self) -> &'static str {
		match self {
			Self::Nil => "nil",
			Self::Bool(_) => "bool",
			Self::Int(_) => "int",
			Self::Float(_) => "float",
			Self::Byte(_) => "byte",
			Self::String(_) => "string",
			Self::Array(_) => "array",
			Self::Dict(_) => "dict",
			Self::Function(_) => "function",
			Self::Class(_) => "class",
			Self::Object(_) => "object",
		}
	}


	/// Whether the value is the given array or dict, or holds it in a nested array or dict.
	/// Storing such a value in the container would make it cyclic. Objects are not
	/// searched, as they compare and hash by identity.
	pub fn reaches(&self, container: &Value) -> bool {
		let same = match (self, container) {
			(Self::Array(array), Self::Array(other)) => array.ptr_eq(other),
			(Self::Dict(dict), Self::Dict(other)) => dict.ptr_eq(other),
			_ => false,
		};

		same || match self {
			Self::Array(array) => array
				.borrow()
				.iter()
				.any(|item| item.reaches(container)),

			Self::Dict(dict) => dict
				.borrow()
				.iter()
				.any(|(key, value)| key.reaches(container) || value.reaches(container)),

			_ => false,
		}
	}
}


impl Default for Value {
	fn default() -> Self {
		Self::Nil
	}
}


impl SlotValue for Value {
	fn zero(ty: SlotType) -> Self {
		match ty {
			SlotType::Any => Self::Nil,
			SlotType::Bool => Self::Bool(false),
			SlotType::Int => Self::Int(0),
			SlotType::Float => Self::Float(Float(0.0)),
			SlotType::Byte => Self::Byte(0),
			SlotType::String => "".into(),
		}
	}


	fn is_nil(&self) -> bool {
		matches!(self, Self::Nil)
	}


	fn fits(&self, ty: SlotType) -> bool {
		matches!(
			(ty, self),
			(SlotType::Any, _)
				| (SlotType::Bool, Self::Bool(_))
				| (SlotType::Int, Self::Int(_))
				| (SlotType::Float, Self::Float(_))
				| (SlotType::Byte, Self::Byte(_))
				| (SlotType::String, Self::String(_))
		)
	}
}


impl From<bool> for Value {
	fn from(b: bool) -> Self {
		Self::Bool(b)
	}
}


impl From<i64> for Value {
	fn from(int: i64) -> Self {
		Self::Int(int)
	}
}


impl From<f64> for Value {
	fn from(float: f64) -> Self {
		Self::Float(float.into())
	}
}


impl From<Float> for Value {
	fn from(float: Float) -> Self {
		Self::Float(float)
	}
}


impl From<u8> for Value {
	fn from(byte: u8) -> Self {
		Self::Byte(byte)
	}
}


impl<'a> From<&'a str> for Value {
	fn from(string: &'a str) -> Self {
		string.as_bytes().into()
	}
}


impl<'a> From<&'a [u8]> for Value {
	fn from(string: &'a [u8]) -> Self {
		Self::String(
			Gc::new(string.into())
		)
	}
}


impl From<Vec<u8>> for Value {
	fn from(string: Vec<u8>) -> Self {
		Self::String(
			Gc::new(string.into_boxed_slice())
		)
	}
}


impl From<Array> for Value {
	fn from(array: Array) -> Self {
		Self::Array(array)
	}
}


impl From<Dict> for Value {
	fn from(dict: Dict) -> Self {
		Self::Dict(dict)
	}
}


impl From<Function> for Value {
	fn from(fun: Function) -> Self {
		Self::Function(Gc::new(fun))
	}
}


#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
#[derive(Trace, Finalize)]
pub struct Array(Gc<GcCell<Vec<Value>>>);


impl Array {
	pub fn new(vec: Vec<Value>) -> Self {
		Self(Gc::new(GcCell::new(vec)))
	}


	pub fn copy(&self) -> Self {
		Self(self.0.clone())
	}


	/// Whether both refer to the same array.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Gc::ptr_eq(&self.0, &other.0)
	}


	pub fn borrow(&self) -> GcCellRef<Vec<Value>> {
		self.0.deref().borrow()
	}


	pub fn borrow_mut(&self) -> GcCellRefMut<Vec<Value>> {
		self.0.deref().borrow_mut()
	}


	pub fn push(&self, value: Value) {
		self.borrow_mut().push(value)
	}


	pub fn index(&self, index: i64) -> Option<Value> {
		let index: usize = index.try_into().ok()?;

		self
			.borrow()
			.get(index)
			.map(Value::copy)
	}


	/// Set the value at the given index. Returns false if the index is out of bounds.
	pub fn set(&self, index: i64, value: Value) -> bool {
		let index: usize = match index.try_into() {
			Ok(index) => index,
			Err(_) => return false,
		};

		match self.borrow_mut().get_mut(index) {
			Some(slot) => {
				*slot = value;
				true
			}

			None => false,
		}
	}


	pub fn len(&self) -> i64 {
		self.borrow().len() as i64
	}


	pub fn is_empty(&self) -> bool {
		self.borrow().is_empty()
	}
}


impl Hash for Array {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.borrow().hash(state)
	}
}


#[derive(Debug, PartialEq, Eq)]
#[derive(Trace, Finalize)]
pub struct Dict(Gc<GcCell<HashMap<Value, Value>>>);


impl Dict {
	pub fn new(dict: HashMap<Value, Value>) -> Self {
		Self(Gc::new(GcCell::new(dict)))
	}


	pub fn copy(&self) -> Self {
		Self(self.0.clone())
	}


	/// Whether both refer to the same dict.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Gc::ptr_eq(&self.0, &other.0)
	}


	pub fn borrow(&self) -> GcCellRef<HashMap<Value, Value>> {
		self.0.deref().borrow()
	}


	pub fn borrow_mut(&self) -> GcCellRefMut<HashMap<Value, Value>> {
		self.0.deref().borrow_mut()
	}


	pub fn insert(&self, key: Value, value: Value) {
		self.borrow_mut().insert(key, value);
	}


	pub fn get(&self, key: &Value) -> Option<Value> {
		self
			.borrow()
			.get(key)
			.map(Value::copy)
	}


	pub fn len(&self) -> i64 {
		self.borrow().len() as i64
	}


	pub fn is_empty(&self) -> bool {
		self.borrow().is_empty()
	}
}


impl Default for Dict {
	fn default() -> Self {
		Self::new(HashMap::new())
	}
}


impl PartialOrd for Dict {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}


/// This is very expensive, but there is no better way to correctly compare.
impl Ord for Dict {
	fn cmp(&self, other: &Self) -> Ordering {
		let _self = self.borrow();
		let _self: BTreeMap<&Value, &Value> = _self.iter().collect();

		let _other = other.borrow();
		let _other: BTreeMap<&Value, &Value> = _other.iter().collect();

		_self.cmp(&_other)
	}
}


impl Hash for Dict {
	fn hash<H: Hasher>(&self, state: &mut H) {
		let _self = self.borrow();
		let _self: BTreeMap<&Value, &Value> = _self.iter().collect();

		_self.hash(state)
	}
}
