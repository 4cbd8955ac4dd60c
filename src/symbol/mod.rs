mod fmt;

use intaglio::{Symbol as SymbolInner, SymbolTable};


/// A symbol is a reference to a string stored in the symbol interner.
/// Identifiers and source file names are interned.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Symbol(SymbolInner);


/// The default symbol is a dummy symbol, which will yield "<invalid symbol>" when
/// resolved.
impl Default for Symbol {
	fn default() -> Self {
		Self(SymbolInner::new(0))
	}
}


impl From<Symbol> for usize {
	fn from(symbol: Symbol) -> usize {
		symbol.0.id() as usize
	}
}


/// A symbol interner, used to store identifiers and paths.
#[derive(Debug)]
pub struct Interner(SymbolTable);


impl Interner {
	/// Create a new interner. Please note that this allocates memory even if no symbols are
	/// inserted.
	pub fn new() -> Self {
		let mut interner = SymbolTable::new();
		interner
			.intern("<invalid symbol>")
			.expect("failed to intern symbol");
		Self(interner)
	}


	/// Get the symbol for a value, if it has been interned.
	pub fn get<T>(&self, value: T) -> Option<Symbol>
	where
		T: AsRef<str>,
	{
		self.0
			.check_interned(value.as_ref())
			.map(Symbol)
	}


	/// Get the symbol for a value. The value is interned if needed.
	pub fn get_or_intern<T>(&mut self, value: T) -> Symbol
	where
		T: AsRef<str>,
	{
		let value = value.as_ref().to_owned();

		Symbol(
			self.0
				.intern(value)
				.expect("failed to intern symbol")
		)
	}


	/// Resolve the string for a symbol.
	pub fn resolve(&self, symbol: Symbol) -> Option<&str> {
		self.0.get(symbol.0)
	}


	/// Resolve the string for a symbol, yielding a placeholder for unknown symbols.
	pub fn lookup(&self, symbol: Symbol) -> &str {
		self.resolve(symbol).unwrap_or("<invalid symbol>")
	}


	/// Get the number of interned strings.
	/// This does not include the dummy symbol.
	#[cfg(test)]
	pub fn len(&self) -> usize {
		self.0.len() - 1
	}
}


impl Default for Interner {
	fn default() -> Self {
		Self::new()
	}
}


#[cfg(test)]
mod tests {
	use super::*;


	#[test]
	fn test_intern_is_idempotent() {
		let mut interner = Interner::new();

		let first = interner.get_or_intern("counter");
		let second = interner.get_or_intern("counter");

		assert_eq!(first, second);
		assert_eq!(interner.len(), 1);
		assert_eq!(interner.resolve(first), Some("counter"));
		assert_eq!(interner.get("missing"), None);
	}


	#[test]
	fn test_default_symbol_is_invalid() {
		let interner = Interner::new();
		assert_eq!(interner.lookup(Symbol::default()), "<invalid symbol>");
	}
}
