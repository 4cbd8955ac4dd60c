//! The grammar-driven compiler: translates the parse events of a compilation unit into
//! bytecode, resolving variables into frame slots as it goes.

mod actions;
mod emit;
mod error;
mod include;
mod scope;
#[cfg(test)]
mod tests;

use std::path::Path;

use crate::{
	code::{BuiltinId, Code, Instr},
	fmt,
	frame::FrameInfo,
	runtime,
	symbol::{self, Symbol},
	syntax::{
		self,
		grammar::{Action, Directive},
		lexer::{Literal, Token, TokenKind},
		Interpreter,
		Source,
		SourcePos,
	},
};
use emit::Emitter;
pub use error::{Error, ErrorKind, IncludeError};
pub use include::{FileInclude, Include, NoInclude};
use scope::Scopes;


/// The maximum nesting of included files.
const MAX_INCLUDE_DEPTH: usize = 64;


/// The builtins bound to operators.
#[derive(Debug, Clone, Copy)]
struct Operators {
	add: BuiltinId,
	sub: BuiltinId,
	mul: BuiltinId,
	quo: BuiltinId,
	modulo: BuiltinId,
	lt: BuiltinId,
	gt: BuiltinId,
	eq: BuiltinId,
	le: BuiltinId,
	ge: BuiltinId,
	ne: BuiltinId,
	not: BuiltinId,
	neg: BuiltinId,
	map_from: BuiltinId,
	slice_from: BuiltinId,
	get: BuiltinId,
}


impl Operators {
	fn bind() -> Self {
		let registry = runtime::registry();
		let lookup = |name: &str| registry
			.lookup(name)
			.expect("operator builtins should be registered");

		Self {
			add: lookup("add"),
			sub: lookup("sub"),
			mul: lookup("mul"),
			quo: lookup("quo"),
			modulo: lookup("mod"),
			lt: lookup("lt"),
			gt: lookup("gt"),
			eq: lookup("eq"),
			le: lookup("le"),
			ge: lookup("ge"),
			ne: lookup("ne"),
			not: lookup("not"),
			neg: lookup("neg"),
			map_from: lookup("map_from"),
			slice_from: lookup("slice_from"),
			get: lookup("get"),
		}
	}
}


/// The shape of a function whose body is being compiled.
#[derive(Debug)]
struct Header {
	params: u32,
	variadic: bool,
	member: bool,
}


/// The compiler for a compilation unit and the units it includes.
pub struct Compiler<'a> {
	interner: &'a mut symbol::Interner,
	include: Box<dyn Include + 'a>,
	emitter: Emitter,
	scopes: Scopes,
	/// Names awaiting their construct: multiple assignment targets, parameters and member
	/// names.
	names: Vec<(Symbol, SourcePos)>,
	headers: Vec<Header>,
	operators: Operators,
	file: Symbol,
	path: Box<Path>,
	include_depth: usize,
	pos: SourcePos,
}


impl<'a> Compiler<'a> {
	/// Create a compiler without source inclusion.
	pub fn new(interner: &'a mut symbol::Interner) -> Self {
		Self {
			interner,
			include: Box::new(NoInclude),
			emitter: Emitter::default(),
			scopes: Scopes::new(),
			names: Vec::new(),
			headers: Vec::new(),
			operators: Operators::bind(),
			file: Symbol::default(),
			path: Path::new("").into(),
			include_depth: 0,
			pos: SourcePos::default(),
		}
	}


	/// Set the source inclusion handler.
	pub fn with_include<I: Include + 'a>(mut self, include: I) -> Self {
		self.include = Box::new(include);
		self
	}


	/// Compile an entry unit.
	pub fn compile(mut self, source: &Source) -> Result<Code, Error> {
		self.enter(source);
		self.unit(source)?;
		self.finish()
	}


	/// Make the given source the current unit.
	fn enter(&mut self, source: &Source) {
		self.file = self.interner.get_or_intern(source.path.to_string_lossy());
		self.path = source.path.clone();
		self.pos = SourcePos::default();
	}


	/// Analyze a unit and replay it into the compiler.
	fn unit(&mut self, source: &Source) -> Result<(), Error> {
		log::debug!("compiling {}", source.path.display());

		let analysis = syntax::Analysis::analyze(source, self.interner)
			.map_err(
				|error| Error {
					kind: ErrorKind::Syntax(fmt::to_string(&error, &*self.interner)),
					file: self.interner.lookup(self.file).into(),
					pos: None,
				}
			)?;

		analysis.replay(self)
	}


	/// Compile an included unit into the current stream and frame.
	fn include(&mut self, tokens: &[Token]) -> Result<(), Error> {
		let path: Box<str> = match tokens.first().map(|token| &token.kind) {
			Some(TokenKind::Literal(Literal::String(path))) => path.clone(),
			_ => return Err(self.error(ErrorKind::Internal("include without a path"))),
		};

		if self.include_depth >= MAX_INCLUDE_DEPTH {
			return Err(self.error(ErrorKind::IncludeTooDeep));
		}

		let source = match self.include.include(&path, &self.path) {
			Ok(source) => source,
			Err(source) => return Err(self.error(ErrorKind::Include { path, source })),
		};

		let saved = (self.file, self.path.clone(), self.pos);

		self.enter(&source);
		self.include_depth += 1;

		let result = self.unit(&source);

		self.include_depth -= 1;
		(self.file, self.path, self.pos) = saved;

		result
	}


	fn finish(self) -> Result<Code, Error> {
		if let Some(forward) = self.scopes.undefined() {
			return Err(
				Error {
					kind: ErrorKind::UndefinedVariable(self.interner.lookup(forward.name).into()),
					file: self.interner.lookup(forward.file).into(),
					pos: Some(forward.pos),
				}
			);
		}

		let file: Box<str> = self.interner.lookup(self.file).into();
		let error = |kind: ErrorKind| Error { kind, file: file.clone(), pos: None };

		if !self.names.is_empty() || !self.headers.is_empty() {
			return Err(error(ErrorKind::Internal("unclaimed names at the end of the unit")));
		}

		let (mut code, stream) = self.emitter.finish().map_err(error)?;
		let descriptors = self.scopes.close_root().map_err(error)?;

		let info = FrameInfo::new(descriptors, 0);
		info.layout(self.interner)
			.map_err(|layout| error(layout.into()))?;

		let root_frame = code.add_frame(info);
		let root = code.splice_block(stream);

		Ok(code.finish(root, root_frame))
	}


	fn error(&self, kind: ErrorKind) -> Error {
		Error {
			kind,
			file: self.interner.lookup(self.file).into(),
			pos: Some(self.pos),
		}
	}
}


impl<'a> Interpreter for Compiler<'a> {
	type Error = Error;

	fn action(&mut self, action: Action, tokens: &[Token]) -> Result<(), Error> {
		if let Some(token) = tokens.first() {
			self.pos = token.pos;
		}

		match action {
			Action::Include => self.include(tokens),
			action => self
				.dispatch(action, tokens)
				.map_err(|kind| self.error(kind)),
		}
	}


	fn arity(&mut self, arity: usize) -> Result<(), Error> {
		self.emitter.push_arity(arity);
		Ok(())
	}


	fn directive(&mut self, directive: Directive) -> Result<(), Error> {
		let result = match directive {
			Directive::Mute => {
				self.emitter.mute();
				Ok(())
			}
			Directive::Code => self.emitter.seal(),
			Directive::Unmute => self.emitter.unmute(),
		};

		result.map_err(|kind| self.error(kind))
	}


	fn line(&mut self, pos: SourcePos) -> Result<(), Error> {
		self.pos = pos;
		self.emitter.emit(Instr::Line { file: self.file, line: pos.line });
		Ok(())
	}
}


impl<'a> std::fmt::Debug for Compiler<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		f.debug_struct("Compiler")
			.field("emitter", &self.emitter)
			.field("scopes", &self.scopes)
			.field("names", &self.names)
			.field("file", &self.file)
			.field("include_depth", &self.include_depth)
			.field("pos", &self.pos)
			.finish()
	}
}
