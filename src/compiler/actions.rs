use super::{Compiler, ErrorKind, Header};
use crate::{
	code::{BlockId, BuiltinId, Function, Instr, Literal},
	frame::FrameInfo,
	runtime,
	symbol::Symbol,
	syntax::{
		grammar::Action,
		lexer::{self, Token, TokenKind},
		SourcePos,
	},
};


impl<'a> Compiler<'a> {
	/// Translate a construct action into instructions.
	pub(super) fn dispatch(&mut self, action: Action, tokens: &[Token]) -> Result<(), ErrorKind> {
		log::trace!("action {} at line {}", action.name(), self.pos.line);

		let ops = self.operators;

		match action {
			Action::PushNil => self.emit(Instr::Push(Literal::Nil)),
			Action::PushInt | Action::PushFloat | Action::PushString | Action::PushChar => {
				let literal = literal(tokens)?;
				self.emit(Instr::Push(literal));
			}

			Action::Ref => {
				let name = identifier(tokens)?;
				self.reference(name);
			}

			Action::Name => {
				let name = identifier(tokens)?;
				self.names.push((name, self.pos));
			}

			Action::MemberRef => {
				let name = match tokens.first().map(|token| &token.kind) {
					Some(TokenKind::Identifier(name)) => *name,
					Some(TokenKind::Keyword(keyword)) => self.interner.get_or_intern(keyword.as_str()),
					_ => return Err(ErrorKind::Internal("member reference without a name")),
				};

				self.emit(Instr::MemberRef(name));
			}

			Action::Mul => self.operator(ops.mul, 2),
			Action::Quo => self.operator(ops.quo, 2),
			Action::Mod => self.operator(ops.modulo, 2),
			Action::Add => self.operator(ops.add, 2),
			Action::Sub => self.operator(ops.sub, 2),
			Action::Lt => self.operator(ops.lt, 2),
			Action::Gt => self.operator(ops.gt, 2),
			Action::Eq => self.operator(ops.eq, 2),
			Action::Le => self.operator(ops.le, 2),
			Action::Ge => self.operator(ops.ge, 2),
			Action::Ne => self.operator(ops.ne, 2),
			Action::Not => self.operator(ops.not, 1),
			Action::Neg => self.operator(ops.neg, 1),

			Action::And => {
				let right = self.single_block()?;
				self.emit(Instr::And(right));
			}

			Action::Or => {
				let right = self.single_block()?;
				self.emit(Instr::Or(right));
			}

			Action::Slice => {
				let arity = self.emitter.pop_arity()?;
				self.operator(ops.slice_from, arity);
			}

			Action::Map => {
				let arity = self.emitter.pop_arity()?;
				self.operator(ops.map_from, arity * 2);
			}

			Action::Call => {
				let spread = self.emitter.pop_flag()?;
				let arity = self.emitter.pop_arity()? as u32;

				let instr = match (spread, arity) {
					(false, arity) => Instr::Call { arity },
					(true, 0) => return Err(ErrorKind::SpreadWithoutArguments),
					(true, arity) => Instr::CallSpread { arity },
				};

				self.emit(instr);
			}

			Action::Index => {
				let end = self.emitter.pop_flag()?;
				let mid = self.emitter.pop_flag()?;
				let start = self.emitter.pop_flag()?;

				let instr = match (start, mid, end) {
					(false, false, false) => return Err(ErrorKind::IndexWithoutIndex),
					(true, false, false) => Instr::Op { op: ops.get, arity: 2 },
					(low, true, high) => Instr::Slice { low, high },
					_ => return Err(ErrorKind::MalformedIndex),
				};

				self.emit(instr);
			}

			Action::Assign => {
				let var = self.scopes.write(identifier(tokens)?);
				self.emit(Instr::Store(var));
			}

			Action::MultiAssign => {
				let arity = self.emitter.pop_arity()? as u32;
				let targets = self.emitter.pop_arity()? + 1;
				let vars = self
					.take_names(targets)?
					.into_iter()
					.map(|(name, _)| self.scopes.write(name))
					.collect();

				self.emit(Instr::MultiStore { vars, arity });
			}

			Action::Inc => {
				let var = self.scopes.write(identifier(tokens)?);
				self.emit(Instr::Inc(var));
			}

			Action::Dec => {
				let var = self.scopes.write(identifier(tokens)?);
				self.emit(Instr::Dec(var));
			}

			Action::AddAssign => self.update(tokens, ops.add)?,
			Action::SubAssign => self.update(tokens, ops.sub)?,
			Action::MulAssign => self.update(tokens, ops.mul)?,
			Action::QuoAssign => self.update(tokens, ops.quo)?,
			Action::ModAssign => self.update(tokens, ops.modulo)?,

			Action::Clear => self.emit(Instr::Clear),

			Action::Return => {
				let arity = self.emitter.pop_arity()? as u32;
				self.emit(Instr::Return { arity });
			}

			Action::Break => {
				self.check_loop("break")?;
				self.emit(Instr::Break);
			}

			Action::Continue => {
				self.check_loop("continue")?;
				self.emit(Instr::Continue);
			}

			// Handled by the interpreter, as it compiles a whole unit.
			Action::Include => return Err(ErrorKind::Internal("include dispatched as an action")),

			Action::Defer => {
				let block = self.single_block()?;
				self.emit(Instr::Defer(block));
			}

			Action::Recover => self.emit(Instr::Recover),

			Action::Main => {
				let block = self.single_block()?;

				if self.include_depth == 0 {
					self.emit(Instr::Main(block));
				} else {
					self.emit(Instr::Push(Literal::Nil));
				}
			}

			Action::If => self.conditional()?,

			Action::Switch => self.switch()?,

			Action::ForBegin => self.scopes.enter_loop(),

			Action::For => self.for_loop()?,

			Action::FnBegin => self.function_begin(false)?,

			Action::MemberFnBegin => self.function_begin(true)?,

			Action::Function => self.function(false)?,

			Action::MemberFunction => self.function(true)?,

			Action::Class => {
				let methods = self.emitter.pop_arity()? as u32;
				self.emit(Instr::MakeClass { methods });
			}

			Action::New => {
				let arity =
					if self.emitter.pop_flag()? {
						self.emitter.pop_arity()? as u32
					} else {
						0
					};

				self.emit(Instr::New { arity });
			}
		}

		Ok(())
	}


	fn emit(&mut self, instr: Instr) {
		self.emitter.emit(instr);
	}


	fn operator(&mut self, op: BuiltinId, arity: usize) {
		self.emit(Instr::Op { op, arity: arity as u32 });
	}


	/// Resolve a name being read.
	fn reference(&mut self, name: Symbol) {
		let instr = match self.scopes.find(name) {
			Some(var) => Instr::Load(var),
			None => match self.interner.lookup(name) {
				"nil" => Instr::Push(Literal::Nil),
				"true" => Instr::Push(Literal::Bool(true)),
				"false" => Instr::Push(Literal::Bool(false)),
				other => match runtime::registry().lookup(other) {
					Some(builtin) => Instr::Builtin(builtin),
					None => Instr::Load(self.scopes.declare_forward(name, self.file, self.pos)),
				},
			},
		};

		self.emit(instr);
	}


	fn update(&mut self, tokens: &[Token], op: BuiltinId) -> Result<(), ErrorKind> {
		let var = self.scopes.write(identifier(tokens)?);
		self.emit(Instr::Update { var, op });
		Ok(())
	}


	fn check_loop(&self, statement: &'static str) -> Result<(), ErrorKind> {
		if self.scopes.in_loop() {
			Ok(())
		} else {
			Err(ErrorKind::OutsideLoop(statement))
		}
	}


	/// Take the topmost names, in declaration order.
	fn take_names(&mut self, count: usize) -> Result<Vec<(Symbol, SourcePos)>, ErrorKind> {
		let start = self.names
			.len()
			.checked_sub(count)
			.ok_or(ErrorKind::Internal("name stack underflow"))?;

		Ok(self.names.split_off(start))
	}


	fn single_block(&mut self) -> Result<BlockId, ErrorKind> {
		let blocks = self.emitter.blocks_exact(1)?;
		Ok(blocks[0])
	}


	fn conditional(&mut self) -> Result<(), ErrorKind> {
		let otherwise = self.emitter.pop_flag()?;
		let elifs = self.emitter.pop_arity()?;

		let mut blocks = self.emitter.blocks_exact(2 + 2 * elifs + otherwise as usize)?;

		let otherwise =
			if otherwise {
				blocks.pop()
			} else {
				None
			};

		let clauses = blocks
			.chunks_exact(2)
			.map(|clause| (clause[0], clause[1]))
			.collect();

		self.emit(Instr::If { clauses, otherwise });

		Ok(())
	}


	fn switch(&mut self) -> Result<(), ErrorKind> {
		let default = self.emitter.pop_flag()?;
		let cases = self.emitter.pop_arity()?;

		let mut blocks = self.emitter.blocks_exact(1 + 2 * cases + default as usize)?;

		let default =
			if default {
				blocks.pop()
			} else {
				None
			};

		let tag = Some(blocks[0]).filter(|&tag| !self.emitter.is_empty_block(tag));

		let cases = blocks[1..]
			.chunks_exact(2)
			.map(|case| (case[0], case[1]))
			.collect();

		self.emit(Instr::Switch { tag, cases, default });

		Ok(())
	}


	fn for_loop(&mut self) -> Result<(), ErrorKind> {
		let clauses = self.emitter.pop_arity()?;
		let blocks = self.emitter.blocks_exact(clauses + 1)?;

		let (init, condition, step) = match &blocks[.. clauses] {
			[] => (None, None, None),
			&[condition] => (None, Some(condition), None),
			&[init, condition, step] => (Some(init), Some(condition), Some(step)),
			_ => return Err(ErrorKind::ForClauses(clauses)),
		};

		self.scopes.leave_loop()?;

		self.emit(
			Instr::For {
				init,
				condition,
				step,
				body: blocks[clauses],
			}
		);

		Ok(())
	}


	/// Open the frame of a function once its parameter list is known.
	fn function_begin(&mut self, member: bool) -> Result<(), ErrorKind> {
		let variadic = self.emitter.pop_flag()?;
		let params = self.emitter.pop_arity()?;

		if variadic && params == 0 {
			return Err(ErrorKind::VariadicWithoutParameters);
		}

		let names = self.take_names(params)?;

		self.scopes.open();

		if member {
			let this = self.interner.get_or_intern("this");
			self.scopes.declare(this);
		}

		for (name, _) in names {
			self.scopes.declare(name);
		}

		self.headers.push(
			Header {
				params: params as u32,
				variadic,
				member,
			}
		);

		Ok(())
	}


	fn function(&mut self, member: bool) -> Result<(), ErrorKind> {
		let body = self.single_block()?;

		let header = self.headers
			.pop()
			.ok_or(ErrorKind::Internal("function without a header"))?;

		if header.member != member {
			return Err(ErrorKind::Internal("function header of the wrong kind"));
		}

		let (descriptors, depth) = self.scopes.close()?;
		let info = FrameInfo::new(descriptors, depth);
		info.layout(self.interner)?;

		let frame = self.emitter.code.add_frame(info);
		let id = self.emitter.code.add_function(
			Function {
				body,
				frame,
				params: header.params,
				variadic: header.variadic,
				member,
			}
		);

		if member {
			let (name, _) = self.names
				.pop()
				.ok_or(ErrorKind::Internal("member function without a name"))?;

			let name = self.interner.lookup(name).as_bytes().into();
			self.emit(Instr::Push(Literal::String(name)));
		}

		self.emit(Instr::MakeFunction(id));

		Ok(())
	}
}


fn identifier(tokens: &[Token]) -> Result<Symbol, ErrorKind> {
	match tokens.first().map(|token| &token.kind) {
		Some(TokenKind::Identifier(name)) => Ok(*name),
		_ => Err(ErrorKind::Internal("expected an identifier")),
	}
}


fn literal(tokens: &[Token]) -> Result<Literal, ErrorKind> {
	let literal = match tokens.first().map(|token| &token.kind) {
		Some(TokenKind::Literal(literal)) => literal,
		_ => return Err(ErrorKind::Internal("expected a literal")),
	};

	Ok(
		match literal {
			lexer::Literal::Int(int) => Literal::Int(*int),
			lexer::Literal::Float(float) => Literal::Float(*float),
			lexer::Literal::Char(byte) => Literal::Byte(*byte),
			lexer::Literal::String(string) => Literal::String(string.as_bytes().into()),
		}
	)
}
