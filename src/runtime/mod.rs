mod env;
mod flow;
mod lib;
mod panic;
mod source;
#[cfg(test)]
mod tests;
pub mod value;

use std::io::{self, Write};

use gc::Gc;

use crate::{
	code::{BlockId, BuiltinId, Code, Instr, Literal, VarRef},
	symbol::{self, Symbol},
};
use env::{Activation, Deferred, Env};
use flow::Flow;
pub use lib::{registry, Builtin, CallContext, NativeFun, Registry};
pub use panic::Panic;
pub use source::SourcePos;
use value::{Array, Class, Dict, Function, Object, ScriptFun, Value};


/// The default maximum call depth.
pub const MAX_CALL_DEPTH: usize = 256;


/// The default amount of native stack a run may use, measured from the entry of `run`.
/// It fits the 2 MiB stack of spawned threads.
pub const STACK_BUDGET: usize = 1024 * 1024;


/// The address of a local variable, which locates the current native stack frame.
#[inline(never)]
fn stack_marker() -> usize {
	let marker = 0u8;
	std::hint::black_box(&marker) as *const u8 as usize
}


/// Push the value of a regular flow, or leave the block with any other flow.
macro_rules! regular {
	($self: ident, $flow: expr) => {
		match $flow {
			Flow::Regular(value) => $self.stack.push(value),
			flow => return Ok(Some(flow)),
		}
	};
}


/// The execution engine: an operand stack machine over the blocks of a `Code`.
pub struct Runtime<'a> {
	code: &'a Code,
	interner: &'a symbol::Interner,
	/// The operand stack, shared by all activations.
	stack: Vec<Value>,
	activations: Vec<Activation>,
	/// The in-flight panics of the activations running their deferred blocks.
	unwinding: Vec<Option<Panic>>,
	pos: SourcePos,
	max_depth: usize,
	stack_budget: usize,
	/// The stack marker at the entry of `run`.
	stack_base: usize,
	/// The environment of the root frame, kept across runs.
	root: Option<Gc<Env>>,
	output: Box<dyn Write + 'a>,
	sub_slice: BuiltinId,
}


impl<'a> Runtime<'a> {
	/// Create a runtime that writes to stdout.
	pub fn new(code: &'a Code, interner: &'a symbol::Interner) -> Self {
		let sub_slice = registry()
			.lookup("sub_slice")
			.expect("sub_slice builtin should be registered");

		Self {
			code,
			interner,
			stack: Vec::new(),
			activations: Vec::new(),
			unwinding: Vec::new(),
			pos: SourcePos::default(),
			max_depth: MAX_CALL_DEPTH,
			stack_budget: STACK_BUDGET,
			stack_base: 0,
			root: None,
			output: Box::new(io::stdout()),
			sub_slice,
		}
	}


	/// Set the output of the printing builtins.
	pub fn with_output<W: Write + 'a>(mut self, output: W) -> Self {
		self.output = Box::new(output);
		self
	}


	pub fn with_max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}


	/// Set the amount of native stack the run may use.
	pub fn with_stack_budget(mut self, stack_budget: usize) -> Self {
		self.stack_budget = stack_budget;
		self
	}


	/// Run the code, yielding the value of the entry block.
	/// Variables of the root frame keep their values from previous runs.
	pub fn run(&mut self) -> Result<Value, Panic> {
		self.stack_base = stack_marker();

		let env = self.root_env()?;

		self.activations.push(Activation::default());

		let result = self
			.run_block(self.code.root(), &env)
			.map(
				|flow| match flow {
					Flow::Regular(value) | Flow::Return(value) => value,
					Flow::Break | Flow::Continue => Value::Nil,
				}
			);

		let result = self.finish_activation(result);

		self.output
			.flush()
			.map_err(|error| Panic::io(error, self.pos))?;

		result
	}


	/// Get the value of a variable of the root frame.
	/// Yields `None` if the program doesn't declare the variable, or if the root frame
	/// doesn't exist yet.
	pub fn global(&self, name: &str) -> Option<Value> {
		let var = self.global_var(name)?;
		let env = self.root.as_ref()?;

		Some(env.load(var))
	}


	/// Set a variable of the root frame, to be seen by the next run.
	/// Yields `false` if the program doesn't declare the variable.
	pub fn set_global(&mut self, name: &str, value: Value) -> Result<bool, Panic> {
		let var = match self.global_var(name) {
			Some(var) => var,
			None => return Ok(false),
		};

		self.root_env()?.store(var, value, self.pos)?;

		Ok(true)
	}


	/// The variables of the root frame with their values, in slot order.
	pub fn globals(&self) -> Vec<(&'a str, Value)> {
		let env = match &self.root {
			Some(env) => env,
			None => return Vec::new(),
		};

		self.code
			.frame(self.code.root_frame())
			.descriptors()
			.iter()
			.map(
				|descriptor| {
					let var = VarRef { depth: 0, slot: descriptor.slot as u32 };
					(self.interner.lookup(descriptor.name), env.load(var))
				}
			)
			.collect()
	}


	/// Find a variable of the root frame. Later declarations shadow earlier ones.
	fn global_var(&self, name: &str) -> Option<VarRef> {
		let name = self.interner.get(name)?;

		self.code
			.frame(self.code.root_frame())
			.descriptors()
			.iter()
			.rev()
			.find(|descriptor| descriptor.name == name)
			.map(|descriptor| VarRef { depth: 0, slot: descriptor.slot as u32 })
	}


	/// The environment of the root frame, created on first use.
	fn root_env(&mut self) -> Result<Gc<Env>, Panic> {
		if let Some(env) = &self.root {
			return Ok(env.clone());
		}

		let frame = self.code
			.frame(self.code.root_frame())
			.instantiate(self.interner)
			.map_err(|error| Panic::layout(error, self.pos))?;

		let env = Gc::new(Env::new(frame, None));
		self.root = Some(env.clone());

		Ok(env)
	}


	/// The native stack used since the entry of `run`.
	fn stack_used(&self) -> usize {
		stack_marker().abs_diff(self.stack_base)
	}


	fn output(&mut self) -> &mut (dyn Write + 'a) {
		self.output.as_mut()
	}


	/// Run a block with a fresh operand stack base. The regular flow holds the topmost value
	/// left by the block, or nil.
	fn run_block(&mut self, block: BlockId, env: &Gc<Env>) -> Result<Flow, Panic> {
		let base = self.stack.len();

		let result = self.exec_block(block, env, base);

		let value =
			if self.stack.len() > base {
				self.stack.pop()
			} else {
				None
			};

		self.stack.truncate(base);

		match result? {
			None => Ok(Flow::Regular(value.unwrap_or_default())),
			Some(flow) => Ok(flow),
		}
	}


	/// Execute the instructions of a block. Yields the flow if the block is left early.
	fn exec_block(&mut self, block: BlockId, env: &Gc<Env>, base: usize) -> Result<Option<Flow>, Panic> {
		let code = self.code;

		for instr in code.block(block) {
			match instr {
				Instr::Push(literal) => {
					let value = Self::literal(literal);
					self.stack.push(value);
				}

				Instr::Load(var) => self.stack.push(env.load(*var)),

				Instr::Builtin(id) => self.stack.push(Function::Native(*id).into()),

				Instr::Store(var) => {
					let value = self.pop();
					env.store(*var, value, self.pos)?;
				}

				Instr::Update { var, op } => {
					let right = self.pop();
					let left = env.load(*var);
					let value = self.call_native(*op, vec![left, right])?;
					env.store(*var, value, self.pos)?;
				}

				Instr::Inc(var) => self.step(env, *var, 1)?,

				Instr::Dec(var) => self.step(env, *var, -1)?,

				Instr::MultiStore { vars, arity } => self.multi_store(env, vars, *arity)?,

				Instr::Op { op, arity } => {
					let args = self.pop_n(*arity);
					let value = self.call_native(*op, args)?;
					self.stack.push(value);
				}

				Instr::Slice { low, high } => {
					let high = if *high { self.pop() } else { Value::Nil };
					let low = if *low { self.pop() } else { Value::Nil };
					let target = self.pop();

					let value = self.call_native(self.sub_slice, vec![target, low, high])?;
					self.stack.push(value);
				}

				Instr::Call { arity } => {
					let args = self.pop_n(*arity);
					let function = self.pop();
					let value = self.call(function, args)?;
					self.stack.push(value);
				}

				Instr::CallSpread { arity } => {
					let mut args = self.pop_n(*arity);

					match args.pop() {
						Some(Value::Array(ref array)) => args.extend(array.borrow().iter().map(Value::copy)),
						Some(other) => return Err(Panic::invalid_operand(other, self.pos)),
						None => return Err(Panic::invalid_args(0, 1, self.pos)),
					}

					let function = self.pop();
					let value = self.call(function, args)?;
					self.stack.push(value);
				}

				Instr::MemberRef(name) => {
					let obj = self.pop();
					let value = self.member(obj, *name)?;
					self.stack.push(value);
				}

				Instr::And(right) => match self.pop() {
					Value::Bool(false) => self.stack.push(Value::Bool(false)),
					Value::Bool(true) => regular!(self, self.run_block(*right, env)?),
					value => return Err(Panic::invalid_condition(value, self.pos)),
				},

				Instr::Or(right) => match self.pop() {
					Value::Bool(true) => self.stack.push(Value::Bool(true)),
					Value::Bool(false) => regular!(self, self.run_block(*right, env)?),
					value => return Err(Panic::invalid_condition(value, self.pos)),
				},

				Instr::If { clauses, otherwise } => regular!(
					self,
					self.exec_if(clauses, *otherwise, env)?
				),

				Instr::Switch { tag, cases, default } => regular!(
					self,
					self.exec_switch(*tag, cases, *default, env)?
				),

				Instr::For { init, condition, step, body } => regular!(
					self,
					self.exec_for(*init, *condition, *step, *body, env)?
				),

				Instr::MakeFunction(id) => {
					let function = ScriptFun::new(*id, env.clone(), self.pos);
					self.stack.push(Function::Script(function).into());
				}

				Instr::MakeClass { methods } => {
					let members = self.pop_n(methods * 2);
					let dict = Dict::default();

					for pair in members.chunks_exact(2) {
						dict.insert(pair[0].copy(), pair[1].copy());
					}

					self.stack.push(Value::Class(Class::new(dict)));
				}

				Instr::New { arity } => {
					let args = self.pop_n(*arity);
					let class = self.pop();
					let obj = self.instantiate(class, args)?;
					self.stack.push(obj);
				}

				Instr::Return { arity } => {
					let mut values = self.pop_n(*arity);

					let value = match values.len() {
						0 => Value::Nil,
						1 => values.pop().unwrap_or_default(),
						_ => Array::new(values).into(),
					};

					return Ok(Some(Flow::Return(value)));
				}

				Instr::Break => return Ok(Some(Flow::Break)),

				Instr::Continue => return Ok(Some(Flow::Continue)),

				Instr::Defer(block) => {
					let deferred = Deferred { block: *block, env: env.clone() };

					self.activations
						.last_mut()
						.expect("defer outside of an activation")
						.deferred
						.push(deferred);
				}

				Instr::Recover => {
					let value = self.unwinding
						.last_mut()
						.and_then(Option::take)
						.map(|panic| {
							log::debug!("recovered panic raised at line {}", panic.pos().line);
							panic.into_value(self.interner)
						})
						.unwrap_or_default();

					self.stack.push(value);
				}

				Instr::Main(block) => regular!(self, self.run_block(*block, env)?),

				Instr::Clear => self.stack.truncate(base),

				Instr::Line { file, line } => self.pos = SourcePos::new(*file, *line),
			}
		}

		Ok(None)
	}


	fn exec_if(
		&mut self,
		clauses: &[(BlockId, BlockId)],
		otherwise: Option<BlockId>,
		env: &Gc<Env>,
	) -> Result<Flow, Panic> {
		for &(condition, body) in clauses {
			match self.run_block(condition, env)? {
				Flow::Regular(Value::Bool(true)) => return self.run_block(body, env),
				Flow::Regular(Value::Bool(false)) => (),
				Flow::Regular(value) => return Err(Panic::invalid_condition(value, self.pos)),
				flow => return Ok(flow),
			}
		}

		match otherwise {
			Some(block) => self.run_block(block, env),
			None => Ok(Flow::Regular(Value::Nil)),
		}
	}


	fn exec_switch(
		&mut self,
		tag: Option<BlockId>,
		cases: &[(BlockId, BlockId)],
		default: Option<BlockId>,
		env: &Gc<Env>,
	) -> Result<Flow, Panic> {
		let tag = match tag {
			Some(block) => match self.run_block(block, env)? {
				Flow::Regular(value) => Some(value),
				flow => return Ok(flow),
			},
			None => None,
		};

		for &(case, body) in cases {
			let value = match self.run_block(case, env)? {
				Flow::Regular(value) => value,
				flow => return Ok(flow),
			};

			let matches = match (&tag, value) {
				(Some(tag), value) => *tag == value,
				(None, Value::Bool(b)) => b,
				(None, value) => return Err(Panic::invalid_condition(value, self.pos)),
			};

			if matches {
				return self.run_block(body, env);
			}
		}

		match default {
			Some(block) => self.run_block(block, env),
			None => Ok(Flow::Regular(Value::Nil)),
		}
	}


	fn exec_for(
		&mut self,
		init: Option<BlockId>,
		condition: Option<BlockId>,
		step: Option<BlockId>,
		body: BlockId,
		env: &Gc<Env>,
	) -> Result<Flow, Panic> {
		if let Some(init) = init {
			let flow = self.run_block(init, env)?;

			if flow.is_exit() {
				return Ok(flow);
			}
		}

		loop {
			if let Some(condition) = condition {
				match self.run_block(condition, env)? {
					Flow::Regular(Value::Bool(true)) => (),
					Flow::Regular(Value::Bool(false)) => break,
					Flow::Regular(value) => return Err(Panic::invalid_condition(value, self.pos)),
					flow => return Ok(flow),
				}
			}

			match self.run_block(body, env)? {
				Flow::Regular(_) | Flow::Continue => (),
				Flow::Break => break,
				flow @ Flow::Return(_) => return Ok(flow),
			}

			if let Some(step) = step {
				let flow = self.run_block(step, env)?;

				if flow.is_exit() {
					return Ok(flow);
				}
			}
		}

		Ok(Flow::Regular(Value::Nil))
	}


	/// Call a function value.
	fn call(&mut self, function: Value, args: Vec<Value>) -> Result<Value, Panic> {
		let function = match function {
			Value::Function(ref function) => function.clone(),
			other => return Err(Panic::invalid_call(other, self.pos)),
		};

		match &*function {
			Function::Native(id) => self.call_native(*id, args),

			Function::Script(fun) => self.call_script(fun, None, args),

			Function::Bound { this, method } => match &**method {
				Function::Script(fun) => self.call_script(fun, Some(this.copy()), args),
				_ => self.call(Value::Function(method.clone()), args),
			},
		}
	}


	fn call_native(&mut self, id: BuiltinId, args: Vec<Value>) -> Result<Value, Panic> {
		let native = registry().get(id);
		let pos = self.pos;

		native.call(CallContext { runtime: self, args, pos })
	}


	fn call_script(&mut self, fun: &ScriptFun, this: Option<Value>, args: Vec<Value>) -> Result<Value, Panic> {
		let code = self.code;
		let definition = code.function(fun.id);
		let supplied = args.len() as u32;

		if definition.variadic {
			if supplied + 1 < definition.params {
				return Err(Panic::invalid_args(supplied, definition.params - 1, self.pos));
			}
		} else if supplied != definition.params {
			return Err(Panic::invalid_args(supplied, definition.params, self.pos));
		}

		if self.activations.len() >= self.max_depth || self.stack_used() > self.stack_budget {
			return Err(Panic::stack_overflow(self.pos));
		}

		log::trace!("call {} with {} arguments", fun.id, supplied);

		let caller_pos = self.pos;

		let frame = code
			.frame(definition.frame)
			.instantiate(self.interner)
			.map_err(|error| Panic::layout(error, self.pos))?;

		let env = Gc::new(Env::new(frame, Some(fun.env.clone())));
		let depth = env.depth();
		let mut slot = 0;

		if definition.member {
			env.store(VarRef { depth, slot }, this.unwrap_or_default(), self.pos)?;
			slot += 1;
		}

		let fixed =
			if definition.variadic {
				definition.params - 1
			} else {
				definition.params
			};

		let mut args = args.into_iter();

		for arg in args.by_ref().take(fixed as usize) {
			env.store(VarRef { depth, slot }, arg, self.pos)?;
			slot += 1;
		}

		if definition.variadic {
			let rest = Array::new(args.collect());
			env.store(VarRef { depth, slot }, rest.into(), self.pos)?;
		}

		self.activations.push(Activation::default());

		let result = self
			.run_block(definition.body, &env)
			.map(
				|flow| match flow {
					Flow::Return(value) => value,
					_ => Value::Nil,
				}
			);

		let result = self.finish_activation(result);

		self.pos = caller_pos;

		result
	}


	/// Run the deferred blocks of the current activation, last registered first, and pop
	/// it. A deferred block may stop the in-flight panic through `recover`.
	fn finish_activation(&mut self, result: Result<Value, Panic>) -> Result<Value, Panic> {
		let has_deferred = self.activations
			.last()
			.map_or(false, |activation| !activation.deferred.is_empty());

		if !has_deferred {
			self.activations.pop();
			return result;
		}

		let (value, panic) = match result {
			Ok(value) => (value, None),
			Err(panic) => (Value::Nil, Some(panic)),
		};

		self.unwinding.push(panic);

		while let Some(deferred) = self.activations
			.last_mut()
			.and_then(|activation| activation.deferred.pop())
		{
			if let Err(panic) = self.run_block(deferred.block, &deferred.env) {
				if let Some(in_flight) = self.unwinding.last_mut() {
					*in_flight = Some(panic);
				}
			}
		}

		self.activations.pop();

		match self.unwinding.pop().flatten() {
			Some(panic) => Err(panic),
			None => Ok(value),
		}
	}


	/// Create an object, calling the `init` member if present.
	fn instantiate(&mut self, class: Value, args: Vec<Value>) -> Result<Value, Panic> {
		let class = match class {
			Value::Class(ref class) => class.copy(),
			other => return Err(Panic::invalid_operand(other, self.pos)),
		};

		let obj = Value::Object(Object::new(class.copy()));

		match class.method(&"init".into()) {
			Some(init) => {
				self.call(Self::bind(obj.copy(), init), args)?;
			}

			None if !args.is_empty() => {
				return Err(Panic::invalid_args(args.len() as u32, 0, self.pos));
			}

			None => (),
		}

		Ok(obj)
	}


	fn member(&mut self, obj: Value, name: Symbol) -> Result<Value, Panic> {
		let name = self.interner.lookup(name);
		let key: Value = name.into();

		match &obj {
			Value::Object(object) => {
				if let Some(value) = object.fields().get(&key) {
					Ok(value)
				} else if let Some(method) = object.class().method(&key) {
					Ok(Self::bind(obj.copy(), method))
				} else {
					Err(Panic::unknown_member(name, self.pos))
				}
			}

			Value::Class(class) => class
				.method(&key)
				.ok_or_else(|| Panic::unknown_member(name, self.pos)),

			Value::Dict(dict) => Ok(dict.get(&key).unwrap_or_default()),

			_ => Err(Panic::invalid_operand(obj.copy(), self.pos)),
		}
	}


	/// Bind a member function to an object.
	fn bind(this: Value, method: Value) -> Value {
		match method {
			Value::Function(ref method) => Function::Bound { this, method: method.clone() }.into(),
			other => other,
		}
	}


	fn multi_store(&mut self, env: &Gc<Env>, vars: &[VarRef], arity: u32) -> Result<(), Panic> {
		let mut values = self.pop_n(arity);

		if vars.len() > 1 {
			let unpacked = match values.as_slice() {
				[ Value::Array(array) ] => Some(
					array
						.borrow()
						.iter()
						.map(Value::copy)
						.collect::<Vec<_>>()
				),
				_ => None,
			};

			if let Some(unpacked) = unpacked {
				values = unpacked;
			}
		}

		if values.len() != vars.len() {
			return Err(Panic::assignment_mismatch(vars.len() as u32, values.len() as u32, self.pos));
		}

		for (var, value) in vars.iter().zip(values) {
			env.store(*var, value, self.pos)?;
		}

		Ok(())
	}


	/// Increment or decrement a variable in place.
	fn step(&mut self, env: &Gc<Env>, var: VarRef, delta: i64) -> Result<(), Panic> {
		let pos = self.pos;

		env.update(
			var,
			|value| match value {
				Value::Int(int) => {
					*int = int
						.checked_add(delta)
						.ok_or_else(|| Panic::integer_overflow(pos))?;
					Ok(())
				}

				Value::Float(float) => {
					float.0 += delta as f64;
					Ok(())
				}

				other => Err(Panic::invalid_operand(other.copy(), pos)),
			}
		)
	}


	fn literal(literal: &Literal) -> Value {
		match literal {
			Literal::Nil => Value::Nil,
			Literal::Bool(b) => (*b).into(),
			Literal::Int(int) => (*int).into(),
			Literal::Float(float) => (*float).into(),
			Literal::Byte(byte) => (*byte).into(),
			Literal::String(string) => Value::from(&string[..]),
		}
	}


	fn pop(&mut self) -> Value {
		self.stack
			.pop()
			.expect("operand stack underflow")
	}


	fn pop_n(&mut self, count: u32) -> Vec<Value> {
		let at = self.stack
			.len()
			.checked_sub(count as usize)
			.expect("operand stack underflow");

		self.stack.split_off(at)
	}
}


impl<'a> std::fmt::Debug for Runtime<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		f.debug_struct("Runtime")
			.field("stack", &self.stack)
			.field("activations", &self.activations)
			.field("pos", &self.pos)
			.finish()
	}
}
