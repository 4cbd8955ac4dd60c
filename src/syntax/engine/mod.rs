mod error;
#[cfg(test)]
mod tests;

use std::ops::Range;

use super::{
	grammar::{self, Action, Directive, Grammar, Rule, Terminal},
	lexer::Token,
	SourcePos,
};
pub use error::Error;


/// The maximum nesting of production references. Deeper inputs are rejected instead of
/// overflowing the native stack.
const MAX_DEPTH: usize = 256;


/// An event recorded while matching the grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
	/// A production action, with the range of matched tokens.
	Action { action: Action, span: Range<usize> },
	/// The match count of a variable-length construct.
	Arity(usize),
	/// An emission directive.
	Directive(Directive),
	/// A statement begins at the given token.
	Line(usize),
}


/// The receiver of the parse events. Events are delivered in source order, and only for
/// alternatives that were part of the final match.
pub trait Interpreter {
	type Error;

	/// A production action matched the given tokens.
	fn action(&mut self, action: Action, tokens: &[Token]) -> Result<(), Self::Error>;

	/// The match count of the construct that just closed.
	fn arity(&mut self, arity: usize) -> Result<(), Self::Error>;

	/// Suspend, capture or resume the instruction emission.
	fn directive(&mut self, directive: Directive) -> Result<(), Self::Error>;

	/// A statement begins at the given position.
	fn line(&mut self, pos: SourcePos) -> Result<(), Self::Error>;
}


/// The result of a successful match: the event log.
#[derive(Debug)]
pub struct Parse {
	events: Vec<Event>,
}


impl Parse {
	/// Match a compilation unit.
	pub fn new(tokens: &[Token]) -> Result<Self, Error> {
		let grammar = grammar::grammar();
		let mut engine = Engine::new(grammar, tokens);

		let start = Rule::Ref(grammar.start());

		match engine.matches(&start, 0)? {
			Some(_) => Ok(Self { events: engine.events }),
			None => Err(engine.error()),
		}
	}


	/// The recorded events.
	pub fn events(&self) -> &[Event] {
		&self.events
	}


	/// Deliver the recorded events, in order, to the interpreter. The tokens must be the
	/// ones the parse was created from.
	pub fn replay<I>(&self, tokens: &[Token], interpreter: &mut I) -> Result<(), I::Error>
	where
		I: Interpreter,
	{
		for event in &self.events {
			match event {
				Event::Action { action, span } => {
					log::trace!("action {} at tokens {:?}", action.name(), span);
					interpreter.action(*action, &tokens[span.clone()])?
				}

				Event::Arity(arity) => interpreter.arity(*arity)?,

				Event::Directive(directive) => interpreter.directive(*directive)?,

				Event::Line(ix) => {
					if let Some(token) = tokens.get(*ix) {
						interpreter.line(token.pos)?
					}
				}
			}
		}

		Ok(())
	}
}


/// The outcome of matching a rule: the position after the match and the match count, or
/// None if the rule didn't match.
type Matched = Option<(usize, usize)>;


/// A PEG interpreter over a token slice.
#[derive(Debug)]
struct Engine<'a> {
	grammar: &'static Grammar,
	tokens: &'a [Token],
	events: Vec<Event>,
	/// The furthest token position where a terminal failed to match.
	furthest: usize,
	/// The terminals expected at the furthest position.
	expected: Vec<Terminal>,
	/// Lookahead nesting. Failures inside a lookahead are not reported.
	lookahead: usize,
	depth: usize,
}


impl<'a> Engine<'a> {
	fn new(grammar: &'static Grammar, tokens: &'a [Token]) -> Self {
		Self {
			grammar,
			tokens,
			events: Vec::new(),
			furthest: 0,
			expected: Vec::new(),
			lookahead: 0,
			depth: 0,
		}
	}


	/// Match a rule. The events of a failed match are discarded.
	fn matches(&mut self, rule: &Rule, pos: usize) -> Result<Matched, Error> {
		let mark = self.events.len();

		let matched = self.match_rule(rule, pos)?;

		if matched.is_none() {
			self.events.truncate(mark);
		}

		Ok(matched)
	}


	fn match_rule(&mut self, rule: &Rule, pos: usize) -> Result<Matched, Error> {
		match rule {
			Rule::Terminal(terminal) => Ok(self.terminal(*terminal, pos)),

			Rule::Ref(production) => {
				if self.depth >= MAX_DEPTH {
					return Err(Error::too_deep(self.pos_at(pos)));
				}

				let rule = self.grammar.rule(*production);

				self.depth += 1;
				let matched = self.matches(rule, pos);
				self.depth -= 1;

				Ok(matched?.map(|(next, _)| (next, 1)))
			}

			Rule::Seq(rules) => {
				let mut cur = pos;
				let mut committed = false;

				for rule in rules.iter() {
					if let Rule::Cut = rule {
						committed = true;
						continue;
					}

					match self.matches(rule, cur)? {
						Some((next, _)) => cur = next,
						None if committed => return Err(self.error()),
						None => return Ok(None),
					}
				}

				Ok(Some((cur, 1)))
			}

			Rule::Alt(rules) => {
				for rule in rules.iter() {
					if let Some(matched) = self.matches(rule, pos)? {
						return Ok(Some(matched));
					}
				}

				Ok(None)
			}

			Rule::Repeat(rule) => {
				let mut cur = pos;
				let mut count = 0;

				loop {
					let mark = self.events.len();

					match self.matches(rule, cur)? {
						// A match without progress would repeat forever.
						Some((next, _)) if next == cur => {
							self.events.truncate(mark);
							break;
						}

						Some((next, _)) => {
							cur = next;
							count += 1;
						}

						None => break,
					}
				}

				Ok(Some((cur, count)))
			}

			Rule::Optional(rule) => Ok(
				match self.matches(rule, pos)? {
					Some((next, _)) => Some((next, 1)),
					None => Some((pos, 0)),
				}
			),

			Rule::List { item, separator, allow_empty } => {
				let mut cur = match self.matches(item, pos)? {
					Some((next, _)) => next,
					None if *allow_empty => return Ok(Some((pos, 0))),
					None => return Ok(None),
				};
				let mut count = 1;

				loop {
					let mark = self.events.len();

					let after_separator = match self.matches(separator, cur)? {
						Some((next, _)) => next,
						None => break,
					};

					match self.matches(item, after_separator)? {
						Some((next, _)) => {
							cur = next;
							count += 1;
						}

						// A trailing separator is left for the enclosing rule.
						None => {
							self.events.truncate(mark);
							break;
						}
					}
				}

				Ok(Some((cur, count)))
			}

			Rule::Not(rule) => {
				let mark = self.events.len();

				self.lookahead += 1;
				let matched = self.matches(rule, pos);
				self.lookahead -= 1;

				if matched?.is_some() {
					self.events.truncate(mark);
					Ok(None)
				} else {
					Ok(Some((pos, 0)))
				}
			}

			// Commit points are handled by sequences. Anywhere else they match nothing.
			Rule::Cut => Ok(Some((pos, 0))),

			Rule::Action(rule, action) => {
				let matched = self.matches(rule, pos)?;

				if let Some((next, _)) = matched {
					self.events.push(Event::Action { action: *action, span: pos .. next });
				}

				Ok(matched)
			}

			Rule::Arity(rule) => {
				let matched = self.matches(rule, pos)?;

				Ok(
					matched.map(
						|(next, count)| {
							self.events.push(Event::Arity(count));
							(next, 1)
						}
					)
				)
			}

			Rule::Directive(directive) => {
				self.events.push(Event::Directive(*directive));
				Ok(Some((pos, 0)))
			}

			Rule::Line(rule) => {
				self.events.push(Event::Line(pos));
				self.matches(rule, pos)
			}
		}
	}


	/// Match a single terminal.
	fn terminal(&mut self, terminal: Terminal, pos: usize) -> Matched {
		let matched = match self.tokens.get(pos) {
			Some(token) => terminal.matches(&token.kind).then(|| pos + 1),
			None => (terminal == Terminal::Eof).then(|| pos),
		};

		if matched.is_none() {
			self.fail(terminal, pos);
		}

		matched.map(|next| (next, 1))
	}


	/// Record a terminal failure, keeping the expectations at the furthest position.
	fn fail(&mut self, terminal: Terminal, pos: usize) {
		if self.lookahead > 0 {
			return;
		}

		if pos > self.furthest {
			self.furthest = pos;
			self.expected.clear();
		}

		if pos == self.furthest && !self.expected.contains(&terminal) {
			self.expected.push(terminal);
		}
	}


	/// The syntax error at the furthest position reached.
	fn error(&self) -> Error {
		let expected = self.expected.clone().into_boxed_slice();

		match self.tokens.get(self.furthest) {
			Some(token) => Error::unexpected(token.clone(), expected),
			None => Error::unexpected_eof(expected),
		}
	}


	fn pos_at(&self, pos: usize) -> SourcePos {
		self.tokens
			.get(pos)
			.or_else(|| self.tokens.last())
			.map(|token| token.pos)
			.unwrap_or_default()
	}
}
