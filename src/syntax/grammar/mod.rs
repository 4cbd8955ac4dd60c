mod table;

use std::sync::OnceLock;

use super::lexer::{Keyword, Operator, TokenKind};


/// A grammar production. Productions are referenced by name from the rules, which allows
/// recursive grammars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Production {
	Program,
	Doc,
	Statement,
	Expr,
	Term1,
	Term2,
	Term3,
	Term4,
	Factor,
	Atom,
	IfBody,
	SwitchBody,
	FnBody,
	MemberFnBody,
	ClassName,
	NewArgs,
	ClassMember,
}


impl Production {
	/// All productions, in table order.
	pub const ALL: [Production; 17] = [
		Self::Program,
		Self::Doc,
		Self::Statement,
		Self::Expr,
		Self::Term1,
		Self::Term2,
		Self::Term3,
		Self::Term4,
		Self::Factor,
		Self::Atom,
		Self::IfBody,
		Self::SwitchBody,
		Self::FnBody,
		Self::MemberFnBody,
		Self::ClassName,
		Self::NewArgs,
		Self::ClassMember,
	];


	/// The name of the production in the grammar text.
	pub fn name(self) -> &'static str {
		match self {
			Self::Program => "program",
			Self::Doc => "doc",
			Self::Statement => "s",
			Self::Expr => "expr",
			Self::Term1 => "term1",
			Self::Term2 => "term2",
			Self::Term3 => "term3",
			Self::Term4 => "term4",
			Self::Factor => "factor",
			Self::Atom => "atom",
			Self::IfBody => "ifbody",
			Self::SwitchBody => "swbody",
			Self::FnBody => "fnbody",
			Self::MemberFnBody => "mfnbody",
			Self::ClassName => "clsname",
			Self::NewArgs => "newargs",
			Self::ClassMember => "classb",
		}
	}
}


/// The action a production triggers in the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
	// Literals.
	PushNil,
	PushInt,
	PushFloat,
	PushString,
	PushChar,

	// Names.
	Ref,
	Name,
	MemberRef,

	// Operators.
	Mul,
	Quo,
	Mod,
	Add,
	Sub,
	Lt,
	Gt,
	Eq,
	Le,
	Ge,
	Ne,
	And,
	Or,
	Not,
	Neg,

	// Composite values.
	Slice,
	Map,
	Call,
	Index,

	// Assignment.
	Assign,
	MultiAssign,
	Inc,
	Dec,
	AddAssign,
	SubAssign,
	MulAssign,
	QuoAssign,
	ModAssign,

	// Statements.
	Clear,
	Return,
	Break,
	Continue,
	Include,
	Defer,

	// Control constructs.
	If,
	Switch,
	ForBegin,
	For,

	// Functions and classes.
	FnBegin,
	MemberFnBegin,
	Function,
	MemberFunction,
	Class,
	New,
	Recover,
	Main,
}


impl Action {
	/// The name of the action in the grammar text.
	pub fn name(self) -> &'static str {
		match self {
			Self::PushNil => "pushn",
			Self::PushInt => "pushi",
			Self::PushFloat => "pushf",
			Self::PushString => "pushs",
			Self::PushChar => "pushc",
			Self::Ref => "ref",
			Self::Name => "name",
			Self::MemberRef => "mref",
			Self::Mul => "mul",
			Self::Quo => "quo",
			Self::Mod => "mod",
			Self::Add => "add",
			Self::Sub => "sub",
			Self::Lt => "lt",
			Self::Gt => "gt",
			Self::Eq => "eq",
			Self::Le => "le",
			Self::Ge => "ge",
			Self::Ne => "ne",
			Self::And => "and",
			Self::Or => "or",
			Self::Not => "not",
			Self::Neg => "neg",
			Self::Slice => "slice",
			Self::Map => "map",
			Self::Call => "call",
			Self::Index => "index",
			Self::Assign => "assign",
			Self::MultiAssign => "massign",
			Self::Inc => "inc",
			Self::Dec => "dec",
			Self::AddAssign => "adda",
			Self::SubAssign => "suba",
			Self::MulAssign => "mula",
			Self::QuoAssign => "quoa",
			Self::ModAssign => "moda",
			Self::Clear => "clear",
			Self::Return => "return",
			Self::Break => "break",
			Self::Continue => "continue",
			Self::Include => "include",
			Self::Defer => "defer",
			Self::If => "if",
			Self::Switch => "switch",
			Self::ForBegin => "forbegin",
			Self::For => "for",
			Self::FnBegin => "fnbegin",
			Self::MemberFnBegin => "mfnbegin",
			Self::Function => "fn",
			Self::MemberFunction => "mfn",
			Self::Class => "class",
			Self::New => "new",
			Self::Recover => "recover",
			Self::Main => "main",
		}
	}
}


/// Emission directives: suspend emission into a deferred buffer, seal the buffer into a
/// block, and resume the enclosing stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
	Mute,
	Code,
	Unmute,
}


/// A terminal symbol of the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terminal {
	Identifier,
	Int,
	Float,
	String,
	Char,
	Keyword(Keyword),
	Operator(Operator),
	Colon,
	Comma,
	Semicolon,
	OpenParens,
	CloseParens,
	OpenBracket,
	CloseBracket,
	OpenBrace,
	CloseBrace,
	Eof,
}


impl Terminal {
	/// Check if the given token matches the terminal. Eof never matches a token.
	pub fn matches(self, token: &TokenKind) -> bool {
		use super::lexer::Literal;

		match (self, token) {
			(Self::Identifier, TokenKind::Identifier(_)) => true,
			(Self::Int, TokenKind::Literal(Literal::Int(_))) => true,
			(Self::Float, TokenKind::Literal(Literal::Float(_))) => true,
			(Self::String, TokenKind::Literal(Literal::String(_))) => true,
			(Self::Char, TokenKind::Literal(Literal::Char(_))) => true,
			(Self::Keyword(expected), TokenKind::Keyword(keyword)) => expected == *keyword,
			(Self::Operator(expected), TokenKind::Operator(op)) => expected == *op,
			(Self::Colon, TokenKind::Colon) => true,
			(Self::Comma, TokenKind::Comma) => true,
			(Self::Semicolon, TokenKind::Semicolon) => true,
			(Self::OpenParens, TokenKind::OpenParens) => true,
			(Self::CloseParens, TokenKind::CloseParens) => true,
			(Self::OpenBracket, TokenKind::OpenBracket) => true,
			(Self::CloseBracket, TokenKind::CloseBracket) => true,
			(Self::OpenBrace, TokenKind::OpenBrace) => true,
			(Self::CloseBrace, TokenKind::CloseBrace) => true,
			_ => false,
		}
	}


	/// A human readable description of the terminal.
	pub fn describe(self) -> &'static str {
		match self {
			Self::Identifier => "identifier",
			Self::Int => "integer",
			Self::Float => "float",
			Self::String => "string",
			Self::Char => "char",
			Self::Keyword(keyword) => keyword.as_str(),
			Self::Operator(op) => op.as_str(),
			Self::Colon => ":",
			Self::Comma => ",",
			Self::Semicolon => ";",
			Self::OpenParens => "(",
			Self::CloseParens => ")",
			Self::OpenBracket => "[",
			Self::CloseBracket => "]",
			Self::OpenBrace => "{",
			Self::CloseBrace => "}",
			Self::Eof => "end of file",
		}
	}
}


/// A grammar rule. Rules are interpreted by the parser engine as a PEG.
#[derive(Debug)]
pub enum Rule {
	/// Match a single token.
	Terminal(Terminal),
	/// Match another production.
	Ref(Production),
	/// Match all rules in order.
	Seq(Box<[Rule]>),
	/// Ordered choice: the first matching alternative wins.
	Alt(Box<[Rule]>),
	/// Zero or more repetitions (`*`).
	Repeat(Box<Rule>),
	/// Zero or one occurrence (`?`).
	Optional(Box<Rule>),
	/// A separated list (`%`, or `%=` when empty lists are allowed).
	List {
		item: Box<Rule>,
		separator: Box<Rule>,
		allow_empty: bool,
	},
	/// Negative lookahead (`~`). Never consumes input.
	Not(Box<Rule>),
	/// Commit point (`!`): failing after this point in a sequence is a syntax error.
	Cut,
	/// Trigger an action after the inner rule matches. The action receives the matched
	/// tokens.
	Action(Box<Rule>, Action),
	/// Push the match count of the inner rule (`/ARITY`). Repetitions and lists count
	/// their items, optional rules count zero or one.
	Arity(Box<Rule>),
	/// Zero-width emission directive.
	Directive(Directive),
	/// Tag the inner rule with the position of its first token.
	Line(Box<Rule>),
}


/// The grammar table: one rule per production.
#[derive(Debug)]
pub struct Grammar {
	rules: Box<[Rule]>,
}


impl Grammar {
	/// Get the rule for a production.
	pub fn rule(&self, production: Production) -> &Rule {
		&self.rules[production as usize]
	}


	/// The production matching a whole compilation unit.
	pub fn start(&self) -> Production {
		Production::Program
	}
}


/// Get the grammar table. The table is built on first use and shared afterwards.
pub fn grammar() -> &'static Grammar {
	static GRAMMAR: OnceLock<Grammar> = OnceLock::new();

	GRAMMAR.get_or_init(
		|| {
			let rules = Production::ALL
				.iter()
				.map(|&production| table::rule(production))
				.collect();

			Grammar { rules }
		}
	)
}


#[cfg(test)]
mod tests {
	use super::*;


	#[test]
	fn test_table_order() {
		for (ix, production) in Production::ALL.iter().enumerate() {
			assert_eq!(*production as usize, ix, "{}", production.name());
		}
	}


	#[test]
	fn test_grammar_is_shared() {
		assert!(std::ptr::eq(grammar(), grammar()));
		assert!(matches!(grammar().rule(Production::Program), Rule::Seq(_)));
	}


	#[test]
	fn test_terminal_matches() {
		assert!(Terminal::Operator(Operator::Assign).matches(&TokenKind::Operator(Operator::Assign)));
		assert!(!Terminal::Operator(Operator::Assign).matches(&TokenKind::Operator(Operator::Equals)));
		assert!(Terminal::Keyword(Keyword::Fn).matches(&TokenKind::Keyword(Keyword::Fn)));
		assert!(!Terminal::Eof.matches(&TokenKind::Semicolon));
	}
}
