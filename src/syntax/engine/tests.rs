use assert_matches::assert_matches;

use super::*;
use crate::{
	symbol,
	syntax::lexer::{Cursor, Lexer, TokenKind},
};


fn tokenize(input: &str, interner: &mut symbol::Interner) -> Vec<Token> {
	let cursor = Cursor::from(input.as_bytes());

	Lexer::new(cursor, interner)
		.collect::<Result<_, _>>()
		.expect("lexical error")
}


/// Records the replayed events in a compact textual form.
#[derive(Debug, Default)]
struct Recorder {
	log: Vec<String>,
}


impl Interpreter for Recorder {
	type Error = std::convert::Infallible;

	fn action(&mut self, action: Action, tokens: &[Token]) -> Result<(), Self::Error> {
		self.log.push(format!("{}/{}", action.name(), tokens.len()));
		Ok(())
	}

	fn arity(&mut self, arity: usize) -> Result<(), Self::Error> {
		self.log.push(format!("#{}", arity));
		Ok(())
	}

	fn directive(&mut self, directive: Directive) -> Result<(), Self::Error> {
		self.log.push(format!("{:?}", directive).to_lowercase());
		Ok(())
	}

	fn line(&mut self, pos: SourcePos) -> Result<(), Self::Error> {
		self.log.push(format!("line {}", pos.line));
		Ok(())
	}
}


fn replay(input: &str) -> Vec<String> {
	let mut interner = symbol::Interner::new();
	let tokens = tokenize(input, &mut interner);

	let parse = Parse::new(&tokens).expect("syntax error");

	let mut recorder = Recorder::default();
	parse
		.replay(&tokens, &mut recorder)
		.expect("infallible");

	recorder.log
}


fn parse_error(input: &str) -> Error {
	let mut interner = symbol::Interner::new();
	let tokens = tokenize(input, &mut interner);

	Parse::new(&tokens).expect_err("expected a syntax error")
}


#[test]
fn test_assignment() {
	assert_eq!(
		replay("a = 1 + 2"),
		["line 1", "pushi/1", "pushi/1", "add/1", "assign/5"],
	);
}


#[test]
fn test_precedence() {
	assert_eq!(
		replay("x = 1 + 2 * 3 == 7"),
		["line 1", "pushi/1", "pushi/1", "pushi/1", "mul/1", "add/3", "pushi/1", "eq/1", "assign/9"],
	);
}


#[test]
fn test_failed_alternatives_leave_no_events() {
	// The assignment alternatives are tried before the expression, and the call is tried
	// after the reference.
	assert_eq!(
		replay("f(1, 2)"),
		["line 1", "ref/1", "pushi/1", "pushi/1", "#2", "#0", "call/5"],
	);
}


#[test]
fn test_multi_assignment() {
	assert_eq!(
		replay("a, b = 1, 2"),
		["line 1", "name/2", "name/1", "#1", "pushi/1", "pushi/1", "#2", "massign/7"],
	);
}


#[test]
fn test_statements() {
	assert_eq!(
		replay("a = 1\nb\n"),
		["line 1", "pushi/1", "assign/3", "clear/1", "line 2", "ref/1", "pushn/1"],
	);
}


#[test]
fn test_if_directives() {
	assert_eq!(
		replay("if x { y } else { z }"),
		[
			"line 1",
			"mute", "ref/1", "code",
			"line 1", "ref/1", "code",
			"#0",
			"line 1", "ref/1", "code",
			"#1",
			"unmute", "if/9",
		],
	);
}


#[test]
fn test_short_circuit() {
	assert_eq!(
		replay("a && b || c"),
		["line 1", "ref/1", "mute", "ref/1", "code", "unmute", "and/2", "mute", "ref/1", "code", "unmute", "or/2"],
	);
}


#[test]
fn test_function() {
	assert_eq!(
		replay("f = fn(a, b...) { return a }"),
		[
			"line 1",
			"name/1", "name/1", "#2", "#1", "fnbegin/1",
			"mute", "line 1", "ref/1", "#1", "return/2", "code", "unmute",
			"fn/10",
			"assign/13",
		],
	);
}


#[test]
fn test_for_header() {
	assert_eq!(
		replay("for i = 0; i < 3; i++ { }"),
		[
			"line 1",
			"forbegin/1", "mute",
			"line 1", "pushi/1", "assign/3", "code",
			"line 1", "ref/1", "pushi/1", "lt/1", "code",
			"line 1", "inc/2", "code",
			"#3",
			"code", "unmute",
			"for/13",
		],
	);
}


#[test]
fn test_index() {
	assert_eq!(
		replay("a[1:]"),
		["line 1", "ref/1", "pushi/1", "#1", "#1", "#0", "index/4"],
	);
}


#[test]
fn test_trailing_separator() {
	assert_eq!(
		replay("[1, 2,]"),
		["line 1", "pushi/1", "pushi/1", "#2", "slice/6"],
	);
}


#[test]
fn test_empty_program() {
	assert!(replay("").is_empty());
	assert!(replay("// nothing here\n").is_empty());
}


#[test]
fn test_committed_failure() {
	assert_matches!(
		parse_error("a = "),
		Error::UnexpectedEof { expected } => {
			assert!(expected.contains(&Terminal::Identifier));
			assert!(expected.contains(&Terminal::Int));
		}
	);
}


#[test]
fn test_incomplete_match() {
	assert_matches!(
		parse_error("a b"),
		Error::Unexpected { token: Token { kind: TokenKind::Identifier(_), .. }, expected } => {
			assert!(expected.contains(&Terminal::Semicolon));
			assert!(expected.contains(&Terminal::Eof));
		}
	);
}


#[test]
fn test_too_deep() {
	let input = format!("x = {}1{}", "(".repeat(200), ")".repeat(200));

	assert_matches!(parse_error(&input), Error::TooDeep { .. });
}
