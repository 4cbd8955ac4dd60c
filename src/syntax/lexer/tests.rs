use super::*;

use assert_matches::assert_matches;


macro_rules! token {
	($kind:pat) => {
		Ok(Token { kind: $kind, .. })
	};
}

macro_rules! error {
	($error:pat) => {
		Err(Error { error: $error, .. })
	};
}

macro_rules! assert_symbol {
	($interner:ident, $symbol:ident, $expected:literal) => {
		assert_eq!($interner.resolve(*$symbol), Some($expected))
	};
}


fn lex(input: &str, interner: &mut symbol::Interner) -> Vec<Result<Token, Error>> {
	let cursor = Cursor::from(input.as_bytes());
	Lexer::new(cursor, interner).collect()
}


#[test]
fn test_simple_function() {
	let input = r#"
		fn foo(bar, baz) {
			if bar || baz == nil { // here's a comment
				result = do_something()
				return result
			}
		}
	"#;

	let mut interner = symbol::Interner::new();
	let tokens = lex(input, &mut interner);

	assert_matches!(
		&tokens[..],
		[
			token!(TokenKind::Keyword(Keyword::Fn)),
			token!(TokenKind::Identifier(foo)),
			token!(TokenKind::OpenParens),
			token!(TokenKind::Identifier(bar1)),
			token!(TokenKind::Comma),
			token!(TokenKind::Identifier(baz1)),
			token!(TokenKind::CloseParens),
			token!(TokenKind::OpenBrace),
			token!(TokenKind::Keyword(Keyword::If)),
			token!(TokenKind::Identifier(bar2)),
			token!(TokenKind::Operator(Operator::Or)),
			token!(TokenKind::Identifier(baz2)),
			token!(TokenKind::Operator(Operator::Equals)),
			token!(TokenKind::Identifier(nil)),
			token!(TokenKind::OpenBrace),
			token!(TokenKind::Identifier(result1)),
			token!(TokenKind::Operator(Operator::Assign)),
			token!(TokenKind::Identifier(do_something)),
			token!(TokenKind::OpenParens),
			token!(TokenKind::CloseParens),
			token!(TokenKind::Semicolon),
			token!(TokenKind::Keyword(Keyword::Return)),
			token!(TokenKind::Identifier(result2)),
			token!(TokenKind::Semicolon),
			token!(TokenKind::CloseBrace),
			token!(TokenKind::Semicolon),
			token!(TokenKind::CloseBrace),
			token!(TokenKind::Semicolon),
		]
			=> {
				assert_symbol!(interner, foo, "foo");
				assert_symbol!(interner, bar1, "bar");
				assert_symbol!(interner, bar2, "bar");
				assert_symbol!(interner, baz1, "baz");
				assert_symbol!(interner, baz2, "baz");
				assert_symbol!(interner, nil, "nil");
				assert_symbol!(interner, result1, "result");
				assert_symbol!(interner, result2, "result");
				assert_symbol!(interner, do_something, "do_something");
			}
	);
}


#[test]
fn test_semicolon_insertion() {
	let input = "\n\na = 1\nb++\n\nf(a,\n b)\nreturn\nx = [\n1,\n]\n";

	let mut interner = symbol::Interner::new();
	let tokens = lex(input, &mut interner);

	assert_matches!(
		&tokens[..],
		[
			token!(TokenKind::Identifier(_)),
			token!(TokenKind::Operator(Operator::Assign)),
			token!(TokenKind::Literal(Literal::Int(1))),
			token!(TokenKind::Semicolon),
			token!(TokenKind::Identifier(_)),
			token!(TokenKind::Operator(Operator::Increment)),
			token!(TokenKind::Semicolon),
			token!(TokenKind::Identifier(_)),
			token!(TokenKind::OpenParens),
			token!(TokenKind::Identifier(_)),
			token!(TokenKind::Comma),
			token!(TokenKind::Identifier(_)),
			token!(TokenKind::CloseParens),
			token!(TokenKind::Semicolon),
			token!(TokenKind::Keyword(Keyword::Return)),
			token!(TokenKind::Semicolon),
			token!(TokenKind::Identifier(_)),
			token!(TokenKind::Operator(Operator::Assign)),
			token!(TokenKind::OpenBracket),
			token!(TokenKind::Literal(Literal::Int(1))),
			token!(TokenKind::Comma),
			token!(TokenKind::CloseBracket),
			token!(TokenKind::Semicolon),
		]
	);
}


#[test]
fn test_no_semicolon_at_eof() {
	let mut interner = symbol::Interner::new();
	let tokens = lex("x", &mut interner);

	assert_matches!(&tokens[..], [token!(TokenKind::Identifier(_))]);
}


#[test]
fn test_comments() {
	let input = "a /* block\ncomment */ + b // line\n/* unterminated";

	let mut interner = symbol::Interner::new();
	let tokens = lex(input, &mut interner);

	assert_matches!(
		&tokens[..],
		[
			token!(TokenKind::Identifier(_)),
			token!(TokenKind::Operator(Operator::Plus)),
			token!(TokenKind::Identifier(_)),
			token!(TokenKind::Semicolon),
			error!(ErrorKind::UnexpectedEof),
		]
	);
}


#[test]
fn test_operators() {
	let input = "+ += ++ - -= -- * *= / /= % %= == = != ! < <= > >= && || . ...";

	let mut interner = symbol::Interner::new();
	let tokens = lex(input, &mut interner);

	let operators: Vec<Operator> = tokens
		.into_iter()
		.map(
			|token| match token {
				Ok(Token { kind: TokenKind::Operator(op), .. }) => op,
				other => panic!("unexpected token: {:?}", other),
			}
		)
		.collect();

	assert_eq!(
		operators,
		[
			Operator::Plus,
			Operator::PlusAssign,
			Operator::Increment,
			Operator::Minus,
			Operator::MinusAssign,
			Operator::Decrement,
			Operator::Times,
			Operator::TimesAssign,
			Operator::Div,
			Operator::DivAssign,
			Operator::Mod,
			Operator::ModAssign,
			Operator::Equals,
			Operator::Assign,
			Operator::NotEquals,
			Operator::Not,
			Operator::Lower,
			Operator::LowerEquals,
			Operator::Greater,
			Operator::GreaterEquals,
			Operator::And,
			Operator::Or,
			Operator::Dot,
			Operator::Ellipsis,
		]
	);
}


#[test]
fn test_invalid_tokens() {
	let input = "a & b | c .. d $ e";

	let mut interner = symbol::Interner::new();
	let tokens = lex(input, &mut interner);

	assert_matches!(
		&tokens[..],
		[
			token!(TokenKind::Identifier(_)),
			error!(ErrorKind::Unexpected(b'&')),
			token!(TokenKind::Identifier(_)),
			error!(ErrorKind::Unexpected(b'|')),
			token!(TokenKind::Identifier(_)),
			error!(ErrorKind::Unexpected(b' ')),
			token!(TokenKind::Identifier(_)),
			error!(ErrorKind::Unexpected(b'$')),
			token!(TokenKind::Identifier(_)),
		]
	);
}


#[test]
fn test_char_literals() {
	let input = r#"
		var = 'a'
		var = '\n'
		var = '\?'   // invalid escape sequence
		var = '\na'  // invalid literal with escape sequence
		var = '\''
		var = ''
	"#;

	let mut interner = symbol::Interner::new();
	let tokens = lex(input, &mut interner);

	assert_matches!(
		&tokens[..],
		[
			token!(TokenKind::Identifier(var)),
			token!(TokenKind::Operator(Operator::Assign)),
			token!(TokenKind::Literal(Literal::Char(b'a'))),
			token!(TokenKind::Semicolon),

			token!(TokenKind::Identifier(_)),
			token!(TokenKind::Operator(Operator::Assign)),
			token!(TokenKind::Literal(Literal::Char(b'\n'))),
			token!(TokenKind::Semicolon),

			token!(TokenKind::Identifier(_)),
			token!(TokenKind::Operator(Operator::Assign)),
			error!(ErrorKind::InvalidEscapeSequence(escape)),
			token!(TokenKind::Literal(Literal::Char(_))),
			token!(TokenKind::Semicolon),

			token!(TokenKind::Identifier(_)),
			token!(TokenKind::Operator(Operator::Assign)),
			error!(ErrorKind::Unexpected(b'a')),
			token!(TokenKind::Literal(Literal::Char(b'\n'))),
			token!(TokenKind::Semicolon),

			token!(TokenKind::Identifier(_)),
			token!(TokenKind::Operator(Operator::Assign)),
			token!(TokenKind::Literal(Literal::Char(b'\''))),
			token!(TokenKind::Semicolon),

			token!(TokenKind::Identifier(_)),
			token!(TokenKind::Operator(Operator::Assign)),
			error!(ErrorKind::EmptyCharLiteral),
		]
			=> {
				assert_symbol!(interner, var, "var");
				assert_eq!(interner.len(), 1);
				assert_eq!(escape.as_ref(), b"\\?");
			}
	);
}


#[test]
fn test_string_literals() {
	let input = r#"var = "hello world" + "escape \n sequences \" are \0 cool" + """#;

	let mut interner = symbol::Interner::new();
	let tokens = lex(input, &mut interner);

	assert_matches!(
		&tokens[..],
		[
			token!(TokenKind::Identifier(var)),
			token!(TokenKind::Operator(Operator::Assign)),
			token!(TokenKind::Literal(Literal::String(lit1))),
			token!(TokenKind::Operator(Operator::Plus)),
			token!(TokenKind::Literal(Literal::String(lit2))),
			token!(TokenKind::Operator(Operator::Plus)),
			token!(TokenKind::Literal(Literal::String(lit3))),
		]
			=> {
				assert_symbol!(interner, var, "var");
				assert_eq!(lit1.as_ref(), "hello world");
				assert_eq!(lit2.as_ref(), "escape \n sequences \" are \0 cool");
				assert!(lit3.is_empty());
			}
	);
}


#[test]
fn test_number_literals() {
	let input = "var = 123 + 456.7 + 89e10 + 1.2e3 + 99999999999999999999";

	let mut interner = symbol::Interner::new();
	let tokens = lex(input, &mut interner);

	assert_matches!(
		&tokens[..],
		[
			token!(TokenKind::Identifier(_)),
			token!(TokenKind::Operator(Operator::Assign)),
			token!(TokenKind::Literal(Literal::Int(i1))),
			token!(TokenKind::Operator(Operator::Plus)),
			token!(TokenKind::Literal(Literal::Float(f1))),
			token!(TokenKind::Operator(Operator::Plus)),
			token!(TokenKind::Literal(Literal::Float(f2))),
			token!(TokenKind::Operator(Operator::Plus)),
			token!(TokenKind::Literal(Literal::Float(f3))),
			token!(TokenKind::Operator(Operator::Plus)),
			error!(ErrorKind::InvalidNumber(_)),
		]
			=> {
				assert_eq!(*i1, 123);
				assert_eq!(*f1, 456.7);
				assert_eq!(*f2, 89e10);
				assert_eq!(*f3, 1.2e3);
			}
	);
}


#[test]
fn test_hex_and_exponents() {
	let input = "0x1F 0XfF 0 1e-3 2.5E+2 0x 1.e5";

	let mut interner = symbol::Interner::new();
	let tokens = lex(input, &mut interner);

	assert_matches!(
		&tokens[..],
		[
			token!(TokenKind::Literal(Literal::Int(31))),
			token!(TokenKind::Literal(Literal::Int(255))),
			token!(TokenKind::Literal(Literal::Int(0))),
			token!(TokenKind::Literal(Literal::Float(f1))),
			token!(TokenKind::Literal(Literal::Float(f2))),
			error!(ErrorKind::Unexpected(b' ')),
			error!(ErrorKind::Unexpected(b'e')),
			token!(TokenKind::Literal(Literal::Int(5))),
		]
			=> {
				assert_eq!(*f1, 1e-3);
				assert_eq!(*f2, 250.0);
			}
	);
}


#[test]
fn test_keywords() {
	let input = "if elif else switch case default for break continue fn return defer recover \
	             class new main include";

	let mut interner = symbol::Interner::new();
	let tokens = lex(input, &mut interner);

	assert_eq!(tokens.len(), 17);
	assert!(
		tokens
			.iter()
			.all(|token| matches!(token, token!(TokenKind::Keyword(_))))
	);
	assert_eq!(interner.len(), 0);
}
