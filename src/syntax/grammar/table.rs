//! The Quill grammar. Each production is written as the corresponding line of the grammar
//! text, in the comment above it.

use super::{
	super::lexer::{Keyword, Operator},
	Action,
	Directive,
	Production,
	Rule,
	Terminal,
};


/// Build the rule for the given production.
pub fn rule(production: Production) -> Rule {
	match production {
		// program = ?doc EOF
		Production::Program => seq([opt(r(Production::Doc)), t(Terminal::Eof)]),

		// doc = s *(';'/clear s | ';'/pushn)
		Production::Doc => seq([
			r(Production::Statement),
			many(alt([
				seq([act(t(Terminal::Semicolon), Action::Clear), r(Production::Statement)]),
				act(t(Terminal::Semicolon), Action::PushNil),
			])),
		]),

		Production::Statement => statement(),

		// expr = term4 *("||"/_mute term4/_code/_unmute/or)
		Production::Expr => short_circuit(Production::Term4, Operator::Or, Action::Or),

		// term1 = factor *('*' factor/mul | '/' factor/quo | '%' factor/mod)
		Production::Term1 => binary(
			Production::Factor,
			[
				(Operator::Times, Action::Mul),
				(Operator::Div, Action::Quo),
				(Operator::Mod, Action::Mod),
			],
		),

		// term2 = term1 *('+' term1/add | '-' term1/sub)
		Production::Term2 => binary(
			Production::Term1,
			[
				(Operator::Plus, Action::Add),
				(Operator::Minus, Action::Sub),
			],
		),

		// term3 = term2 *('<' term2/lt | '>' term2/gt | "==" term2/eq | "<=" term2/le |
		//                 ">=" term2/ge | "!=" term2/ne)
		Production::Term3 => binary(
			Production::Term2,
			[
				(Operator::Lower, Action::Lt),
				(Operator::Greater, Action::Gt),
				(Operator::Equals, Action::Eq),
				(Operator::LowerEquals, Action::Le),
				(Operator::GreaterEquals, Action::Ge),
				(Operator::NotEquals, Action::Ne),
			],
		),

		// term4 = term3 *("&&"/_mute term3/_code/_unmute/and)
		Production::Term4 => short_circuit(Production::Term3, Operator::And, Action::And),

		Production::Factor => factor(),

		Production::Atom => atom(),

		// ifbody = '{' ?doc/_code '}'
		Production::IfBody => seq([
			t(Terminal::OpenBrace),
			opt(r(Production::Doc)),
			directive(Directive::Code),
			t(Terminal::CloseBrace),
		]),

		// swbody = *("case"! expr/_code ':' ?doc/_code)/_ARITY
		//          ?("default"! ':' ?doc/_code)/_ARITY
		Production::SwitchBody => seq([
			arity(many(seq([
				kw(Keyword::Case),
				Rule::Cut,
				r(Production::Expr),
				directive(Directive::Code),
				t(Terminal::Colon),
				opt(r(Production::Doc)),
				directive(Directive::Code),
			]))),
			arity(opt(seq([
				kw(Keyword::Default),
				Rule::Cut,
				t(Terminal::Colon),
				opt(r(Production::Doc)),
				directive(Directive::Code),
			]))),
		]),

		// fnbody = '(' IDENT/name %= ','/ARITY ?"..."/ARITY ')'/fnbegin
		//          '{'/_mute ?doc/_code '}'/_unmute
		Production::FnBody => function_body(Action::FnBegin),

		// mfnbody = '(' IDENT/name %= ','/ARITY ?"..."/ARITY ')'/mfnbegin
		//           '{'/_mute ?doc/_code '}'/_unmute
		Production::MemberFnBody => function_body(Action::MemberFnBegin),

		// clsname = '(' IDENT/ref ')' | IDENT/ref
		Production::ClassName => alt([
			seq([
				t(Terminal::OpenParens),
				act(t(Terminal::Identifier), Action::Ref),
				t(Terminal::CloseParens),
			]),
			act(t(Terminal::Identifier), Action::Ref),
		]),

		// newargs = ?('(' expr %= ','/ARITY ')')/ARITY
		Production::NewArgs => arity(opt(seq([
			t(Terminal::OpenParens),
			arity(list0(r(Production::Expr), t(Terminal::Comma))),
			t(Terminal::CloseParens),
		]))),

		// classb = "fn"! IDENT/name mfnbody ?';'/mfn
		Production::ClassMember => seq([
			kw(Keyword::Fn),
			Rule::Cut,
			act(t(Terminal::Identifier), Action::Name),
			r(Production::MemberFnBody),
			act(opt(t(Terminal::Semicolon)), Action::MemberFunction),
		]),
	}
}


/// s = LINE (
/// 	(IDENT '='! expr)/assign |
/// 	(IDENT ',')/name ! IDENT/name % ','/ARITY '=' expr %= ','/ARITY /massign |
/// 	(IDENT "++")/inc | (IDENT "--")/dec |
/// 	(IDENT "+="! expr)/adda | (IDENT "-="! expr)/suba | (IDENT "*="! expr)/mula |
/// 	(IDENT "/="! expr)/quoa | (IDENT "%="! expr)/moda |
/// 	"return"! expr %= ','/ARITY /return |
/// 	"break"/break | "continue"/continue |
/// 	"include"! STRING/include |
/// 	"defer"/_mute! expr/_code/_unmute/defer |
/// 	expr)
fn statement() -> Rule {
	let compound = |operator, action| act(
		seq([
			t(Terminal::Identifier),
			op(operator),
			Rule::Cut,
			r(Production::Expr),
		]),
		action,
	);

	line(alt([
		compound(Operator::Assign, Action::Assign),

		act(
			seq([
				act(seq([t(Terminal::Identifier), t(Terminal::Comma)]), Action::Name),
				Rule::Cut,
				arity(list(act(t(Terminal::Identifier), Action::Name), t(Terminal::Comma))),
				op(Operator::Assign),
				arity(list0(r(Production::Expr), t(Terminal::Comma))),
			]),
			Action::MultiAssign,
		),

		act(seq([t(Terminal::Identifier), op(Operator::Increment)]), Action::Inc),
		act(seq([t(Terminal::Identifier), op(Operator::Decrement)]), Action::Dec),

		compound(Operator::PlusAssign, Action::AddAssign),
		compound(Operator::MinusAssign, Action::SubAssign),
		compound(Operator::TimesAssign, Action::MulAssign),
		compound(Operator::DivAssign, Action::QuoAssign),
		compound(Operator::ModAssign, Action::ModAssign),

		act(
			seq([
				kw(Keyword::Return),
				Rule::Cut,
				arity(list0(r(Production::Expr), t(Terminal::Comma))),
			]),
			Action::Return,
		),

		act(kw(Keyword::Break), Action::Break),
		act(kw(Keyword::Continue), Action::Continue),

		seq([
			kw(Keyword::Include),
			Rule::Cut,
			act(t(Terminal::String), Action::Include),
		]),

		act(
			seq([
				kw(Keyword::Defer),
				directive(Directive::Mute),
				Rule::Cut,
				r(Production::Expr),
				directive(Directive::Code),
				directive(Directive::Unmute),
			]),
			Action::Defer,
		),

		r(Production::Expr),
	]))
}


/// factor =
/// 	INT/pushi | FLOAT/pushf | STRING/pushs | CHAR/pushc |
/// 	(IDENT/ref | '('! expr ')' | "fn"! fnbody/fn | '[' expr %= ','/ARITY ?',' ']'/slice) *atom |
/// 	"if"/_mute! expr/_code ifbody *("elif" expr/_code ifbody)/_ARITY ?("else" ifbody)/_ARITY/_unmute/if |
/// 	"switch"/_mute! ?(~'{' expr)/_code '{' swbody '}'/_unmute/switch |
/// 	"for"/forbegin/_mute! (~'{' s)/_code %= ';'/_ARITY '{' ?doc/_code '}'/_unmute/for |
/// 	"new"! clsname newargs/new |
/// 	"class"! '{' *classb/ARITY '}'/class |
/// 	"recover" '(' ')'/recover |
/// 	"main" '{'/_mute ?doc/_code '}'/_unmute/main |
/// 	'{'! (expr ':' expr) %= ','/ARITY ?',' '}'/map |
/// 	'!' factor/not | '-' factor/neg | '+' factor
fn factor() -> Rule {
	let operand = alt([
		act(t(Terminal::Identifier), Action::Ref),

		seq([
			t(Terminal::OpenParens),
			Rule::Cut,
			r(Production::Expr),
			t(Terminal::CloseParens),
		]),

		seq([
			kw(Keyword::Fn),
			Rule::Cut,
			act(r(Production::FnBody), Action::Function),
		]),

		act(
			seq([
				t(Terminal::OpenBracket),
				arity(list0(r(Production::Expr), t(Terminal::Comma))),
				opt(t(Terminal::Comma)),
				t(Terminal::CloseBracket),
			]),
			Action::Slice,
		),
	]);

	let if_expr = act(
		seq([
			kw(Keyword::If),
			directive(Directive::Mute),
			Rule::Cut,
			r(Production::Expr),
			directive(Directive::Code),
			r(Production::IfBody),
			arity(many(seq([
				kw(Keyword::Elif),
				r(Production::Expr),
				directive(Directive::Code),
				r(Production::IfBody),
			]))),
			arity(opt(seq([kw(Keyword::Else), r(Production::IfBody)]))),
			directive(Directive::Unmute),
		]),
		Action::If,
	);

	let switch_expr = act(
		seq([
			kw(Keyword::Switch),
			directive(Directive::Mute),
			Rule::Cut,
			opt(seq([not(t(Terminal::OpenBrace)), r(Production::Expr)])),
			directive(Directive::Code),
			t(Terminal::OpenBrace),
			r(Production::SwitchBody),
			t(Terminal::CloseBrace),
			directive(Directive::Unmute),
		]),
		Action::Switch,
	);

	let for_expr = act(
		seq([
			act(kw(Keyword::For), Action::ForBegin),
			directive(Directive::Mute),
			Rule::Cut,
			arity(list0(
				seq([
					not(t(Terminal::OpenBrace)),
					r(Production::Statement),
					directive(Directive::Code),
				]),
				t(Terminal::Semicolon),
			)),
			t(Terminal::OpenBrace),
			opt(r(Production::Doc)),
			directive(Directive::Code),
			t(Terminal::CloseBrace),
			directive(Directive::Unmute),
		]),
		Action::For,
	);

	let new_expr = seq([
		kw(Keyword::New),
		Rule::Cut,
		act(seq([r(Production::ClassName), r(Production::NewArgs)]), Action::New),
	]);

	let class_expr = act(
		seq([
			kw(Keyword::Class),
			Rule::Cut,
			t(Terminal::OpenBrace),
			arity(many(r(Production::ClassMember))),
			t(Terminal::CloseBrace),
		]),
		Action::Class,
	);

	let recover_expr = act(
		seq([
			kw(Keyword::Recover),
			t(Terminal::OpenParens),
			t(Terminal::CloseParens),
		]),
		Action::Recover,
	);

	let main_expr = act(
		seq([
			kw(Keyword::Main),
			t(Terminal::OpenBrace),
			directive(Directive::Mute),
			opt(r(Production::Doc)),
			directive(Directive::Code),
			t(Terminal::CloseBrace),
			directive(Directive::Unmute),
		]),
		Action::Main,
	);

	let map_expr = act(
		seq([
			t(Terminal::OpenBrace),
			Rule::Cut,
			arity(list0(
				seq([r(Production::Expr), t(Terminal::Colon), r(Production::Expr)]),
				t(Terminal::Comma),
			)),
			opt(t(Terminal::Comma)),
			t(Terminal::CloseBrace),
		]),
		Action::Map,
	);

	alt([
		act(t(Terminal::Int), Action::PushInt),
		act(t(Terminal::Float), Action::PushFloat),
		act(t(Terminal::String), Action::PushString),
		act(t(Terminal::Char), Action::PushChar),
		seq([operand, many(r(Production::Atom))]),
		if_expr,
		switch_expr,
		for_expr,
		new_expr,
		class_expr,
		recover_expr,
		main_expr,
		map_expr,
		act(seq([op(Operator::Not), r(Production::Factor)]), Action::Not),
		act(seq([op(Operator::Minus), r(Production::Factor)]), Action::Neg),
		seq([op(Operator::Plus), r(Production::Factor)]),
	])
}


/// atom =
/// 	'(' expr %= ','/ARITY ?"..."/ARITY ?',' ')'/call |
/// 	'.' (IDENT|"class"|"new"|"recover"|"main")/mref |
/// 	'[' ?expr/ARITY ?':'/ARITY ?expr/ARITY ']'/index
fn atom() -> Rule {
	alt([
		act(
			seq([
				t(Terminal::OpenParens),
				arity(list0(r(Production::Expr), t(Terminal::Comma))),
				arity(opt(op(Operator::Ellipsis))),
				opt(t(Terminal::Comma)),
				t(Terminal::CloseParens),
			]),
			Action::Call,
		),

		seq([
			op(Operator::Dot),
			act(
				alt([
					t(Terminal::Identifier),
					kw(Keyword::Class),
					kw(Keyword::New),
					kw(Keyword::Recover),
					kw(Keyword::Main),
				]),
				Action::MemberRef,
			),
		]),

		act(
			seq([
				t(Terminal::OpenBracket),
				arity(opt(r(Production::Expr))),
				arity(opt(t(Terminal::Colon))),
				arity(opt(r(Production::Expr))),
				t(Terminal::CloseBracket),
			]),
			Action::Index,
		),
	])
}


/// A left-associative chain of binary operators over the given operand.
fn binary<const N: usize>(operand: Production, operators: [(Operator, Action); N]) -> Rule {
	let alternatives = operators.map(
		|(operator, action)| seq([op(operator), act(r(operand), action)])
	);

	seq([r(operand), many(alt(alternatives))])
}


/// A chain of short-circuiting operators. The right operand is compiled into a separate
/// block.
fn short_circuit(operand: Production, operator: Operator, action: Action) -> Rule {
	seq([
		r(operand),
		many(act(
			seq([
				op(operator),
				directive(Directive::Mute),
				r(operand),
				directive(Directive::Code),
				directive(Directive::Unmute),
			]),
			action,
		)),
	])
}


fn function_body(begin: Action) -> Rule {
	seq([
		t(Terminal::OpenParens),
		arity(list0(act(t(Terminal::Identifier), Action::Name), t(Terminal::Comma))),
		arity(opt(op(Operator::Ellipsis))),
		act(t(Terminal::CloseParens), begin),
		t(Terminal::OpenBrace),
		directive(Directive::Mute),
		opt(r(Production::Doc)),
		directive(Directive::Code),
		t(Terminal::CloseBrace),
		directive(Directive::Unmute),
	])
}


fn t(terminal: Terminal) -> Rule {
	Rule::Terminal(terminal)
}


fn kw(keyword: Keyword) -> Rule {
	Rule::Terminal(Terminal::Keyword(keyword))
}


fn op(operator: Operator) -> Rule {
	Rule::Terminal(Terminal::Operator(operator))
}


fn r(production: Production) -> Rule {
	Rule::Ref(production)
}


fn seq<const N: usize>(rules: [Rule; N]) -> Rule {
	Rule::Seq(Box::new(rules))
}


fn alt<const N: usize>(rules: [Rule; N]) -> Rule {
	Rule::Alt(Box::new(rules))
}


fn many(rule: Rule) -> Rule {
	Rule::Repeat(Box::new(rule))
}


fn opt(rule: Rule) -> Rule {
	Rule::Optional(Box::new(rule))
}


fn list(item: Rule, separator: Rule) -> Rule {
	Rule::List {
		item: Box::new(item),
		separator: Box::new(separator),
		allow_empty: false,
	}
}


fn list0(item: Rule, separator: Rule) -> Rule {
	Rule::List {
		item: Box::new(item),
		separator: Box::new(separator),
		allow_empty: true,
	}
}


fn not(rule: Rule) -> Rule {
	Rule::Not(Box::new(rule))
}


fn act(rule: Rule, action: Action) -> Rule {
	Rule::Action(Box::new(rule), action)
}


fn arity(rule: Rule) -> Rule {
	Rule::Arity(Box::new(rule))
}


fn directive(directive: Directive) -> Rule {
	Rule::Directive(directive)
}


fn line(rule: Rule) -> Rule {
	Rule::Line(Box::new(rule))
}
