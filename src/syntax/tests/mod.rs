use std::{io, path::Path};

use crate::{fmt, symbol, tests};
use super::{
	grammar::{Action, Directive},
	lexer::Token,
	Analysis,
	Error,
	Interpreter,
	Source,
	SourcePos,
};


/// An interpreter that checks the shape of the event stream: every suspension is
/// resumed, and statements are reported in source order.
#[derive(Debug, Default)]
struct Balance {
	muted: usize,
	actions: usize,
	last_line: u32,
}


impl Interpreter for Balance {
	type Error = String;

	fn action(&mut self, _: Action, _: &[Token]) -> Result<(), String> {
		self.actions += 1;
		Ok(())
	}


	fn arity(&mut self, _: usize) -> Result<(), String> {
		Ok(())
	}


	fn directive(&mut self, directive: Directive) -> Result<(), String> {
		match directive {
			Directive::Mute => self.muted += 1,
			Directive::Code if self.muted == 0 => return Err("capture outside suspension".into()),
			Directive::Code => (),
			Directive::Unmute => {
				self.muted = self.muted
					.checked_sub(1)
					.ok_or_else(|| "resume without suspension".to_owned())?;
			}
		}

		Ok(())
	}


	fn line(&mut self, pos: SourcePos) -> Result<(), String> {
		if pos.line < self.last_line {
			return Err(format!("statement at line {} after line {}", pos.line, self.last_line));
		}

		self.last_line = pos.line;
		Ok(())
	}
}


fn test_dir<P, F>(path: P, mut check: F) -> io::Result<()>
where
	P: AsRef<Path>,
	F: FnMut(&Result<Analysis, Error>) -> bool,
{
	let mut interner = symbol::Interner::new();

	tests::util::test_dir(
		path,
		move |path, file| {
			let source = Source::from_reader(path, file)?;
			let analysis = Analysis::analyze(&source, &mut interner);

			if !check(&analysis) {
				match analysis {
					Ok(analysis) => panic!("{}: unexpected success: {:?}", path.display(), analysis.parse),
					Err(error) => panic!("{}: {}", path.display(), fmt::Show(&error, &interner)),
				}
			}

			if let Ok(analysis) = analysis {
				let mut balance = Balance::default();

				if let Err(error) = analysis.replay(&mut balance) {
					panic!("{}: {}", path.display(), error);
				}

				assert_eq!(balance.muted, 0, "{}: unbalanced suspension", path.display());
				assert!(balance.actions > 0, "{}: no actions", path.display());
			}

			Ok(())
		}
	)
}


#[test]
fn test_positive() -> io::Result<()> {
	test_dir(
		"src/syntax/tests/data/positive",
		|analysis| analysis.is_ok(),
	)
}


#[test]
fn test_negative() -> io::Result<()> {
	test_dir(
		"src/syntax/tests/data/negative",
		|analysis| analysis.is_err(),
	)
}
