use std::{ffi::OsString, path::PathBuf};

use clap::{clap_app, crate_authors, crate_version, crate_description};


#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
	Help(Box<str>),
	Version(Box<str>),
	Run(Args)
}


#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Args {
	/// The script to run. Read from stdin if absent.
	pub script: Option<PathBuf>,
	/// Compile the script, but don't run.
	pub check: bool,
	/// Print the compiled code.
	pub print_code: bool,
	/// Log the compilation and execution to stderr.
	pub verbose: bool,
}


pub fn parse<A, T>(args: A) -> clap::Result<Command>
where
	A: IntoIterator<Item = T>,
	T: Into<OsString> + Clone
{
	let app = clap_app!(
		Quill =>
			(version: crate_version!())
			(author: crate_authors!())
			(about: crate_description!())
			(@arg check: --check "Compile the script without running it.")
			(@arg code: --code "Print the compiled code.")
			(@arg verbose: -v --verbose "Log the compilation and execution.")
			(@arg script: "The script to run. Read from stdin if omitted.")
	);

	match app.get_matches_from_safe(args) {
		Ok(matches) => Ok(
			Command::Run(
				Args {
					script: matches.value_of_os("script").map(PathBuf::from),
					check: matches.is_present("check"),
					print_code: matches.is_present("code"),
					verbose: matches.is_present("verbose"),
				}
			)
		),

		Err(error) => match error.kind {
			clap::ErrorKind::HelpDisplayed => Ok(
				Command::Help(error.message.into_boxed_str())
			),
			clap::ErrorKind::VersionDisplayed => Ok(
				Command::Version(error.message.into_boxed_str())
			),
			_ => Err(error)
		}
	}
}


#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;

	use super::*;


	#[test]
	fn test_flags() {
		let command = parse(["quill", "--check", "--code", "script.ql"]);

		let args = assert_matches!(command, Ok(Command::Run(args)) => args);
		assert!(args.check);
		assert!(args.print_code);
		assert!(!args.verbose);
		assert_eq!(args.script, Some(PathBuf::from("script.ql")));
	}


	#[test]
	fn test_stdin() {
		let command = parse(["quill", "-v"]);
		assert_matches!(command, Ok(Command::Run(Args { script: None, verbose: true, .. })));
	}


	#[test]
	fn test_help() {
		assert_matches!(parse(["quill", "--help"]), Ok(Command::Help(_)));
		assert_matches!(parse(["quill", "--bogus"]), Err(_));
	}
}
