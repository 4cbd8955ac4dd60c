mod args;

use std::{
	io::{self, Write},
	path::Path,
};

use log::LevelFilter;

use quill::{
	code::Code,
	compiler::{Compiler, FileInclude},
	fmt,
	runtime::Runtime,
	symbol,
	syntax::Source,
	term::{color, log::StderrLogger},
};
use args::{Args, Command};


fn main() -> ! {
	let command = match args::parse(std::env::args_os()) {
		Ok(command) => command,
		Err(error) => {
			eprint!("{}", error);
			std::process::exit(1)
		}
	};

	let exit_code = match command {
		Command::Run(args) => run(args),
		Command::Help(msg) | Command::Version(msg) => {
			println!("{}", msg);
			0
		},
	};

	std::process::exit(exit_code)
}


fn run(args: Args) -> i32 {
	let level =
		if args.verbose {
			LevelFilter::Debug
		} else {
			LevelFilter::Warn
		};

	if let Err(error) = StderrLogger::install(level) {
		eprintln!("{}: {}", color::Fg(color::Red, "Error"), error);
	}

	let source = match &args.script {
		Some(path) => Source::from_path(path.as_path()),
		None => Source::from_reader(Path::new("<stdin>"), io::stdin().lock()),
	};

	let source = match source {
		Ok(source) => source,
		Err(error) => {
			eprintln!("{}: {}", color::Fg(color::Red, "Error"), error);
			return 1;
		}
	};

	let mut interner = symbol::Interner::new();

	let code = match Compiler::new(&mut interner).with_include(FileInclude).compile(&source) {
		Ok(code) => code,
		Err(error) => {
			eprintln!("{}: {}", color::Fg(color::Red, "Error"), error);
			return 2;
		}
	};

	if args.print_code {
		print_code(&code, &interner);
	}

	if args.check {
		return 0;
	}

	let result = Runtime::new(&code, &interner).run();

	match result {
		Ok(_) => 0,
		Err(panic) => {
			eprintln!("{}", color::Fg(color::Red, fmt::Show(&panic, &interner)));
			1
		}
	}
}


fn print_code(code: &Code, interner: &symbol::Interner) {
	let stdout = io::stdout();
	let mut stdout = stdout.lock();

	let separator = color::Fg(color::Yellow, "--------------------------------------------------");

	// Broken pipes are not worth reporting.
	let _ = writeln!(stdout, "{}\n{}\n{}", separator, fmt::Show(code, interner), separator);
}
