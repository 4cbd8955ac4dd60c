use std::io::Write;

use log::{Level, LevelFilter, Log, Metadata, Record};

use super::color;


/// A logger that writes colored records to stderr.
#[derive(Debug)]
pub struct StderrLogger {
	level: LevelFilter,
}


impl StderrLogger {
	/// Install the logger as the global logger, with the given maximum level.
	/// Fails if a logger has already been installed.
	pub fn install(level: LevelFilter) -> Result<(), log::SetLoggerError> {
		log::set_boxed_logger(Box::new(Self { level }))?;
		log::set_max_level(level);
		Ok(())
	}
}


impl Log for StderrLogger {
	fn enabled(&self, metadata: &Metadata) -> bool {
		metadata.level() <= self.level
	}


	fn log(&self, record: &Record) {
		if !self.enabled(record.metadata()) {
			return;
		}

		let stderr = std::io::stderr();
		let mut stderr = stderr.lock();

		// Logging must never bring the interpreter down.
		let _ = match record.level() {
			Level::Error => writeln!(stderr, "{} {}", color::Fg(color::Red, "[error]"), record.args()),
			Level::Warn => writeln!(stderr, "{} {}", color::Fg(color::Yellow, "[warn]"), record.args()),
			Level::Info => writeln!(stderr, "{} {}", color::Fg(color::Green, "[info]"), record.args()),
			Level::Debug => writeln!(stderr, "{} {}", color::Fg(color::Blue, "[debug]"), record.args()),
			Level::Trace => writeln!(stderr, "{} {}", color::Fg(color::Magenta, "[trace]"), record.args()),
		};
	}


	fn flush(&self) {
		let _ = std::io::stderr().flush();
	}
}
