use std::path::Path;

use super::IncludeError;
use crate::syntax::Source;


/// Source inclusion handler, invoked by `include "path"` statements.
pub trait Include {
	/// Load the included source. `from` is the path of the including unit.
	fn include(&mut self, path: &str, from: &Path) -> Result<Source, IncludeError>;
}


/// The default handler, which rejects every inclusion.
#[derive(Debug, Default)]
pub struct NoInclude;


impl Include for NoInclude {
	fn include(&mut self, _path: &str, _from: &Path) -> Result<Source, IncludeError> {
		Err(IncludeError::NotImplemented)
	}
}


/// Loads included files from the filesystem, relative to the including file.
#[derive(Debug, Default)]
pub struct FileInclude;


impl Include for FileInclude {
	fn include(&mut self, path: &str, from: &Path) -> Result<Source, IncludeError> {
		let path = from
			.parent()
			.unwrap_or_else(|| Path::new(""))
			.join(path);

		log::debug!("including {}", path.display());

		Ok(Source::from_path(path)?)
	}
}
