use std::{
	io,
	fs::{self, File},
	path::Path,
};


/// Run the test on every script under the given directory, relative to the crate root.
/// Directories are walked recursively, in name order.
pub fn test_dir<P, F>(path: P, mut test: F) -> io::Result<()>
where
	P: AsRef<Path>,
	F: FnMut(&Path, File) -> io::Result<()>,
{
	fn walk<F>(dir: &Path, test: &mut F) -> io::Result<()>
	where
		F: FnMut(&Path, File) -> io::Result<()>,
	{
		let mut entries = fs::read_dir(dir)?
			.map(|entry| entry.map(|entry| entry.path()))
			.collect::<io::Result<Vec<_>>>()?;

		entries.sort();

		for path in entries {
			if path.is_dir() {
				walk(&path, test)?;
			} else if path.extension().map_or(false, |ext| ext == "ql") {
				let file = File::open(&path)?;
				test(&path, file)?;
			}
		}

		Ok(())
	}

	let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join(path);
	walk(&dir, &mut test)
}
