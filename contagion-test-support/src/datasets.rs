//! Edge-list fixtures and a scratch directory to write them into.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use tempfile::TempDir;

/// Three nodes on a line, both edges at weight `0.9`.
pub const TRIAD: &str = "3 2\n1 2 0.9\n2 3 0.9\n";

/// Triangle 1-2-3 with the tail 1-4-5-6, all at weight `1`.
///
/// Degrees: 1 -> 3, 2..=5 -> 2, 6 -> 1.
pub const TAILED_TRIANGLE: &str = "\
6 6
1 2 1
1 3 1
1 4 1
2 3 1
4 5 1
5 6 1
";

/// Two components with mixed weights; `0.3` edges fall below a `0.5` filter.
pub const MIXED_WEIGHTS: &str = "\
% two components
6 5
1 2 0.75
2 3 0.3
3 1 0.5

4 5 0.9
5 6 0.2
";

/// Builds a `nodes`-long chain dataset with every edge at `weight`.
///
/// # Examples
/// ```
/// use contagion_test_support::datasets::chain;
///
/// assert_eq!(chain(3, 0.5), "3 2\n1 2 0.5\n2 3 0.5\n");
/// ```
#[must_use]
pub fn chain(nodes: usize, weight: f64) -> String {
    let edges = nodes.saturating_sub(1);
    let mut text = format!("{nodes} {edges}\n");
    for source in 1..nodes {
        text.push_str(&format!("{source} {} {weight}\n", source + 1));
    }
    text
}

/// Temporary directory holding dataset files for a single test.
#[derive(Debug)]
pub struct DatasetDir {
    root: Utf8PathBuf,
    dir: Dir,
    _guard: TempDir,
}

impl DatasetDir {
    /// Creates an empty directory that is removed on drop.
    ///
    /// # Errors
    /// Returns an error when the directory cannot be created or its path is
    /// not UTF-8.
    pub fn new() -> io::Result<Self> {
        let guard = tempfile::tempdir()?;
        let root = Utf8PathBuf::from_path_buf(guard.path().to_path_buf()).map_err(|path| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("non UTF-8 temp path {}", path.display()),
            )
        })?;
        let dir = Dir::open_ambient_dir(&root, ambient_authority())?;
        Ok(Self {
            root,
            dir,
            _guard: guard,
        })
    }

    /// Writes `contents` to `file_name` and returns its absolute path.
    ///
    /// # Errors
    /// Returns an error when the file cannot be written.
    ///
    /// # Examples
    /// ```
    /// use contagion_test_support::datasets::{DatasetDir, TRIAD};
    ///
    /// let dir = DatasetDir::new()?;
    /// let path = dir.write("triad.txt", TRIAD)?;
    /// assert_eq!(std::fs::read_to_string(path)?, TRIAD);
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn write(&self, file_name: &str, contents: &str) -> io::Result<Utf8PathBuf> {
        self.dir.write(file_name, contents)?;
        Ok(self.root.join(file_name))
    }

    /// Returns the directory path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.root
    }
}
