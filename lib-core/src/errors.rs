use std::{error::Error, fmt::Display, path::PathBuf};

use crate::min::FileKind;

/// An error describing why the compression task failed.
///
/// Every variant is fatal to the current run. Files written before the
/// failing one are left on disk; there is no rollback.
#[derive(Debug)]
pub enum TaskError {
    /// The base output directory was not configured.
    MissingBaseDir,
    /// No input files were supplied.
    MissingFileSet,
    /// A declared input path does not resolve to an existing file.
    NotFound(PathBuf),
    /// A file's extension is neither `.css` nor `.js`.
    UnsupportedExtension(PathBuf),
    /// No component of a source path matches the debug directory name,
    /// so no release path can be derived from it.
    DebugDirNotInPath {
        /// The resolved source path.
        path: PathBuf,
        /// The configured debug directory name.
        debug_dir: String,
    },
    /// A combine run mixed CSS and JS inputs.
    MixedCombineSet {
        /// The file that did not match the type of the run.
        path: PathBuf,
        /// File type established by the first input.
        expected: FileKind,
        /// File type of the offending input.
        found: FileKind,
    },
}

impl Error for TaskError {}
impl Display for TaskError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingBaseDir => f.write_str(
                "the base directory must be set to specify the output directory of the minified JS/CSS files"
            ),
            Self::MissingFileSet => f.write_str(
                "a file set must be supplied to specify the JS/CSS files to compress"
            ),
            Self::NotFound(p) => write!(f, "could not find file '{}' to compress", p.display()),
            Self::UnsupportedExtension(p) => write!(
                f, "expected a .css or .js extension, got '{}'", p.display()
            ),
            Self::DebugDirNotInPath { path, debug_dir } => write!(
                f, "no '{debug_dir}' directory in path '{}'", path.display()
            ),
            Self::MixedCombineSet { path, expected, found } => write!(
                f, "cannot combine {found} file '{}' into a {expected} run; a combine set must use one file type",
                path.display()
            ),
        }
    }
}

/// An error that wraps a minifier failure with the file it was processing.
#[derive(Debug)]
pub struct MinifyError {
    /// The source file that failed to minify.
    pub path: PathBuf,
    inner: anyhow::Error,
}
impl MinifyError {
    pub(crate) const fn new(path: PathBuf, inner: anyhow::Error) -> Self {
        Self { path, inner }
    }

    /// Returns the underlying minifier error.
    #[must_use]
    pub fn inner_error(&self) -> &(dyn Error + 'static) {
        self.inner.as_ref()
    }
}
impl Error for MinifyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.inner.as_ref())
    }
}
impl Display for MinifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.inner)
    }
}
