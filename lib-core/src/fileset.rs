use std::path::{Path, PathBuf};

/// An ordered set of input files plus an optional base directory used to
/// resolve relative entries.
///
/// Order is preserved; in combine mode it determines concatenation order.
#[derive(Debug, Clone, Default)]
pub struct FileSet {
    /// Directory relative entries are resolved against. When `None`, the
    /// task falls back to the process working directory.
    pub base_dir: Option<PathBuf>,
    files: Vec<PathBuf>,
}

impl FileSet {
    /// Creates a file set with a base directory and no files.
    #[must_use]
    pub fn with_base(base_dir: impl Into<PathBuf>) -> Self {
        Self { base_dir: Some(base_dir.into()), files: Vec::new() }
    }

    /// Appends a file path, keeping declaration order.
    pub fn push(&mut self, path: impl Into<PathBuf>) {
        self.files.push(path.into());
    }

    /// Appends every path from an iterator, keeping order.
    pub fn extend(&mut self, paths: impl IntoIterator<Item = PathBuf>) {
        self.files.extend(paths);
    }

    /// Number of declared files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the set has no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Declared paths, unresolved, in order.
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Resolves one declared path against `base`. Absolute entries are
    /// returned as-is (joining with an absolute path replaces the base).
    pub(crate) fn resolve(base: &Path, declared: &Path) -> PathBuf {
        base.join(declared)
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::FileSet;

    #[test]
    fn keeps_declaration_order() {
        let mut fs = FileSet::with_base("/www");
        fs.push("b.css");
        fs.push("a.css");
        assert_eq!(fs.files().to_vec(), vec![PathBuf::from("b.css"), PathBuf::from("a.css")]);
    }

    #[test]
    fn resolve_joins_relative_and_keeps_absolute() {
        assert_eq!(
            FileSet::resolve(Path::new("/www"), Path::new("Debug/a.css")),
            PathBuf::from("/www/Debug/a.css")
        );
        assert_eq!(
            FileSet::resolve(Path::new("/www"), Path::new("/opt/Debug/a.css")),
            PathBuf::from("/opt/Debug/a.css")
        );
    }
}
