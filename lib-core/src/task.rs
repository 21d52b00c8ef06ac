use std::{fs, io, path::{Path, PathBuf}};

use crossbeam_channel::Sender;

use crate::{
    cfg::ConfigMap,
    errors::{MinifyError, TaskError},
    fileset::FileSet,
    min::FileKind,
    paths, Result_, TaskEvent,
};

/// Debug directory name used when none is configured.
pub const DEFAULT_DEBUG_DIR: &str = "Debug";
/// Release directory name used when none is configured.
pub const DEFAULT_RELEASE_DIR: &str = "Release";
/// Combined file base name used when none is configured.
pub const DEFAULT_COMBINED_FILE: &str = "master";

/// Raw task options as supplied by a host (CLI flags, config file, build
/// script). Turn them into a runnable [`TaskConfig`] with [`Self::validate`].
#[derive(Debug, Clone, Default)]
pub struct TaskOptions {
    /// Root directory under which the debug/release trees live.
    pub base_dir: Option<PathBuf>,
    /// Name of the debug directory segment to replace in source paths.
    pub debug_dir: Option<String>,
    /// Name of the release directory segment that replaces it.
    pub release_dir: Option<String>,
    /// Combine all inputs into one output file instead of mirroring each.
    pub combine: bool,
    /// Base name of the combined output file.
    pub combined_file: Option<String>,
}

impl TaskOptions {
    /// Fills unset (or empty) names with their defaults. Pure: the base
    /// directory and combine flag pass through untouched.
    #[must_use]
    pub fn apply_defaults(self) -> Self {
        Self {
            base_dir: self.base_dir,
            debug_dir: name_or(self.debug_dir, DEFAULT_DEBUG_DIR),
            release_dir: name_or(self.release_dir, DEFAULT_RELEASE_DIR),
            combine: self.combine,
            combined_file: name_or(self.combined_file, DEFAULT_COMBINED_FILE),
        }
    }

    /// Applies defaults and checks the options, producing a runnable config.
    /// No filesystem access happens here.
    /// # Errors
    /// Returns [`TaskError::MissingBaseDir`] when no base directory was set.
    pub fn validate(self) -> Result<TaskConfig, TaskError> {
        let d = self.apply_defaults();
        let Some(base_dir) = d.base_dir else {
            return Err(TaskError::MissingBaseDir);
        };
        Ok(TaskConfig {
            base_dir,
            debug_dir: d.debug_dir.unwrap_or_else(|| DEFAULT_DEBUG_DIR.to_string()),
            release_dir: d.release_dir.unwrap_or_else(|| DEFAULT_RELEASE_DIR.to_string()),
            combine: d.combine,
            combined_file: d.combined_file.unwrap_or_else(|| DEFAULT_COMBINED_FILE.to_string()),
        })
    }
}

fn name_or(v: Option<String>, default: &str) -> Option<String> {
    match v {
        Some(s) if !s.is_empty() => Some(s),
        _ => Some(default.to_string()),
    }
}

/// A fully defaulted and validated task configuration.
#[derive(Debug, Clone)]
pub struct TaskConfig {
    /// Root directory under which the debug/release trees live.
    pub base_dir: PathBuf,
    /// Debug directory segment name, never empty.
    pub debug_dir: String,
    /// Release directory segment name, never empty.
    pub release_dir: String,
    /// Combine all inputs into one output file.
    pub combine: bool,
    /// Combined output base name, never empty.
    pub combined_file: String,
}

/// Runs the compression task over a file set.
///
/// Creates the base and release directories, then minifies every file in
/// declared order, either into mirrored release-tree paths or into one
/// combined file (see [`TaskConfig::combine`]). The first failure stops the
/// run; files written before it stay on disk.
///
/// Progress is reported over `events`; sends are advisory and a closed
/// channel never fails the task.
/// # Errors
/// Returns a [`TaskError`] for configuration and input problems, a
/// [`MinifyError`] when a minifier rejects a file, or an I/O error.
pub fn compress(
    cfg: &TaskConfig,
    files: &FileSet,
    cfgmap: &ConfigMap,
    events: &Sender<TaskEvent>,
) -> Result_<()> {
    fs::create_dir_all(&cfg.base_dir)?;
    fs::create_dir_all(cfg.base_dir.join(&cfg.release_dir))?;
    if files.is_empty() {
        return Err(TaskError::MissingFileSet.into());
    }
    let base = match &files.base_dir {
        Some(b) => b.clone(),
        None => std::env::current_dir()?,
    };
    let _ = events.send(TaskEvent::Start(files.len()));
    if cfg.combine {
        compress_combined(cfg, files, &base, cfgmap, events)?;
    } else {
        compress_individual(cfg, files, &base, cfgmap, events)?;
    }
    let _ = events.send(TaskEvent::Finish);
    Ok(())
}

/// Minifies each file into its mirrored release-tree location.
fn compress_individual(
    cfg: &TaskConfig,
    files: &FileSet,
    base: &Path,
    cfgmap: &ConfigMap,
    events: &Sender<TaskEvent>,
) -> Result_<()> {
    for (index, declared) in files.files().iter().enumerate() {
        let src = resolve_source(base, declared)?;
        let dest = paths::swap_segment(&src, &cfg.debug_dir, &cfg.release_dir)
            .ok_or_else(|| TaskError::DebugDirNotInPath {
                path: src.clone(),
                debug_dir: cfg.debug_dir.clone(),
            })?;
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        let kind = classify(&src)?;
        let text = fs::read_to_string(&src)?;
        let mut out = String::new();
        kind.minify(cfgmap, &text, &mut out)
            .map_err(|e| MinifyError::new(src.clone(), e))?;
        let _ = events.send(TaskEvent::Compress {
            index,
            src: src.into_boxed_path(),
            dest: dest.clone().into_boxed_path(),
        });
        write_atomic(&dest, &out)?;
    }
    Ok(())
}

/// Minifies every file into one accumulated output, written once at the end.
/// The first file fixes the run's type and the combined file's extension;
/// a later file of the other type fails the run.
fn compress_combined(
    cfg: &TaskConfig,
    files: &FileSet,
    base: &Path,
    cfgmap: &ConfigMap,
    events: &Sender<TaskEvent>,
) -> Result_<()> {
    let mut acc = String::new();
    let mut run_kind: Option<FileKind> = None;
    let mut dest = cfg.base_dir.join(&cfg.release_dir).join(&cfg.combined_file);
    for (index, declared) in files.files().iter().enumerate() {
        let src = resolve_source(base, declared)?;
        let kind = classify(&src)?;
        match run_kind {
            None => {
                run_kind = Some(kind);
                dest = ensure_extension(dest, kind.extension());
            }
            Some(expected) if expected != kind => {
                return Err(TaskError::MixedCombineSet { path: src, expected, found: kind }.into());
            }
            Some(_) => {}
        }
        let text = fs::read_to_string(&src)?;
        kind.minify(cfgmap, &text, &mut acc)
            .map_err(|e| MinifyError::new(src.clone(), e))?;
        let _ = events.send(TaskEvent::Compress {
            index,
            src: src.into_boxed_path(),
            dest: dest.clone().into_boxed_path(),
        });
    }
    write_atomic(&dest, &acc)?;
    Ok(())
}

fn resolve_source(base: &Path, declared: &Path) -> Result<PathBuf, TaskError> {
    let src = FileSet::resolve(base, declared);
    if src.is_file() {
        Ok(src)
    } else {
        Err(TaskError::NotFound(src))
    }
}

fn classify(path: &Path) -> Result<FileKind, TaskError> {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(FileKind::by_extension)
        .ok_or_else(|| TaskError::UnsupportedExtension(path.to_path_buf()))
}

/// Appends `.ext` unless the path already ends with it.
fn ensure_extension(path: PathBuf, ext: &str) -> PathBuf {
    let suffix = format!(".{ext}");
    if path.as_os_str().to_string_lossy().ends_with(&suffix) {
        path
    } else {
        let mut s = path.into_os_string();
        s.push(suffix);
        PathBuf::from(s)
    }
}

/// Writes through a temp file in the destination directory, then renames,
/// so a crash mid-write never leaves a truncated destination behind.
fn write_atomic(dest: &Path, text: &str) -> io::Result<()> {
    let mut tmp = dest.as_os_str().to_owned();
    tmp.push(".tmp~");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, text)?;
    fs::rename(&tmp, dest)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use tempfile::TempDir;

    use crate::cfg::ConfigMap;
    use crate::errors::TaskError;
    use crate::fileset::FileSet;
    use crate::min::FileKind;
    use crate::TaskEvent;

    use super::{compress, TaskConfig, TaskOptions};

    const CSS_A: &str = "a {\n    color: #ff0000;\n}\n";
    const CSS_B: &str = "b {\n    margin: 0px;\n}\n";
    const JS_A: &str = "function add(first, second) {\n    return first + second;\n}\nexport { add };\n";

    fn write_src(root: &Path, rel: &str, content: &str) -> PathBuf {
        let p = root.join(rel);
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(&p, content).unwrap();
        p
    }

    fn config(out: &Path, combine: bool) -> TaskConfig {
        TaskOptions {
            base_dir: Some(out.to_path_buf()),
            combine,
            ..TaskOptions::default()
        }
        .validate()
        .unwrap()
    }

    fn run(cfg: &TaskConfig, files: &FileSet) -> anyhow::Result<Vec<TaskEvent>> {
        let (tx, rx) = crossbeam_channel::unbounded();
        let res = compress(cfg, files, &ConfigMap::default(), &tx);
        drop(tx);
        res.map(|()| rx.into_iter().collect())
    }

    fn minified(kind: FileKind, src: &str) -> String {
        let mut out = String::new();
        kind.minify(&ConfigMap::default(), src, &mut out).unwrap();
        out
    }

    #[test]
    fn defaults_fill_unset_and_empty_names() {
        let cfg = TaskOptions {
            base_dir: Some(PathBuf::from("/out")),
            debug_dir: Some(String::new()),
            ..TaskOptions::default()
        }
        .validate()
        .unwrap();
        assert_eq!(cfg.debug_dir, "Debug");
        assert_eq!(cfg.release_dir, "Release");
        assert_eq!(cfg.combined_file, "master");
    }

    #[test]
    fn missing_base_dir_fails_validation() {
        let err = TaskOptions::default().validate().unwrap_err();
        assert!(matches!(err, TaskError::MissingBaseDir));
    }

    #[test]
    fn empty_fileset_fails() {
        let tmp = TempDir::new().unwrap();
        let cfg = config(&tmp.path().join("out"), false);
        let err = run(&cfg, &FileSet::default()).unwrap_err();
        assert!(matches!(err.downcast_ref(), Some(TaskError::MissingFileSet)));
    }

    #[test]
    fn individual_mirrors_each_file_into_release_tree() {
        let tmp = TempDir::new().unwrap();
        let site = tmp.path().join("site");
        write_src(&site, "Scripts/Debug/app.js", JS_A);
        write_src(&site, "Styles/Debug/site.css", CSS_A);
        let mut files = FileSet::with_base(&site);
        files.push("Scripts/Debug/app.js");
        files.push("Styles/Debug/site.css");

        let cfg = config(&tmp.path().join("out"), false);
        let events = run(&cfg, &files).unwrap();

        let js_out = site.join("Scripts/Release/app.js");
        let css_out = site.join("Styles/Release/site.css");
        assert_eq!(fs::read_to_string(js_out).unwrap(), minified(FileKind::Js, JS_A));
        assert_eq!(fs::read_to_string(css_out).unwrap(), minified(FileKind::Css, CSS_A));
        assert!(tmp.path().join("out/Release").is_dir());
        assert!(matches!(events[0], TaskEvent::Start(2)));
        assert!(matches!(events.last(), Some(TaskEvent::Finish)));
        assert_eq!(events.len(), 4);
    }

    #[test]
    fn individual_overwrites_and_leaves_no_temp_file() {
        let tmp = TempDir::new().unwrap();
        let site = tmp.path().join("site");
        write_src(&site, "Debug/a.css", CSS_A);
        let dest = write_src(&site, "Release/a.css", "stale");
        let mut files = FileSet::with_base(&site);
        files.push("Debug/a.css");

        run(&config(&tmp.path().join("out"), false), &files).unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), minified(FileKind::Css, CSS_A));
        assert!(!site.join("Release/a.css.tmp~").exists());
    }

    #[test]
    fn missing_file_stops_but_keeps_earlier_output() {
        let tmp = TempDir::new().unwrap();
        let site = tmp.path().join("site");
        write_src(&site, "Debug/a.css", CSS_A);
        write_src(&site, "Debug/c.css", CSS_B);
        let mut files = FileSet::with_base(&site);
        files.push("Debug/a.css");
        files.push("Debug/missing.css");
        files.push("Debug/c.css");

        let err = run(&config(&tmp.path().join("out"), false), &files).unwrap_err();
        assert!(matches!(err.downcast_ref(), Some(TaskError::NotFound(_))));
        assert!(site.join("Release/a.css").is_file());
        assert!(!site.join("Release/c.css").exists());
    }

    #[test]
    fn unsupported_extension_fails() {
        let tmp = TempDir::new().unwrap();
        let site = tmp.path().join("site");
        write_src(&site, "Debug/readme.txt", "hello");
        let mut files = FileSet::with_base(&site);
        files.push("Debug/readme.txt");

        let err = run(&config(&tmp.path().join("out"), false), &files).unwrap_err();
        assert!(matches!(err.downcast_ref(), Some(TaskError::UnsupportedExtension(_))));
    }

    #[test]
    fn debug_segment_absent_fails() {
        let tmp = TempDir::new().unwrap();
        let site = tmp.path().join("site");
        write_src(&site, "Static/a.css", CSS_A);
        let mut files = FileSet::with_base(&site);
        files.push("Static/a.css");

        let err = run(&config(&tmp.path().join("out"), false), &files).unwrap_err();
        assert!(matches!(err.downcast_ref(), Some(TaskError::DebugDirNotInPath { .. })));
    }

    #[test]
    fn combine_concatenates_in_declared_order() {
        let tmp = TempDir::new().unwrap();
        let site = tmp.path().join("site");
        write_src(&site, "Debug/a.css", CSS_A);
        write_src(&site, "Debug/b.css", CSS_B);
        let mut files = FileSet::with_base(&site);
        files.push("Debug/a.css");
        files.push("Debug/b.css");

        let out = tmp.path().join("out");
        run(&config(&out, true), &files).unwrap();

        let combined = fs::read_to_string(out.join("Release/master.css")).unwrap();
        let expected = minified(FileKind::Css, CSS_A) + &minified(FileKind::Css, CSS_B);
        assert_eq!(combined, expected);
    }

    #[test]
    fn combine_keeps_configured_extension() {
        let tmp = TempDir::new().unwrap();
        let site = tmp.path().join("site");
        write_src(&site, "Debug/a.css", CSS_A);
        let mut files = FileSet::with_base(&site);
        files.push("Debug/a.css");

        let out = tmp.path().join("out");
        let cfg = TaskOptions {
            base_dir: Some(out.clone()),
            combine: true,
            combined_file: Some("bundle.css".to_string()),
            ..TaskOptions::default()
        }
        .validate()
        .unwrap();
        run(&cfg, &files).unwrap();
        assert!(out.join("Release/bundle.css").is_file());
        assert!(!out.join("Release/bundle.css.css").exists());
    }

    #[test]
    fn combine_with_missing_file_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let site = tmp.path().join("site");
        write_src(&site, "Debug/a.css", CSS_A);
        let mut files = FileSet::with_base(&site);
        files.push("Debug/a.css");
        files.push("Debug/missing.css");

        let out = tmp.path().join("out");
        let err = run(&config(&out, true), &files).unwrap_err();
        assert!(matches!(err.downcast_ref(), Some(TaskError::NotFound(_))));
        assert!(!out.join("Release/master.css").exists());
    }

    #[test]
    fn mixed_combine_set_fails() {
        let tmp = TempDir::new().unwrap();
        let site = tmp.path().join("site");
        write_src(&site, "Debug/a.css", CSS_A);
        write_src(&site, "Debug/app.js", JS_A);
        let mut files = FileSet::with_base(&site);
        files.push("Debug/a.css");
        files.push("Debug/app.js");

        let out = tmp.path().join("out");
        let err = run(&config(&out, true), &files).unwrap_err();
        let Some(TaskError::MixedCombineSet { expected, found, .. }) = err.downcast_ref() else {
            panic!("expected MixedCombineSet, got {err}");
        };
        assert_eq!(*expected, FileKind::Css);
        assert_eq!(*found, FileKind::Js);
        assert!(!out.join("Release/master.css").exists());
    }
}
