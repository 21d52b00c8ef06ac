//! Relmin is initially built as a CLI app, but can also be used as a library.
//! This crate contains everything needed to minify JavaScript/CSS files from a
//! debug directory tree into a parallel release tree.
//!
//! You should be interested in the `task` module. It holds the compression task
//! that maps every source file to its release-tree destination, or combines all
//! minified sources into one file.
//!
//! The actual minification is delegated to `lightningcss` (CSS) and `oxc` (JS);
//! this crate only orchestrates configuration, path mapping and file writing.

/// Minifiers for the supported file types.
pub mod min;
/// The compression task: defaulting, validation and both processing modes.
pub mod task;
/// Release-path derivation from debug-tree paths.
pub mod paths;
/// Ordered input file sets.
pub mod fileset;
/// Errors raised by the compression task.
pub mod errors;
/// Implementations of configuration map and traits for accepting config types.
pub mod cfg;

pub(crate) type Result_<T> = anyhow::Result<T>;

/// A progress event describing what the task is currently doing.
///
/// Events are advisory: the task keeps running even when nobody listens.
#[derive(Debug, Clone)]
pub enum TaskEvent {
    /// The task is about to process this many files.
    Start(usize),
    /// One file is being minified from a source path to a destination path.
    Compress {
        /// Position of the file within the set, starting at 0.
        index: usize,
        /// Resolved source path.
        src: Box<std::path::Path>,
        /// Path the minified output is written to. In combine mode this is
        /// the shared combined file.
        dest: Box<std::path::Path>,
    },
    /// All files were processed and the output is on disk.
    Finish,
}
