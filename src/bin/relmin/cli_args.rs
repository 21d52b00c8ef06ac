use std::path::PathBuf;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Args {
    /// Input .js/.css files, processed in declared order (appended after
    /// files from the config file)
    pub files: Vec<PathBuf>,

    /// Root directory under which the debug/release trees live
    #[arg(short = 'b', long)]
    pub base_dir: Option<PathBuf>,

    /// Directory relative input paths are resolved against.
    /// Defaults to the current directory
    #[arg(long)]
    pub fileset_base: Option<PathBuf>,

    /// Debug directory name replaced in destination paths [default: Debug]
    #[arg(long)]
    pub debug_dir: Option<String>,

    /// Release directory name replacing it [default: Release]
    #[arg(long)]
    pub release_dir: Option<String>,

    /// Combine all inputs into one output file
    #[arg(short = 'c', long)]
    pub combine: bool,

    /// Base name of the combined output file [default: master]
    #[arg(long)]
    pub combined_file: Option<String>,

    /// Print a line per compressed file and full JS parser diagnostics
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Do not print progress output
    #[arg(long)]
    pub silent: bool,

    /// (Optional) Use custom .toml config file. If no path is provided, it will use `relmin.toml`
    #[arg(long)]
    pub config: Option<PathBuf>,
}
