use std::{io, path::{Path, PathBuf}, thread::{self, JoinHandle}};

use clap::Parser;
use crossbeam_channel::Sender;
use indicatif::{ProgressBar, ProgressStyle};
use walkdir::WalkDir;

use relmin_core::{
    cfg::ConfigMap,
    fileset::FileSet,
    min::{self, FileKind},
    task::{self, TaskOptions},
    TaskEvent,
};

mod cli_args;
mod config;

const PB_STYLE: &str = "# {pos}/{len} {wide_msg}";

fn main() -> anyhow::Result<()> {
    let args = cli_args::Args::parse();
    let file_cfg = match config::read_config(args.config.clone()) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => config::Config::default(),
        Err(e) => anyhow::bail!("failed to read config: {e}"),
    };

    let cfgmap = ConfigMap::default();
    if let Some(css) = file_cfg.css {
        cfgmap.set::<min::css::MinifierCSS>(css);
    }
    let mut js = file_cfg.js.unwrap_or_default();
    js.verbose |= args.verbose;
    cfgmap.set::<min::js::MinifierJS>(js);

    let task_cfg = TaskOptions {
        base_dir: args.base_dir.or(file_cfg.task.base_dir),
        debug_dir: args.debug_dir.or(file_cfg.task.debug_dir),
        release_dir: args.release_dir.or(file_cfg.task.release_dir),
        combine: args.combine || file_cfg.task.combine.unwrap_or(false),
        combined_file: args.combined_file.or(file_cfg.task.combined_file),
    }.validate()?;

    let mut files = FileSet::default();
    files.base_dir = args.fileset_base.or(file_cfg.fileset.base_dir);
    files.extend(file_cfg.fileset.files);
    for dir in &file_cfg.fileset.scan {
        files.extend(scan_dir(dir)?);
    }
    files.extend(args.files);

    if !args.silent {
        if task_cfg.combine {
            let dest = task_cfg.base_dir.join(&task_cfg.release_dir).join(&task_cfg.combined_file);
            println!("Compressing & combining {} JS/CSS file(s) to '{}'.", files.len(), dest.display());
        } else {
            println!("Compressing {} JS/CSS file(s) to '{}'.", files.len(), task_cfg.base_dir.display());
        }
    }

    if args.silent {
        let (tx, rx) = crossbeam_channel::unbounded();
        drop(rx);
        task::compress(&task_cfg, &files, &cfgmap, &tx)?;
    } else {
        let pb = file_progress_bar();
        let rel_base = files.base_dir.clone();
        let (pj, tx) = thread_progress_bar(pb, rel_base, args.verbose);
        let res = task::compress(&task_cfg, &files, &cfgmap, &tx);
        drop(tx);
        pj.join().map_err(|_| anyhow::anyhow!("progress thread failed"))?;
        res?;
    }
    Ok(())
}

fn file_progress_bar() -> ProgressBar {
    ProgressBar::new(0).with_style(
        ProgressStyle::with_template(PB_STYLE).unwrap()
    )
}

fn thread_progress_bar(
    pb: ProgressBar,
    rel_base: Option<PathBuf>,
    verbose: bool,
) -> (JoinHandle<()>, Sender<TaskEvent>) {
    let (tx, rx) = crossbeam_channel::unbounded();
    let pj = thread::spawn(move || {
        for ev in rx {
            match ev {
                TaskEvent::Start(n) => { pb.set_length(n as u64); }
                TaskEvent::Compress { index, src, dest } => {
                    pb.set_position(index as u64 + 1);
                    let msg = format!(
                        "{} -> {}",
                        display_from(rel_base.as_deref(), &src),
                        display_from(rel_base.as_deref(), &dest)
                    );
                    if verbose {
                        pb.println(format!("Compressing '{msg}'."));
                    }
                    pb.set_message(msg);
                }
                TaskEvent::Finish => { pb.finish_with_message("Saved."); }
            }
        }
    });
    (pj, tx)
}

/// Shows a path relative to the fileset base when possible, full otherwise.
fn display_from(base: Option<&Path>, p: &Path) -> String {
    base.and_then(|b| pathdiff::diff_paths(p, b))
        .unwrap_or_else(|| p.to_path_buf())
        .display()
        .to_string()
}

/// Expands a scanned directory into its .js/.css files, in sorted order.
fn scan_dir(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let supported = entry.path().extension()
            .and_then(|e| e.to_str())
            .and_then(FileKind::by_extension)
            .is_some();
        if supported {
            found.push(entry.into_path());
        }
    }
    Ok(found)
}
