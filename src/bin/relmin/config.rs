use std::{fs, io, path::PathBuf};

use relmin_core::min;

#[derive(Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct Config {
    pub task: TaskSection,
    pub fileset: FileSetSection,
    pub css: Option<min::css::CSSConfig>,
    pub js: Option<min::js::JSConfig>,
}

#[derive(Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct TaskSection {
    pub base_dir: Option<PathBuf>,
    pub debug_dir: Option<String>,
    pub release_dir: Option<String>,
    pub combine: Option<bool>,
    pub combined_file: Option<String>,
}

#[derive(Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct FileSetSection {
    pub base_dir: Option<PathBuf>,
    /// Files listed explicitly, kept in declared order.
    pub files: Vec<PathBuf>,
    /// Directories whose .js/.css files are appended in sorted order.
    pub scan: Vec<PathBuf>,
}

fn path_to_config(path: Option<PathBuf>) -> io::Result<PathBuf> {
    match path {
        Some(p) => {
            let meta = fs::metadata(&p)?;
            Ok(if meta.is_dir() {
                p.join("relmin.toml")
            } else {
                p
            })
        }
        None => Ok(PathBuf::from("relmin.toml"))
    }
}

pub fn read_config(path: Option<PathBuf>) -> io::Result<Config> {
    let path = path_to_config(path)?;
    let f = fs::read_to_string(path)?;
    toml::from_str(&f).map_err(io::Error::other)
}
