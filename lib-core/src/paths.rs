use std::path::{Component, Path, PathBuf};

/// Replaces every path component equal to `from` with `to`.
///
/// Matching is exact per component, so a `Debug` directory name will not
/// match inside a `MyDebugStuff` segment. Returns `None` when no component
/// matched; callers decide whether that is an error.
#[must_use]
pub fn swap_segment(path: &Path, from: &str, to: &str) -> Option<PathBuf> {
    let mut found = false;
    let mut out = PathBuf::new();
    for c in path.components() {
        match c {
            Component::Normal(seg) if seg.to_str() == Some(from) => {
                found = true;
                out.push(to);
            }
            _ => out.push(c.as_os_str()),
        }
    }
    found.then_some(out)
}
