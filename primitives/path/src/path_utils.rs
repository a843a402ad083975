// SPDX-License-Identifier: CC0-1.0

//! Lexical path relativization and project root discovery.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Errors that can occur when expressing one path relative to another
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelativizeError {
    /// The path or the base is the empty string
    #[error("Cannot relativize an empty path")]
    EmptyPath,
    /// One path is absolute and the other relative, or they sit under different roots
    #[error("Different prefix: {path:?} and {base:?}")]
    PrefixMismatch {
        /// Path that was being relativized
        path: PathBuf,
        /// Base it was relativized against
        base: PathBuf,
    },
    /// The base keeps `..` components that cannot be resolved lexically
    #[error("Base directory {base:?} has unresolvable '..' components")]
    BaseEscapes {
        /// Offending base directory
        base: PathBuf,
    },
}

/// A lexically cleaned path: its anchor (prefix and root) and the remaining parts.
///
/// `.` components are dropped and `name/..` pairs are folded. A `..` directly
/// under a root is dropped, a leading `..` in a relative path is kept.
struct Cleaned<'a> {
    anchor: Vec<Component<'a>>,
    parts: Vec<Component<'a>>,
}

impl<'a> Cleaned<'a> {
    fn new(path: &'a Path) -> Self {
        let mut anchor = Vec::new();
        let mut parts: Vec<Component<'a>> = Vec::new();
        for component in path.components() {
            match component {
                Component::Prefix(_) | Component::RootDir => anchor.push(component),
                Component::CurDir => {}
                Component::ParentDir => match parts.last() {
                    Some(Component::Normal(_)) => {
                        parts.pop();
                    }
                    _ if !anchor.is_empty() => {}
                    _ => parts.push(component),
                },
                Component::Normal(_) => parts.push(component),
            }
        }
        Self { anchor, parts }
    }
}

/// Express `path` relative to `base` without consulting the filesystem.
///
/// Both paths must be absolute or both relative, and share the same prefix.
/// Targets outside `base` are reached through `..` segments; a path equal to
/// `base` yields `.`.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use dt_path::relativize;
///
/// assert_eq!(relativize("/project/lib/foo.rs", "/project"), Ok(PathBuf::from("lib/foo.rs")));
/// assert_eq!(relativize("/other/x.rs", "/project"), Ok(PathBuf::from("../other/x.rs")));
/// assert!(relativize("", "/project").is_err());
/// ```
pub fn relativize(
    path: impl AsRef<Path>,
    base: impl AsRef<Path>,
) -> Result<PathBuf, RelativizeError> {
    let (path, base) = (path.as_ref(), base.as_ref());
    if path.as_os_str().is_empty() || base.as_os_str().is_empty() {
        return Err(RelativizeError::EmptyPath);
    }

    let target = Cleaned::new(path);
    let from = Cleaned::new(base);
    if target.anchor != from.anchor {
        return Err(RelativizeError::PrefixMismatch {
            path: path.to_path_buf(),
            base: base.to_path_buf(),
        });
    }

    let shared = target.parts.iter().zip(&from.parts).take_while(|(a, b)| a == b).count();

    let mut relative = PathBuf::new();
    for component in &from.parts[shared..] {
        if *component == Component::ParentDir {
            return Err(RelativizeError::BaseEscapes { base: base.to_path_buf() });
        }
        relative.push("..");
    }
    for component in &target.parts[shared..] {
        relative.push(component);
    }

    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    Ok(relative)
}

/// Walk `levels` directories up from `path`.
///
/// Stops at the top of the path instead of failing, so `ancestor_dir("/a", 5)`
/// is `/`.
pub fn ancestor_dir(path: &Path, levels: usize) -> PathBuf {
    path.ancestors()
        .take(levels + 1)
        .filter(|p| !p.as_os_str().is_empty())
        .last()
        .unwrap_or(path)
        .to_path_buf()
}

/// Absolute location of a compiler-reported source file of the package at `manifest_dir`
///
/// `file!()` is relative to the workspace root, which is `manifest_dir` itself
/// or one of its ancestors (`libs/dt/src/printer.rs` for a member at
/// `/ws/libs/dt`). The leading components shared with the end of
/// `manifest_dir` are stripped so only the package-local tail is joined.
/// When several splits are possible, one naming an existing file wins;
/// otherwise the longest shared run is used. Absolute files are returned as is.
pub fn resolve_module_file(manifest_dir: &Path, module_file: &Path) -> PathBuf {
    if module_file.is_absolute() {
        return module_file.to_path_buf();
    }

    let manifest: Vec<Component<'_>> = manifest_dir.components().collect();
    let module: Vec<Component<'_>> = module_file.components().collect();
    let longest = manifest.len().min(module.len().saturating_sub(1));

    let candidates: Vec<PathBuf> = (0..=longest)
        .rev()
        .filter(|&shared| manifest[manifest.len() - shared..] == module[..shared])
        .map(|shared| manifest_dir.join(module[shared..].iter().collect::<PathBuf>()))
        .collect();

    candidates
        .iter()
        .find(|candidate| candidate.is_file())
        .or_else(|| candidates.first())
        .cloned()
        .unwrap_or_else(|| manifest_dir.join(module_file))
}

/// Find the project root above `start` by looking for `Cargo.toml`
///
/// Walks up the directory tree from `start`. A `Cargo.toml` containing
/// `[workspace]` wins; otherwise the nearest directory holding any
/// `Cargo.toml` is returned.
///
/// # Returns
///
/// Returns `None` when no `Cargo.toml` exists anywhere above `start`.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut nearest_package = None;
    let mut current = start.to_path_buf();
    loop {
        let cargo_toml = current.join("Cargo.toml");
        if cargo_toml.is_file() {
            let contents = std::fs::read_to_string(&cargo_toml).unwrap_or_default();
            if contents.contains("[workspace]") {
                return Some(current);
            }
            if nearest_package.is_none() {
                nearest_package = Some(current.clone());
            }
        }
        if !current.pop() {
            return nearest_package;
        }
    }
}
