// Path utilities
// Pure string transforms over '/' and '\' separated paths. Results are
// bounded by PATH_MAX and fail instead of truncating.

use crate::error::{HostError, HostResult};
use crate::os;

/// Longest path, in bytes, the host will produce (exclusive).
pub const PATH_MAX: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Unknown,
    Absolute,
    Relative,
}

impl PathKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PathKind::Unknown => "unknown",
            PathKind::Absolute => "absolute",
            PathKind::Relative => "relative",
        }
    }
}

#[inline]
pub fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// True for `/x`, `\x`, `\\server`, `//server` and `C:` style paths,
/// whatever the host platform is.
pub fn is_absolute(path: &str) -> bool {
    match path.as_bytes() {
        [b'/' | b'\\', ..] => true,
        [drive, b':', ..] => drive.is_ascii_alphabetic(),
        _ => false,
    }
}

pub fn kind(path: &str) -> PathKind {
    if path.is_empty() {
        PathKind::Unknown
    } else if is_absolute(path) {
        PathKind::Absolute
    } else {
        PathKind::Relative
    }
}

fn bounded(path: String) -> HostResult<String> {
    if path.len() >= PATH_MAX {
        Err(HostError::PathTooLong { max: PATH_MAX })
    } else {
        Ok(path)
    }
}

/// Concatenate path parts. Empty parts are skipped and an absolute part
/// discards everything before it. The result is not normalized.
pub fn join<I, S>(parts: I) -> HostResult<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut result = String::new();
    for part in parts {
        let part = part.as_ref();
        if part.is_empty() {
            continue;
        }

        if is_absolute(part) {
            result.clear();
        } else if !result.is_empty() && !result.ends_with(is_separator) {
            result.push('/');
        }
        result.push_str(part);

        if result.len() >= PATH_MAX {
            return Err(HostError::PathTooLong { max: PATH_MAX });
        }
    }
    Ok(result)
}

/// Replace every '/' and '\' with `separator`.
pub fn translate(path: &str, separator: char) -> String {
    path.chars()
        .map(|c| if is_separator(c) { separator } else { c })
        .collect()
}

pub fn translate_in_place(path: &mut String, separator: char) {
    if path.contains(|c: char| is_separator(c) && c != separator) {
        *path = translate(path, separator);
    }
}

/// Everything before the last separator. A path without separators has no
/// directory; the parent of a root entry is the root itself.
pub fn get_directory(path: &str) -> &str {
    match path.rfind(is_separator) {
        None => "",
        Some(0) => &path[..1],
        Some(i) if i == 2 && path.as_bytes()[1] == b':' => &path[..=i],
        Some(i) => &path[..i],
    }
}

pub fn get_file_name(path: &str) -> &str {
    match path.rfind(is_separator) {
        Some(i) => &path[i + 1..],
        None => path,
    }
}

/// File name without its last extension.
pub fn get_base_name(path: &str) -> &str {
    let name = get_file_name(path);
    match name.rfind('.') {
        Some(i) if i > 0 => &name[..i],
        _ => name,
    }
}

/// Split a path into its root ("/", "//", "C:/", "C:" or "") and the rest.
fn split_root(path: &str) -> (&str, &str) {
    let bytes = path.as_bytes();
    match bytes {
        [a, b, ..] if is_separator(*a as char) && is_separator(*b as char) => path.split_at(2),
        [a, ..] if is_separator(*a as char) => path.split_at(1),
        [drive, b':', sep, ..] if drive.is_ascii_alphabetic() && is_separator(*sep as char) => {
            path.split_at(3)
        }
        [drive, b':', ..] if drive.is_ascii_alphabetic() => path.split_at(2),
        _ => ("", path),
    }
}

/// Collapse "." and ".." segments and repeated separators; output uses '/'.
/// ".." segments that would climb above the root are dropped for absolute
/// paths and kept for relative ones.
pub fn normalize(path: &str) -> HostResult<String> {
    let (root, rest) = split_root(path);

    let mut parts: Vec<&str> = Vec::new();
    for part in rest.split(is_separator) {
        match part {
            "" | "." => {}
            ".." => match parts.last() {
                Some(last) if *last != ".." => {
                    parts.pop();
                }
                _ if root.is_empty() => parts.push(".."),
                _ => {}
            },
            _ => parts.push(part),
        }
    }

    let mut result = translate(root, '/');
    result.push_str(&parts.join("/"));
    if result.is_empty() {
        result.push('.');
    }
    bounded(result)
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty() && *s != ".").collect()
}

/// Path that leads from directory `base` to `target`. When the two do not
/// share a root the normalized target is returned as-is.
pub fn get_relative(base: &str, target: &str) -> HostResult<String> {
    let base = normalize(base)?;
    let target = normalize(target)?;

    let (base_root, base_rest) = split_root(&base);
    let (target_root, target_rest) = split_root(&target);
    if !base_root.eq_ignore_ascii_case(target_root) {
        return Ok(target);
    }

    let base_parts = segments(base_rest);
    let target_parts = segments(target_rest);
    let common = base_parts
        .iter()
        .zip(&target_parts)
        .take_while(|(a, b)| a == b)
        .count();

    // can't walk back out of a ".." we don't know the name of
    if base_parts[common..].contains(&"..") {
        return Ok(target);
    }

    let mut parts = vec![".."; base_parts.len() - common];
    parts.extend_from_slice(&target_parts[common..]);
    if parts.is_empty() {
        Ok(".".to_string())
    } else {
        bounded(parts.join("/"))
    }
}

/// Like `get_relative`, but both arguments name files.
pub fn get_relative_file(base_file: &str, target_file: &str) -> HostResult<String> {
    get_relative(get_directory(base_file), target_file)
}

/// Make `path` absolute against `relative_to`, or against the current
/// working directory when no base is given.
pub fn get_absolute(path: &str, relative_to: Option<&str>) -> HostResult<String> {
    if is_absolute(path) {
        return normalize(path);
    }

    let base = match relative_to {
        Some(dir) if is_absolute(dir) => dir.to_string(),
        Some(dir) => join([os::get_cwd()?.as_str(), dir])?,
        None => os::get_cwd()?,
    };
    normalize(&join([base.as_str(), path])?)
}
