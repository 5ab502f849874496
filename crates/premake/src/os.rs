// Filesystem and process helpers used by the locator and the `os` library

use std::env;
use std::fs::{self, File};
use std::io::Read;

use crate::error::{HostError, HostResult};
use crate::path;

/// True when `path` names a regular file we can see. Missing entries,
/// directories and permission failures all read as "no".
pub fn is_file(path: &str) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

/// The current working directory, with '/' separators.
pub fn get_cwd() -> HostResult<String> {
    let cwd = env::current_dir().map_err(|e| HostError::io(".", e))?;
    Ok(path::translate(&cwd.to_string_lossy(), '/'))
}

pub fn chdir(dir: &str) -> HostResult<()> {
    env::set_current_dir(dir).map_err(|e| HostError::io(dir, e))
}

/// Compare a file's bytes against `contents` without loading the whole
/// file. A size mismatch is answered from the metadata alone.
pub fn compare_file(path: &str, contents: &[u8]) -> HostResult<bool> {
    let mut file = File::open(path).map_err(|e| HostError::io(path, e))?;
    let len = file
        .metadata()
        .map_err(|e| HostError::io(path, e))?
        .len();
    if len != contents.len() as u64 {
        return Ok(false);
    }

    let mut buffer = [0u8; 4096];
    let mut offset = 0;
    while offset < contents.len() {
        let read = file.read(&mut buffer).map_err(|e| HostError::io(path, e))?;
        if read == 0 {
            // file shrank underneath us
            return Ok(false);
        }
        let end = (offset + read).min(contents.len());
        if buffer[..end - offset] != contents[offset..end] {
            return Ok(false);
        }
        offset = end;
    }
    Ok(true)
}

/// Absolute path of the running executable. Falls back to resolving
/// `argv0` against the working directory, then against `PATH`.
pub fn locate_executable(argv0: &str) -> HostResult<String> {
    if let Ok(exe) = env::current_exe() {
        return path::normalize(&exe.to_string_lossy());
    }

    if path::is_absolute(argv0) || argv0.contains(path::is_separator) {
        return path::get_absolute(argv0, None);
    }

    if let Some(search) = env::var_os("PATH") {
        for dir in env::split_paths(&search) {
            let candidate = dir.join(argv0);
            if candidate.is_file() {
                return path::get_absolute(&candidate.to_string_lossy(), None);
            }
        }
    }

    path::get_absolute(argv0, None)
}
