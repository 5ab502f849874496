// File location
// Resolve logical script and module names against the search path. The
// first (directory, pattern) pair naming an existing file wins, with the
// directory order taking precedence over the pattern order.

use tracing::{debug, trace};

use crate::context::HostContext;
use crate::os;
use crate::path;

pub const SCRIPT_EXTENSION: &str = ".lua";
pub const MODULE_INIT_NAME: &str = "_init";

/// Script candidates: the name as given, then with the script extension.
pub const SCRIPT_PATTERNS: &[Pattern<'static>] = &[Pattern("?"), Pattern("?.lua")];

/// Module candidates: `<name>.lua`, then the package form `<name>/_init.lua`.
pub const MODULE_PATTERNS: &[Pattern<'static>] = &[Pattern("?.lua"), Pattern("?/_init.lua")];

/// A file name template; the first `?` is replaced by the name looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern<'a>(pub &'a str);

impl Pattern<'_> {
    pub fn render(&self, name: &str) -> String {
        self.0.replacen('?', name, 1)
    }
}

/// Search `dirs` for the first file matching one of `patterns`.
pub fn locate<I, S>(name: &str, dirs: I, patterns: &[Pattern<'_>]) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for dir in dirs {
        let dir = dir.as_ref();
        for pattern in patterns {
            let Ok(candidate) = path::join([dir, pattern.render(name).as_str()]) else {
                continue;
            };
            if os::is_file(&candidate) {
                debug!(name, path = %candidate, "located file");
                return Some(candidate);
            }
            trace!(name, candidate = %candidate, "no file");
        }
    }
    None
}

/// Resolve a script name. Absolute names and names that exist relative to
/// the working directory are used directly; anything else is searched for.
pub fn locate_script(ctx: &HostContext, name: &str) -> Option<String> {
    if path::is_absolute(name) {
        return locate(name, [""], SCRIPT_PATTERNS);
    }

    if os::is_file(name) {
        return Some(name.to_string());
    }

    locate(name, ctx.search_directories(), SCRIPT_PATTERNS)
}

/// Resolve a module name against the search path. Dots in the name are kept
/// as-is: `a.b` looks for `a.b.lua`, not `a/b.lua`.
pub fn locate_module(ctx: &HostContext, name: &str) -> Option<String> {
    locate(name, ctx.search_directories(), MODULE_PATTERNS)
}
