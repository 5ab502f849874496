// Native halves of the `os`, `string`, `path` and `premake` libraries
// `os` and `string` are extended in place; `path` and `premake` are
// published under `_PREMAKE` for the scripted side of those modules to
// pick up.

use luars::LuaValue;
use luars::lua_vm::{LuaResult, LuaState};

use crate::context::SharedContext;
use crate::host::args::{
    check_string, check_string_arg, opt_string, push_string, push_string_arg, raise,
    value_to_string,
};
use crate::host::library::{LibraryTarget, NativeLibrary};
use crate::locate;
use crate::native_library;
use crate::option;
use crate::os;
use crate::path::{self, PATH_MAX};
use crate::strings::{self, StringArg};
use crate::wildcard;

pub fn libraries() -> Vec<NativeLibrary> {
    vec![
        native_library!(LibraryTarget::Extend("os"), {
            "chdir" => os_chdir,
            "getCwd" => os_get_cwd,
            "isFile" => os_is_file,
            "compareFile" => os_compare_file,
        }),
        native_library!(LibraryTarget::Extend("string"), {
            "startsWith" => string_starts_with,
            "contains" => string_contains,
            "join" => string_join,
            "hash" => string_hash,
            "patternFromWildcards" => pattern_from_wildcards,
        }),
        native_library!(LibraryTarget::Internal("path"), {
            "getAbsolute" => path_get_absolute,
            "getBaseName" => path_get_base_name,
            "getDirectory" => path_get_directory,
            "getKind" => path_get_kind,
            "getName" => path_get_name,
            "getRelative" => path_get_relative,
            "getRelativeFile" => path_get_relative_file,
            "isAbsolute" => path_is_absolute,
            "join" => path_join,
            "normalize" => path_normalize,
            "translate" => path_translate,
        }),
        native_library!(LibraryTarget::Internal("premake"), {
            "locateScript" => premake_locate_script,
            "locateModule" => premake_locate_module,
            "getOptionValue" => premake_get_option_value,
            "searchPath" => premake_search_path,
            "patternFromWildcards" => pattern_from_wildcards,
        }),
    ]
}

fn push_bool(l: &mut LuaState, value: bool) -> LuaResult<usize> {
    l.push_value(LuaValue::boolean(value))?;
    Ok(1)
}

fn push_str(l: &mut LuaState, value: &str) -> LuaResult<usize> {
    push_string(l, value)?;
    Ok(1)
}

fn push_opt_str(l: &mut LuaState, value: Option<&str>) -> LuaResult<usize> {
    match value {
        Some(value) => push_str(l, value),
        None => Ok(0),
    }
}

// ===== os =====

// os.chdir(dir) -> true | nil, message
fn os_chdir(l: &mut LuaState, _ctx: &SharedContext) -> LuaResult<usize> {
    let dir = check_string(l, 1, "chdir")?;
    match os::chdir(&dir) {
        Ok(()) => push_bool(l, true),
        Err(_) => {
            l.push_value(LuaValue::nil())?;
            push_string(l, &format!("unable to switch to directory '{}'", dir))?;
            Ok(2)
        }
    }
}

fn os_get_cwd(l: &mut LuaState, _ctx: &SharedContext) -> LuaResult<usize> {
    match os::get_cwd() {
        Ok(cwd) => push_str(l, &cwd),
        Err(_) => Ok(0),
    }
}

fn os_is_file(l: &mut LuaState, _ctx: &SharedContext) -> LuaResult<usize> {
    let file = check_string(l, 1, "isFile")?;
    push_bool(l, os::is_file(&file))
}

// os.compareFile(path, contents) -> true when the file holds exactly `contents`
fn os_compare_file(l: &mut LuaState, _ctx: &SharedContext) -> LuaResult<usize> {
    let file = check_string(l, 1, "compareFile")?;
    let contents = check_string(l, 2, "compareFile")?;
    match os::compare_file(&file, contents.as_bytes()) {
        Ok(same) => push_bool(l, same),
        Err(e) => Err(raise(l, e)),
    }
}

// ===== string =====

// string.startsWith(s, prefix | { prefixes }) -> boolean
fn string_starts_with(l: &mut LuaState, _ctx: &SharedContext) -> LuaResult<usize> {
    let Some(haystack) = opt_string(l, 1) else {
        return Ok(0);
    };
    if l.get_arg(2).is_none_or(|v| v.is_nil()) {
        return Ok(0);
    }
    let needles = check_string_arg(l, 2, "startsWith")?;
    push_bool(l, strings::starts_with_any(&haystack, &needles).is_some())
}

fn string_contains(l: &mut LuaState, _ctx: &SharedContext) -> LuaResult<usize> {
    let haystack = check_string(l, 1, "contains")?;
    let needles = check_string_arg(l, 2, "contains")?;
    push_bool(l, strings::contains_any(&haystack, &needles).is_some())
}

// string.join(separator, ...) -> joined values; non-string values are skipped
fn string_join(l: &mut LuaState, _ctx: &SharedContext) -> LuaResult<usize> {
    let separator = check_string(l, 1, "join")?;
    if l.arg_count() < 2 {
        return Ok(0);
    }
    let values: Vec<String> = (2..=l.arg_count())
        .filter_map(|i| l.get_arg(i))
        .filter_map(|v| value_to_string(&v))
        .collect();
    push_str(l, &values.join(&separator))
}

fn string_hash(l: &mut LuaState, _ctx: &SharedContext) -> LuaResult<usize> {
    let value = check_string(l, 1, "hash")?;
    let seed = l.get_arg(2).and_then(|v| v.as_integer()).unwrap_or(0);
    let hash = strings::hash(&value, seed as u32);
    l.push_value(LuaValue::integer(hash as i64))?;
    Ok(1)
}

fn pattern_from_wildcards(l: &mut LuaState, _ctx: &SharedContext) -> LuaResult<usize> {
    let value = check_string(l, 1, "patternFromWildcards")?;
    match wildcard::pattern_from_wildcards(&value, PATH_MAX) {
        Ok(pattern) => push_str(l, &pattern),
        Err(e) => Err(raise(l, e)),
    }
}

// ===== path =====

// path.getAbsolute(path | { paths } [, relativeTo])
fn path_get_absolute(l: &mut LuaState, _ctx: &SharedContext) -> LuaResult<usize> {
    let relative_to = opt_string(l, 2);
    let paths = check_string_arg(l, 1, "getAbsolute")?;
    match paths.try_map(|p| path::get_absolute(p, relative_to.as_deref())) {
        Ok(result) => {
            push_string_arg(l, &result)?;
            Ok(1)
        }
        Err(e) => Err(raise(l, e)),
    }
}

fn path_get_base_name(l: &mut LuaState, _ctx: &SharedContext) -> LuaResult<usize> {
    let value = check_string(l, 1, "getBaseName")?;
    push_str(l, path::get_base_name(&value))
}

fn path_get_directory(l: &mut LuaState, _ctx: &SharedContext) -> LuaResult<usize> {
    let value = check_string(l, 1, "getDirectory")?;
    push_str(l, path::get_directory(&value))
}

fn path_get_kind(l: &mut LuaState, _ctx: &SharedContext) -> LuaResult<usize> {
    let value = check_string(l, 1, "getKind")?;
    push_str(l, path::kind(&value).as_str())
}

fn path_get_name(l: &mut LuaState, _ctx: &SharedContext) -> LuaResult<usize> {
    let value = check_string(l, 1, "getName")?;
    push_str(l, path::get_file_name(&value))
}

fn path_get_relative(l: &mut LuaState, _ctx: &SharedContext) -> LuaResult<usize> {
    let base = check_string(l, 1, "getRelative")?;
    let target = check_string(l, 2, "getRelative")?;
    match path::get_relative(&base, &target) {
        Ok(relative) => push_str(l, &relative),
        Err(e) => Err(raise(l, e)),
    }
}

fn path_get_relative_file(l: &mut LuaState, _ctx: &SharedContext) -> LuaResult<usize> {
    let base = check_string(l, 1, "getRelativeFile")?;
    let target = check_string(l, 2, "getRelativeFile")?;
    match path::get_relative_file(&base, &target) {
        Ok(relative) => push_str(l, &relative),
        Err(e) => Err(raise(l, e)),
    }
}

fn path_is_absolute(l: &mut LuaState, _ctx: &SharedContext) -> LuaResult<usize> {
    let value = check_string(l, 1, "isAbsolute")?;
    push_bool(l, path::is_absolute(&value))
}

// path.join(...) -> joined path; nil parts are skipped
fn path_join(l: &mut LuaState, _ctx: &SharedContext) -> LuaResult<usize> {
    let mut parts = Vec::new();
    for i in 1..=l.arg_count() {
        if l.get_arg(i).is_none_or(|v| v.is_nil()) {
            continue;
        }
        parts.push(check_string(l, i, "join")?);
    }
    match path::join(&parts) {
        Ok(joined) => push_str(l, &joined),
        Err(e) => Err(raise(l, e)),
    }
}

fn path_normalize(l: &mut LuaState, _ctx: &SharedContext) -> LuaResult<usize> {
    let value = check_string(l, 1, "normalize")?;
    match path::normalize(&value) {
        Ok(normalized) => push_str(l, &normalized),
        Err(e) => Err(raise(l, e)),
    }
}

// path.translate(path | { paths } [, separator]); separator defaults to '\'
fn path_translate(l: &mut LuaState, _ctx: &SharedContext) -> LuaResult<usize> {
    let separator = opt_string(l, 2)
        .and_then(|s| s.chars().next())
        .unwrap_or('\\');
    let paths = check_string_arg(l, 1, "translate")?;
    push_string_arg(l, &paths.map(|p| path::translate(p, separator)))?;
    Ok(1)
}

// ===== premake =====

// premake.locateScript(name | { names }) -> first path found | nothing
fn premake_locate_script(l: &mut LuaState, ctx: &SharedContext) -> LuaResult<usize> {
    let names = check_string_arg(l, 1, "locateScript")?;
    let located = {
        let ctx = ctx.borrow();
        names.iter().find_map(|name| locate::locate_script(&ctx, name))
    };
    push_opt_str(l, located.as_deref())
}

fn premake_locate_module(l: &mut LuaState, ctx: &SharedContext) -> LuaResult<usize> {
    let name = check_string(l, 1, "locateModule")?;
    let located = locate::locate_module(&ctx.borrow(), &name);
    push_opt_str(l, located.as_deref())
}

// premake.getOptionValue(flag) -> value from the command line | nothing
fn premake_get_option_value(l: &mut LuaState, ctx: &SharedContext) -> LuaResult<usize> {
    let flag = check_string(l, 1, "getOptionValue")?;
    let value = {
        let ctx = ctx.borrow();
        option::get_option_value(&flag, ctx.args()).map(str::to_string)
    };
    push_opt_str(l, value.as_deref())
}

// premake.searchPath() -> { directories }, resolved for the running script
fn premake_search_path(l: &mut LuaState, ctx: &SharedContext) -> LuaResult<usize> {
    let directories = ctx.borrow().search_directories();
    push_string_arg(l, &StringArg::List(directories))?;
    Ok(1)
}
