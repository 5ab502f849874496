// Script loading
// Search-path aware replacements for `dofile` and `loadfile`, plus the
// package searcher that lets `require` find modules the same way. Every
// file executed through here is pushed onto the script stack for the
// duration of the call, and `_SCRIPT` / `_SCRIPT_DIR` follow the top.

use std::fs;
use std::rc::Rc;

use luars::LuaValue;
use luars::lua_vm::{LuaError, LuaResult, LuaState, LuaVM};
use tracing::{debug, trace};

use crate::context::{ScriptFrame, SharedContext};
use crate::error::HostError;
use crate::host::args::{check_string, opt_string, push_string, raise};
use crate::host::library::{INTERNAL_TABLE, LibraryTarget, NativeLibrary, global_table};
use crate::locate;
use crate::native_library;

pub const SCRIPT_GLOBAL: &str = "_SCRIPT";
pub const SCRIPT_DIR_GLOBAL: &str = "_SCRIPT_DIR";

/// Field of `_PREMAKE` holding the loader the module searcher hands to
/// `require`.
const MODULE_LOADER: &str = "_moduleLoader";

pub fn library() -> NativeLibrary {
    native_library!(LibraryTarget::Global, {
        "dofile" => do_file,
        "doFile" => do_file,
        "doFileOpt" => do_file_opt,
        "loadfile" => load_file_native,
        "loadFile" => load_file_native,
        "loadFileOpt" => load_file_opt,
        "forceRequire" => force_require,
    })
}

/// Result of loading a script by its logical name.
pub enum Loaded {
    Chunk { func: LuaValue, path: String },
    NotFound,
    /// The file was found but could not be read or compiled.
    Failed(String),
}

/// Resolve `name` as a script and compile it without running it.
pub fn load_file(
    l: &mut LuaState,
    ctx: &SharedContext,
    name: &str,
    mode: Option<&str>,
) -> LuaResult<Loaded> {
    let located = locate::locate_script(&ctx.borrow(), name);
    let Some(path) = located else {
        debug!(name, "script not found");
        return Ok(Loaded::NotFound);
    };

    Ok(match compile_file(l, &path, mode)? {
        Ok(func) => Loaded::Chunk { func, path },
        Err(message) => Loaded::Failed(message),
    })
}

/// Compile the file at `path` the same way the main script is compiled, so
/// chunk names and error messages match. Only text chunks are supported;
/// a `mode` without `t` rejects the file like `load` would.
pub fn compile_file(
    l: &mut LuaState,
    path: &str,
    mode: Option<&str>,
) -> LuaResult<Result<LuaValue, String>> {
    if let Some(mode) = mode.filter(|mode| !mode.contains('t')) {
        return Ok(Err(format!(
            "attempt to load a text chunk (mode is '{}')",
            mode
        )));
    }

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => return Ok(Err(HostError::io(path, e).to_string())),
    };

    match l.load_with_name(skip_shebang(&source), &format!("@{}", path)) {
        Ok(func) => {
            trace!(path, "compiled script");
            Ok(Ok(func))
        }
        Err(e @ LuaError::CompileError) => {
            let message = l.get_error_msg(e);
            if message.is_empty() {
                Ok(Err(format!("cannot load '{}'", path)))
            } else {
                Ok(Err(message))
            }
        }
        Err(e) => Err(e),
    }
}

/// A leading `#` line is ignored, keeping the newline so line numbers hold.
pub(crate) fn skip_shebang(source: &str) -> &str {
    if !source.starts_with('#') {
        return source;
    }
    match source.find('\n') {
        Some(i) => &source[i..],
        None => "",
    }
}

/// Call `func` as the script at `path`. The script stack is restored
/// whether the call succeeds or not. Errors propagate unprotected so the
/// traceback still sees the frames inside the script.
pub fn run_function(
    l: &mut LuaState,
    ctx: &SharedContext,
    func: LuaValue,
    path: &str,
    args: Vec<LuaValue>,
) -> LuaResult<Vec<LuaValue>> {
    let frame = ctx.borrow_mut().push_script(path).clone();
    debug!(script = %frame.file, dir = %frame.dir, "running script");
    publish_script(l, Some(&frame))?;

    let outcome = l.call(func, args);

    let previous = {
        let mut ctx = ctx.borrow_mut();
        ctx.pop_script();
        ctx.current_script().cloned()
    };
    match outcome {
        Ok(results) => {
            publish_script(l, previous.as_ref())?;
            Ok(results)
        }
        Err(e) => {
            // the pending error wins over a failure to restore the globals
            let _ = publish_script(l, previous.as_ref());
            Err(e)
        }
    }
}

fn publish_script(l: &mut LuaState, frame: Option<&ScriptFrame>) -> LuaResult<()> {
    let (file, dir) = match frame {
        Some(frame) => (l.create_string(&frame.file)?, l.create_string(&frame.dir)?),
        None => (LuaValue::nil(), LuaValue::nil()),
    };
    l.set_global(SCRIPT_GLOBAL, file)?;
    l.set_global(SCRIPT_DIR_GLOBAL, dir)
}

fn push_results(l: &mut LuaState, results: Vec<LuaValue>) -> LuaResult<usize> {
    let count = results.len();
    for value in results {
        l.push_value(value)?;
    }
    Ok(count)
}

fn push_failure(l: &mut LuaState, message: &str) -> LuaResult<usize> {
    l.push_value(LuaValue::nil())?;
    push_string(l, message)?;
    Ok(2)
}

fn run_loaded(
    l: &mut LuaState,
    ctx: &SharedContext,
    name: String,
    loaded: Loaded,
) -> LuaResult<usize> {
    match loaded {
        Loaded::Chunk { func, path } => {
            let results = run_function(l, ctx, func, &path, Vec::new())?;
            push_results(l, results)
        }
        Loaded::NotFound => Err(raise(l, HostError::ScriptNotFound(name))),
        Loaded::Failed(message) => Err(l.error(message)),
    }
}

// doFile(name) -> ...
fn do_file(l: &mut LuaState, ctx: &SharedContext) -> LuaResult<usize> {
    let name = check_string(l, 1, "doFile")?;
    let loaded = load_file(l, ctx, &name, None)?;
    run_loaded(l, ctx, name, loaded)
}

// doFileOpt(name) -> ...; nothing when the script does not exist
fn do_file_opt(l: &mut LuaState, ctx: &SharedContext) -> LuaResult<usize> {
    let name = check_string(l, 1, "doFileOpt")?;
    match load_file(l, ctx, &name, None)? {
        Loaded::NotFound => Ok(0),
        loaded => run_loaded(l, ctx, name, loaded),
    }
}

// loadFile(name [, mode]) -> function | nil, message
fn load_file_native(l: &mut LuaState, ctx: &SharedContext) -> LuaResult<usize> {
    let name = check_string(l, 1, "loadFile")?;
    let mode = opt_string(l, 2);
    match load_file(l, ctx, &name, mode.as_deref())? {
        Loaded::Chunk { func, .. } => {
            l.push_value(func)?;
            Ok(1)
        }
        Loaded::NotFound => push_failure(l, &HostError::ScriptNotFound(name).to_string()),
        Loaded::Failed(message) => push_failure(l, &message),
    }
}

// loadFileOpt(name [, mode]) -> function | nil, message | nothing
fn load_file_opt(l: &mut LuaState, ctx: &SharedContext) -> LuaResult<usize> {
    let name = check_string(l, 1, "loadFileOpt")?;
    let mode = opt_string(l, 2);
    match load_file(l, ctx, &name, mode.as_deref())? {
        Loaded::Chunk { func, .. } => {
            l.push_value(func)?;
            Ok(1)
        }
        Loaded::NotFound => Ok(0),
        Loaded::Failed(message) => push_failure(l, &message),
    }
}

// forceRequire(name): run a module even if it was loaded before
fn force_require(l: &mut LuaState, ctx: &SharedContext) -> LuaResult<usize> {
    let name = check_string(l, 1, "forceRequire")?;
    let located = locate::locate_module(&ctx.borrow(), &name);
    let Some(path) = located else {
        return Err(raise(l, HostError::ModuleNotFound(name)));
    };

    match compile_file(l, &path, None)? {
        Ok(func) => {
            run_function(l, ctx, func, &path, Vec::new())?;
            Ok(0)
        }
        Err(message) => Err(l.error(message)),
    }
}

// package searcher: name -> loader, path | message
fn search_module(l: &mut LuaState, ctx: &SharedContext) -> LuaResult<usize> {
    let name = check_string(l, 1, "searcher")?;
    let located = locate::locate_module(&ctx.borrow(), &name);
    let Some(path) = located else {
        push_string(l, &format!("no file '{}' on the script search path", name))?;
        return Ok(1);
    };

    let internal = l.get_global(INTERNAL_TABLE)?.filter(|v| v.is_table());
    let key = l.create_string(MODULE_LOADER)?;
    let loader = internal
        .and_then(|table| l.raw_get(&table, &key))
        .filter(|v| !v.is_nil());
    let Some(loader) = loader else {
        return Err(l.error("module loader is not installed".to_string()));
    };

    l.push_value(loader)?;
    push_string(l, &path)?;
    Ok(2)
}

// module loader, called by require with (name, path)
fn load_module(l: &mut LuaState, ctx: &SharedContext) -> LuaResult<usize> {
    let name = check_string(l, 1, "moduleLoader")?;
    let path = check_string(l, 2, "moduleLoader")?;

    let func = match compile_file(l, &path, None)? {
        Ok(func) => func,
        Err(message) => {
            return Err(l.error(format!(
                "error loading module '{}' from file '{}':\n\t{}",
                name, path, message
            )));
        }
    };

    let args = vec![l.create_string(&name)?, l.create_string(&path)?];
    let results = run_function(l, ctx, func, &path, args)?;
    l.push_value(results.first().copied().unwrap_or_else(LuaValue::nil))?;
    Ok(1)
}

/// Put the host's module searcher in front of the runtime's own, so
/// `require` consults the script search path first.
pub fn install_searcher(vm: &mut LuaVM, ctx: &SharedContext) -> LuaResult<()> {
    let loader_ctx = Rc::clone(ctx);
    let loader = vm.create_closure(move |state: &mut LuaState| -> LuaResult<usize> {
        load_module(state, &loader_ctx)
    })?;
    let internal = global_table(vm, INTERNAL_TABLE)?;
    let key = vm.create_string(MODULE_LOADER)?;
    vm.raw_set(&internal, key, loader);

    let searcher_ctx = Rc::clone(ctx);
    let searcher = vm.create_closure(move |state: &mut LuaState| -> LuaResult<usize> {
        search_module(state, &searcher_ctx)
    })?;
    let install = vm.load_with_name(
        "local searcher = ...\ntable.insert(package.searchers, 1, searcher)",
        "=premake",
    )?;
    vm.call::<_, ()>(install, vec![searcher])
}
