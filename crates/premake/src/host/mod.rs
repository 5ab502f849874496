// Host bootstrap
// Owns the runtime and the shared context, publishes the native libraries
// and runs the main script followed by its entry point.

mod args;
pub mod library;
pub mod libs;
pub mod loader;

use std::fs;

use luars::lua_vm::{LuaError, LuaResult, LuaVM};
use luars::{LuaValue, Stdlib};
use tracing::{debug, info, warn};

use crate::config::HostConfig;
use crate::context::{HostContext, ScriptFrame, SharedContext};
use crate::error::{HostError, HostResult, ScriptError};
use crate::locate;
use crate::option;
use crate::os;
use crate::path;
use crate::search_path::{SearchPath, SearchPathSources};

use self::args::value_to_string;
use self::library::INTERNAL_TABLE;
use self::loader::{SCRIPT_DIR_GLOBAL, SCRIPT_GLOBAL};

pub const USER_HOME_GLOBAL: &str = "_USER_HOME_DIR";
pub const ARGS_GLOBAL: &str = "_ARGS";

/// Receives the message and, for runtime errors, the traceback of a fatal
/// script error.
pub type ErrorHandler = Box<dyn Fn(&str, Option<&str>)>;

// Calls its argument under xpcall; failures come back as
// false, { message = ..., traceback = ... }
const RUNNER: &str = "\
local fn = ...
return xpcall(fn, function(err)
    local message = tostring(err)
    return { message = message, traceback = debug.traceback(message, 2) }
end)";

pub struct Premake {
    vm: Box<LuaVM>,
    ctx: SharedContext,
    config: HostConfig,
    on_error: ErrorHandler,
}

impl Premake {
    pub fn new(
        config: HostConfig,
        on_error: impl Fn(&str, Option<&str>) + 'static,
    ) -> HostResult<Self> {
        config.validate()?;
        let mut vm = LuaVM::new(config.safe_option.clone());
        let ctx = HostContext::default().shared();

        if let Err(e) = Self::install(&mut vm, &ctx, &config) {
            return Err(runtime_error(&mut vm, e));
        }
        debug!(home = %config.home_dir, "runtime initialized");

        Ok(Premake {
            vm,
            ctx,
            config,
            on_error: Box::new(on_error),
        })
    }

    /// Create the host and execute `argv` with it. A host that cannot be
    /// created is reported to `on_error` like any other failure, and
    /// gives -1.
    pub fn launch(
        config: HostConfig,
        argv: &[String],
        on_error: impl Fn(&str, Option<&str>) + Clone + 'static,
    ) -> i32 {
        match Premake::new(config, on_error.clone()) {
            Ok(mut premake) => premake.execute(argv),
            Err(e) => {
                let (message, traceback) = e.report();
                debug!(%message, "cannot create host");
                on_error(&message, traceback);
                -1
            }
        }
    }

    fn install(vm: &mut LuaVM, ctx: &SharedContext, config: &HostConfig) -> LuaResult<()> {
        vm.open_stdlib(Stdlib::All)?;

        let home = vm.create_string(&config.home_dir)?;
        vm.set_global(USER_HOME_GLOBAL, home)?;

        // run metadata and the internal halves of the scripted modules
        let internal = vm.create_table(0, 8)?;
        vm.set_global(INTERNAL_TABLE, internal)?;

        loader::library().register(vm, ctx)?;
        for library in libs::libraries() {
            library.register(vm, ctx)?;
        }
        loader::install_searcher(vm, ctx)
    }

    /// The embedded runtime, for callers that want to extend it before
    /// `execute` runs.
    pub fn runtime(&mut self) -> &mut LuaVM {
        &mut self.vm
    }

    pub fn context(&self) -> &SharedContext {
        &self.ctx
    }

    /// Run the main script and its entry point with the full command line
    /// (`argv[0]` first). Returns the entry point's exit code; any failure
    /// is passed to the error handler and reported as -1.
    pub fn execute(&mut self, argv: &[String]) -> i32 {
        match self.run(argv) {
            Ok(code) => {
                debug!(code, "entry point returned");
                code
            }
            Err(e) => {
                let (message, traceback) = e.report();
                debug!(%message, "run failed");
                (self.on_error)(&message, traceback);
                -1
            }
        }
    }

    fn run(&mut self, argv: &[String]) -> HostResult<i32> {
        let (argv0, args) = match argv.split_first() {
            Some((argv0, args)) => (argv0.as_str(), args),
            None => ("", argv),
        };

        let args_result = self.publish_args(args);
        self.check(args_result)?;

        let command_dir = self.publish_command(argv0)?;
        self.set_search_path(args, command_dir)?;

        let main_script = self.config.main_script.clone();
        let (func, path) = self.load_main_script(&main_script)?;
        self.run_script(func, &path)?;
        self.call_entry_point()
    }

    fn check<T>(&mut self, result: LuaResult<T>) -> HostResult<T> {
        result.map_err(|e| runtime_error(&mut self.vm, e))
    }

    fn set_internal(&mut self, key: &str, value: LuaValue) -> LuaResult<()> {
        let internal = library::global_table(&mut self.vm, INTERNAL_TABLE)?;
        let key = self.vm.create_string(key)?;
        self.vm.raw_set(&internal, key, value);
        Ok(())
    }

    fn string_table<'a>(
        &mut self,
        items: impl IntoIterator<Item = &'a str>,
    ) -> LuaResult<LuaValue> {
        let table = self.vm.create_table(0, 0)?;
        for (i, item) in items.into_iter().enumerate() {
            let value = self.vm.create_string(item)?;
            self.vm.raw_seti(&table, (i + 1) as i64, value);
        }
        Ok(table)
    }

    fn publish_args(&mut self, args: &[String]) -> LuaResult<()> {
        self.ctx.borrow_mut().set_args(args.to_vec());
        let table = self.string_table(args.iter().map(String::as_str))?;
        self.vm.set_global(ARGS_GLOBAL, table)
    }

    /// `_PREMAKE.COMMAND` and `_PREMAKE.COMMAND_DIR`; returns the latter.
    fn publish_command(&mut self, argv0: &str) -> HostResult<String> {
        let command = os::locate_executable(argv0).unwrap_or_else(|e| {
            warn!(argv0, error = %e, "cannot locate the running executable");
            argv0.to_string()
        });
        let command_dir = path::get_directory(&command).to_string();
        debug!(%command, %command_dir, "located executable");

        let result = (|| {
            let value = self.vm.create_string(&command)?;
            self.set_internal("COMMAND", value)?;
            let value = self.vm.create_string(&command_dir)?;
            self.set_internal("COMMAND_DIR", value)
        })();
        self.check(result)?;
        Ok(command_dir)
    }

    /// Build the search path into the context and publish its fixed
    /// entries as `_PREMAKE.PATH`.
    fn set_search_path(&mut self, args: &[String], command_dir: String) -> HostResult<()> {
        let sources = SearchPathSources {
            scripts_option: option::get_option_value("scripts", args).map(str::to_string),
            env_path: self.config.env_search_path.clone(),
            home_dir: self.config.home_dir.clone(),
            executable_dir: Some(command_dir).filter(|dir| !dir.is_empty()),
        };
        let search_path = SearchPath::build(&sources);

        let snapshot: Vec<String> = search_path
            .static_directories()
            .map(str::to_string)
            .collect();
        self.ctx.borrow_mut().set_search_path(search_path);

        let result = self
            .string_table(snapshot.iter().map(String::as_str))
            .and_then(|table| self.set_internal("PATH", table));
        self.check(result)
    }

    fn load_main_script(&mut self, name: &str) -> HostResult<(LuaValue, String)> {
        let located = locate::locate_script(&self.ctx.borrow(), name);
        let path = located.ok_or_else(|| HostError::ScriptNotFound(name.to_string()))?;
        info!(script = %path, "loading main script");

        let source = fs::read_to_string(&path).map_err(|e| HostError::io(&path, e))?;
        let chunk_name = format!("@{}", path);
        match self.vm.load_with_name(loader::skip_shebang(&source), &chunk_name) {
            Ok(func) => Ok((func, path)),
            Err(e) => {
                let message = self.vm.into_full_error(e).message().to_string();
                Err(ScriptError::Load { message }.into())
            }
        }
    }

    fn publish_script(&mut self, frame: Option<&ScriptFrame>) -> HostResult<()> {
        let result = (|| {
            let (file, dir) = match frame {
                Some(frame) => (
                    self.vm.create_string(&frame.file)?,
                    self.vm.create_string(&frame.dir)?,
                ),
                None => (LuaValue::nil(), LuaValue::nil()),
            };
            self.vm.set_global(SCRIPT_GLOBAL, file)?;
            self.vm.set_global(SCRIPT_DIR_GLOBAL, dir)
        })();
        self.check(result)
    }

    /// Run a compiled script with its frame on the script stack.
    fn run_script(&mut self, func: LuaValue, path: &str) -> HostResult<Vec<LuaValue>> {
        let frame = self.ctx.borrow_mut().push_script(path).clone();
        self.publish_script(Some(&frame))?;

        let outcome = self.protected_call(func);

        let previous = {
            let mut ctx = self.ctx.borrow_mut();
            ctx.pop_script();
            ctx.current_script().cloned()
        };
        self.publish_script(previous.as_ref())?;
        outcome
    }

    fn call_entry_point(&mut self) -> HostResult<i32> {
        let entry_point = self.config.entry_point.clone();
        let lookup = self.vm.get_global(&entry_point);
        let func = self
            .check(lookup)?
            .filter(|v| !v.is_nil())
            .ok_or(HostError::MissingEntryPoint(entry_point))?;

        let results = self.protected_call(func)?;
        Ok(results.first().map(exit_code).unwrap_or(0))
    }

    /// Call `func` through the xpcall runner, turning a failure into a
    /// runtime error carrying the traceback.
    fn protected_call(&mut self, func: LuaValue) -> HostResult<Vec<LuaValue>> {
        let result = self
            .vm
            .load_with_name(RUNNER, "=premake")
            .and_then(|runner| self.vm.call::<_, Vec<LuaValue>>(runner, vec![func]));
        let mut results = self.check(result)?;

        let succeeded = results.first().and_then(|v| v.as_boolean()).unwrap_or(false);
        if succeeded {
            results.remove(0);
            return Ok(results);
        }

        let report = results.get(1).copied().unwrap_or_else(LuaValue::nil);
        Err(self.script_error(report).into())
    }

    fn script_error(&mut self, report: LuaValue) -> ScriptError {
        if !report.is_table() {
            return ScriptError::Runtime {
                message: value_to_string(&report).unwrap_or_else(|| "unknown error".to_string()),
                traceback: None,
            };
        }

        let mut field = |name: &str| {
            let key = self.vm.create_string(name).ok()?;
            self.vm
                .raw_get(&report, &key)
                .as_ref()
                .and_then(value_to_string)
        };
        let message = field("message").unwrap_or_else(|| "unknown error".to_string());
        let traceback = field("traceback");
        ScriptError::Runtime { message, traceback }
    }
}

fn exit_code(value: &LuaValue) -> i32 {
    if let Some(code) = value.as_integer() {
        code as i32
    } else {
        value.as_number().map(|n| n as i32).unwrap_or(0)
    }
}

fn runtime_error(vm: &mut LuaVM, e: LuaError) -> HostError {
    HostError::Runtime(vm.into_full_error(e).message().to_string())
}
