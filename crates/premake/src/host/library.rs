// Native library registration
// Native functions are plain fn pointers taking the shared host context;
// registration wraps each one in a closure that carries the context.

use std::rc::Rc;

use luars::LuaValue;
use luars::lua_vm::{LuaResult, LuaState, LuaVM};

use crate::context::SharedContext;

pub type NativeFunction = fn(&mut LuaState, &SharedContext) -> LuaResult<usize>;

/// Global table holding the host's internal libraries and run metadata.
pub const INTERNAL_TABLE: &str = "_PREMAKE";

/// Where a library's functions end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryTarget {
    /// Plain globals, e.g. `doFile`.
    Global,
    /// Added to an existing global table, e.g. `string`.
    Extend(&'static str),
    /// A fresh table stored as `_PREMAKE.<name>`, picked up later by the
    /// scripted half of the module.
    Internal(&'static str),
}

pub struct NativeLibrary {
    pub target: LibraryTarget,
    pub entries: Vec<(&'static str, NativeFunction)>,
}

#[macro_export]
macro_rules! native_library {
    ($target:expr, {
        $($name:expr => $func:expr),* $(,)?
    }) => {{
        let mut library = $crate::host::library::NativeLibrary::new($target);
        $(
            library
                .entries
                .push(($name, $func as $crate::host::library::NativeFunction));
        )*
        library
    }};
}

impl NativeLibrary {
    pub const fn new(target: LibraryTarget) -> Self {
        Self {
            target,
            entries: Vec::new(),
        }
    }

    pub fn register(&self, vm: &mut LuaVM, ctx: &SharedContext) -> LuaResult<()> {
        let table = match self.target {
            LibraryTarget::Global => None,
            LibraryTarget::Extend(name) => Some(global_table(vm, name)?),
            LibraryTarget::Internal(name) => {
                let internal = global_table(vm, INTERNAL_TABLE)?;
                let table = vm.create_table(0, self.entries.len())?;
                let key = vm.create_string(name)?;
                vm.raw_set(&internal, key, table);
                Some(table)
            }
        };

        for &(name, func) in &self.entries {
            let ctx = Rc::clone(ctx);
            let closure = vm.create_closure(move |state: &mut LuaState| -> LuaResult<usize> {
                func(state, &ctx)
            })?;
            match &table {
                None => vm.set_global(name, closure)?,
                Some(table) => {
                    let key = vm.create_string(name)?;
                    vm.raw_set(table, key, closure);
                }
            }
        }
        Ok(())
    }
}

/// The table stored in global `name`, created if it does not exist yet.
pub fn global_table(vm: &mut LuaVM, name: &str) -> LuaResult<LuaValue> {
    if let Some(table) = vm.get_global(name)?.filter(|v| v.is_table()) {
        return Ok(table);
    }
    let table = vm.create_table(0, 0)?;
    vm.set_global(name, table)?;
    Ok(table)
}
