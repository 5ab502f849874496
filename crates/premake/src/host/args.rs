// Argument and result helpers for native functions

use luars::LuaValue;
use luars::lua_vm::{LuaError, LuaResult, LuaState};

use crate::error::HostError;
use crate::strings::StringArg;

pub(crate) fn value_to_string(value: &LuaValue) -> Option<String> {
    if let Some(s) = value.as_str() {
        Some(s.to_string())
    } else if let Some(i) = value.as_integer() {
        Some(i.to_string())
    } else {
        value.as_number().map(|n| n.to_string())
    }
}

/// String (or number) argument at `index`, raising the usual "bad argument"
/// error otherwise.
pub fn check_string(l: &mut LuaState, index: usize, fname: &str) -> LuaResult<String> {
    match l.get_arg(index).as_ref().and_then(value_to_string) {
        Some(s) => Ok(s),
        None => Err(l.error(format!(
            "bad argument #{} to '{}' (string expected)",
            index, fname
        ))),
    }
}

/// Optional string argument; absent and nil both read as `None`.
pub fn opt_string(l: &mut LuaState, index: usize) -> Option<String> {
    l.get_arg(index)
        .filter(|v| !v.is_nil())
        .as_ref()
        .and_then(value_to_string)
}

/// String values of the array part of `table`, stopping at the first nil.
pub fn table_strings(l: &mut LuaState, table: &LuaValue) -> Vec<String> {
    let mut items = Vec::new();
    let mut i = 1;
    while let Some(value) = l.raw_geti(table, i) {
        if value.is_nil() {
            break;
        }
        if let Some(s) = value_to_string(&value) {
            items.push(s);
        }
        i += 1;
    }
    items
}

/// A string or an array of strings.
pub fn check_string_arg(l: &mut LuaState, index: usize, fname: &str) -> LuaResult<StringArg> {
    match l.get_arg(index) {
        Some(value) if value.is_table() => Ok(StringArg::List(table_strings(l, &value))),
        _ => check_string(l, index, fname).map(StringArg::Single),
    }
}

pub fn push_string(l: &mut LuaState, s: &str) -> LuaResult<()> {
    let value = l.create_string(s)?;
    l.push_value(value)
}

/// Push a single string, or a new array table for a list.
pub fn push_string_arg(l: &mut LuaState, arg: &StringArg) -> LuaResult<()> {
    match arg {
        StringArg::Single(s) => push_string(l, s),
        StringArg::List(items) => {
            let table = l.create_table(items.len(), 0)?;
            for (i, item) in items.iter().enumerate() {
                let value = l.create_string(item)?;
                l.raw_seti(&table, (i + 1) as i64, value);
            }
            l.push_value(table)
        }
    }
}

/// Raise a host failure as a Lua error.
pub fn raise(l: &mut LuaState, err: HostError) -> LuaError {
    l.error(err.to_string())
}
