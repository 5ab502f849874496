// Host context
// State shared between the bootstrap and the native functions it installs:
// the search path, the stack of scripts being executed and the command line.

use std::cell::RefCell;
use std::rc::Rc;

use crate::search_path::{SearchPath, script_directory};

pub type SharedContext = Rc<RefCell<HostContext>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptFrame {
    pub file: String,
    pub dir: String,
}

#[derive(Debug, Default)]
pub struct HostContext {
    search_path: SearchPath,
    scripts: Vec<ScriptFrame>,
    args: Vec<String>,
}

impl HostContext {
    pub fn new(search_path: SearchPath) -> Self {
        HostContext {
            search_path,
            ..Default::default()
        }
    }

    pub fn shared(self) -> SharedContext {
        Rc::new(RefCell::new(self))
    }

    pub fn search_path(&self) -> &SearchPath {
        &self.search_path
    }

    pub fn set_search_path(&mut self, search_path: SearchPath) {
        self.search_path = search_path;
    }

    /// Command line arguments, without the executable name.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn set_args(&mut self, args: Vec<String>) {
        self.args = args;
    }

    pub fn push_script(&mut self, file: &str) -> &ScriptFrame {
        self.scripts.push(ScriptFrame {
            file: file.to_string(),
            dir: script_directory(file),
        });
        &self.scripts[self.scripts.len() - 1]
    }

    pub fn pop_script(&mut self) -> Option<ScriptFrame> {
        self.scripts.pop()
    }

    pub fn current_script(&self) -> Option<&ScriptFrame> {
        self.scripts.last()
    }

    pub fn current_script_dir(&self) -> Option<&str> {
        self.current_script().map(|frame| frame.dir.as_str())
    }

    /// Search directories as they stand right now.
    pub fn search_directories(&self) -> Vec<String> {
        self.search_path
            .directories(self.current_script_dir())
            .map(str::to_string)
            .collect()
    }
}
