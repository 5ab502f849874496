// Script search path
// The ordered list of directories consulted when resolving scripts and
// modules. The first entry tracks whichever script is currently running,
// so it is resolved at lookup time rather than when the list is built.

use tracing::debug;

use crate::path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEntry {
    /// Directory of the script currently executing.
    CurrentScriptDir,
    Directory(String),
}

/// Inputs the search path is built from, gathered by the caller so the
/// construction itself stays free of environment reads.
#[derive(Debug, Clone, Default)]
pub struct SearchPathSources {
    /// Value of the `--scripts` command line option.
    pub scripts_option: Option<String>,
    /// `;` separated directory list from the environment.
    pub env_path: Option<String>,
    pub home_dir: String,
    pub executable_dir: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    entries: Vec<SearchEntry>,
}

impl SearchPath {
    pub fn new(entries: Vec<SearchEntry>) -> Self {
        let entries = entries
            .into_iter()
            .filter(|e| !matches!(e, SearchEntry::Directory(dir) if dir.is_empty()))
            .collect();
        SearchPath { entries }
    }

    pub fn build(sources: &SearchPathSources) -> Self {
        let mut entries = vec![SearchEntry::CurrentScriptDir];

        if let Some(scripts) = &sources.scripts_option {
            entries.push(SearchEntry::Directory(scripts.clone()));
        }

        entries.push(SearchEntry::Directory(".".to_string()));

        if let Some(env_path) = &sources.env_path {
            entries.extend(
                env_path
                    .split(';')
                    .filter(|segment| !segment.is_empty())
                    .map(|segment| SearchEntry::Directory(segment.to_string())),
            );
        }

        entries.push(SearchEntry::Directory(format!("{}/.premake", sources.home_dir)));

        if cfg!(target_os = "macos") {
            entries.push(SearchEntry::Directory(format!(
                "{}/Library/Application Support/Premake",
                sources.home_dir
            )));
        }

        if cfg!(unix) {
            entries.push(SearchEntry::Directory("/usr/local/share/premake".to_string()));
            entries.push(SearchEntry::Directory("/usr/share/premake".to_string()));
        }

        if let Some(exe_dir) = &sources.executable_dir {
            entries.push(SearchEntry::Directory(exe_dir.clone()));
        }

        let search_path = SearchPath::new(entries);
        debug!(entries = ?search_path.entries, "built script search path");
        search_path
    }

    pub fn entries(&self) -> &[SearchEntry] {
        &self.entries
    }

    /// Directories in search order, with the dynamic entry resolved against
    /// `current_script_dir`. The dynamic entry is skipped when no script is
    /// running.
    pub fn directories<'a>(
        &'a self,
        current_script_dir: Option<&'a str>,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.entries.iter().filter_map(move |entry| match entry {
            SearchEntry::CurrentScriptDir => current_script_dir.filter(|d| !d.is_empty()),
            SearchEntry::Directory(dir) => Some(dir.as_str()),
        })
    }

    /// The fixed entries, as published to scripts in `_PREMAKE.PATH`.
    pub fn static_directories(&self) -> impl Iterator<Item = &str> {
        self.directories(None)
    }
}

/// Directory part of a script path as recorded on the script stack; a bare
/// file name lives in ".".
pub fn script_directory(script: &str) -> String {
    match path::get_directory(script) {
        "" => ".".to_string(),
        dir => dir.to_string(),
    }
}
