// Tests for search path construction
use crate::search_path::{SearchEntry, SearchPath, SearchPathSources, script_directory};

fn dir(value: &str) -> SearchEntry {
    SearchEntry::Directory(value.to_string())
}

#[test]
fn test_build_order() {
    let sources = SearchPathSources {
        scripts_option: Some("../scripts".to_string()),
        env_path: Some("/opt/a;;/opt/b".to_string()),
        home_dir: "/home/me".to_string(),
        executable_dir: Some("/usr/bin".to_string()),
    };
    let search_path = SearchPath::build(&sources);

    let mut expected = vec![
        SearchEntry::CurrentScriptDir,
        dir("../scripts"),
        dir("."),
        dir("/opt/a"),
        dir("/opt/b"),
        dir("/home/me/.premake"),
    ];
    if cfg!(target_os = "macos") {
        expected.push(dir("/home/me/Library/Application Support/Premake"));
    }
    if cfg!(unix) {
        expected.push(dir("/usr/local/share/premake"));
        expected.push(dir("/usr/share/premake"));
    }
    expected.push(dir("/usr/bin"));

    assert_eq!(search_path.entries(), expected.as_slice());
}

#[test]
fn test_build_minimal() {
    let sources = SearchPathSources {
        home_dir: "~".to_string(),
        ..Default::default()
    };
    let search_path = SearchPath::build(&sources);
    let entries = search_path.entries();
    assert_eq!(entries[0], SearchEntry::CurrentScriptDir);
    assert_eq!(entries[1], dir("."));
    assert_eq!(entries[2], dir("~/.premake"));
}

#[test]
fn test_no_empty_entries() {
    let sources = SearchPathSources {
        scripts_option: Some(String::new()),
        env_path: Some(";;".to_string()),
        home_dir: "/h".to_string(),
        executable_dir: Some(String::new()),
    };
    let search_path = SearchPath::build(&sources);
    assert!(
        search_path
            .directories(Some("x"))
            .all(|d| !d.is_empty())
    );
    assert!(!search_path.entries().contains(&dir("")));
}

#[test]
fn test_dynamic_entry() {
    let search_path = SearchPath::new(vec![SearchEntry::CurrentScriptDir, dir("a"), dir("")]);

    let running: Vec<&str> = search_path.directories(Some("scripts/sub")).collect();
    assert_eq!(running, vec!["scripts/sub", "a"]);

    let idle: Vec<&str> = search_path.directories(None).collect();
    assert_eq!(idle, vec!["a"]);
    assert_eq!(search_path.static_directories().collect::<Vec<_>>(), vec!["a"]);
}

#[test]
fn test_script_directory() {
    assert_eq!(script_directory("a/b/c.lua"), "a/b");
    assert_eq!(script_directory("c.lua"), ".");
    assert_eq!(script_directory("/c.lua"), "/");
}
