// Tests for script and module resolution
use std::fs;
use std::path::Path;

use crate::context::HostContext;
use crate::locate::{self, MODULE_PATTERNS, Pattern, SCRIPT_PATTERNS};
use crate::search_path::{SearchEntry, SearchPath};

fn touch(root: &Path, name: &str) -> String {
    let file = root.join(name);
    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&file, "return true\n").unwrap();
    slashes(&file)
}

fn slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn context(dirs: &[&Path]) -> HostContext {
    let entries = std::iter::once(SearchEntry::CurrentScriptDir)
        .chain(dirs.iter().map(|d| SearchEntry::Directory(slashes(d))))
        .collect();
    HostContext::new(SearchPath::new(entries))
}

#[test]
fn test_pattern_render() {
    assert_eq!(Pattern("?.lua").render("core"), "core.lua");
    assert_eq!(Pattern("?/_init.lua").render("vstudio"), "vstudio/_init.lua");
    assert_eq!(Pattern("fixed.lua").render("x"), "fixed.lua");
    assert_eq!(Pattern("?-?").render("a"), "a-?");
}

#[test]
fn test_locate_directory_major() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    // the later pattern in an earlier directory beats the earlier pattern
    let expected = touch(first.path(), "tool.lua");
    touch(second.path(), "tool");

    let dirs = [slashes(first.path()), slashes(second.path())];
    assert_eq!(locate::locate("tool", &dirs, SCRIPT_PATTERNS), Some(expected));
}

#[test]
fn test_locate_pattern_order() {
    let root = tempfile::tempdir().unwrap();
    let exact = touch(root.path(), "tool");
    touch(root.path(), "tool.lua");

    let dirs = [slashes(root.path())];
    assert_eq!(locate::locate("tool", &dirs, SCRIPT_PATTERNS), Some(exact));
}

#[test]
fn test_locate_skips_directories_and_missing() {
    let root = tempfile::tempdir().unwrap();
    fs::create_dir_all(root.path().join("tool")).unwrap();
    let dirs = [
        slashes(&root.path().join("missing")),
        slashes(root.path()),
    ];
    assert_eq!(locate::locate("tool", &dirs, SCRIPT_PATTERNS), None);
    assert_eq!(locate::locate("tool", Vec::<String>::new(), SCRIPT_PATTERNS), None);
}

#[test]
fn test_locate_module() {
    let root = tempfile::tempdir().unwrap();
    let init = touch(root.path(), "vstudio/_init.lua");
    let plain = touch(root.path(), "xcode.lua");
    touch(root.path(), "a/b.lua");

    let ctx = context(&[root.path()]);
    assert_eq!(locate::locate_module(&ctx, "vstudio"), Some(init));
    assert_eq!(locate::locate_module(&ctx, "xcode"), Some(plain));
    // dotted names are not directory separators
    assert_eq!(locate::locate_module(&ctx, "a.b"), None);
    assert_eq!(locate::locate_module(&ctx, "nothing"), None);
}

#[test]
fn test_locate_module_prefers_file_over_package() {
    let root = tempfile::tempdir().unwrap();
    let file = touch(root.path(), "gmake.lua");
    touch(root.path(), "gmake/_init.lua");

    let ctx = context(&[root.path()]);
    assert_eq!(locate::locate_module(&ctx, "gmake"), Some(file));
    assert_eq!(MODULE_PATTERNS.len(), 2);
}

#[test]
fn test_locate_script_absolute() {
    let root = tempfile::tempdir().unwrap();
    let script = touch(root.path(), "build.lua");
    let without_ext = script.trim_end_matches(".lua").to_string();

    // search path is ignored for absolute names
    let ctx = HostContext::default();
    assert_eq!(locate::locate_script(&ctx, &script), Some(script.clone()));
    assert_eq!(locate::locate_script(&ctx, &without_ext), Some(script));
    assert_eq!(
        locate::locate_script(&ctx, &slashes(&root.path().join("none.lua"))),
        None
    );
}

#[test]
fn test_locate_script_search_path() {
    let root = tempfile::tempdir().unwrap();
    let script = touch(root.path(), "src/_premake_main.lua");

    let ctx = context(&[root.path()]);
    assert_eq!(
        locate::locate_script(&ctx, "src/_premake_main.lua"),
        Some(script.clone())
    );
    assert_eq!(locate::locate_script(&ctx, "src/_premake_main"), Some(script));
}

#[test]
fn test_locate_script_current_dir_first() {
    let running = tempfile::tempdir().unwrap();
    let other = tempfile::tempdir().unwrap();
    let near = touch(running.path(), "helper.lua");
    touch(other.path(), "helper.lua");

    let mut ctx = context(&[other.path()]);
    assert_ne!(locate::locate_script(&ctx, "helper"), Some(near.clone()));

    ctx.push_script(&slashes(&running.path().join("main.lua")));
    assert_eq!(locate::locate_script(&ctx, "helper"), Some(near));
    ctx.pop_script();
}
