// Tests for path utilities
use crate::error::HostError;
use crate::path::{self, PATH_MAX, PathKind};

#[test]
fn test_is_absolute() {
    assert!(path::is_absolute("/usr/bin"));
    assert!(path::is_absolute("\\windows"));
    assert!(path::is_absolute("C:/Code"));
    assert!(path::is_absolute("c:"));
    assert!(path::is_absolute("//server/share"));
    assert!(!path::is_absolute("src/main.lua"));
    assert!(!path::is_absolute("./x"));
    assert!(!path::is_absolute("1:/x"));
    assert!(!path::is_absolute(""));
}

#[test]
fn test_kind() {
    assert_eq!(path::kind(""), PathKind::Unknown);
    assert_eq!(path::kind("/a"), PathKind::Absolute);
    assert_eq!(path::kind("a"), PathKind::Relative);
    assert_eq!(PathKind::Absolute.as_str(), "absolute");
    assert_eq!(PathKind::Unknown.as_str(), "unknown");
}

#[test]
fn test_join() {
    assert_eq!(path::join(["a", "b", "c"]).unwrap(), "a/b/c");
    assert_eq!(path::join(["a/", "b"]).unwrap(), "a/b");
    assert_eq!(path::join(["a", "", "b"]).unwrap(), "a/b");
    assert_eq!(path::join(["", "b"]).unwrap(), "b");
    assert_eq!(path::join(["a", "/b", "c"]).unwrap(), "/b/c");
    assert_eq!(path::join(["a", "C:/x"]).unwrap(), "C:/x");
    // no collapsing
    assert_eq!(path::join(["a", "../b"]).unwrap(), "a/../b");
    assert_eq!(path::join(Vec::<String>::new()).unwrap(), "");
}

#[test]
fn test_join_too_long() {
    let long = "x".repeat(PATH_MAX);
    match path::join(["a", long.as_str()]) {
        Err(HostError::PathTooLong { max }) => assert_eq!(max, PATH_MAX),
        other => panic!("expected PathTooLong, got {:?}", other),
    }
}

#[test]
fn test_translate() {
    assert_eq!(path::translate("a/b\\c", '\\'), "a\\b\\c");
    assert_eq!(path::translate("a/b\\c", '/'), "a/b/c");
    let once = path::translate("x\\y/z", '/');
    assert_eq!(path::translate(&once, '/'), once);

    let mut value = String::from("a\\b");
    path::translate_in_place(&mut value, '/');
    assert_eq!(value, "a/b");
}

#[test]
fn test_get_directory() {
    assert_eq!(path::get_directory("a/b/c.lua"), "a/b");
    assert_eq!(path::get_directory("a\\b"), "a");
    assert_eq!(path::get_directory("file.lua"), "");
    assert_eq!(path::get_directory("/file.lua"), "/");
    assert_eq!(path::get_directory("C:/file.lua"), "C:/");
}

#[test]
fn test_file_names() {
    assert_eq!(path::get_file_name("a/b/c.lua"), "c.lua");
    assert_eq!(path::get_file_name("c.lua"), "c.lua");
    assert_eq!(path::get_file_name("a/"), "");
    assert_eq!(path::get_base_name("a/b/c.tar.gz"), "c.tar");
    assert_eq!(path::get_base_name("a/b/c"), "c");
    assert_eq!(path::get_base_name("a/.premake"), ".premake");
}

#[test]
fn test_normalize() {
    assert_eq!(path::normalize("a/./b/../c").unwrap(), "a/c");
    assert_eq!(path::normalize("a//b/").unwrap(), "a/b");
    assert_eq!(path::normalize("a\\b").unwrap(), "a/b");
    assert_eq!(path::normalize("../a").unwrap(), "../a");
    assert_eq!(path::normalize("a/..").unwrap(), ".");
    assert_eq!(path::normalize("").unwrap(), ".");
    assert_eq!(path::normalize("/../a").unwrap(), "/a");
    assert_eq!(path::normalize("C:\\x\\..\\y").unwrap(), "C:/y");
}

#[test]
fn test_get_relative() {
    assert_eq!(path::get_relative("/a/b", "/a/b/c/d").unwrap(), "c/d");
    assert_eq!(path::get_relative("/a/b/c", "/a/d").unwrap(), "../../d");
    assert_eq!(path::get_relative("/a/b", "/a/b").unwrap(), ".");
    assert_eq!(path::get_relative("/a/b/", "/a/b").unwrap(), ".");
    assert_eq!(path::get_relative("C:/a", "D:/b").unwrap(), "D:/b");
    assert_eq!(path::get_relative("a", "b").unwrap(), "../b");
}

#[test]
fn test_get_relative_file() {
    assert_eq!(
        path::get_relative_file("/a/b/premake5.lua", "/a/c/main.c").unwrap(),
        "../c/main.c"
    );
}

#[test]
fn test_get_absolute() {
    assert_eq!(path::get_absolute("/x/./y", None).unwrap(), "/x/y");
    assert_eq!(path::get_absolute("b/c", Some("/a")).unwrap(), "/a/b/c");
    assert_eq!(path::get_absolute("../c", Some("/a/b")).unwrap(), "/a/c");

    let cwd = crate::os::get_cwd().unwrap();
    let absolute = path::get_absolute("x.lua", None).unwrap();
    assert!(path::is_absolute(&absolute));
    assert_eq!(absolute, path::normalize(&format!("{}/x.lua", cwd)).unwrap());
}
