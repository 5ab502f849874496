// Tests for command line option parsing
use crate::error::HostError;
use crate::option::{CliOption, OPTION_KEY_MAX, get_option_value, parse_option_key, parse_option_value};

#[test]
fn test_parse_option_key() {
    assert_eq!(parse_option_key("--file=x.lua").unwrap(), Some("file"));
    assert_eq!(parse_option_key("-v").unwrap(), Some("v"));
    assert_eq!(parse_option_key("/scripts=../src").unwrap(), Some("scripts"));
    assert_eq!(parse_option_key("--verbose").unwrap(), Some("verbose"));
    assert_eq!(parse_option_key("vs2022").unwrap(), None);
    assert_eq!(parse_option_key("").unwrap(), None);
}

#[test]
fn test_parse_option_key_empty() {
    assert_eq!(parse_option_key("--").unwrap(), Some(""));
    assert_eq!(parse_option_key("-").unwrap(), Some(""));
    assert_eq!(parse_option_key("--=x").unwrap(), Some(""));
}

#[test]
fn test_parse_option_key_length() {
    let longest = format!("--{}", "k".repeat(OPTION_KEY_MAX - 1));
    assert_eq!(
        parse_option_key(&longest).unwrap().map(str::len),
        Some(OPTION_KEY_MAX - 1)
    );

    let too_long = format!("--{}=value", "k".repeat(OPTION_KEY_MAX));
    assert!(matches!(
        parse_option_key(&too_long),
        Err(HostError::OptionKeyTooLong)
    ));
}

#[test]
fn test_parse_option_value() {
    assert_eq!(parse_option_value("--file=x.lua"), Some("x.lua"));
    assert_eq!(parse_option_value("--define=A=B"), Some("A=B"));
    assert_eq!(parse_option_value("--empty="), Some(""));
    assert_eq!(parse_option_value("--flag"), None);
}

#[test]
fn test_cli_option_parse() {
    let option = CliOption::parse("--os=linux").unwrap().unwrap();
    assert_eq!(option.key, "os");
    assert_eq!(option.value, Some("linux"));
    assert!(CliOption::parse("gmake").unwrap().is_none());
}

#[test]
fn test_get_option_value() {
    let args = ["--file=premake5.lua", "--scripts", "../core", "vs2022"];
    assert_eq!(get_option_value("file", &args), Some("premake5.lua"));
    assert_eq!(get_option_value("scripts", &args), Some("../core"));
    assert_eq!(get_option_value("missing", &args), None);
    assert_eq!(get_option_value("vs2022", &args), None);
}

#[test]
fn test_get_option_value_edges() {
    // a trailing flag has no value
    assert_eq!(get_option_value("scripts", &["--scripts"]), None);
    // the next argument is taken as-is, even if it is another flag
    assert_eq!(get_option_value("scripts", &["--scripts", "--verbose"]), Some("--verbose"));
    // the first match wins
    assert_eq!(get_option_value("os", &["--os=a", "--os=b"]), Some("a"));
    // keys must match exactly
    assert_eq!(get_option_value("script", &["--scripts=x"]), None);
}

#[test]
fn test_get_option_value_skips_oversized_keys() {
    let long = format!("--{}", "k".repeat(OPTION_KEY_MAX));
    let args = vec![long, "--file=a.lua".to_string()];
    assert_eq!(get_option_value("file", &args), Some("a.lua"));
}
