// Command line option parsing
// Accepts `--key=value`, `-key=value`, `/key=value` and the same forms with
// the value in the following argument.

use crate::error::{HostError, HostResult};

/// Option keys must be shorter than this.
pub const OPTION_KEY_MAX: usize = 64;

/// A parsed command line flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CliOption<'a> {
    pub key: &'a str,
    pub value: Option<&'a str>,
}

impl<'a> CliOption<'a> {
    /// `Ok(None)` when `arg` is not an option at all.
    pub fn parse(arg: &'a str) -> HostResult<Option<Self>> {
        Ok(parse_option_key(arg)?.map(|key| CliOption {
            key,
            value: parse_option_value(arg),
        }))
    }
}

/// Key portion of an option argument. Options start with "-", "--" or "/";
/// the key runs up to the first "=". An empty key ("-", "--") is valid.
pub fn parse_option_key(arg: &str) -> HostResult<Option<&str>> {
    let rest = if let Some(rest) = arg.strip_prefix("--") {
        rest
    } else if let Some(rest) = arg.strip_prefix(['-', '/']) {
        rest
    } else {
        return Ok(None);
    };

    let key = match rest.find('=') {
        Some(split) => &rest[..split],
        None => rest,
    };

    if key.len() >= OPTION_KEY_MAX {
        return Err(HostError::OptionKeyTooLong);
    }
    Ok(Some(key))
}

/// Everything after the first "=", if there is one.
pub fn parse_option_value(arg: &str) -> Option<&str> {
    arg.find('=').map(|split| &arg[split + 1..])
}

/// Value of `flag` within `args`. A flag without an inline value takes the
/// next argument verbatim, even when that argument looks like a flag itself.
pub fn get_option_value<'a, S: AsRef<str>>(flag: &str, args: &'a [S]) -> Option<&'a str> {
    for (i, arg) in args.iter().enumerate() {
        let arg = arg.as_ref();
        let Ok(Some(key)) = parse_option_key(arg) else {
            continue;
        };
        if key != flag {
            continue;
        }
        return match parse_option_value(arg) {
            Some(value) => Some(value),
            None => args.get(i + 1).map(AsRef::as_ref),
        };
    }
    None
}
