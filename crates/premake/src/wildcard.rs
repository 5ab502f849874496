// Wildcard to Lua pattern translation

use crate::error::{HostError, HostResult};

/// Characters with a meaning in Lua patterns but none in wildcards.
const LUA_MAGIC: &[char] = &['^', '$', '(', ')', '%', '.', '[', ']', '+', '-'];

/// Translate a `*`/`?` wildcard string into a Lua pattern. The result must
/// stay shorter than `max_len` bytes, the same bound path results obey;
/// longer expansions fail rather than truncate.
pub fn pattern_from_wildcards(input: &str, max_len: usize) -> HostResult<String> {
    let mut pattern = String::with_capacity(input.len() * 2);
    for c in input.chars() {
        match c {
            '*' => pattern.push_str(".*"),
            '?' => pattern.push('.'),
            c if LUA_MAGIC.contains(&c) => {
                pattern.push('%');
                pattern.push(c);
            }
            c => pattern.push(c),
        }
        if pattern.len() >= max_len {
            return Err(HostError::WildcardTooLarge);
        }
    }
    Ok(pattern)
}
