// String helpers published as extensions of the `string` library

/// One string or a list of them, as accepted by several library functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StringArg {
    Single(String),
    List(Vec<String>),
}

impl StringArg {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let items: &[String] = match self {
            StringArg::Single(s) => std::slice::from_ref(s),
            StringArg::List(items) => items,
        };
        items.iter().map(String::as_str)
    }

    pub fn map(&self, mut f: impl FnMut(&str) -> String) -> Self {
        match self {
            StringArg::Single(s) => StringArg::Single(f(s)),
            StringArg::List(items) => StringArg::List(items.iter().map(|s| f(s)).collect()),
        }
    }

    /// Apply `f` to each value, keeping the input's shape.
    pub fn try_map<E>(&self, mut f: impl FnMut(&str) -> Result<String, E>) -> Result<Self, E> {
        Ok(match self {
            StringArg::Single(s) => StringArg::Single(f(s)?),
            StringArg::List(items) => StringArg::List(
                items
                    .iter()
                    .map(|s| f(s))
                    .collect::<Result<Vec<_>, E>>()?,
            ),
        })
    }
}

/// The first needle `haystack` starts with.
pub fn starts_with_any<'a>(haystack: &str, needles: &'a StringArg) -> Option<&'a str> {
    needles.iter().find(|needle| haystack.starts_with(needle))
}

pub fn contains_any<'a>(haystack: &str, needles: &'a StringArg) -> Option<&'a str> {
    needles.iter().find(|needle| haystack.contains(needle))
}

/// sdbm hash, seeded; stable across runs and platforms.
pub fn hash(value: &str, seed: u32) -> u32 {
    value.bytes().fold(seed, |h, c| {
        (c as u32)
            .wrapping_add(h << 6)
            .wrapping_add(h << 16)
            .wrapping_sub(h)
    })
}
