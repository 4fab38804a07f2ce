//! The argument store: ordered positional values plus keyed named ones.

use std::collections::BTreeMap;

use crate::error::{FormatError, Result};
use crate::value::{IndexKey, Value};

/// Arguments for one format call. Named keys are unique; inserting a
/// duplicate replaces the earlier binding.
#[derive(Debug, Clone, Default)]
pub struct ArgStore<'a> {
    positional: Vec<Value<'a>>,
    named: BTreeMap<String, Value<'a>>,
}

impl<'a> ArgStore<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: impl Into<Value<'a>>) -> &mut Self {
        self.positional.push(value.into());
        self
    }

    pub fn push_named(&mut self, name: impl Into<String>, value: impl Into<Value<'a>>) -> &mut Self {
        let name = name.into();
        debug_assert!(
            crate::access::is_valid_attribute_name(&name),
            "argument name is not a valid identifier: {name:?}"
        );
        self.named.insert(name, value.into());
        self
    }

    pub fn positional_len(&self) -> usize {
        self.positional.len()
    }

    pub fn named_len(&self) -> usize {
        self.named.len()
    }

    pub fn contains(&self, index: usize) -> bool {
        index < self.positional.len()
    }

    pub fn contains_named(&self, name: &str) -> bool {
        self.named.contains_key(name)
    }

    pub fn get(&self, index: usize) -> Result<&Value<'a>> {
        self.positional
            .get(index)
            .ok_or(FormatError::IndexOutOfRange(index))
    }

    pub fn get_named(&self, name: &str) -> Result<&Value<'a>> {
        self.named
            .get(name)
            .ok_or_else(|| FormatError::InvalidNamedArgument(name.to_owned()))
    }

    /// Address an argument by a single indexing value, dispatching on
    /// its discriminant. Negative and slice indices are not valid
    /// argument addresses.
    pub fn get_key(&self, key: &IndexKey<'_>) -> Result<&Value<'a>> {
        match key {
            IndexKey::Index(i) if *i >= 0 => self.get(*i as usize),
            IndexKey::Index(i) => Err(FormatError::invalid_format(format!(
                "negative argument index: {i}"
            ))),
            IndexKey::Key(name) => self.get_named(name.as_str()),
            IndexKey::Slice(_) => Err(FormatError::invalid_format(
                "slice cannot address an argument",
            )),
        }
    }
}

/// Build an [`ArgStore`] from positional and `name = value` arguments.
///
/// ```
/// use scriptfmt::{fmt_args, vformat};
///
/// let args = fmt_args![42, "x", count = 3];
/// assert_eq!(vformat("{0} {1} {count}", &args).unwrap(), "42 x 3");
/// ```
#[macro_export]
macro_rules! fmt_args {
    (@push $store:ident) => {};
    (@push $store:ident $name:ident = $value:expr $(, $($rest:tt)*)?) => {
        $store.push_named(stringify!($name), $value);
        $($crate::fmt_args!(@push $store $($rest)*);)?
    };
    (@push $store:ident $value:expr $(, $($rest:tt)*)?) => {
        $store.push($value);
        $($crate::fmt_args!(@push $store $($rest)*);)?
    };
    ($($args:tt)*) => {{
        #[allow(unused_mut)]
        let mut store = $crate::args::ArgStore::new();
        $crate::fmt_args!(@push store $($args)*);
        store
    }};
}
