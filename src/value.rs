//! The type-erased argument value and the user-type handle protocol.

use std::any::Any;
use std::rc::Rc;

use crate::error::{FormatError, Result};
use crate::interp::{FormatContext, ParseContext};
use crate::text::{cp_index, cp_substr, Slice, Text};

/// Runtime index supplied to a projection: integer, slice, or text key.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexKey<'a> {
    Index(isize),
    Slice(Slice),
    Key(Text<'a>),
}

impl From<isize> for IndexKey<'_> {
    fn from(i: isize) -> Self {
        IndexKey::Index(i)
    }
}

impl From<Slice> for IndexKey<'_> {
    fn from(s: Slice) -> Self {
        IndexKey::Slice(s)
    }
}

impl<'a> From<&'a str> for IndexKey<'a> {
    fn from(s: &'a str) -> Self {
        IndexKey::Key(Text::borrowed(s))
    }
}

/// Protocol implemented by user types reachable through a [`Value`]
/// handle. Projections return detached values so chained access never
/// borrows from a temporary.
pub trait UserValue: Any {
    fn index(&self, key: &IndexKey<'_>) -> Result<OwnedValue> {
        let _ = key;
        Err(FormatError::IndexUnavailable)
    }

    fn attribute(&self, name: &str) -> Result<OwnedValue> {
        Err(FormatError::InvalidAttribute(name.to_owned()))
    }

    fn format(&self, parse: &mut ParseContext<'_>, out: &mut FormatContext<'_, '_>)
        -> Result<()>;

    /// Skip this value's format specification without emitting output.
    fn skip_spec(&self, parse: &mut ParseContext<'_>) -> Result<()> {
        parse.skip_spec();
        Ok(())
    }

    /// A value reporting `false` raises `invalid format` when formatted.
    fn is_formattable(&self) -> bool {
        true
    }
}

/// Owned-or-borrowed reference to a user value.
#[derive(Clone)]
pub enum HandleRef<'a> {
    Borrowed(&'a dyn UserValue),
    Owned(Rc<dyn UserValue>),
}

impl HandleRef<'_> {
    pub fn get(&self) -> &dyn UserValue {
        match self {
            HandleRef::Borrowed(v) => *v,
            HandleRef::Owned(v) => v.as_ref(),
        }
    }

    pub fn has_ownership(&self) -> bool {
        matches!(self, HandleRef::Owned(_))
    }
}

impl std::fmt::Debug for HandleRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandleRef::Borrowed(_) => f.write_str("HandleRef::Borrowed"),
            HandleRef::Owned(_) => f.write_str("HandleRef::Owned"),
        }
    }
}

/// A format argument. Small payloads are stored inline; anything else
/// is carried behind a [`UserValue`] handle.
#[derive(Debug, Clone, Default)]
pub enum Value<'a> {
    /// The absent value, produced by empty projections.
    #[default]
    None,
    Bool(bool),
    Char(char),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Str(Text<'a>),
    Ptr(usize),
    Handle(HandleRef<'a>),
}

/// A value detached from any borrow.
pub type OwnedValue = Value<'static>;

impl<'a> Value<'a> {
    /// Borrow a user type as a handle value.
    pub fn from_user(v: &'a dyn UserValue) -> Self {
        Value::Handle(HandleRef::Borrowed(v))
    }

    /// Copy a user type into an owned handle, independent of the
    /// caller's lifetime.
    pub fn independent(v: impl UserValue) -> OwnedValue {
        Value::Handle(HandleRef::Owned(Rc::new(v)))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn is_formattable(&self) -> bool {
        match self {
            Value::None => false,
            Value::Handle(h) => h.get().is_formattable(),
            _ => true,
        }
    }

    pub fn has_ownership(&self) -> bool {
        match self {
            Value::Str(t) => t.has_ownership(),
            Value::Handle(h) => h.has_ownership(),
            _ => true,
        }
    }

    /// Project by index. Out-of-range text indexing yields the empty
    /// string; types without the operation raise `index unavailable`.
    pub fn index(&self, key: &IndexKey<'_>) -> Result<Value<'a>> {
        match self {
            Value::Str(t) => index_text(t, key),
            Value::Handle(h) => h.get().index(key),
            _ => Err(FormatError::IndexUnavailable),
        }
    }

    /// Project by attribute name.
    pub fn attribute(&self, name: &str) -> Result<Value<'a>> {
        match self {
            Value::Str(t) => match name {
                "length" => Ok(Value::U64(t.length() as u64)),
                "size" => Ok(Value::U64(t.size() as u64)),
                _ => Err(FormatError::InvalidAttribute(name.to_owned())),
            },
            Value::Handle(h) => h.get().attribute(name),
            _ => Err(FormatError::InvalidAttribute(name.to_owned())),
        }
    }

    /// Retrieve the handle payload at its concrete type.
    pub fn handle_cast<T: Any>(&self) -> Result<&T> {
        match self {
            Value::Handle(h) => {
                let any: &dyn Any = h.get();
                any.downcast_ref::<T>().ok_or(FormatError::BadHandleCast)
            }
            _ => Err(FormatError::BadHandleCast),
        }
    }

    pub(crate) fn skip_spec(&self, parse: &mut ParseContext<'_>) -> Result<()> {
        match self {
            Value::Handle(h) => h.get().skip_spec(parse),
            _ => {
                parse.skip_spec();
                Ok(())
            }
        }
    }
}

fn index_text<'a>(t: &Text<'a>, key: &IndexKey<'_>) -> Result<Value<'a>> {
    match key {
        IndexKey::Index(i) => Ok(match cp_index(t.as_str(), *i) {
            Some(cp) => Value::Char(cp),
            None => Value::Str(Text::borrowed("")),
        }),
        IndexKey::Slice(s) => Ok(match t {
            Text::Borrowed(full) => Value::Str(Text::borrowed(cp_substr(full, *s))),
            Text::Owned(full) => {
                Value::Str(Text::owned(cp_substr(full, *s).to_owned()))
            }
        }),
        IndexKey::Key(_) => Err(FormatError::IndexUnavailable),
    }
}

/// Conversion of borrowed Rust data into a detached [`OwnedValue`],
/// used by container accessors to project elements.
pub trait ToValue {
    fn to_value(&self) -> OwnedValue;
}

macro_rules! impl_to_value {
    ($($ty:ty => $variant:ident as $conv:ty),* $(,)?) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> OwnedValue {
                    Value::$variant(*self as $conv)
                }
            }
        )*
    };
}

impl_to_value! {
    bool => Bool as bool,
    char => Char as char,
    i8 => I32 as i32,
    i16 => I32 as i32,
    i32 => I32 as i32,
    i64 => I64 as i64,
    isize => I64 as i64,
    u8 => U32 as u32,
    u16 => U32 as u32,
    u32 => U32 as u32,
    u64 => U64 as u64,
    usize => U64 as u64,
    f32 => F32 as f32,
    f64 => F64 as f64,
}

impl ToValue for String {
    fn to_value(&self) -> OwnedValue {
        Value::Str(Text::owned(self.clone()))
    }
}

impl ToValue for &str {
    fn to_value(&self) -> OwnedValue {
        Value::Str(Text::owned((*self).to_owned()))
    }
}

impl ToValue for OwnedValue {
    fn to_value(&self) -> OwnedValue {
        self.clone()
    }
}

macro_rules! impl_from_value {
    ($($ty:ty => $variant:ident as $conv:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value<'_> {
                fn from(v: $ty) -> Self {
                    Value::$variant(v as $conv)
                }
            }
        )*
    };
}

impl_from_value! {
    bool => Bool as bool,
    char => Char as char,
    i8 => I32 as i32,
    i16 => I32 as i32,
    i32 => I32 as i32,
    i64 => I64 as i64,
    isize => I64 as i64,
    u8 => U32 as u32,
    u16 => U32 as u32,
    u32 => U32 as u32,
    u64 => U64 as u64,
    usize => U64 as u64,
    f32 => F32 as f32,
    f64 => F64 as f64,
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::Str(Text::borrowed(s))
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(s: &'a String) -> Self {
        Value::Str(Text::borrowed(s))
    }
}

impl From<String> for Value<'_> {
    fn from(s: String) -> Self {
        Value::Str(Text::owned(s))
    }
}

impl<'a> From<Text<'a>> for Value<'a> {
    fn from(t: Text<'a>) -> Self {
        Value::Str(t)
    }
}

impl<T> From<*const T> for Value<'_> {
    fn from(p: *const T) -> Self {
        Value::Ptr(p as usize)
    }
}

impl<T> From<*mut T> for Value<'_> {
    fn from(p: *mut T) -> Self {
        Value::Ptr(p as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_index_and_slice() {
        let v = Value::from("héllo");
        assert!(matches!(v.index(&IndexKey::Index(1)).unwrap(), Value::Char('é')));
        assert!(matches!(v.index(&IndexKey::Index(-1)).unwrap(), Value::Char('o')));
        let out_of_range = v.index(&IndexKey::Index(9)).unwrap();
        match out_of_range {
            Value::Str(t) => assert!(t.is_empty()),
            other => panic!("expected empty text, got {other:?}"),
        }
        let sub = v.index(&IndexKey::Slice(Slice::new(1, 3))).unwrap();
        match sub {
            Value::Str(t) => assert_eq!(t.as_str(), "él"),
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn text_attributes() {
        let v = Value::from("héllo");
        assert!(matches!(v.attribute("length").unwrap(), Value::U64(5)));
        assert!(matches!(v.attribute("size").unwrap(), Value::U64(6)));
        assert!(matches!(
            v.attribute("nope"),
            Err(FormatError::InvalidAttribute(_))
        ));
    }

    #[test]
    fn scalars_reject_projection() {
        let v = Value::from(42);
        assert!(matches!(
            v.index(&IndexKey::Index(0)),
            Err(FormatError::IndexUnavailable)
        ));
        assert!(matches!(
            v.attribute("length"),
            Err(FormatError::InvalidAttribute(_))
        ));
    }

    #[test]
    fn absent_value_is_not_formattable() {
        assert!(!Value::None.is_formattable());
        assert!(Value::from(1).is_formattable());
    }

    #[test]
    fn handle_cast_type_checked() {
        struct Marker(u32);
        impl UserValue for Marker {
            fn format(
                &self,
                _parse: &mut ParseContext<'_>,
                _out: &mut FormatContext<'_, '_>,
            ) -> Result<()> {
                Ok(())
            }
        }

        let m = Marker(7);
        let v = Value::from_user(&m);
        assert_eq!(v.handle_cast::<Marker>().unwrap().0, 7);
        assert!(matches!(v.handle_cast::<u32>(), Err(FormatError::BadHandleCast)));
        assert!(matches!(
            Value::from(1).handle_cast::<Marker>(),
            Err(FormatError::BadHandleCast)
        ));
    }
}
