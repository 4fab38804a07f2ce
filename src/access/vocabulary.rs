//! Accessors for vocabulary types: `Option`, `Result`, type
//! information, and named enum values.

use std::any::TypeId;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::access::render_plain;
use crate::error::{FormatError, Result as FmtResult};
use crate::fmt::int::IntFormatter;
use crate::fmt::string::StringFormatter;
use crate::interp::{FormatContext, ParseContext};
use crate::spec::parse_std_spec;
use crate::value::{OwnedValue, ToValue, UserValue, Value};

impl<T: ToValue + Clone + 'static> UserValue for Option<T> {
    fn attribute(&self, name: &str) -> FmtResult<OwnedValue> {
        match name {
            "value" => Ok(self.as_ref().map(ToValue::to_value).unwrap_or_default()),
            "has_value" => Ok(Value::Bool(self.is_some())),
            _ => Err(FormatError::InvalidAttribute(name.to_owned())),
        }
    }

    // performs no spec parsing, a trailing spec surfaces as an
    // unenclosed-brace error in the interpreter
    fn format(
        &self,
        _parse: &mut ParseContext<'_>,
        out: &mut FormatContext<'_, '_>,
    ) -> FmtResult<()> {
        match self {
            Some(v) => render_plain(&v.to_value(), out),
            None => {
                out.out().push_str("nullopt");
                Ok(())
            }
        }
    }
}

impl<T: ToValue + Clone + 'static> ToValue for Option<T> {
    fn to_value(&self) -> OwnedValue {
        Value::independent(self.clone())
    }
}

impl<T, E> UserValue for Result<T, E>
where
    T: ToValue + Clone + 'static,
    E: ToValue + Clone + 'static,
{
    fn attribute(&self, name: &str) -> FmtResult<OwnedValue> {
        match name {
            "value" => Ok(self.as_ref().ok().map(ToValue::to_value).unwrap_or_default()),
            "error" => Ok(self
                .as_ref()
                .err()
                .map(ToValue::to_value)
                .unwrap_or_default()),
            "has_value" => Ok(Value::Bool(self.is_ok())),
            _ => Err(FormatError::InvalidAttribute(name.to_owned())),
        }
    }

    fn format(
        &self,
        _parse: &mut ParseContext<'_>,
        out: &mut FormatContext<'_, '_>,
    ) -> FmtResult<()> {
        match self {
            Ok(v) => render_plain(&v.to_value(), out),
            Err(e) => render_plain(&e.to_value(), out),
        }
    }
}

impl<T, E> ToValue for Result<T, E>
where
    T: ToValue + Clone + 'static,
    E: ToValue + Clone + 'static,
{
    fn to_value(&self) -> OwnedValue {
        Value::independent(self.clone())
    }
}

/// A tagged alternative, the stand-in for a tagged-union argument:
/// the active alternative's position and value, plus the number of
/// alternatives. Indexing a non-active alternative yields the absent
/// value.
#[derive(Debug, Clone)]
pub struct Tagged {
    pub index: usize,
    pub count: usize,
    pub value: OwnedValue,
}

impl Tagged {
    pub fn new(index: usize, count: usize, value: OwnedValue) -> Self {
        Self { index, count, value }
    }
}

impl UserValue for Tagged {
    fn index(&self, key: &crate::value::IndexKey<'_>) -> FmtResult<OwnedValue> {
        match key {
            crate::value::IndexKey::Index(i) => {
                let count = self.count as isize;
                let idx = if *i < 0 { i + count } else { *i };
                if idx == self.index as isize {
                    Ok(self.value.clone())
                } else {
                    Ok(Value::None)
                }
            }
            _ => Err(FormatError::IndexUnavailable),
        }
    }

    fn attribute(&self, name: &str) -> FmtResult<OwnedValue> {
        match name {
            "index" => Ok(Value::U64(self.index as u64)),
            "value" => Ok(self.value.clone()),
            _ => Err(FormatError::InvalidAttribute(name.to_owned())),
        }
    }

    fn format(
        &self,
        _parse: &mut ParseContext<'_>,
        out: &mut FormatContext<'_, '_>,
    ) -> FmtResult<()> {
        render_plain(&self.value, out)
    }
}

impl ToValue for Tagged {
    fn to_value(&self) -> OwnedValue {
        Value::independent(self.clone())
    }
}

/// Runtime type information exposed to format strings through the
/// `name` and `hash_code` attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeInfo {
    name: &'static str,
    hash: u64,
}

impl TypeInfo {
    pub fn of<T: 'static>() -> Self {
        let mut hasher = DefaultHasher::new();
        TypeId::of::<T>().hash(&mut hasher);
        Self {
            name: std::any::type_name::<T>(),
            hash: hasher.finish(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn hash_code(&self) -> u64 {
        self.hash
    }
}

impl UserValue for TypeInfo {
    fn attribute(&self, name: &str) -> FmtResult<OwnedValue> {
        match name {
            "name" => Ok(Value::Str(crate::text::Text::owned(self.name.to_owned()))),
            "hash_code" => Ok(Value::U64(self.hash)),
            _ => Err(FormatError::InvalidAttribute(name.to_owned())),
        }
    }

    fn format(
        &self,
        parse: &mut ParseContext<'_>,
        out: &mut FormatContext<'_, '_>,
    ) -> FmtResult<()> {
        let data = parse_std_spec(parse, "s")?;
        StringFormatter::new(data).format(self.name, out)
    }
}

impl ToValue for TypeInfo {
    fn to_value(&self) -> OwnedValue {
        Value::independent(*self)
    }
}

/// A named enum value. Rust has no enum reflection, the caller
/// supplies the name; `s` renders it, the integer types render the
/// discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedEnum {
    pub name: &'static str,
    pub value: i64,
}

impl NamedEnum {
    pub fn new(name: &'static str, value: i64) -> Self {
        Self { name, value }
    }
}

impl UserValue for NamedEnum {
    fn format(
        &self,
        parse: &mut ParseContext<'_>,
        out: &mut FormatContext<'_, '_>,
    ) -> FmtResult<()> {
        let data = parse_std_spec(parse, "sXxBbod")?;
        if data.contains_type("s") {
            let mut spec = data;
            spec.ty = '\0';
            StringFormatter::new(spec).format(self.name, out)
        } else {
            IntFormatter::new(data).format(self.value, out)
        }
    }
}

impl ToValue for NamedEnum {
    fn to_value(&self) -> OwnedValue {
        Value::independent(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::IndexKey;

    #[test]
    fn option_attributes() {
        let some: Option<i32> = Some(4);
        assert!(matches!(some.attribute("value").unwrap(), Value::I32(4)));
        assert!(matches!(
            some.attribute("has_value").unwrap(),
            Value::Bool(true)
        ));

        let none: Option<i32> = None;
        assert!(matches!(none.attribute("value").unwrap(), Value::None));
        assert!(matches!(
            none.attribute("has_value").unwrap(),
            Value::Bool(false)
        ));
        assert!(none.index(&IndexKey::Index(0)).is_err());
    }

    #[test]
    fn result_attributes() {
        let ok: Result<i32, String> = Ok(1);
        assert!(matches!(ok.attribute("value").unwrap(), Value::I32(1)));
        assert!(matches!(ok.attribute("error").unwrap(), Value::None));
        assert!(matches!(
            ok.attribute("has_value").unwrap(),
            Value::Bool(true)
        ));

        let err: Result<i32, String> = Err("boom".to_owned());
        assert!(matches!(err.attribute("error").unwrap(), Value::Str(_)));
    }

    #[test]
    fn tagged_union_projection() {
        let t = Tagged::new(1, 3, Value::I32(9));
        assert!(matches!(t.index(&IndexKey::Index(1)).unwrap(), Value::I32(9)));
        assert!(matches!(t.index(&IndexKey::Index(0)).unwrap(), Value::None));
        assert!(matches!(t.index(&IndexKey::Index(-2)).unwrap(), Value::I32(9)));
        assert!(matches!(t.attribute("index").unwrap(), Value::U64(1)));
        assert!(matches!(t.attribute("value").unwrap(), Value::I32(9)));
    }

    #[test]
    fn named_enum_renders_name_or_discriminant() {
        let e = NamedEnum::new("Green", 1);
        let args = crate::fmt_args![crate::value::Value::from_user(&e)];
        assert_eq!(crate::vformat("{0}", &args).unwrap(), "Green");
        assert_eq!(crate::vformat("{0:d}", &args).unwrap(), "1");
        assert_eq!(crate::vformat("{0:>7}", &args).unwrap(), "  Green");
    }

    #[test]
    fn type_info_attributes() {
        let info = TypeInfo::of::<u32>();
        match info.attribute("name").unwrap() {
            Value::Str(name) => assert!(name.as_str().contains("u32")),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(info.attribute("hash_code").unwrap(), Value::U64(_)));
        assert_eq!(TypeInfo::of::<u32>(), TypeInfo::of::<u32>());
        assert_ne!(TypeInfo::of::<u32>(), TypeInfo::of::<i32>());
    }
}
