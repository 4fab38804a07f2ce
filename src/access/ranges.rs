//! Accessors for contiguous sequences and maps.

use std::collections::{BTreeMap, HashMap};

use crate::access::render_element;
use crate::access::tuple::render_sequence;
use crate::error::{FormatError, Result};
use crate::interp::{FormatContext, ParseContext};
use crate::value::{IndexKey, OwnedValue, ToValue, UserValue, Value};

/// A detached list of values, produced by slicing a sequence.
#[derive(Debug, Clone, Default)]
pub struct ValueList(pub Vec<OwnedValue>);

impl UserValue for ValueList {
    fn index(&self, key: &IndexKey<'_>) -> Result<OwnedValue> {
        sequence_index(self.0.len(), key, |i| self.0[i].clone())
    }

    fn attribute(&self, name: &str) -> Result<OwnedValue> {
        sequence_attribute(self.0.len(), name)
    }

    fn format(
        &self,
        parse: &mut ParseContext<'_>,
        out: &mut FormatContext<'_, '_>,
    ) -> Result<()> {
        format_sequence(&self.0, parse, out)
    }
}

impl ToValue for ValueList {
    fn to_value(&self) -> OwnedValue {
        Value::independent(self.clone())
    }
}

fn resolve_index(len: usize, i: isize) -> Option<usize> {
    let idx = if i < 0 { i + len as isize } else { i };
    (0..len as isize).contains(&idx).then_some(idx as usize)
}

fn sequence_index(
    len: usize,
    key: &IndexKey<'_>,
    element: impl Fn(usize) -> OwnedValue,
) -> Result<OwnedValue> {
    match key {
        IndexKey::Index(i) => Ok(match resolve_index(len, *i) {
            Some(idx) => element(idx),
            None => Value::None,
        }),
        IndexKey::Slice(s) => Ok(match s.normalize(len) {
            Some((start, stop)) => Value::independent(ValueList(
                (start..stop).map(element).collect(),
            )),
            None => Value::None,
        }),
        IndexKey::Key(_) => Err(FormatError::IndexUnavailable),
    }
}

fn sequence_attribute(len: usize, name: &str) -> Result<OwnedValue> {
    match name {
        "size" => Ok(Value::U64(len as u64)),
        _ => Err(FormatError::InvalidAttribute(name.to_owned())),
    }
}

fn format_sequence(
    elements: &[OwnedValue],
    parse: &mut ParseContext<'_>,
    out: &mut FormatContext<'_, '_>,
) -> Result<()> {
    render_sequence(elements, "[", "]", ", ", parse, out)
}

impl<T: ToValue + 'static> UserValue for Vec<T> {
    fn index(&self, key: &IndexKey<'_>) -> Result<OwnedValue> {
        sequence_index(self.len(), key, |i| self[i].to_value())
    }

    fn attribute(&self, name: &str) -> Result<OwnedValue> {
        sequence_attribute(self.len(), name)
    }

    fn format(
        &self,
        parse: &mut ParseContext<'_>,
        out: &mut FormatContext<'_, '_>,
    ) -> Result<()> {
        let elements: Vec<OwnedValue> = self.iter().map(ToValue::to_value).collect();
        format_sequence(&elements, parse, out)
    }
}

impl<T: ToValue + Clone + 'static> ToValue for Vec<T> {
    fn to_value(&self) -> OwnedValue {
        Value::independent(self.clone())
    }
}

fn map_attribute<'m, V: ToValue + 'm>(
    name: &str,
    len: usize,
    mut entries: impl DoubleEndedIterator<Item = &'m V>,
) -> Result<OwnedValue> {
    match name {
        "size" => Ok(Value::U64(len as u64)),
        // the comparator is `Less`, begin is the minimum
        "min" => Ok(entries.next().map(ToValue::to_value).unwrap_or_default()),
        "max" => Ok(entries.next_back().map(ToValue::to_value).unwrap_or_default()),
        _ => Err(FormatError::InvalidAttribute(name.to_owned())),
    }
}

fn format_map(
    rendered: Vec<(OwnedValue, OwnedValue)>,
    parse: &mut ParseContext<'_>,
    out: &mut FormatContext<'_, '_>,
) -> Result<()> {
    let spec = crate::spec::parse_simple_spec(parse)?;
    let mut body = String::new();
    {
        let args = crate::args::ArgStore::new();
        let mut inner = FormatContext::new(&mut body, &args);
        inner.out().push_str("{");
        for (i, (k, v)) in rendered.iter().enumerate() {
            if i != 0 {
                inner.out().push_str(", ");
            }
            render_element(k, &mut inner)?;
            inner.out().push_str(": ");
            render_element(v, &mut inner)?;
        }
        inner.out().push_str("}");
    }
    crate::access::tuple::emit_padded(&body, spec, out)
}

impl<V: ToValue + 'static> UserValue for BTreeMap<String, V> {
    fn index(&self, key: &IndexKey<'_>) -> Result<OwnedValue> {
        match key {
            // transparent borrowed-str lookup
            IndexKey::Key(k) => Ok(self
                .get(k.as_str())
                .map(ToValue::to_value)
                .unwrap_or_default()),
            _ => Err(FormatError::IndexUnavailable),
        }
    }

    fn attribute(&self, name: &str) -> Result<OwnedValue> {
        map_attribute(name, self.len(), self.values())
    }

    fn format(
        &self,
        parse: &mut ParseContext<'_>,
        out: &mut FormatContext<'_, '_>,
    ) -> Result<()> {
        format_map(
            self.iter().map(|(k, v)| (k.to_value(), v.to_value())).collect(),
            parse,
            out,
        )
    }
}

macro_rules! int_key_map_accessor {
    ($key:ty, $signed:literal) => {
        impl<V: ToValue + 'static> UserValue for BTreeMap<$key, V> {
            fn index(&self, key: &IndexKey<'_>) -> Result<OwnedValue> {
                match key {
                    IndexKey::Index(i) => {
                        if !$signed && *i < 0 {
                            // unsigned keys reject negative indices
                            return Ok(Value::None);
                        }
                        Ok(<$key>::try_from(*i)
                            .ok()
                            .and_then(|k| self.get(&k))
                            .map(ToValue::to_value)
                            .unwrap_or_default())
                    }
                    _ => Err(FormatError::IndexUnavailable),
                }
            }

            fn attribute(&self, name: &str) -> Result<OwnedValue> {
                map_attribute(name, self.len(), self.values())
            }

            fn format(
                &self,
                parse: &mut ParseContext<'_>,
                out: &mut FormatContext<'_, '_>,
            ) -> Result<()> {
                format_map(
                    self.iter()
                        .map(|(k, v)| (k.to_value(), v.to_value()))
                        .collect(),
                    parse,
                    out,
                )
            }
        }
    };
}

int_key_map_accessor!(i64, true);
int_key_map_accessor!(u64, false);

impl<V: ToValue + 'static> UserValue for HashMap<String, V> {
    fn index(&self, key: &IndexKey<'_>) -> Result<OwnedValue> {
        match key {
            IndexKey::Key(k) => Ok(self
                .get(k.as_str())
                .map(ToValue::to_value)
                .unwrap_or_default()),
            _ => Err(FormatError::IndexUnavailable),
        }
    }

    fn attribute(&self, name: &str) -> Result<OwnedValue> {
        // no min/max, the iteration order is not the comparator's
        match name {
            "size" => Ok(Value::U64(self.len() as u64)),
            _ => Err(FormatError::InvalidAttribute(name.to_owned())),
        }
    }

    fn format(
        &self,
        parse: &mut ParseContext<'_>,
        out: &mut FormatContext<'_, '_>,
    ) -> Result<()> {
        // deterministic output for an unordered map
        let mut entries: Vec<(&String, &V)> = self.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        format_map(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_value(), v.to_value()))
                .collect(),
            parse,
            out,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::Slice;

    #[test]
    fn sequence_indexing() {
        let v: Vec<i32> = vec![10, 20, 30];
        assert!(matches!(
            v.index(&IndexKey::Index(1)).unwrap(),
            Value::I32(20)
        ));
        assert!(matches!(
            v.index(&IndexKey::Index(-1)).unwrap(),
            Value::I32(30)
        ));
        assert!(matches!(v.index(&IndexKey::Index(3)).unwrap(), Value::None));
        assert!(matches!(v.index(&IndexKey::Index(-4)).unwrap(), Value::None));
        assert!(matches!(v.attribute("size").unwrap(), Value::U64(3)));
    }

    #[test]
    fn sequence_slicing() {
        let v: Vec<i32> = vec![1, 2, 3, 4];
        let sub = v.index(&IndexKey::Slice(Slice::new(1, 3))).unwrap();
        let list = sub.handle_cast::<ValueList>().unwrap();
        assert_eq!(list.0.len(), 2);
        assert!(matches!(list.0[0], Value::I32(2)));
    }

    #[test]
    fn bit_sequence_indexing() {
        let bits: Vec<bool> = vec![true, false, true];
        assert!(matches!(
            bits.index(&IndexKey::Index(-1)).unwrap(),
            Value::Bool(true)
        ));
        assert!(matches!(
            bits.index(&IndexKey::Index(5)).unwrap(),
            Value::None
        ));
    }

    #[test]
    fn string_keyed_map() {
        let mut m: BTreeMap<String, i32> = BTreeMap::new();
        m.insert("a".into(), 1);
        m.insert("b".into(), 2);
        let key = IndexKey::Key(crate::text::Text::borrowed("b"));
        assert!(matches!(m.index(&key).unwrap(), Value::I32(2)));
        let missing = IndexKey::Key(crate::text::Text::borrowed("zz"));
        assert!(matches!(m.index(&missing).unwrap(), Value::None));
        assert!(matches!(m.attribute("min").unwrap(), Value::I32(1)));
        assert!(matches!(m.attribute("max").unwrap(), Value::I32(2)));
    }

    #[test]
    fn int_keyed_maps() {
        let mut m: BTreeMap<i64, &str> = BTreeMap::new();
        m.insert(-1, "neg");
        m.insert(7, "seven");
        assert!(matches!(m.index(&IndexKey::Index(-1)).unwrap(), Value::Str(_)));
        assert!(matches!(m.index(&IndexKey::Index(8)).unwrap(), Value::None));

        let mut u: BTreeMap<u64, &str> = BTreeMap::new();
        u.insert(7, "seven");
        assert!(matches!(u.index(&IndexKey::Index(-1)).unwrap(), Value::None));
        assert!(matches!(u.index(&IndexKey::Index(7)).unwrap(), Value::Str(_)));
    }

    #[test]
    fn empty_map_min_is_absent() {
        let m: BTreeMap<String, i32> = BTreeMap::new();
        assert!(matches!(m.attribute("min").unwrap(), Value::None));
    }
}
