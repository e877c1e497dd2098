//! Dynamic state values.

use std::fmt;

use rustc_hash::FxHashMap;

use super::path::{Path, Segment};

/// Map payload of [`Value::Map`]
pub type ValueMap = FxHashMap<String, Value>;

/// Nested application state value
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    List(Vec<Value>),
    Map(ValueMap),
}

impl Value {
    impl_enum_accessors!(
        str => Str(String),
        list => List(Vec<Value>),
        map => Map(ValueMap),
    );

    /// Empty map value
    pub fn new_map() -> Self {
        Value::Map(ValueMap::default())
    }

    /// Insert `key` into a map value (builder style; no-op on non-maps)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        if let Value::Map(map) = &mut self {
            map.insert(key.into(), value.into());
        }
        self
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Maps and lists can hold nested values
    #[inline]
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Map(_) | Value::List(_))
    }

    /// Direct child addressed by one segment
    pub fn child(&self, segment: &Segment) -> Option<&Value> {
        match self {
            Value::Map(map) => map.get(segment.key().as_ref()),
            Value::List(list) => segment.index().and_then(|i| list.get(i)),
            _ => None,
        }
    }

    /// Mutable direct child addressed by one segment
    pub fn child_mut(&mut self, segment: &Segment) -> Option<&mut Value> {
        match self {
            Value::Map(map) => map.get_mut(segment.key().as_ref()),
            Value::List(list) => segment.index().and_then(|i| list.get_mut(i)),
            _ => None,
        }
    }

    /// Resolve a nested path; any missing segment yields `None`
    pub fn lookup(&self, path: &Path) -> Option<&Value> {
        path.segments()
            .iter()
            .try_fold(self, |current, segment| current.child(segment))
    }
}

impl fmt::Display for Value {
    /// Text interpolation form
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Value::Map(map) => {
                let mut keys: Vec<_> = map.keys().collect();
                keys.sort();
                f.write_str("{")?;
                for (i, key) in keys.into_iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {}", map[key])?;
                }
                f.write_str("}")
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversions
// ─────────────────────────────────────────────────────────────────────────────

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

impl_from_number!(f64, f32, i32, i64, u32, u64, usize);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl From<ValueMap> for Value {
    fn from(map: ValueMap) -> Self {
        Value::Map(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
