use super::Value;
use indexmap::IndexMap;

/// Field values keyed by name, in insertion order.
///
/// Rows are what callers hand to `insert`/`update` and what drivers return
/// for each result row. A row is not bound to any model: names that do not
/// match a field are carried along and dropped by the engine.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Row {
    values: IndexMap<String, Value>,
}

impl Row {
    pub fn new() -> Row {
        Row::default()
    }

    pub fn with_capacity(capacity: usize) -> Row {
        Row {
            values: IndexMap::with_capacity(capacity),
        }
    }

    /// Sets a value, returning the row for chaining.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Row {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.shift_remove(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Keeps only the entries for which the predicate returns `true`.
    pub fn retain(&mut self, mut f: impl FnMut(&str, &Value) -> bool) {
        self.values.retain(|name, value| f(name, value));
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Row {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Row {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}
