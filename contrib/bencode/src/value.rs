use std::slice::Iter;

use crate::encode;

/// A decoded bencode value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Dict(Dictionary),
}

impl Value {
    /// Encode this value into a new byte buffer.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        encode::encode(self, &mut bytes);
        bytes
    }

    #[must_use]
    pub fn int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(n) => Some(n),
            _ => None,
        }
    }

    /// Byte string interpreted as text, invalid UTF-8 sequences are replaced.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        self.bytes().map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    #[must_use]
    pub fn list(&self) -> Option<&[Value]> {
        match self {
            Value::List(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn dict(&self) -> Option<&Dictionary> {
        match self {
            Value::Dict(n) => Some(n),
            _ => None,
        }
    }
}

/// A bencode dictionary that keeps its keys in insertion order.
///
/// Inserting an existing key replaces the value in place, so the key keeps
/// the position of its first appearance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dictionary {
    entries: Vec<(Vec<u8>, Value)>,
}

impl Dictionary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, returning the value it replaced, if any.
    pub fn insert<K>(&mut self, key: K, value: Value) -> Option<Value>
    where
        K: Into<Vec<u8>>,
    {
        let key = key.into();

        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    #[must_use]
    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.entries
            .iter()
            .find_map(|(existing, value)| (existing.as_slice() == key).then_some(value))
    }

    #[must_use]
    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, (Vec<u8>, Value)> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = &'a (Vec<u8>, Value);
    type IntoIter = Iter<'a, (Vec<u8>, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Dictionary {
    type Item = (Vec<u8>, Value);
    type IntoIter = std::vec::IntoIter<(Vec<u8>, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
