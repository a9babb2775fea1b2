use std::borrow::Borrow;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

/// Simple bidirectional map between values and indices.
/// Indices are always the contiguous range `0..len()`, in insertion order.
#[derive(Debug, Clone)]
pub struct IxMap<T> {
    index_of: HashMap<T, usize>,
    value_of: Vec<T>,
}

impl<T> Default for IxMap<T> {
    fn default() -> Self {
        Self {
            index_of: HashMap::new(),
            value_of: Vec::new(),
        }
    }
}

impl<T: Eq + Hash + Clone> IxMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.value_of.len()
    }
    pub fn is_empty(&self) -> bool {
        self.value_of.is_empty()
    }

    pub fn index_of<Q>(&self, x: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index_of.get(x).copied()
    }
    pub fn value_of(&self, i: usize) -> Option<&T> {
        self.value_of.get(i)
    }
    pub fn contains<Q>(&self, x: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index_of.contains_key(x)
    }

    /// Values in index order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.value_of.iter()
    }

    /// Append a value at index `len()`. Returns `None` if it is already mapped.
    pub fn push(&mut self, x: T) -> Option<usize> {
        match self.index_of.entry(x.clone()) {
            Entry::Occupied(_) => None,
            Entry::Vacant(e) => {
                let ix = self.value_of.len();
                e.insert(ix);
                self.value_of.push(x);
                Some(ix)
            }
        }
    }

    /// Remove a value and shift every later index down by one.
    /// Returns the index the value had.
    pub fn remove<Q>(&mut self, x: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let ix = self.index_of.remove(x)?;
        self.value_of.remove(ix);
        for (i, v) in self.value_of.iter().enumerate().skip(ix) {
            if let Some(slot) = self.index_of.get_mut::<T>(v) {
                *slot = i;
            }
        }
        Some(ix)
    }

    /// Build from an iterator of distinct values (first-seen order).
    pub fn from_distinct<I: IntoIterator<Item = T>>(vals: I) -> Self {
        let mut map = Self::new();
        for v in vals {
            map.push(v);
        }
        map
    }
}
