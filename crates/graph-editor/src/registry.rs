use spectral::IxMap;

use crate::graph_state::GraphError;

pub const DEFAULT_PREFIX: &str = "V";

/// Vertex identifiers and their matrix indices.
///
/// Default names are `<prefix><counter>`; the counter only ever grows, so a
/// deleted name is not handed out again.
#[derive(Debug, Clone)]
pub struct VertexRegistry {
    ix_map: IxMap<String>,
    prefix: String,
    counter: u64,
}

impl Default for VertexRegistry {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_PREFIX)
    }
}

impl VertexRegistry {
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            ix_map: IxMap::new(),
            prefix: prefix.into(),
            counter: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.ix_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ix_map.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ix_map.contains(id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.ix_map.index_of(id)
    }

    pub fn id_at(&self, index: usize) -> Option<&str> {
        self.ix_map.value_of(index).map(String::as_str)
    }

    /// Identifiers in index order.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.ix_map.iter().map(String::as_str)
    }

    /// Register `id`, or the next free default name. Returns the new id,
    /// which always lands at index `len() - 1`.
    pub fn add(&mut self, id: Option<String>) -> Result<String, GraphError> {
        let id = match id {
            Some(id) => id,
            None => self.next_default_name(),
        };
        match self.ix_map.push(id.clone()) {
            Some(_) => Ok(id),
            None => Err(GraphError::DuplicateVertex(id)),
        }
    }

    /// Unregister `id`; every later vertex moves down one index.
    pub fn remove(&mut self, id: &str) -> Result<usize, GraphError> {
        self.ix_map
            .remove(id)
            .ok_or_else(|| GraphError::UnknownVertex(id.to_string()))
    }

    fn next_default_name(&mut self) -> String {
        loop {
            let name = format!("{}{}", self.prefix, self.counter);
            self.counter += 1;
            // skip names already taken by hand
            if !self.ix_map.contains(name.as_str()) {
                return name;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_names_are_never_reused() {
        let mut reg = VertexRegistry::default();
        assert_eq!(reg.add(None).unwrap(), "V0");
        assert_eq!(reg.add(None).unwrap(), "V1");
        reg.remove("V1").unwrap();
        assert_eq!(reg.add(None).unwrap(), "V2");
    }

    #[test]
    fn test_default_names_skip_manual_ones() {
        let mut reg = VertexRegistry::with_prefix("n");
        reg.add(Some("n0".to_string())).unwrap();
        reg.add(Some("n1".to_string())).unwrap();
        assert_eq!(reg.add(None).unwrap(), "n2");
    }

    #[test]
    fn test_duplicate_and_unknown() {
        let mut reg = VertexRegistry::default();
        reg.add(Some("a".to_string())).unwrap();
        assert_eq!(
            reg.add(Some("a".to_string())),
            Err(GraphError::DuplicateVertex("a".to_string()))
        );
        assert_eq!(
            reg.remove("b"),
            Err(GraphError::UnknownVertex("b".to_string()))
        );
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_remove_compacts_indices() {
        let mut reg = VertexRegistry::default();
        for _ in 0..4 {
            reg.add(None).unwrap();
        }
        assert_eq!(reg.remove("V1"), Ok(1));
        assert_eq!(reg.ids().collect::<Vec<_>>(), vec!["V0", "V2", "V3"]);
        assert_eq!(reg.index_of("V3"), Some(2));
        assert_eq!(reg.id_at(1), Some("V2"));
        assert_eq!(reg.id_at(3), None);
    }
}
