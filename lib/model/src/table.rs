use crate::resource::TrainingResource;
use rustc_hash::FxHashMap;

/// The deduplicated resources of a store, keyed by canonical id.
///
/// Iteration follows insertion order. Index builders rely on this to produce deterministic
/// posting lists, and the position of a resource is used to break ranking ties.
#[derive(Clone, Debug, Default)]
pub struct ResourceTable {
    resources: Vec<TrainingResource>,
    positions: FxHashMap<String, usize>,
}

impl ResourceTable {
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&TrainingResource> {
        self.positions.get(id).map(|position| &self.resources[*position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// The insertion position of the resource with the given `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Returns the resource at `position`.
    pub fn at(&self, position: usize) -> Option<&TrainingResource> {
        self.resources.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrainingResource> {
        self.resources.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.resources.iter().map(|resource| resource.id.as_str())
    }
}

impl<'table> IntoIterator for &'table ResourceTable {
    type Item = &'table TrainingResource;
    type IntoIter = std::slice::Iter<'table, TrainingResource>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Collects resources into a table. A resource whose id is already present is ignored, so the
/// first occurrence of every id wins.
impl FromIterator<TrainingResource> for ResourceTable {
    fn from_iter<T: IntoIterator<Item = TrainingResource>>(iter: T) -> Self {
        let mut table = ResourceTable::default();
        for resource in iter {
            if table.positions.contains_key(&resource.id) {
                continue;
            }
            table
                .positions
                .insert(resource.id.clone(), table.resources.len());
            table.resources.push(resource);
        }
        table
    }
}
