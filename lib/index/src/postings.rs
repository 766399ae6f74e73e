use rustc_hash::FxHashMap;

/// Maps keys to the ordered, duplicate-free positions of the resources they occur in.
///
/// Positions must be inserted in ascending order of the resources, which is the case for every
/// index built in a single pass over the table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Postings {
    lists: FxHashMap<String, Vec<usize>>,
}

impl Postings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `position` to the list of `key`.
    pub fn insert(&mut self, key: &str, position: usize) {
        match self.lists.get_mut(key) {
            Some(list) => {
                if list.last() != Some(&position) {
                    list.push(position);
                }
            }
            None => {
                self.lists.insert(key.to_owned(), vec![position]);
            }
        }
    }

    /// The positions of `key`. Unknown keys yield an empty slice.
    pub fn get(&self, key: &str) -> &[usize] {
        self.lists.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.lists.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.lists.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_are_ordered_and_unique() {
        let mut postings = Postings::new();
        postings.insert("rna", 0);
        postings.insert("rna", 0);
        postings.insert("dna", 1);
        postings.insert("rna", 2);
        postings.insert("rna", 2);

        assert_eq!(postings.get("rna"), &[0, 2]);
        assert_eq!(postings.get("dna"), &[1]);
        assert_eq!(postings.get("protein"), &[] as &[usize]);
        assert_eq!(postings.len(), 2);
    }
}
