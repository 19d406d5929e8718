use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Group-by map that yields its buckets in the order keys were first seen.
pub(crate) struct OrderedGroups<K, V> {
    index: HashMap<K, usize>,
    buckets: Vec<(K, V)>,
}

impl<K, V> OrderedGroups<K, V>
where
    K: Eq + Hash + Clone,
{
    pub(crate) fn new() -> Self {
        Self {
            index: HashMap::new(),
            buckets: Vec::new(),
        }
    }

    /// Bucket for `key`, appended with `init()` the first time `key` is seen.
    pub(crate) fn bucket<Q>(&mut self, key: &Q, init: impl FnOnce() -> V) -> &mut V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        let position = match self.index.get(key) {
            Some(&position) => position,
            None => {
                let position = self.buckets.len();
                let owned = key.to_owned();
                self.index.insert(owned.clone(), position);
                self.buckets.push((owned, init()));
                position
            }
        };
        &mut self.buckets[position].1
    }

    pub(crate) fn into_vec(self) -> Vec<(K, V)> {
        self.buckets
    }
}
