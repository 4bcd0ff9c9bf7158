use hashbrown::DefaultHashBuilder;
use indexmap::IndexMap;
use procedural_scroller::{Integer, PositiveInteger};

/// Per-buffer cache of item element slots, keyed by index.
///
/// A slot is reserved for every index of a window before the host renders it, and filled when the
/// host mounts the element. Setting a key moves it to the most-recent position; once the cache
/// holds more than `capacity` slots, the least recently set ones are evicted.
#[derive(Clone, Debug)]
pub struct RefCache<E> {
    slots: IndexMap<Integer, Option<E>, DefaultHashBuilder>,
    capacity: PositiveInteger,
}

impl<E> RefCache<E> {
    pub fn new(capacity: PositiveInteger) -> Self {
        Self {
            slots: IndexMap::with_hasher(DefaultHashBuilder::default()),
            capacity,
        }
    }

    pub fn capacity(&self) -> PositiveInteger {
        self.capacity
    }

    pub fn set_capacity(&mut self, capacity: PositiveInteger) {
        self.capacity = capacity;
        self.evict();
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether a slot (mounted or not) exists for `index`.
    pub fn contains(&self, index: Integer) -> bool {
        self.slots.contains_key(&index)
    }

    /// The mounted element for `index`, if any.
    pub fn get(&self, index: Integer) -> Option<&E> {
        self.slots.get(&index).and_then(Option::as_ref)
    }

    /// Ensures a slot exists for `index`, keeping any element already mounted there.
    pub fn reserve(&mut self, index: Integer) {
        let element = self.slots.shift_remove(&index).flatten();
        self.insert(index, element);
    }

    /// Mounts `element` at `index`.
    pub fn set(&mut self, index: Integer, element: E) {
        self.slots.shift_remove(&index);
        self.insert(index, Some(element));
    }

    /// Detaches the element at `index`, leaving an empty slot behind.
    pub fn unmount(&mut self, index: Integer) -> Option<E> {
        self.slots.get_mut(&index).and_then(Option::take)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Indexes in least-recently-set order.
    pub fn keys(&self) -> impl Iterator<Item = Integer> + '_ {
        self.slots.keys().copied()
    }

    fn insert(&mut self, index: Integer, element: Option<E>) {
        self.slots.insert(index, element);
        self.evict();
    }

    fn evict(&mut self) {
        while self.slots.len() > self.capacity.get() {
            self.slots.shift_remove_index(0);
        }
    }
}
