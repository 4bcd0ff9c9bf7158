use alloc::vec::Vec;

use procedural_scroller::{
    Integer, Items, PositiveInteger, ValidationError, merge_consecutive_runs, windows_equal,
};

use crate::RefCache;

/// One render buffer: a window plus the element slots for its indexes.
#[derive(Clone, Debug)]
pub struct ItemStack<E> {
    items: Option<Items>,
    refs: RefCache<E>,
}

impl<E> Default for ItemStack<E> {
    fn default() -> Self {
        Self {
            items: None,
            refs: RefCache::new(PositiveInteger::ONE),
        }
    }
}

impl<E> ItemStack<E> {
    pub fn items(&self) -> Option<&Items> {
        self.items.as_ref()
    }

    pub fn refs(&self) -> &RefCache<E> {
        &self.refs
    }

    pub fn refs_mut(&mut self) -> &mut RefCache<E> {
        &mut self.refs
    }

    /// Installs `items`, reserving a slot per index. Returns `false` if the window is
    /// structurally equal to the current one, in which case nothing changes.
    pub fn set_items(&mut self, items: Items) -> bool {
        if self.items.as_ref().is_some_and(|cur| windows_equal(cur, &items)) {
            return false;
        }

        let capacity = PositiveInteger::new(items.len().saturating_mul(2).max(1))
            .unwrap_or(PositiveInteger::ONE);
        self.refs.set_capacity(capacity);
        for &index in items.indexes() {
            self.refs.reserve(index);
        }
        self.items = Some(items);
        true
    }

    /// Drops the window and every element slot.
    pub fn retire(&mut self) {
        self.items = None;
        self.refs.clear();
        self.refs.set_capacity(PositiveInteger::ONE);
    }
}

/// Which of the two buffers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Slot {
    #[default]
    A,
    B,
}

impl Slot {
    pub const fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// The double buffer. The active slot is the primary stack; the other one is the secondary,
/// populated only while a jump is in flight.
#[derive(Clone, Debug)]
pub struct ItemStacks<E> {
    a: ItemStack<E>,
    b: ItemStack<E>,
    active: Slot,
}

impl<E> Default for ItemStacks<E> {
    fn default() -> Self {
        Self {
            a: ItemStack::default(),
            b: ItemStack::default(),
            active: Slot::A,
        }
    }
}

impl<E> ItemStacks<E> {
    pub fn active(&self) -> Slot {
        self.active
    }

    pub fn slot(&self, slot: Slot) -> &ItemStack<E> {
        match slot {
            Slot::A => &self.a,
            Slot::B => &self.b,
        }
    }

    pub fn slot_mut(&mut self, slot: Slot) -> &mut ItemStack<E> {
        match slot {
            Slot::A => &mut self.a,
            Slot::B => &mut self.b,
        }
    }

    pub fn primary(&self) -> &ItemStack<E> {
        self.slot(self.active)
    }

    pub fn primary_mut(&mut self) -> &mut ItemStack<E> {
        self.slot_mut(self.active)
    }

    pub fn secondary(&self) -> &ItemStack<E> {
        self.slot(self.active.other())
    }

    pub fn secondary_mut(&mut self) -> &mut ItemStack<E> {
        self.slot_mut(self.active.other())
    }

    /// Swaps the roles of the two buffers.
    pub fn flip(&mut self) {
        self.active = self.active.other();
    }

    /// The mounted element for `index`, looked up in the primary buffer first.
    pub fn element(&self, index: Integer) -> Option<&E> {
        self.primary()
            .refs
            .get(index)
            .or_else(|| self.secondary().refs.get(index))
    }

    /// Mounts `element` into the buffer that reserved a slot for `index`, preferring the primary.
    pub fn mount(&mut self, index: Integer, element: E) {
        if !self.primary().refs.contains(index) && self.secondary().refs.contains(index) {
            self.secondary_mut().refs.set(index, element);
        } else {
            self.primary_mut().refs.set(index, element);
        }
    }

    /// Detaches `index` from both buffers, returning the primary's element if it had one.
    pub fn unmount(&mut self, index: Integer) -> Option<E> {
        let secondary = self.secondary_mut().refs.unmount(index);
        self.primary_mut().refs.unmount(index).or(secondary)
    }

    /// Tears down the secondary buffer. Elements it holds for indexes the primary also renders
    /// move into the primary, since the host renders each index only once.
    pub fn retire_secondary(&mut self) {
        let (primary, secondary) = match self.active {
            Slot::A => (&mut self.a, &mut self.b),
            Slot::B => (&mut self.b, &mut self.a),
        };
        if let Some(items) = primary.items.as_ref() {
            for &index in items.indexes() {
                if primary.refs.get(index).is_some() {
                    continue;
                }
                if let Some(element) = secondary.refs.unmount(index) {
                    primary.refs.set(index, element);
                }
            }
        }
        secondary.retire();
    }

    /// Sorted union of both buffers' windows.
    pub fn merged_indexes(&self) -> Result<Vec<Integer>, ValidationError> {
        let runs: Vec<&[Integer]> = [self.primary(), self.secondary()]
            .into_iter()
            .filter_map(|stack| stack.items().map(Items::indexes))
            .collect();
        merge_consecutive_runs(&runs)
    }
}
