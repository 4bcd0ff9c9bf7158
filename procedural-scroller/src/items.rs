use alloc::vec::Vec;

use crate::{Integer, NonNegativeInteger, ValidationError, Zone, ZoneMap};

/// Inclusive `[start, end]` offsets of one zone inside [`Items::indexes`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneRange {
    pub start: NonNegativeInteger,
    pub end: NonNegativeInteger,
}

/// A rendered window: a strictly consecutive, ascending run of indexes partitioned into the
/// five zones.
///
/// Windows are immutable. A recomputation produces a new value that replaces the old one, which is
/// what makes structural equality ([`windows_equal`]) a useful way to skip redundant updates.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "ItemsRepr"))]
pub struct Items {
    indexes: Vec<Integer>,
    range_pointers: ZoneMap<ZoneRange>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct ItemsRepr {
    indexes: Vec<Integer>,
    range_pointers: ZoneMap<ZoneRange>,
}

#[cfg(feature = "serde")]
impl TryFrom<ItemsRepr> for Items {
    type Error = ValidationError;

    fn try_from(repr: ItemsRepr) -> Result<Self, Self::Error> {
        Self::new(repr.indexes, repr.range_pointers)
    }
}

impl Items {
    /// Validates an index run and its zone partition.
    pub fn new(
        indexes: Vec<Integer>,
        range_pointers: ZoneMap<ZoneRange>,
    ) -> Result<Self, ValidationError> {
        ensure_consecutive(&indexes)?;
        let len = indexes.len();
        let malformed = |reason| ValidationError::MalformedPartition { len, reason };

        let mut next = 0usize;
        for (_, range) in range_pointers.iter() {
            if range.start.get() != next {
                return Err(malformed("zones leave a gap or overlap"));
            }
            if range.end < range.start {
                return Err(malformed("zone ends before it starts"));
            }
            next = range.end.get() + 1;
        }
        if next != len {
            return Err(malformed("zones do not cover every index"));
        }

        Ok(Self {
            indexes,
            range_pointers,
        })
    }

    /// Concatenates per-zone runs in window order and derives the zone offsets.
    ///
    /// Every zone must contain at least one index.
    pub fn from_zones(zones: ZoneMap<Vec<Integer>>) -> Result<Self, ValidationError> {
        let total = zones.iter().map(|(_, run)| run.len()).sum();
        let mut indexes = Vec::with_capacity(total);
        let mut pointers = ZoneMap::<ZoneRange>::default();
        for (zone, run) in zones.iter() {
            if run.is_empty() {
                return Err(ValidationError::MalformedPartition {
                    len: total,
                    reason: "a zone is empty",
                });
            }
            let start = indexes.len();
            indexes.extend_from_slice(run);
            pointers[zone] = ZoneRange {
                start: NonNegativeInteger::new(start),
                end: NonNegativeInteger::new(indexes.len() - 1),
            };
        }
        Self::new(indexes, pointers)
    }

    pub fn indexes(&self) -> &[Integer] {
        &self.indexes
    }

    pub fn range_pointers(&self) -> &ZoneMap<ZoneRange> {
        &self.range_pointers
    }

    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    pub fn first(&self) -> Integer {
        self.indexes[0]
    }

    pub fn last(&self) -> Integer {
        self.indexes[self.indexes.len() - 1]
    }

    /// The indexes belonging to `zone`.
    pub fn zone(&self, zone: Zone) -> &[Integer] {
        let range = self.range_pointers[zone];
        &self.indexes[range.start.get()..=range.end.get()]
    }

    pub fn zone_first(&self, zone: Zone) -> Integer {
        self.indexes[self.range_pointers[zone].start.get()]
    }

    pub fn zone_last(&self, zone: Zone) -> Integer {
        self.indexes[self.range_pointers[zone].end.get()]
    }

    pub fn contains(&self, index: Integer) -> bool {
        !self.indexes.is_empty() && self.first() <= index && index <= self.last()
    }

    /// The zone containing `index`, if the window covers it.
    pub fn zone_of(&self, index: Integer) -> Option<Zone> {
        if !self.contains(index) {
            return None;
        }
        let offset = (index.get() - self.first().get()) as usize;
        self.range_pointers
            .iter()
            .find(|(_, range)| range.start.get() <= offset && offset <= range.end.get())
            .map(|(zone, _)| zone)
    }
}

/// Structural equality of two windows: same indexes and same zone offsets.
pub fn windows_equal(a: &Items, b: &Items) -> bool {
    a == b
}

/// Checks that `run` is strictly consecutive and ascending (`run[i + 1] == run[i] + 1`).
pub fn ensure_consecutive(run: &[Integer]) -> Result<(), ValidationError> {
    for (position, pair) in run.windows(2).enumerate() {
        let (left, right) = (pair[0].get(), pair[1].get());
        if left.checked_add(1) != Some(right) {
            return Err(ValidationError::NotConsecutive {
                position,
                next: position + 1,
                left,
                right,
            });
        }
    }
    Ok(())
}
