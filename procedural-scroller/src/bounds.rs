use crate::{Error, Integer};

/// Optional inclusive limits on the index space.
///
/// `min <= max` is checked once, at construction; window computation trusts it afterwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IndexBounds {
    min: Option<Integer>,
    max: Option<Integer>,
}

impl IndexBounds {
    pub const UNBOUNDED: Self = Self {
        min: None,
        max: None,
    };

    pub fn new(min: Option<Integer>, max: Option<Integer>) -> Result<Self, Error> {
        if let (Some(min_index), Some(max_index)) = (min, max) {
            if min_index > max_index {
                return Err(Error::InvertedBounds {
                    min_index,
                    max_index,
                });
            }
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Option<Integer> {
        self.min
    }

    pub fn max(&self) -> Option<Integer> {
        self.max
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Clamps `index` into `[min, max]`.
    pub fn clamp(&self, index: Integer) -> Integer {
        let mut index = index;
        if let Some(min) = self.min {
            index = index.max(min);
        }
        if let Some(max) = self.max {
            index = index.min(max);
        }
        index
    }

    pub(crate) fn violations(&self, first: Integer, last: Integer) -> Violation {
        let below = self.min.is_some_and(|min| first < min);
        let above = self.max.is_some_and(|max| last > max);
        match (below, above) {
            (false, false) => Violation::None,
            (true, false) => Violation::BelowMin,
            (false, true) => Violation::AboveMax,
            (true, true) => Violation::Both,
        }
    }

    pub(crate) fn too_narrow(&self) -> Error {
        Error::BoundsTooNarrow {
            min_index: self.min.unwrap_or(Integer::new(i64::MIN)),
            max_index: self.max.unwrap_or(Integer::new(i64::MAX)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Violation {
    None,
    BelowMin,
    AboveMax,
    Both,
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for IndexBounds {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Repr {
            min: Option<Integer>,
            max: Option<Integer>,
        }
        let repr = Repr::deserialize(deserializer)?;
        Self::new(repr.min, repr.max).map_err(serde::de::Error::custom)
    }
}
