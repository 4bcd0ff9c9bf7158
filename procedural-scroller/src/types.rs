use core::ops::{Index, IndexMut};

use crate::{Error, Integer, NonNegativeReal};

/// Which edge (or the center) of an item aligns with the matching edge of the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Block {
    Start,
    #[default]
    Center,
    End,
}

/// A scroll anchor: the item at `index` is aligned to the viewport by `block`.
///
/// Anchors are replaced wholesale, never patched field by field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scroll {
    pub block: Block,
    pub index: Integer,
}

impl Scroll {
    pub const fn new(block: Block, index: Integer) -> Self {
        Self { block, index }
    }

    pub const fn start(index: Integer) -> Self {
        Self::new(Block::Start, index)
    }

    pub const fn center(index: Integer) -> Self {
        Self::new(Block::Center, index)
    }

    pub const fn end(index: Integer) -> Self {
        Self::new(Block::End, index)
    }
}

/// How the host should animate a native scroll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScrollBehavior {
    /// Let the host decide (no explicit behavior was requested).
    #[default]
    Auto,
    Smooth,
    Instant,
}

/// A caller's request to jump to an index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollToIndexInput {
    pub index: Integer,
    pub block: Block,
    #[cfg_attr(feature = "serde", serde(default))]
    pub behavior: ScrollBehavior,
}

impl ScrollToIndexInput {
    pub fn new(index: impl Into<Integer>, block: Block) -> Self {
        Self {
            index: index.into(),
            block,
            behavior: ScrollBehavior::Auto,
        }
    }

    pub fn with_behavior(mut self, behavior: ScrollBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn scroll(&self) -> Scroll {
        Scroll::new(self.block, self.index)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScrollAxis {
    Horizontal,
    #[default]
    Vertical,
}

/// Growth direction when accumulating indexes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub const fn step(self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// One of the five partitions of a rendered window, in window order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Zone {
    StartPadding,
    StartContent,
    Content,
    EndContent,
    EndPadding,
}

impl Zone {
    pub const ALL: [Zone; 5] = [
        Zone::StartPadding,
        Zone::StartContent,
        Zone::Content,
        Zone::EndContent,
        Zone::EndPadding,
    ];
}

/// A value for every [`Zone`]. All five keys are always present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneMap<T> {
    pub start_padding: T,
    pub start_content: T,
    pub content: T,
    pub end_content: T,
    pub end_padding: T,
}

impl<T> ZoneMap<T> {
    pub fn from_fn(mut f: impl FnMut(Zone) -> T) -> Self {
        Self {
            start_padding: f(Zone::StartPadding),
            start_content: f(Zone::StartContent),
            content: f(Zone::Content),
            end_content: f(Zone::EndContent),
            end_padding: f(Zone::EndPadding),
        }
    }

    /// Iterates in window order.
    pub fn iter(&self) -> impl Iterator<Item = (Zone, &T)> + '_ {
        Zone::ALL.into_iter().map(move |zone| (zone, &self[zone]))
    }
}

impl<T> Index<Zone> for ZoneMap<T> {
    type Output = T;

    fn index(&self, zone: Zone) -> &T {
        match zone {
            Zone::StartPadding => &self.start_padding,
            Zone::StartContent => &self.start_content,
            Zone::Content => &self.content,
            Zone::EndContent => &self.end_content,
            Zone::EndPadding => &self.end_padding,
        }
    }
}

impl<T> IndexMut<Zone> for ZoneMap<T> {
    fn index_mut(&mut self, zone: Zone) -> &mut T {
        match zone {
            Zone::StartPadding => &mut self.start_padding,
            Zone::StartContent => &mut self.start_content,
            Zone::Content => &mut self.content,
            Zone::EndContent => &mut self.end_content,
            Zone::EndPadding => &mut self.end_padding,
        }
    }
}

/// Per-zone sizes as multiples of the container size.
pub type RangeScaledSizes = ZoneMap<NonNegativeReal>;

impl ZoneMap<NonNegativeReal> {
    /// Derives zone scales from the user-facing configuration.
    ///
    /// `content` is always one container; the start/end content zones split the rest of
    /// `scroll_area_scale` evenly; padding zones take their scale verbatim.
    pub fn from_scales(
        scroll_area_scale: f64,
        padding_start: f64,
        padding_end: f64,
    ) -> Result<Self, Error> {
        if !scroll_area_scale.is_finite() || scroll_area_scale < 1.0 {
            return Err(Error::InvalidScale {
                name: "scroll_area_scale",
                value: scroll_area_scale,
                reason: "must be a finite number >= 1",
            });
        }
        let side = NonNegativeReal::new((scroll_area_scale - 1.0) / 2.0)?;
        Ok(Self {
            start_padding: NonNegativeReal::new(padding_start)?,
            start_content: side,
            content: NonNegativeReal::ONE,
            end_content: side,
            end_padding: NonNegativeReal::new(padding_end)?,
        })
    }
}
