//! Window computation core for virtualizing unbounded, procedurally generated lists.
//!
//! For the double-buffered scroll state machine that drives a real scroll container, see the
//! `procedural-scroller-adapter` crate.
//!
//! Given a container size, a scroll anchor, per-zone size ratios and a per-item minimum size
//! function, [`compute_window`] returns the contiguous run of indexes that must be rendered to:
//! - fill the viewport (the `content` zone),
//! - leave room to scroll in either direction before re-anchoring (`start_content`/`end_content`),
//! - keep fast scrolling from exposing an empty edge (`start_padding`/`end_padding`).
//!
//! Indexes are unbounded integers unless [`IndexBounds`] are configured. Every input that can be
//! invalid is refined once into a nominal type from [`number`], so the algorithms never
//! re-validate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod accumulate;
mod bounds;
mod error;
mod items;
mod merge;
pub mod number;
mod options;
mod scroll;
mod types;
mod window;


pub use accumulate::accumulate;
pub use bounds::IndexBounds;
pub use error::{Error, ErrorKind, ValidationError};
pub use items::{Items, ZoneRange, ensure_consecutive, windows_equal};
pub use merge::merge_consecutive_runs;
pub use number::{Integer, NonNegativeInteger, NonNegativeReal, PositiveInteger, Real};
pub use options::{
    Config, DEFAULT_JUMP_SETTLE_DELAY_MS, MinItemSizeFn, OnWindowChange, PaddingAreaScale,
    ScrollerOptions, ValidateLayouts,
};
pub use scroll::{ItemGeometry, scroll_length};
pub use types::{
    Block, Direction, RangeScaledSizes, Scroll, ScrollAxis, ScrollBehavior, ScrollToIndexInput,
    Zone, ZoneMap,
};
pub use window::compute_window;
