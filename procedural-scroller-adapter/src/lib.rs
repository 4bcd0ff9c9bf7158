//! Scroll state machine for the `procedural-scroller` crate.
//!
//! `procedural-scroller` computes windows of indexes. This crate keeps a host scroll container
//! showing the right window as the user scrolls or jumps:
//!
//! - Re-anchoring: once the offset leaves the content zones, the window is rebuilt around the
//!   boundary item and the offset realigned so nothing moves on screen
//! - Jumps: the target window is rendered in a second buffer, the host scrolls there, and the
//!   buffers swap once scrolling has settled
//! - Layout checks: items smaller than their declared minimum, and containers that never scroll
//!
//! The crate holds no UI objects. Hosts implement [`Host`] and hand item elements to the scroller
//! through [`Scroller::mount`].
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod host;
mod item_stack;
mod layout_check;
mod ref_cache;
mod scroller;
mod timing;

#[cfg(test)]
mod tests;

pub use host::Host;
pub use item_stack::{ItemStack, ItemStacks, Slot};
pub use layout_check::{UNBOUNDED_CONTAINER_CHECKS, UnboundedContainerCheck, check_item_size};
pub use ref_cache::RefCache;
pub use scroller::{Phase, Scroller};
