use alloc::sync::Arc;

use crate::{
    Error, IndexBounds, Integer, NonNegativeReal, RangeScaledSizes, Scroll, ScrollAxis,
};

/// Declared minimum size of the item at an index, along the scroll axis.
///
/// Sizes must be finite and `>= 0`, and their sum must diverge in both directions (any positive
/// lower bound on item size guarantees this).
pub type MinItemSizeFn = Arc<dyn Fn(Integer) -> f64 + Send + Sync>;

/// Called with the merged list of indexes to render whenever it changes.
pub type OnWindowChange = Arc<dyn Fn(&[Integer]) + Send + Sync>;

/// Default debounce used to detect that a jump's native scroll has finished.
pub const DEFAULT_JUMP_SETTLE_DELAY_MS: u64 = 100;

/// Padding zone scales, as multiples of the container size.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaddingAreaScale {
    pub start: f64,
    pub end: f64,
}

impl Default for PaddingAreaScale {
    fn default() -> Self {
        Self {
            start: 1.0,
            end: 1.0,
        }
    }
}

/// Toggles for the post-render layout invariant checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidateLayouts {
    /// Fail when the container never becomes scrollable.
    pub container: bool,
    /// Fail when a mounted item is smaller than its declared minimum size.
    pub items: bool,
}

impl Default for ValidateLayouts {
    fn default() -> Self {
        Self {
            container: true,
            items: true,
        }
    }
}

/// User-facing configuration.
///
/// Cheap to clone: closures are held in `Arc`s. Call [`ScrollerOptions::validate`] to obtain the
/// refined [`Config`] consumed by window computation and the scroll state machine.
#[derive(Clone)]
pub struct ScrollerOptions {
    pub min_item_size: MinItemSizeFn,
    /// Total size of start-content + content + end-content, in containers. Must be `>= 1`.
    pub scroll_area_scale: f64,
    pub padding_area_scale: PaddingAreaScale,
    pub initial_scroll: Scroll,
    pub scroll_axis: ScrollAxis,
    pub min_index: Option<i64>,
    pub max_index: Option<i64>,
    /// Lets the first window be computed before the container has been measured.
    pub initial_container_size: Option<f64>,
    pub validate_layouts: ValidateLayouts,
    pub jump_settle_delay_ms: u64,
    /// Called with the rendered indexes whenever they change, including the first window.
    pub on_window_change: Option<OnWindowChange>,
}

impl ScrollerOptions {
    pub fn new(min_item_size: impl Fn(Integer) -> f64 + Send + Sync + 'static) -> Self {
        Self {
            min_item_size: Arc::new(min_item_size),
            scroll_area_scale: 3.0,
            padding_area_scale: PaddingAreaScale::default(),
            initial_scroll: Scroll::center(Integer::ZERO),
            scroll_axis: ScrollAxis::Vertical,
            min_index: None,
            max_index: None,
            initial_container_size: None,
            validate_layouts: ValidateLayouts::default(),
            jump_settle_delay_ms: DEFAULT_JUMP_SETTLE_DELAY_MS,
            on_window_change: None,
        }
    }

    pub fn with_scroll_area_scale(mut self, scale: f64) -> Self {
        self.scroll_area_scale = scale;
        self
    }

    pub fn with_padding_area_scale(mut self, start: f64, end: f64) -> Self {
        self.padding_area_scale = PaddingAreaScale { start, end };
        self
    }

    pub fn with_initial_scroll(mut self, initial_scroll: Scroll) -> Self {
        self.initial_scroll = initial_scroll;
        self
    }

    pub fn with_scroll_axis(mut self, axis: ScrollAxis) -> Self {
        self.scroll_axis = axis;
        self
    }

    pub fn with_index_bounds(mut self, min_index: Option<i64>, max_index: Option<i64>) -> Self {
        self.min_index = min_index;
        self.max_index = max_index;
        self
    }

    pub fn with_initial_container_size(mut self, size: Option<f64>) -> Self {
        self.initial_container_size = size;
        self
    }

    pub fn with_validate_layouts(mut self, validate_layouts: ValidateLayouts) -> Self {
        self.validate_layouts = validate_layouts;
        self
    }

    pub fn with_jump_settle_delay_ms(mut self, delay_ms: u64) -> Self {
        self.jump_settle_delay_ms = delay_ms;
        self
    }

    pub fn with_on_window_change(
        mut self,
        on_window_change: Option<impl Fn(&[Integer]) + Send + Sync + 'static>,
    ) -> Self {
        self.on_window_change = on_window_change.map(|f| Arc::new(f) as _);
        self
    }

    /// Refines the options into a [`Config`].
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidScale`] when `scroll_area_scale` is not a finite number `>= 1`.
    /// - [`Error::Validation`] for negative or non-finite padding scales or initial container size.
    /// - [`Error::InvertedBounds`] when `min_index > max_index`.
    pub fn validate(&self) -> Result<Config, Error> {
        let range_scaled_sizes = RangeScaledSizes::from_scales(
            self.scroll_area_scale,
            self.padding_area_scale.start,
            self.padding_area_scale.end,
        )?;
        let bounds = IndexBounds::new(
            self.min_index.map(Integer::new),
            self.max_index.map(Integer::new),
        )?;
        let initial_container_size = self
            .initial_container_size
            .map(NonNegativeReal::new)
            .transpose()?;

        Ok(Config {
            range_scaled_sizes,
            bounds,
            scroll_axis: self.scroll_axis,
            initial_scroll: self.initial_scroll,
            initial_container_size,
            validate_layouts: self.validate_layouts,
            jump_settle_delay_ms: self.jump_settle_delay_ms,
        })
    }
}

impl core::fmt::Debug for ScrollerOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollerOptions")
            .field("scroll_area_scale", &self.scroll_area_scale)
            .field("padding_area_scale", &self.padding_area_scale)
            .field("initial_scroll", &self.initial_scroll)
            .field("scroll_axis", &self.scroll_axis)
            .field("min_index", &self.min_index)
            .field("max_index", &self.max_index)
            .field("initial_container_size", &self.initial_container_size)
            .field("validate_layouts", &self.validate_layouts)
            .field("jump_settle_delay_ms", &self.jump_settle_delay_ms)
            .finish_non_exhaustive()
    }
}

/// Validated configuration. Nothing downstream re-checks these values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    pub range_scaled_sizes: RangeScaledSizes,
    pub bounds: IndexBounds,
    pub scroll_axis: ScrollAxis,
    pub initial_scroll: Scroll,
    pub initial_container_size: Option<NonNegativeReal>,
    pub validate_layouts: ValidateLayouts,
    pub jump_settle_delay_ms: u64,
}
