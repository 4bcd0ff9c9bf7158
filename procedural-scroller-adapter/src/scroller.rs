use alloc::vec::Vec;

use procedural_scroller::{
    Block, Config, Error, Integer, ItemGeometry, Items, NonNegativeReal, Real, Scroll,
    ScrollBehavior, ScrollToIndexInput, ScrollerOptions, Zone, compute_window, scroll_length,
};

use crate::layout_check::{UnboundedContainerCheck, check_item_size};
use crate::timing::{CompletionToken, Retry};
use crate::{Host, ItemStacks, Slot};

/// Where the scroller is in the jump cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Only the primary buffer is rendered and re-anchoring is active.
    #[default]
    Settled,
    /// Both buffers are rendered while the host scrolls to the target in the secondary buffer.
    Jumping,
    /// The buffers have swapped roles; the old one is torn down on the next tick.
    Swapping,
}

#[derive(Clone, Copy, Debug)]
struct Jump {
    input: ScrollToIndexInput,
    /// Set until the native scroll to the target has been issued.
    native_scroll: Option<Retry>,
}

#[derive(Clone, Copy, Debug)]
struct ScrollReset {
    scroll: Scroll,
    residual: f64,
    retry: Retry,
}

#[derive(Clone, Copy, Debug)]
struct ReanchorRetry {
    revision: u64,
    retry: Retry,
}

/// The scroll state machine.
///
/// Holds no host objects. Adapters drive it by calling:
/// - [`Scroller::on_resize`] when the container's size may have changed
/// - [`Scroller::on_scroll`] when the host reports a native scroll
/// - [`Scroller::scroll_to_index`] to jump
/// - [`Scroller::mount`] / [`Scroller::unmount`] as item elements come and go
/// - [`Scroller::tick`] once per frame, after the host has rendered [`Scroller::indexes`]
///
/// Work that needs freshly rendered elements (aligning the scroll offset after a window change,
/// issuing the native scroll of a jump) is deferred to the next `tick`.
#[derive(Clone, Debug)]
pub struct Scroller<E> {
    options: ScrollerOptions,
    config: Config,
    stacks: ItemStacks<E>,
    scroll: Scroll,
    phase: Phase,
    jump: Option<Jump>,
    generation: u64,
    completion: Option<CompletionToken>,
    scroll_resetting: bool,
    pending_reset: Option<ScrollReset>,
    pending_reanchor: Option<ReanchorRetry>,
    container_size: Option<NonNegativeReal>,
    revision: u64,
    indexes: Vec<Integer>,
    layout_dirty: bool,
    unbounded: UnboundedContainerCheck,
}

impl<E> Scroller<E> {
    /// Validates `options`. The initial anchor is clamped into the index bounds. If an initial
    /// container size is given, the first window is computed (and announced) right away and a
    /// scroll reset to the initial anchor is scheduled.
    pub fn new(options: ScrollerOptions) -> Result<Self, Error> {
        let config = options.validate()?;
        let initial_scroll = Scroll {
            index: config.bounds.clamp(config.initial_scroll.index),
            ..config.initial_scroll
        };
        let mut scroller = Self {
            options,
            config,
            stacks: ItemStacks::default(),
            scroll: initial_scroll,
            phase: Phase::Settled,
            jump: None,
            generation: 0,
            completion: None,
            scroll_resetting: false,
            pending_reset: None,
            pending_reanchor: None,
            container_size: config.initial_container_size,
            revision: 0,
            indexes: Vec::new(),
            layout_dirty: false,
            unbounded: UnboundedContainerCheck::default(),
        };

        if let Some(size) = config.initial_container_size {
            let items = scroller.window(size, initial_scroll)?;
            scroller.install_primary(items);
            scroller.schedule_reset(initial_scroll, 0.0);
            scroller.refresh_indexes()?;
        }
        Ok(scroller)
    }

    pub fn options(&self) -> &ScrollerOptions {
        &self.options
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_jumping(&self) -> bool {
        self.phase != Phase::Settled
    }

    /// The anchor of the primary buffer.
    pub fn scroll(&self) -> Scroll {
        self.scroll
    }

    /// Last container size the scroller computed windows for.
    pub fn container_size(&self) -> Option<NonNegativeReal> {
        self.container_size
    }

    pub fn active_slot(&self) -> Slot {
        self.stacks.active()
    }

    pub fn stacks(&self) -> &ItemStacks<E> {
        &self.stacks
    }

    pub fn primary_items(&self) -> Option<&Items> {
        self.stacks.primary().items()
    }

    pub fn secondary_items(&self) -> Option<&Items> {
        self.stacks.secondary().items()
    }

    /// Indexes the host should render: the sorted union of both buffers' windows.
    pub fn indexes(&self) -> &[Integer] {
        &self.indexes
    }

    /// The primary buffer's window, ignoring any jump in flight.
    pub fn current_window_indexes(&self) -> &[Integer] {
        self.primary_items().map(Items::indexes).unwrap_or(&[])
    }

    /// The mounted element for `index`, from the primary buffer first.
    pub fn element(&self, index: Integer) -> Option<&E> {
        self.stacks.element(index)
    }

    /// Registers the rendered element for `index`.
    pub fn mount(&mut self, index: Integer, element: E) {
        self.stacks.mount(index, element);
    }

    pub fn unmount(&mut self, index: Integer) -> Option<E> {
        self.stacks.unmount(index)
    }

    /// Call this when the container may have been resized.
    ///
    /// Windows are recomputed only if the measured size differs from the last one. Returns whether
    /// the rendered indexes changed.
    pub fn on_resize<H: Host<Element = E>>(&mut self, host: &H) -> Result<bool, Error> {
        let size = self.measure_container(host)?;
        if self.container_size == Some(size) {
            return Ok(false);
        }

        let primary = self.window(size, self.scroll)?;
        let secondary = match self.jump {
            Some(jump) => Some(self.window(size, jump.input.scroll())?),
            None => None,
        };
        vdebug!(size = size.get(), "container resized");

        self.container_size = Some(size);
        let changed = self.install_primary(primary);
        if let Some(items) = secondary {
            self.stacks.secondary_mut().set_items(items);
        }
        if changed && self.phase == Phase::Settled {
            self.schedule_reset(self.scroll, 0.0);
        }
        self.refresh_indexes()
    }

    /// Call this when the host reports a native scroll.
    ///
    /// During a jump this only pushes back the completion deadline. Otherwise, once the offset
    /// has moved past the start of the start-content zone or the end of the end-content zone, the
    /// primary window is rebuilt around that boundary item.
    pub fn on_scroll<H: Host<Element = E>>(&mut self, host: &H, now_ms: u64) -> Result<(), Error> {
        match self.phase {
            Phase::Jumping => {
                self.arm_completion(now_ms);
                Ok(())
            }
            Phase::Swapping => Ok(()),
            Phase::Settled => {
                self.pending_reanchor = None;
                self.reanchor(host, Retry::FIRST)
            }
        }
    }

    /// Starts a jump to `input.index`, clamped into the index bounds.
    ///
    /// The target window is built in the secondary buffer and rendered alongside the primary one.
    /// The native scroll is issued on the next [`Scroller::tick`], once the target has mounted. A
    /// jump requested while another is in flight replaces it.
    pub fn scroll_to_index<H: Host<Element = E>>(
        &mut self,
        host: &H,
        input: ScrollToIndexInput,
        now_ms: u64,
    ) -> Result<(), Error> {
        let input = ScrollToIndexInput {
            index: self.config.bounds.clamp(input.index),
            ..input
        };
        let size = self.measure_container(host)?;
        let items = self.window(size, input.scroll())?;
        vdebug!(
            index = input.index.get(),
            block = ?input.block,
            behavior = ?input.behavior,
            "jump requested"
        );

        if self.phase == Phase::Swapping {
            self.stacks.retire_secondary();
        }
        self.stacks.secondary_mut().set_items(items);
        self.generation += 1;
        self.jump = Some(Jump {
            input,
            native_scroll: Some(Retry::FIRST),
        });
        self.phase = Phase::Jumping;
        self.arm_completion(now_ms);
        self.pending_reset = None;
        self.pending_reanchor = None;
        self.scroll_resetting = true;
        self.refresh_indexes()?;
        Ok(())
    }

    /// Advances deferred work. Call once per frame after the host has rendered
    /// [`Scroller::indexes`] and mounted their elements.
    ///
    /// Layout checks for the last window change run first. Then, depending on the phase: the old
    /// buffer of a finished jump is torn down; a jump issues its native scroll or completes once
    /// its deadline has passed; or a pending scroll reset and re-anchor retry run.
    pub fn tick<H: Host<Element = E>>(&mut self, host: &mut H, now_ms: u64) -> Result<(), Error> {
        self.check_layout(host)?;

        match self.phase {
            Phase::Swapping => self.finish_swap(),
            Phase::Jumping => self.advance_jump(host, now_ms),
            Phase::Settled => {
                self.run_pending_reset(host)?;
                self.run_pending_reanchor(host)
            }
        }
    }

    fn window(&self, container_size: NonNegativeReal, scroll: Scroll) -> Result<Items, Error> {
        compute_window(
            container_size,
            &self.config.range_scaled_sizes,
            scroll,
            &*self.options.min_item_size,
            self.config.bounds,
        )
    }

    fn measure_container<H: Host<Element = E>>(&self, host: &H) -> Result<NonNegativeReal, Error> {
        Ok(NonNegativeReal::new(
            host.container_size(self.config.scroll_axis),
        )?)
    }

    fn viewport<H: Host<Element = E>>(&self, host: &H) -> Result<NonNegativeReal, Error> {
        Ok(NonNegativeReal::new(
            host.client_size(self.config.scroll_axis),
        )?)
    }

    fn geometry<H: Host<Element = E>>(&self, host: &H, index: Integer) -> Option<ItemGeometry> {
        self.stacks
            .element(index)
            .and_then(|element| host.measure_item(element, self.config.scroll_axis))
    }

    fn install_primary(&mut self, items: Items) -> bool {
        let changed = self.stacks.primary_mut().set_items(items);
        if changed {
            self.revision += 1;
        } else {
            vtrace!("primary window unchanged; update skipped");
        }
        changed
    }

    fn arm_completion(&mut self, now_ms: u64) {
        self.completion = Some(CompletionToken::arm(
            self.generation,
            now_ms,
            self.config.jump_settle_delay_ms,
        ));
    }

    fn schedule_reset(&mut self, scroll: Scroll, residual: f64) {
        self.pending_reset = Some(ScrollReset {
            scroll,
            residual,
            retry: Retry::FIRST,
        });
        self.scroll_resetting = true;
    }

    fn refresh_indexes(&mut self) -> Result<bool, Error> {
        let merged = self.stacks.merged_indexes()?;
        if merged == self.indexes {
            return Ok(false);
        }

        self.indexes = merged;
        self.layout_dirty = true;
        vtrace!(
            len = self.indexes.len(),
            first = ?self.indexes.first(),
            last = ?self.indexes.last(),
            "rendered indexes changed"
        );
        if let Some(notify) = &self.options.on_window_change {
            notify(&self.indexes);
        }
        Ok(true)
    }

    /// Whether the rendered indexes stop short of each bound.
    fn room(&self) -> (bool, bool) {
        let bounds = self.config.bounds;
        let before = match (bounds.min(), self.indexes.first()) {
            (Some(min), Some(&first)) => first > min,
            _ => true,
        };
        let after = match (bounds.max(), self.indexes.last()) {
            (Some(max), Some(&last)) => last < max,
            _ => true,
        };
        (before, after)
    }

    fn reanchor<H: Host<Element = E>>(&mut self, host: &H, retry: Retry) -> Result<(), Error> {
        if self.scroll_resetting {
            return Ok(());
        }
        let Some((first, last)) = self.primary_items().map(|items| {
            (
                items.zone_first(Zone::StartContent),
                items.zone_last(Zone::EndContent),
            )
        }) else {
            return Ok(());
        };

        let (Some(start), Some(end)) = (self.geometry(host, first), self.geometry(host, last))
        else {
            match retry.next() {
                Some(retry) => {
                    vtrace!(first = first.get(), last = last.get(), "re-anchor deferred");
                    self.pending_reanchor = Some(ReanchorRetry {
                        revision: self.revision,
                        retry,
                    });
                }
                None => {
                    vwarn!(
                        first = first.get(),
                        last = last.get(),
                        "re-anchor boundary items not mounted; skipping"
                    );
                }
            }
            return Ok(());
        };

        let offset = Real::new(host.scroll_offset(self.config.scroll_axis))?.get();
        let viewport = self.viewport(host)?;
        let start_limit = scroll_length(Block::Start, start, viewport);
        let end_limit = scroll_length(Block::End, end, viewport);
        let (before, after) = self.room();

        if before && offset < start_limit {
            self.update_items(host, Scroll::start(first), offset - start_limit)
        } else if after && offset > end_limit {
            self.update_items(host, Scroll::end(last), offset - end_limit)
        } else {
            Ok(())
        }
    }

    fn update_items<H: Host<Element = E>>(
        &mut self,
        host: &H,
        scroll: Scroll,
        residual: f64,
    ) -> Result<(), Error> {
        let size = self.measure_container(host)?;
        let items = self.window(size, scroll)?;
        vdebug!(
            index = scroll.index.get(),
            block = ?scroll.block,
            residual,
            "re-anchoring"
        );

        self.scroll = scroll;
        self.install_primary(items);
        self.schedule_reset(scroll, residual);
        self.refresh_indexes()?;
        Ok(())
    }

    fn advance_jump<H: Host<Element = E>>(
        &mut self,
        host: &mut H,
        now_ms: u64,
    ) -> Result<(), Error> {
        let Some(jump) = self.jump else {
            return Ok(());
        };

        if let Some(retry) = jump.native_scroll {
            let index = jump.input.index;
            let Some(geometry) = self.geometry(host, index) else {
                return match retry.next() {
                    Some(retry) => {
                        vtrace!(index = index.get(), "jump target not mounted yet");
                        self.jump = Some(Jump {
                            native_scroll: Some(retry),
                            ..jump
                        });
                        Ok(())
                    }
                    None => {
                        vwarn!(index = index.get(), "jump target never mounted; aborting jump");
                        self.abort_jump()?;
                        Err(Error::MissingElement { index })
                    }
                };
            };

            let offset = scroll_length(jump.input.block, geometry, self.viewport(host)?);
            vtrace!(index = index.get(), offset, "issuing native scroll");
            host.set_scroll_offset(self.config.scroll_axis, offset, jump.input.behavior);
            self.jump = Some(Jump {
                native_scroll: None,
                ..jump
            });
            self.arm_completion(now_ms);
            return Ok(());
        }

        if self
            .completion
            .is_some_and(|token| token.is_due(self.generation, now_ms))
        {
            vdebug!(index = jump.input.index.get(), "jump settled; swapping buffers");
            self.stacks.flip();
            self.revision += 1;
            self.scroll = jump.input.scroll();
            self.jump = None;
            self.completion = None;
            self.phase = Phase::Swapping;
        }
        Ok(())
    }

    fn abort_jump(&mut self) -> Result<(), Error> {
        self.stacks.secondary_mut().retire();
        self.jump = None;
        self.completion = None;
        self.phase = Phase::Settled;
        self.scroll_resetting = false;
        self.refresh_indexes()?;
        Ok(())
    }

    fn finish_swap(&mut self) -> Result<(), Error> {
        self.stacks.retire_secondary();
        self.phase = Phase::Settled;
        self.schedule_reset(self.scroll, 0.0);
        self.refresh_indexes()?;
        Ok(())
    }

    fn run_pending_reset<H: Host<Element = E>>(&mut self, host: &mut H) -> Result<(), Error> {
        let Some(reset) = self.pending_reset.take() else {
            return Ok(());
        };

        let index = reset.scroll.index;
        let Some(geometry) = self.geometry(host, index) else {
            match reset.retry.next() {
                Some(retry) => self.pending_reset = Some(ScrollReset { retry, ..reset }),
                None => {
                    vwarn!(index = index.get(), "scroll reset target never mounted; abandoning");
                    self.scroll_resetting = false;
                }
            }
            return Ok(());
        };

        let aligned = scroll_length(reset.scroll.block, geometry, self.viewport(host)?);
        let offset = aligned + reset.residual;
        vtrace!(index = index.get(), offset, "scroll reset");
        host.set_scroll_offset(self.config.scroll_axis, offset, ScrollBehavior::Instant);
        self.scroll_resetting = false;
        Ok(())
    }

    fn run_pending_reanchor<H: Host<Element = E>>(&mut self, host: &H) -> Result<(), Error> {
        match self.pending_reanchor.take() {
            Some(pending) if pending.revision == self.revision => {
                self.reanchor(host, pending.retry)
            }
            _ => Ok(()),
        }
    }

    fn check_layout<H: Host<Element = E>>(&mut self, host: &H) -> Result<(), Error> {
        if !self.layout_dirty {
            return Ok(());
        }
        self.layout_dirty = false;

        let checks = self.config.validate_layouts;
        if checks.items {
            for &index in &self.indexes {
                let Some(geometry) = self.geometry(host, index) else {
                    continue;
                };
                check_item_size(index, geometry, (self.options.min_item_size)(index))?;
            }
        }
        if checks.container && !self.indexes.is_empty() {
            let axis = self.config.scroll_axis;
            self.unbounded
                .observe(host.scroll_size(axis), host.client_size(axis))?;
        }
        Ok(())
    }
}
