use crate::timing::{CompletionToken, Retry};
use crate::*;

use alloc::vec::Vec;
use procedural_scroller::{
    Block, Error, Integer, ItemGeometry, Items, NonNegativeReal, PositiveInteger, Scroll,
    ScrollAxis, ScrollBehavior, ScrollToIndexInput, ScrollerOptions, ValidateLayouts, ZoneMap,
    compute_window, windows_equal,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Lays the rendered indexes out back to back and mounts every one of them.
struct SimHost {
    viewport: f64,
    offset: f64,
    total: f64,
    layout: HashMap<Integer, (f64, f64)>,
    mounted: HashSet<Integer>,
    size_of: fn(Integer) -> f64,
    mount_items: bool,
    unbounded: bool,
    writes: Vec<(f64, ScrollBehavior)>,
}

impl SimHost {
    fn new(viewport: f64) -> Self {
        Self {
            viewport,
            offset: 0.0,
            total: 0.0,
            layout: HashMap::new(),
            mounted: HashSet::new(),
            size_of: |_| 100.0,
            mount_items: true,
            unbounded: false,
            writes: Vec::new(),
        }
    }

    fn max_offset(&self) -> f64 {
        (self.total - self.viewport).max(0.0)
    }

    fn render(&mut self, scroller: &mut Scroller<Integer>) {
        let indexes = scroller.indexes().to_vec();
        self.layout.clear();
        let mut pos = 0.0;
        for &index in &indexes {
            let size = (self.size_of)(index);
            self.layout.insert(index, (pos, size));
            pos += size;
        }
        self.total = pos;
        self.offset = self.offset.clamp(0.0, self.max_offset());

        let stale: Vec<Integer> = self
            .mounted
            .iter()
            .filter(|index| !self.layout.contains_key(index))
            .copied()
            .collect();
        for index in stale {
            scroller.unmount(index);
            self.mounted.remove(&index);
        }
        if self.mount_items {
            for index in indexes {
                scroller.mount(index, index);
                self.mounted.insert(index);
            }
        }
    }

    fn scroll_by(&mut self, delta: f64) {
        self.offset = (self.offset + delta).clamp(0.0, self.max_offset());
    }

    /// The item under the top edge of the viewport.
    fn top_index(&self) -> Integer {
        self.layout
            .iter()
            .find(|(_, (pos, size))| *pos <= self.offset && self.offset < *pos + *size)
            .map(|(&index, _)| index)
            .unwrap()
    }
}

impl Host for SimHost {
    type Element = Integer;

    fn container_size(&self, _axis: ScrollAxis) -> f64 {
        self.viewport
    }

    fn client_size(&self, axis: ScrollAxis) -> f64 {
        if self.unbounded {
            self.scroll_size(axis)
        } else {
            self.viewport
        }
    }

    fn scroll_size(&self, _axis: ScrollAxis) -> f64 {
        self.total.max(self.viewport)
    }

    fn scroll_offset(&self, _axis: ScrollAxis) -> f64 {
        self.offset
    }

    fn set_scroll_offset(&mut self, _axis: ScrollAxis, offset: f64, behavior: ScrollBehavior) {
        self.offset = offset.clamp(0.0, self.max_offset());
        self.writes.push((offset, behavior));
    }

    fn measure_item(&self, element: &Integer, _axis: ScrollAxis) -> Option<ItemGeometry> {
        let &(pos, size) = self.layout.get(element)?;
        ItemGeometry::new(pos, size, size).ok()
    }
}

fn ints(range: core::ops::RangeInclusive<i64>) -> Vec<Integer> {
    range.map(Integer::new).collect()
}

fn options() -> ScrollerOptions {
    ScrollerOptions::new(|_| 100.0).with_initial_container_size(Some(600.0))
}

fn counting(options: ScrollerOptions) -> (ScrollerOptions, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&count);
    let options = options.with_on_window_change(Some(move |_: &[Integer]| {
        seen.fetch_add(1, Ordering::SeqCst);
    }));
    (options, count)
}

fn frame(
    scroller: &mut Scroller<Integer>,
    host: &mut SimHost,
    now_ms: u64,
) -> Result<(), Error> {
    host.render(scroller);
    scroller.tick(host, now_ms)
}

fn settle(scroller: &mut Scroller<Integer>, host: &mut SimHost, from_ms: u64) -> u64 {
    let mut now_ms = from_ms;
    for _ in 0..4 {
        frame(scroller, host, now_ms).unwrap();
        now_ms += 16;
    }
    now_ms
}

fn run_until_settled(scroller: &mut Scroller<Integer>, host: &mut SimHost, from_ms: u64) -> u64 {
    let mut now_ms = from_ms;
    while scroller.phase() != Phase::Settled {
        frame(scroller, host, now_ms).unwrap();
        now_ms += 16;
        assert!(now_ms < from_ms + 10_000, "jump never settled");
    }
    // One more frame for the scroll reset.
    frame(scroller, host, now_ms).unwrap();
    now_ms + 16
}

#[test]
fn initial_window_is_rendered_and_aligned() {
    let mut scroller = Scroller::new(options()).unwrap();
    assert_eq!(scroller.indexes(), ints(-18..=18).as_slice());
    assert_eq!(scroller.current_window_indexes(), scroller.indexes());
    assert_eq!(scroller.phase(), Phase::Settled);

    let mut host = SimHost::new(600.0);
    frame(&mut scroller, &mut host, 0).unwrap();

    // Item 0 sits at 1800; centered in a 600px viewport.
    assert_eq!(host.offset, 1550.0);
    assert_eq!(host.writes, [(1550.0, ScrollBehavior::Instant)]);
    assert_eq!(host.top_index(), Integer::new(-3));
}

#[test]
fn window_waits_for_first_measurement() {
    let (options, count) = counting(ScrollerOptions::new(|_| 100.0));
    let mut scroller = Scroller::<Integer>::new(options).unwrap();
    assert!(scroller.indexes().is_empty());
    assert!(scroller.primary_items().is_none());

    let host = SimHost::new(600.0);
    assert!(scroller.on_resize(&host).unwrap());
    assert_eq!(scroller.indexes(), ints(-18..=18).as_slice());
    assert!(!scroller.on_resize(&host).unwrap());
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn resize_recomputes_only_when_the_size_changes() {
    let (options, count) = counting(options());
    let mut scroller = Scroller::<Integer>::new(options).unwrap();
    let mut host = SimHost::new(600.0);
    // The first window is announced on construction.
    assert_eq!(count.load(Ordering::SeqCst), 1);

    assert!(!scroller.on_resize(&host).unwrap());
    assert_eq!(count.load(Ordering::SeqCst), 1);

    host.viewport = 1200.0;
    assert!(scroller.on_resize(&host).unwrap());
    assert!(scroller.indexes().len() > 37);
    assert!(scroller.indexes().contains(&Integer::ZERO));
    assert_eq!(count.load(Ordering::SeqCst), 2);

    frame(&mut scroller, &mut host, 0).unwrap();
    assert_eq!(host.offset, 100.0 * (scroller.indexes()[0].get().abs() as f64) - 550.0);
}

#[test]
fn scrolling_up_reanchors_without_visual_jumps() {
    let mut scroller = Scroller::new(options()).unwrap();
    let mut host = SimHost::new(600.0);
    let mut now_ms = settle(&mut scroller, &mut host, 0);

    for _ in 0..60 {
        let expected = Integer::new(host.top_index().get() - 1);
        host.scroll_by(-100.0);
        scroller.on_scroll(&host, now_ms).unwrap();
        frame(&mut scroller, &mut host, now_ms).unwrap();
        now_ms += 16;

        assert_eq!(host.top_index(), expected);
        assert!(host.offset > 0.0);
    }
    assert_eq!(host.top_index(), Integer::new(-63));
    assert!(scroller.indexes()[0] < Integer::new(-63));
    assert_eq!(scroller.scroll().block, Block::Start);
}

#[test]
fn scrolling_down_reanchors_without_visual_jumps() {
    let mut scroller = Scroller::new(options()).unwrap();
    let mut host = SimHost::new(600.0);
    let mut now_ms = settle(&mut scroller, &mut host, 0);

    for _ in 0..60 {
        let expected = Integer::new(host.top_index().get() + 1);
        host.scroll_by(100.0);
        scroller.on_scroll(&host, now_ms).unwrap();
        frame(&mut scroller, &mut host, now_ms).unwrap();
        now_ms += 16;

        assert_eq!(host.top_index(), expected);
        assert!(host.offset < host.max_offset());
    }
    assert_eq!(host.top_index(), Integer::new(57));
    assert_eq!(scroller.scroll().block, Block::End);
}

#[test]
fn distant_jump_renders_both_buffers_then_swaps() {
    let (options, count) = counting(options());
    let mut scroller = Scroller::new(options).unwrap();
    let mut host = SimHost::new(600.0);
    settle(&mut scroller, &mut host, 0);
    let primary = scroller.active_slot();

    let input = ScrollToIndexInput::new(1000, Block::Center).with_behavior(ScrollBehavior::Smooth);
    scroller.scroll_to_index(&host, input, 100).unwrap();
    assert_eq!(scroller.phase(), Phase::Jumping);
    assert_eq!(scroller.indexes().len(), 74);
    assert_eq!(scroller.current_window_indexes(), ints(-18..=18).as_slice());
    assert!(scroller.secondary_items().unwrap().contains(Integer::new(1000)));
    assert_eq!(count.load(Ordering::SeqCst), 2);

    frame(&mut scroller, &mut host, 116).unwrap();
    // 37 items of the old window precede 982..=1000.
    assert_eq!(host.writes.last(), Some(&(5250.0, ScrollBehavior::Smooth)));

    for now_ms in [130, 160, 190] {
        scroller.on_scroll(&host, now_ms).unwrap();
    }
    frame(&mut scroller, &mut host, 250).unwrap();
    assert_eq!(scroller.phase(), Phase::Jumping);

    frame(&mut scroller, &mut host, 290).unwrap();
    assert_eq!(scroller.phase(), Phase::Swapping);
    assert_eq!(scroller.active_slot(), primary.other());
    assert_eq!(scroller.scroll(), Scroll::center(Integer::new(1000)));
    assert_eq!(scroller.current_window_indexes(), ints(982..=1018).as_slice());
    assert_eq!(scroller.indexes().len(), 74);

    frame(&mut scroller, &mut host, 306).unwrap();
    assert_eq!(scroller.phase(), Phase::Settled);
    assert_eq!(scroller.indexes(), ints(982..=1018).as_slice());
    assert!(scroller.secondary_items().is_none());
    assert_eq!(count.load(Ordering::SeqCst), 3);

    frame(&mut scroller, &mut host, 322).unwrap();
    assert_eq!(host.offset, 1550.0);
    assert_eq!(host.top_index(), Integer::new(997));
}

#[test]
fn jump_to_current_anchor_settles_and_reanchoring_resumes() {
    let (options, count) = counting(options());
    let mut scroller = Scroller::new(options).unwrap();
    let mut host = SimHost::new(600.0);
    let now_ms = settle(&mut scroller, &mut host, 0);
    let writes = host.writes.len();

    scroller
        .scroll_to_index(&host, ScrollToIndexInput::new(0, Block::Center), now_ms)
        .unwrap();
    assert_eq!(scroller.indexes(), ints(-18..=18).as_slice());

    // The native scroll lands where the host already is, so no scroll is ever reported.
    let mut now_ms = run_until_settled(&mut scroller, &mut host, now_ms + 16);
    assert_eq!(scroller.phase(), Phase::Settled);
    assert_eq!(host.offset, 1550.0);
    assert!(host.writes.len() > writes);
    assert_eq!(count.load(Ordering::SeqCst), 1);

    let mut min_offset = f64::INFINITY;
    for _ in 0..60 {
        host.scroll_by(-50.0);
        scroller.on_scroll(&host, now_ms).unwrap();
        frame(&mut scroller, &mut host, now_ms).unwrap();
        now_ms += 16;
        min_offset = min_offset.min(host.offset);
    }
    assert!(min_offset > 0.0);
    assert!(scroller.indexes()[0] < Integer::new(-18));
    assert!(count.load(Ordering::SeqCst) > 1);
}

#[test]
fn resize_mid_jump_recomputes_both_buffers() {
    let mut scroller = Scroller::new(options()).unwrap();
    let mut host = SimHost::new(600.0);
    settle(&mut scroller, &mut host, 0);

    let target = Scroll::start(Integer::new(500));
    scroller
        .scroll_to_index(&host, ScrollToIndexInput::new(500, Block::Start), 100)
        .unwrap();
    frame(&mut scroller, &mut host, 116).unwrap();
    assert_eq!(scroller.phase(), Phase::Jumping);

    host.viewport = 900.0;
    assert!(scroller.on_resize(&host).unwrap());
    assert_eq!(scroller.phase(), Phase::Jumping);

    let config = *scroller.config();
    let size = NonNegativeReal::new(900.0).unwrap();
    let at = |scroll| {
        compute_window(size, &config.range_scaled_sizes, scroll, &|_: Integer| 100.0, config.bounds)
            .unwrap()
    };
    assert!(windows_equal(scroller.secondary_items().unwrap(), &at(target)));
    assert!(windows_equal(
        scroller.primary_items().unwrap(),
        &at(Scroll::center(Integer::ZERO))
    ));
    assert_eq!(scroller.scroll(), Scroll::center(Integer::ZERO));

    run_until_settled(&mut scroller, &mut host, 132);
    assert_eq!(scroller.scroll(), target);
    assert_eq!(scroller.indexes(), ints(482..=526).as_slice());
    assert_eq!(host.offset, 1800.0);
    assert_eq!(host.top_index(), Integer::new(500));
}

#[test]
fn initial_scroll_is_clamped_into_bounds() {
    let options = options()
        .with_index_bounds(Some(0), None)
        .with_initial_scroll(Scroll::center(Integer::new(-50)));
    let mut scroller = Scroller::new(options).unwrap();
    assert_eq!(scroller.scroll(), Scroll::center(Integer::ZERO));
    assert_eq!(scroller.indexes(), ints(0..=34).as_slice());

    let mut host = SimHost::new(600.0);
    frame(&mut scroller, &mut host, 0).unwrap();
    // Item 0 sits at the top; centering it asks for a negative offset that the host clamps.
    assert_eq!(host.writes, [(-250.0, ScrollBehavior::Instant)]);
    assert_eq!(host.offset, 0.0);
}

#[test]
fn new_jump_replaces_the_one_in_flight() {
    let mut scroller = Scroller::new(options()).unwrap();
    let mut host = SimHost::new(600.0);
    settle(&mut scroller, &mut host, 0);

    scroller
        .scroll_to_index(&host, ScrollToIndexInput::new(1000, Block::Start), 100)
        .unwrap();
    frame(&mut scroller, &mut host, 116).unwrap();
    scroller.on_scroll(&host, 130).unwrap();

    scroller
        .scroll_to_index(&host, ScrollToIndexInput::new(-1000, Block::Center), 140)
        .unwrap();
    assert_eq!(scroller.phase(), Phase::Jumping);
    assert!(!scroller.indexes().contains(&Integer::new(1000)));
    assert!(scroller.indexes().contains(&Integer::new(-1000)));

    run_until_settled(&mut scroller, &mut host, 156);
    assert_eq!(scroller.scroll(), Scroll::center(Integer::new(-1000)));
    assert_eq!(scroller.indexes(), ints(-1018..=-982).as_slice());
    assert_eq!(host.top_index(), Integer::new(-1003));
}

#[test]
fn jump_during_swap_starts_over() {
    let mut scroller = Scroller::new(options()).unwrap();
    let mut host = SimHost::new(600.0);
    settle(&mut scroller, &mut host, 0);

    scroller
        .scroll_to_index(&host, ScrollToIndexInput::new(500, Block::Center), 100)
        .unwrap();
    let mut now_ms = 116;
    while scroller.phase() != Phase::Swapping {
        frame(&mut scroller, &mut host, now_ms).unwrap();
        now_ms += 16;
    }

    scroller
        .scroll_to_index(&host, ScrollToIndexInput::new(2000, Block::Center), now_ms)
        .unwrap();
    assert_eq!(scroller.phase(), Phase::Jumping);
    assert_eq!(scroller.current_window_indexes(), ints(482..=518).as_slice());
    assert_eq!(scroller.secondary_items().unwrap().indexes(), ints(1982..=2018).as_slice());

    run_until_settled(&mut scroller, &mut host, now_ms + 16);
    assert_eq!(scroller.indexes(), ints(1982..=2018).as_slice());
}

#[test]
fn missing_jump_target_retries_once_then_fails() {
    let mut scroller = Scroller::new(options()).unwrap();
    let mut host = SimHost::new(600.0);
    host.mount_items = false;

    scroller
        .scroll_to_index(&host, ScrollToIndexInput::new(500, Block::Start), 0)
        .unwrap();
    frame(&mut scroller, &mut host, 16).unwrap();
    let err = frame(&mut scroller, &mut host, 32).unwrap_err();
    assert_eq!(
        err,
        Error::MissingElement {
            index: Integer::new(500)
        }
    );
    assert_eq!(scroller.phase(), Phase::Settled);
    assert_eq!(scroller.indexes(), ints(-18..=18).as_slice());
    assert!(host.writes.is_empty());
}

#[test]
fn unmounted_boundaries_are_skipped() {
    let mut scroller = Scroller::new(options()).unwrap();
    let mut host = SimHost::new(600.0);
    host.mount_items = false;
    settle(&mut scroller, &mut host, 0);
    assert!(host.writes.is_empty());

    host.offset = 0.0;
    scroller.on_scroll(&host, 100).unwrap();
    frame(&mut scroller, &mut host, 116).unwrap();
    frame(&mut scroller, &mut host, 132).unwrap();
    assert_eq!(scroller.indexes(), ints(-18..=18).as_slice());

    host.mount_items = true;
    frame(&mut scroller, &mut host, 148).unwrap();
    scroller.on_scroll(&host, 160).unwrap();
    assert_eq!(scroller.scroll(), Scroll::start(Integer::new(-11)));
}

#[test]
fn undersized_item_fails_the_layout_check() {
    let mut host = SimHost::new(600.0);
    host.size_of = |index| if index == Integer::new(3) { 50.0 } else { 100.0 };

    let mut scroller = Scroller::new(options()).unwrap();
    let err = frame(&mut scroller, &mut host, 0).unwrap_err();
    assert_eq!(
        err,
        Error::ItemTooSmall {
            index: Integer::new(3),
            measured: 50.0,
            minimum: 100.0,
        }
    );

    let lenient = options().with_validate_layouts(ValidateLayouts {
        container: true,
        items: false,
    });
    let mut scroller = Scroller::new(lenient).unwrap();
    frame(&mut scroller, &mut host, 0).unwrap();
}

#[test]
fn unbounded_container_fails_after_two_window_updates() {
    let mut host = SimHost::new(600.0);
    host.unbounded = true;

    let mut scroller = Scroller::new(options()).unwrap();
    frame(&mut scroller, &mut host, 0).unwrap();
    host.viewport = 900.0;
    assert!(scroller.on_resize(&host).unwrap());
    let err = frame(&mut scroller, &mut host, 16).unwrap_err();
    assert_eq!(err, Error::UnboundedContainer { observations: 2 });

    let lenient = options().with_validate_layouts(ValidateLayouts {
        container: false,
        items: true,
    });
    let mut host = SimHost::new(600.0);
    host.unbounded = true;
    let mut scroller = Scroller::new(lenient).unwrap();
    frame(&mut scroller, &mut host, 0).unwrap();
    host.viewport = 900.0;
    scroller.on_resize(&host).unwrap();
    frame(&mut scroller, &mut host, 16).unwrap();
}

#[test]
fn jumps_are_clamped_into_bounds() {
    let options = options()
        .with_index_bounds(Some(0), Some(100))
        .with_initial_scroll(Scroll::start(Integer::ZERO));
    let mut scroller = Scroller::new(options).unwrap();
    assert_eq!(scroller.indexes(), ints(0..=34).as_slice());

    let mut host = SimHost::new(600.0);
    let now_ms = settle(&mut scroller, &mut host, 0);
    assert_eq!(host.offset, 0.0);

    scroller
        .scroll_to_index(&host, ScrollToIndexInput::new(500, Block::Center), now_ms)
        .unwrap();
    assert_eq!(scroller.secondary_items().unwrap().last(), Integer::new(100));
    let now_ms = run_until_settled(&mut scroller, &mut host, now_ms + 16);
    assert_eq!(scroller.scroll(), Scroll::center(Integer::new(100)));
    assert_eq!(scroller.indexes(), ints(66..=100).as_slice());

    scroller
        .scroll_to_index(&host, ScrollToIndexInput::new(-50, Block::Start), now_ms)
        .unwrap();
    run_until_settled(&mut scroller, &mut host, now_ms + 16);
    assert_eq!(scroller.scroll(), Scroll::start(Integer::ZERO));
    assert_eq!(host.offset, 0.0);
}

#[test]
fn bounded_scroller_stays_put_at_its_min() {
    let options = options()
        .with_index_bounds(Some(0), None)
        .with_initial_scroll(Scroll::start(Integer::ZERO));
    let mut scroller = Scroller::new(options).unwrap();
    let mut host = SimHost::new(600.0);
    let mut now_ms = settle(&mut scroller, &mut host, 0);

    host.scroll_by(-100.0);
    scroller.on_scroll(&host, now_ms).unwrap();
    assert_eq!(scroller.indexes(), ints(0..=34).as_slice());

    for _ in 0..23 {
        let expected = Integer::new(host.top_index().get() + 1);
        host.scroll_by(100.0);
        scroller.on_scroll(&host, now_ms).unwrap();
        frame(&mut scroller, &mut host, now_ms).unwrap();
        now_ms += 16;
        assert_eq!(host.top_index(), expected);
    }
    assert_eq!(scroller.scroll(), Scroll::end(Integer::new(27)));
    assert_eq!(scroller.indexes(), ints(7..=41).as_slice());
}

#[test]
fn horizontal_axis_is_passed_to_the_host() {
    struct AxisHost {
        inner: SimHost,
        seen: HashSet<ScrollAxis>,
    }

    impl Host for AxisHost {
        type Element = Integer;

        fn container_size(&self, axis: ScrollAxis) -> f64 {
            self.inner.container_size(axis)
        }

        fn client_size(&self, axis: ScrollAxis) -> f64 {
            self.inner.client_size(axis)
        }

        fn scroll_size(&self, axis: ScrollAxis) -> f64 {
            self.inner.scroll_size(axis)
        }

        fn scroll_offset(&self, axis: ScrollAxis) -> f64 {
            self.inner.scroll_offset(axis)
        }

        fn set_scroll_offset(&mut self, axis: ScrollAxis, offset: f64, behavior: ScrollBehavior) {
            self.seen.insert(axis);
            self.inner.set_scroll_offset(axis, offset, behavior);
        }

        fn measure_item(&self, element: &Integer, axis: ScrollAxis) -> Option<ItemGeometry> {
            self.inner.measure_item(element, axis)
        }
    }

    let options = options().with_scroll_axis(ScrollAxis::Horizontal);
    let mut scroller = Scroller::new(options).unwrap();
    let mut host = AxisHost {
        inner: SimHost::new(600.0),
        seen: HashSet::new(),
    };
    host.inner.render(&mut scroller);
    scroller.tick(&mut host, 0).unwrap();
    assert_eq!(host.seen.into_iter().collect::<Vec<_>>(), [ScrollAxis::Horizontal]);
}

#[test]
fn ref_cache_evicts_least_recently_set() {
    let mut cache = RefCache::new(PositiveInteger::new(3).unwrap());
    for i in 0..3 {
        cache.set(Integer::new(i), i);
    }
    // Touch 0 so 1 becomes the oldest.
    cache.set(Integer::new(0), 10);
    cache.reserve(Integer::new(3));

    assert_eq!(cache.len(), 3);
    assert!(!cache.contains(Integer::new(1)));
    assert_eq!(cache.get(Integer::new(0)), Some(&10));
    assert!(cache.contains(Integer::new(3)));
    assert_eq!(cache.get(Integer::new(3)), None);
    assert_eq!(
        cache.keys().collect::<Vec<_>>(),
        [Integer::new(2), Integer::new(0), Integer::new(3)]
    );

    cache.set_capacity(PositiveInteger::ONE);
    assert_eq!(cache.keys().collect::<Vec<_>>(), [Integer::new(3)]);
}

#[test]
fn ref_cache_reserve_keeps_mounted_elements() {
    let mut cache = RefCache::new(PositiveInteger::new(4).unwrap());
    cache.set(Integer::new(1), "a");
    cache.reserve(Integer::new(1));
    assert_eq!(cache.get(Integer::new(1)), Some(&"a"));

    assert_eq!(cache.unmount(Integer::new(1)), Some("a"));
    assert!(cache.contains(Integer::new(1)));
    assert_eq!(cache.get(Integer::new(1)), None);

    cache.clear();
    assert!(cache.is_empty());
}

fn window(range: core::ops::RangeInclusive<i64>) -> Items {
    let all = ints(range);
    let chunk = all.len() / 5;
    let mut zones = ZoneMap::from_fn(|_| Vec::new());
    for (i, zone) in procedural_scroller::Zone::ALL.into_iter().enumerate() {
        let end = if i == 4 { all.len() } else { (i + 1) * chunk };
        zones[zone] = all[i * chunk..end].to_vec();
    }
    Items::from_zones(zones).unwrap()
}

#[test]
fn item_stack_sizes_its_cache_from_the_window() {
    let mut stack = ItemStack::<u8>::default();
    assert!(stack.set_items(window(0..=9)));
    assert_eq!(stack.refs().capacity().get(), 20);
    assert_eq!(stack.refs().len(), 10);
    assert!(!stack.set_items(window(0..=9)));

    stack.retire();
    assert!(stack.items().is_none());
    assert!(stack.refs().is_empty());
}

#[test]
fn item_stacks_share_elements_across_buffers() {
    let mut stacks = ItemStacks::<&str>::default();
    stacks.primary_mut().set_items(window(0..=9));
    stacks.secondary_mut().set_items(window(5..=14));

    stacks.mount(Integer::new(7), "seven");
    stacks.mount(Integer::new(12), "twelve");
    assert_eq!(stacks.primary().refs().get(Integer::new(7)), Some(&"seven"));
    assert_eq!(stacks.secondary().refs().get(Integer::new(12)), Some(&"twelve"));
    assert_eq!(stacks.merged_indexes().unwrap(), ints(0..=14));

    stacks.flip();
    assert_eq!(stacks.active(), Slot::B);
    assert_eq!(stacks.element(Integer::new(7)), Some(&"seven"));
    stacks.retire_secondary();
    assert_eq!(stacks.primary().refs().get(Integer::new(7)), Some(&"seven"));
    assert_eq!(stacks.element(Integer::new(12)), Some(&"twelve"));
    assert!(stacks.secondary().items().is_none());
    assert_eq!(stacks.merged_indexes().unwrap(), ints(5..=14));

    assert_eq!(stacks.unmount(Integer::new(7)), Some("seven"));
    assert_eq!(stacks.element(Integer::new(7)), None);
}

#[test]
fn completion_token_ignores_superseded_jumps() {
    let token = CompletionToken::arm(3, 1000, 100);
    assert!(!token.is_due(3, 1099));
    assert!(token.is_due(3, 1100));
    assert!(!token.is_due(4, 5000));
}

#[test]
fn retry_allows_a_single_extra_attempt() {
    let second = Retry::FIRST.next().unwrap();
    assert!(second.next().is_none());
}

#[test]
fn item_size_check_uses_the_margin_box() {
    let geometry = ItemGeometry::new(0.0, 90.0, 110.0).unwrap();
    assert!(check_item_size(Integer::ZERO, geometry, 100.0).is_ok());
    assert!(check_item_size(Integer::ZERO, geometry, 111.0).is_err());
}

#[test]
fn unbounded_check_resets_on_a_scrollable_observation() {
    let mut check = UnboundedContainerCheck::default();
    check.observe(600.0, 600.0).unwrap();
    check.observe(1200.0, 600.0).unwrap();
    check.observe(600.0, 600.0).unwrap();
    assert_eq!(
        check.observe(600.0, 600.0),
        Err(Error::UnboundedContainer {
            observations: UNBOUNDED_CONTAINER_CHECKS,
        })
    );
    check.reset();
    check.observe(600.0, 600.0).unwrap();
}
