use std::collections::HashMap;

use procedural_scroller::{
    Block, Error, Integer, ItemGeometry, ScrollAxis, ScrollBehavior, ScrollToIndexInput,
    ScrollerOptions,
};
use procedural_scroller_adapter::{Host, Phase, Scroller};

/// A fake scroll container: items stacked back to back, 40px each.
struct Column {
    viewport: f64,
    offset: f64,
    total: f64,
    layout: HashMap<Integer, f64>,
}

const ITEM: f64 = 40.0;

impl Column {
    fn render(&mut self, scroller: &mut Scroller<Integer>) {
        self.layout.clear();
        for (slot, &index) in scroller.indexes().iter().enumerate() {
            self.layout.insert(index, slot as f64 * ITEM);
        }
        self.total = self.layout.len() as f64 * ITEM;
        self.offset = self.offset.clamp(0.0, (self.total - self.viewport).max(0.0));
        for index in scroller.indexes().to_vec() {
            scroller.mount(index, index);
        }
    }
}

impl Host for Column {
    type Element = Integer;

    fn container_size(&self, _axis: ScrollAxis) -> f64 {
        self.viewport
    }

    fn client_size(&self, _axis: ScrollAxis) -> f64 {
        self.viewport
    }

    fn scroll_size(&self, _axis: ScrollAxis) -> f64 {
        self.total.max(self.viewport)
    }

    fn scroll_offset(&self, _axis: ScrollAxis) -> f64 {
        self.offset
    }

    fn set_scroll_offset(&mut self, _axis: ScrollAxis, offset: f64, _behavior: ScrollBehavior) {
        self.offset = offset.clamp(0.0, (self.total - self.viewport).max(0.0));
    }

    fn measure_item(&self, element: &Integer, _axis: ScrollAxis) -> Option<ItemGeometry> {
        let offset = *self.layout.get(element)?;
        ItemGeometry::new(offset, ITEM, ITEM).ok()
    }
}

fn frame(scroller: &mut Scroller<Integer>, host: &mut Column, now_ms: u64) -> Result<(), Error> {
    host.render(scroller);
    scroller.tick(host, now_ms)
}

fn main() -> Result<(), Error> {
    // Example: driving the scroller from a frame loop.
    //
    // A real adapter would:
    // - call on_resize / on_scroll from its resize and scroll listeners
    // - render scroller.indexes() and mount each element
    // - call tick(now_ms) once per animation frame
    let options = ScrollerOptions::new(|_| ITEM)
        .with_initial_container_size(Some(400.0))
        .with_on_window_change(Some(|indexes: &[Integer]| {
            println!(
                "window changed: {}..={} ({} items)",
                indexes[0],
                indexes[indexes.len() - 1],
                indexes.len()
            );
        }));
    let mut scroller = Scroller::new(options)?;
    let mut host = Column {
        viewport: 400.0,
        offset: 0.0,
        total: 0.0,
        layout: HashMap::new(),
    };

    let mut now_ms = 0u64;
    frame(&mut scroller, &mut host, now_ms)?;
    println!("settled at offset {}", host.offset);

    // Fling upward well past the initial window.
    for _ in 0..50 {
        now_ms += 16;
        host.offset = (host.offset - 60.0).max(0.0);
        scroller.on_scroll(&host, now_ms)?;
        frame(&mut scroller, &mut host, now_ms)?;
    }
    println!("after fling: anchor={:?} offset={}", scroller.scroll(), host.offset);

    // Jump far away; both buffers render until the jump settles.
    scroller.scroll_to_index(&host, ScrollToIndexInput::new(1_000_000, Block::Start), now_ms)?;
    while scroller.phase() != Phase::Settled {
        now_ms += 16;
        frame(&mut scroller, &mut host, now_ms)?;
    }
    now_ms += 16;
    frame(&mut scroller, &mut host, now_ms)?;
    println!("after jump: anchor={:?} offset={}", scroller.scroll(), host.offset);
    Ok(())
}
