use procedural_scroller::{
    IndexBounds, Integer, NonNegativeReal, ScrollerOptions, Zone, compute_window,
};

fn main() {
    // A date list: every item is at least 100px tall, the viewport is 600px.
    let options = ScrollerOptions::new(|_| 100.0);
    let config = options.validate().expect("default options are valid");

    let window = compute_window(
        NonNegativeReal::new(600.0).expect("finite"),
        &config.range_scaled_sizes,
        config.initial_scroll,
        &*options.min_item_size,
        IndexBounds::UNBOUNDED,
    )
    .expect("unbounded windows always fit");

    println!(
        "window: {}..={} ({} items)",
        window.first(),
        window.last(),
        window.len()
    );
    for zone in Zone::ALL {
        let run = window.zone(zone);
        println!("{zone:?}: {}..={}", run[0], run[run.len() - 1]);
    }

    let anchor = Integer::ZERO;
    println!("anchor {anchor} is in {:?}", window.zone_of(anchor));
}
