use domlist::{LayoutChoice, NodeKind};
use domlist_sim::ListSim;

fn main() {
    // A thumbnail grid: items wrap into rows, and invisible filler cells complete the last
    // row so CSS wrapping stays rectangular.
    let ids: Vec<String> = (0..23).map(|i| format!("thumb-{i:02}")).collect();
    let mut sim = ListSim::new(
        640,
        600,
        ListSim::label_options()
            .with_item_height(120)
            .with_item_width_value(160)
            .with_layout(LayoutChoice::Grid)
            .with_items(ids),
    );

    let report = |sim: &ListSim| {
        println!(
            "{} per row, {} items, {} fillers",
            sim.list().geometry().items_per_row,
            sim.list().len(),
            sim.dom().kind_count_in(sim.list().content_node().unwrap(), NodeKind::Filler),
        );
    };
    report(&sim);

    sim.list_mut().add("thumb-23".into());
    report(&sim);

    sim.resize(480, 600);
    report(&sim);
}
