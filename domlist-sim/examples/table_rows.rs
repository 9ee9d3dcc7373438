use domlist::{LayoutChoice, NodeKind};
use domlist_sim::ListSim;

fn main() {
    // Table markup: rows flow into a tbody in natural DOM order, with two spacer rows
    // standing in for everything off screen.
    let ids: Vec<String> = (0..5_000).map(|i| format!("order-{i:04}")).collect();
    let mut sim = ListSim::new(
        800,
        600,
        ListSim::label_options()
            .with_item_height(24)
            .with_layout(LayoutChoice::Table)
            .with_append_target(Some("tbody"))
            .with_items(ids),
    );

    let tbody = sim.list().content_node().unwrap();
    sim.user_scroll_to(24 * 1000);
    sim.settle();

    let children = sim.dom().children(tbody);
    let before = children[0];
    let after = *children.last().unwrap();
    assert_eq!(sim.dom().kind(before), NodeKind::Row);
    println!("spacer before: {}px", sim.dom().extent(before));
    println!(
        "rows in dom:   {} ({:?} ..)",
        sim.visible_labels().len(),
        sim.visible_labels().first()
    );
    println!("spacer after:  {}px", sim.dom().extent(after));
}
