use domlist_sim::ListSim;

fn main() {
    // A 100k-row list in a 600px container: only ~20 nodes ever exist at once.
    let ids: Vec<String> = (0..100_000).map(|i| format!("row-{i:06}")).collect();
    let mut sim = ListSim::new(
        800,
        600,
        ListSim::label_options().with_item_height(30).with_items(ids),
    );

    println!("total rows: {}", sim.list().len());
    println!("rendered:   {}", sim.list().rendered_count());
    println!("window:     {:?}", sim.list().geometry().range());

    sim.user_scroll_to(30 * 50_000);
    sim.settle();
    println!("after scrolling to the middle:");
    println!("rendered:   {}", sim.list().rendered_count());
    println!("window:     {:?}", sim.list().geometry().range());
    println!("first visible: {:?}", sim.visible_labels().first());
    println!("dom churn:  {:?}", sim.dom().counters());
}
