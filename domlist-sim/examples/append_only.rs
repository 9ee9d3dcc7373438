use domlist_sim::ListSim;

fn main() {
    // An append-only log: nodes are never evicted, so scrolling back through history causes
    // zero DOM churn.
    let mut sim = ListSim::new(
        800,
        600,
        ListSim::label_options()
            .with_item_height(20)
            .with_append_only(true)
            .with_items((0..30).map(|i| format!("log-{i:04}"))),
    );

    for batch in 0..10 {
        let start = 30 + batch * 25;
        sim.list_mut()
            .batch_add((start..start + 25).map(|i| format!("log-{i:04}")));
        sim.list_mut().scroll_to_bottom();
        sim.settle();
    }

    println!("lines:    {}", sim.list().len());
    println!("rendered: {}", sim.list().rendered_count());
    println!("detaches: {}", sim.dom().counters().detach_ops);

    sim.user_scroll_to(0);
    sim.settle();
    println!("after scrolling home, detaches: {}", sim.dom().counters().detach_ops);
}
