use crate::*;

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use domlist::{LayoutChoice, ListEvent, NodeKind};

fn ids(range: core::ops::Range<usize>) -> Vec<String> {
    range.map(|i| format!("row-{i:05}")).collect()
}

#[test]
fn scrolling_session_keeps_a_small_window() {
    let mut sim = ListSim::new(
        800,
        600,
        ListSim::label_options()
            .with_item_height(30)
            .with_items(ids(0..10_000)),
    );
    // 600 / 30 = 20 rows on screen.
    assert_eq!(sim.visible_labels(), ids(0..20));

    sim.user_scroll_to(30 * 5000);
    assert_eq!(sim.visible_labels(), ids(5000..5020));
    assert_eq!(sim.list().rendered_count(), 20);

    sim.user_scroll_to(0);
    assert_eq!(sim.visible_labels(), ids(0..20));

    sim.settle();
    assert!(sim.dom().counters().scrollbar_syncs >= 1);
    // The slab holds every node ever created, but only the window is attached.
    assert!(sim.dom().counters().detach_ops >= 40);
}

#[test]
fn initial_render_flushes_one_batch() {
    let sim = ListSim::new(
        800,
        600,
        ListSim::label_options()
            .with_item_height(30)
            .with_items(ids(0..1000)),
    );
    assert_eq!(sim.dom().counters().batch_flushes, 1);
    assert_eq!(sim.dom().counters().attach_ops, 21); // content + 20 items
}

#[test]
fn table_rows_flow_into_the_tbody() {
    let mut sim = ListSim::new(
        800,
        600,
        ListSim::label_options()
            .with_item_height(30)
            .with_layout(LayoutChoice::Table)
            .with_append_target(Some("tbody"))
            .with_items(ids(0..1000)),
    );
    let tbody = sim.list().content_node().unwrap();
    assert_eq!(sim.dom().kind_count_in(tbody, NodeKind::Row), 2);
    assert_eq!(sim.visible_labels(), ids(0..20));

    sim.user_scroll_to(30 * 100);
    assert_eq!(sim.visible_labels(), ids(100..120));
    let children = sim.dom().children(tbody);
    assert_eq!(sim.dom().kind(children[0]), NodeKind::Row);
    assert_eq!(sim.dom().extent(children[0]), 100 * 30);
    assert_eq!(sim.dom().kind(*children.last().unwrap()), NodeKind::Row);
    assert_eq!(sim.dom().extent(*children.last().unwrap()), 880 * 30);
}

#[test]
fn append_only_log_never_detaches() {
    let mut sim = ListSim::new(
        800,
        600,
        ListSim::label_options()
            .with_item_height(30)
            .with_append_only(true)
            .with_items(ids(0..40)),
    );
    for batch in 0..5 {
        let start = 40 + batch * 10;
        sim.list_mut().batch_add(ids(start..start + 10));
        sim.list_mut().scroll_to_bottom();
        sim.settle();
    }
    assert_eq!(sim.list().len(), 90);
    assert_eq!(sim.list().rendered_count(), 90);
    assert_eq!(sim.dom().counters().detach_ops, 0);
    assert!(sim.list().is_at_bottom());
}

#[test]
fn grid_reflows_on_resize() {
    let mut sim = ListSim::new(
        640,
        600,
        ListSim::label_options()
            .with_item_height(80)
            .with_item_width_value(160)
            .with_layout(LayoutChoice::Grid)
            .with_items(ids(0..11)),
    );
    let content = sim.list().content_node().unwrap();
    // 4 per row, 11 items: one filler completes the last row.
    assert_eq!(sim.list().geometry().items_per_row, 4);
    assert_eq!(sim.dom().kind_count_in(content, NodeKind::Filler), 1);

    sim.resize(480, 600);
    assert_eq!(sim.list().geometry().items_per_row, 3);
    assert_eq!(sim.dom().kind_count_in(content, NodeKind::Filler), 1);

    sim.resize(320, 600);
    assert_eq!(sim.list().geometry().items_per_row, 2);
    assert_eq!(sim.dom().kind_count_in(content, NodeKind::Filler), 1);
}

#[test]
fn view_state_survives_a_session_restart() {
    let mut sim = ListSim::new(
        800,
        600,
        ListSim::label_options()
            .with_item_height(30)
            .with_items(ids(0..10_000)),
    );
    sim.user_scroll_to(123_450);
    let state = sim.list().view_state();

    let mut restored = ListSim::new(
        800,
        600,
        ListSim::label_options()
            .with_item_height(30)
            .with_items(ids(0..10_000)),
    );
    restored.list_mut().restore_view_state(state);
    assert_eq!(restored.list().scroll_top(), sim.list().scroll_top());
    assert_eq!(restored.visible_labels(), sim.visible_labels());
}

#[test]
fn burst_of_mutations_notifies_once() {
    let mut sim = ListSim::new(
        800,
        600,
        ListSim::label_options()
            .with_item_height(30)
            .with_items(ids(0..100)),
    );
    sim.settle();

    let updates = alloc::rc::Rc::new(core::cell::Cell::new(0u32));
    let seen = alloc::rc::Rc::clone(&updates);
    sim.list_mut()
        .bind(ListEvent::ContentUpdated, move |_list| {
            seen.set(seen.get() + 1);
        });

    for i in 100..110 {
        sim.list_mut().add(format!("row-{i:05}"));
    }
    sim.settle();
    assert_eq!(updates.get(), 1);
}

#[test]
fn removal_compacts_the_window() {
    let mut sim = ListSim::new(
        800,
        600,
        ListSim::label_options()
            .with_item_height(30)
            .with_items(ids(0..1000)),
    );
    sim.list_mut().batch_remove(ids(0..5));
    let mut expected = ids(5..25);
    assert_eq!(sim.list().len(), 995);
    let mut got = sim.visible_labels();
    got.sort();
    expected.sort();
    assert_eq!(got, expected);

    // Removing far-away rows only shrinks the extent.
    let before = sim.dom().counters().attach_ops;
    sim.list_mut().remove("row-00900".to_string());
    assert_eq!(sim.dom().counters().attach_ops, before);
    assert_eq!(sim.list().content_height(), 994 * 30);
}
