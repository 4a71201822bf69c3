use datavis3d_rs::api::{BarsController, ChangeKind, ChangeTopic, GraphConfig, ScatterController};
use datavis3d_rs::core::{
    BarDataItem, BarDataProxy, BarSeries, DataProxy, GraphSeries, ScatterDataItem,
    ScatterDataProxy, ScatterSeries, Viewport, bar_row,
};
use datavis3d_rs::render::{NullRenderer, Renderer, SyncFrame, SyncOutcome};
use datavis3d_rs::{DataVisError, DataVisResult};

fn bars() -> BarsController<NullRenderer> {
    BarsController::new(NullRenderer::default(), GraphConfig::new(Viewport::new(640, 480)))
        .expect("bars controller")
}

#[test]
fn reset_after_insert_reaches_renderer_as_reset_only() {
    let mut graph = bars();
    let series = BarSeries::new(BarDataProxy::with_array(vec![bar_row(&[1.0, 2.0])]));
    let id = series.id();
    graph.add_series(series);
    graph.synchronize().expect("initial sync");

    graph
        .update_proxy(id, |proxy| {
            proxy.insert_row(0, bar_row(&[3.0]), None)?;
            proxy.reset_array(vec![bar_row(&[4.0])], Vec::new(), Vec::new())
        })
        .expect("attached series")
        .expect("valid mutations");
    graph.synchronize().expect("sync");

    let renderer = graph.renderer();
    assert_eq!(renderer.sync_count, 2);
    assert!(renderer.last_reset);
    assert!(renderer.last_records.is_empty());
    assert!(graph.changeset().is_empty());
}

#[test]
fn records_keep_mutation_order_across_series() {
    let mut graph = bars();
    let first = BarSeries::new(BarDataProxy::with_array(vec![bar_row(&[1.0]); 3]));
    let second = BarSeries::new(BarDataProxy::with_array(vec![bar_row(&[1.0]); 3]));
    let (first_id, second_id) = (first.id(), second.id());
    graph.add_series(first);
    graph.add_series(second);
    graph.synchronize().expect("initial sync");

    graph
        .update_proxy(second_id, |proxy| proxy.remove_rows(0, 1, true))
        .expect("attached")
        .expect("remove");
    graph
        .update_proxy(first_id, |proxy| proxy.add_row(bar_row(&[2.0]), None))
        .expect("attached");
    graph
        .update_proxy(first_id, |proxy| {
            proxy.set_item(1, 0, BarDataItem::new(9.0))
        })
        .expect("attached")
        .expect("set item");

    let records = graph.changeset().records();
    assert_eq!(records.len(), 3);
    assert_eq!((records[0].series, records[0].kind), (second_id, ChangeKind::Remove));
    assert_eq!((records[1].series, records[1].kind), (first_id, ChangeKind::Insert));
    assert_eq!(records[1].start_index, 3);
    assert_eq!(records[2].column, Some(0));
    assert_eq!(graph.changeset().changed_series(), [second_id, first_id]);

    graph.synchronize().expect("sync");
    assert_eq!(graph.renderer().last_records.len(), 3);
}

#[test]
fn removing_a_series_drops_its_pending_records() {
    let mut graph = bars();
    let keep = BarSeries::new(BarDataProxy::new());
    let drop = BarSeries::new(BarDataProxy::new());
    let (keep_id, drop_id) = (keep.id(), drop.id());
    graph.add_series(keep);
    graph.add_series(drop);

    graph
        .update_proxy(keep_id, |proxy| proxy.add_row(bar_row(&[1.0]), None))
        .expect("attached");
    graph
        .update_proxy(drop_id, |proxy| proxy.add_row(bar_row(&[1.0]), None))
        .expect("attached");
    let removed = graph.remove_series(drop_id).expect("was attached");

    assert!(!removed.proxy().has_pending_events());
    assert!(graph.changeset().records().iter().all(|record| record.series == keep_id));
    assert!(graph.changeset().flags().contains_topic(ChangeTopic::Series));
    assert!(graph.remove_series(drop_id).is_none());
}

#[test]
fn mutations_before_attach_are_not_reported_as_records() {
    let mut graph = bars();
    let mut proxy = BarDataProxy::new();
    proxy.add_row(bar_row(&[1.0]), None);
    proxy.add_row(bar_row(&[2.0]), None);
    graph.add_series(BarSeries::new(proxy));

    assert!(graph.changeset().records().is_empty());
    assert!(graph.changeset().flags().contains_topic(ChangeTopic::Series));
}

#[test]
fn scatter_item_changes_become_item_records() {
    let mut graph = ScatterController::new(
        NullRenderer::default(),
        GraphConfig::new(Viewport::new(320, 240)),
    )
    .expect("scatter controller");
    let series = ScatterSeries::new(ScatterDataProxy::with_array(vec![
        ScatterDataItem::from_xyz(0.0, 0.0, 0.0),
    ]));
    let id = series.id();
    graph.add_series(series);

    graph
        .update_proxy(id, |proxy| {
            proxy.add_items(vec![ScatterDataItem::from_xyz(1.0, 2.0, 3.0); 4])
        })
        .expect("attached");
    graph.synchronize().expect("sync");

    let renderer = graph.renderer();
    assert!(renderer.last_flags.contains_topic(ChangeTopic::Items));
    assert_eq!(renderer.last_records.len(), 1);
    assert_eq!(renderer.last_records[0].count, 4);
    assert_eq!(renderer.last_item_count, 5);
}

#[derive(Default)]
struct FlakyRenderer {
    failures_left: usize,
    seen_records: Vec<usize>,
}

impl Renderer for FlakyRenderer {
    fn synchronize(&mut self, frame: &SyncFrame<'_>) -> DataVisResult<SyncOutcome> {
        self.seen_records.push(frame.changeset.records().len());
        if self.failures_left > 0 {
            self.failures_left -= 1;
            return Err(DataVisError::InvalidData("device lost".to_owned()));
        }
        Ok(SyncOutcome::default())
    }
}

#[test]
fn failed_synchronize_keeps_pending_changes() {
    let renderer = FlakyRenderer {
        failures_left: 1,
        ..FlakyRenderer::default()
    };
    let mut graph = BarsController::new(renderer, GraphConfig::new(Viewport::new(100, 100)))
        .expect("controller");
    let series = BarSeries::new(BarDataProxy::new());
    let id = series.id();
    graph.add_series(series);
    graph
        .update_proxy(id, |proxy| proxy.add_row(bar_row(&[1.0]), None))
        .expect("attached");

    assert!(graph.synchronize().is_err());
    assert_eq!(graph.changeset().records().len(), 1);

    graph.synchronize().expect("second attempt");
    assert_eq!(graph.renderer().seen_records, [1, 1]);
    assert!(graph.changeset().is_empty());
}
