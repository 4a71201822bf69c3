use std::sync::Arc;

use parking_lot::Mutex;

use datavis3d_rs::DataVisError;
use datavis3d_rs::api::{BarsController, GraphConfig, ScatterController, SelectionFlags};
use datavis3d_rs::core::{
    AxisOrientation, BarDataItem, BarDataProxy, BarSeries, DataProxy, GraphSeries, GridPosition,
    ScatterDataItem, ScatterDataProxy, ScatterSeries, ScreenPoint, SelectedItem, SeriesId,
    Viewport, bar_row,
};
use datavis3d_rs::extensions::{GraphContext, GraphEvent, GraphObserver};
use datavis3d_rs::interaction::InputAction;
use datavis3d_rs::render::{NullRenderer, PickResult};

#[derive(Clone, Default)]
struct Recorder {
    events: Arc<Mutex<Vec<GraphEvent>>>,
}

impl GraphObserver for Recorder {
    fn id(&self) -> &str {
        "recorder"
    }

    fn on_event(&mut self, event: GraphEvent, _context: GraphContext) {
        self.events.lock().push(event);
    }
}

fn item_changes(events: &[GraphEvent], series: SeriesId) -> Vec<SelectedItem> {
    events
        .iter()
        .filter_map(|event| match event {
            GraphEvent::SelectedItemChanged {
                series: changed,
                selection,
            } if *changed == series => Some(*selection),
            _ => None,
        })
        .collect()
}

fn bars_with_two_series(
    mode: SelectionFlags,
) -> (BarsController<NullRenderer>, SeriesId, SeriesId, Recorder) {
    let config = GraphConfig::new(Viewport::new(800, 600)).with_selection_mode(mode);
    let mut graph = BarsController::new(NullRenderer::default(), config).expect("controller");
    let first = BarSeries::new(BarDataProxy::with_array(vec![bar_row(&[1.0, 2.0]); 3]));
    let second = BarSeries::new(BarDataProxy::with_array(vec![bar_row(&[3.0, 4.0]); 3]));
    let ids = (first.id(), second.id());
    graph.add_series(first);
    graph.add_series(second);

    let recorder = Recorder::default();
    graph
        .register_observer(Box::new(recorder.clone()))
        .expect("register recorder");
    (graph, ids.0, ids.1, recorder)
}

#[test]
fn selecting_in_another_series_clears_the_previous_one() {
    let (mut graph, first, second, recorder) = bars_with_two_series(SelectionFlags::ITEM);

    graph
        .set_selected_bar(first, GridPosition::new(1, 1))
        .expect("select in first");
    recorder.events.lock().clear();
    graph
        .set_selected_bar(second, GridPosition::new(2, 0))
        .expect("select in second");

    let first_bar = graph.series(first).map(BarSeries::selected_bar);
    assert_eq!(first_bar, Some(GridPosition::INVALID));
    assert_eq!(graph.selected_bar(), Some((second, GridPosition::new(2, 0))));

    let events = recorder.events.lock();
    assert_eq!(
        item_changes(&events, first),
        [SelectedItem::Bar(GridPosition::INVALID)]
    );
    assert_eq!(
        item_changes(&events, second),
        [SelectedItem::Bar(GridPosition::new(2, 0))]
    );
    assert!(events.contains(&GraphEvent::SelectedSeriesChanged {
        series: Some(second)
    }));
}

#[test]
fn reselecting_the_same_bar_raises_nothing() {
    let (mut graph, first, _, recorder) = bars_with_two_series(SelectionFlags::ITEM);
    graph
        .set_selected_bar(first, GridPosition::new(0, 0))
        .expect("select");
    recorder.events.lock().clear();

    graph
        .set_selected_bar(first, GridPosition::new(0, 0))
        .expect("select again");
    assert!(recorder.events.lock().is_empty());
}

#[test]
fn out_of_range_selection_is_sanitized_not_rejected() {
    let (mut graph, first, _, _) = bars_with_two_series(SelectionFlags::ITEM);
    graph
        .set_selected_bar(first, GridPosition::new(0, 1))
        .expect("select");

    graph
        .set_selected_bar(first, GridPosition::new(7, 0))
        .expect("out of range is not an error");
    assert_eq!(graph.selected_series(), None);
    assert_eq!(
        graph.series(first).map(BarSeries::selected_bar),
        Some(GridPosition::INVALID)
    );

    let stranger = BarSeries::new(BarDataProxy::new());
    assert_eq!(
        graph.set_selected_bar(stranger.id(), GridPosition::new(0, 0)),
        Err(DataVisError::UnknownSeries)
    );
}

#[test]
fn removing_rows_under_the_selection_clears_it() {
    let (mut graph, first, _, recorder) = bars_with_two_series(SelectionFlags::ITEM);
    graph
        .set_selected_bar(first, GridPosition::new(2, 1))
        .expect("select last row");
    recorder.events.lock().clear();

    graph
        .update_proxy(first, |proxy| proxy.remove_rows(1, 2, true))
        .expect("attached")
        .expect("remove rows");

    assert_eq!(graph.selected_series(), None);
    assert_eq!(
        item_changes(&recorder.events.lock(), first),
        [SelectedItem::Bar(GridPosition::INVALID)]
    );
}

#[test]
fn narrowing_the_row_axis_drops_a_selection_outside_it() {
    let (mut graph, first, _, _) = bars_with_two_series(SelectionFlags::ITEM);
    graph
        .set_selected_bar(first, GridPosition::new(0, 0))
        .expect("select");

    graph
        .set_axis_range(AxisOrientation::X, 1.0, 2.0)
        .expect("explicit row window");
    assert_eq!(graph.selected_bar(), None);
}

#[test]
fn picks_are_applied_after_synchronize() {
    let (mut graph, _, second, _) = bars_with_two_series(SelectionFlags::ITEM);
    graph.renderer_mut().pick_response = Some(PickResult::Bar {
        series: second,
        position: GridPosition::new(1, 0),
    });

    graph.apply_input(InputAction::SelectionQuery(ScreenPoint::new(10, 10)));
    assert_eq!(graph.scene().selection_query(), Some(ScreenPoint::new(10, 10)));
    graph.synchronize().expect("sync");

    assert_eq!(graph.selected_bar(), Some((second, GridPosition::new(1, 0))));
    assert_eq!(graph.scene().selection_query(), None);

    // a query that hits nothing clears the selection
    graph.apply_input(InputAction::SelectionQuery(ScreenPoint::new(0, 0)));
    graph.synchronize().expect("sync");
    assert_eq!(graph.selected_series(), None);
}

#[test]
fn queries_are_dropped_when_selection_is_disabled() {
    let (mut graph, _, _, _) = bars_with_two_series(SelectionFlags::NONE);
    graph.apply_input(InputAction::SelectionQuery(ScreenPoint::new(5, 5)));
    assert_eq!(graph.scene().selection_query(), None);
}

#[test]
fn slice_mode_tracks_whether_something_is_selected() {
    let mode = SelectionFlags::SLICE | SelectionFlags::ITEM_AND_ROW;
    let (mut graph, first, _, recorder) = bars_with_two_series(mode);

    graph
        .set_selected_bar(first, GridPosition::new(1, 0))
        .expect("select");
    assert!(graph.scene().is_slicing_active());

    graph.clear_selection();
    assert!(!graph.scene().is_slicing_active());

    graph
        .set_selected_bar(first, GridPosition::new(1, 0))
        .expect("select again");
    graph
        .set_selection_mode(SelectionFlags::ITEM)
        .expect("plain item mode");
    assert!(!graph.scene().is_slicing_active());
    assert!(recorder.events.lock().contains(&GraphEvent::SelectionModeChanged {
        mode: SelectionFlags::ITEM
    }));
}

#[test]
fn unsupported_modes_are_rejected_without_change() {
    let (mut graph, _, _, _) = bars_with_two_series(SelectionFlags::ITEM);
    assert_eq!(
        graph.set_selection_mode(SelectionFlags::SLICE),
        Err(DataVisError::InvalidSelectionMode)
    );
    assert_eq!(graph.selection_mode(), SelectionFlags::ITEM);

    let scatter_config = GraphConfig::new(Viewport::new(100, 100))
        .with_selection_mode(SelectionFlags::ITEM_AND_ROW);
    assert!(ScatterController::new(NullRenderer::default(), scatter_config).is_err());
}

#[test]
fn disabling_selection_clears_it() {
    let (mut graph, first, _, _) = bars_with_two_series(SelectionFlags::ITEM);
    graph
        .set_selected_bar(first, GridPosition::new(0, 0))
        .expect("select");
    graph
        .set_selection_mode(SelectionFlags::NONE)
        .expect("disable selection");
    assert_eq!(graph.selected_series(), None);
}

#[test]
fn scatter_selection_follows_item_removal() {
    let mut graph = ScatterController::new(
        NullRenderer::default(),
        GraphConfig::new(Viewport::new(100, 100)),
    )
    .expect("controller");
    let series = ScatterSeries::new(ScatterDataProxy::with_array(vec![
        ScatterDataItem::from_xyz(0.0, 0.0, 0.0);
        4
    ]));
    let id = series.id();
    graph.add_series(series);

    graph.set_selected_item(id, 3).expect("select last item");
    assert_eq!(graph.selected_item(), Some((id, 3)));

    graph
        .update_proxy(id, |proxy| proxy.remove_items(2, 2))
        .expect("attached")
        .expect("remove items");
    assert_eq!(graph.selected_item(), None);
    assert_eq!(
        graph.series(id).map(ScatterSeries::selected_item),
        Some(ScatterSeries::INVALID_SELECTION_INDEX)
    );
}

#[test]
fn scatter_reset_drops_selection_while_bars_keep_a_valid_one() {
    let mut scatter = ScatterController::new(
        NullRenderer::default(),
        GraphConfig::new(Viewport::new(100, 100)),
    )
    .expect("controller");
    let points = ScatterSeries::new(ScatterDataProxy::with_array(vec![
        ScatterDataItem::from_xyz(1.0, 1.0, 1.0);
        3
    ]));
    let points_id = points.id();
    scatter.add_series(points);
    scatter.set_selected_item(points_id, 1).expect("select");

    scatter
        .update_proxy(points_id, |proxy| {
            proxy.reset_array(vec![ScatterDataItem::from_xyz(2.0, 2.0, 2.0); 5])
        })
        .expect("attached");
    assert_eq!(scatter.selected_item(), None);

    let (mut bars, first, _, _) = bars_with_two_series(SelectionFlags::ITEM);
    bars.set_selected_bar(first, GridPosition::new(1, 0))
        .expect("select");
    bars.update_proxy(first, |proxy| {
        proxy.reset_array(vec![bar_row(&[7.0, 8.0]); 2], Vec::new(), Vec::new())
    })
    .expect("attached")
    .expect("reset");
    assert_eq!(bars.selected_bar(), Some((first, GridPosition::new(1, 0))));
}

#[test]
fn data_changes_leave_slice_view() {
    let mode = SelectionFlags::SLICE | SelectionFlags::ITEM_AND_ROW;
    let (mut graph, first, second, _) = bars_with_two_series(mode);
    graph
        .set_selected_bar(first, GridPosition::new(1, 0))
        .expect("select");
    assert!(graph.scene().is_slicing_active());

    graph
        .update_proxy(second, |proxy| {
            proxy.set_item(0, 0, BarDataItem::new(9.0))
        })
        .expect("attached")
        .expect("set item");
    assert!(!graph.scene().is_slicing_active());
    assert_eq!(graph.selected_bar(), Some((first, GridPosition::new(1, 0))));

    // labels do not move data, so slicing survives them
    graph
        .set_selected_bar(first, GridPosition::new(2, 0))
        .expect("select again");
    graph
        .update_proxy(first, |proxy| {
            proxy.set_row_labels(vec!["a".to_owned(), "b".to_owned(), "c".to_owned()])
        })
        .expect("attached")
        .expect("labels");
    assert!(graph.scene().is_slicing_active());
}

#[test]
fn replacing_a_proxy_resets_data_and_selection() {
    let (mut graph, first, _, recorder) = bars_with_two_series(SelectionFlags::ITEM);
    graph.synchronize().expect("initial sync");
    graph
        .set_selected_bar(first, GridPosition::new(2, 1))
        .expect("select");
    recorder.events.lock().clear();

    let previous = graph
        .replace_proxy(first, BarDataProxy::with_array(vec![bar_row(&[50.0]); 6]))
        .expect("attached series");

    assert_eq!(previous.row_count(), 3);
    assert_eq!(previous.attached_series(), None);
    let current = graph.series(first).expect("still attached");
    assert_eq!(current.proxy().attached_series(), Some(first));
    assert_eq!(current.selected_bar(), GridPosition::INVALID);
    assert_eq!(graph.selected_series(), None);
    assert_eq!(
        item_changes(&recorder.events.lock(), first),
        [SelectedItem::Bar(GridPosition::INVALID)]
    );

    assert!(graph.changeset().is_reset());
    assert_eq!(
        graph.axis(AxisOrientation::Y).expect("value axis").range(),
        (0.0, 50.0)
    );
    assert_eq!(
        graph.axis(AxisOrientation::X).expect("row axis").range(),
        (0.0, 5.0)
    );

    let stranger = BarSeries::new(BarDataProxy::new());
    assert_eq!(
        graph.replace_proxy(stranger.id(), BarDataProxy::new()).map(|_| ()),
        Err(DataVisError::UnknownSeries)
    );
}
