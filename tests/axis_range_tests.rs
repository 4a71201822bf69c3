use approx::assert_relative_eq;
use datavis3d_rs::DataVisError;
use datavis3d_rs::api::{
    AutoAdjustRanges, BarsController, GraphConfig, ScatterController, SurfaceController,
};
use datavis3d_rs::core::{
    Axis, AxisOrientation, BarDataItem, BarDataProxy, BarSeries, GraphSeries, ScatterDataItem,
    ScatterDataProxy, ScatterSeries, SurfaceDataItem, SurfaceDataProxy, SurfaceSeries, Viewport,
    bar_row,
};
use datavis3d_rs::render::NullRenderer;

fn config() -> GraphConfig {
    GraphConfig::new(Viewport::new(800, 600))
}

fn bars() -> BarsController<NullRenderer> {
    BarsController::new(NullRenderer::default(), config()).expect("bars controller")
}

fn range(graph: &BarsController<NullRenderer>, orientation: AxisOrientation) -> (f32, f32) {
    graph.axis(orientation).expect("axis slot").range()
}

fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

#[test]
fn value_axis_follows_a_new_maximum() {
    let mut graph = bars();
    let series = BarSeries::new(BarDataProxy::with_array(vec![
        bar_row(&[1.0, 4.0]),
        bar_row(&[2.0, 3.0, 0.5]),
    ]));
    let id = series.id();
    graph.add_series(series);

    assert_eq!(range(&graph, AxisOrientation::X), (0.0, 1.0));
    assert_eq!(range(&graph, AxisOrientation::Y), (0.0, 4.0));
    assert_eq!(range(&graph, AxisOrientation::Z), (0.0, 2.0));

    graph
        .update_proxy(id, |proxy| proxy.set_item(1, 2, BarDataItem::new(42.5)))
        .expect("attached")
        .expect("set item");
    let (min, max) = range(&graph, AxisOrientation::Y);
    assert_relative_eq!(min, 0.0);
    assert_relative_eq!(max, 42.5);
}

#[test]
fn value_axis_includes_zero_and_widens_flat_data() {
    let mut graph = bars();
    graph.add_series(BarSeries::new(BarDataProxy::with_array(vec![bar_row(&[-3.0, -1.0])])));
    assert_eq!(range(&graph, AxisOrientation::Y), (-3.0, 0.0));

    let mut flat = bars();
    flat.add_series(BarSeries::new(BarDataProxy::with_array(vec![bar_row(&[0.0])])));
    assert_eq!(range(&flat, AxisOrientation::Y), (0.0, 1.0));
}

#[test]
fn value_range_only_covers_the_explicit_row_window() {
    let mut graph = bars();
    graph.add_series(BarSeries::new(BarDataProxy::with_array(vec![
        bar_row(&[100.0]),
        bar_row(&[5.0]),
        bar_row(&[7.0]),
    ])));
    assert_eq!(range(&graph, AxisOrientation::Y), (0.0, 100.0));

    graph
        .set_axis_range(AxisOrientation::X, 1.0, 2.0)
        .expect("explicit row window");
    assert!(!graph.axis(AxisOrientation::X).expect("x").is_auto_adjust_range());
    assert_eq!(range(&graph, AxisOrientation::Y), (0.0, 7.0));
}

#[test]
fn ranges_fall_back_when_all_data_is_removed() {
    let mut graph = bars();
    let series = BarSeries::new(BarDataProxy::with_array(vec![bar_row(&[
        1.0, 3.0, 7.5, 5.0, 2.2,
    ])]));
    let id = series.id();
    graph.add_series(series);
    assert_eq!(range(&graph, AxisOrientation::Y), (0.0, 7.5));

    graph
        .update_proxy(id, |proxy| proxy.remove_rows(0, 1, true))
        .expect("attached")
        .expect("remove row");
    assert_eq!(range(&graph, AxisOrientation::X), (0.0, 0.0));
    assert_eq!(range(&graph, AxisOrientation::Y), (0.0, 1.0));

    let mut scatter = ScatterController::new(NullRenderer::default(), config())
        .expect("scatter controller");
    let points = ScatterSeries::new(ScatterDataProxy::with_array(vec![
        ScatterDataItem::from_xyz(-4.0, 8.0, 2.0),
        ScatterDataItem::from_xyz(3.0, 9.0, 6.0),
    ]));
    let points_id = points.id();
    scatter.add_series(points);
    scatter
        .update_proxy(points_id, |proxy| proxy.reset_array_empty())
        .expect("attached");
    for orientation in [AxisOrientation::X, AxisOrientation::Y, AxisOrientation::Z] {
        assert_eq!(scatter.axis(orientation).expect("axis").range(), (0.0, 1.0));
    }
}

#[test]
fn hidden_series_do_not_contribute_to_ranges() {
    let mut graph = bars();
    let small = BarSeries::new(BarDataProxy::with_array(vec![bar_row(&[2.0])]));
    let large = BarSeries::new(BarDataProxy::with_array(vec![bar_row(&[50.0]); 4]));
    let large_id = large.id();
    graph.add_series(small);
    graph.add_series(large);
    assert_eq!(range(&graph, AxisOrientation::Y), (0.0, 50.0));

    graph
        .update_series(large_id, |series| series.visuals_mut().visible = false)
        .expect("attached");
    assert_eq!(range(&graph, AxisOrientation::Y), (0.0, 2.0));
    assert_eq!(range(&graph, AxisOrientation::X), (0.0, 0.0));
}

#[test]
fn explicit_range_is_kept_and_invalid_ranges_are_rejected() {
    let mut graph = bars();
    let series = BarSeries::new(BarDataProxy::with_array(vec![bar_row(&[1.0])]));
    let id = series.id();
    graph.add_series(series);

    graph
        .set_axis_range(AxisOrientation::Y, -10.0, 10.0)
        .expect("explicit range");
    graph
        .update_proxy(id, |proxy| proxy.add_row(bar_row(&[99.0]), None))
        .expect("attached");
    assert_eq!(range(&graph, AxisOrientation::Y), (-10.0, 10.0));

    assert_eq!(
        graph.set_axis_range(AxisOrientation::Y, 5.0, 1.0),
        Err(DataVisError::InvalidRange { min: 5.0, max: 1.0 })
    );
    assert_eq!(range(&graph, AxisOrientation::Y), (-10.0, 10.0));

    graph
        .update_axis(AxisOrientation::Y, |axis| axis.set_auto_adjust_range(true))
        .expect("re-enable auto range");
    assert_eq!(range(&graph, AxisOrientation::Y), (0.0, 99.0));
}

#[test]
fn disabled_auto_adjust_from_config_keeps_default_range() {
    let config = config().with_auto_adjust_ranges(AutoAdjustRanges {
        x: true,
        y: false,
        z: true,
    });
    let mut graph = BarsController::new(NullRenderer::default(), config).expect("controller");
    graph.add_series(BarSeries::new(BarDataProxy::with_array(vec![bar_row(&[25.0])])));
    assert_eq!(range(&graph, AxisOrientation::Y), (0.0, 10.0));
}

#[test]
fn category_labels_merge_with_first_writer_winning() {
    let mut graph = bars();
    let mut first = BarDataProxy::with_array(vec![bar_row(&[1.0]); 2]);
    first.set_row_labels(labels(&["", "b"])).expect("labels");
    let mut second = BarDataProxy::with_array(vec![bar_row(&[1.0]); 3]);
    second
        .set_row_labels(labels(&["A", "B", "C"]))
        .expect("labels");
    let second = BarSeries::new(second);
    let second_id = second.id();
    graph.add_series(BarSeries::new(first));
    graph.add_series(second);

    let axis = graph.axis(AxisOrientation::X).expect("row axis");
    assert_eq!(axis.labels(), labels(&["A", "b", "C"]).as_slice());

    graph
        .set_primary_series(Some(second_id))
        .expect("primary series");
    let axis = graph.axis(AxisOrientation::X).expect("row axis");
    assert_eq!(axis.labels(), labels(&["A", "B", "C"]).as_slice());
}

#[test]
fn explicit_category_labels_win_over_data_labels() {
    let mut graph = bars();
    let mut proxy = BarDataProxy::with_array(vec![bar_row(&[1.0, 2.0])]);
    proxy
        .set_column_labels(labels(&["c0", "c1"]))
        .expect("labels");
    graph.add_series(BarSeries::new(proxy));

    graph
        .update_axis(AxisOrientation::Z, |axis| {
            if let Some(category) = axis.as_category_mut() {
                category.set_labels(labels(&["left", "right"]));
            }
        })
        .expect("update axis");
    assert_eq!(
        graph.axis(AxisOrientation::Z).expect("z").labels(),
        labels(&["left", "right"]).as_slice()
    );
}

#[test]
fn set_axis_checks_kind_and_ownership() {
    let mut graph = bars();
    assert!(matches!(
        graph.set_axis(AxisOrientation::X, Axis::value()),
        Err(DataVisError::AxisTypeMismatch {
            orientation: AxisOrientation::X,
            ..
        })
    ));

    let shared = Axis::value();
    assert_eq!(graph.set_axis(AxisOrientation::Y, shared.clone()), Ok(None));
    let attached = graph.axis(AxisOrientation::Y).expect("y").clone();
    assert_eq!(attached.id(), shared.id());
    assert_eq!(attached.orientation(), AxisOrientation::Y);

    // installing the axis already in the slot changes nothing
    assert_eq!(graph.set_axis(AxisOrientation::Y, attached.clone()), Ok(None));

    let mut other = bars();
    assert_eq!(
        other.set_axis(AxisOrientation::Y, attached),
        Err(DataVisError::AxisAlreadyAttached)
    );
    assert!(other.set_axis(AxisOrientation::None, Axis::value()).is_err());
}

#[test]
fn replacing_a_user_axis_hands_it_back_detached() {
    let mut graph = bars();
    let mut custom = Axis::value();
    custom.set_title("height");
    let custom_id = custom.id();
    graph
        .set_axis(AxisOrientation::Y, custom)
        .expect("install custom axis");

    let previous = graph
        .set_axis(AxisOrientation::Y, Axis::value())
        .expect("replace")
        .expect("custom axis is returned");
    assert_eq!(previous.id(), custom_id);
    assert_eq!(previous.owner(), None);
    assert_eq!(previous.orientation(), AxisOrientation::None);
    assert_eq!(previous.title(), "height");
}

#[test]
fn release_axis_installs_a_fresh_default() {
    let mut graph = bars();
    let custom = Axis::category();
    let custom_id = custom.id();
    graph
        .set_axis(AxisOrientation::Z, custom)
        .expect("install custom axis");

    let released = graph
        .release_axis(AxisOrientation::Z)
        .expect("release");
    assert_eq!(released.id(), custom_id);
    assert_eq!(released.owner(), None);

    let installed = graph.axis(AxisOrientation::Z).expect("z");
    assert_ne!(installed.id(), custom_id);
    assert!(installed.is_default());
    assert_eq!(installed.owner(), Some(graph.id()));
}

#[test]
fn update_axis_cannot_swap_the_slot() {
    let mut graph = bars();
    let before = graph.axis(AxisOrientation::Y).expect("y").id();
    let result = graph.update_axis(AxisOrientation::Y, |axis| *axis = Axis::value());
    assert!(matches!(result, Err(DataVisError::InvalidData(_))));
    assert_eq!(graph.axis(AxisOrientation::Y).expect("y").id(), before);
}

#[test]
fn scatter_ranges_cover_every_visible_point() {
    let mut graph = ScatterController::new(NullRenderer::default(), config())
        .expect("scatter controller");
    let series = ScatterSeries::new(ScatterDataProxy::with_array(vec![
        ScatterDataItem::from_xyz(-2.0, 5.0, 3.0),
        ScatterDataItem::from_xyz(4.0, 5.0, -1.0),
    ]));
    let id = series.id();
    graph.add_series(series);

    let axis = |graph: &ScatterController<NullRenderer>, orientation| {
        graph.axis(orientation).expect("axis").range()
    };
    assert_eq!(axis(&graph, AxisOrientation::X), (-2.0, 4.0));
    // flat extent is widened to a usable range
    assert_eq!(axis(&graph, AxisOrientation::Y), (5.0, 6.0));
    assert_eq!(axis(&graph, AxisOrientation::Z), (-1.0, 3.0));

    graph
        .update_proxy(id, |proxy| {
            proxy.add_item(ScatterDataItem::from_xyz(10.0, -5.0, 0.0))
        })
        .expect("attached");
    assert_eq!(axis(&graph, AxisOrientation::X), (-2.0, 10.0));
    assert_eq!(axis(&graph, AxisOrientation::Y), (-5.0, 5.0));
}

#[test]
fn surface_ranges_come_from_grid_extents() {
    let mut graph = SurfaceController::new(NullRenderer::default(), config())
        .expect("surface controller");
    let grid = vec![
        vec![
            SurfaceDataItem::from_xyz(3.0, 1.0, 8.0),
            SurfaceDataItem::from_xyz(1.0, 2.0, 8.0),
        ],
        vec![
            SurfaceDataItem::from_xyz(3.0, -1.0, 4.0),
            SurfaceDataItem::from_xyz(1.0, 6.0, 4.0),
        ],
    ];
    graph.add_series(SurfaceSeries::new(
        SurfaceDataProxy::with_array(grid).expect("valid grid"),
    ));

    let range = |orientation| graph.axis(orientation).expect("axis").range();
    assert_eq!(range(AxisOrientation::X), (1.0, 3.0));
    assert_eq!(range(AxisOrientation::Y), (-1.0, 6.0));
    assert_eq!(range(AxisOrientation::Z), (4.0, 8.0));
}
