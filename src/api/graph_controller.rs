use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::core::{
    Axis, AxisKind, AxisOrientation, DataProxy, GraphId, GraphSeries, ProxyEvent, Scene,
    SelectedItem, SeriesId, SeriesType,
};
use crate::error::{DataVisError, DataVisResult};
use crate::extensions::{GraphContext, GraphEvent, GraphObserver};
use crate::interaction::InputAction;
use crate::render::{DataView, PickResult, Renderer, SeriesSnapshot, SyncFrame};

use super::{ChangeTopic, Changeset, GraphConfig, SelectionFlags};

pub(crate) const AXIS_ORIENTATIONS: [AxisOrientation; 3] =
    [AxisOrientation::X, AxisOrientation::Y, AxisOrientation::Z];

pub(crate) fn axis_slot(orientation: AxisOrientation) -> DataVisResult<usize> {
    match orientation {
        AxisOrientation::X => Ok(0),
        AxisOrientation::Y => Ok(1),
        AxisOrientation::Z => Ok(2),
        AxisOrientation::None => Err(DataVisError::InvalidData(
            "axis orientation must be X, Y or Z".to_owned(),
        )),
    }
}

/// Auto range of a value axis with no visible data left.
pub(crate) const EMPTY_DATA_RANGE: (f32, f32) = (0.0, 1.0);

/// Axis values derived from the visible series, indexed X, Y, Z.
///
/// `None` leaves the axis untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisAutoValues {
    pub ranges: [Option<(f32, f32)>; 3],
    pub labels: [Option<Vec<String>>; 3],
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for crate::core::BarSeries {}
    impl Sealed for crate::core::ScatterSeries {}
    impl Sealed for crate::core::SurfaceSeries {}
}

/// Graph-family specific rules a [`GraphController`] delegates to.
pub trait ControlledSeries: GraphSeries + sealed::Sealed {
    const GRAPH_TYPE: SeriesType;
    /// Axis kind each slot accepts, indexed X, Y, Z.
    const AXIS_KINDS: [AxisKind; 3];
    /// Whether an array reset drops the selection instead of revalidating it.
    const CLEAR_SELECTION_ON_RESET: bool;

    fn data_view(&self) -> DataView<'_>;

    /// Derives auto-adjusted ranges and data labels from `visible` series.
    fn auto_axis_values(visible: &[&Self], axes: &[Axis; 3]) -> AxisAutoValues;

    /// Maps `selection` onto the current data, or onto the invalid sentinel
    /// when it no longer addresses an item.
    fn sanitize_selection(&self, selection: SelectedItem, axes: &[Axis; 3]) -> SelectedItem;

    /// Extracts the series and item a pick refers to, if it fits this family.
    fn pick_selection(pick: PickResult) -> Option<(SeriesId, SelectedItem)>;

    #[doc(hidden)]
    fn store_selection(&mut self, selection: SelectedItem) -> bool;
}

/// Work a mutation leaves for the controller to redo.
#[derive(Debug, Clone, Copy, Default)]
struct Refresh {
    ranges: bool,
    selection: bool,
    clear_selection: bool,
    leave_slicing: bool,
}

/// Controller for one graph: ordered series, three axis slots, scene,
/// selection state and the changeset consumed by the renderer.
///
/// Every mutation of attached data goes through the controller so proxy
/// events are drained into the changeset right away.
pub struct GraphController<S, R> {
    id: GraphId,
    renderer: R,
    series: IndexMap<SeriesId, S>,
    axes: [Axis; 3],
    scene: Scene,
    selection_mode: SelectionFlags,
    selected_series: Option<SeriesId>,
    pub(super) primary_series: Option<SeriesId>,
    changeset: Changeset,
    pub(super) observers: Vec<Box<dyn GraphObserver>>,
}

impl<S: ControlledSeries, R: Renderer> GraphController<S, R> {
    pub fn new(renderer: R, config: GraphConfig) -> DataVisResult<Self> {
        config.selection_mode.validate_for(S::GRAPH_TYPE)?;
        let mut scene = Scene::new(config.viewport)?;
        let camera = scene.camera_mut();
        camera.set_zoom_limits(config.min_zoom_level, config.max_zoom_level)?;
        camera.set_zoom_level(config.zoom_level);
        camera.set_preset(config.camera_preset);

        let id = GraphId::next();
        let auto_adjust = config.auto_adjust_ranges.as_array();
        let axes = std::array::from_fn(|slot| {
            let mut axis = Axis::default_of(S::AXIS_KINDS[slot]);
            axis.attach(id, AXIS_ORIENTATIONS[slot]);
            axis.set_auto_adjust_range(auto_adjust[slot]);
            axis
        });
        debug!(graph = id.raw(), graph_type = ?S::GRAPH_TYPE, "create graph controller");

        Ok(Self {
            id,
            renderer,
            series: IndexMap::new(),
            axes,
            scene,
            selection_mode: config.selection_mode,
            selected_series: None,
            primary_series: None,
            changeset: Changeset::default(),
            observers: Vec::new(),
        })
    }

    #[must_use]
    pub fn id(&self) -> GraphId {
        self.id
    }

    #[must_use]
    pub fn graph_type(&self) -> SeriesType {
        S::GRAPH_TYPE
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Changes accumulated since the last synchronize.
    #[must_use]
    pub fn changeset(&self) -> &Changeset {
        &self.changeset
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Current state expressed as a bootstrap config.
    #[must_use]
    pub fn config(&self) -> GraphConfig {
        let camera = self.scene.camera();
        let (min_zoom_level, max_zoom_level) = camera.zoom_limits();
        GraphConfig {
            viewport: self.scene.viewport(),
            selection_mode: self.selection_mode,
            camera_preset: camera.preset(),
            zoom_level: camera.zoom_level(),
            min_zoom_level,
            max_zoom_level,
            auto_adjust_ranges: super::AutoAdjustRanges::from_array(
                self.axes.each_ref().map(Axis::is_auto_adjust_range),
            ),
        }
    }

    pub(super) fn context(&self) -> GraphContext {
        GraphContext {
            graph: self.id,
            graph_type: S::GRAPH_TYPE,
            series_count: self.series.len(),
            selection_mode: self.selection_mode,
        }
    }

    pub(super) fn mark(&mut self, topic: ChangeTopic) {
        self.changeset.mark(topic);
    }

    pub(super) fn emit(&mut self, event: GraphEvent) {
        let context = self.context();
        for observer in &mut self.observers {
            observer.on_event(event, context);
        }
    }

    // ---- series registry ----

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Attached series ids in registry order.
    #[must_use]
    pub fn series_ids(&self) -> Vec<SeriesId> {
        self.series.keys().copied().collect()
    }

    #[must_use]
    pub fn has_series(&self, id: SeriesId) -> bool {
        self.series.contains_key(&id)
    }

    #[must_use]
    pub fn series(&self, id: SeriesId) -> Option<&S> {
        self.series.get(&id)
    }

    pub fn series_list(&self) -> impl Iterator<Item = &S> {
        self.series.values()
    }

    /// Appends a series. Returns `false` when its id is already attached.
    pub fn add_series(&mut self, series: S) -> bool {
        let index = self.series.len();
        self.attach_series(index, series)
    }

    /// Attaches a series at `index` in the registry order.
    pub fn insert_series(&mut self, index: usize, series: S) -> DataVisResult<bool> {
        DataVisError::check_range("series", index, 0, self.series.len())?;
        Ok(self.attach_series(index, series))
    }

    fn attach_series(&mut self, index: usize, mut series: S) -> bool {
        let id = series.id();
        if self.series.contains_key(&id) {
            trace!(series = id.raw(), "series already attached");
            return false;
        }
        // the whole series is new to the renderer, earlier proxy events are moot
        series.proxy_mut().events_mut().clear();
        if series.has_selection() {
            series.clear_selection();
        }
        self.series.shift_insert(index, id, series);
        debug!(graph = self.id.raw(), series = id.raw(), index, "attach series");
        self.changeset.mark(ChangeTopic::Series);
        self.emit(GraphEvent::SeriesAdded { series: id });
        self.refresh(Refresh {
            ranges: true,
            ..Refresh::default()
        });
        true
    }

    /// Moves an attached series to `index` in the registry order.
    pub fn move_series(&mut self, id: SeriesId, index: usize) -> DataVisResult<()> {
        let from = self
            .series
            .get_index_of(&id)
            .ok_or(DataVisError::UnknownSeries)?;
        DataVisError::check_range("series", index, 1, self.series.len())?;
        if from != index {
            self.series.move_index(from, index);
            self.changeset.mark(ChangeTopic::Series);
            self.refresh(Refresh {
                ranges: true,
                ..Refresh::default()
            });
        }
        Ok(())
    }

    /// Detaches a series and hands it back. Unknown ids are a no-op.
    pub fn remove_series(&mut self, id: SeriesId) -> Option<S> {
        let mut series = self.series.shift_remove(&id)?;
        debug!(graph = self.id.raw(), series = id.raw(), "detach series");
        let pending = series.proxy_mut().take_events();
        trace!(series = id.raw(), dropped = pending.len(), "drop events of detached series");
        self.changeset.forget_series(id);
        self.changeset.mark(ChangeTopic::Series);
        series.clear_selection();
        if self.primary_series == Some(id) {
            self.primary_series = None;
        }
        self.emit(GraphEvent::SeriesRemoved { series: id });
        if self.selected_series == Some(id) {
            self.selected_series = None;
            self.changeset.mark(ChangeTopic::Selection);
            self.emit(GraphEvent::SelectedSeriesChanged { series: None });
        }
        self.refresh(Refresh {
            ranges: true,
            ..Refresh::default()
        });
        Some(series)
    }

    /// Runs `mutate` on the proxy of an attached series and drains its events.
    pub fn update_proxy<T>(
        &mut self,
        id: SeriesId,
        mutate: impl FnOnce(&mut S::Proxy) -> T,
    ) -> DataVisResult<T> {
        let series = self.series.get_mut(&id).ok_or(DataVisError::UnknownSeries)?;
        let output = mutate(series.proxy_mut());
        let refresh = self.drain_events();
        self.refresh(refresh);
        Ok(output)
    }

    /// Runs `mutate` on an attached series (visuals, proxy) and drains events.
    ///
    /// An invalid base color is rolled back and reported.
    pub fn update_series<T>(
        &mut self,
        id: SeriesId,
        mutate: impl FnOnce(&mut S) -> T,
    ) -> DataVisResult<T> {
        let series = self.series.get_mut(&id).ok_or(DataVisError::UnknownSeries)?;
        let before = series.visuals().clone();
        let output = mutate(series);

        let mut color_error = None;
        if let Err(err) = series.visuals().base_color.validate() {
            warn!(series = id.raw(), error = %err, "rejecting series color");
            series.visuals_mut().base_color = before.base_color;
            color_error = Some(err);
        }
        let visibility_changed = series.visuals().visible != before.visible;
        if *series.visuals() != before {
            self.changeset.mark(ChangeTopic::SeriesVisuals);
        }

        let mut refresh = self.drain_events();
        refresh.ranges |= visibility_changed;
        self.refresh(refresh);
        match color_error {
            Some(err) => Err(err),
            None => Ok(output),
        }
    }

    /// Replaces the proxy of an attached series and hands the previous one
    /// back, detached. The selection on that series is dropped and the
    /// renderer sees an array reset.
    pub fn replace_proxy(&mut self, id: SeriesId, proxy: S::Proxy) -> DataVisResult<S::Proxy> {
        if !self.series.contains_key(&id) {
            return Err(DataVisError::UnknownSeries);
        }
        if self.selected_series == Some(id) {
            self.apply_selection(None);
        }
        let series = self.series.get_mut(&id).ok_or(DataVisError::UnknownSeries)?;
        let previous = series.set_proxy(proxy);
        debug!(graph = self.id.raw(), series = id.raw(), "replace series proxy");
        let refresh = self.drain_events();
        self.refresh(refresh);
        Ok(previous)
    }

    fn drain_events(&mut self) -> Refresh {
        let mut refresh = Refresh::default();
        for (id, series) in &mut self.series {
            for event in series.proxy_mut().take_events() {
                trace!(series = id.raw(), ?event, "drain proxy event");
                self.changeset.record_event(*id, event);
                refresh.ranges = true;
                refresh.selection |= event.may_invalidate_selection();
                refresh.leave_slicing |= event.affects_values();
                refresh.clear_selection |= event == ProxyEvent::ArrayReset
                    && S::CLEAR_SELECTION_ON_RESET
                    && self.selected_series == Some(*id);
            }
        }
        refresh
    }

    fn refresh(&mut self, refresh: Refresh) {
        if refresh.clear_selection {
            self.apply_selection(None);
        }
        if refresh.ranges {
            self.adjust_axis_ranges();
        }
        if refresh.ranges || refresh.selection {
            self.revalidate_selection();
        }
        // a sliced view no longer matches changed data
        if refresh.leave_slicing {
            self.set_slicing_active(false);
        }
    }

    // ---- axes ----

    #[must_use]
    pub fn axis(&self, orientation: AxisOrientation) -> Option<&Axis> {
        axis_slot(orientation).ok().map(|slot| &self.axes[slot])
    }

    /// Installs `axis` in the slot for `orientation`.
    ///
    /// Returns the replaced axis, detached, unless it was a default axis.
    /// Installing the axis already in the slot is a no-op.
    pub fn set_axis(
        &mut self,
        orientation: AxisOrientation,
        mut axis: Axis,
    ) -> DataVisResult<Option<Axis>> {
        let slot = axis_slot(orientation)?;
        let expected = S::AXIS_KINDS[slot];
        if axis.kind() != expected {
            return Err(DataVisError::AxisTypeMismatch {
                orientation,
                expected: expected.name(),
            });
        }
        if self.axes[slot].id() == axis.id() {
            return Ok(None);
        }
        let owned_elsewhere = axis.owner().is_some_and(|owner| owner != self.id);
        if owned_elsewhere || self.axes.iter().any(|current| current.id() == axis.id()) {
            return Err(DataVisError::AxisAlreadyAttached);
        }

        axis.attach(self.id, orientation);
        let mut previous = std::mem::replace(&mut self.axes[slot], axis);
        let was_default = previous.is_default();
        previous.detach();
        debug!(graph = self.id.raw(), ?orientation, "set axis");
        self.changeset.mark(ChangeTopic::AxisAssignment);
        self.notify_range_if_changed(slot, previous.range());
        self.refresh(Refresh {
            ranges: true,
            selection: true,
            ..Refresh::default()
        });
        Ok((!was_default).then_some(previous))
    }

    /// Takes the axis out of its slot and installs a fresh default axis.
    pub fn release_axis(&mut self, orientation: AxisOrientation) -> DataVisResult<Axis> {
        let slot = axis_slot(orientation)?;
        let mut fresh = Axis::default_of(S::AXIS_KINDS[slot]);
        fresh.attach(self.id, orientation);
        let mut released = std::mem::replace(&mut self.axes[slot], fresh);
        released.detach();
        debug!(graph = self.id.raw(), ?orientation, "release axis");
        self.changeset.mark(ChangeTopic::AxisAssignment);
        self.notify_range_if_changed(slot, released.range());
        self.refresh(Refresh {
            ranges: true,
            selection: true,
            ..Refresh::default()
        });
        Ok(released)
    }

    /// Runs `mutate` on the axis in a slot.
    ///
    /// The axis itself cannot be swapped here; use [`Self::set_axis`].
    pub fn update_axis<T>(
        &mut self,
        orientation: AxisOrientation,
        mutate: impl FnOnce(&mut Axis) -> T,
    ) -> DataVisResult<T> {
        let slot = axis_slot(orientation)?;
        let before = self.axes[slot].clone();
        let output = mutate(&mut self.axes[slot]);

        let axis = &self.axes[slot];
        if axis.id() != before.id()
            || axis.kind() != before.kind()
            || axis.owner() != before.owner()
            || axis.orientation() != before.orientation()
        {
            self.axes[slot] = before;
            return Err(DataVisError::InvalidData(
                "axis slots can only be replaced through set_axis".to_owned(),
            ));
        }
        if axis.labels() != before.labels() {
            self.changeset.mark(ChangeTopic::AxisLabels);
        }
        // a new category window or a re-enabled auto range changes derived ranges
        let ranges = axis.range() != before.range()
            || (axis.is_auto_adjust_range() && !before.is_auto_adjust_range());
        self.notify_range_if_changed(slot, before.range());
        self.refresh(Refresh {
            ranges,
            selection: true,
            ..Refresh::default()
        });
        Ok(output)
    }

    /// Explicit range; turns auto-adjustment off for that axis.
    pub fn set_axis_range(
        &mut self,
        orientation: AxisOrientation,
        min: f32,
        max: f32,
    ) -> DataVisResult<()> {
        self.update_axis(orientation, |axis| axis.set_range(min, max))?
    }

    fn notify_range_if_changed(&mut self, slot: usize, previous: (f32, f32)) {
        let (min, max) = self.axes[slot].range();
        if (min, max) != previous {
            self.changeset.mark(ChangeTopic::AxisRange);
            self.emit(GraphEvent::AxisRangeChanged {
                orientation: AXIS_ORIENTATIONS[slot],
                min,
                max,
            });
        }
    }

    /// Recomputes auto-adjusted axis ranges and category data labels.
    pub fn adjust_axis_ranges(&mut self) {
        let mut visible: SmallVec<[&S; 4]> = self
            .series
            .values()
            .filter(|series| series.is_visible())
            .collect();
        // an explicit primary series gets first claim on category labels
        let primary = self.primary_series;
        visible.sort_by_key(|series| primary != Some(series.id()));
        let values = S::auto_axis_values(&visible, &self.axes);
        drop(visible);

        for (slot, range) in values.ranges.into_iter().enumerate() {
            let Some((min, max)) = range else {
                continue;
            };
            if !self.axes[slot].is_auto_adjust_range() {
                continue;
            }
            if self.axes[slot].set_auto_range(min, max) {
                trace!(orientation = ?AXIS_ORIENTATIONS[slot], min, max, "auto-adjust axis range");
                self.changeset.mark(ChangeTopic::AxisRange);
                self.emit(GraphEvent::AxisRangeChanged {
                    orientation: AXIS_ORIENTATIONS[slot],
                    min,
                    max,
                });
            }
        }
        for (slot, labels) in values.labels.into_iter().enumerate() {
            let Some(labels) = labels else {
                continue;
            };
            let changed = self.axes[slot]
                .as_category_mut()
                .is_some_and(|axis| axis.set_data_labels(labels));
            if changed {
                self.changeset.mark(ChangeTopic::AxisLabels);
            }
        }
    }

    // ---- selection ----

    #[must_use]
    pub fn selection_mode(&self) -> SelectionFlags {
        self.selection_mode
    }

    /// Changes the selection mode, leaving slicing and revalidating selection.
    pub fn set_selection_mode(&mut self, mode: SelectionFlags) -> DataVisResult<()> {
        mode.validate_for(S::GRAPH_TYPE)?;
        if mode == self.selection_mode {
            return Ok(());
        }
        debug!(graph = self.id.raw(), mode = mode.bits(), "set selection mode");
        self.selection_mode = mode;
        self.changeset.mark(ChangeTopic::SelectionMode);
        self.set_slicing_active(false);
        self.emit(GraphEvent::SelectionModeChanged { mode });
        if mode.is_none() {
            self.apply_selection(None);
        } else {
            self.revalidate_selection();
        }
        Ok(())
    }

    /// Series holding the current selection, if any.
    #[must_use]
    pub fn selected_series(&self) -> Option<SeriesId> {
        self.selected_series
    }

    pub fn clear_selection(&mut self) {
        self.apply_selection(None);
    }

    pub(super) fn select(&mut self, id: SeriesId, selection: SelectedItem) -> DataVisResult<()> {
        let series = self.series.get(&id).ok_or(DataVisError::UnknownSeries)?;
        let selection = series.sanitize_selection(selection, &self.axes);
        self.apply_selection(Some((id, selection)));
        Ok(())
    }

    /// Clear-then-set: every other series is cleared before the target is
    /// written, and each series reports only its own change.
    fn apply_selection(&mut self, target: Option<(SeriesId, SelectedItem)>) {
        let target_id = target.map(|(id, _)| id);
        let mut changed: SmallVec<[(SeriesId, SelectedItem); 4]> = SmallVec::new();

        for (id, series) in &mut self.series {
            if Some(*id) != target_id && series.clear_selection() {
                changed.push((*id, series.selected()));
            }
        }

        let mut selected = None;
        if let Some((id, selection)) = target {
            if let Some(series) = self.series.get_mut(&id) {
                if series.store_selection(selection) {
                    changed.push((id, series.selected()));
                }
                if series.has_selection() {
                    selected = Some(id);
                }
            }
        }

        if !changed.is_empty() {
            self.changeset.mark(ChangeTopic::Selection);
        }
        for (series, selection) in changed {
            self.emit(GraphEvent::SelectedItemChanged { series, selection });
        }
        if selected != self.selected_series {
            self.selected_series = selected;
            self.changeset.mark(ChangeTopic::Selection);
            self.emit(GraphEvent::SelectedSeriesChanged { series: selected });
        }
        if self.selection_mode.contains(SelectionFlags::SLICE) {
            self.set_slicing_active(selected.is_some());
        }
    }

    fn revalidate_selection(&mut self) {
        let Some(id) = self.selected_series else {
            return;
        };
        let Some(series) = self.series.get(&id) else {
            return;
        };
        let current = series.selected();
        let sanitized = series.sanitize_selection(current, &self.axes);
        if sanitized != current {
            trace!(series = id.raw(), "selection no longer addresses data");
            self.apply_selection(Some((id, sanitized)));
        }
    }

    fn apply_pick(&mut self, pick: PickResult) {
        if pick == PickResult::Nothing {
            self.apply_selection(None);
            return;
        }
        let Some((id, selection)) = S::pick_selection(pick) else {
            warn!(?pick, graph_type = ?S::GRAPH_TYPE, "ignoring pick of another graph type");
            return;
        };
        if let Err(err) = self.select(id, selection) {
            warn!(error = %err, series = id.raw(), "ignoring pick of unknown series");
        }
    }

    // ---- scene & input ----

    /// Runs `mutate` on the scene (viewport, camera, slicing).
    pub fn update_scene<T>(&mut self, mutate: impl FnOnce(&mut Scene) -> T) -> T {
        let output = mutate(&mut self.scene);
        self.changeset.mark(ChangeTopic::Scene);
        output
    }

    fn set_slicing_active(&mut self, active: bool) {
        if self.scene.is_slicing_active() != active {
            self.scene.set_slicing_active(active);
            self.changeset.mark(ChangeTopic::Scene);
        }
    }

    /// Feeds an input handler request to the scene.
    pub fn apply_input(&mut self, action: InputAction) {
        match action {
            InputAction::SelectionQuery(position) => {
                if self.selection_mode.is_none() {
                    trace!("selection disabled, dropping query");
                    return;
                }
                self.scene.set_selection_query(position);
            }
            InputAction::Rotate { dx, dy } => {
                let camera = self.scene.camera_mut();
                let (x_rotation, y_rotation) = camera.rotations();
                camera.set_rotations(x_rotation + dx, y_rotation + dy);
            }
            InputAction::Zoom(level) => self.scene.camera_mut().set_zoom_level(level),
        }
        self.changeset.mark(ChangeTopic::Scene);
    }

    // ---- synchronize ----

    /// Drains proxy events, hands the frame to the renderer and clears the
    /// changeset. A pending selection query is resolved against the current
    /// data before returning.
    ///
    /// When the renderer fails the changeset and query are kept for the next
    /// attempt.
    pub fn synchronize(&mut self) -> DataVisResult<()> {
        let refresh = self.drain_events();
        self.refresh(refresh);

        let outcome = {
            let frame = SyncFrame {
                graph: self.id,
                graph_type: S::GRAPH_TYPE,
                changeset: &self.changeset,
                series: self
                    .series
                    .values()
                    .map(|series| SeriesSnapshot {
                        id: series.id(),
                        visuals: series.visuals(),
                        data: series.data_view(),
                        selection: series.selected(),
                    })
                    .collect(),
                axes: self.axes.each_ref(),
                scene: &self.scene,
                selection_mode: self.selection_mode,
                selection_query: self.scene.selection_query(),
            };
            self.renderer.synchronize(&frame)?
        };

        let reset = self.changeset.is_reset();
        let records = self.changeset.records().len();
        debug!(graph = self.id.raw(), reset, records, "synchronize");
        self.changeset.clear();
        let query = self.scene.take_selection_query();
        self.emit(GraphEvent::Synchronized { reset, records });

        match (query, outcome.pick) {
            (Some(_), Some(pick)) => self.apply_pick(pick),
            (None, Some(pick)) => warn!(?pick, "renderer picked without a pending query"),
            _ => {}
        }
        Ok(())
    }
}
