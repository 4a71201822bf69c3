use serde::{Deserialize, Serialize};

use crate::error::{DataVisError, DataVisResult};

use super::proxy::DataProxy;
use super::{
    BarDataProxy, GridPosition, ProxyEvent, ScatterDataProxy, SeriesId, SeriesType,
    SurfaceDataProxy,
};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f32, green: f32, blue: f32) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    pub fn validate(self) -> DataVisResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(DataVisError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(0.6, 0.6, 0.6)
    }
}

/// Item mesh drawn by the renderer for each data item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Mesh {
    #[default]
    Bar,
    Cube,
    Pyramid,
    Cone,
    Cylinder,
    BevelBar,
    BevelCube,
    Sphere,
    Minimal,
    Point,
    UserDefined,
}

/// Presentation attributes of a series, passed to renderers read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesVisuals {
    pub mesh: Mesh,
    pub mesh_smooth: bool,
    pub base_color: Color,
    pub item_label_format: String,
    pub name: String,
    pub visible: bool,
}

impl SeriesVisuals {
    fn with_mesh(mesh: Mesh) -> Self {
        Self {
            mesh,
            mesh_smooth: false,
            base_color: Color::default(),
            item_label_format: "@valueLabel".to_owned(),
            name: String::new(),
            visible: true,
        }
    }
}

/// Surface drawing mode flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceDrawMode {
    pub wireframe: bool,
    pub surface: bool,
}

impl Default for SurfaceDrawMode {
    fn default() -> Self {
        Self {
            wireframe: true,
            surface: true,
        }
    }
}

/// Current selection of a series; invalid sentinels mean "nothing selected".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectedItem {
    Bar(GridPosition),
    Scatter(i32),
    Surface(GridPosition),
}

/// Behaviour controllers rely on for every series variant.
pub trait GraphSeries {
    type Proxy: DataProxy;

    fn id(&self) -> SeriesId;

    fn series_type(&self) -> SeriesType;

    fn proxy(&self) -> &Self::Proxy;

    fn proxy_mut(&mut self) -> &mut Self::Proxy;

    fn visuals(&self) -> &SeriesVisuals;

    fn visuals_mut(&mut self) -> &mut SeriesVisuals;

    fn is_visible(&self) -> bool {
        self.visuals().visible
    }

    fn selected(&self) -> SelectedItem;

    fn has_selection(&self) -> bool;

    /// Resets the selection to the sentinel. Returns `true` when it changed.
    fn clear_selection(&mut self) -> bool;

    /// Swaps in a new proxy and returns the previous one, detached.
    ///
    /// The new proxy starts with a single pending array reset and the
    /// selection is cleared, since it addressed the old data.
    fn set_proxy(&mut self, proxy: Self::Proxy) -> Self::Proxy;
}

/// Bar series: one row/column dataset plus visuals and the selected bar.
#[derive(Debug, Clone)]
pub struct BarSeries {
    id: SeriesId,
    proxy: BarDataProxy,
    visuals: SeriesVisuals,
    selected_bar: GridPosition,
}

impl BarSeries {
    #[must_use]
    pub fn new(proxy: BarDataProxy) -> Self {
        let id = SeriesId::next();
        let mut proxy = proxy;
        proxy.set_attached_series(Some(id));
        Self {
            id,
            proxy,
            visuals: SeriesVisuals::with_mesh(Mesh::BevelBar),
            selected_bar: GridPosition::INVALID,
        }
    }

    #[must_use]
    pub fn selected_bar(&self) -> GridPosition {
        self.selected_bar
    }

    pub(crate) fn set_selected_bar(&mut self, position: GridPosition) -> bool {
        if self.selected_bar == position {
            return false;
        }
        self.selected_bar = position;
        true
    }
}

impl Default for BarSeries {
    fn default() -> Self {
        Self::new(BarDataProxy::new())
    }
}

/// Scatter series: a flat point set plus visuals and the selected index.
#[derive(Debug, Clone)]
pub struct ScatterSeries {
    id: SeriesId,
    proxy: ScatterDataProxy,
    visuals: SeriesVisuals,
    item_size: f32,
    selected_item: i32,
}

impl ScatterSeries {
    pub const INVALID_SELECTION_INDEX: i32 = -1;

    #[must_use]
    pub fn new(proxy: ScatterDataProxy) -> Self {
        let id = SeriesId::next();
        let mut proxy = proxy;
        proxy.set_attached_series(Some(id));
        Self {
            id,
            proxy,
            visuals: SeriesVisuals::with_mesh(Mesh::Sphere),
            item_size: 0.0,
            selected_item: Self::INVALID_SELECTION_INDEX,
        }
    }

    #[must_use]
    pub fn selected_item(&self) -> i32 {
        self.selected_item
    }

    pub(crate) fn set_selected_item(&mut self, index: i32) -> bool {
        if self.selected_item == index {
            return false;
        }
        self.selected_item = index;
        true
    }

    /// Relative item size; `0.0` lets the renderer choose.
    #[must_use]
    pub fn item_size(&self) -> f32 {
        self.item_size
    }

    pub fn set_item_size(&mut self, size: f32) -> DataVisResult<()> {
        if !size.is_finite() || !(0.0..=1.0).contains(&size) {
            return Err(DataVisError::InvalidData(
                "scatter item size must be in [0, 1]".to_owned(),
            ));
        }
        self.item_size = size;
        Ok(())
    }
}

impl Default for ScatterSeries {
    fn default() -> Self {
        Self::new(ScatterDataProxy::new())
    }
}

/// Surface series: a height grid plus visuals and the selected point.
#[derive(Debug, Clone)]
pub struct SurfaceSeries {
    id: SeriesId,
    proxy: SurfaceDataProxy,
    visuals: SeriesVisuals,
    draw_mode: SurfaceDrawMode,
    flat_shading: bool,
    selected_point: GridPosition,
}

impl SurfaceSeries {
    #[must_use]
    pub fn new(proxy: SurfaceDataProxy) -> Self {
        let id = SeriesId::next();
        let mut proxy = proxy;
        proxy.set_attached_series(Some(id));
        Self {
            id,
            proxy,
            visuals: SeriesVisuals::with_mesh(Mesh::Sphere),
            draw_mode: SurfaceDrawMode::default(),
            flat_shading: false,
            selected_point: GridPosition::INVALID,
        }
    }

    #[must_use]
    pub fn selected_point(&self) -> GridPosition {
        self.selected_point
    }

    pub(crate) fn set_selected_point(&mut self, position: GridPosition) -> bool {
        if self.selected_point == position {
            return false;
        }
        self.selected_point = position;
        true
    }

    #[must_use]
    pub fn draw_mode(&self) -> SurfaceDrawMode {
        self.draw_mode
    }

    /// At least one of wireframe or surface must stay enabled.
    pub fn set_draw_mode(&mut self, mode: SurfaceDrawMode) -> DataVisResult<()> {
        if !mode.wireframe && !mode.surface {
            return Err(DataVisError::InvalidData(
                "surface draw mode must enable wireframe or surface".to_owned(),
            ));
        }
        self.draw_mode = mode;
        Ok(())
    }

    #[must_use]
    pub fn is_flat_shading(&self) -> bool {
        self.flat_shading
    }

    pub fn set_flat_shading(&mut self, flat: bool) {
        self.flat_shading = flat;
    }
}

impl Default for SurfaceSeries {
    fn default() -> Self {
        Self::new(SurfaceDataProxy::new())
    }
}

macro_rules! impl_graph_series {
    ($series:ty, $proxy:ty, $kind:expr, $selection:ident, $variant:path, $sentinel:expr) => {
        impl GraphSeries for $series {
            type Proxy = $proxy;

            fn id(&self) -> SeriesId {
                self.id
            }

            fn series_type(&self) -> SeriesType {
                $kind
            }

            fn proxy(&self) -> &Self::Proxy {
                &self.proxy
            }

            fn proxy_mut(&mut self) -> &mut Self::Proxy {
                &mut self.proxy
            }

            fn visuals(&self) -> &SeriesVisuals {
                &self.visuals
            }

            fn visuals_mut(&mut self) -> &mut SeriesVisuals {
                &mut self.visuals
            }

            fn selected(&self) -> SelectedItem {
                $variant(self.$selection)
            }

            fn has_selection(&self) -> bool {
                self.$selection != $sentinel
            }

            fn clear_selection(&mut self) -> bool {
                if self.$selection == $sentinel {
                    return false;
                }
                self.$selection = $sentinel;
                true
            }

            fn set_proxy(&mut self, mut proxy: Self::Proxy) -> Self::Proxy {
                proxy.events_mut().clear();
                proxy.set_attached_series(Some(self.id));
                proxy.events_mut().push(ProxyEvent::ArrayReset);
                let mut previous = std::mem::replace(&mut self.proxy, proxy);
                previous.set_attached_series(None);
                previous.events_mut().clear();
                self.$selection = $sentinel;
                previous
            }
        }
    };
}

impl_graph_series!(
    BarSeries,
    BarDataProxy,
    SeriesType::Bar,
    selected_bar,
    SelectedItem::Bar,
    GridPosition::INVALID
);
impl_graph_series!(
    ScatterSeries,
    ScatterDataProxy,
    SeriesType::Scatter,
    selected_item,
    SelectedItem::Scatter,
    ScatterSeries::INVALID_SELECTION_INDEX
);
impl_graph_series!(
    SurfaceSeries,
    SurfaceDataProxy,
    SeriesType::Surface,
    selected_point,
    SelectedItem::Surface,
    GridPosition::INVALID
);

#[cfg(test)]
mod tests {
    use super::{BarSeries, Color, GraphSeries, ScatterSeries};
    use crate::core::{BarDataProxy, GridPosition, bar_row};
    use crate::core::proxy::DataProxy;

    #[test]
    fn new_series_binds_its_proxy() {
        let series = BarSeries::default();
        assert_eq!(series.proxy().attached_series(), Some(series.id()));
        assert_eq!(series.selected_bar(), GridPosition::INVALID);
    }

    #[test]
    fn clear_selection_reports_change_once() {
        let mut series = ScatterSeries::default();
        assert!(series.set_selected_item(3));
        assert!(series.clear_selection());
        assert!(!series.clear_selection());
        assert_eq!(series.selected_item(), ScatterSeries::INVALID_SELECTION_INDEX);
    }

    #[test]
    fn detached_proxy_swap_rebinds_and_clears_selection() {
        let mut series = BarSeries::default();
        assert!(series.set_selected_bar(GridPosition::new(0, 0)));

        let replacement = BarDataProxy::with_array(vec![bar_row(&[5.0])]);
        let previous = series.set_proxy(replacement);

        assert_eq!(previous.attached_series(), None);
        assert!(!previous.has_pending_events());
        assert_eq!(series.proxy().attached_series(), Some(series.id()));
        assert_eq!(series.proxy().row_count(), 1);
        assert_eq!(series.proxy().events().len(), 1);
        assert_eq!(series.selected_bar(), GridPosition::INVALID);
    }

    #[test]
    fn color_rejects_out_of_range_channel() {
        assert!(Color::rgba(0.0, 1.2, 0.0, 1.0).validate().is_err());
        assert!(Color::rgb(0.2, 0.4, 0.6).validate().is_ok());
    }
}
