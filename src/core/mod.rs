pub mod axis;
pub mod bar_data;
pub mod height_map;
mod labels;
pub mod limits;
pub mod proxy;
pub mod scatter_data;
pub mod scene;
pub mod series;
pub mod surface_data;
pub mod types;

pub use axis::{Axis, AxisKind, AxisOrientation, CategoryAxis, ValueAxis};
pub use bar_data::{BarDataArray, BarDataItem, BarDataProxy, BarDataRow, bar_row};
pub use height_map::{HeightMap, HeightMapRanges, resolve_height_map};
pub use limits::Extent;
pub use proxy::{DataProxy, ProxyCapabilities, ProxyEvent, ProxyEventQueue};
pub use scatter_data::{ScatterDataArray, ScatterDataItem, ScatterDataProxy};
pub use scene::{Camera, CameraPreset, Scene};
pub use series::{
    BarSeries, Color, GraphSeries, Mesh, ScatterSeries, SelectedItem, SeriesVisuals,
    SurfaceDrawMode, SurfaceSeries,
};
pub use surface_data::{
    DataDimensions, SurfaceDataArray, SurfaceDataItem, SurfaceDataProxy, SurfaceDataRow,
    SurfaceLimits,
};
pub(crate) use labels::merge_category_labels;
pub use types::{
    AxisId, GraphId, GridPosition, ScreenPoint, SeriesId, SeriesType, Vec3, Viewport,
};
