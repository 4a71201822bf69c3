use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DataVisError, DataVisResult};

use super::{SurfaceDataArray, SurfaceDataItem, SurfaceDataProxy, Vec3};

/// Decoded RGBA8 image used as a height source.
///
/// Pixel rows are stored top to bottom, as image decoders produce them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeightMap {
    width: usize,
    height: usize,
    pixels: Vec<[u8; 4]>,
}

impl HeightMap {
    pub fn new(width: usize, height: usize, pixels: Vec<[u8; 4]>) -> DataVisResult<Self> {
        if width.checked_mul(height) != Some(pixels.len()) {
            return Err(DataVisError::InvalidData(format!(
                "height map of {width}x{height} needs {} pixels, got {}",
                width.saturating_mul(height),
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Builds a grayscale map from one luminance byte per pixel.
    pub fn from_luma(width: usize, height: usize, luma: &[u8]) -> DataVisResult<Self> {
        let pixels = luma.iter().map(|&value| [value, value, value, 255]).collect();
        Self::new(width, height, pixels)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn is_grayscale(&self) -> bool {
        self.pixels
            .iter()
            .all(|[red, green, blue, _]| red == green && green == blue)
    }

    fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        self.pixels[y * self.width + x]
    }
}

/// Data-space extents the image is stretched over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeightMapRanges {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl HeightMapRanges {
    #[must_use]
    pub const fn new(min_x: f32, max_x: f32, min_z: f32, max_z: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_z,
            max_z,
        }
    }

    fn validate(self) -> DataVisResult<Self> {
        for (min, max) in [(self.min_x, self.max_x), (self.min_z, self.max_z)] {
            if !min.is_finite() || !max.is_finite() || min >= max {
                return Err(DataVisError::InvalidRange { min, max });
            }
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeightMapSource {
    pub map: HeightMap,
    pub ranges: HeightMapRanges,
}

/// Converts an image into a surface grid.
///
/// Grayscale images use the red channel as height, colour images the mean of
/// the RGB channels. The bottom image row becomes array row 0 at `min_z`.
#[must_use]
pub fn resolve_height_map(map: &HeightMap, ranges: HeightMapRanges) -> SurfaceDataArray {
    let grayscale = map.is_grayscale();
    let x_step = step(ranges.min_x, ranges.max_x, map.width);
    let z_step = step(ranges.min_z, ranges.max_z, map.height);

    (0..map.height)
        .map(|row| {
            let image_y = map.height - 1 - row;
            let z = ranges.min_z + row as f32 * z_step;
            (0..map.width)
                .map(|column| {
                    let [red, green, blue, _] = map.pixel(column, image_y);
                    let height = if grayscale {
                        f32::from(red)
                    } else {
                        (f32::from(red) + f32::from(green) + f32::from(blue)) / 3.0
                    };
                    let x = ranges.min_x + column as f32 * x_step;
                    SurfaceDataItem::new(Vec3::new(x, height, z))
                })
                .collect()
        })
        .collect()
}

fn step(min: f32, max: f32, samples: usize) -> f32 {
    if samples > 1 {
        (max - min) / (samples - 1) as f32
    } else {
        0.0
    }
}

impl SurfaceDataProxy {
    /// Creates a surface proxy whose grid is derived from `map`.
    ///
    /// When no ranges are given the grid spans the pixel size of the image.
    pub fn from_height_map(map: HeightMap, ranges: Option<HeightMapRanges>) -> DataVisResult<Self> {
        let mut proxy = Self::new();
        proxy.set_height_map(map, ranges)?;
        Ok(proxy)
    }

    /// Replaces the height map and re-derives the grid (one `ArrayReset`).
    pub fn set_height_map(
        &mut self,
        map: HeightMap,
        ranges: Option<HeightMapRanges>,
    ) -> DataVisResult<()> {
        let ranges = match ranges {
            Some(ranges) => ranges.validate()?,
            None => self
                .height_map
                .as_ref()
                .map(|source| source.ranges)
                .unwrap_or_else(|| {
                    HeightMapRanges::new(0.0, map.width() as f32, 0.0, map.height() as f32)
                }),
        };
        let array = resolve_height_map(&map, ranges);
        debug!(
            width = map.width(),
            height = map.height(),
            "resolve surface height map"
        );
        self.height_map = Some(HeightMapSource { map, ranges });
        self.reset_array(array)
    }

    /// Changes the data-space extents of the current height map.
    pub fn set_height_map_ranges(&mut self, ranges: HeightMapRanges) -> DataVisResult<()> {
        let ranges = ranges.validate()?;
        let Some(source) = self.height_map.as_mut() else {
            return Err(DataVisError::InvalidData(
                "surface proxy has no height map".to_owned(),
            ));
        };
        if source.ranges == ranges {
            return Ok(());
        }
        source.ranges = ranges;
        let array = resolve_height_map(&source.map, ranges);
        self.reset_array(array)
    }

    #[must_use]
    pub fn height_map(&self) -> Option<&HeightMap> {
        self.height_map.as_ref().map(|source| &source.map)
    }

    #[must_use]
    pub fn height_map_ranges(&self) -> Option<HeightMapRanges> {
        self.height_map.as_ref().map(|source| source.ranges)
    }
}
