use serde::{Deserialize, Serialize};

use crate::error::{DataVisError, DataVisResult};

use super::{AxisId, GraphId};

/// Spatial slot an axis is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AxisOrientation {
    #[default]
    None,
    X,
    Y,
    Z,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisKind {
    Category,
    Value,
}

impl AxisKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Value => "value",
        }
    }
}

/// State shared by both axis kinds.
#[derive(Debug, Clone, PartialEq)]
struct AxisCommon {
    id: AxisId,
    title: String,
    orientation: AxisOrientation,
    owner: Option<GraphId>,
    min: f32,
    max: f32,
    auto_adjust_range: bool,
    is_default: bool,
}

impl AxisCommon {
    fn new() -> Self {
        Self {
            id: AxisId::next(),
            title: String::new(),
            orientation: AxisOrientation::None,
            owner: None,
            min: 0.0,
            max: 10.0,
            auto_adjust_range: true,
            is_default: false,
        }
    }

    fn set_range(&mut self, min: f32, max: f32) -> DataVisResult<()> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(DataVisError::InvalidRange { min, max });
        }
        self.min = min;
        self.max = max;
        self.auto_adjust_range = false;
        Ok(())
    }
}

/// Numeric axis with a continuous range.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueAxis {
    common: AxisCommon,
    segment_count: u32,
    sub_segment_count: u32,
    label_format: String,
    reversed: bool,
}

impl Default for ValueAxis {
    fn default() -> Self {
        Self {
            common: AxisCommon::new(),
            segment_count: 5,
            sub_segment_count: 1,
            label_format: "%.2f".to_owned(),
            reversed: false,
        }
    }
}

impl ValueAxis {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn segment_count(&self) -> u32 {
        self.segment_count
    }

    pub fn set_segment_count(&mut self, count: u32) -> DataVisResult<()> {
        if count == 0 {
            return Err(DataVisError::InvalidData(
                "segment count must be > 0".to_owned(),
            ));
        }
        self.segment_count = count;
        Ok(())
    }

    #[must_use]
    pub fn sub_segment_count(&self) -> u32 {
        self.sub_segment_count
    }

    pub fn set_sub_segment_count(&mut self, count: u32) -> DataVisResult<()> {
        if count == 0 {
            return Err(DataVisError::InvalidData(
                "sub-segment count must be > 0".to_owned(),
            ));
        }
        self.sub_segment_count = count;
        Ok(())
    }

    #[must_use]
    pub fn label_format(&self) -> &str {
        &self.label_format
    }

    pub fn set_label_format(&mut self, format: impl Into<String>) {
        self.label_format = format.into();
    }

    #[must_use]
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    pub fn set_reversed(&mut self, reversed: bool) {
        self.reversed = reversed;
    }
}

/// Axis over discrete row or column indices.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAxis {
    common: AxisCommon,
    labels: Vec<String>,
    data_labels: Vec<String>,
}

impl Default for CategoryAxis {
    fn default() -> Self {
        let mut common = AxisCommon::new();
        common.max = 0.0;
        Self {
            common,
            labels: Vec::new(),
            data_labels: Vec::new(),
        }
    }
}

impl CategoryAxis {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit labels win over labels collected from series data.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        if self.labels.is_empty() {
            &self.data_labels
        } else {
            &self.labels
        }
    }

    pub fn set_labels(&mut self, labels: Vec<String>) {
        self.labels = labels;
    }

    pub(crate) fn set_data_labels(&mut self, labels: Vec<String>) -> bool {
        if self.data_labels == labels {
            return false;
        }
        self.data_labels = labels;
        true
    }
}

/// Tagged axis variant stored in a controller slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Axis {
    Category(CategoryAxis),
    Value(ValueAxis),
}

impl Axis {
    #[must_use]
    pub fn category() -> Self {
        Self::Category(CategoryAxis::new())
    }

    #[must_use]
    pub fn value() -> Self {
        Self::Value(ValueAxis::new())
    }

    pub(crate) fn default_of(kind: AxisKind) -> Self {
        let mut axis = match kind {
            AxisKind::Category => Self::category(),
            AxisKind::Value => Self::value(),
        };
        axis.common_mut().is_default = true;
        axis
    }

    fn common(&self) -> &AxisCommon {
        match self {
            Self::Category(axis) => &axis.common,
            Self::Value(axis) => &axis.common,
        }
    }

    fn common_mut(&mut self) -> &mut AxisCommon {
        match self {
            Self::Category(axis) => &mut axis.common,
            Self::Value(axis) => &mut axis.common,
        }
    }

    #[must_use]
    pub fn kind(&self) -> AxisKind {
        match self {
            Self::Category(_) => AxisKind::Category,
            Self::Value(_) => AxisKind::Value,
        }
    }

    #[must_use]
    pub fn id(&self) -> AxisId {
        self.common().id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.common().title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.common_mut().title = title.into();
    }

    #[must_use]
    pub fn orientation(&self) -> AxisOrientation {
        self.common().orientation
    }

    /// Graph currently owning the axis; an axis has at most one parent.
    #[must_use]
    pub fn owner(&self) -> Option<GraphId> {
        self.common().owner
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        self.common().is_default
    }

    #[must_use]
    pub fn min(&self) -> f32 {
        self.common().min
    }

    #[must_use]
    pub fn max(&self) -> f32 {
        self.common().max
    }

    #[must_use]
    pub fn range(&self) -> (f32, f32) {
        (self.min(), self.max())
    }

    /// Sets an explicit range and turns auto-adjustment off.
    ///
    /// Non-finite bounds or `min > max` are rejected without any change.
    pub fn set_range(&mut self, min: f32, max: f32) -> DataVisResult<()> {
        self.common_mut().set_range(min, max)
    }

    pub fn set_min(&mut self, min: f32) -> DataVisResult<()> {
        let max = self.max();
        self.set_range(min, max)
    }

    pub fn set_max(&mut self, max: f32) -> DataVisResult<()> {
        let min = self.min();
        self.set_range(min, max)
    }

    #[must_use]
    pub fn is_auto_adjust_range(&self) -> bool {
        self.common().auto_adjust_range
    }

    pub fn set_auto_adjust_range(&mut self, auto_adjust: bool) {
        self.common_mut().auto_adjust_range = auto_adjust;
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        match self {
            Self::Category(axis) => axis.labels(),
            Self::Value(_) => &[],
        }
    }

    #[must_use]
    pub fn as_category(&self) -> Option<&CategoryAxis> {
        match self {
            Self::Category(axis) => Some(axis),
            Self::Value(_) => None,
        }
    }

    #[must_use]
    pub fn as_value(&self) -> Option<&ValueAxis> {
        match self {
            Self::Value(axis) => Some(axis),
            Self::Category(_) => None,
        }
    }

    pub fn as_category_mut(&mut self) -> Option<&mut CategoryAxis> {
        match self {
            Self::Category(axis) => Some(axis),
            Self::Value(_) => None,
        }
    }

    pub fn as_value_mut(&mut self) -> Option<&mut ValueAxis> {
        match self {
            Self::Value(axis) => Some(axis),
            Self::Category(_) => None,
        }
    }

    /// Range written by auto-adjustment; keeps the auto flag untouched.
    pub(crate) fn set_auto_range(&mut self, min: f32, max: f32) -> bool {
        let common = self.common_mut();
        if common.min == min && common.max == max {
            return false;
        }
        common.min = min;
        common.max = max;
        true
    }

    pub(crate) fn attach(&mut self, owner: GraphId, orientation: AxisOrientation) {
        let common = self.common_mut();
        common.owner = Some(owner);
        common.orientation = orientation;
    }

    pub(crate) fn detach(&mut self) {
        let common = self.common_mut();
        common.owner = None;
        common.orientation = AxisOrientation::None;
        common.is_default = false;
    }
}

#[cfg(test)]
mod tests {
    use super::{Axis, AxisKind};

    #[test]
    fn explicit_range_disables_auto_adjust() {
        let mut axis = Axis::value();
        assert!(axis.is_auto_adjust_range());
        axis.set_range(-2.0, 8.0).expect("valid range");
        assert_eq!(axis.range(), (-2.0, 8.0));
        assert!(!axis.is_auto_adjust_range());
    }

    #[test]
    fn inverted_range_is_rejected_without_change() {
        let mut axis = Axis::value();
        let before = axis.range();
        assert!(axis.set_range(5.0, 1.0).is_err());
        assert!(axis.set_min(20.0).is_err());
        assert_eq!(axis.range(), before);
        assert!(axis.is_auto_adjust_range());
    }

    #[test]
    fn category_axis_prefers_explicit_labels() {
        let mut axis = Axis::category();
        let category = axis.as_category_mut().expect("category axis");
        category.set_data_labels(vec!["a".to_owned()]);
        assert_eq!(axis.labels(), ["a".to_owned()]);

        let category = axis.as_category_mut().expect("category axis");
        category.set_labels(vec!["explicit".to_owned()]);
        assert_eq!(axis.labels(), ["explicit".to_owned()]);
        assert_eq!(axis.kind(), AxisKind::Category);
    }
}
