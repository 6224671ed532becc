//! Placed components and partial updates to them

use super::props::{ComponentProps, ComponentType};
use super::types::{Point, Size};
use serde::{Deserialize, Serialize};

/// Smallest width or height a component may be given
pub const MIN_COMPONENT_EXTENT: f64 = 10.0;

/// One placed element on a page section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// Unique identifier
    pub id: String,

    /// Horizontal position relative to the content area
    pub x: f64,

    /// Vertical position relative to the section
    pub y: f64,

    pub width: f64,

    pub height: f64,

    /// Variant tag and its properties
    #[serde(flatten)]
    pub props: ComponentProps,

    /// Set on components owned by the generated-content reconciler
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_generated: bool,
}

impl Component {
    /// Create a user-owned component
    pub fn new(id: impl Into<String>, position: Point, size: Size, props: ComponentProps) -> Self {
        Self {
            id: id.into(),
            x: position.x,
            y: position.y,
            width: size.width.max(MIN_COMPONENT_EXTENT),
            height: size.height.max(MIN_COMPONENT_EXTENT),
            props,
            is_generated: false,
        }
    }

    pub fn component_type(&self) -> ComponentType {
        self.props.component_type()
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Apply a partial update
    ///
    /// Property sets of a different variant than this component are ignored,
    /// so a text component can never be handed table properties.
    ///
    /// # Returns
    /// * `true` - At least one field was applied
    /// * `false` - Nothing in the update applied to this component
    pub fn apply(&mut self, update: ComponentUpdate) -> bool {
        let mut applied = false;
        if let Some(x) = update.x {
            self.x = x;
            applied = true;
        }
        if let Some(y) = update.y {
            self.y = y;
            applied = true;
        }
        if let Some(width) = update.width {
            self.width = width.max(MIN_COMPONENT_EXTENT);
            applied = true;
        }
        if let Some(height) = update.height {
            self.height = height.max(MIN_COMPONENT_EXTENT);
            applied = true;
        }
        if let Some(props) = update.props {
            if props.component_type() == self.component_type() {
                self.props = props;
                applied = true;
            } else {
                log::warn!(
                    "Ignoring {} properties for {} component '{}'",
                    props.component_type(),
                    self.component_type(),
                    self.id
                );
            }
        }
        applied
    }
}

/// Partial update reported by a renderer or a gesture
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentUpdate {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub props: Option<ComponentProps>,
}

impl ComponentUpdate {
    pub fn moved_to(position: Point) -> Self {
        Self {
            x: Some(position.x),
            y: Some(position.y),
            ..Self::default()
        }
    }

    pub fn resized_to(size: Size) -> Self {
        Self {
            width: Some(size.width),
            height: Some(size.height),
            ..Self::default()
        }
    }

    pub fn props(props: ComponentProps) -> Self {
        Self {
            props: Some(props),
            ..Self::default()
        }
    }
}
