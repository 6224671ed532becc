//! Pointer gestures on placed components
//!
//! A gesture remembers the geometry a component had when it began, so every
//! update is computed from the total pointer delta rather than accumulated.
//! Intermediate updates follow the pointer freely; grid snapping is applied
//! only by the release update.

use crate::document_model::{
    snap_to_grid, Component, ComponentType, ComponentUpdate, Point, Size,
};

/// What a gesture does to its component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Move,
    Resize,
}

/// An in-progress move or resize of one component
#[derive(Debug, Clone, PartialEq)]
pub struct Gesture {
    kind: GestureKind,
    component_id: String,
    origin: Point,
    start_size: Size,
    keep_square: bool,
}

impl Gesture {
    /// Start a gesture on a component
    ///
    /// # Returns
    /// * `Some(Gesture)` - The component is user-owned
    /// * `None` - Generated components cannot be moved or resized
    pub fn begin(kind: GestureKind, component: &Component) -> Option<Self> {
        if component.is_generated {
            log::debug!("Refusing {:?} gesture on generated '{}'", kind, component.id);
            return None;
        }
        Some(Self {
            kind,
            component_id: component.id.clone(),
            origin: component.position(),
            start_size: component.size(),
            keep_square: component.component_type() == ComponentType::Icon,
        })
    }

    pub fn kind(&self) -> GestureKind {
        self.kind
    }

    pub fn component_id(&self) -> &str {
        &self.component_id
    }

    /// Geometry while the pointer is still down
    pub fn live_update(&self, delta: Point, grid_size: f64) -> ComponentUpdate {
        match self.kind {
            GestureKind::Move => ComponentUpdate::moved_to(self.moved(delta)),
            GestureKind::Resize => {
                let floor = grid_size.max(0.0);
                let width = (self.start_size.width + delta.x).max(floor);
                let height = (self.start_size.height + delta.y).max(floor);
                ComponentUpdate::resized_to(self.shape(width, height))
            }
        }
    }

    /// Geometry committed when the pointer is released
    pub fn release_update(&self, delta: Point, grid_size: f64, snap: bool) -> ComponentUpdate {
        match self.kind {
            GestureKind::Move => {
                let target = self.moved(delta);
                if snap {
                    ComponentUpdate::moved_to(Point::new(
                        snap_to_grid(target.x, grid_size),
                        snap_to_grid(target.y, grid_size),
                    ))
                } else {
                    ComponentUpdate::moved_to(target)
                }
            }
            GestureKind::Resize => {
                let floor = grid_size.max(0.0);
                let mut width = self.start_size.width + delta.x;
                let mut height = self.start_size.height + delta.y;
                if snap {
                    width = snap_to_grid(width, grid_size);
                    height = snap_to_grid(height, grid_size);
                }
                ComponentUpdate::resized_to(self.shape(width.max(floor), height.max(floor)))
            }
        }
    }

    /// Geometry restoring the component to where the gesture began
    pub fn cancel_update(&self) -> ComponentUpdate {
        match self.kind {
            GestureKind::Move => ComponentUpdate::moved_to(self.origin),
            GestureKind::Resize => ComponentUpdate::resized_to(self.start_size),
        }
    }

    fn moved(&self, delta: Point) -> Point {
        Point::new(self.origin.x + delta.x, self.origin.y + delta.y)
    }

    fn shape(&self, width: f64, height: f64) -> Size {
        if self.keep_square {
            let side = width.max(height);
            Size::new(side, side)
        } else {
            Size::new(width, height)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document_model::ComponentProps;

    fn component(kind: ComponentType) -> Component {
        Component::new(
            format!("{}-1", kind),
            Point::new(40.0, 40.0),
            kind.default_size(),
            ComponentProps::defaults_for(kind),
        )
    }

    #[test]
    fn test_generated_components_refuse_gestures() {
        let mut stamp = component(ComponentType::Text);
        stamp.is_generated = true;
        assert!(Gesture::begin(GestureKind::Move, &stamp).is_none());
        assert!(Gesture::begin(GestureKind::Resize, &stamp).is_none());
    }

    #[test]
    fn test_move_snaps_only_on_release() {
        let gesture = Gesture::begin(GestureKind::Move, &component(ComponentType::Text)).unwrap();
        let delta = Point::new(13.0, 27.0);
        assert_eq!(
            gesture.live_update(delta, 20.0),
            ComponentUpdate::moved_to(Point::new(53.0, 67.0))
        );
        assert_eq!(
            gesture.release_update(delta, 20.0, true),
            ComponentUpdate::moved_to(Point::new(60.0, 60.0))
        );
        assert_eq!(
            gesture.release_update(delta, 20.0, false),
            ComponentUpdate::moved_to(Point::new(53.0, 67.0))
        );
    }

    #[test]
    fn test_resize_never_shrinks_below_grid() {
        let gesture =
            Gesture::begin(GestureKind::Resize, &component(ComponentType::Text)).unwrap();
        let update = gesture.live_update(Point::new(-500.0, -500.0), 20.0);
        assert_eq!(update, ComponentUpdate::resized_to(Size::new(20.0, 20.0)));

        let update = gesture.release_update(Point::new(-195.0, -35.0), 20.0, true);
        assert_eq!(update, ComponentUpdate::resized_to(Size::new(20.0, 20.0)));
    }

    #[test]
    fn test_icons_stay_square() {
        let gesture =
            Gesture::begin(GestureKind::Resize, &component(ComponentType::Icon)).unwrap();
        let update = gesture.live_update(Point::new(30.0, 5.0), 20.0);
        assert_eq!(update, ComponentUpdate::resized_to(Size::new(80.0, 80.0)));

        let update = gesture.release_update(Point::new(3.0, 22.0), 20.0, true);
        assert_eq!(update, ComponentUpdate::resized_to(Size::new(80.0, 80.0)));
    }

    #[test]
    fn test_cancel_restores_start_geometry() {
        let gesture =
            Gesture::begin(GestureKind::Resize, &component(ComponentType::Image)).unwrap();
        assert_eq!(
            gesture.cancel_update(),
            ComponentUpdate::resized_to(Size::new(240.0, 180.0))
        );
    }
}
