//! Container surfaces hosting the icon strip.
//!
//! A [`Surface`] is what the strip needs from its environment: a retained
//! [`Scene`] to insert itself into, convert coordinates in and hit-test
//! against, plus long-press recognition installed on a node. [`Stage`] is the
//! in-process implementation: it owns a scene and routes raw touches to the
//! recognizers installed on it.

use std::time::Instant;

use iconstrip_core::logging::targets;
use iconstrip_core::{DisplayItem, NodeId, Scene, SceneError};
use iconstrip_render::{Point, Size};
use slotmap::SlotMap;

use crate::gesture::{
    LongPressConfig, LongPressEvent, LongPressRecognizer, LongPressUpdate, RecognizerId,
    TouchPhase, TouchPoint,
};

/// The environment an icon strip is hosted in.
pub trait Surface {
    /// The retained scene.
    fn scene(&self) -> &Scene;

    /// The retained scene, mutably.
    fn scene_mut(&mut self) -> &mut Scene;

    /// Installs long-press recognition on `node`.
    ///
    /// Events are reported with locations in `node`'s coordinate space.
    fn install_long_press(
        &mut self,
        node: NodeId,
        config: LongPressConfig,
    ) -> Result<RecognizerId, SceneError>;

    /// Removes a recognizer. Returns `false` if it was not installed.
    fn uninstall_long_press(&mut self, id: RecognizerId) -> bool;

    /// Whether a recognizer is following a finger, recognized or not.
    fn is_long_press_tracking(&self, id: RecognizerId) -> bool;
}

#[derive(Debug)]
struct InstalledRecognizer {
    node: NodeId,
    recognizer: LongPressRecognizer,
    // Last location delivered, in node coordinates.
    last_location: Point,
}

/// A scene plus touch routing to installed long-press recognizers.
#[derive(Debug)]
pub struct Stage {
    scene: Scene,
    recognizers: SlotMap<RecognizerId, InstalledRecognizer>,
}

impl Stage {
    /// Create a stage whose root covers `size`.
    pub fn new(size: Size) -> Self {
        Self {
            scene: Scene::new(size),
            recognizers: SlotMap::with_key(),
        }
    }

    /// The root node of the scene.
    pub fn root(&self) -> NodeId {
        self.scene.root()
    }

    /// Number of installed recognizers.
    pub fn recognizer_count(&self) -> usize {
        self.recognizers.len()
    }

    /// The node a recognizer is installed on.
    pub fn recognizer_node(&self, id: RecognizerId) -> Option<NodeId> {
        self.recognizers.get(id).map(|r| r.node)
    }

    /// Routes a touch sample (root coordinates) to every installed recognizer.
    ///
    /// A new finger only reaches recognizers whose node contains the touch
    /// location. Later samples of that finger reach it wherever they land.
    pub fn dispatch_touch(&mut self, touch: &TouchPoint) -> Vec<LongPressEvent> {
        let Self { scene, recognizers } = self;
        let root = scene.root();
        let mut events = Vec::new();

        for (id, installed) in recognizers.iter_mut() {
            if touch.phase == TouchPhase::Started && !installed.recognizer.is_tracking() {
                let inside = scene
                    .convert_point(touch.position, root, installed.node)
                    .and_then(|local| Ok(scene.bounds(installed.node)?.contains(local)));
                match inside {
                    Ok(true) => {}
                    Ok(false) => continue,
                    Err(err) => {
                        tracing::trace!(target: targets::GESTURE, recognizer = ?id, %err, "recognizer node not on stage");
                        continue;
                    }
                }
            }

            for update in installed.recognizer.process_touch(touch) {
                events.extend(Self::to_event(scene, id, installed, update));
            }
        }
        events
    }

    /// Checks every recognizer for an elapsed activation delay.
    pub fn poll(&mut self, now: Instant) -> Vec<LongPressEvent> {
        let Self { scene, recognizers } = self;
        recognizers
            .iter_mut()
            .filter_map(|(id, installed)| {
                let update = installed.recognizer.poll(now)?;
                Self::to_event(scene, id, installed, update)
            })
            .collect()
    }

    /// Flattens the whole scene into paint commands.
    pub fn display_list(&self) -> Result<Vec<DisplayItem>, SceneError> {
        self.scene.display_list(self.scene.root())
    }

    // A terminal update whose location cannot be converted, e.g. because the
    // node left the stage mid-press, is still delivered at the last location.
    fn to_event(
        scene: &Scene,
        recognizer: RecognizerId,
        installed: &mut InstalledRecognizer,
        update: LongPressUpdate,
    ) -> Option<LongPressEvent> {
        let location = match scene.convert_point(update.position, scene.root(), installed.node) {
            Ok(location) => {
                installed.last_location = location;
                location
            }
            Err(err) if update.state.is_terminal() => {
                tracing::warn!(target: targets::GESTURE, ?recognizer, %err, "delivering long-press end at last location");
                installed.last_location
            }
            Err(err) => {
                tracing::warn!(target: targets::GESTURE, ?recognizer, %err, "dropping long-press event");
                return None;
            }
        };
        Some(LongPressEvent {
            recognizer,
            state: update.state,
            location,
            timestamp: update.timestamp,
        })
    }
}

impl Surface for Stage {
    fn scene(&self) -> &Scene {
        &self.scene
    }

    fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    fn install_long_press(
        &mut self,
        node: NodeId,
        config: LongPressConfig,
    ) -> Result<RecognizerId, SceneError> {
        self.scene.node(node)?;
        let id = self.recognizers.insert(InstalledRecognizer {
            node,
            recognizer: LongPressRecognizer::with_config(config),
            last_location: Point::ZERO,
        });
        tracing::debug!(target: targets::GESTURE, recognizer = ?id, ?node, "installed long-press recognizer");
        Ok(id)
    }

    fn uninstall_long_press(&mut self, id: RecognizerId) -> bool {
        let removed = self.recognizers.remove(id).is_some();
        if removed {
            tracing::debug!(target: targets::GESTURE, recognizer = ?id, "uninstalled long-press recognizer");
        }
        removed
    }

    fn is_long_press_tracking(&self, id: RecognizerId) -> bool {
        self.recognizers
            .get(id)
            .is_some_and(|installed| installed.recognizer.is_tracking())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::GestureState;
    use iconstrip_render::Rect;
    use std::time::Duration;

    fn make_stage() -> (Stage, NodeId) {
        let mut stage = Stage::new(Size::new(400.0, 800.0));
        let root = stage.root();
        let panel = stage.scene_mut().create_node("panel");
        stage
            .scene_mut()
            .set_frame(panel, Rect::new(50.0, 100.0, 300.0, 600.0))
            .unwrap();
        stage.scene_mut().add_child(root, panel).unwrap();
        (stage, panel)
    }

    fn make_touch(phase: TouchPhase, x: f32, y: f32, at: Instant) -> TouchPoint {
        TouchPoint::new(1, phase, Point::new(x, y), at)
    }

    #[test]
    fn test_events_are_in_node_coordinates() {
        let (mut stage, panel) = make_stage();
        let id = stage
            .install_long_press(panel, LongPressConfig::default())
            .unwrap();
        let t0 = Instant::now();

        assert!(stage
            .dispatch_touch(&make_touch(TouchPhase::Started, 150.0, 300.0, t0))
            .is_empty());
        let events = stage.poll(t0 + Duration::from_millis(500));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].recognizer, id);
        assert_eq!(events[0].state, GestureState::Started);
        assert_eq!(events[0].location, Point::new(100.0, 200.0));

        // Later samples are delivered even outside the node.
        let events = stage.dispatch_touch(&make_touch(
            TouchPhase::Moved,
            10.0,
            300.0,
            t0 + Duration::from_millis(600),
        ));
        assert_eq!(events[0].state, GestureState::Updated);
        assert_eq!(events[0].location, Point::new(-40.0, 200.0));
    }

    #[test]
    fn test_touch_outside_node_is_not_tracked() {
        let (mut stage, panel) = make_stage();
        stage
            .install_long_press(panel, LongPressConfig::default())
            .unwrap();
        let t0 = Instant::now();
        stage.dispatch_touch(&make_touch(TouchPhase::Started, 10.0, 10.0, t0));
        assert!(stage.poll(t0 + Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn test_uninstall() {
        let (mut stage, panel) = make_stage();
        let id = stage
            .install_long_press(panel, LongPressConfig::default())
            .unwrap();
        assert_eq!(stage.recognizer_count(), 1);
        assert_eq!(stage.recognizer_node(id), Some(panel));
        assert!(stage.uninstall_long_press(id));
        assert!(!stage.uninstall_long_press(id));
        assert_eq!(stage.recognizer_count(), 0);
    }

    #[test]
    fn test_install_on_missing_node_fails() {
        let (mut stage, panel) = make_stage();
        stage.scene_mut().destroy(panel).unwrap();
        assert_eq!(
            stage.install_long_press(panel, LongPressConfig::default()),
            Err(SceneError::MissingNode(panel))
        );
    }

    #[test]
    fn test_tracking_state() {
        let (mut stage, panel) = make_stage();
        let id = stage
            .install_long_press(panel, LongPressConfig::default())
            .unwrap();
        let t0 = Instant::now();
        assert!(!stage.is_long_press_tracking(id));
        stage.dispatch_touch(&make_touch(TouchPhase::Started, 150.0, 300.0, t0));
        assert!(stage.is_long_press_tracking(id));
        stage.dispatch_touch(&make_touch(TouchPhase::Ended, 150.0, 300.0, t0));
        assert!(!stage.is_long_press_tracking(id));
    }

    #[test]
    fn test_end_is_delivered_after_node_leaves_stage() {
        let (mut stage, panel) = make_stage();
        stage
            .install_long_press(panel, LongPressConfig::default())
            .unwrap();
        let t0 = Instant::now();
        let t1 = t0 + Duration::from_millis(500);
        stage.dispatch_touch(&make_touch(TouchPhase::Started, 150.0, 300.0, t0));
        stage.poll(t1);
        stage.dispatch_touch(&make_touch(TouchPhase::Moved, 160.0, 300.0, t1));

        stage.scene_mut().remove_from_parent(panel).unwrap();
        // Non-terminal samples are dropped, terminal ones keep the last location.
        assert!(stage
            .dispatch_touch(&make_touch(TouchPhase::Moved, 170.0, 300.0, t1))
            .is_empty());
        let events = stage.dispatch_touch(&make_touch(TouchPhase::Ended, 170.0, 300.0, t1));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].state, GestureState::Ended);
        assert_eq!(events[0].location, Point::new(110.0, 200.0));
    }
}
