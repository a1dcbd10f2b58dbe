//! Per-press drag state.

use iconstrip_render::Point;

/// Hover state of one icon visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LiftState {
    /// Resting in its slot.
    #[default]
    Neutral,
    /// Raised above the strip because the finger is over it.
    Lifted,
}

/// State that lives from press-begin to press-end.
///
/// At most one visual is ever [`LiftState::Lifted`].
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    location: Point,
    lift: Vec<LiftState>,
}

impl DragSession {
    /// Start a session with every visual neutral.
    pub fn new(location: Point, visual_count: usize) -> Self {
        Self {
            location,
            lift: vec![LiftState::Neutral; visual_count],
        }
    }

    /// Last press location in container coordinates.
    pub fn location(&self) -> Point {
        self.location
    }

    /// Record a new press location.
    pub fn set_location(&mut self, location: Point) {
        self.location = location;
    }

    /// Lift state of every visual, in display order.
    pub fn lift_states(&self) -> &[LiftState] {
        &self.lift
    }

    /// Lift state of one visual.
    pub fn lift_state(&self, index: usize) -> Option<LiftState> {
        self.lift.get(index).copied()
    }

    /// Index of the lifted visual.
    pub fn lifted(&self) -> Option<usize> {
        self.lift.iter().position(|s| *s == LiftState::Lifted)
    }

    /// Lift `index` and drop every other visual back to neutral.
    ///
    /// An out-of-range index leaves every visual neutral.
    pub fn lift_only(&mut self, index: usize) {
        for (i, state) in self.lift.iter_mut().enumerate() {
            *state = if i == index {
                LiftState::Lifted
            } else {
                LiftState::Neutral
            };
        }
    }

    /// Drop every visual back to neutral.
    pub fn reset_all(&mut self) {
        self.lift.fill(LiftState::Neutral);
    }

    /// Forget all lift states and track `visual_count` neutral visuals instead.
    pub fn reset_visuals(&mut self, visual_count: usize) {
        self.lift.clear();
        self.lift.resize(visual_count, LiftState::Neutral);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_neutral() {
        let session = DragSession::new(Point::new(1.0, 2.0), 3);
        assert_eq!(session.lift_states(), &[LiftState::Neutral; 3]);
        assert_eq!(session.lifted(), None);
        assert_eq!(session.location(), Point::new(1.0, 2.0));
    }

    #[test]
    fn test_lift_only_keeps_a_single_lifted() {
        let mut session = DragSession::new(Point::ZERO, 3);
        session.lift_only(0);
        session.lift_only(2);
        assert_eq!(session.lifted(), Some(2));
        assert_eq!(
            session
                .lift_states()
                .iter()
                .filter(|s| **s == LiftState::Lifted)
                .count(),
            1
        );
        assert_eq!(session.lift_state(0), Some(LiftState::Neutral));
    }

    #[test]
    fn test_out_of_range_lift_resets() {
        let mut session = DragSession::new(Point::ZERO, 2);
        session.lift_only(1);
        session.lift_only(5);
        assert_eq!(session.lifted(), None);
    }

    #[test]
    fn test_reset() {
        let mut session = DragSession::new(Point::ZERO, 2);
        session.lift_only(1);
        session.reset_all();
        assert_eq!(session.lifted(), None);

        session.lift_only(0);
        session.reset_visuals(4);
        assert_eq!(session.lift_states(), &[LiftState::Neutral; 4]);
    }
}
