//! End-to-end press sessions driven through raw touches on a stage.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::time::{Duration, Instant};

use iconstrip::gesture::{TouchPhase, TouchPoint};
use iconstrip::render::{Point, Rect, Size};
use iconstrip::{
    Icon, IconStrip, IconStripConfig, LiftState, NodeId, SelectionDelegate, Stage, StripPhase,
    Surface,
};

const HOLD: Duration = Duration::from_millis(500);

/// Records the name of every resolved icon.
#[derive(Default)]
struct Recorder {
    selections: RefCell<Vec<Option<String>>>,
}

impl SelectionDelegate for Recorder {
    fn did_select_icon(&self, strip: &IconStrip) {
        self.selections
            .borrow_mut()
            .push(strip.resolved_icon().map(|icon| icon.name().to_owned()));
    }
}

struct Fixture {
    stage: Stage,
    container: NodeId,
    strip: IconStrip,
    // The strip only holds the recorder weakly.
    recorder: Rc<Recorder>,
    now: Instant,
}

fn make_fixture(names: &[&str]) -> Fixture {
    make_fixture_with(names, IconStripConfig::default())
}

fn make_fixture_with(names: &[&str], config: IconStripConfig) -> Fixture {
    let mut stage = Stage::new(Size::new(320.0, 480.0));
    let root = stage.root();
    let container = stage.scene_mut().create_node("container");
    stage
        .scene_mut()
        .set_frame(container, Rect::new(0.0, 0.0, 320.0, 480.0))
        .unwrap();
    stage.scene_mut().add_child(root, container).unwrap();

    let icons = names.iter().map(|name| Icon::new(*name)).collect();
    let mut strip = IconStrip::with_icons(&mut stage, config, icons).unwrap();
    strip.attach(&mut stage, Some(container));

    let recorder = Rc::new(Recorder::default());
    strip.set_delegate(&recorder);

    Fixture {
        stage,
        container,
        strip,
        recorder,
        now: Instant::now(),
    }
}

impl Fixture {
    fn touch(&mut self, phase: TouchPhase, x: f32, y: f32) {
        let touch = TouchPoint::new(1, phase, Point::new(x, y), self.now);
        for event in self.stage.dispatch_touch(&touch) {
            self.strip.handle_long_press(&mut self.stage, &event).unwrap();
        }
    }

    fn advance(&mut self, by: Duration) -> bool {
        self.now += by;
        for event in self.stage.poll(self.now) {
            self.strip.handle_long_press(&mut self.stage, &event).unwrap();
        }
        self.strip.tick(&mut self.stage, self.now).unwrap()
    }

    fn begin(&mut self) {
        self.touch(TouchPhase::Started, 160.0, 240.0);
        self.advance(HOLD);
        assert_eq!(self.strip.phase(), StripPhase::Pressing);
    }

    fn lifted(&self) -> Option<String> {
        self.strip.lifted_icon().map(|icon| icon.name().to_owned())
    }

    fn lift_count(&self) -> usize {
        self.strip
            .session()
            .map(|s| s.lift_states().iter().filter(|s| **s == LiftState::Lifted).count())
            .unwrap_or(0)
    }

    fn selections(&self) -> Vec<Option<String>> {
        self.recorder.selections.borrow().clone()
    }
}

#[test]
fn test_size_formula_for_any_icon_count() {
    for n in 0..6 {
        let names: Vec<String> = (0..n).map(|i| format!("icon-{i}")).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        let fixture = make_fixture(&names);
        let count = n as f32;
        assert_eq!(
            fixture.strip.size(),
            Size::new(count * 40.0 + (count + 1.0) * 6.0, 52.0)
        );
    }
}

#[test]
fn test_press_before_delay_does_nothing() {
    let mut f = make_fixture(&["a", "b"]);
    f.touch(TouchPhase::Started, 160.0, 240.0);
    f.advance(Duration::from_millis(200));
    f.touch(TouchPhase::Ended, 160.0, 240.0);
    assert_eq!(f.strip.phase(), StripPhase::Idle);
    assert!(!f.strip.is_presented(&f.stage));
    assert!(f.selections().is_empty());
}

#[test]
fn test_hover_then_leave_resolves_none() {
    let mut f = make_fixture(&["a", "b"]);
    f.begin();
    assert!(f.strip.is_presented(&f.stage));
    assert_eq!(
        f.stage.scene().frame(f.strip.root()).unwrap(),
        Rect::new(111.0, 162.0, 98.0, 52.0)
    );

    f.touch(TouchPhase::Moved, 180.0, 240.0);
    assert_eq!(f.lifted().as_deref(), Some("b"));
    assert_eq!(f.strip.session().unwrap().lift_state(0), Some(LiftState::Neutral));

    f.touch(TouchPhase::Moved, 20.0, 240.0);
    assert_eq!(f.lifted(), None);
    assert_eq!(
        f.strip.session().unwrap().lift_states(),
        &[LiftState::Neutral, LiftState::Neutral]
    );

    f.touch(TouchPhase::Ended, 20.0, 240.0);
    assert_eq!(f.strip.resolved_icon(), None);
    assert_eq!(f.selections(), vec![None]);
}

#[test]
fn test_pick_first_icon_and_dismiss() {
    let mut f = make_fixture(&["a", "b"]);
    f.begin();
    f.touch(TouchPhase::Moved, 130.0, 240.0);
    f.touch(TouchPhase::Ended, 130.0, 240.0);

    assert_eq!(f.strip.resolved_icon().map(Icon::name), Some("a"));
    assert_eq!(f.selections(), vec![Some("a".to_owned())]);
    assert!(f.strip.is_dismissing());
    assert!(f.strip.is_presented(&f.stage));

    assert!(!f.advance(Duration::from_millis(250)));
    assert!(f.advance(Duration::from_millis(250)));
    assert!(!f.strip.is_presented(&f.stage));
    assert_eq!(f.stage.scene().parent(f.strip.root()).unwrap(), None);
    assert!(f.stage.scene().children(f.container).unwrap().is_empty());
    // Dismissed only once.
    assert!(!f.advance(Duration::from_millis(250)));
}

#[test]
fn test_vertical_position_does_not_matter() {
    let mut f = make_fixture(&["a", "b"]);
    f.begin();
    // Far below the strip, but inside its horizontal extent.
    f.touch(TouchPhase::Moved, 180.0, 470.0);
    assert_eq!(f.lifted().as_deref(), Some("b"));
}

#[test]
fn test_at_most_one_lifted_for_any_moves() {
    let mut f = make_fixture(&["a", "b", "c", "d"]);
    f.begin();
    let mut x = 0.0;
    while x <= 320.0 {
        f.touch(TouchPhase::Moved, x, 240.0);
        assert!(f.lift_count() <= 1, "two icons lifted at x = {x}");
        x += 3.5;
    }
    f.touch(TouchPhase::Ended, x, 240.0);
    assert_eq!(f.selections().len(), 1);
}

#[test]
fn test_release_without_moving_resolves_none() {
    let mut f = make_fixture(&["a", "b"]);
    f.begin();
    f.touch(TouchPhase::Ended, 160.0, 240.0);
    assert_eq!(f.selections(), vec![None]);
}

#[test]
fn test_cancelled_touch_resolves_none() {
    let mut f = make_fixture(&["a", "b"]);
    f.begin();
    f.touch(TouchPhase::Moved, 130.0, 240.0);
    f.touch(TouchPhase::Cancelled, 130.0, 240.0);
    assert_eq!(f.selections(), vec![None]);
    assert!(f.strip.is_dismissing());
}

#[test]
fn test_lifted_icon_settles_at_lift_offset() {
    let config = IconStripConfig {
        lift_offset: 30.0,
        ..IconStripConfig::default()
    };
    let mut f = make_fixture_with(&["a", "b"], config);
    f.begin();
    f.touch(TouchPhase::Moved, 180.0, 240.0);
    f.advance(Duration::from_millis(600));

    let lifted = f.strip.visuals()[1].node();
    let resting = f.strip.visuals()[0].node();
    assert_eq!(
        f.stage.scene().transform(lifted).unwrap().translation(),
        Point::new(0.0, -30.0)
    );
    assert!(f.stage.scene().transform(resting).unwrap().is_identity());
    assert!(f.stage.scene().transform(f.strip.root()).unwrap().is_identity());
    assert_eq!(f.stage.scene().opacity(f.strip.root()).unwrap(), 1.0);
}

#[test]
fn test_repeated_sessions_on_fresh_strips_start_clean() {
    let mut f = make_fixture(&["a", "b"]);
    for _ in 0..3 {
        f.begin();
        assert_eq!(f.lift_count(), 0);
        f.touch(TouchPhase::Moved, 180.0, 240.0);
        f.touch(TouchPhase::Ended, 180.0, 240.0);
        f.advance(Duration::from_secs(1));

        let icons = f.strip.icons().to_vec();
        let config = f.strip.config().clone();
        let old = std::mem::replace(
            &mut f.strip,
            IconStrip::with_icons(&mut f.stage, config, icons).unwrap(),
        );
        old.dispose(&mut f.stage).unwrap();
        f.strip.attach(&mut f.stage, Some(f.container));
        f.strip.set_delegate(&f.recorder);
    }
    assert_eq!(f.selections(), vec![Some("b".to_owned()); 3]);
    assert_eq!(f.stage.recognizer_count(), 1);
}

#[test]
fn test_display_list_while_presented() {
    let mut f = make_fixture(&["a", "b"]);
    f.begin();
    f.advance(Duration::from_millis(600));
    let items = f.stage.display_list().unwrap();
    // Shadow and fill for the strip, then one image per icon.
    assert_eq!(items.len(), 4);
}

#[test]
fn test_config_loaded_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "padding = 10.0\nicon_diameter = 20.0\nbackground = \"#0000FF\"\n\n[long_press]\nminimum_duration_ms = 100"
    )
    .unwrap();

    let config = IconStripConfig::load(file.path()).unwrap();
    let mut f = make_fixture_with(&["a", "b"], config);
    assert_eq!(f.strip.size(), Size::new(70.0, 40.0));

    f.touch(TouchPhase::Started, 160.0, 240.0);
    f.advance(Duration::from_millis(100));
    assert_eq!(f.strip.phase(), StripPhase::Pressing);
}

#[test]
fn test_missing_config_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = IconStripConfig::load(dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, iconstrip::ConfigError::Io { .. }));
}
