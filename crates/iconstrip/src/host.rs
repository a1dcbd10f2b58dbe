//! The application side of an icon strip.
//!
//! A [`Host`] owns one [`IconStrip`] at a time. It maps each icon to a text
//! label, listens for selections through a [`LabelReceiver`] and, once a
//! session's dismissal has finished, swaps the strip for a fresh instance on
//! the same container.

use std::cell::RefCell;
use std::mem;
use std::rc::Rc;
use std::time::Instant;

use iconstrip_core::logging::targets;
use iconstrip_core::NodeId;
use iconstrip_render::Color;

use crate::error::Result;
use crate::gesture::LongPressEvent;
use crate::icon::Icon;
use crate::strip::{IconStrip, IconStripConfig, SelectionDelegate, StripPhase};
use crate::surface::Surface;

/// What the receiver made of one finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The press ended without an icon under the finger.
    NoSelection,
    /// A known icon was chosen.
    Labeled(String),
    /// An icon of the strip was chosen but nothing is mapped to it.
    Unlabeled(Icon),
    /// The strip reported an icon it does not show.
    Foreign(Icon),
}

/// Selection delegate translating icons into labels.
#[derive(Debug)]
pub struct LabelReceiver {
    labels: Vec<(Icon, String)>,
    selected: RefCell<Option<Icon>>,
    outcomes: RefCell<Vec<SelectionOutcome>>,
}

impl LabelReceiver {
    /// Create a receiver for the given icon to label mapping.
    pub fn new(labels: Vec<(Icon, String)>) -> Self {
        Self {
            labels,
            selected: RefCell::new(None),
            outcomes: RefCell::new(Vec::new()),
        }
    }

    /// The mapped icons in insertion order.
    pub fn icons(&self) -> Vec<Icon> {
        self.labels.iter().map(|(icon, _)| icon.clone()).collect()
    }

    /// The label of `icon`.
    pub fn label(&self, icon: &Icon) -> Option<&str> {
        self.labels
            .iter()
            .find(|(candidate, _)| candidate == icon)
            .map(|(_, label)| label.as_str())
    }

    /// The currently selected icon.
    pub fn selected_icon(&self) -> Option<Icon> {
        self.selected.borrow().clone()
    }

    /// The label of the currently selected icon.
    pub fn selected_label(&self) -> Option<String> {
        let selected = self.selected.borrow();
        selected.as_ref().and_then(|icon| self.label(icon)).map(str::to_owned)
    }

    /// Every outcome recorded so far, oldest first.
    pub fn outcomes(&self) -> Vec<SelectionOutcome> {
        self.outcomes.borrow().clone()
    }

    /// The most recent outcome.
    pub fn last_outcome(&self) -> Option<SelectionOutcome> {
        self.outcomes.borrow().last().cloned()
    }

    fn resolve(&self, strip: &IconStrip) -> SelectionOutcome {
        let Some(icon) = strip.resolved_icon() else {
            self.selected.replace(None);
            tracing::info!(target: targets::HOST, "selection finished without an icon");
            return SelectionOutcome::NoSelection;
        };

        if !strip.icons().contains(icon) {
            tracing::debug!(target: targets::HOST, %icon, "resolved icon is not part of the strip; keeping previous selection");
            return SelectionOutcome::Foreign(icon.clone());
        }

        self.selected.replace(Some(icon.clone()));
        match self.label(icon) {
            Some(label) => {
                tracing::info!(target: targets::HOST, %icon, label, "icon selected");
                SelectionOutcome::Labeled(label.to_owned())
            }
            None => {
                tracing::warn!(target: targets::HOST, %icon, "selected icon has no label");
                SelectionOutcome::Unlabeled(icon.clone())
            }
        }
    }
}

impl SelectionDelegate for LabelReceiver {
    fn did_select_icon(&self, strip: &IconStrip) {
        let outcome = self.resolve(strip);
        self.outcomes.borrow_mut().push(outcome);
    }
}

/// Owner of an icon strip on one container.
#[derive(Debug)]
pub struct Host {
    container: NodeId,
    config: IconStripConfig,
    receiver: Rc<LabelReceiver>,
    strip: IconStrip,
    renewals: usize,
    renewal_pending: bool,
}

impl Host {
    /// Create a strip showing the keys of `labels` and attach it to
    /// `container`.
    pub fn new<S: Surface + ?Sized>(
        surface: &mut S,
        container: NodeId,
        config: IconStripConfig,
        labels: Vec<(Icon, String)>,
    ) -> Result<Self> {
        let receiver = Rc::new(LabelReceiver::new(labels));
        let strip = Self::build_strip(surface, container, &config, &receiver)?;
        tracing::debug!(target: targets::HOST, ?container, icons = strip.icons().len(), "host ready");
        Ok(Self {
            container,
            config,
            receiver,
            strip,
            renewals: 0,
            renewal_pending: false,
        })
    }

    /// A host with a check and a cancel icon on a blue strip.
    pub fn with_check_and_cancel<S: Surface + ?Sized>(
        surface: &mut S,
        container: NodeId,
    ) -> Result<Self> {
        let config = IconStripConfig {
            background: Color::BLUE,
            ..IconStripConfig::default()
        };
        let labels = vec![
            (Icon::new("check"), "Check icon is tapped".to_owned()),
            (Icon::new("cancel"), "Cancel icon is tapped".to_owned()),
        ];
        Self::new(surface, container, config, labels)
    }

    /// The container the strip is attached to.
    pub fn container(&self) -> NodeId {
        self.container
    }

    /// The current strip.
    pub fn strip(&self) -> &IconStrip {
        &self.strip
    }

    /// The current strip, mutably.
    pub fn strip_mut(&mut self) -> &mut IconStrip {
        &mut self.strip
    }

    /// The selection receiver.
    pub fn receiver(&self) -> &LabelReceiver {
        &self.receiver
    }

    /// How many times the strip was replaced by a fresh instance.
    pub fn renewals(&self) -> usize {
        self.renewals
    }

    /// Forward a long-press event to the strip.
    pub fn handle_event<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        event: &LongPressEvent,
    ) -> Result<()> {
        self.strip.handle_long_press(surface, event)
    }

    /// Advance the strip's animations.
    ///
    /// Returns `true` when the strip finished dismissing and was replaced.
    /// The replacement waits while a finger is held on the container, so a
    /// press that started during the dismissal is not lost. If that press
    /// turns into a new session the old strip keeps serving it.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S, now: Instant) -> Result<bool> {
        self.renewal_pending |= self.strip.tick(surface, now)?;
        if !self.renewal_pending {
            return Ok(false);
        }
        if self.strip.phase() != StripPhase::Idle || self.strip.is_dismissing() {
            self.renewal_pending = false;
            return Ok(false);
        }
        if self
            .strip
            .recognizer()
            .is_some_and(|id| surface.is_long_press_tracking(id))
        {
            tracing::trace!(target: targets::HOST, "finger down on the container; renewal deferred");
            return Ok(false);
        }

        let fresh = Self::build_strip(surface, self.container, &self.config, &self.receiver)?;
        let old = mem::replace(&mut self.strip, fresh);
        old.dispose(surface)?;
        self.renewal_pending = false;
        self.renewals += 1;
        tracing::debug!(target: targets::HOST, renewals = self.renewals, "icon strip renewed");
        Ok(true)
    }

    fn build_strip<S: Surface + ?Sized>(
        surface: &mut S,
        container: NodeId,
        config: &IconStripConfig,
        receiver: &Rc<LabelReceiver>,
    ) -> Result<IconStrip> {
        let mut strip = IconStrip::with_icons(surface, config.clone(), receiver.icons())?;
        strip.set_delegate(receiver);
        strip.try_attach(surface, Some(container))?;
        Ok(strip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::{GestureState, TouchPhase, TouchPoint};
    use crate::surface::Stage;
    use iconstrip_render::{Point, Rect, Size};
    use std::time::Duration;

    fn make_host() -> (Stage, Host) {
        let mut stage = Stage::new(Size::new(320.0, 480.0));
        let root = stage.root();
        let container = stage.scene_mut().create_node("container");
        stage
            .scene_mut()
            .set_frame(container, Rect::new(0.0, 0.0, 320.0, 480.0))
            .unwrap();
        stage.scene_mut().add_child(root, container).unwrap();
        let host = Host::with_check_and_cancel(&mut stage, container).unwrap();
        (stage, host)
    }

    fn make_event(host: &Host, state: GestureState, x: f32, at: Instant) -> LongPressEvent {
        LongPressEvent {
            recognizer: host.strip().recognizer().unwrap(),
            state,
            location: Point::new(x, 240.0),
            timestamp: at,
        }
    }

    fn press(stage: &mut Stage, host: &mut Host, moves: &[f32], at: Instant) {
        let begin = make_event(host, GestureState::Started, 160.0, at);
        host.handle_event(stage, &begin).unwrap();
        for x in moves {
            let update = make_event(host, GestureState::Updated, *x, at);
            host.handle_event(stage, &update).unwrap();
        }
        let end = make_event(host, GestureState::Ended, 160.0, at);
        host.handle_event(stage, &end).unwrap();
    }

    #[test]
    fn test_host_shows_labels_in_order() {
        let (_stage, host) = make_host();
        let names: Vec<_> = host.strip().icons().iter().map(|i| i.name().to_owned()).collect();
        assert_eq!(names, ["check", "cancel"]);
        assert_eq!(host.strip().color(), Color::BLUE);
    }

    #[test]
    fn test_labeled_selection() {
        let (mut stage, mut host) = make_host();
        // Strip origin x is 111; the check icon spans 117..157.
        press(&mut stage, &mut host, &[130.0], Instant::now());
        assert_eq!(
            host.receiver().last_outcome(),
            Some(SelectionOutcome::Labeled("Check icon is tapped".into()))
        );
        assert_eq!(
            host.receiver().selected_label().as_deref(),
            Some("Check icon is tapped")
        );
    }

    #[test]
    fn test_no_selection_clears() {
        let (mut stage, mut host) = make_host();
        let t0 = Instant::now();
        press(&mut stage, &mut host, &[130.0], t0);
        press(&mut stage, &mut host, &[10.0], t0);
        assert_eq!(host.receiver().last_outcome(), Some(SelectionOutcome::NoSelection));
        assert_eq!(host.receiver().selected_icon(), None);
        assert_eq!(host.receiver().outcomes().len(), 2);
    }

    #[test]
    fn test_foreign_icon_keeps_previous_selection() {
        let (mut stage, mut host) = make_host();
        press(&mut stage, &mut host, &[130.0], Instant::now());
        let check = host.receiver().selected_icon().unwrap();

        // The strip still reports the check icon but no longer shows it.
        host.strip_mut()
            .set_icons(&mut stage, vec![Icon::new("other")])
            .unwrap();
        host.receiver().did_select_icon(host.strip());
        assert_eq!(host.receiver().last_outcome(), Some(SelectionOutcome::Foreign(check.clone())));
        assert_eq!(host.receiver().selected_icon(), Some(check));
    }

    #[test]
    fn test_unlabeled_icon() {
        let (mut stage, mut host) = make_host();
        let extra = Icon::new("extra");
        let mut icons = host.receiver().icons();
        icons.push(extra.clone());
        host.strip_mut().set_icons(&mut stage, icons).unwrap();

        // Three icons: origin x is (320 - 144) / 2 = 88, the third spans 186..226.
        press(&mut stage, &mut host, &[200.0], Instant::now());
        assert_eq!(host.receiver().last_outcome(), Some(SelectionOutcome::Unlabeled(extra.clone())));
        assert_eq!(host.receiver().selected_icon(), Some(extra));
        assert_eq!(host.receiver().selected_label(), None);
    }

    #[test]
    fn test_strip_is_renewed_after_dismissal() {
        let (mut stage, mut host) = make_host();
        let first = host.strip().root();
        let t0 = Instant::now();
        press(&mut stage, &mut host, &[180.0], t0);
        assert_eq!(
            host.receiver().last_outcome(),
            Some(SelectionOutcome::Labeled("Cancel icon is tapped".into()))
        );

        assert!(!host.tick(&mut stage, t0 + Duration::from_millis(100)).unwrap());
        assert!(host.tick(&mut stage, t0 + Duration::from_secs(1)).unwrap());
        assert_eq!(host.renewals(), 1);
        assert!(!stage.scene().contains(first));
        assert_ne!(host.strip().root(), first);
        assert_eq!(stage.recognizer_count(), 1);
        assert_eq!(host.strip().resolved_icon(), None);
        // The selection survives the renewal.
        assert_eq!(
            host.receiver().selected_label().as_deref(),
            Some("Cancel icon is tapped")
        );
    }

    #[test]
    fn test_press_during_dismissal_is_kept() {
        let (mut stage, mut host) = make_host();
        let t0 = Instant::now();
        press(&mut stage, &mut host, &[130.0], t0);

        // A finger goes down while the strip is still sliding away.
        let t1 = t0 + Duration::from_millis(300);
        assert!(!host.tick(&mut stage, t1).unwrap());
        let touch = TouchPoint::new(7, TouchPhase::Started, Point::new(160.0, 240.0), t1);
        assert!(stage.dispatch_touch(&touch).is_empty());

        // The dismissal finishes but the strip is not replaced under the finger.
        let t2 = t0 + Duration::from_millis(600);
        assert!(!host.tick(&mut stage, t2).unwrap());
        assert_eq!(host.renewals(), 0);

        let t3 = t1 + Duration::from_millis(500);
        let events = stage.poll(t3);
        assert_eq!(events.len(), 1);
        for event in &events {
            host.handle_event(&mut stage, event).unwrap();
        }
        assert_eq!(host.strip().phase(), StripPhase::Pressing);
        assert!(host.strip().is_presented(&stage));
        assert!(!host.tick(&mut stage, t3).unwrap());

        // The second session ends normally and the strip is renewed after it.
        let release = TouchPoint::new(7, TouchPhase::Ended, Point::new(160.0, 240.0), t3);
        for event in stage.dispatch_touch(&release) {
            host.handle_event(&mut stage, &event).unwrap();
        }
        assert_eq!(host.receiver().last_outcome(), Some(SelectionOutcome::NoSelection));
        assert!(host.tick(&mut stage, t3 + Duration::from_secs(1)).unwrap());
        assert_eq!(host.renewals(), 1);
        assert_eq!(stage.recognizer_count(), 1);
    }

    #[test]
    fn test_short_tap_during_dismissal_delays_renewal_only() {
        let (mut stage, mut host) = make_host();
        let t0 = Instant::now();
        press(&mut stage, &mut host, &[], t0);

        let t1 = t0 + Duration::from_millis(600);
        stage.dispatch_touch(&TouchPoint::new(7, TouchPhase::Started, Point::new(160.0, 240.0), t0));
        assert!(!host.tick(&mut stage, t1).unwrap());
        stage.dispatch_touch(&TouchPoint::new(7, TouchPhase::Ended, Point::new(160.0, 240.0), t0));
        assert!(host.tick(&mut stage, t1 + Duration::from_millis(16)).unwrap());
        assert_eq!(host.renewals(), 1);
    }
}
