//! The icon strip widget.
//!
//! An [`IconStrip`] is a rounded, shadowed row of icons that only exists on
//! screen for the duration of one long-press. Holding a finger on the
//! container makes the strip spring into view above its center; sliding the
//! finger horizontally raises the icon under it; lifting the finger reports
//! the raised icon (or none) to the [`SelectionDelegate`] and dismisses the
//! strip.
//!
//! ```text
//! Idle --Started--> Pressing --Updated--> Dragging --Ended/Cancelled--> Idle
//!                       \____________Ended/Cancelled____________________/
//! ```
//!
//! The strip never reads the clock or drives its own animations. Gesture
//! events come in through [`IconStrip::handle_long_press`] and the owner
//! advances animations with [`IconStrip::tick`], which is also where the end
//! of the dismissal is noticed and the strip leaves the container.

mod config;
mod layout;
mod session;

use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Instant;

use iconstrip_core::logging::{span_names, targets};
use iconstrip_core::{strip_error, strip_warn, NodeId, NodeStyle, PerfSpan, Scene, SceneError};
use iconstrip_render::{Color, Point, Rect, Size, Transform2D};

use crate::animation::{AnimationId, AnimationTarget, Animator, Timing};
use crate::error::{Result, StripError};
use crate::gesture::{GestureState, LongPressEvent, RecognizerId};
use crate::icon::Icon;
use crate::surface::Surface;

pub use config::{
    parse_color, IconStripConfig, ShadowConfig, DEFAULT_ANIMATION_DURATION_MS,
    DEFAULT_ICON_DIAMETER, DEFAULT_LIFT_OFFSET, DEFAULT_PADDING,
};
pub use layout::{configure, IconSlot, LayoutResult};
pub use session::{DragSession, LiftState};

/// Receives the outcome of every press session.
pub trait SelectionDelegate {
    /// Called once per session, after the strip resolved its selection.
    ///
    /// Read [`IconStrip::resolved_icon`] to learn which icon was chosen.
    fn did_select_icon(&self, strip: &IconStrip);
}

impl<F: Fn(&IconStrip)> SelectionDelegate for F {
    fn did_select_icon(&self, strip: &IconStrip) {
        self(strip)
    }
}

/// Interaction phase of a strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StripPhase {
    /// No press in progress.
    #[default]
    Idle,
    /// The long-press was recognized and the finger has not moved since.
    Pressing,
    /// The finger moved at least once.
    Dragging,
}

/// The on-screen node showing one icon.
#[derive(Debug, Clone)]
pub struct IconVisual {
    node: NodeId,
    icon: Icon,
    slot: usize,
    presented: LiftState,
}

impl IconVisual {
    /// The scene node.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The icon shown.
    pub fn icon(&self) -> &Icon {
        &self.icon
    }

    /// Index into the strip's layout slots.
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// The lift state the visual is showing or animating towards.
    pub fn presented(&self) -> LiftState {
        self.presented
    }
}

/// A long-press drag-to-select row of icons.
pub struct IconStrip {
    config: IconStripConfig,
    icons: Vec<Icon>,
    layout: LayoutResult,
    root: NodeId,
    visuals: Vec<IconVisual>,
    container: Option<NodeId>,
    recognizer: Option<RecognizerId>,
    delegate: Option<Weak<dyn SelectionDelegate>>,
    resolved: Option<Icon>,
    phase: StripPhase,
    session: Option<DragSession>,
    animator: Animator,
    dismissal: Option<AnimationId>,
}

impl IconStrip {
    /// Create an empty strip. Its root node is created in the surface's
    /// scene but stays detached until a press begins.
    pub fn new<S: Surface + ?Sized>(surface: &mut S, config: IconStripConfig) -> Result<Self> {
        Self::with_icons(surface, config, Vec::new())
    }

    /// Create a strip showing `icons`.
    pub fn with_icons<S: Surface + ?Sized>(
        surface: &mut S,
        config: IconStripConfig,
        icons: Vec<Icon>,
    ) -> Result<Self> {
        config.validate()?;
        let root = surface.scene_mut().create_node("icon-strip");
        let layout = layout::configure(&[], config.padding, config.icon_diameter);
        let mut strip = Self {
            config,
            icons,
            layout,
            root,
            visuals: Vec::new(),
            container: None,
            recognizer: None,
            delegate: None,
            resolved: None,
            phase: StripPhase::Idle,
            session: None,
            animator: Animator::new(),
            dismissal: None,
        };
        strip.rebuild(surface)?;
        Ok(strip)
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    /// The active configuration.
    pub fn config(&self) -> &IconStripConfig {
        &self.config
    }

    /// The icons in display order.
    pub fn icons(&self) -> &[Icon] {
        &self.icons
    }

    /// Replace the icons and rebuild every visual.
    pub fn set_icons<S: Surface + ?Sized>(&mut self, surface: &mut S, icons: Vec<Icon>) -> Result<()> {
        self.icons = icons;
        self.rebuild(surface)
    }

    /// Spacing between icons and around the row.
    pub fn padding(&self) -> f32 {
        self.config.padding
    }

    /// Set the spacing and rebuild. Negative or non-finite values become 0.
    pub fn set_padding<S: Surface + ?Sized>(&mut self, surface: &mut S, padding: f32) -> Result<()> {
        self.config.padding = sanitize_length("padding", padding);
        self.rebuild(surface)
    }

    /// Width and height of each icon.
    pub fn icon_diameter(&self) -> f32 {
        self.config.icon_diameter
    }

    /// Set the icon size and rebuild. Negative or non-finite values become 0.
    pub fn set_icon_diameter<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        diameter: f32,
    ) -> Result<()> {
        self.config.icon_diameter = sanitize_length("icon_diameter", diameter);
        self.rebuild(surface)
    }

    /// Background tint.
    pub fn color(&self) -> Color {
        self.config.background
    }

    /// Change the background tint. Visuals are left alone.
    pub fn set_color<S: Surface + ?Sized>(&mut self, surface: &mut S, color: Color) -> Result<()> {
        self.config.background = color;
        surface.scene_mut().set_background(self.root, Some(color))?;
        Ok(())
    }

    /// Register the receiver of selection results, replacing any previous one.
    ///
    /// Only a weak reference is kept.
    pub fn set_delegate<D: SelectionDelegate + 'static>(&mut self, delegate: &Rc<D>) {
        let weak: Weak<D> = Rc::downgrade(delegate);
        self.delegate = Some(weak);
    }

    /// Stop reporting selection results.
    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    // -------------------------------------------------------------------------
    // State
    // -------------------------------------------------------------------------

    /// Bounding size of the strip.
    pub fn size(&self) -> Size {
        self.layout.size
    }

    /// The current layout.
    pub fn layout(&self) -> &LayoutResult {
        &self.layout
    }

    /// The strip's root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// One visual per icon, in display order.
    pub fn visuals(&self) -> &[IconVisual] {
        &self.visuals
    }

    /// The container the strip is attached to.
    pub fn container(&self) -> Option<NodeId> {
        self.container
    }

    /// The recognizer installed on the container.
    pub fn recognizer(&self) -> Option<RecognizerId> {
        self.recognizer
    }

    /// The icon chosen by the last finished session, if any.
    pub fn resolved_icon(&self) -> Option<&Icon> {
        self.resolved.as_ref()
    }

    /// The interaction phase.
    pub fn phase(&self) -> StripPhase {
        self.phase
    }

    /// The running drag session.
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// The icon currently lifted by the running session.
    pub fn lifted_icon(&self) -> Option<&Icon> {
        let index = self.session.as_ref()?.lifted()?;
        self.visuals.get(index).map(|v| &v.icon)
    }

    /// Whether the dismissal animation is still running.
    pub fn is_dismissing(&self) -> bool {
        self.dismissal.is_some()
    }

    /// Whether any animation is running.
    pub fn is_animating(&self) -> bool {
        !self.animator.is_empty()
    }

    /// Whether the strip is currently inserted in its container.
    pub fn is_presented<S: Surface + ?Sized>(&self, surface: &S) -> bool {
        matches!(
            (surface.scene().parent(self.root), self.container),
            (Ok(Some(parent)), Some(container)) if parent == container
        )
    }

    // -------------------------------------------------------------------------
    // Attachment
    // -------------------------------------------------------------------------

    /// Install long-press recognition on `container`.
    ///
    /// Without a usable container the error is logged and the strip stays
    /// inert.
    pub fn attach<S: Surface + ?Sized>(&mut self, surface: &mut S, container: Option<NodeId>) {
        if let Err(err) = self.try_attach(surface, container) {
            strip_error!(%err, "icon strip not attached; long-press recognition disabled");
        }
    }

    /// Install long-press recognition on `container`, reporting failures.
    ///
    /// Any previously installed recognizer is removed first.
    pub fn try_attach<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        container: Option<NodeId>,
    ) -> Result<RecognizerId> {
        self.detach(surface);
        let container = container.ok_or(StripError::NoContainer)?;
        let id = surface.install_long_press(container, self.config.long_press)?;
        self.container = Some(container);
        self.recognizer = Some(id);
        tracing::debug!(target: targets::STRIP, ?container, recognizer = ?id, "icon strip attached");
        Ok(id)
    }

    /// Remove long-press recognition from the container.
    pub fn detach<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        if let Some(old) = self.recognizer.take() {
            surface.uninstall_long_press(old);
        }
        self.container = None;
    }

    /// Remove the strip from the surface entirely.
    pub fn dispose<S: Surface + ?Sized>(mut self, surface: &mut S) -> Result<()> {
        self.detach(surface);
        self.animator.clear();
        match surface.scene_mut().destroy(self.root) {
            Ok(_) | Err(SceneError::MissingNode(_)) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    // -------------------------------------------------------------------------
    // Interaction
    // -------------------------------------------------------------------------

    /// Feed a long-press event from the surface.
    ///
    /// Events from recognizers other than the strip's own are ignored.
    pub fn handle_long_press<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        event: &LongPressEvent,
    ) -> Result<()> {
        if self.recognizer != Some(event.recognizer) {
            return Ok(());
        }
        let _perf = PerfSpan::new(span_names::GESTURE);
        tracing::trace!(target: targets::STRIP, state = ?event.state, location = ?event.location, "long-press event");

        match event.state {
            GestureState::Started => self.begin(surface, event.location, event.timestamp),
            GestureState::Updated => self.drag(surface, event.location, event.timestamp),
            GestureState::Ended | GestureState::Cancelled => {
                self.finish(surface, event.state, event.timestamp)
            }
        }
    }

    /// Advance animations to `now`.
    ///
    /// Returns `true` exactly once per session: on the tick the dismissal
    /// finishes and the strip leaves its container.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S, now: Instant) -> Result<bool> {
        let finished = self.animator.advance(surface.scene_mut(), now);
        let Some(dismissal) = self.dismissal else {
            return Ok(false);
        };
        if !finished.contains(&dismissal) {
            return Ok(false);
        }

        self.dismissal = None;
        surface.scene_mut().remove_from_parent(self.root)?;
        tracing::debug!(target: targets::STRIP, "icon strip dismissed");
        Ok(true)
    }

    fn begin<S: Surface + ?Sized>(&mut self, surface: &mut S, location: Point, now: Instant) -> Result<()> {
        if self.session.is_some() {
            strip_warn!("long-press began during an active session; ignoring");
            return Ok(());
        }
        let Some(container) = self.container else {
            return Ok(());
        };
        if let Some(dismissal) = self.dismissal.take() {
            self.animator.cancel(dismissal);
        }

        let height = self.layout.size.height;
        let scene = surface.scene_mut();
        scene.add_child(container, self.root)?;
        let origin = self.resting_origin(scene, container)?;
        scene.set_frame(self.root, Rect::from_size(self.layout.size).with_origin(origin))?;
        scene.set_transform(self.root, Transform2D::translate(0.0, height))?;
        scene.set_opacity(self.root, 0.0)?;
        for visual in &mut self.visuals {
            self.animator.cancel_node(visual.node);
            scene.set_transform(visual.node, Transform2D::IDENTITY)?;
            visual.presented = LiftState::Neutral;
        }

        let timing = self.timing();
        self.animator
            .animate(scene, self.root, AnimationTarget::Translation(Point::ZERO), timing, now)?;
        self.animator
            .animate(scene, self.root, AnimationTarget::Opacity(1.0), timing, now)?;

        self.session = Some(DragSession::new(location, self.visuals.len()));
        self.phase = StripPhase::Pressing;
        tracing::debug!(target: targets::STRIP, ?origin, "icon strip presented");
        Ok(())
    }

    fn drag<S: Surface + ?Sized>(&mut self, surface: &mut S, location: Point, now: Instant) -> Result<()> {
        let (Some(session), Some(container)) = (self.session.as_mut(), self.container) else {
            tracing::trace!(target: targets::STRIP, "move without a session; ignoring");
            return Ok(());
        };
        session.set_location(location);
        self.phase = StripPhase::Dragging;

        let scene = surface.scene();
        let extent = scene.transformed_frame(self.root)?;
        if !extent.spans_x(location.x) {
            session.reset_all();
        } else {
            let local = scene.convert_point(location, container, self.root)?;
            let probe = Point::new(local.x, self.layout.size.height / 2.0);
            let hit = scene.hit_test(self.root, probe)?;
            if let Some(index) = hit.and_then(|node| self.visuals.iter().position(|v| v.node == node)) {
                session.lift_only(index);
            }
        }

        self.present_lift_states(surface.scene(), now)
    }

    fn finish<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        state: GestureState,
        now: Instant,
    ) -> Result<()> {
        let Some(session) = self.session.take() else {
            tracing::trace!(target: targets::STRIP, "end without a session; ignoring");
            return Ok(());
        };
        self.phase = StripPhase::Idle;
        self.resolved = session
            .lifted()
            .and_then(|index| self.visuals.get(index))
            .map(|visual| visual.icon.clone());
        if state == GestureState::Cancelled {
            self.resolved = None;
        }

        let scene = surface.scene();
        self.present_lift_states(scene, now)?;

        let timing = self.timing();
        let offset = Point::new(0.0, self.layout.size.height);
        self.dismissal = Some(self.animator.animate(
            scene,
            self.root,
            AnimationTarget::Translation(offset),
            timing,
            now,
        )?);
        self.animator
            .animate(scene, self.root, AnimationTarget::Opacity(0.0), timing, now)?;

        tracing::debug!(
            target: targets::STRIP,
            cancelled = state == GestureState::Cancelled,
            resolved = ?self.resolved,
            "press session finished"
        );
        self.notify_delegate();
        Ok(())
    }

    // Animate every visual towards the state the session asks for. Without a
    // session every visual goes back to neutral.
    fn present_lift_states(&mut self, scene: &Scene, now: Instant) -> Result<()> {
        let timing = self.timing();
        let lift_offset = self.config.lift_offset;
        let Self {
            session,
            visuals,
            animator,
            ..
        } = self;

        for (index, visual) in visuals.iter_mut().enumerate() {
            let wanted = session
                .as_ref()
                .and_then(|s| s.lift_state(index))
                .unwrap_or(LiftState::Neutral);
            if wanted == visual.presented {
                continue;
            }
            let offset = match wanted {
                LiftState::Neutral => Point::ZERO,
                LiftState::Lifted => Point::new(0.0, -lift_offset),
            };
            animator.animate(scene, visual.node, AnimationTarget::Translation(offset), timing, now)?;
            visual.presented = wanted;
            tracing::trace!(target: targets::STRIP, icon = %visual.icon, state = ?wanted, "icon lift changed");
        }
        Ok(())
    }

    fn rebuild<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<()> {
        let _perf = PerfSpan::new(span_names::REBUILD);
        let layout = layout::configure(&self.icons, self.config.padding, self.config.icon_diameter);
        let scene = surface.scene_mut();

        for visual in self.visuals.drain(..) {
            self.animator.cancel_node(visual.node);
            match scene.destroy(visual.node) {
                Ok(_) | Err(SceneError::MissingNode(_)) => {}
                Err(err) => return Err(err.into()),
            }
        }

        let origin = match (scene.parent(self.root)?, self.container) {
            (Some(parent), Some(container)) if parent == container => {
                self.resting_origin_for(scene, container, layout.size)?
            }
            _ => scene.frame(self.root)?.origin,
        };
        scene.set_frame(self.root, Rect::from_size(layout.size).with_origin(origin))?;
        scene.set_style(
            self.root,
            NodeStyle {
                background: Some(self.config.background),
                corner_radius: layout.corner_radius,
                shadow: Some(self.config.shadow()),
                image: None,
            },
        )?;

        for (slot, icon_slot) in layout.slots.iter().enumerate() {
            let node = scene.create_node(format!("icon:{}", icon_slot.icon.name()));
            scene.set_frame(node, icon_slot.frame)?;
            scene.set_style(
                node,
                NodeStyle {
                    corner_radius: layout.icon_corner_radius,
                    image: Some(icon_slot.icon.key()),
                    ..NodeStyle::default()
                },
            )?;
            scene.add_child(self.root, node)?;
            self.visuals.push(IconVisual {
                node,
                icon: icon_slot.icon.clone(),
                slot,
                presented: LiftState::Neutral,
            });
        }

        if let Some(session) = self.session.as_mut() {
            session.reset_visuals(self.visuals.len());
        }
        tracing::debug!(
            target: targets::STRIP,
            icons = self.visuals.len(),
            width = layout.size.width,
            height = layout.size.height,
            "icon strip rebuilt"
        );
        self.layout = layout;
        Ok(())
    }

    // Horizontally centered, one strip height above the vertical center.
    fn resting_origin(&self, scene: &Scene, container: NodeId) -> Result<Point> {
        self.resting_origin_for(scene, container, self.layout.size)
    }

    fn resting_origin_for(&self, scene: &Scene, container: NodeId, size: Size) -> Result<Point> {
        let bounds = scene.bounds(container)?;
        Ok(Point::new(
            (bounds.width() - size.width) / 2.0,
            (bounds.height() - size.height) / 2.0 - size.height,
        ))
    }

    fn timing(&self) -> Timing {
        Timing::spring(self.config.animation_duration)
    }

    fn notify_delegate(&self) {
        match self.delegate.as_ref().and_then(Weak::upgrade) {
            Some(delegate) => delegate.did_select_icon(self),
            None => tracing::trace!(target: targets::STRIP, "no selection delegate to notify"),
        }
    }
}

impl fmt::Debug for IconStrip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IconStrip")
            .field("icons", &self.icons)
            .field("size", &self.layout.size)
            .field("root", &self.root)
            .field("container", &self.container)
            .field("recognizer", &self.recognizer)
            .field("phase", &self.phase)
            .field("session", &self.session)
            .field("resolved", &self.resolved)
            .field("dismissing", &self.dismissal.is_some())
            .finish_non_exhaustive()
    }
}

fn sanitize_length(field: &'static str, value: f32) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        strip_warn!(field, value, "invalid length; using 0");
        0.0
    }
}
