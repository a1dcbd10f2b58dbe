//! Logging and debugging facilities for iconstrip.
//!
//! This module provides:
//! - Target and span names for filtering `tracing` output by subsystem
//! - Debug visualization for scene trees
//! - Performance tracing hooks for profiling
//!
//! # Tracing Integration
//!
//! iconstrip uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("iconstrip=debug,iconstrip_core=info")
//!     .init();
//! ```
//!
//! # Debug Visualization
//!
//! Use [`SceneTreeDebug`] to dump the node hierarchy:
//!
//! ```
//! use iconstrip_core::{Scene, SceneTreeDebug};
//! use iconstrip_render::Size;
//!
//! let scene = Scene::new(Size::new(320.0, 480.0));
//! let output = SceneTreeDebug::new().format_subtree(&scene, scene.root()).unwrap();
//! assert!(output.starts_with("root"));
//! ```

use std::fmt::Write as FmtWrite;

use crate::error::Result;
use crate::scene::{NodeId, Scene};

/// Span names used throughout iconstrip for tracing.
pub mod span_names {
    /// A full gesture delivery to a strip.
    pub const GESTURE: &str = "iconstrip::gesture";
    /// Rebuilding the icon visuals of a strip.
    pub const REBUILD: &str = "iconstrip::rebuild";
    /// Stepping running animations.
    pub const ANIMATION: &str = "iconstrip::animation";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Scene tree target.
    pub const SCENE: &str = "iconstrip_core::scene";
    /// Long-press recognition and touch routing target.
    pub const GESTURE: &str = "iconstrip::gesture";
    /// Icon strip widget target.
    pub const STRIP: &str = "iconstrip::strip";
    /// Animation driver target.
    pub const ANIMATION: &str = "iconstrip::animation";
    /// Host screen target.
    pub const HOST: &str = "iconstrip::host";
}

/// Style options for scene tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line representation.
    Compact,
}

/// Configuration for scene tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show node IDs.
    pub show_ids: bool,
    /// Whether to show frames.
    pub show_frames: bool,
    /// Whether to show opacity, transform and visibility.
    pub show_state: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_frames: true,
            show_state: false,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Create options for detailed debugging output.
    pub fn detailed() -> Self {
        Self {
            show_state: true,
            ..Default::default()
        }
    }
}

/// Debug utility for visualizing scene trees.
#[derive(Debug, Clone, Default)]
pub struct SceneTreeDebug {
    options: TreeFormatOptions,
}

impl SceneTreeDebug {
    /// Create a new debug visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a debug visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format the whole scene starting from its root.
    pub fn format_scene(&self, scene: &Scene) -> Result<String> {
        let mut output = String::new();
        let _ = writeln!(output, "Scene Tree ({} nodes):", scene.len());
        self.format_subtree_into(scene, scene.root(), 0, true, &mut output)?;
        Ok(output)
    }

    /// Format a subtree starting from a specific node.
    pub fn format_subtree(&self, scene: &Scene, root: NodeId) -> Result<String> {
        let mut output = String::new();
        self.format_subtree_into(scene, root, 0, true, &mut output)?;
        Ok(output)
    }

    fn format_subtree_into(
        &self,
        scene: &Scene,
        id: NodeId,
        depth: usize,
        is_last: bool,
        output: &mut String,
    ) -> Result<()> {
        if let Some(max) = self.options.max_depth {
            if depth > max {
                return Ok(());
            }
        }

        let node = scene.node(id)?;
        output.push_str(&self.build_prefix(depth, is_last));
        output.push_str(if node.name().is_empty() {
            "(unnamed)"
        } else {
            node.name()
        });

        if self.options.show_ids {
            let _ = write!(output, " [{:?}]", id);
        }

        if self.options.show_frames {
            let frame = node.frame();
            let _ = write!(
                output,
                " ({}, {}, {}x{})",
                frame.left(),
                frame.top(),
                frame.width(),
                frame.height()
            );
        }

        if self.options.show_state {
            let offset = node.transform().translation();
            let _ = write!(output, " opacity={:.2}", node.opacity());
            if !node.transform().is_identity() {
                let _ = write!(output, " offset=({}, {})", offset.x, offset.y);
            }
            if node.is_hidden() {
                output.push_str(" hidden");
            }
        }

        output.push('\n');

        let children = node.children();
        let child_count = children.len();
        for (i, &child) in children.iter().enumerate() {
            self.format_subtree_into(scene, child, depth + 1, i + 1 == child_count, output)?;
        }

        Ok(())
    }

    fn build_prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, corner, last) = match self.options.style {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => (
                "\u{2502}",
                "\u{251c}\u{2500}\u{2500}",
                "\u{2514}\u{2500}\u{2500}",
            ),
            TreeStyle::Compact => ("", "-", "-"),
        };

        let mut prefix = String::new();
        for _ in 0..(depth - 1) {
            prefix.push_str(branch);
            for _ in 0..self.options.indent_size {
                prefix.push(' ');
            }
        }
        prefix.push_str(if is_last { last } else { corner });
        prefix.push(' ');
        prefix
    }
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "iconstrip::perf", "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}

/// Macros for common tracing patterns.
///
/// `strip_warn!` and `strip_error!` wrap the `tracing` macros with the
/// widget crate's target.
#[macro_export]
macro_rules! strip_warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!(target: "iconstrip", $($arg)*)
    };
}

#[macro_export]
macro_rules! strip_error {
    ($($arg:tt)*) => {
        $crate::tracing::error!(target: "iconstrip", $($arg)*)
    };
}
