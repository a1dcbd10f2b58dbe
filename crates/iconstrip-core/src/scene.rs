//! Retained scene tree.
//!
//! A [`Scene`] is an arena of [`Node`]s addressed by [`NodeId`] handles. Nodes
//! form parent-child trees; a node without a parent is the top of a detached
//! tree and can later be inserted anywhere. The scene root stands in for the
//! window (or any host surface) and can never be re-parented.
//!
//! Each node has a `frame` in its parent's coordinate space plus a
//! `transform` applied on top of it, so a node's local coordinate space maps
//! into its parent's space through `translate(frame.origin) * transform`.
//! Hit testing and point conversion follow the same mapping.
//!
//! Handles never own anything. A stale handle is reported as
//! [`SceneError::MissingNode`] instead of panicking.

use iconstrip_render::{Color, ImageKey, Point, Rect, Shadow, Size, Transform2D};
use slotmap::{new_key_type, SlotMap};

use crate::error::{Result, SceneError};
use crate::logging::targets;

new_key_type! {
    /// A handle to a node in a [`Scene`].
    ///
    /// Handles are cheap to copy and never keep a node alive; once the node is
    /// destroyed every operation through the handle fails with
    /// [`SceneError::MissingNode`].
    pub struct NodeId;
}

/// Visual style of a node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeStyle {
    /// Background fill, painted under the children.
    pub background: Option<Color>,
    /// Corner radius of the background fill and image clip.
    pub corner_radius: f32,
    /// Drop shadow behind the background fill.
    pub shadow: Option<Shadow>,
    /// Image content drawn over the background.
    pub image: Option<ImageKey>,
}

/// A single node of the scene tree.
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    frame: Rect,
    transform: Transform2D,
    opacity: f32,
    hidden: bool,
    interactive: bool,
    style: NodeStyle,
}

impl Node {
    fn new(name: String) -> Self {
        Self {
            name,
            parent: None,
            children: Vec::new(),
            frame: Rect::ZERO,
            transform: Transform2D::IDENTITY,
            opacity: 1.0,
            hidden: false,
            interactive: true,
            style: NodeStyle::default(),
        }
    }

    /// Debug name of the node.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parent node, if attached.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in paint order (last is topmost).
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Frame in the parent's coordinate space, before `transform`.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// The node's own coordinate space: origin at zero, size of the frame.
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.frame.size)
    }

    /// Transform applied on top of the frame.
    pub fn transform(&self) -> Transform2D {
        self.transform
    }

    /// Opacity in `0.0..=1.0`.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Whether the node (and its subtree) is skipped for painting and hit testing.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Whether the node takes part in hit testing.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// The node's visual style.
    pub fn style(&self) -> &NodeStyle {
        &self.style
    }

    /// Mapping from this node's space into its parent's space.
    pub fn to_parent(&self) -> Transform2D {
        Transform2D::translate(self.frame.origin.x, self.frame.origin.y).then(&self.transform)
    }

    /// Bounding box of the node in its parent's space with the transform applied.
    pub fn transformed_frame(&self) -> Rect {
        self.to_parent().transform_rect(&self.bounds())
    }
}

/// An arena-backed tree of nodes.
#[derive(Debug)]
pub struct Scene {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
}

impl Scene {
    /// Create a scene whose root covers `size`.
    pub fn new(size: Size) -> Self {
        let mut nodes = SlotMap::with_key();
        let mut root = Node::new("root".to_string());
        root.frame = Rect::from_size(size);
        let root = nodes.insert(root);
        Self { nodes, root }
    }

    /// The root node.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, including the root.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether only the root is left.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Whether the handle refers to a live node.
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id).ok_or(SceneError::MissingNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id).ok_or(SceneError::MissingNode(id))
    }

    /// Create a detached node with a zero frame.
    pub fn create_node(&mut self, name: impl Into<String>) -> NodeId {
        let id = self.nodes.insert(Node::new(name.into()));
        tracing::trace!(target: targets::SCENE, ?id, "created node");
        id
    }

    /// Destroy a node and its whole subtree.
    ///
    /// Returns the number of nodes removed.
    pub fn destroy(&mut self, id: NodeId) -> Result<usize> {
        if id == self.root {
            return Err(SceneError::RootNode);
        }
        self.remove_from_parent(id)?;

        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(next) {
                stack.extend(node.children);
                removed += 1;
            }
        }
        tracing::trace!(target: targets::SCENE, ?id, removed, "destroyed subtree");
        Ok(removed)
    }

    /// Insert `child` as the topmost child of `parent`.
    ///
    /// A child that already has a parent is moved.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if child == self.root {
            return Err(SceneError::RootNode);
        }
        self.node(parent)?;
        self.node(child)?;
        if child == parent || self.is_ancestor(child, parent) {
            return Err(SceneError::Cycle { parent, child });
        }

        self.remove_from_parent(child)?;
        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        tracing::trace!(target: targets::SCENE, ?parent, ?child, "added child");
        Ok(())
    }

    /// Detach a node from its parent.
    ///
    /// Returns `false` if the node had no parent.
    pub fn remove_from_parent(&mut self, id: NodeId) -> Result<bool> {
        let Some(parent) = self.node(id)?.parent else {
            return Ok(false);
        };
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.retain(|c| *c != id);
        }
        self.node_mut(id)?.parent = None;
        tracing::trace!(target: targets::SCENE, ?id, ?parent, "removed from parent");
        Ok(true)
    }

    /// Whether `ancestor` is a strict ancestor of `node`.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.nodes.get(node).and_then(|n| n.parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// The parent of a node.
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.node(id)?.parent)
    }

    /// The children of a node in paint order.
    pub fn children(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(self.node(id)?.children())
    }

    /// The frame of a node in its parent's space.
    pub fn frame(&self, id: NodeId) -> Result<Rect> {
        Ok(self.node(id)?.frame)
    }

    /// The bounds of a node in its own space.
    pub fn bounds(&self, id: NodeId) -> Result<Rect> {
        Ok(self.node(id)?.bounds())
    }

    /// The frame of a node in its parent's space with its transform applied.
    pub fn transformed_frame(&self, id: NodeId) -> Result<Rect> {
        Ok(self.node(id)?.transformed_frame())
    }

    /// Set the frame of a node.
    pub fn set_frame(&mut self, id: NodeId, frame: Rect) -> Result<()> {
        self.node_mut(id)?.frame = frame;
        Ok(())
    }

    /// The transform of a node.
    pub fn transform(&self, id: NodeId) -> Result<Transform2D> {
        Ok(self.node(id)?.transform)
    }

    /// Set the transform of a node.
    pub fn set_transform(&mut self, id: NodeId, transform: Transform2D) -> Result<()> {
        self.node_mut(id)?.transform = transform;
        Ok(())
    }

    /// The opacity of a node.
    pub fn opacity(&self, id: NodeId) -> Result<f32> {
        Ok(self.node(id)?.opacity)
    }

    /// Set the opacity of a node, clamped to `0.0..=1.0`.
    pub fn set_opacity(&mut self, id: NodeId, opacity: f32) -> Result<()> {
        self.node_mut(id)?.opacity = opacity.clamp(0.0, 1.0);
        Ok(())
    }

    /// Hide or show a node.
    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) -> Result<()> {
        self.node_mut(id)?.hidden = hidden;
        Ok(())
    }

    /// Include or exclude a node from hit testing.
    pub fn set_interactive(&mut self, id: NodeId, interactive: bool) -> Result<()> {
        self.node_mut(id)?.interactive = interactive;
        Ok(())
    }

    /// The style of a node.
    pub fn style(&self, id: NodeId) -> Result<&NodeStyle> {
        Ok(self.node(id)?.style())
    }

    /// Replace the style of a node.
    pub fn set_style(&mut self, id: NodeId, style: NodeStyle) -> Result<()> {
        self.node_mut(id)?.style = style;
        Ok(())
    }

    /// Set only the background of a node.
    pub fn set_background(&mut self, id: NodeId, background: Option<Color>) -> Result<()> {
        self.node_mut(id)?.style.background = background;
        Ok(())
    }

    /// Mapping from `id`'s space into the space of its topmost ancestor.
    ///
    /// The topmost ancestor's own frame is not applied, so the result is the
    /// same for every node of one tree regardless of where that tree sits.
    pub(crate) fn to_top(&self, id: NodeId) -> Result<(NodeId, Transform2D)> {
        let mut transform = Transform2D::IDENTITY;
        let mut current = id;
        loop {
            let node = self.node(current)?;
            match node.parent {
                Some(parent) => {
                    transform = node.to_parent().then(&transform);
                    current = parent;
                }
                None => return Ok((current, transform)),
            }
        }
    }

    /// Convert a point from the space of `from` into the space of `to`.
    ///
    /// Both nodes must belong to the same tree.
    pub fn convert_point(&self, point: Point, from: NodeId, to: NodeId) -> Result<Point> {
        let (from_top, from_transform) = self.to_top(from)?;
        let (to_top, to_transform) = self.to_top(to)?;
        if from_top != to_top {
            return Err(SceneError::Disjoint { from, to });
        }
        let inverse = to_transform
            .inverse()
            .ok_or(SceneError::SingularTransform(to))?;
        Ok(inverse.transform_point(from_transform.transform_point(point)))
    }

    /// Find the deepest interactive node under `point`, given in `id`'s space.
    ///
    /// Children are tested topmost first. A point outside the node's bounds
    /// misses the node and its whole subtree, as do hidden and
    /// non-interactive nodes. Opacity does not affect hit testing.
    pub fn hit_test(&self, id: NodeId, point: Point) -> Result<Option<NodeId>> {
        let node = self.node(id)?;
        if node.hidden || !node.interactive || !node.bounds().contains(point) {
            return Ok(None);
        }

        for &child in node.children.iter().rev() {
            let Some(inverse) = self.node(child)?.to_parent().inverse() else {
                continue;
            };
            if let Some(hit) = self.hit_test(child, inverse.transform_point(point))? {
                return Ok(Some(hit));
            }
        }
        Ok(Some(id))
    }
}
