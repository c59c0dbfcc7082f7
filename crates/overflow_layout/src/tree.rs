//! Layout tree management

use slotmap::{new_key_type, SlotMap};
use taffy::prelude::*;

use crate::element::Element;
use crate::error::{LayoutError, Result};

new_key_type! {
    pub struct LayoutNodeId;
}

/// Absolute box of a laid-out node
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// A built node and the input markers copied from its element
#[derive(Debug, Clone)]
pub struct RenderedNode {
    pub node: LayoutNodeId,
    /// Index of the parent in [`RenderedTree::nodes`]
    pub parent: Option<usize>,
    pub region: Option<String>,
    pub viewport: bool,
}

/// Result of [`LayoutTree::build`]: nodes in pre-order, root first
#[derive(Debug, Clone, Default)]
pub struct RenderedTree {
    pub root: LayoutNodeId,
    pub nodes: Vec<RenderedNode>,
}

impl RenderedTree {
    /// The node marked as scroll viewport, if any
    pub fn viewport(&self) -> Option<&RenderedNode> {
        self.nodes.iter().find(|n| n.viewport)
    }

    /// Index of the hover region with the given name
    pub fn region_index(&self, name: &str) -> Option<usize> {
        self.nodes
            .iter()
            .position(|n| n.region.as_deref() == Some(name))
    }
}

/// Maps between Overflow node IDs and Taffy node IDs
pub struct LayoutTree {
    taffy: TaffyTree,
    node_map: SlotMap<LayoutNodeId, NodeId>,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self {
            taffy: TaffyTree::new(),
            node_map: SlotMap::with_key(),
        }
    }

    /// Create a new layout node with the given style
    pub fn create_node(&mut self, style: Style) -> Result<LayoutNodeId> {
        let taffy_node = self.taffy.new_leaf(style)?;
        Ok(self.node_map.insert(taffy_node))
    }

    /// Add a child to a parent node
    pub fn add_child(&mut self, parent: LayoutNodeId, child: LayoutNodeId) -> Result<()> {
        let parent_node = self.taffy_node(parent)?;
        let child_node = self.taffy_node(child)?;
        self.taffy.add_child(parent_node, child_node)?;
        Ok(())
    }

    /// Compute layout for a tree rooted at the given node
    pub fn compute_layout(&mut self, root: LayoutNodeId, width: f32, height: f32) -> Result<()> {
        let root_node = self.taffy_node(root)?;
        self.taffy.compute_layout(
            root_node,
            Size {
                width: AvailableSpace::Definite(width),
                height: AvailableSpace::Definite(height),
            },
        )?;
        Ok(())
    }

    /// Get the computed layout for a node
    pub fn get_layout(&self, id: LayoutNodeId) -> Option<&Layout> {
        self.node_map
            .get(id)
            .and_then(|&taffy_node| self.taffy.layout(taffy_node).ok())
    }

    /// Remove every node
    pub fn clear(&mut self) {
        self.taffy.clear();
        self.node_map.clear();
    }

    pub fn len(&self) -> usize {
        self.node_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_map.is_empty()
    }

    /// Create nodes for an element subtree
    pub fn build(&mut self, element: &Element) -> Result<RenderedTree> {
        let mut nodes = Vec::new();
        let root = self.build_node(element, None, &mut nodes)?;
        Ok(RenderedTree { root, nodes })
    }

    fn build_node(
        &mut self,
        element: &Element,
        parent: Option<usize>,
        nodes: &mut Vec<RenderedNode>,
    ) -> Result<LayoutNodeId> {
        let id = self.create_node(element.layout_style().clone())?;
        let index = nodes.len();
        nodes.push(RenderedNode {
            node: id,
            parent,
            region: element.region_name().map(str::to_string),
            viewport: element.is_viewport(),
        });

        for child in element.child_elements() {
            let child_id = self.build_node(child, Some(index), nodes)?;
            self.add_child(id, child_id)?;
        }
        Ok(id)
    }

    /// Absolute bounds of a rendered node (sum of parent offsets)
    pub fn bounds(&self, tree: &RenderedTree, index: usize) -> Option<Bounds> {
        let rendered = tree.nodes.get(index)?;
        let layout = self.get_layout(rendered.node)?;
        let mut bounds = Bounds {
            x: layout.location.x,
            y: layout.location.y,
            width: layout.size.width,
            height: layout.size.height,
        };

        let mut parent = rendered.parent;
        while let Some(p) = parent {
            let ancestor = &tree.nodes[p];
            let layout = self.get_layout(ancestor.node)?;
            bounds.x += layout.location.x;
            bounds.y += layout.location.y;
            parent = ancestor.parent;
        }
        Some(bounds)
    }

    /// Topmost hover region containing the point
    pub fn hit_test_region<'t>(&self, tree: &'t RenderedTree, x: f32, y: f32) -> Option<&'t str> {
        tree.nodes
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, n)| n.region.is_some())
            .find(|(index, _)| {
                self.bounds(tree, *index)
                    .is_some_and(|bounds| bounds.contains(x, y))
            })
            .and_then(|(_, n)| n.region.as_deref())
    }

    /// `(client size, content size)` of the viewport node.
    ///
    /// Content size is the far edge of the viewport's direct children, which
    /// may exceed the client box when they do not fit.
    pub fn viewport_extents(&self, tree: &RenderedTree) -> Option<(Size<f32>, Size<f32>)> {
        let index = tree.nodes.iter().position(|n| n.viewport)?;
        let client = self.get_layout(tree.nodes[index].node)?.size;

        let mut content = Size {
            width: 0.0_f32,
            height: 0.0_f32,
        };
        for child in tree.nodes.iter().filter(|n| n.parent == Some(index)) {
            if let Some(layout) = self.get_layout(child.node) {
                content.width = content.width.max(layout.location.x + layout.size.width);
                content.height = content.height.max(layout.location.y + layout.size.height);
            }
        }
        Some((client, content))
    }

    fn taffy_node(&self, id: LayoutNodeId) -> Result<NodeId> {
        self.node_map
            .get(id)
            .copied()
            .ok_or(LayoutError::UnknownNode(id))
    }
}

impl Default for LayoutTree {
    fn default() -> Self {
        Self::new()
    }
}
