// Render payload handed to a diagram surface: every node and link with
// its visual parameters already resolved.

use crate::model::{DeviceType, Link, LinkCategory, LinkId, Node, NodeId, NodeStatus, Position, Topology};
use crate::style::{
    CornerRadius, LinkStyle, NodeShape, StatusStyle, badge_for_status, shape_for_device_type,
    style_for_link_category, style_for_status,
};

/// Opacity multiplier for links outside the active traffic path.
pub const DIMMED_OPACITY: f32 = 0.6;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderNode {
    pub id: NodeId,
    pub label: String,
    pub device_type: DeviceType,
    pub status: NodeStatus,
    pub position: Position,
    pub status_style: StatusStyle,
    pub shape: NodeShape,
    pub badge: &'static str,
}

impl RenderNode {
    pub fn from_node(node: &Node) -> Self {
        Self {
            id: node.id.clone(),
            label: node.label.clone(),
            device_type: node.device_type,
            status: node.status,
            position: node.position,
            status_style: style_for_status(node.status),
            shape: shape_for_device_type(node.device_type),
            badge: badge_for_status(node.status),
        }
    }

    /// Half of the shape's size, in diagram units.
    pub fn radius(&self) -> f64 {
        self.shape.relative_size as f64 / 2.0
    }

    /// Whether `point` lies on the shape grown by `tolerance` on every side.
    pub fn contains(&self, point: Position, tolerance: f64) -> bool {
        let r = self.radius();
        let corner = match self.shape.corner_radius {
            CornerRadius::Circular => r,
            CornerRadius::Rounded(c) => (c as f64).min(r),
        };

        // distance to a box shrunk by the corner radius, then rounded back out
        let dx = ((point.x - self.position.x).abs() - (r - corner)).max(0.0);
        let dy = ((point.y - self.position.y).abs() - (r - corner)).max(0.0);
        (dx * dx + dy * dy).sqrt() <= corner + tolerance
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderLink {
    pub id: LinkId,
    pub source: NodeId,
    pub target: NodeId,
    pub from: Position,
    pub to: Position,
    pub category: LinkCategory,
    pub emphasis: bool,
    pub style: LinkStyle,
}

/// Final style for one link: category identity plus the per-link
/// animation and emphasis flags.
pub fn resolve_link_style(link: &Link) -> LinkStyle {
    let mut style = style_for_link_category(link.category);
    style.animated = style.animated || link.animated;

    if link.emphasis {
        style.opacity = 1.0;
        style.stroke_width += 1.0;
        style.drop_shadow = true;
        style.z_order = style.z_order.saturating_add(100);
    } else {
        style.opacity *= DIMMED_OPACITY;
    }

    style
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub nodes: Vec<RenderNode>,
    /// Sorted by ascending z-order, so later links paint over earlier ones.
    pub links: Vec<RenderLink>,
}

impl Scene {
    pub fn resolve(topology: &Topology) -> Self {
        let nodes: Vec<RenderNode> = topology.nodes().iter().map(RenderNode::from_node).collect();

        let mut links: Vec<RenderLink> = topology
            .links()
            .iter()
            .filter_map(|link| {
                let from = topology.node(link.source_id.as_str())?.position;
                let to = topology.node(link.target_id.as_str())?.position;
                Some(RenderLink {
                    id: link.id.clone(),
                    source: link.source_id.clone(),
                    target: link.target_id.clone(),
                    from,
                    to,
                    category: link.category,
                    emphasis: link.emphasis,
                    style: resolve_link_style(link),
                })
            })
            .collect();
        links.sort_by_key(|l| l.style.z_order);

        Self { nodes, links }
    }

    pub fn node(&self, id: &str) -> Option<&RenderNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Axis-aligned bounds `(min, max)` covering every node including its shape.
    pub fn bounds(&self) -> Option<(Position, Position)> {
        let mut iter = self.nodes.iter();
        let first = iter.next()?;
        let r = first.radius();
        let mut min = Position::new(first.position.x - r, first.position.y - r);
        let mut max = Position::new(first.position.x + r, first.position.y + r);

        for node in iter {
            let r = node.radius();
            min.x = min.x.min(node.position.x - r);
            min.y = min.y.min(node.position.y - r);
            max.x = max.x.max(node.position.x + r);
            max.y = max.y.max(node.position.y + r);
        }

        Some((min, max))
    }

    /// The node whose shape contains `point`, preferring the closest centre.
    /// `tolerance` widens every shape, for coarse pointing devices.
    pub fn hit_test(&self, point: Position, tolerance: f64) -> Option<&RenderNode> {
        self.nodes
            .iter()
            .filter(|node| node.contains(point, tolerance))
            .map(|node| (node, node.position.distance(&point)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(node, _)| node)
    }
}
