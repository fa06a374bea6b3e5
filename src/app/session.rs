use std::collections::{HashMap, VecDeque};

use eframe::egui::{Vec2, vec2};
use tracing::{debug, warn};

use crate::data::NetworkGraph;

use super::grouping::{PackedGroup, compute_groups, pack_anchors};
use super::sim::{ForceConfig, Simulation};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) enum ItemRef {
    Node(usize),
    Edge { source: usize, target: usize },
}

#[derive(Clone, Debug)]
pub(in crate::app) enum InputEvent {
    PointerDown { node: usize, position: Vec2 },
    PointerMove { position: Vec2 },
    PointerUp,
    Click { item: Option<ItemRef> },
    HoverEnter { item: ItemRef },
    HoverLeave,
    AttributeChanged { key: String },
    ArrangeToggled { enabled: bool },
    Resized { width: f32, height: f32 },
}

pub(in crate::app) struct Session {
    pub(in crate::app) graph: NetworkGraph,
    pub(in crate::app) group_key: String,
    pub(in crate::app) groups: Vec<PackedGroup>,
    pub(in crate::app) sim: Simulation,
    pub(in crate::app) selection: Option<ItemRef>,
    pub(in crate::app) hovered: Option<ItemRef>,
    pub(in crate::app) viewport: Vec2,
    dragging: Option<usize>,
    queue: VecDeque<InputEvent>,
}

impl Session {
    pub(in crate::app) fn new(
        graph: NetworkGraph,
        group_key: Option<String>,
        viewport: Vec2,
    ) -> Self {
        let group_key = group_key
            .or_else(|| graph.attribute_keys().into_iter().next())
            .unwrap_or_default();

        let center = viewport * 0.5;
        let sim = Simulation::seed(&graph, &group_key, center);

        let mut session = Self {
            graph,
            group_key,
            groups: Vec::new(),
            sim,
            selection: None,
            hovered: None,
            viewport,
            dragging: None,
            queue: VecDeque::new(),
        };
        session.regroup();
        session
    }

    pub(in crate::app) fn queue_event(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }

    pub(in crate::app) fn step(&mut self) -> bool {
        while let Some(event) = self.queue.pop_front() {
            self.apply(event);
        }
        self.sim.step()
    }

    pub(in crate::app) fn dragging(&self) -> Option<usize> {
        self.dragging
    }

    pub(in crate::app) fn group_index(&self, value: &str) -> Option<usize> {
        self.groups.iter().position(|group| group.name == value)
    }

    pub(in crate::app) fn set_force_config(&mut self, config: ForceConfig) {
        if self.sim.config != config {
            self.sim.config = config;
            self.sim.reheat();
        }
    }

    fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { node, position } => {
                if node >= self.graph.node_count() {
                    warn!(node, "ignoring pointer-down on unknown node");
                    return;
                }
                self.dragging = Some(node);
                self.sim.pin(node, position);
                self.sim.begin_drag_heat();
            }
            InputEvent::PointerMove { position } => {
                if let Some(node) = self.dragging {
                    self.sim.pin(node, position);
                }
            }
            InputEvent::PointerUp => {
                if let Some(node) = self.dragging.take() {
                    self.sim.release(node);
                    self.sim.end_drag_heat();
                }
            }
            InputEvent::Click { item } => {
                let Some(item) = item else {
                    self.selection = None;
                    return;
                };
                if !self.item_exists(item) {
                    warn!(?item, "ignoring click on unknown item");
                    return;
                }
                self.selection = if self.selection == Some(item) {
                    None
                } else {
                    Some(item)
                };
            }
            InputEvent::HoverEnter { item } => {
                if self.item_exists(item) {
                    self.hovered = Some(item);
                }
            }
            InputEvent::HoverLeave => {
                self.hovered = None;
            }
            InputEvent::AttributeChanged { key } => {
                self.group_key = key;
                self.regroup();
                self.sim.reheat();
            }
            InputEvent::ArrangeToggled { enabled } => {
                self.sim.arrange = enabled;
                self.sim.reheat();
            }
            InputEvent::Resized { width, height } => {
                if width <= 0.0 || height <= 0.0 {
                    warn!(?width, ?height, "ignoring resize to empty viewport");
                    return;
                }

                let next = vec2(width, height);
                let changed = next != self.viewport;
                self.viewport = next;
                self.sim.set_center(next * 0.5);
                self.regroup();
                if changed {
                    self.sim.reheat();
                }
            }
        }
    }

    fn item_exists(&self, item: ItemRef) -> bool {
        match item {
            ItemRef::Node(index) => index < self.graph.node_count(),
            ItemRef::Edge { source, target } => self.graph.edge_between(source, target).is_some(),
        }
    }

    fn regroup(&mut self) {
        let groups = compute_groups(&self.graph, &self.group_key);
        self.groups = pack_anchors(&groups, self.viewport.x, self.viewport.y);

        let anchors: HashMap<String, Vec2> = self
            .groups
            .iter()
            .map(|group| (group.name.clone(), group.anchor))
            .collect();
        self.sim.set_anchors(anchors);
        self.sim.assign_group_values(&self.graph, &self.group_key);

        debug!(
            key = %self.group_key,
            groups = self.groups.len(),
            "recomputed category groups"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{NetworkGraph, NodeRecord, UnresolvedEdge};

    fn sample_graph() -> NetworkGraph {
        let nodes = [
            ("x", "A"),
            ("y", "A"),
            ("z", "A"),
            ("u", "B"),
            ("v", "B"),
        ]
        .iter()
        .map(|(id, kind)| NodeRecord {
            id: id.to_string(),
            label: id.to_uppercase(),
            title: format!("Node {id}"),
            description: format!("about {id}"),
            links: vec![format!("https://example.org/{id}")],
            attributes: vec![
                ("Kind".to_string(), kind.to_string()),
                ("Tier".to_string(), "shared".to_string()),
            ],
        })
        .collect();

        let edges = vec![
            UnresolvedEdge {
                source: "x".to_string(),
                target: "y".to_string(),
                label: String::new(),
                description: "x feeds y".to_string(),
                links: Vec::new(),
            },
            UnresolvedEdge {
                source: "y".to_string(),
                target: "v".to_string(),
                label: String::new(),
                description: String::new(),
                links: Vec::new(),
            },
        ];

        NetworkGraph::build(nodes, edges).unwrap()
    }

    fn session() -> Session {
        Session::new(sample_graph(), Some("Kind".to_string()), vec2(1280.0, 800.0))
    }

    fn apply(session: &mut Session, event: InputEvent) {
        session.queue_event(event);
        session.step();
    }

    #[test]
    fn clicking_same_node_twice_toggles_selection_off() {
        let mut session = session();

        apply(&mut session, InputEvent::Click { item: Some(ItemRef::Node(2)) });
        assert_eq!(session.selection, Some(ItemRef::Node(2)));

        apply(&mut session, InputEvent::Click { item: Some(ItemRef::Node(2)) });
        assert_eq!(session.selection, None);
    }

    #[test]
    fn clicking_another_item_replaces_selection() {
        let mut session = session();

        apply(&mut session, InputEvent::Click { item: Some(ItemRef::Node(0)) });
        apply(&mut session, InputEvent::Click { item: Some(ItemRef::Node(3)) });
        assert_eq!(session.selection, Some(ItemRef::Node(3)));

        let edge = ItemRef::Edge { source: 0, target: 1 };
        apply(&mut session, InputEvent::Click { item: Some(edge) });
        assert_eq!(session.selection, Some(edge));

        apply(&mut session, InputEvent::Click { item: Some(edge) });
        assert_eq!(session.selection, None);
    }

    #[test]
    fn background_click_always_deselects() {
        let mut session = session();

        let edge = ItemRef::Edge { source: 1, target: 4 };
        apply(&mut session, InputEvent::Click { item: Some(edge) });
        assert_eq!(session.selection, Some(edge));

        apply(&mut session, InputEvent::Click { item: None });
        assert_eq!(session.selection, None);
    }

    #[test]
    fn click_on_unknown_item_is_ignored() {
        let mut session = session();

        apply(&mut session, InputEvent::Click { item: Some(ItemRef::Node(99)) });
        assert_eq!(session.selection, None);

        apply(&mut session, InputEvent::Click { item: Some(ItemRef::Node(1)) });
        apply(
            &mut session,
            InputEvent::Click {
                item: Some(ItemRef::Edge { source: 3, target: 4 }),
            },
        );
        assert_eq!(session.selection, Some(ItemRef::Node(1)));
    }

    #[test]
    fn hover_never_touches_selection_or_drag() {
        let mut session = session();

        apply(&mut session, InputEvent::Click { item: Some(ItemRef::Node(1)) });
        apply(&mut session, InputEvent::HoverEnter { item: ItemRef::Node(4) });
        assert_eq!(session.hovered, Some(ItemRef::Node(4)));
        assert_eq!(session.selection, Some(ItemRef::Node(1)));

        apply(&mut session, InputEvent::HoverLeave);
        assert_eq!(session.hovered, None);
        assert_eq!(session.selection, Some(ItemRef::Node(1)));
    }

    #[test]
    fn drag_pins_node_to_pointer_and_releases_cleanly() {
        let mut session = session();

        apply(
            &mut session,
            InputEvent::PointerDown { node: 0, position: vec2(50.0, 60.0) },
        );
        assert_eq!(session.dragging(), Some(0));
        assert_eq!(session.sim.nodes[0].position, vec2(50.0, 60.0));

        apply(&mut session, InputEvent::PointerMove { position: vec2(70.0, 90.0) });
        assert_eq!(session.sim.nodes[0].position, vec2(70.0, 90.0));

        for _ in 0..20 {
            session.step();
            assert_eq!(session.sim.nodes[0].position, vec2(70.0, 90.0));
        }

        apply(&mut session, InputEvent::PointerUp);
        assert_eq!(session.dragging(), None);
        assert!(session.sim.nodes[0].pinned.is_none());
    }

    #[test]
    fn drag_preserves_existing_selection() {
        let mut session = session();

        apply(&mut session, InputEvent::Click { item: Some(ItemRef::Node(2)) });
        apply(
            &mut session,
            InputEvent::PointerDown { node: 4, position: vec2(10.0, 10.0) },
        );
        apply(&mut session, InputEvent::PointerMove { position: vec2(20.0, 20.0) });
        apply(&mut session, InputEvent::PointerUp);

        assert_eq!(session.selection, Some(ItemRef::Node(2)));
    }

    #[test]
    fn attribute_change_regroups_and_reheats_without_touching_selection() {
        let mut session = session();

        apply(&mut session, InputEvent::Click { item: Some(ItemRef::Node(0)) });
        while session.step() {}
        assert!(!session.sim.active());

        apply(
            &mut session,
            InputEvent::AttributeChanged { key: "Tier".to_string() },
        );

        assert_eq!(session.group_key, "Tier");
        assert_eq!(session.groups.len(), 1);
        assert_eq!(session.groups[0].count, 5);
        assert!(session.sim.active());
        assert_eq!(session.selection, Some(ItemRef::Node(0)));
    }

    #[test]
    fn resize_with_same_dimensions_does_not_reheat() {
        let mut session = session();
        while session.step() {}

        let anchors_before = session.groups.clone();
        apply(
            &mut session,
            InputEvent::Resized { width: 1280.0, height: 800.0 },
        );

        assert!(!session.sim.active());
        for (before, after) in anchors_before.iter().zip(session.groups.iter()) {
            assert_eq!(before.anchor, after.anchor);
            assert_eq!(before.radius, after.radius);
        }
    }

    #[test]
    fn resize_with_new_dimensions_reanchors_and_reheats() {
        let mut session = session();
        while session.step() {}

        apply(
            &mut session,
            InputEvent::Resized { width: 640.0, height: 480.0 },
        );

        assert!(session.sim.active());
        assert_eq!(session.viewport, vec2(640.0, 480.0));
        for group in &session.groups {
            assert!(group.anchor.x >= 0.0 && group.anchor.x <= 640.0);
            assert!(group.anchor.y >= 0.0 && group.anchor.y <= 480.0);
        }
    }

    #[test]
    fn arrange_toggle_flips_cluster_forces_and_reheats() {
        let mut session = session();
        while session.step() {}

        apply(&mut session, InputEvent::ArrangeToggled { enabled: false });
        assert!(!session.sim.arrange);
        assert!(session.sim.active());

        apply(&mut session, InputEvent::ArrangeToggled { enabled: true });
        assert!(session.sim.arrange);
    }

    #[test]
    fn events_queue_until_the_next_step() {
        let mut session = session();

        session.queue_event(InputEvent::Click { item: Some(ItemRef::Node(1)) });
        assert_eq!(session.selection, None);

        session.step();
        assert_eq!(session.selection, Some(ItemRef::Node(1)));
    }

    #[test]
    fn groups_follow_cardinality_order() {
        let session = session();

        assert_eq!(session.groups[0].name, "A");
        assert_eq!(session.groups[0].count, 3);
        assert_eq!(session.groups[1].name, "B");
        assert_eq!(session.groups[1].count, 2);
        assert!(session.groups[0].radius > session.groups[1].radius);
        assert_eq!(session.group_index("A"), Some(0));
        assert_eq!(session.group_index("missing"), None);
    }
}
