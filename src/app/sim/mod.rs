mod forces;

use std::collections::HashMap;

use eframe::egui::{Vec2, vec2};

use crate::data::NetworkGraph;

use forces::{apply_cluster_pull, apply_collision, apply_link_force, apply_repulsion};

const ALPHA_MIN: f32 = 0.001;
const ALPHA_DECAY: f32 = 0.0228;
const DRAG_ALPHA_TARGET: f32 = 0.3;
const VELOCITY_RETAIN: f32 = 0.6;
const SPIRAL_RADIUS: f32 = 12.0;
const SPIRAL_ANGLE: f32 = 2.399_963;

#[derive(Clone, Debug, PartialEq)]
pub(in crate::app) struct ForceConfig {
    pub(in crate::app) link_strength: f32,
    pub(in crate::app) link_distance: f32,
    pub(in crate::app) repulsion_strength: f32,
    pub(in crate::app) collision_radius: f32,
    pub(in crate::app) center_strength: f32,
    pub(in crate::app) cluster_strength_x: f32,
    pub(in crate::app) cluster_strength_y: f32,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            link_strength: 0.05,
            link_distance: 30.0,
            repulsion_strength: 30.0,
            collision_radius: 20.0,
            center_strength: 1.0,
            cluster_strength_x: 0.1,
            cluster_strength_y: 0.1,
        }
    }
}

#[derive(Clone, Debug)]
pub(in crate::app) struct SimNode {
    pub(in crate::app) position: Vec2,
    pub(in crate::app) velocity: Vec2,
    pub(in crate::app) pinned: Option<Vec2>,
    pub(in crate::app) group_value: String,
}

pub(in crate::app) struct Simulation {
    pub(in crate::app) nodes: Vec<SimNode>,
    edges: Vec<(usize, usize)>,
    pub(in crate::app) config: ForceConfig,
    anchors: HashMap<String, Vec2>,
    pub(in crate::app) arrange: bool,
    center: Vec2,
    alpha: f32,
    alpha_target: f32,
}

impl Simulation {
    pub(in crate::app) fn seed(graph: &NetworkGraph, group_key: &str, center: Vec2) -> Self {
        let nodes = graph
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| {
                let radius = SPIRAL_RADIUS * (0.5 + index as f32).sqrt();
                let angle = (index as f32) * SPIRAL_ANGLE;
                SimNode {
                    position: center + vec2(radius * angle.cos(), radius * angle.sin()),
                    velocity: Vec2::ZERO,
                    pinned: None,
                    group_value: node.attribute_value(group_key).to_string(),
                }
            })
            .collect();

        let edges = graph
            .edges
            .iter()
            .map(|edge| (edge.source, edge.target))
            .collect();

        Self {
            nodes,
            edges,
            config: ForceConfig::default(),
            anchors: HashMap::new(),
            arrange: true,
            center,
            alpha: 1.0,
            alpha_target: 0.0,
        }
    }

    pub(in crate::app) fn alpha(&self) -> f32 {
        self.alpha
    }

    pub(in crate::app) fn active(&self) -> bool {
        self.alpha >= ALPHA_MIN || self.alpha_target >= ALPHA_MIN
    }

    pub(in crate::app) fn reheat(&mut self) {
        self.alpha = 1.0;
    }

    pub(in crate::app) fn begin_drag_heat(&mut self) {
        self.alpha_target = DRAG_ALPHA_TARGET;
        if self.alpha < DRAG_ALPHA_TARGET {
            self.alpha = DRAG_ALPHA_TARGET;
        }
    }

    pub(in crate::app) fn end_drag_heat(&mut self) {
        self.alpha_target = 0.0;
    }

    pub(in crate::app) fn set_center(&mut self, center: Vec2) {
        self.center = center;
    }

    pub(in crate::app) fn set_anchors(&mut self, anchors: HashMap<String, Vec2>) {
        self.anchors = anchors;
    }

    pub(in crate::app) fn assign_group_values(&mut self, graph: &NetworkGraph, group_key: &str) {
        for (node, record) in self.nodes.iter_mut().zip(graph.nodes.iter()) {
            node.group_value = record.attribute_value(group_key).to_string();
        }
    }

    pub(in crate::app) fn pin(&mut self, index: usize, position: Vec2) {
        if let Some(node) = self.nodes.get_mut(index) {
            node.pinned = Some(position);
            node.position = position;
            node.velocity = Vec2::ZERO;
        }
    }

    pub(in crate::app) fn release(&mut self, index: usize) {
        if let Some(node) = self.nodes.get_mut(index) {
            node.pinned = None;
        }
    }

    pub(in crate::app) fn step(&mut self) -> bool {
        if self.alpha < ALPHA_MIN && self.alpha_target < ALPHA_MIN {
            return false;
        }

        self.alpha += (self.alpha_target - self.alpha) * ALPHA_DECAY;
        let alpha = self.alpha;
        let config = self.config.clone();

        let link_strength = if self.arrange {
            config.link_strength
        } else {
            config.link_strength * 2.0
        };
        apply_link_force(
            &mut self.nodes,
            &self.edges,
            config.link_distance,
            link_strength,
            alpha,
        );
        apply_repulsion(&mut self.nodes, config.repulsion_strength, alpha);
        if self.arrange {
            apply_cluster_pull(
                &mut self.nodes,
                &self.anchors,
                config.cluster_strength_x,
                config.cluster_strength_y,
                alpha,
            );
        }
        apply_collision(&mut self.nodes, config.collision_radius);
        self.apply_centering();

        for node in &mut self.nodes {
            if let Some(pin) = node.pinned {
                node.position = pin;
                node.velocity = Vec2::ZERO;
            } else {
                node.velocity *= VELOCITY_RETAIN;
                node.position += node.velocity;
            }
        }

        true
    }

    fn apply_centering(&mut self) {
        if self.nodes.is_empty() || self.config.center_strength <= 0.0 {
            return;
        }

        let mut centroid = Vec2::ZERO;
        for node in &self.nodes {
            centroid += node.position;
        }
        centroid /= self.nodes.len() as f32;

        let shift = (self.center - centroid) * self.config.center_strength;
        for node in &mut self.nodes {
            node.position += shift;
        }
    }
}
