use std::collections::HashMap;

use eframe::egui::{Vec2, vec2};

use super::SimNode;

const THETA_SQ: f32 = 0.81;
const MIN_DISTANCE_SQ: f32 = 1.0;
const MAX_QUAD_DEPTH: usize = 16;

pub(super) fn stable_direction(seed: usize) -> Vec2 {
    let angle = ((seed as f32) * 0.618_034 + 0.25) * std::f32::consts::TAU;
    vec2(angle.cos(), angle.sin())
}

pub(super) fn apply_link_force(
    nodes: &mut [SimNode],
    edges: &[(usize, usize)],
    distance: f32,
    strength: f32,
    alpha: f32,
) {
    for &(source, target) in edges {
        if source == target {
            continue;
        }

        let delta = (nodes[target].position + nodes[target].velocity)
            - (nodes[source].position + nodes[source].velocity);
        let length = delta.length();
        let (length, delta) = if length > 1e-4 {
            (length, delta)
        } else {
            let jiggle = stable_direction(source.wrapping_mul(31) ^ target);
            (1e-4, jiggle * 1e-4)
        };

        let displacement = ((length - distance) / length) * strength * alpha;
        let correction = delta * displacement;
        nodes[target].velocity -= correction * 0.5;
        nodes[source].velocity += correction * 0.5;
    }
}

pub(super) fn apply_repulsion(nodes: &mut [SimNode], strength: f32, alpha: f32) {
    if nodes.len() < 2 {
        return;
    }

    let positions = nodes.iter().map(|node| node.position).collect::<Vec<_>>();
    let Some(mut root) = QuadCell::enclosing(&positions) else {
        return;
    };
    for (index, position) in positions.iter().enumerate() {
        root.insert(index, *position, 0);
    }

    let scaled = strength * alpha;
    for (index, node) in nodes.iter_mut().enumerate() {
        let mut force = Vec2::ZERO;
        root.accumulate(index, positions[index], scaled, &mut force);
        node.velocity += force;
    }
}

pub(super) fn apply_cluster_pull(
    nodes: &mut [SimNode],
    anchors: &HashMap<String, Vec2>,
    strength_x: f32,
    strength_y: f32,
    alpha: f32,
) {
    for node in nodes {
        let Some(anchor) = anchors.get(node.group_value.as_str()) else {
            continue;
        };

        node.velocity.x += (anchor.x - node.position.x) * strength_x * alpha;
        node.velocity.y += (anchor.y - node.position.y) * strength_y * alpha;
    }
}

pub(super) fn apply_collision(nodes: &mut [SimNode], radius: f32) {
    let min_distance = radius * 2.0;
    if min_distance <= 0.0 {
        return;
    }

    for first in 0..nodes.len() {
        for second in (first + 1)..nodes.len() {
            let delta = (nodes[second].position + nodes[second].velocity)
                - (nodes[first].position + nodes[first].velocity);
            let distance = delta.length();
            if distance >= min_distance {
                continue;
            }

            let direction = if distance > 1e-4 {
                delta / distance
            } else {
                stable_direction(first.wrapping_mul(131) ^ second)
            };

            let push = (min_distance - distance) * 0.5;
            nodes[first].velocity -= direction * push;
            nodes[second].velocity += direction * push;
        }
    }
}

struct QuadCell {
    center: Vec2,
    half_extent: f32,
    mass: f32,
    weighted_position: Vec2,
    body: Option<usize>,
    children: Option<Box<[Option<QuadCell>; 4]>>,
}

impl QuadCell {
    fn enclosing(positions: &[Vec2]) -> Option<Self> {
        let mut min = vec2(f32::INFINITY, f32::INFINITY);
        let mut max = vec2(f32::NEG_INFINITY, f32::NEG_INFINITY);
        for position in positions {
            min.x = min.x.min(position.x);
            min.y = min.y.min(position.y);
            max.x = max.x.max(position.x);
            max.y = max.y.max(position.y);
        }

        if !min.x.is_finite() || !min.y.is_finite() || !max.x.is_finite() || !max.y.is_finite() {
            return None;
        }

        let center = (min + max) * 0.5;
        let half_extent = (((max.x - min.x).max(max.y - min.y)) * 0.5) + 1.0;
        Some(Self::empty(center, half_extent))
    }

    fn empty(center: Vec2, half_extent: f32) -> Self {
        Self {
            center,
            half_extent,
            mass: 0.0,
            weighted_position: Vec2::ZERO,
            body: None,
            children: None,
        }
    }

    fn quadrant_for(&self, position: Vec2) -> usize {
        let right = position.x >= self.center.x;
        let lower = position.y >= self.center.y;
        (right as usize) | ((lower as usize) << 1)
    }

    fn child_center(&self, quadrant: usize) -> Vec2 {
        let quarter = self.half_extent * 0.5;
        let x = if quadrant & 1 == 0 { -quarter } else { quarter };
        let y = if quadrant & 2 == 0 { -quarter } else { quarter };
        self.center + vec2(x, y)
    }

    fn insert(&mut self, index: usize, position: Vec2, depth: usize) {
        self.mass += 1.0;
        self.weighted_position += position;

        if depth >= MAX_QUAD_DEPTH {
            self.body.get_or_insert(index);
            return;
        }

        if self.children.is_some() {
            self.insert_into_child(index, position, depth);
        } else if let Some(existing) = self.body.take() {
            let existing_position = (self.weighted_position - position) / (self.mass - 1.0);
            self.children = Some(Box::new([None, None, None, None]));
            self.insert_into_child(existing, existing_position, depth);
            self.insert_into_child(index, position, depth);
        } else {
            self.body = Some(index);
        }
    }

    fn insert_into_child(&mut self, index: usize, position: Vec2, depth: usize) {
        let quadrant = self.quadrant_for(position);
        let child_center = self.child_center(quadrant);
        let half_extent = self.half_extent * 0.5;
        let children = self.children.as_mut().expect("children allocated");
        let child =
            children[quadrant].get_or_insert_with(|| Self::empty(child_center, half_extent));
        child.insert(index, position, depth + 1);
    }

    fn accumulate(&self, index: usize, position: Vec2, scaled_strength: f32, force: &mut Vec2) {
        if self.mass <= 0.0 {
            return;
        }

        let center_of_mass = self.weighted_position / self.mass;
        let delta = position - center_of_mass;
        let distance_sq = delta.length_sq();
        let side = self.half_extent * 2.0;

        if let Some(children) = &self.children {
            if (side * side) < (THETA_SQ * distance_sq) {
                let clamped = distance_sq.max(MIN_DISTANCE_SQ);
                *force += delta * (scaled_strength * self.mass / clamped);
                return;
            }

            for child in children.iter().flatten() {
                child.accumulate(index, position, scaled_strength, force);
            }
            return;
        }

        let own_mass = if self.body == Some(index) {
            self.mass - 1.0
        } else {
            self.mass
        };
        if own_mass <= 0.0 {
            return;
        }

        if distance_sq > 1e-8 {
            let clamped = distance_sq.max(MIN_DISTANCE_SQ);
            *force += delta * (scaled_strength * own_mass / clamped);
        } else {
            *force += stable_direction(index) * scaled_strength * own_mass;
        }
    }
}
