use eframe::egui::{Vec2, vec2};

use crate::data::NetworkGraph;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(in crate::app) struct CategoryGroup {
    pub(in crate::app) name: String,
    pub(in crate::app) count: usize,
}

#[derive(Clone, Debug)]
pub(in crate::app) struct PackedGroup {
    pub(in crate::app) name: String,
    pub(in crate::app) count: usize,
    pub(in crate::app) anchor: Vec2,
    pub(in crate::app) radius: f32,
}

pub(in crate::app) fn compute_groups(graph: &NetworkGraph, attribute: &str) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();

    for node in &graph.nodes {
        let value = node.attribute_value(attribute);
        if let Some(group) = groups.iter_mut().find(|group| group.name == value) {
            group.count += 1;
        } else {
            groups.push(CategoryGroup {
                name: value.to_string(),
                count: 1,
            });
        }
    }

    // Stable sort keeps first-encountered order for equal cardinalities.
    groups.sort_by(|a, b| b.count.cmp(&a.count));
    groups
}

pub(in crate::app) fn pack_anchors(
    groups: &[CategoryGroup],
    width: f32,
    height: f32,
) -> Vec<PackedGroup> {
    if groups.is_empty() {
        return Vec::new();
    }

    let width = width.max(1.0);
    let height = height.max(1.0);

    let radii = groups
        .iter()
        .map(|group| (group.count as f32).sqrt())
        .collect::<Vec<_>>();
    let centers = place_circles(&radii);

    let mut min = vec2(f32::INFINITY, f32::INFINITY);
    let mut max = vec2(f32::NEG_INFINITY, f32::NEG_INFINITY);
    for (center, radius) in centers.iter().zip(radii.iter()) {
        min.x = min.x.min(center.x - radius);
        min.y = min.y.min(center.y - radius);
        max.x = max.x.max(center.x + radius);
        max.y = max.y.max(center.y + radius);
    }

    let span_x = (max.x - min.x).max(f32::EPSILON);
    let span_y = (max.y - min.y).max(f32::EPSILON);
    let scale = (width / span_x).min(height / span_y);
    let offset = vec2(
        ((width - (span_x * scale)) * 0.5) - (min.x * scale),
        ((height - (span_y * scale)) * 0.5) - (min.y * scale),
    );

    groups
        .iter()
        .zip(centers.iter().zip(radii.iter()))
        .map(|(group, (center, radius))| PackedGroup {
            name: group.name.clone(),
            count: group.count,
            anchor: (*center * scale) + offset,
            radius: radius * scale,
        })
        .collect()
}

fn place_circles(radii: &[f32]) -> Vec<Vec2> {
    let mut centers: Vec<Vec2> = Vec::with_capacity(radii.len());

    for (index, &radius) in radii.iter().enumerate() {
        let center = match index {
            0 => Vec2::ZERO,
            1 => vec2(radii[0] + radius, 0.0),
            _ => best_tangent_position(&centers, radii, radius),
        };
        centers.push(center);
    }

    centers
}

fn best_tangent_position(centers: &[Vec2], radii: &[f32], radius: f32) -> Vec2 {
    let mut best: Option<Vec2> = None;

    for first in 0..centers.len() {
        for second in (first + 1)..centers.len() {
            for candidate in tangent_candidates(
                centers[first],
                radii[first] + radius,
                centers[second],
                radii[second] + radius,
            ) {
                if overlaps_any(candidate, radius, centers, radii) {
                    continue;
                }

                let closer = best
                    .map(|current| candidate.length_sq() < current.length_sq())
                    .unwrap_or(true);
                if closer {
                    best = Some(candidate);
                }
            }
        }
    }

    best.unwrap_or_else(|| fallback_position(centers, radii, radius))
}

fn tangent_candidates(center_a: Vec2, reach_a: f32, center_b: Vec2, reach_b: f32) -> Vec<Vec2> {
    let delta = center_b - center_a;
    let distance = delta.length();
    if distance <= f32::EPSILON
        || distance > reach_a + reach_b
        || distance < (reach_a - reach_b).abs()
    {
        return Vec::new();
    }

    let along = ((reach_a * reach_a) - (reach_b * reach_b) + (distance * distance))
        / (2.0 * distance);
    let across = ((reach_a * reach_a) - (along * along)).max(0.0).sqrt();
    let base = center_a + (delta * (along / distance));
    let perpendicular = vec2(-delta.y, delta.x) / distance;

    vec![base + (perpendicular * across), base - (perpendicular * across)]
}

fn overlaps_any(candidate: Vec2, radius: f32, centers: &[Vec2], radii: &[f32]) -> bool {
    centers.iter().zip(radii.iter()).any(|(center, other)| {
        let clearance = (radius + other) * (1.0 - 1e-3);
        (*center - candidate).length_sq() < clearance * clearance
    })
}

fn fallback_position(centers: &[Vec2], radii: &[f32], radius: f32) -> Vec2 {
    let rightmost = centers
        .iter()
        .zip(radii.iter())
        .map(|(center, other)| center.x + other)
        .fold(0.0_f32, f32::max);
    vec2(rightmost + radius, 0.0)
}
