use std::collections::HashSet;

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Stroke, Ui, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::ViewModel;
use super::render_utils::{blend_color, category_color, dim_color, point_segment_distance};
use super::session::{InputEvent, ItemRef};

const NODE_RADIUS: f32 = 7.0;
const NODE_HIT_RADIUS: f32 = 11.0;
const EDGE_HIT_DISTANCE: f32 = 5.0;

const BACKGROUND_COLOR: Color32 = Color32::from_rgb(19, 23, 29);
const SELECTION_COLOR: Color32 = Color32::from_rgb(245, 206, 93);
const SEARCH_MATCH_COLOR: Color32 = Color32::from_rgb(103, 196, 255);

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        let origin = rect.left_top();

        painter.rect_filled(rect, 0.0, BACKGROUND_COLOR);

        let size = rect.size();
        if (size.x - self.session.viewport.x).abs() > 0.5
            || (size.y - self.session.viewport.y).abs() > 0.5
        {
            self.session.queue_event(InputEvent::Resized {
                width: size.x,
                height: size.y,
            });
        }

        if response.drag_started_by(egui::PointerButton::Primary)
            && let Some(pointer) = response.interact_pointer_pos()
            && let Some(node) = self.node_at(pointer, origin)
        {
            self.session.queue_event(InputEvent::PointerDown {
                node,
                position: pointer - origin,
            });
        }

        if response.dragged_by(egui::PointerButton::Primary)
            && self.session.dragging().is_some()
            && let Some(pointer) = response.interact_pointer_pos()
        {
            self.session.queue_event(InputEvent::PointerMove {
                position: pointer - origin,
            });
        }

        if response.drag_stopped_by(egui::PointerButton::Primary)
            && self.session.dragging().is_some()
        {
            self.session.queue_event(InputEvent::PointerUp);
        }

        if response.clicked()
            && let Some(pointer) = response.interact_pointer_pos()
        {
            let item = self.item_at(pointer, origin);
            self.session.queue_event(InputEvent::Click { item });
        }

        let pointer_item = if self.session.dragging().is_none() {
            response
                .hover_pos()
                .and_then(|pointer| self.item_at(pointer, origin))
        } else {
            None
        };
        if pointer_item != self.session.hovered {
            if self.session.hovered.is_some() {
                self.session.queue_event(InputEvent::HoverLeave);
            }
            if let Some(item) = pointer_item {
                self.session.queue_event(InputEvent::HoverEnter { item });
            }
        }

        let moving = self.session.step();
        if moving || response.dragged() {
            ui.ctx().request_repaint();
        }

        if self.session.hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        if self.show_group_outlines {
            self.draw_group_outlines(&painter, origin);
        }

        let search_matches = self.search_matches();

        for edge in &self.session.graph.edges {
            let start = origin + self.session.sim.nodes[edge.source].position;
            let end = origin + self.session.sim.nodes[edge.target].position;
            let item = ItemRef::Edge {
                source: edge.source,
                target: edge.target,
            };

            let (width, color) = if self.session.selection == Some(item) {
                (2.6, SELECTION_COLOR)
            } else if self.session.hovered == Some(item) {
                (2.2, Color32::from_gray(220))
            } else {
                (1.2, Color32::from_gray(95))
            };
            painter.line_segment([start, end], Stroke::new(width, color));
        }

        for (index, sim_node) in self.session.sim.nodes.iter().enumerate() {
            let position = origin + sim_node.position;
            let item = ItemRef::Node(index);
            let is_selected = self.session.selection == Some(item);
            let is_hovered = self.session.hovered == Some(item);
            let is_match = search_matches
                .as_ref()
                .is_some_and(|matches| matches.contains(&index));

            let base = self
                .session
                .group_index(&sim_node.group_value)
                .map(category_color)
                .unwrap_or(Color32::from_gray(140));
            let color = if is_hovered {
                blend_color(base, Color32::WHITE, 0.35)
            } else if search_matches.is_some() && !is_match {
                dim_color(base, 0.45)
            } else {
                base
            };

            let radius = if is_hovered {
                NODE_RADIUS + 2.0
            } else {
                NODE_RADIUS
            };

            if is_selected {
                painter.circle_stroke(
                    position,
                    radius + 4.0,
                    Stroke::new(2.0, SELECTION_COLOR),
                );
            }
            if is_match {
                painter.circle_stroke(
                    position,
                    radius + 2.5,
                    Stroke::new(1.6, SEARCH_MATCH_COLOR),
                );
            }

            painter.circle_filled(position, radius, color);
            painter.circle_stroke(
                position,
                radius,
                Stroke::new(1.0, Color32::from_rgba_unmultiplied(15, 15, 15, 190)),
            );

            painter.text(
                position + vec2(radius + 4.0, 0.0),
                Align2::LEFT_CENTER,
                &self.session.graph.nodes[index].label,
                FontId::proportional(11.0),
                Color32::from_gray(205),
            );
        }
    }

    fn draw_group_outlines(&self, painter: &egui::Painter, origin: Pos2) {
        for (index, group) in self.session.groups.iter().enumerate() {
            let center = origin + group.anchor;
            let color = category_color(index);
            painter.circle_stroke(
                center,
                group.radius,
                Stroke::new(1.0, dim_color(color, 0.6)),
            );
            painter.text(
                center,
                Align2::CENTER_CENTER,
                &group.name,
                FontId::proportional(12.0),
                dim_color(color, 0.8),
            );
        }
    }

    fn search_matches(&self) -> Option<HashSet<usize>> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        let matcher = SkimMatcherV2::default();
        let matches = self
            .session
            .graph
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                matcher
                    .fuzzy_match(&node.label, query)
                    .or_else(|| {
                        matcher.fuzzy_match(
                            &node.label.to_ascii_lowercase(),
                            &query.to_ascii_lowercase(),
                        )
                    })
                    .map(|_score| index)
            })
            .collect();
        Some(matches)
    }

    fn node_at(&self, pointer: Pos2, origin: Pos2) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (index, node) in self.session.sim.nodes.iter().enumerate() {
            let distance = ((origin + node.position) - pointer).length();
            if distance <= NODE_HIT_RADIUS
                && best.map(|(_, nearest)| distance < nearest).unwrap_or(true)
            {
                best = Some((index, distance));
            }
        }
        best.map(|(index, _)| index)
    }

    fn edge_at(&self, pointer: Pos2, origin: Pos2) -> Option<ItemRef> {
        let mut best: Option<(ItemRef, f32)> = None;
        for edge in &self.session.graph.edges {
            let start = origin + self.session.sim.nodes[edge.source].position;
            let end = origin + self.session.sim.nodes[edge.target].position;
            let distance = point_segment_distance(pointer, start, end);
            if distance <= EDGE_HIT_DISTANCE
                && best.map(|(_, nearest)| distance < nearest).unwrap_or(true)
            {
                best = Some((
                    ItemRef::Edge {
                        source: edge.source,
                        target: edge.target,
                    },
                    distance,
                ));
            }
        }
        best.map(|(item, _)| item)
    }

    fn item_at(&self, pointer: Pos2, origin: Pos2) -> Option<ItemRef> {
        self.node_at(pointer, origin)
            .map(ItemRef::Node)
            .or_else(|| self.edge_at(pointer, origin))
    }
}
