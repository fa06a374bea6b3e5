use eframe::egui::{RichText, Ui};

use super::super::ViewModel;
use super::super::session::ItemRef;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Details");
        ui.add_space(6.0);

        let Some(selection) = self.session.selection else {
            ui.label("Click a node or an edge to inspect it.");
            return;
        };

        match selection {
            ItemRef::Node(index) => {
                let Some(node) = self.session.graph.nodes.get(index) else {
                    ui.label("The selected node is no longer part of the graph.");
                    return;
                };

                ui.label(RichText::new(node.display_title()).strong());
                ui.small(node.id.as_str());
                ui.add_space(6.0);

                if !node.description.is_empty() {
                    ui.label(node.description.as_str());
                }
                if !node.attributes.is_empty() {
                    ui.add_space(6.0);
                    for (key, value) in &node.attributes {
                        ui.label(format!("{key}: {value}"));
                    }
                }

                Self::draw_references(ui, &node.links);
            }
            ItemRef::Edge { source, target } => {
                let Some(edge) = self.session.graph.edge_between(source, target) else {
                    ui.label("The selected edge is no longer part of the graph.");
                    return;
                };

                ui.label(RichText::new(self.session.graph.edge_title(edge)).strong());
                if !edge.label.is_empty() {
                    ui.small(edge.label.as_str());
                }
                ui.add_space(6.0);

                if !edge.description.is_empty() {
                    ui.label(edge.description.as_str());
                }

                Self::draw_references(ui, &edge.links);
            }
        }
    }

    fn draw_references(ui: &mut Ui, links: &[String]) {
        if links.is_empty() {
            return;
        }

        ui.add_space(6.0);
        ui.horizontal_wrapped(|ui| {
            ui.label(RichText::new("Sources:").weak());
            for (index, url) in links.iter().enumerate() {
                ui.hyperlink_to(format!("[{}]", index + 1), url);
            }
        });
    }
}
