use eframe::egui::{self, Align, Context, Layout, vec2};

use crate::data::NetworkGraph;

use super::super::ViewModel;
use super::super::session::Session;

impl ViewModel {
    pub(in crate::app) fn new(graph: NetworkGraph, group_key: Option<String>) -> Self {
        let attribute_keys = graph.attribute_keys();
        let session = Session::new(graph, group_key, vec2(1280.0, 800.0));

        Self {
            session,
            attribute_keys,
            search: String::new(),
            show_group_outlines: false,
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        data_path: &str,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("graphlens");
                    ui.separator();
                    ui.label(format!("dataset: {data_path}"));
                    ui.label(format!("nodes: {}", self.session.graph.node_count()));
                    ui.label(format!("edges: {}", self.session.graph.edge_count()));
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload dataset"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if self.session.sim.active() {
                            ui.label(format!("heat {:.3}", self.session.sim.alpha()));
                        } else {
                            ui.label("settled");
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Reloading network dataset...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            } else {
                self.draw_graph(ui);
            }
        });
    }
}
