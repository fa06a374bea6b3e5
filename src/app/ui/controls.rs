use eframe::egui::{self, RichText, Ui};

use super::super::ViewModel;
use super::super::render_utils::category_color;
use super::super::session::InputEvent;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Grouping");
        ui.add_space(6.0);

        let mut selected_key = self.session.group_key.clone();
        egui::ComboBox::from_label("Group by")
            .selected_text(selected_key.clone())
            .show_ui(ui, |ui| {
                for key in &self.attribute_keys {
                    ui.selectable_value(&mut selected_key, key.clone(), key);
                }
            });
        if selected_key != self.session.group_key {
            self.session
                .queue_event(InputEvent::AttributeChanged { key: selected_key });
        }

        let mut arranged = self.session.sim.arrange;
        if ui.checkbox(&mut arranged, "Keep arranged").changed() {
            self.session
                .queue_event(InputEvent::ArrangeToggled { enabled: arranged });
        }

        ui.checkbox(&mut self.show_group_outlines, "Show group outlines");

        ui.separator();
        ui.label(RichText::new("Forces").strong());

        let mut config = self.session.sim.config.clone();
        ui.add(
            egui::Slider::new(&mut config.link_strength, 0.0..=0.3)
                .text("link strength"),
        );
        ui.add(
            egui::Slider::new(&mut config.link_distance, 5.0..=120.0)
                .text("link distance"),
        );
        ui.add(
            egui::Slider::new(&mut config.repulsion_strength, 0.0..=120.0)
                .text("repulsion"),
        );
        ui.add(
            egui::Slider::new(&mut config.collision_radius, 0.0..=40.0)
                .text("collision radius"),
        );
        ui.add(
            egui::Slider::new(&mut config.cluster_strength_x, 0.0..=0.5)
                .text("cluster pull x"),
        );
        ui.add(
            egui::Slider::new(&mut config.cluster_strength_y, 0.0..=0.5)
                .text("cluster pull y"),
        );
        self.session.set_force_config(config);

        ui.separator();
        ui.label(RichText::new("Search").strong());
        ui.text_edit_singleline(&mut self.search);

        ui.separator();
        ui.label(RichText::new("Legend").strong());
        ui.add_space(4.0);

        for (index, group) in self.session.groups.iter().enumerate() {
            ui.horizontal(|ui| {
                let (swatch, _) =
                    ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
                ui.painter()
                    .rect_filled(swatch, 2.0, category_color(index));
                ui.label(format!("{} ({})", group.name, group.count));
            });
        }
    }
}
