use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};

use crate::data::{NetworkGraph, load_network};

mod grouping;
mod render_utils;
mod session;
mod sim;
mod ui;
mod view;

use session::Session;

pub struct GraphLensApp {
    data_path: String,
    group_key: Option<String>,
    state: AppState,
    reload_rx: Option<Receiver<Result<NetworkGraph, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<NetworkGraph, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    session: Session,
    attribute_keys: Vec<String>,
    search: String,
    show_group_outlines: bool,
}

impl GraphLensApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        data_path: String,
        group_key: Option<String>,
    ) -> Self {
        let state = Self::start_load(data_path.clone());
        Self {
            data_path,
            group_key,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(data_path: String) -> Receiver<Result<NetworkGraph, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_network(&data_path).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(data_path: String) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(data_path),
        }
    }
}

impl eframe::App for GraphLensApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(graph) => AppState::Ready(Box::new(ViewModel::new(
                            graph,
                            self.group_key.clone(),
                        ))),
                        Err(error) => AppState::Error(error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading network dataset...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
                ctx.request_repaint();
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load network dataset");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.data_path.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.data_path, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.data_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => {
                            transition = Some(match result {
                                Ok(graph) => AppState::Ready(Box::new(ViewModel::new(
                                    graph,
                                    self.group_key.clone(),
                                ))),
                                Err(error) => AppState::Error(error),
                            });
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition = Some(AppState::Error(
                                "Background load worker disconnected".to_owned(),
                            ));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
