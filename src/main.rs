mod app;
mod data;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(long, default_value = "data/network.json")]
    data: String,

    #[arg(long)]
    group_by: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "graphlens",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::GraphLensApp::new(
                cc,
                args.data.clone(),
                args.group_by.clone(),
            )))
        }),
    )
}
