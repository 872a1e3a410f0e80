#![warn(clippy::all, rust_2018_idioms)]

// When compiling natively:
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Display Designer")
            .with_inner_size([1200.0, 700.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };
    eframe::run_native(
        "display_designer",
        native_options,
        Box::new(|cc| Ok(Box::new(display_designer::DesignerApp::new(cc)))),
    )
}

// The editor is a desktop tool; there is no web entry point.
#[cfg(target_arch = "wasm32")]
fn main() {}
