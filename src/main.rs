#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use documentor::{DocumentorApp, EditorConfig};

// When compiling natively:
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Optional first argument: a JSON editor configuration.
    let config = std::env::args().nth(1).and_then(|path| match EditorConfig::load(&path) {
        Ok(config) => Some(config),
        Err(err) => {
            log::error!("{}", err);
            None
        }
    });

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([400.0, 300.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        "Documentor",
        native_options,
        Box::new(move |cc| Ok(Box::new(DocumentorApp::new(cc, config)))),
    )
}

// The editor only ships as a native application.
#[cfg(target_arch = "wasm32")]
fn main() {}
