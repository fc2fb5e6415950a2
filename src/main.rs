mod app;
mod config;
mod domain;
mod infra;
mod platform;
mod ui;
mod usecase;

#[cfg(test)]
mod tests;

use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::config::{default_webview_data_dir, LOG_DIRECTIVE, WINDOW_TITLE};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(LOG_DIRECTIVE))
        .init();

    let webview_data_dir =
        default_webview_data_dir().expect("should resolve and create WebView2 data directory");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title(WINDOW_TITLE))
                .with_data_directory(webview_data_dir),
        )
        .launch(App);
}
