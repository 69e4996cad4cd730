use std::path::PathBuf;

use dioxus::prelude::*;
use store::{ClientConfig, FileStore, Sessions};

fn main() {
    dioxus::launch(App);
}

/// `<data_dir>/wellness`, or `./wellness` when the platform has none.
fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wellness")
}

/// Read `client.toml` from the data dir, falling back to defaults.
fn client_config(dir: &std::path::Path) -> ClientConfig {
    let path = dir.join(ClientConfig::filename());
    let Ok(text) = std::fs::read_to_string(&path) else {
        return ClientConfig::default();
    };
    match ClientConfig::from_toml(&text) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config file");
            ClientConfig::default()
        }
    }
}

#[component]
fn App() -> Element {
    let dir = use_hook(data_dir);
    let config = use_hook(|| client_config(&dir));
    let sessions = use_hook(|| Sessions::open(FileStore::new(dir.join("session")), &config));
    let client = use_hook(|| api::ApiClient::new(&config));

    use_hook(|| {
        tracing::info!(
            data_dir = %dir.display(),
            api = %config.api.base_url,
            "session store opened"
        );
    });

    rsx! {
        ui::Shell { sessions, client }
    }
}
