use dioxus::prelude::*;
use store::{ClientConfig, Sessions};

fn main() {
    dioxus::launch(App);
}

/// Base URL baked in at build time via `WELLNESS_API_URL`, else the default.
fn client_config() -> ClientConfig {
    match option_env!("WELLNESS_API_URL") {
        Some(url) => ClientConfig::default().with_base_url(url),
        None => ClientConfig::default(),
    }
}

fn open_sessions(config: &ClientConfig) -> Sessions {
    #[cfg(target_arch = "wasm32")]
    {
        Sessions::open(store::LocalStorage::new(), config)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Sessions::open(store::MemoryStore::new(), config)
    }
}

#[component]
fn App() -> Element {
    let config = use_hook(client_config);
    let sessions = use_hook(|| open_sessions(&config));
    let client = use_hook(|| api::ApiClient::new(&config));

    use_hook(|| {
        tracing::info!(
            api = %config.api.base_url,
            user = sessions.user().current().is_logged_in(),
            admin = sessions.admin().current().is_logged_in(),
            "session restored"
        );
    });

    rsx! {
        ui::Shell { sessions, client }
    }
}
