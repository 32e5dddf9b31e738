use dioxus::prelude::*;

use store::LearnLoopConfig;
use ui::{LearnLoopProvider, Notices};
use views::{Community, Landing};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Landing {},
    #[route("/community")]
    Community {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

const CONFIG_TOML: &str = include_str!("../learnloop.toml");

fn main() {
    dioxus::launch(App);
}

fn load_config() -> LearnLoopConfig {
    match LearnLoopConfig::from_toml(CONFIG_TOML) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("invalid {}: {e}; using defaults", LearnLoopConfig::filename());
            LearnLoopConfig::default()
        }
    }
}

#[component]
fn App() -> Element {
    let config = use_hook(load_config);

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        LearnLoopProvider {
            config: config,
            Notices {}
            Router::<Route> {}
        }
    }
}
