//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

pub const LEARNLOOP_CSS: Asset = asset!("/assets/learnloop.css");

mod context;
pub use context::{
    use_app, use_cancel_token, use_path, use_store, AppContext, LearnLoopProvider,
};

mod media;

mod notices;
pub use notices::Notices;

mod header;
pub use header::Header;

pub mod views;
pub use views::CenterSection;

pub mod modals;
