pub mod app;
pub mod calendar;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod install;
pub mod ledger;
pub mod models;
pub mod pipeline;
pub mod reminder;
pub mod state;
pub mod stats;
pub mod storage;
pub mod theme;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::load_store;
