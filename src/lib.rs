pub mod app;
pub mod cli;
pub mod config;
pub mod contact;
pub mod events;
pub mod images;
pub mod keyboard;
pub mod observe;
pub mod page;
pub mod reveal;
pub mod scroll;
pub mod theme;
pub mod typing;
pub mod ui;

pub use app::App;
