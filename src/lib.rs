// Library target backs both the `flashdeck` binary and the integration tests
// under tests/, which drive the controller without a terminal.

rust_i18n::i18n!("locales", fallback = "en");

pub mod app;
pub mod config;
pub mod event;
pub mod focus;
pub mod image;
pub mod keys;
pub mod session;
pub mod store;
pub mod ui;
