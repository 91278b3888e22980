pub mod banner;
pub mod config;
pub mod error;
pub mod i18n;
pub mod site;
pub mod surface;
pub mod ui;
