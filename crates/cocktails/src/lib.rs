pub mod assets;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod nav;
pub mod report;
pub mod selector;
pub mod text;
pub mod timer;
pub mod ui;

pub use error::{Error, Result};
