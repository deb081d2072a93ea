pub mod config;
pub mod logging;
pub mod model;
pub mod remote;
pub mod shell;
pub mod tree;
pub mod tui;
