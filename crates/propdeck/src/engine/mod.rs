pub mod analytics;
pub mod navigator;
pub mod shell;
pub mod transition;
