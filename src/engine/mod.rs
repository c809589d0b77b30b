pub mod event;
pub mod sunburst;
