pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod render;

pub use config::ChartConfig;
pub use engine::event::{SelectedDatum, SelectionBus, SelectionEvent, DATUM_SELECTED};
pub use engine::sunburst::{Hit, Sunburst};
pub use error::{ChartError, Result};
