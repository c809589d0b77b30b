pub mod animator;
pub mod arc;
pub mod color;
pub mod label;
pub mod layout;
pub mod paint;
pub mod visibility;
