pub mod analysis;
pub mod mvi;
pub mod render;
