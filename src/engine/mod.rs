pub mod bridge;
pub mod config;
pub mod layouter;
pub mod renderer;
pub mod text;
