pub mod config;
pub mod game;
pub mod map;
pub mod renderer;
pub mod types;
pub mod world;
