pub mod modules;
pub mod resources;
