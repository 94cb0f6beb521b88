pub mod config_file;
pub mod render;
pub mod seed;
