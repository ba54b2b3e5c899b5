pub mod config;
pub mod image;
pub mod library;
pub mod obj_loader;
