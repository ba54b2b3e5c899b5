pub mod camera;
pub mod context;
pub mod mesh;
pub mod projection;
pub mod scene_object;
