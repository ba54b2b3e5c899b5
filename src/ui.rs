pub mod input;
pub mod sidebar;
