pub mod format;
pub mod render;
pub mod visits;
