pub mod assets;
pub mod vision;
