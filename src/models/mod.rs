pub mod analysis;
pub mod dashscope;
