pub mod archive;
pub mod pipeline;
