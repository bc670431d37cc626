pub mod predict;
pub mod serve;

pub use predict::{predict, Readings};
pub use serve::serve;
