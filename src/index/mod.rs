pub mod category_index;

pub use category_index::{CategoryIndex, FieldNode, LevelNode, TypeLeaf};
