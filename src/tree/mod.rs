// bst-rust/src/tree/mod.rs

pub mod bst_tree;
pub mod cursor;

// Re-export the main tree struct for easier access.
pub use bst_tree::BstTree;
pub use cursor::Cursor;
