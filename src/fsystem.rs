pub(crate) mod fsystem;
pub(crate) mod paths;
pub(crate) mod tree;

pub use fsystem::{render_tree, VirtualFileSystem};
pub use tree::TreeNode;
