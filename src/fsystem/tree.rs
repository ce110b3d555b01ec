// In-memory directory tree built from the flat member list of an archive.
// The archive only tells us names, so whether a leaf is a folder is guessed
// from its shape: a final segment without an extension is treated as a folder.

use std::collections::HashMap;
use tracing::instrument;

use crate::fsystem::paths::{self, has_extension};

#[derive(Clone, Debug, PartialEq)]
pub struct TreeNode {
    pub(crate) name: String,
    pub(crate) is_directory: bool,
    pub(crate) children: HashMap<String, TreeNode>,
}

impl TreeNode {
    fn new(name: &str, is_directory: bool) -> TreeNode {
        TreeNode {
            name: name.to_string(),
            is_directory,
            children: HashMap::new(),
        }
    }

    pub(crate) fn root() -> TreeNode {
        TreeNode::new(paths::ROOT, true)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// A node with children is a folder whatever it was classified as.
    pub fn is_directory(&self) -> bool {
        self.is_directory || self.has_children()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn get_child(&self, name: &str) -> Option<&TreeNode> {
        self.children.get(name)
    }

    pub fn child_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.children.keys().cloned().collect();
        names.sort();
        names
    }

    /// Children in display order: folders first, then by name.
    pub(crate) fn sorted_children(&self) -> Vec<&TreeNode> {
        let mut children: Vec<&TreeNode> = self.children.values().collect();
        children.sort_by(|a, b| {
            (!a.is_directory(), &a.name).cmp(&(!b.is_directory(), &b.name))
        });
        children
    }

    fn get_or_insert(&mut self, name: &str, is_directory: bool) -> &mut TreeNode {
        // First-seen wins; an existing node keeps its classification.
        self.children
            .entry(name.to_string())
            .or_insert_with(|| TreeNode::new(name, is_directory))
    }
}

/// Whether the segment at `index` of a `count`-segment member path names a folder.
pub(crate) fn classify_as_directory(segment: &str, index: usize, count: usize) -> bool {
    index + 1 != count || !has_extension(segment)
}

pub(crate) struct TreeBuilder {
    root: TreeNode,
}

impl TreeBuilder {
    pub(crate) fn new() -> TreeBuilder {
        TreeBuilder {
            root: TreeNode::root(),
        }
    }

    pub(crate) fn add(&mut self, member_path: &str) {
        let parts = paths::split(member_path);
        let count = parts.len();
        let mut node = &mut self.root;
        for (index, part) in parts.into_iter().enumerate() {
            node = node.get_or_insert(part, classify_as_directory(part, index, count));
        }
    }

    pub(crate) fn finish(self) -> TreeNode {
        self.root
    }

    #[instrument(skip(members), fields(count = members.len()))]
    pub(crate) fn build(members: &[String]) -> TreeNode {
        let mut builder = TreeBuilder::new();
        for member in members {
            builder.add(member);
        }
        tracing::info!("Built tree with {} top-level entries", builder.root.children.len());
        builder.finish()
    }
}
