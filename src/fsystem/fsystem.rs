// The read-only virtual file system. Folders and files exist only as nodes
// of the tree built from the archive listing; file contents always come from
// the archive itself.

use tracing::instrument;

use crate::archive::ArchiveReader;
use crate::errors::{Result, ShellError};
use crate::fsystem::paths;
use crate::fsystem::tree::{TreeBuilder, TreeNode};

const BRANCH: &str = "|-- ";
const LAST_BRANCH: &str = "|__ ";
const CONTINUATION: &str = "│   ";
const INDENT: &str = "    ";

pub struct VirtualFileSystem {
    root: TreeNode,
    archive: Box<dyn ArchiveReader>,
}

impl VirtualFileSystem {
    #[instrument(skip(archive))]
    pub fn new(archive: Box<dyn ArchiveReader>) -> VirtualFileSystem {
        let root = TreeBuilder::build(archive.list_members());
        VirtualFileSystem { root, archive }
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    pub fn members(&self) -> &[String] {
        self.archive.list_members()
    }

    pub fn find(&self, path: &str, cwd: &str) -> Option<&TreeNode> {
        let absolute = paths::normalize(path, cwd);
        let mut node = &self.root;
        for part in paths::split(&absolute) {
            node = node.get_child(part)?;
        }
        Some(node)
    }

    /// Sorted child names. Empty folders are reported the same as missing ones.
    pub fn list(&self, path: &str, cwd: &str) -> Result<Vec<String>> {
        match self.find(path, cwd) {
            Some(node) if node.has_children() => Ok(node.child_names()),
            _ => {
                tracing::info!("Nothing to list at {} (cwd {})", path, cwd);
                Err(ShellError::directory_not_found())
            }
        }
    }

    pub fn change_directory(&self, path: &str, cwd: &str) -> Result<String> {
        match path {
            "/" => Ok(paths::ROOT.to_string()),
            ".." => Ok(paths::parent(cwd)),
            _ => match self.find(path, cwd) {
                Some(node) if node.is_directory() => Ok(paths::normalize(path, cwd)),
                _ => {
                    tracing::info!("Cannot change directory to {} (cwd {})", path, cwd);
                    Err(ShellError::directory_not_found())
                }
            },
        }
    }

    /// Render the whole tree, starting with a line for the root.
    pub fn render(&self) -> String {
        let mut out = format!("{}\n", paths::ROOT);
        render_children(&self.root, "", &mut out);
        out
    }

    /// Contents of the member at `path`, looked up by name in the archive
    /// listing rather than through the tree.
    pub fn read_member(&mut self, path: &str, cwd: &str) -> Result<Vec<u8>> {
        let key = paths::member_key(path, cwd);
        if !self.archive.list_members().iter().any(|member| *member == key) {
            tracing::info!("Member {} is not listed in the archive", key);
            return Err(ShellError::file_not_found());
        }
        self.archive.read_member(&key)
    }
}

/// Render `node` and everything below it, each line prefixed with `prefix`.
pub fn render_tree(node: &TreeNode, prefix: &str) -> String {
    let mut out = format!("{}{}\n", prefix, display_name(node));
    render_children(node, prefix, &mut out);
    out
}

fn display_name(node: &TreeNode) -> String {
    if node.is_directory() {
        format!("{}/", node.name())
    } else {
        node.name().to_string()
    }
}

fn render_children(node: &TreeNode, prefix: &str, out: &mut String) {
    let children = node.sorted_children();
    let count = children.len();
    for (index, child) in children.into_iter().enumerate() {
        let last = index + 1 == count;
        let (connector, extension) = if last {
            (LAST_BRANCH, INDENT)
        } else {
            (BRANCH, CONTINUATION)
        };
        out.push_str(prefix);
        out.push_str(connector);
        out.push_str(&display_name(child));
        out.push('\n');
        render_children(child, &format!("{}{}", prefix, extension), out);
    }
}
