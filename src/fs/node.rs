//! File System Nodes
//!
//! Node storage for the virtual file system: an arena of tagged nodes
//! addressed by `NodeId`, with non-owning parent back-references.

use indexmap::IndexMap;

/// Reported size of every directory node.
pub const DIRECTORY_SIZE: u64 = 4096;

/// Size given to executables whose seed does not declare one.
pub const DEFAULT_EXECUTABLE_SIZE: u64 = 12288;

/// Handle to a node in the arena. Ids are handed out by the tree and stay
/// valid for its whole life; the arena is append-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// Entry discriminant, used in listings and completion filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    File,
    Executable,
    Directory,
}

/// Node payload. Directory children are keyed by name and iterate in
/// insertion order, which is the listing order callers observe.
#[derive(Debug, Clone)]
pub(crate) enum NodeKind {
    File { data: String },
    Executable,
    Directory { children: IndexMap<String, NodeId> },
}

impl NodeKind {
    pub(crate) fn file_kind(&self) -> FileKind {
        match self {
            NodeKind::File { .. } => FileKind::File,
            NodeKind::Executable => FileKind::Executable,
            NodeKind::Directory { .. } => FileKind::Directory,
        }
    }

    pub(crate) fn is_directory(&self) -> bool {
        matches!(self, NodeKind::Directory { .. })
    }
}

/// One node of the tree. `parent` is `None` only for the root.
#[derive(Debug, Clone)]
pub(crate) struct FileSystemNode {
    pub(crate) name: String,
    pub(crate) kind: NodeKind,
    pub(crate) size: u64,
    pub(crate) parent: Option<NodeId>,
}

/// Listing record: what `ls` and tab completion see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub kind: FileKind,
    pub size: u64,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_kind_discriminants() {
        let file = NodeKind::File {
            data: "hello".to_string(),
        };
        assert_eq!(file.file_kind(), FileKind::File);
        assert!(!file.is_directory());

        let exe = NodeKind::Executable;
        assert_eq!(exe.file_kind(), FileKind::Executable);
        assert!(!exe.is_directory());

        let dir = NodeKind::Directory {
            children: IndexMap::new(),
        };
        assert_eq!(dir.file_kind(), FileKind::Directory);
        assert!(dir.is_directory());
    }

    #[test]
    fn test_node_ids_compare_by_index() {
        assert_eq!(NodeId(3), NodeId(3));
        assert_ne!(NodeId(3), NodeId(4));
    }
}
