//! Virtual File System
//!
//! A single-cursor tree of files, executables and directories, built once
//! from a seed document and shared by every terminal of a desktop. Apart
//! from the cursor the tree is immutable today, but all access goes through
//! one lock so mutation commands can land without reworking callers.

use indexmap::IndexMap;
use thiserror::Error;
use tokio::sync::RwLock;

use super::node::{
    DirEntry, FileSystemNode, NodeId, NodeKind, DEFAULT_EXECUTABLE_SIZE, DIRECTORY_SIZE,
};
use super::seed::{Seed, SeedError, SeedNode, DIRECTORY_TYPE, EXECUTABLE_TYPE, FILE_TYPE};

/// File system errors. The `Display` strings are exactly the lines a
/// terminal renders for them, so callers print errors verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FsError {
    #[error("Path not found: {path}")]
    PathNotFound { path: String },

    #[error("terminal: cd: Permission denied")]
    PermissionDenied,

    #[error("Cannot {operation} a file")]
    NotADirectory { operation: &'static str },

    #[error("cat: Must specify a file")]
    MissingArgument,

    #[error("cat: {name}: No such file or directory")]
    NoSuchEntry { name: String },

    #[error("cat: {name}: Is a directory")]
    IsADirectory { name: String },

    #[error("cat: {name}: Is an executable")]
    IsExecutable { name: String },
}

/// In-memory virtual file system with one current-directory cursor.
///
/// The cursor is part of the shared instance on purpose: every session of
/// a desktop sees the same working directory, mirroring the single
/// terminal window the environment presents.
#[derive(Debug)]
pub struct FileSystem {
    state: RwLock<FsState>,
}

#[derive(Debug)]
struct FsState {
    nodes: Vec<FileSystemNode>,
    root: NodeId,
    cursor: NodeId,
}

impl FsState {
    fn node(&self, id: NodeId) -> &FileSystemNode {
        &self.nodes[id.0]
    }

    /// Walk `path` from the cursor. `.` is a no-op, `..` steps to the
    /// parent and keeps walking the remaining segments, anything else must
    /// name a child of a directory. Empty segments are dropped, so `a//b`
    /// and `a/b/` read the same as `a/b`.
    fn resolve(&self, path: &str) -> Result<NodeId, FsError> {
        let mut current = self.cursor;
        for part in path.split('/').filter(|p| !p.is_empty()) {
            if part == "." {
                continue;
            }
            if part == ".." {
                current = self
                    .node(current)
                    .parent
                    .ok_or(FsError::PermissionDenied)?;
                continue;
            }
            let next = match &self.node(current).kind {
                NodeKind::Directory { children } => children.get(part).copied(),
                _ => None,
            };
            current = next.ok_or_else(|| FsError::PathNotFound {
                path: path.to_string(),
            })?;
        }
        Ok(current)
    }

    fn entry(&self, id: NodeId) -> DirEntry {
        let node = self.node(id);
        DirEntry {
            name: node.name.clone(),
            kind: node.kind.file_kind(),
            size: node.size,
        }
    }
}

impl FileSystem {
    /// Build a tree from a seed document. The seed must declare a `/`
    /// directory at its root; children become nodes in authored order.
    pub fn from_seed(seed: &Seed) -> Result<Self, SeedError> {
        let root_entry = seed.get("/").ok_or(SeedError::MissingRoot)?;
        if root_entry.kind != DIRECTORY_TYPE {
            return Err(SeedError::RootNotDirectory);
        }

        let root = NodeId(0);
        let mut nodes = vec![FileSystemNode {
            name: "/".to_string(),
            kind: NodeKind::Directory {
                children: IndexMap::new(),
            },
            size: DIRECTORY_SIZE,
            parent: None,
        }];
        if let Some(children) = &root_entry.children {
            grow(&mut nodes, root, children)?;
        }

        Ok(Self {
            state: RwLock::new(FsState {
                nodes,
                root,
                cursor: root,
            }),
        })
    }

    /// Resolve `path` relative to the cursor without moving it. There is
    /// no absolute-path syntax; callers special-case the literal `/`.
    pub async fn resolve(&self, path: &str) -> Result<NodeId, FsError> {
        self.state.read().await.resolve(path)
    }

    /// Move the cursor. `/` jumps straight to the root; anything else
    /// resolves relative to the cursor and must land on a directory. The
    /// cursor is untouched when the call fails.
    pub async fn change_dir(&self, path: &str) -> Result<(), FsError> {
        let mut state = self.state.write().await;
        let target = if path == "/" {
            state.root
        } else {
            state.resolve(path)?
        };
        if !state.node(target).kind.is_directory() {
            return Err(FsError::NotADirectory {
                operation: "change to",
            });
        }
        state.cursor = target;
        Ok(())
    }

    /// List a directory in insertion order. Sorting is the caller's
    /// concern; the tree only promises the order entries were seeded in.
    pub async fn list(&self, path: &str) -> Result<Vec<DirEntry>, FsError> {
        let state = self.state.read().await;
        let target = if path == "/" {
            state.root
        } else {
            state.resolve(path)?
        };
        match &state.node(target).kind {
            NodeKind::Directory { children } => {
                Ok(children.values().map(|id| state.entry(*id)).collect())
            }
            _ => Err(FsError::NotADirectory {
                operation: "list contents of",
            }),
        }
    }

    /// Read a file among the cursor's direct children. The name is a bare
    /// entry name, not a path. A file without backing data reads as empty.
    pub async fn read_file(&self, name: Option<&str>) -> Result<String, FsError> {
        let state = self.state.read().await;
        let name = name.ok_or(FsError::MissingArgument)?;
        let child = match &state.node(state.cursor).kind {
            NodeKind::Directory { children } => children.get(name).copied(),
            _ => None,
        };
        let id = child.ok_or_else(|| FsError::NoSuchEntry {
            name: name.to_string(),
        })?;
        match &state.node(id).kind {
            NodeKind::File { data } => Ok(data.clone()),
            NodeKind::Directory { .. } => Err(FsError::IsADirectory {
                name: name.to_string(),
            }),
            NodeKind::Executable => Err(FsError::IsExecutable {
                name: name.to_string(),
            }),
        }
    }

    /// Absolute path of the cursor: `/` at the root, `/a/b` below it.
    pub async fn working_dir(&self) -> String {
        let state = self.state.read().await;
        let mut segments = Vec::new();
        let mut current = state.cursor;
        while let Some(parent) = state.node(current).parent {
            segments.push(state.node(current).name.clone());
            current = parent;
        }
        segments.reverse();
        if segments.is_empty() {
            "/".to_string()
        } else {
            format!("/{}", segments.join("/"))
        }
    }

    /// Metadata for a previously resolved node.
    pub async fn stat(&self, id: NodeId) -> Option<DirEntry> {
        let state = self.state.read().await;
        if id.0 >= state.nodes.len() {
            return None;
        }
        Some(state.entry(id))
    }

    /// The current cursor handle.
    pub async fn cursor(&self) -> NodeId {
        self.state.read().await.cursor
    }
}

/// Turn one seed level into arena nodes under `parent`, preserving
/// authored order. `parent` must already exist as a directory node.
fn grow(
    nodes: &mut Vec<FileSystemNode>,
    parent: NodeId,
    entries: &IndexMap<String, SeedNode>,
) -> Result<(), SeedError> {
    let mut children = IndexMap::new();
    for (name, entry) in entries {
        let id = NodeId(nodes.len());
        match entry.kind {
            FILE_TYPE => {
                require_leaf(name, entry)?;
                let data = entry.data.clone().unwrap_or_default();
                let size = data.len() as u64;
                nodes.push(FileSystemNode {
                    name: name.clone(),
                    kind: NodeKind::File { data },
                    size,
                    parent: Some(parent),
                });
            }
            EXECUTABLE_TYPE => {
                require_leaf(name, entry)?;
                nodes.push(FileSystemNode {
                    name: name.clone(),
                    kind: NodeKind::Executable,
                    size: entry.size.unwrap_or(DEFAULT_EXECUTABLE_SIZE),
                    parent: Some(parent),
                });
            }
            DIRECTORY_TYPE => {
                nodes.push(FileSystemNode {
                    name: name.clone(),
                    kind: NodeKind::Directory {
                        children: IndexMap::new(),
                    },
                    size: DIRECTORY_SIZE,
                    parent: Some(parent),
                });
                if let Some(grandchildren) = &entry.children {
                    grow(nodes, id, grandchildren)?;
                }
            }
            tag => {
                return Err(SeedError::UnknownKind {
                    name: name.clone(),
                    tag,
                });
            }
        }
        children.insert(name.clone(), id);
    }
    nodes[parent.0].kind = NodeKind::Directory { children };
    Ok(())
}

fn require_leaf(name: &str, entry: &SeedNode) -> Result<(), SeedError> {
    if entry.children.is_some() {
        return Err(SeedError::UnexpectedChildren {
            name: name.to_string(),
        });
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::super::node::FileKind;
    use super::super::seed::portfolio_seed;
    use super::*;

    fn make_fs() -> FileSystem {
        FileSystem::from_seed(&portfolio_seed()).unwrap()
    }

    #[tokio::test]
    async fn test_resolve_dot_and_empty_segments_stay_put() {
        let fs = make_fs();
        let here = fs.cursor().await;
        assert_eq!(fs.resolve("").await.unwrap(), here);
        assert_eq!(fs.resolve(".").await.unwrap(), here);
        assert_eq!(fs.resolve("./").await.unwrap(), here);
        assert_eq!(fs.resolve(".//.").await.unwrap(), here);
    }

    #[tokio::test]
    async fn test_resolve_walks_down_and_back_up() {
        let fs = make_fs();
        let root = fs.cursor().await;
        let documents = fs.resolve("documents").await.unwrap();
        assert_ne!(documents, root);
        assert_eq!(fs.resolve("documents/..").await.unwrap(), root);
        assert_eq!(
            fs.resolve("documents/../documents").await.unwrap(),
            documents
        );
    }

    #[tokio::test]
    async fn test_resolve_keeps_walking_after_parent_step() {
        let fs = make_fs();
        fs.change_dir("documents").await.unwrap();
        let readme = fs.resolve("../readme.txt").await.unwrap();
        let stat = fs.stat(readme).await.unwrap();
        assert_eq!(stat.name, "readme.txt");
        assert_eq!(stat.kind, FileKind::File);
    }

    #[tokio::test]
    async fn test_parent_of_root_is_permission_denied() {
        let fs = make_fs();
        let err = fs.resolve("..").await.unwrap_err();
        assert_eq!(err, FsError::PermissionDenied);
        assert_eq!(err.to_string(), "terminal: cd: Permission denied");
        assert_eq!(fs.working_dir().await, "/");
    }

    #[tokio::test]
    async fn test_missing_child_reports_whole_path() {
        let fs = make_fs();
        let err = fs.resolve("documents/missing").await.unwrap_err();
        assert_eq!(err.to_string(), "Path not found: documents/missing");
    }

    #[tokio::test]
    async fn test_descending_through_a_file_is_path_not_found() {
        let fs = make_fs();
        let err = fs.resolve("readme.txt/inside").await.unwrap_err();
        assert_eq!(err.to_string(), "Path not found: readme.txt/inside");
    }

    #[tokio::test]
    async fn test_change_dir_moves_cursor() {
        let fs = make_fs();
        fs.change_dir("documents").await.unwrap();
        assert_eq!(fs.working_dir().await, "/documents");
        fs.change_dir("..").await.unwrap();
        assert_eq!(fs.working_dir().await, "/");
    }

    #[tokio::test]
    async fn test_change_dir_slash_jumps_to_root() {
        let fs = make_fs();
        fs.change_dir("documents").await.unwrap();
        fs.change_dir("/").await.unwrap();
        assert_eq!(fs.working_dir().await, "/");
    }

    #[tokio::test]
    async fn test_change_dir_rejects_non_directories() {
        let fs = make_fs();
        let err = fs.change_dir("readme.txt").await.unwrap_err();
        assert_eq!(err.to_string(), "Cannot change to a file");
        let err = fs.change_dir("media-player").await.unwrap_err();
        assert_eq!(err.to_string(), "Cannot change to a file");
    }

    #[tokio::test]
    async fn test_failed_change_dir_keeps_cursor() {
        let fs = make_fs();
        fs.change_dir("documents").await.unwrap();
        assert!(fs.change_dir("missing").await.is_err());
        assert!(fs.change_dir("aboutme").await.is_err());
        assert_eq!(fs.working_dir().await, "/documents");
    }

    #[tokio::test]
    async fn test_list_preserves_seed_order() {
        let fs = make_fs();
        let entries = fs.list(".").await.unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["documents", "media-player", "motd", "readme.txt"]);

        assert_eq!(entries[0].kind, FileKind::Directory);
        assert_eq!(entries[0].size, DIRECTORY_SIZE);
        assert_eq!(entries[1].kind, FileKind::Executable);
        assert_eq!(entries[1].size, DEFAULT_EXECUTABLE_SIZE);
        assert_eq!(entries[3].kind, FileKind::File);
    }

    #[tokio::test]
    async fn test_list_slash_from_anywhere() {
        let fs = make_fs();
        fs.change_dir("documents").await.unwrap();
        let entries = fs.list("/").await.unwrap();
        assert_eq!(entries.len(), 4);
    }

    #[tokio::test]
    async fn test_list_rejects_non_directories() {
        let fs = make_fs();
        let err = fs.list("motd").await.unwrap_err();
        assert_eq!(err.to_string(), "Cannot list contents of a file");
    }

    #[tokio::test]
    async fn test_read_file_returns_content() {
        let fs = make_fs();
        let text = fs.read_file(Some("readme.txt")).await.unwrap();
        assert!(text.starts_with("Thanks for stopping by!"));
    }

    #[tokio::test]
    async fn test_read_file_is_cursor_local() {
        let fs = make_fs();
        let err = fs.read_file(Some("documents/aboutme")).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "cat: documents/aboutme: No such file or directory"
        );

        fs.change_dir("documents").await.unwrap();
        let text = fs.read_file(Some("aboutme")).await.unwrap();
        assert!(text.starts_with("[ABOUT ME]"));
    }

    #[tokio::test]
    async fn test_read_file_error_taxonomy() {
        let fs = make_fs();
        assert_eq!(
            fs.read_file(None).await.unwrap_err().to_string(),
            "cat: Must specify a file"
        );
        assert_eq!(
            fs.read_file(Some("zzz")).await.unwrap_err().to_string(),
            "cat: zzz: No such file or directory"
        );
        assert_eq!(
            fs.read_file(Some("documents")).await.unwrap_err().to_string(),
            "cat: documents: Is a directory"
        );
        assert_eq!(
            fs.read_file(Some("media-player"))
                .await
                .unwrap_err()
                .to_string(),
            "cat: media-player: Is an executable"
        );
    }

    #[tokio::test]
    async fn test_file_without_data_reads_empty() {
        let seed: Seed = IndexMap::from([(
            "/".to_string(),
            SeedNode::directory(IndexMap::from([(
                "blank".to_string(),
                SeedNode {
                    kind: FILE_TYPE,
                    data: None,
                    size: None,
                    children: None,
                },
            )])),
        )]);
        let fs = FileSystem::from_seed(&seed).unwrap();
        assert_eq!(fs.read_file(Some("blank")).await.unwrap(), "");
        assert_eq!(fs.list(".").await.unwrap()[0].size, 0);
    }

    #[tokio::test]
    async fn test_parent_walks_invert_child_walks() {
        let fs = make_fs();
        let root = fs.cursor().await;
        let documents = fs.resolve("documents").await.unwrap();
        fs.change_dir("documents").await.unwrap();
        assert_eq!(fs.cursor().await, documents);
        assert_eq!(fs.resolve("..").await.unwrap(), root);
    }

    #[tokio::test]
    async fn test_stat_out_of_range_is_none() {
        let fs = make_fs();
        assert!(fs.stat(NodeId(999)).await.is_none());
    }

    #[test]
    fn test_seed_must_declare_root() {
        let seed: Seed = IndexMap::new();
        assert_eq!(
            FileSystem::from_seed(&seed).unwrap_err(),
            SeedError::MissingRoot
        );
    }

    #[test]
    fn test_seed_root_must_be_directory() {
        let seed: Seed =
            IndexMap::from([("/".to_string(), SeedNode::file("not a directory"))]);
        assert_eq!(
            FileSystem::from_seed(&seed).unwrap_err(),
            SeedError::RootNotDirectory
        );
    }

    #[test]
    fn test_seed_rejects_unknown_tags() {
        let seed: Seed = IndexMap::from([(
            "/".to_string(),
            SeedNode::directory(IndexMap::from([(
                "odd".to_string(),
                SeedNode {
                    kind: 7,
                    data: None,
                    size: None,
                    children: None,
                },
            )])),
        )]);
        assert_eq!(
            FileSystem::from_seed(&seed).unwrap_err(),
            SeedError::UnknownKind {
                name: "odd".to_string(),
                tag: 7
            }
        );
    }

    #[test]
    fn test_seed_rejects_children_on_leaves() {
        let mut file = SeedNode::file("text");
        file.children = Some(IndexMap::new());
        let seed: Seed = IndexMap::from([(
            "/".to_string(),
            SeedNode::directory(IndexMap::from([("odd".to_string(), file)])),
        )]);
        assert_eq!(
            FileSystem::from_seed(&seed).unwrap_err(),
            SeedError::UnexpectedChildren {
                name: "odd".to_string()
            }
        );
    }
}
