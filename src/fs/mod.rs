//! File System Module
//!
//! Virtual file system for the desktop environment: seed documents, node
//! storage, and the single-cursor tree shared by every terminal session.

pub mod file_system;
pub mod node;
pub mod seed;

pub use file_system::{FileSystem, FsError};
pub use node::{DirEntry, FileKind, NodeId, DEFAULT_EXECUTABLE_SIZE, DIRECTORY_SIZE};
pub use seed::{
    motd, portfolio_seed, Seed, SeedError, SeedNode, DIRECTORY_TYPE, EXECUTABLE_TYPE, FILE_TYPE,
};
