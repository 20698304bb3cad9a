//! Seed Documents
//!
//! A seed is the statically authored description a virtual file system is
//! built from: a map of `name -> { type, data?, size?, children? }` whose
//! root entry must be `/`. Seeds are plain serde documents (JSON on disk)
//! held in `IndexMap`s so authored order becomes listing order.

use chrono::Utc;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util;

/// Wire tag for readable file entries.
pub const FILE_TYPE: u8 = 0;
/// Wire tag for executable entries.
pub const EXECUTABLE_TYPE: u8 = 1;
/// Wire tag for directory entries.
pub const DIRECTORY_TYPE: u8 = 2;

/// Errors raised while turning a seed into a tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeedError {
    #[error("seed does not declare a root '/' directory")]
    MissingRoot,

    #[error("seed root '/' must be a directory")]
    RootNotDirectory,

    #[error("seed entry '{name}' has unknown type tag {tag}")]
    UnknownKind { name: String, tag: u8 },

    #[error("seed entry '{name}' is not a directory but declares children")]
    UnexpectedChildren { name: String },
}

/// One entry of a seed document.
///
/// `data` is only read for files, `size` only for executables (files get
/// the byte length of their data, directories a fixed size), and
/// `children` must only appear on directories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedNode {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<IndexMap<String, SeedNode>>,
}

impl SeedNode {
    /// A readable file with the given content.
    pub fn file(data: impl Into<String>) -> Self {
        SeedNode {
            kind: FILE_TYPE,
            data: Some(data.into()),
            size: None,
            children: None,
        }
    }

    /// A launchable executable reporting the given size.
    pub fn executable(size: u64) -> Self {
        SeedNode {
            kind: EXECUTABLE_TYPE,
            data: None,
            size: Some(size),
            children: None,
        }
    }

    /// A directory with the given children, listed in the given order.
    pub fn directory(children: IndexMap<String, SeedNode>) -> Self {
        SeedNode {
            kind: DIRECTORY_TYPE,
            data: None,
            size: None,
            children: Some(children),
        }
    }
}

/// A whole seed document, keyed by entry name with `/` at the root.
pub type Seed = IndexMap<String, SeedNode>;

// ============================================================================
// Default portfolio seed
// ============================================================================

const BANNER: &str = r" ____  _____ ____  _  _______ _____ ____  __  __
|  _ \| ____/ ___|| |/ /_   _| ____|  _ \|  \/  |
| | | |  _| \___ \| ' /  | | |  _| | |_) | |\/| |
| |_| | |___ ___) | . \  | | | |___|  _ <| |  | |
|____/|_____|____/|_|\_\ |_| |_____|_| \_\_|  |_|";

const README: &str = "Thanks for stopping by!

This little machine is a work in progress. The window you are typing
into is a real terminal with a real (if tiny) file system behind it,
so the usual suspects work: ls, cd, cat, and friends.

If anything looks broken, it probably is. Type 'help' to see what the
terminal can do, and check 'documents' for notes about the author.";

const ABOUT_ME: &str = "[ABOUT ME]

Hello! I'm a software engineer who likes building small worlds inside
computers. This desktop is one of them: a terminal, a file system and
a process table, all living happily inside a single page.

Away from a keyboard I ride bikes, roast coffee slightly too dark and
collect field recordings of trains.";

const JOB_HISTORY: &str = "[JOB HISTORY]

2021 - now   Senior Systems Engineer, Parallax Computing
             Storage plumbing, scheduler tuning, the occasional outage.

2017 - 2021  Backend Engineer, Meridian Labs
             Built ingestion pipelines and the tooling around them.

2014 - 2017  Junior Developer, Coastal Software Co.
             Shipped small tools, broke fewer things every year.";

/// The message of the day teletyped into a fresh terminal. Also seeded as
/// the `motd` file, so `cat motd` replays it.
pub fn motd() -> String {
    format!(
        "{}\n\nWelcome to deskterm (GNU/Virtual 1.0.0-web x86_64)\n\n\
         System information as of {}\n\n\
         System load:  0.0                Processes:             1337\n\
         Usage of /:   0.1% of 420TB      Users logged in:       1\n\
         Memory usage: 3%                 IPv4 address for eth0: 10.0.0.1\n\
         Swap usage:   0%\n\n\
         The 'documents' folder holds a few notes about the person who\n\
         built this place. Have a look around.\n\n\
         For a list of commands, type 'help'.",
        BANNER,
        util::long_date(Utc::now())
    )
}

/// The seed shipped with the crate: a small portfolio machine.
pub fn portfolio_seed() -> Seed {
    IndexMap::from([(
        "/".to_string(),
        SeedNode::directory(IndexMap::from([
            (
                "documents".to_string(),
                SeedNode::directory(IndexMap::from([
                    ("aboutme".to_string(), SeedNode::file(ABOUT_ME)),
                    ("jobhistory".to_string(), SeedNode::file(JOB_HISTORY)),
                ])),
            ),
            (
                "media-player".to_string(),
                SeedNode::executable(super::node::DEFAULT_EXECUTABLE_SIZE),
            ),
            ("motd".to_string(), SeedNode::file(motd())),
            ("readme.txt".to_string(), SeedNode::file(README)),
        ])),
    )])
}

// ============================================================================
// Tests
// ============================================================================
