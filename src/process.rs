//! Process Registry
//!
//! Desktop-wide process bookkeeping. Every window registers here when it
//! is shown, and `ps`/`kill` read the records back. The registry also owns
//! the window stacking counter, which is not process identity but shares
//! the same desktop-wide state object.

use tokio::sync::Mutex;

/// First pid is allocated above this seed, so a fresh desktop hands out 11.
const PID_SEED: u32 = 10;

/// Stacking order starts here; `raise` bumps past it.
const Z_INDEX_SEED: u32 = 10;

/// One registered window process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    /// Window id, e.g. `terminal` or `media-player`.
    pub id: String,
    pub pid: u32,
    /// Command name shown by `ps`.
    pub name: String,
}

/// Shared process table. All methods take `&self`; one lock keeps pid
/// allocation, the record list and the z-counter mutually consistent.
pub struct ProcessRegistry {
    state: Mutex<RegistryState>,
}

#[derive(Debug)]
struct RegistryState {
    last_pid: u32,
    z_index: u32,
    processes: Vec<ProcessRecord>,
}

impl ProcessRegistry {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RegistryState {
                last_pid: PID_SEED,
                z_index: Z_INDEX_SEED,
                processes: Vec::new(),
            }),
        }
    }

    /// Hand out the next pid. Pids are never reused within a run, even
    /// after the process that held one unregisters.
    pub async fn allocate_pid(&self) -> u32 {
        let mut state = self.state.lock().await;
        state.last_pid += 1;
        state.last_pid
    }

    /// Append a record. Registration order is preserved and is the order
    /// `ps` lists processes in.
    pub async fn register(&self, record: ProcessRecord) {
        self.state.lock().await.processes.push(record);
    }

    /// Remove every record holding `pid`; reports how many went away.
    pub async fn unregister(&self, pid: u32) -> usize {
        let mut state = self.state.lock().await;
        let before = state.processes.len();
        state.processes.retain(|p| p.pid != pid);
        before - state.processes.len()
    }

    /// All records holding `pid`. A `Vec` rather than an `Option`:
    /// duplicate registrations are tolerated and all of them are reported.
    pub async fn find(&self, pid: u32) -> Vec<ProcessRecord> {
        self.state
            .lock()
            .await
            .processes
            .iter()
            .filter(|p| p.pid == pid)
            .cloned()
            .collect()
    }

    /// All records registered under the window id.
    pub async fn find_by_id(&self, id: &str) -> Vec<ProcessRecord> {
        self.state
            .lock()
            .await
            .processes
            .iter()
            .filter(|p| p.id == id)
            .cloned()
            .collect()
    }

    /// Ordered snapshot of the whole table.
    pub async fn processes(&self) -> Vec<ProcessRecord> {
        self.state.lock().await.processes.clone()
    }

    /// Bump the stacking counter and return the new top value.
    pub async fn raise(&self) -> u32 {
        let mut state = self.state.lock().await;
        state.z_index += 1;
        state.z_index
    }

    /// Current top of the stacking counter.
    pub async fn z_index(&self) -> u32 {
        self.state.lock().await.z_index
    }
}

impl Default for ProcessRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
