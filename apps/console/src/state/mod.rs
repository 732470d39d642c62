//! # State Module
//!
//! Application state for Stockroom front ends.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Front End                                  │   │
//! │  │  state.dispatch(intent)            state.snapshot()             │   │
//! │  └──────────────────┬───────────────────────────▲──────────────────┘   │
//! │                     ▼                           │                       │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    InventoryState                               │   │
//! │  │                                                                 │   │
//! │  │  SyncEngine ─────► ProductStore, NotificationCenter             │   │
//! │  │  ViewState  ─────► FilterView, EditSession, DraftForm           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • ProductStore: RwLock, written only by SyncEngine::fetch_all         │
//! │  • NotificationCenter: Mutex around the two slots                      │
//! │  • ViewState: Mutex, never held across an .await                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod inventory;

pub use inventory::{InventoryIntent, InventorySnapshot, InventoryState};
