// UI state stores
// One shared instance per entity collection, wired by AppContext.

pub mod debug;
pub mod global_mcps;
pub mod mcps;
pub mod notifications;
pub mod projects;
pub mod whats_new;

pub use debug::{DebugState, DebugStore};
pub use global_mcps::GlobalMcpStore;
pub use mcps::McpLibraryStore;
pub use notifications::{Notification, NotificationCategory, NotificationCenter};
pub use projects::ProjectStore;
pub use whats_new::{WhatsNewState, WhatsNewStore};
