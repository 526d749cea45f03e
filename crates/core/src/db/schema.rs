//! Persisted key layout
//!
//! The whole persisted state is a single flat key-value record:
//!
//! ```json
//! {
//!   "prompts": [ { "id": "...", "title": "...", "content": "...", "isPinned": false, "lastUsed": 0 } ],
//!   "extensionVersion": "0.1.0"
//! }
//! ```

/// Sequence of prompts, in insertion order
pub const PROMPTS_KEY: &str = "prompts";

/// Version marker of the build that last seeded the store
pub const VERSION_KEY: &str = "extensionVersion";
