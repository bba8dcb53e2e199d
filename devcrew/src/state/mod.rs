//! Project state: artifact bookkeeping and conversation history.

mod artifacts;
mod conversation;
mod project;

pub use artifacts::ArtifactStore;
pub use conversation::ConversationLog;
pub use project::ProjectState;
