//! Write-once artifact storage keyed by stage.

use crate::core::{Artifact, Stage};
use crate::errors::ArtifactConflictError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Holds the growing set of stage artifacts.
///
/// Each stage can be written exactly once; there is no update or delete
/// operation, which is what keeps stage context construction deterministic
/// and the run auditable. Iteration follows pipeline order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtifactStore {
    // BTreeMap keyed by Stage: the Ord on Stage is the pipeline order.
    entries: BTreeMap<Stage, Artifact>,
}

impl ArtifactStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an artifact for its stage.
    ///
    /// # Errors
    ///
    /// Returns `ArtifactConflictError` if the stage already has an artifact.
    /// The existing entry is left untouched.
    pub fn put(&mut self, artifact: Artifact) -> Result<(), ArtifactConflictError> {
        let stage = artifact.stage;
        if self.entries.contains_key(&stage) {
            return Err(ArtifactConflictError::new(stage));
        }
        self.entries.insert(stage, artifact);
        Ok(())
    }

    /// Returns the artifact for a stage, if that stage has completed.
    #[must_use]
    pub fn get(&self, stage: Stage) -> Option<&Artifact> {
        self.entries.get(&stage)
    }

    /// Returns true if the stage has a stored artifact.
    #[must_use]
    pub fn contains(&self, stage: Stage) -> bool {
        self.entries.contains_key(&stage)
    }

    /// Returns all artifacts in pipeline order.
    #[must_use]
    pub fn in_order(&self) -> Vec<&Artifact> {
        self.entries.values().collect()
    }

    /// Returns the number of stored artifacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no artifacts are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
