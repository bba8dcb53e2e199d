//! Artifact types produced by pipeline stages.

use crate::core::stage::{Role, Stage};
use crate::utils::iso_timestamp;
use serde::{Deserialize, Serialize};

/// A code module extracted from the developer stage's output.
///
/// The developer's response is scanned for fenced code blocks; each block
/// becomes one module, named `module_1`, `module_2`, ... in order of
/// appearance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeModule {
    /// Module name, `module_N`.
    pub name: String,
    /// Language tag from the fence, or "text" when absent.
    pub language: String,
    /// The code itself, fence markers stripped.
    pub code: String,
}

impl CodeModule {
    /// Returns the file name this module would export as, using the
    /// language to pick an extension.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, extension_for(&self.language))
    }
}

/// Maps a fence language tag to a file extension.
fn extension_for(language: &str) -> &str {
    match language {
        "python" | "py" => "py",
        "rust" | "rs" => "rs",
        "javascript" | "js" => "js",
        "typescript" | "ts" => "ts",
        "html" => "html",
        "css" => "css",
        "json" => "json",
        _ => "txt",
    }
}

/// The structured output of one completed stage, stored write-once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    /// The stage that produced this artifact.
    pub stage: Stage,
    /// The role that authored it.
    pub author: Role,
    /// The artifact body: the validated model output for the stage.
    pub content: String,
    /// Code modules, populated only for the code stage.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub code_modules: Vec<CodeModule>,
    /// When the artifact was created (ISO 8601).
    pub created_at: String,
}

impl Artifact {
    /// Creates a new artifact for a stage, authored by the stage's owner.
    #[must_use]
    pub fn new(stage: Stage, content: impl Into<String>) -> Self {
        Self {
            stage,
            author: stage.owner(),
            content: content.into(),
            code_modules: Vec::new(),
            created_at: iso_timestamp(),
        }
    }

    /// Attaches extracted code modules.
    #[must_use]
    pub fn with_code_modules(mut self, modules: Vec<CodeModule>) -> Self {
        self.code_modules = modules;
        self
    }
}
