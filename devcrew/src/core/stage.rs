//! Stage and role identifiers plus the run status state machine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of the fixed pipeline order.
///
/// Stages form a total order: requirements → design → code → test_plan →
/// presentation. Each stage is owned by exactly one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Requirements analysis, owned by the project manager.
    Requirements,
    /// UI/UX design specification, owned by the designer.
    Design,
    /// Implementation, owned by the developer.
    Code,
    /// Test plan, owned by the tester.
    TestPlan,
    /// Final product presentation, owned by the presenter.
    Presentation,
}

impl Stage {
    /// All stages in pipeline order.
    pub const ORDER: [Self; 5] = [
        Self::Requirements,
        Self::Design,
        Self::Code,
        Self::TestPlan,
        Self::Presentation,
    ];

    /// Returns the stage that follows this one, or `None` for the last stage.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Requirements => Some(Self::Design),
            Self::Design => Some(Self::Code),
            Self::Code => Some(Self::TestPlan),
            Self::TestPlan => Some(Self::Presentation),
            Self::Presentation => None,
        }
    }

    /// Returns the role that owns this stage.
    #[must_use]
    pub fn owner(self) -> Role {
        match self {
            Self::Requirements => Role::ProjectManager,
            Self::Design => Role::Designer,
            Self::Code => Role::Developer,
            Self::TestPlan => Role::Tester,
            Self::Presentation => Role::Presenter,
        }
    }

    /// Returns the zero-based position of this stage in the pipeline order.
    #[must_use]
    pub fn position(self) -> usize {
        match self {
            Self::Requirements => 0,
            Self::Design => 1,
            Self::Code => 2,
            Self::TestPlan => 3,
            Self::Presentation => 4,
        }
    }

    /// Human-readable name for progress display.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Requirements => "Requirements",
            Self::Design => "Design",
            Self::Code => "Development",
            Self::TestPlan => "Testing",
            Self::Presentation => "Presentation",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Requirements => write!(f, "requirements"),
            Self::Design => write!(f, "design"),
            Self::Code => write!(f, "code"),
            Self::TestPlan => write!(f, "test_plan"),
            Self::Presentation => write!(f, "presentation"),
        }
    }
}

/// One of the five specialized roles in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Analyzes requirements and coordinates tasks.
    ProjectManager,
    /// Creates UI/UX designs and wireframes.
    Designer,
    /// Writes code and implements features.
    Developer,
    /// Tests functionality and identifies bugs.
    Tester,
    /// Prepares presentations of the final product.
    Presenter,
}

impl Role {
    /// Human-readable role name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::ProjectManager => "Project Manager",
            Self::Designer => "Designer",
            Self::Developer => "Developer",
            Self::Tester => "Tester",
            Self::Presenter => "Presenter",
        }
    }

    /// One-line description of the role's responsibility.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::ProjectManager => "Analyzes requirements and coordinates tasks.",
            Self::Designer => "Creates UI/UX designs and wireframes.",
            Self::Developer => "Writes code and implements features.",
            Self::Tester => "Tests functionality and identifies bugs.",
            Self::Presenter => "Prepares presentations of the final product.",
        }
    }

    /// Returns the stage this role owns.
    #[must_use]
    pub fn stage(self) -> Stage {
        match self {
            Self::ProjectManager => Stage::Requirements,
            Self::Designer => Stage::Design,
            Self::Developer => Stage::Code,
            Self::Tester => Stage::TestPlan,
            Self::Presenter => Stage::Presentation,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProjectManager => write!(f, "project_manager"),
            Self::Designer => write!(f, "designer"),
            Self::Developer => write!(f, "developer"),
            Self::Tester => write!(f, "tester"),
            Self::Presenter => write!(f, "presenter"),
        }
    }
}

/// Process-wide status of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// The run has not begun; no stage has executed.
    #[default]
    NotStarted,
    /// A stage is executing or about to execute.
    Running,
    /// All five stages completed successfully.
    Completed,
    /// The run halted before completing every stage.
    Failed,
}

impl RunStatus {
    /// Returns true if no further transitions can occur.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not_started"),
            Self::Running => write!(f, "running"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order_is_total() {
        let mut prev: Option<Stage> = None;
        for stage in Stage::ORDER {
            if let Some(p) = prev {
                assert_eq!(p.next(), Some(stage));
                assert!(p < stage);
            }
            prev = Some(stage);
        }
        assert_eq!(Stage::Presentation.next(), None);
    }

    #[test]
    fn test_stage_positions() {
        for (i, stage) in Stage::ORDER.iter().enumerate() {
            assert_eq!(stage.position(), i);
        }
    }

    #[test]
    fn test_stage_owner_round_trip() {
        for stage in Stage::ORDER {
            assert_eq!(stage.owner().stage(), stage);
        }
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::TestPlan.to_string(), "test_plan");
        assert_eq!(Stage::Requirements.to_string(), "requirements");
    }

    #[test]
    fn test_stage_serde_snake_case() {
        let json = serde_json::to_string(&Stage::TestPlan).unwrap();
        assert_eq!(json, r#""test_plan""#);
        let back: Stage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Stage::TestPlan);
    }

    #[test]
    fn test_role_display_name() {
        assert_eq!(Role::ProjectManager.display_name(), "Project Manager");
        assert_eq!(Role::ProjectManager.to_string(), "project_manager");
    }

    #[test]
    fn test_run_status_terminal() {
        assert!(RunStatus::Completed.is_terminal());
        assert!(RunStatus::Failed.is_terminal());
        assert!(!RunStatus::Running.is_terminal());
        assert!(!RunStatus::NotStarted.is_terminal());
    }

    #[test]
    fn test_run_status_default() {
        assert_eq!(RunStatus::default(), RunStatus::NotStarted);
    }
}
