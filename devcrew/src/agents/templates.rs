//! Per-role prompt templates.
//!
//! Each role has a fixed instruction template describing its responsibility
//! and the sections its response should include. The template plus the stage
//! context forms the prompt sent to the model gateway.

use crate::agents::StageContext;
use crate::core::{Role, Stage};

/// Builds the prompt for a role from its template and the stage context.
#[must_use]
pub fn prompt_for(role: Role, ctx: &StageContext) -> String {
    let requirements = &ctx.initial_text;
    let conversation = &ctx.transcript;

    match role {
        Role::ProjectManager => format!(
            "You are the Project Manager. Analyze the following requirements and provide a structured project plan:\n\
             \n\
             Requirements:\n{requirements}\n\
             \n\
             Current conversation:\n{conversation}\n\
             \n\
             Your response should include:\n\
             1. Project scope\n\
             2. Main features to implement\n\
             3. Technical requirements\n\
             4. Timeline and milestones\n\
             5. Task assignments for the team\n\
             6. Next steps\n"
        ),
        Role::Designer => {
            let project_plan = ctx.artifact(Stage::Requirements).unwrap_or_default();
            format!(
                "You are the UI/UX Designer. Create design specifications based on the following requirements and project plan:\n\
                 \n\
                 Requirements:\n{requirements}\n\
                 \n\
                 Project Plan:\n{project_plan}\n\
                 \n\
                 Current conversation:\n{conversation}\n\
                 \n\
                 Your response should include:\n\
                 1. Wireframes description (describe key screens)\n\
                 2. UI components needed\n\
                 3. User flow diagrams\n\
                 4. Design system suggestions (colors, typography, etc.)\n\
                 5. Responsive design considerations\n"
            )
        }
        Role::Developer => {
            let design_specs = ctx.artifact(Stage::Design).unwrap_or_default();
            format!(
                "You are the Developer. Write code based on the requirements and design specifications:\n\
                 \n\
                 Requirements:\n{requirements}\n\
                 \n\
                 Design Specifications:\n{design_specs}\n\
                 \n\
                 Current conversation:\n{conversation}\n\
                 \n\
                 Your response should include:\n\
                 1. Architecture overview\n\
                 2. Implementation approach\n\
                 3. Code structure\n\
                 4. Sample code for key components\n\
                 5. Dependencies and libraries needed\n\
                 6. Setup instructions\n"
            )
        }
        Role::Tester => {
            let implementation = ctx.artifact(Stage::Code).unwrap_or_default();
            format!(
                "You are the Tester. Create a test plan and test cases based on the requirements and implemented code:\n\
                 \n\
                 Requirements:\n{requirements}\n\
                 \n\
                 Implementation:\n{implementation}\n\
                 \n\
                 Current conversation:\n{conversation}\n\
                 \n\
                 Your response should include:\n\
                 1. Test plan overview\n\
                 2. Test scenarios\n\
                 3. Test cases with expected results\n\
                 4. Testing approach (manual/automated)\n\
                 5. Edge cases to consider\n\
                 6. Potential bugs to look for\n"
            )
        }
        Role::Presenter => {
            let design = ctx.artifact(Stage::Design).unwrap_or_default();
            let implementation = ctx.artifact(Stage::Code).unwrap_or_default();
            let test_results = ctx.artifact(Stage::TestPlan).unwrap_or_default();
            format!(
                "You are the Presenter. Create a presentation of the final product based on all the work done:\n\
                 \n\
                 Requirements:\n{requirements}\n\
                 \n\
                 Design:\n{design}\n\
                 \n\
                 Implementation:\n{implementation}\n\
                 \n\
                 Test Results:\n{test_results}\n\
                 \n\
                 Current conversation:\n{conversation}\n\
                 \n\
                 Your response should include:\n\
                 1. Introduction to the product\n\
                 2. Key features and functionality\n\
                 3. Technical highlights\n\
                 4. Implementation challenges and solutions\n\
                 5. Demo script\n\
                 6. Future enhancements\n"
            )
        }
    }
}

/// Section markers a stage's output is expected to carry.
///
/// Validation accepts output containing at least one marker for the stage
/// (case-insensitive). A bare numbered list also qualifies, since every
/// template asks for one.
#[must_use]
pub fn expected_markers(stage: Stage) -> &'static [&'static str] {
    match stage {
        Stage::Requirements => &["project scope", "features", "milestones", "next steps", "1."],
        Stage::Design => &["wireframe", "ui component", "user flow", "design system", "1."],
        Stage::Code => &["architecture", "implementation", "code", "```", "1."],
        Stage::TestPlan => &["test plan", "test scenario", "test case", "edge case", "1."],
        Stage::Presentation => &["introduction", "key features", "demo", "highlights", "1."],
    }
}
