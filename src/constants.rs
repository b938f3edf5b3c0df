#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Demonstration answer key the form starts with.
pub const DEMO_ANSWER_KEY: &str = "Photosynthesis is the process used by plants, algae, and \
                                   certain bacteria to convert light energy into chemical \
                                   energy. This process involves taking in carbon dioxide (CO2) \
                                   and water (H2O) and using sunlight to convert them into \
                                   glucose (a sugar that serves as food) and oxygen (O2). The \
                                   green pigment in plants, called chlorophyll, is essential \
                                   for capturing the light energy. The overall balanced \
                                   chemical equation for photosynthesis is: 6CO2 + 6H2O + Light \
                                   Energy → C6H12O6 + 6O2.";

/// Demonstration student answer the form starts with.
pub const DEMO_STUDENT_ANSWER: &str = "Photosynthesis is how plants make food. They use \
                                       sunlight, water, and carbon dioxide from the air. They \
                                       produce sugar for energy and release oxygen for us to \
                                       breathe. This process is why plants are green.";

/// Title shown in the page header.
pub const APP_TITLE: &str = "Copy Checker";

/// Subtitle shown under the page header.
pub const APP_SUBTITLE: &str = "AI-Powered Answer Sheet Evaluator";

/// Footer line.
pub const APP_FOOTER: &str = "Powered by an AI evaluator. Designed for educational purposes.";

/// Label of the answer key field.
pub const ANSWER_KEY_LABEL: &str = "Answer Key / Rubric";

/// Placeholder of the answer key field.
pub const ANSWER_KEY_PLACEHOLDER: &str =
    "Enter the official answer key or marking criteria here...";

/// Label of the student answer field.
pub const STUDENT_ANSWER_LABEL: &str = "Student's Answer";

/// Placeholder of the student answer field.
pub const STUDENT_ANSWER_PLACEHOLDER: &str = "Enter the student's answer here...";

/// Submit label while idle.
pub const SUBMIT_LABEL: &str = "Evaluate Answer";

/// Submit label while an evaluation is outstanding.
pub const SUBMIT_LABEL_PENDING: &str = "Evaluating...";

/// Message shown when either field is empty at submit time.
pub const VALIDATION_MESSAGE: &str =
    "Please provide both the answer key and the student's answer.";

/// Message shown for any evaluator failure. The cause only goes to the logs.
pub const EVALUATION_FAILED_MESSAGE: &str = "An error occurred while evaluating the answer. \
                                             Please check the logs for details and try again.";

/// Message shown when a submission arrives while one is still outstanding.
pub const BUSY_MESSAGE: &str = "An evaluation is already in progress.";

/// Percentage at or above which a score is in the good tier.
pub const GOOD_TIER_PERCENT: f64 = 75.0;

/// Percentage at or above which a score is in the warning tier.
pub const WARNING_TIER_PERCENT: f64 = 40.0;

/// Radius of the score ring, in SVG user units.
pub const SCORE_RING_RADIUS: f64 = 52.0;

/// System prompt sent to the evaluator with every request.
pub const EVALUATOR_SYSTEM_PROMPT: &str = include_str!("prompts/system_message.md");
