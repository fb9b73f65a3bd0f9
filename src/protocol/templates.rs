//! Fill-in templates for agents writing protocol messages by hand

pub const AGENT_REQUEST_TEMPLATE: &str = "=== AGENT REQUEST ===
FROM: [Your Agent Name]
TO: [Target Agent Name]
PRIORITY: [Critical/High/Medium/Low]
CONTEXT: [Brief description of situation]
REQUEST: [Specific help needed]
DELIVERABLE: [What you expect back]
TIMELINE: [When needed by]
=== END REQUEST ===";

pub const AGENT_RESPONSE_TEMPLATE: &str = "=== AGENT RESPONSE ===
FROM: [Target Agent Name]
TO: [Requesting Agent]
STATUS: [Accepted/Rejected/In Progress/Completed/Blocked]
ESTIMATED_COMPLETION: [Timeline]
QUESTIONS: [Any clarifying questions]
NOTES: [Additional context]
=== END RESPONSE ===";

pub const PROJECT_LEAD_DIRECTIVE_TEMPLATE: &str = "=== PROJECT LEAD DIRECTIVE ===
FROM: [Project Lead]
TO: [Agent Name(s)]
PRIORITY: [Critical/High/Medium/Low]
CONTEXT: [Brief situation description]
ACTION REQUIRED: [Specific deliverable needed]
DEADLINE: [When needed by]
DEPENDENCIES: [What's blocking this]
SUCCESS CRITERIA: [How to measure completion]
=== END DIRECTIVE ===";
