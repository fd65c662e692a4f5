//! Prompt text for each inference task.
//!
//! Prompts describe the response shape the matching parser accepts. Nothing
//! here is trusted: every response goes through parsing and local validation.

use crate::core::types::{Skill, Technician, Ticket};
use crate::scoring::SelectionSummary;

fn tags_text(ticket: &Ticket) -> String {
    if ticket.tags.is_empty() {
        "None".to_string()
    } else {
        ticket.tags.join(", ")
    }
}

fn bullet_list<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    let lines: Vec<String> = items.into_iter().map(|s| format!("- {s}")).collect();
    if lines.is_empty() {
        "- None".to_string()
    } else {
        lines.join("\n")
    }
}

pub fn skill_extraction(ticket: &Ticket, catalog: &[String]) -> String {
    format!(
        r#"You are a service desk assistant that identifies the technical skills needed to resolve a support ticket.

Ticket
- Subject: {subject}
- Description: {description}
- Tags: {tags}

Available skills (choose from these whenever one fits):
{skills}

Instructions:
- Analyze the subject and description to identify which skills are needed.
- Use the exact names from the available skills list for existing skills.
- Only propose a new skill when nothing in the list covers the need, and give it a short description.
- If no new skills are needed, return an empty list for new_skills.
- Respond with a single JSON object and nothing else: no markdown, no explanation.

Output format:
{{
  "existing_skills": ["<existing skill name>"],
  "new_skills": [{{"name": "<new skill name>", "description": "<short description>"}}]
}}"#,
        subject = ticket.subject,
        description = ticket.description,
        tags = tags_text(ticket),
        skills = bullet_list(catalog.iter().map(String::as_str)),
    )
}

pub fn specialist_match(ticket: &Ticket, required: &[Skill], candidates: &[Technician]) -> String {
    let roster: Vec<String> = candidates
        .iter()
        .map(|t| {
            let skills: Vec<&str> = t.skills.iter().map(|s| s.skill_name.as_str()).collect();
            let skills = if skills.is_empty() {
                "no recorded skills".to_string()
            } else {
                skills.join(", ")
            };
            format!("- id {}: {} ({})", t.id, skills, t.skill_level.describe())
        })
        .collect();

    format!(
        r#"A critical support ticket needs a specialist. Identify which technicians specialise in the core issue described below.

Ticket
- Subject: {subject}
- Description: {description}
- Tags: {tags}

Required skills:
{required}

Technicians:
{roster}

Respond with a single JSON object and nothing else:
{{"specialist_ids": [<technician id>, ...]}}"#,
        subject = ticket.subject,
        description = ticket.description,
        tags = tags_text(ticket),
        required = bullet_list(required.iter().map(|s| s.name.as_str())),
        roster = if roster.is_empty() { "- None".to_string() } else { roster.join("\n") },
    )
}

pub fn justification(ticket: &Ticket, technician_id: i64, summary: &SelectionSummary) -> String {
    format!(
        r#"You write the justification shown to end users when a support ticket is assigned. The technician has already been chosen; explain the choice.

Ticket
- Subject: {subject}
- Description: {description}
- Priority: {priority}

Chosen technician
- Name: {name}
- Level: {level}
- Availability: {availability}
- Workload: {workload}
- Matching skills: {matched}
- Skills not held: {missing}
- Selection basis: {basis}

Strictly prohibited in the justification text:
- Skill IDs (for example "Skill ID 42"); use skill names only
- Technician or ticket IDs and internal reference numbers
- Rule numbers or rule names
- Percentages in parentheses after skill names (for example "Access Control (92%)")
- Numerical scores or calculations

Required format:
- One point per line, each starting with "• "
- Plain-English availability, skill level and workload descriptions
- Professional language focused on the business rationale

Respond with a single JSON object and nothing else:
{{"selected_technician_id": {id}, "justification": "• first point\n• second point"}}"#,
        subject = ticket.subject,
        description = ticket.description,
        priority = ticket.priority,
        name = summary.technician_name,
        level = summary.skill_level.describe(),
        availability = summary.availability.describe(),
        workload = summary.workload_band,
        matched = join_or(&summary.matched_skills, "none"),
        missing = join_or(&summary.missing_skills, "none"),
        basis = summary.basis(),
        id = technician_id,
    )
}

pub fn skill_performance(ticket: &Ticket, skill_names: &[String]) -> String {
    let work_logs = if ticket.work_logs.is_empty() {
        "- No work logs".to_string()
    } else {
        bullet_list(ticket.work_logs.iter().map(|w| w.description.as_str()))
    };

    format!(
        r#"Analyze this ticket resolution and rate the skill level the technician demonstrated.

Ticket subject: {subject}
Description: {description}
Work logs:
{work_logs}

For each required skill [{skills}], give a proficiency score from 0 to 100 and a brief justification of at most 50 words.

Respond with a single JSON object and nothing else:
{{"skills": {{"<skill name>": {{"score": <number>, "reasoning": "<justification>"}}}}}}"#,
        subject = ticket.subject,
        description = ticket.description,
        work_logs = work_logs,
        skills = skill_names.join(", "),
    )
}

pub fn sentiment(feedback: &str) -> String {
    format!(
        r#"Analyze the sentiment of this user feedback.

Score it from -100 to 100:
  -100: extremely negative
  -50: moderately negative
  0: neutral
  50: moderately positive
  100: extremely positive

Give a brief explanation of at most 50 words.

User feedback: {feedback}

Respond with a single JSON object and nothing else:
{{"score": <number>, "reasoning": "<explanation>"}}"#
    )
}

fn join_or(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        empty.to_string()
    } else {
        items.join(", ")
    }
}
