use super::types::SelectionSummary;
use crate::core::types::TicketPriority;

/// Bullet-point justification rendered without the inference collaborator.
pub fn render_justification(summary: &SelectionSummary, priority: TicketPriority) -> String {
    let mut points = vec![format!("Assigned to handle this {priority} priority ticket")];

    points.push(format!(
        "{} ({}) selected for this ticket",
        summary.technician_name,
        summary.skill_level.describe()
    ));
    points.push(capitalize(summary.basis()));

    if summary.matched_skills.is_empty() {
        points.push("No recorded skills match the ticket's requirements directly".to_string());
    } else {
        points.push(format!(
            "Brings relevant skills in {}",
            summary.matched_skills.join(", ")
        ));
    }

    if !summary.missing_skills.is_empty() {
        points.push(format!(
            "May need support with {}",
            summary.missing_skills.join(", ")
        ));
    }

    points.push(format!(
        "Is {} with a {}",
        summary.availability.describe(),
        summary.workload_band
    ));

    points
        .into_iter()
        .map(|p| format!("• {p}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
