//! Plain-text rendering of conversation state for the terminal.

use jiff::civil::Weekday;
use servicechat_catalog::forms::FieldKind;
use servicechat_catalog::roadmap::StepKind;
use servicechat_conversation::birth_registration::{BirthFieldKind, BirthRegistration};
use servicechat_conversation::views::form::{FormAssistance, FormStatus};
use servicechat_conversation::views::history::{response_for_message, search_messages};
use servicechat_conversation::views::locations::{NearbyLocation, maps_url};
use servicechat_conversation::views::roadmap::{Roadmap, format_minutes};
use servicechat_core::models::message::{ConversationMessage, MessageRole};
use servicechat_core::models::response::UserResponse;
use servicechat_core::models::scenario::Scenario;

pub fn message(m: &ConversationMessage) -> String {
    let who = match m.role {
        MessageRole::Bot => "assistant",
        MessageRole::User => "you",
    };
    let mut lines = m.content.lines();
    let mut out = format!("{who}> {}", lines.next().unwrap_or_default());
    for line in lines {
        out.push_str(&format!("\n{:width$}{line}", "", width = who.len() + 2));
    }
    out
}

pub fn scenarios(list: &[Scenario]) -> String {
    let mut out = String::from("Scenarios:\n");
    for s in list {
        out.push_str(&format!("  {:<22} {} ({}, {})\n", s.id, s.title, s.category.label(), s.estimated_time));
    }
    out.push_str("  custom                 Ask about anything else");
    out
}

pub fn roadmap(roadmap: &Roadmap) -> String {
    if roadmap.is_empty() {
        return "No roadmap for this conversation.".to_string();
    }
    let mut out = format!(
        "Roadmap: {}/{} done ({}%), about {} in total\n",
        roadmap.completed_count(),
        roadmap.len(),
        roadmap.progress_percent(),
        format_minutes(roadmap.total_minutes()),
    );
    for item in roadmap.items() {
        let step = &item.step;
        let mark = if item.completed { "x" } else { " " };
        let kind = match step.kind {
            StepKind::Online => "online",
            StepKind::Offline => "in person",
        };
        out.push_str(&format!(
            "[{mark}] {} - {} ({kind}, {}, {} priority)\n",
            step.id,
            step.title,
            step.estimated_time,
            step.priority.label()
        ));
        if let Ok(blocked) = roadmap.blocked_by(&step.id)
            && !blocked.is_empty()
            && !item.completed
        {
            out.push_str(&format!("    after: {}\n", blocked.join(", ")));
        }
        if step.form_required {
            out.push_str(&format!("    form help: /form {}\n", step.id));
        }
        if let Some(kind) = step.location {
            out.push_str(&format!("    where: {} (/locations {})\n", kind.label(), step.id));
        }
    }
    if roadmap.is_complete() {
        out.push_str("All steps complete.");
    }
    out.trim_end().to_string()
}

/// Transcript filtered by `query`, with the answer recorded after each bot
/// message numbered for `/edit`.
pub fn history(messages: &[ConversationMessage], responses: &[UserResponse], query: Option<&str>) -> String {
    let hits = search_messages(messages, query.unwrap_or_default());
    if hits.is_empty() {
        return "No matching messages.".to_string();
    }
    let mut out = String::new();
    for m in hits {
        out.push_str(&message(m));
        out.push('\n');
        if m.role == MessageRole::Bot
            && let Some((index, response)) = response_for_message(messages, responses, &m.id)
        {
            out.push_str(&format!("    [{}] your answer: {}\n", index + 1, response.answer));
        }
    }
    out.push_str(&format!("{} responses, {} messages", responses.len(), messages.len()));
    out
}

pub fn form(form: &FormAssistance) -> String {
    let mut out = format!("Form: {} ({} pre-filled)\n", form.step_title, form.prefilled_count());
    if form.fields().is_empty() {
        out.push_str("This step has no form template; follow the roadmap instructions.\n");
    }
    for f in form.fields() {
        let field = &f.field;
        let required = if field.required { "*" } else { "" };
        let value = form.value(&field.id).unwrap_or("");
        out.push_str(&format!("  {}{required} {}: {value}\n", field.id, field.label));
        if let FieldKind::Select { options } = &field.kind {
            out.push_str(&format!("      options: {}\n", options.join(" | ")));
        }
        out.push_str(&format!("      {}\n", field.guidance));
    }
    out.push_str(&status(form.status()));
    out
}

fn status(status: &FormStatus) -> String {
    match status {
        FormStatus::Draft => "Status: draft (/submit when ready)".to_string(),
        FormStatus::Approved => "Status: approved".to_string(),
        FormStatus::Declined { reason } => format!("Status: declined - {reason} (/fix to edit)"),
    }
}

pub fn locations(entries: &[&NearbyLocation], today: Weekday) -> String {
    if entries.is_empty() {
        return "No offices listed for this step.".to_string();
    }
    let mut out = String::new();
    for entry in entries {
        let l = &entry.location;
        let distance = entry
            .distance_km
            .map(|d| format!(" - {d:.1} km"))
            .unwrap_or_default();
        out.push_str(&format!("{}{distance}\n", l.name));
        out.push_str(&format!("    {}, {} {}\n", l.address, l.suburb, l.postcode));
        out.push_str(&format!("    {} | today: {} | wait: {}\n", l.phone, l.opening_hours.on(today), l.wait_time));
        out.push_str(&format!("    services: {}\n", l.services.join(", ")));
        if let Ok(url) = maps_url(l) {
            out.push_str(&format!("    map: {url}\n"));
        }
    }
    out.trim_end().to_string()
}

pub fn birth(form: &BirthRegistration) -> String {
    let mut out = String::from("Birth registration\n");
    for field in form.visible_fields() {
        let required = if field.required { "*" } else { "" };
        let value = form.value(field.id);
        out.push_str(&format!("  {}{required} {}: {value}\n", field.id, field.label));
        if let BirthFieldKind::Choice(options) = field.kind {
            out.push_str(&format!("      options: {}\n", options.join(" | ")));
        }
    }
    for notice in form.info_notices() {
        out.push_str(&format!("\n{notice}\n"));
    }
    if !form.panel().is_empty() {
        out.push_str("\nQuestions:\n");
        for m in form.panel() {
            let who = if m.role == MessageRole::User { "you" } else { "assistant" };
            out.push_str(&format!("  {who}> {}\n", m.content));
        }
    }
    if form.is_awaiting_answer() {
        out.push_str("  (waiting for an answer)\n");
    }
    out.push_str(&status(form.status()));
    out
}
