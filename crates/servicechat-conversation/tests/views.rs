use jiff::Timestamp;
use servicechat_catalog::locations::{Coordinates, LocationKind};
use servicechat_conversation::ConversationError;
use servicechat_conversation::views::form::{FormAssistance, FormStatus};
use servicechat_conversation::views::history::{response_for_message, search_messages};
use servicechat_conversation::views::locations::{LocationFinder, maps_url, nearby, parse_coordinates};
use servicechat_conversation::views::roadmap::{Roadmap, format_minutes};
use servicechat_core::models::message::ConversationMessage;
use servicechat_core::models::response::UserResponse;

fn now() -> Timestamp {
    Timestamp::from_second(1_700_000_000).unwrap()
}

fn response(index: usize, question: &str, answer: &str) -> UserResponse {
    UserResponse {
        question_index: index,
        question: question.to_string(),
        answer: answer.to_string(),
    }
}

// ── Roadmap ──────────────────────────────────────────────────────────────────

#[test]
fn roadmap_progress_and_time() {
    let mut roadmap = Roadmap::for_scenario(Some("new-arrival"));
    assert_eq!(roadmap.len(), 4);
    assert_eq!(roadmap.progress_percent(), 0);
    assert_eq!(roadmap.total_minutes(), 150);
    assert_eq!(format_minutes(roadmap.total_minutes()), "2h 30m");

    assert!(roadmap.toggle("tfn").unwrap());
    assert_eq!(roadmap.completed_count(), 1);
    assert_eq!(roadmap.progress_percent(), 25);
    assert!(!roadmap.toggle("tfn").unwrap());
    assert_eq!(roadmap.progress_percent(), 0);
}

#[test]
fn roadmap_rounds_progress() {
    let mut roadmap = Roadmap::for_scenario(Some("storm-damage"));
    roadmap.toggle("insurance-claim").unwrap();
    assert_eq!(roadmap.progress_percent(), 33);
    roadmap.toggle("emergency-assistance").unwrap();
    assert_eq!(roadmap.progress_percent(), 67);
    roadmap.toggle("temporary-accommodation").unwrap();
    assert!(roadmap.is_complete());
    assert_eq!(roadmap.progress_percent(), 100);
}

#[test]
fn roadmap_reports_unfinished_dependencies() {
    let mut roadmap = Roadmap::for_scenario(Some("new-arrival"));
    assert_eq!(roadmap.blocked_by("bank-account").unwrap(), ["tfn"]);
    roadmap.toggle("tfn").unwrap();
    assert!(roadmap.blocked_by("bank-account").unwrap().is_empty());
    assert!(matches!(roadmap.blocked_by("nope"), Err(ConversationError::UnknownStep(_))));
}

#[test]
fn custom_conversations_have_no_roadmap() {
    let mut roadmap = Roadmap::for_scenario(None);
    assert!(roadmap.is_empty());
    assert_eq!(roadmap.progress_percent(), 0);
    assert!(!roadmap.is_complete());
    assert!(roadmap.toggle("tfn").is_err());
}

#[test]
fn minutes_format() {
    assert_eq!(format_minutes(45), "45m");
    assert_eq!(format_minutes(60), "1h 0m");
    assert_eq!(format_minutes(80), "1h 20m");
}

// ── Form assistance ──────────────────────────────────────────────────────────

#[test]
fn form_prefills_from_matching_answers() {
    let roadmap = Roadmap::for_scenario(Some("new-arrival"));
    let responses = vec![
        response(0, "what type of visa do you have?", "Student Visa (500)"),
        response(1, "Which state/territory are you living in?", "NSW"),
    ];
    let form = FormAssistance::open(roadmap.step("tfn").unwrap(), &responses).unwrap();

    assert_eq!(form.step_id, "tfn");
    assert_eq!(form.prefilled_count(), 1);
    assert_eq!(form.value("visaType"), Some("Student Visa (500)"));
    assert_eq!(form.value("firstName"), None);
    assert_eq!(form.status(), &FormStatus::Draft);
}

#[test]
fn form_is_only_for_steps_that_need_one() {
    let roadmap = Roadmap::for_scenario(Some("new-arrival"));
    let err = FormAssistance::open(roadmap.step("medicare").unwrap(), &[]).unwrap_err();
    assert!(matches!(err, ConversationError::NoForm(id) if id == "medicare"));
}

#[test]
fn form_without_template_has_no_fields() {
    let roadmap = Roadmap::for_scenario(Some("business-registration"));
    let mut form = FormAssistance::open(roadmap.step("abn").unwrap(), &[]).unwrap();
    assert!(form.fields().is_empty());
    assert_eq!(form.submit().unwrap(), &FormStatus::Approved);
}

#[test]
fn form_declines_then_approves_after_fixing() {
    let roadmap = Roadmap::for_scenario(Some("new-arrival"));
    let mut form = FormAssistance::open(roadmap.step("tfn").unwrap(), &[]).unwrap();
    form.set("firstName", "  Ada ").unwrap();
    assert_eq!(form.value("firstName"), Some("Ada"));

    let status = form.submit().unwrap().clone();
    assert_eq!(
        status,
        FormStatus::Declined {
            reason: "Missing required fields: Last Name, Date of Birth, Visa Type, Passport Number, Country of Birth"
                .to_string()
        }
    );
    assert!(matches!(form.set("lastName", "Lovelace"), Err(ConversationError::AlreadySubmitted)));

    form.fix_issues();
    assert_eq!(form.value("firstName"), Some("Ada"));
    for (field, value) in [
        ("lastName", "Lovelace"),
        ("dateOfBirth", "1990-12-10"),
        ("visaType", "Other"),
        ("passportNumber", "N1234567"),
        ("countryOfBirth", "United Kingdom"),
    ] {
        form.set(field, value).unwrap();
    }
    assert_eq!(form.submit().unwrap(), &FormStatus::Approved);
}

#[test]
fn form_rejects_unknown_fields_and_options() {
    let roadmap = Roadmap::for_scenario(Some("new-arrival"));
    let mut form = FormAssistance::open(roadmap.step("tfn").unwrap(), &[]).unwrap();
    assert!(matches!(form.set("shoeSize", "9"), Err(ConversationError::UnknownField(_))));
    assert!(matches!(
        form.set("visaType", "Tourist"),
        Err(ConversationError::InvalidOption { .. })
    ));
    form.set("title", "Dr").unwrap();
    form.set("title", "").unwrap();
    assert_eq!(form.value("title"), None);
}

// ── Locations ────────────────────────────────────────────────────────────────

#[test]
fn nearby_sorts_by_distance_from_origin() {
    let parramatta = Coordinates { lat: -33.815, lng: 151.0 };
    let entries = nearby(LocationKind::ServiceNswCentre, Some(parramatta));
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].location.suburb, "Parramatta");
    let distances: Vec<f64> = entries.iter().map(|e| e.distance_km.unwrap()).collect();
    assert!(distances.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn nearby_without_origin_keeps_directory_order() {
    let entries = nearby(LocationKind::ServiceNswCentre, None);
    assert_eq!(entries[0].location.name, "Service NSW Sydney CBD");
    assert!(entries.iter().all(|e| e.distance_km.is_none()));
    assert!(nearby(LocationKind::LocalCouncilOrRedCross, None).is_empty());
}

#[test]
fn location_search_is_case_insensitive() {
    let finder = LocationFinder::new(LocationKind::ServiceNswCentre, None);
    let hits = finder.search("BONDI");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].location.suburb, "Bondi Junction");
    assert_eq!(finder.search("  ").len(), 3);
    assert!(finder.search("Newcastle").is_empty());
}

#[test]
fn maps_link_encodes_the_office() {
    let entries = nearby(LocationKind::ServiceNswCentre, None);
    let url = maps_url(&entries[0].location).unwrap();
    assert_eq!(url.host_str(), Some("www.google.com"));
    assert_eq!(url.path(), "/maps/search/");
    let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(query[0], ("api".to_string(), "1".to_string()));
    assert!(query[1].1.starts_with("Service NSW Sydney CBD, "));
    assert!(query[1].1.ends_with(", Sydney"));
}

#[test]
fn coordinates_parse_from_text() {
    let c = parse_coordinates(" -33.87, 151.21 ").unwrap();
    assert_eq!(c.lat, -33.87);
    assert_eq!(c.lng, 151.21);
    assert!(parse_coordinates("-33.87").is_none());
    assert!(parse_coordinates("north,south").is_none());
    assert!(parse_coordinates("95,10").is_none());
}

// ── History ──────────────────────────────────────────────────────────────────

#[test]
fn history_search_skips_placeholders() {
    let messages = vec![
        ConversationMessage::bot("welcome", "What type of visa do you have?", now()),
        ConversationMessage::user("user-1", "A student visa", now()),
        ConversationMessage::placeholder("bot-thinking-1", now()),
    ];
    let hits = search_messages(&messages, "VISA");
    assert_eq!(hits.len(), 2);
    assert_eq!(search_messages(&messages, "").len(), 2);
}

#[test]
fn history_links_bot_messages_to_answers() {
    let messages = vec![
        ConversationMessage::bot("welcome", "What type of visa do you have?", now()),
        ConversationMessage::user("user-1", "Student", now()),
        ConversationMessage::bot("bot-2", "Where do you live?", now()),
    ];
    let responses = vec![response(0, "What type of visa do you have?", "Student")];

    let (index, found) = response_for_message(&messages, &responses, "welcome").unwrap();
    assert_eq!(index, 0);
    assert_eq!(found.answer, "Student");
    assert!(response_for_message(&messages, &responses, "bot-2").is_none());
    assert!(response_for_message(&messages, &responses, "missing").is_none());
}
