use jiff::Timestamp;
use servicechat_catalog::get_scenario;
use servicechat_conversation::ConversationError;
use servicechat_conversation::controller::{TROUBLESHOOT_PROMPT, UPDATE_NOTICE};
use servicechat_conversation::guided::{CUSTOM_QUESTION, GuidedFlow};
use servicechat_core::models::message::MessageRole;

fn now() -> Timestamp {
    Timestamp::from_second(1_700_000_000).unwrap()
}

fn flow(id: &str) -> GuidedFlow {
    GuidedFlow::start(Some(get_scenario(id).unwrap().to_scenario()), None, now())
}

#[test]
fn scenario_flow_asks_questions_in_order() {
    let mut flow = flow("new-arrival");
    let ids: Vec<_> = flow.messages().iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["welcome", "q1"]);
    assert_eq!(flow.messages()[1].content, "What type of visa do you have?");
    assert_eq!(flow.progress(), Some((1, 4)));

    flow.answer("Student Visa (500)", now()).unwrap();
    assert_eq!(flow.messages().last().unwrap().id, "q2");
    assert_eq!(flow.progress(), Some((2, 4)));
    for answer in ["NSW", "No", "Yes"] {
        flow.answer(answer, now()).unwrap();
    }

    assert!(flow.is_complete());
    assert!(!flow.accepts_input());
    assert_eq!(flow.responses().len(), 4);
    assert_eq!(flow.responses()[0].question, "What type of visa do you have?");
    assert_eq!(flow.responses()[3].question_index, 3);
    assert!(flow.messages().last().unwrap().content.starts_with("Perfect!"));
    assert!(matches!(flow.answer("more", now()), Err(ConversationError::FlowComplete)));
}

#[test]
fn custom_flow_with_initial_message() {
    let mut flow = GuidedFlow::start(None, Some("How do I renew my licence?"), now());
    let ids: Vec<_> = flow.messages().iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["welcome", "initial-user", "initial-response", "followup-q1"]);
    assert_eq!(flow.messages()[1].role, MessageRole::User);
    assert!(flow.progress().is_none());

    flow.answer("It expired last month", now()).unwrap();
    assert!(flow.is_complete());
    assert_eq!(flow.responses()[0].question, CUSTOM_QUESTION);
}

#[test]
fn custom_flow_without_initial_message() {
    let flow = GuidedFlow::start(None, Some("   "), now());
    assert_eq!(flow.messages().len(), 1);
}

#[test]
fn blank_answers_are_refused() {
    let mut flow = flow("storm-damage");
    assert!(matches!(flow.answer(" ", now()), Err(ConversationError::EmptyAnswer)));
    assert!(flow.responses().is_empty());
}

#[test]
fn troubleshooting_reopens_input() {
    let mut flow = GuidedFlow::start(None, None, now());
    flow.answer("help", now()).unwrap();
    assert!(!flow.accepts_input());

    flow.troubleshoot(now());
    assert!(flow.is_troubleshooting());
    assert!(flow.accepts_input());
    assert_eq!(flow.messages().last().unwrap().content, TROUBLESHOOT_PROMPT);
}

#[test]
fn editing_keeps_question_and_index() {
    let mut flow = flow("change-address");
    flow.answer("Yes", now()).unwrap();
    flow.answer("No", now()).unwrap();
    let count = flow.messages().len();

    flow.edit_response(0, " No ", now()).unwrap();
    assert_eq!(flow.responses()[0].answer, "No");
    assert_eq!(flow.responses()[0].question_index, 0);
    assert_eq!(flow.responses()[1].answer, "No");
    assert_eq!(flow.messages().len(), count + 1);
    assert_eq!(flow.messages().last().unwrap().content, UPDATE_NOTICE);
    assert!(flow.edit_response(9, "x", now()).is_err());
}
