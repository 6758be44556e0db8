use std::sync::Arc;

use jiff::Timestamp;
use servicechat_cli::commands::Command;
use servicechat_cli::offline::OfflineShell;
use servicechat_cli::shell::{STILL_WAITING, Shell, Step};
use servicechat_conversation::driver::execute_chat;
use servicechat_conversation::{Phase, View};
use servicechat_storage::conversation::ConversationStore;
use servicechat_storage::kv::MemoryStore;
use servicechat_transport::chat::ChatTransport;
use servicechat_transport::error::TransportError;

/// Answers every message by echoing it back.
struct Echo;

impl ChatTransport for Echo {
    fn send(&self, message: &str, _scenario_id: Option<&str>, _session_id: &str) -> Result<String, TransportError> {
        Ok(format!("echo: {}", message.lines().next().unwrap_or_default()))
    }
}

fn now() -> Timestamp {
    Timestamp::from_second(1_700_000_000).unwrap()
}

fn shell() -> Shell {
    Shell::new("session-1", ConversationStore::new(Arc::new(MemoryStore::new())))
}

/// Run the step's chat jobs to completion, collecting the output.
fn settle(shell: &mut Shell, mut step: Step) -> String {
    let mut output = vec![step.output.clone()];
    while let Some(job) = step.jobs.pop() {
        let event = execute_chat(&Echo, "session-1", job);
        let next = shell.deliver(event, now());
        output.push(next.output.clone());
        step.jobs.extend(next.jobs);
    }
    output.join("\n")
}

fn run(shell: &mut Shell, command: Command) -> String {
    let step = shell.apply(command, now());
    settle(shell, step)
}

#[test]
fn opening_prints_the_greeting() {
    let mut shell = shell();
    let step = shell.apply(Command::Open(Some("storm-damage".into())), now());
    assert_eq!(step.jobs.len(), 1);
    assert!(step.output.contains("── A storm damaged my property ──"));
    assert!(step.output.contains("(connecting to the assistant...)"));

    let out = settle(&mut shell, step);
    assert!(out.contains("assistant> echo: I've selected the scenario: \"A storm damaged my property\"."));
    assert_eq!(shell.state().phase, Phase::Idle);
}

#[test]
fn chat_round_trip_and_history() {
    let mut shell = shell();
    run(&mut shell, Command::Open(None));
    let step = shell.apply(Command::Chat("hello there".into()), now());
    assert!(step.output.contains("you> hello there"));
    assert!(step.output.contains("(assistant is typing...)"));
    let out = settle(&mut shell, step);
    assert!(out.contains("assistant> echo: hello there"));

    let out = run(&mut shell, Command::History(None));
    assert_eq!(shell.state().view, View::History);
    assert!(out.contains("[1] your answer: hello there"));

    let out = run(&mut shell, Command::Edit { index: 0, answer: "hi".into() });
    assert!(out.contains("I've updated your response."));
    assert_eq!(shell.state().responses[0].answer, "hi");
}

#[test]
fn continued_lines_build_one_message() {
    let mut shell = shell();
    run(&mut shell, Command::Open(None));
    let step = shell.apply(Command::Continue("line one".into()), now());
    assert!(step.jobs.is_empty());
    assert!(step.output.contains("(draft) line one\n"));
    run(&mut shell, Command::Chat("line two".into()));
    let user = shell.state().messages.iter().find(|m| m.id.starts_with("user-")).unwrap();
    assert_eq!(user.content, "line one\nline two");
}

#[test]
fn lines_typed_while_waiting_are_refused() {
    let mut shell = shell();
    run(&mut shell, Command::Open(None));
    let pending = shell.apply(Command::Chat("first".into()), now());

    let step = shell.apply(Command::Chat("hello".into()), now());
    assert_eq!(step.output, STILL_WAITING);
    assert!(step.jobs.is_empty());
    let step = shell.apply(Command::Continue("more".into()), now());
    assert_eq!(step.output, STILL_WAITING);
    assert!(shell.state().input.is_empty());

    settle(&mut shell, pending);
    run(&mut shell, Command::Chat("world".into()));
    let sent: Vec<_> = shell
        .state()
        .messages
        .iter()
        .filter(|m| m.id.starts_with("user-"))
        .map(|m| m.content.as_str())
        .collect();
    assert_eq!(sent, ["first", "world"]);
}

#[test]
fn history_is_hidden_until_there_is_some() {
    let mut shell = shell();
    run(&mut shell, Command::Open(None));
    let out = run(&mut shell, Command::History(None));
    assert!(out.starts_with("History is available"));
}

#[test]
fn reset_reprints_the_fresh_conversation() {
    let mut shell = shell();
    run(&mut shell, Command::Open(Some("change-address".into())));
    run(&mut shell, Command::Chat("I moved".into()));

    let step = shell.apply(Command::Reset, now());
    assert_eq!(step.output, "Clearing this conversation...");
    let out = settle(&mut shell, step);
    assert!(out.contains("── I need to change my address ──"));
    assert_eq!(shell.state().messages.len(), 1);
    assert!(shell.state().responses.is_empty());
}

#[test]
fn roadmap_views_render() {
    let mut shell = shell();
    run(&mut shell, Command::Open(Some("new-arrival".into())));
    let out = run(&mut shell, Command::Roadmap);
    assert!(out.contains("Roadmap: 0/4 done (0%), about 2h 30m in total"));
    assert!(out.contains("after: tfn"));

    let out = run(&mut shell, Command::Toggle("tfn".into()));
    assert!(out.contains("Roadmap: 1/4 done (25%)"));

    let out = run(&mut shell, Command::Locations { step_id: "medicare".into(), origin: None });
    assert!(out.contains("Medicare Service Centre Sydney"));
    assert!(out.contains("map: https://www.google.com/maps/search/?api=1&query="));

    let out = run(&mut shell, Command::Find("parramatta".into()));
    assert!(out.contains("Parramatta"));
    assert!(!out.contains("Medicare Service Centre Sydney"));

    let out = run(&mut shell, Command::Back);
    assert!(out.contains("Roadmap:"));

    let out = run(&mut shell, Command::Form("tfn".into()));
    assert!(out.contains("Form: Apply for Tax File Number (TFN)"));
    let out = run(&mut shell, Command::Submit);
    assert!(out.contains("Status: declined - Missing required fields: First Name"));

    let out = run(&mut shell, Command::Toggle("nope".into()));
    assert!(out.starts_with("! "));
}

#[test]
fn birth_registration_panel_question() {
    let mut shell = shell();
    let out = run(&mut shell, Command::Open(Some("new-baby".into())));
    assert!(out.contains("Birth registration"));
    assert!(out.contains("bornInNSW* Was the child born in NSW?"));

    run(&mut shell, Command::Field { name: "bornInNSW".into(), value: "yes".into() });
    let out = run(&mut shell, Command::Ask("What ID counts?".into()));
    assert!(out.contains("form help> echo: User question about birth registration form: What ID counts?"));
    assert_eq!(shell.state().birth.as_ref().unwrap().panel().len(), 2);
}

#[test]
fn offline_flow_walks_the_questions() {
    let mut shell = OfflineShell::open(Some("new-arrival"), now()).unwrap();
    let out = shell.transcript();
    assert!(out.contains("(offline)"));
    assert!(out.contains("What type of visa do you have?"));
    assert!(out.contains("(question 1 of 4)"));

    for answer in ["Student Visa (500)", "NSW", "No", "Yes"] {
        shell.apply(Command::Chat(answer.into()), now());
    }
    assert!(shell.flow().is_complete());

    let step = shell.apply(Command::Form("tfn".into()), now());
    assert!(step.output.contains("(1 pre-filled)"));
    assert!(step.output.contains("visaType* Visa Type: Student Visa (500)"));

    let step = shell.apply(Command::Chat("more".into()), now());
    assert!(step.output.starts_with("! "));

    let step = shell.apply(Command::Quit, now());
    assert!(step.quit);
}

#[test]
fn offline_refused_answer_keeps_the_draft() {
    let mut shell = OfflineShell::open(Some("change-address"), now()).unwrap();
    let questions = shell.flow().scenario().unwrap().questions.len();
    for i in 0..questions {
        shell.apply(Command::Chat(format!("answer {i}")), now());
    }
    assert!(shell.flow().is_complete());

    shell.apply(Command::Continue("my card".into()), now());
    let step = shell.apply(Command::Chat("was lost".into()), now());
    assert!(step.output.starts_with("! "));

    shell.apply(Command::Troubleshoot, now());
    shell.apply(Command::Chat("was lost".into()), now());
    let last = shell.flow().messages().iter().rev().find(|m| m.id.starts_with("user-")).unwrap();
    assert_eq!(last.content, "my card\nwas lost");
}

#[test]
fn offline_new_baby_runs_the_wizard() {
    let mut shell = OfflineShell::open(Some("new-baby"), now()).unwrap();
    let out = shell.intro();
    assert!(out.contains("Where was your baby born?"));
    assert!(out.contains("bornInNSW* Was the child born in NSW?"));

    let step = shell.apply(Command::Field { name: "bornInNSW".into(), value: "Yes".into() }, now());
    assert!(step.output.contains("relationship* What is your relationship to the child?"));
    assert_eq!(shell.birth().unwrap().value("bornInNSW"), "yes");

    let step = shell.apply(Command::Submit, now());
    assert!(step.output.contains("Status: declined - Missing required fields:"));
    let step = shell.apply(Command::Field { name: "relationship".into(), value: "mother".into() }, now());
    assert!(step.output.starts_with("! "));
    shell.apply(Command::Fix, now());
    shell.apply(Command::Field { name: "relationship".into(), value: "mother".into() }, now());
    assert_eq!(shell.birth().unwrap().value("relationship"), "mother");

    let step = shell.apply(Command::Ask("Which ID?".into()), now());
    assert_eq!(step.output, "Form questions need a connection to the assistant.");

    shell.apply(Command::Chat("Westmead Hospital".into()), now());
    let step = shell.apply(Command::Back, now());
    assert!(step.output.starts_with("Birth registration"));
}
