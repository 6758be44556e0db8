use servicechat_catalog::locations::Coordinates;
use servicechat_cli::commands::{Command, parse};

fn cmd(line: &str) -> Command {
    parse(line).unwrap().unwrap()
}

#[test]
fn plain_lines_are_chat() {
    assert_eq!(cmd("How do I get a TFN?"), Command::Chat("How do I get a TFN?".into()));
    assert_eq!(cmd("first line\\"), Command::Continue("first line".into()));
    assert!(parse("   ").unwrap().is_none());
}

#[test]
fn open_accepts_custom() {
    assert_eq!(cmd("/open new-baby"), Command::Open(Some("new-baby".into())));
    assert_eq!(cmd("/open custom"), Command::Open(None));
    assert_eq!(cmd("/open"), Command::Open(None));
}

#[test]
fn edit_numbers_start_at_one() {
    assert_eq!(
        cmd("/edit 2  Skilled visa"),
        Command::Edit {
            index: 1,
            answer: "Skilled visa".into()
        }
    );
    assert!(parse("/edit 0 x").is_err());
    assert!(parse("/edit two x").is_err());
    assert!(parse("/edit 1").is_err());
}

#[test]
fn history_takes_an_optional_search() {
    assert_eq!(cmd("/history"), Command::History(None));
    assert_eq!(cmd("/history visa type"), Command::History(Some("visa type".into())));
}

#[test]
fn locations_take_optional_coordinates() {
    assert_eq!(
        cmd("/locations medicare"),
        Command::Locations {
            step_id: "medicare".into(),
            origin: None
        }
    );
    assert_eq!(
        cmd("/locations medicare -33.87,151.21"),
        Command::Locations {
            step_id: "medicare".into(),
            origin: Some(Coordinates { lat: -33.87, lng: 151.21 })
        }
    );
    assert!(parse("/locations medicare here").is_err());
    assert!(parse("/locations").is_err());
}

#[test]
fn field_value_may_be_empty() {
    assert_eq!(
        cmd("/field childFullName Sam Citizen"),
        Command::Field {
            name: "childFullName".into(),
            value: "Sam Citizen".into()
        }
    );
    assert_eq!(
        cmd("/field hospitalName"),
        Command::Field {
            name: "hospitalName".into(),
            value: String::new()
        }
    );
    assert!(parse("/field").is_err());
}

#[test]
fn simple_commands() {
    for (line, expected) in [
        ("/scenarios", Command::Scenarios),
        ("/reset", Command::Reset),
        ("/roadmap", Command::Roadmap),
        ("/back", Command::Back),
        ("/help", Command::Help),
        ("/troubleshoot", Command::Troubleshoot),
        ("/submit", Command::Submit),
        ("/fix", Command::Fix),
        ("/quit", Command::Quit),
        ("/exit", Command::Quit),
    ] {
        assert_eq!(cmd(line), expected, "{line}");
    }
    assert_eq!(cmd("/toggle tfn"), Command::Toggle("tfn".into()));
    assert_eq!(cmd("/ask What ID do I need?"), Command::Ask("What ID do I need?".into()));
}

#[test]
fn unknown_commands_are_errors() {
    let err = parse("/dance").unwrap_err();
    assert!(err.to_string().contains("/dance"));
    assert!(parse("/toggle").is_err());
}
