//! REPL line parsing.
//!
//! Lines starting with `/` are commands; anything else is chat text. A chat
//! line ending in `\` continues onto the next line.

use servicechat_catalog::locations::Coordinates;
use servicechat_conversation::views::locations::parse_coordinates;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Scenarios,
    /// `None` opens a custom conversation.
    Open(Option<String>),
    Reset,
    Roadmap,
    History(Option<String>),
    /// `index` is zero-based; the user types the one-based number shown.
    Edit { index: usize, answer: String },
    Back,
    Help,
    Troubleshoot,
    Toggle(String),
    Form(String),
    Locations { step_id: String, origin: Option<Coordinates> },
    /// Filter the open location list.
    Find(String),
    Field { name: String, value: String },
    Ask(String),
    Submit,
    Fix,
    Quit,
    Chat(String),
    /// A chat line to be continued (typed with a trailing `\`).
    Continue(String),
}

pub const HELP: &str = "\
Commands:
  /scenarios                 list scenarios
  /open <id|custom>          open a scenario or a custom conversation
  /reset                     clear this conversation and start again
  /roadmap                   show the roadmap
  /history [search]          show past messages and your answers
  /edit <n> <answer>         change answer n (from /history)
  /back                      return to the previous view
  /troubleshoot              ask for help with a problem
  /toggle <step>             mark a roadmap step done or not done
  /form <step>               open form assistance for a step
  /locations <step> [lat,lng] list offices for an in-person step
  /find <text>               filter the office list
  /field <name> <value>      fill a form field (empty value clears it)
  /ask <question>            ask about the birth registration form
  /submit                    submit the open form
  /fix                       return a declined form to draft
  /help                      show this help
  /quit                      exit
Anything else is sent as a message. End a line with \\ to continue it.";

/// Parse one input line. Blank lines yield `Ok(None)`; an unknown or
/// malformed command is an error naming the problem.
pub fn parse(line: &str) -> eyre::Result<Option<Command>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let Some(rest) = trimmed.strip_prefix('/') else {
        let text = line.trim_end_matches(['\r', '\n']);
        return Ok(Some(match text.strip_suffix('\\') {
            Some(head) => Command::Continue(head.to_string()),
            None => Command::Chat(text.to_string()),
        }));
    };

    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (rest, ""),
    };

    let command = match name {
        "scenarios" => Command::Scenarios,
        "open" => match args {
            "" | "custom" => Command::Open(None),
            id => Command::Open(Some(id.to_string())),
        },
        "reset" => Command::Reset,
        "roadmap" => Command::Roadmap,
        "history" => Command::History(non_empty(args)),
        "edit" => {
            let (n, answer) = args
                .split_once(char::is_whitespace)
                .ok_or_else(|| eyre::eyre!("usage: /edit <n> <answer>"))?;
            let n: usize = n.parse().map_err(|_| eyre::eyre!("not a response number: {n}"))?;
            if n == 0 {
                eyre::bail!("responses are numbered from 1");
            }
            Command::Edit {
                index: n - 1,
                answer: answer.trim().to_string(),
            }
        }
        "back" => Command::Back,
        "help" => Command::Help,
        "troubleshoot" => Command::Troubleshoot,
        "toggle" => Command::Toggle(required(args, "/toggle <step>")?),
        "form" => Command::Form(required(args, "/form <step>")?),
        "locations" => {
            let mut parts = args.split_whitespace();
            let step_id = parts
                .next()
                .ok_or_else(|| eyre::eyre!("usage: /locations <step> [lat,lng]"))?
                .to_string();
            let origin = match parts.next() {
                Some(text) => {
                    Some(parse_coordinates(text).ok_or_else(|| eyre::eyre!("expected lat,lng but got {text}"))?)
                }
                None => None,
            };
            Command::Locations { step_id, origin }
        }
        "find" => Command::Find(args.to_string()),
        "field" => {
            let (name, value) = match args.split_once(char::is_whitespace) {
                Some((name, value)) => (name, value.trim()),
                None => (args, ""),
            };
            Command::Field {
                name: required(name, "/field <name> <value>")?,
                value: value.to_string(),
            }
        }
        "ask" => Command::Ask(required(args, "/ask <question>")?),
        "submit" => Command::Submit,
        "fix" => Command::Fix,
        "quit" | "exit" => Command::Quit,
        other => eyre::bail!("unknown command /{other} (try /help)"),
    };
    Ok(Some(command))
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

fn required(s: &str, usage: &str) -> eyre::Result<String> {
    non_empty(s).ok_or_else(|| eyre::eyre!("usage: {usage}"))
}
