//! Offline mode: the scripted question flow with the same roadmap, form and
//! office views as the live session. The `new-baby` scenario also gets the
//! birth-registration wizard; only its side-panel questions need the network.
//! Nothing is sent anywhere and nothing is persisted.

use jiff::Timestamp;
use servicechat_catalog::{get_scenario, scenario_catalog};
use servicechat_conversation::ConversationError;
use servicechat_conversation::birth_registration::BirthRegistration;
use servicechat_conversation::guided::GuidedFlow;
use servicechat_conversation::views::form::FormAssistance;
use servicechat_conversation::views::locations::LocationFinder;
use servicechat_conversation::views::roadmap::Roadmap;

use crate::commands::{Command, HELP};
use crate::render;
use crate::shell::{Step, weekday};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Chat,
    Birth,
    Roadmap,
    Form,
    Locations,
}

pub struct OfflineShell {
    flow: GuidedFlow,
    roadmap: Roadmap,
    form: Option<FormAssistance>,
    locations: Option<LocationFinder>,
    birth: Option<BirthRegistration>,
    screen: Screen,
    printed: usize,
    draft: String,
}

impl OfflineShell {
    /// Start on `scenario_id`, or a custom conversation when `None`.
    pub fn open(scenario_id: Option<&str>, now: Timestamp) -> Result<Self, ConversationError> {
        let scenario = match scenario_id {
            None => None,
            Some(id) => Some(
                get_scenario(id)
                    .ok_or_else(|| ConversationError::UnknownScenario(id.to_string()))?
                    .to_scenario(),
            ),
        };
        let roadmap = Roadmap::for_scenario(scenario.as_ref().map(|s| s.id.as_str()));
        let birth = scenario
            .as_ref()
            .filter(|s| s.is_birth_registration())
            .map(|_| BirthRegistration::new());
        let screen = if birth.is_some() { Screen::Birth } else { Screen::Chat };
        Ok(Self {
            flow: GuidedFlow::start(scenario, None, now),
            roadmap,
            form: None,
            locations: None,
            birth,
            screen,
            printed: 0,
            draft: String::new(),
        })
    }

    pub fn flow(&self) -> &GuidedFlow {
        &self.flow
    }

    pub fn roadmap(&self) -> &Roadmap {
        &self.roadmap
    }

    pub fn birth(&self) -> Option<&BirthRegistration> {
        self.birth.as_ref()
    }

    /// The transcript so far followed by the wizard, if there is one.
    pub fn intro(&mut self) -> String {
        let mut out = self.transcript();
        if let Some(birth) = &self.birth {
            out.push_str("\n\n");
            out.push_str(&render::birth(birth));
        }
        out
    }

    fn home(&self) -> Screen {
        if self.birth.is_some() { Screen::Birth } else { Screen::Chat }
    }

    /// Everything not printed yet.
    pub fn transcript(&mut self) -> String {
        let mut out: Vec<String> = Vec::new();
        if self.printed == 0 {
            let title = self.flow.scenario().map_or("Custom conversation", |s| s.title.as_str());
            out.push(format!("── {title} (offline) ──"));
        }
        out.extend(self.flow.messages()[self.printed..].iter().map(render::message));
        self.printed = self.flow.messages().len();
        if let Some((n, total)) = self.flow.progress()
            && !self.flow.is_complete()
        {
            out.push(format!("(question {n} of {total})"));
        }
        if self.flow.is_complete() && !self.roadmap.is_empty() {
            out.push("Your roadmap is ready: /roadmap".to_string());
        }
        out.join("\n")
    }

    pub fn apply(&mut self, command: Command, now: Timestamp) -> Step {
        match self.try_apply(command, now) {
            Ok(step) => step,
            Err(e) => Step {
                output: format!("! {e}"),
                ..Step::default()
            },
        }
    }

    fn try_apply(&mut self, command: Command, now: Timestamp) -> Result<Step, ConversationError> {
        let output = match command {
            Command::Help => HELP.to_string(),
            Command::Quit => {
                return Ok(Step {
                    quit: true,
                    ..Step::default()
                });
            }
            Command::Scenarios => render::scenarios(&scenario_catalog()),
            Command::Open(scenario_id) => {
                *self = Self::open(scenario_id.as_deref(), now)?;
                self.intro()
            }
            Command::Reset => {
                let scenario_id = self.flow.scenario().map(|s| s.id.clone());
                *self = Self::open(scenario_id.as_deref(), now)?;
                self.intro()
            }
            Command::Chat(text) => {
                let answer = format!("{}{text}", self.draft);
                self.flow.answer(&answer, now)?;
                self.draft.clear();
                self.screen = Screen::Chat;
                self.transcript()
            }
            Command::Continue(text) => {
                self.draft.push_str(&text);
                self.draft.push('\n');
                format!("(draft) {}", self.draft.trim_end())
            }
            Command::History(query) => {
                if self.flow.messages().len() <= 1 {
                    "History is available once the conversation has more than one message.".to_string()
                } else {
                    render::history(self.flow.messages(), self.flow.responses(), query.as_deref())
                }
            }
            Command::Edit { index, answer } => {
                self.flow.edit_response(index, &answer, now)?;
                self.transcript()
            }
            Command::Troubleshoot => {
                self.flow.troubleshoot(now);
                self.screen = Screen::Chat;
                self.transcript()
            }
            Command::Roadmap => {
                self.screen = Screen::Roadmap;
                render::roadmap(&self.roadmap)
            }
            Command::Toggle(step_id) => {
                self.roadmap.toggle(&step_id)?;
                render::roadmap(&self.roadmap)
            }
            Command::Form(step_id) => {
                let step = self
                    .roadmap
                    .step(&step_id)
                    .ok_or_else(|| ConversationError::UnknownStep(step_id.clone()))?;
                let form = FormAssistance::open(step, self.flow.responses())?;
                let output = render::form(&form);
                self.form = Some(form);
                self.screen = Screen::Form;
                output
            }
            Command::Field { name, value } => match self.active_form()? {
                ActiveForm::Step(form) => {
                    form.set(&name, &value)?;
                    render::form(form)
                }
                ActiveForm::Birth(birth) => {
                    birth.set(&name, &value)?;
                    render::birth(birth)
                }
            },
            Command::Submit => match self.active_form()? {
                ActiveForm::Step(form) => {
                    form.submit()?;
                    render::form(form)
                }
                ActiveForm::Birth(birth) => {
                    birth.submit()?;
                    render::birth(birth)
                }
            },
            Command::Fix => match self.active_form()? {
                ActiveForm::Step(form) => {
                    form.fix_issues();
                    render::form(form)
                }
                ActiveForm::Birth(birth) => {
                    birth.fix_issues();
                    render::birth(birth)
                }
            },
            Command::Locations { step_id, origin } => {
                let step = self
                    .roadmap
                    .step(&step_id)
                    .ok_or_else(|| ConversationError::UnknownStep(step_id.clone()))?;
                let kind = step.location.ok_or_else(|| ConversationError::NoLocation(step_id.clone()))?;
                let finder = LocationFinder::new(kind, origin);
                let output = render::locations(&finder.search(""), weekday(now));
                self.locations = Some(finder);
                self.screen = Screen::Locations;
                output
            }
            Command::Find(query) => match (&self.locations, self.screen) {
                (Some(finder), Screen::Locations) => render::locations(&finder.search(&query), weekday(now)),
                _ => "Open an office list with /locations first.".to_string(),
            },
            Command::Back => {
                self.screen = match self.screen {
                    Screen::Form | Screen::Locations => Screen::Roadmap,
                    Screen::Roadmap | Screen::Chat | Screen::Birth => self.home(),
                };
                match (self.screen, &self.birth) {
                    (Screen::Roadmap, _) => render::roadmap(&self.roadmap),
                    (Screen::Birth, Some(birth)) => render::birth(birth),
                    _ => String::new(),
                }
            }
            Command::Ask(_) => "Form questions need a connection to the assistant.".to_string(),
        };
        Ok(Step {
            output,
            ..Step::default()
        })
    }

    fn active_form(&mut self) -> Result<ActiveForm<'_>, ConversationError> {
        match self.screen {
            Screen::Form => self.form.as_mut().map(ActiveForm::Step),
            Screen::Birth => self.birth.as_mut().map(ActiveForm::Birth),
            _ => None,
        }
        .ok_or(ConversationError::WrongView)
    }
}

/// The form `/field`, `/submit` and `/fix` act on.
enum ActiveForm<'a> {
    Step(&'a mut FormAssistance),
    Birth(&'a mut BirthRegistration),
}
