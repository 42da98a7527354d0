//! Line-oriented terminal front end: one command per line drives the session.

use std::fmt;
use std::path::PathBuf;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use cosmic_core::model::Session;
use services::{CaptureView, ExplorerError, ExplorerService, NarrationService, NarrationToggle};
use ui::vm::IdentifyingVm;
use ui::{Screen, render, render_notification, screen_for};

use crate::devices::FileCamera;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Scan(Option<PathBuf>),
    Capture,
    Cancel,
    Listen,
    Quiz,
    Answer { number: usize, letter: char },
    Submit,
    Retry,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Empty,
    Unknown(String),
    Usage(&'static str),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Empty => write!(f, "type a command, or `help`"),
            CommandError::Unknown(word) => write!(f, "unknown command: {word}"),
            CommandError::Usage(usage) => write!(f, "usage: {usage}"),
        }
    }
}

impl std::error::Error for CommandError {}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Empty);
        };
        let command = match head.to_ascii_lowercase().as_str() {
            "scan" => Command::Scan(words.next().map(PathBuf::from)),
            "capture" | "snap" => Command::Capture,
            "cancel" => Command::Cancel,
            "listen" | "stop" => Command::Listen,
            "quiz" => Command::Quiz,
            "answer" => {
                const USAGE: &str = "answer <question number> <option letter>";
                let number = words
                    .next()
                    .and_then(|raw| raw.parse::<usize>().ok())
                    .ok_or(CommandError::Usage(USAGE))?;
                let mut letter = words.next().map(str::chars).ok_or(CommandError::Usage(USAGE))?;
                let (Some(letter), None) = (letter.next(), letter.next()) else {
                    return Err(CommandError::Usage(USAGE));
                };
                Command::Answer { number, letter }
            }
            "submit" => Command::Submit,
            "retry" | "again" => Command::Retry,
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

pub fn print_commands() {
    println!("Commands:");
    println!("  scan [image]     open the camera (defaults to --image)");
    println!("  capture          take the picture and identify the planet");
    println!("  cancel           close the camera");
    println!("  listen           start or stop the fun fact narration");
    println!("  quiz             take the quiz");
    println!("  answer <n> <X>   pick option X for question n");
    println!("  submit           submit your answers");
    println!("  retry            start over");
    println!("  show | help | quit");
}

pub struct Shell {
    explorer: ExplorerService,
    narration: NarrationService,
    default_image: Option<PathBuf>,
    session: Session,
    capture: Option<CaptureView>,
}

impl Shell {
    pub fn new(
        explorer: ExplorerService,
        narration: NarrationService,
        default_image: Option<PathBuf>,
    ) -> Self {
        Self {
            explorer,
            narration,
            default_image,
            session: Session::new(),
            capture: None,
        }
    }

    pub fn screen(&self) -> Screen {
        screen_for(&self.session, self.narration.state(), self.capture.as_ref())
    }

    /// Read commands from stdin until `quit` or end of input.
    pub async fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        print!("{}", render(&self.screen()));
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let command = match Command::parse(&line) {
                Ok(Command::Quit) => break,
                Ok(command) => command,
                Err(CommandError::Empty) => continue,
                Err(err) => {
                    println!("{err}");
                    continue;
                }
            };
            if self.handle(command).await {
                println!();
                print!("{}", render(&self.screen()));
            }
        }
        self.narration.stop();
        Ok(())
    }

    /// Apply one command. Returns whether the screen should be redrawn.
    pub async fn handle(&mut self, command: Command) -> bool {
        debug!(?command, phase = %self.session.phase(), "handling command");
        match command {
            Command::Scan(path) => {
                if let Err(err) = self.explorer.begin_capture(&mut self.session) {
                    report(&err);
                    return false;
                }
                let camera = FileCamera::new(path.or_else(|| self.default_image.clone()));
                self.capture = Some(CaptureView::open(&camera));
                true
            }
            Command::Capture => self.capture().await,
            Command::Cancel => {
                if let Err(err) = self.explorer.cancel_capture(&mut self.session) {
                    report(&err);
                    return false;
                }
                if let Some(view) = self.capture.take() {
                    view.close();
                }
                true
            }
            Command::Listen => self.toggle_narration().await,
            Command::Quiz => {
                self.narration.stop();
                self.apply(|explorer, session| explorer.start_quiz(session))
            }
            Command::Answer { number, letter } => {
                let Screen::Quiz(quiz) = self.screen() else {
                    println!("There is no quiz to answer right now.");
                    return false;
                };
                let Some(option) = quiz.option_text(number, letter).map(str::to_string) else {
                    println!("Question {number} has no option {letter}.");
                    return false;
                };
                self.apply(|explorer, session| explorer.select_answer(session, number - 1, &option))
            }
            Command::Submit => {
                if !self.session.can_submit() && self.session.answers().is_some() {
                    println!("Please answer every question first.");
                    return false;
                }
                self.apply(|explorer, session| explorer.submit_quiz(session).map(|_| ()))
            }
            Command::Retry => self.apply(|explorer, session| explorer.retry(session)),
            Command::Show => true,
            Command::Help => {
                print_commands();
                false
            }
            Command::Quit => false,
        }
    }

    async fn capture(&mut self) -> bool {
        let Some(view) = self.capture.as_mut() else {
            println!("Open the camera with `scan` first.");
            return false;
        };
        let frame = match view.capture() {
            Ok(frame) => frame,
            Err(err) => {
                warn!(error = %err, "capture failed");
                println!("{}", render_notification(&err.to_string()));
                return false;
            }
        };
        if let Some(view) = self.capture.take() {
            view.close();
        }

        print!("{}", render(&Screen::Identifying(IdentifyingVm::new(Some(&frame)))));
        if let Err(err) = self.explorer.identify(&mut self.session, frame).await {
            report(&err);
        }
        true
    }

    async fn toggle_narration(&mut self) -> bool {
        let Some(discovery) = self.session.discovery() else {
            println!("Narration is available once a planet is identified.");
            return false;
        };
        let facts = discovery.facts.clone();
        match self.narration.toggle(&facts).await {
            Ok(NarrationToggle::Started | NarrationToggle::Stopped) => true,
            Ok(NarrationToggle::Discarded) => false,
            Err(err) => {
                println!("{}", render_notification(err.user_message()));
                true
            }
        }
    }

    fn apply(
        &mut self,
        step: impl FnOnce(&ExplorerService, &mut Session) -> Result<(), ExplorerError>,
    ) -> bool {
        match step(&self.explorer, &mut self.session) {
            Ok(()) => true,
            Err(err) => {
                report(&err);
                false
            }
        }
    }
}

fn report(err: &ExplorerError) {
    match err.notification() {
        Some(message) => println!("{}", render_notification(message)),
        None => println!("That isn't available right now ({err})."),
    }
}
