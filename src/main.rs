use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::Local;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use vox_assistant::hotkey::{self, KeyEvent};
use vox_assistant::view::{self, Action};
use vox_assistant::voice::console::{ConsoleRecognition, ConsoleSynthesis};
use vox_assistant::voice::{Capability, RecognitionEvent, ResultSegment};
use vox_assistant::{
    AppState, Assistant, Config, Interpretation, Interpreter, NoteId, ReminderId, Settings,
};

/// Vox - voice assistant for notes and reminders
#[derive(Parser)]
#[command(name = "vox", version, about)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Language tag for recognition and voice selection (e.g. "en-GB")
    #[arg(long, env = "VOX_LANGUAGE")]
    language: Option<String>,

    /// Show responses without speaking them
    #[arg(long)]
    mute: bool,

    /// Run as if the platform had no speech recognition
    #[arg(long, env = "VOX_DISABLE_RECOGNITION")]
    no_recognition: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive session; typed lines are treated as speech
    Repl,
    /// Interpret one transcript against an empty state
    Say {
        /// Transcript to interpret
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        /// Print the full interpretation as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the image text stub on a file
    Ocr {
        /// Image file
        path: PathBuf,
    },
}

/// What the REPL does after a line
enum Flow {
    Continue,
    Quit,
}

const REPL_HELP: &str = "\
Type a command as you would say it, e.g. \"remind me to call mom\".
  :listen            toggle listening (same as Ctrl+Space)
  :key <chord>       simulate a key press, e.g. :key ctrl+space
  :notes             show notes
  :reminders         show reminders
  :settings          show settings
  :status            show the last voice turn
  :note <text>       add a note from the form
  :remind <title>    add a reminder from the form
  :delete <id>       delete a note
  :toggle <id>       toggle a reminder's completed flag
  :ocr <path>        extract text from an image
  :stop              stop speaking
  :quit              exit";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info,vox_assistant=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    if let Some(language) = cli.language {
        config.settings.language = language;
    }
    if cli.mute {
        config.settings.voice_enabled = false;
    }

    match cli.command.unwrap_or(Command::Repl) {
        Command::Repl => repl(config.settings, !cli.no_recognition).await,
        Command::Say { text, json } => say(&config.settings, &text.join(" "), json),
        Command::Ocr { path } => {
            let text = vox_assistant::ocr::extract_text(&path, config.settings.ocr_delay()).await?;
            println!("{text}");
            Ok(())
        }
    }
}

/// Interpret a single transcript
fn say(settings: &Settings, transcript: &str, json: bool) -> anyhow::Result<()> {
    let interpreter = Interpreter::new(settings)?;
    let interpretation =
        interpreter.interpret(transcript, &AppState::new(), Local::now().naive_local());

    if json {
        println!("{}", view::render_json(&interpretation)?);
    } else {
        println!("{}", interpretation.response);
    }
    Ok(())
}

/// Interactive session
#[allow(clippy::future_not_send)]
async fn repl(settings: Settings, recognition_available: bool) -> anyhow::Result<()> {
    let (synth_tx, mut synth_rx) = mpsc::unbounded_channel();

    let recognition = Capability::detect(recognition_available.then(ConsoleRecognition::new));
    let synthesis = Capability::Supported(ConsoleSynthesis::new(synth_tx));
    let mut assistant = Assistant::new(settings, recognition, synthesis)?;

    for notice in assistant.notices() {
        println!("note: {notice}");
    }
    println!("vox ready - type :help for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match handle_line(&mut assistant, line.trim()).await {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Quit) => break,
                    Err(e) => println!("error: {e}"),
                }
            }
            Some(event) = synth_rx.recv() => {
                assistant.on_synthesis(&event);
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutdown requested");
                break;
            }
        }
    }

    assistant.cancel_speech();
    Ok(())
}

type ConsoleAssistant = Assistant<ConsoleRecognition, ConsoleSynthesis>;

/// Handle one REPL line
#[allow(clippy::future_not_send)]
async fn handle_line(assistant: &mut ConsoleAssistant, line: &str) -> anyhow::Result<Flow> {
    if line.is_empty() {
        return Ok(Flow::Continue);
    }

    let Some(command) = line.strip_prefix(':') else {
        speak_line(assistant, line)?;
        return Ok(Flow::Continue);
    };

    let (name, arg) = command
        .split_once(char::is_whitespace)
        .map_or((command, ""), |(name, arg)| (name, arg.trim()));

    match name {
        "q" | "quit" | "exit" => return Ok(Flow::Quit),
        "help" => println!("{REPL_HELP}"),
        "listen" => toggle(assistant)?,
        "key" => {
            let key: KeyEvent = arg.parse()?;
            if hotkey::is_listen_toggle(&key) {
                toggle(assistant)?;
            } else {
                println!("no binding for {arg}");
            }
        }
        "notes" => print!("{}", view::render_notes(assistant.state())),
        "reminders" => print!(
            "{}",
            view::render_reminders(assistant.state(), Local::now().naive_local())
        ),
        "settings" => print!("{}", view::render_settings(assistant.settings())),
        "status" => println!("{}", view::render_json(assistant.interaction())?),
        "note" => {
            assistant.dispatch(Action::AddNote {
                content: arg.to_string(),
            })?;
            println!("note added");
        }
        "remind" => {
            assistant.dispatch(Action::AddReminder {
                title: arg.to_string(),
                description: String::new(),
                due: None,
            })?;
            println!("reminder added");
        }
        "delete" => {
            let id: NoteId = arg.parse()?;
            assistant.dispatch(Action::DeleteNote(id))?;
            println!("note {id} deleted");
        }
        "toggle" => {
            let id: ReminderId = arg.parse()?;
            assistant.dispatch(Action::ToggleReminder(id))?;
            println!("reminder {id} toggled");
        }
        "ocr" => {
            let text = assistant.ingest_image(Path::new(arg)).await?;
            if !assistant.settings().voice_enabled {
                println!("{text}");
            }
        }
        "stop" => assistant.cancel_speech(),
        other => println!("unknown command :{other} (try :help)"),
    }

    Ok(Flow::Continue)
}

fn toggle(assistant: &mut ConsoleAssistant) -> anyhow::Result<()> {
    let interpretation = assistant.toggle_listening()?;
    if assistant.input().is_listening() {
        println!("listening...");
    } else {
        println!("stopped listening");
    }
    show_muted(assistant, interpretation.as_ref());
    Ok(())
}

/// Print the response when it will not be spoken
fn show_muted(assistant: &ConsoleAssistant, interpretation: Option<&Interpretation>) {
    if let Some(interpretation) = interpretation {
        if !assistant.settings().voice_enabled {
            println!("{}", interpretation.response);
        }
    }
}

/// Deliver a typed line as one finalized recognition session
fn speak_line(assistant: &mut ConsoleAssistant, line: &str) -> anyhow::Result<()> {
    if !assistant.input().is_supported() {
        println!("speech recognition is unavailable; use the :note and :remind forms");
        return Ok(());
    }

    if !assistant.input().is_listening() {
        assistant.start_listening();
    }
    assistant.on_recognition(RecognitionEvent::Results(vec![ResultSegment::finalized(line)]))?;
    let interpretation = assistant.on_recognition(RecognitionEvent::End)?;

    show_muted(assistant, interpretation.as_ref());
    Ok(())
}
