use std::path::PathBuf;

use anyhow::Context;
use scriptcraft_core::generation::ScriptResult;
use scriptcraft_core::types::{ContentKind, Tone};
use scriptcraft_engine::client::GenerationClient;
use scriptcraft_engine::session::{STAGE_GENERATING, ScriptOutcome, ScriptSession};
use scriptcraft_runtime::export::{export_script, suggested_file_name};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

const RECENT_COUNT: usize = 3;

const HELP: &str = "\
commands:
  kind <social_short|long_form_video|podcast_qa>
  tone <casual|professional|humorous|inspirational|educational>
  duration <label>        e.g. \"30 seconds\"
  audience <text>
  settings                show current selections
  generate <topic>        create a script (alias: g)
  regenerate              run the last request again
  history                 all scripts, newest first
  recent                  the last few scripts
  show <n>                print history entry n
  save <n> [path]         write history entry n to a text file
  help
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
enum ReplCommand {
    Kind(ContentKind),
    Tone(Tone),
    Duration(String),
    Audience(String),
    Settings,
    Generate(String),
    Regenerate,
    History,
    Recent,
    Show(usize),
    Save(usize, Option<PathBuf>),
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<ReplCommand, String> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((h, r)) => (h, r.trim()),
        None => (line, ""),
    };

    let require = |what: &str| {
        if rest.is_empty() {
            Err(format!("usage: {head} <{what}>"))
        } else {
            Ok(rest.to_string())
        }
    };

    match head.to_ascii_lowercase().as_str() {
        "kind" => rest
            .parse()
            .map(ReplCommand::Kind)
            .map_err(|e| e.to_string()),
        "tone" => rest
            .parse()
            .map(ReplCommand::Tone)
            .map_err(|e| e.to_string()),
        "duration" => require("label").map(ReplCommand::Duration),
        "audience" => require("text").map(ReplCommand::Audience),
        "settings" => Ok(ReplCommand::Settings),
        "generate" | "g" => require("topic").map(ReplCommand::Generate),
        "regenerate" => Ok(ReplCommand::Regenerate),
        "history" => Ok(ReplCommand::History),
        "recent" => Ok(ReplCommand::Recent),
        "show" => parse_index(rest).map(ReplCommand::Show),
        "save" => {
            let (idx, path) = match rest.split_once(char::is_whitespace) {
                Some((i, p)) => (i, Some(PathBuf::from(p.trim()))),
                None => (rest, None),
            };
            parse_index(idx).map(|i| ReplCommand::Save(i, path))
        }
        "help" | "?" => Ok(ReplCommand::Help),
        "quit" | "exit" | "q" => Ok(ReplCommand::Quit),
        other => Err(format!("unknown command: {other} (try `help`)")),
    }
}

fn parse_index(s: &str) -> Result<usize, String> {
    s.trim()
        .parse()
        .map_err(|_| format!("expected a history index, got {s:?}"))
}

pub async fn run(mut session: ScriptSession, client: GenerationClient) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    println!("ScriptCraft interactive session. Type `help` for commands.");
    loop {
        stdout.write_all(b"> ").await.context("write prompt")?;
        stdout.flush().await.context("flush stdout")?;

        let Some(line) = lines.next_line().await.context("read stdin")? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let cmd = match parse_command(&line) {
            Ok(cmd) => cmd,
            Err(msg) => {
                println!("{msg}");
                continue;
            }
        };

        if cmd == ReplCommand::Quit {
            break;
        }
        handle(&mut session, &client, cmd).await;
    }
    Ok(())
}

async fn handle(session: &mut ScriptSession, client: &GenerationClient, cmd: ReplCommand) {
    match cmd {
        ReplCommand::Kind(kind) => {
            session.settings.select_kind(kind);
            println!(
                "selected {} (duration {:?}; options: {})",
                kind.label(),
                session.settings.duration_hint,
                kind.duration_options().join(", ")
            );
        }
        ReplCommand::Tone(tone) => session.settings.tone = tone,
        ReplCommand::Duration(d) => session.settings.duration_hint = d,
        ReplCommand::Audience(a) => session.settings.audience = a,
        ReplCommand::Settings => {
            let s = &session.settings;
            let kind = s.content_kind.map(|k| k.label()).unwrap_or("(none)");
            println!(
                "kind: {kind}\ntone: {}\nduration: {}\naudience: {}",
                s.tone, s.duration_hint, s.audience
            );
        }
        ReplCommand::Generate(topic) => {
            let req = match session.settings.request_for(topic) {
                Ok(req) => req,
                Err(e) => {
                    println!("{e}");
                    return;
                }
            };
            let res = session
                .create_script_with_hook(client, req, |stage| async move {
                    if stage == STAGE_GENERATING {
                        println!("Crafting your script...");
                    }
                })
                .await;
            report(res);
        }
        ReplCommand::Regenerate => {
            let res = session.regenerate(client).await;
            report(res);
        }
        ReplCommand::History => {
            if session.history().is_empty() {
                println!("No scripts saved yet.");
            }
            for (i, e) in session.history().newest_first() {
                let flag = if e.is_failure() { "  [failed]" } else { "" };
                println!(
                    "[{i}] {}  •  {}  •  {}{flag}",
                    e.topic,
                    e.content_kind.label(),
                    e.formatted_timestamp()
                );
            }
        }
        ReplCommand::Recent => {
            let history = session.history();
            let offset = history.len() - history.recent(RECENT_COUNT).len();
            for (i, e) in history.recent(RECENT_COUNT).iter().enumerate() {
                println!("[{}] {}", offset + i, e.topic);
            }
        }
        ReplCommand::Show(i) => match session.load_from_history(i) {
            Ok(e) => print!("{}", e.to_text_document()),
            Err(e) => println!("{e}"),
        },
        ReplCommand::Save(i, path) => {
            let entry = match session.load_from_history(i) {
                Ok(e) => e,
                Err(e) => {
                    println!("{e}");
                    return;
                }
            };
            let path = path.unwrap_or_else(|| PathBuf::from(suggested_file_name(entry)));
            match export_script(entry, &path) {
                Ok(()) => println!("saved to {}", path.display()),
                Err(e) => println!("save failed: {e:#}"),
            }
        }
        ReplCommand::Help => println!("{HELP}"),
        ReplCommand::Quit => {}
    }
}

fn report(res: Result<ScriptOutcome, scriptcraft_engine::session::SessionError>) {
    match res {
        Ok(outcome) => {
            match &outcome.result {
                ScriptResult::Success { text } => println!("{text}"),
                ScriptResult::Failure { message } => println!("{message}"),
            }
            if let Some(i) = outcome.history_index {
                println!("(saved as history entry {i})");
            }
        }
        Err(e) => println!("{e}"),
    }
}
