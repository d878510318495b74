use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use jet_engine::{resolve_data_dir, FileStore, KeyValueStore};
use level_editor::{LevelSnapshot, LEVEL_STORAGE_KEY};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use super::script::{parse_script, ScriptSession};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CommandKind {
    Help,
    Run { script: PathBuf },
    Show,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CliArgs {
    pub(crate) data_dir: Option<PathBuf>,
    pub(crate) command: CommandKind,
}

pub(crate) fn run_cli() -> Result<(), String> {
    let args = env::args().skip(1).collect::<Vec<_>>();
    let cli = parse_args(&args)?;
    if cli.command == CommandKind::Help {
        println!("{}", usage_text());
        return Ok(());
    }

    init_tracing();
    info!("=== Level Editor Startup ===");

    let data_dir = resolve_data_dir(cli.data_dir.as_deref()).map_err(|err| {
        error!(error = %err, "startup_failed");
        err.to_string()
    })?;
    info!(data_dir = %data_dir.display(), "data_dir_resolved");
    let mut store = FileStore::new(data_dir);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        CommandKind::Help => Ok(()),
        CommandKind::Run { script } => {
            let content = fs::read_to_string(&script)
                .map_err(|err| format!("read script '{}': {err}", script.display()))?;
            let lines = parse_script(&content)?;
            info!(script = %script.display(), commands = lines.len(), "script_started");
            ScriptSession::new().run(&lines, &mut store, &mut out)
        }
        CommandKind::Show => show_level(&store, &mut out),
    }
}

fn show_level<W: Write>(store: &dyn KeyValueStore, out: &mut W) -> Result<(), String> {
    let raw = store
        .get(LEVEL_STORAGE_KEY)
        .map_err(|err| err.to_string())?
        .ok_or_else(|| format!("no level stored under '{LEVEL_STORAGE_KEY}'"))?;
    let snapshot = LevelSnapshot::from_json(&raw).map_err(|err| err.to_string())?;
    let pretty = serde_json::to_string_pretty(&snapshot)
        .map_err(|err| format!("encode level json: {err}"))?;
    writeln!(out, "{pretty}").map_err(|err| format!("write output: {err}"))
}

pub(crate) fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    if args.is_empty() {
        return Err(usage_text());
    }
    if args[0] == "-h" || args[0] == "--help" {
        return Ok(CliArgs {
            data_dir: None,
            command: CommandKind::Help,
        });
    }

    let mut data_dir = None;
    let mut index = 0usize;
    while index < args.len() {
        match args[index].as_str() {
            "--data-dir" => {
                let value = args
                    .get(index + 1)
                    .ok_or_else(|| "missing value for --data-dir".to_string())?;
                data_dir = Some(PathBuf::from(value));
                index += 2;
            }
            _ => break,
        }
    }

    let command = args
        .get(index)
        .ok_or_else(|| "missing subcommand".to_string())?
        .as_str();
    let command_args = &args[(index + 1)..];

    let command = match command {
        "run" => match command_args {
            [path] => CommandKind::Run {
                script: PathBuf::from(path),
            },
            [] => return Err("run requires a script path".to_string()),
            _ => return Err("run takes exactly one script path".to_string()),
        },
        "show" => {
            if !command_args.is_empty() {
                return Err("show takes no arguments".to_string());
            }
            CommandKind::Show
        }
        other => return Err(format!("unknown subcommand '{other}'")),
    };

    Ok(CliArgs { data_dir, command })
}

fn usage_text() -> String {
    [
        "level_editor - headless jet level editor",
        "",
        "Usage:",
        "  level_editor [--data-dir <dir>] run <script>",
        "  level_editor [--data-dir <dir>] show",
        "",
        "Script commands (one per line, '#' starts a comment):",
        "  edit | tool <name> | rock <type> | down <x> <y> | move <x> <y> | up",
        "  delete | save | load | dump",
        "",
        "Data directory: $JET_LEVEL_DATA_DIR, else --data-dir, else ./levels",
    ]
    .join("\n")
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use jet_engine::MemoryStore;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn parse_args_reads_data_dir_and_subcommand() {
        let parsed = parse_args(&args(&["--data-dir", "/tmp/levels", "run", "a.txt"]))
            .expect("parse");
        assert_eq!(parsed.data_dir, Some(PathBuf::from("/tmp/levels")));
        assert_eq!(
            parsed.command,
            CommandKind::Run {
                script: PathBuf::from("a.txt")
            }
        );

        let parsed = parse_args(&args(&["show"])).expect("parse");
        assert_eq!(parsed.data_dir, None);
        assert_eq!(parsed.command, CommandKind::Show);

        let parsed = parse_args(&args(&["--help"])).expect("parse");
        assert_eq!(parsed.command, CommandKind::Help);
    }

    #[test]
    fn parse_args_rejects_malformed_invocations() {
        assert!(parse_args(&[]).expect_err("empty").contains("Usage:"));
        assert_eq!(
            parse_args(&args(&["--data-dir"])).expect_err("no value"),
            "missing value for --data-dir"
        );
        assert_eq!(
            parse_args(&args(&["run"])).expect_err("no path"),
            "run requires a script path"
        );
        assert_eq!(
            parse_args(&args(&["show", "extra"])).expect_err("extra"),
            "show takes no arguments"
        );
        assert_eq!(
            parse_args(&args(&["paint"])).expect_err("unknown"),
            "unknown subcommand 'paint'"
        );
    }

    #[test]
    fn show_level_pretty_prints_stored_snapshot() {
        let mut store = MemoryStore::new();
        store
            .set(
                LEVEL_STORAGE_KEY,
                r#"{"platforms":[],"rocks":[],"startPoint":{"x":1.0,"y":2.0},"endPoint":null}"#,
            )
            .expect("seed");
        let mut out = Vec::new();
        show_level(&store, &mut out).expect("show");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("\"startPoint\": {"), "{text}");
        assert!(text.contains("\"endPoint\": null"), "{text}");
    }

    #[test]
    fn show_level_reports_missing_level() {
        let store = MemoryStore::new();
        let mut out = Vec::new();
        let error = show_level(&store, &mut out).expect_err("missing");
        assert_eq!(error, "no level stored under 'currentLevel'");
    }
}
