use std::io::Write;

use jet_engine::{KeyValueStore, PointerEvent, SceneWorld};
use level_editor::{LevelEditor, UiCommand, UiSignal};
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ScriptCommand {
    Ui(UiCommand),
    Pointer(PointerEvent),
    Dump,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScriptLine {
    pub(crate) line: usize,
    pub(crate) command: ScriptCommand,
}

/// Parses an editor script. Blank lines and `#` comments are skipped; the
/// first malformed line aborts parsing.
pub(crate) fn parse_script(content: &str) -> Result<Vec<ScriptLine>, String> {
    let mut lines = Vec::new();
    for (index, raw) in content.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let line = index + 1;
        let command = parse_command(trimmed).map_err(|message| format!("line {line}: {message}"))?;
        lines.push(ScriptLine { line, command });
    }
    Ok(lines)
}

fn parse_command(text: &str) -> Result<ScriptCommand, String> {
    let mut parts = text.split_whitespace();
    let verb = parts.next().unwrap_or_default();
    let args = parts.collect::<Vec<_>>();

    let command = match verb {
        "edit" => ScriptCommand::Ui(UiCommand::ToggleEditMode),
        "tool" => ScriptCommand::Ui(UiCommand::SetTool(single_arg(verb, &args)?.to_string())),
        "rock" => ScriptCommand::Ui(UiCommand::SetRockType(
            single_arg(verb, &args)?.to_string(),
        )),
        "delete" => ScriptCommand::Ui(UiCommand::DeleteSelected),
        "save" => ScriptCommand::Ui(UiCommand::SaveLevel),
        "load" => ScriptCommand::Ui(UiCommand::LoadLevel),
        "down" => {
            let (x, y) = parse_point(verb, &args)?;
            ScriptCommand::Pointer(PointerEvent::down(x, y))
        }
        "move" => {
            let (x, y) = parse_point(verb, &args)?;
            ScriptCommand::Pointer(PointerEvent::moved(x, y))
        }
        "up" if args.is_empty() => ScriptCommand::Pointer(PointerEvent::up(0.0, 0.0)),
        "up" => {
            let (x, y) = parse_point(verb, &args)?;
            ScriptCommand::Pointer(PointerEvent::up(x, y))
        }
        "dump" => ScriptCommand::Dump,
        other => return Err(format!("unknown command '{other}'")),
    };

    let takes_no_args = matches!(verb, "edit" | "delete" | "save" | "load" | "dump");
    if takes_no_args && !args.is_empty() {
        return Err(format!("{verb} takes no arguments"));
    }
    Ok(command)
}

fn single_arg<'a>(verb: &str, args: &[&'a str]) -> Result<&'a str, String> {
    match args {
        [value] => Ok(value),
        _ => Err(format!("{verb} expects exactly one argument")),
    }
}

fn parse_point(verb: &str, args: &[&str]) -> Result<(f32, f32), String> {
    let [x, y] = args else {
        return Err(format!("{verb} expects <x> <y>"));
    };
    Ok((parse_coord(x)?, parse_coord(y)?))
}

fn parse_coord(raw: &str) -> Result<f32, String> {
    raw.parse::<f32>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| format!("invalid coordinate '{raw}' (expected finite number)"))
}

/// Editor plus an in-memory scene host, driven line by line.
#[derive(Debug, Default)]
pub(crate) struct ScriptSession {
    editor: LevelEditor,
    world: SceneWorld,
}

impl ScriptSession {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn editor(&self) -> &LevelEditor {
        &self.editor
    }

    /// Runs every line, reporting one result line per command. Editor-level
    /// failures are reported and the script continues; only output errors
    /// abort.
    pub(crate) fn run<W: Write>(
        &mut self,
        lines: &[ScriptLine],
        store: &mut dyn KeyValueStore,
        out: &mut W,
    ) -> Result<(), String> {
        for line in lines {
            let report = self.execute(&line.command, store);
            writeln!(out, "{}: {report}", line.line)
                .map_err(|error| format!("write output: {error}"))?;
        }
        self.editor.teardown(&mut self.world);
        Ok(())
    }

    fn execute(&mut self, command: &ScriptCommand, store: &mut dyn KeyValueStore) -> String {
        match command {
            ScriptCommand::Ui(ui_command) => {
                let label = ui_label(ui_command);
                match self
                    .editor
                    .apply_ui_command(&mut self.world, store, ui_command.clone())
                {
                    UiSignal::Applied => format!("ok: {label}"),
                    UiSignal::Ignored => format!("ignored: {label}"),
                    UiSignal::Saved => "ok: saved".to_string(),
                    UiSignal::Loaded => "ok: loaded".to_string(),
                    UiSignal::SaveFailed(error) => format!("error: {error}"),
                    UiSignal::LoadFailed(error) => format!("error: {error}"),
                }
            }
            ScriptCommand::Pointer(event) => {
                match self.editor.handle_pointer(&mut self.world, *event) {
                    Ok(()) => format!(
                        "ok: {} {} {} -> {}",
                        event.as_token(),
                        event.position.x,
                        event.position.y,
                        self.editor.gesture().as_token()
                    ),
                    Err(error) => {
                        warn!(error = %error, "pointer_event_failed");
                        format!("error: {error}")
                    }
                }
            }
            ScriptCommand::Dump => self.dump(),
        }
    }

    fn dump(&self) -> String {
        let selected = self
            .editor
            .selection()
            .map(|selection| selection.object.0.to_string())
            .unwrap_or_else(|| "none".to_string());
        let snapshot = match self.editor.snapshot().to_json() {
            Ok(json) => json,
            Err(error) => format!("<unencodable: {error}>"),
        };
        format!(
            "dump editing:{} tool:{} rock:{} selected:{} gesture:{} visuals:{} level:{}",
            self.editor.is_editing(),
            self.editor.tool(),
            self.editor.rock_type(),
            selected,
            self.editor.gesture().as_token(),
            self.world.visual_count(),
            snapshot
        )
    }
}

fn ui_label(command: &UiCommand) -> String {
    match command {
        UiCommand::SetTool(name) => format!("tool {name}"),
        UiCommand::SetRockType(name) => format!("rock {name}"),
        UiCommand::DeleteSelected => "delete".to_string(),
        UiCommand::SaveLevel => "save".to_string(),
        UiCommand::LoadLevel => "load".to_string(),
        UiCommand::ToggleEditMode => "edit".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jet_engine::{MemoryStore, Vec2};
    use level_editor::{Gesture, RockType, Tool, LEVEL_STORAGE_KEY};

    fn run_script(content: &str, store: &mut MemoryStore) -> (ScriptSession, Vec<String>) {
        let lines = parse_script(content).expect("parse");
        let mut session = ScriptSession::new();
        let mut out = Vec::new();
        session.run(&lines, store, &mut out).expect("run");
        let text = String::from_utf8(out).expect("utf8");
        (session, text.lines().map(ToString::to_string).collect())
    }

    #[test]
    fn parse_script_skips_comments_and_keeps_line_numbers() {
        let lines = parse_script("# setup\n\nedit\n  tool select  \ndown 1 2.5\nup\n")
            .expect("parse");
        assert_eq!(
            lines,
            vec![
                ScriptLine {
                    line: 3,
                    command: ScriptCommand::Ui(UiCommand::ToggleEditMode),
                },
                ScriptLine {
                    line: 4,
                    command: ScriptCommand::Ui(UiCommand::SetTool("select".to_string())),
                },
                ScriptLine {
                    line: 5,
                    command: ScriptCommand::Pointer(PointerEvent::down(1.0, 2.5)),
                },
                ScriptLine {
                    line: 6,
                    command: ScriptCommand::Pointer(PointerEvent::up(0.0, 0.0)),
                },
            ]
        );
    }

    #[test]
    fn parse_script_reports_first_bad_line() {
        let error = parse_script("edit\ndown 1\n").expect_err("missing y");
        assert_eq!(error, "line 2: down expects <x> <y>");

        let error = parse_script("jump 1 2").expect_err("unknown verb");
        assert_eq!(error, "line 1: unknown command 'jump'");

        let error = parse_script("move 1 NaN").expect_err("nan");
        assert!(error.contains("invalid coordinate 'NaN'"), "{error}");

        let error = parse_script("save now").expect_err("extra arg");
        assert_eq!(error, "line 1: save takes no arguments");
    }

    #[test]
    fn session_places_drags_and_saves() {
        let mut store = MemoryStore::new();
        let script = "\
edit
tool platform
down 300 250
tool select
down 300 250
move 400 260
up
save
";
        let (session, output) = run_script(script, &mut store);
        assert_eq!(output.len(), 8);
        assert_eq!(output[5], "6: ok: move 400 260 -> dragging");
        assert_eq!(output[6], "7: ok: up 0 0 -> idle");
        assert_eq!(output[7], "8: ok: saved");

        assert_eq!(session.editor().tool(), Tool::Select);
        assert!(session.editor().objects().is_empty(), "session tears down");
        let raw = store
            .get(LEVEL_STORAGE_KEY)
            .expect("get")
            .expect("saved level");
        let snapshot = level_editor::LevelSnapshot::from_json(&raw).expect("snapshot");
        assert_eq!(snapshot.platforms.len(), 1);
        assert_eq!(snapshot.platforms[0].x, 400.0);
        assert_eq!(snapshot.platforms[0].y, 260.0);
    }

    #[test]
    fn session_reports_ignored_and_failed_commands_without_stopping() {
        let mut store = MemoryStore::new();
        let script = "\
tool lasso
rock rock3
load
delete
dump
";
        let (_, output) = run_script(script, &mut store);
        assert_eq!(output[0], "1: ignored: tool lasso");
        assert_eq!(output[1], "2: ok: rock rock3");
        assert_eq!(output[2], "3: error: no level stored under 'currentLevel'");
        assert_eq!(output[3], "4: ignored: delete");
        assert!(output[4].starts_with("5: dump editing:false tool:platform rock:rock3"));
    }

    #[test]
    fn session_load_restores_saved_rocks() {
        let mut store = MemoryStore::new();
        run_script("edit\ntool rock\nrock rock2\ndown 150 150\nsave\n", &mut store);

        let lines = parse_script("load\n").expect("parse");
        let mut session = ScriptSession::new();
        let mut out = Vec::new();
        let report = session.execute(&lines[0].command, &mut store);
        assert_eq!(report, "ok: loaded");
        let rocks: Vec<_> = session.editor.rocks().collect();
        assert_eq!(rocks.len(), 1);
        assert_eq!(rocks[0].transform.position, Vec2::new(150.0, 150.0));
        assert_eq!(
            rocks[0].kind,
            level_editor::ObjectKind::Rock {
                rock_type: RockType::Rock2
            }
        );
        assert_eq!(session.editor.gesture(), Gesture::Idle);
        session.run(&[], &mut store, &mut out).expect("teardown");
        assert_eq!(session.world.visual_count(), 0);
    }
}
