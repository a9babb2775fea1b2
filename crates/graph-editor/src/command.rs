// ------------------------------------------------------------------
// Line-oriented command language for the editor binary
// ------------------------------------------------------------------

use crate::actions::Action;
use crate::settings::SettingChange;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("'{command}' needs {expected}")]
    MissingArgument {
        command: String,
        expected: &'static str,
    },
    #[error("'{command}' takes no argument '{argument}'")]
    UnexpectedArgument { command: String, argument: String },
    #[error("invalid value '{value}' for {option}")]
    InvalidValue { option: String, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Edit(Action),
    Print,
    List,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines and `#` comments give `Ok(None)`.
    ///
    /// ```text
    /// v [name]      add vertex
    /// e <ids..>     toggle every pair of the selection
    /// t <u> <v>     toggle one edge
    /// s <ids..>     star, last id is the hub
    /// x <ids..>     clear edges among the selection
    /// d <ids..>     delete vertices
    /// set <k> <v>   precision | superscripts | max_sweeps | tolerance | zero_threshold
    /// p             print report
    /// l             list vertices and edges
    /// q             quit
    /// ```
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(None);
        };
        let args: Vec<String> = words.map(str::to_string).collect();

        let command = match head {
            "v" | "vertex" => {
                let mut args = args.into_iter();
                let name = args.next();
                if let Some(extra) = args.next() {
                    return Err(unexpected(head, extra));
                }
                Command::Edit(Action::AddVertex { name })
            }
            "e" | "complete" => Command::Edit(Action::BuildComplete {
                selection: at_least(head, args, 1, "at least one vertex")?,
            }),
            "t" | "toggle" => {
                let mut args = at_least(head, args, 2, "two vertices")?.into_iter();
                let (Some(u), Some(v)) = (args.next(), args.next()) else {
                    return Err(missing(head, "two vertices"));
                };
                if let Some(extra) = args.next() {
                    return Err(unexpected(head, extra));
                }
                Command::Edit(Action::ToggleEdge { u, v })
            }
            "s" | "star" => Command::Edit(Action::BuildStar {
                selection: at_least(head, args, 1, "at least one vertex")?,
            }),
            "x" | "clear" => Command::Edit(Action::ClearEdgesAmong {
                selection: at_least(head, args, 1, "at least one vertex")?,
            }),
            "d" | "delete" => Command::Edit(Action::RemoveVertices {
                ids: at_least(head, args, 1, "at least one vertex")?,
            }),
            "set" => {
                let mut args =
                    at_least(head, args, 2, "an option and a value")?.into_iter();
                let (Some(option), Some(value)) = (args.next(), args.next())
                else {
                    return Err(missing(head, "an option and a value"));
                };
                if let Some(extra) = args.next() {
                    return Err(unexpected(head, extra));
                }
                Command::Edit(Action::ChangeSetting(setting(&option, &value)?))
            }
            "p" | "print" => no_args(head, args, Command::Print)?,
            "l" | "list" => no_args(head, args, Command::List)?,
            "q" | "quit" => no_args(head, args, Command::Quit)?,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn setting(option: &str, value: &str) -> Result<SettingChange, CommandError> {
    let invalid = || CommandError::InvalidValue {
        option: option.to_string(),
        value: value.to_string(),
    };
    let change = match option {
        "precision" => SettingChange::Precision(value.parse().map_err(|_| invalid())?),
        "superscripts" => SettingChange::Superscripts(match value {
            "on" | "true" => true,
            "off" | "false" => false,
            _ => return Err(invalid()),
        }),
        "max_sweeps" => SettingChange::MaxSweeps(value.parse().map_err(|_| invalid())?),
        "tolerance" => SettingChange::Tolerance(value.parse().map_err(|_| invalid())?),
        "zero_threshold" => {
            SettingChange::ZeroThreshold(value.parse().map_err(|_| invalid())?)
        }
        _ => return Err(CommandError::Unknown(format!("set {}", option))),
    };
    Ok(change)
}

fn at_least(
    command: &str,
    args: Vec<String>,
    n: usize,
    expected: &'static str,
) -> Result<Vec<String>, CommandError> {
    if args.len() < n {
        return Err(missing(command, expected));
    }
    Ok(args)
}

fn no_args(
    command: &str,
    args: Vec<String>,
    parsed: Command,
) -> Result<Command, CommandError> {
    match args.into_iter().next() {
        Some(extra) => Err(unexpected(command, extra)),
        None => Ok(parsed),
    }
}

fn missing(command: &str, expected: &'static str) -> CommandError {
    CommandError::MissingArgument {
        command: command.to_string(),
        expected,
    }
}

fn unexpected(command: &str, argument: String) -> CommandError {
    CommandError::UnexpectedArgument {
        command: command.to_string(),
        argument,
    }
}
