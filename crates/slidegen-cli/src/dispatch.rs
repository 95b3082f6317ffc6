//! Declarative command dispatcher
//!
//! The argument grammar is derived from a table of [`CommandSpec`] entries
//! instead of a derive-based parser, so every command carries its own
//! documentation and handler. The table is turned into a `clap::Command`
//! tree once, when the [`Dispatcher`] is built.
//!
//! ```rust,ignore
//! let commands = vec![
//!     CommandSpec::new("default", "Print usage", Tool::usage).default_command(),
//!     CommandSpec::new("convert_file", "Convert one file", Tool::convert)
//!         .param(ParamSpec::path("input", "File to convert"))
//!         .param(ParamSpec::flag("dry_run", "Only report what would change")),
//! ];
//! let dispatcher = Dispatcher::new(AppSpec::new("tool", "Converts files"), Tool, commands)?;
//! dispatcher.run()?; // tool convert-file --input a.txt --dry-run
//! ```

use std::collections::HashMap;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use clap::error::ErrorKind;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use thiserror::Error;

/// Handler invoked with the application state and the parsed arguments
pub type Handler<H> = fn(&H, &Invocation) -> anyhow::Result<()>;

/// Errors raised while building the dispatcher or parsing a command line
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Application or command has no summary
    #[error("\"{0}\" has no summary")]
    MissingDocumentation(String),

    /// More than one command is marked as default
    #[error("Both \"{first}\" and \"{second}\" are marked as the default command")]
    DuplicateDefault { first: String, second: String },

    /// Two commands share a command-line name
    #[error("Command \"{0}\" is declared twice")]
    DuplicateCommand(String),

    /// A flag value could not be converted to the declared type
    #[error("invalid value '{value}' for '--{flag}': expected {expected}")]
    InvalidArgument {
        flag: String,
        value: String,
        expected: &'static str,
    },

    /// No command matched and no default command is declared
    #[error("No command given and no default command declared{}", .0.as_deref().map(|c| format!(" (got \"{}\")", c)).unwrap_or_default())]
    UnknownCommand(Option<String>),

    /// Malformed command line, already rendered by clap
    #[error("{0}")]
    Usage(#[from] clap::Error),
}

impl DispatchError {
    /// Check if the error was caused by the command line rather than by
    /// the command table
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            DispatchError::InvalidArgument { .. }
                | DispatchError::UnknownCommand(_)
                | DispatchError::Usage(_)
        )
    }
}

/// Program-level documentation
#[derive(Debug, Clone)]
pub struct AppSpec {
    pub name: String,
    pub version: String,
    pub summary: String,
    pub description: String,
}

impl AppSpec {
    pub fn new(name: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: String::new(),
            summary: summary.into(),
            description: String::new(),
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Parameter types understood by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Presence flag, false when absent
    Bool,
    Str,
    Path,
    Int,
    Float,
}

impl ParamKind {
    /// Placeholder shown in help; flags take no value
    fn value_name(self) -> Option<&'static str> {
        match self {
            ParamKind::Bool => None,
            ParamKind::Str => Some("TEXT"),
            ParamKind::Path => Some("PATH"),
            ParamKind::Int => Some("INTEGER"),
            ParamKind::Float => Some("NUMBER"),
        }
    }

    /// Read the value of parameter `name` from parsed matches
    ///
    /// Flags always yield a value; other kinds yield `None` when absent.
    fn read(self, matches: &ArgMatches, name: &str) -> Result<Option<Value>, DispatchError> {
        // Value kinds are stored as String; flags as bool
        let raw = || matches.get_one::<String>(name);

        let value = match self {
            ParamKind::Bool => Some(Value::Bool(matches.get_flag(name))),
            ParamKind::Str => raw().map(|r| Value::Str(r.clone())),
            ParamKind::Path => raw().map(|r| Value::Path(PathBuf::from(r))),
            ParamKind::Int => raw().map(|r| parse_int(name, r)).transpose()?,
            ParamKind::Float => raw().map(|r| parse_float(name, r)).transpose()?,
        };
        Ok(value)
    }
}

fn invalid_argument(name: &str, value: &str, expected: &'static str) -> DispatchError {
    DispatchError::InvalidArgument {
        flag: cli_name(name),
        value: value.to_string(),
        expected,
    }
}

fn parse_int(name: &str, raw: &str) -> Result<Value, DispatchError> {
    raw.parse::<i64>()
        .map(Value::Int)
        .map_err(|_| invalid_argument(name, raw, "an integer"))
}

fn parse_float(name: &str, raw: &str) -> Result<Value, DispatchError> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Value::Float)
        .ok_or_else(|| invalid_argument(name, raw, "a number"))
}

/// Parsed parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Str(String),
    Path(PathBuf),
    Int(i64),
    Float(f64),
}

/// One command-line parameter (`--name <VALUE>`)
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
    pub help: String,
    pub required: bool,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>, kind: ParamKind, help: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            help: help.into(),
            required: kind != ParamKind::Bool,
        }
    }

    pub fn flag(name: impl Into<String>, help: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Bool, help)
    }

    pub fn string(name: impl Into<String>, help: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Str, help)
    }

    pub fn path(name: impl Into<String>, help: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Path, help)
    }

    pub fn int(name: impl Into<String>, help: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Int, help)
    }

    pub fn float(name: impl Into<String>, help: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Float, help)
    }

    /// Make a value parameter optional
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    fn to_arg(&self) -> Arg {
        let arg = Arg::new(self.name.clone())
            .long(cli_name(&self.name))
            .help(self.help.clone());

        match self.kind.value_name() {
            None => arg.action(ArgAction::SetTrue),
            Some(value_name) => arg
                .action(ArgAction::Set)
                .required(self.required)
                .value_name(value_name)
                .value_parser(value_parser!(String)),
        }
    }
}

/// One command of the table
pub struct CommandSpec<H> {
    pub name: String,
    pub summary: String,
    pub description: String,
    pub params: Vec<ParamSpec>,
    pub handler: Handler<H>,
    pub is_default: bool,
}

impl<H> CommandSpec<H> {
    pub fn new(name: impl Into<String>, summary: impl Into<String>, handler: Handler<H>) -> Self {
        Self {
            name: name.into(),
            summary: summary.into(),
            description: String::new(),
            params: Vec::new(),
            handler,
            is_default: false,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Run this command when no subcommand is given
    pub fn default_command(mut self) -> Self {
        self.is_default = true;
        self
    }

    fn to_command(&self) -> Command {
        let mut command = Command::new(cli_name(&self.name))
            .about(self.summary.clone())
            .long_about(help_text(&self.summary, &self.description));
        for param in &self.params {
            command = command.arg(param.to_arg());
        }
        command
    }
}

impl<H> fmt::Debug for CommandSpec<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("is_default", &self.is_default)
            .finish()
    }
}

/// Arguments handed to a command handler
#[derive(Debug, Clone)]
pub struct Invocation {
    command: String,
    values: HashMap<String, Value>,
    help: String,
}

impl Invocation {
    /// Declared name of the command being run
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Rendered help of the whole program
    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(Value::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn get_path(&self, name: &str) -> Option<&Path> {
        match self.values.get(name) {
            Some(Value::Path(p)) => Some(p),
            _ => None,
        }
    }

    pub fn get_bool(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(Value::Bool(true)))
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        match self.values.get(name) {
            Some(Value::Int(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_float(&self, name: &str) -> Option<f64> {
        match self.values.get(name) {
            Some(Value::Float(v)) => Some(*v),
            _ => None,
        }
    }

    /// Path value of a required parameter
    pub fn require_path(&self, name: &str) -> anyhow::Result<&Path> {
        self.get_path(name)
            .ok_or_else(|| anyhow::anyhow!("Missing value for --{}", cli_name(name)))
    }
}

/// Table-driven command dispatcher
pub struct Dispatcher<H> {
    handler: H,
    commands: Vec<CommandSpec<H>>,
    default: Option<usize>,
    command: Command,
}

impl<H> Dispatcher<H> {
    /// Validate the command table and build the argument grammar
    pub fn new(
        app: AppSpec,
        handler: H,
        commands: Vec<CommandSpec<H>>,
    ) -> Result<Self, DispatchError> {
        if app.summary.trim().is_empty() {
            return Err(DispatchError::MissingDocumentation(app.name));
        }

        let mut default: Option<usize> = None;
        let mut seen: Vec<String> = Vec::new();
        for (i, spec) in commands.iter().enumerate() {
            if spec.summary.trim().is_empty() {
                return Err(DispatchError::MissingDocumentation(spec.name.clone()));
            }
            if spec.is_default {
                if let Some(first) = default {
                    return Err(DispatchError::DuplicateDefault {
                        first: commands[first].name.clone(),
                        second: spec.name.clone(),
                    });
                }
                default = Some(i);
            }
            let name = cli_name(&spec.name);
            if seen.contains(&name) {
                return Err(DispatchError::DuplicateCommand(name));
            }
            seen.push(name);
        }

        let mut command = Command::new(app.name.clone())
            .about(app.summary.clone())
            .long_about(help_text(&app.summary, &app.description));
        if !app.version.is_empty() {
            command = command.version(app.version.clone());
        }
        for spec in commands.iter().filter(|c| !c.is_default) {
            command = command.subcommand(spec.to_command());
        }

        Ok(Self {
            handler,
            commands,
            default,
            command,
        })
    }

    /// Rendered help of the whole program
    pub fn help(&self) -> String {
        self.command.clone().render_long_help().to_string()
    }

    /// Application state shared by the handlers
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Parse the process arguments and run the selected command
    pub fn run(&self) -> anyhow::Result<()> {
        self.run_from(std::env::args_os())
    }

    /// Parse `args` (program name first) and run the selected command
    pub fn run_from<I, T>(&self, args: I) -> anyhow::Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = match self.command.clone().try_get_matches_from(args) {
            Ok(matches) => matches,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                e.print()?;
                return Ok(());
            }
            Err(e) => return Err(DispatchError::Usage(e).into()),
        };

        let (spec, invocation) = self.resolve(&matches)?;
        log::debug!("Running command {}", spec.name);
        (spec.handler)(&self.handler, &invocation)
    }

    fn resolve(&self, matches: &ArgMatches) -> Result<(&CommandSpec<H>, Invocation), DispatchError> {
        let (spec, sub) = match matches.subcommand() {
            Some((name, sub)) => {
                let spec = self
                    .commands
                    .iter()
                    .find(|c| !c.is_default && cli_name(&c.name) == name)
                    .ok_or_else(|| DispatchError::UnknownCommand(Some(name.to_string())))?;
                (spec, Some(sub))
            }
            None => {
                let index = self.default.ok_or(DispatchError::UnknownCommand(None))?;
                (&self.commands[index], None)
            }
        };

        let mut values = HashMap::new();
        if let Some(sub) = sub {
            for param in &spec.params {
                if let Some(value) = param.kind.read(sub, &param.name)? {
                    values.insert(param.name.clone(), value);
                }
            }
        }

        Ok((
            spec,
            Invocation {
                command: spec.name.clone(),
                values,
                help: self.help(),
            },
        ))
    }
}

/// Command-line spelling of a declared name
pub fn cli_name(name: &str) -> String {
    name.replace('_', "-")
}

fn help_text(summary: &str, description: &str) -> String {
    if description.trim().is_empty() {
        summary.to_string()
    } else {
        format!("{}\n\n{}", summary, description)
    }
}
