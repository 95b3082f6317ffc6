//! CLI Application logic
//!
//! Contains the command table and the handlers behind it.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use log::{error, info};

use slidegen_core::{Generator, Settings};

use crate::dispatch::{AppSpec, CommandSpec, DispatchError, Dispatcher, Invocation, ParamSpec};
use crate::logging;

const DESCRIPTION: &str = "\
Each entry of the configuration's \"presentation\" array describes one slide. \
Supported types are title, text, list, picture and plot.";

/// Application state shared by the command handlers
#[derive(Debug, Clone)]
pub struct App {
    working_dir: PathBuf,
}

impl App {
    /// Create an application rooted at `working_dir`
    ///
    /// Settings files are discovered in this directory.
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Print the help text
    fn print_help(&self, invocation: &Invocation) -> Result<()> {
        println!("{}", invocation.help());
        Ok(())
    }

    /// Generate a deck from a configuration file
    fn generate(&self, invocation: &Invocation) -> Result<()> {
        let config = invocation.require_path("config")?;
        let output = invocation.require_path("output")?;
        let settings = self.load_settings(invocation.get_path("settings"))?;

        generate_command(config, output, settings)
    }

    fn load_settings(&self, settings_path: Option<&Path>) -> Result<Settings> {
        match settings_path {
            Some(path) => Ok(Settings::load(path)?),
            None => {
                let (settings, found) = Settings::discover(&self.working_dir);
                if let Some(path) = found {
                    info!("Settings loaded: \"{}\"", path.display());
                }
                Ok(settings)
            }
        }
    }
}

/// Command table of the `slidegen` binary
pub fn commands() -> Vec<CommandSpec<App>> {
    vec![
        CommandSpec::new("default", "Print the help text", App::print_help).default_command(),
        CommandSpec::new(
            "generate",
            "Generate a PPTX presentation from a JSON configuration",
            App::generate,
        )
        .description(
            "Slides are built in the order they appear in the configuration. \
             Generation stops at the first slide that cannot be built and no \
             output is written.",
        )
        .param(ParamSpec::path("config", "JSON configuration file"))
        .param(ParamSpec::path("output", "Output PPTX file"))
        .param(ParamSpec::path("settings", "Settings TOML file (default: slidegen.toml)").optional()),
    ]
}

/// Build the dispatcher for `app`
pub fn dispatcher(app: App) -> Result<Dispatcher<App>, DispatchError> {
    let spec = AppSpec::new("slidegen", "Generate PPTX presentations from JSON")
        .version(env!("CARGO_PKG_VERSION"))
        .description(DESCRIPTION);
    Dispatcher::new(spec, app, commands())
}

/// Execute the generate command
///
/// Errors already name the file or slide they refer to.
pub fn generate_command(config: &Path, output: &Path, settings: Settings) -> Result<()> {
    Generator::new(settings).generate(config, output)?;
    Ok(())
}

/// Map the outcome of a command to the process exit status
///
/// Usage errors are printed as rendered by clap and exit with 2; handler
/// failures are logged and exit with 1.
pub fn exit_status(result: Result<()>) -> u8 {
    let Err(err) = result else {
        return 0;
    };

    match err.downcast_ref::<DispatchError>() {
        Some(DispatchError::Usage(e)) => {
            let _ = e.print();
            2
        }
        Some(e) if e.is_usage() => {
            eprintln!("error: {}", e);
            2
        }
        _ => {
            error!("{}", err);
            1
        }
    }
}

/// Run the `slidegen` command line
pub fn run_cli() -> Result<ExitCode> {
    logging::init(logging::LOG_FILE);

    let working_dir = std::env::current_dir().context("Cannot determine working directory")?;
    let dispatcher = dispatcher(App::new(working_dir))?;
    Ok(ExitCode::from(exit_status(dispatcher.run())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_dispatcher(dir: &Path) -> Dispatcher<App> {
        dispatcher(App::new(dir)).unwrap()
    }

    #[test]
    fn test_command_table_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        let d = test_dispatcher(dir.path());
        let help = d.help();
        assert!(help.contains("Generate PPTX presentations from JSON"));
        assert!(help.contains("generate"));
    }

    #[test]
    fn test_no_arguments_prints_help() {
        let dir = tempfile::tempdir().unwrap();
        let d = test_dispatcher(dir.path());
        assert!(d.run_from(["slidegen"]).is_ok());
        assert!(!d.help().is_empty());
    }

    #[test]
    fn test_generate_requires_config() {
        let dir = tempfile::tempdir().unwrap();
        let d = test_dispatcher(dir.path());
        let err = d
            .run_from(["slidegen", "generate", "--output", "out.pptx"])
            .unwrap_err();

        match err.downcast_ref::<DispatchError>() {
            Some(DispatchError::Usage(e)) => assert!(e.to_string().contains("--config")),
            other => panic!("Expected Usage, got {:?}", other),
        }
    }

    #[test]
    fn test_exit_codes() {
        let dir = tempfile::tempdir().unwrap();
        let d = test_dispatcher(dir.path());

        assert_eq!(exit_status(Ok(())), 0);
        assert_eq!(exit_status(d.run_from(["slidegen", "generate"])), 2);
        let unknown_flag = d.run_from([
            "slidegen", "generate", "--config", "a.json", "--output", "b.pptx", "--bogus",
        ]);
        assert_eq!(exit_status(unknown_flag), 2);
        assert_eq!(
            exit_status(Err(anyhow::anyhow!("Slide number 1 is missing a property!"))),
            1
        );
    }

    #[test]
    fn test_load_settings_default() {
        let dir = tempfile::tempdir().unwrap();
        let settings = App::new(dir.path()).load_settings(None).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_settings_discovered() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("slidegen.toml"), "[meta]\nauthor = \"Ops\"\n").unwrap();

        let settings = App::new(dir.path()).load_settings(None).unwrap();
        assert_eq!(settings.meta.author.as_deref(), Some("Ops"));
    }

    #[test]
    fn test_load_settings_explicit_missing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("other.toml");
        let err = App::new(dir.path())
            .load_settings(Some(&missing))
            .unwrap_err();
        assert!(err.to_string().contains("Settings file not found"));
    }
}
