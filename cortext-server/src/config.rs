//! Server configuration
//!
//! Every filesystem location and command the service touches lives here.
//! The struct is built once at startup and handed to handlers through the
//! router state.

use anyhow::Context;
use cortext_core::domain::step::StepCommand;
use cortext_runner::PhasePlan;
use std::path::{Path, PathBuf};

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen address (e.g., "0.0.0.0:5000")
    pub bind_addr: String,

    /// File overwritten by `POST /write`
    pub input_file: PathBuf,

    /// Artifact served by `GET /download-html`
    pub html_file: PathBuf,

    /// Working directory for both pipeline phases
    pub work_dir: PathBuf,

    /// Append-only diagnostic log
    pub log_file: PathBuf,

    /// Phase 1: the native executable
    pub native_command: StepCommand,

    /// Phase 2: the scripted sequence, in order
    pub script_steps: Vec<StepCommand>,
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Expected environment variables (all optional):
    /// - CORTEXT_BIND_ADDR (default: 0.0.0.0:5000)
    /// - CORTEXT_INPUT_FILE (default: cortext_io_input/input.txt)
    /// - CORTEXT_HTML_FILE (default: cortext_io_db/000_cortext_io.html)
    /// - CORTEXT_WORK_DIR (default: 10K_RiskFactors_PROCESS)
    /// - CORTEXT_LOG_FILE (default: api_logs.log)
    /// - CORTEXT_NATIVE_COMMAND (default: AA_cortext_io_linux/AA_cortext_io_linux_run.sh)
    /// - CORTEXT_PYTHON (default: python3)
    /// - CORTEXT_SCRIPT_STEPS (JSON array of argv arrays, overrides the default scripts)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let path = |key: &str, default: PathBuf| lookup(key).map(PathBuf::from).unwrap_or(default);

        let native_program = lookup("CORTEXT_NATIVE_COMMAND")
            .unwrap_or_else(|| defaults.native_command.program().to_string());
        let native_program = resolve_native_program(&native_program)?;

        let script_steps = match lookup("CORTEXT_SCRIPT_STEPS") {
            Some(raw) => parse_script_steps(&raw)?,
            None => {
                let python = lookup("CORTEXT_PYTHON").unwrap_or_else(|| "python3".to_string());
                default_script_steps(&python)
            }
        };

        Ok(Self {
            bind_addr: lookup("CORTEXT_BIND_ADDR").unwrap_or(defaults.bind_addr),
            input_file: path("CORTEXT_INPUT_FILE", defaults.input_file),
            html_file: path("CORTEXT_HTML_FILE", defaults.html_file),
            work_dir: path("CORTEXT_WORK_DIR", defaults.work_dir),
            log_file: path("CORTEXT_LOG_FILE", defaults.log_file),
            native_command: StepCommand::exec(native_program, Vec::<String>::new()),
            script_steps,
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bind_addr.is_empty() {
            anyhow::bail!("bind_addr cannot be empty");
        }

        for (name, path) in [
            ("input_file", &self.input_file),
            ("html_file", &self.html_file),
            ("work_dir", &self.work_dir),
            ("log_file", &self.log_file),
        ] {
            if path.as_os_str().is_empty() {
                anyhow::bail!("{} cannot be empty", name);
            }
        }

        if self.html_file.file_name().is_none() {
            anyhow::bail!("html_file must name a file");
        }

        if self.native_command.program().is_empty() {
            anyhow::bail!("native command cannot be empty");
        }

        if self.script_steps.is_empty() {
            anyhow::bail!("at least one script step is required");
        }

        if self.script_steps.iter().any(|s| s.program().is_empty()) {
            anyhow::bail!("script steps cannot have an empty program");
        }

        Ok(())
    }

    /// The plan handed to the orchestrator
    pub fn phase_plan(&self) -> PhasePlan {
        PhasePlan {
            native: self.native_command.clone(),
            scripts: self.script_steps.clone(),
            work_dir: self.work_dir.clone(),
        }
    }

    /// Suggested filename for the downloaded artifact
    pub fn download_name(&self) -> String {
        file_name_or(&self.html_file, "download.html")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".to_string(),
            input_file: PathBuf::from("cortext_io_input/input.txt"),
            html_file: PathBuf::from("cortext_io_db/000_cortext_io.html"),
            work_dir: PathBuf::from("10K_RiskFactors_PROCESS"),
            log_file: PathBuf::from("api_logs.log"),
            native_command: StepCommand::exec(
                "AA_cortext_io_linux/AA_cortext_io_linux_run.sh",
                Vec::<String>::new(),
            ),
            script_steps: default_script_steps("python3"),
        }
    }
}

/// The four analysis scripts, in the order they must run
fn default_script_steps(python: &str) -> Vec<StepCommand> {
    vec![
        StepCommand::exec(python, ["CORTEXT_TRANSFORM.py"]),
        StepCommand::exec(python, ["CORTEXT_LAYOUT_10K.py", "40"]),
        StepCommand::exec(python, ["AssociateWeb_10K.py"]),
        StepCommand::exec(python, ["StraightShooterIndex.py"]),
    ]
}

/// Parses `[["prog", "arg", ...], ...]`
fn parse_script_steps(raw: &str) -> anyhow::Result<Vec<StepCommand>> {
    let argvs: Vec<Vec<String>> =
        serde_json::from_str(raw).context("CORTEXT_SCRIPT_STEPS must be a JSON array of arrays")?;

    argvs
        .into_iter()
        .enumerate()
        .map(|(idx, argv)| {
            StepCommand::from_argv(argv)
                .ok_or_else(|| anyhow::anyhow!("CORTEXT_SCRIPT_STEPS entry {} is empty", idx))
        })
        .collect()
}

/// Pins a relative program path to the server's cwd
///
/// Relative paths resolve differently across platforms once the child has
/// its own cwd. Bare names are left alone so they are looked up on `PATH`.
fn resolve_native_program(program: &str) -> anyhow::Result<String> {
    let has_separator = program.contains('/') || program.contains(std::path::MAIN_SEPARATOR);
    if !has_separator {
        return Ok(program.to_string());
    }

    let absolute = std::path::absolute(program)
        .with_context(|| format!("Invalid CORTEXT_NATIVE_COMMAND: {}", program))?;
    Ok(absolute.to_string_lossy().to_string())
}

fn file_name_or(path: &Path, fallback: &str) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| fallback.to_string())
}
