//! `dotnet` CLI toolchain adapter.
//!
//! Every invocation runs with an explicit working directory (the solution
//! directory) and blocks until the child exits. Output is captured, logged at
//! trace level and otherwise ignored; only the exit status decides success.

use std::fmt;
use std::io;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tracing::{debug, trace};

use layerforge_core::{
    application::{ApplicationError, ports::ProjectToolchain},
    domain::{ProjectKind, Step},
    error::{LayerforgeError, LayerforgeResult},
};

/// Lines of child output kept in error messages.
const STDERR_EXCERPT_LINES: usize = 20;

/// One `dotnet` sub-command, before it is bound to a program and directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DotnetCommand<'a> {
    NewSolution { name: &'a str },
    NewProject { template: &'a str, project: &'a str },
    SolutionAdd { project: &'a str },
    AddReference { from: &'a str, to: &'a str },
    Version,
}

impl DotnetCommand<'_> {
    /// Argument vector passed to the program.
    pub fn args(&self) -> Vec<String> {
        match self {
            Self::NewSolution { name } => {
                vec!["new".into(), "sln".into(), "-n".into(), (*name).into()]
            }
            Self::NewProject { template, project } => vec![
                "new".into(),
                (*template).into(),
                "-n".into(),
                (*project).into(),
                "-o".into(),
                (*project).into(),
            ],
            Self::SolutionAdd { project } => {
                vec!["sln".into(), "add".into(), manifest_path(project)]
            }
            Self::AddReference { from, to } => vec![
                "add".into(),
                manifest_path(from),
                "reference".into(),
                manifest_path(to),
            ],
            Self::Version => vec!["--version".into()],
        }
    }
}

/// `<project>/<project>.csproj`, relative to the solution directory.
///
/// Always uses `/`; the dotnet CLI accepts it on every platform.
pub fn manifest_path(project: &str) -> String {
    format!("{project}/{project}.csproj")
}

/// Production toolchain backed by the `dotnet` executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotnetToolchain {
    program: String,
    web_api_template: String,
    class_library_template: String,
}

impl DotnetToolchain {
    pub const DEFAULT_PROGRAM: &'static str = "dotnet";
    pub const DEFAULT_WEB_API_TEMPLATE: &'static str = "webapi";
    pub const DEFAULT_CLASS_LIBRARY_TEMPLATE: &'static str = "classlib";

    pub fn new() -> Self {
        Self {
            program: Self::DEFAULT_PROGRAM.into(),
            web_api_template: Self::DEFAULT_WEB_API_TEMPLATE.into(),
            class_library_template: Self::DEFAULT_CLASS_LIBRARY_TEMPLATE.into(),
        }
    }

    /// Use a different executable (a path or a name looked up on `PATH`).
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Override the `dotnet new` template short names.
    pub fn with_templates(
        mut self,
        web_api: impl Into<String>,
        class_library: impl Into<String>,
    ) -> Self {
        self.web_api_template = web_api.into();
        self.class_library_template = class_library.into();
        self
    }

    /// Anchor a relative program path (`./bin/dotnet`) at `base`.
    ///
    /// Steps run inside the solution directory, where a relative path would
    /// no longer resolve. Bare names are left for `PATH` lookup.
    pub fn resolve_program(mut self, base: &Path) -> Self {
        let program = Path::new(&self.program);
        let has_separator =
            self.program.contains('/') || self.program.contains(std::path::MAIN_SEPARATOR);
        if has_separator && program.is_relative() {
            self.program = base.join(program).to_string_lossy().into_owned();
        }
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Check that the program can be run, returning its version string.
    ///
    /// Any failure is reported as `ToolchainUnavailable`.
    pub fn probe(&self, working_dir: &Path) -> LayerforgeResult<String> {
        let output = self
            .output(working_dir, &DotnetCommand::Version)
            .map_err(|e| self.unavailable(e.to_string()))?;

        if !output.status.success() {
            return Err(self.unavailable(format!(
                "`{} --version` exited with {}",
                self.program, output.status
            )));
        }

        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!(program = %self.program, %version, "Toolchain available");
        Ok(version)
    }

    /// Render a command as a shell-like line, for logs and errors.
    pub fn command_line(&self, command: &DotnetCommand<'_>) -> String {
        CommandLine {
            program: &self.program,
            args: &command.args(),
        }
        .to_string()
    }

    /// The command line a plan step would run, or `None` for steps that
    /// never reach the toolchain.
    pub fn describe(&self, step: &Step) -> Option<String> {
        let command = match step {
            Step::CreateDirectory { .. } => return None,
            Step::CreateSolution { name } => DotnetCommand::NewSolution { name },
            Step::CreateProject { project } => DotnetCommand::NewProject {
                template: self.template_for(project.kind),
                project: &project.name,
            },
            Step::AddToSolution { project } => DotnetCommand::SolutionAdd { project },
            Step::AddReference { from, to } => DotnetCommand::AddReference { from, to },
        };
        Some(self.command_line(&command))
    }

    fn template_for(&self, kind: ProjectKind) -> &str {
        match kind {
            ProjectKind::WebApi => &self.web_api_template,
            ProjectKind::ClassLibrary => &self.class_library_template,
        }
    }

    fn output(&self, working_dir: &Path, command: &DotnetCommand<'_>) -> io::Result<Output> {
        Command::new(&self.program)
            .args(command.args())
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .output()
    }

    fn run(&self, working_dir: &Path, command: DotnetCommand<'_>) -> LayerforgeResult<()> {
        let line = self.command_line(&command);
        debug!(cwd = %working_dir.display(), command = %line, "Running toolchain");

        let output = self.output(working_dir, &command).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                self.unavailable(e.to_string())
            } else {
                ApplicationError::CommandFailed {
                    command: line.clone(),
                    status: "failed to start".into(),
                    stderr: e.to_string(),
                }
                .into()
            }
        })?;

        trace!(
            stdout = %String::from_utf8_lossy(&output.stdout),
            stderr = %String::from_utf8_lossy(&output.stderr),
            "Toolchain output"
        );

        if output.status.success() {
            return Ok(());
        }

        let stderr = if output.stderr.iter().all(u8::is_ascii_whitespace) {
            excerpt(&String::from_utf8_lossy(&output.stdout))
        } else {
            excerpt(&String::from_utf8_lossy(&output.stderr))
        };

        Err(ApplicationError::CommandFailed {
            command: line,
            status: output.status.to_string(),
            stderr,
        }
        .into())
    }

    fn unavailable(&self, reason: String) -> LayerforgeError {
        ApplicationError::ToolchainUnavailable {
            program: self.program.clone(),
            reason,
        }
        .into()
    }
}

impl Default for DotnetToolchain {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectToolchain for DotnetToolchain {
    fn create_solution(&self, solution_dir: &Path, name: &str) -> LayerforgeResult<()> {
        self.run(solution_dir, DotnetCommand::NewSolution { name })
    }

    fn create_web_api_project(&self, solution_dir: &Path, project: &str) -> LayerforgeResult<()> {
        self.run(
            solution_dir,
            DotnetCommand::NewProject {
                template: self.template_for(ProjectKind::WebApi),
                project,
            },
        )
    }

    fn create_class_library(&self, solution_dir: &Path, project: &str) -> LayerforgeResult<()> {
        self.run(
            solution_dir,
            DotnetCommand::NewProject {
                template: self.template_for(ProjectKind::ClassLibrary),
                project,
            },
        )
    }

    fn add_to_solution(&self, solution_dir: &Path, project: &str) -> LayerforgeResult<()> {
        self.run(solution_dir, DotnetCommand::SolutionAdd { project })
    }

    fn add_reference(&self, solution_dir: &Path, from: &str, to: &str) -> LayerforgeResult<()> {
        self.run(solution_dir, DotnetCommand::AddReference { from, to })
    }
}

struct CommandLine<'a> {
    program: &'a str,
    args: &'a [String],
}

impl fmt::Display for CommandLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program)?;
        for arg in self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Last few non-empty lines of child output.
fn excerpt(text: &str) -> String {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(STDERR_EXCERPT_LINES);
    lines[start..].join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn solution_command() {
        let tc = DotnetToolchain::new();
        assert_eq!(
            tc.command_line(&DotnetCommand::NewSolution { name: "Shop" }),
            "dotnet new sln -n Shop"
        );
    }

    #[test]
    fn project_commands_use_configured_templates() {
        let tc = DotnetToolchain::new().with_templates("webapiaot", "classlib");
        let cmd = DotnetCommand::NewProject {
            template: &tc.web_api_template,
            project: "Shop.Api",
        };
        assert_eq!(
            tc.command_line(&cmd),
            "dotnet new webapiaot -n Shop.Api -o Shop.Api"
        );
    }

    #[test]
    fn solution_add_points_at_manifest() {
        let cmd = DotnetCommand::SolutionAdd {
            project: "Shop.Domain",
        };
        assert_eq!(cmd.args(), ["sln", "add", "Shop.Domain/Shop.Domain.csproj"]);
    }

    #[test]
    fn reference_command() {
        let cmd = DotnetCommand::AddReference {
            from: "Shop.Application",
            to: "Shop.Domain",
        };
        assert_eq!(
            cmd.args(),
            [
                "add",
                "Shop.Application/Shop.Application.csproj",
                "reference",
                "Shop.Domain/Shop.Domain.csproj",
            ]
        );
    }

    #[test]
    fn command_line_quotes_whitespace() {
        let tc = DotnetToolchain::new().with_program("/opt/my dotnet/dotnet");
        let line = tc.command_line(&DotnetCommand::NewSolution { name: "My Shop" });
        assert_eq!(line, "/opt/my dotnet/dotnet new sln -n \"My Shop\"");
    }

    #[test]
    fn describes_plan_steps() {
        use layerforge_core::domain::{Layer, Project};
        use std::path::PathBuf;

        let tc = DotnetToolchain::new();
        assert_eq!(
            tc.describe(&Step::CreateDirectory {
                path: PathBuf::from("Shop")
            }),
            None
        );
        assert_eq!(
            tc.describe(&Step::CreateProject {
                project: Project::new("Shop", Layer::Api)
            })
            .as_deref(),
            Some("dotnet new webapi -n Shop.Api -o Shop.Api")
        );
        assert_eq!(
            tc.describe(&Step::CreateProject {
                project: Project::new("Shop", Layer::Domain)
            })
            .as_deref(),
            Some("dotnet new classlib -n Shop.Domain -o Shop.Domain")
        );
        assert_eq!(
            tc.describe(&Step::AddReference {
                from: "Shop.Api".into(),
                to: "Shop.Application".into()
            })
            .as_deref(),
            Some("dotnet add Shop.Api/Shop.Api.csproj reference Shop.Application/Shop.Application.csproj")
        );
    }

    #[test]
    fn relative_program_is_anchored() {
        let tc = DotnetToolchain::new()
            .with_program("./tools/dotnet")
            .resolve_program(Path::new("/work"));
        assert_eq!(Path::new(tc.program()), Path::new("/work/./tools/dotnet"));
    }

    #[test]
    fn bare_and_absolute_programs_are_kept() {
        let base = Path::new("/work");
        assert_eq!(DotnetToolchain::new().resolve_program(base).program(), "dotnet");
        assert_eq!(
            DotnetToolchain::new()
                .with_program("/usr/bin/dotnet")
                .resolve_program(base)
                .program(),
            "/usr/bin/dotnet"
        );
    }

    #[cfg(unix)]
    #[test]
    fn relative_program_still_runs_inside_solution_dir() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let script = tmp.path().join("fake-dotnet");
        std::fs::write(&script, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        let solution_dir = tmp.path().join("Shop");
        std::fs::create_dir(&solution_dir).unwrap();

        let tc = DotnetToolchain::new()
            .with_program("./fake-dotnet")
            .resolve_program(tmp.path());

        tc.probe(tmp.path()).unwrap();
        tc.create_solution(&solution_dir, "Shop").unwrap();
    }

    #[test]
    fn excerpt_keeps_tail() {
        let text = (1..=30).map(|i| format!("line {i}\n")).collect::<String>();
        let tail = excerpt(&text);
        assert!(tail.starts_with("line 11"));
        assert!(tail.ends_with("line 30"));
    }

    #[test]
    fn missing_program_is_unavailable() {
        let tmp = TempDir::new().unwrap();
        let tc = DotnetToolchain::new().with_program("layerforge-no-such-toolchain");

        let err = tc.create_solution(tmp.path(), "Shop").unwrap_err();
        assert!(matches!(
            err,
            LayerforgeError::Application(ApplicationError::ToolchainUnavailable { .. })
        ));
        assert!(tc.probe(tmp.path()).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_command_failed() {
        let tmp = TempDir::new().unwrap();
        let tc = DotnetToolchain::new().with_program("false");

        let err = tc.add_to_solution(tmp.path(), "Shop.Api").unwrap_err();
        match err {
            LayerforgeError::Application(ApplicationError::CommandFailed { command, .. }) => {
                assert_eq!(command, "false sln add Shop.Api/Shop.Api.csproj");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn zero_exit_is_success() {
        let tmp = TempDir::new().unwrap();
        let tc = DotnetToolchain::new().with_program("true");
        tc.add_reference(tmp.path(), "Shop.Api", "Shop.Application")
            .unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn probe_returns_program_output() {
        let tmp = TempDir::new().unwrap();
        let version = DotnetToolchain::new()
            .with_program("echo")
            .probe(tmp.path())
            .unwrap();
        assert!(!version.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn probe_failure_is_unavailable() {
        let tmp = TempDir::new().unwrap();
        let err = DotnetToolchain::new()
            .with_program("false")
            .probe(tmp.path())
            .unwrap_err();
        assert!(matches!(
            err,
            LayerforgeError::Application(ApplicationError::ToolchainUnavailable { .. })
        ));
    }
}
