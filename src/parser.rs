//! OpenAPI document commands
//!
//! `init` downloads the Bangumi OpenAPI document, `parse` validates a local
//! copy and prints a summary, and `generate` hands the document to an external
//! client generator and installs the result.

use std::ffi::OsString;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use reqwest::Client;
use tokio::process::Command;

use crate::cli::GenerateArgs;
use crate::data::OpenApiDocument;
use crate::error::Error;

/// Where `init` saves the downloaded document
pub const SPEC_FILE: &str = "bangumi.json";

/// Timeout for the document download
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// Downloads the document at `url` and writes the bytes verbatim to `dest`
pub async fn init(out: &mut dyn Write, url: &str, dest: &Path) -> Result<(), Error> {
    writeln!(out, "Fetching swagger file from {}", url)?;

    let client = Client::builder().timeout(DOWNLOAD_TIMEOUT).build()?;
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(Error::Api {
            status_code: status.as_u16(),
            message,
        });
    }

    let bytes = response.bytes().await?;
    writeln!(
        out,
        "Successfully fetched file, status code: {}",
        status.as_u16()
    )?;

    tokio::fs::write(dest, &bytes).await?;
    tracing::debug!(path = %dest.display(), size = bytes.len(), "Wrote document");
    writeln!(out, "Swagger file saved to {}", dest.display())?;
    Ok(())
}

/// Validates the document at `file` and prints a summary
pub fn parse(out: &mut dyn Write, file: &Path) -> Result<OpenApiDocument, Error> {
    require_file(file)?;
    writeln!(out, "Parsing OpenAPI spec from {}...", file.display())?;

    let document = OpenApiDocument::load(file)?;

    writeln!(out, "Successfully parsed the OpenAPI specification.")?;
    writeln!(out, "  Title: {}", document.info.title)?;
    writeln!(out, "  Version: {}", document.info.version)?;
    writeln!(out, "  Servers: {:?}", document.server_urls())?;
    writeln!(out, "  Paths found: {}", document.paths.len())?;
    if let Some(count) = document.schema_count() {
        writeln!(out, "  Schemas found: {}", count)?;
    }
    Ok(document)
}

/// An external program invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    pub program: String,
    pub args: Vec<OsString>,
}

impl ExternalCommand {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Runs the command to completion and returns its stdout
    ///
    /// Fails with [`Error::ToolNotFound`] if the program cannot be spawned and
    /// [`Error::Subprocess`] if it exits unsuccessfully.
    pub async fn run(&self) -> Result<String, Error> {
        tracing::debug!(program = %self.program, args = ?self.args, "Running external command");

        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => Error::ToolNotFound {
                    program: self.program.clone(),
                },
                _ => Error::Io(e),
            })?;

        if !output.status.success() {
            return Err(Error::Subprocess {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Generator invocation for `args`
pub fn generator_command(args: &GenerateArgs) -> ExternalCommand {
    ExternalCommand::new(
        "openapi-python-client",
        [
            OsString::from("generate"),
            OsString::from("--path"),
            args.file.clone().into_os_string(),
            OsString::from("--config"),
            args.config.clone().into_os_string(),
            OsString::from("--output-path"),
            args.output.clone().into_os_string(),
            OsString::from("--overwrite"),
        ],
    )
}

/// Installer invocation for the generated client in `output`
pub fn installer_command(output: &Path) -> ExternalCommand {
    ExternalCommand::new(
        "uv",
        [
            OsString::from("pip"),
            OsString::from("install"),
            OsString::from("-e"),
            output.as_os_str().to_os_string(),
        ],
    )
}

/// Runs the generator then the installer, echoing each tool's stdout
pub async fn generate(out: &mut dyn Write, args: &GenerateArgs) -> Result<(), Error> {
    require_file(&args.file)?;
    require_file(&args.config)?;

    writeln!(out, "Generating client from {}...", args.file.display())?;
    writeln!(out, "Output directory: {}", args.output.display())?;
    let generator = generator_command(args);
    let installer = installer_command(&args.output);
    run_steps(out, &generator, &installer, &args.output).await
}

/// Runs `generator` then `installer`, stopping at the first failure
pub async fn run_steps(
    out: &mut dyn Write,
    generator: &ExternalCommand,
    installer: &ExternalCommand,
    output: &Path,
) -> Result<(), Error> {
    let stdout = generator.run().await?;
    write!(out, "{}", stdout)?;
    writeln!(out, "Successfully generated client in {}", output.display())?;

    writeln!(out, "Installing generated client from {}...", output.display())?;
    let stdout = installer.run().await?;
    write!(out, "{}", stdout)?;
    writeln!(out, "Generated client installed successfully.")?;
    Ok(())
}

fn require_file(path: &Path) -> Result<(), Error> {
    if path.is_file() {
        Ok(())
    } else {
        Err(Error::InvalidArgument(format!(
            "File '{}' does not exist",
            path.display()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::OneShotServer;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const DOC: &str = r#"{
        "openapi": "3.0.3",
        "info": {"title": "Bangumi API", "version": "2023-05-01"},
        "servers": [{"url": "https://api.bgm.tv"}],
        "paths": {
            "/v0/subjects/{subject_id}": {"get": {"responses": {"200": {"description": "OK"}}}},
            "/v0/search/subjects": {"post": {"responses": {"200": {"description": "OK"}}}}
        },
        "components": {"schemas": {"Subject": {"type": "object"}}}
    }"#;

    #[tokio::test]
    async fn test_init_writes_document_verbatim() {
        let server = OneShotServer::start("200 OK", DOC);
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join(SPEC_FILE);
        let url = format!("{}/openapi.json", server.url);
        let mut out: Vec<u8> = Vec::new();

        init(&mut out, &url, &dest).await.unwrap();

        assert_eq!(std::fs::read_to_string(&dest).unwrap(), DOC);
        assert!(server.request().request_line.starts_with("GET /openapi.json "));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("status code: 200"));
        assert!(text.contains("Swagger file saved to"));
    }

    #[tokio::test]
    async fn test_init_non_success_leaves_no_file() {
        let server = OneShotServer::start("404 Not Found", "missing");
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join(SPEC_FILE);
        let url = server.url.clone();
        let mut out: Vec<u8> = Vec::new();

        let err = init(&mut out, &url, &dest).await.unwrap_err();

        assert!(matches!(err, Error::Api { status_code: 404, .. }), "got {err:?}");
        assert!(!dest.exists());
        server.request();
    }

    #[test]
    fn test_parse_prints_summary() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("bangumi.json");
        std::fs::write(&file, DOC).unwrap();
        let mut out: Vec<u8> = Vec::new();

        parse(&mut out, &file).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Successfully parsed"));
        assert!(text.contains("Title: Bangumi API"));
        assert!(text.contains("Version: 2023-05-01"));
        assert!(text.contains("https://api.bgm.tv"));
        assert!(text.contains("Paths found: 2"));
        assert!(text.contains("Schemas found: 1"));
    }

    #[test]
    fn test_parse_missing_file() {
        let dir = TempDir::new().unwrap();
        let mut out: Vec<u8> = Vec::new();

        let err = parse(&mut out, &dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_parse_malformed_document() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("bad.json");
        std::fs::write(&file, r#"{"openapi": "3.0.3", "info": {}}"#).unwrap();
        let mut out: Vec<u8> = Vec::new();

        let err = parse(&mut out, &file).unwrap_err();
        assert!(matches!(err, Error::Json { .. }));
        assert!(!String::from_utf8(out).unwrap().contains("Successfully"));
    }

    #[test]
    fn test_generator_command_arguments() {
        let args = GenerateArgs {
            file: PathBuf::from("bangumi.json"),
            output: PathBuf::from("sdk"),
            config: PathBuf::from("cfg.yaml"),
        };
        let cmd = generator_command(&args);

        assert_eq!(cmd.program, "openapi-python-client");
        let rendered: Vec<String> = cmd
            .args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            rendered,
            vec![
                "generate", "--path", "bangumi.json", "--config", "cfg.yaml",
                "--output-path", "sdk", "--overwrite"
            ]
        );
    }

    #[test]
    fn test_installer_command_arguments() {
        let cmd = installer_command(Path::new("sdk"));
        assert_eq!(cmd.program, "uv");
        let expected: Vec<OsString> = ["pip", "install", "-e", "sdk"]
            .into_iter()
            .map(OsString::from)
            .collect();
        assert_eq!(cmd.args, expected);
    }

    #[tokio::test]
    async fn test_missing_tool_is_reported() {
        let cmd = ExternalCommand::new("definitely-not-a-real-tool-7f3a", Vec::<OsString>::new());
        let err = cmd.run().await.unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_steps_echoes_stdout() {
        let generator = ExternalCommand::new("sh", ["-c", "echo generated"]);
        let installer = ExternalCommand::new("sh", ["-c", "echo installed"]);
        let mut out: Vec<u8> = Vec::new();

        run_steps(&mut out, &generator, &installer, Path::new("sdk")).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("generated\n"));
        assert!(text.contains("installed\n"));
        assert!(text.contains("Generated client installed successfully."));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_steps_stops_on_generator_failure() {
        let generator = ExternalCommand::new("sh", ["-c", "echo broken spec >&2; exit 3"]);
        let installer = ExternalCommand::new("sh", ["-c", "echo installed"]);
        let mut out: Vec<u8> = Vec::new();

        let err = run_steps(&mut out, &generator, &installer, Path::new("sdk"))
            .await
            .unwrap_err();

        match err {
            Error::Subprocess { program, stderr, .. } => {
                assert_eq!(program, "sh");
                assert!(stderr.contains("broken spec"));
            }
            other => panic!("Expected subprocess error, got {other:?}"),
        }
        assert!(!String::from_utf8(out).unwrap().contains("installed"));
    }

    #[tokio::test]
    async fn test_generate_requires_config_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("bangumi.json");
        std::fs::write(&file, DOC).unwrap();
        let args = GenerateArgs {
            file,
            output: dir.path().join("sdk"),
            config: dir.path().join("missing.yaml"),
        };
        let mut out: Vec<u8> = Vec::new();

        let err = generate(&mut out, &args).await.unwrap_err();
        assert!(err.to_string().contains("missing.yaml"));
    }
}
