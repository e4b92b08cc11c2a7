// src/session.rs
//! Line-oriented interactive form

use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{info, warn};

use crate::core::{FsOps, ParseService};
use crate::form::{Completion, ParseOutcome, UploadForm};
use crate::render::render_view;
use crate::types::SelectedFile;

const HELP: &str = "\
Commands:
  file <path>       select a resume (.pdf, .doc, .docx)
  jd <text>         set the job description
  jd-file <path>    read the job description from a file
  jd-clear          clear the job description
  submit            upload and parse (Ctrl-C cancels while parsing)
  show              show the results panel
  status            show the current inputs
  help              show this help
  quit              leave the session";

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    File(PathBuf),
    JobDescription(String),
    JobDescriptionFile(PathBuf),
    ClearJobDescription,
    Submit,
    Show,
    Status,
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim_start();
        // Only the separator after the command word is dropped; `jd` text is kept as typed.
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let path = rest.trim();

        let command = match word.to_lowercase().as_str() {
            "file" if !path.is_empty() => Self::File(PathBuf::from(path)),
            "jd" => Self::JobDescription(rest.to_string()),
            "jd-file" if !path.is_empty() => Self::JobDescriptionFile(PathBuf::from(path)),
            "jd-clear" => Self::ClearJobDescription,
            "submit" => Self::Submit,
            "show" => Self::Show,
            "status" => Self::Status,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            "file" | "jd-file" => anyhow::bail!("'{}' needs a path", word),
            _ => anyhow::bail!("Unknown command: {} (type 'help')", word),
        };

        Ok(command)
    }
}

/// Drive the form from `input` until `quit` or end of input
pub async fn run_session<R, W>(
    form: &mut UploadForm,
    service: Arc<dyn ParseService>,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "{}", HELP)?;
    let mut lines = input.lines();

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<SessionCommand>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{}", e)?;
                continue;
            }
        };

        match command {
            SessionCommand::File(path) => match SelectedFile::pick(&path).await {
                Ok(file) => {
                    form.select_file(file);
                    if let Some(file) = form.selected_file() {
                        writeln!(out, "Selected file: {}", file.name)?;
                    }
                }
                Err(e) => {
                    warn!("File selection failed: {:#}", e);
                    writeln!(out, "Cannot select {}: {:#}", path.display(), e)?;
                }
            },
            SessionCommand::JobDescription(text) => {
                form.set_job_description(text);
                writeln!(
                    out,
                    "Job description set ({} chars)",
                    form.job_description().chars().count()
                )?;
            }
            SessionCommand::JobDescriptionFile(path) => match FsOps::read_file_safe(&path).await {
                Ok(text) => {
                    form.set_job_description(text);
                    writeln!(
                        out,
                        "Job description loaded ({} chars)",
                        form.job_description().chars().count()
                    )?;
                }
                Err(e) => writeln!(out, "{:#}", e)?,
            },
            SessionCommand::ClearJobDescription => {
                form.set_job_description(String::new());
                writeln!(out, "Job description cleared")?;
            }
            SessionCommand::Submit => submit(form, service.clone(), out).await?,
            SessionCommand::Show => write!(out, "{}", render_view(form.view()))?,
            SessionCommand::Status => {
                match form.selected_file() {
                    Some(file) => writeln!(out, "Selected file: {}", file.name)?,
                    None => writeln!(out, "No file selected")?,
                }
                writeln!(
                    out,
                    "Job description: {} chars",
                    form.job_description().chars().count()
                )?;
            }
            SessionCommand::Help => writeln!(out, "{}", HELP)?,
            SessionCommand::Quit => break,
        }
    }

    info!("Session ended");
    Ok(())
}

async fn submit<W: Write>(
    form: &mut UploadForm,
    service: Arc<dyn ParseService>,
    out: &mut W,
) -> Result<()> {
    let Some(task) = form.submit(service) else {
        if form.is_loading() {
            writeln!(out, "Submit is disabled while a request is in flight")?;
        } else {
            writeln!(out, "Submit is disabled: select a file first")?;
        }
        return Ok(());
    };

    write!(out, "{}", render_view(form.view()))?;
    out.flush()?;

    let request_id = task.request_id();
    let abort = task.abort_handle();
    let completion = tokio::select! {
        completion = task.outcome() => completion,
        _ = tokio::signal::ctrl_c() => {
            abort.abort();
            Completion { request_id, outcome: ParseOutcome::Cancelled }
        }
    };

    form.complete(completion);
    write!(out, "{}", render_view(form.view()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::form::tests::{jane_doe_scored, ScriptedService};
    use crate::form::ViewState;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "file /tmp/resume.pdf".parse::<SessionCommand>().unwrap(),
            SessionCommand::File(PathBuf::from("/tmp/resume.pdf"))
        );
        assert_eq!(
            "jd   Senior Rust engineer ".parse::<SessionCommand>().unwrap(),
            SessionCommand::JobDescription("  Senior Rust engineer ".to_string())
        );
        assert_eq!(
            "jd".parse::<SessionCommand>().unwrap(),
            SessionCommand::JobDescription(String::new())
        );
        assert_eq!("SUBMIT".parse::<SessionCommand>().unwrap(), SessionCommand::Submit);
        assert_eq!("exit".parse::<SessionCommand>().unwrap(), SessionCommand::Quit);
        assert!("file".parse::<SessionCommand>().is_err());
        assert!("upload now".parse::<SessionCommand>().is_err());
    }

    #[test]
    fn test_job_description_text_is_kept_verbatim() {
        let line = "jd Rust,  Tokio\tand SQL  ";
        assert_eq!(
            line.parse::<SessionCommand>().unwrap(),
            SessionCommand::JobDescription("Rust,  Tokio\tand SQL  ".to_string())
        );
        assert_eq!(
            "  file   /tmp/resume.pdf  ".parse::<SessionCommand>().unwrap(),
            SessionCommand::File(PathBuf::from("/tmp/resume.pdf"))
        );
        assert_eq!("status  ".parse::<SessionCommand>().unwrap(), SessionCommand::Status);
    }

    async fn run(script: &str, service: Arc<ScriptedService>) -> (UploadForm, String) {
        let mut form = UploadForm::new();
        let mut out = Vec::new();
        run_session(&mut form, service, script.as_bytes(), &mut out)
            .await
            .unwrap();
        (form, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_submit_without_file_is_disabled() {
        let service = Arc::new(ScriptedService::new(vec![]));
        let (form, out) = run("submit\nquit\n", service.clone()).await;

        assert!(out.contains("Submit is disabled: select a file first"));
        assert_eq!(form.view(), &ViewState::Idle);
        assert_eq!(service.calls(), 0);
    }

    #[tokio::test]
    async fn test_session_parses_and_recovers_after_error() {
        let dir = tempfile::tempdir().unwrap();
        let resume = dir.path().join("resume.pdf");
        std::fs::write(&resume, b"%PDF-1.4").unwrap();

        let service = Arc::new(ScriptedService::new(vec![
            Err(ServiceError::Rejected {
                status: 400,
                message: "Unsupported file type".to_string(),
            }),
            Ok(jane_doe_scored()),
        ]));
        let script = format!(
            "file {}\njd SQL and Python\nsubmit\nsubmit\nshow\nquit\n",
            resume.display()
        );
        let (form, out) = run(&script, service.clone()).await;

        assert!(out.contains("Selected file: resume.pdf"));
        assert!(out.contains("Parsing resume..."));
        assert!(out.contains("Unsupported file type"));
        assert!(out.contains("Your resume scored 82 out of 100."));
        assert_eq!(form.view(), &ViewState::Parsed(jane_doe_scored()));
        assert_eq!(service.calls(), 2);

        let sent = service.last_submission.lock().unwrap().clone().unwrap();
        assert_eq!(sent.job_description, "SQL and Python");
    }

    #[tokio::test]
    async fn test_selecting_unsupported_file_keeps_form() {
        let dir = tempfile::tempdir().unwrap();
        let notes = dir.path().join("notes.txt");
        std::fs::write(&notes, "hello").unwrap();

        let service = Arc::new(ScriptedService::new(vec![]));
        let (form, out) = run(&format!("file {}\n", notes.display()), service).await;

        assert!(out.contains("Cannot select"));
        assert!(form.selected_file().is_none());
    }

    #[tokio::test]
    async fn test_unknown_command_reports_and_continues() {
        let service = Arc::new(ScriptedService::new(vec![]));
        let (_, out) = run("dance\nstatus\n", service).await;

        assert!(out.contains("Unknown command: dance"));
        assert!(out.contains("No file selected"));
    }
}
