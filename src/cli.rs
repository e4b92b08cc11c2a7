// src/cli.rs
use anyhow::Result;
use chrono::Datelike;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use crate::core::{ConfigManager, ConfigOverrides, FsOps, ParseService, ServiceClient};
use crate::form::{UploadForm, ViewState};
use crate::render::{render_footer, render_header, render_view};
use crate::session::run_session;
use crate::types::SelectedFile;

#[derive(Parser)]
#[command(name = "resparser")]
#[command(about = "Upload a resume to the parsing service and review its ATS score")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Base URL of the parsing service
    #[arg(long, global = true, env = "RESPARSER_SERVICE_URL")]
    pub service_url: Option<String>,

    /// YAML config file (defaults to ./config.yaml when present)
    #[arg(long, global = true, env = "RESPARSER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds; no timeout when unset
    #[arg(long, global = true, env = "RESPARSER_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// JSON log file
    #[arg(long, global = true, env = "RESPARSER_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Upload one resume and print the results
    Parse {
        /// Resume to upload (.pdf, .doc, .docx)
        #[arg(long, short)]
        file: PathBuf,
        /// Job description text to score against
        #[arg(long, short, conflicts_with = "job_description_file")]
        job_description: Option<String>,
        /// Read the job description from a file
        #[arg(long)]
        job_description_file: Option<PathBuf>,
        /// Print the raw parse result as JSON
        #[arg(long)]
        json: bool,
        /// Also write the raw parse result to this file
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Fill in the form interactively
    Session,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config_path: self.config.clone(),
            service_url: self.service_url.clone(),
            timeout_seconds: self.timeout_secs,
            log_path: self.log_file.clone(),
        }
    }
}

/// Run a command; returns false when the form ended in an error state
pub async fn handle_command(command: Command, config: &ConfigManager) -> Result<bool> {
    let service: Arc<dyn ParseService> = Arc::new(ServiceClient::new(
        &config.service.url,
        config.service.timeout_seconds,
    )?);

    match command {
        Command::Parse {
            file,
            job_description,
            job_description_file,
            json,
            save,
        } => {
            let mut form = UploadForm::new();
            form.select_file(SelectedFile::pick(&file).await?);

            if let Some(text) = job_description {
                form.set_job_description(text);
            } else if let Some(path) = job_description_file {
                form.set_job_description(FsOps::read_file_safe(&path).await?);
            }

            if !json {
                println!("{}", render_header(&form));
            }

            form.submit_and_wait(service).await;

            if let (Some(path), ViewState::Parsed(result)) = (&save, form.view()) {
                FsOps::write_file_safe(path, &result.to_pretty_json()).await?;
            }

            match (json, form.view()) {
                (true, ViewState::Parsed(result)) => println!("{}", result.to_pretty_json()),
                (true, view) => print!("{}", render_view(view)),
                (false, view) => {
                    print!("{}", render_view(view));
                    println!();
                    print!("{}", render_footer(chrono::Local::now().year()));
                }
            }

            let ok = !matches!(form.view(), ViewState::Failed(_));
            if ok {
                info!("Parse command finished");
            } else {
                error!("Parse command finished with an error");
            }
            Ok(ok)
        }

        Command::Session => {
            let mut form = UploadForm::new();
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            run_session(&mut form, service, stdin, &mut stdout).await?;
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::try_parse_from([
            "resparser",
            "parse",
            "--file",
            "resume.pdf",
            "-j",
            "Rust developer",
            "--service-url",
            "http://parser:9000",
        ])
        .unwrap();

        assert_eq!(
            cli.overrides().service_url.as_deref(),
            Some("http://parser:9000")
        );
        match cli.command {
            Command::Parse {
                file,
                job_description,
                json,
                ..
            } => {
                assert_eq!(file, PathBuf::from("resume.pdf"));
                assert_eq!(job_description.as_deref(), Some("Rust developer"));
                assert!(!json);
            }
            Command::Session => panic!("expected parse"),
        }
    }

    #[test]
    fn test_job_description_sources_conflict() {
        let result = Cli::try_parse_from([
            "resparser",
            "parse",
            "-f",
            "resume.pdf",
            "-j",
            "text",
            "--job-description-file",
            "jd.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_file_is_required() {
        assert!(Cli::try_parse_from(["resparser", "parse"]).is_err());
    }
}
