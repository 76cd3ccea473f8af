mod cli;

use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use dropzone_app::config::{log_destination, parse_level};
use dropzone_app::render::progress_line;
use dropzone_app::{
    candidates_from_paths, render_blocks, render_view, AppConfig, EffectRunner, FilePicker,
    PathPicker, Session,
};
use dropzone_core::{normalize, AppViewModel, Msg, Phase};
use serde_json::Value;

use cli::{Cli, Commands, OutputFormat, UploadArgs};

/// Exit status when the wait deadline passes with the upload still running.
const EXIT_STILL_UPLOADING: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    dropzone_logging::initialize(
        log_destination(cli.log, cli.log_file.clone()),
        parse_level(&cli.log_level),
    );

    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Upload { files, upload } => {
            let candidates = candidates_from_paths(&files, upload.media_type.as_deref())?;
            run_session(&upload, Msg::FilesDropped(candidates))
        }
        Commands::Select { file, upload } => {
            let picker = PathPicker::new(file, upload.media_type.clone());
            let candidate = picker.pick()?;
            run_session(&upload, Msg::FilePicked(candidate))
        }
        Commands::Render { payload, format } => {
            let payload = read_payload(&payload)?;
            let blocks = normalize(&payload);
            match format {
                OutputFormat::Text => print!("{}", render_blocks(&blocks)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&blocks)?),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_session(args: &UploadArgs, msg: Msg) -> Result<ExitCode> {
    let config = AppConfig::new(
        &args.endpoint,
        args.connect_timeout_ms,
        args.request_timeout_ms,
        args.wait_secs,
    )?;
    let runner = EffectRunner::new(config.upload.clone()).context("starting upload engine")?;
    let mut session = Session::new(runner);
    let text = args.format == OutputFormat::Text;

    let mut last_progress = None;
    let mut show_progress = |view: &AppViewModel| {
        if !text {
            return;
        }
        let line = progress_line(view);
        if line.is_some() && line != last_progress {
            if let Some(line) = &line {
                eprintln!("{line}");
            }
            last_progress = line;
        }
    };

    if let Some(view) = session.dispatch(msg) {
        show_progress(&view);
    }
    let settled = session.wait_settled(config.wait, &mut show_progress);

    let view = session.view();
    match args.format {
        OutputFormat::Text => print!("{}", render_view(&view)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
    }

    if !settled {
        eprintln!("upload still in progress, stopped waiting");
        return Ok(ExitCode::from(EXIT_STILL_UPLOADING));
    }
    Ok(match view.phase {
        Phase::Failed => ExitCode::FAILURE,
        Phase::Idle | Phase::Uploading | Phase::Succeeded => ExitCode::SUCCESS,
    })
}

fn read_payload(path: &Path) -> Result<Value> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("reading payload from stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
    };
    serde_json::from_str(&raw).context("payload is not valid JSON")
}
