use anyhow::{bail, Context};
use clap::Parser;
use std::io;
use std::path::Path;
use uuid::Uuid;

mod cli;
mod config;
mod context;
mod dispatch;
mod errors;
mod export;
mod generate;
mod guide;
mod log;
mod prompt;
mod provider;
mod session;
mod shell;
mod ux;
mod wire;

use crate::cli::{Command, ExportArgs};
use crate::dispatch::Dispatcher;
use crate::errors::GenerationError;
use crate::ux::results::{self, Expand, ResultSet};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    log::init(args.debug);

    let base = match &args.config {
        Some(path) => config::Config::load(Path::new(path))?,
        None => config::Config::default(),
    };
    let cfg = args.apply_to(base);
    tracing::debug!(model = %cfg.model, api_base = %cfg.api_base, "configuration loaded");

    let mut stdout = io::stdout();
    match args.command {
        None | Some(Command::Shell) => shell::run_stdio(cfg, args.debug).await,
        Some(Command::Guide) => Ok(ux::reference::render_guide(&mut stdout)?),
        Some(Command::Templates { name }) => {
            Ok(ux::reference::render_templates(&mut stdout, name.as_deref())?)
        }
        Some(Command::Ideas(e)) => run_job(&cfg, args.debug, Job::Ideas, &e).await,
        Some(Command::Generate(g)) => {
            run_job(&cfg, args.debug, Job::Prompts(g.to_form()), &g.export).await
        }
        Some(Command::Refine(r)) => {
            run_job(&cfg, args.debug, Job::Refinement(r.to_form()?), &r.export).await
        }
    }
}

/// A single generation run outside the shell.
enum Job {
    Ideas,
    Prompts(context::ProjectForm),
    Refinement(context::RefinementForm),
}

impl Job {
    fn name(&self) -> &'static str {
        match self {
            Job::Ideas => "ideas",
            Job::Prompts(_) => "prompts",
            Job::Refinement(_) => "refinement",
        }
    }
}

async fn run_job(
    cfg: &config::Config,
    debug: bool,
    job: Job,
    export: &ExportArgs,
) -> anyhow::Result<()> {
    let Some(provider) = provider::make_provider(cfg, debug) else {
        ux::reference::render_getting_started(&mut io::stdout())?;
        bail!("no API key configured; pass --api-key or set api_key in the config file");
    };
    let exchanges = log::ExchangeLog::from_config(cfg, Uuid::new_v4());
    let d = Dispatcher::new(&*provider, cfg.model.clone()).with_exchange_log(exchanges.as_ref());

    let pb = ux::busy(&format!("Generating {}...", job.name()));
    let outcome = match &job {
        Job::Ideas => generate::ideas(&d).await,
        Job::Prompts(form) => generate::prompts(&d, form).await,
        Job::Refinement(form) => generate::refinement(&d, form).await,
    };
    pb.finish_and_clear();
    finish(cfg, job.name(), outcome, export)
}

fn finish(
    cfg: &config::Config,
    what: &str,
    outcome: Result<ResultSet, GenerationError>,
    export: &ExportArgs,
) -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    let set = match outcome {
        Ok(set) => set,
        Err(e) => {
            ux::report_error(&mut stdout, what, &e)?;
            bail!("{what} failed ({})", e.kind());
        }
    };
    results::render_results(&mut stdout, &set, Expand::All)?;

    if export.export {
        let dir = Path::new(&cfg.export_dir);
        for i in 0..set.len() {
            let Some(text) = set.primary_text(i) else { continue };
            let path = export::export_text(dir, &set.file_name(i), &text)
                .with_context(|| format!("exporting section {}", i + 1))?;
            ux::success(&mut stdout, &format!("Downloaded to {}", path.display()))?;
        }
    }
    Ok(())
}
