use anyhow::Result;
use colored::Colorize;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;

use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::errors::GenerationError;
use crate::export;
use crate::generate;
use crate::log::ExchangeLog;
use crate::provider::{self, DynProvider};
use crate::session::{LevelFilter, RecordId, SessionState};
use crate::ux::forms;
use crate::ux::reference;
use crate::ux::results::{self, Expand, ResultSet};
use crate::ux::{self, Prompter};
use crate::wire::PromptLevel;

mod readline;

pub use readline::{CommandLine, ReadlineCommands};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavedCommand {
    List(LevelFilter),
    Show(usize),
    Delete(usize),
    Download(usize),
    Base(usize),
}

/// One line of shell input. Section numbers are stored 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Help,
    Guide,
    Templates(Option<String>),
    Key(Option<String>),
    Level(PromptLevel),
    Status,
    Ideas,
    Generate,
    Refine,
    Results,
    Show(usize),
    Save(usize),
    Download(usize),
    Base(usize),
    Saved(SavedCommand),
    Quit,
    Empty,
}

const HELP: &str = "\
Sections:
  guide                      Stitch prompt guide
  templates [name]           idea templates
  ideas                      generate 3 UI ideas
  generate                   build Stitch prompts from a project form
  refine                     build a refinement prompt for one screen
  saved [all|high-level|detailed|refinement]
                             list saved prompts
Results of the last generation:
  results | show N | save N | download N | base N
Saved prompts (numbers refer to the last listing):
  saved show N | saved delete N | saved download N | saved base N
Session:
  key [API_KEY]   level high-level|detailed   status   help   quit";

fn position(arg: Option<&str>) -> Result<usize, String> {
    let raw = arg.ok_or_else(|| "missing section number".to_string())?;
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("not a section number: {raw}")),
    }
}

pub fn parse(line: &str) -> Result<ShellCommand, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else { return Ok(ShellCommand::Empty) };
    let rest: Vec<&str> = words.collect();
    let arg = rest.first().copied();

    let cmd = match head.to_lowercase().as_str() {
        "help" | "?" => ShellCommand::Help,
        "guide" => ShellCommand::Guide,
        "templates" => ShellCommand::Templates((!rest.is_empty()).then(|| rest.join(" "))),
        "key" => ShellCommand::Key(arg.map(str::to_string)),
        "level" => {
            let level = arg
                .and_then(PromptLevel::parse)
                .ok_or_else(|| "usage: level high-level|detailed".to_string())?;
            ShellCommand::Level(level)
        }
        "status" => ShellCommand::Status,
        "ideas" => ShellCommand::Ideas,
        "generate" | "gen" => ShellCommand::Generate,
        "refine" => ShellCommand::Refine,
        "results" => ShellCommand::Results,
        "show" => ShellCommand::Show(position(arg)?),
        "save" => ShellCommand::Save(position(arg)?),
        "download" => ShellCommand::Download(position(arg)?),
        "base" => ShellCommand::Base(position(arg)?),
        "saved" => {
            let sub = match arg {
                Some("show") => SavedCommand::Show(position(rest.get(1).copied())?),
                Some("delete") => SavedCommand::Delete(position(rest.get(1).copied())?),
                Some("download") => SavedCommand::Download(position(rest.get(1).copied())?),
                Some("base") => SavedCommand::Base(position(rest.get(1).copied())?),
                other => SavedCommand::List(
                    LevelFilter::parse(other.unwrap_or("all"))
                        .ok_or_else(|| format!("unknown filter: {}", rest.join(" ")))?,
                ),
            };
            ShellCommand::Saved(sub)
        }
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("unknown command: {other} (try `help`)")),
    };
    Ok(cmd)
}

/// Interactive session: owns the session state, the last results and the
/// last saved-prompt listing.
pub struct Shell<R, W> {
    cfg: Config,
    debug: bool,
    prompter: Prompter<R, W>,
    session: SessionState,
    provider: Option<DynProvider>,
    exchanges: Option<ExchangeLog>,
    last_results: Option<ResultSet>,
    last_filter: LevelFilter,
    last_view: Option<Vec<RecordId>>,
    line_editor: Option<Box<dyn CommandLine>>,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(
        cfg: Config,
        prompter: Prompter<R, W>,
        provider: Option<DynProvider>,
        debug: bool,
    ) -> Self {
        let session = SessionState::new();
        let exchanges = ExchangeLog::from_config(&cfg, session.id());
        if let Some(log) = &exchanges {
            tracing::info!(dir = %log.dir().display(), "saving exchanges");
        }
        Self {
            cfg,
            debug,
            prompter,
            session,
            provider,
            exchanges,
            last_results: None,
            last_filter: LevelFilter::All,
            last_view: None,
            line_editor: None,
        }
    }

    /// Read shell commands through `editor` instead of the prompter.
    pub fn with_line_editor(mut self, editor: Box<dyn CommandLine>) -> Self {
        self.line_editor = Some(editor);
        self
    }

    #[cfg(test)]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn output(&mut self) -> &mut W {
        self.prompter.out()
    }

    pub async fn run(&mut self) -> Result<()> {
        writeln!(self.prompter.out(), "{}", "Stitch UI Prompt Generator".bold())?;
        writeln!(
            self.prompter.out(),
            "Generate effective prompts for building user interfaces with Stitch AI. \
             Type `help` for commands."
        )?;
        if self.provider.is_none() {
            reference::render_getting_started(self.prompter.out())?;
        }
        tracing::info!(session = %self.session.id(), "session started");

        loop {
            let Some(line) = self.next_line()? else { break };
            match parse(&line) {
                Ok(ShellCommand::Quit) => {
                    if self.confirm_quit()? {
                        break;
                    }
                }
                Ok(cmd) => self.execute(cmd).await?,
                Err(msg) => writeln!(self.prompter.out(), "{}", msg.yellow())?,
            }
        }
        let saved = self.session.saved_prompts().len();
        tracing::info!(session = %self.session.id(), saved, "session ended");
        Ok(())
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        if let Some(editor) = self.line_editor.as_mut() {
            return editor.read("stitch> ");
        }
        write!(self.output(), "\n{} ", "stitch>".cyan().bold())?;
        self.output().flush()?;
        Ok(self.prompter.read_line()?)
    }

    fn confirm_quit(&mut self) -> io::Result<bool> {
        if self.session.saved_prompts().is_empty() {
            return Ok(true);
        }
        let n = self.session.saved_prompts().len();
        self.prompter
            .confirm(&format!("{n} saved prompt(s) are kept only for this session. Quit?"))
    }

    pub async fn execute(&mut self, cmd: ShellCommand) -> Result<()> {
        match cmd {
            ShellCommand::Empty | ShellCommand::Quit => {}
            ShellCommand::Help => writeln!(self.output(), "{HELP}")?,
            ShellCommand::Guide => reference::render_guide(self.prompter.out())?,
            ShellCommand::Templates(name) => {
                reference::render_templates(self.prompter.out(), name.as_deref())?
            }
            ShellCommand::Key(key) => self.set_key(key)?,
            ShellCommand::Level(level) => {
                self.session.set_current_level(level);
                ux::success(self.prompter.out(), &format!("prompt level set to {level}"))?;
            }
            ShellCommand::Status => {
                let level = self.session.current_level();
                let base = self.session.base_prompt();
                results::render_session_flags(self.prompter.out(), level, base)?;
                let saved = self.session.saved_prompts().len();
                writeln!(self.prompter.out(), "{} {}", "saved prompts:".bold(), saved)?;
            }
            ShellCommand::Ideas => self.ideas().await?,
            ShellCommand::Generate => self.generate().await?,
            ShellCommand::Refine => self.refine().await?,
            ShellCommand::Results => self.show_results(Expand::One(0))?,
            ShellCommand::Show(i) => self.show_results(Expand::One(i))?,
            ShellCommand::Save(i) => self.save_result(i)?,
            ShellCommand::Download(i) => self.download_result(i)?,
            ShellCommand::Base(i) => self.base_from_result(i)?,
            ShellCommand::Saved(sub) => self.saved(sub)?,
        }
        Ok(())
    }

    fn set_key(&mut self, key: Option<String>) -> Result<()> {
        let key = match key {
            Some(k) => k,
            None => self.prompter.ask("Google Gemini API Key", "input is echoed")?,
        };
        self.cfg.api_key = Some(key);
        self.provider = provider::make_provider(&self.cfg, self.debug);
        if self.provider.is_some() {
            ux::success(self.prompter.out(), "API Key configured")?;
        } else {
            let msg = "Please enter your Google Gemini API Key".yellow();
            writeln!(self.prompter.out(), "{msg}")?;
        }
        Ok(())
    }

    fn need_key(&mut self) -> Result<()> {
        reference::render_getting_started(self.prompter.out())?;
        Ok(())
    }

    async fn ideas(&mut self) -> Result<()> {
        let Some(provider) = self.provider.as_deref() else { return self.need_key() };
        let d = Dispatcher::new(provider, self.cfg.model.clone())
            .with_exchange_log(self.exchanges.as_ref());
        let pb = ux::busy("Generating ideas...");
        let outcome = generate::ideas(&d).await;
        pb.finish_and_clear();
        self.finish("ideas", outcome)
    }

    async fn generate(&mut self) -> Result<()> {
        if self.provider.is_none() {
            return self.need_key();
        }
        let levels = ["High-Level (Brainstorming)", "Detailed (Specific Results)"];
        let default = match self.session.current_level() {
            PromptLevel::HighLevel => 0,
            PromptLevel::Detailed => 1,
        };
        let level = match self.prompter.choose("Choose prompt level:", &levels, default)? {
            0 => PromptLevel::HighLevel,
            _ => PromptLevel::Detailed,
        };
        self.session.set_current_level(level);
        let form = forms::collect_project_form(&mut self.prompter, level)?;

        let Some(provider) = self.provider.as_deref() else { return self.need_key() };
        let d = Dispatcher::new(provider, self.cfg.model.clone())
            .with_exchange_log(self.exchanges.as_ref());
        let pb = ux::busy("Generating optimized prompts...");
        let outcome = generate::prompts(&d, &form).await;
        pb.finish_and_clear();
        self.finish("prompts", outcome)
    }

    async fn refine(&mut self) -> Result<()> {
        if self.provider.is_none() {
            return self.need_key();
        }
        let base = self.session.base_prompt().map(str::to_string);
        let form = forms::collect_refinement_form(&mut self.prompter, base.as_deref())?;

        let Some(provider) = self.provider.as_deref() else { return self.need_key() };
        let d = Dispatcher::new(provider, self.cfg.model.clone())
            .with_exchange_log(self.exchanges.as_ref());
        let pb = ux::busy("Generating refinement prompt...");
        let outcome = generate::refinement(&d, &form).await;
        pb.finish_and_clear();
        self.finish("refinement", outcome)
    }

    fn finish(&mut self, what: &str, outcome: Result<ResultSet, GenerationError>) -> Result<()> {
        match outcome {
            Ok(set) => {
                ux::success(self.prompter.out(), &format!("{what} generated successfully"))?;
                results::render_results(self.prompter.out(), &set, Expand::One(0))?;
                self.last_results = Some(set);
            }
            Err(e) => ux::report_error(self.prompter.out(), what, &e)?,
        }
        Ok(())
    }

    fn current_results(&mut self) -> Result<Option<&ResultSet>> {
        if self.last_results.is_none() {
            writeln!(self.prompter.out(), "{}", "nothing generated yet".yellow())?;
        }
        Ok(self.last_results.as_ref())
    }

    fn show_results(&mut self, expand: Expand) -> Result<()> {
        if let Some(set) = self.last_results.as_ref() {
            results::render_results(self.prompter.out(), set, expand)?;
        } else {
            writeln!(self.prompter.out(), "{}", "nothing generated yet".yellow())?;
        }
        Ok(())
    }

    fn save_result(&mut self, i: usize) -> Result<()> {
        let Some(set) = self.current_results()? else { return Ok(()) };
        match set.save_draft(i) {
            Some(draft) => {
                let id = self.session.append_saved_prompt(draft);
                ux::success(self.prompter.out(), &format!("Prompt saved! ({id})"))?;
            }
            None => writeln!(self.prompter.out(), "{}", "that section cannot be saved".yellow())?,
        }
        Ok(())
    }

    fn download_result(&mut self, i: usize) -> Result<()> {
        let Some(set) = self.current_results()? else { return Ok(()) };
        let (Some(text), name) = (set.primary_text(i), set.file_name(i)) else {
            writeln!(self.prompter.out(), "{}", "no such section".yellow())?;
            return Ok(());
        };
        let path = export::export_text(Path::new(&self.cfg.export_dir), &name, &text)?;
        ux::success(self.prompter.out(), &format!("Downloaded to {}", path.display()))?;
        Ok(())
    }

    fn base_from_result(&mut self, i: usize) -> Result<()> {
        let Some(set) = self.current_results()? else { return Ok(()) };
        match set.base_text(i) {
            Some(text) => {
                self.session.set_base_prompt(text);
                ux::success(self.prompter.out(), "Prompt set for refinement!")?;
            }
            None => {
                let msg = "that section cannot be used as a base".yellow();
                writeln!(self.prompter.out(), "{msg}")?
            }
        }
        Ok(())
    }

    fn list_saved(&mut self, filter: LevelFilter, expand: Expand) -> Result<()> {
        let registry = self.session.saved_prompts();
        let view = registry.filter(filter);
        self.last_view = Some(view.iter().map(|r| r.id).collect());
        self.last_filter = filter;
        results::render_saved(self.prompter.out(), &view, filter, registry.len(), expand)?;
        Ok(())
    }

    /// Map a position of the last listing to the record id shown there.
    fn listed_id(&mut self, i: usize) -> Result<Option<RecordId>> {
        let Some(view) = &self.last_view else {
            writeln!(self.prompter.out(), "{}", "list saved prompts first with `saved`".yellow())?;
            return Ok(None);
        };
        let id = view.get(i).copied();
        if id.is_none() {
            writeln!(self.prompter.out(), "{}", "no such saved prompt".yellow())?;
        }
        Ok(id)
    }

    fn saved(&mut self, sub: SavedCommand) -> Result<()> {
        match sub {
            SavedCommand::List(filter) => self.list_saved(filter, Expand::None)?,
            SavedCommand::Show(i) => {
                let Some(id) = self.listed_id(i)? else { return Ok(()) };
                let filter = self.last_filter;
                let shown = self.session.saved_prompts().filter(filter);
                let pos = shown.iter().position(|r| r.id == id);
                match pos {
                    Some(p) => self.list_saved(filter, Expand::One(p))?,
                    None => {
                        writeln!(self.prompter.out(), "{}", "that prompt was deleted".yellow())?
                    }
                }
            }
            SavedCommand::Delete(i) => {
                let Some(id) = self.listed_id(i)? else { return Ok(()) };
                match self.session.saved_prompts_mut().delete(id) {
                    Some(r) => {
                        ux::success(self.prompter.out(), &format!("Deleted '{}'", r.title))?;
                        let filter = self.last_filter;
                        self.list_saved(filter, Expand::None)?;
                    }
                    None => {
                        let msg = "that prompt was already deleted".yellow();
                        writeln!(self.prompter.out(), "{msg}")?
                    }
                }
            }
            SavedCommand::Download(i) => {
                let Some(id) = self.listed_id(i)? else { return Ok(()) };
                let Some(record) = self.session.saved_prompts().get(id) else {
                    writeln!(self.prompter.out(), "{}", "that prompt was deleted".yellow())?;
                    return Ok(());
                };
                let path = export::export_text(
                    Path::new(&self.cfg.export_dir),
                    &export::saved_file_name(&record.title),
                    &record.prompt,
                )?;
                ux::success(self.prompter.out(), &format!("Downloaded to {}", path.display()))?;
            }
            SavedCommand::Base(i) => {
                let Some(id) = self.listed_id(i)? else { return Ok(()) };
                let record = self.session.saved_prompts().get(id);
                let Some(prompt) = record.map(|r| r.prompt.clone()) else {
                    writeln!(self.prompter.out(), "{}", "that prompt was deleted".yellow())?;
                    return Ok(());
                };
                self.session.set_base_prompt(prompt);
                ux::success(self.prompter.out(), "Prompt loaded for refinement!")?;
            }
        }
        Ok(())
    }
}

/// Run the shell on the process's stdin/stdout.
pub async fn run_stdio(cfg: Config, debug: bool) -> Result<()> {
    let provider = provider::make_provider(&cfg, debug);
    let prompter = Prompter::new(io::stdin().lock(), io::stdout());
    let mut shell = Shell::new(cfg, prompter, provider, debug);
    if io::stdin().is_terminal() {
        shell = shell.with_line_editor(Box::new(ReadlineCommands::new()?));
    }
    shell.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Provider;
    use crate::session::RecordLevel;
    use crate::wire::GenerationRequest;
    use async_trait::async_trait;
    use std::io::Cursor;

    struct Canned;

    #[async_trait]
    impl Provider for Canned {
        async fn generate(&self, req: &GenerationRequest) -> Result<String, GenerationError> {
            if req.response_schema.is_none() {
                return Ok("On the homepage, add a search bar to the header.".into());
            }
            Ok(r#"[
                {"prompt_title":"Pace","suggested_prompt":"A vibrant app for marathon runners.","key_elements":["vibe"],"prompt_type":"high-level"},
                {"prompt_title":"Stride","suggested_prompt":"An encouraging running companion.","key_elements":[],"prompt_type":"high-level"}
            ]"#
            .into())
        }
    }

    fn shell(
        input: &str,
        provider: Option<DynProvider>,
        export_dir: &Path,
    ) -> Shell<Cursor<Vec<u8>>, Vec<u8>> {
        let cfg = Config { export_dir: export_dir.display().to_string(), ..Config::default() };
        let prompter = Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        Shell::new(cfg, prompter, provider, false)
    }

    fn text(sh: &mut Shell<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8_lossy(sh.output()).into_owned()
    }

    #[test]
    fn parse_commands() {
        assert_eq!(parse("  "), Ok(ShellCommand::Empty));
        assert_eq!(parse("save 2"), Ok(ShellCommand::Save(1)));
        assert_eq!(
            parse("saved detailed"),
            Ok(ShellCommand::Saved(SavedCommand::List(LevelFilter::Only(RecordLevel::Detailed))))
        );
        assert_eq!(parse("saved"), Ok(ShellCommand::Saved(SavedCommand::List(LevelFilter::All))));
        assert_eq!(parse("saved delete 1"), Ok(ShellCommand::Saved(SavedCommand::Delete(0))));
        assert_eq!(
            parse("templates Task Management"),
            Ok(ShellCommand::Templates(Some("Task Management".into())))
        );
        assert_eq!(parse("level detailed"), Ok(ShellCommand::Level(PromptLevel::Detailed)));
        assert!(parse("save 0").is_err());
        assert!(parse("save").is_err());
        assert!(parse("frobnicate").is_err());
    }

    #[tokio::test]
    async fn generate_save_filter_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        // level 1, project type, vibe, visual style default
        let input = "generate\n1\nAn app for marathon runners\nvibrant, encouraging\n\n\
save 1\nsave 2\nrefine\nA running app\nhomepage\n1\n1\nAdd a search bar\nsave 1\n\
saved refinement\nsaved delete 1\nsaved\nquit\ny\n";
        let mut sh = shell(input, Some(Box::new(Canned)), dir.path());
        sh.run().await.unwrap();

        let left: Vec<RecordLevel> = sh
            .session()
            .saved_prompts()
            .filter(LevelFilter::All)
            .iter()
            .map(|r| r.level)
            .collect();
        assert_eq!(left, vec![RecordLevel::HighLevel, RecordLevel::HighLevel]);
        assert!(text(&mut sh).contains("Deleted 'Refinement: Add component on homepage'"));
    }

    #[tokio::test]
    async fn base_and_download_actions() {
        let dir = tempfile::tempdir().unwrap();
        let input =
            "generate\n1\nAn app for marathon runners\nvibrant\n\nbase 2\ndownload 1\nquit\n";
        let mut sh = shell(input, Some(Box::new(Canned)), dir.path());
        sh.run().await.unwrap();

        assert_eq!(sh.session().base_prompt(), Some("An encouraging running companion."));
        let exported = std::fs::read_to_string(dir.path().join("stitch_prompt_1.txt")).unwrap();
        assert_eq!(exported, "A vibrant app for marathon runners.");
    }

    #[tokio::test]
    async fn missing_key_shows_getting_started() {
        let dir = tempfile::tempdir().unwrap();
        let mut sh = shell("ideas\nsaved\nquit\n", None, dir.path());
        sh.run().await.unwrap();
        let out = text(&mut sh);
        assert!(out.contains("Get a Google Gemini API Key"));
        assert!(out.contains("No saved prompts yet"));
    }

    #[tokio::test]
    async fn blank_required_field_warns_without_results() {
        let dir = tempfile::tempdir().unwrap();
        let input = "generate\n1\n\n\n\nresults\nquit\n";
        let mut sh = shell(input, Some(Box::new(Canned)), dir.path());
        sh.run().await.unwrap();
        let out = text(&mut sh);
        assert!(out.contains("Please fill in the app type field."));
        assert!(out.contains("nothing generated yet"));
    }

    #[tokio::test]
    async fn delete_without_listing_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let mut sh = shell("saved delete 1\nquit\n", None, dir.path());
        sh.run().await.unwrap();
        assert!(text(&mut sh).contains("list saved prompts first"));
    }

    #[tokio::test]
    async fn status_reports_level_base_and_saved_count() {
        let dir = tempfile::tempdir().unwrap();
        let input = "level detailed\ngenerate\n1\nAn app for marathon runners\n\n\n\
                     save 1\nbase 1\nstatus\nquit\ny\n";
        let mut sh = shell(input, Some(Box::new(Canned)), dir.path());
        sh.run().await.unwrap();
        let out = text(&mut sh);
        assert!(out.contains("saved prompts: 1") || out.contains("saved prompts:\u{1b}[0m 1"));
        assert!(out.contains("A vibrant app for marathon runners."));
        assert_eq!(sh.session().current_level(), PromptLevel::HighLevel);
    }

    #[tokio::test]
    async fn delete_after_empty_listing_names_the_missing_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let input = "generate\n1\nAn app for marathon runners\n\n\n\
                     save 1\nsaved detailed\nsaved delete 1\nquit\ny\n";
        let mut sh = shell(input, Some(Box::new(Canned)), dir.path());
        sh.run().await.unwrap();
        let out = text(&mut sh);
        assert!(out.contains("(nothing matches this filter)"));
        assert!(out.contains("no such saved prompt"));
        assert!(!out.contains("list saved prompts first"));
        assert_eq!(sh.session().saved_prompts().len(), 1);
    }

    struct Lines(Vec<&'static str>);

    impl CommandLine for Lines {
        fn read(&mut self, _prompt: &str) -> Result<Option<String>> {
            Ok((!self.0.is_empty()).then(|| self.0.remove(0).to_string()))
        }
    }

    #[tokio::test]
    async fn commands_come_from_the_line_editor_when_set() {
        let dir = tempfile::tempdir().unwrap();
        let mut sh = shell("", None, dir.path())
            .with_line_editor(Box::new(Lines(vec!["level detailed", "templates"])));
        sh.run().await.unwrap();
        assert_eq!(sh.session().current_level(), PromptLevel::Detailed);
        let out = text(&mut sh);
        assert!(out.contains("Pre-built templates:"));
        assert!(!out.contains("stitch>"));
    }
}
