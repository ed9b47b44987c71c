//! Agent Showcase - command line interface
//!
//! `play` runs the demo in the terminal, `content` prints the script and
//! `timeline` prints when every transition of a run will happen.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use std::io::{self, Write};
use std::sync::Arc;

use crate::config::Config;
use crate::confirm::AcceptPolicy;
use crate::content::{self, AppContent};
use crate::errors::ShowcaseError;
use crate::observability::telemetry::{init_tracing, init_tracing_verbose};
use crate::output;
use crate::runner::{Schedule, Sequencer, Timing};
use crate::ui::spinner::{supports_ansi, supports_color};
use crate::ui::style::{set_ascii_mode, Glyphs, ShowcaseStyle};
use crate::ui::theme::ThemeId;
use crate::ui::{self, render, Frontend, FrontendOptions, PlayFormat, ShowcaseApp};

#[derive(Parser)]
#[command(name = "agent-showcase")]
#[command(about = "Watch a scripted AI agent analyse, plan and deliver, step by step")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Playback speed multiplier (2.0 = twice as fast)
    #[arg(long, value_name = "F", global = true)]
    speed: Option<f64>,

    /// Color theme: brand (default), minimal, high-contrast
    #[arg(long, value_enum, global = true)]
    theme: Option<Theme>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Compact output mode (less visual chrome, more dense)
    #[arg(long, global = true)]
    compact: bool,

    /// Verbose mode (timings and debug logging)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,
}

/// Color theme for terminal output
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum Theme {
    /// Navy and light blue (default)
    #[default]
    Brand,
    /// Clean grayscale minimal
    Minimal,
    /// High contrast for accessibility
    HighContrast,
}

impl From<Theme> for ThemeId {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Brand => ThemeId::Brand,
            Theme::Minimal => ThemeId::Minimal,
            Theme::HighContrast => ThemeId::HighContrast,
        }
    }
}

impl Theme {
    fn config_name(self) -> &'static str {
        match self {
            Theme::Brand => "brand",
            Theme::Minimal => "minimal",
            Theme::HighContrast => "high-contrast",
        }
    }
}

/// Output format for the inspection commands
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text (default)
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the demo (default)
    #[command(alias = "p")]
    Play(PlayArgs),

    /// Print the scripted content
    Content {
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print when every transition of a run happens
    #[command(alias = "t")]
    Timeline {
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Args, Default)]
struct PlayArgs {
    /// Transcript format
    #[arg(long, value_enum, default_value = "text")]
    format: PlayFormat,

    /// Show every bullet instead of collapsing long messages
    #[arg(long)]
    expand_all: bool,

    /// Save the document without asking
    #[arg(long, conflicts_with = "decline")]
    accept: bool,

    /// Decline saving the document without asking
    #[arg(long)]
    decline: bool,

    /// Print bullets at once instead of typing them out
    #[arg(long)]
    no_animations: bool,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize telemetry
    if cli.verbose {
        init_tracing_verbose();
    } else {
        init_tracing();
    }

    if cli.no_color || !supports_color() {
        colored::control::set_override(false);
    }
    if std::env::var("TERM").is_ok_and(|t| t == "dumb") {
        set_ascii_mode(true);
    }

    let mut config = Config::load(cli.config.as_deref())?;

    // CLI flags override config file settings
    if let Some(speed) = cli.speed {
        config.timing.speed = speed;
        config.validate().map_err(ShowcaseError::from)?;
    }
    if let Some(theme) = cli.theme {
        config.ui.theme = theme.config_name().to_string();
        tracing::debug!(theme = ?ThemeId::from(theme), "Theme set from command line");
    }
    config.compact_mode = cli.compact || config.ui.compact_mode;
    config.verbose_mode = cli.verbose || config.ui.verbose_mode;
    config.apply_ui_settings();

    let content = Arc::new(content::load());
    let timing = Timing::from_config(&config.timing);

    match cli.command.unwrap_or(Commands::Play(PlayArgs::default())) {
        Commands::Play(args) => play(args, &config, content, timing, cli.quiet).await,
        Commands::Content { format } => {
            let mut out = io::stdout().lock();
            print_content(&mut out, &content, format).map_err(ShowcaseError::from)?;
            Ok(())
        }
        Commands::Timeline { format } => {
            let mut out = io::stdout().lock();
            let schedule = timing.schedule(&content);
            print_timeline(&mut out, &schedule, config.timing.speed, format)
                .map_err(ShowcaseError::from)?;
            Ok(())
        }
    }
}

async fn play(
    args: PlayArgs,
    config: &Config,
    content: Arc<AppContent>,
    timing: Timing,
    quiet: bool,
) -> Result<()> {
    let format = args.format;
    let animate = config.ui.animations
        && !args.no_animations
        && !quiet
        && format == PlayFormat::Text
        && supports_ansi();
    let typing_ms = config.ui.typing_char_ms as f64 / config.timing.speed;
    let width = crossterm::terminal::size().ok().map(|(columns, _)| columns);

    let options = FrontendOptions {
        format,
        animate,
        typing_char: std::time::Duration::from_secs_f64(typing_ms / 1000.0),
        width: render::card_width(width),
        quiet,
    };
    tracing::debug!(?options, "Starting playback");

    let step_total = content.steps.len();
    let sequencer = Sequencer::new(content, timing);
    let app = ShowcaseApp::with_collapse(
        sequencer,
        config.ui.collapsed_bullets,
        args.expand_all || config.ui.expand_all,
    );
    let policy = AcceptPolicy::from_flags(args.accept, args.decline);

    let mut frontend = Frontend::new(io::stdout(), options, step_total);
    let summary = ui::play(&app, &mut frontend, policy).await?;

    if let crate::runner::RunOutcome::Completed { elapsed, steps, .. } = summary.outcome {
        tracing::info!(
            steps,
            elapsed_ms = elapsed.as_millis() as u64,
            phase = summary.phase.as_str(),
            "Session finished"
        );
    }
    Ok(())
}

/// Print the scripted content.
pub fn print_content<W: Write>(out: &mut W, content: &AppContent, format: OutputFormat) -> io::Result<()> {
    if let OutputFormat::Json = format {
        serde_json::to_writer_pretty(&mut *out, content)?;
        return writeln!(out);
    }

    writeln!(out, "{} {}", Glyphs::user(), content.prompt.as_str().user_voice())?;
    for (i, step) in content.steps.iter().enumerate() {
        writeln!(out)?;
        writeln!(
            out,
            "{} {}",
            format!("{}.", i + 1).muted(),
            step.title.as_str().heading()
        )?;
        if !output::is_compact() {
            writeln!(out, "   {}", step.summary.as_str().muted())?;
        }
        for bullet in step.bullets.iter() {
            writeln!(out, "{}", render::bullet_line(bullet))?;
        }
    }
    writeln!(out)?;
    for line in render::summary_card(content, render::card_width(None)) {
        writeln!(out, "{}", line)?;
    }
    writeln!(out)?;
    writeln!(out, "{}", content.accept_question.as_str().emphasis())?;
    Ok(())
}

fn ms(d: std::time::Duration) -> u64 {
    d.as_millis() as u64
}

/// Print the computed schedule of a run.
pub fn print_timeline<W: Write>(
    out: &mut W,
    schedule: &Schedule,
    speed: f64,
    format: OutputFormat,
) -> io::Result<()> {
    if let OutputFormat::Json = format {
        let steps: Vec<_> = schedule
            .steps
            .iter()
            .map(|s| {
                json!({
                    "index": s.index,
                    "title": s.title,
                    "added_ms": ms(s.added),
                    "processing_ms": ms(s.processing),
                    "streaming_ms": ms(s.streaming),
                    "bullets_ms": s.bullets.iter().map(|b| ms(*b)).collect::<Vec<_>>(),
                    "done_ms": ms(s.done),
                })
            })
            .collect();
        let view = json!({
            "speed": speed,
            "total_ms": ms(schedule.total),
            "steps": steps,
        });
        serde_json::to_writer_pretty(&mut *out, &view)?;
        return writeln!(out);
    }

    writeln!(out, "{}", format!("Timeline at speed {}", speed).heading())?;
    for step in &schedule.steps {
        writeln!(out)?;
        writeln!(out, "{:>7} ms  {}", ms(step.added), step.title.as_str().agent_title())?;
        writeln!(out, "{:>7} ms    processing", ms(step.processing))?;
        writeln!(out, "{:>7} ms    streaming", ms(step.streaming))?;
        for (i, bullet) in step.bullets.iter().enumerate() {
            writeln!(out, "{:>7} ms      bullet {}", ms(*bullet), i + 1)?;
        }
        writeln!(out, "{:>7} ms    done", ms(step.done))?;
    }
    writeln!(out)?;
    writeln!(out, "{:>7} ms  {}", ms(schedule.total), "finished".status_done())?;
    Ok(())
}
