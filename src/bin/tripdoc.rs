//! CLI binary for tripdoc.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `RenderConfig` / `GenerationConfig` and prints results.

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use tripdoc::{
    generate_plan, render_to_file, GenerationConfig, GenerationProgressCallback, GenerationStats,
    LayoutProfile, PlanRequest, PlanSection, ProgressCallback, RecordIssue, RenderConfig,
    RenderStats, RepairPlacement, TravelPlan, DEFAULT_OUTPUT_FILE,
};

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"];

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one spinner line plus a log line per section.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  {elapsed}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(TICKS);
        bar.set_style(style);
        bar.set_prefix("Generating");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl GenerationProgressCallback for CliProgressCallback {
    fn on_generation_start(&self, total_sections: usize) {
        self.bar.set_length(total_sections as u64);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Requesting {total_sections} section(s)…"))
        ));
    }

    fn on_section_start(&self, section: PlanSection, index: usize, total: usize) {
        self.bar.set_message(format!("{section} ({index}/{total})"));
    }

    fn on_section_complete(&self, section: PlanSection, index: usize, total: usize, text_len: usize) {
        self.bar.println(format!(
            "  {} {:>1}/{:<1}  {:<28}  {}",
            green("✓"),
            index,
            total,
            section.to_string(),
            dim(&format!("{text_len:>5} chars")),
        ));
        self.bar.inc(1);
    }

    fn on_section_error(&self, section: PlanSection, index: usize, total: usize, error: &str) {
        let msg = if error.chars().count() > 80 {
            let cut: String = error.chars().take(79).collect();
            format!("{cut}\u{2026}")
        } else {
            error.to_string()
        };
        self.bar.println(format!(
            "  {} {}/{}  {}  {}",
            red("✗"),
            index,
            total,
            section,
            red(&msg)
        ));
        self.bar.finish_and_clear();
    }

    fn on_generation_complete(&self, _total_sections: usize) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Render texts you already have
  tripdoc --destination Paris --itinerary plan.txt -o paris.pdf

  # Add recommendation sections
  tripdoc --destination Paris --itinerary plan.txt \
          --hotels hotels.txt --restaurants restaurants.txt

  # Render a saved plan
  tripdoc --plan-json plan.json --profile detailed

  # Generate with an LLM, then render
  tripdoc --generate --destination Lisbon --days 3 \
          --interests "Museums, Food" --preferences "Kids friendly" \
          --hotel-stars 4 --cuisines "Seafood" --save-text out/

PROFILES:
  classic   intro line, restaurant and hotel pages, no repair
  detailed  meal repair, heading icons, ASCII-only text, itinerary only

RECORD FORMATS:
  restaurants  4 lines each: name, cuisine, description, link
  hotels       6 lines each: name, stars, description, 3 links

ENVIRONMENT VARIABLES:
  OPENAI_API_KEY        OpenAI API key
  ANTHROPIC_API_KEY     Anthropic API key
  TRIPDOC_LLM_PROVIDER  Override provider (openai, anthropic, gemini, ollama)
  TRIPDOC_MODEL         Override model ID
  RUST_LOG              Log filter, e.g. tripdoc=debug
"#;

/// Render travel plans to paginated PDF documents.
#[derive(Parser, Debug)]
#[command(
    name = "tripdoc",
    version,
    about = "Render travel plans to paginated PDF documents",
    long_about = "Lay out a day-by-day itinerary plus optional hotel and restaurant \
recommendations as a printable PDF. Texts can come from files, a JSON plan, or be \
generated by an LLM (OpenAI, Anthropic, Gemini, Ollama, …).",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Destination printed under the title (and used for generation).
    #[arg(long, env = "TRIPDOC_DESTINATION")]
    destination: Option<String>,

    /// Itinerary text file.
    #[arg(long, conflicts_with_all = ["plan_json", "generate"])]
    itinerary: Option<PathBuf>,

    /// Hotel recommendations text file (6 lines per hotel).
    #[arg(long, requires = "itinerary")]
    hotels: Option<PathBuf>,

    /// Restaurant recommendations text file (4 lines per restaurant).
    #[arg(long, requires = "itinerary")]
    restaurants: Option<PathBuf>,

    /// Render a plan saved as JSON ({destination, itinerary, hotels?, restaurants?}).
    #[arg(long, conflicts_with = "generate")]
    plan_json: Option<PathBuf>,

    /// Write the PDF here.
    #[arg(short, long, env = "TRIPDOC_OUTPUT", default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Generate the plan texts with an LLM before rendering.
    #[arg(long)]
    generate: bool,

    /// Trip length in days (1–30).
    #[arg(long, default_value_t = 3,
          value_parser = clap::value_parser!(u32).range(1..=30))]
    days: u32,

    /// Interests, e.g. "Museums, Food, Nature".
    #[arg(long, default_value = "")]
    interests: String,

    /// Preferences, e.g. "Kids friendly, less walking".
    #[arg(long, default_value = "")]
    preferences: String,

    /// Also recommend hotels of this class (1–5).
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    hotel_stars: Option<u8>,

    /// Also recommend restaurants with these cuisines.
    #[arg(long)]
    cuisines: Option<String>,

    /// Save generated texts (and plan.json) into this directory.
    #[arg(long, requires = "generate")]
    save_text: Option<PathBuf>,

    /// LLM model ID.
    #[arg(long, env = "TRIPDOC_MODEL")]
    model: Option<String>,

    /// LLM provider: openai, anthropic, gemini, ollama, azure.
    #[arg(long, env = "TRIPDOC_PROVIDER")]
    provider: Option<String>,

    /// LLM temperature (0.0–2.0).
    #[arg(long, env = "TRIPDOC_TEMPERATURE", default_value_t = 0.7)]
    temperature: f32,

    /// Max LLM output tokens per section.
    #[arg(long, env = "TRIPDOC_MAX_TOKENS", default_value_t = 2048)]
    max_tokens: usize,

    /// Layout profile.
    #[arg(long, env = "TRIPDOC_PROFILE", value_enum, default_value = "classic")]
    profile: ProfileArg,

    /// Where repaired default lines go in a day.
    #[arg(long, value_enum, default_value = "append")]
    repair: RepairArg,

    /// Do not prefix time headings with icons.
    #[arg(long)]
    no_icons: bool,

    /// Skip the ASCII pass of the detailed profile.
    #[arg(long)]
    unicode: bool,

    /// Print a JSON summary on stdout.
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "TRIPDOC_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "TRIPDOC_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ProfileArg {
    Classic,
    Detailed,
}

impl From<ProfileArg> for LayoutProfile {
    fn from(v: ProfileArg) -> Self {
        match v {
            ProfileArg::Classic => LayoutProfile::Classic,
            ProfileArg::Detailed => LayoutProfile::Detailed,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum RepairArg {
    Append,
    Chronological,
}

impl From<RepairArg> for RepairPlacement {
    fn from(v: RepairArg) -> Self {
        match v {
            RepairArg::Append => RepairPlacement::Append,
            RepairArg::Chronological => RepairPlacement::Chronological,
        }
    }
}

/// What `--json` prints.
#[derive(Serialize)]
struct Summary<'a> {
    output: &'a Path,
    profile: LayoutProfile,
    stats: &'a RenderStats,
    issues: &'a [RecordIssue],
    #[serde(skip_serializing_if = "Option::is_none")]
    generation: Option<&'a GenerationStats>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let show_progress = cli.generate && !cli.quiet && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let profile: LayoutProfile = cli.profile.into();
    let render_config = RenderConfig::builder()
        .profile(profile)
        .repair_placement(cli.repair.into())
        .heading_icons(!cli.no_icons)
        .keep_unicode(cli.unicode)
        .build()
        .context("Invalid render configuration")?;

    // ── Obtain the plan ──────────────────────────────────────────────────
    let mut generation = None;
    let plan = if cli.generate {
        let progress: Option<ProgressCallback> = if show_progress {
            Some(CliProgressCallback::new() as Arc<dyn GenerationProgressCallback>)
        } else {
            None
        };
        let request = build_request(&cli)?;
        let config = build_generation_config(&cli, progress)?;
        let generated = generate_plan(&request, profile, &config)
            .await
            .context("Generation failed")?;
        if let Some(ref dir) = cli.save_text {
            save_texts(dir, &generated.plan)?;
        }
        generation = Some(generated.stats);
        generated.plan
    } else if let Some(ref path) = cli.plan_json {
        let raw = read_text(path)?;
        let mut plan: TravelPlan = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid plan JSON in {}", path.display()))?;
        if let Some(ref d) = cli.destination {
            plan.destination = d.clone();
        }
        plan
    } else if let Some(ref path) = cli.itinerary {
        let destination = cli
            .destination
            .clone()
            .context("--destination is required with --itinerary")?;
        let mut plan = TravelPlan::new(destination, read_text(path)?);
        if let Some(ref h) = cli.hotels {
            plan.hotels = Some(read_text(h)?);
        }
        if let Some(ref r) = cli.restaurants {
            plan.restaurants = Some(read_text(r)?);
        }
        plan
    } else {
        bail!("Nothing to render: pass --itinerary, --plan-json or --generate");
    };

    // ── Render ───────────────────────────────────────────────────────────
    let doc = render_to_file(&plan, &cli.output, &render_config).context("Rendering failed")?;

    if cli.json {
        let summary = Summary {
            output: &cli.output,
            profile,
            stats: &doc.stats,
            issues: &doc.issues,
            generation: generation.as_ref(),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to serialise summary")?
        );
    } else if !cli.quiet {
        for issue in &doc.issues {
            eprintln!("{} {}", cyan("⚠"), issue);
        }
        eprintln!(
            "{}  {} page(s)  {} day(s)  {} restaurant(s)  {} hotel(s)  →  {}",
            green("✔"),
            doc.stats.pages,
            doc.stats.day_headings,
            doc.stats.restaurants,
            doc.stats.hotels,
            bold(&cli.output.display().to_string()),
        );
        if doc.stats.synthesized_lines > 0 {
            eprintln!(
                "   {} default line(s) added for missing meals",
                dim(&doc.stats.synthesized_lines.to_string())
            );
        }
        if let Some(ref g) = generation {
            eprintln!(
                "   {} tokens in  /  {} tokens out  —  {}ms",
                dim(&g.total_input_tokens.to_string()),
                dim(&g.total_output_tokens.to_string()),
                g.duration_ms,
            );
        }
    }

    Ok(())
}

/// Map CLI args to `PlanRequest`.
fn build_request(cli: &Cli) -> Result<PlanRequest> {
    let destination = cli
        .destination
        .clone()
        .context("--destination is required with --generate")?;
    let mut request = PlanRequest::new(destination, cli.days, &cli.interests, &cli.preferences);
    request.hotel_stars = cli.hotel_stars;
    request.cuisines = cli.cuisines.clone();
    request.validate().context("Invalid trip request")?;
    Ok(request)
}

/// Map CLI args to `GenerationConfig`.
fn build_generation_config(
    cli: &Cli,
    progress: Option<ProgressCallback>,
) -> Result<GenerationConfig> {
    let mut builder = GenerationConfig::builder()
        .temperature(cli.temperature)
        .max_tokens(cli.max_tokens);
    if let Some(ref model) = cli.model {
        builder = builder.model(model);
    }
    if let Some(ref provider) = cli.provider {
        builder = builder.provider_name(provider);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }
    builder.build().context("Invalid generation configuration")
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Write each generated section plus the whole plan as JSON.
fn save_texts(dir: &Path, plan: &TravelPlan) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    let mut files = vec![("itinerary.txt", plan.itinerary.clone())];
    if let Some(ref h) = plan.hotels {
        files.push(("hotels.txt", h.clone()));
    }
    if let Some(ref r) = plan.restaurants {
        files.push(("restaurants.txt", r.clone()));
    }
    files.push((
        "plan.json",
        serde_json::to_string_pretty(plan).context("Failed to serialise plan")?,
    ));
    for (name, body) in files {
        let path = dir.join(name);
        std::fs::write(&path, body)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(())
}
