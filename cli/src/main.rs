//! twocol CLI - two-column DOCX layout tool

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use twocol::{
    resolve_text, CleanupPreset, Column, Direction, Error, JsonFormat, SourceRegistry, Twocol,
    TypographySettings, Upload,
};

#[derive(Parser)]
#[command(name = "twocol")]
#[command(author = "twocol contributors")]
#[command(version)]
#[command(about = "Lay out bold-marked text as a two-column DOCX", long_about = None)]
struct Cli {
    /// Input file (DOCX or text, "-" for stdin)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output DOCX file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a two-column DOCX
    #[command(alias = "gen")]
    Generate {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (defaults to hebrew_layout.docx)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        typography: TypographyArgs,

        #[command(flatten)]
        extraction: ExtractArgs,

        /// Document title
        #[arg(long)]
        title: Option<String>,

        /// Font family for all text
        #[arg(long)]
        font: Option<String>,
    },

    /// Show the bold references and column text that would be generated
    Preview {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        extraction: ExtractArgs,

        /// Print the preview as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the document plan as JSON
    Plan {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        typography: TypographyArgs,

        #[command(flatten)]
        extraction: ExtractArgs,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print the plain text of an uploaded document
    Extract {
        /// Input file (DOCX or text)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct InputArgs {
    /// Input file (DOCX or text, "-" for stdin)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Text to lay out (takes precedence over FILE)
    #[arg(short, long)]
    text: Option<String>,
}

#[derive(Args)]
struct TypographyArgs {
    /// Body font size in points (8-72)
    #[arg(long, env = "TWOCOL_MAIN_FONT_SIZE", default_value_t = 12)]
    main_size: u32,

    /// Header font size in points (8-72)
    #[arg(long, env = "TWOCOL_BOLD_FONT_SIZE", default_value_t = 14)]
    bold_size: u32,

    /// Text direction
    #[arg(long, value_enum, env = "TWOCOL_DIRECTION", default_value = "rtl")]
    direction: DirectionArg,
}

impl TypographyArgs {
    fn settings(&self, text: &str) -> TypographySettings {
        TypographySettings::new()
            .with_main_font_size(self.main_size)
            .with_bold_font_size(self.bold_size)
            .with_direction(self.direction.resolve(text))
    }
}

#[derive(Args, Default)]
struct ExtractArgs {
    /// Text cleanup preset applied before extraction
    #[arg(long, value_enum)]
    cleanup: Option<CleanupLevel>,

    /// Inline delimiter marking bold references
    #[arg(long, value_name = "DELIM")]
    delimiter: Option<String>,
}

impl ExtractArgs {
    /// Apply the extraction options to a builder. Shared by every command
    /// that extracts, so preview and generate agree.
    fn apply(&self, mut builder: Twocol) -> twocol::Result<Twocol> {
        if let Some(level) = self.cleanup {
            builder = builder.with_cleanup(level.into());
        }
        if let Some(delimiter) = &self.delimiter {
            builder = builder.with_delimiter(delimiter.clone())?;
        }
        Ok(builder)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
enum DirectionArg {
    /// Right-to-left (right-aligned)
    Rtl,
    /// Left-to-right (left-aligned)
    Ltr,
    /// Pick from the first strongly directional character
    Auto,
}

impl DirectionArg {
    fn resolve(self, text: &str) -> Direction {
        match self {
            DirectionArg::Rtl => Direction::Rtl,
            DirectionArg::Ltr => Direction::Ltr,
            DirectionArg::Auto => Direction::detect(text),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Line endings and byte-order mark only
    Minimal,
    /// Also Unicode NFC, control characters and trailing whitespace
    Standard,
    /// Also private-use characters and repeated spaces
    Aggressive,
}

impl From<CleanupLevel> for CleanupPreset {
    fn from(level: CleanupLevel) -> Self {
        match level {
            CleanupLevel::Minimal => CleanupPreset::Minimal,
            CleanupLevel::Standard => CleanupPreset::Standard,
            CleanupLevel::Aggressive => CleanupPreset::Aggressive,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Generate {
            input,
            output,
            typography,
            extraction,
            title,
            font,
        }) => cmd_generate(
            &input,
            output.as_deref(),
            &typography,
            &extraction,
            title,
            font,
        ),
        Some(Commands::Preview {
            input,
            extraction,
            json,
        }) => cmd_preview(&input, &extraction, json),
        Some(Commands::Plan {
            input,
            typography,
            extraction,
            compact,
        }) => cmd_plan(&input, &typography, &extraction, compact),
        Some(Commands::Extract { input, output }) => cmd_extract(&input, output.as_deref()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: generate if input is provided
            if let Some(file) = cli.input {
                let input = InputArgs {
                    file: Some(file),
                    text: None,
                };
                let typography = TypographyArgs {
                    main_size: 12,
                    bold_size: 14,
                    direction: DirectionArg::Rtl,
                };
                cmd_generate(
                    &input,
                    cli.output.as_deref(),
                    &typography,
                    &ExtractArgs::default(),
                    None,
                    None,
                )
            } else {
                println!("{}", "Usage: twocol <FILE> [OUTPUT]".yellow());
                println!("       twocol --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        if matches!(e.downcast_ref::<Error>(), Some(Error::InputAbsent)) {
            eprintln!("{}: {}", "Warning".yellow().bold(), e);
        } else {
            eprintln!("{}: {}", "Error".red().bold(), e);
        }
        std::process::exit(1);
    }
}

/// Resolve the text to lay out from `--text`, stdin or an uploaded file.
fn read_input(input: &InputArgs) -> Result<String, Box<dyn std::error::Error>> {
    let registry = SourceRegistry::with_defaults();

    if let Some(text) = &input.text {
        return Ok(resolve_text(text, None, &registry)?);
    }

    let text = match input.file.as_deref() {
        Some(path) if path == Path::new("-") => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            resolve_text(&text, None, &registry)?
        }
        Some(path) => {
            let upload = Upload::from_path(path)?;
            resolve_text("", Some(&upload), &registry)?
        }
        None => return Err(Error::InputAbsent.into()),
    };
    log::debug!("Resolved {} bytes of input", text.len());
    Ok(text)
}

fn cmd_generate(
    input: &InputArgs,
    output: Option<&Path>,
    typography: &TypographyArgs,
    extraction: &ExtractArgs,
    title: Option<String>,
    font: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Reading input...");
    let text = read_input(input)?;
    pb.inc(1);

    let mut builder =
        extraction.apply(Twocol::new().with_settings(typography.settings(&text)))?;
    if let Some(title) = title {
        builder = builder.with_title(title);
    }
    if let Some(font) = font {
        builder = builder.with_font_family(font);
    }

    pb.set_message("Laying out columns...");
    let layout = builder.layout(&text)?;
    pb.inc(1);

    pb.set_message("Rendering DOCX...");
    let document = layout.to_docx()?;
    pb.inc(1);

    pb.set_message("Writing file...");
    let path = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(&document.file_name));
    fs::write(&path, &document.bytes)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    let stats = &document.stats;
    println!("\n{} {}", "Saved to".green().bold(), path.display());
    println!("  {} {} bold references", "├─".dimmed(), stats.span_count);
    println!(
        "  {} {} / {} lines per column",
        "├─".dimmed(),
        stats.column1_lines,
        stats.column2_lines
    );
    println!("  {} {} words", "└─".dimmed(), stats.word_count);

    Ok(())
}

fn cmd_preview(
    input: &InputArgs,
    extraction: &ExtractArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(input)?;
    let preview = extraction.apply(Twocol::new())?.preview(&text);

    if json {
        println!("{}", serde_json::to_string_pretty(&preview)?);
    } else {
        println!("{}", preview.summary());
    }

    Ok(())
}

fn cmd_plan(
    input: &InputArgs,
    typography: &TypographyArgs,
    extraction: &ExtractArgs,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(input)?;
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let layout = extraction
        .apply(Twocol::new().with_settings(typography.settings(&text)))?
        .layout(&text)?;
    println!("{}", layout.to_json(format)?);

    Ok(())
}

fn cmd_extract(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let text = twocol::extract_text_file(input)?;

    if let Some(path) = output {
        fs::write(path, &text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", text);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "twocol".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Two-column DOCX layout tool");
    println!();
    println!("License: MIT");
}
