//! betaguide CLI - beta-tester onboarding guide generator

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use betaguide::render::{to_json, to_text};
use betaguide::{
    build_guide, detect_format_from_path, generate_all_with_options, generate_docx_with_options,
    generate_pdf_with_options, verify_output, GuideConfig, JsonFormat, OutputFormat, PageSize,
    RenderOptions,
};

#[derive(Parser)]
#[command(name = "betaguide")]
#[command(author = "GatherSync Team")]
#[command(version)]
#[command(about = "Generate beta-tester onboarding guides as PDF and Word documents", long_about = None)]
struct Cli {
    #[command(flatten)]
    guide: GuideArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct GuideArgs {
    /// Guide configuration (JSON)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// QR code image
    #[arg(long, global = true, value_name = "PATH", env = "BETAGUIDE_QR")]
    qr: Option<PathBuf>,

    /// Launch URL printed in the guide
    #[arg(long, global = true, value_name = "URL", env = "BETAGUIDE_URL")]
    url: Option<String>,

    /// Paper size
    #[arg(long, global = true, value_enum, default_value = "letter")]
    paper: Paper,

    /// Write uncompressed PDF content streams
    #[arg(long, global = true)]
    no_compress: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate both the PDF and the Word guide (default)
    All {
        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Generate the PDF guide
    Pdf {
        /// Output file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Generate the Word guide
    #[command(alias = "word")]
    Docx {
        /// Output file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Preview the guide as plain text
    Text {
        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Dump the guide's content model as JSON
    Json {
        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print the effective guide configuration as JSON
    Config,

    /// Verify a generated PDF or Word file
    Check {
        /// Generated file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Paper {
    /// US Letter (8.5 x 11 in)
    Letter,
    /// ISO A4 (210 x 297 mm)
    A4,
}

impl From<Paper> for PageSize {
    fn from(paper: Paper) -> Self {
        match paper {
            Paper::Letter => PageSize::LETTER,
            Paper::A4 => PageSize::A4,
        }
    }
}

impl GuideArgs {
    fn load_config(&self) -> Result<GuideConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => GuideConfig::from_json_file(path)?,
            None => GuideConfig::default(),
        };
        if let Some(qr) = &self.qr {
            config.qr_image = qr.clone();
        }
        if let Some(url) = &self.url {
            config.launch_url = url.clone();
        }
        config.validate()?;
        log::debug!("Using QR image {}", config.qr_image.display());
        Ok(config)
    }

    fn render_options(&self) -> RenderOptions {
        RenderOptions::new()
            .with_page_size(self.paper.into())
            .with_compression(!self.no_compress)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::All { output }) => cmd_all(&cli.guide, output.as_deref()),
        Some(Commands::Pdf { output }) => cmd_pdf(&cli.guide, output.as_deref()),
        Some(Commands::Docx { output }) => cmd_docx(&cli.guide, output.as_deref()),
        Some(Commands::Text { output }) => cmd_text(&cli.guide, output.as_deref()),
        Some(Commands::Json { output, compact }) => cmd_json(&cli.guide, output.as_deref(), compact),
        Some(Commands::Config) => cmd_config(&cli.guide),
        Some(Commands::Check { input }) => cmd_check(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => cmd_all(&cli.guide, None),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn print_success(format: OutputFormat, path: &Path) {
    println!(
        "{} {} generated successfully: {}",
        "✅".green(),
        format,
        path.display()
    );
}

fn cmd_all(args: &GuideArgs, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.load_config()?;
    let options = args.render_options();

    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Generating PDF and Word documents...");

    let files = generate_all_with_options(&config, &output_dir, &options)?;
    pb.finish_and_clear();

    print_success(OutputFormat::Pdf, &files.pdf);
    print_success(OutputFormat::Docx, &files.docx);

    println!("\n{}", "Output files:".green().bold());
    println!(
        "  {} {} ({} pages, {} bytes)",
        "├─".dimmed(),
        config.pdf_file_name(),
        files.pdf_output.page_count.unwrap_or_default(),
        files.pdf_output.len()
    );
    println!(
        "  {} {} ({} bytes)",
        "└─".dimmed(),
        config.docx_file_name(),
        files.docx_output.len()
    );

    Ok(())
}

fn cmd_pdf(args: &GuideArgs, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.load_config()?;
    let path = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(config.pdf_file_name()));

    generate_pdf_with_options(&config, &path, &args.render_options())?;
    print_success(OutputFormat::Pdf, &path);
    Ok(())
}

fn cmd_docx(args: &GuideArgs, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.load_config()?;
    let path = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(config.docx_file_name()));

    generate_docx_with_options(&config, &path, &args.render_options())?;
    print_success(OutputFormat::Docx, &path);
    Ok(())
}

fn cmd_text(args: &GuideArgs, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.load_config()?;
    let doc = build_guide(&config);
    let text = to_text(&doc)?;

    if let Some(path) = output {
        fs::write(path, format!("{}\n", text))?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", text);
    }

    Ok(())
}

fn cmd_json(
    args: &GuideArgs,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.load_config()?;
    let doc = build_guide(&config);

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = to_json(&doc, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_config(args: &GuideArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.load_config()?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn cmd_check(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let detected = detect_format_from_path(input)?;
    let size = verify_output(input, detected.output_format())?;

    println!("{}", "Document Check".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), detected);
    println!("{}: {} bytes", "Size".bold(), size);
    println!("{}", "OK".green().bold());

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "betaguide".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Beta-tester onboarding guide generator");
    println!();
    println!("Outputs: PDF, Word (.docx), plain text, JSON");
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_default_command_is_all() {
        let cli = parse(&["betaguide"]);
        assert!(cli.command.is_none());
        assert!(!cli.guide.no_compress);
    }

    #[test]
    fn test_global_overrides() {
        let cli = parse(&[
            "betaguide",
            "pdf",
            "--qr",
            "code.png",
            "--url",
            "https://example.com/app",
            "--paper",
            "a4",
        ]);
        let config = cli.guide.load_config().unwrap();
        assert_eq!(config.qr_image, PathBuf::from("code.png"));
        assert_eq!(config.launch_url, "https://example.com/app");
        assert_eq!(cli.guide.render_options().page_size, PageSize::A4);
    }

    #[test]
    fn test_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guide.json");
        fs::write(&path, r#"{"app_name": "Huddle", "inviter": "Sam"}"#).unwrap();

        let cli = parse(&["betaguide", "--config", path.to_str().unwrap()]);
        let config = cli.guide.load_config().unwrap();
        assert_eq!(config.app_name, "Huddle");
        assert_eq!(config.inviter, "Sam");
        assert_eq!(config.preview_client, "Expo Go");
    }

    #[test]
    fn test_pdf_command_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("guide.pdf");
        let qr = dir.path().join("none.png");

        let cli = parse(&[
            "betaguide",
            "pdf",
            "--qr",
            qr.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
        ]);
        cmd_pdf(&cli.guide, Some(&out)).unwrap();
        assert!(verify_output(&out, OutputFormat::Pdf).unwrap() > 0);
    }

    #[test]
    fn test_check_rejects_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "hello").unwrap();
        assert!(cmd_check(&path).is_err());
    }
}
