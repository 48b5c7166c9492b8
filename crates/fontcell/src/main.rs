#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use fontcell_engine::{AddressingMode, ArrayStyle, ConversionRequest, Diagnostic, DiagnosticLevel, FontFace, GlyphSource, convert};

mod preview;
mod settings;

use settings::Settings;

#[derive(Parser)]
#[command(version, about = "Converts TTF/OTF fonts into fixed-cell bitmap font arrays for embedded displays.")]
struct Cli {
    #[arg(help = "TTF/OTF font file to convert.", required = true)]
    font: PathBuf,

    #[arg(help = "Cell width in pixels.", long, default_value_t = 16)]
    width: u32,

    #[arg(help = "Cell height in pixels, also used as the point size.", long, default_value_t = 16)]
    height: u32,

    #[arg(help = "First code point of the range (inclusive).", long, default_value_t = 32)]
    start: u32,

    #[arg(help = "Last code point of the range (inclusive).", long, default_value_t = 126)]
    end: u32,

    #[arg(help = "Identifier used in the generated array declaration.", long, default_value = "MyFontName")]
    font_name: String,

    #[arg(help = "Output file [default: my_font_file.hpp or .h, matching the style].", long)]
    output: Option<PathBuf>,

    #[arg(help = "Array declaration style.", long, value_enum, default_value = "cpp")]
    style: StyleArg,

    #[arg(help = "Bit addressing convention.", long, value_enum, default_value = "horizontal")]
    addressing: AddressingArg,

    #[arg(help = "Print a terminal preview of the converted glyphs.", long, default_value_t = false)]
    preview: bool,

    #[arg(help = "Report per-glyph placement detail.", long, default_value_t = false)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StyleArg {
    C,
    Cpp,
}

impl From<StyleArg> for ArrayStyle {
    fn from(value: StyleArg) -> Self {
        match value {
            StyleArg::C => ArrayStyle::C,
            StyleArg::Cpp => ArrayStyle::Cpp,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AddressingArg {
    Horizontal,
    Vertical,
}

impl From<AddressingArg> for AddressingMode {
    fn from(value: AddressingArg) -> Self {
        match value {
            AddressingArg::Horizontal => AddressingMode::Horizontal,
            AddressingArg::Vertical => AddressingMode::Vertical,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let _logger = flexi_logger::Logger::try_with_env_or_str(if args.verbose { "debug" } else { "info" })
        .context("invalid log specification")?
        .log_to_stderr()
        .start()
        .context("logger setup failed")?;

    let settings = Settings::load();
    let verbose = args.verbose || settings.verbose;

    let face = FontFace::from_file(&args.font).with_context(|| format!("cannot open font {}", args.font.display()))?;
    if let Some((ascent, descent)) = face.vertical_metrics(args.height as f32) {
        log::info!(
            "Font: {} | Size: {}x{} | Ascent: {:.0}px Descent: {:.0}px",
            face.name(),
            args.width,
            args.height,
            ascent,
            descent
        );
    }

    let request = ConversionRequest {
        cell_width: args.width,
        cell_height: args.height,
        code_start: args.start,
        code_end: args.end,
        addressing_mode: args.addressing.into(),
        array_style: args.style.into(),
        font_identifier: args.font_name.clone(),
        verbose,
    };
    let run = convert(&request, &face)?;
    for diagnostic in &run.diagnostics {
        report(diagnostic);
    }

    let output = args.output.unwrap_or_else(|| default_output(args.style));
    write_artifact(&output, &run.artifact).with_context(|| format!("cannot write {}", output.display()))?;
    report(&Diagnostic::success(format!("Saved: {}", output.display())));

    if args.preview {
        preview::print(&run.result, &request, settings.preview_scale, settings.preview_cols);
    }
    Ok(())
}

/// Write the complete artifact to a temp file, then rename it into place.
/// An interrupted run never leaves a truncated output file.
fn write_artifact(path: &Path, artifact: &str) -> std::io::Result<()> {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("fontcell-out");
    let temp = path.with_file_name(format!(".{name}.tmp"));
    if let Err(err) = fs::write(&temp, artifact) {
        let _ = fs::remove_file(&temp);
        return Err(err);
    }
    fs::rename(&temp, path)
}

fn default_output(style: StyleArg) -> PathBuf {
    match style {
        StyleArg::Cpp => PathBuf::from("my_font_file.hpp"),
        StyleArg::C => PathBuf::from("my_font_file.h"),
    }
}

fn report(diagnostic: &Diagnostic) {
    match diagnostic.level {
        DiagnosticLevel::Warning => log::warn!("{}", diagnostic.message),
        DiagnosticLevel::Error => log::error!("{}", diagnostic.message),
        DiagnosticLevel::Info | DiagnosticLevel::Success => log::info!("{}", diagnostic.message),
    }
}
