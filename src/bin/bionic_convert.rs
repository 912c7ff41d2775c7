//! Convert a DOCX or PDF file into a bionic-reading PDF.
//!
//! Usage:
//!   bionic_convert <input.docx|input.pdf> [options]
//!
//! Options:
//!   --output, -o <file>     PDF to write (default: document.pdf)
//!   --preview <file>        also write the HTML preview
//!   --settings <file>       JSON settings file
//!   --theme <name>          Default, Cream, Soft Blue or Dark Mode
//!   --size <pt>             text size
//!   --line-spacing <x>      line spacing multiplier
//!   --char-spacing <pt>     character spacing
//!   --font-dir <dir>        directory holding the font files
//!   --compress              compress PDF streams
//!
//! Set `RUST_LOG=debug` for pipeline logging.

use bionic_oxide::api::{Converter, ReaderSession, DOWNLOAD_FILE_NAME};
use bionic_oxide::config::{Settings, Theme};
use bionic_oxide::extractors::Upload;
use std::path::PathBuf;
use std::process::ExitCode;

struct CliConfig {
    input: PathBuf,
    output: PathBuf,
    preview: Option<PathBuf>,
    font_dir: Option<PathBuf>,
    compress: bool,
    settings: Settings,
}

impl CliConfig {
    fn from_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut input = None;
        let mut output = PathBuf::from(DOWNLOAD_FILE_NAME);
        let mut preview = None;
        let mut font_dir = None;
        let mut compress = false;
        let mut settings = Settings::default();

        let mut i = 0;
        while i < args.len() {
            let arg = args[i].as_str();
            let mut value = || -> Result<String, String> {
                i += 1;
                args.get(i)
                    .cloned()
                    .ok_or_else(|| format!("missing value for {}", arg))
            };
            match arg {
                "--output" | "-o" => output = PathBuf::from(value()?),
                "--preview" => preview = Some(PathBuf::from(value()?)),
                "--font-dir" => font_dir = Some(PathBuf::from(value()?)),
                "--settings" => {
                    let path = value()?;
                    settings = Settings::from_json_file(&path).map_err(|e| e.to_string())?;
                    log::debug!("Loaded settings from {}", path);
                },
                "--theme" => {
                    let label = value()?;
                    let theme = Theme::from_label(&label)
                        .ok_or_else(|| format!("unknown theme '{}'", label))?;
                    settings.apply_theme(theme);
                },
                "--size" => settings.text_size = parse_number(&value()?)?,
                "--line-spacing" => settings.line_spacing = parse_number(&value()?)?,
                "--char-spacing" => settings.char_spacing = parse_number(&value()?)?,
                "--compress" => compress = true,
                "--help" | "-h" => return Err(usage()),
                other if other.starts_with('-') => {
                    return Err(format!("unknown option {}\n\n{}", other, usage()))
                },
                other => input = Some(PathBuf::from(other)),
            }
            i += 1;
        }

        let input = input.ok_or_else(usage)?;
        settings.validate().map_err(|e| e.to_string())?;

        Ok(Self {
            input,
            output,
            preview,
            font_dir,
            compress,
            settings,
        })
    }
}

fn parse_number(value: &str) -> Result<f32, String> {
    value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))
}

fn usage() -> String {
    "usage: bionic_convert <input.docx|input.pdf> [--output FILE] [--preview FILE] \
     [--settings FILE] [--theme NAME] [--size PT] [--line-spacing X] [--char-spacing PT] \
     [--font-dir DIR] [--compress]"
        .to_string()
}

fn run(config: CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let converter = match &config.font_dir {
        Some(dir) => Converter::with_font_dir(dir),
        None => Converter::new(),
    }
    .with_compress(config.compress);
    for warning in converter.warnings() {
        eprintln!("Warning: {}", warning);
    }

    let upload = Upload::from_file(&config.input)?;
    let mut session = ReaderSession::with_settings(config.settings);
    session.upload(&converter, &upload)?;

    if let (Some(path), Some(preview)) = (&config.preview, session.preview()) {
        std::fs::write(path, preview)?;
        println!("Preview: {}", path.display());
    }

    match session.download() {
        Some(download) => {
            std::fs::write(&config.output, download.data)?;
            println!(
                "Wrote {} ({} bytes, {})",
                config.output.display(),
                download.data.len(),
                download.mime
            );
            Ok(())
        },
        None => Err(session
            .error()
            .unwrap_or("no PDF was generated")
            .to_string()
            .into()),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let config = match CliConfig::from_args() {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::from(2);
        },
    };

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}
