mod input;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chatsave::ChatsaveService;
use chatsave_core::{parse, Conversation, DocumentNode, Options};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use input::Capture;

#[derive(Parser, Debug)]
#[command(name = "chatsave")]
#[command(about = "Export a captured chat conversation to markup, .docx or JSON")]
#[command(version)]
struct Cli {
    /// Captured conversation (JSON)
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Markup)]
    format: Format,

    /// Output file (defaults to input name with the format's extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML file overriding export labels
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Export date (defaults to the captured date, then today)
    #[arg(long)]
    date: Option<String>,

    /// Drop messages whose text repeats an earlier one
    #[arg(long)]
    dedupe: bool,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Markup,
    Docx,
    Json,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Markup => "md",
            Format::Docx => "docx",
            Format::Json => "json",
        }
    }
}

#[derive(Serialize)]
struct ParsedMessage<'a> {
    role: &'a str,
    nodes: Vec<DocumentNode>,
}

fn load_options(path: Option<&Path>) -> Result<Options> {
    let Some(path) = path else {
        return Ok(Options::default());
    };
    let content =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("parse config {}", path.display()))
}

fn parsed_messages(conversation: &Conversation) -> Vec<ParsedMessage<'_>> {
    conversation
        .messages()
        .iter()
        .map(|message| ParsedMessage {
            role: &message.role,
            nodes: parse(&message.text),
        })
        .collect()
}

fn export(conversation: &Conversation, options: &Options, format: Format, output: &Path) -> Result<()> {
    match format {
        Format::Markup => {
            let markup = ChatsaveService::with_options(options.clone()).export_markup(conversation)?;
            fs::write(output, markup).with_context(|| format!("write {}", output.display()))?;
        }
        Format::Docx => {
            let file =
                File::create(output).with_context(|| format!("create {}", output.display()))?;
            let mut writer = chatsave_docx::write_docx(conversation, options, BufWriter::new(file))
                .with_context(|| format!("write {}", output.display()))?;
            writer.flush()?;
        }
        Format::Json => {
            let json = serde_json::to_string_pretty(&parsed_messages(conversation))?;
            fs::write(output, json).with_context(|| format!("write {}", output.display()))?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = load_options(cli.config.as_deref())?;
    let capture = Capture::load(&cli.input)?;

    let date = cli
        .date
        .or_else(|| capture.date.clone())
        .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());
    debug!(%date, "export date");

    let conversation = capture.into_conversation(&options, date, cli.dedupe);
    if conversation.is_empty() {
        bail!("no conversation found");
    }

    let output = cli
        .output
        .unwrap_or_else(|| cli.input.with_extension(cli.format.extension()));
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }

    export(&conversation, &options, cli.format, &output)?;
    info!(messages = conversation.len(), output = %output.display(), "export written");
    println!("Created {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatsave_core::Message;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["chatsave", "chat.json"]).unwrap();
        assert_eq!(cli.format, Format::Markup);
        assert!(cli.output.is_none());
        assert!(!cli.verbose);
        assert_eq!(
            cli.input.with_extension(cli.format.extension()),
            PathBuf::from("chat.md")
        );
    }

    #[test]
    fn test_cli_format() {
        let cli = Cli::try_parse_from(["chatsave", "chat.json", "-f", "docx", "--dedupe"]).unwrap();
        assert_eq!(cli.format, Format::Docx);
        assert!(cli.dedupe);
        assert!(Cli::try_parse_from(["chatsave", "chat.json", "-f", "pdf"]).is_err());
    }

    #[test]
    fn test_options_from_toml() {
        let options: Options = toml::from_str("date_label = \"Datum\"\nseparator_width = 10").unwrap();
        assert_eq!(options.date_label, "Datum");
        assert_eq!(options.separator_width, 10);
        assert_eq!(options.code_label, Options::default().code_label);
    }

    #[test]
    fn test_no_config_uses_defaults() {
        assert_eq!(load_options(None).unwrap(), Options::default());
    }

    #[test]
    fn test_json_export_shape() {
        let mut conversation = Conversation::new(None, "2024-01-01");
        conversation.push(Message::new("User", "# Hi"));

        let json = serde_json::to_value(parsed_messages(&conversation)).unwrap();
        assert_eq!(json[0]["role"], "User");
        assert_eq!(json[0]["nodes"][0]["kind"], "heading");
        assert_eq!(json[0]["nodes"][0]["level"], 1);
        assert_eq!(json[0]["nodes"][0]["runs"][0]["text"], "Hi");
    }
}
