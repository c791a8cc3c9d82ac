use std::{
    error::Error,
    fmt::Display,
    io::{self, Write},
};

use clap::Parser;
use codespan_reporting::{
    diagnostic::{Diagnostic, Label},
    files::SimpleFiles,
    term::{
        self,
        termcolor::{ColorChoice, ColorSpec, StandardStream, WriteColor},
    },
};
use kmpsearch::{byte_spans, Finder};

const DEMO_TEXT: &str = "ABC ABCDAB ABCDABCDABDE";
const DEMO_PATTERN: &str = "ABCDABD";

#[derive(Parser)]
#[command(version, about, disable_help_subcommand = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Search the built-in example text. This is what runs without a subcommand.
    Demo,
    /// Print the offset of every occurrence of PATTERN in TEXT, counted in characters.
    Search(SearchArgs),
    /// Print the failure table built for PATTERN.
    Table { pattern: String },
}

#[derive(clap::Args)]
struct SearchArgs {
    text: String,
    pattern: String,
    /// Show the text with every match highlighted.
    #[arg(long)]
    show: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut emitter = Emitter::new();
    match args.command.unwrap_or(Command::Demo) {
        Command::Demo => {
            let finder = Finder::new(DEMO_PATTERN)?;
            emitter.positions(DEMO_TEXT, DEMO_PATTERN, &finder.find_all(DEMO_TEXT))?;
        }
        Command::Search(args) => {
            let finder = Finder::new(&args.pattern)?;
            let positions = finder.find_all(&args.text);
            log::info!("found {} matches of `{}`", positions.len(), args.pattern);
            if args.show {
                emitter.show(&args.text, &finder, &args.pattern, &positions)?;
            } else {
                emitter.positions(&args.text, &args.pattern, &positions)?;
            }
        }
        Command::Table { pattern } => {
            let finder = Finder::new(&pattern)?;
            emitter.field("pattern", &pattern)?;
            for (idx, value) in finder.table().iter().enumerate() {
                writeln!(emitter.writer, "{idx}: {value}")?;
            }
        }
    }

    Ok(())
}

struct Emitter {
    writer: StandardStream,
    config: codespan_reporting::term::Config,
}

impl Emitter {
    fn new() -> Self {
        Self {
            writer: StandardStream::stdout(ColorChoice::Auto),
            config: codespan_reporting::term::Config::default(),
        }
    }

    fn field(&mut self, name: &str, value: impl Display) -> io::Result<()> {
        self.writer.set_color(ColorSpec::new().set_bold(true))?;
        write!(self.writer, "{name}:")?;
        self.writer.reset()?;
        writeln!(self.writer, " {value}")
    }

    fn positions(&mut self, text: &str, pattern: &str, positions: &[usize]) -> io::Result<()> {
        self.field("text", text)?;
        self.field("pattern", pattern)?;
        self.field("positions", format!("{positions:?}"))
    }

    fn show(
        &mut self,
        text: &str,
        finder: &Finder,
        pattern: &str,
        positions: &[usize],
    ) -> Result<(), codespan_reporting::files::Error> {
        let mut files = SimpleFiles::new();
        let file_id = files.add("<text>", text);
        let labels = byte_spans(text, finder.pattern().len(), positions)
            .into_iter()
            .zip(positions)
            .map(|(span, offset)| {
                Label::primary(file_id, span).with_message(format!("offset {offset}"))
            })
            .collect();
        let diagnostic = Diagnostic::note()
            .with_message(format!(
                "{} {} of `{pattern}`",
                positions.len(),
                if positions.len() == 1 { "match" } else { "matches" }
            ))
            .with_labels(labels);
        term::emit(&mut self.writer.lock(), &self.config, &files, &diagnostic)
    }
}
