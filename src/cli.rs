use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::inspect::{InspectOptions, Pass};

pub const DEFAULT_OK_PATH: &str = "bank/storage/jotaro/test_ok.dawproject";
pub const DEFAULT_NG_PATH: &str = "bank/storage/jotaro/test_ng.dawproject";

#[derive(Parser, Debug)]
#[command(name = "dawinspect")]
#[command(version)]
#[command(about = "Compare the insides of a good and a bad .dawproject archive", long_about = None)]
#[command(after_help = "Examples:\n  \
  dawinspect                          run every inspection on the default pair\n  \
  dawinspect files --preview 500      list entries, show 500 chars of project.xml\n  \
  dawinspect structure --element Lanes --ok a.dawproject --ng b.dawproject")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Known good project
    #[arg(long, global = true, value_name = "PATH", default_value = DEFAULT_OK_PATH)]
    pub ok: PathBuf,

    /// Known bad project
    #[arg(long, global = true, value_name = "PATH", default_value = DEFAULT_NG_PATH)]
    pub ng: PathBuf,

    /// Archive entry holding the project XML
    #[arg(long, global = true, value_name = "NAME", default_value = "project.xml")]
    pub entry: String,

    /// Characters of the project XML shown by `files`
    #[arg(long, global = true, value_name = "CHARS", default_value_t = 2000)]
    pub preview: usize,

    /// Tag searched by `audio`
    #[arg(long, global = true, value_name = "TAG", default_value = "Audio")]
    pub tag: String,

    /// Matches printed by `audio`
    #[arg(long, global = true, value_name = "N", default_value_t = 3)]
    pub limit: usize,

    /// Element whose subtree `structure` prints
    #[arg(long, global = true, value_name = "TAG", default_value = "Arrangement")]
    pub element: String,

    /// Log more to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// List archive entries and preview the project XML
    Files,
    /// Show textual tag excerpts from the project XML
    Audio,
    /// Print the element tree of one element
    Structure,
    /// Run files, audio and structure in that order
    All,
}

impl Command {
    /// Passes to run, in order
    pub fn passes(self) -> &'static [Pass] {
        match self {
            Command::Files => &[Pass::Files],
            Command::Audio => &[Pass::Audio],
            Command::Structure => &[Pass::Structure],
            Command::All => &[Pass::Files, Pass::Audio, Pass::Structure],
        }
    }
}

impl Cli {
    /// The pair of archives to compare, in output order.
    pub fn targets(&self) -> [(&'static str, PathBuf); 2] {
        [
            ("OK Project", self.ok.clone()),
            ("NG Project", self.ng.clone()),
        ]
    }

    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::All)
    }

    pub fn options(&self) -> InspectOptions {
        InspectOptions {
            entry: self.entry.clone(),
            preview_chars: self.preview,
            tag: self.tag.clone(),
            limit: self.limit,
            element: self.element.clone(),
        }
    }

    /// Log filter directive derived from `-v`
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
