use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use stl_parser::{ParseOptions, TrailingData};

/// Parses STL models and builds indexed meshes from them.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// STL files to load, in order.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// What to do with bytes left after the facets of a binary file.
    #[arg(long, value_enum, default_value_t = TrailingDataArg::Ignore)]
    pub trailing_data: TrailingDataArg,

    /// Stop at the first model that fails to load instead of skipping it.
    #[arg(long)]
    pub fail_fast: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TrailingDataArg {
    Ignore,
    Reject,
    NextSolid,
}

impl From<TrailingDataArg> for TrailingData {
    fn from(arg: TrailingDataArg) -> Self {
        match arg {
            TrailingDataArg::Ignore => TrailingData::Ignore,
            TrailingDataArg::Reject => TrailingData::Reject,
            TrailingDataArg::NextSolid => TrailingData::NextSolid,
        }
    }
}

impl Cli {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            trailing_data: self.trailing_data.into(),
        }
    }
}
