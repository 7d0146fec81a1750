use clap::Parser;
use std::path::PathBuf;

use crate::processor::FieldId;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Input scene .json file
    pub scene: PathBuf,
    /// Output scene .json file
    pub output: PathBuf,
    /// Extra script files, loaded after the scene's own scripts
    #[arg(short, long = "script")]
    pub scripts: Vec<PathBuf>,
    /// Simulation ticks to run in play mode
    #[arg(short, long, default_value_t = 1)]
    pub ticks: u32,
    /// Field edit applied before the first tick: <script>:line_<n>=<value>
    #[arg(short, long = "field", value_parser = parse_field_edit)]
    pub fields: Vec<FieldEdit>,
    /// Load and re-save without entering play mode
    #[arg(long)]
    pub no_play: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldEdit {
    pub script: String,
    pub field: FieldId,
    pub value: String,
}

fn parse_field_edit(s: &str) -> Result<FieldEdit, String> {
    let (target, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected <script>:line_<n>=<value>, got `{s}`"))?;
    let (script, field) = target
        .rsplit_once(':')
        .ok_or_else(|| format!("missing `:` between script and field in `{s}`"))?;
    Ok(FieldEdit {
        script: script.to_string(),
        field: field.trim().parse()?,
        value: value.to_string(),
    })
}
