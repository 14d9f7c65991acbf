use clap::Parser;
use nestrec::{Config, Structure, domain::RecordSummary};
use serde::Serialize;
use tracing::instrument;

use super::{OutputFormat, Session};

#[derive(Debug, Parser)]
#[command(about = "Print every record, one line each")]
pub struct Print {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

impl Print {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let session = Session::new(config);
        emit(session.structure(), self.output)
    }
}

#[derive(Debug, Serialize)]
struct Row<'a> {
    index: usize,
    #[serde(flatten)]
    record: RecordSummary<'a>,
}

/// Writes the structure to stdout in the requested format.
pub fn emit(structure: &Structure, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print!("{}", structure.listing()),
        OutputFormat::Json => {
            let rows: Vec<Row> = structure
                .records()
                .enumerate()
                .map(|(index, record)| Row {
                    index: index + 1,
                    record: record.summary(),
                })
                .collect();
            let output = serde_json::json!({
                "count": rows.len(),
                "records": rows,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}
