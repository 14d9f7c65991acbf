use clap::Parser;
use nestrec::Config;
use tracing::instrument;

use super::{OutputFormat, Session, TargetArgs, print::emit, terminal::Colorize};

/// Command arguments for `nestrec insert`.
#[derive(Debug, Parser)]
#[command(about = "Insert records into the target group in alphabetical order")]
pub struct Insert {
    /// Identifiers to insert, in order.
    ///
    /// When none are given a single record with a generated identifier is
    /// inserted.
    ids: Vec<String>,

    #[command(flatten)]
    target: TargetArgs,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

impl Insert {
    #[instrument(level = "debug", skip(config))]
    pub fn run(self, mut config: Config) -> anyhow::Result<()> {
        self.target.apply(&mut config);
        let mut session = Session::new(&config);

        let requested: Vec<Option<&str>> = if self.ids.is_empty() {
            vec![None]
        } else {
            self.ids.iter().map(|id| Some(id.as_str())).collect()
        };

        for id in requested {
            let inserted = session.insert(id)?;
            println!("{}", format!("Inserted '{inserted}'").success());
        }
        println!();

        emit(session.structure(), self.output)
    }
}
