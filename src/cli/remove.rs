use clap::Parser;
use nestrec::Config;
use tracing::{debug, instrument};

use super::{OutputFormat, Session, TargetArgs, print::emit, terminal::Colorize};

/// Command arguments for `nestrec remove`.
#[derive(Debug, Parser)]
#[command(about = "Remove records from the target group by identifier")]
pub struct Remove {
    /// Identifiers to remove (exact, case-sensitive match)
    #[arg(required = true)]
    ids: Vec<String>,

    #[command(flatten)]
    target: TargetArgs,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

impl Remove {
    #[instrument(level = "debug", skip(config))]
    pub fn run(self, mut config: Config) -> anyhow::Result<()> {
        self.target.apply(&mut config);
        let mut session = Session::new(&config);

        self.remove_each(&mut session);
        println!();

        emit(session.structure(), self.output)
    }

    /// Removes every requested identifier in turn, reporting failures without
    /// stopping. Returns the number of records removed.
    pub(super) fn remove_each(&self, session: &mut Session) -> usize {
        let mut removed = 0;
        for id in &self.ids {
            match session.remove(id) {
                Ok(record) => {
                    removed += 1;
                    println!("{}", format!("Removed '{id}'").success());
                    println!("{}", format!("  {record}").dim());
                }
                Err(e) => {
                    debug!(%id, error = %e, "remove failed");
                    eprintln!("{} {e}", "Error:".error());
                }
            }
        }
        removed
    }
}
