use clap::Parser;
use nestrec::Config;
use tracing::{debug, instrument};

use super::{OutputFormat, Session, print::emit, terminal::Colorize};

/// Command arguments for `nestrec demo`.
#[derive(Debug, Parser)]
#[command(about = "Print, insert a named and a generated record, then remove one")]
pub struct Demo {
    /// Identifier of the record inserted by name
    #[arg(long, default_value = "New Id")]
    insert: String,

    /// Identifier of the record removed at the end
    #[arg(long, default_value = "M Ba")]
    remove: String,
}

impl Default for Demo {
    fn default() -> Self {
        Self {
            insert: "New Id".to_string(),
            remove: "M Ba".to_string(),
        }
    }
}

impl Demo {
    #[instrument(level = "debug", skip(config))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let mut session = Session::new(config);
        emit(session.structure(), OutputFormat::Table)?;

        // Insert failures end the run.
        session.insert(Some(self.insert.as_str()))?;
        emit(session.structure(), OutputFormat::Table)?;

        session.insert(None)?;
        emit(session.structure(), OutputFormat::Table)?;

        // Remove failures are reported and the run carries on.
        if let Err(e) = session.remove(&self.remove) {
            debug!(id = %self.remove, error = %e, "remove failed");
            eprintln!("{} {e}", "Error:".error());
        }

        Ok(())
    }
}
