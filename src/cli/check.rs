use std::process;

use clap::Parser;
use nestrec::{Config, Structure, Target, domain::is_valid_format};
use tracing::instrument;

use super::{Session, terminal::Colorize};

/// Command arguments for `nestrec check`.
#[derive(Debug, Parser)]
#[command(about = "Check an identifier's format and uniqueness")]
pub struct Check {
    /// The identifier to check
    id: String,
}

impl Check {
    #[instrument(level = "debug", skip(config))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let session = Session::new(config);
        let verdict = Verdict::of(&self.id, session.structure());

        if verdict.well_formed {
            println!("format: {}", "valid".success());
        } else {
            println!(
                "format: {} (at least 2 characters, starting with a letter)",
                "invalid".failure()
            );
        }
        match verdict.location() {
            None => println!("unique: {}", "yes".success()),
            Some(target) => println!("unique: {} (used in {target})", "no".failure()),
        }

        // Exit with a non-zero code when the identifier cannot be inserted.
        if !verdict.insertable() {
            process::exit(1);
        }

        Ok(())
    }
}

/// Whether an identifier is well formed, and where it is already in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Verdict {
    well_formed: bool,
    location: Option<Target>,
}

impl Verdict {
    pub(super) fn of(id: &str, structure: &Structure) -> Self {
        Self {
            well_formed: is_valid_format(Some(id)),
            location: structure.locate(id),
        }
    }

    pub(super) const fn location(&self) -> Option<Target> {
        self.location
    }

    pub(super) const fn insertable(&self) -> bool {
        self.well_formed && self.location.is_none()
    }
}
