use std::path::PathBuf;

mod check;
mod demo;
mod insert;
mod print;
mod remove;
mod terminal;

use check::Check;
use clap::ArgAction;
use demo::Demo;
use insert::Insert;
use nestrec::{Config, Generator, Identifier, Record, Structure, Target};
use print::Print;
use remove::Remove;
use tracing::{info, instrument};

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Seed for the record generator (overrides the configuration)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Number of records in the initial structure (overrides the
    /// configuration)
    #[arg(long, global = true)]
    records: Option<usize>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = self.load_config()?;

        self.command
            .unwrap_or_else(|| Command::Demo(Demo::default()))
            .run(config)
    }

    fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path).map_err(|e| anyhow::anyhow!(e))?,
            None => Config::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(records) = self.records {
            config.set_records(records);
        }
        Ok(config)
    }

    const fn log_level(verbosity: u8) -> tracing::Level {
        match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = Self::log_level(verbosity);
        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Print, insert twice, then remove, printing between steps (default)
    Demo(Demo),

    /// Print every record in the structure
    Print(Print),

    /// Insert records in alphabetical order into the target group
    Insert(Insert),

    /// Remove records from the target group by identifier
    ///
    /// Failures are reported and do not stop the remaining removals.
    Remove(Remove),

    /// Check whether an identifier could be inserted
    Check(Check),
}

impl Command {
    fn run(self, config: Config) -> anyhow::Result<()> {
        match self {
            Self::Demo(command) => command.run(&config)?,
            Self::Print(command) => command.run(&config)?,
            Self::Insert(command) => command.run(config)?,
            Self::Remove(command) => command.run(config)?,
            Self::Check(command) => command.run(&config)?,
        }
        Ok(())
    }
}

/// Overrides for the group an operation acts on.
#[derive(Debug, Default, clap::Args)]
pub struct TargetArgs {
    /// Zero-based position of the category to act on
    #[arg(long)]
    category: Option<usize>,

    /// Zero-based position of the group within the category
    #[arg(long)]
    group: Option<usize>,
}

impl TargetArgs {
    fn apply(&self, config: &mut Config) {
        config.retarget(self.category, self.group);
    }
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// A freshly generated structure plus the generator that keeps supplying
/// records for it.
#[derive(Debug)]
pub struct Session {
    structure: Structure,
    generator: Generator,
    target: Target,
}

impl Session {
    #[instrument(level = "debug", skip(config))]
    fn new(config: &Config) -> Self {
        let mut generator = config
            .seed
            .map_or_else(Generator::from_entropy, Generator::seeded);
        let structure = generator.build(config.records());
        info!(
            seed = ?config.seed,
            records = structure.record_count(),
            target = %config.target(),
            "generated structure"
        );

        Self {
            structure,
            generator,
            target: config.target(),
        }
    }

    const fn structure(&self) -> &Structure {
        &self.structure
    }

    fn insert(&mut self, requested: Option<&str>) -> Result<Identifier, nestrec::Error> {
        self.structure
            .insert(requested, self.target, &mut self.generator)
    }

    fn remove(&mut self, id: &str) -> Result<Record, nestrec::Error> {
        self.structure.remove(id, self.target)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use clap::Parser;
    use nestrec::Error;

    use super::*;
    use crate::cli::check::Verdict;

    /// Collects formatted log output in memory.
    #[derive(Debug, Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Runs `remove` against a fresh seeded session and returns what was
    /// logged at the level `verbosity` selects.
    fn logged_while_removing(remove: &Remove, verbosity: u8) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Cli::log_level(verbosity))
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let config = seeded();
        tracing::subscriber::with_default(subscriber, || {
            remove.remove_each(&mut Session::new(&config));
        });
        captured.contents()
    }

    fn seeded() -> Config {
        let mut config = Config::default();
        config.seed = Some(7);
        config
    }

    /// An identifier already present in the first group of the seeded
    /// structure.
    fn existing(config: &Config) -> String {
        Session::new(config)
            .structure()
            .group(Target::FIRST)
            .and_then(|group| group.records().first())
            .map(|record| record.id().to_string())
            .expect("seeded structure has a populated first group")
    }

    #[test]
    fn load_config_applies_overrides() {
        let cli = Cli::try_parse_from(["nestrec", "--seed", "7", "--records", "12", "print"])
            .unwrap();
        let config = cli.load_config().unwrap();

        assert_eq!(config.seed, Some(7));
        assert_eq!(config.records(), 12);
        assert!(matches!(cli.command, Some(Command::Print(_))));
    }

    #[test]
    fn same_seed_gives_the_same_session() {
        let config = seeded();
        assert_eq!(
            Session::new(&config).structure(),
            Session::new(&config).structure()
        );
    }

    #[test]
    fn target_args_route_into_session() {
        let mut config = seeded();
        let target = TargetArgs {
            category: Some(1),
            group: None,
        };
        target.apply(&mut config);

        assert_eq!(config.target(), Target::new(1, 0));
        let mut session = Session::new(&config);
        assert_eq!(session.target, Target::new(1, 0));
        assert!(session.structure().categories().len() > 1);

        session.insert(Some("Fresh One")).unwrap();
        assert_eq!(
            session.structure().locate("Fresh One"),
            Some(Target::new(1, 0))
        );
    }

    #[test]
    fn insert_run_succeeds_for_fresh_identifiers() {
        let insert = Insert::try_parse_from(["insert", "Fresh One", "Fresh Two"]).unwrap();
        insert.run(seeded()).expect("insert command should succeed");

        let generated = Insert::try_parse_from(["insert"]).unwrap();
        generated.run(seeded()).expect("insert command should succeed");
    }

    #[test]
    fn insert_run_propagates_failures() {
        let malformed = Insert::try_parse_from(["insert", "Fine Name", "a"]).unwrap();
        let error = malformed.run(seeded()).unwrap_err();
        assert_eq!(
            error.downcast_ref::<Error>(),
            Some(&Error::InvalidOrDuplicateIdentifier("a".to_string()))
        );

        let id = existing(&seeded());
        let duplicate = Insert::try_parse_from(["insert", id.as_str()]).unwrap();
        let error = duplicate.run(seeded()).unwrap_err();
        assert_eq!(
            error.downcast_ref::<Error>(),
            Some(&Error::InvalidOrDuplicateIdentifier(id))
        );

        let off_target =
            Insert::try_parse_from(["insert", "--category", "99", "Fresh One"]).unwrap();
        let error = off_target.run(seeded()).unwrap_err();
        assert_eq!(
            error.downcast_ref::<Error>(),
            Some(&Error::CategoryNotFound(99))
        );
    }

    #[test]
    fn demo_run_tolerates_a_failed_remove() {
        // The default removal target does not exist in a generated structure.
        Demo::default()
            .run(&seeded())
            .expect("demo should finish despite the failed removal");
    }

    #[test]
    fn demo_run_propagates_insert_failures() {
        let malformed = Demo::try_parse_from(["demo", "--insert", "1st"]).unwrap();
        let error = malformed.run(&seeded()).unwrap_err();
        assert_eq!(
            error.downcast_ref::<Error>(),
            Some(&Error::InvalidOrDuplicateIdentifier("1st".to_string()))
        );

        let id = existing(&seeded());
        let duplicate = Demo::try_parse_from(["demo", "--insert", id.as_str()]).unwrap();
        assert!(duplicate.run(&seeded()).is_err());
    }

    #[test]
    fn remove_reports_failures_and_carries_on() {
        let config = seeded();
        let first = existing(&config);
        let remove =
            Remove::try_parse_from(["remove", "M Ba", first.as_str(), "Also Missing"]).unwrap();

        let mut session = Session::new(&config);
        let before = session.structure().record_count();
        assert_eq!(remove.remove_each(&mut session), 1);
        assert_eq!(session.structure().record_count(), before - 1);
        assert!(!session.structure().contains(&first));

        remove
            .run(config)
            .expect("remove command should succeed despite failures");
    }

    #[test]
    fn check_refuses_malformed_and_taken_identifiers() {
        let config = seeded();
        let id = existing(&config);
        let session = Session::new(&config);
        let structure = session.structure();

        let fresh = Verdict::of("Fresh One", structure);
        assert!(fresh.insertable());
        assert_eq!(fresh.location(), None);

        assert!(!Verdict::of("a", structure).insertable());
        assert!(!Verdict::of("9 Lives", structure).insertable());

        let taken = Verdict::of(&id, structure);
        assert!(!taken.insertable());
        assert_eq!(taken.location(), Some(Target::FIRST));
    }

    #[test]
    fn failed_removals_are_reported_once_at_the_default_level() {
        let remove = Remove::try_parse_from(["remove", "M Ba"]).unwrap();

        assert!(!logged_while_removing(&remove, 0).contains("remove failed"));
        assert!(logged_while_removing(&remove, 2).contains("remove failed"));
    }
}
