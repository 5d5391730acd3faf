//! fluid-schema CLI
//!
//! Builds a schema from a declarative JSON definition and prints it, or
//! shows the names the naming strategy derives.

mod definition;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use fluid_schema::dialect::{GenericDialect, MySqlDialect, SqlServerDialect};
use fluid_schema::{DefaultNamingStrategy, FluidSchema, NamingStrategy, Schema};

use definition::SchemaDefinition;

/// Fluent schema builder with foreign key and naming inference.
#[derive(Parser)]
#[command(name = "fluid-schema")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Identifier quoting applied to every table, column and index name.
    #[arg(
        short,
        long,
        global = true,
        env = "FLUID_SCHEMA_QUOTE",
        value_enum,
        default_value_t = Quote::None
    )]
    quote: Quote,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Quote {
    /// Leave identifiers untouched.
    None,
    /// ANSI double quotes.
    Generic,
    /// MySQL backticks.
    Mysql,
    /// SQL Server brackets.
    Sqlserver,
}

impl Quote {
    fn naming_strategy(self) -> DefaultNamingStrategy {
        let naming = DefaultNamingStrategy::new();
        match self {
            Self::None => naming,
            Self::Generic => naming.with_dialect(GenericDialect::new()),
            Self::Mysql => naming.with_dialect(MySqlDialect::new()),
            Self::Sqlserver => naming.with_dialect(SqlServerDialect::new()),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build a schema from a JSON definition and print it as JSON.
    Build {
        /// Schema definition file.
        file: PathBuf,

        /// Print compact JSON instead of pretty-printed JSON.
        #[arg(long)]
        compact: bool,
    },

    /// Show derived names.
    Names {
        #[command(subcommand)]
        command: NamesCommand,
    },
}

#[derive(Subcommand)]
enum NamesCommand {
    /// Name of the table joining two tables.
    Junction {
        table1: String,
        table2: String,
    },

    /// Name of a column referencing a table.
    ForeignKey {
        table: String,
    },

    /// Quote an identifier.
    Quote {
        identifier: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout only carries command output.
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let naming = cli.quote.naming_strategy();

    match cli.command {
        Commands::Build { file, compact } => {
            let definition = SchemaDefinition::load(&file)?;
            let mut fluid = FluidSchema::with_naming_strategy(Schema::new(), naming);
            definition.apply(&mut fluid)?;

            let schema = fluid.into_schema();
            info!(file = %file.display(), tables = schema.tables().len(), "Built schema");
            let json = if compact {
                serde_json::to_string(&schema)?
            } else {
                serde_json::to_string_pretty(&schema)?
            };
            println!("{json}");
        }

        Commands::Names { command } => match command {
            NamesCommand::Junction { table1, table2 } => {
                println!("{}", naming.junction_table_name(&table1, &table2));
            }
            NamesCommand::ForeignKey { table } => {
                println!("{}", naming.foreign_key_column_name(&table));
            }
            NamesCommand::Quote { identifier } => {
                println!("{}", naming.quote_identifier(&identifier));
            }
        },
    }

    Ok(())
}
