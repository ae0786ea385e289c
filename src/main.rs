use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use zakat::AppCommand;
use zakat::core::assets::{Category, EntryUpdate, NewEntry};
use zakat::core::log::init_logging;
use zakat::core::units::{MetalUnit, parse_number, parse_weight};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Fetch metal prices and display totals and zakat payable
    Summary,
    /// List supported countries and their fixed rates
    Countries,
    /// Select the country whose currency is used
    Country {
        /// Country name or currency code
        name: String,
    },
    /// Add an asset entry
    Add {
        /// cash, gold, silver, investments, business-property, business-inventory
        category: String,
        /// Amount in the selected currency
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// Weight of gold or silver
        #[arg(short, long, allow_hyphen_values = true)]
        weight: Option<String>,
        /// Weight unit: g, oz, vori, 21k, 22k, roti
        #[arg(short, long, allow_hyphen_values = true)]
        unit: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Change an asset entry
    Update {
        id: u64,
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        #[arg(short, long, allow_hyphen_values = true)]
        weight: Option<String>,
        #[arg(short, long, allow_hyphen_values = true)]
        unit: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Remove an asset entry
    Remove { id: u64 },
    /// Reset all entries and clear saved state
    Reset,
    /// Convert a weight between units
    Convert {
        #[arg(allow_hyphen_values = true)]
        weight: String,
        from: String,
        to: String,
    },
}

fn parse_unit(unit: Option<String>) -> Result<Option<MetalUnit>> {
    unit.map(|u| u.parse::<MetalUnit>()).transpose()
}

impl TryFrom<Commands> for AppCommand {
    type Error = anyhow::Error;

    fn try_from(cmd: Commands) -> Result<AppCommand> {
        Ok(match cmd {
            Commands::Summary => AppCommand::Summary,
            Commands::Countries => AppCommand::Countries,
            Commands::Country { name } => AppCommand::SelectCountry(name),
            Commands::Add {
                category,
                amount,
                weight,
                unit,
                description,
            } => AppCommand::Add {
                category: category.parse::<Category>()?,
                entry: NewEntry {
                    amount: amount.as_deref().map(parse_number),
                    weight: weight.as_deref().map(parse_weight),
                    unit: parse_unit(unit)?,
                    description,
                },
            },
            Commands::Update {
                id,
                amount,
                weight,
                unit,
                description,
            } => AppCommand::Update {
                id,
                update: EntryUpdate {
                    amount: amount.as_deref().map(parse_number),
                    weight: weight.as_deref().map(parse_weight),
                    unit: parse_unit(unit)?,
                    description,
                },
            },
            Commands::Remove { id } => AppCommand::Remove(id),
            Commands::Reset => AppCommand::Reset,
            Commands::Convert { weight, from, to } => AppCommand::Convert {
                weight: parse_weight(&weight),
                from: from.parse()?,
                to: to.parse()?,
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => zakat::cli::setup::setup(),
        Some(cmd) => match AppCommand::try_from(cmd) {
            Ok(command) => zakat::run_command(command, cli.config_path.as_deref()).await,
            Err(e) => Err(e),
        },
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
