use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use cosmos_kernel::{GenesisConfig, TerminalInputs, World, census};
use cosmos_tools::{EntityInfo, WorldInspector, form_petition};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cosmos-cli", about = "CLI for the cosmos world-state simulation")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Run the reference scenario: create, populate, petition, estimate, complete
    Run {
        #[command(flatten)]
        world: WorldArgs,
    },
    /// Estimate the days remaining for a freshly built world
    Estimate {
        #[command(flatten)]
        world: WorldArgs,
        /// Number of entities to add before estimating
        #[arg(short, long, default_value = "0")]
        entities: usize,
        /// Days assumed to have passed since creation
        #[arg(long, default_value = "0")]
        elapsed_days: f64,
    },
    /// Print an inspector summary of a freshly built world
    Inspect {
        #[command(flatten)]
        world: WorldArgs,
        /// Number of entities to add before inspecting
        #[arg(short, long, default_value = "2")]
        entities: usize,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct WorldArgs {
    /// Length of the constant table
    #[arg(long, default_value = "30")]
    constants: usize,
    /// Initial entropy level
    #[arg(long, default_value = "0.618")]
    entropy: f64,
    /// Entropy at the terminal state
    #[arg(long, default_value = "1.0")]
    max_entropy: f64,
    /// Total lifespan in days
    #[arg(long, default_value = "1825000")]
    lifespan_days: u64,
}

impl From<&WorldArgs> for GenesisConfig {
    fn from(args: &WorldArgs) -> Self {
        Self {
            num_constants: args.constants,
            entropy_level: args.entropy,
            max_entropy: args.max_entropy,
            lifespan_days: args.lifespan_days,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("cosmos-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("tools: {}", cosmos_tools::crate_info());
            println!("genesis defaults: {:?}", GenesisConfig::default());
        }
        Commands::Run { world } => {
            run_scenario(&GenesisConfig::from(&world))?;
            tracing::debug!(
                created = census::created(),
                released = census::released(),
                "scenario finished"
            );
            if census::live() != 0 {
                anyhow::bail!("{} worlds were not released", census::live());
            }
            println!("Simulation completed successfully");
        }
        Commands::Estimate {
            world,
            entities,
            elapsed_days,
        } => {
            let w = populate(&GenesisConfig::from(&world), entities)?;
            let inputs = TerminalInputs {
                elapsed_days,
                ..w.terminal_inputs_at(w.created_at())
            };
            let days = inputs.estimate().context("terminal estimate failed")?;
            println!("{days} days");
        }
        Commands::Inspect {
            world,
            entities,
            json,
        } => {
            let w = populate(&GenesisConfig::from(&world), entities)?;
            let summary = WorldInspector::summary(&w)?;
            let infos: Vec<EntityInfo> = w.entities().iter().map(EntityInfo::from).collect();
            if json {
                let doc = serde_json::json!({ "world": summary, "entities": infos });
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                println!("{summary}");
                for info in &infos {
                    println!("  {info}");
                }
            }
        }
    }

    Ok(())
}

fn populate(config: &GenesisConfig, entities: usize) -> anyhow::Result<World> {
    let mut world = World::genesis(config).context("world creation failed")?;
    for i in 1..=entities {
        world
            .add_entity(&format!("Entity{i}"))
            .with_context(|| format!("failed to add entity {i}"))?;
    }
    Ok(world)
}

/// Every world built here is dropped before returning.
fn run_scenario(config: &GenesisConfig) -> anyhow::Result<()> {
    println!("Starting simulation...");

    let mut world = World::genesis(config).context("world creation failed")?;
    println!("World created with {} constants", world.num_constants());

    let first = world.add_entity("Human1").context("failed to create entity")?;
    let second = world.add_entity("Human2").context("failed to create entity")?;
    let petitioner = world.entity(first).context("entity Human1 missing")?;
    let other = world.entity(second).context("entity Human2 missing")?;
    println!(
        "Created entities: {} and {}",
        petitioner.name(),
        other.name()
    );

    let petition = form_petition(petitioner).context("petition formation failed")?;
    println!("Petition received: {petition}");

    let answered = world
        .respond_to_petition(petitioner, &petition)
        .context("petition response failed")?;
    println!(
        "Petition answered - derived world: entropy={:.4} lifespan={}d",
        answered.entropy_level(),
        answered.lifespan_days()
    );

    let days = world.terminal_days().context("terminal estimate failed")?;
    println!();
    println!("===============================================");
    println!("DAYS UNTIL TERMINAL STATE");
    println!("===============================================");
    println!("{days} days");
    println!("===============================================");
    println!();

    let completed = world.complete().context("completion failed")?;
    println!(
        "World completed: entropy={:.4}/{:.4}",
        completed.entropy_level(),
        completed.max_entropy()
    );

    Ok(())
}
