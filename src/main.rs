use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use materialisation::crafting::{compose_by_name, create_part, part_recipe};
use materialisation::describe::{describe_material, describe_tool};
use materialisation::{ItemTag, MaterialError, MaterialSource, MaterialsConfig, PartKind, ToolKind};

#[derive(Parser, Debug)]
#[command(name = "materialisation")]
#[command(about = "Compose tools from handle and head materials")]
struct Args {
    /// Extra material pack (TOML), loaded before the builtin one
    #[arg(short, long)]
    materials: Option<PathBuf>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List packs, their materials and the tool kinds
    List,

    /// Show a material's stats and part recipes
    Show {
        material: String,
    },

    /// Compose a tool and print its stats
    Compose {
        #[command(flatten)]
        tool: ToolArgs,

        /// Print the persisted item tag as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply repeated damage to a freshly composed tool
    Wear {
        #[command(flatten)]
        tool: ToolArgs,

        /// Number of uses
        #[arg(short, long, default_value = "10")]
        uses: u32,

        /// Damage per use
        #[arg(short, long, default_value = "1")]
        amount: u32,

        /// Durability enchantment level
        #[arg(long, default_value = "0")]
        unbreaking: u32,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

#[derive(clap::Args, Debug)]
struct ToolArgs {
    /// pickaxe, axe or shovel
    #[arg(short, long)]
    kind: ToolKind,

    /// Handle material
    #[arg(long)]
    handle: String,

    /// Head material
    #[arg(long)]
    head: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = match args.verbose {
        0 => "materialisation=info",
        1 => "materialisation=debug",
        _ => "materialisation=trace",
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = MaterialsConfig::load(args.materials.as_deref())
        .context("failed to load material packs")?;
    let registry = config.into_registry();
    info!(
        "Loaded {} materials from {} packs",
        registry.all_materials().count(),
        registry.packs().len()
    );

    match args.command {
        Command::List => {
            for pack in registry.packs() {
                println!("{} v{}", pack.info.name, pack.info.version);
                for material in &pack.materials {
                    println!("  {}", material.name);
                }
            }
            println!("Tool kinds");
            for kind in ToolKind::all() {
                println!("  {} (+{} attack)", kind.display_name(), kind.attack_bonus());
            }
        }
        Command::Show { material } => {
            let material = registry
                .lookup_by_name(&material)
                .ok_or(MaterialError::UnknownMaterial(material))?;
            for line in describe_material(material) {
                println!("{line}");
            }
        }
        Command::Compose { tool, json } => {
            let composed = compose_by_name(&registry, tool.kind, &tool.handle, &tool.head)?;
            if json {
                let mut tag = ItemTag::new();
                composed.write_to(&mut tag);
                println!("{}", tag.to_json()?);
            } else {
                for line in describe_tool(&composed) {
                    println!("{line}");
                }
                let handle = registry.lookup_by_name(&tool.handle);
                let head = registry.lookup_by_name(&tool.head);
                if let (Some(handle), Some(head)) = (handle, head) {
                    for (kind, material) in [(PartKind::Handle, handle), (tool.kind.head_part(), head)] {
                        let part = create_part(kind, material);
                        let cost: Vec<String> = part_recipe(material, kind)
                            .into_iter()
                            .map(|(ingredient, count)| format!("{count} {ingredient}"))
                            .collect();
                        println!("  {} ({}): {}", part.display_name(), part.color, cost.join(" or "));
                    }
                }
            }
        }
        Command::Wear {
            tool,
            uses,
            amount,
            unbreaking,
            seed,
        } => {
            let mut composed = compose_by_name(&registry, tool.kind, &tool.handle, &tool.head)?;
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            for use_index in 1..=uses {
                let applied = composed.apply_damage(amount, unbreaking, &mut rng);
                println!(
                    "use {:>4}: {:>6}/{} {}",
                    use_index,
                    composed.current_durability(),
                    composed.max_durability(),
                    if applied { "" } else { "(no damage)" }
                );
                if composed.is_broken() {
                    info!("{} broke after {} uses", composed.display_name(), use_index);
                    break;
                }
            }
        }
    }

    Ok(())
}
