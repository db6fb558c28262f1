use anyhow::Context;
use clap::Parser;
use dialoguer::{Input, Password};
use dressing_core::account::{NewUser, UserStore};
use dressing_core::{theme_by_code, CharacterModel, GarmentId, LayerPolicy, ResultBrief};
use dressing_room::cli::{Cli, Commands};
use dressing_room::error::DressingError;
use dressing_room::replay::{self, ReplayScript};
use dressing_room::{init_logging, Config, JsonStore};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::Arc;

fn prompt(label: &str, given: Option<String>) -> anyhow::Result<String> {
    match given {
        Some(value) => Ok(value),
        None => Ok(Input::<String>::new()
            .with_prompt(label)
            .interact_text()
            .map_err(DressingError::from)?),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load()?;
    let store_path: PathBuf = match cli.store.clone() {
        Some(path) => path,
        None => config.store_path()?,
    };

    match cli.command {
        Commands::Register {
            username,
            display_name,
            avatar,
        } => {
            let mut store = JsonStore::open(&store_path)
                .with_context(|| format!("opening store {}", store_path.display()))?;

            let username = prompt("Username", username)?;
            let display_name = prompt("Display name", display_name)?;
            let password = Password::new()
                .with_prompt("Password")
                .with_confirmation("Confirm password", "Passwords do not match")
                .interact()
                .map_err(DressingError::from)?;

            let mut user = NewUser::new(username, display_name, password);
            if let Some(avatar) = avatar {
                user = user.with_avatar(avatar);
            }
            let profile = store.create_user(user).map_err(DressingError::from)?;
            println!("✔ Account created: {} ({})", profile.display_name, profile.username);
        }

        Commands::Login { username } => {
            let store = JsonStore::open_existing(&store_path)?;
            let username = prompt("Username", username)?;
            let password = Password::new()
                .with_prompt("Password")
                .interact()
                .map_err(DressingError::from)?;

            let profile = store
                .authenticate(&username, &password)
                .map_err(DressingError::from)?;
            println!("✔ Welcome, {}", profile.display_name);
            println!("  User id: {}", profile.id);
            println!("  Avatar: {}", profile.avatar);
        }

        Commands::Catalog { check_assets } => {
            let store = JsonStore::open(&store_path)?;
            let catalog = store.catalog();
            let policy = LayerPolicy::from_catalog(&catalog);
            let mut missing = Vec::new();

            for category in catalog.categories() {
                let layer = category
                    .layer
                    .map(|layer| format!("{layer:?}"))
                    .unwrap_or_else(|| "inferred".to_string());
                println!("{} [{}] capacity {} layer {}", category.name, category.id, category.capacity, layer);
                for garment in catalog.garments_in(category.id) {
                    println!(
                        "  {:>5}  {:<24} {:<10} {:>4}  layer {}",
                        garment.id,
                        garment.name,
                        garment.theme.as_deref().unwrap_or("-"),
                        garment.price,
                        policy.rank(garment)
                    );
                    if check_assets && !config.resolve_asset(&garment.asset).exists() {
                        missing.push(garment.asset.clone());
                    }
                }
            }
            println!("\n{} categories, {} garments", catalog.categories().len(), catalog.garment_count());

            if check_assets {
                for model in catalog.models() {
                    if !config.resolve_asset(&model.asset).exists() {
                        missing.push(model.asset.clone());
                    }
                }
                if missing.is_empty() {
                    println!("✔ All assets found under {}", config.asset_root.display());
                } else {
                    println!("Missing assets ({}), placeholders will be drawn:", missing.len());
                    for asset in &missing {
                        println!("  {asset}");
                    }
                }
            }
        }

        Commands::Score { theme, garments } => {
            let store = JsonStore::open(&store_path)?;
            let catalog = store.catalog();
            let theme = theme_by_code(&theme).ok_or(DressingError::UnknownTheme(theme))?;

            let worn = garments
                .iter()
                .map(|id| {
                    catalog
                        .garment(GarmentId(*id))
                        .cloned()
                        .ok_or(DressingError::UnknownGarment(*id))
                })
                .collect::<Result<Vec<_>, _>>()?;

            let result = ResultBrief::new(theme, CharacterModel::default(), worn);
            println!("Theme: {}", result.theme.label);
            println!("Score: {}", result.score);
            println!("Money earned: {}", result.reward);
        }

        Commands::Play { script, seed } => {
            let script = ReplayScript::load(&script)
                .with_context(|| format!("reading script {}", script.display()))?;
            let store = JsonStore::open(&store_path)?;
            let catalog = Arc::new(store.catalog());
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };

            let outcome = replay::replay(&script, catalog, &config, &mut rng)?;
            println!(
                "Theme: {}  Character: {}",
                outcome.brief.theme.label, outcome.brief.character.name
            );
            match outcome.result {
                Some(result) => println!("{}", serde_json::to_string_pretty(&result)?),
                None => println!(
                    "Session not validated ({} event(s), {} garment(s) worn)",
                    outcome.consumed,
                    outcome.worn.len()
                ),
            }
        }

        Commands::Config {
            show,
            set_store,
            set_asset_root,
            set_columns,
        } => {
            let mut config = config;

            if let Some(path) = set_store {
                config.set_store_path(path)?;
                println!("✔ Store file set");
            }

            if let Some(path) = set_asset_root {
                config.set_asset_root(path)?;
                println!("✔ Asset root set");
            }

            if let Some(columns) = set_columns {
                config.set_gallery_columns(columns)?;
                println!("✔ Gallery columns set");
            }

            if show {
                println!("Configuration:");
                println!("  Store: {}", config.store_path()?.display());
                println!("  Asset root: {}", config.asset_root.display());
                println!("  Window: {}x{}", config.window_width, config.window_height);
                println!("  Gallery columns: {}", config.gallery_columns);
                println!("  Thumbnail size: {}px", config.thumb_size);
                println!("  Scroll step: {}px", config.scroll_step);
            }
        }
    }

    Ok(())
}
