use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use floorsketch::Editor;
use floorsketch::config::EditorConfig;
use floorsketch::storage;

#[derive(Parser)]
#[command(name = "floorsketch", version, about = "Floor-plan annotation editor")]
struct Args {
    /// Config file to use instead of the user config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a saved plan to PNG
    Render {
        plan: PathBuf,
        /// Output image, defaults to a timestamped file in Pictures
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replay a JSON list of editor messages
    Replay {
        script: PathBuf,
        /// Plan to load before replaying
        #[arg(long)]
        plan: Option<PathBuf>,
        /// Where to write the resulting plan
        #[arg(long)]
        save: Option<PathBuf>,
        /// Where to write the rendered image
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write the effective settings as a config file
    Config {
        /// Destination, defaults to the user config file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let config = match &args.config {
        Some(path) => EditorConfig::load_from(path)?,
        None => EditorConfig::load(),
    };

    match args.command {
        Command::Render { plan, output } => {
            let mut editor = Editor::new(config)?;
            load_plan(&mut editor, &plan)?;
            let output = output_path(output)?;
            storage::save_rgba(&editor.surface().to_rgba_image(), &output)?;
            println!("{}", output.display());
        }
        Command::Replay {
            script,
            plan,
            save,
            output,
        } => {
            let mut editor = Editor::new(config)?;
            if let Some(plan) = &plan {
                load_plan(&mut editor, plan)?;
            }

            let messages = storage::read_script(&script)?;
            log::info!("Replaying {} messages from {}", messages.len(), script.display());
            for msg in messages {
                let outcome = editor.handle(msg);
                log::debug!("{:?}", outcome);
            }

            let counts = editor.session().model.counts();
            log::info!(
                "Plan has {} elements: {} walls, {} doors, {} windows, {} fire, {} security, {} motion",
                counts.total(),
                counts.walls,
                counts.doors,
                counts.windows,
                counts.fire_sensors,
                counts.security_sensors,
                counts.motion_sensors
            );

            if let Some(save) = &save {
                storage::write_plan(save, &editor.save())?;
            }
            if output.is_some() || save.is_none() {
                let output = output_path(output)?;
                storage::save_rgba(&editor.surface().to_rgba_image(), &output)?;
                println!("{}", output.display());
            }
        }
        Command::Config { output } => {
            let path = match output {
                Some(path) => path,
                None => EditorConfig::path().context("No config directory available")?,
            };
            config.save_to(&path)?;
            println!("{}", path.display());
        }
    }

    Ok(())
}

fn load_plan(editor: &mut Editor, path: &Path) -> anyhow::Result<()> {
    let doc = storage::read_plan(path)?;
    editor
        .load(&doc)
        .with_context(|| format!("Failed to load plan {}", path.display()))?;
    Ok(())
}

fn output_path(output: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match output {
        Some(path) => Ok(path),
        None => storage::default_png_path().context("No pictures directory available"),
    }
}
