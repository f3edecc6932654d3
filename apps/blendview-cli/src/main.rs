use anyhow::Context;
use blendview_app::{AppConfig, AppContext, InputScript};
use blendview_scene::{DebugTextRenderer, Renderer, Scene};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "blendview-cli", about = "Headless driver for the blendview camera demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// YAML config file (defaults reproduce the stock demo)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Print the effective configuration as YAML
    Config,
    /// Play an input script and print the camera state per frame
    Simulate {
        /// YAML input script
        #[arg(short, long)]
        script: PathBuf,
        /// Emit frames as a JSON array instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the draw list as seen from the configured camera
    Scene {
        /// YAML scene file (overrides the config's scene)
        #[arg(short, long)]
        scene: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AppConfig::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("blendview-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("camera: {}", blendview_camera::crate_info());
            println!("input: {}", blendview_input::crate_info());
            println!("scene: {}", blendview_scene::crate_info());
            println!("app: {}", blendview_app::crate_info());
            println!(
                "move speed: {} units/s, pitch limit: +/-{} deg",
                blendview_camera::MOVE_NORMALIZER,
                blendview_camera::PITCH_LIMIT
            );
        }
        Commands::Config => {
            print!("{}", config.to_yaml_string()?);
        }
        Commands::Simulate { script, json } => {
            let script = InputScript::load(&script)
                .with_context(|| format!("loading script {}", script.display()))?;
            let mut ctx = AppContext::new(&config);
            let outputs = script.run(&mut ctx);

            if json {
                println!("{}", serde_json::to_string_pretty(&outputs)?);
            } else {
                for out in &outputs {
                    let p = out.camera_position;
                    let d = out.camera_direction;
                    println!(
                        "frame {:>4} t={:.3} dt={:.4} pos=({:.3}, {:.3}, {:.3}) dir=({:.3}, {:.3}, {:.3}) yaw={:.2} pitch={:.2} fov={:.1}{}",
                        out.frame,
                        out.time,
                        out.delta_time,
                        p.x,
                        p.y,
                        p.z,
                        d.x,
                        d.y,
                        d.z,
                        out.yaw,
                        out.pitch,
                        out.fov,
                        if out.quit { " quit" } else { "" }
                    );
                }
            }

            let timer = ctx.timer();
            tracing::info!(
                frames = outputs.len(),
                avg_ms = timer.average().as_secs_f64() * 1000.0,
                fps = timer.fps(),
                "simulation finished"
            );
        }
        Commands::Scene { scene } => {
            let scene = match scene.as_ref().or(config.scene.as_ref()) {
                Some(path) => Scene::load(path)
                    .with_context(|| format!("loading scene {}", path.display()))?,
                None => Scene::demo(),
            };
            let ctx = AppContext::new(&config);
            let output = DebugTextRenderer::new().render(&scene, &ctx.render_view());
            print!("{output}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_accepted_after_subcommand() {
        let cli = Cli::try_parse_from([
            "blendview-cli",
            "simulate",
            "-v",
            "--config",
            "demos/config.yaml",
            "--script",
            "demos/walkthrough.yaml",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("demos/config.yaml")));
        assert!(matches!(cli.command, Commands::Simulate { json: false, .. }));
    }

    #[test]
    fn verbose_defaults_off() {
        let cli = Cli::try_parse_from(["blendview-cli", "info"]).unwrap();
        assert!(!cli.verbose);
        assert!(cli.config.is_none());
    }
}
