//! Aural CLI — a small demo binary that assembles a scene in code and
//! drives the rendering engine with synthetic transport (spec §9 "the one
//! offline mode explicitly kept in scope"). No file I/O, no OSC, no GUI.

mod scene_demo;

use clap::{Args, Parser, Subcommand};

use aural_calibration::ReceiverMeterBank;
use aural_registry::ReceiverRegistry;
use aural_scheduler::{RenderContext, Scene};

#[derive(Parser)]
#[command(name = "aural")]
#[command(author, version, about = "Aural rendering engine demo CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a small in-code scene with synthetic transport and report
    /// level-meter percentiles plus any scheduling warnings.
    Demo(DemoArgs),
}

#[derive(Args)]
struct DemoArgs {
    /// Sample rate in Hz.
    #[arg(long, default_value = "48000")]
    sample_rate: f32,

    /// Block length in samples.
    #[arg(long, default_value = "256")]
    block_len: usize,

    /// Number of blocks to render.
    #[arg(long, default_value = "200")]
    num_blocks: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Demo(args) => run_demo(args),
    }
}

fn run_demo(args: DemoArgs) -> anyhow::Result<()> {
    let mut ctx = RenderContext::new(args.sample_rate, args.block_len);
    let demo = scene_demo::build();
    let registry = ReceiverRegistry::new();

    let (mut scene, build_warnings) = Scene::build(
        demo.sources,
        demo.reflectors,
        demo.obstacles,
        demo.diffuse_fields,
        demo.masks,
        demo.receivers,
        &registry,
        &ctx,
        0.5,
    );
    for warning in &build_warnings {
        log::warn!("scene assembly warning: {warning}");
    }

    let channel_count = scene.receivers.first().map(|slot| slot.out_channels.len()).unwrap_or(0);
    let mut meters = ReceiverMeterBank::new(channel_count, args.sample_rate, 64, 94.0);

    for block_index in 0..args.num_blocks {
        let input = scene_demo::synthetic_input(args.block_len, block_index);
        let warnings = scene.process_block(&mut ctx, &input);
        for warning in &warnings {
            log::warn!("scheduling warning at block {block_index}: {warning}");
        }
        if let Some(slot) = scene.receivers.first() {
            meters.push_block(&slot.out_channels);
        }
    }

    println!("rendered {} blocks of {} samples at {} Hz", args.num_blocks, args.block_len, args.sample_rate);
    for index in 0..channel_count {
        let p50 = meters.percentile(index, 50.0);
        let p95 = meters.percentile(index, 95.0);
        println!("channel {index}: L50 = {p50:?} dB-SPL, L95 = {p95:?} dB-SPL");
    }

    Ok(())
}
