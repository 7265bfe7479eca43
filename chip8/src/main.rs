//! Runs a CHIP-8 ROM in an SDL2 window.
//!
//! ```text
//! chip8 roms/PONG --ips 500 --scale 12
//! ```
//!
//! The keypad is on the left four columns of the keyboard (see `keymap`),
//! `T` toggles the instruction trace and `Escape` quits. Set `RUST_LOG` to
//! see more of what the machine is doing, e.g. `RUST_LOG=debug`.

use std::path::PathBuf;

use clap::Parser;

mod keymap;
mod run;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the ROM file to run
    rom: PathBuf,

    /// Instructions per second
    #[arg(short, long, default_value_t = run::DEFAULT_IPS)]
    ips: u32,

    /// Size of each CHIP-8 pixel on screen
    #[arg(short, long, default_value_t = 10)]
    scale: u32,

    /// Start with the instruction trace on
    #[arg(short, long)]
    trace: bool,

    /// 8XY6/8XYE shift Vx in place instead of reading Vy
    #[arg(long)]
    shift_vx: bool,

    /// Clip sprites at the screen edges instead of wrapping them
    #[arg(long)]
    clip_sprites: bool,

    /// Seed for CXNN's random numbers
    #[arg(long)]
    seed: Option<u64>,
}

impl From<Args> for run::Config {
    fn from(args: Args) -> Self {
        let quirks = vip8::Quirks {
            shift_source: if args.shift_vx {
                vip8::ShiftSource::Vx
            } else {
                vip8::ShiftSource::Vy
            },
            sprite_edges: if args.clip_sprites {
                vip8::SpriteEdges::Clip
            } else {
                vip8::SpriteEdges::Wrap
            },
        };
        run::Config {
            rom: args.rom,
            ips: args.ips.max(1),
            scale: args.scale.max(1),
            trace: args.trace,
            quirks,
            seed: args.seed,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let env = env_logger::Env::default().default_filter_or("info,vip8::cycle=trace");
    env_logger::Builder::from_env(env).init();
    let args = Args::parse();
    run::run(args.into())
}
