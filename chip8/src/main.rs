use std::fs::File;
use std::io::{BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use emu8_core::constants::CPU_HZ;
use emu8_core::{read_rom, Config, Quirks};

mod keymap;
mod run;

/// Runs a Chip-8 program in the terminal
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the ROM to run
    rom: PathBuf,

    /// Instructions executed per second
    #[arg(long, default_value_t = CPU_HZ)]
    cpu_hz: u32,

    /// Seed for Cxkk, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// 8xy6/8xyE shift Vy into Vx
    #[arg(long)]
    shift_vy: bool,

    /// Fx55/Fx65 leave I past the last register
    #[arg(long)]
    increment_i: bool,

    /// Clip sprites at the screen edges instead of wrapping them
    #[arg(long)]
    clip: bool,

    /// 8xy1/8xy2/8xy3 reset VF
    #[arg(long)]
    vf_reset: bool,

    /// Bxnn jumps to xnn + Vx
    #[arg(long)]
    jump_vx: bool,

    /// Run without the terminal and print the final frame
    #[arg(long)]
    headless: bool,

    /// Number of 60Hz frames to run for when headless
    #[arg(long, default_value_t = 60)]
    frames: u64,
}

impl Args {
    fn config(&self) -> Config {
        let config = Config::new()
            .with_cpu_hz(self.cpu_hz)
            .with_quirks(Quirks {
                shift_reads_vy: self.shift_vy,
                load_store_increments_i: self.increment_i,
                clip_sprites: self.clip,
                logic_resets_vf: self.vf_reset,
                jump_uses_vx: self.jump_vx,
            });
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::builder()
        .format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()))
        .init();

    let file = File::open(&args.rom)
        .with_context(|| format!("unable to open {}", args.rom.display()))?;
    let program = read_rom(&mut BufReader::new(file))
        .with_context(|| format!("unable to read {}", args.rom.display()))?;
    log::info!("read {} bytes from {}", program.len(), args.rom.display());

    if args.headless {
        let chip8 = run::run_headless(&program, args.config(), args.frames)?;
        for line in display::frame_to_text(chip8.frame()) {
            println!("{}", line.trim_end());
        }
        Ok(())
    } else {
        run::run(&program, args.config())
    }
}
