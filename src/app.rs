use std::{
    env,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use snesplay_emu::{Console, ConsoleConfig};
use snesplay_rom::{Cartridge, Rom};
use wdc65816::Address;

/// CPU cycles between two vblank NMIs, roughly NTSC timing at 6 master clocks per cycle.
const CYCLES_PER_FRAME: u64 = 357_366 / 6;

pub struct App {
    console: Console,
    config:  ConsoleConfig,
}

impl App {
    pub fn from_env() -> Result<Self> {
        let rom_path = if let Some(rom_path) = env::var_os("ROM_PATH") {
            log::info!("Opening ROM from path defined in ROM_PATH");
            PathBuf::from(rom_path)
        } else if let Some(arg) = env::args_os().nth(1) {
            PathBuf::from(arg)
        } else {
            bail!("No ROM given: set ROM_PATH or pass a path as the first argument");
        };
        Self::new(rom_path, Self::config_from_env()?)
    }

    fn config_from_env() -> Result<ConsoleConfig> {
        let mut config = ConsoleConfig::default();
        if let Ok(steps) = env::var("SNESPLAY_STEPS") {
            config.steps = steps.parse().with_context(|| format!("Invalid SNESPLAY_STEPS: {steps}"))?;
        }
        config.save_state_path = env::var_os("SNESPLAY_SAVE_STATE").map(PathBuf::from);
        config.trace = env::var_os("SNESPLAY_TRACE").is_some();
        Ok(config)
    }

    pub fn new(rom_path: impl AsRef<Path>, config: ConsoleConfig) -> Result<Self> {
        let rom = Rom::from_file(&rom_path).with_context(|| format!("Reading {}", rom_path.as_ref().display()))?;
        let cart = Cartridge::new(rom).context("Loading cartridge")?;
        let mut console = Console::new();
        console.insert(cart)?;
        Ok(Self { console, config })
    }

    pub fn run(mut self) -> Result<()> {
        log::info!("Running {} instructions", self.config.steps);
        let mut frame_cycles = 0;
        let mut frames = 0u64;

        for step in 0..self.config.steps {
            if self.console.cpu.interrupts.is_stopped() {
                log::warn!("CPU stopped after {step} instructions");
                break;
            }
            let cy = self.console.tick().with_context(|| format!("Instruction {step}"))?;
            if self.config.trace {
                log::info!("{}", self.console.cpu.regs);
            }

            // Counted even while the CPU sleeps so that vblank still arrives.
            frame_cycles += u64::from(cy.max(1));
            if frame_cycles >= CYCLES_PER_FRAME {
                frame_cycles -= CYCLES_PER_FRAME;
                frames += 1;
                self.console.request_nmi();
            }
        }

        let regs = &self.console.cpu.regs;
        log::info!(
            "Finished at {} after {} cycles and {frames} frames",
            Address::new(regs.k, regs.pc),
            self.console.cpu.cycles(),
        );

        if let Some(path) = &self.config.save_state_path {
            let bytes = self.console.save_state().to_bytes().context("Encoding save state")?;
            fs::write(path, bytes).with_context(|| format!("Writing save state to {}", path.display()))?;
            log::info!("Saved state to {}", path.display());
        }
        Ok(())
    }
}
