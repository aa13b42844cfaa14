use crate::constants::CPU_HZ;

/// # Quirks
/// Historical Chip-8 interpreters disagree on a handful of instructions and
/// ROMs are often written against one particular interpreter.
///
/// The defaults describe a single consistent interpretation:
/// - shifts operate on Vx alone
/// - `Fx55`/`Fx65` leave I untouched
/// - sprites wrap around both edges of the screen
/// - logical operations leave VF alone
/// - `Bnnn` jumps relative to V0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Quirks {
    /// `8xy6`/`8xyE` shift Vy and store the result in Vx
    pub shift_reads_vy: bool,
    /// `Fx55`/`Fx65` leave I pointing just past the last register transferred
    pub load_store_increments_i: bool,
    /// Sprites are clipped at the screen edges rather than wrapped
    pub clip_sprites: bool,
    /// `8xy1`/`8xy2`/`8xy3` reset VF to 0
    pub logic_resets_vf: bool,
    /// `Bxnn` jumps to xnn + Vx instead of nnn + V0
    pub jump_uses_vx: bool,
}

/// Tunables for a single run of the virtual machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Instructions executed per second of emulated time
    pub cpu_hz: u32,
    /// Seed for `Cxkk`; `None` seeds from system entropy
    pub seed: Option<u64>,
    pub quirks: Quirks,
}

impl Config {
    pub fn new() -> Self {
        Config {
            cpu_hz: CPU_HZ,
            seed: None,
            quirks: Quirks::default(),
        }
    }

    /// A `cpu_hz` of zero is treated as one instruction per second.
    pub fn with_cpu_hz(self, cpu_hz: u32) -> Self {
        Config {
            cpu_hz: cpu_hz.max(1),
            ..self
        }
    }

    pub fn with_seed(self, seed: u64) -> Self {
        Config {
            seed: Some(seed),
            ..self
        }
    }

    pub fn with_quirks(self, quirks: Quirks) -> Self {
        Config { quirks, ..self }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
