//! Host binary: parses CLI flags, loads configuration, boots the VM on
//! a binary image, and runs it to completion while feeding keyboard
//! input in from a background thread.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::Parser;
use log::{error, info};

use vmcore::config::VmConfig;
use vmcore::cpu::interrupt::InterruptController;
use vmcore::cpu::Cpu;
use vmcore::image;
use vmcore::interrupts::input::{raise_key_event, KeyEventKind};
use vmcore::vfs::FsVfs;

#[derive(Parser, Debug)]
#[command(name = "rvm", about = "Runs a binary image on the register-machine VM")]
struct Cli {
    /// Path to the binary image to load.
    image: Option<PathBuf>,

    /// Directory the guest's VFS is rooted at.
    #[arg(long)]
    vfs_root: Option<PathBuf>,

    /// Optional TOML config file, overlaid under any CLI flags given.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop after this many steps even if the guest never halts.
    #[arg(long)]
    steps: Option<u64>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut cfg = VmConfig {
        image_path: cli.image.clone().unwrap_or_default(),
        vfs_root: cli.vfs_root.clone().unwrap_or_else(|| PathBuf::from(".")),
        log_level: None,
        step_budget: cli.steps,
    };
    if let Some(config_path) = &cli.config {
        cfg = match cfg.merge_from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("reading config {}: {e}", config_path.display());
                return ExitCode::FAILURE;
            }
        };
    }
    if cfg.image_path.as_os_str().is_empty() {
        eprintln!("no image given: pass one as an argument or set image_path in --config");
        return ExitCode::FAILURE;
    }

    init_logging(cfg.log_level.as_deref());

    match run(&cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: Option<&str>) {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(level) = level {
        builder.parse_filters(level);
    }
    builder.init();
}

fn run(cfg: &VmConfig) -> Result<(), vmcore::error::VmError> {
    let bytes = std::fs::read(&cfg.image_path)?;
    let decoded = image::decode(&bytes)?;

    std::fs::create_dir_all(&cfg.vfs_root)?;
    let vfs = FsVfs::new(cfg.vfs_root.clone());
    let interrupts = Arc::new(InterruptController::new());
    let mut cpu = Cpu::with_interrupts(vfs, interrupts.clone());

    cpu.load_image(decoded)?;
    info!("image loaded from {}, entry at {:#010x}", cfg.image_path.display(), cpu.regs.pc());

    spawn_input_thread(interrupts);

    let mut steps: u64 = 0;
    while !cpu.halted {
        cpu.step()?;
        steps += 1;
        if let Some(budget) = cfg.step_budget {
            if steps >= budget {
                info!("step budget of {budget} exhausted, stopping");
                break;
            }
        }
    }
    info!("ran {steps} steps");
    Ok(())
}

/// Reads raw keypresses from stdin in a background thread and raises
/// them as vector-1 interrupts. A stand-in input source: a real
/// frontend (terminal raw mode, GUI) would call
/// [`raise_key_event`] from its own event loop instead.
fn spawn_input_thread(interrupts: Arc<InterruptController>) {
    thread::spawn(move || {
        use std::io::Read;
        let mut stdin = std::io::stdin();
        let mut byte = [0u8; 1];
        loop {
            match stdin.read(&mut byte) {
                Ok(0) => {
                    thread::sleep(Duration::from_millis(50));
                }
                Ok(_) => {
                    raise_key_event(&interrupts, KeyEventKind::KeyDown, byte[0]);
                    raise_key_event(&interrupts, KeyEventKind::KeyPress, byte[0]);
                    raise_key_event(&interrupts, KeyEventKind::KeyUp, byte[0]);
                }
                Err(_) => break,
            }
        }
    });
}
