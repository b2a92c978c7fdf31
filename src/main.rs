use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use titan1280_rs::config::{SETTINGS_FILE, SettingsStore};
use titan1280_rs::image_pipeline::{FrameSource, ImageFileSource, PngSequenceSink};
use titan1280_rs::logger;
use titan1280_rs::serial::{BaudRate, DeviceCommand, SerialChannel, SystemTransportProvider, TransportProvider};
use titan1280_rs::viewer::{Action, ActionOutcome, Viewer};

/// How long to collect device replies after a command.
const REPLY_WINDOW: Duration = Duration::from_millis(300);

#[derive(Parser, Debug)]
#[command(name = "titan1280", version, about = "Dual-plane 16-bit thermal camera tools")]
struct Cli {
    /// Debug logging with span timings
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings JSON used for display parameters
    #[arg(long, global = true, default_value = SETTINGS_FILE)]
    settings: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List serial ports
    Ports,

    /// Run stored dual captures through the pipeline and save TIF + PNG of the last one
    Render {
        #[arg(required = true)]
        captures: Vec<PathBuf>,

        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,

        /// Also record every frame after the first as a PNG sequence
        #[arg(long)]
        record: bool,
    },

    /// Send a hex command, e.g. "AA 05 00 16 01 00 C6 EB AA"
    Send {
        #[arg(long)]
        port: String,

        #[arg(long, default_value_t = 115200)]
        baud: u32,

        hex: String,
    },

    /// Trigger a non-uniformity correction
    Nuc {
        #[arg(long)]
        port: String,

        #[arg(long, default_value_t = 115200)]
        baud: u32,

        /// Correct without closing the shutter
        #[arg(long)]
        no_shutter: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    info!("titan1280 v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Ports => list_ports(),
        Command::Render { captures, out, record } => render(&cli.settings, captures, out, record),
        Command::Send { port, baud, hex } => with_channel(&port, baud, |channel| Ok(channel.send(&hex)?)),
        Command::Nuc { port, baud, no_shutter } => {
            let command = if no_shutter {
                DeviceCommand::NucNoShutter
            } else {
                DeviceCommand::NucNormal
            };
            with_channel(&port, baud, |channel| Ok(channel.send_command(command)?))
        }
    }
}

fn list_ports() -> anyhow::Result<()> {
    let ports = SystemTransportProvider::new().available_ports()?;
    if ports.is_empty() {
        println!("No ports");
    }
    for port in ports {
        println!("{port}");
    }
    Ok(())
}

fn render(settings: &Path, captures: Vec<PathBuf>, out: PathBuf, record: bool) -> anyhow::Result<()> {
    std::fs::create_dir_all(&out).with_context(|| format!("creating {}", out.display()))?;

    let store = SettingsStore::new(settings);
    let persisted = store.load_or_default();
    let mut viewer = Viewer::new(
        SystemTransportProvider::new(),
        store,
        Box::new(PngSequenceSink::new(&out)),
        &out,
    );
    persisted.apply(viewer.config_mut());

    let mut source = ImageFileSource::new(captures);
    let mut processed = 0u64;
    if record {
        let Some(first) = source.next_frame()? else {
            bail!("no captures to render");
        };
        viewer.process_frame(&first)?;
        processed += 1;
        viewer.dispatch(Action::ToggleRecording)?;
    }
    processed += viewer.run(&mut source)?;

    if processed == 0 {
        bail!("no capture could be processed");
    }

    for action in [Action::SaveRaw, Action::SavePreview] {
        if let ActionOutcome::Saved(path) = viewer.dispatch(action)? {
            println!("{}", path.display());
        }
    }
    if viewer.is_recording() {
        if let ActionOutcome::RecordingStopped(summary) = viewer.dispatch(Action::ToggleRecording)? {
            info!(frames = summary.frames, "Recording written to {}", out.display());
        }
    }
    Ok(())
}

fn with_channel<F>(port: &str, baud: u32, send: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut SerialChannel<SystemTransportProvider>) -> anyhow::Result<()>,
{
    let baud = BaudRate::try_from(baud)?;
    let mut channel = SerialChannel::new(SystemTransportProvider::new());
    channel.connect(port, baud)?;

    let result = send(&mut channel);
    if result.is_ok() {
        thread::sleep(REPLY_WINDOW);
        for record in channel.rx_log().snapshot() {
            println!("RX {}", record.hex);
        }
    }
    if let Some(fault) = channel.take_fault() {
        warn!("Serial link lost: {}", fault);
    }
    channel.disconnect();
    result
}
