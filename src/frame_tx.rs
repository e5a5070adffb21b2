//! Transmits a payload as 802.11a/g OFDM frames. Each frame is written to the output (a file, a
//! FIFO feeding a radio, or stdout) followed by a configurable stretch of silence:
//!
//! [<frame> <silence>] x repeat n times (or until Ctrl-C when n is 0)

use clap::Parser;
use failure::{format_err, Error};
use log::{debug, info, warn, Level, LevelFilter, Metadata, Record};
use num::Zero;
use ofdm_phy::config::PhyConfig;
use ofdm_phy::detect::FrameSync;
use ofdm_phy::frame::FrameEncoder;
use ofdm_phy::rate::{DataRate, RateSelector};
use ofdm_phy::sample_io::{read_psdu, write_samples, SampleFormat};
use ofdm_phy::timing::StageTimer;
use ofdm_phy::Sample;
use rand::{Rng, SeedableRng};
use std::convert::TryFrom;
use std::io::{BufWriter, Write};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON configuration file. Without one, 6 Mbps at 20 MHz and the default seed are used.
    #[arg(short, long)]
    config: Option<String>,
    /// Data rate in Mbps at 20 MHz, overriding the configured rate
    #[arg(short, long)]
    rate: Option<u32>,
    /// Payload file with hex groups ('#' starts a comment line). Stdin if not provided.
    #[arg(short, long)]
    payload: Option<String>,
    /// The payload file holds '0'/'1' bits instead of hex
    #[arg(long)]
    bits: bool,
    /// Output path, e.g. a FIFO read by the radio. Stdout if not provided.
    #[arg(short, long)]
    output: Option<String>,
    /// Sample format of the output: binary (little endian f32 I/Q) or text
    #[arg(short, long, default_value = "binary")]
    format: SampleFormat,
    /// Number of frames to send. 0 sends until interrupted.
    #[arg(short = 'n', long, default_value_t = 1)]
    repeat: u64,
    /// Zero samples inserted after every frame
    #[arg(short, long, default_value_t = 0)]
    gap: usize,
    /// Run the frame detector over every frame before sending it
    #[arg(long)]
    verify: bool,
    /// Log at debug level, including per-stage encode timings
    #[arg(short, long)]
    verbose: bool,
}

/// Logs to stderr, so stdout stays free for samples
struct Logger {
    level: Level,
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("frame_tx: {} - {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::Debug } else { Level::Info };
    if log::set_boxed_logger(Box::new(Logger { level })).is_ok() {
        log::set_max_level(if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        });
    }
}

fn load_config(args: &Args) -> Result<PhyConfig, Error> {
    let mut config = match &args.config {
        Some(path) => PhyConfig::from_file(path)?,
        None => PhyConfig::default(),
    };
    if let Some(mbps) = args.rate {
        config.rate = DataRate::try_from(RateSelector::mbps(mbps))?;
    }
    Ok(config)
}

/// Check that the detector finds the frame where it was put
fn verify_frame(sync: &mut FrameSync, frame: &[Sample], lead: usize) -> Result<(), Error> {
    let mut rx = vec![Sample::zero(); lead];
    rx.extend_from_slice(frame);
    sync.reset();
    sync.process(&rx);
    match sync.frame_start() {
        Some(start) if start == lead => {
            debug!("Detector found the frame at {}", start);
            Ok(())
        }
        Some(start) => Err(format_err!(
            "detector placed the frame at {} instead of {}",
            start,
            lead
        )),
        None => Err(format_err!("detector did not find the frame")),
    }
}

/// Loops as a transmitter until `repeat` frames are out or until signalled to close by `close`
fn run_tx<W: Write>(
    out: &mut W,
    psdu: &[u8],
    config: &PhyConfig,
    args: &Args,
    close: Arc<AtomicBool>,
) -> Result<(), Error> {
    let encoder = FrameEncoder::from_config(config);
    let mut sync = FrameSync::new(&config.detector);
    let mut rng = rand::rngs::StdRng::from_entropy();
    let silence = vec![Sample::zero(); args.gap];
    let mut timer = StageTimer::new();
    let mut index = 0;
    let mut sent = 0;

    info!(
        "Sending {} bytes at {}, {} samples per frame",
        psdu.len(),
        config.rate,
        ofdm_phy::frame_len(config.rate, psdu.len())
    );
    while !close.load(Ordering::Relaxed) && (args.repeat == 0 || sent < args.repeat) {
        let seed = if config.randomize_seed {
            rng.gen_range(1, 128)
        } else {
            config.scrambler_seed
        };
        let frame = encoder.encode_with_seed(psdu, config.rate, seed, &mut timer)?;
        if args.verify {
            verify_frame(&mut sync, &frame, args.gap)?;
        }

        write_samples(out, &frame, args.format, index)?;
        index += frame.len();
        write_samples(out, &silence, args.format, index)?;
        index += silence.len();
        sent += 1;
    }
    out.flush()?;

    if close.load(Ordering::Relaxed) {
        warn!("Interrupted");
    }
    info!("Sent {} frames ({} samples)", sent, index);
    timer.log_summary();
    Ok(())
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    init_logging(args.verbose);

    // Stop cleanly on Ctrl-C, so the output gets flushed
    let close = Arc::new(AtomicBool::new(false));
    let close_handler = close.clone();
    ctrlc::set_handler(move || {
        close_handler.store(true, Ordering::Relaxed);
    })?;

    let config = load_config(&args)?;
    let psdu = match &args.payload {
        Some(path) => read_psdu(&mut std::fs::File::open(path)?, args.bits)?,
        None => read_psdu(&mut std::io::stdin(), args.bits)?,
    };

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(std::fs::File::create(path)?)),
        None => Box::new(BufWriter::new(std::io::stdout())),
    };
    run_tx(&mut out, &psdu, &config, &args, close)
}
