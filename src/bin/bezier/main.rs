//! bezier - random Bezier CV generator in the terminal
//!
//! Run with: cargo run -- --layout single

mod app;
mod audio;
mod knob;
mod ui;

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Result as EyreResult, WrapErr};

use app::App;
use audio::{CvOut, DcOutput};
use bezier_cv::{
    io::{Clock, MonotonicClock},
    module::{multi, single, MultiModule, SingleModule},
    JsonStore,
};
use knob::Knob;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LayoutArg {
    /// One curve output with a clip-mode button
    Single,
    /// Two banks of step, fixed-shape curve and surge outputs
    Multi,
}

#[derive(Debug, Parser)]
#[command(name = "bezier", version, about = "Random Bezier control voltages")]
struct Args {
    #[arg(long, value_enum, default_value_t = LayoutArg::Single)]
    layout: LayoutArg,

    /// Directory holding the JSON config and saved state
    #[arg(long, value_name = "DIR", default_value = ".")]
    config: PathBuf,

    /// Send the outputs to the default audio device as DC levels
    #[arg(long)]
    audio: bool,

    /// Write logs here (the terminal belongs to the UI)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Seed the random targets for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Polling interval of the control loop
    #[arg(long, value_name = "MS", default_value_t = 5)]
    tick_ms: u64,

    /// Keep one display sample per this many ms
    #[arg(long, value_name = "MS", default_value_t = 50)]
    history_ms: u32,
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    match args.layout {
        LayoutArg::Single => {
            let (audio, [out]) = outputs::<1>(args.audio)?;
            let store = JsonStore::new(&args.config, single::STORE_NAME);
            let clock = MonotonicClock::new();
            let now = clock.now_ms();
            let (rate, shape) = (Knob::new(0.5), Knob::new(0.5));
            let module = match args.seed {
                Some(seed) => SingleModule::with_seed(Some(store), rate, shape, out, seed, now),
                None => SingleModule::new(Some(store), rate, shape, out, now),
            }
            .with_history_interval(args.history_ms);
            run(App::new(module, clock, "single", args.tick_ms), audio)
        }
        LayoutArg::Multi => {
            let (audio, outs) = outputs::<6>(args.audio)?;
            let store = JsonStore::new(&args.config, multi::STORE_NAME);
            let clock = MonotonicClock::new();
            let now = clock.now_ms();
            let knobs = [Knob::new(0.5), Knob::new(0.5)];
            let module = match args.seed {
                Some(seed) => MultiModule::with_seed(Some(&store), knobs, outs, seed, now),
                None => MultiModule::new(Some(&store), knobs, outs, now),
            }
            .with_history_interval(args.history_ms);
            run(App::new(module, clock, "multi", args.tick_ms), audio)
        }
    }
}

fn run<M>(mut app: App<M>, audio: Option<DcOutput>) -> EyreResult<()>
where
    M: bezier_cv::module::Module<Knob = Knob>,
{
    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();
    // Keep the stream alive for as long as the UI runs
    drop(audio);
    result
}

/// `N` output sinks, backed by audio channels when `audio` is set.
fn outputs<const N: usize>(audio: bool) -> EyreResult<(Option<DcOutput>, [CvOut; N])> {
    if !audio {
        return Ok((None, std::array::from_fn(|_| CvOut::Silent)));
    }
    let (stream, rings) = DcOutput::start(N)?;
    let mut rings = rings.into_iter();
    let outs = std::array::from_fn(|_| rings.next().map_or(CvOut::Silent, CvOut::Ring));
    Ok((Some(stream), outs))
}

fn init_logging(path: &Path) -> EyreResult<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    log::info!("logging to {}", path.display());
    Ok(())
}
