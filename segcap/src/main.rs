use std::{path::PathBuf, sync::Arc, time::Instant};

use clap::{Parser, ValueEnum};

use segcap::{
    bvh::SplitMethod,
    expect,
    placement::RoadPlacer,
    render::ShadedRenderer,
    runner::CaptureRunner,
    scene::Scene,
    segcap_info, segcap_warn,
    settings::Settings,
};

/// Places cameras along the roads of a scene and writes raw frames with per-object masks
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Scene description
    #[arg(long)]
    scene: PathBuf,
    /// Run settings, defaults are used if omitted
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Overrides the output root of the settings
    #[arg(long)]
    output: Option<PathBuf>,
    /// Overrides the capture thread count, 0 for one per logical core
    #[arg(long)]
    threads: Option<usize>,
    /// Overrides the placement seed
    #[arg(long)]
    seed: Option<u64>,
    /// Overrides the BVH split method, Middle or EqualCounts
    #[arg(long)]
    split_method: Option<SplitMethod>,
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn setup_logger(level: log::LevelFilter) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}:{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.level(),
                record.target(),
                record.line().unwrap_or(0),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout())
        .chain(fern::log_file("segcap.log")?)
        .apply()?;
    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(why) = setup_logger(args.log_level.into()) {
        panic!("{}", why);
    };

    let mut settings = match &args.settings {
        Some(path) => expect!(Settings::load(path), "Failed to load settings"),
        None => Settings::default(),
    };
    if let Some(output) = args.output {
        settings.output_root = output;
    }
    if let Some(threads) = args.threads {
        settings.threads = threads;
    }
    if let Some(seed) = args.seed {
        settings.placement.seed = seed;
    }
    if let Some(split_method) = args.split_method {
        settings.bvh.split_method = split_method;
    }

    let scene = Arc::new(expect!(
        Scene::load(&args.scene, &settings.bvh),
        "Failed to load scene"
    ));

    let mut placer = expect!(
        RoadPlacer::new(settings.placement, settings.lens),
        "Invalid placement settings"
    );
    let requests = placer.place_scene(&scene);
    if requests.is_empty() {
        segcap_warn!("No cameras placed, is anything in the scene tagged as a road?");
        return;
    }
    segcap_info!("Placed {} cameras", requests.len());

    let run_start = Instant::now();
    let runner = CaptureRunner::new(
        Arc::clone(&scene),
        Arc::new(ShadedRenderer::new(Arc::clone(&scene))),
        settings.emitter(),
        settings.threads,
    );
    let summary = expect!(runner.run(requests), "Capture run failed");

    segcap_info!(
        "{} captures with {} masks ({} discarded) in {:.2}s on {} threads",
        summary.captures,
        summary.masks,
        summary.discarded,
        run_start.elapsed().as_secs_f32(),
        runner.thread_count()
    );
    if !summary.failed.is_empty() {
        segcap_warn!("Failed captures: {:?}", summary.failed);
    }
}
