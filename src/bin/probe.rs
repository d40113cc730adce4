use std::net::SocketAddr;

use clap::Parser;
use memprobe::{
    actors::{messages::ProbeEvent, probe::ProbeHandle},
    collector::SystemSource,
    config::{Config, read_config_file},
    exporter::{UseGauges, spawn_exporter},
    util::get_addr,
};
use tokio::sync::broadcast;
use tracing::{debug, error, info, level_filters::LevelFilter, trace};
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Parser)]
struct Args {
    /// Config file (runs with built-in default thresholds when omitted)
    #[arg(short)]
    file: Option<String>,

    /// Stop after this many ticks (overrides the config)
    #[arg(short = 'n', long)]
    iterations: Option<u64>,
}

fn init() {
    let filter = filter::Targets::new().with_targets(vec![("memprobe", LevelFilter::TRACE)]);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .compact()
                .with_ansi(false),
        )
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init();
    let args = Args::parse();
    trace!("started with args: {args:?}");

    let mut config = match &args.file {
        Some(path) => read_config_file(path)?,
        None => Config::default(),
    };
    if let Some(iterations) = args.iterations {
        config.poll.iterations = Some(iterations);
    }

    debug!(
        "probing every {}s with thresholds {:?}",
        config.poll.interval, config.alert.mem
    );

    let (event_tx, _) = broadcast::channel::<ProbeEvent>(16);

    let gauges = UseGauges::new()?;
    let bind_addr = SocketAddr::from((get_addr(), config.exporter.port));
    spawn_exporter(bind_addr, gauges, event_tx.subscribe()).await?;

    let mut events = event_tx.subscribe();
    let handle = ProbeHandle::spawn(Box::new(SystemSource::new()), &config, event_tx);

    loop {
        tokio::select! {
            event = events.recv() => {
                match event {
                    Ok(event) => log_tick(&event),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        debug!("tick logger lagged, skipped {skipped} events");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        debug!("probe finished");
                        break;
                    }
                }
            }

            _ = tokio::signal::ctrl_c() => {
                debug!("received ctrl-c, shutting down");
                if let Err(e) = handle.shutdown().await {
                    error!("failed to shut down probe: {e:#}");
                }
                break;
            }
        }
    }

    Ok(())
}

fn log_tick(event: &ProbeEvent) {
    let measure = serde_json::to_string(&event.metrics).unwrap_or_default();

    info!(
        iteration = event.iteration,
        timestamp = %event.timestamp.to_rfc3339(),
        measure = %measure,
        level = event.verdict.level.as_str(),
        triggered = event.verdict.triggered,
        cause = ?event.verdict.cause,
        message = %event.verdict.message,
        "tick"
    );
}
