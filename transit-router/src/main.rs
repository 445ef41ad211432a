use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use transit_router::config::RouterConfig;
use transit_router::cost::{DefaultCostCalculator, to_raptor_costs};
use transit_router::domain::{StopIndex, TransitMode, TripPattern, Walk, hms};
use transit_router::path::{Path, PathAssembler};
use transit_router::raptor::{ForwardExtender, StopArrivals};
use transit_router::slack::DefaultSlackProvider;
use transit_router::timetable::{
    Deduplicator, ScheduledTrip, SnapshotError, StopTime, TimetableSnapshotSource, Trip, TripId,
    TripTimes,
};

/// Stop costs in seconds, indexed by stop. B (2) and D (4) are charged.
const STOP_COSTS: [i32; 6] = [0, 0, 30, 0, 60, 0];

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(file) => match RouterConfig::from_path(&file) {
            Ok(config) => config,
            Err(e) => {
                error!(file = %file, "failed to load configuration");
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => RouterConfig::default(),
    };
    info!(?config, "loaded configuration");

    match reference_journey(&config) {
        Ok(path) => {
            for leg in path.legs() {
                println!("  {}", leg.as_string());
            }
            println!("{path}");
            println!("generalized cost: {}", path.generalized_cost());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Load the sample timetable into a snapshot.
fn load_timetable(source: &TimetableSnapshotSource) -> Result<(), Box<dyn Error>> {
    let mut dedup = Deduplicator::new();
    let mut builder = source.begin_update();

    let trips = [
        ("L11", [1, 2], [(hms(10, 4, 0), hms(10, 4, 0)), (hms(10, 35, 0), hms(10, 35, 0))]),
        ("L21", [3, 4], [(hms(11, 0, 0), hms(11, 0, 0)), (hms(11, 23, 0), hms(11, 23, 0))]),
        ("L31", [4, 5], [(hms(0, 0, 0), hms(11, 40, 0)), (hms(11, 52, 0), hms(23, 59, 0))]),
    ];
    for (route, stops, times) in trips {
        let pattern = Arc::new(TripPattern::new(
            TransitMode::Bus,
            route,
            stops.into_iter().map(StopIndex).collect(),
        ));
        let stop_times: Vec<StopTime> = times
            .iter()
            .zip(1..)
            .map(|(&(arrival, departure), seq)| StopTime::new(arrival, departure, seq))
            .collect();
        let trip_times = TripTimes::new(Arc::new(Trip::new(route)), &stop_times, &mut dedup)?;
        builder.add_trip(pattern, trip_times)?;
    }

    let snapshot = builder.publish();
    info!(version = snapshot.version(), trips = snapshot.len(), "timetable loaded");
    Ok(())
}

/// Build the sample journey A -> E through the forward extender.
fn reference_journey(config: &RouterConfig) -> Result<Path<ScheduledTrip>, Box<dyn Error>> {
    let source = TimetableSnapshotSource::new();
    load_timetable(&source)?;
    let snapshot = source.snapshot();
    let trip = |id: &str| -> Result<Arc<ScheduledTrip>, SnapshotError> {
        let id = TripId::new(id);
        snapshot
            .trip(&id)
            .cloned()
            .map(Arc::new)
            .ok_or(SnapshotError::UnknownTrip(id))
    };

    let extender = ForwardExtender::new(
        DefaultCostCalculator::new(&config.cost, Some(to_raptor_costs(&STOP_COSTS))),
        DefaultSlackProvider::new(&config.slack),
    );
    let mut arrivals = StopArrivals::new();
    let access = extender.access(&mut arrivals, hms(10, 0, 0), &Walk::new(StopIndex(1), 195));
    let l11 = extender.ride(&mut arrivals, access, trip("L11")?, 0, 1)?;
    let walk = extender.transfer(&mut arrivals, l11, &Walk::new(StopIndex(3), 225));
    let l21 = extender.ride(&mut arrivals, walk, trip("L21")?, 0, 1)?;
    let l31 = extender.ride(&mut arrivals, l21, trip("L31")?, 0, 1)?;
    let egress = extender.egress(&mut arrivals, l31, 465);

    arrivals.validate_chain(egress)?;
    Ok(PathAssembler::default().assemble(&arrivals, egress)?)
}
