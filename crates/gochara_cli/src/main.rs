mod config;

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand};
use gochara_ephem::{
    ALL_BODIES, AnalyticProvider, Body, Ephemeris, PositionFlags, PositionKind, PositionProvider,
    TableBuilder, Zodiac,
};
use gochara_search::{
    ChainPolicy, DirectionRule, NatalChart, ReferencePoint, SearchDirection, SequenceRequest,
    TransitEvent, TransitQuery, TransitTarget, generate_sequence, resolve_reference,
    solve_transit,
};
use gochara_time::{CivilTime, calendar_to_jd};
use gochara_vedic::{AyanamshaSystem, GeoLocation, NodeMode, Rashi, rashi_from_longitude};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

#[derive(Parser)]
#[command(name = "gochara", about = "Gochara transit engine CLI", version)]
struct Cli {
    /// TOML config file (ephemeris backend, solver tuning)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

/// Zodiac and correction flags shared by every ephemeris command.
#[derive(Args, Debug, Clone)]
struct FrameArgs {
    /// Sidereal zodiac with this ayanamsha (lahiri, true_lahiri, kp, raman, ...)
    #[arg(long)]
    sidereal: Option<AyanamshaSystem>,
    /// Geometric positions instead of apparent
    #[arg(long = "true")]
    geometric: bool,
    /// Leave out nutation in longitude
    #[arg(long)]
    no_nutation: bool,
    /// Chebyshev table file; analytic series are used without it
    #[arg(long)]
    tables: Option<PathBuf>,
}

impl FrameArgs {
    fn flags(&self) -> PositionFlags {
        PositionFlags {
            zodiac: self.sidereal.map_or(Zodiac::Tropical, Zodiac::Sidereal),
            position: if self.geometric {
                PositionKind::True
            } else {
                PositionKind::Apparent
            },
            nutation: !self.no_nutation,
            speed: true,
        }
    }
}

/// Natal reference the sign boundaries are counted from.
#[derive(Args, Debug, Clone)]
struct ReferenceArgs {
    /// lagna, moon, rahu, ketu, a body name, or a longitude in degrees
    #[arg(long, default_value = "0")]
    reference: ReferencePoint,
    /// Birth instant for the reference (UT); defaults to --date
    #[arg(long)]
    birth: Option<CivilTime>,
    /// Birth latitude, degrees north (needed for lagna)
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,
    /// Birth longitude, degrees east (needed for lagna)
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,
    /// Use true rather than mean lunar nodes for rahu/ketu
    #[arg(long)]
    true_node: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Position of a body at an instant
    Position {
        #[arg(long)]
        body: Body,
        /// UT datetime (YYYY-MM-DD[Thh:mm[:ss]])
        #[arg(long)]
        date: CivilTime,
        #[command(flatten)]
        frame: FrameArgs,
    },
    /// Next (or previous) boundary crossing of a body
    Transit {
        #[arg(long)]
        body: Body,
        /// UT datetime to search from
        #[arg(long)]
        date: CivilTime,
        /// Search back in time
        #[arg(long)]
        backward: bool,
        /// Target the start of this sign (counted from the reference) instead
        /// of the adjacent boundary
        #[arg(long)]
        sign: Option<Rashi>,
        #[command(flatten)]
        reference: ReferenceArgs,
        #[command(flatten)]
        frame: FrameArgs,
    },
    /// A run of boundary crossings around an instant
    Sequence {
        #[arg(long)]
        body: Body,
        #[arg(long)]
        date: CivilTime,
        #[arg(long, default_value_t = 12)]
        count: u32,
        /// alternate (backward first), forward-first, forward, backward
        #[arg(long, default_value = "alternate")]
        rule: DirectionRule,
        /// previous: chain from the last event; reference: all from --date
        #[arg(long, default_value = "previous")]
        chain: ChainPolicy,
        /// Solve reference-chained steps on worker threads
        #[arg(long)]
        parallel: bool,
        /// Print in time order instead of step order
        #[arg(long)]
        sorted: bool,
        #[command(flatten)]
        reference: ReferenceArgs,
        #[command(flatten)]
        frame: FrameArgs,
    },
    /// Fit a Chebyshev table from the analytic series and write it to disk
    Tabulate {
        #[arg(long)]
        out: PathBuf,
        /// First year (from January 1)
        #[arg(long)]
        from: i32,
        /// Last year (through December 31)
        #[arg(long)]
        to: i32,
        /// Bodies to include; all when omitted
        #[arg(long, value_delimiter = ',')]
        bodies: Vec<Body>,
    },
    /// Rashi from a longitude
    Rashi {
        /// Ecliptic longitude in degrees
        #[arg(allow_hyphen_values = true)]
        lon: f64,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Position { body, date, frame } => {
            let config = config.with_tables(frame.tables.clone());
            let flags = frame.flags();
            Ephemeris::with_session(config.ephemeris, |eph| {
                let p = eph.position(body, date.to_jd_ut(), flags)?;
                println!("{body} at {date} ({})", eph.name());
                println!("  Longitude: {:.6} deg  {}", p.lon_deg, describe_rashi(p.lon_deg));
                println!("  Latitude:  {:.6} deg", p.lat_deg);
                println!("  Distance:  {:.8} AU", p.distance_au);
                println!("  Speed:     {:.6} deg/day", p.speed_deg_per_day);
                Ok(())
            })
        }

        Commands::Transit {
            body,
            date,
            backward,
            sign,
            reference,
            frame,
        } => {
            let config = config.with_tables(frame.tables.clone());
            let flags = frame.flags();
            let direction = if backward {
                SearchDirection::Backward
            } else {
                SearchDirection::Forward
            };
            Ephemeris::with_session(config.ephemeris, |eph| {
                let reference_deg = resolve(eph, &reference, &frame, date)?;
                let target = sign.map_or(TransitTarget::ADJACENT, TransitTarget::Sign);
                let query = TransitQuery::new(body, flags, reference_deg, date.to_jd_ut(), direction)
                    .with_target(target);
                let ev = solve_transit(eph, &query, &config.solver)?;
                println!(
                    "{body} {direction} from {date}, reference {} = {reference_deg:.4} deg",
                    reference.reference
                );
                print_event(&ev, reference_deg);
                Ok(())
            })
        }

        Commands::Sequence {
            body,
            date,
            count,
            rule,
            chain,
            parallel,
            sorted,
            reference,
            frame,
        } => {
            let config = config.with_tables(frame.tables.clone());
            let flags = frame.flags();
            Ephemeris::with_session(config.ephemeris, |eph| {
                let reference_deg = resolve(eph, &reference, &frame, date)?;
                let request = SequenceRequest::new(body, flags, reference_deg, date.to_jd_ut(), count)
                    .with_rule(rule)
                    .with_chain(chain)
                    .with_parallel(parallel);
                let outcome = generate_sequence(eph, &request, &config.solver)?;
                println!(
                    "{body}: {} of {count} events around {date} ({rule}), reference {reference_deg:.4} deg",
                    outcome.events.len()
                );
                let events = if sorted {
                    outcome.chronological()
                } else {
                    outcome.events.clone()
                };
                for ev in &events {
                    print_event(ev, reference_deg);
                }
                if let Some(failure) = outcome.failure {
                    eprintln!(
                        "Stopped at step {} ({}): {}",
                        failure.step, failure.direction, failure.error
                    );
                }
                Ok(())
            })
        }

        Commands::Tabulate {
            out,
            from,
            to,
            bodies,
        } => tabulate(&out, from, to, &bodies),

        Commands::Rashi { lon } => {
            println!("{}", describe_rashi(lon));
            Ok(())
        }
    }
}

/// Natal reference longitude under the command's flags.
fn resolve(
    eph: &Ephemeris,
    args: &ReferenceArgs,
    frame: &FrameArgs,
    date: CivilTime,
) -> Result<f64, Box<dyn Error>> {
    let location = match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => GeoLocation::new(lat, lon, 0.0),
        (None, None) if args.reference != ReferencePoint::Ascendant => {
            GeoLocation::new(0.0, 0.0, 0.0)
        }
        (None, None) => return Err("lagna reference needs --lat and --lon".into()),
        _ => return Err("--lat and --lon must be given together".into()),
    };
    let flags = frame.flags();
    let birth = args.birth.unwrap_or(date);
    let chart = NatalChart::from_civil(birth, location)
        .with_zodiac(flags.zodiac)
        .with_position(flags.position)
        .with_nutation(flags.nutation)
        .with_node_mode(if args.true_node {
            NodeMode::True
        } else {
            NodeMode::Mean
        });
    Ok(resolve_reference(eph, &chart, args.reference)?)
}

fn tabulate(out: &Path, from: i32, to: i32, bodies: &[Body]) -> Result<(), Box<dyn Error>> {
    if to < from {
        return Err(format!("--to {to} is before --from {from}").into());
    }
    let start = calendar_to_jd(from, 1, 1.0);
    let end = calendar_to_jd(to + 1, 1, 1.0);
    let bodies = if bodies.is_empty() { &ALL_BODIES[..] } else { bodies };
    let table = TableBuilder::new(start, end)
        .with_bodies(bodies)
        .build(&AnalyticProvider::new())?;
    table.save(out)?;
    info!(path = %out.display(), bodies = bodies.len(), "table written");
    println!(
        "Wrote {} bodies, JD {start:.1} to {end:.1}, to {}",
        bodies.len(),
        out.display()
    );
    Ok(())
}

fn describe_rashi(lon: f64) -> String {
    let info = rashi_from_longitude(lon);
    format!(
        "{} ({}) {}",
        info.rashi.name(),
        info.rashi.western_name(),
        info.dms
    )
}

fn print_event(ev: &TransitEvent, reference_deg: f64) {
    let sign = ev.boundary_sign(reference_deg);
    let arrow = match ev.direction {
        SearchDirection::Forward => "->",
        SearchDirection::Backward => "<-",
    };
    println!(
        "  {arrow} {}  JD {:.6}  boundary {:.4} deg (start of {})  speed {:+.5} deg/day  [{} steps, {} iter]",
        CivilTime::from_jd_ut(ev.jd_ut),
        ev.jd_ut,
        ev.crossed_lon_deg,
        sign.name(),
        ev.speed_deg_per_day,
        ev.bracket_steps,
        ev.iterations
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn transit_args_parse() {
        let cli = Cli::try_parse_from([
            "gochara", "transit", "--body", "saturn", "--date", "2024-01-01", "--backward",
            "--reference", "moon", "--sidereal", "lahiri", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Transit {
                body,
                backward,
                reference,
                frame,
                ..
            } => {
                assert_eq!(body, Body::Saturn);
                assert!(backward);
                assert_eq!(reference.reference, ReferencePoint::Moon);
                assert_eq!(
                    frame.flags().zodiac,
                    Zodiac::Sidereal(AyanamshaSystem::Lahiri)
                );
            }
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn sequence_defaults() {
        let cli = Cli::try_parse_from(["gochara", "sequence", "--body", "moon", "--date", "2024-01-01"])
            .unwrap();
        match cli.command {
            Commands::Sequence {
                count, rule, chain, parallel, ..
            } => {
                assert_eq!(count, 12);
                assert_eq!(rule, DirectionRule::AlternateBackwardFirst);
                assert_eq!(chain, ChainPolicy::FromPrevious);
                assert!(!parallel);
            }
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn tabulate_body_list() {
        let cli = Cli::try_parse_from([
            "gochara", "tabulate", "--out", "t.gcht", "--from", "2020", "--to", "2021", "--bodies",
            "sun,moon,rahu",
        ])
        .unwrap();
        match cli.command {
            Commands::Tabulate { bodies, .. } => {
                assert_eq!(bodies, vec![Body::Sun, Body::Moon, Body::MeanNode]);
            }
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn lagna_without_location_is_an_error() {
        let eph = Ephemeris::open(gochara_ephem::EphemerisConfig::analytic()).unwrap();
        let args = ReferenceArgs {
            reference: ReferencePoint::Ascendant,
            birth: None,
            lat: None,
            lon: None,
            true_node: false,
        };
        let frame = FrameArgs {
            sidereal: None,
            geometric: false,
            no_nutation: false,
            tables: None,
        };
        let date = CivilTime::new(2024, 1, 1, 0, 0, 0.0);
        assert!(resolve(&eph, &args, &frame, date).is_err());
        let with_place = ReferenceArgs {
            lat: Some(28.6),
            lon: Some(77.2),
            ..args
        };
        let lagna = resolve(&eph, &with_place, &frame, date).unwrap();
        assert!((0.0..360.0).contains(&lagna));
    }

    #[test]
    fn tabulate_writes_loadable_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sun.gcht");
        tabulate(&path, 2024, 2024, &[Body::Sun]).unwrap();
        let table = gochara_ephem::ChebyshevTable::load(&path).unwrap();
        assert_eq!(table.bodies().collect::<Vec<_>>(), vec![Body::Sun]);
        assert!(tabulate(&path, 2025, 2024, &[Body::Sun]).is_err());
    }
}
