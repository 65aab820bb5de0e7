mod config;

use anyhow::{anyhow, Context, Result};
use clap::{App, Arg, ArgMatches};
use config::Config;
use heuristics::{
    Formula, FrequencyGreedy, Heuristic, Interrupt, LocalSearch, Preference, SearchContext,
    SimulatedAnnealing, TabuSearch, TimedHeuristic, CNF,
};
use std::fs::File;
use std::io;
use std::io::prelude::*;
use std::path::PathBuf;
use std::process::exit;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn parse_value<T>(matches: &ArgMatches, name: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = matches.value_of(name)
        .ok_or_else(|| anyhow!("Missing value for --{}", name))?;
    value.parse()
        .with_context(|| format!("Invalid value for --{}: {}", name, value))
}

fn parse_optional<T>(matches: &ArgMatches, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    if matches.is_present(name) {
        parse_value(matches, name).map(Some)
    } else {
        Ok(None)
    }
}

fn make_config() -> Result<Config> {
    let tabu = TabuSearch::default();
    let annealing = SimulatedAnnealing::default();
    let tenure = tabu.tenure.to_string();
    let max_stall = tabu.max_stall.to_string();
    let temperature = annealing.temperature().to_string();
    let cooling_rate = annealing.cooling_rate().to_string();

    let matches = App::new("satisfaction heuristics")
        .version("1.0")
        .author("Alex&Korbi&Radek inc.")
        .about("Local search and metaheuristics for (MAX-)SAT")
        .arg(
            Arg::with_name("input")
                .short("i")
                .long("input")
                .takes_value(true)
                .help("Input file in DIMACS format"),
        )
        .arg(
            Arg::with_name("algorithm")
                .long("algorithm")
                .value_name("ALGORITHM")
                .help("Search algorithm")
                .takes_value(true)
                .possible_values(&["local", "frequency", "tabu", "annealing"])
                .default_value("local"),
        )
        .arg(
            Arg::with_name("preference")
                .long("preference")
                .help("Whether the frequency search prefers the most or the fewest occurrences")
                .takes_value(true)
                .possible_values(&["max", "min"])
                .default_value("max"),
        )
        .arg(
            Arg::with_name("tenure")
                .long("tenure")
                .help("Iterations a flipped variable stays tabu")
                .takes_value(true)
                .default_value(&tenure),
        )
        .arg(
            Arg::with_name("max-stall")
                .long("max-stall")
                .help("Iterations without a new best before tabu search gives up")
                .takes_value(true)
                .default_value(&max_stall),
        )
        .arg(
            Arg::with_name("temperature")
                .long("temperature")
                .help("Initial annealing temperature")
                .takes_value(true)
                .default_value(&temperature),
        )
        .arg(
            Arg::with_name("cooling-rate")
                .long("cooling-rate")
                .help("Fraction the temperature drops by after every step, in (0, 1)")
                .takes_value(true)
                .default_value(&cooling_rate),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .takes_value(true)
                .help("Seed for the initial assignment and all random choices"),
        )
        .arg(
            Arg::with_name("timeout")
                .long("timeout")
                .takes_value(true)
                .help("Stop the search after this many seconds"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .help("File name for output in DIMACS format"),
        )
        .arg(
            Arg::with_name("return_code")
                .long("return-code")
                .short("r")
                .help("Will return 1 if satisfiable and 0 if not (useful for scripting)")
                .takes_value(false),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Verbosity level (-v, -vv, -vvv)"),
        )
        .get_matches();

    let heuristic: Box<dyn Heuristic> = match matches.value_of("algorithm") {
        Some("local") => Box::new(LocalSearch),
        Some("frequency") => match matches.value_of("preference") {
            Some("max") => Box::new(FrequencyGreedy::new(Preference::PreferMax)),
            Some("min") => Box::new(FrequencyGreedy::new(Preference::PreferMin)),
            _ => unreachable!(), // already handled by clap
        },
        Some("tabu") => Box::new(TabuSearch::new(
            parse_value(&matches, "tenure")?,
            parse_value(&matches, "max-stall")?,
        )),
        Some("annealing") => Box::new(SimulatedAnnealing::new(
            parse_value(&matches, "temperature")?,
            parse_value(&matches, "cooling-rate")?,
        )?),
        _ => unreachable!(), // already handled by clap
    };

    let timeout = match parse_optional::<f64>(&matches, "timeout")? {
        Some(secs) if !secs.is_finite() || secs < 0.0 => return Err(anyhow!("Invalid timeout: {}", secs)),
        secs => secs.map(Duration::from_secs_f64),
    };

    Ok(Config {
        input: matches.value_of("input").map(PathBuf::from),
        output: matches.value_of("output").map(PathBuf::from),
        return_code: matches.is_present("return_code"),
        seed: parse_optional(&matches, "seed")?,
        timeout,
        verbosity: matches.occurrences_of("verbose"),
        heuristic,
    })
}

fn get_input(handle: &mut impl Read) -> io::Result<String> {
    let mut buffer = String::new();
    handle.read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn main() -> Result<()> {
    let config = make_config()?;

    let filter = match config.verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(io::stderr)
        .init();

    let input = match &config.input {
        None => {
            eprintln!("No input file specified. Reading from standard input...");
            get_input(&mut io::stdin())
        }
        Some(file) => get_input(&mut File::open(file)
            .with_context(|| format!("Could not open {}", file.display()))?),
    }?;

    let cnf = CNF::from_dimacs(&input)?;
    let (mut formula, mut context) = match config.seed {
        Some(seed) => (Formula::from_cnf_seeded(&cnf, seed)?, SearchContext::seeded(seed)),
        None => (Formula::from_cnf_unseeded(&cnf)?, SearchContext::unseeded()),
    };
    if let Some(timeout) = config.timeout {
        context = context.with_interrupt(Interrupt::never().with_timeout(timeout));
    }

    println!("c Clauses satisfied initially: {}", formula.count_satisfied());
    let timed = TimedHeuristic::new(&config.heuristic);
    let (duration, outcome) = timed.search_timed(&mut formula, &mut context);
    info!("Search took {:?}", duration);
    println!("c Clauses satisfied: {} of {}", outcome.satisfied, outcome.num_clauses);
    if outcome.interrupted {
        println!("c Search interrupted by timeout");
    }

    match &config.output {
        Some(path) => std::fs::write(path, outcome.to_dimacs())?,
        None => print!("{}", outcome.to_dimacs()),
    }

    if config.return_code {
        if outcome.is_sat() {
            exit(1)
        }
    } else if !outcome.is_sat() {
        exit(2)
    }
    Ok(())
}
