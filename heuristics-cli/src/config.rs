use heuristics::Heuristic;
use std::path::PathBuf;
use std::time::Duration;

pub struct Config {
    pub input:       Option<PathBuf>,
    pub output:      Option<PathBuf>,
    pub return_code: bool,
    pub seed:        Option<u64>,
    pub timeout:     Option<Duration>,
    pub verbosity:   u64,
    pub heuristic:   Box<dyn Heuristic>,
}
