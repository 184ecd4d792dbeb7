use std::time::{Duration, Instant};

use strand_collections::{BidirectionalCursor, DynArray, LinkedList, Result};
use strand_logging::{log_debug, log_info, log_verbose};

use crate::{config::{DriverConfig, Scenario}, LOG_CAT};

/// The operations the driver times, implemented by both containers
trait Sequence: Default {
    const NAME : &'static str;

    fn append(&mut self, value: usize);
    fn pop_first(&mut self) -> Result<usize>;
    fn pop_last(&mut self) -> Result<usize>;
    fn erase_at(&mut self, index: usize) -> Result<usize>;
}

impl Sequence for DynArray<usize> {
    const NAME : &'static str = "DynArray";

    fn append(&mut self, value: usize) {
        self.push_back(value);
    }

    fn pop_first(&mut self) -> Result<usize> {
        self.pop_front()
    }

    fn pop_last(&mut self) -> Result<usize> {
        self.pop_back()
    }

    fn erase_at(&mut self, index: usize) -> Result<usize> {
        let pos = (self.cbegin() + index)?.position();
        self.erase(pos)
    }
}

impl Sequence for LinkedList<usize> {
    const NAME : &'static str = "LinkedList";

    fn append(&mut self, value: usize) {
        self.push_back(value);
    }

    fn pop_first(&mut self) -> Result<usize> {
        self.pop_front()
    }

    fn pop_last(&mut self) -> Result<usize> {
        self.pop_back()
    }

    fn erase_at(&mut self, index: usize) -> Result<usize> {
        let pos = (self.cbegin() + index)?.position();
        self.erase(pos)
    }
}

/// Time of a single scenario on a single container
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Timing {
    pub scenario  : Scenario,
    pub container : &'static str,
    pub elapsed   : Duration,
}

fn filled<S: Sequence>(count: usize) -> S {
    let mut seq = S::default();
    for i in 0..count {
        seq.append(i);
    }
    seq
}

fn time_scenario<S: Sequence>(scenario: Scenario, count: usize, erase_count: usize) -> Result<Timing> {
    log_debug!(LOG_CAT, time_scenario::<S>, "Starting {:?} on {}", scenario, S::NAME);
    let start = Instant::now();
    match scenario {
        Scenario::Append => {
            drop(filled::<S>(count));
        },
        Scenario::PopBack => {
            let mut seq = filled::<S>(count);
            for _ in 0..count {
                seq.pop_last()?;
            }
        },
        Scenario::PopFront => {
            let mut seq = filled::<S>(count);
            for _ in 0..count {
                seq.pop_first()?;
            }
        },
        Scenario::EraseMiddle => {
            let mut seq = filled::<S>(count);
            for _ in 0..erase_count {
                seq.erase_at(count / 2)?;
            }
        },
    }
    Ok(Timing { scenario, container: S::NAME, elapsed: start.elapsed() })
}

fn describe(scenario: Scenario, count: usize, erase_count: usize) -> String {
    match scenario {
        Scenario::Append      => format!("Appending {count} elements"),
        Scenario::PopBack     => format!("Popping the last {count} elements"),
        Scenario::PopFront    => format!("Popping the first {count} elements"),
        Scenario::EraseMiddle => format!("Erasing {erase_count} elements from the middle of {count}"),
    }
}

/// Run the selected scenarios on both containers, logging and returning the timings
pub fn run(config: &DriverConfig) -> Result<Vec<Timing>> {
    let mut timings = Vec::new();
    for scenario in config.scenarios() {
        log_verbose!(LOG_CAT, "Running {:?} with {} elements", scenario, config.count);

        for timing in [
            time_scenario::<DynArray<usize>>(scenario, config.count, config.erase_count)?,
            time_scenario::<LinkedList<usize>>(scenario, config.count, config.erase_count)?,
        ] {
            let description = describe(timing.scenario, config.count, config.erase_count);
            log_info!(LOG_CAT, "{} on {} took {} ms", description, timing.container, timing.elapsed.as_millis());
            timings.push(timing);
        }
    }
    Ok(timings)
}
