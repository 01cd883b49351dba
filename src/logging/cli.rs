//! Command-line logger
use super::{Event, LogError, Loggable, Logger};
use enum_map::{enum_map, EnumMap};
use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};
use yansi::Paint;

/// Logger that periodically writes aggregated summaries to stdout.
///
/// Values are aggregated per event between displays: scalars by their mean,
/// index samples by their empirical distribution.
pub struct CLILogger {
    events: EnumMap<Event, EventLog>,

    display_period: Duration,
    last_display_time: Instant,
}

impl CLILogger {
    pub fn new(display_period: Duration) -> Self {
        Self {
            events: enum_map! { _ => EventLog::new() },
            display_period,
            last_display_time: Instant::now(),
        }
    }

    /// Display the summary and clear all stored data.
    pub fn display(&mut self) {
        for (event, event_log) in self.events.iter_mut() {
            if event_log.index == event_log.summary_start_index {
                continue;
            }
            println!(
                "{}",
                Paint::new(format!(
                    "==== {:?}s {} - {} ====",
                    event,
                    event_log.summary_start_index,
                    event_log.index - 1
                ))
                .bold()
            );
            for (name, aggregator) in &mut event_log.aggregators {
                println!("{}: {}", name, aggregator);
                aggregator.clear();
            }
            event_log.summary_start_index = event_log.index;
        }
        self.last_display_time = Instant::now();
    }
}

impl Logger for CLILogger {
    fn log<'a>(
        &mut self,
        event: Event,
        name: &'a str,
        value: Loggable,
    ) -> Result<(), LogError<'a>> {
        let aggregators = &mut self.events[event].aggregators;
        if let Some(aggregator) = aggregators.get_mut(name) {
            if let Err((value, expected)) = aggregator.update(value) {
                return Err(LogError::new(name, value, expected));
            }
        } else {
            aggregators.insert(name.into(), Aggregator::new(value));
        }
        Ok(())
    }

    fn done(&mut self, event: Event) {
        self.events[event].index += 1;
        if self.last_display_time.elapsed() >= self.display_period {
            self.display();
        }
    }
}

impl Drop for CLILogger {
    fn drop(&mut self) {
        self.display();
    }
}

struct EventLog {
    /// Total number of completed event instances.
    index: u64,
    /// Event index at which the current summary window started.
    summary_start_index: u64,
    aggregators: BTreeMap<String, Aggregator>,
}

impl EventLog {
    fn new() -> Self {
        Self {
            index: 0,
            summary_start_index: 0,
            aggregators: BTreeMap::new(),
        }
    }
}

enum Aggregator {
    ScalarMean { sum: f64, count: u64 },
    IndexDistribution { counts: Vec<u64> },
}

impl Aggregator {
    fn new(value: Loggable) -> Self {
        let mut aggregator = match value {
            Loggable::Scalar(_) => Self::ScalarMean { sum: 0.0, count: 0 },
            Loggable::IndexSample { size, .. } => Self::IndexDistribution {
                counts: vec![0; size],
            },
        };
        aggregator
            .update(value)
            .expect("new aggregator accepts its defining value");
        aggregator
    }

    /// Add a value to the aggregate.
    ///
    /// On structural mismatch, returns the value along with a description of
    /// what was expected.
    fn update(&mut self, value: Loggable) -> Result<(), (Loggable, String)> {
        match (self, value) {
            (Self::ScalarMean { sum, count }, Loggable::Scalar(x)) => {
                *sum += x;
                *count += 1;
                Ok(())
            }
            (Self::IndexDistribution { counts }, Loggable::IndexSample { value, size })
                if counts.len() == size =>
            {
                counts[value] += 1;
                Ok(())
            }
            (Self::ScalarMean { .. }, value) => Err((value, "a scalar".into())),
            (Self::IndexDistribution { counts }, value) => {
                Err((value, format!("an index sample of size {}", counts.len())))
            }
        }
    }

    fn clear(&mut self) {
        match self {
            Self::ScalarMean { sum, count } => {
                *sum = 0.0;
                *count = 0;
            }
            Self::IndexDistribution { counts } => counts.fill(0),
        }
    }
}

impl fmt::Display for Aggregator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ScalarMean { sum, count } => write!(f, "{}", sum / *count as f64),
            Self::IndexDistribution { counts } => {
                let total: u64 = counts.iter().sum();
                let mut first = true;
                write!(f, "[")?;
                for count in counts {
                    if !first {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:.2}", *count as f64 / total as f64)?;
                    first = false;
                }
                write!(f, "]")
            }
        }
    }
}
