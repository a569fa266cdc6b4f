//! Drives a map from user commands and describes each result the way the
//! visualizer presents it: a message line, an optional result value and a
//! highlight cue.

use log::{debug, info, warn};
use serde::Serialize;

use crate::{
    command::Command,
    config::VisualizerConfig,
    error::InputError,
    hashing::{bucket_index, hash_trace},
    highlight::{Highlight, HighlightTracker, Tone},
    model::{EntryId, MapSnapshot, VisualMap},
    operations::MapOperations,
    Key,
};

/// The value an operation hands back, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Output {
    None,
    Value(String),
    Flag(bool),
    Keys(Vec<Key>),
    Values(Vec<String>),
    Bucket(usize),
}

/// Everything the presentation layer needs to show after one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// `false` when the input was rejected and nothing ran.
    pub accepted: bool,
    pub message: String,
    pub output: Output,
    pub highlight: Option<Highlight>,
}

impl Report {
    /// A report for input that never reached the map.
    pub fn rejected(error: &InputError) -> Self {
        Report {
            accepted: false,
            message: error.to_string(),
            output: Output::None,
            highlight: None,
        }
    }

    /// The report together with the map state, as one JSON object.
    pub fn to_json(&self, state: &MapSnapshot) -> Result<String, serde_json::Error> {
        serde_json::to_string(&serde_json::json!({
            "report": self,
            "state": state,
        }))
    }
}

/// An interactive session over a map.
pub struct Visualizer<M = VisualMap>
where
    M: MapOperations,
{
    map: M,
    highlights: HighlightTracker,
}

impl Visualizer<VisualMap> {
    pub fn new(config: &VisualizerConfig) -> Self {
        Visualizer::with_map(VisualMap::new(), config)
    }
}

impl<M> Visualizer<M>
where
    M: MapOperations,
{
    pub fn with_map(map: M, config: &VisualizerConfig) -> Self {
        Self {
            map,
            highlights: HighlightTracker::with_timeout(config.highlight_timeout()),
        }
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn snapshot(&self) -> MapSnapshot {
        self.map.snapshot()
    }

    /// The cue raised by the latest operation, until it fades.
    pub fn active_highlight(&mut self) -> Option<Highlight> {
        self.highlights.active()
    }

    /// Parses and runs one line. Rejected input leaves the map untouched.
    pub fn run_line(&mut self, line: &str) -> Report {
        match Command::parse(line) {
            Ok(command) => self.execute(command),
            Err(e) => {
                warn!("rejected input {:?}: {}", line, e);
                Report::rejected(&e)
            }
        }
    }

    pub fn execute(&mut self, command: Command) -> Report {
        debug!("executing {:?}", command);

        let (message, output, highlight) = match command {
            Command::Put { key, value } => match self.map.put(key, value.clone()) {
                Ok(outcome) => {
                    let message = if outcome.updated {
                        format!(
                            "put({}, \"{}\") → updated existing node; value changed to \"{}\".",
                            key, value, value
                        )
                    } else {
                        format!(
                            "put({}, \"{}\") → inserted into Bucket {} and appended to tail.",
                            key, value, outcome.bucket_index
                        )
                    };

                    let cue = Highlight {
                        entry: Some(outcome.entry),
                        bucket: outcome.bucket_index,
                        tone: Tone::Touched,
                    };
                    (message, Output::None, Some(cue))
                }
                Err(e) => {
                    warn!("put({}) rejected: {}", key, e);
                    return Report::rejected(&e);
                }
            },
            Command::Get(key) => {
                let outcome = self.map.get(key);
                match outcome.value {
                    Some(value) => (
                        format!("get({}) → \"{}\".", key, value),
                        Output::Value(value),
                        Some(found(key, outcome.bucket_index)),
                    ),
                    None => (
                        format!("get({}) returned null (not present).", key),
                        Output::None,
                        None,
                    ),
                }
            }
            Command::Remove(key) => {
                let outcome = self.map.remove(key);
                if outcome.found {
                    let cue = Highlight {
                        entry: Some(EntryId::from(key)),
                        bucket: outcome.bucket_index,
                        tone: Tone::Removing,
                    };
                    (
                        format!(
                            "remove({}) → node removed from Bucket {} and unlinked from list.",
                            key, outcome.bucket_index
                        ),
                        Output::None,
                        Some(cue),
                    )
                } else {
                    (
                        format!("remove({}) → not present; nothing removed.", key),
                        Output::None,
                        None,
                    )
                }
            }
            Command::ContainsKey(key) => {
                let present = self.map.contains_key(key);
                let cue = if present {
                    Some(found(key, bucket_index(key)))
                } else {
                    None
                };
                (
                    format!("containsKey({}) → {}.", key, present),
                    Output::Flag(present),
                    cue,
                )
            }
            Command::KeySet => {
                let keys = self.map.key_set();
                let listed = keys
                    .iter()
                    .map(|k| k.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                (format!("KeySet() → [{}]", listed), Output::Keys(keys), None)
            }
            Command::Values => {
                let values = self.map.values();
                let listed = values
                    .iter()
                    .map(|v| format!("\"{}\"", v))
                    .collect::<Vec<_>>()
                    .join(", ");
                (
                    format!("Values() → [{}]", listed),
                    Output::Values(values),
                    None,
                )
            }
            Command::Reset => {
                self.map.reset();
                self.highlights.clear();
                info!("map reset");
                ("Map cleared.".to_owned(), Output::None, None)
            }
            Command::Show => (String::new(), Output::None, None),
            Command::Hash(key) => {
                let trace = hash_trace(key);
                (
                    format!("hash({}) → {} → Bucket {}", key, trace, trace.bucket),
                    Output::Bucket(trace.bucket),
                    None,
                )
            }
        };

        if let Some(cue) = highlight {
            self.highlights.raise(cue);
        }

        Report {
            accepted: true,
            message,
            output,
            highlight,
        }
    }
}

fn found(key: Key, bucket: usize) -> Highlight {
    Highlight {
        entry: Some(EntryId::from(key)),
        bucket,
        tone: Tone::Found,
    }
}
