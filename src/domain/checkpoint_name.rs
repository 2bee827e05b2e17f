// ============================================================
// Layer 3 — Checkpoint Filename Codec
// ============================================================
// A checkpoint is nothing more than a weights file whose NAME
// records when it was written and how many epochs the session
// had completed:
//
//   20230102000000_wgt_12.h5
//   └─────┬──────┘     └┬┘
//   YYYYMMDDHHMMSS    epoch count
//
// This file is the only place that knows the format. Saving
// goes through `Display`, discovery goes through `parse`.
// A name that does not fully match is not a checkpoint.

use chrono::NaiveDateTime;
use regex::Regex;
use std::{fmt, sync::LazyLock};

/// Full-match pattern for checkpoint filenames (ASCII digits only)
static CHECKPOINT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{14})_wgt_([0-9]+)\.h5$").expect("Invalid checkpoint filename regex")
});

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckpointName {
    /// Always exactly 14 ASCII digits
    timestamp: String,
    epoch: u64,
}

impl CheckpointName {
    /// Name for a checkpoint written at `time` after `epoch` epochs.
    pub fn at(time: NaiveDateTime, epoch: u64) -> Self {
        Self {
            timestamp: time.format(TIMESTAMP_FORMAT).to_string(),
            epoch,
        }
    }

    /// Parse a bare filename. Returns `None` for anything that is not
    /// a checkpoint, including names whose epoch overflows `u64`.
    pub fn parse(file_name: &str) -> Option<Self> {
        let caps = CHECKPOINT_NAME.captures(file_name)?;
        let epoch = caps[2].parse::<u64>().ok()?;
        Some(Self {
            timestamp: caps[1].to_string(),
            epoch,
        })
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// The timestamp as a date-time, if the digits form a valid one.
    /// Discovery never depends on this; it sorts by filename.
    pub fn written_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).ok()
    }
}

impl fmt::Display for CheckpointName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_wgt_{}.h5", self.timestamp, self.epoch)
    }
}
