//! Job report parsing
//!
//! `status dir` prints the scheduled jobs as a fixed-width table:
//!
//! ```text
//! Scheduled Jobs:
//! Level          Type     Pri  Scheduled          Name               Volume
//! ===================================================================================
//!                Admin      8  18-Apr-12 20:30    UpdateSlots
//! Differential   Backup    10  18-Mar-12 23:05    BackupClient1      *unknown*
//! ====
//! ```
//!
//! Rows are split by the header's column offsets rather than by token
//! count, so a blank column (the level of an admin job, a missing volume)
//! comes out as an empty string instead of shifting its neighbours.

use crate::models::{DisabledJob, UpcomingJob};

const COL_LEVEL: usize = 0;
const COL_TYPE: usize = 1;
const COL_PRIORITY: usize = 2;
const COL_SCHEDULED: usize = 3;
const COL_NAME: usize = 4;
const COL_VOLUME: usize = 5;

/// Header labels in column order; alternatives are tried left to right
const HEADER_LABELS: [&[&str]; 6] = [
    &["Level"],
    &["Type"],
    &["Pri"],
    &["Scheduled"],
    &["Job Name", "Name"],
    &["Volume"],
];

const DISABLED_HEADER: &str = "Disabled Jobs:";

/// Character offsets where each column starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnLayout {
    starts: [usize; 6],
}

impl ColumnLayout {
    /// Recognise the scheduled-jobs header line
    fn from_header(line: &str) -> Option<Self> {
        if !line.trim_start().starts_with(HEADER_LABELS[COL_LEVEL][0]) {
            return None;
        }

        let mut starts = [0usize; 6];
        let mut from = 0usize;
        for (column, labels) in HEADER_LABELS.iter().enumerate() {
            let (offset, label) = labels
                .iter()
                .find_map(|label| line[from..].find(label).map(|pos| (from + pos, *label)))?;
            starts[column] = line[..offset].chars().count();
            from = offset + label.len();
        }

        Some(Self { starts })
    }

    /// Column owning a token that starts at `position`
    fn column_at(&self, position: usize) -> usize {
        self.starts
            .iter()
            .rposition(|start| *start <= position)
            .unwrap_or(COL_LEVEL)
    }

    /// Split a data row into its six raw cells
    fn split_row(&self, line: &str) -> [Vec<String>; 6] {
        let mut cells: [Vec<String>; 6] = Default::default();
        for (position, token) in tokens_with_positions(line) {
            cells[self.column_at(position)].push(token);
        }
        cells
    }
}

/// Whitespace-separated tokens with their starting character offset
fn tokens_with_positions(line: &str) -> Vec<(usize, String)> {
    let mut tokens = Vec::new();
    let mut current: Option<(usize, String)> = None;

    for (position, c) in line.chars().enumerate() {
        if c.is_whitespace() {
            if let Some(token) = current.take() {
                tokens.push(token);
            }
        } else {
            current
                .get_or_insert_with(|| (position, String::new()))
                .1
                .push(c);
        }
    }
    if let Some(token) = current {
        tokens.push(token);
    }

    tokens
}

fn is_separator(line: &str) -> bool {
    line.trim_start().starts_with("===")
}

fn build_job(cells: [Vec<String>; 6]) -> Option<UpcomingJob> {
    let [level, job_type, priority, scheduled, name, volume] = cells;

    let priority = priority.join(" ");
    if job_type.is_empty() || priority.is_empty() || !priority.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }

    let mut scheduled = scheduled.into_iter();
    let date = scheduled.next()?;
    let time = scheduled.collect::<Vec<_>>().join(" ");

    Some(UpcomingJob {
        level: level.join(" "),
        job_type: job_type.join(" "),
        priority,
        date,
        time,
        name: name.join(" "),
        volume: volume.join(" "),
    })
}

/// Parse the scheduled-jobs table of a `status dir` report
///
/// Rows come back in source order. Separator lines and rows that do not
/// fit the table are skipped; a report without the table yields nothing.
pub fn parse_upcoming_jobs(output: &str) -> Vec<UpcomingJob> {
    let mut lines = output.lines();

    let Some(layout) = lines.by_ref().find_map(ColumnLayout::from_header) else {
        trace!("No scheduled jobs header in console output");
        return Vec::new();
    };

    let mut jobs = Vec::new();
    let mut separators = 0;
    for line in lines {
        if is_separator(line) {
            separators += 1;
            // header underline, then footer
            if separators >= 2 || !jobs.is_empty() {
                break;
            }
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        match build_job(layout.split_row(line)) {
            Some(job) => jobs.push(job),
            None => trace!("Skipping malformed scheduled job row: {:?}", line),
        }
    }

    jobs
}

/// Parse the output of `show disabled`
///
/// Every non-blank line under the `Disabled Jobs:` header is a job name.
pub fn parse_disabled_jobs(output: &str) -> Vec<DisabledJob> {
    let mut lines = output.lines();

    if !lines
        .by_ref()
        .any(|line| line.trim().eq_ignore_ascii_case(DISABLED_HEADER))
    {
        trace!("No disabled jobs header in console output");
        return Vec::new();
    }

    lines
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !line.ends_with(':'))
        .filter(|line| !line.to_ascii_lowercase().starts_with("no disabled"))
        .map(|line| DisabledJob {
            name: line.to_string(),
        })
        .collect()
}
