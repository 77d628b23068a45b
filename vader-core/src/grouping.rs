//! Splits the flat 3-hour forecast series into calendar days.

use chrono::{NaiveDate, Timelike};

use crate::{
    icon,
    model::{ForecastSample, Units, capitalize},
};

/// Local hour of the sample that closes a day: the last 3-hour step of a
/// UTC day.
pub const DAY_END_HOUR: u32 = 21;

/// One calendar day of rendered forecast lines.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    pub date: NaiveDate,
    pub lines: Vec<String>,
    /// Most frequent condition code of the day.
    pub code: u16,
    pub icon: &'static str,
    pub label: String,
}

/// Occurrence count per condition code, in first-seen order.
#[derive(Debug, Default)]
struct Tally(Vec<(u16, usize)>);

impl Tally {
    fn add(&mut self, code: u16) {
        match self.0.iter_mut().find(|(seen, _)| *seen == code) {
            Some((_, count)) => *count += 1,
            None => self.0.push((code, 1)),
        }
    }

    /// Highest count wins; ties go to the code seen first.
    fn majority(&self) -> Option<u16> {
        let mut best: Option<(u16, usize)> = None;
        for &(code, count) in &self.0 {
            if best.is_none_or(|(_, top)| count > top) {
                best = Some((code, count));
            }
        }
        best.map(|(code, _)| code)
    }
}

/// Most frequent code in `codes`, ties broken by first occurrence.
pub fn majority_code(codes: impl IntoIterator<Item = u16>) -> Option<u16> {
    let mut tally = Tally::default();
    codes.into_iter().for_each(|code| tally.add(code));
    tally.majority()
}

/// `"HH:MM: <temp> °<unit>, <Description>"`
pub fn sample_line(sample: &ForecastSample, units: Units) -> String {
    format!(
        "{}: {} °{}, {}",
        sample.timestamp.format("%H:%M"),
        sample.temperature,
        units.symbol(),
        capitalize(&sample.description)
    )
}

struct DayAccumulator {
    date: NaiveDate,
    tally: Tally,
    lines: Vec<String>,
}

impl DayAccumulator {
    fn new(date: NaiveDate) -> Self {
        Self { date, tally: Tally::default(), lines: Vec::new() }
    }

    fn close(self, label: &str) -> DayGroup {
        // An accumulator only exists once a sample has been pushed.
        let code = self.tally.majority().unwrap_or_default();
        DayGroup {
            date: self.date,
            lines: self.lines,
            code,
            icon: icon::resolve(code),
            label: label.to_string(),
        }
    }
}

/// Builds [`DayGroup`]s from chronologically ordered samples.
#[derive(Debug, Clone)]
pub struct DayGrouper {
    units: Units,
    label: String,
}

impl DayGrouper {
    pub fn new(units: Units, label: impl Into<String>) -> Self {
        Self { units, label: label.into() }
    }

    pub fn group(&self, samples: &[ForecastSample]) -> Vec<DayGroup> {
        let mut groups = Vec::new();
        let mut open: Option<DayAccumulator> = None;
        let last = samples.len().saturating_sub(1);

        for (index, sample) in samples.iter().enumerate() {
            let date = sample.date();

            // A day that never reached the day-end marker is flushed on the
            // first sample of the next date.
            if let Some(acc) = open.take_if(|acc| acc.date != date) {
                log::debug!("closing {} without a day-end sample", acc.date);
                groups.push(acc.close(&self.label));
            }

            let acc = open.get_or_insert_with(|| DayAccumulator::new(date));
            acc.lines.push(sample_line(sample, self.units));
            acc.tally.add(sample.code);

            // A day-end sample followed by more samples of the same date (finer
            // than 3-hour steps) keeps the day open.
            let same_date_follows =
                samples.get(index + 1).is_some_and(|next| next.date() == date);
            let closing = index == last || (is_day_end(sample) && !same_date_follows);
            if let Some(acc) = open.take_if(|_| closing) {
                groups.push(acc.close(&self.label));
            }
        }

        groups
    }
}

fn is_day_end(sample: &ForecastSample) -> bool {
    let time = sample.timestamp.time();
    time.hour() == DAY_END_HOUR && time.minute() == 0
}
