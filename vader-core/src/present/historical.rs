use std::io::{self, Write};

use crate::{boxes::BoxWriter, model::HistoricalReport};

/// Renders one day of historical observations.
#[derive(Debug, Clone)]
pub struct HistoricalPresenter {
    width: usize,
}

impl HistoricalPresenter {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    pub fn render<W: Write + ?Sized>(&self, report: &HistoricalReport, out: &mut W) -> io::Result<()> {
        let mut writer = BoxWriter::new(out, self.width);

        writer.title(&report.query)?;
        writer.body(&format!("Datum: {}", report.date.format("%Y-%m-%d")))?;
        writer.body(&format!("Högsta temperatur: {} °C", report.max_temp))?;
        writer.body(&format!("Lägsta temperatur: {} °C", report.min_temp))?;
        // Whole hours, truncated.
        writer.body(&format!("Totala soltimmar: {}h", report.sun_hours.trunc() as i64))?;
        writer.footer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn renders_all_fields() {
        let report = HistoricalReport {
            query: "Visby, Sweden".to_string(),
            date: NaiveDate::from_ymd_opt(2019, 6, 21).unwrap(),
            max_temp: 22.0,
            min_temp: 12.0,
            sun_hours: 15.9,
        };

        let mut out = Vec::new();
        HistoricalPresenter::new(40).render(&report, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 6);
        assert!(lines[0].contains("  Visby, Sweden  "));
        assert!(lines[1].contains("Datum: 2019-06-21"));
        assert!(lines[2].contains("Högsta temperatur: 22 °C"));
        assert!(lines[3].contains("Lägsta temperatur: 12 °C"));
        assert!(lines[4].contains("Totala soltimmar: 15h"));
        assert!(lines.iter().all(|l| l.chars().count() == 43));
    }
}
