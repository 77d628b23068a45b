use std::io::{self, Write};

use crate::{
    boxes::BoxWriter,
    icon,
    model::{Units, WeatherReport, capitalize},
};

/// Renders current conditions as a single box.
#[derive(Debug, Clone)]
pub struct CurrentWeatherPresenter {
    width: usize,
}

impl CurrentWeatherPresenter {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    pub fn render<W: Write + ?Sized>(
        &self,
        report: &WeatherReport,
        units: Units,
        out: &mut W,
    ) -> io::Result<()> {
        let unit = units.symbol();
        let mut writer = BoxWriter::new(out, self.width);

        writer.header(icon::resolve(report.code))?;
        writer.title(&report.city)?;
        writer.body(&format!(
            "Temperatur: {} °{unit}, {}",
            report.temperature,
            capitalize(&report.description)
        ))?;
        writer.body(&format!("Känns som: {} °{unit}", report.feels_like))?;
        writer.footer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> WeatherReport {
        WeatherReport {
            city: "Umeå".to_string(),
            temperature: -4.2,
            feels_like: -9.8,
            description: "snöfall".to_string(),
            code: 601,
        }
    }

    fn rendered(units: Units) -> Vec<String> {
        let mut out = Vec::new();
        CurrentWeatherPresenter::new(45).render(&report(), units, &mut out).unwrap();
        String::from_utf8(out).unwrap().lines().map(str::to_string).collect()
    }

    #[test]
    fn renders_icon_title_two_bodies_and_footer() {
        let lines = rendered(Units::Metric);

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0].trim(), icon::SNOW);
        assert!(lines[1].starts_with('┌') && lines[1].contains("  Umeå  "));
        assert!(lines[2].starts_with("│ Temperatur: -4.2 °C, Snöfall"));
        assert!(lines[3].starts_with("│ Känns som: -9.8 °C"));
        assert!(lines[4].starts_with('└'));
    }

    #[test]
    fn box_lines_share_one_width() {
        let lines = rendered(Units::Metric);
        for line in &lines[1..] {
            assert_eq!(line.chars().count(), 48, "{line}");
        }
    }

    #[test]
    fn imperial_suffix() {
        let lines = rendered(Units::Imperial);

        assert!(lines[2].contains("-4.2 °F"));
        assert!(lines[3].contains("-9.8 °F"));
    }
}
