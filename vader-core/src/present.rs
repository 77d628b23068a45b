//! Text presenters writing finished reports to an output sink.

use std::io::{self, Write};

use crate::{
    config::Config,
    grouping::DayGrouper,
    model::{Forecast, Units},
};

pub mod current;
pub mod forecast;
pub mod historical;

pub use current::CurrentWeatherPresenter;
pub use forecast::{Block, ForecastPresenter};
pub use historical::HistoricalPresenter;

/// Box content width for the current-conditions report.
pub const CURRENT_WIDTH: usize = 45;
/// Box content width for each day of the 5-day forecast.
pub const FORECAST_WIDTH: usize = 45;
/// Box content width for the historical report.
pub const HISTORICAL_WIDTH: usize = 40;

/// Groups `forecast` by day and renders it with the configured width.
pub fn write_forecast<W: Write + ?Sized>(
    forecast: &Forecast,
    units: Units,
    config: &Config,
    out: &mut W,
) -> io::Result<()> {
    let groups = DayGrouper::new(units, forecast.city.as_str()).group(&forecast.samples);

    ForecastPresenter::new(config.widths.forecast).render(&groups, &forecast.city, out)
}
