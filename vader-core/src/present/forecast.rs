use std::io::{self, Write};

use crate::{boxes::BoxWriter, grouping::DayGroup};

const TODAY_PREFIX: &str = "IDAG";

/// One horizontal band of the forecast layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Block<'a> {
    /// A day drawn alone, centered over the paired columns.
    Single { day: &'a DayGroup, today: bool },
    Pair(&'a DayGroup, &'a DayGroup),
}

/// First day full-width, the rest side by side two at a time. A trailing day
/// without a partner is drawn full-width.
pub fn plan(groups: &[DayGroup]) -> Vec<Block<'_>> {
    let Some((today, rest)) = groups.split_first() else {
        return Vec::new();
    };

    let mut blocks = vec![Block::Single { day: today, today: true }];
    blocks.extend(rest.chunks(2).map(|chunk| match chunk {
        [left, right] => Block::Pair(left, right),
        [day] => Block::Single { day, today: false },
        _ => unreachable!("chunks(2) yields one or two days"),
    }));
    blocks
}

/// Renders the multi-day forecast.
#[derive(Debug, Clone)]
pub struct ForecastPresenter {
    width: usize,
}

impl ForecastPresenter {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    pub fn render<W: Write + ?Sized>(
        &self,
        groups: &[DayGroup],
        city_label: &str,
        out: &mut W,
    ) -> io::Result<()> {
        let blocks = plan(groups);
        if blocks.is_empty() {
            log::warn!("no forecast days to render for {city_label}");
            return Ok(());
        }
        if groups.len() != 5 {
            log::info!("rendering {} forecast days instead of 5", groups.len());
        }

        let mut writer = BoxWriter::new(out, self.width);
        let single_indent = single_indent(self.width);

        for block in blocks {
            match block {
                Block::Single { day, today } => {
                    writer.set_indent(single_indent);
                    let caption = if today {
                        format!("{TODAY_PREFIX} - {}", day_title(day))
                    } else {
                        day_title(day)
                    };
                    render_single(&mut writer, day, &caption, city_label)?;
                }
                Block::Pair(left, right) => {
                    writer.set_indent(0);
                    render_pair(&mut writer, left, right, city_label)?;
                }
            }
        }

        Ok(())
    }
}

/// Left margin that places a single box roughly centered over a pair.
fn single_indent(width: usize) -> usize {
    width / 2 + 1
}

fn day_title(day: &DayGroup) -> String {
    day.date.format("%Y-%m-%d").to_string()
}

fn render_single<W: Write + ?Sized>(
    writer: &mut BoxWriter<'_, W>,
    day: &DayGroup,
    caption: &str,
    city_label: &str,
) -> io::Result<()> {
    writer.header(day.icon)?;
    writer.title(caption)?;
    writer.subheader(city_label)?;
    for line in &day.lines {
        writer.body(line)?;
    }
    writer.footer()
}

fn render_pair<W: Write + ?Sized>(
    writer: &mut BoxWriter<'_, W>,
    left: &DayGroup,
    right: &DayGroup,
    city_label: &str,
) -> io::Result<()> {
    writer.paired_header(left.icon, right.icon)?;
    writer.paired_title(&day_title(left), &day_title(right))?;
    writer.paired_subheader(city_label, city_label)?;

    // Partial days may hold fewer samples; the shorter side is padded blank.
    let rows = left.lines.len().max(right.lines.len());
    for row in 0..rows {
        let l = left.lines.get(row).map_or("", String::as_str);
        let r = right.lines.get(row).map_or("", String::as_str);
        writer.paired_body(l, r)?;
    }
    writer.paired_footer()
}
