use failure;
use pdf_canvas::graphicsstate::Color;
use pdf_canvas::{BuiltinFont, FontSource, Pdf};

use super::{lane_count, Placement, Report};

/// One page, one day: hour grid down the left, blocks as colored boxes.
#[derive(Default)]
pub struct DayReport;

const PAGE_DIM: (f32, f32) = (180.0, 240.0);
const MARGIN: f32 = 10.0;
const AXIS_WIDTH: f32 = 16.0;
const TIMELINE_TOP: f32 = 205.0;
const TIMELINE_BOTTOM: f32 = 15.0;

/// Vertical page coordinate of a timeline percentage. The PDF y axis grows
/// upwards, the timeline grows downwards.
fn timeline_y(percent: f64) -> f32 {
    TIMELINE_TOP - (percent as f32 / 100.0) * (TIMELINE_TOP - TIMELINE_BOTTOM)
}

fn rgb(color: (u8, u8, u8)) -> Color {
    Color::rgb(color.0, color.1, color.2)
}

impl Report for DayReport {
    fn render(
        &self,
        date: &str,
        placements: &[Placement],
        report_filename: &str,
    ) -> Result<Pdf, failure::Error> {
        debug!(
            "Rendering {} block(s) for {} into {}",
            placements.len(),
            date,
            report_filename
        );

        let lanes = lane_count(placements).max(1);
        let timeline_left = MARGIN + AXIS_WIDTH;
        let lane_width = (PAGE_DIM.0 - MARGIN - timeline_left) / lanes as f32;
        trace!("Lane count: {}, lane width: {}", lanes, lane_width);

        let mut document = Pdf::create(report_filename)?;

        document.render_page(PAGE_DIM.0, PAGE_DIM.1, |canvas| {
            let font = BuiltinFont::Helvetica_Bold;
            let label_font = BuiltinFont::Helvetica;

            // Title
            let title = &format!("Timeline {}", date);
            let title_font_size = 10.0;
            let title_width = font.get_width(title_font_size, title) + 8.0;
            let title_y = PAGE_DIM.1 - 20.0;

            canvas.set_stroke_color(Color::gray(0))?;
            canvas.set_line_width(0.5)?;
            canvas.line(
                (PAGE_DIM.0 - title_width) / 2.0,
                title_y - 6.0,
                (PAGE_DIM.0 + title_width) / 2.0,
                title_y - 6.0,
            )?;
            canvas.stroke()?;
            canvas.center_text(PAGE_DIM.0 / 2.0, title_y, font, title_font_size, title)?;

            // Hour grid
            canvas.set_stroke_color(Color::gray(220))?;
            canvas.set_line_width(0.25)?;
            for hour in 0..25 {
                let y = timeline_y(f64::from(hour) / 24.0 * 100.0);
                canvas.line(timeline_left, y, PAGE_DIM.0 - MARGIN, y)?;
                canvas.stroke()?;

                canvas.set_fill_color(Color::gray(110))?;
                canvas.left_text(
                    MARGIN,
                    y - 1.5,
                    label_font,
                    4.0,
                    &format!("{:02}:00", hour),
                )?;
            }

            // Blocks
            canvas.set_line_width(0.5)?;
            for placement in placements {
                let colors = placement.block.style.colors();
                let top = timeline_y(placement.interval.start_percent);
                let bottom = timeline_y(placement.interval.end_percent);
                let x = timeline_left + placement.lane as f32 * lane_width + 0.5;
                let width = lane_width - 1.0;

                canvas.set_fill_color(rgb(colors.background))?;
                canvas.rectangle(x, bottom, width, top - bottom)?;
                canvas.fill()?;

                canvas.set_stroke_color(rgb(colors.border))?;
                canvas.rectangle(x, bottom, width, top - bottom)?;
                canvas.stroke()?;

                if top - bottom >= 5.0 {
                    canvas.set_fill_color(Color::gray(30))?;
                    canvas.left_text(
                        x + 1.5,
                        top - 4.0,
                        label_font,
                        3.5,
                        &format!("{} ({})", placement.block.user_label(), placement.block.style),
                    )?;
                }
            }

            Ok(())
        })?;
        Ok(document)
    }
}
