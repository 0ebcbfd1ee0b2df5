// SVG renderer - Draws a ChartView with plotters and wraps it in the widget chrome
use crate::domain::chart::{ChartView, LineChart, NO_DATA_MESSAGE, SeriesKey};
use crate::domain::range::RangeSelection;
use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fmt::{self, Write as _};

const TITLE: &str = "Multi-Metric View";
const FONT: &str = "Inter, Segoe UI, sans-serif";
const HEADER_HEIGHT: u32 = 56;
const SELECTOR_WIDTH: u32 = 40;
const SPINNER_COLOR: &str = "#16a34a";
const MESSAGE_COLOR: &str = "#64748b";

const AXIS_COLOR: RGBColor = RGBColor(0x64, 0x74, 0x8b);
const GRID_COLOR: RGBColor = RGBColor(0xf1, 0xf5, 0xf9);
const LEGEND_BORDER: RGBColor = RGBColor(0xe2, 0xe8, 0xf0);

/// Pixel size of the plot container below the header.
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
}

impl Layout {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(720, 256)
    }
}

/// Hover band for one point, in plot pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
struct HoverTarget {
    x: i32,
    width: i32,
}

/// Plot output: the plotters SVG plus where each point landed.
struct Plot {
    svg: String,
    targets: Vec<HoverTarget>,
    top: i32,
    height: i32,
}

pub fn render_svg(view: &ChartView, layout: &Layout) -> Result<String> {
    let total_height = HEADER_HEIGHT + layout.height;
    let mut svg = String::new();

    writeln!(
        svg,
        "<svg xmlns='http://www.w3.org/2000/svg' width='{w}' height='{total_height}' viewBox='0 0 {w} {total_height}' role='img'>",
        w = layout.width
    )?;
    writeln!(
        svg,
        "  <rect width='{}' height='{total_height}' rx='12' fill='#ffffff' stroke='#e2e8f0'/>",
        layout.width
    )?;
    write_header(&mut svg, view.range(), layout)?;

    match view {
        ChartView::Loading { .. } => write_spinner(&mut svg, layout)?,
        ChartView::Empty { .. } => write_message(&mut svg, NO_DATA_MESSAGE, layout)?,
        ChartView::Chart(chart) => {
            let plot = plot_chart(chart, layout)?;
            writeln!(svg, "  <g class='plot' transform='translate(0 {HEADER_HEIGHT})'>")?;
            svg.push_str(strip_prolog(&plot.svg));
            svg.push('\n');
            write_tooltips(&mut svg, chart, &plot)?;
            writeln!(svg, "  </g>")?;
        }
    }

    writeln!(svg, "</svg>")?;
    Ok(svg)
}

fn plot_chart(chart: &LineChart, layout: &Layout) -> Result<Plot> {
    let mut buffer = String::new();
    let (targets, top, height) = {
        let root = SVGBackend::with_string(&mut buffer, (layout.width, layout.height)).into_drawing_area();
        draw_series(chart, &root)?
    };

    Ok(Plot {
        svg: buffer,
        targets,
        top,
        height,
    })
}

/// Draw the mesh, the three series and the legend. Points sit on a
/// category axis at x = index, so they are evenly spaced like the labels.
fn draw_series<DB: DrawingBackend>(
    chart: &LineChart,
    root: &DrawingArea<DB, Shift>,
) -> Result<(Vec<HoverTarget>, i32, i32)> {
    root.fill(&WHITE)
        .map_err(|e| anyhow::anyhow!("Failed to fill plot background: {}", e))?;

    let count = chart.points.len();
    let (lo, hi) = chart.value_bounds().unwrap_or((0.0, 1.0));
    let span = hi - lo;
    let margin = if span.abs() < 1e-10 {
        hi.abs() * 0.05 + 0.1
    } else {
        span * 0.05
    };
    let x_range = -0.5..(count as f64 - 0.5);
    let y_range = (lo - margin)..(hi + margin);

    let mut plot = ChartBuilder::on(root)
        .margin(10)
        .x_label_area_size(24)
        .y_label_area_size(40)
        .build_cartesian_2d(x_range, y_range)
        .map_err(|e| anyhow::anyhow!("Failed to build chart: {}", e))?;

    let time_label = |x: &f64| -> String {
        let index = x.round();
        if (x - index).abs() > 1e-6 || index < 0.0 {
            return String::new();
        }
        chart
            .points
            .get(index as usize)
            .map(|p| p.time_label.clone())
            .unwrap_or_default()
    };
    let value_label = |v: &f64| -> String {
        if span >= 10.0 {
            format!("{:.0}", v)
        } else {
            format!("{:.1}", v)
        }
    };

    plot.configure_mesh()
        .x_labels(count.clamp(1, 10))
        .y_labels(5)
        .bold_line_style(GRID_COLOR.stroke_width(1))
        .light_line_style(WHITE.mix(0.0))
        .axis_style(AXIS_COLOR.stroke_width(1))
        .label_style(("sans-serif", 12).into_font().color(&AXIS_COLOR))
        .x_label_formatter(&time_label)
        .y_label_formatter(&value_label)
        .draw()
        .map_err(|e| anyhow::anyhow!("Failed to draw mesh: {}", e))?;

    for key in chart.series() {
        let (r, g, b) = key.rgb();
        let color = RGBColor(r, g, b);
        let values: Vec<(f64, f64)> = chart
            .points
            .iter()
            .enumerate()
            .map(|(index, point)| (index as f64, key.value(point)))
            .collect();

        plot.draw_series(LineSeries::new(values.iter().copied(), color.stroke_width(2)))
            .map_err(|e| anyhow::anyhow!("Failed to draw series {}: {}", key.id(), e))?
            .label(key.legend_label())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], color.stroke_width(2)));

        // A lone point has no segment to draw
        if count == 1 {
            plot.draw_series(values.iter().map(|&(x, y)| Circle::new((x, y), 3, color.filled())))
                .map_err(|e| anyhow::anyhow!("Failed to mark series {}: {}", key.id(), e))?;
        }
    }

    plot.configure_series_labels()
        .position(plotters::chart::SeriesLabelPosition::UpperRight)
        .label_font(("sans-serif", 12).into_font().color(&AXIS_COLOR))
        .background_style(WHITE.mix(0.8))
        .border_style(LEGEND_BORDER.stroke_width(1))
        .draw()
        .map_err(|e| anyhow::anyhow!("Failed to draw legend: {}", e))?;

    let (x_pixels, y_pixels) = plot.plotting_area().get_pixel_range();
    let band = if count <= 1 {
        x_pixels.end - x_pixels.start
    } else {
        plot.backend_coord(&(1.0, 0.0)).0 - plot.backend_coord(&(0.0, 0.0)).0
    };
    let targets = (0..count)
        .map(|index| HoverTarget {
            x: plot.backend_coord(&(index as f64, 0.0)).0 - band / 2,
            width: band,
        })
        .collect();

    root.present()
        .map_err(|e| anyhow::anyhow!("Failed to finish plot: {}", e))?;

    Ok((targets, y_pixels.start, y_pixels.end - y_pixels.start))
}

fn strip_prolog(svg: &str) -> &str {
    svg.find("<svg").map(|start| &svg[start..]).unwrap_or(svg)
}

fn write_header(svg: &mut String, active: RangeSelection, layout: &Layout) -> fmt::Result {
    writeln!(
        svg,
        "  <text x='16' y='34' fill='#0f172a' font-family='{FONT}' font-size='18' font-weight='600'>{}</text>",
        escape_text(TITLE)
    )?;

    let ranges = RangeSelection::all();
    let start = layout.width.saturating_sub(16 + SELECTOR_WIDTH * ranges.len() as u32);

    writeln!(svg, "  <g class='range-selector'>")?;
    for (index, range) in ranges.iter().enumerate() {
        let x = start + index as u32 * SELECTOR_WIDTH;
        let (fill, text) = if *range == active {
            ("#0f172a", "#ffffff")
        } else {
            ("#ffffff", "#475569")
        };
        writeln!(svg, "    <a href='?range={}'>", range.label())?;
        writeln!(
            svg,
            "      <rect x='{x}' y='18' width='{}' height='22' rx='4' fill='{fill}' stroke='#cbd5e1'/>",
            SELECTOR_WIDTH - 4
        )?;
        writeln!(
            svg,
            "      <text x='{}' y='33' text-anchor='middle' fill='{text}' font-family='{FONT}' font-size='12'>{}</text>",
            x + (SELECTOR_WIDTH - 4) / 2,
            range.label()
        )?;
        writeln!(svg, "    </a>")?;
    }
    writeln!(svg, "  </g>")
}

fn write_spinner(svg: &mut String, layout: &Layout) -> fmt::Result {
    let cx = layout.width / 2;
    let cy = HEADER_HEIGHT + layout.height / 2;
    writeln!(svg, "  <g class='spinner'>")?;
    writeln!(
        svg,
        "    <circle cx='{cx}' cy='{cy}' r='16' fill='none' stroke='{SPINNER_COLOR}' stroke-width='2' stroke-dasharray='25 75' pathLength='100'>"
    )?;
    writeln!(
        svg,
        "      <animateTransform attributeName='transform' type='rotate' from='0 {cx} {cy}' to='360 {cx} {cy}' dur='1s' repeatCount='indefinite'/>"
    )?;
    writeln!(svg, "    </circle>")?;
    writeln!(svg, "  </g>")
}

fn write_message(svg: &mut String, message: &str, layout: &Layout) -> fmt::Result {
    writeln!(
        svg,
        "  <text class='empty' x='{}' y='{}' text-anchor='middle' fill='{MESSAGE_COLOR}' font-family='{FONT}' font-size='14'>{}</text>",
        layout.width / 2,
        HEADER_HEIGHT + layout.height / 2,
        escape_text(message)
    )
}

/// One transparent band per point carrying the tooltip as `<title>`.
fn write_tooltips(svg: &mut String, chart: &LineChart, plot: &Plot) -> fmt::Result {
    writeln!(svg, "  <g class='tooltips'>")?;
    for (point, target) in chart.points.iter().zip(&plot.targets) {
        let (header, rows) = point.tooltip();
        let mut lines = vec![header];
        lines.extend(rows.into_iter().map(|(name, value)| format!("{name}: {value}")));

        writeln!(svg, "    <g class='point'>")?;
        writeln!(svg, "      <title>{}</title>", escape_text(&lines.join("\n")))?;
        writeln!(
            svg,
            "      <rect x='{}' y='{}' width='{}' height='{}' fill='transparent'/>",
            target.x, plot.top, target.width, plot.height
        )?;
        writeln!(svg, "    </g>")?;
    }
    writeln!(svg, "  </g>")
}

fn escape_text(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&apos;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
