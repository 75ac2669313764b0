use crate::config::{ChartConfig, ChartStyle};
use anyhow::{Context, Result, anyhow, bail};
use plotters::coord::ranged1d::SegmentValue;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::fs;

// GitHub dark background
const BACKGROUND: RGBColor = RGBColor(0x0d, 0x11, 0x17);
const AXIS_GRAY: RGBColor = RGBColor(128, 128, 128);

/// Fixed colors for popular languages, matching GitHub's linguist palette.
const LANG_COLORS: &[(&str, RGBColor)] = &[
    ("Python", RGBColor(0x37, 0x76, 0xab)),
    ("JavaScript", RGBColor(0xf1, 0xe0, 0x5a)),
    ("C++", RGBColor(0xf3, 0x4b, 0x7d)),
    ("C", RGBColor(0x55, 0x55, 0x55)),
    ("PHP", RGBColor(0x4f, 0x5d, 0x95)),
    ("HTML", RGBColor(0xe3, 0x4c, 0x26)),
    ("CSS", RGBColor(0x56, 0x3d, 0x7c)),
    ("Shell", RGBColor(0x89, 0xe0, 0x51)),
    ("R", RGBColor(0x19, 0x8c, 0xe7)),
];

/// Color for one bar: the fixed table when the language is known, otherwise
/// an evenly spaced HSL palette indexed by chart position (wrapping at
/// `palette_size`).
pub fn language_color(lang: &str, index: usize, palette_size: usize) -> RGBColor {
    if let Some((_, c)) = LANG_COLORS.iter().find(|(name, _)| *name == lang) {
        return *c;
    }
    let n = palette_size.max(1);
    let hue = (index % n) as f64 / n as f64;
    let rgba = HSLColor(hue, 0.65, 0.6).to_rgba();
    RGBColor(rgba.0, rgba.1, rgba.2)
}

/// Draw the horizontal bar chart and write it to `cfg.output` as PNG.
///
/// `labels` and `percentages` are parallel, ordered descending by share; bars
/// are laid out bottom-to-top so the largest language is the top bar.
pub fn render(labels: &[String], percentages: &[f64], cfg: &ChartConfig) -> Result<()> {
    if labels.is_empty() || labels.len() != percentages.len() {
        bail!("nothing to render: empty or mismatched label/percentage series");
    }
    let n = labels.len();

    if let Some(parent) = cfg.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("output path unwritable: cannot create {}", parent.display())
            })?;
        }
    }

    // Row 0 is drawn at the bottom, so reverse the descending input.
    let mut rows: Vec<(String, f64, RGBColor)> = labels
        .iter()
        .zip(percentages)
        .enumerate()
        .map(|(i, (label, pct))| (label.clone(), *pct, language_color(label, i, cfg.top_n)))
        .collect();
    rows.reverse();

    let max_pct = percentages.iter().cloned().fold(0.0f64, f64::max);
    let x_max = (max_pct + 12.0).clamp(10.0, 115.0);

    let (x_ticks, bar_margin) = match cfg.style {
        ChartStyle::Compact => (5usize, 14u32),
        ChartStyle::Spacious => (11usize, 9u32),
    };

    let root = BitMapBackend::new(&cfg.output, (cfg.width, cfg.height)).into_drawing_area();
    root.fill(&BACKGROUND)
        .map_err(|e| anyhow!("failed to fill chart background: {e}"))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Top Languages", ("sans-serif", 46).into_font().color(&WHITE))
        .margin(24)
        .x_label_area_size(52)
        .y_label_area_size(160)
        .build_cartesian_2d(0f64..x_max, (0..n).into_segmented())
        .map_err(|e| anyhow!("failed to lay out chart axes: {e}"))?;

    {
        let row_labels = rows.iter().map(|(l, _, _)| l.clone()).collect::<Vec<_>>();
        let y_formatter = |seg: &SegmentValue<usize>| match seg {
            SegmentValue::CenterOf(i) => row_labels.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        };

        let mut mesh = chart.configure_mesh();
        mesh.disable_y_mesh()
            .x_labels(x_ticks)
            .axis_style(&AXIS_GRAY)
            .light_line_style(&WHITE.mix(0.12))
            .bold_line_style(&WHITE.mix(0.12))
            .label_style(("sans-serif", 22).into_font().color(&WHITE))
            .y_label_formatter(&y_formatter);
        if cfg.style == ChartStyle::Spacious {
            mesh.x_desc("Share of code (%)");
        }
        mesh.draw()
            .map_err(|e| anyhow!("failed to draw chart mesh: {e}"))?;
    }

    chart
        .draw_series(rows.iter().enumerate().map(|(r, (_, pct, color))| {
            let mut bar = Rectangle::new(
                [(0.0, SegmentValue::Exact(r)), (*pct, SegmentValue::Exact(r + 1))],
                color.filled(),
            );
            bar.set_margin(bar_margin, bar_margin, 0, 0);
            bar
        }))
        .map_err(|e| anyhow!("failed to draw bars: {e}"))?;

    // Light highlight over the outer 80% of each bar
    if cfg.style == ChartStyle::Spacious {
        chart
            .draw_series(rows.iter().enumerate().map(|(r, (_, pct, _))| {
                let mut bar = Rectangle::new(
                    [
                        (pct * 0.2, SegmentValue::Exact(r)),
                        (*pct, SegmentValue::Exact(r + 1)),
                    ],
                    WHITE.mix(0.15).filled(),
                );
                bar.set_margin(bar_margin, bar_margin, 0, 0);
                bar
            }))
            .map_err(|e| anyhow!("failed to draw bar highlights: {e}"))?;
    }

    let annotation = ("sans-serif", 22)
        .into_font()
        .color(&WHITE)
        .pos(Pos::new(HPos::Left, VPos::Center));
    chart
        .draw_series(rows.iter().enumerate().map(|(r, (_, pct, _))| {
            Text::new(
                format!("{pct:.1}%"),
                (*pct + 1.0, SegmentValue::CenterOf(r)),
                annotation.clone(),
            )
        }))
        .map_err(|e| anyhow!("failed to draw percentage annotations: {e}"))?;

    root.present()
        .map_err(|e| anyhow!("failed to write chart to {}: {e}", cfg.output.display()))?;

    Ok(())
}
