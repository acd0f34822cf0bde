// The terminal score grid

use std::io::{self, Write};

use palette::{FromColor, Hsv, Srgb};
use termion::color::{Bg, Black, Fg, Rgb};
use termion::style;

use crate::display::DisplayOptions;
use crate::scores::ChordScores;
use crate::session::ScoredColumn;
use crate::tools::{normalize, Mappable};

// Width of the row label column
const LABEL_WIDTH: usize = 12;
// Width of every chord column
const CELL_WIDTH: usize = 14;
// Green for the lowest score of a row, red for the highest
const HUE_CALM: f32 = 120.0;
const HUE_TENSE: f32 = 0.0;

type Row = (&'static str, fn(&ChordScores) -> f64);

fn roughness(s: &ChordScores) -> f64 {
    s.scores.roughness
}
fn ttp(s: &ChordScores) -> f64 {
    s.scores.ttp
}
fn rqa(s: &ChordScores) -> f64 {
    s.scores.rqa
}
fn holistic(s: &ChordScores) -> f64 {
    s.scores.holistic
}
fn normalized_roughness(s: &ChordScores) -> f64 {
    s.normalized_roughness
}
fn tonal_distance(s: &ChordScores) -> f64 {
    s.ttp.tonal_distance
}
fn dissonance_proxy(s: &ChordScores) -> f64 {
    s.ttp.dissonance_proxy
}
fn voice_leading(s: &ChordScores) -> f64 {
    s.ttp.voice_leading
}

const SCORE_ROWS: [Row; 4] = [
    ("Sethares", roughness),
    ("TTP", ttp),
    ("RQA", rqa),
    ("Holistic", holistic),
];

const BREAKDOWN_ROWS: [Row; 4] = [
    ("Sethares N", normalized_roughness),
    ("Tonal dist", tonal_distance),
    ("TIV sum", dissonance_proxy),
    ("Voice lead", voice_leading),
];

fn shade(position: f32) -> Option<(u8, u8, u8)> {
    let hue = position.map_interval(0f32..1f32, HUE_CALM..HUE_TENSE, true)?;
    let hsv: Hsv = Hsv::new(hue, 0.8, 1.0);
    let color: Srgb<u8> = Srgb::<f32>::from_color(hsv).into_format();
    Some(color.into_components())
}

fn write_cell<W: Write>(
    out: &mut W,
    value: f64,
    position: Option<f32>,
    color: bool,
) -> io::Result<()> {
    let text = format!("{:>width$.2} ", value, width = CELL_WIDTH - 1);
    match position.and_then(shade) {
        Some((red, green, blue)) if color => write!(
            out,
            "{}{}{}{}",
            Bg(Rgb(red, green, blue)),
            Fg(Black),
            text,
            style::Reset
        ),
        _ => write!(out, "{}", text),
    }
}

fn write_row<W: Write>(
    out: &mut W,
    (label, value): Row,
    columns: &[ScoredColumn],
    color: bool,
) -> io::Result<()> {
    let values: Vec<f64> = columns.iter().map(|c| value(&c.scores)).collect();
    write!(out, "{:<width$}", label, width = LABEL_WIDTH)?;
    for (&v, position) in values.iter().zip(normalize(&values)) {
        write_cell(out, v, position, color)?;
    }
    writeln!(out)
}

/// Writes the score grid: one column per finalized chord.
pub fn render<W: Write>(
    out: &mut W,
    columns: &[ScoredColumn],
    options: DisplayOptions,
) -> io::Result<()> {
    write!(out, "{:<width$}", "", width = LABEL_WIDTH)?;
    for column in columns {
        let title = format!("Chord {} ({})", column.index + 1, column.dynamics);
        write!(out, "{:>width$.width$}", title, width = CELL_WIDTH)?;
    }
    writeln!(out)?;
    write!(out, "{:<width$}", "", width = LABEL_WIDTH)?;
    for column in columns {
        let label = options.notation.chord_label(&column.notes);
        write!(out, "{:>width$.width$}", label, width = CELL_WIDTH)?;
    }
    writeln!(out)?;

    for row in SCORE_ROWS {
        write_row(out, row, columns, options.color)?;
    }

    if options.breakdown {
        for row in BREAKDOWN_ROWS {
            write_row(out, row, columns, false)?;
        }
        // The key angle is undefined for a silent chord
        write!(out, "{:<width$}", "Key angle", width = LABEL_WIDTH)?;
        for column in columns {
            match column.scores.ttp.key_angle {
                Some(angle) => write!(out, "{:>width$.2} ", angle, width = CELL_WIDTH - 1)?,
                None => write!(out, "{:>width$} ", "undefined", width = CELL_WIDTH - 1)?,
            }
        }
        writeln!(out)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::Dynamics;
    use crate::notes::Note;
    use crate::scores::ScoreSet;
    use crate::ttp::TtpBreakdown;

    fn column(index: usize, midi: &[u8], rqa: f64, key_angle: Option<f64>) -> ScoredColumn {
        ScoredColumn {
            index,
            notes: midi.iter().map(|&m| Note::new(m).unwrap()).collect(),
            dynamics: Dynamics::Mf,
            scores: ChordScores {
                scores: ScoreSet {
                    roughness: 12.0,
                    ttp: 1.5,
                    rqa,
                    holistic: 0.75,
                },
                normalized_roughness: 0.1,
                ttp: TtpBreakdown {
                    key_angle,
                    ..TtpBreakdown::default()
                },
            },
        }
    }

    fn plain(breakdown: bool) -> DisplayOptions {
        DisplayOptions {
            color: false,
            breakdown,
            ..DisplayOptions::default()
        }
    }

    fn render_string(columns: &[ScoredColumn], options: DisplayOptions) -> String {
        let mut out = Vec::new();
        render(&mut out, columns, options).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn plain_grid() {
        let text = render_string(&[column(0, &[72, 60], 0.5, Some(0.3))], plain(false));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].contains("Chord 1 (mf)"));
        assert!(lines[1].contains("C4 C5"));
        assert!(lines[2].starts_with("Sethares"));
        assert!(lines[2].contains("12.00"));
        assert!(lines[4].starts_with("RQA"));
        assert!(lines[4].contains("0.50"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn breakdown_shows_undefined_angle() {
        let columns = [column(0, &[60], 1.0, Some(0.25)), column(1, &[62], 1.0, None)];
        let text = render_string(&columns, plain(true));
        let angle_line = text.lines().find(|l| l.starts_with("Key angle")).unwrap();
        assert!(angle_line.contains("0.25"));
        assert!(angle_line.contains("undefined"));
        assert!(text.contains("Voice lead"));
    }

    #[test]
    fn colored_grid_uses_escapes() {
        let columns = [column(0, &[60], 0.2, None), column(1, &[64], 0.9, None)];
        let text = render_string(&columns, DisplayOptions::default());
        assert!(text.contains("\x1b[48;2;"));
    }

    #[test]
    fn gradient_ends() {
        let (red, green, _) = shade(0.0).unwrap();
        assert!(green > red);
        let (red, green, _) = shade(1.0).unwrap();
        assert!(red > green);
    }
}
