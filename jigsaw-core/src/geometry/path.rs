//! Outline paths built from straight and Bézier segments.
//!
//! Paths are kept as structured commands so they can be inspected
//! (endpoint checks, bounds) and rendered as an SVG `d` attribute.

use std::fmt::{self, Display, Formatter, Write};

use derive_more::From;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::r2::R2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(tag = "kind")]
pub enum Cmd {
    MoveTo { to: R2<f64> },
    LineTo { to: R2<f64> },
    QuadTo { ctrl: R2<f64>, to: R2<f64> },
    CubicTo { ctrl1: R2<f64>, ctrl2: R2<f64>, to: R2<f64> },
    Close,
}

impl Cmd {
    /// The on-curve point this command ends at (`None` for `Close`).
    pub fn end(&self) -> Option<R2<f64>> {
        match self {
            Cmd::MoveTo { to } | Cmd::LineTo { to } | Cmd::QuadTo { to, .. } | Cmd::CubicTo { to, .. } => Some(*to),
            Cmd::Close => None,
        }
    }

    pub fn map(&self, f: impl Fn(R2<f64>) -> R2<f64>) -> Cmd {
        match *self {
            Cmd::MoveTo { to } => Cmd::MoveTo { to: f(to) },
            Cmd::LineTo { to } => Cmd::LineTo { to: f(to) },
            Cmd::QuadTo { ctrl, to } => Cmd::QuadTo { ctrl: f(ctrl), to: f(to) },
            Cmd::CubicTo { ctrl1, ctrl2, to } => Cmd::CubicTo { ctrl1: f(ctrl1), ctrl2: f(ctrl2), to: f(to) },
            Cmd::Close => Cmd::Close,
        }
    }

    /// Every point referenced by the command, control points included.
    pub fn all_points(&self) -> Vec<R2<f64>> {
        match *self {
            Cmd::MoveTo { to } | Cmd::LineTo { to } => vec![to],
            Cmd::QuadTo { ctrl, to } => vec![ctrl, to],
            Cmd::CubicTo { ctrl1, ctrl2, to } => vec![ctrl1, ctrl2, to],
            Cmd::Close => vec![],
        }
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
pub struct Bounds {
    pub min: R2<f64>,
    pub max: R2<f64>,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

#[derive(Debug, Clone, Default, PartialEq, From, Serialize, Deserialize, Tsify)]
pub struct Path {
    pub cmds: Vec<Cmd>,
}

impl Path {
    pub fn new() -> Self {
        Path { cmds: Vec::new() }
    }

    pub fn move_to(&mut self, to: R2<f64>) -> &mut Self {
        self.cmds.push(Cmd::MoveTo { to });
        self
    }
    pub fn line_to(&mut self, to: R2<f64>) -> &mut Self {
        self.cmds.push(Cmd::LineTo { to });
        self
    }
    pub fn quad_to(&mut self, ctrl: R2<f64>, to: R2<f64>) -> &mut Self {
        self.cmds.push(Cmd::QuadTo { ctrl, to });
        self
    }
    pub fn cubic_to(&mut self, ctrl1: R2<f64>, ctrl2: R2<f64>, to: R2<f64>) -> &mut Self {
        self.cmds.push(Cmd::CubicTo { ctrl1, ctrl2, to });
        self
    }
    pub fn close(&mut self) -> &mut Self {
        self.cmds.push(Cmd::Close);
        self
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.cmds.last(), Some(Cmd::Close))
    }

    /// On-curve points, in drawing order.
    pub fn points(&self) -> Vec<R2<f64>> {
        self.cmds.iter().filter_map(Cmd::end).collect()
    }

    pub fn translate(&self, offset: R2<f64>) -> Path {
        Path { cmds: self.cmds.iter().map(|c| c.map(|p| p + offset)).collect() }
    }

    pub fn scale(&self, factor: f64) -> Path {
        Path { cmds: self.cmds.iter().map(|c| c.map(|p| p * factor)).collect() }
    }

    /// Bounds over every referenced point, control points included; this
    /// over-approximates the curve extent, which is what clip boxes need.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut points = self.cmds.iter().flat_map(Cmd::all_points);
        let first = points.next()?;
        let init = Bounds { min: first, max: first };
        Some(points.fold(init, |b, p| Bounds {
            min: R2 { x: b.min.x.min(p.x), y: b.min.y.min(p.y) },
            max: R2 { x: b.max.x.max(p.x), y: b.max.y.max(p.y) },
        }))
    }

    /// SVG path data (`d` attribute).
    pub fn to_svg(&self) -> String {
        self.to_string()
    }
}

/// Formats a coordinate for SVG output: 3 decimals, trailing zeros dropped.
pub fn fmt_coord(v: f64) -> String {
    let rounded = (v * 1000.).round() / 1000.;
    // Avoid "-0"
    let rounded = if rounded == 0. { 0. } else { rounded };
    format!("{}", rounded)
}

fn write_point(f: &mut impl Write, p: &R2<f64>) -> fmt::Result {
    write!(f, "{} {}", fmt_coord(p.x), fmt_coord(p.y))
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (idx, cmd) in self.cmds.iter().enumerate() {
            if idx > 0 {
                f.write_char(' ')?;
            }
            match cmd {
                Cmd::MoveTo { to } => {
                    f.write_str("M ")?;
                    write_point(f, to)?;
                }
                Cmd::LineTo { to } => {
                    f.write_str("L ")?;
                    write_point(f, to)?;
                }
                Cmd::QuadTo { ctrl, to } => {
                    f.write_str("Q ")?;
                    write_point(f, ctrl)?;
                    f.write_char(' ')?;
                    write_point(f, to)?;
                }
                Cmd::CubicTo { ctrl1, ctrl2, to } => {
                    f.write_str("C ")?;
                    write_point(f, ctrl1)?;
                    f.write_char(' ')?;
                    write_point(f, ctrl2)?;
                    f.write_char(' ')?;
                    write_point(f, to)?;
                }
                Cmd::Close => f.write_char('Z')?,
            }
        }
        Ok(())
    }
}
