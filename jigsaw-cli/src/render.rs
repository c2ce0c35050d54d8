//! SVG rendering of a puzzle board.

use std::fmt::{self, Write};

use jigsaw_core::{path::fmt_coord, BoardView, Phase, PieceView};

/// SVG rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Room around the board for scattered pieces (board units)
    pub margin: f64,
    /// Stroke width for piece outlines
    pub stroke_width: f64,
    /// Source image revealed through the pieces; flat colors when absent
    pub image: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            margin: 110.0,
            stroke_width: 1.5,
            image: None,
        }
    }
}

/// Fill palette used when no image is given
const COLORS: &[&str] = &[
    "#e63946", // red
    "#f4a261", // orange
    "#e9c46a", // yellow
    "#2a9d8f", // teal
    "#457b9d", // blue
    "#a8dadc", // pale blue
];

const BACKGROUND: &str = "#f9f7f4";

/// Render a board view to an SVG document.
pub fn render_svg(view: &BoardView, config: &RenderConfig) -> Result<String, fmt::Error> {
    let size = view.board_size;
    let m = config.margin;
    let mut svg = String::new();

    writeln!(
        &mut svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{w}" viewBox="{min} {min} {w} {w}">"#,
        min = fmt_coord(-m),
        w = fmt_coord(size + 2. * m),
    )?;
    writeln!(
        &mut svg,
        r#"  <rect x="{min}" y="{min}" width="{w}" height="{w}" fill="{}"/>"#,
        BACKGROUND,
        min = fmt_coord(-m),
        w = fmt_coord(size + 2. * m),
    )?;

    match view.phase {
        Phase::Playing => {
            if view.show_guide {
                writeln!(
                    &mut svg,
                    r##"  <path d="{}" fill="none" stroke="#e63946" stroke-width="2" stroke-dasharray="5,5" opacity="0.2"/>"##,
                    view.silhouette
                )?;
            }
            let mut pieces: Vec<&PieceView> = view.pieces.iter().collect();
            pieces.sort_by_key(|p| (p.z_index, p.id));
            for piece in pieces {
                write_piece(&mut svg, piece, view, config)?;
            }
        }
        Phase::Solved => write_solved(&mut svg, view, config)?,
    }

    writeln!(&mut svg, "</svg>")?;
    Ok(svg)
}

/// Escape a value for use inside a double-quoted XML attribute.
fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('<', "&lt;").replace('"', "&quot;")
}

fn write_piece(svg: &mut String, piece: &PieceView, view: &BoardView, config: &RenderConfig) -> fmt::Result {
    let center = (piece.viewport.min.x + piece.viewport.max.x) / 2.;
    writeln!(
        svg,
        r#"  <g transform="translate({} {}) rotate({} {c} {c})">"#,
        fmt_coord(piece.position.x),
        fmt_coord(piece.position.y),
        fmt_coord(piece.rotation),
        c = fmt_coord(center),
    )?;
    match &config.image {
        Some(href) => {
            // The image, and the heart it is cropped to, live in board coordinates.
            writeln!(svg, r#"    <clipPath id="piece-{}"><path d="{}"/></clipPath>"#, piece.id, piece.outline)?;
            writeln!(svg, r#"    <clipPath id="heart-{}"><path d="{}"/></clipPath>"#, piece.id, view.silhouette)?;
            writeln!(svg, r#"    <g clip-path="url(#piece-{})">"#, piece.id)?;
            writeln!(
                svg,
                r#"      <g transform="{}" clip-path="url(#heart-{})">"#,
                piece.image.svg_transform(),
                piece.id,
            )?;
            writeln!(
                svg,
                r#"        <image href="{}" x="0" y="0" width="{w}" height="{w}" preserveAspectRatio="xMidYMid slice"/>"#,
                escape_attr(href),
                w = fmt_coord(view.board_size),
            )?;
            writeln!(svg, "      </g>")?;
            writeln!(svg, "    </g>")?;
        }
        None => {
            let color = COLORS[(piece.row + piece.col) % COLORS.len()];
            writeln!(svg, r#"    <path d="{}" fill="{}"/>"#, piece.outline, color)?;
        }
    }
    writeln!(
        svg,
        r#"    <path d="{}" fill="none" stroke="rgba(255,255,255,0.6)" stroke-width="{}"/>"#,
        piece.outline,
        config.stroke_width,
    )?;
    writeln!(svg, "  </g>")
}

fn write_solved(svg: &mut String, view: &BoardView, config: &RenderConfig) -> fmt::Result {
    writeln!(svg, r#"  <clipPath id="silhouette"><path d="{}"/></clipPath>"#, view.silhouette)?;
    match &config.image {
        Some(href) => writeln!(
            svg,
            r#"  <image href="{}" x="0" y="0" width="{w}" height="{w}" clip-path="url(#silhouette)" preserveAspectRatio="xMidYMid slice"/>"#,
            escape_attr(href),
            w = fmt_coord(view.board_size),
        ),
        None => writeln!(svg, r#"  <path d="{}" fill="{}"/>"#, view.silhouette, COLORS[0]),
    }
}
