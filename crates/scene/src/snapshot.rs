use std::fmt::Write;

use layers::SurfaceLayer;
use layers::symbology::{LayerStyle, paint_css};
use layers::vector::fmt_px;

use crate::view::MapView;

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn style_attrs(style: &LayerStyle) -> String {
    format!(
        "fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"",
        paint_css(style.fill),
        paint_css(style.stroke),
        style.stroke_width
    )
}

/// Standalone SVG document of the view in its current state (last
/// [`MapView::update`] and zoom). Layer order matches the browser surface.
pub fn render_svg(view: &MapView) -> String {
    let surface = view.surface();
    let style = &view.context().style;
    let zoom = view.zoom().to_svg();
    let (w, h) = (fmt_px(surface.width), fmt_px(surface.height));

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" id=\"{}\">",
        escape_xml(&view.config().container_id())
    );

    for layer in surface.layers() {
        let class = layer.class_name();
        match layer {
            SurfaceLayer::BaseImage => {
                if let Some(img) = &surface.base_image {
                    let _ = writeln!(
                        svg,
                        "  <image class=\"{class}\" href=\"{}\" x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"none\" transform=\"{zoom}\"/>",
                        escape_xml(&img.href),
                        fmt_px(img.width),
                        fmt_px(img.height)
                    );
                }
            }
            SurfaceLayer::Sphere => {
                let _ = writeln!(
                    svg,
                    "  <path class=\"{class}\" d=\"{}\" {}/>",
                    surface.sphere_path,
                    style_attrs(&style.sphere)
                );
            }
            SurfaceLayer::Outline => {
                if let Some(d) = &surface.outline_path {
                    let _ = writeln!(
                        svg,
                        "  <path class=\"{class}\" d=\"{d}\" {} transform=\"{zoom}\"/>",
                        style_attrs(&style.outline)
                    );
                }
            }
            SurfaceLayer::Graticule => {
                let _ = writeln!(
                    svg,
                    "  <path class=\"{class}\" d=\"{}\" {} transform=\"{zoom}\"/>",
                    surface.graticule_path,
                    style_attrs(&style.graticule)
                );
            }
            SurfaceLayer::Markers => {
                let _ = writeln!(svg, "  <g class=\"{class}\" transform=\"{zoom}\">");
                for m in view.markers() {
                    let title = view.tooltip_text(m.key.as_str()).unwrap_or_default();
                    let _ = writeln!(
                        svg,
                        "    <circle class=\"{}\" data-key=\"{}\" cx=\"{}\" cy=\"{}\" r=\"{}\" {}><title>{}</title></circle>",
                        m.class_name(),
                        escape_xml(m.key.as_str()),
                        fmt_px(m.center.x),
                        fmt_px(m.center.y),
                        fmt_px(m.radius),
                        style_attrs(style.category(m.record.category)),
                        escape_xml(&title)
                    );
                }
                let _ = writeln!(svg, "  </g>");
            }
        }
    }

    svg.push_str("</svg>\n");
    svg
}
