use anyhow::Result;
use svg::Document;
use svg::node::element::{
    Definitions, Filter, FilterEffectDropShadow, Group, Rectangle, Text, Title,
};

use crate::entities::Layout;
use crate::io::svg::svg_util;
use crate::io::svg::svg_util::SvgDrawOptions;
use crate::render::{
    CanvasSize, DrawCommand, Focus, Frame, ItemDraw, RenderConfig, RenderTheme, Renderer,
};
use crate::viewport::Viewport;

/// Offset of the drop shadow, in px
const SHADOW_OFFSET: f32 = 3.0;
const SHADOW_FILTER_ID: &str = "item-shadow";
const FONT_SIZE: f32 = 11.0;

/// Draws a rendered [`Frame`] as an SVG document of the same pixel dimensions.
pub fn frame_to_svg(frame: &Frame, theme: &RenderTheme, options: SvgDrawOptions) -> Document {
    let mut document = Document::new()
        .set("viewBox", (0, 0, frame.width, frame.height))
        .set("width", frame.width)
        .set("height", frame.height);

    let shadowed = frame.commands.iter().any(|c| matches!(c, DrawCommand::Item(i) if i.shadow));
    if options.shadows && shadowed {
        document = document.add(Definitions::new().add(shadow_filter(theme)));
    }

    for command in &frame.commands {
        document = match command {
            DrawCommand::Clear { background } => document.add(
                Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", frame.width)
                    .set("height", frame.height)
                    .set("fill", format!("{background}")),
            ),
            DrawCommand::Container {
                id,
                rect,
                fill,
                stroke,
                stroke_width,
            } => document.add(
                Group::new()
                    .set("id", format!("container_{id}"))
                    .add(svg_util::data_to_path(
                        svg_util::rect_data(rect),
                        &[
                            ("fill", &*format!("{fill}")),
                            ("stroke", &*format!("{stroke}")),
                            ("stroke-width", &*format!("{stroke_width}")),
                        ],
                    ))
                    .add(Title::new(format!(
                        "container, id: {id}, px: [x_min: {:.1}, y_min: {:.1}, x_max: {:.1}, y_max: {:.1}]",
                        rect.x_min, rect.y_min, rect.x_max, rect.y_max
                    ))),
            ),
            DrawCommand::Item(item) => document.add(item_group(item, theme, options)),
        };
    }
    document
}

fn item_group(item: &ItemDraw, theme: &RenderTheme, options: SvgDrawOptions) -> Group {
    let mut group = Group::new()
        .set("id", format!("item_{}", item.id))
        .set("class", item.state.label());

    let mut body = svg_util::data_to_path(
        svg_util::rect_data(&item.rect),
        &[
            ("fill", &*format!("{}", item.fill)),
            ("stroke", &*format!("{}", item.stroke)),
            ("stroke-width", &*format!("{}", item.stroke_width)),
        ],
    );
    if item.shadow && options.shadows {
        body = body.set("filter", format!("url(#{SHADOW_FILTER_ID})"));
    }
    group = group.add(body);

    if let Some([id_line, label_line]) = &item.text {
        let center = item.rect.centroid();
        for (line, dy) in [(id_line, -0.6), (label_line, 0.6)] {
            group = group.add(
                Text::new(line.as_str())
                    .set("x", center.x())
                    .set("y", center.y() + dy * FONT_SIZE)
                    .set("font-size", FONT_SIZE)
                    .set("font-family", "monospace")
                    .set("text-anchor", "middle")
                    .set("dominant-baseline", "middle")
                    .set("fill", format!("{}", theme.label_color)),
            );
        }
    }

    if options.tooltips {
        group = group.add(Title::new(item.tooltip.to_string()));
    }
    group
}

/// Drop shadow referenced by the selected and hovered items
fn shadow_filter(theme: &RenderTheme) -> Filter {
    Filter::new()
        .set("id", SHADOW_FILTER_ID)
        .set("x", "-20%")
        .set("y", "-20%")
        .set("width", "140%")
        .set("height", "140%")
        .add(
            FilterEffectDropShadow::new()
                .set("dx", SHADOW_OFFSET)
                .set("dy", SHADOW_OFFSET)
                .set("stdDeviation", 2)
                .set("flood-color", format!("{}", theme.shadow_color))
                .set("flood-opacity", 0.35),
        )
}

/// Renders `layout` through `viewport` and draws the result as SVG.
/// If enabled, a header with the container's dimensions, efficiency and `title` is printed above the canvas.
pub fn layout_to_svg(
    layout: &Layout,
    viewport: &Viewport,
    focus: Focus,
    canvas: CanvasSize,
    config: &RenderConfig,
    options: SvgDrawOptions,
    title: &str,
) -> Result<Document> {
    let mut renderer = Renderer::new(*config);
    let frame = renderer.render(layout, viewport, focus, canvas, |_, _| {})?;
    let document = frame_to_svg(&frame, &config.theme, options);

    if !options.header {
        return Ok(document);
    }

    let container = layout.container();
    let header_height = 2.0 * FONT_SIZE;
    let header = Text::new(format!(
        "length: {:.0} | width: {:.0} | area: {:.2} m² | efficiency: {:.1}% | items: {} | {}",
        container.length_mm,
        container.width_mm,
        container.area_m2(),
        layout.metrics().efficiency * 100.0,
        layout.len(),
        title,
    ))
    .set("x", 0)
    .set("y", -0.5 * FONT_SIZE)
    .set("font-size", FONT_SIZE)
    .set("font-family", "monospace")
    .set("font-weight", "500");

    //extend the view box upwards to make room for the header
    Ok(document
        .set(
            "viewBox",
            (0.0, -header_height, frame.width as f32, frame.height as f32 + header_height),
        )
        .set("height", frame.height as f32 + header_height)
        .add(header))
}
