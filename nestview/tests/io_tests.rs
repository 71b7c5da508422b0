#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use std::fs::File;
    use std::path::Path;

    use nestview::entities::{Layout, Priority};
    use nestview::io::ext_repr::{ExtAllocationPlan, ExtLayout};
    use nestview::io::svg::svg_util::SvgDrawOptions;
    use nestview::io::svg::{frame_to_svg, layout_to_svg};
    use nestview::io::{export, import};
    use nestview::render::{CanvasSize, Focus, RenderConfig, Renderer};
    use nestview::viewport::Viewport;
    use test_case::test_case;

    fn read_layout(path: &str) -> ExtLayout {
        let file = File::open(Path::new(path)).unwrap();
        serde_json::from_reader(file).unwrap()
    }

    fn asset_layout() -> Layout {
        import::import_layout(&read_layout("../assets/autoclave_layout.json")).unwrap()
    }

    #[test]
    fn import_layout_asset() {
        let layout = asset_layout();

        assert_eq!(layout.len(), 4);
        assert_eq!(layout.container().usable_area_mm2, 8_000_000.0);
        let item = layout.item(101).unwrap();
        assert_eq!(item.priority, Priority::High);
        assert_eq!(item.cure_cycle.as_deref(), Some("180C-2H"));
        assert_eq!(item.area_mm2, 960_000.0);
        //explicit area overrides the bounding box
        assert_eq!(layout.item(102).unwrap().area_mm2, 520_000.0);
        assert_eq!(layout.item(102).unwrap().priority, Priority::Normal);

        let metrics = layout.metrics();
        assert_eq!(metrics.utilized_resource_units, 7);
        assert_approx_eq!(f32, metrics.efficiency, 3_982_400.0 / 8_000_000.0, epsilon = 1e-4);
    }

    #[test]
    fn export_then_import_preserves_layout() {
        let layout = asset_layout();
        let ext = export::export_layout(&layout);
        let json = serde_json::to_string(&ext).unwrap();
        let reimported =
            import::import_layout(&serde_json::from_str::<ExtLayout>(&json).unwrap()).unwrap();
        assert_eq!(reimported, layout);
    }

    #[test_case(r#"{"id": 1, "x": 0, "y": 0, "length": 100, "width": 100, "label": "a"},
                   {"id": 1, "x": 200, "y": 0, "length": 100, "width": 100, "label": "b"}"#; "duplicate ids")]
    #[test_case(r#"{"id": 1, "x": 0, "y": 0, "length": 0, "width": 100, "label": "a"}"#; "zero length")]
    #[test_case(r#"{"id": 1, "x": 0, "y": 0, "length": 100, "width": 100, "label": "a", "massKg": -1}"#; "negative mass")]
    fn invalid_layouts_are_rejected(items: &str) {
        let json = format!(
            r#"{{"container": {{"id": 1, "lengthMm": 1000, "widthMm": 500, "resourceCapacity": 4, "maxMassKg": 10}},
                "items": [{items}]}}"#
        );
        let ext: ExtLayout = serde_json::from_str(&json).unwrap();
        assert!(import::import_layout(&ext).is_err());
    }

    #[test]
    fn plan_with_unknown_item_is_rejected() {
        let file = File::open(Path::new("../assets/allocation_plan.json")).unwrap();
        let mut plan: ExtAllocationPlan = serde_json::from_reader(file).unwrap();
        assert!(import::import_allocation_plan(&plan).is_ok());

        plan.assignment[0].item_id = 77;
        assert!(import::import_allocation_plan(&plan).is_err());
    }

    #[test]
    fn frame_svg_contains_items() {
        let layout = asset_layout();
        let frame = Renderer::default()
            .render(
                &layout,
                &Viewport::default(),
                Focus {
                    selected: Some(103),
                    hovered: None,
                },
                CanvasSize::new(1000, 600),
                |_, _| {},
            )
            .unwrap();
        let theme = RenderConfig::default().theme;
        let svg = frame_to_svg(&frame, &theme, SvgDrawOptions::default()).to_string();

        for id in [101, 102, 103, 104] {
            assert!(svg.contains(&format!("item_{id}")));
        }
        assert!(svg.contains("container_1"));
        assert!(svg.contains("T-103"));
        assert_eq!(svg.matches("<feDropShadow").count(), 1);
        assert_eq!(svg.matches("filter=\"url(#item-shadow)\"").count(), 1);

        let options = SvgDrawOptions {
            shadows: false,
            tooltips: false,
            ..SvgDrawOptions::default()
        };
        let svg = frame_to_svg(&frame, &theme, options).to_string();
        assert!(!svg.contains("feDropShadow"));
        assert!(!svg.contains("url(#item-shadow)"));
        assert!(!svg.contains("vacuum lines"));
    }

    #[test]
    fn layout_svg_has_header() {
        let layout = asset_layout();
        let svg = layout_to_svg(
            &layout,
            &Viewport::default(),
            Focus::default(),
            CanvasSize::new(1000, 600),
            &RenderConfig::default(),
            SvgDrawOptions::default(),
            "autoclave 1",
        )
        .unwrap()
        .to_string();
        assert!(svg.contains("efficiency: 49.8%"));
        assert!(svg.contains("autoclave 1"));

        assert!(
            layout_to_svg(
                &layout,
                &Viewport::default(),
                Focus::default(),
                CanvasSize::new(0, 0),
                &RenderConfig::default(),
                SvgDrawOptions::default(),
                "",
            )
            .is_err()
        );
    }
}
