#[cfg(test)]
mod tests {
    use nestview::entities::{Container, Layout, PlacedItem, Priority};
    use nestview::geometry::Point;
    use nestview::interaction::{Interaction, Tooltip, hit_test};
    use nestview::viewport::Viewport;
    use test_case::test_case;

    /// Two overlapping items: 1 spans 0..1000 x 0..500, 2 spans 500..1500 x 0..500
    fn overlapping() -> Layout {
        let container =
            Container::try_new(7, "autoclave", 2000.0, 1000.0, None, 10, 200.0).unwrap();
        let items = vec![
            PlacedItem::try_new(1, 0.0, 0.0, 1000.0, 500.0, "first").unwrap(),
            PlacedItem::try_new(2, 500.0, 0.0, 1000.0, 500.0, "second").unwrap(),
        ];
        Layout::try_new(container, items).unwrap()
    }

    /// Canvas coordinates of a model point under the default viewport
    fn px(x_mm: f32, y_mm: f32) -> Point {
        Viewport::default().to_screen(Point(x_mm, y_mm))
    }

    #[test_case(px(250.0, 250.0), Some(1); "only first")]
    #[test_case(px(750.0, 250.0), Some(1); "overlap picks first in order")]
    #[test_case(px(1250.0, 250.0), Some(2); "only second")]
    #[test_case(px(1250.0, 750.0), None; "inside container, no item")]
    #[test_case(Point(5.0, 5.0), None; "padding")]
    #[test_case(px(0.0, 0.0), Some(1); "closed boundary")]
    fn hit_testing(pointer: Point, expected: Option<u64>) {
        let layout = overlapping();
        let hit = hit_test(&layout, &Viewport::default(), pointer).map(|pi| pi.id);
        assert_eq!(hit, expected);
    }

    #[test]
    fn hit_testing_follows_zoom_and_pan() {
        let layout = overlapping();
        let mut viewport = Viewport::default();
        viewport.set_scale(2.0);
        viewport.pan_by(-100.0, 30.0);
        let pointer = viewport.to_screen(Point(1400.0, 100.0));
        assert_eq!(hit_test(&layout, &viewport, pointer).map(|pi| pi.id), Some(2));
    }

    #[test]
    fn click_selects_and_background_click_clears() {
        let layout = overlapping();
        let mut viewport = Viewport::default();
        let mut interaction = Interaction::new();

        let target = px(250.0, 250.0);
        interaction.pointer_down(target, &viewport);
        let release = Point(target.0 + 2.0, target.1);
        let response = interaction.pointer_up(release, Some(&layout), &mut viewport);
        assert!(response.selection_changed);
        assert!(!response.viewport_changed);
        assert_eq!(interaction.selected(), Some(1));

        //clicking the same item again changes nothing
        interaction.pointer_down(target, &viewport);
        let response = interaction.pointer_up(target, Some(&layout), &mut viewport);
        assert!(!response.selection_changed);

        let background = px(1250.0, 750.0);
        interaction.pointer_down(background, &viewport);
        let response = interaction.pointer_up(background, Some(&layout), &mut viewport);
        assert!(response.selection_changed);
        assert_eq!(interaction.selected(), None);
    }

    #[test]
    fn drag_pans_without_selecting() {
        let layout = overlapping();
        let mut viewport = Viewport::default();
        let mut interaction = Interaction::new();

        let start = px(250.0, 250.0);
        interaction.pointer_down(start, &viewport);
        let response =
            interaction.pointer_move(Point(start.0 + 20.0, start.1), Some(&layout), &mut viewport);
        assert!(response.viewport_changed);
        assert!(interaction.is_panning());
        assert_eq!(viewport.offset(), Point(20.0, 0.0));

        let release = Point(start.0 + 50.0, start.1 + 10.0);
        let response = interaction.pointer_up(release, Some(&layout), &mut viewport);
        assert!(!response.selection_changed);
        assert_eq!(interaction.selected(), None);
        assert_eq!(viewport.offset(), Point(50.0, 10.0));
        assert!(!interaction.is_panning());
    }

    #[test]
    fn quick_drag_without_moves_still_pans() {
        let mut viewport = Viewport::default();
        let mut interaction = Interaction::new();
        interaction.pointer_down(Point(100.0, 100.0), &viewport);
        let response = interaction.pointer_up(Point(60.0, 100.0), None, &mut viewport);
        assert!(response.viewport_changed);
        assert_eq!(viewport.offset(), Point(-40.0, 0.0));
    }

    #[test]
    fn hover_tracks_pointer() {
        let layout = overlapping();
        let mut viewport = Viewport::default();
        let mut interaction = Interaction::new();

        let response = interaction.pointer_move(px(1250.0, 250.0), Some(&layout), &mut viewport);
        assert!(response.hover_changed);
        assert_eq!(interaction.hovered(), Some(2));

        let response = interaction.pointer_move(px(1300.0, 300.0), Some(&layout), &mut viewport);
        assert!(!response.needs_redraw());

        let response = interaction.pointer_leave();
        assert!(response.hover_changed);
        assert_eq!(interaction.hovered(), None);
    }

    #[test]
    fn clear_resets_everything() {
        let mut interaction = Interaction::new();
        interaction.select(Some(3));
        let response = interaction.clear();
        assert!(response.selection_changed);
        assert!(!response.hover_changed);
        assert_eq!(interaction, Interaction::default());
    }

    #[test]
    fn tooltip_contents() {
        let item = PlacedItem::try_new(42, 0.0, 0.0, 1200.0, 800.0, "T-42")
            .unwrap()
            .with_mass(45.5)
            .with_resource_units(2)
            .with_priority(Priority::Urgent)
            .with_cure_cycle("180C-2H");
        let tooltip = Tooltip::for_item(&item);
        assert_eq!(tooltip.lines[0], "T-42 (#42)");
        assert!(tooltip.lines.contains(&"mass: 45.5 kg".to_string()));
        assert!(tooltip.lines.contains(&"area: 0.960 m²".to_string()));
        assert!(tooltip.lines.contains(&"vacuum lines: 2".to_string()));
        assert!(tooltip.lines.contains(&"cure cycle: 180C-2H".to_string()));
        assert_eq!(tooltip.to_string().lines().count(), tooltip.lines.len());
    }
}
