#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use nestview::entities::{Container, Layout, PlacedItem};
    use nestview::events::{HostEvents, NoEvents};
    use nestview::geometry::Point;
    use nestview::render::{CanvasSize, RenderStatus};
    use nestview::viewer::{LayoutViewer, ViewerConfig, ViewerError, ViewerView};

    fn layout(container_id: u64) -> Layout {
        let container =
            Container::try_new(container_id, "autoclave", 4000.0, 2000.0, None, 20, 500.0).unwrap();
        let items = vec![
            PlacedItem::try_new(101, 50.0, 50.0, 1200.0, 800.0, "T-101").unwrap(),
            PlacedItem::try_new(102, 1300.0, 50.0, 1000.0, 600.0, "T-102").unwrap(),
        ];
        Layout::try_new(container, items).unwrap()
    }

    fn viewer<E: HostEvents>(events: E) -> LayoutViewer<E> {
        LayoutViewer::try_new(ViewerConfig::default(), CanvasSize::new(1000, 600), events).unwrap()
    }

    #[derive(Default)]
    struct Selections(Vec<Option<u64>>);

    impl HostEvents for Selections {
        fn on_item_selected(&mut self, item_id: Option<u64>) {
            self.0.push(item_id);
        }
    }

    #[test]
    fn empty_until_layout_arrives() {
        let mut viewer = viewer(NoEvents);
        assert_eq!(viewer.view(), ViewerView::Empty);

        viewer.set_layout(layout(1));
        assert!(viewer.is_dirty());
        match viewer.view() {
            ViewerView::Frame { frame, banner } => {
                assert_eq!(frame.items().count(), 2);
                assert!(banner.is_none());
            }
            other => panic!("unexpected view: {other:?}"),
        }
        assert!(!viewer.is_dirty());
        assert_eq!(viewer.last_progress(), 100);
        assert_eq!(viewer.render_status(), &RenderStatus::Ready);
    }

    #[test]
    fn changes_invalidate_the_frame() {
        let mut viewer = viewer(NoEvents);
        viewer.set_layout(layout(1));
        viewer.view();

        viewer.zoom_in();
        assert!(viewer.is_dirty());
        viewer.view();

        //nothing changes when already at the default view
        viewer.reset_view();
        assert!(viewer.is_dirty());
        viewer.view();
        viewer.reset_view();
        assert!(!viewer.is_dirty());

        viewer.resize(CanvasSize::new(1000, 600));
        assert!(!viewer.is_dirty());
        viewer.resize(CanvasSize::new(800, 600));
        assert!(viewer.is_dirty());
        viewer.view();

        //hovering the background of the canvas does not change anything
        viewer.pointer_move(Point(5.0, 5.0));
        assert!(!viewer.is_dirty());
        viewer.pointer_move(Point(100.0, 100.0));
        assert!(viewer.is_dirty());
        assert_eq!(viewer.interaction().hovered(), Some(101));
    }

    #[test]
    fn click_reports_selection() {
        let mut viewer = viewer(Selections::default());
        viewer.set_layout(layout(1));

        viewer.pointer_down(Point(100.0, 100.0));
        viewer.pointer_up(Point(100.0, 100.0));
        match viewer.view() {
            ViewerView::Frame { frame, .. } => {
                let selected = frame.items().find(|i| i.id == 101).unwrap();
                assert!(selected.shadow);
            }
            other => panic!("unexpected view: {other:?}"),
        }

        viewer.select(Some(999));
        viewer.select(Some(102));
        //a new layout clears the selection
        viewer.set_layout(layout(2));
        assert_eq!(viewer.interaction().selected(), None);
        assert_eq!(viewer.events().0, vec![Some(101), None, Some(102), None]);
    }

    #[test]
    fn render_failure_shows_error_until_retry() {
        let mut viewer = viewer(NoEvents);
        viewer.set_layout(layout(1));
        viewer.resize(CanvasSize::new(0, 0));
        assert!(matches!(
            viewer.view(),
            ViewerView::Failed(ViewerError::Render { .. })
        ));
        assert!(matches!(viewer.render_status(), RenderStatus::Failed { .. }));

        //the failure is sticky until the user retries
        viewer.resize(CanvasSize::new(1000, 600));
        assert!(matches!(viewer.view(), ViewerView::Failed(_)));
        viewer.retry_render();
        assert!(matches!(viewer.view(), ViewerView::Frame { .. }));
    }

    #[test]
    fn fetch_failure_keeps_last_layout() {
        let mut viewer = viewer(NoEvents);
        viewer.report_fetch_error(&anyhow!("connection refused"));
        assert!(matches!(
            viewer.view(),
            ViewerView::Failed(ViewerError::Fetch { .. })
        ));

        viewer.set_layout(layout(1));
        assert!(viewer.fetch_error().is_none());
        viewer.report_fetch_error(&anyhow!("timeout"));
        match viewer.view() {
            ViewerView::Frame { frame, banner } => {
                assert_eq!(frame.items().count(), 2);
                assert_eq!(
                    banner.map(|e| e.to_string()),
                    Some("could not load the layout: timeout".to_string())
                );
            }
            other => panic!("unexpected view: {other:?}"),
        }
        assert_eq!(viewer.layout().map(|l| l.container().id), Some(1));

        viewer.dismiss_fetch_error();
        assert!(matches!(viewer.view(), ViewerView::Frame { banner: None, .. }));
    }

    #[test]
    fn fit_to_canvas_rescales() {
        let mut viewer = viewer(NoEvents);
        viewer.fit_to_canvas().unwrap();
        assert_eq!(viewer.viewport().scale(), 1.0);

        viewer.set_layout(layout(1));
        viewer.resize(CanvasSize::new(1640, 840));
        viewer.fit_to_canvas().unwrap();
        assert_eq!(viewer.viewport().scale(), 2.0);
    }
}
