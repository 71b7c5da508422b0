#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use nestview::entities::Container;
    use nestview::geometry::Point;
    use nestview::render::CanvasSize;
    use nestview::viewport::{Viewport, ViewportConfig};
    use test_case::test_case;

    fn container(length_mm: f32, width_mm: f32) -> Container {
        Container::try_new(1, "autoclave", length_mm, width_mm, None, 10, 100.0).unwrap()
    }

    #[test]
    fn default_mapping() {
        let viewport = Viewport::default();
        let screen = viewport.to_screen(Point(100.0, 50.0));
        assert_approx_eq!(f32, screen.x(), 40.0, epsilon = 1e-4);
        assert_approx_eq!(f32, screen.y(), 30.0, epsilon = 1e-4);
    }

    #[test_case(1.0, (0.0, 0.0), (0.0, 0.0); "origin")]
    #[test_case(2.5, (-35.0, 12.0), (1234.5, 678.9); "zoomed and panned")]
    #[test_case(0.25, (400.0, -80.0), (3999.0, 1999.0); "min scale")]
    #[test_case(5.0, (0.0, 0.0), (0.1, 0.1); "max scale")]
    fn screen_model_round_trip(scale: f32, offset: (f32, f32), model: (f32, f32)) {
        let mut viewport = Viewport::default();
        viewport.set_scale(scale);
        viewport.set_offset(offset.into());

        let back = viewport.to_model(viewport.to_screen(model.into()));
        assert!(back.distance(model.into()) < 1e-2, "{back} != {model:?}");
    }

    #[test]
    fn zoom_is_clamped() {
        let mut viewport = Viewport::default();
        while viewport.zoom_in() {}
        assert_eq!(viewport.scale(), viewport.config().max_scale);
        assert!(!viewport.zoom_in());

        while viewport.zoom_out() {}
        assert_eq!(viewport.scale(), viewport.config().min_scale);
        assert!(!viewport.set_scale(0.0));
        assert!(!viewport.set_scale(f32::NAN));
        assert_eq!(viewport.scale(), viewport.config().min_scale);
    }

    #[test]
    fn zoom_steps_by_factor() {
        let mut viewport = Viewport::default();
        assert!(viewport.zoom_in());
        assert_approx_eq!(f32, viewport.scale(), 1.2, epsilon = 1e-4);
        assert!(viewport.zoom_out());
        assert_approx_eq!(f32, viewport.scale(), 1.0, epsilon = 1e-4);
    }

    #[test]
    fn pan_does_not_alter_scale() {
        let mut viewport = Viewport::default();
        viewport.set_scale(2.0);
        assert!(viewport.pan_by(15.0, -5.0));
        assert!(viewport.pan_by(5.0, 5.0));
        assert_eq!(viewport.offset(), Point(20.0, 0.0));
        assert_eq!(viewport.scale(), 2.0);
        assert!(!viewport.pan_by(0.0, 0.0));
    }

    #[test]
    fn pan_to_follows_pointer_from_anchor() {
        let mut viewport = Viewport::default();
        viewport.pan_by(10.0, 10.0);
        let anchor = viewport.begin_pan(Point(100.0, 100.0));
        assert_eq!(viewport.offset(), Point(10.0, 10.0));

        assert!(viewport.pan_to(anchor, Point(130.0, 90.0)));
        assert_eq!(viewport.offset(), Point(40.0, 0.0));
        assert!(viewport.pan_to(anchor, Point(105.0, 100.0)));
        assert_eq!(viewport.offset(), Point(15.0, 10.0));
        assert!(!viewport.pan_to(anchor, Point(105.0, 100.0)));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut viewport = Viewport::default();
        viewport.zoom_in();
        viewport.pan_by(10.0, 10.0);
        assert!(viewport.reset());
        assert_eq!(viewport.scale(), 1.0);
        assert_eq!(viewport.offset(), Point(0.0, 0.0));
        assert!(!viewport.reset());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ViewportConfig {
            min_scale: 2.0,
            max_scale: 1.0,
            ..ViewportConfig::default()
        };
        assert!(Viewport::try_new(config).is_err());

        let config = ViewportConfig {
            zoom_step: 1.0,
            ..ViewportConfig::default()
        };
        assert!(Viewport::try_new(config).is_err());
    }

    #[test]
    fn degenerate_container_has_no_rect() {
        let viewport = Viewport::default();
        let mut container = container(4000.0, 2000.0);
        assert!(viewport.container_rect(&container).is_ok());

        container.width_mm = 0.0;
        assert!(viewport.container_rect(&container).is_err());
    }

    #[test]
    fn fit_to_canvas() {
        let mut viewport = Viewport::default();
        viewport.pan_by(100.0, 100.0);
        viewport
            .fit_to(&container(4000.0, 2000.0), CanvasSize::new(840, 440))
            .unwrap();
        assert_approx_eq!(f32, viewport.scale(), 1.0, epsilon = 1e-4);
        assert_eq!(viewport.offset(), Point(0.0, 0.0));

        assert!(
            viewport
                .fit_to(&container(4000.0, 2000.0), CanvasSize::new(30, 30))
                .is_err()
        );
    }
}
