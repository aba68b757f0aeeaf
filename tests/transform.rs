//! Properties of the math ↔ device map.

use geofig::render::Viewport;
use geofig::{Bounds, ContextOptions};
use glam::dvec2;
use proptest::prelude::*;

fn bounds() -> impl Strategy<Value = Bounds> {
    (-50.0..50.0f64, 0.5..40.0f64, -50.0..50.0f64, 0.5..40.0f64)
        .prop_map(|(x, w, y, h)| Bounds::new(x, x + w, y, y + h))
}

fn frame() -> impl Strategy<Value = ContextOptions> {
    (120.0..800.0f64, 120.0..800.0f64, 0.0..40.0f64).prop_map(|(width, height, padding)| {
        ContextOptions {
            width,
            height,
            padding,
        }
    })
}

proptest! {
    #[test]
    fn inverse_undoes_forward(b in bounds(), o in frame(), u in 0.0..1.0f64, v in 0.0..1.0f64) {
        let vp = Viewport::new(b, o);
        let m = dvec2(b.x_min + u * b.width(), b.y_min + v * b.height());
        let back = vp.to_math(vp.to_device(m));
        prop_assert!((back - m).length() < 1e-9 * (1.0 + m.length()));
    }

    #[test]
    fn bounds_fit_inside_the_padded_frame(b in bounds(), o in frame()) {
        let vp = Viewport::new(b, o);
        let eps = 1e-6;
        for corner in [b.min(), b.max(), dvec2(b.x_min, b.y_max), dvec2(b.x_max, b.y_min)] {
            let d = vp.to_device(corner);
            prop_assert!(d.x >= o.padding - eps && d.x <= o.width - o.padding + eps);
            prop_assert!(d.y >= o.padding - eps && d.y <= o.height - o.padding + eps);
        }
    }

    #[test]
    fn scale_is_uniform(b in bounds(), o in frame()) {
        let vp = Viewport::new(b, o);
        let dx = vp.to_device(dvec2(b.x_min + 1.0, b.y_min)) - vp.to_device(b.min());
        let dy = vp.to_device(dvec2(b.x_min, b.y_min + 1.0)) - vp.to_device(b.min());
        prop_assert!((dx.x - vp.scale()).abs() < 1e-9 * vp.scale());
        prop_assert!((dy.y + vp.scale()).abs() < 1e-9 * vp.scale());
    }
}
