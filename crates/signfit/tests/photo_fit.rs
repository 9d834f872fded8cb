use approx::assert_abs_diff_eq;
use nalgebra::{Point2, Rotation2, Vector2};
use signfit::{fit_detailed, FitParams, PhotoPlane, QuadPicker, SourceRect};

const TOL: f64 = 1e-9;

fn photo() -> PhotoPlane {
    // 160 px per scene unit on both axes
    PhotoPlane::new(1600.0, 1200.0, 10.0).expect("valid photo")
}

fn sign_pixels(center: Point2<f64>, angle: f64) -> Vec<Point2<f64>> {
    let r = Rotation2::new(angle);
    [(-320.0, -160.0), (320.0, -160.0), (320.0, 160.0), (-320.0, 160.0)]
        .into_iter()
        .map(|(x, y)| center + r * Vector2::new(x, y))
        .collect()
}

#[test]
fn axis_aligned_pick_lands_on_the_plane() {
    let photo = photo();
    let source = SourceRect::new(2.0, 1.0).expect("valid rect");
    let picked = sign_pixels(Point2::new(960.0, 520.0), 0.0);

    let res = fit_detailed(&source, &picked, |p| photo.to_world(p), &FitParams::default())
        .expect("fit");

    assert_abs_diff_eq!(res.pose.position.x, 1.0, epsilon = TOL);
    assert_abs_diff_eq!(res.pose.position.y, 0.5, epsilon = TOL);
    assert_abs_diff_eq!(res.pose.rotation_z, 0.0, epsilon = TOL);
    assert_abs_diff_eq!(res.pose.uniform_scale, 1.0, epsilon = TOL);
    // the y flip into scene space shows up as a mirrored affine map only
    assert!(res.affine.determinant() < 0.0);
    assert_abs_diff_eq!(res.residual_rms, 0.0, epsilon = TOL);
}

#[test]
fn clockwise_on_screen_is_negative_in_scene() {
    let photo = photo();
    let source = SourceRect::new(2.0, 1.0).expect("valid rect");
    let picked = sign_pixels(Point2::new(960.0, 520.0), 0.2);

    let res = fit_detailed(&source, &picked, |p| photo.to_world(p), &FitParams::default())
        .expect("fit");

    assert_abs_diff_eq!(res.pose.rotation_z, -0.2, epsilon = TOL);
    assert_abs_diff_eq!(res.pose.uniform_scale, 1.0, epsilon = TOL);
    assert_abs_diff_eq!(res.pose.position.x, 1.0, epsilon = TOL);
    assert_abs_diff_eq!(res.pose.position.y, 0.5, epsilon = TOL);
}

#[test]
fn picker_refits_as_clicks_arrive() {
    let photo = photo();
    let source = SourceRect::from_size(3.6, 1.6, 0.2).expect("valid rect");
    let clicks = sign_pixels(Point2::new(700.0, 400.0), 0.0);

    let mut picker = QuadPicker::new();
    for (i, click) in clicks.iter().enumerate() {
        assert!(picker.push(*click));
        let res = picker.try_fit(&source, |p| photo.to_world(p), &FitParams::default());
        assert_eq!(res.is_ok(), i == 3, "after {} clicks", i + 1);
    }

    let res = picker
        .try_fit(&source, |p| photo.to_world(p), &FitParams::default())
        .expect("complete");
    let expected = photo.to_world(Point2::new(700.0, 400.0));
    assert_abs_diff_eq!(res.pose.position.x, expected.x, epsilon = TOL);
    assert_abs_diff_eq!(res.pose.position.y, expected.y, epsilon = TOL);
}
