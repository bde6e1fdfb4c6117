mod common;

use approx::assert_relative_eq;
use nalgebra::{DMatrix, DVector, Unit, Vector3};
use rand::rngs::StdRng;
use rand::SeedableRng;

use common::{
    assert_matrix_close, assert_orthogonal, assert_vector_close, axis_direction, dipole,
    random_coefficients, random_samples, AXES,
};
use ylm_rotation::euler::axis_angle_matrix;
use ylm_rotation::{RotationError, Wigner, WignerConfig};

fn rotate(wigner: &mut Wigner<f64>, y: &DVector<f64>, theta: f64) -> DVector<f64> {
    wigner.rotate(y, theta.cos(), theta.sin()).unwrap()
}

#[test]
fn test_zeta_blocks_are_orthogonal_and_inverse() {
    for (inc, obl) in AXES {
        let wigner = Wigner::<f64>::new(12, 0, 0, inc, obl).unwrap();
        for (l, (r, inv)) in wigner.r_zeta().iter().zip(wigner.r_zeta_inv()).enumerate() {
            assert_eq!(r.shape(), (2 * l + 1, 2 * l + 1));
            assert_orthogonal(r, 1e-12);
            assert_matrix_close(&(inv * r), &DMatrix::identity(2 * l + 1, 2 * l + 1), 1e-12);
        }
    }
}

#[test]
fn test_rotation_preserves_norm() {
    let mut rng = StdRng::seed_from_u64(42);
    for (inc, obl) in AXES {
        let mut wigner = Wigner::<f64>::new(8, 0, 0, inc, obl).unwrap();
        let y = random_coefficients(&mut rng, wigner.ny());
        for theta in [0.3, 1.9, -2.6] {
            let ry = rotate(&mut wigner, &y, theta);
            assert_relative_eq!(ry.norm(), y.norm(), epsilon = 1e-12);
        }
    }
}

#[test]
fn test_zero_angle_is_identity() {
    let mut rng = StdRng::seed_from_u64(7);
    for (inc, obl) in AXES {
        let mut wigner = Wigner::<f64>::new(6, 0, 0, inc, obl).unwrap();
        let y = random_coefficients(&mut rng, wigner.ny());
        assert_vector_close(&wigner.rotate(&y, 1.0, 0.0).unwrap(), &y, 1e-12);
    }
}

#[test]
fn test_rotations_about_the_axis_compose() {
    let mut rng = StdRng::seed_from_u64(11);
    let (t1, t2) = (0.7, -1.9);
    for (inc, obl) in AXES {
        let mut wigner = Wigner::<f64>::new(6, 0, 0, inc, obl).unwrap();
        let y = random_coefficients(&mut rng, wigner.ny());
        let first = rotate(&mut wigner, &y, t1);
        let twice = rotate(&mut wigner, &first, t2);
        let once = rotate(&mut wigner, &y, t1 + t2);
        assert_vector_close(&twice, &once, 1e-12);
    }
}

#[test]
fn test_opposite_angle_round_trip() {
    let mut rng = StdRng::seed_from_u64(3);
    let theta = 2.2_f64;
    for (inc, obl) in AXES {
        let mut wigner = Wigner::<f64>::new(7, 0, 0, inc, obl).unwrap();
        let y = random_coefficients(&mut rng, wigner.ny());
        let there = wigner.rotate(&y, theta.cos(), theta.sin()).unwrap();
        let back = wigner.rotate(&there, theta.cos(), -theta.sin()).unwrap();
        assert_vector_close(&back, &y, 1e-12);
    }
}

#[test]
fn test_quarter_turn_about_y_axis() {
    // default orientation: inc = 90°, obl = 0° puts the axis along ŷ
    let mut wigner = Wigner::<f64>::from_config(&WignerConfig::default().with_ydeg(1)).unwrap();

    let along_axis = DVector::from_vec(vec![0.0, 1.0, 0.0, 0.0]);
    let ry = wigner.rotate(&along_axis, 0.0, 1.0).unwrap();
    assert_vector_close(&ry, &along_axis, 1e-10);

    let z = DVector::from_vec(vec![0.0, 0.0, 1.0, 0.0]);
    let ry = wigner.rotate(&z, 0.0, 1.0).unwrap();
    assert_vector_close(&ry, &DVector::from_vec(vec![0.0, 0.0, 0.0, 1.0]), 1e-10);

    let x = DVector::from_vec(vec![0.0, 0.0, 0.0, 1.0]);
    let ry = wigner.rotate(&x, 0.0, 1.0).unwrap();
    assert_vector_close(&ry, &DVector::from_vec(vec![0.0, 0.0, -1.0, 0.0]), 1e-10);

    let monopole = DVector::from_vec(vec![2.5, 0.0, 0.0, 0.0]);
    assert_vector_close(&wigner.rotate(&monopole, 0.0, 1.0).unwrap(), &monopole, 1e-15);
}

#[test]
fn test_degree_one_matches_cartesian_rotation() {
    let theta = 0.9_f64;
    for (inc, obl) in AXES {
        let mut wigner = Wigner::<f64>::new(1, 0, 0, inc, obl).unwrap();
        let axis = Unit::new_normalize(axis_direction(inc, obl));
        let rot = axis_angle_matrix(&axis, theta);

        for v in [Vector3::x(), Vector3::y(), Vector3::z()] {
            let [cy, cz, cx] = dipole(&v);
            let y = DVector::from_vec(vec![0.0, cy, cz, cx]);
            let ry = rotate(&mut wigner, &y, theta);
            let [ey, ez, ex] = dipole(&(rot * v));
            assert_vector_close(&ry, &DVector::from_vec(vec![0.0, ey, ez, ex]), 1e-12);
        }
    }
}

#[test]
fn test_axis_dipole_is_invariant() {
    for (inc, obl) in AXES {
        let mut wigner = Wigner::<f64>::new(3, 0, 0, inc, obl).unwrap();
        let [cy, cz, cx] = dipole(&axis_direction(inc, obl));
        let mut y = DVector::zeros(16);
        y[0] = 0.4;
        y[1] = cy;
        y[2] = cz;
        y[3] = cx;
        for theta in [0.5, 2.0, -1.2] {
            assert_vector_close(&rotate(&mut wigner, &y, theta), &y, 1e-12);
        }
    }
}

#[test]
fn test_pole_shortcut_matches_near_pole_limit() {
    let mut rng = StdRng::seed_from_u64(5);
    let y = random_coefficients(&mut rng, 25);
    let theta = 1.3;

    for (inc, near, obl) in [
        (0.0, 1e-7, 30.0),
        (180.0, 180.0 - 1e-7, 0.0),
        (180.0, 180.0 - 1e-7, 40.0),
    ] {
        let mut pole = Wigner::<f64>::new(4, 0, 0, inc, obl).unwrap();
        let mut limit = Wigner::<f64>::new(4, 0, 0, near, obl).unwrap();
        assert_vector_close(
            &rotate(&mut pole, &y, theta),
            &rotate(&mut limit, &y, theta),
            1e-6,
        );
        if obl == 0.0 {
            for (a, b) in pole.r_zeta().iter().zip(limit.r_zeta()) {
                assert_matrix_close(a, b, 1e-6);
            }
        }
    }
}

#[test]
fn test_rotate_matrix_matches_columns() {
    let mut rng = StdRng::seed_from_u64(19);
    let mut wigner = Wigner::<f64>::new(4, 0, 0, 50.0, 120.0).unwrap();
    let y = random_samples(&mut rng, 25, 3);
    let theta = 0.8_f64;

    let ry = wigner.rotate_matrix(&y, theta.cos(), theta.sin()).unwrap();
    for (k, column) in y.column_iter().enumerate() {
        let expected = rotate(&mut wigner, &column.into_owned(), theta);
        assert_vector_close(&ry.column(k).into_owned(), &expected, 1e-12);
    }
}

#[test]
fn test_left_multiply_r_is_three_stage_product() {
    let mut rng = StdRng::seed_from_u64(23);
    let mut wigner = Wigner::<f64>::new(5, 0, 0, 110.0, -35.0).unwrap();
    let theta = 2.4_f64;
    wigner.compute(theta.cos(), theta.sin());

    let v = random_samples(&mut rng, 4, wigner.ny());
    let mut u = DMatrix::zeros(4, wigner.ny());
    wigner.left_multiply_r(&v, &mut u).unwrap();

    let mut stage1 = DMatrix::zeros(4, wigner.ny());
    let mut stage2 = DMatrix::zeros(4, wigner.ny());
    let mut stage3 = DMatrix::zeros(4, wigner.ny());
    wigner.left_multiply_rzeta_inv(&v, &mut stage1).unwrap();
    wigner.left_multiply_rz(&stage1, &mut stage2).unwrap();
    wigner.left_multiply_rzeta(&stage2, &mut stage3).unwrap();

    assert_matrix_close(&u, &stage3, 1e-12);
}

#[test]
fn test_left_multiply_before_compute_uses_zero_angle() {
    let mut rng = StdRng::seed_from_u64(29);
    let wigner = Wigner::<f64>::new(3, 0, 0, 70.0, 15.0).unwrap();
    let v = random_samples(&mut rng, 2, 16);
    let mut u = DMatrix::zeros(2, 16);
    wigner.left_multiply_r(&v, &mut u).unwrap();
    assert_matrix_close(&u, &v, 1e-12);
}

#[test]
fn test_shape_errors() {
    let mut wigner = Wigner::<f64>::new(2, 1, 0, 45.0, 0.0).unwrap();
    let v = DMatrix::zeros(3, 9);

    let mut wrong_rows = DMatrix::zeros(2, 9);
    assert_eq!(
        wigner.left_multiply_rzeta(&v, &mut wrong_rows),
        Err(RotationError::ShapeMismatch {
            rows: 3,
            cols: 9,
            found_rows: 2,
            found_cols: 9
        })
    );

    let mut u = DMatrix::zeros(3, 9);
    assert_eq!(
        wigner.left_multiply_drz_augmented(&v, &mut u),
        Err(RotationError::DimensionMismatch {
            expected: 16,
            found: 9
        })
    );

    let y = DMatrix::zeros(16, 2);
    assert_eq!(
        wigner.rotate_matrix(&y, 1.0, 0.0),
        Err(RotationError::DimensionMismatch {
            expected: 9,
            found: 16
        })
    );
}

#[test]
fn test_single_precision_engine() {
    let theta = 0.6_f64;
    let mut single = Wigner::<f32>::new(4, 0, 0, 40.0, 10.0).unwrap();
    let mut double = Wigner::<f64>::new(4, 0, 0, 40.0, 10.0).unwrap();
    let y = DVector::from_fn(25, |i, _| (i as f64 * 0.3).cos());

    let ry32 = single
        .rotate(&y.map(|x| x as f32), (theta as f32).cos(), (theta as f32).sin())
        .unwrap();
    let ry64 = rotate(&mut double, &y, theta);
    for (a, b) in ry32.iter().zip(ry64.iter()) {
        assert!((*a as f64 - b).abs() < 1e-4);
    }
}
