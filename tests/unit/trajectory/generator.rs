use super::*;

fn params(t: u8, a: u8) -> ControlParameters {
    ControlParameters::new(t, a).unwrap()
}

#[test]
fn zero_amplitude_collapses_to_center() {
    let cal = Calibration::default();
    for phase in [1u8, 37, 63, 100] {
        let center = oscillation_center(phase, &cal);
        let points = generate_raw(phase, 0, &cal).unwrap();
        assert_eq!(points.len(), 100);
        assert!(points.iter().all(|p| *p == center));
    }
}

#[test]
fn trajectory_has_frame_count_points_and_is_deterministic() {
    let cal = Calibration::default();
    for (t, a) in [(1, 1), (63, 14), (10, 80), (100, 100)] {
        let a1 = generate(params(t, a), &cal).unwrap();
        let a2 = generate(params(t, a), &cal).unwrap();
        assert_eq!(a1.len(), 100);
        assert_eq!(a1.params(), params(t, a));
        for (p, q) in a1.points().iter().zip(a2.points()) {
            assert_eq!(p.z1.to_bits(), q.z1.to_bits());
            assert_eq!(p.z2.to_bits(), q.z2.to_bits());
        }
    }
}

#[test]
fn first_point_is_center_and_quarter_point_swings_towards_anchor() {
    let cal = Calibration::default();
    let center = oscillation_center(63, &cal);
    let traj = generate(params(63, 14), &cal).unwrap();
    assert_eq!(traj.points()[0], center);

    let alpha = cal.radius * 0.14;
    let quarter = traj.points()[25];
    let want_z1 = center.z1 + alpha * (cal.anchor_z1 - center.z1);
    let want_z2 = center.z2 + alpha * (cal.anchor_z2 - center.z2);
    assert!((quarter.z1 - want_z1).abs() < 1e-12);
    assert!((quarter.z2 - want_z2).abs() < 1e-12);
}

#[test]
fn center_lies_on_calibration_circle() {
    let cal = Calibration::default();
    for phase in 1..=100u8 {
        let c = oscillation_center(phase, &cal);
        let r = ((c.z1 - cal.anchor_z1).powi(2) + (c.z2 - cal.anchor_z2).powi(2)).sqrt();
        assert!((r - cal.radius).abs() < 1e-9);
    }
}

#[test]
fn half_phase_center_sits_below_anchor() {
    // t = 0.5 puts the angle at 2*pi, so sin = 0 and cos = 1.
    let cal = Calibration::default();
    let c = oscillation_center(50, &cal);
    assert!((c.z1 - cal.anchor_z1).abs() < 1e-9);
    assert!((c.z2 - (cal.anchor_z2 + cal.radius)).abs() < 1e-9);
}

#[test]
fn out_of_range_inputs_are_rejected() {
    let cal = Calibration::default();
    assert!(generate_raw(0, 14, &cal).is_err());
    assert!(generate_raw(101, 14, &cal).is_err());
    assert!(generate_raw(63, 101, &cal).is_err());
    let bad = ControlParameters {
        time_phase: 63,
        amplitude: 0,
    };
    assert!(generate(bad, &cal).is_err());
}

#[test]
fn calibration_frame_count_drives_length() {
    let cal = Calibration {
        frame_count: 12,
        ..Calibration::default()
    };
    assert_eq!(generate_raw(63, 14, &cal).unwrap().len(), 12);

    let broken = Calibration {
        frame_count: 0,
        ..Calibration::default()
    };
    assert!(generate_raw(63, 14, &broken).is_err());
}
