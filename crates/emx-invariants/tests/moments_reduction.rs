use emx_invariants::{
    analyze_beam, covariance_from_particles, kinetic_invariants, EmittanceOpts, PhaseSpaceRecord,
    Plane,
};
use nalgebra::Matrix6;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

mod fixtures;

use fixtures::{plane_rotation, relative_gap, skew_kick, thin_lens};

/// Seeded uniform cloud with correlations between every plane.
fn cloud(count: usize) -> Vec<PhaseSpaceRecord> {
    let mut rng = StdRng::seed_from_u64(7);
    (0..count)
        .map(|_| {
            let u: [f64; 6] = std::array::from_fn(|_| rng.gen_range(-1.0..1.0));
            PhaseSpaceRecord::new([
                u[0] + 0.2 * u[1],
                0.5 * u[1] - 0.1 * u[4],
                u[2] - 0.1 * u[0],
                0.8 * u[3] + 0.15 * u[5],
                0.3 * u[4] + 0.05 * u[1],
                u[5] + 0.2 * u[2],
            ])
            .with_weight(rng.gen_range(0.5..1.5))
        })
        .collect()
}

fn mapped(particles: &[PhaseSpaceRecord], map: &Matrix6<f64>) -> Vec<PhaseSpaceRecord> {
    particles
        .iter()
        .map(|record| {
            let v = map * record.coordinates();
            PhaseSpaceRecord::new([v[0], v[1], v[2], v[3], v[4], v[5]]).with_weight(record.weight)
        })
        .collect()
}

#[test]
fn weighted_moments_match_hand_computation() {
    let particles = [
        PhaseSpaceRecord::new([0.0, 1.0, 0.0, 0.0, 0.0, 0.0]),
        PhaseSpaceRecord::new([4.0, -1.0, 0.0, 0.0, 0.0, 0.0]).with_weight(3.0),
    ];
    let sigma = covariance_from_particles(&particles).expect("sigma");
    // mean = (3, -0.5); deviations (-3, 1.5) and (1, -0.5).
    assert_eq!(sigma.get(0, 0), 3.0);
    assert_eq!(sigma.get(1, 1), 0.75);
    assert_eq!(sigma.get(0, 1), -1.5);
    assert_eq!(sigma.get(1, 0), -1.5);
    assert_eq!(sigma.projected_emittance(Plane::X), 0.0);
}

#[test]
fn offsets_do_not_change_moments() {
    let particles = cloud(97);
    let shifted: Vec<_> = particles
        .iter()
        .map(|record| {
            let mut record = *record;
            record.x += 10.0;
            record.pt -= 3.0;
            record
        })
        .collect();
    let a = covariance_from_particles(&particles).expect("a");
    let b = covariance_from_particles(&shifted).expect("b");
    assert!((a.matrix() - b.matrix()).amax() < 1e-12);
}

#[test]
fn zero_total_weight_is_rejected() {
    let particles = [
        PhaseSpaceRecord::new([1.0; 6]).with_weight(0.0),
        PhaseSpaceRecord::new([2.0; 6]).with_weight(0.0),
    ];
    let err = covariance_from_particles(&particles).expect_err("zero weight");
    assert_eq!(err.info().code, "zero-weight");
}

#[test]
fn non_finite_record_reports_index() {
    let mut particles = cloud(8);
    particles[5].py = f64::NAN;
    let err = covariance_from_particles(&particles).expect_err("nan");
    assert_eq!(err.info().code, "non-finite-record");
    assert_eq!(err.info().context.get("index").map(String::as_str), Some("5"));
}

#[test]
fn missing_weight_defaults_to_one() {
    let record: PhaseSpaceRecord = serde_json::from_str(
        r#"{"x": 1.0, "px": 0.0, "y": 0.0, "py": 0.0, "t": 0.0, "pt": 0.0}"#,
    )
    .expect("record");
    assert_eq!(record.weight, 1.0);
}

#[test]
fn transported_beam_keeps_eigenemittances() {
    let particles = cloud(512);
    let map = skew_kick(Plane::X, Plane::Y, 0.3)
        * thin_lens(Plane::T, 0.4)
        * plane_rotation(Plane::X, Plane::T, 1.1);
    let transported = mapped(&particles, &map);

    let before = covariance_from_particles(&particles).expect("before");
    let after = covariance_from_particles(&transported).expect("after");
    let (i_before, i_after) = (kinetic_invariants(&before), kinetic_invariants(&after));
    assert!(relative_gap(i_after.i2, i_before.i2) < 1e-10);
    assert!(relative_gap(i_after.i4, i_before.i4) < 1e-10);
    assert!(relative_gap(i_after.i6, i_before.i6) < 1e-10);

    let opts = EmittanceOpts::default();
    let a = analyze_beam(&particles, None, &opts).expect("report a");
    let b = analyze_beam(&transported, None, &opts).expect("report b");
    for (x, y) in a.eigenemittances.sorted().iter().zip(b.eigenemittances.sorted()) {
        assert!(relative_gap(y, *x) < 1e-6, "{x} vs {y}");
    }
}
