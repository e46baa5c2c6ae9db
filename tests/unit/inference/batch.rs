use super::*;
use crate::{
    foundation::core::{Canvas, ControlParameters},
    model::contract::ModelContract,
    model::session::{FnSession, ModelSessions},
    model::tensor::{NamedTensors, Tensor},
    trajectory::calibration::Calibration,
    trajectory::generator::generate,
};

// 4x4 canvas keeps the batch cheap.
fn small_contract() -> ModelContract {
    let mut c = ModelContract::default();
    c.canvas = Canvas {
        width: 4,
        height: 4,
    };
    c.decode.output_len = c.planar_len();
    c
}

/// Decoder paints the whole red plane with the first latent value, so frames are distinguishable
/// by index. `fail_above` makes points with z1 above the threshold fail.
fn pipeline(fail_above: Option<f32>) -> InferencePipeline {
    let expand = FnSession::new(|inputs: NamedTensors| {
        let z = inputs["fc3_input0"].data().to_vec();
        Ok(NamedTensors::from([(
            "fc3_output0".to_string(),
            Tensor::vector(z.iter().copied().cycle().take(512).collect()),
        )]))
    });
    let decode = FnSession::new(move |inputs: NamedTensors| {
        let z1 = inputs["decoder_input0"].data()[0];
        if let Some(limit) = fail_above
            && z1 > limit
        {
            anyhow::bail!("decoder blew up at z1={z1}");
        }
        let mut out = vec![0.0f32; 48];
        out[..16].fill(z1);
        Ok(NamedTensors::from([(
            "decoder_output0".to_string(),
            Tensor::vector(out),
        )]))
    });
    InferencePipeline::new(ModelSessions::new(expand, decode), small_contract()).unwrap()
}

fn unit_interval_trajectory() -> Trajectory {
    // Phase 25 puts the center at (0.25, 0.0); z1 then swings within [0.1875, 0.3125].
    let cal = Calibration {
        anchor_z1: 0.5,
        anchor_z2: 0.0,
        radius: 0.25,
        frame_count: 16,
    };
    generate(ControlParameters::new(25, 100).unwrap(), &cal).unwrap()
}

#[test]
fn frames_are_index_aligned_with_points() {
    let traj = unit_interval_trajectory();
    let pool = build_thread_pool(Some(4)).unwrap();
    let frames = render_trajectory(&pipeline(None), &traj, &pool).unwrap();
    assert_eq!(frames.len(), traj.len());
    for (frame, point) in frames.iter().zip(traj.points()) {
        let want = (255.0 * f64::from(point.z1 as f32)).round() as u8;
        assert_eq!(frame.pixel(0, 0).unwrap()[0], want);
    }
}

#[test]
fn parallel_matches_single_thread() {
    let traj = unit_interval_trajectory();
    let p = pipeline(None);
    let one = render_trajectory(&p, &traj, &build_thread_pool(Some(1)).unwrap()).unwrap();
    let many = render_trajectory(&p, &traj, &build_thread_pool(Some(8)).unwrap()).unwrap();
    assert_eq!(one, many);
}

#[test]
fn one_failed_point_fails_the_batch() {
    let traj = unit_interval_trajectory();
    let pool = build_thread_pool(Some(2)).unwrap();
    let err = render_trajectory(&pipeline(Some(0.3)), &traj, &pool).unwrap_err();
    assert!(err.to_string().contains("decoder blew up"));
}

#[test]
fn zero_threads_is_rejected() {
    assert!(build_thread_pool(Some(0)).is_err());
    assert!(build_thread_pool(None).is_ok());
}
