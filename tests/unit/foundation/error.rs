use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        LoopError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        LoopError::model_load("x")
            .to_string()
            .contains("model load error:")
    );
    assert!(
        LoopError::precondition("x")
            .to_string()
            .contains("precondition violated:")
    );
    assert!(LoopError::encode("x").to_string().contains("encode error:"));
}

#[test]
fn inference_names_stage_and_keeps_cause() {
    let err = LoopError::inference(Stage::Decode, anyhow::anyhow!("session not ready"));
    let msg = err.to_string();
    assert!(msg.contains("stage decode"));
    assert!(msg.contains("session not ready"));
    assert_eq!(err.stage(), Some(Stage::Decode));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = LoopError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert_eq!(err.stage(), None);
}
