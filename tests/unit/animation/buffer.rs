use super::*;

fn frames(n: usize, tag: u8) -> Vec<Frame> {
    (0..n)
        .map(|i| Frame {
            width: 1,
            height: 1,
            data: vec![tag, i as u8, 0, 255],
        })
        .collect()
}

fn params(t: u8, a: u8) -> ControlParameters {
    ControlParameters::new(t, a).unwrap()
}

#[test]
fn starts_empty_and_loading() {
    let buf = AnimationBuffer::new(100);
    assert_eq!(buf.state(), PlaybackState::Empty);
    assert!(buf.is_loading());
    assert!(buf.current().is_none());
}

#[test]
fn successful_batch_installs_and_resets_cursor() {
    let mut buf = AnimationBuffer::new(100);
    let ticket = buf.begin(params(63, 14)).unwrap();
    assert_eq!(buf.state(), PlaybackState::Generating);
    assert_eq!(buf.len(), 0);

    let c = buf.complete(ticket, Ok(frames(100, 1)));
    assert!(matches!(c, Completion::Installed { generation: 1 }));
    assert_eq!(buf.state(), PlaybackState::Ready);
    assert_eq!(buf.len(), 100);
    assert_eq!(buf.cursor(), 0);
    assert!(!buf.is_loading());
}

#[test]
fn cursor_wraps_modulo_loop_length() {
    let mut buf = AnimationBuffer::new(100);
    let ticket = buf.begin(params(63, 14)).unwrap();
    buf.complete(ticket, Ok(frames(100, 1)));

    let mut seen = Vec::new();
    for _ in 0..101 {
        seen.push(buf.cursor());
        buf.advance(1);
    }
    assert_eq!(seen[..100], (0..100).collect::<Vec<_>>()[..]);
    assert_eq!(seen[100], 0);

    buf.advance(250);
    assert_eq!(buf.cursor(), 51);
}

#[test]
fn advance_is_noop_unless_ready() {
    let mut buf = AnimationBuffer::new(3);
    buf.advance(5);
    assert_eq!(buf.cursor(), 0);
    buf.begin(params(1, 1)).unwrap();
    buf.advance(5);
    assert_eq!(buf.cursor(), 0);
}

#[test]
fn stale_batch_never_reaches_newer_generation() {
    let mut buf = AnimationBuffer::new(100);
    let old = buf.begin(params(63, 14)).unwrap();
    let new = buf.begin(params(10, 80)).unwrap();
    assert_eq!(new.generation, old.generation + 1);

    let c = buf.complete(old, Ok(frames(100, 1)));
    assert!(matches!(
        c,
        Completion::Stale {
            generation: 1,
            current: 2
        }
    ));
    assert_eq!(buf.len(), 0);
    assert_eq!(buf.state(), PlaybackState::Generating);

    buf.complete(new, Ok(frames(100, 2)));
    assert!(buf.frames().iter().all(|f| f.data[0] == 2));
    assert_eq!(buf.params(), Some(params(10, 80)));
}

#[test]
fn stale_batch_arriving_after_install_is_dropped() {
    let mut buf = AnimationBuffer::new(2);
    let old = buf.begin(params(63, 14)).unwrap();
    let new = buf.begin(params(10, 80)).unwrap();
    buf.complete(new, Ok(frames(2, 2)));
    assert!(matches!(
        buf.complete(old, Ok(frames(2, 1))),
        Completion::Stale { .. }
    ));
    assert!(buf.frames().iter().all(|f| f.data[0] == 2));
}

#[test]
fn failed_batch_returns_to_empty() {
    let mut buf = AnimationBuffer::new(100);
    let ticket = buf.begin(params(63, 14)).unwrap();
    let c = buf.complete(ticket, Err(LoopError::validation("boom")));
    assert!(matches!(c, Completion::Failed { generation: 1, .. }));
    assert_eq!(buf.state(), PlaybackState::Empty);
    assert!(buf.is_loading());
    assert_eq!(buf.len(), 0);
}

#[test]
fn partial_batch_is_rejected() {
    let mut buf = AnimationBuffer::new(100);
    let ticket = buf.begin(params(63, 14)).unwrap();
    let c = buf.complete(ticket, Ok(frames(99, 1)));
    assert!(matches!(
        c,
        Completion::Failed {
            error: LoopError::Precondition(_),
            ..
        }
    ));
    assert_eq!(buf.len(), 0);
}

#[test]
fn new_generation_clears_installed_loop() {
    let mut buf = AnimationBuffer::new(2);
    let t = buf.begin(params(63, 14)).unwrap();
    buf.complete(t, Ok(frames(2, 1)));
    buf.advance(1);
    buf.begin(params(63, 14)).unwrap();
    assert_eq!(buf.len(), 0);
    assert_eq!(buf.cursor(), 0);
    assert_eq!(buf.generation(), 2);
}

#[test]
fn unavailable_is_permanent() {
    let mut buf = AnimationBuffer::new(100);
    buf.mark_unavailable();
    assert!(!buf.is_loading());
    assert!(buf.begin(params(63, 14)).is_err());
    assert_eq!(buf.state(), PlaybackState::Unavailable);
}
