use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        RenderError::invalid_subset("x")
            .to_string()
            .contains("invalid component subset:")
    );
    assert!(RenderError::device("x").to_string().contains("device error:"));
    assert!(RenderError::config("x").to_string().contains("config error:"));
    assert!(
        RenderError::StackUnderflow
            .to_string()
            .contains("stack underflow")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = RenderError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn anyhow_converts_with_question_mark() {
    fn device_call() -> anyhow::Result<()> {
        anyhow::bail!("gpu lost")
    }
    fn wrapped() -> RenderResult<()> {
        device_call()?;
        Ok(())
    }

    let err = wrapped().unwrap_err();
    assert!(matches!(err, RenderError::Other(_)));
    assert_eq!(err.to_string(), "gpu lost");
}
