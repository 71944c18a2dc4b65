use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        KeycompError::missing_input("x")
            .to_string()
            .contains("missing input:")
    );
    assert!(
        KeycompError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        KeycompError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn structured_variants_report_dimensions() {
    let err = KeycompError::OutOfBoundsComposite {
        subject_width: 5,
        subject_height: 4,
        backdrop_width: 3,
        backdrop_height: 3,
    };
    assert_eq!(
        err.to_string(),
        "subject 5x4 does not fit inside backdrop 3x3"
    );

    let err = KeycompError::InvalidIntensity { value: 22 };
    assert!(err.to_string().contains("22"));

    let err = KeycompError::DegenerateBlur {
        kernel: 9,
        width: 4,
        height: 20,
    };
    assert!(err.to_string().contains("kernel 9"));
    assert!(err.to_string().contains("4x20"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = KeycompError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
