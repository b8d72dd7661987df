//! Library integration tests.

use gemreg::GemError;

#[test]
fn error_types_are_public() {
    let err = GemError::InvalidId {
        text: "not-an-id".into(),
    };
    assert!(err.to_string().contains("not-an-id"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> gemreg::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use gemreg::cli::{Cli, Commands};
    use clap::Parser;

    let cli = Cli::parse_from(["gemreg", "validate", "--json"]);
    if let Commands::Validate(args) = cli.command {
        assert!(args.json);
        assert!(args.engine_version.is_none());
    } else {
        panic!("Expected Validate command");
    }
}

#[test]
fn version_and_bounds_are_public() {
    use gemreg::version::{Bound, Comparison, Version};

    let bound: Bound = "~>1.2".parse().unwrap();
    assert_eq!(bound.comparison(), Comparison::Twiddle);
    assert!(bound.is_satisfied_by(Version::new(1, 9, 0)));
    assert!(!bound.is_satisfied_by(Version::new(2, 0, 0)));
    assert_eq!(bound.to_string(), "~>1.2");
}

#[test]
fn bad_version_is_rejected() {
    let err = gemreg::version::Version::parse("1.0").unwrap_err();
    assert!(matches!(err, GemError::InvalidVersion { .. }));
}
