//! Library integration tests.

use devstation::error::{ExitInfo, InstallError, OrchestrationAborted};
use devstation::DevstationError;

#[test]
fn error_types_are_public() {
    let err = DevstationError::UnknownEnvironment {
        name: "rust".into(),
    };
    assert!(err.to_string().contains("rust"));
}

#[test]
fn install_errors_convert_into_crate_error() {
    let err: DevstationError = InstallError::ExternalToolFailed {
        package: "gdb".into(),
        exit_info: ExitInfo::Code(1),
    }
    .into();
    assert!(err.to_string().contains("gdb"));
}

#[test]
fn abort_names_the_unsatisfied_entry() {
    let err: DevstationError = OrchestrationAborted {
        environment: "c".into(),
        unsatisfied_entry: "mingw".into(),
    }
    .into();
    assert!(err.to_string().contains("mingw"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> devstation::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use devstation::cli::{Cli, Commands, SetupTarget};

    let cli = Cli::parse_from(["devstation", "setup", "all", "--json"]);

    if let Commands::Setup(args) = cli.command {
        assert_eq!(args.target, SetupTarget::All);
        assert!(args.json);
    } else {
        panic!("Expected Setup command");
    }
}
