// NOTE: smartinvo Architecture Rationale
//
// Why a thin client (no local scoring)?
// - Risk scoring, weather adjustment and waste aggregation belong to the service
// - The client only consumes the output contract, so model updates never need a release
//
// Why coordinators in a runtime crate (not in handlers)?
// - The console commands and the dashboard share the same sequencing rules
// - Staleness rejection and timer teardown are tested once, without a terminal
//
// Why one-shot commands plus a dashboard?
// - Scripts want `--format json` and an exit code
// - Operators want the live view: statistics, model, trace animation

mod args;
mod commands;
mod handlers;
mod logging;
pub mod presentation;

pub use args::{Cli, Commands, ConfigCommand, LogLevel, OutputFormat, StatsCommand};
pub use commands::run;

/// Process exit code for an error returned by [`run`]
///
/// Input validation failures exit with 2 (the same code clap uses for bad
/// arguments); everything else exits with 1.
pub fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<smartinvo_runtime::Error>() {
        Some(e) if e.is_validation() => 2,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartinvo_types::ValidationError;

    #[test]
    fn test_validation_errors_exit_with_two() {
        let err: anyhow::Error =
            smartinvo_runtime::Error::from(ValidationError::MissingField("item")).into();
        assert_eq!(exit_code(&err), 2);
    }

    #[test]
    fn test_other_errors_exit_with_one() {
        assert_eq!(exit_code(&anyhow::anyhow!("boom")), 1);
        let busy: anyhow::Error = smartinvo_runtime::Error::Busy.into();
        assert_eq!(exit_code(&busy), 1);
    }
}
