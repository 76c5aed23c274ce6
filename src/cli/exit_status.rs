use std::process::ExitCode;

/// Exit status of the CLI.
///
/// - `Success` (0): every module built
/// - `Failure` (1): at least one module has errors
/// - `Error` (2): the run itself failed (bad config, unreadable locale file, I/O)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
