use std::process::ExitStatus;

/// How a process ended
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// The process returned from `main` or called `exit`
    Exit,
    /// The process was killed by a signal it did not handle
    UncaughtSignal,
}

impl TerminationReason {
    /// Classifies an exit status into a code and a reason.
    ///
    /// A signaled process reports the signal number as its code.
    pub(crate) fn classify(status: ExitStatus) -> (i32, TerminationReason) {
        if let Some(code) = status.code() {
            return (code, TerminationReason::Exit);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return (signal, TerminationReason::UncaughtSignal);
            }
        }

        (-1, TerminationReason::UncaughtSignal)
    }
}

/// Captured result of running a command to completion
///
/// # Examples
///
/// ```rust
/// use secretcmd::command::output::Output;
///
/// let output = Output::new(b"first\nsecond\n".to_vec(), Vec::new(), 0);
/// assert_eq!(output.lines(), vec!["first", "second", ""]);
/// assert!(output.success());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Output {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub exit_code: i32,
}

impl Output {
    pub fn new(stdout: Vec<u8>, stderr: Vec<u8>, exit_code: i32) -> Self {
        Self {
            stdout,
            stderr,
            exit_code,
        }
    }

    /// Splits stdout on `'\n'`.
    ///
    /// A trailing newline produces a trailing empty entry. Invalid UTF-8 is
    /// replaced rather than rejected.
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.stdout)
            .split('\n')
            .map(str::to_string)
            .collect()
    }

    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}
