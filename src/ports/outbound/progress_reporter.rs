/// ProgressReporter port for reporting progress during analyses
///
/// This port abstracts user feedback (e.g., to stderr) so the application
/// layer never writes to the console directly. Implementations must be
/// `Send + Sync` because sessions report from spawned tasks.
pub trait ProgressReporter: Send + Sync {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports progress of a counted operation
    ///
    /// # Arguments
    /// * `current` - Current progress value
    /// * `total` - Total expected value
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
