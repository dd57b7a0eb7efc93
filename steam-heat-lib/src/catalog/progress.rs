/// A trait for reporting progress of long-running operations.
pub trait Progress: Send + Sync {
    /// Set the phase label for the current operation (e.g., "Listing", "Enriching").
    fn set_phase(&self, phase: &str);

    /// Set the total amount of work expected in the current phase.
    fn set_length(&self, length: u64);

    /// Report how much work is done so far, with a short status message.
    fn set_position(&self, position: u64, message: &str);

    /// Finish and clear the progress indicator.
    fn done(&self);
}
