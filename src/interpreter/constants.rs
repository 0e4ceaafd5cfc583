// Constants for the simulated console

/// Default step guard: tokens one `resume` call may execute
pub const DEFAULT_MAX_STEPS: usize = 100_000;

/// Printed for a variable that has never been assigned
pub const UNDEFINED_MARKER: &str = "[undefined]";

/// Terminal line appended when a run reaches the end of its tokens
pub const FINISHED_MESSAGE: &str = "Program finished, exit code 0";

/// Terminal line used instead when the program printed nothing
pub const FINISHED_NO_OUTPUT_MESSAGE: &str = "Program finished with no output";
