/// Width of the label column in the summary. Matches `Standard Deviation`.
pub const LABEL_WIDTH: usize = 18;

/// Indent that lines continuation rows of run times up under `Run Times: `.
pub const RUN_TIMES_INDENT: usize = 11;

/// Number of run times printed per row.
pub const RUN_TIMES_PER_ROW: usize = 5;

/// A duration in seconds, to the millisecond.
pub fn seconds(s: f64) -> String {
    format!("{:.3}", s)
}

/// A summary label, right aligned so the colons of consecutive labels line up.
pub fn label(s: &str) -> String {
    format!("{:>width$}: ", s, width = LABEL_WIDTH)
}

/// What follows the `index`th run time (zero based): a space, plus a break onto an indented
/// row after every fifth time.
pub fn run_time_separator(index: usize) -> String {
    if (index + 1) % RUN_TIMES_PER_ROW == 0 {
        format!(" \n{}", " ".repeat(RUN_TIMES_INDENT))
    } else {
        String::from(" ")
    }
}
