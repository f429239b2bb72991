use unicode_width::UnicodeWidthStr;

pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Widest label in `labels`, or `None` when there are no labels.
pub fn max_width<S: AsRef<str>>(labels: &[S]) -> Option<usize> {
    labels.iter().map(|l| display_width(l.as_ref())).max()
}
