//! Formatting utilities for terminal output

use crate::core::Feedback;

/// Format feedback as pegs: `●` per hit, `○` per blow, `·` for the rest
#[must_use]
pub fn feedback_pegs(feedback: Feedback, length: usize) -> String {
    let hit = feedback.hit() as usize;
    let blow = feedback.blow() as usize;
    let rest = length.saturating_sub(hit + blow);

    format!("{}{}{}", "●".repeat(hit), "○".repeat(blow), "·".repeat(rest))
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }

    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a millisecond duration as `1m 05s` or `4.2s`
#[must_use]
pub fn format_elapsed(elapsed_ms: u64) -> String {
    let secs = elapsed_ms / 1000;
    if secs >= 60 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("{:.1}s", elapsed_ms as f64 / 1000.0)
    }
}

/// Format how long ago a Unix timestamp was
#[must_use]
pub fn format_age(played_at: u64, now: u64) -> String {
    let age = now.saturating_sub(played_at);
    match age {
        0..60 => "just now".to_string(),
        60..3600 => format!("{}m ago", age / 60),
        3600..86_400 => format!("{}h ago", age / 3600),
        _ => format!("{}d ago", age / 86_400),
    }
}

/// Thousands separators for candidate counts
#[must_use]
pub fn format_count(count: usize) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pegs_mixed() {
        assert_eq!(feedback_pegs(Feedback::new(2, 1), 4), "●●○·");
    }

    #[test]
    fn pegs_win_and_miss() {
        assert_eq!(feedback_pegs(Feedback::new(4, 0), 4), "●●●●");
        assert_eq!(feedback_pegs(Feedback::new(0, 0), 3), "···");
    }

    #[test]
    fn progress_bar_empty() {
        let bar = create_progress_bar(0.0, 100.0, 10);
        assert_eq!(bar, "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        let bar = create_progress_bar(100.0, 100.0, 10);
        assert_eq!(bar, "██████████");
    }

    #[test]
    fn progress_bar_half() {
        let bar = create_progress_bar(50.0, 100.0, 10);
        assert_eq!(bar, "█████░░░░░");
    }

    #[test]
    fn progress_bar_zero_max() {
        assert_eq!(create_progress_bar(5.0, 0.0, 4), "░░░░");
    }

    #[test]
    fn elapsed_formats() {
        assert_eq!(format_elapsed(4_200), "4.2s");
        assert_eq!(format_elapsed(65_000), "1m 05s");
    }

    #[test]
    fn age_formats() {
        assert_eq!(format_age(1_000, 1_030), "just now");
        assert_eq!(format_age(1_000, 1_000 + 300), "5m ago");
        assert_eq!(format_age(1_000, 1_000 + 7_200), "2h ago");
        assert_eq!(format_age(1_000, 1_000 + 3 * 86_400), "3d ago");
        assert_eq!(format_age(2_000, 1_000), "just now");
    }

    #[test]
    fn count_separators() {
        assert_eq!(format_count(10), "10");
        assert_eq!(format_count(5040), "5,040");
        assert_eq!(format_count(3_628_800), "3,628,800");
    }
}
