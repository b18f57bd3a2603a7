use crate::summarize::ScoredSentence;

/// Print a summary body, with a placeholder when nothing was selected.
pub fn print_summary(summary: &str) {
    if summary.is_empty() {
        println!("(empty summary: no sentences found in input)");
    } else {
        println!("{summary}");
    }
}

/// Print the full sentence ranking as a table.
pub fn print_ranking(ranked: &[ScoredSentence]) {
    if ranked.is_empty() {
        println!("No sentences found in input.");
        return;
    }

    println!("  {:<6} {:<5} SENTENCE", "SCORE", "POS");
    println!("  {}", "-".repeat(72));
    for s in ranked {
        println!("  {:<6} {:<5} {}", s.score, s.position, truncate(&s.text, 60));
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let cut: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{cut}...")
}
