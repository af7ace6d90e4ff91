use colored::Colorize;

use crate::ingestion::{ItemDifferences, RosterReport, SnapshotChange};
use crate::ranking::RankingOutcome;

pub fn print_ranking(outcome: &RankingOutcome) {
    println!("{}", "Neighbour ranking (best first)".bold());
    for (rank, entry) in outcome.ranking.iter().enumerate() {
        let score = format!("{:>7.2}", entry.score);
        let score = if entry.score < 0.0 { score.green() } else { score.yellow() };
        let coverage = outcome.normalized.rater_coverage(&entry.rater).unwrap_or(0);
        println!("{:>4}. {} {:<24} {}", rank + 1, score, entry.rater, format!("({} rated)", coverage).dimmed());
    }

    let degenerate = outcome.normalized.degenerate_raters();
    if !degenerate.is_empty() {
        println!("{} {}", "No rating variance:".red(), degenerate.join(", "));
    }
}

pub fn print_item_coverage(outcome: &RankingOutcome) {
    let coverage = least_covered_first(outcome.normalized.item_coverage());
    println!("{}", "Item coverage (raters with a usable rating)".bold());
    for (item, count) in coverage {
        let text = format!("{:>4}", count);
        let text = if count == 0 { text.red() } else { text.normal() };
        println!("  {} {}", text, item);
    }
}

/// Fewest raters first, then by item name
fn least_covered_first(mut coverage: Vec<(&str, usize)>) -> Vec<(&str, usize)> {
    coverage.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
    coverage
}

pub fn print_changes(changes: &[SnapshotChange]) {
    if changes.is_empty() {
        println!("{}", "No new exports.".dimmed());
    }
    for change in changes {
        let verb = match change {
            SnapshotChange::Added(_) => change.verb().green(),
            SnapshotChange::Replaced(_) => change.verb().yellow(),
        };
        println!("{} {}.", change.file_name(), verb);
    }
}

pub fn print_roster(report: &RosterReport) {
    if report.is_consistent() {
        println!("{}", "Friends list and exports agree.".green());
        return;
    }
    print_list("Usernames not found on friends list:", &report.not_on_roster);
    print_list("Usernames not found in current files:", &report.missing_exports);
}

pub fn print_differences(diff: &ItemDifferences) {
    print_list("Rated only by you:", &diff.only_reference);
    print_list("Rated only by raters:", &diff.only_raters);
}

fn print_list(title: &str, names: &[String]) {
    if names.is_empty() {
        return;
    }
    println!("{} {}", title.bold(), format!("({})", names.len()).dimmed());
    for name in names {
        println!("  {}", name);
    }
}
