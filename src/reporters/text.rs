//! Text (terminal) reporter with colors and formatting

use super::{DetailReport, ListReport};
use crate::checks::CiCheck;
use crate::models::ReviewComment;
use crate::scoring::Verdict;
use console::style;

const RULE_WIDTH: usize = 70;
const COMMENT_PREVIEW_CHARS: usize = 80;
const CONVERSATION_LINE_CHARS: usize = 100;
const CONVERSATION_LINES: usize = 5;

/// Green at 80+, yellow at 50+, red below
fn color_score(score: u32) -> String {
    match Verdict::from_total(score) {
        Verdict::Ready => style(score).green().to_string(),
        Verdict::Caveats => style(score).yellow().to_string(),
        Verdict::NotReady => style(score).red().to_string(),
    }
}

fn verdict_line(verdict: Verdict) -> String {
    let label = style(verdict.label()).bold();
    match verdict {
        Verdict::Ready => label.green().to_string(),
        Verdict::Caveats => label.yellow().to_string(),
        Verdict::NotReady => label.red().to_string(),
    }
}

fn check_icon(check: &CiCheck) -> String {
    match &check.conclusion {
        None => style("⏳").yellow().to_string(),
        Some(c) if c.is_passing() => style("✅").green().to_string(),
        Some(c) if c.is_failing() => style("❌").red().to_string(),
        Some(_) => style("⚠️").yellow().to_string(),
    }
}

fn mergeable_status(mergeable: &str) -> String {
    match mergeable {
        "MERGEABLE" => style("✅ Mergeable").green().to_string(),
        "CONFLICTING" => style("❌ Conflicts").red().to_string(),
        _ => style("⚠️ Unknown").yellow().to_string(),
    }
}

fn review_status(decision: &str) -> String {
    match decision {
        "APPROVED" => style("✅ Approved").green().to_string(),
        "CHANGES_REQUESTED" => style("❌ Changes requested").red().to_string(),
        "REVIEW_REQUIRED" => style("⏳ Review required").yellow().to_string(),
        _ => style("No reviews").dim().to_string(),
    }
}

/// First `max` characters; counts chars so multi-byte text never splits
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn comment_preview(comment: &ReviewComment) -> String {
    let first_line = comment.body.lines().next().unwrap_or("");
    let preview = truncate_chars(first_line, COMMENT_PREVIEW_CHARS);
    if comment.body.chars().count() > COMMENT_PREVIEW_CHARS {
        format!("{preview}...")
    } else {
        preview.to_string()
    }
}

/// Lines of the conversation worth showing: skips gh noise and short lines
fn meaningful_lines(conversation: &str) -> Vec<&str> {
    conversation
        .lines()
        .filter(|l| !l.trim().is_empty())
        .filter(|l| !l.starts_with("GraphQL:") && l.chars().count() > 10)
        .take(CONVERSATION_LINES)
        .map(|l| truncate_chars(l, CONVERSATION_LINE_CHARS))
        .collect()
}

/// Render the scored PR list
pub fn render_list(report: &ListReport) -> String {
    let mut out = String::new();

    for err in &report.errors {
        out.push_str(&format!("  {}\n", style(format!("⚠️  {err}")).yellow()));
    }

    out.push('\n');
    out.push_str(&format!(
        "  {}\n",
        style(format!("Open PRs ({})", report.prs.len())).bold()
    ));
    out.push_str(&format!("  {}\n", "─".repeat(RULE_WIDTH)));

    if report.prs.is_empty() {
        out.push_str(&format!("  {}\n", style("No open PRs found.").dim()));
        return out;
    }

    for scored in &report.prs {
        let pr = &scored.pr;
        let draft = if pr.is_draft {
            format!("{} ", style("[draft]").dim())
        } else {
            String::new()
        };
        out.push_str(&format!(
            "  {:>3} {} {}{}\n",
            color_score(scored.score),
            style(format!("#{}", pr.number)).bold(),
            draft,
            pr.title
        ));
        out.push_str(&format!(
            "       {} · {} · +{} -{}\n",
            style(&pr.repo.repo).dim(),
            pr.author,
            pr.additions,
            pr.deletions
        ));
    }
    out.push('\n');
    out
}

/// Render one PR with breakdown, checks and discussion
pub fn render_detail(report: &DetailReport) -> String {
    let pr = &report.pr.pr;
    let sb = &report.pr.score_breakdown;
    let mut out = String::new();

    out.push('\n');
    out.push_str(&format!("  {}\n", style(&pr.title).bold()));
    out.push_str(&format!(
        "  {}\n",
        style(format!("#{} by {} · {}", pr.number, pr.author, pr.repo)).dim()
    ));
    out.push_str(&format!(
        "  {}\n",
        style(format!(
            "{} → {} · +{} -{} ({} files)",
            pr.head_ref_name, pr.base_ref_name, pr.additions, pr.deletions, pr.changed_files
        ))
        .dim()
    ));
    out.push_str(&format!("  {}\n", "─".repeat(60)));

    out.push_str(&format!(
        "  {} {}/100  {}\n",
        style("Score:").bold(),
        color_score(sb.total),
        verdict_line(report.verdict)
    ));
    out.push_str(&format!(
        "  {}\n\n",
        style(format!(
            "CI: {}/30 · Reviews: {}/30 · Conflicts: {}/20 · Freshness: {}/20",
            sb.ci, sb.reviews, sb.conflicts, sb.staleness
        ))
        .dim()
    ));

    out.push_str(&format!(
        "  {}     {}\n\n",
        mergeable_status(&pr.mergeable),
        review_status(&pr.review_decision)
    ));

    if !pr.status_check_rollup.is_empty() {
        out.push_str(&format!("  {}\n", style("CI Checks:").bold()));
        for check in &pr.status_check_rollup {
            let running = if check.is_running() {
                format!(" {}", style("(running)").yellow())
            } else {
                String::new()
            };
            out.push_str(&format!("    {} {}{}\n", check_icon(check), check.name, running));
        }
        out.push('\n');
    }

    if !report.review_comments.is_empty() {
        out.push_str(&format!(
            "  {}\n",
            style(format!("Review Comments ({}):", report.review_comments.len())).bold()
        ));
        for c in &report.review_comments {
            let location = match c.line {
                Some(line) => format!("{}:{}", c.path, line),
                None => c.path.clone(),
            };
            out.push_str(&format!(
                "    {} on {}\n",
                style(&c.author).cyan(),
                style(location).dim()
            ));
            out.push_str(&format!("      {}\n", comment_preview(c)));
        }
        out.push('\n');
    }

    let total_lines = report
        .conversation_comments
        .lines()
        .filter(|l| !l.trim().is_empty())
        .count();
    if total_lines > 0 {
        out.push_str(&format!(
            "  {} {} lines\n",
            style("Conversation:").bold(),
            total_lines
        ));
        for line in meaningful_lines(&report.conversation_comments) {
            out.push_str(&format!("    {}\n", style(line).dim()));
        }
        out.push('\n');
    }

    out
}
