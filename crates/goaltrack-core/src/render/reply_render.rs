use crate::errors::{ExError, ExErrorKind};
use crate::model::day::{format_day, DAY_FORMAT_HINT};
use crate::model::{MarkOutcome, User};
use crate::reports::{DailyReport, TallyReport};

const HELP_TEXT: &str = "\
Available commands:
/start - register or change your goal
/complete DD.MM.YYYY - mark your goal as done for a day
/result DD.MM.YYYY - who completed and who missed a day
/result_all - total completions per participant
/result_month - completions over the last 30 days
/result_step DD.MM.YYYY - completions since a given day
/help - show this message";

/// Static help text
pub fn render_help() -> String {
    HELP_TEXT.to_string()
}

/// Reply to the last registration step
pub fn render_registered(user: &User) -> String {
    format!(
        "Registration complete! {} Goal: {}\nUse /complete DD.MM.YYYY in the group chat to mark progress.",
        user.label(),
        user.goal
    )
}

/// Reply to `/start` from someone already registered
pub fn render_restart(user: &User, prompt: &str) -> String {
    format!(
        "You are registered as {} with the goal \"{}\". Answer the questions to update it.\n{}",
        user.label(),
        user.goal,
        prompt
    )
}

/// Reply to `/complete`
pub fn render_marked(outcome: &MarkOutcome) -> String {
    let day = format_day(outcome.completion.date);
    if outcome.newly_recorded {
        format!("Great! Completion for {} recorded.", day)
    } else {
        format!("You have already marked {} as done.", day)
    }
}

/// Reply to `/result <date>`
///
/// Two sections, completed then missed, one `<emoji> <name>` per line.
pub fn render_daily(report: &DailyReport) -> String {
    let mut output = format!("Results for {}\n\n", format_day(report.date));

    output.push_str("✅ Completed:\n");
    push_labels(&mut output, &report.completed);

    output.push_str("\n❌ Missed:\n");
    push_labels(&mut output, &report.missed);

    output.trim_end().to_string()
}

/// Reply to `/result_all`, `/result_month` and `/result_step`
pub fn render_tally(report: &TallyReport) -> String {
    if report.rows.is_empty() {
        return "No participants yet. Use /start to register.".to_string();
    }

    let out_of = report.window.out_of();
    report
        .rows
        .iter()
        .map(|row| match out_of {
            Some(total) => format!("{}: {}/{}", row.user.label(), row.count, total),
            None => format!("{}: {}", row.user.label(), row.count),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// User-facing text for an error caught at the dispatcher boundary
pub fn render_error(err: &ExError) -> String {
    match err.kind() {
        ExErrorKind::InvalidDate => format!(
            "Please give the date in {} format (for example 01.03.2024).",
            DAY_FORMAT_HINT
        ),
        ExErrorKind::UnregisteredUser => {
            "Please register first with the /start command.".to_string()
        }
        ExErrorKind::InvalidGoal
        | ExErrorKind::InvalidEmoji
        | ExErrorKind::InvalidName => format!("{}. Please try again.", err.message()),
        ExErrorKind::InvalidInput => {
            "Unknown command. Send /help to see what I understand.".to_string()
        }
        ExErrorKind::NotFound => "Nothing found.".to_string(),
        ExErrorKind::Io
        | ExErrorKind::Persistence
        | ExErrorKind::Internal => "Something went wrong. Please try again later.".to_string(),
    }
}

fn push_labels(output: &mut String, users: &[User]) {
    if users.is_empty() {
        output.push_str("-\n");
        return;
    }
    for user in users {
        output.push_str(&user.label());
        output.push('\n');
    }
}
