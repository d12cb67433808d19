//! 终端画面渲染
//!
//! 只读取状态，输出纯文本，不做任何 IO。

use chrono::{DateTime, TimeZone};
use std::fmt;

use crate::models::CaseRecord;
use crate::quiz::{format_hms, Phase, SessionState, SessionSummary};

/// 渲染上下文
pub struct RenderContext<'a, Tz: TimeZone> {
    pub expected_case_count: usize,
    pub now: &'a DateTime<Tz>,
}

/// 渲染当前阶段的画面
pub fn render<Tz: TimeZone>(state: &SessionState, ctx: &RenderContext<'_, Tz>) -> String {
    match state.phase() {
        Phase::Landing => render_landing(ctx.expected_case_count),
        Phase::Loading => "Loading...\n".to_string(),
        Phase::InProgress => render_case(state),
        Phase::Finished => SessionSummary::from_state(state, ctx.now)
            .map(|summary| render_summary(&summary))
            .unwrap_or_default(),
    }
}

fn render_landing(expected_case_count: usize) -> String {
    format!(
        "Welcome to the Supreme Court Case Quiz\n\n\
         You will be shown {} Supreme Court cases and need to decide who it was decided in favor of.\n\n\
         [Enter] Start   [q] Quit\n",
        expected_case_count
    )
}

fn render_case(state: &SessionState) -> String {
    state
        .current_case()
        .map(|case| CaseScreen { state, case }.to_string())
        .unwrap_or_default()
}

fn render_summary(summary: &SessionSummary) -> String {
    SummaryScreen(summary).to_string()
}

/// 答题页
struct CaseScreen<'a> {
    state: &'a SessionState,
    case: &'a CaseRecord,
}

impl fmt::Display for CaseScreen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (state, case) = (self.state, self.case);

        writeln!(
            f,
            "Case {}/{}: {}",
            state.current_index() + 1,
            state.cases().len(),
            case.name
        )?;
        if let Some(theme) = &case.theme {
            writeln!(f, "Theme: {}", theme)?;
        }

        writeln!(f, "\nJudges")?;
        for judge in &case.judges {
            writeln!(f, "  - {}", judge)?;
        }

        writeln!(f, "\nSummary\n{}", case.summary)?;
        if let Some(question) = case.question.as_deref().filter(|q| !q.is_empty()) {
            writeln!(f, "\nQuestion\n{}", question)?;
        }

        writeln!(f)?;
        for (i, party) in case.parties.iter().enumerate() {
            let marker = if state.selected_party() == Some(party.as_str()) {
                " *"
            } else {
                ""
            };
            writeln!(f, "  [{}] {}{}", i + 1, party, marker)?;
        }

        match (state.selected_party(), state.judgment()) {
            (Some(_), Some(true)) => writeln!(f, "\nCorrect!")?,
            (Some(_), Some(false)) => writeln!(f, "\nIncorrect!")?,
            (Some(_), None) => writeln!(f, "\nChecking answer...")?,
            (None, _) => {}
        }

        if let Some(err) = state.last_error() {
            writeln!(f, "Error: {}", err)?;
        }

        if state.reveal_conclusion() {
            writeln!(
                f,
                "\nConclusion\n{}",
                state.conclusion_text().unwrap_or_default()
            )?;
        }

        let toggle = if state.reveal_conclusion() {
            "[c] Hide Conclusion"
        } else {
            "[c] Show Conclusion"
        };
        let mut actions = vec![];
        if state.selected_party().is_none() {
            actions.push("[1/2] Choose");
        }
        actions.push(toggle);
        if state.judgment().is_some() {
            actions.push("[n] Next Case");
        }
        actions.push("[q] Quit");
        writeln!(f, "\n{}", actions.join("   "))
    }
}

/// 结束页
struct SummaryScreen<'a>(&'a SessionSummary);

impl fmt::Display for SummaryScreen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.0;
        writeln!(f, "Quiz Completed\n")?;
        for outcome in &summary.outcomes {
            let mark = if outcome.correct { "✓" } else { "✗" };
            writeln!(f, "  {} {}", mark, outcome.case_name)?;
        }
        writeln!(f, "\n{}", summary)?;
        writeln!(
            f,
            "Next quiz available in {} seconds. ({})",
            summary.seconds_until_next,
            format_hms(summary.seconds_until_next)
        )
    }
}
