use chrono::{DateTime, TimeZone};
use std::fmt;

use crate::quiz::countdown::seconds_until_midnight;
use crate::quiz::state::{Phase, SessionState};

/// 单个案例的作答结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseOutcome {
    pub case_name: String,
    pub correct: bool,
}

/// 本轮答题汇总
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub score: usize,
    pub total: usize,
    pub outcomes: Vec<CaseOutcome>,
    /// 渲染时计算一次的倒计时快照
    pub seconds_until_next: i64,
}

impl SessionSummary {
    /// 从已结束的状态生成汇总，未结束时返回 `None`
    pub fn from_state<Tz: TimeZone>(state: &SessionState, now: &DateTime<Tz>) -> Option<Self> {
        if state.phase() != Phase::Finished {
            return None;
        }

        let outcomes = state
            .cases()
            .iter()
            .zip(state.results())
            .map(|(case, correct)| CaseOutcome {
                case_name: case.name.clone(),
                correct: *correct,
            })
            .collect();

        Some(Self {
            score: state.score(),
            total: state.cases().len(),
            outcomes,
            seconds_until_next: seconds_until_midnight(now),
        })
    }
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "You got {} out of {} correct.", self.score, self.total)
    }
}
