//! 答题状态机
//!
//! 整轮答题的全部状态都保存在一个 [`SessionState`] 中，
//! 所有变化都通过 [`SessionState::apply`] 以 (状态, 事件) → 新状态 的方式发生。
//! 这里不做任何 IO，网络请求以 [`Command`] 的形式交给调用方执行。

use crate::error::QuizError;
use crate::models::{CaseId, CaseRecord, Judgment};

/// 答题阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// 欢迎页
    #[default]
    Landing,
    /// 正在拉取案例
    Loading,
    /// 答题中
    InProgress,
    /// 本轮结束
    Finished,
}

/// 失败类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// 网络层失败：只记录日志
    Network,
    /// 响应格式异常：拒绝本次判定并展示给用户
    Malformed,
}

/// 驱动状态机的事件（用户操作或网络完成）
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Start,
    CasesLoaded(Vec<CaseRecord>),
    CasesFailed {
        message: String,
    },
    SelectParty(String),
    JudgmentReceived {
        case_index: usize,
        judgment: Judgment,
    },
    JudgmentFailed {
        case_index: usize,
        kind: FailureKind,
        message: String,
    },
    ToggleConclusion,
    Next,
}

impl Event {
    /// 事件名称（用于日志和错误信息）
    pub fn name(&self) -> &'static str {
        match self {
            Event::Start => "start",
            Event::CasesLoaded(_) => "cases_loaded",
            Event::CasesFailed { .. } => "cases_failed",
            Event::SelectParty(_) => "select_party",
            Event::JudgmentReceived { .. } => "judgment_received",
            Event::JudgmentFailed { .. } => "judgment_failed",
            Event::ToggleConclusion => "toggle_conclusion",
            Event::Next => "next_case",
        }
    }

    /// 是否为网络完成事件（而非用户操作）
    pub fn is_completion(&self) -> bool {
        matches!(
            self,
            Event::CasesLoaded(_)
                | Event::CasesFailed { .. }
                | Event::JudgmentReceived { .. }
                | Event::JudgmentFailed { .. }
        )
    }
}

/// 状态机要求执行的网络请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchCases,
    /// 带上发起时的题号，回来时据此丢弃过期响应
    CheckAnswer {
        case_index: usize,
        case_id: CaseId,
        user_choice: String,
    },
}

/// 一轮答题的状态
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    phase: Phase,
    cases: Vec<CaseRecord>,
    current_index: usize,
    selected_party: Option<String>,
    judgment: Option<bool>,
    judgment_conclusion: Option<String>,
    reveal_conclusion: bool,
    results: Vec<bool>,
    last_error: Option<String>,
}

impl SessionState {
    /// 初始状态：欢迎页
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn cases(&self) -> &[CaseRecord] {
        &self.cases
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// 当前案例（仅答题中有值）
    pub fn current_case(&self) -> Option<&CaseRecord> {
        match self.phase {
            Phase::InProgress => self.cases.get(self.current_index),
            _ => None,
        }
    }

    pub fn selected_party(&self) -> Option<&str> {
        self.selected_party.as_deref()
    }

    pub fn judgment(&self) -> Option<bool> {
        self.judgment
    }

    pub fn reveal_conclusion(&self) -> bool {
        self.reveal_conclusion
    }

    pub fn results(&self) -> &[bool] {
        &self.results
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// 展示用的结论：优先使用判定时服务端返回的结论
    pub fn conclusion_text(&self) -> Option<&str> {
        self.judgment_conclusion
            .as_deref()
            .or_else(|| self.current_case().map(|c| c.conclusion.as_str()))
    }

    /// 答对数量
    pub fn score(&self) -> usize {
        self.results.iter().filter(|r| **r).count()
    }

    /// 是否正在等待 `case_index` 的判定
    pub fn is_awaiting(&self, case_index: usize) -> bool {
        self.phase == Phase::InProgress
            && self.current_index == case_index
            && self.selected_party.is_some()
            && self.judgment.is_none()
    }

    /// 应用一个事件
    ///
    /// # 返回
    /// - `Ok(Some(command))`: 状态已变化，需要执行网络请求
    /// - `Ok(None)`: 状态已变化或事件被忽略（重复选择、过期响应）
    /// - `Err(QuizError)`: 操作被拒绝，状态不变
    pub fn apply(&mut self, event: Event) -> Result<Option<Command>, QuizError> {
        match (self.phase, event) {
            (Phase::Landing, Event::Start) => {
                *self = Self {
                    phase: Phase::Loading,
                    ..Self::default()
                };
                Ok(Some(Command::FetchCases))
            }

            (Phase::Loading, Event::CasesLoaded(cases)) => {
                // 空列表时保持加载状态
                if !cases.is_empty() {
                    self.cases = cases;
                    self.current_index = 0;
                    self.phase = Phase::InProgress;
                }
                Ok(None)
            }
            (Phase::Loading, Event::CasesFailed { .. }) => Ok(None),

            (Phase::InProgress, Event::SelectParty(party)) => self.select_party(party),

            (Phase::InProgress, Event::JudgmentReceived { case_index, judgment }) => {
                if self.is_awaiting(case_index) {
                    self.results.push(judgment.is_correct);
                    self.judgment = Some(judgment.is_correct);
                    self.judgment_conclusion = judgment.conclusion;
                    self.last_error = None;
                }
                Ok(None)
            }

            (Phase::InProgress, Event::JudgmentFailed { case_index, kind, message }) => {
                if self.is_awaiting(case_index) && kind == FailureKind::Malformed {
                    self.last_error = Some(message);
                }
                Ok(None)
            }

            (Phase::InProgress, Event::ToggleConclusion) => {
                self.reveal_conclusion = !self.reveal_conclusion;
                Ok(None)
            }

            (Phase::InProgress, Event::Next) => self.advance(),

            // 阶段已变化后到达的网络响应直接丢弃
            (_, event) if event.is_completion() => Ok(None),

            (phase, event) => Err(QuizError::InvalidAction {
                phase,
                action: event.name(),
            }),
        }
    }

    fn select_party(&mut self, party: String) -> Result<Option<Command>, QuizError> {
        if self.selected_party.is_some() {
            return Ok(None);
        }

        let case = self
            .cases
            .get(self.current_index)
            .ok_or(QuizError::InvalidAction {
                phase: self.phase,
                action: "select_party",
            })?;

        if !case.has_party(&party) {
            return Err(QuizError::UnknownParty { party });
        }

        let command = Command::CheckAnswer {
            case_index: self.current_index,
            case_id: case.id.clone(),
            user_choice: party.clone(),
        };
        self.selected_party = Some(party);
        self.last_error = None;
        Ok(Some(command))
    }

    fn advance(&mut self) -> Result<Option<Command>, QuizError> {
        if self.judgment.is_none() {
            return Err(QuizError::JudgmentPending);
        }

        self.selected_party = None;
        self.judgment = None;
        self.judgment_conclusion = None;
        self.reveal_conclusion = false;
        self.last_error = None;

        if self.current_index + 1 < self.cases.len() {
            self.current_index += 1;
        } else {
            self.current_index = self.cases.len();
            self.phase = Phase::Finished;
        }
        Ok(None)
    }
}
