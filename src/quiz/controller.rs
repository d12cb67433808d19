//! 答题控制器
//!
//! 持有唯一的 [`SessionState`]，负责：
//! - 把事件交给状态机并记录日志
//! - 把状态机产生的 [`Command`] 交还给运行时执行
//! - 网络失败只写日志，不改变状态

use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::QuizError;
use crate::quiz::state::{Command, Event, FailureKind, Phase, SessionState};

/// 答题控制器
pub struct QuizController {
    state: SessionState,
    expected_case_count: usize,
}

impl QuizController {
    /// 创建新的控制器（欢迎页）
    pub fn new(config: &Config) -> Self {
        Self {
            state: SessionState::new(),
            expected_case_count: config.expected_case_count,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn expected_case_count(&self) -> usize {
        self.expected_case_count
    }

    /// 处理一个事件
    ///
    /// # 返回
    /// 需要执行的网络请求（如有）；操作被拒绝时返回 `QuizError`，状态不变
    pub fn dispatch(&mut self, event: Event) -> Result<Option<Command>, QuizError> {
        self.log_event(&event);

        let before = self.state.phase();
        let result = self.state.apply(event);
        let after = self.state.phase();

        match &result {
            Ok(_) if before != after => {
                info!("🔀 阶段变化: {:?} → {:?}", before, after);
                if after == Phase::Finished {
                    info!(
                        "🏁 本轮结束: 答对 {}/{}",
                        self.state.score(),
                        self.state.cases().len()
                    );
                }
            }
            Ok(_) => {}
            Err(e) => debug!("操作被拒绝: {}", e),
        }

        result
    }

    /// 在状态变化之前记录事件相关的日志
    fn log_event(&self, event: &Event) {
        match event {
            Event::CasesLoaded(cases) => {
                if self.state.phase() != Phase::Loading {
                    debug!("忽略非加载阶段到达的案例列表");
                } else if cases.is_empty() {
                    warn!("⚠️ 案例服务返回空列表，停留在加载页");
                } else {
                    info!("✓ 拉取到 {} 个案例", cases.len());
                    if cases.len() != self.expected_case_count {
                        warn!(
                            "⚠️ 案例数量 {} 与预期 {} 不一致，按实际数量进行",
                            cases.len(),
                            self.expected_case_count
                        );
                    }
                }
            }
            Event::CasesFailed { message } => {
                warn!("❌ 拉取案例失败（不重试）: {}", message);
            }
            Event::SelectParty(party) => {
                if let Some(selected) = self.state.selected_party() {
                    debug!("已选择 '{}'，忽略重复选择 '{}'", selected, party);
                } else {
                    info!(
                        "[案例 {}] 选择当事方: {}",
                        self.state.current_index() + 1,
                        party
                    );
                }
            }
            Event::JudgmentReceived {
                case_index,
                judgment,
            } => {
                if self.state.is_awaiting(*case_index) {
                    info!(
                        "[案例 {}] 判定: {}",
                        case_index + 1,
                        if judgment.is_correct { "✅ 正确" } else { "❌ 错误" }
                    );
                } else {
                    debug!("[案例 {}] 丢弃过期的判定响应", case_index + 1);
                }
            }
            Event::JudgmentFailed {
                case_index,
                kind,
                message,
            } => {
                if !self.state.is_awaiting(*case_index) {
                    debug!("[案例 {}] 丢弃过期的失败响应", case_index + 1);
                } else {
                    match kind {
                        FailureKind::Network => {
                            warn!("[案例 {}] 提交答案失败（不重试）: {}", case_index + 1, message)
                        }
                        FailureKind::Malformed => {
                            error!("[案例 {}] 判定响应格式异常: {}", case_index + 1, message)
                        }
                    }
                }
            }
            Event::Start | Event::ToggleConclusion | Event::Next => {
                debug!("用户操作: {}", event.name());
            }
        }
    }
}
