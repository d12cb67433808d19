//! 答题核心
//!
//! - `state` - 纯状态机：阶段、事件、命令
//! - `controller` - 持有状态，记录日志，交还命令
//! - `countdown` - 距本地零点的倒计时
//! - `summary` - 结束页汇总

pub mod controller;
pub mod countdown;
pub mod state;
pub mod summary;

pub use controller::QuizController;
pub use countdown::{format_hms, seconds_until_midnight};
pub use state::{Command, Event, FailureKind, Phase, SessionState};
pub use summary::{CaseOutcome, SessionSummary};
