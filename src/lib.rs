//! # Courtdle
//!
//! 一个最高法院案例答题的终端客户端：每轮 5 个案例，猜测判决偏向哪一方，
//! 结束时给出得分和距下一轮（本地零点）的倒计时。
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Clients）
//! - `clients/` - 持有 HTTP 客户端，只暴露 `/cases_info` 与 `/check_answer` 两个能力
//!
//! ### ② 数据层（Models）
//! - `models/` - `CaseRecord`、判定响应及其规范化
//!
//! ### ③ 核心层（Quiz）
//! - `quiz/state` - 纯状态机：Landing → Loading → InProgress → Finished
//! - `quiz/controller` - 持有状态、记录日志、交还网络命令
//! - `quiz/countdown` / `quiz/summary` - 倒计时与结束页汇总
//!
//! ### ④ 编排层（App）
//! - `app` - 终端事件循环：输入与网络完成事件串行进入状态机
//! - `view` - 纯文本渲染
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod quiz;
pub mod utils;
pub mod view;

// 重新导出常用类型
pub use app::App;
pub use clients::CourtClient;
pub use config::Config;
pub use error::{ApiError, AppError, AppResult, QuizError};
pub use models::{CaseId, CaseRecord, Judgment};
pub use quiz::{Command, Event, Phase, QuizController, SessionState, SessionSummary};
