//! 终端运行时 - 编排层
//!
//! ## 职责
//!
//! 1. **事件循环**：用户输入与网络完成事件在同一个循环里串行处理
//! 2. **命令执行**：把状态机产生的 `Command` 放到后台任务执行，完成后以事件回送
//! 3. **画面刷新**：每次状态变化后重新渲染
//!
//! 网络请求在后台进行时，终端仍然可以接收输入（例如切换结论显示）。

use chrono::Local;
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::clients::CourtClient;
use crate::config::Config;
use crate::error::AppResult;
use crate::quiz::{
    seconds_until_midnight, Command, Event, FailureKind, Phase, QuizController, SessionState,
    SessionSummary,
};
use crate::utils::logging;
use crate::view::{self, RenderContext};

/// 终端输入解析结果
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Event(Event),
    Quit,
    Help,
}

/// 把一行终端输入解析为操作
///
/// - 欢迎页：空行或 `start`
/// - 答题中：`1` / `2` 选择当事方，`c` 切换结论，`n` 下一题
/// - 任意阶段：`q` 退出
pub fn parse_input(line: &str, state: &SessionState) -> Input {
    let input = line.trim().to_lowercase();
    if matches!(input.as_str(), "q" | "quit" | "exit") {
        return Input::Quit;
    }

    match state.phase() {
        Phase::Landing if input.is_empty() || input == "start" || input == "s" => {
            Input::Event(Event::Start)
        }
        Phase::InProgress => match input.as_str() {
            "c" => Input::Event(Event::ToggleConclusion),
            "n" => Input::Event(Event::Next),
            other => other
                .parse::<usize>()
                .ok()
                .and_then(|n| state.current_case()?.party_by_number(n))
                .map(|party| Input::Event(Event::SelectParty(party.to_string())))
                .unwrap_or(Input::Help),
        },
        _ => Input::Help,
    }
}

/// 执行一个命令，返回对应的完成事件
pub async fn execute(client: &CourtClient, command: Command) -> Event {
    match command {
        Command::FetchCases => match client.fetch_cases().await {
            Ok(cases) => Event::CasesLoaded(cases),
            Err(e) => Event::CasesFailed {
                message: e.to_string(),
            },
        },
        Command::CheckAnswer {
            case_index,
            case_id,
            user_choice,
        } => match client.check_answer(&case_id, &user_choice).await {
            Ok(judgment) => Event::JudgmentReceived {
                case_index,
                judgment,
            },
            Err(e) => Event::JudgmentFailed {
                case_index,
                kind: if e.is_malformed() {
                    FailureKind::Malformed
                } else {
                    FailureKind::Network
                },
                message: e.to_string(),
            },
        },
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    client: CourtClient,
    controller: QuizController,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Self {
        logging::log_startup(&config);

        let client = CourtClient::new(&config);
        let controller = QuizController::new(&config);

        Self {
            config,
            client,
            controller,
        }
    }

    /// 运行应用主逻辑
    pub async fn run(mut self) -> AppResult<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let (tx, mut rx) = mpsc::unbounded_channel::<Event>();

        self.draw()?;

        loop {
            let event = tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        info!("输入结束，退出");
                        return Ok(());
                    };
                    match parse_input(&line, self.controller.state()) {
                        Input::Event(event) => event,
                        Input::Quit => {
                            info!("👋 用户退出");
                            return Ok(());
                        }
                        Input::Help => {
                            print_line(help_text(self.controller.phase()))?;
                            continue;
                        }
                    }
                }
                Some(event) = rx.recv() => event,
            };

            match self.controller.dispatch(event) {
                Ok(Some(command)) => self.spawn(command, tx.clone()),
                Ok(None) => {}
                Err(e) => {
                    print_line(&e.to_string())?;
                    continue;
                }
            }

            self.draw()?;

            if self.controller.phase() == Phase::Finished {
                if let Some(summary) =
                    SessionSummary::from_state(self.controller.state(), &Local::now())
                {
                    logging::log_session_complete(&summary);
                }
                if self.config.live_countdown {
                    run_live_countdown(&mut lines).await?;
                }
                return Ok(());
            }
        }
    }

    /// 后台执行命令，完成后把事件送回主循环
    fn spawn(&self, command: Command, tx: mpsc::UnboundedSender<Event>) {
        debug!("执行命令: {:?}", command);
        let client = self.client.clone();
        tokio::spawn(async move {
            let event = execute(&client, command).await;
            if tx.send(event).is_err() {
                warn!("主循环已退出，丢弃网络响应");
            }
        });
    }

    fn draw(&self) -> AppResult<()> {
        let now = Local::now();
        let ctx = RenderContext {
            expected_case_count: self.config.expected_case_count,
            now: &now,
        };
        let screen = view::render(self.controller.state(), &ctx);
        print_line(&format!("\n{}\n{}", "─".repeat(60), screen))
    }
}

/// 每秒刷新倒计时，直到用户回车或到达零点
async fn run_live_countdown(lines: &mut Lines<BufReader<Stdin>>) -> AppResult<()> {
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    print_line("[Enter] Exit")?;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let seconds = seconds_until_midnight(&Local::now());
                let mut stdout = std::io::stdout();
                write!(stdout, "\rNext quiz available in {} seconds.   ", seconds)?;
                stdout.flush()?;
                if seconds == 0 {
                    break;
                }
            }
            _ = lines.next_line() => break,
        }
    }

    print_line("")
}

fn help_text(phase: Phase) -> &'static str {
    match phase {
        Phase::Landing => "Press Enter to start, or q to quit.",
        Phase::Loading => "Loading cases... (q to quit)",
        Phase::InProgress => "Type 1 or 2 to choose a party, c to toggle the conclusion, n for the next case, q to quit.",
        Phase::Finished => "Quiz completed.",
    }
}

fn print_line(text: &str) -> AppResult<()> {
    let mut stdout = std::io::stdout();
    writeln!(stdout, "{}", text)?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CaseId, CaseRecord};

    fn loaded_state() -> SessionState {
        let mut state = SessionState::new();
        state.apply(Event::Start).expect("start");
        state
            .apply(Event::CasesLoaded(vec![CaseRecord {
                id: CaseId::new("1"),
                name: "Schenck v. United States".to_string(),
                judges: vec![],
                summary: String::new(),
                conclusion: String::new(),
                parties: vec!["Schenck".to_string(), "United States".to_string()],
                theme: None,
                question: None,
            }]))
            .expect("loaded");
        state
    }

    #[test]
    fn test_parse_landing() {
        let state = SessionState::new();
        assert_eq!(parse_input("", &state), Input::Event(Event::Start));
        assert_eq!(parse_input("Start", &state), Input::Event(Event::Start));
        assert_eq!(parse_input("q", &state), Input::Quit);
        assert_eq!(parse_input("n", &state), Input::Help);
    }

    #[test]
    fn test_parse_in_progress() {
        let state = loaded_state();
        assert_eq!(
            parse_input("2", &state),
            Input::Event(Event::SelectParty("United States".to_string()))
        );
        assert_eq!(parse_input(" c ", &state), Input::Event(Event::ToggleConclusion));
        assert_eq!(parse_input("N", &state), Input::Event(Event::Next));
        assert_eq!(parse_input("3", &state), Input::Help);
        assert_eq!(parse_input("0", &state), Input::Help);
        assert_eq!(parse_input("", &state), Input::Help);
    }

    #[test]
    fn test_parse_loading_only_quits() {
        let mut state = SessionState::new();
        state.apply(Event::Start).expect("start");
        assert_eq!(parse_input("", &state), Input::Help);
        assert_eq!(parse_input("quit", &state), Input::Quit);
    }
}
