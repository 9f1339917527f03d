//! 视图层模块
//!
//! 纯函数：将 App 状态映射为各面板的渲染，高亮、折叠宽度、
//! 空态与错误态全部由状态导出，不在视图里做状态迁移

pub mod components;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::state::{App, DetailState, RosterState};
use crate::models::format_event_time;
use components::{divider, pane_message};

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题
            Constraint::Min(10),   // 主体
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    render_title(frame, chunks[0]);
    render_body(frame, app, chunks[1]);
    render_help(frame, app, chunks[2]);
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new("🛰 Watchpost Device Monitor")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_body(frame: &mut Frame, app: &mut App, area: Rect) {
    // 导航面板折叠时收窄为固定宽度，展开时占约三分之一
    let list_width = if app.panel_expanded {
        Constraint::Percentage(34)
    } else {
        Constraint::Length(22)
    };
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([list_width, Constraint::Min(20)])
        .split(area);

    render_device_list(frame, app, chunks[0]);
    render_device_detail(frame, app, chunks[1]);
}

fn render_device_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let title = match &app.roster {
        RosterState::Loaded(devices) => format!("Devices ({})", devices.len()),
        _ => "Devices".to_string(),
    };
    let block = Block::default().title(title).borders(Borders::ALL);

    match &app.roster {
        RosterState::Loading => {
            frame.render_widget(
                pane_message(block, "Loading device list...".to_string(), Color::Gray),
                area,
            );
        }
        RosterState::Failed(reason) => {
            let text = format!("Device list unavailable:\n{reason}\n\nPress 'r' to retry");
            frame.render_widget(pane_message(block, text, Color::Red), area);
        }
        RosterState::Loaded(devices) if devices.is_empty() => {
            frame.render_widget(
                pane_message(block, "No devices registered".to_string(), Color::Gray),
                area,
            );
        }
        RosterState::Loaded(devices) => {
            let items: Vec<ListItem> = devices
                .iter()
                .map(|device| {
                    let style = if app.is_active(device) {
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    ListItem::new(Line::from(Span::styled(device.device_name.clone(), style)))
                })
                .collect();

            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("> ");

            let mut state = ListState::default();
            state.select(Some(app.cursor));
            frame.render_stateful_widget(list, area, &mut state);
        }
    }
}

fn render_device_detail(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().title("Device Detail").borders(Borders::ALL);

    match &app.detail {
        DetailState::Placeholder => {
            frame.render_widget(
                pane_message(
                    block,
                    "← Select a device to view details".to_string(),
                    Color::Gray,
                ),
                area,
            );
        }
        DetailState::Loading(device) => {
            frame.render_widget(
                pane_message(
                    block,
                    format!("Loading events for {}...", device.device_name),
                    Color::Gray,
                ),
                area,
            );
        }
        DetailState::Failed { device, reason } => {
            let text = format!(
                "{} - {}\n\nEvent log unavailable:\n{}",
                device.device_name, device.device_id, reason
            );
            frame.render_widget(pane_message(block, text, Color::Red), area);
        }
        DetailState::Loaded { device, events } => {
            let mut lines = vec![
                Line::from(Span::styled(
                    format!("{} - {}", device.device_name, device.device_id),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )),
                divider(area.width.saturating_sub(2)),
            ];

            if events.is_empty() {
                lines.push(Line::from("No events recorded"));
            } else {
                // 顺序与数据端返回一致，不做本地重排
                // TODO: 长事件列表的滚动
                for event in events {
                    lines.push(Line::from(vec![
                        Span::styled(
                            format!("{} ({})", format_event_time(event.time), event.timezone),
                            Style::default().fg(Color::Gray),
                        ),
                        Span::raw("  "),
                        Span::styled(
                            event.kind.label().to_string(),
                            Style::default().fg(Color::Green),
                        ),
                        Span::raw("  "),
                        Span::raw(event.content.clone()),
                    ]));
                }
            }

            frame.render_widget(
                Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
                area,
            );
        }
    }
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let panel_hint = if app.panel_expanded {
        "collapse"
    } else {
        "expand"
    };
    let text =
        format!("[j/k] navigate  [Enter] select  [t] {panel_hint} panel  [r] reload  [q] quit");

    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataSource, DataUnavailable, FetchOutcome, Fetcher};
    use crate::models::{Device, EventKind, EventRecord};
    use crate::ui::actions::Action;
    use ratatui::{Terminal, backend::TestBackend};

    struct NullSource;

    impl DataSource for NullSource {
        fn fetch_device_list(&self) -> Result<Vec<Device>, DataUnavailable> {
            Ok(Vec::new())
        }

        fn fetch_device_events(&self, _: &str) -> Result<Vec<EventRecord>, DataUnavailable> {
            Ok(Vec::new())
        }
    }

    fn device(id: &str, name: &str) -> Device {
        Device {
            device_id: id.to_string(),
            device_name: name.to_string(),
        }
    }

    fn app_with_devices(devices: Vec<Device>) -> App {
        let mut app = App::new(Fetcher::spawn(NullSource));
        let token = app.next_token();
        app.apply_fetch(FetchOutcome::Roster {
            token,
            result: Ok(devices),
        });
        app
    }

    /// 画一帧并把缓冲区拼成字符串用于断言
    fn draw(app: &mut App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_roster_renders_every_device_name_in_order() {
        let mut app = app_with_devices(vec![
            device("dev1", "Sensor A"),
            device("dev2", "Sensor B"),
            device("dev3", "Gateway"),
        ]);

        let screen = draw(&mut app);
        assert!(screen.contains("Devices (3)"));
        assert!(screen.contains("Sensor A"));
        assert!(screen.contains("Sensor B"));
        assert!(screen.contains("Gateway"));

        let a = screen.find("Sensor A").unwrap();
        let b = screen.find("Sensor B").unwrap();
        let g = screen.find("Gateway").unwrap();
        assert!(a < b && b < g);
    }

    #[test]
    fn test_fresh_roster_shows_placeholder_detail() {
        let mut app = app_with_devices(vec![device("dev1", "Sensor A")]);

        let screen = draw(&mut app);
        assert!(screen.contains("Select a device to view details"));
    }

    #[test]
    fn test_empty_roster_is_not_an_error() {
        let mut app = app_with_devices(Vec::new());

        let screen = draw(&mut app);
        assert!(screen.contains("No devices registered"));
        assert!(!screen.contains("unavailable"));
    }

    #[test]
    fn test_failed_roster_shows_reason_and_retry_hint() {
        let mut app = App::new(Fetcher::spawn(NullSource));
        let token = app.next_token();
        app.apply_fetch(FetchOutcome::Roster {
            token,
            result: Err(DataUnavailable::new("connection refused")),
        });

        let screen = draw(&mut app);
        assert!(screen.contains("Device list unavailable"));
        assert!(screen.contains("connection refused"));
        assert!(screen.contains("Press 'r' to retry"));
    }

    #[test]
    fn test_detail_renders_header_and_event_row() {
        let mut app = app_with_devices(vec![device("dev1", "Sensor A")]);
        app.dispatch(Action::SelectDevice);
        app.apply_fetch(FetchOutcome::Events {
            token: app.latest_token,
            result: Ok(vec![EventRecord {
                kind: EventKind::ClipboardCopy,
                time: 1_700_000_000,
                timezone: "UTC+8".to_string(),
                content: "hello".to_string(),
            }]),
        });

        let screen = draw(&mut app);
        assert!(screen.contains("Sensor A - dev1"));
        assert!(screen.contains(&format_event_time(1_700_000_000)));
        assert!(screen.contains("(UTC+8)"));
        assert!(screen.contains("copied"));
        assert!(screen.contains("hello"));
    }

    #[test]
    fn test_unrecognized_event_type_renders_raw_label() {
        let mut app = app_with_devices(vec![device("dev1", "Sensor A")]);
        app.dispatch(Action::SelectDevice);
        app.apply_fetch(FetchOutcome::Events {
            token: app.latest_token,
            result: Ok(vec![EventRecord {
                kind: EventKind::Other("unknown_type_x".to_string()),
                time: 1_700_000_000,
                timezone: "UTC+0".to_string(),
                content: "?".to_string(),
            }]),
        });

        let screen = draw(&mut app);
        assert!(screen.contains("unknown_type_x"));
    }

    #[test]
    fn test_empty_events_and_failure_render_differently() {
        let mut app = app_with_devices(vec![device("dev1", "Sensor A")]);

        app.dispatch(Action::SelectDevice);
        app.apply_fetch(FetchOutcome::Events {
            token: app.latest_token,
            result: Ok(Vec::new()),
        });
        let empty_screen = draw(&mut app);
        assert!(empty_screen.contains("No events recorded"));
        assert!(!empty_screen.contains("Event log unavailable"));

        app.dispatch(Action::SelectDevice);
        app.apply_fetch(FetchOutcome::Events {
            token: app.latest_token,
            result: Err(DataUnavailable::new("backend down")),
        });
        let failed_screen = draw(&mut app);
        assert!(failed_screen.contains("Event log unavailable"));
        assert!(failed_screen.contains("backend down"));
        assert!(!failed_screen.contains("No events recorded"));
    }
}
