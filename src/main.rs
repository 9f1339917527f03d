mod data;
mod logging;
mod models;
mod ui;

use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use crate::data::{Fetcher, TomlStore};
use crate::ui::{App, render};

/// 获取数据目录路径 (~/.local/share/watchpost/)
///
/// 可用 WATCHPOST_DATA_DIR 指向其他采集目录
fn get_data_dir() -> io::Result<PathBuf> {
    let data_dir = match env::var_os("WATCHPOST_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => dirs::data_dir()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "无法获取用户数据目录"))?
            .join("watchpost"),
    };

    fs::create_dir_all(&data_dir)?;

    Ok(data_dir)
}

fn main() -> io::Result<()> {
    let data_dir = get_data_dir()?;
    logging::init(&data_dir)?;

    // 数据源与后台拉取线程
    let store = TomlStore::new(data_dir);
    let mut app = App::new(Fetcher::spawn(store));

    // 页面加载行为：先拉一次设备清单
    app.reload_roster();

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app);

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        // 先应用已完成的拉取结果，过期结果在 apply_fetch 内按 token 丢弃
        while let Some(outcome) = app.fetcher.try_recv() {
            app.apply_fetch(outcome);
        }

        terminal.draw(|f| render(f, app))?;

        // 短超时轮询，拉取进行中界面仍可响应新的按键
        if crossterm::event::poll(Duration::from_millis(50))? {
            if let crossterm::event::Event::Key(key) = crossterm::event::read()? {
                if key.kind == crossterm::event::KeyEventKind::Press {
                    if ui::handle_key_event(app, key.code)? {
                        break;
                    }
                }
            }
        }
    }
    Ok(())
}
