//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含核心的 dispatch 逻辑与各状态迁移

use tracing::{debug, info, warn};

use super::actions::Action;
use super::state::{App, DetailState, RosterState, SelectedDevice};
use crate::data::{FetchOutcome, FetchRequest};

impl App {
    /// 核心逻辑分发，返回 true 表示退出
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::MoveSelectionUp => self.move_up(),
            Action::MoveSelectionDown => self.move_down(),
            Action::SelectDevice => self.select_device(),
            Action::TogglePanel => self.toggle_panel(),
            Action::ReloadRoster => self.reload_roster(),
        }
        false
    }

    // ============ 导航相关 ============

    /// 向上移动光标
    pub fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// 向下移动光标
    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.devices().len() {
            self.cursor += 1;
        }
    }

    // ============ 设备清单 ============

    /// 重新拉取设备清单
    ///
    /// 同时把详情面板重置为占位态并清除高亮，保证不残留上一份清单的数据；
    /// token 随之推进，仍在途的事件拉取结果到达后会被丢弃
    pub fn reload_roster(&mut self) {
        let token = self.next_token();
        self.roster = RosterState::Loading;
        self.selected = None;
        self.detail = DetailState::Placeholder;
        self.cursor = 0;
        self.fetcher.request(FetchRequest::Roster { token });
    }

    // ============ 设备选择 ============

    /// 选中光标所在设备并拉取其事件日志
    ///
    /// 高亮完全由 selected 导出，旧高亮天然被清除；
    /// 选择只会折叠导航面板，从不展开
    pub fn select_device(&mut self) {
        let Some(device) = self.cursor_device() else {
            return;
        };
        let device = SelectedDevice {
            device_id: device.device_id.clone(),
            device_name: device.device_name.clone(),
        };
        info!(device_id = %device.device_id, "device selected");

        self.selected = Some(device.clone());
        self.panel_expanded = false;
        self.detail = DetailState::Loading(device.clone());

        let token = self.next_token();
        self.fetcher.request(FetchRequest::Events {
            device_id: device.device_id,
            token,
        });
    }

    // ============ 导航面板 ============

    /// 折叠/展开导航面板（纯状态翻转，不触碰选择与数据）
    pub fn toggle_panel(&mut self) {
        self.panel_expanded = !self.panel_expanded;
    }

    // ============ 拉取结果 ============

    /// 应用一条拉取结果，token 过期的结果直接丢弃
    pub fn apply_fetch(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Roster { token, result } => {
                if token != self.latest_token {
                    debug!(token, latest = self.latest_token, "stale roster discarded");
                    return;
                }
                match result {
                    Ok(devices) => {
                        if self.cursor >= devices.len() {
                            self.cursor = devices.len().saturating_sub(1);
                        }
                        self.roster = RosterState::Loaded(devices);
                    }
                    Err(err) => {
                        warn!(%err, "device list fetch failed");
                        self.roster = RosterState::Failed(err.to_string());
                    }
                }
            }
            FetchOutcome::Events { token, result } => {
                if token != self.latest_token {
                    debug!(token, latest = self.latest_token, "stale events discarded");
                    return;
                }
                let DetailState::Loading(device) = &self.detail else {
                    return;
                };
                let device = device.clone();
                match result {
                    Ok(events) => {
                        self.detail = DetailState::Loaded { device, events };
                    }
                    Err(err) => {
                        warn!(%err, "event log fetch failed");
                        self.detail = DetailState::Failed {
                            device,
                            reason: err.to_string(),
                        };
                    }
                }
            }
        }
    }
}
