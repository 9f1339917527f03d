//! App 状态定义 (Model)
//!
//! 两个视图各自独占的可变字段都集中在 App 中：
//! 设备列表持有高亮（selected），详情视图持有面板折叠标志与详情状态

use crate::data::Fetcher;
use crate::models::{Device, EventRecord};

/// 应用状态
pub struct App {
    pub fetcher: Fetcher,
    pub roster: RosterState,
    pub cursor: usize,
    pub selected: Option<SelectedDevice>,
    pub panel_expanded: bool,
    pub detail: DetailState,
    pub latest_token: u64,
}

/// 设备清单的加载状态
///
/// Failed 与「成功但为空」是两种必须可区分的结果
#[derive(Debug, Clone, PartialEq)]
pub enum RosterState {
    Loading,
    Loaded(Vec<Device>),
    Failed(String),
}

/// 当前选中的设备，列表高亮完全由此字段导出
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedDevice {
    pub device_id: String,
    pub device_name: String,
}

/// 详情面板状态
///
/// Loaded 且事件为空渲染固定的空提示，Failed 渲染错误横幅，两者不可混同
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Placeholder,
    Loading(SelectedDevice),
    Loaded {
        device: SelectedDevice,
        events: Vec<EventRecord>,
    },
    Failed {
        device: SelectedDevice,
        reason: String,
    },
}

impl App {
    /// 创建新的应用实例
    pub fn new(fetcher: Fetcher) -> Self {
        Self {
            fetcher,
            roster: RosterState::Loading,
            cursor: 0,
            selected: None,
            panel_expanded: true,
            detail: DetailState::Placeholder,
            latest_token: 0,
        }
    }

    /// 当前清单中的设备（未加载完成时为空切片）
    pub fn devices(&self) -> &[Device] {
        match &self.roster {
            RosterState::Loaded(devices) => devices,
            _ => &[],
        }
    }

    /// 光标所在的设备
    pub fn cursor_device(&self) -> Option<&Device> {
        self.devices().get(self.cursor)
    }

    /// 判断某设备是否为当前高亮项
    pub fn is_active(&self, device: &Device) -> bool {
        self.selected
            .as_ref()
            .map(|sel| sel.device_id == device.device_id)
            .unwrap_or(false)
    }

    /// 分配下一个拉取 token（单调递增，过期结果按 token 丢弃）
    pub fn next_token(&mut self) -> u64 {
        self.latest_token += 1;
        self.latest_token
    }
}
