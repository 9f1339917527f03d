//! Action 枚举定义 (Intent)
//!
//! 用户交互转化为明确的语义化 Action

/// 用户操作枚举
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,
    MoveSelectionUp,
    MoveSelectionDown,

    // 设备选择与导航面板
    SelectDevice, // Enter：选中光标所在设备
    TogglePanel,  // 折叠/展开导航面板
    ReloadRoster, // 重新拉取设备清单
}
