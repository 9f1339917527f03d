use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

/// 被监控设备
///
/// 由数据端整体提供，会话期间只读，本地不做任何修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub device_id: String,
    pub device_name: String,
}

/// 事件类型
///
/// 已知类型之外的取值原样保留在 Other 中，展示时直接显示原始字符串
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    KeyboardPress,
    KeyboardRelease,
    ClipboardCopy,
    #[serde(untagged)]
    Other(String),
}

impl EventKind {
    /// 事件类型的显示标签（未知类型回退为原始值，不会丢弃也不会报错）
    pub fn label(&self) -> &str {
        match self {
            EventKind::KeyboardPress => "pressed",
            EventKind::KeyboardRelease => "released",
            EventKind::ClipboardCopy => "copied",
            EventKind::Other(raw) => raw,
        }
    }
}

/// 单条事件记录
///
/// timezone 是随事件存储的标签，只作注释展示，不参与 time 的换算
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(rename = "event_type")]
    pub kind: EventKind,
    pub time: i64,
    pub timezone: String,
    pub content: String,
}

/// 将 Unix 秒转换为查看端本地时间字符串
pub fn format_event_time(secs: i64) -> String {
    Local
        .timestamp_opt(secs, 0)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| secs.to_string())
}
