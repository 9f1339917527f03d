//! 数据访问层
//!
//! 设备清单与事件日志由外部采集端写入数据目录，本层负责读取，
//! 并通过后台线程向 UI 提供不阻塞绘制的拉取

use std::fs;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{Device, EventRecord};

/// 核心层唯一的错误类型：数据不可用（读取或解析失败）
#[derive(Debug, Clone, Error)]
#[error("data unavailable: {reason}")]
pub struct DataUnavailable {
    pub reason: String,
}

impl DataUnavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for DataUnavailable {
    fn from(err: std::io::Error) -> Self {
        Self::new(err.to_string())
    }
}

impl From<toml::de::Error> for DataUnavailable {
    fn from(err: toml::de::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// 数据访问接口（外部协作方的契约）
pub trait DataSource: Send {
    /// 获取完整设备清单，顺序由数据方决定，本层不重排
    fn fetch_device_list(&self) -> Result<Vec<Device>, DataUnavailable>;

    /// 获取指定设备的事件日志，未知设备返回空列表而非错误
    fn fetch_device_events(&self, device_id: &str) -> Result<Vec<EventRecord>, DataUnavailable>;
}

/// devices.toml 的文件结构
#[derive(Debug, Deserialize)]
struct DeviceListData {
    #[serde(default)]
    devices: Vec<Device>,
}

/// events/<device_id>.toml 的文件结构
#[derive(Debug, Deserialize)]
struct EventLogData {
    #[serde(default)]
    events: Vec<EventRecord>,
}

/// 基于数据目录中 TOML 文件的数据源
///
/// 文件不存在视为成功的空结果，与读取/解析失败区分开
pub struct TomlStore {
    root: PathBuf,
}

impl TomlStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl DataSource for TomlStore {
    fn fetch_device_list(&self) -> Result<Vec<Device>, DataUnavailable> {
        let path = self.root.join("devices.toml");
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)?;
        let data: DeviceListData = toml::from_str(&content)?;

        Ok(data.devices)
    }

    fn fetch_device_events(&self, device_id: &str) -> Result<Vec<EventRecord>, DataUnavailable> {
        let path = self.root.join("events").join(format!("{device_id}.toml"));
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)?;
        let data: EventLogData = toml::from_str(&content)?;

        Ok(data.events)
    }
}

/// 拉取请求（token 由 UI 侧单调递增分配）
#[derive(Debug, Clone, PartialEq)]
pub enum FetchRequest {
    Roster { token: u64 },
    Events { device_id: String, token: u64 },
}

/// 拉取结果，带回对应请求的 token 供过期判定
#[derive(Debug)]
pub enum FetchOutcome {
    Roster {
        token: u64,
        result: Result<Vec<Device>, DataUnavailable>,
    },
    Events {
        token: u64,
        result: Result<Vec<EventRecord>, DataUnavailable>,
    },
}

/// 后台拉取器：独占一个工作线程顺序执行请求
///
/// 不提供取消，进行中的请求照常完成，过期结果由 UI 侧按 token 丢弃
pub struct Fetcher {
    req_tx: Sender<FetchRequest>,
    outcome_rx: Receiver<FetchOutcome>,
}

impl Fetcher {
    /// 启动工作线程并移交数据源所有权，Fetcher 被丢弃时线程随通道断开退出
    pub fn spawn(source: impl DataSource + 'static) -> Self {
        let (req_tx, req_rx) = mpsc::channel::<FetchRequest>();
        let (outcome_tx, outcome_rx) = mpsc::channel::<FetchOutcome>();

        thread::spawn(move || {
            while let Ok(req) = req_rx.recv() {
                let outcome = match req {
                    FetchRequest::Roster { token } => {
                        debug!(token, "fetching device list");
                        FetchOutcome::Roster {
                            token,
                            result: source.fetch_device_list(),
                        }
                    }
                    FetchRequest::Events { device_id, token } => {
                        debug!(token, %device_id, "fetching device events");
                        FetchOutcome::Events {
                            token,
                            result: source.fetch_device_events(&device_id),
                        }
                    }
                };

                if outcome_tx.send(outcome).is_err() {
                    // UI 已退出
                    break;
                }
            }
        });

        Self { req_tx, outcome_rx }
    }

    /// 提交一次拉取请求
    pub fn request(&self, req: FetchRequest) {
        if self.req_tx.send(req).is_err() {
            warn!("fetch worker is gone, request dropped");
        }
    }

    /// 非阻塞地取出一条已完成的结果
    pub fn try_recv(&self) -> Option<FetchOutcome> {
        self.outcome_rx.try_recv().ok()
    }
}
