//! 通用 UI 组件
//!
//! 各面板共用的提示文本与分隔线

use ratatui::{
    style::{Color, Style},
    text::Line,
    widgets::{Block, Paragraph, Wrap},
};

/// [组件] 面板内的单段提示文本
pub fn pane_message(block: Block<'_>, text: String, color: Color) -> Paragraph<'_> {
    Paragraph::new(text)
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true })
        .block(block)
}

/// [组件] 详情头部下的分隔线
pub fn divider(width: u16) -> Line<'static> {
    Line::from("─".repeat(width as usize))
}
