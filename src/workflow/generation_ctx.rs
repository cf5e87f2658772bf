//! 单张图片处理上下文
//!
//! 封装"我正在处理这批图片中的第几张"这一信息

use std::fmt::Display;

/// 单张图片处理上下文
#[derive(Debug, Clone)]
pub struct ItemCtx {
    /// 图片在批次中的序号（从1开始）
    pub position: usize,

    /// 批次图片总数
    pub total: usize,

    /// 源文件名（仅用于日志显示）
    pub image_name: String,
}

impl ItemCtx {
    /// 创建新的上下文
    pub fn new(position: usize, total: usize, image_name: impl Into<String>) -> Self {
        Self {
            position,
            total,
            image_name: image_name.into(),
        }
    }

    /// 是否为批次中的最后一张
    pub fn is_last(&self) -> bool {
        self.position >= self.total
    }
}

impl Display for ItemCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[图 {}/{} {}]", self.position, self.total, self.image_name)
    }
}
