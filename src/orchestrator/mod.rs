//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批次调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量人像生成器
//! - 按顺序逐张生成（Vec<UserImage>）
//! - 机位轮换和风格延续（每批独立）
//! - 相邻图片之间固定间隔
//! - 首次失败即中止，输出批次统计
//!
//! ### `studio` - 工作室
//! - 上传列表、风格/比例/画质选择
//! - 错误横幅
//! - 画廊卡片和下载
//!
//! ## 层次关系
//!
//! ```text
//! studio (展示层状态)
//!     ↓
//! batch_processor (处理 Vec<UserImage>)
//!     ↓
//! workflow::GenerationFlow (处理单张图片)
//!     ↓
//! services / clients (账本、机位、远程生成)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：batch_processor 管顺序和中止，studio 管展示状态
//! 2. **向下依赖**：编排层 → workflow → services / clients
//! 3. **错误不外泄**：单张失败在流程层转换为消息，展示层只看到横幅

pub mod batch_processor;
pub mod studio;

// 重新导出主要类型
pub use batch_processor::{BatchOrchestrator, BatchReport, BatchState, DEFAULT_ITEM_DELAY};
pub use studio::Studio;
