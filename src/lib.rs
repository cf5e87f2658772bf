//! # Portrait Studio
//!
//! 一个按顺序批量生成风格化人像的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的分层架构：
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 远程图片生成能力
//! - `ImageGenerator` - 生成能力的抽象，编排层只依赖它
//! - `GeminiClient` - Gemini generateContent 接口的实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `AngleRotator` - 机位轮换（排除最近两次）
//! - `ResultLedger` - 结果账本（最新在前，可共享）
//! - `UploadStore` - 上传列表和预览句柄
//! - `DownloadService` - 结果解码和保存
//! - `RunLogWriter` - 写运行日志能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一张图"的完整处理流程
//! - `ItemCtx` - 上下文封装（序号 + 总数 + 文件名）
//! - `GenerationFlow` - 流程编排（待生成 → 编码 → 远程生成 → 更新账本）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量生成器，顺序、间隔、中止
//! - `orchestrator/studio` - 面向展示层的工作室状态
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::{GeminiClient, GenerationRequest, ImageGenerator};
pub use config::Config;
pub use error::{AppError, AppResult, BatchError, GenerationError};
pub use models::{GeneratedResult, ResultStatus, Selection, SourceFile, UserImage};
pub use orchestrator::{BatchOrchestrator, BatchReport, BatchState, Studio};
pub use services::ResultLedger;
pub use workflow::{GenerationFlow, ItemCtx, ItemOutcome};
