//! 批量人像生成器 - 编排层
//!
//! ## 职责
//!
//! 按上传顺序逐张生成人像，任一张失败即中止整批。
//!
//! ## 核心功能
//!
//! 1. **顺序生成**：同一时刻只有一个请求在进行
//! 2. **机位轮换**：每张图片使用不同的机位，排除最近两次用过的机位
//! 3. **风格延续**：上一张的生成结果作为下一张的参考图
//! 4. **客户端限速**：相邻两张之间固定等待（默认 1.2 秒）
//! 5. **失败中止**：失败的图片标记为错误，剩余图片不再尝试
//!
//! ## 设计特点
//!
//! - **每批独立状态**：机位历史和参考图属于单次批次，每次启动时重置
//! - **生成标志**：批次运行期间置位，重叠的第二个批次会被拒绝
//! - **向下委托**：单张图片的细节交给 workflow::GenerationFlow

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::clients::ImageGenerator;
use crate::error::BatchError;
use crate::models::{Selection, UserImage};
use crate::services::{AngleRotator, ResultLedger};
use crate::utils::logging;
use crate::workflow::{GenerationFlow, ItemCtx, ItemOutcome};

/// 默认的相邻图片间隔
pub const DEFAULT_ITEM_DELAY: Duration = Duration::from_millis(1200);

/// 批次状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Idle,
    Running,
    /// 因失败中止
    Halted,
    /// 全部完成
    Finished,
}

/// 批次结果汇总
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub state: BatchState,
    pub total: usize,
    pub attempted: usize,
    pub completed: usize,
    /// 中止时展示给用户的消息
    pub message: Option<String>,
    /// 本批创建的结果 id（按提交顺序）
    pub result_ids: Vec<String>,
}

impl BatchReport {
    fn new(total: usize) -> Self {
        Self {
            state: BatchState::Idle,
            total,
            attempted: 0,
            completed: 0,
            message: None,
            result_ids: Vec::with_capacity(total),
        }
    }

    pub fn is_halted(&self) -> bool {
        self.state == BatchState::Halted
    }

    pub fn failed(&self) -> usize {
        self.attempted - self.completed
    }
}

/// 单次批次的运行状态
struct BatchRun {
    rotator: AngleRotator,
    /// 最近一次成功生成的图片（base64）
    continuity: Option<String>,
    state: BatchState,
}

/// 生成标志守卫，离开作用域时（包括批次 future 被丢弃）清除标志
struct GeneratingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> GeneratingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for GeneratingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// 批量人像生成器
pub struct BatchOrchestrator<G> {
    flow: GenerationFlow<G>,
    generating: AtomicBool,
    item_delay: Duration,
    angle_seed: Option<u64>,
}

impl<G: ImageGenerator> BatchOrchestrator<G> {
    /// 创建新的生成器
    pub fn new(generator: Arc<G>, ledger: ResultLedger) -> Self {
        Self {
            flow: GenerationFlow::new(generator, ledger),
            generating: AtomicBool::new(false),
            item_delay: DEFAULT_ITEM_DELAY,
            angle_seed: None,
        }
    }

    /// 设置相邻图片间隔
    pub fn with_item_delay(mut self, delay: Duration) -> Self {
        self.item_delay = delay;
        self
    }

    /// 固定机位随机种子（每批都从同一种子开始）
    pub fn with_angle_seed(mut self, seed: u64) -> Self {
        self.angle_seed = Some(seed);
        self
    }

    pub fn ledger(&self) -> &ResultLedger {
        self.flow.ledger()
    }

    pub fn is_generating(&self) -> bool {
        self.generating.load(Ordering::Acquire)
    }

    /// 启动一个批次
    ///
    /// 单张失败不会作为错误返回，而是记录在账本和 [`BatchReport::message`] 中；
    /// 只有批次无法启动时才返回 [`BatchError`]。
    pub async fn start_batch(
        &self,
        images: &[UserImage],
        selection: Selection,
    ) -> Result<BatchReport, BatchError> {
        if images.is_empty() {
            return Err(BatchError::NoImages);
        }
        let _guard = GeneratingGuard::acquire(&self.generating).ok_or_else(|| {
            warn!("⚠️ 已有批次正在生成，忽略本次请求");
            BatchError::AlreadyGenerating
        })?;

        let total = images.len();
        let mut report = BatchReport::new(total);
        let mut run = BatchRun {
            rotator: match self.angle_seed {
                Some(seed) => AngleRotator::seeded(seed),
                None => AngleRotator::cinematic(),
            },
            continuity: None,
            state: BatchState::Running,
        };

        logging::log_batch_start(
            total,
            selection.style.label(),
            selection.ratio.as_str(),
            selection.quality.label(),
        );

        for (idx, image) in images.iter().enumerate() {
            let ctx = ItemCtx::new(idx + 1, total, image.name.clone());
            let angle = run.rotator.next();

            let outcome = self
                .flow
                .run(image, selection, angle, run.continuity.as_deref(), &ctx)
                .await;

            report.attempted += 1;
            report.result_ids.push(outcome.result_id().to_string());

            match outcome {
                ItemOutcome::Completed { continuity, .. } => {
                    report.completed += 1;
                    run.continuity = continuity;
                }
                ItemOutcome::Failed { error, .. } => {
                    run.state = BatchState::Halted;
                    report.message = Some(error.user_message());
                    if !ctx.is_last() {
                        warn!("{} ⛔ 批次中止，剩余 {} 张不再尝试", ctx, total - ctx.position);
                    }
                    break;
                }
            }

            if !ctx.is_last() && !self.item_delay.is_zero() {
                debug!("等待 {:?} 后继续下一张", self.item_delay);
                tokio::time::sleep(self.item_delay).await;
            }
        }

        if run.state == BatchState::Running {
            run.state = BatchState::Finished;
        }
        report.state = run.state;

        logging::log_batch_complete(report.completed, total, report.is_halted());
        info!("📒 账本当前共 {} 条记录", self.ledger().len());

        Ok(report)
    }
}
