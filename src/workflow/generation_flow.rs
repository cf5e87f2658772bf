//! 单张图片生成流程 - 流程层
//!
//! 核心职责：定义"一张图"的完整处理流程
//!
//! 流程顺序：
//! 1. 在账本最前面插入待生成记录
//! 2. 读取源文件并编码为 base64
//! 3. 调用远程服务（附带上一张结果作为参考图）
//! 4. 成功 → 写入结果；失败 → 标记错误

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::clients::{GenerationRequest, ImageGenerator};
use crate::error::GenerationError;
use crate::models::{GeneratedResult, ResultPatch, Selection, UserImage};
use crate::services::ResultLedger;
use crate::utils::image_codec;
use crate::utils::logging::truncate_text;
use crate::workflow::generation_ctx::ItemCtx;

/// 单张图片的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// 生成成功
    Completed {
        result_id: String,
        /// 新的参考图（base64），结果不是 data URL 时为 None
        continuity: Option<String>,
    },
    /// 生成失败，批次应当停止
    Failed {
        result_id: String,
        error: GenerationError,
    },
}

impl ItemOutcome {
    pub fn result_id(&self) -> &str {
        match self {
            ItemOutcome::Completed { result_id, .. } | ItemOutcome::Failed { result_id, .. } => {
                result_id
            }
        }
    }
}

/// 单张图片生成流程
///
/// - 只处理单张图片
/// - 所有错误都在这里被捕获并记录到账本，不向上抛出
/// - 不关心批次顺序、间隔和中止
pub struct GenerationFlow<G> {
    generator: Arc<G>,
    ledger: ResultLedger,
}

impl<G: ImageGenerator> GenerationFlow<G> {
    /// 创建新的生成流程
    pub fn new(generator: Arc<G>, ledger: ResultLedger) -> Self {
        Self { generator, ledger }
    }

    pub fn ledger(&self) -> &ResultLedger {
        &self.ledger
    }

    pub async fn run(
        &self,
        image: &UserImage,
        selection: Selection,
        camera_angle: String,
        continuity: Option<&str>,
        ctx: &ItemCtx,
    ) -> ItemOutcome {
        info!("{} 🎬 机位: {}", ctx, truncate_text(&camera_angle, 60));

        let pending = GeneratedResult::pending(image, selection, camera_angle.clone());
        let result_id = pending.id.clone();
        self.ledger.prepend(pending);

        match self.generate(image, selection, camera_angle, continuity).await {
            Ok(url) => {
                let next_continuity = image_codec::data_url_payload(&url).map(str::to_string);
                if next_continuity.is_none() {
                    warn!("{} ⚠️ 结果不是 data URL，下一张将不带参考图", ctx);
                }
                self.ledger.update(&result_id, ResultPatch::completed(url));
                info!("{} ✓ 生成完成", ctx);

                ItemOutcome::Completed {
                    result_id,
                    continuity: next_continuity,
                }
            }
            Err(e) => {
                self.ledger.update(&result_id, ResultPatch::error());
                if e.is_quota() {
                    warn!("{} ⏳ 远程服务限流或配额耗尽", ctx);
                } else {
                    error!("{} ❌ 生成失败: {}", ctx, e);
                }

                ItemOutcome::Failed {
                    result_id,
                    error: e,
                }
            }
        }
    }

    /// 读取源文件、编码并调用远程服务
    async fn generate(
        &self,
        image: &UserImage,
        selection: Selection,
        camera_angle: String,
        continuity: Option<&str>,
    ) -> Result<String, GenerationError> {
        let bytes = image
            .file
            .read_bytes()
            .await
            .map_err(|e| GenerationError::Transfer {
                name: image.name.clone(),
                reason: e.to_string(),
            })?;

        let request = GenerationRequest {
            image_base64: image_codec::encode_base64(&bytes),
            mime_type: image.file.effective_mime_type().to_string(),
            style: selection.style,
            ratio: selection.ratio,
            quality: selection.quality,
            camera_angle,
            continuity: continuity.map(str::to_string),
        };

        self.generator.generate(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CONNECTION_FAILED_MESSAGE;
    use crate::models::{ResultStatus, SourceFile};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingGenerator {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ImageGenerator for CountingGenerator {
        async fn generate(&self, _request: &GenerationRequest) -> Result<String, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("data:image/png;base64,T0s=".to_string())
        }
    }

    fn image(file: SourceFile) -> UserImage {
        UserImage {
            id: "upload-1-0".to_string(),
            url: "preview://a".to_string(),
            name: file.name.clone(),
            file,
        }
    }

    #[tokio::test]
    async fn test_unreadable_source_marks_error() {
        let generator = Arc::new(CountingGenerator::default());
        let flow = GenerationFlow::new(Arc::clone(&generator), ResultLedger::new());
        let image = image(SourceFile::from_path("/nonexistent/x.jpg"));
        let ctx = ItemCtx::new(1, 1, "x.jpg");

        let outcome = flow
            .run(&image, Selection::default(), "Low angle".to_string(), None, &ctx)
            .await;

        match &outcome {
            ItemOutcome::Failed { error, .. } => {
                assert!(matches!(error, GenerationError::Transfer { name, .. } if name == "x.jpg"));
                assert_eq!(error.user_message(), CONNECTION_FAILED_MESSAGE);
            }
            other => panic!("应当失败: {:?}", other),
        }
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);

        let snapshot = flow.ledger().snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, outcome.result_id());
        assert_eq!(snapshot[0].status, ResultStatus::Error);
        assert!(snapshot[0].url.is_empty());
    }

    #[tokio::test]
    async fn test_success_returns_payload_as_continuity() {
        let generator = Arc::new(CountingGenerator::default());
        let flow = GenerationFlow::new(Arc::clone(&generator), ResultLedger::new());
        let image = image(SourceFile::from_bytes("a.jpg", None, vec![1, 2]));
        let ctx = ItemCtx::new(1, 2, "a.jpg");

        let outcome = flow
            .run(&image, Selection::default(), "Low angle".to_string(), None, &ctx)
            .await;

        assert!(matches!(
            outcome,
            ItemOutcome::Completed { continuity: Some(ref c), .. } if c == "T0s="
        ));
        assert_eq!(flow.ledger().snapshot()[0].status, ResultStatus::Completed);
    }
}
