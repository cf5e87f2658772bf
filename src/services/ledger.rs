//! 结果账本 - 业务能力层
//!
//! 按"最新在前"的顺序保存所有生成尝试，供画廊展示。
//! 账本句柄可以克隆，所有克隆观察同一份数据，展示层可以在批次运行中读取进度。

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::models::{GeneratedResult, ResultPatch};

/// 结果账本
#[derive(Clone, Default)]
pub struct ResultLedger {
    entries: Arc<Mutex<Vec<GeneratedResult>>>,
}

impl ResultLedger {
    pub fn new() -> Self {
        Self::default()
    }

    // 锁只在同步代码中短暂持有，不会跨越 await
    fn lock(&self) -> MutexGuard<'_, Vec<GeneratedResult>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// 插入到最前面
    pub fn prepend(&self, result: GeneratedResult) {
        debug!("账本新增: {} ({})", result.id, result.status.as_str());
        self.lock().insert(0, result);
    }

    /// 按 id 局部更新，返回是否找到
    pub fn update(&self, id: &str, patch: ResultPatch) -> bool {
        let mut entries = self.lock();
        match entries.iter_mut().find(|r| r.id == id) {
            Some(result) => {
                result.apply(patch);
                debug!("账本更新: {} -> {}", id, result.status.as_str());
                true
            }
            None => false,
        }
    }

    /// 清空全部记录
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// 源图片被批量清除时调用
    ///
    /// 历史记录保持不变，只返回引用了这些源图片的记录数
    pub fn sources_released(&self, source_ids: &[String]) -> usize {
        let count = self
            .lock()
            .iter()
            .filter(|r| source_ids.contains(&r.source_image_id))
            .count();
        if count > 0 {
            debug!("{} 条历史记录的源图片已释放，记录保留", count);
        }
        count
    }

    /// 当前记录的快照（最新在前）
    pub fn snapshot(&self) -> Vec<GeneratedResult> {
        self.lock().clone()
    }

    pub fn get(&self, id: &str) -> Option<GeneratedResult> {
        self.lock().iter().find(|r| r.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// 已完成的记录（最新在前）
    pub fn completed(&self) -> Vec<GeneratedResult> {
        self.lock().iter().filter(|r| r.is_completed()).cloned().collect()
    }

    pub fn has_completed(&self) -> bool {
        self.lock().iter().any(|r| r.is_completed())
    }
}
