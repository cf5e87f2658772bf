//! 上传列表服务 - 业务能力层
//!
//! 管理已上传的源照片，以及每张照片的预览句柄的分配和释放

use std::collections::HashSet;

use tracing::{debug, info};

use crate::models::{SourceFile, UserImage};

/// 预览句柄分配器
#[derive(Debug, Default)]
pub struct PreviewRegistry {
    live: HashSet<String>,
}

impl PreviewRegistry {
    /// 为文件分配一个新的预览句柄
    pub fn allocate(&mut self, file: &SourceFile) -> String {
        let handle = format!("preview://{}/{}", uuid::Uuid::new_v4(), file.name);
        self.live.insert(handle.clone());
        handle
    }

    /// 释放预览句柄，返回句柄此前是否有效
    pub fn revoke(&mut self, handle: &str) -> bool {
        self.live.remove(handle)
    }

    pub fn is_live(&self, handle: &str) -> bool {
        self.live.contains(handle)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

/// 上传列表
#[derive(Debug, Default)]
pub struct UploadStore {
    images: Vec<UserImage>,
    previews: PreviewRegistry,
    // 同一毫秒内多次上传时保证 id 不重复
    next_index: usize,
}

impl UploadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加上传的文件，返回新图片的 id
    pub fn upload(&mut self, files: Vec<SourceFile>) -> Vec<String> {
        let millis = chrono::Utc::now().timestamp_millis();
        let mut ids = Vec::with_capacity(files.len());

        for file in files {
            let id = format!("upload-{}-{}", millis, self.next_index);
            self.next_index += 1;
            let url = self.previews.allocate(&file);
            debug!("上传: {} -> {}", file.name, id);

            ids.push(id.clone());
            self.images.push(UserImage {
                id,
                url,
                name: file.name.clone(),
                file,
            });
        }

        info!("📥 新增 {} 张照片，共 {} 张", ids.len(), self.images.len());
        ids
    }

    /// 移除单张图片并释放其预览，返回是否找到
    pub fn remove(&mut self, id: &str) -> bool {
        match self.images.iter().position(|img| img.id == id) {
            Some(pos) => {
                let image = self.images.remove(pos);
                self.previews.revoke(&image.url);
                true
            }
            None => false,
        }
    }

    /// 清空全部图片并释放所有预览，返回被清除的图片 id
    pub fn clear(&mut self) -> Vec<String> {
        let removed: Vec<UserImage> = self.images.drain(..).collect();
        for image in &removed {
            self.previews.revoke(&image.url);
        }
        removed.into_iter().map(|img| img.id).collect()
    }

    pub fn images(&self) -> &[UserImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn previews(&self) -> &PreviewRegistry {
        &self.previews
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(n: usize) -> Vec<SourceFile> {
        (0..n)
            .map(|i| SourceFile::from_bytes(format!("p{}.jpg", i), None, vec![i as u8]))
            .collect()
    }

    #[test]
    fn test_upload_assigns_ids_and_previews() {
        let mut store = UploadStore::new();
        let ids = store.upload(files(3));

        assert_eq!(ids.len(), 3);
        assert!(ids[0].starts_with("upload-") && ids[0].ends_with("-0"));
        assert!(ids[2].ends_with("-2"));
        assert_eq!(store.previews().live_count(), 3);
        assert!(store.images().iter().all(|img| store.previews().is_live(&img.url)));
        assert_eq!(store.images()[1].name, "p1.jpg");
    }

    #[test]
    fn test_remove_releases_preview() {
        let mut store = UploadStore::new();
        let ids = store.upload(files(2));
        let url = store.images()[0].url.clone();

        assert!(store.remove(&ids[0]));
        assert!(!store.remove(&ids[0]));
        assert!(!store.previews().is_live(&url));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut store = UploadStore::new();
        store.upload(files(2));
        store.upload(files(1));

        let removed = store.clear();
        assert_eq!(removed.len(), 3);
        assert!(store.is_empty());
        assert_eq!(store.previews().live_count(), 0);
    }
}
