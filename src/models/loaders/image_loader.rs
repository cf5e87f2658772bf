use crate::error::{AppError, FileError};
use crate::models::SourceFile;
use crate::utils::image_codec;
use anyhow::Result;
use std::path::PathBuf;
use tokio::fs;

/// 从文件夹中加载所有图片文件（不递归），按文件名排序
pub async fn load_all_images(folder_path: &str) -> Result<Vec<SourceFile>> {
    let folder = PathBuf::from(folder_path);

    if !folder.is_dir() {
        return Err(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        }
        .into());
    }

    let mut paths = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?
    {
        let path = entry.path();
        if image_codec::mime_from_path(&path).is_none() {
            continue;
        }

        match entry.file_type().await {
            Ok(file_type) if file_type.is_file() => paths.push(path),
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("读取文件信息失败 {}: {}", path.display(), e);
            }
        }
    }

    paths.sort();

    let files: Vec<SourceFile> = paths.into_iter().map(SourceFile::from_path).collect();
    for file in &files {
        tracing::info!("正在加载: {} ({})", file.name, file.effective_mime_type());
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_folder() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("portrait-loader-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_load_only_images_sorted() {
        let dir = temp_folder();
        std::fs::write(dir.join("b.png"), [1u8]).unwrap();
        std::fs::write(dir.join("a.jpg"), [2u8]).unwrap();
        std::fs::write(dir.join("notes.txt"), b"skip").unwrap();
        std::fs::create_dir_all(dir.join("nested.png")).unwrap();

        let files = load_all_images(dir.to_str().unwrap()).await.unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.jpg", "b.png"]);
        assert_eq!(files[0].effective_mime_type(), "image/jpeg");

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_missing_folder_is_error() {
        let err = load_all_images("/definitely/not/here/portraits")
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FileError>(),
            Some(FileError::DirectoryNotFound { .. })
        ));
    }
}
