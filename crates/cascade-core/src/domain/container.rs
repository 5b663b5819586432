//! Container - モジュール間で受け渡すデータの単位
//!
//! # 二層構造
//! - **表層（Typed）**: `ContainerKind` trait - 型と type tag を静的に対応付け
//! - **内部（Dyn）**: `Container` - type tag + `Arc<dyn Any>`（型消去）

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// ContainerKind は payload 型と type tag を対応付ける
///
/// # 使用例
/// ```ignore
/// #[derive(Debug)]
/// struct FilePath {
///     path: PathBuf,
/// }
///
/// impl ContainerKind for FilePath {
///     const CONTAINER_TYPE: &'static str = "file_path";
/// }
/// ```
pub trait ContainerKind: Any + Send + Sync + fmt::Debug {
    const CONTAINER_TYPE: &'static str;
}

/// A tagged, shared, read-only payload.
///
/// Cloning a container clones the handle, not the payload.
#[derive(Clone)]
pub struct Container {
    type_tag: String,
    data: Arc<dyn Any + Send + Sync>,
}

impl Container {
    pub fn new<T: ContainerKind>(value: T) -> Self {
        Self {
            type_tag: T::CONTAINER_TYPE.to_string(),
            data: Arc::new(value),
        }
    }

    /// Build a container from an already-erased payload.
    pub fn from_parts(type_tag: impl Into<String>, data: Arc<dyn Any + Send + Sync>) -> Self {
        Self {
            type_tag: type_tag.into(),
            data,
        }
    }

    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    pub fn data(&self) -> &Arc<dyn Any + Send + Sync> {
        &self.data
    }

    /// Returns the payload as `T` if both the tag and the concrete type match.
    pub fn downcast<T: ContainerKind>(&self) -> Option<Arc<T>> {
        if self.type_tag != T::CONTAINER_TYPE {
            return None;
        }
        Arc::clone(&self.data).downcast::<T>().ok()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("type_tag", &self.type_tag)
            .finish_non_exhaustive()
    }
}
