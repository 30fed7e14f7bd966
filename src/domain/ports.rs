use crate::utils::error::Result;

/// 匯出檔案的儲存端口
pub trait Storage: Send + Sync {
    /// Writes `data` under `path` and returns the location it was stored at.
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}
