use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 排序相关错误
    #[error("排序错误: {0}")]
    Sort(#[from] SortError),
    /// 目录数据错误
    #[error("目录错误: {0}")]
    Catalog(#[from] CatalogError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 后台任务错误
    #[error("任务错误: {0}")]
    Task(#[from] TaskError),
}

/// 排序错误
///
/// 任何一条记录的截止日期无法解析，整个排序调用都会失败，输入顺序保持不变。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortError {
    /// 截止日期无法解析为日期
    #[error("奖学金 #{id} 的截止日期无法解析: '{value}'")]
    MalformedDeadline { id: i64, value: String },
}

/// 目录数据错误
#[derive(Debug, Error)]
pub enum CatalogError {
    /// 文件不存在
    #[error("目录文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取目录文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// JSON 解析失败
    #[error("JSON解析失败 ({path}): {source}")]
    JsonParseFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// 不支持的文件格式
    #[error("不支持的目录文件格式: {path}")]
    UnsupportedFormat { path: String },
    /// 金额为负数或不是有限数
    #[error("奖学金 #{id} 的金额无效: {amount}")]
    InvalidAmount { id: i64, amount: f64 },
    /// 目录规模超过上限
    #[error("目录包含 {len} 条记录，超过上限 {max}")]
    TooLarge { len: usize, max: usize },
}

/// 配置错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 未知的操作名
    #[error("未知的操作: '{0}'")]
    UnknownAction(String),
    /// 未知的排序键
    #[error("未知的排序键: '{0}'")]
    UnknownSortKey(String),
}

/// 后台任务错误
#[derive(Debug, Error)]
pub enum TaskError {
    /// 任务超时，结果已丢弃
    #[error("排序任务超过 {timeout_ms} 毫秒未完成")]
    TimedOut { timeout_ms: u64 },
    /// 任务被取消或发生 panic
    #[error("排序任务异常终止: {0}")]
    Join(#[from] tokio::task::JoinError),
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建截止日期无法解析的错误
    pub fn malformed_deadline(id: i64, value: impl Into<String>) -> Self {
        AppError::Sort(SortError::MalformedDeadline {
            id,
            value: value.into(),
        })
    }

    /// 是否为截止日期格式错误（调用方可以剔除该记录后重试）
    pub fn is_malformed_key(&self) -> bool {
        matches!(self, AppError::Sort(SortError::MalformedDeadline { .. }))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
