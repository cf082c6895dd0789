use crate::DispatchError;

/// 单次分发的最终结果
///
/// `value` 与 `error` 至多一个有值。两者都为空表示远端调用成功
/// 返回但响应体为空，回调方据此区分"空成功"与失败。
/// 每次分发恰好投递一次。
#[derive(Debug)]
pub struct Outcome<T> {
    /// 成功结果
    pub value: Option<T>,
    /// 失败原因
    pub error: Option<DispatchError>,
}

impl<T> Outcome<T> {
    /// 成功结果
    pub fn value(value: T) -> Self {
        Self {
            value: Some(value),
            error: None,
        }
    }

    /// 失败结果
    pub fn error(error: DispatchError) -> Self {
        Self {
            value: None,
            error: Some(error),
        }
    }

    /// 空结果，调用成功但没有响应体
    pub fn empty() -> Self {
        Self {
            value: None,
            error: None,
        }
    }

    pub fn is_value(&self) -> bool {
        self.value.is_some()
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.error.is_none()
    }

    /// 转换为标准Result，空结果映射为 `Ok(None)`
    pub fn into_result(self) -> Result<Option<T>, DispatchError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.value),
        }
    }
}
