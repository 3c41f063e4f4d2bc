use thiserror::Error;

/// 统一的错误定义
/// 使用 `thiserror` 宏自动生成 Display 和 Error trait
#[derive(Error, Debug)]
pub enum BirkenError {
    // =================================================================
    // 1. 请求类 (Request)，对应 HTTP 400
    // =================================================================
    #[error("No {0} provided")]
    MissingField(&'static str),

    // =================================================================
    // 2. 模型回复解析类 (Parsing)
    // =================================================================
    #[error("Error parsing response: {0}")]
    ParseError(String), // 包装 serde_json::Error
}

impl From<serde_json::Error> for BirkenError {
    fn from(err: serde_json::Error) -> Self {
        BirkenError::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_reads_like_a_sentence() {
        assert_eq!(BirkenError::MissingField("text").to_string(), "No text provided");
        assert_eq!(
            BirkenError::MissingField("sentence").to_string(),
            "No sentence provided"
        );
    }

    #[test]
    fn json_errors_become_parse_errors() {
        let err: BirkenError = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .into();
        assert!(err.to_string().starts_with("Error parsing response: "));
    }
}
