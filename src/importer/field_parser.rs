// ==========================================
// 代课公告系统 - 字段解析与清洗
// ==========================================
// 职责: TRIM / NULL 标准化 / 时间与日期解析
// 规则: 解析失败返回 TypeConversionError，由调用方决定是否吸收
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

pub struct FieldParser;

impl FieldParser {
    /// 清洗文本字段（缺失 → 空字符串）
    pub fn clean_text(&self, value: Option<&String>) -> String {
        value.map(|v| v.trim().to_string()).unwrap_or_default()
    }

    /// 标准化 NULL 值（空字符串/空白 → None）
    pub fn normalize_null(&self, value: Option<&String>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    /// 解析课时序号（"5" → 5）
    pub fn parse_hour(&self, value: Option<&String>) -> Option<u8> {
        self.normalize_null(value).and_then(|v| v.parse::<u8>().ok())
    }

    /// 解析时刻（ISO 8601 日期时间 / HH:MM[:SS]）
    pub fn parse_time(
        &self,
        value: Option<&String>,
        field: &str,
        row_number: usize,
    ) -> ImportResult<Option<NaiveTime>> {
        let value = match self.normalize_null(value) {
            None => return Ok(None),
            Some(v) => v,
        };

        // 带时区偏移（2025-02-25T11:35:00+01:00）→ 取本地时刻
        if let Ok(dt) = DateTime::parse_from_rfc3339(&value) {
            return Ok(Some(dt.time()));
        }

        const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];
        for format in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(&value, format) {
                return Ok(Some(dt.time()));
            }
        }

        const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];
        for format in TIME_FORMATS {
            if let Ok(t) = NaiveTime::parse_from_str(&value, format) {
                return Ok(Some(t));
            }
        }

        Err(ImportError::TypeConversionError {
            row: row_number,
            field: field.to_string(),
            message: format!("时刻格式错误: {}", value),
        })
    }

    /// 解析日期（YYYY-MM-DD 或带时刻的 ISO 8601）
    pub fn parse_date(&self, value: Option<&String>, field: &str) -> ImportResult<Option<NaiveDate>> {
        let value = match self.normalize_null(value) {
            None => return Ok(None),
            Some(v) => v,
        };

        if let Ok(date) = NaiveDate::parse_from_str(&value, "%Y-%m-%d") {
            return Ok(Some(date));
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(&value) {
            return Ok(Some(dt.date_naive()));
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(&value, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(Some(dt.date()));
        }

        Err(ImportError::TypeConversionError {
            row: 0,
            field: field.to_string(),
            message: format!("日期格式错误: {}", value),
        })
    }
}
