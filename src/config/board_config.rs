use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::config::error::{ConfigError, ConfigResult};

/// 配置文件根对象（{"settings": {...}}）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub settings: BoardConfig,
}

/// 单节课的铃声时刻
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BellPeriod {
    /// 课时序号
    pub period: u8,

    /// 上课时刻（HH:MM）
    pub start: String,

    /// 下课时刻（HH:MM）
    pub end: String,
}

impl BellPeriod {
    pub fn new(period: u8, start: &str, end: &str) -> Self {
        Self {
            period,
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    /// 解析为 (序号, 上课, 下课)
    pub fn parse(&self) -> ConfigResult<(u8, NaiveTime, NaiveTime)> {
        let start = parse_clock("bell_schedule.start", &self.start)?;
        let end = parse_clock("bell_schedule.end", &self.end)?;
        if end <= start {
            return Err(ConfigError::InvalidValue {
                key: "bell_schedule".to_string(),
                value: format!("{} {}-{}", self.period, self.start, self.end),
                message: "下课时刻必须晚于上课时刻".to_string(),
            });
        }
        Ok((self.period, start, end))
    }
}

/// 代课公告配置
///
/// 所有字段均可缺省，缺省值与原有部署一致。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// 仅输出这些班级（非空时忽略 exclude）
    pub include: Vec<String>,

    /// 排除这些班级
    pub exclude: Vec<String>,

    /// 当日最后显示的课时序号
    pub day_end_hour: Option<u8>,

    /// 当日最后显示的时刻（HH:MM），day_end_hour 优先
    pub day_end_time: Option<String>,

    /// 缺勤列表中不显示的人员缩写（助理等）
    pub absence_excluded_staff: Vec<String>,

    /// 停课标记文本
    pub cancellation_marker: String,

    /// 代课备注前缀（"za MAT"）
    pub note_prefix: String,

    /// 铃声时刻表
    pub bell_schedule: Vec<BellPeriod>,

    /// 覆盖课时数达到该值的缺勤显示为全天
    pub whole_day_threshold: usize,

    /// 导出目录
    pub output_folder: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
            day_end_hour: None,
            day_end_time: None,
            absence_excluded_staff: vec!["KOP".to_string(), "HRN".to_string(), "HEI".to_string()],
            cancellation_marker: "odpadá".to_string(),
            note_prefix: "za".to_string(),
            bell_schedule: default_bell_schedule(),
            whole_day_threshold: 7,
            output_folder: ".".to_string(),
        }
    }
}

pub fn default_bell_schedule() -> Vec<BellPeriod> {
    vec![
        BellPeriod::new(1, "07:55", "08:40"),
        BellPeriod::new(2, "08:45", "09:30"),
        BellPeriod::new(3, "09:35", "10:20"),
        BellPeriod::new(4, "10:30", "11:15"),
        BellPeriod::new(5, "11:35", "12:20"),
        BellPeriod::new(6, "12:25", "13:10"),
        BellPeriod::new(7, "13:15", "14:00"),
        BellPeriod::new(8, "14:05", "14:50"),
    ]
}

impl BoardConfig {
    /// 包含集合（TRIM + UPPER）
    pub fn include_set(&self) -> HashSet<String> {
        normalize_set(&self.include)
    }

    /// 排除集合（TRIM + UPPER）
    pub fn exclude_set(&self) -> HashSet<String> {
        normalize_set(&self.exclude)
    }

    pub fn excluded_staff_set(&self) -> HashSet<String> {
        normalize_set(&self.absence_excluded_staff)
    }

    /// 解析当日截止时刻
    pub fn day_end_clock(&self) -> ConfigResult<Option<NaiveTime>> {
        match self.day_end_time.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => parse_clock("day_end_time", value).map(Some),
        }
    }

    /// 校验铃声表与截止时刻
    pub fn validate(&self) -> ConfigResult<()> {
        for bell in &self.bell_schedule {
            bell.parse()?;
        }
        self.day_end_clock()?;
        if self.cancellation_marker.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "cancellation_marker".to_string(),
                value: self.cancellation_marker.clone(),
                message: "停课标记不能为空".to_string(),
            });
        }
        Ok(())
    }

    /// 合并命令行覆写（包含/排除追加，--clear 先清空）
    pub fn apply_overrides(
        &mut self,
        clear: bool,
        include: &[String],
        exclude: &[String],
        day_end_hour: Option<u8>,
    ) {
        if clear {
            self.include.clear();
            self.exclude.clear();
        }
        self.include
            .extend(include.iter().map(|c| c.trim().to_uppercase()).filter(|c| !c.is_empty()));
        self.exclude
            .extend(exclude.iter().map(|c| c.trim().to_uppercase()).filter(|c| !c.is_empty()));
        if day_end_hour.is_some() {
            self.day_end_hour = day_end_hour;
        }
    }
}

fn normalize_set(values: &[String]) -> HashSet<String> {
    values
        .iter()
        .map(|v| v.trim().to_uppercase())
        .filter(|v| !v.is_empty())
        .collect()
}

fn parse_clock(key: &str, value: &str) -> ConfigResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value.trim(), "%H:%M:%S"))
        .map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            message: e.to_string(),
        })
}
