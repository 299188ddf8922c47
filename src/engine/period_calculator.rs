// ==========================================
// 代课公告系统 - 课时计算器
// ==========================================
// 职责: 课时 ID / 显式时间窗口 → 规范课时区间
// 规则: 显式时间推导结果优先，课时 ID 仅作回退
// 规则: 两者均无法定位 → UnresolvedPeriod（由过滤阶段丢弃）
// ==========================================

use crate::config::board_config::BoardConfig;
use crate::config::error::ConfigResult;
use crate::domain::types::PeriodSpan;
use crate::engine::error::{ResolutionError, ResolutionResult};
use crate::engine::reference_tables::ReferenceTables;
use chrono::NaiveTime;

/// 全天缺勤显示文本
pub const WHOLE_DAY_LABEL: &str = "celý den";

// ==========================================
// BellSchedule - 铃声时刻表
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BellSchedule {
    slots: Vec<(u8, NaiveTime, NaiveTime)>, // 按上课时刻排序
}

impl BellSchedule {
    /// 从配置构建（铃声表非法时返回 InvalidValue）
    pub fn from_config(config: &BoardConfig) -> ConfigResult<Self> {
        let mut slots = config
            .bell_schedule
            .iter()
            .map(|bell| bell.parse())
            .collect::<ConfigResult<Vec<_>>>()?;
        slots.sort_by_key(|(_, start, _)| *start);
        Ok(Self { slots })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// 时间窗口覆盖的课时序号（按时间顺序）
    ///
    /// # 规则
    /// - 区间重叠按半开区间判断: from < 下课 且 to > 上课
    /// - 零长度窗口（from == to）取包含该时刻的课时
    pub fn detect(&self, from: NaiveTime, to: NaiveTime) -> Vec<u8> {
        self.slots
            .iter()
            .filter(|(_, start, end)| {
                if from == to {
                    *start <= from && from < *end
                } else {
                    from < *end && to > *start
                }
            })
            .map(|(period, _, _)| *period)
            .collect()
    }

    /// 时间窗口 → 课时区间（首个到末个命中课时）
    pub fn span_for_window(&self, from: NaiveTime, to: NaiveTime) -> Option<PeriodSpan> {
        let detected = self.detect(from, to);
        let first = *detected.first()?;
        let last = *detected.last()?;
        Some(PeriodSpan::range(first, last))
    }

    /// 截止时刻 → 最后一节在该时刻之前开始的课时
    pub fn last_period_starting_before(&self, cutoff: NaiveTime) -> Option<u8> {
        self.slots
            .iter()
            .filter(|(_, start, _)| *start < cutoff)
            .map(|(period, _, _)| *period)
            .max()
    }

    /// 铃声表覆盖的序号范围
    pub fn bounds(&self) -> Option<(u8, u8)> {
        let first = self.slots.iter().map(|(p, _, _)| *p).min()?;
        let last = self.slots.iter().map(|(p, _, _)| *p).max()?;
        Some((first, last))
    }
}

// ==========================================
// PeriodCalculator - 课时计算器
// ==========================================
pub struct PeriodCalculator<'a> {
    tables: &'a ReferenceTables,
    schedule: &'a BellSchedule,
    whole_day_threshold: usize,
}

impl<'a> PeriodCalculator<'a> {
    pub fn new(tables: &'a ReferenceTables, schedule: &'a BellSchedule, whole_day_threshold: usize) -> Self {
        Self {
            tables,
            schedule,
            whole_day_threshold,
        }
    }

    /// 解析一条记录的课时
    ///
    /// # 参数
    /// - event_id: 事件 ID（仅用于错误信息）
    /// - period_id: 课时 ID（可选）
    /// - from / to: 显式授课时间（可选，需成对出现）
    ///
    /// # 优先级
    /// 1. 显式时间窗口命中铃声表 → 时间推导区间
    /// 2. 课时 ID 命中课时表 → PeriodRef 区间/名称
    /// 3. 否则 UnresolvedPeriod
    pub fn resolve(
        &self,
        event_id: &str,
        period_id: Option<&str>,
        from: Option<NaiveTime>,
        to: Option<NaiveTime>,
    ) -> ResolutionResult<PeriodSpan> {
        if let (Some(from), Some(to)) = (from, to) {
            if let Some(span) = self.schedule.span_for_window(from, to) {
                return Ok(span);
            }
        }

        if let Some(id) = period_id {
            if let Ok(span) = self.from_period_id(id) {
                return Ok(span);
            }
        }

        Err(ResolutionError::UnresolvedPeriod {
            event_id: event_id.to_string(),
            period_id: period_id.map(str::to_string),
            from: from.map(|t| t.format("%H:%M").to_string()),
            to: to.map(|t| t.format("%H:%M").to_string()),
        })
    }

    /// 课时 ID → 区间（有序号时用序号，否则按名称解析）
    pub fn from_period_id(&self, period_id: &str) -> ResolutionResult<PeriodSpan> {
        let period = self.tables.period(period_id)?;
        match (period.start_hour, period.end_hour) {
            (Some(start), Some(end)) => Ok(PeriodSpan::range(start, end)),
            (Some(hour), None) | (None, Some(hour)) => Ok(PeriodSpan::single(hour)),
            (None, None) => Ok(PeriodSpan::parse(&period.label)),
        }
    }

    /// 缺勤窗口 → (课时区间, 显示文本)
    ///
    /// # 规则
    /// - 00:00–00:00 或覆盖课时数 ≥ 阈值 → "celý den"
    /// - 无命中课时 → (None, "")
    pub fn absence_window(&self, from: NaiveTime, to: NaiveTime) -> (Option<PeriodSpan>, String) {
        let detected = self.schedule.detect(from, to);
        let span = match (detected.first(), detected.last()) {
            (Some(first), Some(last)) => Some(PeriodSpan::range(*first, *last)),
            _ => None,
        };

        let midnight = NaiveTime::MIN;
        let whole_day = (from == midnight && to == midnight)
            || (!detected.is_empty()
                && (detected.len() >= self.whole_day_threshold || detected.len() == self.schedule.len()));

        let label = if whole_day {
            WHOLE_DAY_LABEL.to_string()
        } else {
            span.as_ref().map(ToString::to_string).unwrap_or_default()
        };

        (span, label)
    }
}
