// ==========================================
// 代课公告系统 - 过滤阶段
// ==========================================
// 职责: 丢弃无法定位课时的记录 / 班级包含排除 / 当日截止裁剪
// 规则: 包含集合非空时只看包含集合，排除集合不参与判断
// 规则: 截止裁剪只缩短区间，起点晚于截止课时则丢弃
// 红线: 幂等，filter(filter(x)) == filter(x)
// ==========================================

use crate::config::board_config::BoardConfig;
use crate::config::error::ConfigResult;
use crate::domain::entry::BoardEntry;
use crate::engine::error::{ResolutionError, ResolutionResult};
use crate::engine::period_calculator::BellSchedule;
use std::collections::HashSet;
use tracing::{debug, warn};

// ==========================================
// FilterStage - 过滤配置快照
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterStage {
    include: HashSet<String>,
    exclude: HashSet<String>,
    cutoff: Option<u8>,
}

impl FilterStage {
    pub fn new(include: HashSet<String>, exclude: HashSet<String>, cutoff: Option<u8>) -> Self {
        Self {
            include: normalize(include),
            exclude: normalize(exclude),
            cutoff,
        }
    }

    /// 从配置构建
    ///
    /// # 截止课时
    /// - day_end_hour 优先
    /// - 否则 day_end_time 换算为最后一节在该时刻前开始的课时
    pub fn from_config(config: &BoardConfig, schedule: &BellSchedule) -> ConfigResult<Self> {
        let cutoff = match config.day_end_hour {
            Some(hour) => Some(hour),
            None => config
                .day_end_clock()?
                .and_then(|clock| schedule.last_period_starting_before(clock)),
        };

        Ok(Self::new(config.include_set(), config.exclude_set(), cutoff))
    }

    pub fn cutoff(&self) -> Option<u8> {
        self.cutoff
    }

    /// 丢弃课时无法定位的记录（记 warn）
    pub fn place<T>(&self, rows: Vec<ResolutionResult<T>>) -> Vec<T> {
        rows.into_iter()
            .filter_map(|row| match row {
                Ok(entry) => Some(entry),
                Err(ResolutionError::UnresolvedPeriod {
                    event_id,
                    period_id,
                    from,
                    to,
                }) => {
                    warn!(
                        event_id = %event_id,
                        period_id = ?period_id,
                        from = ?from,
                        to = ?to,
                        "课时无法定位，丢弃记录"
                    );
                    None
                }
                Err(e) => {
                    warn!(error = %e, "记录无法解析，丢弃");
                    None
                }
            })
            .collect()
    }

    /// 班级过滤 + 截止裁剪
    pub fn apply<T: BoardEntry>(&self, entries: Vec<T>) -> Vec<T> {
        let before = entries.len();

        let filtered: Vec<T> = entries
            .into_iter()
            .filter(|entry| self.class_allowed(entry))
            .filter_map(|entry| self.clamp(entry))
            .collect();

        debug!(
            before = before,
            after = filtered.len(),
            cutoff = ?self.cutoff,
            "过滤阶段完成"
        );
        filtered
    }

    /// 班级规则
    ///
    /// # 规则
    /// 1. 非学生版条目（无班级键）不参与班级过滤
    /// 2. 包含集合非空 → 仅保留集合内班级
    /// 3. 否则丢弃排除集合内班级
    pub fn class_allowed<T: BoardEntry>(&self, entry: &T) -> bool {
        let class = match entry.class_key() {
            Some(class) => class.trim().to_uppercase(),
            None => return true,
        };

        if !self.include.is_empty() {
            return self.include.contains(&class);
        }
        !self.exclude.contains(&class)
    }

    fn clamp<T: BoardEntry>(&self, entry: T) -> Option<T> {
        let cutoff = match self.cutoff {
            Some(cutoff) => cutoff,
            None => return Some(entry),
        };

        // 裁剪后为空 → 丢弃
        let clamped = entry.period().clamp_end(cutoff)?;
        if &clamped == entry.period() {
            Some(entry)
        } else {
            Some(entry.with_period(clamped))
        }
    }
}

fn normalize(values: HashSet<String>) -> HashSet<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_uppercase())
        .filter(|v| !v.is_empty())
        .collect()
}
