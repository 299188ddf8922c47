// ==========================================
// 代课公告系统 - 领域类型定义
// ==========================================
// 职责: 文档流向 / 课时区间等基础值类型
// 红线: 课时区间必须有界（单节或闭区间），不允许开放区间
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 文档流向 (Flow Kind)
// ==========================================
// 由文档中存在的顶层记录类型决定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlowKind {
    Students, // 学生版（VypisSuplovaniZaka）
    Teachers, // 教师版（VypisSuplovani）
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowKind::Students => write!(f, "STUDENTS"),
            FlowKind::Teachers => write!(f, "TEACHERS"),
        }
    }
}

// ==========================================
// 课时区间 (Period Span)
// ==========================================
// Range: 闭区间 [start, end]，start == end 表示单节
// Label: 非数字课时名称（如 "0." / "odpol."），不参与截止裁剪
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PeriodSpan {
    Range { start: u8, end: u8 },
    Label(String),
}

impl PeriodSpan {
    /// 单节课时
    pub fn single(period: u8) -> Self {
        PeriodSpan::Range {
            start: period,
            end: period,
        }
    }

    /// 课时区间（自动纠正颠倒的端点）
    pub fn range(start: u8, end: u8) -> Self {
        PeriodSpan::Range {
            start: start.min(end),
            end: start.max(end),
        }
    }

    /// 从课时名称解析（"5" / "5-7" / 其他名称）
    pub fn parse(label: &str) -> Self {
        let trimmed = label.trim();

        if let Ok(period) = trimmed.parse::<u8>() {
            return Self::single(period);
        }

        if let Some((from, to)) = trimmed.split_once('-') {
            if let (Ok(start), Ok(end)) = (from.trim().parse::<u8>(), to.trim().parse::<u8>()) {
                return Self::range(start, end);
            }
        }

        PeriodSpan::Label(trimmed.to_string())
    }

    pub fn start(&self) -> Option<u8> {
        match self {
            PeriodSpan::Range { start, .. } => Some(*start),
            PeriodSpan::Label(_) => None,
        }
    }

    pub fn end(&self) -> Option<u8> {
        match self {
            PeriodSpan::Range { end, .. } => Some(*end),
            PeriodSpan::Label(_) => None,
        }
    }

    /// 区间包含的课时数（Label 视为 0）
    pub fn len(&self) -> usize {
        match self {
            PeriodSpan::Range { start, end } => usize::from(end.saturating_sub(*start)) + 1,
            PeriodSpan::Label(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 按截止课时裁剪区间终点
    ///
    /// # 返回
    /// - Some(span): 裁剪后的区间（未越界时原样返回）
    /// - None: 起点已晚于截止课时，区间为空
    pub fn clamp_end(&self, cutoff: u8) -> Option<PeriodSpan> {
        match self {
            PeriodSpan::Range { start, end } => {
                if *start > cutoff {
                    None
                } else {
                    Some(PeriodSpan::Range {
                        start: *start,
                        end: (*end).min(cutoff),
                    })
                }
            }
            PeriodSpan::Label(_) => Some(self.clone()),
        }
    }
}

impl fmt::Display for PeriodSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodSpan::Range { start, end } if start == end => write!(f, "{}", start),
            PeriodSpan::Range { start, end } => write!(f, "{}-{}", start, end),
            PeriodSpan::Label(label) => write!(f, "{}", label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_span_display() {
        assert_eq!(PeriodSpan::single(5).to_string(), "5");
        assert_eq!(PeriodSpan::range(5, 7).to_string(), "5-7");
        assert_eq!(PeriodSpan::range(7, 5).to_string(), "5-7");
        assert_eq!(PeriodSpan::Label("odpol.".to_string()).to_string(), "odpol.");
    }

    #[test]
    fn test_period_span_parse() {
        assert_eq!(PeriodSpan::parse(" 3 "), PeriodSpan::single(3));
        assert_eq!(PeriodSpan::parse("2-4"), PeriodSpan::range(2, 4));
        assert_eq!(PeriodSpan::parse("0."), PeriodSpan::Label("0.".to_string()));
    }

    #[test]
    fn test_clamp_end_never_lengthens() {
        let span = PeriodSpan::range(5, 7);
        assert_eq!(span.clamp_end(6), Some(PeriodSpan::range(5, 6)));
        assert_eq!(span.clamp_end(9), Some(span.clone()));
        assert_eq!(span.clamp_end(4), None);
        assert_eq!(span.clamp_end(5), Some(PeriodSpan::single(5)));
    }

    #[test]
    fn test_ordering_numeric_before_label() {
        let mut spans = vec![
            PeriodSpan::Label("x".to_string()),
            PeriodSpan::single(10),
            PeriodSpan::range(2, 3),
            PeriodSpan::single(2),
        ];
        spans.sort();
        assert_eq!(
            spans,
            vec![
                PeriodSpan::single(2),
                PeriodSpan::range(2, 3),
                PeriodSpan::single(10),
                PeriodSpan::Label("x".to_string()),
            ]
        );
    }
}
