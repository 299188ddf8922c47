// ==========================================
// 代课公告系统 - 合并阶段（仅学生版）
// ==========================================
// 职责: 同一 (班级, 课时) 内，全班停课与分组代课对账
// 规则:
//   1. 存在非停课条目 → 只输出这些条目，同课时所有停课被隐藏
//   2. 第 1 条生效且存在全班停课 → 空备注改写为 "za <本条科目>"
//   3. 无非停课条目但有全班停课 → 只输出最后一条全班停课
//   4. 其余（只有分组停课）→ 原样输出
// 注意: 隐藏只按 (班级, 课时) 判断，不区分分组，
//       即使没有全班停课，同课时分组停课也会被隐藏（保持现有行为）
// ==========================================

use crate::domain::entry::ResolvedEntry;
use crate::domain::types::PeriodSpan;
use std::collections::HashMap;
use tracing::debug;

pub struct MergeStage {
    cancellation_marker: String,
    note_prefix: String,
}

impl MergeStage {
    pub fn new(cancellation_marker: &str, note_prefix: &str) -> Self {
        Self {
            cancellation_marker: cancellation_marker.trim().to_string(),
            note_prefix: note_prefix.trim().to_string(),
        }
    }

    /// 执行合并
    ///
    /// # 返回
    /// 按 (班级, 课时) 首次出现顺序排列的合并结果；组内保持输入顺序
    pub fn apply(&self, entries: Vec<ResolvedEntry>) -> Vec<ResolvedEntry> {
        let before = entries.len();
        let mut merged = Vec::with_capacity(before);

        for group in group_by_slot(entries) {
            merged.extend(self.merge_slot(group));
        }

        debug!(before = before, after = merged.len(), "合并阶段完成");
        merged
    }

    fn merge_slot(&self, slot: Vec<ResolvedEntry>) -> Vec<ResolvedEntry> {
        let marker = self.cancellation_marker.as_str();
        let has_general = slot.iter().any(|e| e.is_general_cancellation(marker));

        let substitutions: Vec<&ResolvedEntry> = slot
            .iter()
            .filter(|e| !e.is_cancellation(marker))
            .collect();

        if !substitutions.is_empty() {
            return substitutions
                .into_iter()
                .map(|entry| {
                    let subject = entry.subject.trim();
                    if has_general && entry.note.trim().is_empty() && !subject.is_empty() {
                        entry.with_note(format!("{} {}", self.note_prefix, subject))
                    } else {
                        entry.clone()
                    }
                })
                .collect();
        }

        if has_general {
            // 多条全班停课以最后一条为准
            return slot
                .into_iter()
                .rev()
                .find(|e| e.is_general_cancellation(marker))
                .into_iter()
                .collect();
        }

        slot
    }
}

/// 按 (班级, 课时) 分组，保持首次出现顺序
fn group_by_slot(entries: Vec<ResolvedEntry>) -> Vec<Vec<ResolvedEntry>> {
    let mut positions: HashMap<(String, PeriodSpan), usize> = HashMap::new();
    let mut groups: Vec<Vec<ResolvedEntry>> = Vec::new();

    for entry in entries {
        let key = (entry.class_name.clone(), entry.period.clone());
        match positions.get(&key) {
            Some(&idx) => groups[idx].push(entry),
            None => {
                positions.insert(key, groups.len());
                groups.push(vec![entry]);
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(class: &str, period: u8, group: &str, resolution: &str, subject: &str, note: &str) -> ResolvedEntry {
        ResolvedEntry {
            class_name: class.to_string(),
            group_name: group.to_string(),
            period: PeriodSpan::single(period),
            subject: subject.to_string(),
            room: String::new(),
            teachers: Vec::new(),
            resolution: resolution.to_string(),
            note: note.to_string(),
        }
    }

    fn stage() -> MergeStage {
        MergeStage::new("odpadá", "za")
    }

    #[test]
    fn test_cancellation_suppressed_by_substitution() {
        let out = stage().apply(vec![
            entry("3A", 5, "", "odpadá", "FYZ", ""),
            entry("3A", 5, "sem1", "supluje", "MAT", ""),
        ]);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].group_name, "sem1");
        assert_eq!(out[0].note, "za MAT");
    }

    #[test]
    fn test_existing_note_kept() {
        let out = stage().apply(vec![
            entry("3A", 5, "", "odpadá", "FYZ", ""),
            entry("3A", 5, "sem1", "supluje", "MAT", "přesun z 2. hodiny"),
        ]);
        assert_eq!(out[0].note, "přesun z 2. hodiny");
    }

    #[test]
    fn test_lone_cancellation_kept() {
        let out = stage().apply(vec![entry("3A", 5, "", "odpadá", "FYZ", "")]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].resolution, "odpadá");
        assert_eq!(out[0].note, "");
    }

    #[test]
    fn test_duplicate_cancellations_collapse_to_last() {
        let out = stage().apply(vec![
            entry("3A", 5, "", "odpadá", "FYZ", "první"),
            entry("3A", 5, "", "odpadá", "CHE", "druhá"),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].note, "druhá");
    }

    #[test]
    fn test_subgroup_cancellation_also_hidden() {
        let out = stage().apply(vec![
            entry("3A", 5, "", "odpadá", "FYZ", ""),
            entry("3A", 5, "sem2", "odpadá", "ANJ", ""),
            entry("3A", 5, "sem1", "supluje", "MAT", ""),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].group_name, "sem1");
    }

    #[test]
    fn test_subgroup_cancellation_hidden_without_general() {
        let out = stage().apply(vec![
            entry("3A", 5, "sem2", "odpadá", "ANJ", ""),
            entry("3A", 5, "sem1", "supluje", "MAT", ""),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].group_name, "sem1");
        // 没有全班停课 → 备注不改写
        assert_eq!(out[0].note, "");
    }

    #[test]
    fn test_general_wins_over_subgroup_cancellations() {
        let out = stage().apply(vec![
            entry("3A", 5, "sem1", "odpadá", "MAT", ""),
            entry("3A", 5, "", "odpadá", "FYZ", "celá třída"),
            entry("3A", 5, "sem2", "odpadá", "ANJ", ""),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].group_name, "");
        assert_eq!(out[0].note, "celá třída");
    }

    #[test]
    fn test_only_subgroup_cancellations_kept() {
        let input = vec![
            entry("3A", 5, "sem1", "odpadá", "MAT", ""),
            entry("3A", 5, "sem2", "odpadá", "ANJ", ""),
        ];
        assert_eq!(stage().apply(input.clone()), input);
    }

    #[test]
    fn test_no_cancellation_is_noop() {
        let input = vec![
            entry("3A", 5, "sem2", "spojí", "ANJ", ""),
            entry("3A", 5, "sem1", "supluje", "MAT", ""),
            entry("4B", 2, "", "supluje", "CJL", ""),
        ];
        assert_eq!(stage().apply(input.clone()), input);
    }

    #[test]
    fn test_slots_keep_first_seen_order() {
        let out = stage().apply(vec![
            entry("4B", 2, "", "supluje", "CJL", ""),
            entry("3A", 5, "", "odpadá", "FYZ", ""),
            entry("4B", 2, "sem1", "supluje", "MAT", ""),
        ]);
        let classes: Vec<&str> = out.iter().map(|e| e.class_name.as_str()).collect();
        assert_eq!(classes, vec!["4B", "4B", "3A"]);
    }
}
