// ==========================================
// 代课公告系统 - 排序与分组
// ==========================================
// 职责: 学生版按 (班级, 课时) 排序并按班级分组；教师版按 (教师, 课时)
// 规则: 稳定排序，同键条目保持输入顺序；渲染端只遍历，不再排序
// ==========================================

use crate::domain::entry::{ResolvedEntry, TeacherEntry};

/// 学生版排序键: 班级 → 课时
pub fn sort_entries(entries: &mut [ResolvedEntry]) {
    entries.sort_by(|a, b| {
        a.class_name
            .cmp(&b.class_name)
            .then_with(|| a.period.cmp(&b.period))
    });
}

/// 教师版排序键: 教师姓名 → 课时
pub fn sort_teacher_entries(entries: &mut [TeacherEntry]) {
    entries.sort_by(|a, b| {
        a.teacher
            .name
            .cmp(&b.teacher.name)
            .then_with(|| a.period.cmp(&b.period))
    });
}

/// 按班级分组（输入须已排序）
pub fn group_by_class(entries: &[ResolvedEntry]) -> Vec<(String, Vec<ResolvedEntry>)> {
    group_consecutive(entries, |e| e.class_name.clone())
}

/// 按教师分组（输入须已排序）
pub fn group_by_teacher(entries: &[TeacherEntry]) -> Vec<(String, Vec<TeacherEntry>)> {
    group_consecutive(entries, |e| e.teacher.name.clone())
}

fn group_consecutive<T, F>(entries: &[T], key: F) -> Vec<(String, Vec<T>)>
where
    T: Clone,
    F: Fn(&T) -> String,
{
    let mut groups: Vec<(String, Vec<T>)> = Vec::new();

    for entry in entries {
        let k = key(entry);
        match groups.last_mut() {
            Some((last, items)) if *last == k => items.push(entry.clone()),
            _ => groups.push((k, vec![entry.clone()])),
        }
    }

    groups
}
