// ==========================================
// 代课公告系统 - 记录解析集成测试
// ==========================================
// 覆盖: 参照解析、课时优先级、缺失参照占位、教师版
// ==========================================

#[path = "helpers/document_builder.rs"]
mod document_builder;

use document_builder::{student_row, teacher_row, timed_student_row, DocumentBuilder};
use std::sync::Arc;
use suplovani::config::BoardConfig;
use suplovani::domain::{FlowKind, PeriodSpan};
use suplovani::engine::{BoardOrchestrator, BoardResult, ReferenceTables};
use suplovani::importer::SubstitutionDocument;

fn process(doc: &SubstitutionDocument) -> BoardResult {
    suplovani::logging::init_test();
    BoardOrchestrator::new(Arc::new(BoardConfig::default()))
        .process_document(doc)
        .expect("文档处理失败")
}

// ==========================================
// 场景 A: 单行全班停课
// ==========================================
#[test]
fn test_single_whole_class_cancellation() {
    let doc = DocumentBuilder::new()
        .event("E1", "C3A", &["R1"], &["T1"])
        .student_row(student_row("E1", "P5", "S1", "odpadá", ""))
        .build();

    let result = process(&doc);
    assert_eq!(result.flow, FlowKind::Students);
    assert_eq!(result.entries.len(), 1);

    let entry = &result.entries[0];
    assert_eq!(entry.class_name, "3A");
    assert_eq!(entry.group_name, "");
    assert_eq!(entry.period, PeriodSpan::single(5));
    assert_eq!(entry.resolution, "odpadá");
    assert_eq!(entry.note, "");
}

// ==========================================
// 场景 E: 教室 ID 缺失
// ==========================================
#[test]
fn test_missing_room_resolves_to_empty() {
    let doc = DocumentBuilder::new()
        .event("E1", "G3A1", &["R404"], &["T1"])
        .student_row(student_row("E1", "P2", "S1", "supluje", ""))
        .build();

    let result = process(&doc);
    assert_eq!(result.entries.len(), 1);
    assert_eq!(result.entries[0].room, "");
    assert_eq!(result.entries[0].group_name, "sem1");
    assert_eq!(result.entries[0].teacher_names(), "Jana Nová");
}

#[test]
fn test_unknown_room_skipped_in_joined_rooms() {
    let doc = DocumentBuilder::new()
        .event("E1", "C4B", &["R2", "R404", "R1"], &[])
        .student_row(student_row("E1", "P1", "S1", "supluje", ""))
        .build();

    let result = process(&doc);
    assert_eq!(result.entries[0].room, "LAB, 101");
}

#[test]
fn test_rooms_and_teachers_keep_association_order() {
    let doc = DocumentBuilder::new()
        .event("E1", "C4B", &["R2", "R1"], &["T2", "T1"])
        .event("E2", "C4B", &[], &[])
        .student_row(student_row("E1", "P1", "S1", "supluje", ""))
        .student_row(student_row("E2", "P2", "S2", "supluje", ""))
        .build();

    let result = process(&doc);
    assert_eq!(result.entries.len(), 2);

    assert_eq!(result.entries[0].room, "LAB, 101");
    assert_eq!(result.entries[0].teacher_abbreviations(), "MAL, NOV");

    // 零教师/零教室仍然输出
    assert_eq!(result.entries[1].room, "");
    assert!(result.entries[1].teachers.is_empty());
}

#[test]
fn test_explicit_time_overrides_period_id() {
    let doc = DocumentBuilder::new()
        .event("E1", "C3A", &[], &[])
        .student_row(timed_student_row(
            "E1",
            "P5",
            "S1",
            "supluje",
            "2025-02-25T09:35:00",
            "2025-02-25T10:20:00",
        ))
        .build();

    let result = process(&doc);
    assert_eq!(result.entries[0].period, PeriodSpan::single(3));
}

#[test]
fn test_time_range_spans_multiple_periods() {
    let doc = DocumentBuilder::new()
        .event("E1", "C3A", &[], &[])
        .student_row(timed_student_row(
            "E1",
            "P5",
            "S1",
            "supluje",
            "2025-02-25T11:35:00+01:00",
            "2025-02-25T14:00:00+01:00",
        ))
        .build();

    let result = process(&doc);
    assert_eq!(result.entries[0].period, PeriodSpan::range(5, 7));
    assert_eq!(result.entries[0].period.to_string(), "5-7");
}

#[test]
fn test_unplaceable_row_dropped_others_kept() {
    let doc = DocumentBuilder::new()
        .event("E1", "C3A", &[], &[])
        .event("E2", "C3A", &[], &[])
        .student_row(student_row("E1", "P404", "S1", "supluje", ""))
        .student_row(student_row("E2", "P4", "S1", "supluje", ""))
        .build();

    let result = process(&doc);
    assert_eq!(result.entries.len(), 1);
    assert_eq!(result.entries[0].period, PeriodSpan::single(4));
}

#[test]
fn test_multi_hour_period_row() {
    let doc = DocumentBuilder::new()
        .period("P24", "2", "2", "4")
        .event("E1", "C4B", &[], &[])
        .student_row(student_row("E1", "P24", "S2", "supluje", ""))
        .build();

    let result = process(&doc);
    assert_eq!(result.entries[0].period, PeriodSpan::range(2, 4));
}

#[test]
fn test_periods_within_reference_bounds() {
    let doc = DocumentBuilder::new()
        .event("E1", "C3A", &[], &[])
        .event("E2", "G3A1", &[], &[])
        .event("E3", "C4B", &[], &[])
        .student_row(student_row("E1", "P1", "S1", "odpadá", ""))
        .student_row(timed_student_row("E2", "P3", "S2", "supluje", "08:45", "10:20"))
        .student_row(timed_student_row("E3", "P8", "S3", "supluje", "14:05", "14:50"))
        .build();

    let tables = ReferenceTables::build(&doc, FlowKind::Students);
    let (low, high) = tables.period_bounds().expect("课时表为空");

    let result = process(&doc);
    assert_eq!(result.entries.len(), 3);
    for entry in result.entries.iter().chain(result.unmerged.iter()) {
        let start = entry.period.start().expect("数字课时");
        let end = entry.period.end().expect("数字课时");
        assert!(low <= start && end <= high, "课时越界: {}", entry.period);
    }
}

#[test]
fn test_group_named_like_class_is_whole_class() {
    let doc = DocumentBuilder::new()
        .group("G3A0", "C3A", "3A")
        .event("E1", "G3A0", &[], &[])
        .student_row(student_row("E1", "P1", "S1", "supluje", ""))
        .build();

    let result = process(&doc);
    assert_eq!(result.entries[0].class_name, "3A");
    assert_eq!(result.entries[0].group_name, "");
}

// ==========================================
// 教师版
// ==========================================
#[test]
fn test_teacher_flow_entries() {
    let doc = DocumentBuilder::new()
        .event("E1", "G3A1", &["R1", "R2"], &[])
        .event("E2", "C4B", &[], &[])
        .teacher_row(teacher_row("T1", "E1", "P3", "S1", "supluje"))
        .teacher_row(teacher_row("T2", "E2", "P1", "S2", "supluje"))
        .teacher_row(teacher_row("T1", "E2", "P1", "S2", "spojí"))
        .build();

    let result = process(&doc);
    assert_eq!(result.flow, FlowKind::Teachers);
    assert!(result.entries.is_empty());
    assert_eq!(result.teacher_entries.len(), 3);

    // 教师版姓名为 "姓 名"，按教师再按课时排序
    let names: Vec<(&str, String)> = result
        .teacher_entries
        .iter()
        .map(|e| (e.teacher.name.as_str(), e.period.to_string()))
        .collect();
    assert_eq!(
        names,
        vec![
            ("Malý Petr", "1".to_string()),
            ("Nová Jana", "1".to_string()),
            ("Nová Jana", "3".to_string()),
        ]
    );

    let sem = &result.teacher_entries[2];
    assert_eq!(sem.class_label, "3A (sem1)");
    assert_eq!(sem.room, "101, LAB");

    let groups = result.teacher_groups();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[1].1.len(), 2);
}
