// ==========================================
// 代课公告系统 - 事件索引
// ==========================================
// 职责: 事件 ID → {分组, 教室列表, 教师列表}
// 规则: 按流向选择关联表结构；列表保持原始顺序，允许重复
// ==========================================

use crate::domain::reference::EventAssociation;
use crate::domain::types::FlowKind;
use crate::engine::error::{ResolutionError, ResolutionResult};
use crate::importer::document::{EventGroupRow, EventPersonRow, EventRoomRow, SubstitutionDocument};
use crate::importer::field_parser::FieldParser;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct EventIndex {
    events: HashMap<String, EventAssociation>,
    absence_persons: HashMap<String, Vec<String>>,
}

impl EventIndex {
    /// 从文档关联表构建事件索引
    ///
    /// # 关联表选择
    /// - 学生版: UdalostStudijniSkupina / UdalostMistnost / UdalostOsoba
    /// - 教师版: UdalostStudijniSkupiny / KalendarovaUdalostMistnost（教师在代课行上）
    pub fn build(document: &SubstitutionDocument, flow: FlowKind) -> Self {
        let (group_rows, room_rows, person_rows): (&[EventGroupRow], &[EventRoomRow], &[EventPersonRow]) =
            match flow {
                FlowKind::Students => (
                    document.student_event_groups.as_slice(),
                    document.student_event_rooms.as_slice(),
                    document.student_event_persons.as_slice(),
                ),
                FlowKind::Teachers => (
                    document.teacher_event_groups.as_slice(),
                    document.teacher_event_rooms.as_slice(),
                    &[],
                ),
            };

        let parser = FieldParser;
        let mut index = EventIndex::default();

        // 分组：同一事件后出现的行覆盖先出现的行
        for row in group_rows {
            if let (Some(event_id), Some(group_id)) = (
                parser.normalize_null(row.event_id.as_ref()),
                parser.normalize_null(row.group_id.as_ref()),
            ) {
                index.entry(&event_id).group_id = Some(group_id);
            }
        }

        for row in room_rows {
            if let (Some(event_id), Some(room_id)) = (
                parser.normalize_null(row.event_id.as_ref()),
                parser.normalize_null(row.room_id.as_ref()),
            ) {
                index.entry(&event_id).room_ids.push(room_id);
            }
        }

        for row in person_rows {
            if let (Some(event_id), Some(person_id)) = (
                parser.normalize_null(row.event_id.as_ref()),
                parser.normalize_null(row.person_id.as_ref()),
            ) {
                index.entry(&event_id).teacher_ids.push(person_id);
            }
        }

        // 缺勤事件 → 教师（两种流向共用 AbsenceUcitele）
        for row in &document.absence_teachers {
            if let (Some(event_id), Some(person_id)) = (
                parser.normalize_null(row.event_id.as_ref()),
                parser.normalize_null(row.person_id.as_ref()),
            ) {
                index.absence_persons.entry(event_id).or_default().push(person_id);
            }
        }

        debug!(
            flow = %flow,
            events = index.events.len(),
            absence_events = index.absence_persons.len(),
            "事件索引构建完成"
        );

        index
    }

    fn entry(&mut self, event_id: &str) -> &mut EventAssociation {
        self.events
            .entry(event_id.to_string())
            .or_insert_with(|| EventAssociation::new(event_id))
    }

    pub fn get(&self, event_id: &str) -> ResolutionResult<&EventAssociation> {
        self.events
            .get(event_id)
            .ok_or_else(|| ResolutionError::unresolved("event", event_id))
    }

    /// 缺勤事件关联的教师 ID（按原始顺序）
    pub fn absence_teacher_ids(&self, event_id: &str) -> &[String] {
        self.absence_persons
            .get(event_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
