// ==========================================
// 测试文档构建器 - 用于集成测试
// ==========================================

#![allow(dead_code)]

use suplovani::importer::document::*;

fn s(value: &str) -> Option<String> {
    Some(value.to_string())
}

// ==========================================
// SubstitutionDocument 构建器
// ==========================================

pub struct DocumentBuilder {
    doc: SubstitutionDocument,
}

impl DocumentBuilder {
    /// 空文档（无课时表）
    pub fn empty() -> Self {
        Self {
            doc: SubstitutionDocument::default(),
        }
    }

    /// 标准文档: 日期 2025-02-25，课时 P1..P8，班级 3A/4B，分组 3A/sem1
    pub fn new() -> Self {
        let mut builder = Self::empty().date("2025-02-25T00:00:00");
        for hour in 1..=8u8 {
            let h = hour.to_string();
            builder = builder.period(&format!("P{}", hour), &h, &h, &h);
        }
        builder
            .class("C3A", "3A")
            .class("C4B", "4B")
            .group("G3A1", "C3A", "sem1")
            .group("G3A2", "C3A", "sem2")
            .teacher("T1", "Jana", "Nová", "NOV")
            .teacher("T2", "Petr", "Malý", "MAL")
            .teacher("T3", "Karel", "Kopecký", "KOP")
            .subject("S1", "MAT")
            .subject("S2", "FYZ")
            .subject("S3", "ANJ")
            .room("R1", "101")
            .room("R2", "LAB")
    }

    pub fn date(mut self, date: &str) -> Self {
        self.doc.calendar = Some(CalendarRow { date: s(date) });
        self
    }

    pub fn period(mut self, id: &str, name: &str, from: &str, to: &str) -> Self {
        self.doc.periods.push(PeriodRow {
            period_id: s(id),
            name: s(name),
            hour_from: s(from),
            hour_to: s(to),
        });
        self
    }

    pub fn class(mut self, id: &str, name: &str) -> Self {
        self.doc.classes.push(ClassRow {
            group_id: s(id),
            name: s(name),
        });
        self
    }

    pub fn group(mut self, id: &str, parent: &str, name: &str) -> Self {
        self.doc.groups.push(GroupRow {
            group_id: s(id),
            parent_id: s(parent),
            name: s(name),
        });
        self
    }

    pub fn teacher(mut self, id: &str, first: &str, last: &str, abbreviation: &str) -> Self {
        self.doc.teachers.push(TeacherRow {
            person_id: s(id),
            first_name: s(first),
            last_name: s(last),
            abbreviation: s(abbreviation),
        });
        self
    }

    pub fn subject(mut self, id: &str, abbreviation: &str) -> Self {
        self.doc.subjects.push(SubjectRow {
            subject_id: s(id),
            abbreviation: s(abbreviation),
        });
        self
    }

    pub fn room(mut self, id: &str, code: &str) -> Self {
        self.doc.rooms.push(RoomRow {
            room_id: s(id),
            code: s(code),
        });
        self
    }

    pub fn absence_reason(mut self, id: &str, name: &str) -> Self {
        self.doc.absence_reasons.push(AbsenceReasonRow {
            reason_id: s(id),
            name: s(name),
        });
        self
    }

    /// 事件关联（同时写入学生版与教师版关联表）
    pub fn event(mut self, event_id: &str, group_id: &str, rooms: &[&str], teachers: &[&str]) -> Self {
        let group = EventGroupRow {
            event_id: s(event_id),
            group_id: s(group_id),
        };
        self.doc.student_event_groups.push(group.clone());
        self.doc.teacher_event_groups.push(group);

        for room in rooms {
            let row = EventRoomRow {
                event_id: s(event_id),
                room_id: s(room),
            };
            self.doc.student_event_rooms.push(row.clone());
            self.doc.teacher_event_rooms.push(row);
        }
        for teacher in teachers {
            self.doc.student_event_persons.push(EventPersonRow {
                event_id: s(event_id),
                person_id: s(teacher),
            });
        }
        self
    }

    pub fn student_row(mut self, row: StudentSubstitutionRow) -> Self {
        self.doc.student_substitutions.push(row);
        self
    }

    pub fn teacher_row(mut self, row: TeacherSubstitutionRow) -> Self {
        self.doc.teacher_substitutions.push(row);
        self
    }

    /// 缺勤窗口 + 缺勤教师
    pub fn absence(mut self, event_id: &str, reason_id: &str, from: &str, to: &str, teacher_id: &str) -> Self {
        self.doc.absence_windows.push(AbsenceWindowRow {
            event_id: s(event_id),
            reason_id: s(reason_id),
            from: s(from),
            to: s(to),
        });
        self.doc.absence_teachers.push(EventPersonRow {
            event_id: s(event_id),
            person_id: s(teacher_id),
        });
        self
    }

    pub fn build(self) -> SubstitutionDocument {
        self.doc
    }
}

// ==========================================
// 代课行构建
// ==========================================

/// 学生版代课行（按课时 ID）
pub fn student_row(event_id: &str, period_id: &str, subject_id: &str, resolution: &str, note: &str) -> StudentSubstitutionRow {
    StudentSubstitutionRow {
        event_id: s(event_id),
        period_id: s(period_id),
        subject_id: s(subject_id),
        resolution: s(resolution),
        note: s(note),
        time_from: None,
        time_to: None,
    }
}

/// 学生版代课行（带显式时间）
pub fn timed_student_row(
    event_id: &str,
    period_id: &str,
    subject_id: &str,
    resolution: &str,
    from: &str,
    to: &str,
) -> StudentSubstitutionRow {
    StudentSubstitutionRow {
        time_from: s(from),
        time_to: s(to),
        ..student_row(event_id, period_id, subject_id, resolution, "")
    }
}

/// 教师版代课行
pub fn teacher_row(person_id: &str, event_id: &str, period_id: &str, subject_id: &str, resolution: &str) -> TeacherSubstitutionRow {
    TeacherSubstitutionRow {
        person_id: s(person_id),
        event_id: s(event_id),
        period_id: s(period_id),
        subject_id: s(subject_id),
        resolution: s(resolution),
        note: None,
        time_from: None,
        time_to: None,
    }
}
