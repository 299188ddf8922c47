// ==========================================
// 代课公告系统 - 参照表
// ==========================================
// 职责: 每份文档构建一次 id → 值 的查找表
// 规则: 查找 O(1)；缺失 ID 返回 UnresolvedReference，由调用方替换为占位值
// ==========================================

use crate::domain::reference::{
    AbsenceReasonRef, ClassGroupRef, PeriodRef, RoomRef, SubjectRef, TeacherRef,
};
use crate::domain::types::FlowKind;
use crate::engine::error::{ResolutionError, ResolutionResult};
use crate::importer::document::{SubstitutionDocument, TeacherRow};
use crate::importer::field_parser::FieldParser;
use std::collections::HashMap;
use tracing::{debug, warn};

/// 祖先链最大深度（防止环形父子关系）
const MAX_HIERARCHY_DEPTH: usize = 8;

// ==========================================
// ClassPlacement - 班级/分组解析结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassPlacement {
    pub class_name: String,
    pub group_name: String, // 空 = 全班
}

impl ClassPlacement {
    /// 教师版显示标签: "3A" / "3A (sem1)"
    pub fn label(&self) -> String {
        if self.group_name.is_empty() {
            self.class_name.clone()
        } else if self.class_name.is_empty() {
            self.group_name.clone()
        } else {
            format!("{} ({})", self.class_name, self.group_name)
        }
    }
}

// ==========================================
// ClassHierarchy - 班级层级
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ClassHierarchy {
    nodes: HashMap<String, ClassGroupRef>,
}

impl ClassHierarchy {
    /// 插入节点（同一 ID 首次出现为准）
    pub fn insert(&mut self, node: ClassGroupRef) {
        self.nodes.entry(node.id.clone()).or_insert(node);
    }

    pub fn get(&self, id: &str) -> ResolutionResult<&ClassGroupRef> {
        self.nodes
            .get(id)
            .ok_or_else(|| ResolutionError::unresolved("class_group", id))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// 解析分组 ID → (班级名, 分组名)
    ///
    /// # 规则
    /// 1. 顶层班级 → (班级名, "")
    /// 2. 分组 → 沿父链上溯到顶层班级；分组名与班级名相同视为全班
    /// 3. 父节点缺失 → 班级名为空，保留分组名（记 warn）
    pub fn resolve(&self, group_id: &str) -> ResolutionResult<ClassPlacement> {
        let node = self.get(group_id)?;

        if node.is_top_level() {
            return Ok(ClassPlacement {
                class_name: node.name.clone(),
                group_name: String::new(),
            });
        }

        let class_name = self.root_name(node);
        let group_name = if node.name == class_name {
            String::new()
        } else {
            node.name.clone()
        };

        Ok(ClassPlacement {
            class_name,
            group_name,
        })
    }

    fn root_name(&self, node: &ClassGroupRef) -> String {
        let mut current = node;

        for _ in 0..MAX_HIERARCHY_DEPTH {
            let parent_id = match &current.parent_id {
                None => return current.name.clone(),
                Some(id) => id,
            };

            match self.nodes.get(parent_id) {
                Some(parent) => current = parent,
                None => {
                    warn!(
                        table = "class_group",
                        group_id = %node.id,
                        parent_id = %parent_id,
                        "父班级缺失，班级名置空"
                    );
                    return String::new();
                }
            }
        }

        warn!(group_id = %node.id, "班级层级过深或存在环，班级名置空");
        String::new()
    }
}

// ==========================================
// ReferenceTables - 参照表集合
// ==========================================
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    flow: FlowKind,
    teachers: HashMap<String, TeacherRef>,
    subjects: HashMap<String, SubjectRef>,
    rooms: HashMap<String, RoomRef>,
    periods: HashMap<String, PeriodRef>,
    classes: ClassHierarchy,
    absence_reasons: HashMap<String, AbsenceReasonRef>,
}

impl ReferenceTables {
    /// 从文档构建全部参照表
    ///
    /// # 参数
    /// - document: 已解析文档
    /// - flow: 文档流向（决定教师姓名顺序）
    pub fn build(document: &SubstitutionDocument, flow: FlowKind) -> Self {
        let parser = FieldParser;

        let mut teachers = HashMap::new();
        for row in document.all_teachers() {
            if let Some(teacher) = Self::teacher_from_row(&parser, row, flow) {
                teachers.entry(teacher.id.clone()).or_insert(teacher);
            }
        }

        let subjects = document
            .subjects
            .iter()
            .filter_map(|row| {
                let id = parser.normalize_null(row.subject_id.as_ref())?;
                let abbreviation = parser.normalize_null(row.abbreviation.as_ref())?;
                Some((id.clone(), SubjectRef { id, abbreviation }))
            })
            .collect::<HashMap<_, _>>();

        let rooms = document
            .rooms
            .iter()
            .filter_map(|row| {
                let id = parser.normalize_null(row.room_id.as_ref())?;
                let code = parser.normalize_null(row.code.as_ref())?;
                Some((id.clone(), RoomRef { id, code }))
            })
            .collect::<HashMap<_, _>>();

        let mut periods = HashMap::new();
        for row in &document.periods {
            let id = match parser.normalize_null(row.period_id.as_ref()) {
                Some(id) => id,
                None => continue,
            };
            let start_hour = parser.parse_hour(row.hour_from.as_ref());
            let end_hour = parser.parse_hour(row.hour_to.as_ref());

            // 跨多节课时显示为区间
            let label = match (start_hour, end_hour) {
                (Some(from), Some(to)) if from != to => format!("{}-{}", from, to),
                _ => match parser.normalize_null(row.name.as_ref()) {
                    Some(name) => name,
                    None => match start_hour {
                        Some(hour) => hour.to_string(),
                        None => continue,
                    },
                },
            };

            periods.insert(
                id.clone(),
                PeriodRef {
                    id,
                    label,
                    start_hour,
                    end_hour,
                },
            );
        }

        let mut classes = ClassHierarchy::default();
        for row in &document.classes {
            if let (Some(id), Some(name)) = (
                parser.normalize_null(row.group_id.as_ref()),
                parser.normalize_null(row.name.as_ref()),
            ) {
                classes.insert(ClassGroupRef {
                    id,
                    name,
                    parent_id: None,
                });
            }
        }
        for row in &document.groups {
            if let Some(id) = parser.normalize_null(row.group_id.as_ref()) {
                classes.insert(ClassGroupRef {
                    id,
                    name: parser.clean_text(row.name.as_ref()),
                    parent_id: parser.normalize_null(row.parent_id.as_ref()),
                });
            }
        }

        let absence_reasons = document
            .absence_reasons
            .iter()
            .filter_map(|row| {
                let id = parser.normalize_null(row.reason_id.as_ref())?;
                let name = parser.clean_text(row.name.as_ref());
                Some((id.clone(), AbsenceReasonRef { id, name }))
            })
            .collect::<HashMap<_, _>>();

        debug!(
            flow = %flow,
            teachers = teachers.len(),
            subjects = subjects.len(),
            rooms = rooms.len(),
            periods = periods.len(),
            classes = classes.len(),
            "参照表构建完成"
        );

        Self {
            flow,
            teachers,
            subjects,
            rooms,
            periods,
            classes,
            absence_reasons,
        }
    }

    fn teacher_from_row(parser: &FieldParser, row: &TeacherRow, flow: FlowKind) -> Option<TeacherRef> {
        let id = parser.normalize_null(row.person_id.as_ref())?;
        let first = parser.clean_text(row.first_name.as_ref());
        let last = parser.clean_text(row.last_name.as_ref());

        let parts = match flow {
            FlowKind::Students => [first, last],
            FlowKind::Teachers => [last, first],
        };
        let name = parts
            .iter()
            .filter(|p| !p.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(" ");

        Some(TeacherRef {
            id,
            name,
            abbreviation: parser.clean_text(row.abbreviation.as_ref()),
        })
    }

    pub fn flow(&self) -> FlowKind {
        self.flow
    }

    pub fn teacher(&self, id: &str) -> ResolutionResult<&TeacherRef> {
        self.teachers
            .get(id)
            .ok_or_else(|| ResolutionError::unresolved("teacher", id))
    }

    pub fn subject(&self, id: &str) -> ResolutionResult<&SubjectRef> {
        self.subjects
            .get(id)
            .ok_or_else(|| ResolutionError::unresolved("subject", id))
    }

    pub fn room(&self, id: &str) -> ResolutionResult<&RoomRef> {
        self.rooms
            .get(id)
            .ok_or_else(|| ResolutionError::unresolved("room", id))
    }

    pub fn period(&self, id: &str) -> ResolutionResult<&PeriodRef> {
        self.periods
            .get(id)
            .ok_or_else(|| ResolutionError::unresolved("period", id))
    }

    pub fn absence_reason(&self, id: &str) -> ResolutionResult<&AbsenceReasonRef> {
        self.absence_reasons
            .get(id)
            .ok_or_else(|| ResolutionError::unresolved("absence_reason", id))
    }

    pub fn classes(&self) -> &ClassHierarchy {
        &self.classes
    }

    /// 课时表覆盖的序号范围 (最早起始, 最晚结束)
    pub fn period_bounds(&self) -> Option<(u8, u8)> {
        let starts = self.periods.values().filter_map(|p| p.start_hour.or(p.end_hour));
        let ends = self.periods.values().filter_map(|p| p.end_hour.or(p.start_hour));
        Some((starts.min()?, ends.max()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::document::{ClassRow, GroupRow, PeriodRow, RoomRow};

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    fn sample_document() -> SubstitutionDocument {
        SubstitutionDocument {
            teachers: vec![TeacherRow {
                person_id: s("T1"),
                first_name: s("Jana"),
                last_name: s("Nová"),
                abbreviation: s("NOV"),
            }],
            teachers_secondary: vec![TeacherRow {
                person_id: s("T1"),
                first_name: s("Duplicitní"),
                last_name: s("Záznam"),
                abbreviation: s("DUP"),
            }],
            rooms: vec![
                RoomRow {
                    room_id: s("R1"),
                    code: s("101"),
                },
                RoomRow {
                    room_id: None,
                    code: s("ignored"),
                },
            ],
            periods: vec![
                PeriodRow {
                    period_id: s("P5"),
                    name: s("5"),
                    hour_from: s("5"),
                    hour_to: s("5"),
                },
                PeriodRow {
                    period_id: s("P57"),
                    name: s("5"),
                    hour_from: s("5"),
                    hour_to: s("7"),
                },
            ],
            classes: vec![ClassRow {
                group_id: s("C3A"),
                name: s("3A"),
            }],
            groups: vec![
                GroupRow {
                    group_id: s("G1"),
                    parent_id: s("C3A"),
                    name: s("sem1"),
                },
                GroupRow {
                    group_id: s("G2"),
                    parent_id: s("C3A"),
                    name: s("3A"),
                },
                GroupRow {
                    group_id: s("G3"),
                    parent_id: s("MISSING"),
                    name: s("sem9"),
                },
                GroupRow {
                    group_id: s("G4"),
                    parent_id: s("G1"),
                    name: s("sem1-a"),
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_teacher_name_order_by_flow() {
        let doc = sample_document();

        let students = ReferenceTables::build(&doc, FlowKind::Students);
        assert_eq!(students.teacher("T1").unwrap().name, "Jana Nová");
        assert_eq!(students.teacher("T1").unwrap().abbreviation, "NOV");

        let teachers = ReferenceTables::build(&doc, FlowKind::Teachers);
        assert_eq!(teachers.teacher("T1").unwrap().name, "Nová Jana");
    }

    #[test]
    fn test_missing_id_is_unresolved_reference() {
        let tables = ReferenceTables::build(&sample_document(), FlowKind::Students);
        assert_eq!(
            tables.room("R404"),
            Err(ResolutionError::UnresolvedReference {
                table: "room",
                id: "R404".to_string()
            })
        );
        assert_eq!(tables.room("R1").unwrap().code, "101");
    }

    #[test]
    fn test_multi_hour_period_label() {
        let tables = ReferenceTables::build(&sample_document(), FlowKind::Students);
        assert_eq!(tables.period("P5").unwrap().label, "5");
        assert_eq!(tables.period("P57").unwrap().label, "5-7");
        assert_eq!(tables.period_bounds(), Some((5, 7)));
    }

    #[test]
    fn test_class_hierarchy_resolution() {
        let tables = ReferenceTables::build(&sample_document(), FlowKind::Students);
        let classes = tables.classes();

        let top = classes.resolve("C3A").unwrap();
        assert_eq!(top.class_name, "3A");
        assert_eq!(top.group_name, "");

        let group = classes.resolve("G1").unwrap();
        assert_eq!(group.class_name, "3A");
        assert_eq!(group.group_name, "sem1");
        assert_eq!(group.label(), "3A (sem1)");

        // 分组名与班级名相同 → 全班
        let whole = classes.resolve("G2").unwrap();
        assert_eq!(whole.group_name, "");
        assert_eq!(whole.label(), "3A");

        // 多级分组上溯到顶层班级
        let nested = classes.resolve("G4").unwrap();
        assert_eq!(nested.class_name, "3A");
        assert_eq!(nested.group_name, "sem1-a");

        // 父班级缺失 → 班级名为空
        let orphan = classes.resolve("G3").unwrap();
        assert_eq!(orphan.class_name, "");
        assert_eq!(orphan.group_name, "sem9");

        assert!(classes.resolve("NOPE").is_err());
    }
}
