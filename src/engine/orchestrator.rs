// ==========================================
// 代课公告系统 - 引擎编排器
// ==========================================
// 用途: 单份文档从参照表构建到合并输出的完整流程
// 规则: 每份文档独立构建参照表/事件索引，文档之间不共享状态
// ==========================================

use crate::config::{BoardConfig, BoardConfigReader};
use crate::domain::entry::{AbsenceEntry, ResolvedEntry, TeacherEntry};
use crate::domain::types::FlowKind;
use crate::engine::absence_collector::AbsenceCollector;
use crate::engine::event_index::EventIndex;
use crate::engine::filter_stage::FilterStage;
use crate::engine::merge_stage::MergeStage;
use crate::engine::ordering::{
    group_by_class, group_by_teacher, sort_entries, sort_teacher_entries,
};
use crate::engine::period_calculator::{BellSchedule, PeriodCalculator};
use crate::engine::record_resolver::RecordResolver;
use crate::engine::reference_tables::ReferenceTables;
use crate::importer::{load_document, FieldParser, ImportError, ImportResult, RecordReader, SubstitutionDocument};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

// ==========================================
// BoardResult - 单日公告结果
// ==========================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardResult {
    pub flow: FlowKind,
    pub date: Option<NaiveDate>,

    // 学生版: 过滤+排序后、合并前（CSV 导出使用）
    pub unmerged: Vec<ResolvedEntry>,

    // 学生版: 合并后（公告显示使用）
    pub entries: Vec<ResolvedEntry>,

    // 教师版
    pub teacher_entries: Vec<TeacherEntry>,

    pub absences: Vec<AbsenceEntry>,
}

impl BoardResult {
    pub fn class_groups(&self) -> Vec<(String, Vec<ResolvedEntry>)> {
        group_by_class(&self.entries)
    }

    pub fn teacher_groups(&self) -> Vec<(String, Vec<TeacherEntry>)> {
        group_by_teacher(&self.teacher_entries)
    }
}

// ==========================================
// BoardOrchestrator - 引擎编排器
// ==========================================

pub struct BoardOrchestrator<C>
where
    C: BoardConfigReader,
{
    config: Arc<C>,
    reader: RecordReader,
}

impl<C> BoardOrchestrator<C>
where
    C: BoardConfigReader,
{
    /// 创建新的编排器实例
    ///
    /// # 参数
    /// - config: 配置读取器（每份文档读取一次快照）
    pub fn new(config: Arc<C>) -> Self {
        Self {
            config,
            reader: RecordReader::new(),
        }
    }

    /// 处理单份已解析文档
    ///
    /// # 返回
    /// - Ok(BoardResult): 排序后的代课条目与缺勤条目
    /// - Err(MalformedDocument): 缺少顶层代课记录
    /// - Err(Config): 铃声表或截止时刻配置非法
    pub fn process_document(&self, document: &SubstitutionDocument) -> ImportResult<BoardResult> {
        let config: BoardConfig = self.config.board_config();
        let flow = document.detect_flow()?;
        let date = self.document_date(document);

        info!(
            flow = %flow,
            date = ?date,
            student_rows = document.student_substitutions.len(),
            teacher_rows = document.teacher_substitutions.len(),
            "开始处理代课文档"
        );

        // ==========================================
        // 步骤1: 参照表 + 事件索引
        // ==========================================
        let tables = ReferenceTables::build(document, flow);
        let events = EventIndex::build(document, flow);
        let schedule = BellSchedule::from_config(&config)?;
        let filter = FilterStage::from_config(&config, &schedule)?;

        debug!(events = events.len(), cutoff = ?filter.cutoff(), "步骤1: 参照数据就绪");

        // ==========================================
        // 步骤2: 逐行解析 → 过滤 → 排序 (→ 合并)
        // ==========================================
        let records = self.reader.read_substitutions(document, flow);
        let resolver = RecordResolver::new(
            &tables,
            &events,
            PeriodCalculator::new(&tables, &schedule, config.whole_day_threshold),
        );

        let mut unmerged = Vec::new();
        let mut entries = Vec::new();
        let mut teacher_entries = Vec::new();

        match flow {
            FlowKind::Students => {
                let rows: Vec<_> = records.iter().map(|r| resolver.resolve_student(r)).collect();
                unmerged = filter.apply(filter.place(rows));
                sort_entries(&mut unmerged);

                let merge = MergeStage::new(&config.cancellation_marker, &config.note_prefix);
                entries = merge.apply(unmerged.clone());
                sort_entries(&mut entries);
            }
            FlowKind::Teachers => {
                let rows: Vec<_> = records.iter().map(|r| resolver.resolve_teacher(r)).collect();
                teacher_entries = filter.apply(filter.place(rows));
                sort_teacher_entries(&mut teacher_entries);
            }
        }

        debug!(
            records = records.len(),
            unmerged = unmerged.len(),
            entries = entries.len(),
            teacher_entries = teacher_entries.len(),
            "步骤2: 代课条目完成"
        );

        // ==========================================
        // 步骤3: 缺勤
        // ==========================================
        let collector = AbsenceCollector::new(
            &tables,
            &events,
            PeriodCalculator::new(&tables, &schedule, config.whole_day_threshold),
            config.excluded_staff_set(),
        );
        let absences = collector.collect(&self.reader.read_absences(document));

        info!(
            flow = %flow,
            entries = entries.len() + teacher_entries.len(),
            absences = absences.len(),
            "代课文档处理完成"
        );

        Ok(BoardResult {
            flow,
            date,
            unmerged,
            entries,
            teacher_entries,
            absences,
        })
    }

    /// 读取并处理单个 JSON 文件
    pub fn process_file<P: AsRef<Path>>(&self, path: P) -> ImportResult<BoardResult> {
        let document = load_document(path.as_ref())?;
        self.process_document(&document)
    }

    /// 批量处理：每份文档独立，单份失败不影响其他文档
    pub fn process_batch<P: AsRef<Path>>(&self, paths: &[P]) -> Vec<(PathBuf, ImportResult<BoardResult>)> {
        paths
            .iter()
            .map(|path| {
                let path = path.as_ref().to_path_buf();
                let result = self.process_file(&path).map_err(|e| {
                    warn!(path = %path.display(), error = %e, "文档处理失败");
                    ImportError::BatchItemFailed {
                        path: path.display().to_string(),
                        message: e.to_string(),
                    }
                });
                (path, result)
            })
            .collect()
    }

    fn document_date(&self, document: &SubstitutionDocument) -> Option<NaiveDate> {
        let calendar = document.calendar.as_ref()?;
        match FieldParser.parse_date(calendar.date.as_ref(), "Datum") {
            Ok(date) => date,
            Err(e) => {
                warn!(error = %e, "文档日期无法解析");
                None
            }
        }
    }
}
