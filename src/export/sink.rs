// ==========================================
// 代课公告系统 - 输出接口
// ==========================================
// 职责: 定义渲染/导出端消费 BoardResult 的接口
// 红线: 实现端只遍历已排序分组，不重新分组排序
// ==========================================

use crate::engine::orchestrator::BoardResult;
use crate::export::error::ExportResult;
use chrono::NaiveDate;
use std::path::PathBuf;

pub trait EntrySink {
    /// 写出一份公告结果
    ///
    /// # 参数
    /// - result: 编排器输出
    /// - date: 文件命名日期（文档无日期时由调用方提供）
    ///
    /// # 返回
    /// 写出的文件路径
    fn write(&self, result: &BoardResult, date: NaiveDate) -> ExportResult<Vec<PathBuf>>;
}
