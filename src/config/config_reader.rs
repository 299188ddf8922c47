// ==========================================
// 代课公告系统 - 配置读取 Trait
// ==========================================
// 职责: 定义引擎所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::board_config::BoardConfig;

// ==========================================
// BoardConfigReader Trait
// ==========================================
// 用途: 编排器在每份文档开始处理时读取一次配置快照
// 实现者: ConfigManager（文件）、BoardConfig（固定值，测试用）
pub trait BoardConfigReader: Send + Sync {
    /// 获取当前配置快照
    fn board_config(&self) -> BoardConfig;
}

impl BoardConfigReader for BoardConfig {
    fn board_config(&self) -> BoardConfig {
        self.clone()
    }
}
