// ==========================================
// 药理学数据导入系统 - 分子导入 Trait
// ==========================================
// 职责: 定义分子导入接口（不包含实现）
// ==========================================

use crate::domain::molecule::ImportOutcome;
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// MoleculeImporter Trait
// ==========================================
// 用途: 分子导入主接口
// 实现者: MoleculeImporterImpl
#[async_trait]
pub trait MoleculeImporter: Send + Sync {
    /// 从 CSV 文件生成全量替换脚本
    ///
    /// # 参数
    /// - file_path: CSV 文件路径（.csv）
    ///
    /// # 返回
    /// - Ok(ImportOutcome): 脚本（单串 + 逐条语句）与批次报告
    /// - Err: 文件读取错误、解析错误、格式化错误
    ///
    /// # 导入流程
    /// 1. 异步读取文件（唯一可挂起的步骤）
    /// 2. 解析 CSV 为 ParsedData 聚合
    /// 3. 生成 SQL 脚本
    ///
    /// 每次调用分配全新的树构建器与属性登记表,不与历史调用共享状态。
    async fn import_from_csv<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> ImportResult<ImportOutcome>;
}
