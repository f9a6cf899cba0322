// ==========================================
// 药理学数据导入系统 - 分子导入器实现
// ==========================================
// 职责: 整合导入流程,从文件到可执行脚本
// 流程: 读取 → 解析 → 生成脚本 → 批次报告
// ==========================================

use crate::domain::molecule::{count_nodes, ImportOutcome, ImportReport};
use crate::importer::csv_parser::CsvMoleculeParser;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::molecule_importer_trait::MoleculeImporter;
use crate::importer::script_generator::SqlScriptGenerator;
use chrono::Utc;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

// ==========================================
// MoleculeImporterImpl
// ==========================================
pub struct MoleculeImporterImpl {
    parser: CsvMoleculeParser,
    generator: SqlScriptGenerator,
}

impl Default for MoleculeImporterImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl MoleculeImporterImpl {
    pub fn new() -> Self {
        MoleculeImporterImpl {
            parser: CsvMoleculeParser::new(),
            generator: SqlScriptGenerator::new(),
        }
    }
}

#[async_trait::async_trait]
impl MoleculeImporter for MoleculeImporterImpl {
    #[instrument(skip(self, file_path), fields(batch_id))]
    async fn import_from_csv<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> ImportResult<ImportOutcome> {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();

        let path = file_path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.to_string());
        info!(
            batch_id = %batch_id,
            file = %path.display(),
            "开始导入分子数据"
        );

        if !path.exists() {
            error!(file = %path.display(), "文件不存在");
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
        if let Some(ext) = path.extension() {
            if ext != "csv" {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        // === 步骤 1: 读取文件（唯一的异步边界）===
        debug!("步骤 1: 读取文件");
        let content = tokio::fs::read_to_string(path).await?;

        // === 步骤 2: 解析 CSV ===
        debug!("步骤 2: 解析 CSV");
        let data = self.parser.parse_str(&content).map_err(|e| {
            error!(error = %e, "CSV 解析失败");
            e
        })?;
        info!(
            molecules = data.molecules.len(),
            class_nodes = count_nodes(&data.classes),
            system_nodes = count_nodes(&data.systems),
            "CSV 解析完成"
        );

        // === 步骤 3: 生成 SQL 脚本 ===
        debug!("步骤 3: 生成 SQL 脚本");
        let statements = self.generator.statements(&data).map_err(|e| {
            error!(error = %e, "脚本生成失败");
            e
        })?;
        let script = statements.join(" ");

        // === 步骤 4: 批次报告 ===
        let report = ImportReport {
            batch_id: batch_id.clone(),
            file_name,
            total_rows: data.molecules.len(),
            molecule_count: data.molecules.len(),
            class_node_count: count_nodes(&data.classes),
            system_node_count: count_nodes(&data.systems),
            property_value_count: data.side_effects.len()
                + data.indications.len()
                + data.interactions.len(),
            statement_count: statements.len(),
            imported_at: Utc::now(),
            elapsed_ms: start_time.elapsed().as_millis() as i64,
        };

        info!(
            batch_id = %batch_id,
            molecules = report.molecule_count,
            statements = report.statement_count,
            elapsed_ms = report.elapsed_ms,
            "分子导入脚本生成完成"
        );

        Ok(ImportOutcome {
            script,
            statements,
            report,
        })
    }
}
