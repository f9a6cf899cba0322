// ==========================================
// 药理学数据导入系统 - 数据仓储层
// ==========================================
// 职责: 数据库访问;执行导入脚本与核对查询
// ==========================================

pub mod import_repo;

pub use import_repo::{ClassificationRow, ImportRepository, MoleculeRow};
