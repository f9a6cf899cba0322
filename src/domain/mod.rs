// ==========================================
// 药理学数据导入系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含解析逻辑,不含数据访问逻辑
// ==========================================

pub mod molecule;
pub mod types;

// 重导出核心类型
pub use molecule::{
    count_nodes, truncate_chars, ClassificationNode, ImportOutcome, ImportReport, Molecule,
    ParsedData, PropertyValueEntry, RawMoleculeRecord, MAX_CLASSIFICATION_VALUE_LEN, MAX_DCI_LEN,
    MAX_PROPERTY_VALUE_LEN, MAX_SKELETAL_FORMULA_LEN,
};
pub use types::{Difficulty, Property};
