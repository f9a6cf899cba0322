// ==========================================
// 药理学数据导入系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 参考数据全量替换导入（单事务,不做增量合并）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 解析 / 树构建 / 脚本生成
pub mod importer;

// 数据仓储层 - 脚本执行与核对查询
pub mod repository;

// 数据库基础设施（连接初始化 / PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{Difficulty, Property};

// 领域实体
pub use domain::{
    ClassificationNode, ImportOutcome, ImportReport, Molecule, ParsedData, PropertyValueEntry,
    RawMoleculeRecord,
};

// 导入层
pub use importer::{
    ClassificationTreeBuilder, ColumnRegistry, CsvMoleculeParser, ImportError, ImportResult,
    MoleculeFormatter, MoleculeImporter, MoleculeImporterImpl, PropertyValueRegistry,
    SqlScriptGenerator,
};

// 数据仓储
pub use repository::ImportRepository;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "药理学参考数据导入系统";
