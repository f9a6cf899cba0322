// ==========================================
// 药理学数据导入系统 - 导入层
// ==========================================
// 职责: 源文件解析,分类树重建,属性去重,脚本生成
// 流程: 解析 → 树折叠 / 取值登记 → 格式化 → 脚本
// ==========================================

// 模块声明
pub mod column_spec;
pub mod csv_parser;
pub mod error;
pub mod formatter;
pub mod molecule_importer_impl;
pub mod molecule_importer_trait;
pub mod property_registry;
pub mod script_generator;
pub mod sql_builder;
pub mod tree_builder;

// 重导出核心类型
pub use column_spec::{ColumnKind, ColumnProperty, ColumnRegistry, ColumnSpecification};
pub use csv_parser::{CsvMoleculeParser, IN_CELL_SEPARATOR};
pub use error::{ImportError, ImportResult};
pub use formatter::MoleculeFormatter;
pub use molecule_importer_impl::MoleculeImporterImpl;
pub use molecule_importer_trait::MoleculeImporter;
pub use property_registry::{compose_value_id, PropertyValueRegistry};
pub use script_generator::{SqlScriptGenerator, TARGET_TABLES};
pub use sql_builder::{insert_into, InsertBuilder, SqlValue};
pub use tree_builder::ClassificationTreeBuilder;
