// ==========================================
// 药理学数据导入系统 - 分子领域模型
// ==========================================
// 用途: 导入管道的中间结构与最终入库结构
// 生命周期: 全部为单次导入内的瞬时对象,每次导入整体重建
// ==========================================

use crate::domain::types::{Difficulty, Property};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// 字段长度上限（数据库列宽约束）
// ==========================================
pub const MAX_DCI_LEN: usize = 128;
pub const MAX_PROPERTY_VALUE_LEN: usize = 128;
pub const MAX_CLASSIFICATION_VALUE_LEN: usize = 128;
pub const MAX_SKELETAL_FORMULA_LEN: usize = 64;

/// 按字符数截断（列宽按字符计,非字节）
pub fn truncate_chars(value: &str, max_len: usize) -> String {
    value.chars().take(max_len).collect()
}

// ==========================================
// ClassificationNode - 分类树节点
// ==========================================
// 不变量: 节点层级 = 距根深度（根为 1）;同一 (层级, 名称, 父节点) 只存在一个节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationNode {
    pub id: i64,                          // 分类内唯一 ID（首见顺序分配）
    pub name: String,                     // 节点名称
    pub children: Vec<ClassificationNode>, // 子节点（追加顺序）
}

/// 统计森林的节点总数
pub fn count_nodes(forest: &[ClassificationNode]) -> usize {
    forest
        .iter()
        .map(|node| 1 + count_nodes(&node.children))
        .sum()
}

// ==========================================
// PropertyValueEntry - 属性取值
// ==========================================
// id 为属性内局部序号,入库前经复合拼接得到全局 pv_id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyValueEntry {
    pub id: i64,      // 属性内局部 ID（从 1 起,首见顺序）
    pub name: String, // 取值文本
}

// ==========================================
// RawMoleculeRecord - 解析中间结构体
// ==========================================
// 用途: CSV 解析产物,一行一条;尚未格式化,字段可缺失
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMoleculeRecord {
    pub id: Option<i64>,              // 分子 ID（解析器按行序分配）
    pub dci: Option<String>,          // 国际非专利药名
    pub skeletal_formula: Option<String>, // 化学骨架式
    pub ntr: Option<i64>,             // 窄治疗窗标记（MTE 列）
    pub level_easy: bool,             // 基础级标记列
    pub level_hard: bool,             // 专家级标记列
    pub system: Option<i64>,          // 所属系统节点 ID（路径最深节点）
    pub class: Option<i64>,           // 所属药理分类节点 ID（路径最深节点）
    pub side_effects: Vec<i64>,       // 不良反应局部 ID 集
    pub indications: Vec<i64>,        // 适应症局部 ID 集
    pub interactions: Vec<i64>,       // 相互作用局部 ID 集

    // 元信息
    pub row_number: usize, // 源文件数据行号（报错定位用）
}

// ==========================================
// Molecule - 格式化后的分子
// ==========================================
// 不可变记录,由 MoleculeFormatter 纯函数产出,之后不再修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Molecule {
    pub id: i64,                  // 主键（mo_id）
    pub dci: String,              // 截断至 128 字符
    pub skeletal_formula: String, // 截断至 64 字符,缺失为空串
    pub ntr: i64,                 // 缺失时为 0
    pub difficulty: Difficulty,   // 由专家级标记派生
    pub system: Option<i64>,      // 系统节点 ID
    pub class: Option<i64>,       // 药理分类节点 ID
    pub side_effects: Vec<i64>,   // 局部属性值 ID
    pub indications: Vec<i64>,
    pub interactions: Vec<i64>,
}

impl Molecule {
    /// 按属性取局部值 ID 列表
    pub fn property_values(&self, property: Property) -> &[i64] {
        match property {
            Property::SideEffects => &self.side_effects,
            Property::Indications => &self.indications,
            Property::Interactions => &self.interactions,
        }
    }
}

// ==========================================
// ParsedData - 解析聚合结果
// ==========================================
// CSV 解析器的唯一输出,脚本生成器的唯一输入
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedData {
    pub classes: Vec<ClassificationNode>,       // 药理分类森林（一级节点列表）
    pub systems: Vec<ClassificationNode>,       // 人体系统森林
    pub side_effects: Vec<PropertyValueEntry>,  // 不良反应全量去重取值
    pub indications: Vec<PropertyValueEntry>,   // 适应症全量去重取值
    pub interactions: Vec<PropertyValueEntry>,  // 相互作用全量去重取值
    pub molecules: Vec<RawMoleculeRecord>,      // 每数据行一条,未格式化
}

impl ParsedData {
    /// 按属性取全量去重取值列表
    pub fn property_values(&self, property: Property) -> &[PropertyValueEntry] {
        match property {
            Property::SideEffects => &self.side_effects,
            Property::Indications => &self.indications,
            Property::Interactions => &self.interactions,
        }
    }
}

// ==========================================
// ImportReport - 导入批次报告
// ==========================================
// 用途: 记录单次导入的批次元信息与汇总统计
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub batch_id: String,           // 批次 ID（UUID）
    pub file_name: Option<String>,  // 源文件名
    pub total_rows: usize,          // 数据行数（不含表头与空行）
    pub molecule_count: usize,      // 生成的分子条数
    pub class_node_count: usize,    // 药理分类节点数
    pub system_node_count: usize,   // 系统节点数
    pub property_value_count: usize, // 三属性取值总数
    pub statement_count: usize,     // 脚本语句条数
    pub imported_at: DateTime<Utc>, // 脚本生成时间
    pub elapsed_ms: i64,            // 耗时（毫秒）
}

// ==========================================
// ImportOutcome - 导入产物
// ==========================================
// script 为单串边界格式;statements 为逐条语句,执行层可自行选择批量方式
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub script: String,          // 完整 SQL 脚本（单串）
    pub statements: Vec<String>, // 逐条语句（与 script 等价,固定顺序）
    pub report: ImportReport,    // 批次报告
}
