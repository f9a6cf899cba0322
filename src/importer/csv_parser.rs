// ==========================================
// 药理学数据导入系统 - CSV 解析器
// ==========================================
// 职责: 源文件 → ParsedData 聚合（分类森林 / 属性取值 / 分子记录）
// 契约: 固定列约定,逗号分隔,单元格内多值以分号分隔
// 策略: 未注册的列忽略;必填数值非法则整文件导入失败
// ==========================================

use crate::domain::molecule::{ParsedData, RawMoleculeRecord};
use crate::domain::types::Property;
use crate::importer::column_spec::{ColumnProperty, ColumnRegistry};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::property_registry::PropertyValueRegistry;
use crate::importer::tree_builder::ClassificationTreeBuilder;
use csv::ReaderBuilder;
use std::path::Path;

/// 单元格内多值分隔符
pub const IN_CELL_SEPARATOR: char = ';';

/// 单值列绑定（属性 → 物理列）
#[derive(Debug)]
struct ColumnBinding {
    index: usize,
    title: String,
}

/// 表头解析出的列规划
#[derive(Debug, Default)]
struct ColumnPlan {
    dci: Option<ColumnBinding>,
    skeletal_formula: Option<ColumnBinding>,
    ntr: Option<ColumnBinding>,
    level_easy: Option<ColumnBinding>,
    level_hard: Option<ColumnBinding>,
    // (层级, 列序) 升序
    system_levels: Vec<(u32, usize)>,
    class_levels: Vec<(u32, usize)>,
    // (属性, 列序)
    multi_valued: Vec<(Property, usize)>,
}

// ==========================================
// CsvMoleculeParser
// ==========================================
pub struct CsvMoleculeParser {
    registry: ColumnRegistry,
}

impl Default for CsvMoleculeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvMoleculeParser {
    pub fn new() -> Self {
        CsvMoleculeParser {
            registry: ColumnRegistry::standard(),
        }
    }

    /// 从文件解析（同步;异步调用方自行读取后走 parse_str）
    pub fn parse_file(&self, file_path: &Path) -> ImportResult<ParsedData> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }
        if let Some(ext) = file_path.extension() {
            if ext != "csv" {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let content = std::fs::read_to_string(file_path)?;
        self.parse_str(&content)
    }

    /// 从已读入的 UTF-8 内容解析
    ///
    /// 每次调用分配全新的树构建器与属性登记表,互不共享状态。
    pub fn parse_str(&self, content: &str) -> ImportResult<ParsedData> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let plan = self.resolve_headers(&headers)?;

        let mut class_builder = ClassificationTreeBuilder::new();
        let mut system_builder = ClassificationTreeBuilder::new();
        let mut value_registry = PropertyValueRegistry::new();
        let mut molecules: Vec<RawMoleculeRecord> = Vec::new();

        for result in reader.records() {
            let record = result?;
            let cells: Vec<String> = record.iter().map(|c| c.trim().to_string()).collect();

            // 跳过完全空白的行
            if cells.iter().all(|c| c.is_empty()) {
                continue;
            }

            let row_number = molecules.len() + 1;
            let cell = |binding: &Option<ColumnBinding>| -> Option<String> {
                binding
                    .as_ref()
                    .and_then(|b| cells.get(b.index))
                    .filter(|v| !v.is_empty())
                    .cloned()
            };

            // 单值列
            let dci = cell(&plan.dci);
            let skeletal_formula = cell(&plan.skeletal_formula);
            let level_easy = cell(&plan.level_easy).is_some();
            let level_hard = cell(&plan.level_hard).is_some();

            // MTE: 非空且非数值 → 整文件失败
            let ntr = match cell(&plan.ntr) {
                None => None,
                Some(value) => Some(value.parse::<i64>().map_err(|_| {
                    ImportError::MalformedRow {
                        row: row_number,
                        column: plan
                            .ntr
                            .as_ref()
                            .map(|b| b.title.clone())
                            .unwrap_or_default(),
                        value,
                    }
                })?),
            };

            // 层级列: 自一级向下取值,遇空白即止
            let system_path = collect_path(&cells, &plan.system_levels);
            let class_path = collect_path(&cells, &plan.class_levels);
            let system = system_builder.insert_path(&system_path);
            let class = class_builder.insert_path(&class_path);

            // 多值列: 单元格按分隔符拆分,逐值登记
            let mut side_effects = Vec::new();
            let mut indications = Vec::new();
            let mut interactions = Vec::new();
            for &(property, index) in &plan.multi_valued {
                let Some(raw) = cells.get(index) else { continue };
                for value in raw.split(IN_CELL_SEPARATOR) {
                    let value = value.trim();
                    if value.is_empty() {
                        continue;
                    }
                    let local_id = value_registry.resolve_value_id(property, value);
                    let target = match property {
                        Property::SideEffects => &mut side_effects,
                        Property::Indications => &mut indications,
                        Property::Interactions => &mut interactions,
                    };
                    if !target.contains(&local_id) {
                        target.push(local_id);
                    }
                }
            }

            molecules.push(RawMoleculeRecord {
                id: Some(row_number as i64),
                dci,
                skeletal_formula,
                ntr,
                level_easy,
                level_hard,
                system,
                class,
                side_effects,
                indications,
                interactions,
                row_number,
            });
        }

        Ok(ParsedData {
            classes: class_builder.into_forest(),
            systems: system_builder.into_forest(),
            side_effects: value_registry.values(Property::SideEffects).to_vec(),
            indications: value_registry.values(Property::Indications).to_vec(),
            interactions: value_registry.values(Property::Interactions).to_vec(),
            molecules,
        })
    }

    /// 将表头逐列对照注册表,产出列规划;未命中的标题直接忽略
    fn resolve_headers(&self, headers: &[String]) -> ImportResult<ColumnPlan> {
        let mut plan = ColumnPlan::default();

        for (index, title) in headers.iter().enumerate() {
            let Some(resolved) = self.registry.resolve(title) else {
                continue;
            };

            if resolved.spec.is_hierarchical() {
                let Some(level) = resolved.level else { continue };
                match resolved.spec.property() {
                    ColumnProperty::Systems => plan.system_levels.push((level, index)),
                    ColumnProperty::Classes => plan.class_levels.push((level, index)),
                    _ => {}
                }
                continue;
            }

            if resolved.spec.is_multi_valued() {
                let property = resolved
                    .spec
                    .property()
                    .as_property()
                    .ok_or_else(|| {
                        ImportError::UnknownProperty(format!("{:?}", resolved.spec.property()))
                    })?;
                plan.multi_valued.push((property, index));
                continue;
            }

            let binding = ColumnBinding {
                index,
                title: title.clone(),
            };
            match resolved.spec.property() {
                ColumnProperty::Dci => plan.dci.get_or_insert(binding),
                ColumnProperty::SkeletalFormula => plan.skeletal_formula.get_or_insert(binding),
                ColumnProperty::Ntr => plan.ntr.get_or_insert(binding),
                ColumnProperty::LevelEasy => plan.level_easy.get_or_insert(binding),
                ColumnProperty::LevelHard => plan.level_hard.get_or_insert(binding),
                _ => continue,
            };
        }

        plan.system_levels.sort_by_key(|&(level, _)| level);
        plan.class_levels.sort_by_key(|&(level, _)| level);

        Ok(plan)
    }
}

/// 按层级升序收集非空取值,首个空白层级截断路径
fn collect_path(cells: &[String], levels: &[(u32, usize)]) -> Vec<String> {
    let mut path = Vec::new();
    for &(_, index) in levels {
        match cells.get(index) {
            Some(value) if !value.is_empty() => path.push(value.clone()),
            _ => break,
        }
    }
    path
}
