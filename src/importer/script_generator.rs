// ==========================================
// 药理学数据导入系统 - SQL 脚本生成器
// ==========================================
// 职责: ParsedData → 全量替换脚本的确定性单趟折叠
// 顺序: 事务头 → 六表清空 → 分类森林（先序）→ 属性及取值 → 分子与关联行 → 提交
// 约束: 任一分子格式化失败即整体失败,不返回半成品脚本
// ==========================================

use crate::domain::molecule::{
    truncate_chars, ClassificationNode, ParsedData, PropertyValueEntry, RawMoleculeRecord,
    MAX_PROPERTY_VALUE_LEN,
};
use crate::domain::types::Property;
use crate::importer::error::ImportResult;
use crate::importer::formatter::MoleculeFormatter;
use crate::importer::property_registry::compose_value_id;
use crate::importer::sql_builder::{insert_into, InsertBuilder, SqlValue};

/// 清空顺序固定的六张目标表
pub const TARGET_TABLES: [&str; 6] = [
    "molecule",
    "class",
    "system",
    "property",
    "property_value",
    "molecule_property",
];

// ==========================================
// SqlScriptGenerator
// ==========================================
#[derive(Debug, Default)]
pub struct SqlScriptGenerator;

impl SqlScriptGenerator {
    pub fn new() -> Self {
        SqlScriptGenerator
    }

    /// 生成逐条语句（固定顺序,执行层可自行分批）
    pub fn statements(&self, data: &ParsedData) -> ImportResult<Vec<String>> {
        let mut out: Vec<String> = Vec::new();

        // (1) 事务头: 关闭自动提交与外键检查
        out.push("START TRANSACTION;".to_string());
        out.push("SET AUTOCOMMIT=0;".to_string());
        out.push("SET FOREIGN_KEY_CHECKS = 0;".to_string());

        // (2) 六表全量清空
        for table in TARGET_TABLES {
            out.push(format!("DELETE FROM {};", table));
        }

        // (3) 恢复外键检查
        out.push("SET FOREIGN_KEY_CHECKS = 1;".to_string());

        // (4)(5) 分类森林,先序遍历保证父节点先于子节点入库
        push_classification(&mut out, "class", &data.classes);
        push_classification(&mut out, "system", &data.systems);

        // (6) 属性表与取值表
        for property in Property::ALL {
            push_property(&mut out, property, data.property_values(property));
        }

        // (7) 分子与关联行,保持输入顺序
        let formatter = MoleculeFormatter;
        for record in &data.molecules {
            push_molecule(&mut out, &formatter, record)?;
        }

        // (8) 提交并恢复自动提交
        out.push("COMMIT;".to_string());
        out.push("SET AUTOCOMMIT=1;".to_string());

        Ok(out)
    }

    /// 生成单串脚本（边界格式,语句以空格连接）
    pub fn script(&self, data: &ParsedData) -> ImportResult<String> {
        Ok(self.statements(data)?.join(" "))
    }
}

/// 分类表列名按两字符前缀派生（class → cl_*,system → sy_*）
fn classification_insert(table: &str) -> InsertBuilder {
    let prefix: String = table.chars().take(2).collect();
    insert_into(
        table,
        [
            format!("{prefix}_id"),
            format!("{prefix}_name"),
            format!("{prefix}_higher"),
            format!("{prefix}_level"),
        ],
    )
}

fn push_classification(out: &mut Vec<String>, table: &str, forest: &[ClassificationNode]) {
    let builder = classification_insert(table);
    for root in forest {
        push_node(out, &builder, root, None, 1);
    }
}

fn push_node(
    out: &mut Vec<String>,
    builder: &InsertBuilder,
    node: &ClassificationNode,
    higher: Option<i64>,
    level: i64,
) {
    out.push(builder.row(&[
        SqlValue::Int(node.id),
        SqlValue::text(node.name.as_str()),
        SqlValue::from(higher),
        SqlValue::Int(level),
    ]));
    for child in &node.children {
        push_node(out, builder, child, Some(node.id), level + 1);
    }
}

fn push_property(out: &mut Vec<String>, property: Property, values: &[PropertyValueEntry]) {
    out.push(
        insert_into("property", ["pr_id", "pr_name"]).row(&[
            SqlValue::Int(property.id()),
            SqlValue::text(property.name()),
        ]),
    );

    let builder = insert_into("property_value", ["pv_id", "pv_name", "pv_property"]);
    for value in values {
        out.push(builder.row(&[
            SqlValue::Int(compose_value_id(property.id(), value.id)),
            SqlValue::text(truncate_chars(&value.name, MAX_PROPERTY_VALUE_LEN)),
            SqlValue::Int(property.id()),
        ]));
    }
}

fn push_molecule(
    out: &mut Vec<String>,
    formatter: &MoleculeFormatter,
    record: &RawMoleculeRecord,
) -> ImportResult<()> {
    let molecule = formatter.format(record)?;

    out.push(
        insert_into(
            "molecule",
            [
                "mo_id",
                "mo_dci",
                "mo_skeletal_formula",
                "mo_ntr",
                "mo_difficulty",
                "mo_system",
                "mo_class",
            ],
        )
        .row(&[
            SqlValue::Int(molecule.id),
            SqlValue::text(molecule.dci.as_str()),
            SqlValue::text(molecule.skeletal_formula.as_str()),
            SqlValue::Int(molecule.ntr),
            SqlValue::text(molecule.difficulty.to_string()),
            SqlValue::from(molecule.system),
            SqlValue::from(molecule.class),
        ]),
    );

    // 关联行使用拼接后的全局 pv_id,而非局部 ID
    let builder = insert_into("molecule_property", ["mo_id", "pv_id"]);
    for property in Property::ALL {
        for &local_id in molecule.property_values(property) {
            out.push(builder.row(&[
                SqlValue::Int(molecule.id),
                SqlValue::Int(compose_value_id(property.id(), local_id)),
            ]));
        }
    }

    Ok(())
}
