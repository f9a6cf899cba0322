// ==========================================
// 药理学数据导入系统 - SQL 语句构建工具
// ==========================================
// 职责: 生成单条带转义的 INSERT 语句
// 约束: 文本值以单引号包裹并按双写转义;数值与 NULL 不加引号
// ==========================================

use std::fmt;

// ==========================================
// SqlValue - 语句取值
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(i64),
    Text(String),
    Null,
}

impl SqlValue {
    pub fn text<S: Into<String>>(value: S) -> Self {
        SqlValue::Text(value.into())
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int(value)
    }
}

impl From<Option<i64>> for SqlValue {
    fn from(value: Option<i64>) -> Self {
        match value {
            Some(v) => SqlValue::Int(v),
            None => SqlValue::Null,
        }
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Int(v) => write!(f, "{}", v),
            SqlValue::Text(v) => write!(f, "'{}'", escape_text(v)),
            SqlValue::Null => write!(f, "NULL"),
        }
    }
}

/// 单引号双写转义
pub fn escape_text(value: &str) -> String {
    value.replace('\'', "''")
}

// ==========================================
// InsertBuilder - 单表 INSERT 构建器
// ==========================================
// 一次构建,多行复用;每次 row 调用产出一条完整语句
#[derive(Debug, Clone)]
pub struct InsertBuilder {
    table: String,
    columns: Vec<String>,
}

impl InsertBuilder {
    pub fn new<I, S>(table: &str, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        InsertBuilder {
            table: table.to_string(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// 生成一条 INSERT 语句;列清单为空时退化为全列插入
    pub fn row(&self, values: &[SqlValue]) -> String {
        let rendered = values
            .iter()
            .map(SqlValue::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        if self.columns.is_empty() {
            format!("INSERT INTO {} VALUES ({});", self.table, rendered)
        } else {
            format!(
                "INSERT INTO {} ({}) VALUES ({});",
                self.table,
                self.columns.join(", "),
                rendered
            )
        }
    }
}

/// InsertBuilder 的简写入口
pub fn insert_into<I, S>(table: &str, columns: I) -> InsertBuilder
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    InsertBuilder::new(table, columns)
}
